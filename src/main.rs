mod ui;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::info;

use prepvista::config::AppConfig;
use prepvista::panels::AppContext;
use prepvista::panels::library::{Category, Difficulty, LibraryPanel, QuestionType};
use prepvista::panels::reports::{ReportKind, ReportsPanel};
use prepvista::{Filtered, PrepVistaError, Shell, SimulatedIdentityProvider};
use ui::PrepVistaApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the dashboard window (default)
    App {
        /// Seed for the simulated live metrics
        #[arg(short, long)]
        seed: Option<u64>,

        /// Deny camera access to the simulated devices
        #[arg(long)]
        deny_camera: bool,

        /// Deny microphone access to the simulated devices
        #[arg(long)]
        deny_microphone: bool,
    },
    /// Print the question library, filtered
    Library {
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        #[arg(short, long)]
        kind: Option<QuestionType>,

        #[arg(short, long)]
        bookmarked: bool,
    },
    /// Write the report list as JSON lines
    Export {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        kind: Option<ReportKind>,
    },
}

fn app(seed: Option<u64>, deny_camera: bool, deny_microphone: bool) -> Result<(), PrepVistaError> {
    let app_config = AppConfig::from_local_file().unwrap_or_default();
    let shell = Shell::new(
        Box::new(SimulatedIdentityProvider),
        AppContext::from_config(&app_config.with_overrides(seed, deny_camera, deny_microphone)),
    );

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("PrepVista")
        .with_inner_size(Vec2::new(
            app_config.window_size.width,
            app_config.window_size.height,
        ))
        .with_min_inner_size(Vec2::new(800., 600.));

    eframe::run_native(
        "PrepVista",
        native_options,
        Box::new(|cc| Ok(Box::new(PrepVistaApp::new(shell, app_config, cc)))),
    )
    .map_err(|e| PrepVistaError::WindowError {
        description: e.to_string(),
    })
}

fn library(
    query: String,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    kind: Option<QuestionType>,
    bookmarked: bool,
) {
    let mut panel = LibraryPanel::default();
    panel.filter.query = query;
    panel.filter.category = category;
    panel.filter.difficulty = difficulty;
    panel.filter.kind = kind;
    panel.filter.bookmarked_only = bookmarked;

    match panel.filtered() {
        Filtered::Empty => println!("No questions found"),
        Filtered::Matches(questions) => {
            for q in questions {
                let star = if q.bookmarked { "*" } else { " " };
                println!(
                    "{star} {:>2}  [{} / {} / {}]  {}",
                    q.id, q.category, q.difficulty, q.kind, q.text
                );
            }
        }
    }
}

fn export(output: &Path, kind: Option<ReportKind>) -> Result<(), PrepVistaError> {
    let mut panel = ReportsPanel::default();
    panel.kind_filter = kind;
    let written = panel.export(output)?;
    info!("Wrote {written} reports");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let result = match cli.command {
        None => app(None, false, false),
        Some(Commands::App {
            seed,
            deny_camera,
            deny_microphone,
        }) => app(seed, deny_camera, deny_microphone),
        Some(Commands::Library {
            query,
            category,
            difficulty,
            kind,
            bookmarked,
        }) => {
            library(query, category, difficulty, kind, bookmarked);
            Ok(())
        }
        Some(Commands::Export { output, kind }) => export(&output, kind),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

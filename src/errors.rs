// Error types for prepvista

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum PrepVistaError {
    // Navigation errors
    #[snafu(display("Unknown section id: {id}"))]
    UnknownSection { id: String },

    // Media device errors
    #[snafu(display("Permission to use the {device} was denied"))]
    PermissionDenied { device: String },

    // File selection errors
    #[snafu(display("{name} is not a supported file, expected {expected}"))]
    UnsupportedFileType { name: String, expected: String },
    #[snafu(display(
        "{name} is too large ({size_bytes} bytes), the limit is {limit_bytes} bytes"
    ))]
    FileTooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },
    #[snafu(display("No file selected"))]
    NoFileSelected,
    #[snafu(display("Could not read file metadata for {path}"))]
    FileMetadataError { path: String, source: io::Error },

    // Phase machine errors
    #[snafu(display("{machine}: cannot {action} while {phase}"))]
    InvalidTransition {
        machine: String,
        action: String,
        phase: String,
    },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidInput { field: String, reason: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // UI errors
    #[snafu(display("Could not start the application window: {description}"))]
    WindowError { description: String },

    // Export errors
    #[snafu(display("Error writing export file"))]
    ExportError { source: io::Error },
    #[snafu(display("Error serializing export data"))]
    ExportSerializeError { source: serde_json::Error },
}

impl PrepVistaError {
    pub(crate) fn invalid_transition(machine: &str, action: &str, phase: &str) -> Self {
        PrepVistaError::InvalidTransition {
            machine: machine.to_string(),
            action: action.to_string(),
            phase: phase.to_string(),
        }
    }
}

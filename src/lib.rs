// Library interface for prepvista
// Every state machine lives here so it can be driven without a window

pub mod config;
pub mod devices;
pub mod errors;
pub mod export;
pub mod files;
pub mod navigation;
pub mod panels;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod workflow;

// Re-export commonly used types
pub use config::{AppConfig, Timings};
pub use devices::{DevicePermissions, MediaConstraints, MediaDevices, MediaStream, SimulatedDevices};
pub use errors::PrepVistaError;
pub use navigation::{SectionId, SectionRouter};
pub use panels::{AppContext, CommitOutcome, Filtered, Panel};
pub use scheduler::{Scheduler, TimerId};
pub use session::{AuthGate, IdentityProvider, SimulatedIdentityProvider, User};
pub use shell::{Shell, Workspace};
pub use workflow::{Phase, PhaseMachine, Workflow};

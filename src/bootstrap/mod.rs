pub mod config;
pub mod paths;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use paths::AppPaths;
pub use run::run_app;
pub use wiring::{wire_dependencies, wire_with, AppDeps, KeyStorage, WiringError};

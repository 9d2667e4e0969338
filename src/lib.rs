pub mod app;
pub mod model;
pub mod ui;

/// Default `RUST_LOG` directives. Library events carry the `bugyard_lib`
/// target prefix, so that target must be enabled explicitly or nothing
/// the model layer logs would reach the log file.
pub const DEFAULT_LOG_DIRECTIVES: &str = "bugyard=info,bugyard_lib=info";

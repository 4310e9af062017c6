use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medcase";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("{}=debug,info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Medcase/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Medcase")
}

/// Get the root directory holding one subdirectory per diagnostic case
pub fn cases_dir() -> PathBuf {
    app_data_dir().join("cases")
}

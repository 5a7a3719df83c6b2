//! Application version reported by `/version` and `--version`.

/// Crate version, e.g. `0.0.1`.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_version() -> &'static str {
    APP_VERSION
}

/// One-line banner printed by `--version`, e.g. `HiveBox App Version: 0.0.1`.
pub fn version_banner() -> String {
    format!("HiveBox App Version: {}", APP_VERSION)
}

/// Prints the version banner to stdout.
pub fn print_version() {
    println!("{}", version_banner());
}

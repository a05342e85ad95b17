mod macros;

/// Returns the version of the backend. Release builds may override the crate
/// version by setting `LANDING_VERSION` at compile time.
pub const fn landing_version() -> &'static str {
    match option_env!("LANDING_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

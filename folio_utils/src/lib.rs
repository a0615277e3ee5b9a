mod macros;

/// Returns the version string reported by the binaries and the relay user
/// agent.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

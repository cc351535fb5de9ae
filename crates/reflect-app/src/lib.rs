pub mod config;
pub mod session;

/// Log filter used when `RUST_LOG` is unset. Logs go to stderr so they never
/// mix with the journal on stdout.
pub const DEFAULT_LOG_FILTER: &str =
    "reflect_app=info,reflect_auth=info,reflect_db=warn,reflect_journal=warn";

use std::io;
use std::sync::Arc;

use tracing::info;

use reflect_app::DEFAULT_LOG_FILTER;
use reflect_app::config::Config;
use reflect_app::session;
use reflect_auth::CredentialStore;
use reflect_db::Database;
use reflect_journal::EntryStore;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env();

    // Init databases
    let users_db = Arc::new(Database::open(&config.users_db)?);
    let entries_db = if config.shared_file() {
        users_db.clone()
    } else {
        Arc::new(Database::open(&config.entries_db)?)
    };

    let credentials = CredentialStore::new(users_db);
    let entries = EntryStore::new(entries_db);

    // Already logged by the stores; a table left over from a previous run
    // is still usable.
    let _ = credentials.ensure_schema();
    let _ = entries.ensure_schema();

    info!(
        "Reflect starting (users: {}, entries: {})",
        config.users_db.display(),
        config.entries_db.display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    session::run(&credentials, &entries, stdin.lock(), stdout.lock())?;

    Ok(())
}

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use phpbb2static::config::Settings;
use phpbb2static::db::Database;
use phpbb2static::export::Exporter;
use phpbb2static::logging;

/// Settings file looked up in the working directory.
const SETTINGS_FILE: &str = "settings.toml";

/// Output tree root. Downstream hosting relies on this exact layout.
const EXPORT_ROOT: &str = "export";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // An unreadable settings file is not fatal: continue with defaults, which
    // in practice surfaces as a connection failure a few lines down.
    let (settings, settings_error) = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    let _log_guard = logging::init(&settings.logger).context("Failed to initialize logging")?;

    if let Some(e) = settings_error {
        warn!("Could not load {SETTINGS_FILE}: {e}. Continuing with defaults.");
    }

    info!("Starting phpbb2static");

    let db = Database::connect(&settings.phpbb_db)
        .await
        .context("Could not access the database. Aborting site creation")?;

    info!(
        host = %settings.phpbb_db.host,
        database = %settings.phpbb_db.database,
        "Database connection established"
    );

    let summary = Exporter::new(db, EXPORT_ROOT).run().await?;

    info!(
        forums = summary.forums_written,
        topics = summary.topics_written,
        forums_skipped = summary.forums_skipped,
        topics_skipped = summary.topics_skipped,
        "Export complete"
    );

    Ok(())
}

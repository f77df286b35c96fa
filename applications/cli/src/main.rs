/// Encore - terminal music player
use clap::Parser;
use encore_cli::{
    cli::{Cli, Command},
    commands::prepare_queue,
    App, EncoreConfig,
};
use encore_core::Catalog;
use encore_playback::{PlaybackSession, SilentEngine};
use encore_storage::{Preferences, SqliteStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration first: it may carry the log filter
    let config = EncoreConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = Catalog::load(&config.catalog.path)?;
    tracing::info!(
        path = %config.catalog.path.display(),
        tracks = catalog.len(),
        "Catalog loaded"
    );

    let store = SqliteStore::open(&config.storage.database_url).await?;
    let app = App::new(catalog, Preferences::new(Arc::new(store)));

    let mut stdout = std::io::stdout();
    match cli.command {
        Command::Play(args) => {
            let mut rng = StdRng::from_entropy();
            let (queue, start) =
                prepare_queue(&app.catalog, &app.preferences, &args, &mut rng).await?;
            let engine = Arc::new(SilentEngine::new(config.track_length()));
            let session = PlaybackSession::new(engine);

            let input = BufReader::new(tokio::io::stdin());
            app.play(
                &*session,
                queue,
                start,
                input,
                &mut stdout,
            )
            .await?;
        }
        command => app.execute(command, &mut stdout).await?,
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use echo_client::{
    broker::HttpBroker, create_router, AppState, CallSession, Config, FileStore, KvStore,
    MediaTransport, MessageLog, NatsTransport, SessionBroker, TrackRegistry,
};

#[derive(Parser)]
#[command(name = "echo", version, about = "Echo language-practice client core")]
struct Cli {
    /// Configuration file (name without extension, config-crate style)
    #[arg(long, default_value = "config/echo")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("Session broker at {}", cfg.broker.base_url);
    info!("Transport fabric at {}", cfg.rtc.nats_url);

    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(&cfg.storage.data_dir)?);
    let tracks = Arc::new(Mutex::new(TrackRegistry::open(Arc::clone(&store))));
    let messages = Arc::new(Mutex::new(MessageLog::open(store)));

    let broker: Arc<dyn SessionBroker> = Arc::new(HttpBroker::new(cfg.broker.base_url.clone()));
    let transport: Arc<dyn MediaTransport> =
        Arc::new(NatsTransport::new(cfg.rtc.nats_url.clone(), cfg.rtc.app_id.clone()));

    let call = Arc::new(CallSession::new(
        Arc::clone(&broker),
        transport,
        Arc::clone(&messages),
    ));

    let state = AppState::new(tracks, messages, call, broker);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

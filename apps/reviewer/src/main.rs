mod analysis;
mod auth;
mod config;
mod errors;
mod extraction;
mod render;
mod routes;
mod sessions;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::spelling::SymSpellCorrector;
use crate::analysis::SkillVocabulary;
use crate::config::Config;
use crate::extraction::PdfExtractBackend;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume reviewer v{}", env!("CARGO_PKG_VERSION"));

    // Fail fast on a broken skill list; it is reloaded on every check
    let vocabulary = SkillVocabulary::load(&config.skills_path)
        .context("skill vocabulary must be readable and non-empty")?;
    info!(
        "Skill vocabulary: {} phrase(s) from {}",
        vocabulary.len(),
        config.skills_path.display()
    );

    let corrector = SymSpellCorrector::load(&config.lexicon_path)
        .context("spelling lexicon must be readable and non-empty")?;
    info!(
        "Spelling lexicon: {} word(s) from {}",
        corrector.len(),
        config.lexicon_path.display()
    );

    let state = AppState::new(config.clone(), Arc::new(corrector), Arc::new(PdfExtractBackend));
    tokio::spawn(sweep_sessions(state.sessions.clone()));

    let app = build_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn sweep_sessions(sessions: SessionStore) {
    let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        let removed = sessions.purge_expired();
        if removed > 0 {
            debug!(
                "Swept {removed} idle session(s), {} active",
                sessions.active_count()
            );
        }
    }
}

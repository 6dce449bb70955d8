use std::sync::Arc;

use crate::analysis::SpellCorrector;
use crate::auth::CredentialGate;
use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialGate,
    pub sessions: SessionStore,
    /// Pluggable spelling service. Default: SymSpellCorrector over LEXICON_PATH.
    pub corrector: Arc<dyn SpellCorrector>,
    /// Pluggable PDF text layer reader. Default: PdfExtractBackend.
    pub pdf: Arc<dyn PdfTextExtractor>,
}

impl AppState {
    pub fn new(
        config: Config,
        corrector: Arc<dyn SpellCorrector>,
        pdf: Arc<dyn PdfTextExtractor>,
    ) -> Self {
        AppState {
            credentials: CredentialGate::new(config.username.clone(), config.password.clone()),
            sessions: SessionStore::new(config.session_idle_minutes),
            config,
            corrector,
            pdf,
        }
    }
}

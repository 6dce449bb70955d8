// In-memory per-browser sessions.
// A session exists only after a successful login, so presence in the store
// means "authenticated". Each session owns at most one uploaded document and
// the report artifacts generated from it; a new upload discards them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::extraction::ResumeDocument;
use crate::render::ReportArtifacts;

pub const SESSION_COOKIE: &str = "review_session";

/// Session id placed in request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[derive(Debug, Clone)]
pub struct Session {
    pub last_seen: DateTime<Utc>,
    pub document: Option<Arc<ResumeDocument>>,
    pub artifacts: Option<ReportArtifacts>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Session {
            last_seen: now,
            document: None,
            artifacts: None,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_minutes: i64) -> Self {
        SessionStore {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: Duration::minutes(idle_minutes),
        }
    }

    /// Opens a session for a freshly authenticated browser.
    pub fn create(&self) -> SessionId {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut sessions = self.inner.write();
        sessions.insert(id, Session::new(now));
        debug!("Session opened ({} active)", sessions.len());
        SessionId(id)
    }

    /// Marks the session as used. Returns false if it is unknown or has been
    /// idle too long; an expired session is dropped.
    pub fn touch(&self, id: SessionId) -> bool {
        self.touch_at(id, Utc::now())
    }

    pub(crate) fn touch_at(&self, id: SessionId, now: DateTime<Utc>) -> bool {
        let mut sessions = self.inner.write();
        match sessions.get_mut(&id.0) {
            Some(session) if now - session.last_seen < self.idle_timeout => {
                session.last_seen = now;
                true
            }
            Some(_) => {
                sessions.remove(&id.0);
                info!("Session expired after {} idle minute(s)", self.idle_timeout.num_minutes());
                false
            }
            None => false,
        }
    }

    pub fn remove(&self, id: SessionId) {
        self.inner.write().remove(&id.0);
    }

    /// Drops every session idle past the timeout. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub(crate) fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write();
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen < self.idle_timeout);
        before - sessions.len()
    }

    pub fn active_count(&self) -> usize {
        self.inner.read().len()
    }

    /// Replaces the current document and discards any earlier report.
    pub fn set_document(&self, id: SessionId, document: Arc<ResumeDocument>) {
        if let Some(session) = self.inner.write().get_mut(&id.0) {
            session.document = Some(document);
            session.artifacts = None;
        }
    }

    pub fn clear_document(&self, id: SessionId) {
        if let Some(session) = self.inner.write().get_mut(&id.0) {
            session.document = None;
            session.artifacts = None;
        }
    }

    pub fn set_artifacts(&self, id: SessionId, artifacts: ReportArtifacts) {
        if let Some(session) = self.inner.write().get_mut(&id.0) {
            session.artifacts = Some(artifacts);
        }
    }

    pub fn document(&self, id: SessionId) -> Option<Arc<ResumeDocument>> {
        self.inner.read().get(&id.0)?.document.clone()
    }

    pub fn artifacts(&self, id: SessionId) -> Option<ReportArtifacts> {
        self.inner.read().get(&id.0)?.artifacts.clone()
    }
}

use std::sync::Arc;
use std::time::Duration;

use skyfare_core::OfferSource;
use skyfare_offer::{SessionSettings, TypeaheadConfig};
use tokio::sync::RwLock;

use crate::registry::SessionRegistry;

pub type SessionStore = Arc<RwLock<SessionRegistry>>;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn OfferSource>,
    pub sessions: SessionStore,
    pub settings: SessionSettings,
    pub typeahead: TypeaheadConfig,
}

impl AppState {
    pub fn new(
        source: Arc<dyn OfferSource>,
        settings: SessionSettings,
        typeahead: TypeaheadConfig,
        session_ttl: Duration,
    ) -> Self {
        Self {
            source,
            sessions: Arc::new(RwLock::new(SessionRegistry::new(session_ttl))),
            settings,
            typeahead,
        }
    }
}

pub mod types;
pub mod errors;
pub mod config;
pub mod identity;
pub mod profiles;
pub mod accounts;
pub mod callable;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use config::Config;
use identity::IdentityProvider;
use profiles::ProfileStore;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        config: Config,
    ) -> Arc<Self> {
        Arc::new(Self {
            identity,
            profiles,
            config,
        })
    }
}

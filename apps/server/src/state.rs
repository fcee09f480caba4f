use std::sync::Arc;

use crate::config::ServerConfig;
use crate::salesforce::CrmApi;

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// The CRM client already holds the session obtained at startup, so a
/// handler can never run before login has finished.
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<dyn CrmApi>,
    pub config: Arc<ServerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_implements_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}

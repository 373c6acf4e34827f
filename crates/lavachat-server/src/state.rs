//! Application State

use std::sync::Arc;

use lavachat_payments::LavaClient;

use crate::config::ServerConfig;

/// Shared application state
///
/// Everything here is immutable after startup; per-request state never
/// outlives its request.
#[derive(Clone)]
pub struct AppState {
    /// Payments service client
    pub lava: Arc<LavaClient>,

    /// Process configuration
    pub config: Arc<ServerConfig>,
}

//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

pub use crate::config::ApiConfig;
use crate::context::DashboardContext;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Tables, options and map loaded at startup; never mutated
    pub context: Arc<DashboardContext>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(context: Arc<DashboardContext>, config: ApiConfig) -> Self {
        Self {
            context,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

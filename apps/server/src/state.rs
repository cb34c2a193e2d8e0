//! Shared handler state.

use std::sync::Arc;

use mostrador_db::{PosServices, ProcessorPolicy, Store};

/// Cloned into every handler; the services share one store.
#[derive(Clone)]
pub struct AppState {
    pub services: PosServices,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, policy: ProcessorPolicy) -> Self {
        AppState {
            services: PosServices::new(store, policy),
        }
    }
}

use config::Config;
use store::SharedStore;

pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod scheduler;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self { store, config }
    }
}

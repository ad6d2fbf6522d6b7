//! Wedding RSVP Server Library
//!
//! Guest login, RSVPs, gift registry, payment proofs and the guestbook,
//! exported for the binary and for integration tests.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod storage;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};
pub use routes::create_router;

use std::sync::Arc;

use storage::{CloudinaryStorage, LocalStorage, ProofStorage};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub storage: Arc<dyn ProofStorage>,
}

impl AppState {
    /// Create a new AppState with an explicit storage provider
    pub fn new(db: Db, config: Config, storage: Arc<dyn ProofStorage>) -> Self {
        Self {
            db,
            config,
            storage,
        }
    }

    /// Create a new AppState, picking Cloudinary when credentials are configured
    pub fn from_config(db: Db, config: Config) -> Self {
        let storage: Arc<dyn ProofStorage> = match &config.cloudinary {
            Some(cloudinary) => Arc::new(CloudinaryStorage::new(cloudinary.clone())),
            None => Arc::new(LocalStorage::new(&config.upload_dir)),
        };
        tracing::info!("Payment proof storage: {}", storage.name());

        Self::new(db, config, storage)
    }
}

//! recording-manager - A storage and playback API for browser screen recordings
//!
//! This crate provides recording upload, metadata listing, and playback streaming with:
//! - Swappable blob storage (local filesystem behind a `BlobStore` trait)
//! - redb embedded database for metadata (ACID, MVCC, crash-safe)
//! - REST API with multipart upload support
//! - A reqwest-based client mirroring the browser capture client's HTTP boundary

pub mod api;
pub mod blob_store;
pub mod client;
pub mod config;
pub mod storage;

use std::sync::Arc;

use config::Config;
use storage::Database;

/// Shared application state, passed explicitly to every handler.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub blob_store: Arc<dyn blob_store::BlobStore>,
}

//! # techstore-db: Persistence Layer for TechStore
//!
//! This crate stores the cart snapshot between runs. Storage is a plain
//! string key-value interface with three backends.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TechStore Data Flow                              │
//! │                                                                         │
//! │  Session actor: Effect::PersistCart(cart)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  techstore-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Repository   │    │    Stores     │    │  Migrations  │  │   │
//! │  │   │  (cart.rs)    │───►│ KeyValueStore │    │  (embedded)  │  │   │
//! │  │   │               │    │ Sqlite/File/  │    │ 001_kv_store │  │   │
//! │  │   │ CartRepository│    │ Memory        │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ pool.rs                        │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite file or JSON file in the platform data directory       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `KeyValueStore` trait and backends
//! - [`pool`] - SQLite pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Cart snapshot repository
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use techstore_db::{CartRepository, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("techstore.db")).await?;
//! let carts = CartRepository::new(db.kv_store());
//!
//! let cart = carts.load().await?;
//! carts.save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::CartRepository;
pub use store::{AnyStore, JsonFileStore, KeyValueStore, MemoryStore, SqliteStore};

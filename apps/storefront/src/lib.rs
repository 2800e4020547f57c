//! # TechStore Storefront Library
//!
//! Wires configuration, storage, the session actor and the console together.
//!
//! ## Module Organization
//! ```text
//! techstore_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── StorefrontConfig (defaults → TOML → env)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── Session actor (machine + timers + store)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── navigation.rs ◄─ Screen changes
//! │   └── checkout.rs ◄─── Payment commands
//! ├── console.rs      ◄─── Input parsing and the console loop
//! ├── render.rs       ◄─── Text screens
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod render;
pub mod state;

use std::path::PathBuf;

use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use techstore_core::Catalog;
use techstore_db::{
    AnyStore, CartRepository, Database, DbConfig, DbError, DbResult, JsonFileStore, MemoryStore,
};

use config::{StorageBackend, StorageSettings, StorefrontConfig};
use error::StartupError;
use state::{SessionActor, SessionOptions};

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → TECHSTORE_* variables                │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • SQLite (WAL, migrations), JSON file, or memory                    │
/// │                                                                         │
/// │  4. Start Session ────────────────────────────────────────────────────► │
/// │     • Restore and reconcile the saved cart                              │
/// │                                                                         │
/// │  5. Run Console until quit or end of input                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> Result<(), StartupError> {
    init_tracing();

    info!("Starting TechStore");

    let config = StorefrontConfig::load(config_path)?;
    info!(
        store_name = %config.store_name,
        backend = %config.storage.backend,
        "Configuration loaded"
    );

    let storage = Storage::open(&config.storage).await?;

    let session = SessionActor::start(
        Catalog::default(),
        CartRepository::new(storage.store.clone()),
        SessionOptions {
            timings: config.timings(),
            reconcile_with_catalog: config.storage.reconcile_with_catalog,
        },
    )
    .await?;

    let result = console::run_console(
        &session,
        &config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;

    session.shutdown().await;
    storage.close().await;

    result.map_err(StartupError::from)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=techstore=trace` - Show trace for techstore crates only
/// - Default: INFO, DEBUG for techstore crates
///
/// Logs go to stderr so they never interleave with the screens on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,techstore=debug,sqlx=warn"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The opened cart store, plus the SQLite pool when there is one.
pub struct Storage {
    pub store: AnyStore,
    database: Option<Database>,
}

impl Storage {
    /// Opens the configured backend.
    pub async fn open(settings: &StorageSettings) -> DbResult<Self> {
        let storage = match (settings.backend, settings.resolved_path()) {
            (StorageBackend::Memory, _) => {
                warn!("Using the in-memory store; the cart will not survive a restart");
                Storage {
                    store: MemoryStore::new().into(),
                    database: None,
                }
            }
            (StorageBackend::Sqlite, Some(path)) => {
                info!(?path, "Opening SQLite store");
                let database = Database::new(DbConfig::new(path)).await?;
                if !database.health_check().await {
                    database.close().await;
                    return Err(DbError::ConnectionFailed(
                        "SQLite store failed its health check".to_string(),
                    ));
                }
                Storage {
                    store: database.kv_store().into(),
                    database: Some(database),
                }
            }
            (StorageBackend::JsonFile, Some(path)) => {
                info!(?path, "Opening JSON file store");
                Storage {
                    store: JsonFileStore::new(path).into(),
                    database: None,
                }
            }
            (backend, None) => {
                return Err(DbError::ConnectionFailed(format!(
                    "No data directory available for the {} store",
                    backend
                )))
            }
        };

        Ok(storage)
    }

    /// Closes the SQLite pool, if any.
    pub async fn close(self) {
        if let Some(database) = self.database {
            database.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::Cart;
    use techstore_db::KeyValueStore;

    fn settings(backend: StorageBackend, path: Option<PathBuf>) -> StorageSettings {
        StorageSettings {
            backend,
            path,
            reconcile_with_catalog: true,
        }
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let storage = Storage::open(&settings(StorageBackend::Memory, None))
            .await
            .unwrap();
        assert_eq!(storage.store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_open_sqlite_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("techstore.db");

        let storage = Storage::open(&settings(StorageBackend::Sqlite, Some(path.clone())))
            .await
            .unwrap();
        storage.store.set("cart", "[]").await.unwrap();
        storage.close().await;

        let storage = Storage::open(&settings(StorageBackend::Sqlite, Some(path)))
            .await
            .unwrap();
        assert_eq!(storage.store.backend_name(), "sqlite");
        assert_eq!(storage.store.get("cart").await.unwrap().as_deref(), Some("[]"));
        storage.close().await;
    }

    #[tokio::test]
    async fn test_open_sqlite_store_under_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let result =
            Storage::open(&settings(StorageBackend::Sqlite, Some(blocker.join("techstore.db"))))
                .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_json_store_round_trips_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("techstore.json");
        let catalog = Catalog::default();

        let storage = Storage::open(&settings(StorageBackend::JsonFile, Some(path)))
            .await
            .unwrap();
        let carts = CartRepository::new(storage.store.clone());

        let mut cart = Cart::new();
        cart.add(catalog.require(5).unwrap());
        carts.save(&cart).await.unwrap();

        assert_eq!(carts.load().await.unwrap(), cart);
    }
}

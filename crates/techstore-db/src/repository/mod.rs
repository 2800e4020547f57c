//! # Repository Module
//!
//! Typed access to stored domain values.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session actor                                                         │
//! │       │                                                                 │
//! │       │  carts.save(&cart) / carts.load()                              │
//! │       ▼                                                                 │
//! │  CartRepository<S>                                                     │
//! │  ├── load()   JSON array → Cart                                        │
//! │  └── save()   Cart → JSON array                                        │
//! │       │                                                                 │
//! │       │  get("cart") / set("cart", json)                               │
//! │       ▼                                                                 │
//! │  S: KeyValueStore (SQLite, JSON file, memory)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

pub use cart::CartRepository;

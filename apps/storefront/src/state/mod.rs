//! # State Module
//!
//! Runtime state of the storefront app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │ StorefrontConfig │        │  SessionHandle (clone per caller)    │  │
//! │  │ (read-only after │        │  ├── send(Command) → SessionView     │  │
//! │  │  startup)        │        │  └── subscribe() → watch::Receiver   │  │
//! │  └──────────────────┘        └──────────────────┬───────────────────┘  │
//! │                                                 │                      │
//! │                                                 ▼                      │
//! │                              ┌──────────────────────────────────────┐  │
//! │                              │  SessionActor (one task)             │  │
//! │                              │  StorefrontMachine + timers + store  │  │
//! │                              └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • All session state lives inside the actor task                       │
//! │  • Callers only hold channel ends                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{SessionActor, SessionHandle, SessionOptions, SessionView};

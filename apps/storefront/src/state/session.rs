//! # Session Actor
//!
//! Owns the [`StorefrontMachine`] and executes its effects.
//!
//! ## Actor Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Actor                                   │
//! │                                                                         │
//! │  SessionHandle (cloneable)                                             │
//! │  ├── send(Command) ───────┐                                            │
//! │  ├── view()               │ mpsc (command + oneshot reply)             │
//! │  └── subscribe() ◄──┐     ▼                                            │
//! │                     │  ┌──────────────────────────────────────────┐    │
//! │              watch  │  │  SessionActor::run  (tokio::select!)     │    │
//! │                     │  │                                          │    │
//! │                     │  │  machine.handle(cmd) ──► Vec<Effect>     │    │
//! │                     │  │    PersistCart  ──► CartRepository::save │    │
//! │                     └──│    StartTimer   ──► spawn sleep task ──┐ │    │
//! │                        │    CancelTimer  ──► JoinHandle::abort  │ │    │
//! │                        │    OrderPlaced  ──► log                │ │    │
//! │                        │                                        │ │    │
//! │                        │  timer channel ◄── TimerElapsed(token) ┘ │    │
//! │                        └──────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands and timer expiries are applied one at a time, in arrival order.
//! A command's reply is sent after its cart write has finished. A failed write
//! is logged and the in-memory cart is kept as is.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use techstore_core::{
    Cart, Catalog, CheckoutTimings, Command, Effect, StorefrontMachine, StorefrontView, TimerToken,
};
use techstore_db::{CartRepository, DbResult, KeyValueStore};

use crate::error::ApiError;

/// What every command returns: the state after the command.
pub type SessionView = StorefrontView;

const COMMAND_BUFFER: usize = 32;

// =============================================================================
// Handle
// =============================================================================

enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<Result<SessionView, ApiError>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Handle for talking to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
    view: watch::Receiver<SessionView>,
    catalog: Catalog,
}

impl SessionHandle {
    /// Applies one command and returns the resulting view.
    pub async fn send(&self, command: Command) -> Result<SessionView, ApiError> {
        let (reply, response) = oneshot::channel();

        self.requests
            .send(Request::Command { command, reply })
            .await
            .map_err(|_| ApiError::internal("Session is not running"))?;

        response
            .await
            .map_err(|_| ApiError::internal("Session stopped before replying"))?
    }

    /// Latest published view.
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    /// Receiver that changes on every transition, timer-driven ones included.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }

    /// Product catalog the session sells from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cancels pending timers and stops the actor.
    pub async fn shutdown(&self) {
        let (reply, done) = oneshot::channel();
        if self.requests.send(Request::Shutdown { reply }).await.is_ok() {
            let _ = done.await;
        }
    }
}

// =============================================================================
// Actor
// =============================================================================

/// Startup options for [`SessionActor::start`].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub timings: CheckoutTimings,
    /// Reconcile the restored cart against the catalog.
    pub reconcile_with_catalog: bool,
}

/// The task that owns the state machine.
pub struct SessionActor<S> {
    machine: StorefrontMachine,
    carts: CartRepository<S>,
    requests: mpsc::Receiver<Request>,
    view_tx: watch::Sender<SessionView>,
    timer_tx: mpsc::UnboundedSender<TimerToken>,
    timer_rx: mpsc::UnboundedReceiver<TimerToken>,
    timers: HashMap<TimerToken, JoinHandle<()>>,
}

impl<S: KeyValueStore + 'static> SessionActor<S> {
    /// Restores the saved cart, spawns the actor and returns its handle.
    ///
    /// ## Startup Sequence
    /// 1. Load the cart snapshot (malformed → empty, see `CartRepository`)
    /// 2. Optionally reconcile it against the catalog and save the result
    /// 3. Start on the product grid
    pub async fn start(
        catalog: Catalog,
        carts: CartRepository<S>,
        options: SessionOptions,
    ) -> DbResult<SessionHandle> {
        let mut cart = carts.load().await?;

        if options.reconcile_with_catalog {
            let report = cart.reconcile(&catalog);
            if !report.is_clean() {
                warn!(
                    dropped_unknown = ?report.dropped_unknown,
                    dropped_empty = report.dropped_empty,
                    merged_duplicates = report.merged_duplicates,
                    refreshed = report.refreshed,
                    "Saved cart did not match the catalog"
                );
                save_or_log(&carts, &cart).await;
            }
        }

        info!(
            lines = cart.line_count(),
            items = cart.item_count(),
            "Session starting"
        );

        Ok(Self::spawn(catalog, cart, carts, options.timings))
    }

    fn spawn(
        catalog: Catalog,
        cart: Cart,
        carts: CartRepository<S>,
        timings: CheckoutTimings,
    ) -> SessionHandle {
        let machine = StorefrontMachine::new(catalog.clone(), cart, timings);
        let (requests_tx, requests) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view) = watch::channel(machine.snapshot());
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        let actor = SessionActor {
            machine,
            carts,
            requests,
            view_tx,
            timer_tx,
            timer_rx,
            timers: HashMap::new(),
        };

        tokio::spawn(actor.run());

        SessionHandle {
            requests: requests_tx,
            view,
            catalog,
        }
    }

    /// Main loop. Ends on shutdown or when every handle is dropped.
    async fn run(mut self) {
        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(Request::Command { command, reply }) => {
                        let result = self.apply(command).await;
                        let _ = reply.send(result);
                    }
                    Some(Request::Shutdown { reply }) => {
                        self.teardown();
                        let _ = reply.send(());
                        break;
                    }
                    None => {
                        self.teardown();
                        break;
                    }
                },

                Some(token) = self.timer_rx.recv() => {
                    self.timers.remove(&token);
                    if let Err(e) = self.apply(Command::TimerElapsed(token)).await {
                        error!(error = %e, "Timer transition failed");
                    }
                }
            }
        }

        info!("Session stopped");
    }

    async fn apply(&mut self, command: Command) -> Result<SessionView, ApiError> {
        debug!(?command, "Applying command");

        let effects = self.machine.handle(command).map_err(|e| {
            debug!(error = %e, "Command rejected");
            ApiError::from(e)
        })?;

        for effect in effects {
            self.execute(effect).await;
        }

        let view = self.machine.snapshot();
        self.view_tx.send_replace(view.clone());
        Ok(view)
    }

    async fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::PersistCart(cart) => save_or_log(&self.carts, &cart).await,

            Effect::StartTimer { token, kind, after } => {
                debug!(token = token.value(), ?kind, ?after, "Starting timer");
                let tx = self.timer_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(token);
                });
                self.timers.insert(token, handle);
            }

            Effect::CancelTimer(token) => {
                if let Some(handle) = self.timers.remove(&token) {
                    debug!(token = token.value(), "Cancelling timer");
                    handle.abort();
                }
            }

            Effect::OrderPlaced(order) => {
                info!(
                    order_id = %order.id,
                    total = %order.total,
                    items = order.item_count(),
                    payment_method = %order.payment_method,
                    "Order placed"
                );
            }
        }
    }

    fn teardown(&mut self) {
        for effect in self.machine.teardown() {
            if let Effect::CancelTimer(token) = effect {
                if let Some(handle) = self.timers.remove(&token) {
                    handle.abort();
                }
            }
        }

        // Anything left is already stale
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

async fn save_or_log<S: KeyValueStore>(carts: &CartRepository<S>, cart: &Cart) {
    if let Err(e) = carts.save(cart).await {
        error!(error = %e, lines = cart.line_count(), "Failed to persist cart");
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("view", &self.view.borrow().view)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

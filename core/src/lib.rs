// src/lib.rs

//! cartsync: client-side cart synchronization against a remote,
//! authoritative cart.
//!
//! The crate keeps a locally displayed cart consistent with the backend
//! across add/update/remove operations:
//!  - Optimistic mutations: local state changes apply immediately, before
//!    remote confirmation.
//!  - Snapshot rollback: a failed remote call restores the pre-mutation
//!    state; failures never propagate past the engine.
//!  - Quantity normalization: a pure ingestion boundary that resolves the
//!    backend's ambiguous quantity fields into one trustworthy value.
//!  - Explicit bootstrap: the (cart id, user email) identity is loaded
//!    from a pluggable key-value store, never from ambient globals.
//!
//! The remote gateway and the snapshot store are traits; production wiring
//! (an HTTP client, a persistent store) lives with the application.

pub mod engine;
pub mod error;
pub mod gateway;
pub mod model;
pub mod normalize;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::engine::{CartEngine, CartHandle, EngineOptions, MutationOutcome, RefreshStatus};
pub use crate::error::{CartSyncError, CartSyncResult};
pub use crate::gateway::CartGateway;
pub use crate::model::{Cart, CartLineItem, CartTotals, BootstrapIdentity, ProductId, RawCart, RawCartItem};
pub use crate::normalize::{normalize_item, resolve_quantity, resolve_unit_price, STOCK_HEURISTIC_MAX};
pub use crate::store::{load_identity, MemoryStore, SnapshotStore};

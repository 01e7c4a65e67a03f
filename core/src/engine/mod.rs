// cartsync/src/engine/mod.rs

//! The cart reconciliation engine.
//!
//! Owns the observable in-memory cart, executes optimistic local
//! mutations, issues the corresponding remote calls, and restores the
//! pre-mutation snapshot when a remote call fails. The backend is the
//! source of truth; this engine keeps the local cart eventually consistent
//! with it after each successful operation.

pub(crate) mod command;
pub mod handle;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{event, instrument, Level};

use crate::error::{CartSyncError, CartSyncResult};
use crate::gateway::CartGateway;
use crate::model::{Cart, CartLineItem, CartTotals, ProductId};
use crate::normalize::normalize_item;
use crate::store::{keys, load_identity, SnapshotStore};

use command::{CartCommand, RemoteCall};
pub use handle::CartHandle;

/// Outcome of a refresh. All variants are normal, non-propagating states;
/// a degraded refresh never raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
  /// The remote cart was fetched and replaced the local state wholesale.
  Loaded,
  /// No bootstrap identity in the store; the cart is presented empty.
  MissingBootstrap,
  /// The gateway failed; the previous local state was kept untouched.
  GatewayFailed,
}

/// Outcome of one mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
  /// The optimistic projection was confirmed remotely and is now the
  /// last-known-good state.
  Committed,
  /// The remote call failed; the pre-mutation snapshot was restored. This
  /// is the engine's only externally observable failure signal.
  RolledBack,
  /// Preconditions were not met (no cart bound, or no such item); nothing
  /// was changed and nothing was issued.
  Noop,
}

/// Engine knobs.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
  /// When an add is rejected with a 400-class conflict ("already in
  /// cart"), retry once as a quantity update. One-shot compensation, never
  /// a retry loop. The backend's semantics for that status are nowhere
  /// specified, so this stays optional.
  pub conflict_fallback: bool,
}

impl Default for EngineOptions {
  fn default() -> Self {
    EngineOptions { conflict_fallback: true }
  }
}

/// The reconciliation engine. Cheap to share behind an `Arc`; all methods
/// take `&self`.
///
/// Mutating operations (and refresh) are serialized through an internal
/// async mutex, so a failing operation's whole-cart rollback can never
/// clobber another operation's optimistic projection. There is no
/// timeout and no automatic retry: a hung remote call leaves the
/// optimistic state in place until it resolves.
pub struct CartEngine<G: CartGateway> {
  gateway: Arc<G>,
  store: Arc<dyn SnapshotStore>,
  handle: CartHandle,
  options: EngineOptions,
  op_lock: Mutex<()>,
}

impl<G: CartGateway> CartEngine<G> {
  pub fn new(gateway: Arc<G>, store: Arc<dyn SnapshotStore>) -> Self {
    Self::with_options(gateway, store, EngineOptions::default())
  }

  pub fn with_options(gateway: Arc<G>, store: Arc<dyn SnapshotStore>, options: EngineOptions) -> Self {
    CartEngine {
      gateway,
      store,
      handle: CartHandle::default(),
      options,
      op_lock: Mutex::new(()),
    }
  }

  /// A cloneable handle for observers (the UI layer renders through this).
  pub fn handle(&self) -> CartHandle {
    self.handle.clone()
  }

  /// An owned copy of the current cart.
  pub fn cart(&self) -> Cart {
    self.handle.snapshot()
  }

  /// Totals for the checkout collaborator (VAT and shipping pass through
  /// as zero).
  pub fn totals(&self) -> CartTotals {
    self.handle.read().totals()
  }

  /// Re-fetches the remote cart and replaces the local state wholesale.
  ///
  /// Identity is loaded from the snapshot store on every call; an absent
  /// identity degrades to an empty cart. A gateway failure is logged and
  /// leaves the previous state in place; refresh never partially applies.
  #[instrument(name = "CartEngine::refresh", skip_all)]
  pub async fn refresh(&self) -> RefreshStatus {
    let _op = self.op_lock.lock().await;

    let Some(identity) = load_identity(self.store.as_ref()) else {
      event!(Level::INFO, "no bootstrap identity, presenting empty cart");
      self.handle.replace(Cart::default());
      return RefreshStatus::MissingBootstrap;
    };

    match self.gateway.fetch_cart(&identity).await {
      Ok(raw) => {
        let items: Vec<CartLineItem> = raw.products.iter().map(normalize_item).collect();
        event!(
          Level::DEBUG,
          cart_id = %identity.cart_id,
          item_count = items.len(),
          "remote cart fetched, replacing local state"
        );
        let cart = Cart { cart_id: identity.cart_id, items };
        self.cache_locally(&cart);
        self.handle.replace(cart);
        RefreshStatus::Loaded
      }
      Err(error) => {
        event!(Level::ERROR, %error, "cart fetch failed, keeping previous local state");
        RefreshStatus::GatewayFailed
      }
    }
  }

  /// Increments the quantity of an existing line by one, optimistically.
  #[instrument(name = "CartEngine::increase", skip(self))]
  pub async fn increase(&self, product_id: ProductId) -> MutationOutcome {
    let _op = self.op_lock.lock().await;

    let command = {
      let previous = self.handle.snapshot();
      let Some(new_quantity) = Self::quantity_after(&previous, product_id, 1) else {
        return MutationOutcome::Noop;
      };
      Self::quantity_command(previous, product_id, new_quantity)
    };
    self.execute(command).await
  }

  /// Decrements the quantity of an existing line by one. A decrement that
  /// would reach zero delegates entirely to removal; the engine never
  /// produces a zero-quantity line.
  #[instrument(name = "CartEngine::decrease", skip(self))]
  pub async fn decrease(&self, product_id: ProductId) -> MutationOutcome {
    let _op = self.op_lock.lock().await;

    let previous = self.handle.snapshot();
    let Some(new_quantity) = Self::quantity_after(&previous, product_id, -1) else {
      return MutationOutcome::Noop;
    };
    if new_quantity == 0 {
      return self.execute(Self::removal_command(previous, product_id)).await;
    }
    self
      .execute(Self::quantity_command(previous, product_id, new_quantity))
      .await
  }

  /// Removes a line, optimistically. Removing an id that is not present
  /// leaves the local state untouched but still issues the remote delete;
  /// the redundancy is accepted, not an error.
  #[instrument(name = "CartEngine::remove", skip(self))]
  pub async fn remove(&self, product_id: ProductId) -> MutationOutcome {
    let _op = self.op_lock.lock().await;

    let previous = self.handle.snapshot();
    if previous.cart_id.is_empty() {
      event!(Level::WARN, "no cart bound, ignoring remove");
      return MutationOutcome::Noop;
    }
    self.execute(Self::removal_command(previous, product_id)).await
  }

  /// Adds a line to the cart, optimistically. If the backend rejects the
  /// add with a 400-class conflict (the line already exists remotely) and
  /// [`EngineOptions::conflict_fallback`] is on, the engine compensates
  /// once by reissuing the write as a quantity update.
  #[instrument(name = "CartEngine::add", skip(self, item), fields(product_id = item.product_id))]
  pub async fn add(&self, item: CartLineItem) -> MutationOutcome {
    let _op = self.op_lock.lock().await;

    let previous = self.handle.snapshot();
    if previous.cart_id.is_empty() {
      event!(Level::WARN, "no cart bound, ignoring add");
      return MutationOutcome::Noop;
    }

    let product_id = item.product_id;
    let quantity = item.quantity.max(1);
    let mut projection = previous.clone();
    match projection.items.iter().position(|i| i.product_id == product_id) {
      Some(index) => projection.items[index].quantity += quantity,
      None => projection.items.push(CartLineItem { quantity, ..item }),
    }

    let command = CartCommand::new(previous, projection, RemoteCall::AddItem { product_id, quantity });
    command.apply(&self.handle);

    match command.commit(self.gateway.as_ref()).await {
      Ok(()) => MutationOutcome::Committed,
      Err(error) if error.is_conflict() && self.options.conflict_fallback => {
        event!(Level::WARN, %error, "add rejected as conflict, compensating with update");
        let cart_id = self.handle.read().cart_id.clone();
        match self.gateway.update_item_quantity(&cart_id, product_id, quantity).await {
          Ok(()) => MutationOutcome::Committed,
          Err(error) => {
            event!(Level::ERROR, %error, "compensating update failed, rolling back");
            command.rollback(&self.handle);
            MutationOutcome::RolledBack
          }
        }
      }
      Err(error) => {
        event!(Level::ERROR, %error, "add failed, rolling back");
        command.rollback(&self.handle);
        MutationOutcome::RolledBack
      }
    }
  }

  /// Serializes the current cart and total into the snapshot store for the
  /// checkout collaborator to pick up.
  pub fn begin_checkout(&self) -> CartSyncResult<CartTotals> {
    let cart = self.handle.snapshot();
    let totals = cart.totals();
    let payload = serde_json::json!({ "cart": cart, "total": totals.total });
    let text = serde_json::to_string(&payload)
      .map_err(|e| CartSyncError::Internal(format!("checkout payload serialization: {e}")))?;
    self.store.put(keys::CHECKOUT, &text)?;
    Ok(totals)
  }

  /// Applies the projection, confirms it remotely, and rolls back to the
  /// snapshot on failure. At most this one remote call's outcome decides
  /// the final state.
  async fn execute(&self, command: CartCommand) -> MutationOutcome {
    command.apply(&self.handle);
    match command.commit(self.gateway.as_ref()).await {
      Ok(()) => {
        event!(Level::DEBUG, remote = ?command.remote(), "remote confirmed optimistic mutation");
        MutationOutcome::Committed
      }
      Err(error) => {
        event!(Level::ERROR, %error, remote = ?command.remote(), "remote call failed, rolling back");
        command.rollback(&self.handle);
        MutationOutcome::RolledBack
      }
    }
  }

  /// New quantity for `product_id` after `delta`, or `None` when the
  /// preconditions for a quantity mutation do not hold.
  fn quantity_after(cart: &Cart, product_id: ProductId, delta: i64) -> Option<u32> {
    if cart.cart_id.is_empty() {
      event!(Level::WARN, product_id, "no cart bound, ignoring quantity change");
      return None;
    }
    let Some(item) = cart.item(product_id) else {
      event!(Level::WARN, product_id, "no such line item, ignoring quantity change");
      return None;
    };
    let updated = i64::from(item.quantity) + delta;
    Some(updated.max(0) as u32)
  }

  fn quantity_command(previous: Cart, product_id: ProductId, new_quantity: u32) -> CartCommand {
    let mut projection = previous.clone();
    if let Some(item) = projection.item_mut(product_id) {
      item.quantity = new_quantity;
    }
    CartCommand::new(
      previous,
      projection,
      RemoteCall::UpdateQuantity { product_id, quantity: new_quantity },
    )
  }

  fn removal_command(previous: Cart, product_id: ProductId) -> CartCommand {
    let mut projection = previous.clone();
    projection.items.retain(|i| i.product_id != product_id);
    CartCommand::new(previous, projection, RemoteCall::DeleteItem { product_id })
  }

  /// Best-effort local cache of the fetched cart. Bootstrap and checkout
  /// are the store's real jobs; a failed cache write only warns.
  fn cache_locally(&self, cart: &Cart) {
    match serde_json::to_string(cart) {
      Ok(text) => {
        if let Err(error) = self.store.put(keys::CART_CACHE, &text) {
          event!(Level::WARN, %error, "cart cache write failed");
        }
      }
      Err(error) => event!(Level::WARN, %error, "cart cache serialization failed"),
    }
  }
}

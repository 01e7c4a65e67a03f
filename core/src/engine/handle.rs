// cartsync/src/engine/handle.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::model::Cart;

/// Shared, observable handle to the engine's current cart.
///
/// The UI layer clones this handle and reads through it; the engine writes
/// through it when applying and rolling back mutations.
///
/// IMPORTANT: lock guards obtained from this handle are blocking and MUST
/// NOT be held across `.await` suspension points. The engine snapshots and
/// releases before every remote call.
#[derive(Debug)]
pub struct CartHandle(Arc<RwLock<Cart>>);

impl CartHandle {
  pub fn new(cart: Cart) -> Self {
    CartHandle(Arc::new(RwLock::new(cart)))
  }

  /// Acquires a read lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, Cart> {
    self.0.read()
  }

  /// Acquires a write lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, Cart> {
    self.0.write()
  }

  /// An owned copy of the current cart, safe to hold anywhere.
  pub fn snapshot(&self) -> Cart {
    self.read().clone()
  }

  /// Wholesale replacement of the observable cart.
  pub fn replace(&self, cart: Cart) {
    *self.write() = cart;
  }
}

impl Clone for CartHandle {
  fn clone(&self) -> Self {
    CartHandle(Arc::clone(&self.0))
  }
}

impl Default for CartHandle {
  fn default() -> Self {
    Self::new(Cart::default())
  }
}

// cartsync/src/store.rs

//! Local key-value persistence used to bootstrap identity (which user and
//! cart to operate on) and to hand the cart off to checkout. Never the
//! authoritative cart state.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::warn;

use crate::error::CartSyncResult;
use crate::model::BootstrapIdentity;

/// Well-known store keys, matching what the login flow writes.
pub mod keys {
  pub const CART_ID: &str = "cart-id";
  pub const USER_EMAIL: &str = "user-email";
  pub const JWT_TOKEN: &str = "jwt-token";
  pub const CART_CACHE: &str = "cart";
  pub const CHECKOUT: &str = "checkoutData";
}

/// String key-value persistence.
pub trait SnapshotStore: Send + Sync {
  fn get(&self, key: &str) -> CartSyncResult<Option<String>>;
  fn put(&self, key: &str, value: &str) -> CartSyncResult<()>;
  fn delete(&self, key: &str) -> CartSyncResult<()>;
}

/// Loads the bootstrap identity, degrading to `None` when either key is
/// absent or the store itself fails. A missing identity is a normal state
/// (user not logged in yet), not an error.
pub fn load_identity(store: &dyn SnapshotStore) -> Option<BootstrapIdentity> {
  let read = |key: &str| match store.get(key) {
    Ok(value) => value,
    Err(error) => {
      warn!(key, %error, "snapshot store read failed, treating as absent");
      None
    }
  };

  let cart_id = read(keys::CART_ID)?;
  let user_email = read(keys::USER_EMAIL)?;
  Some(BootstrapIdentity { cart_id, user_email })
}

/// In-memory store. The default in tests, and a reasonable session-scoped
/// store for callers that do not want persistence at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Convenience for seeding identity in one call.
  pub fn with_identity(cart_id: &str, user_email: &str) -> Self {
    let store = Self::new();
    {
      let mut entries = store.entries.lock();
      entries.insert(keys::CART_ID.to_string(), cart_id.to_string());
      entries.insert(keys::USER_EMAIL.to_string(), user_email.to_string());
    }
    store
  }
}

impl SnapshotStore for MemoryStore {
  fn get(&self, key: &str) -> CartSyncResult<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> CartSyncResult<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn delete(&self, key: &str) -> CartSyncResult<()> {
    self.entries.lock().remove(key);
    Ok(())
  }
}

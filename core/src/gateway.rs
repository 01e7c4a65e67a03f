// cartsync/src/gateway.rs

//! The seam between the reconciliation engine and the remote,
//! authoritative cart. Implementations live outside this crate (an HTTP
//! client in production, a scriptable mock in tests); the engine only ever
//! sees this trait.

use async_trait::async_trait;

use crate::error::CartSyncResult;
use crate::model::{BootstrapIdentity, ProductId, RawCart};

/// Remote cart operations.
///
/// Errors should be reported as [`crate::error::CartSyncError::Gateway`]
/// with the HTTP-like status attached when one exists, so callers can
/// distinguish the 400-class conflict from transport failures.
#[async_trait]
pub trait CartGateway: Send + Sync {
  /// Fetches the full cart for the identified user. The payload is
  /// returned raw; normalization happens at the engine's ingestion
  /// boundary, not here.
  async fn fetch_cart(&self, identity: &BootstrapIdentity) -> CartSyncResult<RawCart>;

  /// Sets the quantity of an existing cart line.
  async fn update_item_quantity(
    &self,
    cart_id: &str,
    product_id: ProductId,
    quantity: u32,
  ) -> CartSyncResult<()>;

  /// Removes a line from the cart. The backend accepts deletes for ids it
  /// does not hold, so callers may issue this redundantly.
  async fn delete_item(&self, cart_id: &str, product_id: ProductId) -> CartSyncResult<()>;

  /// Adds a new line to the cart. Backends signal "already present" with a
  /// 400-class status rather than merging quantities.
  async fn add_item(&self, cart_id: &str, product_id: ProductId, quantity: u32) -> CartSyncResult<()>;
}

// cartsync/src/engine/command.rs

//! Transactional form of one optimistic cart mutation.
//!
//! A mutation is captured as `{ previous, projection, remote }`: the
//! pre-mutation snapshot, the optimistic target state, and the single
//! remote call whose outcome decides which of the two survives. `apply`
//! makes the projection visible immediately, `commit` issues the remote
//! call, `rollback` restores the snapshot.

use tracing::{event, Level};

use crate::error::CartSyncResult;
use crate::gateway::CartGateway;
use crate::model::{Cart, ProductId};

use super::handle::CartHandle;

/// The remote call backing a local mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemoteCall {
  UpdateQuantity { product_id: ProductId, quantity: u32 },
  DeleteItem { product_id: ProductId },
  AddItem { product_id: ProductId, quantity: u32 },
}

pub(crate) struct CartCommand {
  previous: Cart,
  projection: Cart,
  remote: RemoteCall,
}

impl CartCommand {
  pub fn new(previous: Cart, projection: Cart, remote: RemoteCall) -> Self {
    CartCommand { previous, projection, remote }
  }

  pub fn remote(&self) -> RemoteCall {
    self.remote
  }

  /// Makes the optimistic projection the observable cart state.
  pub fn apply(&self, handle: &CartHandle) {
    handle.replace(self.projection.clone());
  }

  /// Issues the remote call that confirms the projection.
  pub async fn commit<G: CartGateway + ?Sized>(&self, gateway: &G) -> CartSyncResult<()> {
    let cart_id = self.previous.cart_id.as_str();
    match self.remote {
      RemoteCall::UpdateQuantity { product_id, quantity } => {
        gateway.update_item_quantity(cart_id, product_id, quantity).await
      }
      RemoteCall::DeleteItem { product_id } => gateway.delete_item(cart_id, product_id).await,
      RemoteCall::AddItem { product_id, quantity } => {
        gateway.add_item(cart_id, product_id, quantity).await
      }
    }
  }

  /// Restores the pre-mutation snapshot wholesale.
  pub fn rollback(&self, handle: &CartHandle) {
    event!(Level::DEBUG, remote = ?self.remote, "restoring pre-mutation snapshot");
    handle.replace(self.previous.clone());
  }
}

// cartsync/src/model/cart.rs

use serde::{Deserialize, Serialize};

use super::line_item::{CartLineItem, ProductId};

/// The in-memory cart: an ordered sequence of line items, unique by
/// product id, bound to one remote cart.
///
/// At any observable instant this is either the last successfully fetched
/// or committed remote state, or a transient optimistic projection of it
/// with one remote confirmation in flight. It is a short-lived cache over
/// the remote source of truth, not a persistent store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
  pub cart_id: String,
  pub items: Vec<CartLineItem>,
}

impl Cart {
  pub fn new(cart_id: impl Into<String>) -> Self {
    Cart { cart_id: cart_id.into(), items: Vec::new() }
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn item(&self, product_id: ProductId) -> Option<&CartLineItem> {
    self.items.iter().find(|i| i.product_id == product_id)
  }

  pub fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
    self.items.iter_mut().find(|i| i.product_id == product_id)
  }

  /// Sum of `unit_price * quantity` over all lines.
  pub fn subtotal(&self) -> f64 {
    self.items.iter().map(CartLineItem::line_total).sum()
  }

  /// Totals as handed to the checkout collaborator. VAT and shipping are
  /// pass-through zeroes in the observed configuration; this engine does
  /// not compute them.
  pub fn totals(&self) -> CartTotals {
    let subtotal = self.subtotal();
    CartTotals { subtotal, vat: 0.0, shipping: 0.0, total: subtotal }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
  pub subtotal: f64,
  pub vat: f64,
  pub shipping: f64,
  pub total: f64,
}

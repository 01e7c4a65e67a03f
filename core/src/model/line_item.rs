// cartsync/src/model/line_item.rs

use serde::{Deserialize, Serialize};

/// Integer product identifier, unique within a cart.
pub type ProductId = i64;

/// One product-and-quantity entry within a cart.
///
/// `unit_price` is resolved once at ingestion (discounted price if the
/// backend sent one, else the base price) and cached here; downstream code
/// never re-derives it. `quantity` is always >= 1; decreasing a line to
/// zero is expressed as removal of the line, never as a zero quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub product_id: ProductId,
  pub name: String,
  /// Display metadata only, not authoritative.
  pub image_ref: Option<String>,
  pub unit_price: f64,
  pub quantity: u32,
  pub size: String,
}

impl CartLineItem {
  pub fn line_total(&self) -> f64 {
    self.unit_price * f64::from(self.quantity)
  }
}

// cartsync/src/normalize.rs

//! The ingestion boundary between raw backend payloads and the in-memory
//! cart. Everything here is pure; nothing touches the network or the
//! store.
//!
//! The backend's quantity semantics are unreliable: the field that should
//! hold the cart quantity sometimes holds warehouse stock, sometimes
//! arrives under a different name, and has historically arrived as a JSON
//! string. [`resolve_quantity`] concentrates all of that ambiguity in one
//! exhaustively tested function instead of scattering conditionals through
//! caller code.

use crate::model::{CartLineItem, RawCartItem};
use serde_json::Value;

/// Generic `quantity` values above this are assumed to be a stock count
/// that leaked into the cart payload rather than a real cart quantity.
///
/// Heuristic, not a guarantee: a genuine cart line of 21+ units is
/// misclassified and collapses to 1.
pub const STOCK_HEURISTIC_MAX: u32 = 20;

/// Reads a strictly positive whole JSON number, treating anything else
/// (strings, null, zero, negatives, fractions) as absent. Fractions are
/// rejected rather than truncated: 0.5 must never round down into a
/// quantity of 0, and 20.9 must not slip under the stock threshold as 20.
fn positive_number(value: Option<&Value>) -> Option<u32> {
  let n = value?.as_f64()?;
  if n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
    Some(n as u32)
  } else {
    None
  }
}

/// Resolves the trustworthy cart quantity for one raw line item.
///
/// Priority order, first match wins:
/// 1. a positive `cartQuantity`;
/// 2. a positive `quantityInCart`;
/// 3. a positive generic `quantity`, taken as-is when plausible, treated
///    as stock (and collapsed to 1) when above [`STOCK_HEURISTIC_MAX`];
/// 4. the safe default of 1.
pub fn resolve_quantity(raw: &RawCartItem) -> u32 {
  if let Some(qty) = positive_number(raw.cart_quantity.as_ref()) {
    return qty;
  }
  if let Some(qty) = positive_number(raw.quantity_in_cart.as_ref()) {
    return qty;
  }
  if let Some(qty) = positive_number(raw.quantity.as_ref()) {
    if qty > STOCK_HEURISTIC_MAX {
      return 1;
    }
    return qty;
  }
  1
}

/// The effective unit price: discounted price when present, else the base
/// price. Resolved once here and cached on the line item.
pub fn resolve_unit_price(raw: &RawCartItem) -> f64 {
  raw.special_price.or(raw.price).unwrap_or(0.0)
}

/// Builds the canonical line item from a raw payload entry.
pub fn normalize_item(raw: &RawCartItem) -> CartLineItem {
  CartLineItem {
    product_id: raw.product_id,
    name: raw.name.clone().unwrap_or_default(),
    image_ref: raw.image.clone(),
    unit_price: resolve_unit_price(raw),
    quantity: resolve_quantity(raw),
    size: raw.size.clone().unwrap_or_else(|| "M".to_string()),
  }
}

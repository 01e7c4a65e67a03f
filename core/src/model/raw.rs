// cartsync/src/model/raw.rs

use serde::Deserialize;
use serde_json::Value;

/// The fetch-cart payload as the backend actually sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
  #[serde(default)]
  pub cart_id: Option<Value>,
  #[serde(default)]
  pub products: Vec<RawCartItem>,
}

/// One raw line item. The quantity-like fields are `Value` because the
/// backend has sent numbers, strings, and stock counts under these names
/// at different times; [`crate::normalize`] is the only consumer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartItem {
  pub product_id: i64,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub size: Option<String>,
  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub special_price: Option<f64>,
  /// Quantity actually in the cart, when the backend bothers to send it.
  #[serde(default)]
  pub cart_quantity: Option<Value>,
  /// Alternate name for the same thing, seen from other endpoints.
  #[serde(default)]
  pub quantity_in_cart: Option<Value>,
  /// Generic quantity. May be the cart quantity, may be warehouse stock.
  #[serde(default)]
  pub quantity: Option<Value>,
}

// tests/quantity_normalizer_tests.rs

use cartsync::{normalize_item, resolve_quantity, resolve_unit_price, RawCartItem, STOCK_HEURISTIC_MAX};
use serde_json::json;

fn raw(fields: serde_json::Value) -> RawCartItem {
  let mut object = json!({ "productId": 1 });
  object
    .as_object_mut()
    .unwrap()
    .extend(fields.as_object().unwrap().clone());
  serde_json::from_value(object).expect("raw item should deserialize")
}

#[test]
fn dedicated_cart_quantity_wins_over_generic() {
  let item = raw(json!({ "cartQuantity": 3, "quantity": 50 }));
  assert_eq!(resolve_quantity(&item), 3);
}

#[test]
fn quantity_in_cart_is_second_priority() {
  let item = raw(json!({ "quantityInCart": 4, "quantity": 50 }));
  assert_eq!(resolve_quantity(&item), 4);
}

#[test]
fn generic_quantity_above_threshold_is_treated_as_stock() {
  let item = raw(json!({ "quantity": 25 }));
  assert_eq!(resolve_quantity(&item), 1);
}

#[test]
fn generic_quantity_within_range_passes_through() {
  let item = raw(json!({ "quantity": 7 }));
  assert_eq!(resolve_quantity(&item), 7);
}

#[test]
fn threshold_itself_is_still_plausible() {
  let item = raw(json!({ "quantity": STOCK_HEURISTIC_MAX }));
  assert_eq!(resolve_quantity(&item), STOCK_HEURISTIC_MAX);
}

#[test]
fn absent_fields_default_to_one() {
  let item = raw(json!({}));
  assert_eq!(resolve_quantity(&item), 1);
}

#[test]
fn zero_and_negative_values_fall_through() {
  let item = raw(json!({ "cartQuantity": 0, "quantityInCart": -2, "quantity": 5 }));
  assert_eq!(resolve_quantity(&item), 5);
}

#[test]
fn fractional_quantities_are_treated_as_absent() {
  // 0.5 must fall through, not truncate into a zero-quantity line.
  let item = raw(json!({ "cartQuantity": 0.5 }));
  assert_eq!(resolve_quantity(&item), 1);

  let line = normalize_item(&raw(json!({ "quantity": 0.5 })));
  assert!(line.quantity >= 1);

  // Nor may 20.9 truncate under the stock threshold as a plausible 20.
  let item = raw(json!({ "quantity": 20.9 }));
  assert_eq!(resolve_quantity(&item), 1);
}

#[test]
fn whole_float_quantities_pass_through() {
  // Backends that serialize integers as floats still resolve.
  let item = raw(json!({ "quantity": 7.0 }));
  assert_eq!(resolve_quantity(&item), 7);
}

#[test]
fn string_quantities_are_treated_as_absent() {
  // The backend has sent "7" (a string) under these names before.
  let item = raw(json!({ "cartQuantity": "3", "quantity": "7" }));
  assert_eq!(resolve_quantity(&item), 1);
}

#[test]
fn unit_price_prefers_special_price() {
  let item = raw(json!({ "price": 100.0, "specialPrice": 80.0 }));
  assert_eq!(resolve_unit_price(&item), 80.0);

  let item = raw(json!({ "price": 100.0 }));
  assert_eq!(resolve_unit_price(&item), 100.0);
}

#[test]
fn normalized_item_caches_resolved_fields() {
  let item = raw(json!({
    "name": "Linen Shirt",
    "price": 100.0,
    "specialPrice": 80.0,
    "quantity": 2
  }));
  let line = normalize_item(&item);
  assert_eq!(line.product_id, 1);
  assert_eq!(line.name, "Linen Shirt");
  assert_eq!(line.unit_price, 80.0);
  assert_eq!(line.quantity, 2);
  assert_eq!(line.size, "M"); // defaulted when the payload omits it
}

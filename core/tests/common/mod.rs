// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

use cartsync::{
  BootstrapIdentity, Cart, CartEngine, CartGateway, CartLineItem, CartSyncError, CartSyncResult,
  EngineOptions, MemoryStore, ProductId, RawCart, RawCartItem,
};

pub const CART_ID: &str = "77";
pub const EMAIL: &str = "shopper@example.com";

// --- Recorded gateway traffic ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
  FetchCart { cart_id: String, user_email: String },
  UpdateQuantity { cart_id: String, product_id: ProductId, quantity: u32 },
  DeleteItem { cart_id: String, product_id: ProductId },
  AddItem { cart_id: String, product_id: ProductId, quantity: u32 },
}

/// Scriptable gateway double. Write calls (update/delete/add) consume a
/// shared result script in call order; an empty script means success.
/// Every call is recorded for assertion.
#[derive(Default)]
pub struct MockGateway {
  calls: Mutex<Vec<RecordedCall>>,
  fetch_payload: Mutex<Option<RawCart>>,
  write_script: Mutex<VecDeque<Result<(), Option<u16>>>>,
}

impl MockGateway {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_cart(raw: RawCart) -> Self {
    let gw = Self::new();
    gw.set_fetch_payload(raw);
    gw
  }

  pub fn set_fetch_payload(&self, raw: RawCart) {
    *self.fetch_payload.lock() = Some(raw);
  }

  pub fn clear_fetch_payload(&self) {
    *self.fetch_payload.lock() = None;
  }

  /// Scripts the next write call to fail with the given HTTP-like status.
  pub fn fail_next_write(&self, status: Option<u16>) {
    self.write_script.lock().push_back(Err(status));
  }

  pub fn pass_next_write(&self) {
    self.write_script.lock().push_back(Ok(()));
  }

  pub fn calls(&self) -> Vec<RecordedCall> {
    self.calls.lock().clone()
  }

  pub fn write_calls(&self) -> Vec<RecordedCall> {
    self
      .calls()
      .into_iter()
      .filter(|c| !matches!(c, RecordedCall::FetchCart { .. }))
      .collect()
  }

  fn next_write_result(&self) -> CartSyncResult<()> {
    match self.write_script.lock().pop_front() {
      None | Some(Ok(())) => Ok(()),
      Some(Err(status)) => Err(CartSyncError::Gateway {
        status,
        source: anyhow!("scripted gateway failure"),
      }),
    }
  }
}

#[async_trait]
impl CartGateway for MockGateway {
  async fn fetch_cart(&self, identity: &BootstrapIdentity) -> CartSyncResult<RawCart> {
    self.calls.lock().push(RecordedCall::FetchCart {
      cart_id: identity.cart_id.clone(),
      user_email: identity.user_email.clone(),
    });
    match self.fetch_payload.lock().clone() {
      Some(raw) => Ok(raw),
      None => Err(CartSyncError::Gateway {
        status: Some(503),
        source: anyhow!("scripted fetch failure"),
      }),
    }
  }

  async fn update_item_quantity(
    &self,
    cart_id: &str,
    product_id: ProductId,
    quantity: u32,
  ) -> CartSyncResult<()> {
    self.calls.lock().push(RecordedCall::UpdateQuantity {
      cart_id: cart_id.to_string(),
      product_id,
      quantity,
    });
    self.next_write_result()
  }

  async fn delete_item(&self, cart_id: &str, product_id: ProductId) -> CartSyncResult<()> {
    self.calls.lock().push(RecordedCall::DeleteItem {
      cart_id: cart_id.to_string(),
      product_id,
    });
    self.next_write_result()
  }

  async fn add_item(&self, cart_id: &str, product_id: ProductId, quantity: u32) -> CartSyncResult<()> {
    self.calls.lock().push(RecordedCall::AddItem {
      cart_id: cart_id.to_string(),
      product_id,
      quantity,
    });
    self.next_write_result()
  }
}

// --- Builders ---

pub fn line(product_id: ProductId, unit_price: f64, quantity: u32) -> CartLineItem {
  CartLineItem {
    product_id,
    name: format!("product-{product_id}"),
    image_ref: None,
    unit_price,
    quantity,
    size: "M".to_string(),
  }
}

pub fn cart_with(items: Vec<CartLineItem>) -> Cart {
  Cart { cart_id: CART_ID.to_string(), items }
}

pub fn raw_item(product_id: ProductId, price: f64, quantity: u64) -> RawCartItem {
  RawCartItem {
    product_id,
    name: Some(format!("product-{product_id}")),
    price: Some(price),
    quantity: Some(serde_json::json!(quantity)),
    ..RawCartItem::default()
  }
}

/// Engine wired to the mock gateway with a seeded identity store.
pub fn engine_with(gateway: Arc<MockGateway>) -> CartEngine<MockGateway> {
  let store = Arc::new(MemoryStore::with_identity(CART_ID, EMAIL));
  CartEngine::new(gateway, store)
}

pub fn engine_with_options(gateway: Arc<MockGateway>, options: EngineOptions) -> CartEngine<MockGateway> {
  let store = Arc::new(MemoryStore::with_identity(CART_ID, EMAIL));
  CartEngine::with_options(gateway, store, options)
}

/// Engine preloaded with a local cart, skipping the fetch round-trip.
pub fn loaded_engine(gateway: Arc<MockGateway>, items: Vec<CartLineItem>) -> CartEngine<MockGateway> {
  let engine = engine_with(gateway);
  engine.handle().replace(cart_with(items));
  engine
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// demos/storefront/src/rest.rs

//! Reqwest-backed implementation of the remote cart gateway, plus the
//! login call that seeds the snapshot store with the bootstrap identity.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, info};

use cartsync::store::keys;
use cartsync::{BootstrapIdentity, CartGateway, CartSyncError, CartSyncResult, ProductId, RawCart, SnapshotStore};

pub struct RestCartGateway {
  client: Client,
  /// Full API prefix, e.g. `http://host:8080/api`.
  api_base: String,
  store: Arc<dyn SnapshotStore>,
}

impl RestCartGateway {
  pub fn new(base_url: &str, store: Arc<dyn SnapshotStore>) -> Self {
    RestCartGateway {
      client: Client::new(),
      api_base: format!("{}/api", base_url.trim_end_matches('/')),
      store,
    }
  }

  /// Builds a request with the stored bearer token attached, when present.
  fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
    let url = format!("{}/{}", self.api_base, endpoint);
    debug!(%method, %url, "issuing gateway request");
    let builder = self.client.request(method, url);
    match self.store.get(keys::JWT_TOKEN) {
      Ok(Some(token)) => builder.bearer_auth(token),
      _ => builder,
    }
  }

  async fn send(&self, builder: RequestBuilder) -> CartSyncResult<Response> {
    let response = builder.send().await.map_err(|e| CartSyncError::Gateway {
      status: e.status().map(|s| s.as_u16()),
      source: anyhow!(e),
    })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      error!(status = status.as_u16(), %body, "gateway rejected request");
      return Err(CartSyncError::Gateway {
        status: Some(status.as_u16()),
        source: anyhow!("backend answered {status}: {body}"),
      });
    }
    Ok(response)
  }

  /// Authenticates and seeds the snapshot store with `jwt-token`,
  /// `user-email` and the user's `cart-id`. Returns the identity the cart
  /// engine will bootstrap from.
  pub async fn login(&self, email: &str, password: &str) -> CartSyncResult<BootstrapIdentity> {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = self
      .send(self.client.post(format!("{}/login", self.api_base)).json(&body))
      .await?;

    let payload: Value = response
      .json()
      .await
      .map_err(|e| CartSyncError::Decode { source: anyhow!(e) })?;
    let token = payload["jwt-token"]
      .as_str()
      .ok_or_else(|| CartSyncError::MissingBootstrap("login response carried no token".to_string()))?
      .to_string();

    self.store.put(keys::JWT_TOKEN, &token)?;
    self.store.put(keys::USER_EMAIL, email)?;

    // The cart id hangs off the user record, not the login response.
    let user = self
      .send(self.request(Method::GET, &format!("public/users/email/{email}")))
      .await?;
    let user: Value = user
      .json()
      .await
      .map_err(|e| CartSyncError::Decode { source: anyhow!(e) })?;
    let cart_id = match &user["cart"]["cartId"] {
      Value::Number(n) => n.to_string(),
      Value::String(s) => s.clone(),
      _ => return Err(CartSyncError::MissingBootstrap(format!("user {email} has no cart"))),
    };
    self.store.put(keys::CART_ID, &cart_id)?;

    info!(%email, %cart_id, "login succeeded, identity stored");
    Ok(BootstrapIdentity { cart_id, user_email: email.to_string() })
  }
}

#[async_trait]
impl CartGateway for RestCartGateway {
  async fn fetch_cart(&self, identity: &BootstrapIdentity) -> CartSyncResult<RawCart> {
    let endpoint = format!("public/users/{}/carts/{}", identity.user_email, identity.cart_id);
    let response = self.send(self.request(Method::GET, &endpoint)).await?;
    response
      .json::<RawCart>()
      .await
      .map_err(|e| CartSyncError::Decode { source: anyhow!(e) })
  }

  async fn update_item_quantity(&self, cart_id: &str, product_id: ProductId, quantity: u32) -> CartSyncResult<()> {
    // Empty body on purpose: the backend 401s when a body is attached.
    let endpoint = format!("public/carts/{cart_id}/products/{product_id}/quantity/{quantity}");
    self.send(self.request(Method::PUT, &endpoint)).await?;
    Ok(())
  }

  async fn delete_item(&self, cart_id: &str, product_id: ProductId) -> CartSyncResult<()> {
    let endpoint = format!("public/carts/{cart_id}/product/{product_id}");
    self.send(self.request(Method::DELETE, &endpoint)).await?;
    Ok(())
  }

  async fn add_item(&self, cart_id: &str, product_id: ProductId, quantity: u32) -> CartSyncResult<()> {
    let endpoint = format!("public/carts/{cart_id}/products/{product_id}/quantity/{quantity}");
    self.send(self.request(Method::POST, &endpoint)).await?;
    Ok(())
  }
}

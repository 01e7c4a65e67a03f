// cartsync/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartSyncError {
  /// A remote cart operation failed. `status` carries the HTTP-like code
  /// when the gateway saw one (absent for pure transport failures).
  #[error("Gateway call failed (status: {status:?}). Source: {source}")]
  Gateway {
    status: Option<u16>,
    #[source]
    source: AnyhowError,
  },

  /// The gateway answered but the payload could not be decoded.
  #[error("Gateway payload could not be decoded: {source}")]
  Decode {
    #[source]
    source: AnyhowError,
  },

  /// The local snapshot store failed for `key`.
  #[error("Snapshot store failed for key '{key}'. Source: {source}")]
  Store {
    key: String,
    #[source]
    source: AnyhowError,
  },

  /// Identity bootstrap (cart id / user email) was not available.
  #[error("Bootstrap identity is missing: {0}")]
  MissingBootstrap(String),

  #[error("Internal cartsync error: {0}")]
  Internal(String),
}

impl CartSyncError {
  /// HTTP-like status attached to a gateway failure, if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      CartSyncError::Gateway { status, .. } => *status,
      _ => None,
    }
  }

  /// Whether this is the 400-class "already in cart / conflicting update"
  /// signal the backend emits on a duplicate add. Callers may compensate
  /// with the alternate write operation once; this is a heuristic, not a
  /// protocol contract.
  pub fn is_conflict(&self) -> bool {
    matches!(self.status(), Some(code) if (400..500).contains(&code))
  }
}

// This is the key conversion cartsync provides for external errors.
impl From<AnyhowError> for CartSyncError {
  fn from(err: AnyhowError) -> Self {
    // Avoid Gateway(Gateway(...)) nesting when anyhow is already wrapping
    // one of our own errors.
    if err.downcast_ref::<CartSyncError>().is_some() {
      return CartSyncError::Internal(err.to_string());
    }
    CartSyncError::Gateway { status: None, source: err }
  }
}

pub type CartSyncResult<T, E = CartSyncError> = std::result::Result<T, E>;

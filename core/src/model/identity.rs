// cartsync/src/model/identity.rs

/// The (cart id, user email) pair needed to address remote cart
/// operations. Sourced from the local snapshot store by an explicit
/// [`load_identity`](crate::store::load_identity) step, never from ambient
/// global reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapIdentity {
  pub cart_id: String,
  pub user_email: String,
}

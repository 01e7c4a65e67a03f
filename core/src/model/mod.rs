// cartsync/src/model/mod.rs

//! In-memory cart representation and the raw wire shapes it is built from.

pub mod cart;
pub mod identity;
pub mod line_item;
pub mod raw;

pub use cart::{Cart, CartTotals};
pub use identity::BootstrapIdentity;
pub use line_item::{CartLineItem, ProductId};
pub use raw::{RawCart, RawCartItem};

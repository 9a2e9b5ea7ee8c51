//! Shopping cart module.
//!
//! Contains the cart and its lines, pricing, the shipping fee rule,
//! persistence and the ledger that ties them together.

mod cart;
mod ledger;
mod pricing;
mod shipping;
mod storage;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
pub use ledger::{CartLedger, CartObserver, SyncStatus};
pub use pricing::{CartPricing, LinePricing};
pub use shipping::{ShippingPolicy, DEFAULT_FLAT_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD};
#[cfg(feature = "storage")]
pub use storage::CacheCartStorage;
pub use storage::{CartStorage, DEFAULT_CART_KEY};

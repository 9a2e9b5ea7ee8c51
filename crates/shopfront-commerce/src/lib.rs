//! Storefront domain types and logic.
//!
//! - **Catalog**: products and the static catalog
//! - **Search**: filter/sort queries over the catalog
//! - **Cart**: the cart ledger, line items, pricing and the shipping fee rule
//! - **Checkout**: postal codes, address autofill, quotes and order confirmation
//!
//! # Example
//!
//! ```rust
//! use shopfront_commerce::prelude::*;
//!
//! let catalog = Catalog::sample();
//! let mut ledger = CartLedger::load(CacheCartStorage::in_memory(), ShippingPolicy::default());
//!
//! let smartband = catalog.get(&ProductId::new("p2")).unwrap();
//! ledger.add(smartband, 2);
//!
//! assert_eq!(ledger.subtotal().display(), "R$\u{a0}399,80");
//! assert_eq!(ledger.total().display(), "R$\u{a0}419,80");
//!
//! let cheapest_first = catalog.search(&Query::new().with_sort(SortKey::PriceAsc));
//! assert_eq!(cheapest_first[0].id.as_str(), "p2");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Search
    pub use crate::search::{Query, SortKey};

    // Cart
    #[cfg(feature = "storage")]
    pub use crate::cart::CacheCartStorage;
    pub use crate::cart::{
        Cart, CartLedger, CartLine, CartObserver, CartPricing, CartStorage, ShippingPolicy,
        SyncStatus,
    };

    // Checkout
    pub use crate::checkout::{
        Address, AddressFields, CheckoutQuote, CheckoutSession, LookupOutcome, LookupStatus,
        LookupTicket, OrderConfirmation, PostalCode,
    };
}

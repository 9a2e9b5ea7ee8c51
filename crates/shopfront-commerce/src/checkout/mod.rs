//! Checkout module.
//!
//! Contains the checkout session, postal codes, address autofill and order
//! confirmation.

mod address;
mod flow;
mod lookup;
mod order;
mod postal;

pub use address::{Address, AddressFields};
pub use flow::CheckoutSession;
pub use lookup::{LookupOutcome, LookupSequencer, LookupStatus, LookupTicket};
pub use order::{CheckoutQuote, OrderConfirmation};
pub use postal::{mask_postal_input, PostalCode, POSTAL_CODE_DIGITS};

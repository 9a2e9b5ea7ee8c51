//! Checkout session: postal-code entry, address autofill and submission.

use crate::cart::{CartLedger, CartStorage};
use crate::checkout::{
    mask_postal_input, Address, CheckoutQuote, LookupOutcome, LookupSequencer, LookupStatus,
    LookupTicket, OrderConfirmation, PostalCode,
};
use crate::CommerceError;

/// State of one checkout form.
///
/// The lookup itself happens elsewhere (it is I/O); the session only issues
/// tickets and applies results, discarding any that were superseded.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    postal_input: String,
    address: Address,
    status: LookupStatus,
    lookups: LookupSequencer,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the postal-code field with raw input.
    ///
    /// The input is masked. When it holds exactly 8 digits a ticket is
    /// returned and the caller should run the lookup; otherwise any lookup
    /// in flight is abandoned.
    pub fn set_postal_input(&mut self, raw: &str) -> Option<LookupTicket> {
        self.postal_input = mask_postal_input(raw);
        self.address.postal_code = PostalCode::from_input(&self.postal_input);

        match &self.address.postal_code {
            Some(code) => {
                let ticket = self.lookups.issue(code.clone());
                self.status = LookupStatus::Searching;
                tracing::debug!(postal_code = %code, seq = ticket.seq(), "postal code lookup issued");
                Some(ticket)
            }
            None => {
                self.lookups.invalidate();
                self.status = LookupStatus::Idle;
                None
            }
        }
    }

    /// Apply a lookup result. Returns `false` if the ticket was superseded,
    /// in which case nothing changes.
    pub fn apply_lookup(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> bool {
        let same_code = self.address.postal_code.as_ref() == Some(ticket.postal_code());
        if !same_code || !self.lookups.settle(ticket) {
            tracing::debug!(seq = ticket.seq(), "discarded stale postal code lookup");
            return false;
        }

        self.status = match outcome {
            LookupOutcome::Found(fields) => {
                tracing::info!(postal_code = %ticket.postal_code(), city = %fields.city, "address filled");
                self.address.fill_from(&fields);
                LookupStatus::Filled
            }
            LookupOutcome::NotFound => {
                tracing::info!(postal_code = %ticket.postal_code(), "postal code not found");
                LookupStatus::NotFound
            }
            LookupOutcome::Failed(reason) => {
                tracing::warn!(postal_code = %ticket.postal_code(), %reason, "postal code lookup failed");
                LookupStatus::Failed
            }
        };
        true
    }

    /// The masked postal-code field.
    pub fn postal_input(&self) -> &str {
        &self.postal_input
    }

    pub fn postal_code(&self) -> Option<&PostalCode> {
        self.address.postal_code.as_ref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Manual edits to the address fields.
    pub fn address_mut(&mut self) -> &mut Address {
        &mut self.address
    }

    pub fn status(&self) -> LookupStatus {
        self.status
    }

    /// Whether shipping can be quoted (a complete postal code is present).
    pub fn has_destination(&self) -> bool {
        self.address.postal_code.is_some()
    }

    /// Totals for the current cart.
    pub fn quote<S: CartStorage>(&self, ledger: &CartLedger<S>) -> CheckoutQuote {
        let subtotal = ledger.subtotal();
        let shipping = self
            .has_destination()
            .then(|| ledger.shipping_fee(subtotal));
        CheckoutQuote::new(subtotal, shipping)
    }

    /// Place the order and clear the cart.
    ///
    /// Fails with [`CommerceError::EmptyCart`] if there is nothing to buy;
    /// the cart is left untouched in that case.
    pub fn submit<S: CartStorage>(
        &mut self,
        ledger: &mut CartLedger<S>,
    ) -> Result<OrderConfirmation, CommerceError> {
        if ledger.is_empty() {
            tracing::debug!("checkout rejected, cart is empty");
            return Err(CommerceError::EmptyCart);
        }

        let quote = self.quote(ledger);
        let confirmation =
            OrderConfirmation::new(ledger.lines().to_vec(), quote, self.address.clone());
        ledger.clear();

        tracing::info!(
            order = %confirmation.order_number,
            items = confirmation.item_count(),
            total = %confirmation.quote.total,
            "order placed"
        );
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLine, ShippingPolicy};
    use crate::catalog::Product;
    use crate::checkout::AddressFields;
    use crate::money::Money;
    use std::cell::RefCell;

    #[derive(Default)]
    struct VecStorage(RefCell<Option<Vec<CartLine>>>);

    impl CartStorage for VecStorage {
        fn read(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
            Ok(self.0.borrow().clone())
        }

        fn write(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
            *self.0.borrow_mut() = Some(lines.to_vec());
            Ok(())
        }
    }

    fn ledger_with(cents: i64, qty: i64) -> CartLedger<VecStorage> {
        let mut ledger = CartLedger::load(VecStorage::default(), ShippingPolicy::default());
        ledger.add(&Product::new("p2", "Smartband 4", Money::new(cents)), qty);
        ledger
    }

    fn se() -> AddressFields {
        AddressFields {
            street: "Praça da Sé".into(),
            neighborhood: "Sé".into(),
            city: "São Paulo".into(),
            state_code: "SP".into(),
        }
    }

    #[test]
    fn test_partial_input_issues_no_ticket() {
        let mut session = CheckoutSession::new();
        assert!(session.set_postal_input("0100").is_none());
        assert_eq!(session.postal_input(), "0100");
        assert_eq!(session.status(), LookupStatus::Idle);
        assert!(!session.has_destination());
    }

    #[test]
    fn test_lookup_fills_address() {
        let mut session = CheckoutSession::new();
        let ticket = session.set_postal_input("01001000").unwrap();
        assert_eq!(session.postal_input(), "01001-000");
        assert_eq!(session.status(), LookupStatus::Searching);
        assert_eq!(ticket.postal_code().digits(), "01001000");

        assert!(session.apply_lookup(&ticket, LookupOutcome::Found(se())));
        assert_eq!(session.status(), LookupStatus::Filled);
        assert_eq!(session.address().city, "São Paulo");
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut session = CheckoutSession::new();
        let first = session.set_postal_input("01001000").unwrap();
        let second = session.set_postal_input("20040-002").unwrap();

        assert!(!session.apply_lookup(&first, LookupOutcome::Found(se())));
        assert_eq!(session.status(), LookupStatus::Searching);
        assert!(session.address().city.is_empty());

        assert!(session.apply_lookup(&second, LookupOutcome::NotFound));
        assert_eq!(session.status(), LookupStatus::NotFound);
    }

    #[test]
    fn test_editing_postal_code_abandons_lookup() {
        let mut session = CheckoutSession::new();
        let ticket = session.set_postal_input("01001000").unwrap();
        session.set_postal_input("0100100");
        assert!(!session.apply_lookup(&ticket, LookupOutcome::Found(se())));
        assert_eq!(session.status(), LookupStatus::Idle);
    }

    #[test]
    fn test_lookup_for_replaced_code_is_discarded() {
        let mut session = CheckoutSession::new();
        let ticket = session.set_postal_input("01001000").unwrap();
        session.address_mut().postal_code = PostalCode::from_input("20040002");
        assert!(!session.apply_lookup(&ticket, LookupOutcome::Found(se())));
        assert!(session.address().city.is_empty());
    }

    #[test]
    fn test_failed_lookup_keeps_manual_fields() {
        let mut session = CheckoutSession::new();
        session.address_mut().city = "Recife".into();
        let ticket = session.set_postal_input("50000000").unwrap();
        assert!(session.apply_lookup(&ticket, LookupOutcome::Failed("timeout".into())));
        assert_eq!(session.status(), LookupStatus::Failed);
        assert_eq!(session.address().city, "Recife");
    }

    #[test]
    fn test_quote_needs_destination() {
        let ledger = ledger_with(19_990, 2);
        let mut session = CheckoutSession::new();

        let quote = session.quote(&ledger);
        assert_eq!(quote.shipping, None);
        assert_eq!(quote.total.amount_cents, 39_980);

        session.set_postal_input("01001000");
        let quote = session.quote(&ledger);
        assert_eq!(quote.shipping, Some(Money::new(2_000)));
        assert_eq!(quote.total.amount_cents, 41_980);
    }

    #[test]
    fn test_submit_empty_cart_fails() {
        let mut ledger = CartLedger::load(VecStorage::default(), ShippingPolicy::default());
        let mut session = CheckoutSession::new();
        assert!(matches!(session.submit(&mut ledger), Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_submit_clears_cart() {
        let mut ledger = ledger_with(400_000, 1);
        let mut session = CheckoutSession::new();
        let ticket = session.set_postal_input("01001000").unwrap();
        session.apply_lookup(&ticket, LookupOutcome::Found(se()));

        let confirmation = session.submit(&mut ledger).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(confirmation.lines.len(), 1);
        assert_eq!(confirmation.quote.shipping, Some(Money::ZERO));
        assert_eq!(confirmation.quote.total.amount_cents, 400_000);
        assert_eq!(confirmation.address.state_code, "SP");
        assert!(ledger.storage().0.borrow().as_ref().unwrap().is_empty());
    }
}

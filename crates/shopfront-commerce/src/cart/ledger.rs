//! The cart ledger: owns the cart, persists it and notifies observers.

use crate::cart::{Cart, CartLine, CartPricing, CartStorage, ShippingPolicy};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// Receives the cart after every mutation.
///
/// Closures taking `(&Cart, &CartPricing)` implement this trait.
pub trait CartObserver {
    fn cart_changed(&mut self, cart: &Cart, pricing: &CartPricing);
}

impl<F> CartObserver for F
where
    F: FnMut(&Cart, &CartPricing),
{
    fn cart_changed(&mut self, cart: &Cart, pricing: &CartPricing) {
        self(cart, pricing)
    }
}

/// Whether the in-memory cart matches what was last written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Saved,
    /// The last write failed; the in-memory cart is ahead of storage.
    Unsaved { reason: String },
}

impl SyncStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SyncStatus::Saved)
    }
}

/// The single authority for the cart.
///
/// Each mutating operation writes the full line list to storage and then
/// notifies observers, in that order. A failed write keeps the in-memory
/// state and is reported through [`CartLedger::sync_status`].
pub struct CartLedger<S> {
    cart: Cart,
    storage: S,
    shipping: ShippingPolicy,
    observers: Vec<Box<dyn CartObserver>>,
    sync: SyncStatus,
}

impl<S: CartStorage> CartLedger<S> {
    /// Load the cart from storage.
    ///
    /// Missing data yields an empty cart. Unreadable or corrupt data is
    /// logged and also yields an empty cart.
    pub fn load(storage: S, shipping: ShippingPolicy) -> Self {
        let cart = match storage.read() {
            Ok(Some(lines)) => {
                let stored = lines.len();
                let cart = Cart::from_lines(lines);
                if cart.len() != stored {
                    tracing::debug!(stored, kept = cart.len(), "normalized stored cart lines");
                }
                cart
            }
            Ok(None) => Cart::new(),
            Err(error) => {
                tracing::warn!(%error, "stored cart unreadable, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(lines = cart.len(), items = cart.item_count(), "cart loaded");

        Self {
            cart,
            storage,
            shipping,
            observers: Vec::new(),
            sync: SyncStatus::Saved,
        }
    }

    /// Register an observer. It is called after every subsequent mutation.
    pub fn on_changed(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// A non-positive quantity leaves the lines unchanged.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if !self.cart.add(product, quantity) {
            tracing::debug!(product_id = %product.id, quantity, "ignored non-positive add");
        }
        self.commit("add");
    }

    /// Set a line's quantity. `quantity <= 0` removes the line; an unknown
    /// id leaves the lines unchanged.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if !self.cart.set_quantity(product_id, quantity) {
            tracing::debug!(%product_id, quantity, "quantity update matched no line");
        }
        self.commit("update_quantity");
    }

    /// Remove a product's line if present.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.cart.remove(product_id);
        self.commit("remove");
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit("clear");
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Shipping fee for a subtotal under this ledger's policy.
    pub fn shipping_fee(&self, subtotal: Money) -> Money {
        self.shipping.fee_for(subtotal)
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        subtotal + self.shipping_fee(subtotal)
    }

    pub fn pricing(&self) -> CartPricing {
        CartPricing::calculate(&self.cart, &self.shipping)
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist, then notify.
    fn commit(&mut self, operation: &'static str) {
        self.sync = match self.storage.write(self.cart.lines()) {
            Ok(()) => SyncStatus::Saved,
            Err(error) => {
                tracing::warn!(operation, %error, "failed to persist cart");
                SyncStatus::Unsaved {
                    reason: error.to_string(),
                }
            }
        };

        if self.observers.is_empty() {
            return;
        }
        let pricing = CartPricing::calculate(&self.cart, &self.shipping);
        for observer in &mut self.observers {
            observer.cart_changed(&self.cart, &pricing);
        }
    }
}

impl<S> std::fmt::Debug for CartLedger<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartLedger")
            .field("cart", &self.cart)
            .field("shipping", &self.shipping)
            .field("observers", &self.observers.len())
            .field("sync", &self.sync)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommerceError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-test storage that records writes and can be told to fail.
    #[derive(Clone, Default)]
    struct RecordingStorage {
        stored: Rc<RefCell<Option<Vec<CartLine>>>>,
        writes: Rc<RefCell<usize>>,
        fail_reads: bool,
        fail_writes: Rc<RefCell<bool>>,
    }

    impl CartStorage for RecordingStorage {
        fn read(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
            if self.fail_reads {
                return Err(CommerceError::SerializationError("expected a sequence".into()));
            }
            Ok(self.stored.borrow().clone())
        }

        fn write(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
            if *self.fail_writes.borrow() {
                return Err(CommerceError::StorageError("quota exceeded".into()));
            }
            *self.writes.borrow_mut() += 1;
            *self.stored.borrow_mut() = Some(lines.to_vec());
            Ok(())
        }
    }

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::new(cents))
    }

    fn ledger() -> (CartLedger<RecordingStorage>, RecordingStorage) {
        let storage = RecordingStorage::default();
        (CartLedger::load(storage.clone(), ShippingPolicy::default()), storage)
    }

    #[test]
    fn test_load_empty() {
        let (ledger, _) = ledger();
        assert!(ledger.is_empty());
        assert_eq!(ledger.item_count(), 0);
        assert!(ledger.sync_status().is_saved());
    }

    #[test]
    fn test_load_corrupt_yields_empty() {
        let storage = RecordingStorage {
            fail_reads: true,
            ..Default::default()
        };
        let ledger = CartLedger::load(storage, ShippingPolicy::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_normalizes_lines() {
        let storage = RecordingStorage::default();
        *storage.stored.borrow_mut() = Some(vec![
            CartLine::from_product(&product("p1", 100), 2),
            CartLine { quantity: 0, ..CartLine::from_product(&product("p2", 100), 1) },
            CartLine::from_product(&product("p1", 100), 1),
        ]);
        let ledger = CartLedger::load(storage, ShippingPolicy::default());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.item_count(), 3);
    }

    #[test]
    fn test_add_twice_merges() {
        let (mut ledger, storage) = ledger();
        let p2 = product("p2", 19_990);
        ledger.add(&p2, 1);
        ledger.add(&p2, 1);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].quantity, 2);
        assert_eq!(ledger.subtotal().amount_cents, 39_980);
        assert_eq!(storage.stored.borrow().as_ref().unwrap()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let (mut ledger, _) = ledger();
        let p1 = product("p1", 400_000);
        ledger.add(&p1, 1);
        ledger.update_quantity(&p1.id, 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let (mut ledger, storage) = ledger();
        let p1 = product("p1", 400_000);
        let p2 = product("p2", 19_990);
        ledger.add(&p1, 1);
        ledger.add(&p2, 2);

        ledger.update_quantity(&p1.id, -1);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.cart().get(&p1.id).is_none());
        assert_eq!(storage.stored.borrow().as_ref().unwrap().len(), 1);
        assert_eq!(ledger.subtotal().amount_cents, 39_980);
    }

    #[test]
    fn test_update_unknown_id_is_noop_but_persists() {
        let (mut ledger, storage) = ledger();
        ledger.add(&product("p1", 100), 1);
        ledger.update_quantity(&ProductId::new("missing"), 5);
        assert_eq!(ledger.item_count(), 1);
        assert_eq!(*storage.writes.borrow(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let (mut ledger, storage) = ledger();
        ledger.add(&product("p1", 100), 1);
        ledger.add(&product("p2", 100), 1);
        ledger.remove(&ProductId::new("p1"));
        assert_eq!(ledger.len(), 1);
        ledger.remove(&ProductId::new("p1"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.subtotal().amount_cents, 100);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.subtotal(), Money::ZERO);
        assert_eq!(ledger.item_count(), 0);
        assert_eq!(storage.stored.borrow().as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_totals() {
        let (mut ledger, _) = ledger();
        ledger.add(&product("p2", 19_990), 2);
        assert_eq!(ledger.shipping_fee(ledger.subtotal()).amount_cents, 2_000);
        assert_eq!(ledger.total().amount_cents, 41_980);

        ledger.add(&product("p1", 400_000), 1);
        assert_eq!(ledger.total(), ledger.subtotal());
    }

    #[test]
    fn test_observers_see_post_state_after_write() {
        let (mut ledger, storage) = ledger();
        let seen: Rc<RefCell<Vec<(i64, usize)>>> = Rc::default();

        let seen_by_observer = seen.clone();
        let writes = storage.writes.clone();
        ledger.on_changed(move |cart: &Cart, pricing: &CartPricing| {
            assert_eq!(cart.item_count(), pricing.item_count);
            seen_by_observer
                .borrow_mut()
                .push((pricing.item_count, *writes.borrow()));
        });

        ledger.add(&product("p1", 100), 2);
        ledger.update_quantity(&ProductId::new("p1"), 5);
        ledger.clear();

        assert_eq!(*seen.borrow(), vec![(2, 1), (5, 2), (0, 3)]);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let (mut ledger, storage) = ledger();
        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        ledger.on_changed(move |_: &Cart, _: &CartPricing| *counter.borrow_mut() += 1);

        *storage.fail_writes.borrow_mut() = true;
        ledger.add(&product("p1", 100), 1);

        assert_eq!(ledger.item_count(), 1);
        assert_eq!(*notified.borrow(), 1);
        assert!(matches!(ledger.sync_status(), SyncStatus::Unsaved { .. }));

        *storage.fail_writes.borrow_mut() = false;
        ledger.add(&product("p1", 100), 1);
        assert!(ledger.sync_status().is_saved());
        assert_eq!(storage.stored.borrow().as_ref().unwrap()[0].quantity, 2);
    }

    #[test]
    fn test_reload_round_trip() {
        let (mut ledger, storage) = ledger();
        ledger.add(&product("p1", 100).with_image("a.png"), 3);
        ledger.add(&product("p2", 250), 1);

        let reloaded = CartLedger::load(storage, ShippingPolicy::default());
        assert_eq!(reloaded.cart(), ledger.cart());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: adding q1 then q2 yields one line with q1 + q2.
            #[test]
            fn repeated_adds_sum(q1 in 1i64..5000, q2 in 1i64..4999) {
                let (mut ledger, _) = ledger();
                let p = product("p1", 123);
                ledger.add(&p, q1);
                ledger.add(&p, q2);
                prop_assert_eq!(ledger.len(), 1);
                prop_assert_eq!(ledger.item_count(), q1 + q2);
            }

            /// Property: quantities stay positive and the subtotal matches the lines.
            #[test]
            fn lines_stay_valid(ops in proptest::collection::vec((0usize..3, -3i64..6, 0u8..3), 0..40)) {
                let (mut ledger, _) = ledger();
                let products = [product("a", 100), product("b", 250), product("c", 999)];
                for (idx, qty, kind) in ops {
                    let p = &products[idx];
                    match kind {
                        0 => ledger.add(p, qty),
                        1 => {
                            ledger.update_quantity(&p.id, qty);
                            if qty <= 0 {
                                prop_assert!(ledger.cart().get(&p.id).is_none());
                            }
                        }
                        _ => ledger.remove(&p.id),
                    }
                }
                let expected: i64 = ledger.lines().iter().map(|l| l.price.amount_cents * l.quantity).sum();
                prop_assert!(ledger.lines().iter().all(|l| l.quantity >= 1));
                prop_assert_eq!(ledger.subtotal().amount_cents, expected);
            }
        }
    }
}

//! Cart ledger persistence against the file-backed store.

use shopfront_cache::Cache;
use shopfront_commerce::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn open(dir: &std::path::Path) -> CartLedger<CacheCartStorage> {
    let cache = Cache::open(dir).unwrap();
    CartLedger::load(CacheCartStorage::new(cache), ShippingPolicy::default())
}

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::sample();

    {
        let mut ledger = open(dir.path());
        ledger.add(catalog.get(&ProductId::new("p2")).unwrap(), 2);
        ledger.add(catalog.get(&ProductId::new("p5")).unwrap(), 1);
        ledger.update_quantity(&ProductId::new("p2"), 3);
        assert!(ledger.sync_status().is_saved());
    }

    let ledger = open(dir.path());
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.item_count(), 4);
    assert_eq!(ledger.lines()[0].product_id.as_str(), "p2");
    assert_eq!(ledger.lines()[0].image.as_deref(), Some("images/exclusive.png"));
    assert_eq!(ledger.subtotal().amount_cents, 3 * 19_990 + 29_990);
}

#[test]
fn test_reads_browser_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":"p1","name":"Combo Gamer","price":4000,"qty":1,"image":"images/products/product-4.png"}]"#,
    )
    .unwrap();

    let ledger = open(dir.path());
    assert_eq!(ledger.item_count(), 1);
    assert_eq!(ledger.subtotal().amount_cents, 400_000);
    assert_eq!(ledger.shipping_fee(ledger.subtotal()), Money::ZERO);
}

#[test]
fn test_corrupt_file_yields_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{not json").unwrap();

    let mut ledger = open(dir.path());
    assert!(ledger.is_empty());

    ledger.add(&Product::new("p9", "Mouse", Money::new(5_000)), 1);
    let reloaded = open(dir.path());
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn test_checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::sample();
    let mut ledger = open(dir.path());
    let badge = Rc::new(RefCell::new(0));

    let badge_in_observer = badge.clone();
    ledger.on_changed(move |cart: &Cart, _: &CartPricing| {
        *badge_in_observer.borrow_mut() = cart.item_count();
    });

    ledger.add(catalog.get(&ProductId::new("p3")).unwrap(), 2);
    assert_eq!(*badge.borrow(), 2);

    let mut session = CheckoutSession::new();
    session.set_postal_input("01001-000");
    let confirmation = session.submit(&mut ledger).unwrap();

    assert_eq!(confirmation.quote.subtotal.amount_cents, 69_980);
    assert_eq!(confirmation.quote.shipping, Some(Money::ZERO));
    assert_eq!(confirmation.quote.total.amount_cents, 69_980);
    assert_eq!(*badge.borrow(), 0);
    assert!(open(dir.path()).is_empty());
}

#[test]
fn test_checkout_below_threshold_pays_flat_fee() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::sample();
    let mut ledger = open(dir.path());
    ledger.add(catalog.get(&ProductId::new("p2")).unwrap(), 2);

    let mut session = CheckoutSession::new();
    session.set_postal_input("01001000");
    let confirmation = session.submit(&mut ledger).unwrap();

    assert_eq!(confirmation.quote.subtotal.amount_cents, 39_980);
    assert_eq!(confirmation.quote.shipping, Some(Money::new(2_000)));
    assert_eq!(confirmation.quote.total.amount_cents, 41_980);
}

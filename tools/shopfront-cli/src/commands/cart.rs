//! Cart commands.

use anyhow::{Context as _, Result};
use shopfront_commerce::cart::{Cart, CartLedger, CartPricing, CartStorage, SyncStatus};
use shopfront_commerce::catalog::Product;
use shopfront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut ledger = ctx.ledger()?;

    let output = ctx.output.clone();
    ledger.on_changed(move |cart: &Cart, pricing: &CartPricing| {
        output.debug(&format!(
            "Cart now holds {} item(s), subtotal {}",
            cart.item_count(),
            pricing.subtotal.display()
        ));
    });

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, qty } => {
            let catalog = ctx.catalog()?;
            let product = catalog
                .get(&ProductId::new(id))
                .context("Cannot add to cart")?;
            match add_to_cart(&mut ledger, product, qty) {
                Some(added) => ctx
                    .output
                    .success(&format!("Added {} × {}", added, product.name)),
                None => ctx.output.warn(&format!(
                    "Nothing added: quantity must be at least 1 (got {})",
                    qty
                )),
            }
        }
        CartCommand::Update { id, qty } => {
            let id = ProductId::new(id);
            if ledger.cart().get(&id).is_none() {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            ledger.update_quantity(&id, qty);
        }
        CartCommand::Remove { id } => {
            ledger.remove(&ProductId::new(id));
        }
        CartCommand::Clear => {
            ledger.clear();
            ctx.output.success("Cart cleared");
        }
    }

    if let SyncStatus::Unsaved { reason } = ledger.sync_status() {
        ctx.output.warn(&format!("Cart changes were not saved: {}", reason));
    }

    show_cart(&ledger, ctx);
    Ok(())
}

/// Add `qty` of `product`, returning how many units actually went in.
///
/// `None` when the ledger ignored the add (non-positive quantity, or the
/// line is already at its cap).
fn add_to_cart<S: CartStorage>(
    ledger: &mut CartLedger<S>,
    product: &Product,
    qty: i64,
) -> Option<i64> {
    let before = ledger.item_count();
    ledger.add(product, qty);
    let added = ledger.item_count() - before;
    tracing::debug!(product = %product.id, requested = qty, added, "cart add");
    (added > 0).then_some(added)
}

/// Print the cart lines and totals.
pub fn show_cart<S: CartStorage>(ledger: &CartLedger<S>, ctx: &Context) {
    let pricing = ledger.pricing();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": ledger.lines(),
            "pricing": pricing,
        }));
        return;
    }

    ctx.output.header(&format!("Cart ({})", pricing.item_count));
    if ledger.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [6, 24, 5, 14, 14];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for line in ledger.lines() {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &line.quantity.to_string(),
                &line.price.display(),
                &line.total().display(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    if pricing.has_free_shipping() {
        ctx.output.kv("shipping", "free");
    } else {
        ctx.output.kv("shipping", &pricing.shipping_total.display());
    }
    ctx.output.kv("total", &pricing.grand_total.display());
}

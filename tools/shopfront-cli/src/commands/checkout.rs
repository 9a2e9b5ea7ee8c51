//! Checkout command.

use anyhow::{Context as _, Result};
use shopfront_commerce::checkout::{Address, CheckoutQuote, CheckoutSession, LookupStatus};
use shopfront_lookup::autofill;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::lookup_badge;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut ledger = ctx.ledger()?;
    let mut session = CheckoutSession::new();

    if let Some(cep) = &args.cep {
        let client = ctx.lookup_client()?;
        let spinner = ctx.output.spinner(LookupStatus::Searching.message());
        let status = autofill(&mut session, &client, cep).await;
        spinner.finish_and_clear();
        tracing::debug!(input = %cep, ?status, "postal code lookup finished");

        match status {
            LookupStatus::Idle => ctx.output.warn(&format!(
                "Postal code '{}' is incomplete; shipping can't be quoted yet",
                session.postal_input()
            )),
            LookupStatus::Filled => ctx.output.success(&lookup_badge(status)),
            _ => ctx.output.warn(&lookup_badge(status)),
        }
    }

    apply_manual_fields(&args, session.address_mut());

    let quote = session.quote(&ledger);

    if !args.confirm {
        print_quote(&quote, session.address(), ctx);
        return Ok(());
    }

    tracing::debug!(items = ledger.item_count(), total = %quote.total, "submitting order");
    let confirmation = session.submit(&mut ledger).context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output
        .success(&format!("Order {} placed!", confirmation.order_number));
    ctx.output
        .kv("items", &confirmation.item_count().to_string());
    print_totals(&confirmation.quote, ctx);
    if confirmation.address.has_details() || confirmation.address.postal_code.is_some() {
        ctx.output.kv("deliver to", &confirmation.address.one_line());
    }

    Ok(())
}

fn apply_manual_fields(args: &CheckoutArgs, address: &mut Address) {
    let fields = [
        (&args.number, &mut address.number),
        (&args.street, &mut address.street),
        (&args.neighborhood, &mut address.neighborhood),
        (&args.city, &mut address.city),
        (&args.state, &mut address.state_code),
    ];
    for (value, field) in fields {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
    if let Some(complement) = &args.complement {
        address.complement = Some(complement.clone());
    }
}

fn print_quote(quote: &CheckoutQuote, address: &Address, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "quote": quote,
            "address": address,
        }));
        return;
    }

    ctx.output.header("Checkout");
    if address.has_details() || address.postal_code.is_some() {
        ctx.output.kv("deliver to", &address.one_line());
    }
    print_totals(quote, ctx);
    ctx.output.info("Run again with --confirm to place the order.");
}

fn print_totals(quote: &CheckoutQuote, ctx: &Context) {
    ctx.output.kv("subtotal", &quote.subtotal.display());
    match quote.shipping {
        Some(fee) if fee.is_zero() => ctx.output.kv("shipping", "free"),
        Some(fee) => ctx.output.kv("shipping", &fee.display()),
        None => ctx.output.kv("shipping", "enter a postal code (--cep) to quote"),
    }
    ctx.output.kv("total", &quote.total.display());
}

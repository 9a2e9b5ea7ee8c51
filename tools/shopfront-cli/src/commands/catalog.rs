//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use shopfront_commerce::catalog::Product;
use shopfront_commerce::search::{Query, SortKey};
use shopfront_commerce::ProductId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command.unwrap_or(CatalogCommand::List) {
        CatalogCommand::List => {
            let sort: SortKey = args.sort.parse()?;
            let mut query = Query::new().with_term(args.term).with_sort(sort);
            if let Some(category) = args.category {
                query = query.with_category(category);
            }
            list_products(&catalog.search(&query), sort, ctx);
        }
        CatalogCommand::Categories => {
            let categories = catalog.categories();
            if ctx.output.is_json() {
                ctx.output.json(&categories);
                return Ok(());
            }
            ctx.output.header("Categories");
            for category in categories {
                ctx.output.list_item(category);
            }
        }
        CatalogCommand::Show { id } => {
            let product = catalog
                .get(&ProductId::new(id))
                .context("Unknown product")?;
            show_product(product, ctx);
        }
    }

    Ok(())
}

fn listing_title(sort: SortKey) -> String {
    format!("Products (sorted by {})", sort.display_name())
}

fn list_products(products: &[&Product], sort: SortKey, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    if products.is_empty() {
        ctx.output.info("No products match.");
        return;
    }

    let widths = [6, 24, 14, 14];
    ctx.output.header(&listing_title(sort));
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &product.price.display(),
            ],
            &widths,
        );
    }
}

fn show_product(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price.display());
    if !product.category.is_empty() {
        ctx.output.kv("category", &product.category);
    }
    if let Some(image) = product.primary_image() {
        ctx.output.kv("image", image);
    }
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_title_names_sort() {
        assert_eq!(listing_title(SortKey::None), "Products (sorted by Featured)");
        assert_eq!(
            listing_title("price-desc".parse().unwrap()),
            "Products (sorted by Price: High to Low)"
        );
    }
}

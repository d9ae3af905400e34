//! Product lookups: stock, price and option lists.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde_json::json;
use storefront_commerce::catalog::Product;
use storefront_commerce::Currency;

use super::{LookupArgs, OptionsArgs};
use crate::context::Context;
use crate::output::{join_or_dash, stock_badge};

/// Read and normalize a product record.
pub fn load_product(path: &Path, currency: Currency) -> Result<Product> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read product: {}", path.display()))?;
    let product = Product::from_json(&content, currency)
        .with_context(|| format!("Failed to parse product: {}", path.display()))?;
    tracing::debug!(product = %product.id, variants = product.variants.len(), "loaded product");
    Ok(product)
}

fn product_from(ctx: &Context, path: &str) -> Result<Product> {
    load_product(&ctx.resolve_path(path), ctx.config.currency()?)
}

/// Run the stock command.
pub fn stock(args: LookupArgs, ctx: &Context) -> Result<()> {
    let product = product_from(ctx, &args.product.product)?;
    let status = product.stock_status();
    let color = args.selection.color.as_deref();
    let size = args.selection.size.as_deref();
    let selected = (color.is_some() || size.is_some()).then(|| product.variant_stock_for(color, size));

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product.id,
            "status": status,
            "selection": selected.map(|stock| json!({ "color": color, "size": size, "stock": stock })),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("status", &stock_badge(&status));
    ctx.output.kv("total", &status.total_stock.to_string());
    ctx.output.kv("sizes out of stock", &join_or_dash(&status.out_of_stock_sizes));
    ctx.output.kv("colours out of stock", &join_or_dash(&status.out_of_stock_colors));

    match selected {
        Some(Some(stock)) => ctx.output.kv("selection", &stock.to_string()),
        Some(None) => ctx.output.warn("No variant carries that selection"),
        None => {}
    }

    Ok(())
}

/// Run the price command.
pub fn price(args: LookupArgs, ctx: &Context) -> Result<()> {
    let product = product_from(ctx, &args.product.product)?;
    let color = args.selection.color.as_deref();
    let size = args.selection.size.as_deref();
    let unit = product.price_for(color, size);
    let display = product.display_price();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product.id,
            "color": color,
            "size": size,
            "price": unit,
            "display": display,
            "label": display.label(),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("card label", &display.label());
    if display.is_range() {
        ctx.output.kv("range", &format!("{} - {}", display.min, display.max));
    }
    ctx.output.kv("selection", &format!("{} / {}", color.unwrap_or("-"), size.unwrap_or("-")));
    ctx.output.kv("price", &unit.display());
    if let Some(original) = product.pricing.original_price() {
        ctx.output.kv("was", &original.display());
    }

    Ok(())
}

/// Run the options command.
pub fn options(args: OptionsArgs, ctx: &Context) -> Result<()> {
    let product = product_from(ctx, &args.product.product)?;
    let colors = product.color_options();
    let sizes = product.size_options(args.color.as_deref());

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "colors": colors, "sizes": sizes }));
        return Ok(());
    }

    let status = product.stock_status();
    ctx.output.header("Colours");
    for color in &colors {
        if status.is_color_out_of_stock(color) {
            ctx.output.list_item(&format!("{} (out of stock)", color));
        } else {
            ctx.output.list_item(color);
        }
    }

    ctx.output.header("Sizes");
    for size in &sizes {
        if status.is_size_out_of_stock(size) {
            ctx.output.list_item(&format!("{} (out of stock)", size));
        } else {
            ctx.output.list_item(size);
        }
    }

    Ok(())
}

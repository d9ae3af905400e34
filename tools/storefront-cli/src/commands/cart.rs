//! Cart commands.

use anyhow::{bail, Result};
use storefront_cache::FileStore;
use storefront_commerce::cart::{CartStore, ItemOptions};
use storefront_commerce::{CartItemId, CommerceError};

use super::catalog::load_product;
use super::{CartArgs, CartCommand, SelectionArgs};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;

    match args.command {
        CartCommand::Show => {}
        CartCommand::Add {
            product,
            selection,
            quantity,
        } => {
            let product = load_product(&ctx.resolve_path(&product), ctx.config.currency()?)?;
            let id = store.add_item(&product, options_from(selection), quantity)?;
            ctx.output.success(&format!("Added {} x {} ({})", quantity, product.name, id));
        }
        CartCommand::Qty { item, quantity } => {
            let id = CartItemId::new(item);
            require(store.update_quantity(&id, quantity)?, &id)?;
            ctx.output.success(&format!("Set {} to {}", id, quantity));
        }
        CartCommand::Inc { item } => {
            let id = CartItemId::new(item);
            require(store.increment(&id)?, &id)?;
        }
        CartCommand::Dec { item } => {
            let id = CartItemId::new(item);
            require(store.decrement(&id)?, &id)?;
        }
        CartCommand::Options { item, selection } => {
            let id = CartItemId::new(item);
            match store.update_item_options(&id, options_from(selection))? {
                Some(new_id) => ctx.output.success(&format!("Updated {} -> {}", id, new_id)),
                None => return Err(not_in_cart(&id)),
            }
        }
        CartCommand::Remove { item } => {
            let id = CartItemId::new(item);
            require(store.remove_item(&id)?, &id)?;
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Clear => {
            store.clear()?;
            ctx.output.success("Cart cleared");
            return Ok(());
        }
        CartCommand::Checkout => {
            if store.cart().is_empty() {
                bail!("Cart is empty");
            }
            let pricing = store.complete_checkout()?;
            if ctx.output.is_json() {
                ctx.output.json(&pricing);
            } else {
                ctx.output.success(&format!(
                    "Checked out {} item(s) for {}",
                    pricing.item_count, pricing.subtotal
                ));
            }
            return Ok(());
        }
    }

    show(&store, ctx)
}

fn options_from(selection: SelectionArgs) -> ItemOptions {
    ItemOptions {
        size: selection.size,
        color: selection.color,
    }
}

fn require(found: bool, id: &CartItemId) -> Result<()> {
    if !found {
        return Err(not_in_cart(id));
    }
    Ok(())
}

fn not_in_cart(id: &CartItemId) -> anyhow::Error {
    CommerceError::ItemNotInCart(id.to_string()).into()
}

fn show(store: &CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let cart = store.cart();
    let pricing = cart.calculate_pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cart": cart, "pricing": pricing }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart for {}", cart.storefront));
    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    let widths = [28, 20, 5, 12, 12];
    ctx.output.table_row(&["ID", "ITEM", "QTY", "PRICE", "TOTAL"], &widths);
    for item in &cart.items {
        let total = pricing
            .line(&item.id)
            .map(|line| line.total.display())
            .unwrap_or_default();
        let quantity = item.quantity.to_string();
        let price = item.price.display();
        ctx.output.table_row(
            &[item.id.as_str(), item.name.as_str(), quantity.as_str(), price.as_str(), total.as_str()],
            &widths,
        );
        if ctx.output.is_verbose() {
            let snapshot = item.pricing_info.price_for(item.options.color(), item.options.size());
            ctx.output.kv("snapshot price", &snapshot.display());
        }
    }

    ctx.output.kv("items", &pricing.item_count.to_string());
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    Ok(())
}

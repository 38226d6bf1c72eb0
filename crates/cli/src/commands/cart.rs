//! Shopping cart commands, including checkout and the confirmation view.

use deportes_elite_core::{CartItem, Order, Price, ProductId};

use super::{CliError, Context};

/// List the cart lines with their subtotals.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let items = ctx.client.cart_items().await?;

    if items.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for item in &items {
        println!(
            "{:>3} x {:<40}  {:>10} each  {:>10}",
            item.quantity,
            item.product.description,
            item.unit_price.to_string(),
            item.subtotal().to_string()
        );
    }

    let total: Price = items.iter().map(CartItem::subtotal).sum();
    println!("Total: {total}");
    Ok(())
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `CliError` if stock is insufficient or the session is missing
/// or expired.
#[allow(clippy::print_stdout)]
pub async fn add(ctx: &Context, product: ProductId, quantity: u32) -> Result<(), CliError> {
    let message = ctx.client.add_to_cart(product, quantity).await?;
    println!("{message}");
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn remove(ctx: &Context, product: ProductId) -> Result<(), CliError> {
    ctx.client.remove_from_cart(product).await?;
    println!("Removed product {product} from the cart.");
    Ok(())
}

/// Set the quantity of a product already in the cart.
///
/// # Errors
///
/// Returns `CliError` if stock is insufficient or the session is missing
/// or expired.
#[allow(clippy::print_stdout)]
pub async fn set_quantity(ctx: &Context, product: ProductId, quantity: u32) -> Result<(), CliError> {
    ctx.client.update_quantity(product, quantity).await?;
    println!("Set product {product} to quantity {quantity}.");
    Ok(())
}

/// Remove every line from the cart.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn empty(ctx: &Context) -> Result<(), CliError> {
    ctx.client.empty_cart().await?;
    println!("Cart emptied.");
    Ok(())
}

/// Show the number of items in the cart.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn count(ctx: &Context) -> Result<(), CliError> {
    let count = ctx.client.cart_count().await?;
    println!("{count}");
    Ok(())
}

/// Show the total amount of the cart.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn total(ctx: &Context) -> Result<(), CliError> {
    let total = ctx.client.cart_total().await?;
    println!("{total}");
    Ok(())
}

/// Turn the cart into an order and keep the record for `last-order`.
///
/// # Errors
///
/// Returns `CliError` if the cart is empty, stock ran out, or the session
/// is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn checkout(ctx: &Context) -> Result<(), CliError> {
    let order = ctx.client.checkout().await?;
    ctx.last_orders.save(&order)?;

    println!("Order placed!");
    print_order(&order);
    Ok(())
}

/// Show the order from the most recent checkout, consuming the record.
///
/// # Errors
///
/// Returns `CliError` if the stored record cannot be read.
#[allow(clippy::print_stdout)]
pub fn last_order(ctx: &Context) -> Result<(), CliError> {
    match ctx.last_orders.take()? {
        Some(order) => print_order(&order),
        None => println!("No recent order."),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_order(order: &Order) {
    println!("Order {}", order.order_number);
    println!("  Placed:   {}", order.created_at);
    println!("  Status:   {:?}", order.status);
    println!("  Ship to:  {}", order.shipping_address);
    for item in &order.items {
        println!(
            "  {:>3} x {:<40}  {:>10}",
            item.quantity,
            item.product.description,
            item.unit_price.to_string()
        );
    }
    println!("  Total:    {}", order.total);
}

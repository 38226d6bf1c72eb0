//! Catalog commands: browse products and categories.

use deportes_elite_core::{Page, Product, ProductId};

use super::{CliError, Context};

/// List one page of the catalog, optionally filtered by category.
///
/// # Errors
///
/// Returns `CliError` if the backend call fails.
pub async fn products(
    ctx: &Context,
    page: u32,
    size: u32,
    category: Option<&str>,
) -> Result<(), CliError> {
    let products = match category {
        Some(category) => ctx.client.products_by_category(category, page, size).await?,
        None => ctx.client.products(page, size).await?,
    };
    print_page(&products);
    Ok(())
}

/// Show a single product.
///
/// # Errors
///
/// Returns `CliError` if the product does not exist.
#[allow(clippy::print_stdout)]
pub async fn product(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    let product = ctx.client.product(id).await?;
    println!("{}", product.description);
    println!("  Price:    {}", product.price);
    println!("  In stock: {}", product.stock);
    if let Some(category) = &product.category {
        println!("  Category: {}", category.name);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_page(page: &Page<Product>) {
    if page.empty {
        println!("No products found.");
        return;
    }

    for product in &page.content {
        let category = product
            .category
            .as_ref()
            .map_or("-", |category| category.name.as_str());
        println!(
            "{:>5}  {:<40}  {:>10}  {:>5} in stock  [{category}]",
            product.id, product.description, product.price.to_string(), product.stock
        );
    }
    println!(
        "Page {} of {} ({} products total)",
        page.number + 1,
        page.total_pages,
        page.total_elements
    );
}

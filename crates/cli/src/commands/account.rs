//! Account commands: login, register, logout, profile, order history.

use chrono::NaiveDate;
use deportes_elite_core::{Email, ProfileUpdate, RegisterRequest};

use super::{CliError, Context};

/// Arguments for the `register` command.
pub struct RegisterArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub birth_date: String,
}

/// Log in and store the session credential.
///
/// # Errors
///
/// Returns `CliError` if the email is malformed or the backend rejects
/// the credentials.
#[allow(clippy::print_stdout)]
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CliError> {
    let email: Email = email.parse()?;
    ctx.client.login(email.as_ref(), password).await?;
    println!("Logged in as {email}.");
    Ok(())
}

/// Register a new account.
///
/// # Errors
///
/// Returns `CliError` if an argument is malformed or the backend rejects
/// the registration (for example an already-registered email).
#[allow(clippy::print_stdout)]
pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<(), CliError> {
    let email: Email = args.email.parse()?;
    let birth_date: NaiveDate = args.birth_date.parse()?;

    let request = RegisterRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: email.to_string(),
        password: args.password,
        shipping_address: args.address,
        birth_date,
    };
    let message = ctx.client.register(&request).await?;
    println!("{message}");
    Ok(())
}

/// Drop the stored session credential.
///
/// # Errors
///
/// Returns `CliError` if the credential store cannot be written.
#[allow(clippy::print_stdout)]
pub fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.client.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Show the authenticated user's profile.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn profile(ctx: &Context) -> Result<(), CliError> {
    let profile = ctx.client.me().await?;
    println!("{} {}", profile.first_name, profile.last_name);
    println!("  Email:            {}", profile.email);
    println!("  Shipping address: {}", profile.shipping_address);
    println!("  Birth date:       {}", profile.birth_date);
    Ok(())
}

/// Update the authenticated user's profile.
///
/// # Errors
///
/// Returns `CliError` if an argument is malformed or the backend rejects
/// the update.
#[allow(clippy::print_stdout)]
pub async fn update_profile(
    ctx: &Context,
    first_name: String,
    last_name: String,
    email: String,
    address: String,
) -> Result<(), CliError> {
    let email: Email = email.parse()?;

    let update = ProfileUpdate {
        first_name,
        last_name,
        email: email.to_string(),
        shipping_address: address,
    };
    let message = ctx.client.update_me(&update).await?;
    println!("{message}");
    Ok(())
}

/// List one page of the authenticated user's order history.
///
/// # Errors
///
/// Returns `CliError` if the session is missing or expired.
#[allow(clippy::print_stdout)]
pub async fn orders(ctx: &Context, page: u32, size: u32) -> Result<(), CliError> {
    let orders = ctx.client.my_orders(page, size).await?;

    if orders.empty {
        println!("No orders yet.");
        return Ok(());
    }

    for order in &orders.content {
        println!(
            "{}  {}  {:?}  {}",
            order.order_number, order.created_at, order.status, order.total
        );
    }
    println!(
        "Page {} of {} ({} orders total)",
        orders.number + 1,
        orders.total_pages,
        orders.total_elements
    );
    Ok(())
}

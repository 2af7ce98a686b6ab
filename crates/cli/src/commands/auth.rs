//! Session lifecycle commands: login, register, logout, password reset.

use secrecy::SecretString;

use roastline_client::password_reset::{PasswordResetFlow, ResetStage};

use super::{Context, prompt};

/// Sign in and persist the session snapshot.
///
/// # Errors
///
/// Returns the client error when validation or the login call fails.
#[allow(clippy::print_stdout)]
pub async fn login(
    ctx: &Context,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx
        .accounts()
        .login(email, SecretString::from(password))
        .await?;

    println!("Signed in as {} <{}>", session.full_name, session.email);
    println!(
        "Stars: {}  Reviews: {}",
        session.star_count, session.review_count
    );
    Ok(())
}

/// Create an account and persist the session snapshot.
///
/// # Errors
///
/// Returns the client error when validation or the register call fails.
#[allow(clippy::print_stdout)]
pub async fn register(
    ctx: &Context,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx
        .accounts()
        .register(first_name, last_name, email, SecretString::from(password))
        .await?;

    println!("Welcome, {}! Your account is ready.", session.full_name);
    Ok(())
}

/// Clear the stored session.
///
/// # Errors
///
/// Returns the store error when the record cannot be removed.
#[allow(clippy::print_stdout)]
pub fn logout(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.accounts().logout()?;
    println!("Signed out.");
    Ok(())
}

/// Walk the three-step forgot-password flow on the terminal.
///
/// # Errors
///
/// Returns the client error when a step fails; wrong verification codes
/// are retried in place, like the screen does.
#[allow(clippy::print_stdout)]
pub async fn reset_password(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut flow = PasswordResetFlow::new(ctx.api.clone());

    let email = prompt("Email")?;
    flow.submit_email(&email).await?;
    println!("If that address is registered, a code is on its way.");

    while flow.stage() == ResetStage::CollectCode {
        let code = prompt("Verification code")?;
        match flow.submit_code(&code) {
            Ok(()) => break,
            Err(err) => println!("{}", err.user_message()),
        }
    }

    let new_password = SecretString::from(prompt("New password")?);
    let confirmation = SecretString::from(prompt("Repeat new password")?);
    let message = flow.submit_new_password(new_password, confirmation).await?;

    println!(
        "{}",
        message.unwrap_or_else(|| "Your password has been updated.".to_owned())
    );
    Ok(())
}

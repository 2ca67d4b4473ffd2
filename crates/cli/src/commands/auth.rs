//! Login, logout and identity commands.

use grocerease_storefront::AppState;
use secrecy::SecretString;
use tracing::info;

/// Log in and load the user's cart.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the store is unreachable.
#[allow(clippy::print_stdout)]
pub async fn login(
    state: &AppState,
    username: &str,
    password: String,
) -> grocerease_storefront::Result<()> {
    let password = SecretString::from(password);
    let mut session = state.session();
    session.start().await;

    let profile = session.login(username, &password).await?;
    println!("Logged in as {} ({})", profile.name, profile.username);

    let count = session.cart().item_count();
    if count > 0 {
        info!(items = count, "Cart restored");
    }
    Ok(())
}

/// Log out and clear the local cart.
#[allow(clippy::print_stdout)]
pub async fn logout(state: &AppState) {
    let mut session = state.session();
    session.start().await;
    session.logout().await;
    println!("Logged out");
}

/// Show who is logged in.
#[allow(clippy::print_stdout)]
pub async fn whoami(state: &AppState) {
    let mut session = state.session();
    session.start().await;

    match session.user() {
        Some(user) => println!("{} ({}) <{}>", user.name, user.username, user.email),
        None => println!("Not logged in"),
    }
}

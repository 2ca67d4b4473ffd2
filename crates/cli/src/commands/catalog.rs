//! Catalog browsing commands.

use grocerease_storefront::AppState;

use super::print_products;

/// List products, optionally filtered by search term and category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn products(
    state: &AppState,
    search: Option<&str>,
    category: Option<&str>,
) -> grocerease_storefront::Result<()> {
    let mut products = state.catalog().by_category(category).await?;
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        products.retain(|p| p.matches(term));
    }

    print_products(&products, state.config().inr_rate);
    Ok(())
}

/// List category names.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn categories(state: &AppState) -> grocerease_storefront::Result<()> {
    for name in state.catalog().categories().await? {
        println!("{name}");
    }
    Ok(())
}

/// List products on offer.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn offers(state: &AppState) -> grocerease_storefront::Result<()> {
    let products = state.catalog().offers().await?;
    print_products(&products, state.config().inr_rate);
    Ok(())
}

/// List the first `limit` best sellers.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn best_sellers(state: &AppState, limit: usize) -> grocerease_storefront::Result<()> {
    let products = state.catalog().best_sellers(limit).await?;
    print_products(&products, state.config().inr_rate);
    Ok(())
}

//! Checkout: turn the current cart into an order.

use chrono::Utc;
use grocerease_core::{
    Email, EmailError, Order, OrderStatus, PaymentMethod, Price, ShippingAddress, UserProfile,
};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, instrument};

use super::cart::CartManager;
use crate::api::{ApiError, RemoteStore};
use crate::storage::LocalStore;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please log in to check out")]
    NotAuthenticated,

    #[error("Your cart is empty")]
    EmptyCart,

    /// A required form field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The store rejected or never received the order. The cart is untouched.
    #[error("Failed to place order. Please try again.")]
    OrderFailed(#[source] ApiError),
}

/// Shipping form as entered.
#[derive(Debug, Clone, Default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl ShippingDetails {
    /// A form with the name and email taken from the logged-in profile.
    #[must_use]
    pub fn prefilled(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.name.clone(),
            email: profile.email.clone(),
            ..Self::default()
        }
    }

    /// Check every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` naming the first blank field, or
    /// `CheckoutError::InvalidEmail`.
    pub fn validate(&self) -> Result<ShippingAddress, CheckoutError> {
        let full_name = required("Full name", &self.full_name)?;
        required("Email", &self.email)?;
        let email = Email::parse(&self.email)?;

        Ok(ShippingAddress {
            full_name,
            email,
            phone: required("Phone", &self.phone)?,
            address: required("Address", &self.address)?,
            city: required("City", &self.city)?,
            zip_code: required("ZIP code", &self.zip_code)?,
        })
    }
}

/// Card fields collected at checkout. Checked for presence only and never
/// stored or sent anywhere.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: SecretString,
    pub name: String,
    pub expiry: String,
    pub cvv: SecretString,
}

impl CardDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        required("Card number", self.number.expose_secret())?;
        required("Name on card", &self.name)?;
        required("Expiry date", &self.expiry)?;
        required("CVV", self.cvv.expose_secret())?;
        Ok(())
    }
}

/// How the customer pays.
#[derive(Debug, Clone)]
pub enum Payment {
    Card(CardDetails),
    Cash,
}

impl Payment {
    /// Tag recorded on the order.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card(_) => PaymentMethod::Card,
            Self::Cash => PaymentMethod::Cash,
        }
    }
}

/// Everything the checkout form submits.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub shipping: ShippingDetails,
    pub payment: Payment,
}

/// Places orders against the store.
#[derive(Debug, Clone)]
pub struct CheckoutService<R> {
    remote: R,
    tax_rate: Decimal,
}

impl<R: RemoteStore> CheckoutService<R> {
    #[must_use]
    pub const fn new(remote: R, tax_rate: Decimal) -> Self {
        Self { remote, tax_rate }
    }

    /// Cart total with tax added.
    #[must_use]
    pub fn total_with_tax(&self, subtotal: Decimal) -> Decimal {
        Price::usd(subtotal).with_tax(self.tax_rate).amount
    }

    /// Validate the request, record the order and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is sent, or
    /// `CheckoutError::OrderFailed` if the store call fails. The cart is only
    /// cleared once the order has been created.
    #[instrument(skip_all, fields(user_id = ?user.map(|u| u.id)))]
    pub async fn place_order<C: RemoteStore, L: LocalStore>(
        &self,
        user: Option<&UserProfile>,
        cart: &mut CartManager<C, L>,
        request: &CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        let user = user.ok_or(CheckoutError::NotAuthenticated)?;
        if cart.items().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let shipping_address = request.shipping.validate()?;
        if let Payment::Card(card) = &request.payment {
            card.validate()?;
        }

        let order = Order {
            id: None,
            user_id: user.id,
            items: cart.items().to_vec(),
            total: self.total_with_tax(cart.total()),
            shipping_address,
            payment_method: request.payment.method(),
            status: OrderStatus::Completed,
            created_at: Utc::now(),
        };

        let created = self.remote.create_order(&order).await.map_err(|e| {
            tracing::error!(error = %e, "Checkout error");
            CheckoutError::OrderFailed(e)
        })?;

        cart.clear().await;
        info!(order_id = ?created.id, total = %created.total, "Order placed");
        Ok(created)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocerease_core::UserId;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{FakeRemote, product};

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            username: "demo".to_string(),
            email: "demo@grocerease.in".to_string(),
            name: "Demo User".to_string(),
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            zip_code: "411001".to_string(),
            ..ShippingDetails::prefilled(&profile())
        }
    }

    fn card() -> CardDetails {
        CardDetails {
            number: SecretString::from("4111111111111111".to_string()),
            name: "Demo User".to_string(),
            expiry: "12/29".to_string(),
            cvv: SecretString::from("123".to_string()),
        }
    }

    async fn setup() -> (
        CheckoutService<FakeRemote>,
        CartManager<FakeRemote, MemoryStore>,
        FakeRemote,
    ) {
        let remote = FakeRemote::new();
        let mut cart = CartManager::new(remote.clone(), MemoryStore::new());
        cart.set_user(Some(UserId::new(1))).await;
        cart.add(&product(1, "4.5"), 3).await;
        let service = CheckoutService::new(remote.clone(), Decimal::new(10, 2));
        (service, cart, remote)
    }

    #[tokio::test]
    async fn test_successful_order_clears_cart() {
        let (service, mut cart, remote) = setup().await;
        let request = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Card(card()),
        };

        let order = service
            .place_order(Some(&profile()), &mut cart, &request)
            .await
            .unwrap();

        assert!(order.id.is_some());
        assert_eq!(order.total, "14.85".parse::<Decimal>().unwrap());
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.item_count(), 3);
        assert!(cart.items().is_empty());
        assert!(remote.carts()[0].items.is_empty());
        assert_eq!(remote.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_card_details_are_not_sent() {
        let (service, mut cart, remote) = setup().await;
        let request = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Card(card()),
        };
        service
            .place_order(Some(&profile()), &mut cart, &request)
            .await
            .unwrap();

        let json = serde_json::to_string(&remote.orders()[0]).unwrap();
        assert!(!json.contains("4111111111111111"));
        assert!(!json.contains("\"123\""));
    }

    #[tokio::test]
    async fn test_store_failure_keeps_cart() {
        let (service, mut cart, remote) = setup().await;
        remote.fail_writes(true);
        let request = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Cash,
        };

        let err = service
            .place_order(Some(&profile()), &mut cart, &request)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::OrderFailed(_)));
        assert_eq!(err.to_string(), "Failed to place order. Please try again.");
        assert_eq!(cart.item_count(), 3);
    }

    #[tokio::test]
    async fn test_requires_login_and_items() {
        let (service, mut cart, _) = setup().await;
        let request = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Cash,
        };

        assert!(matches!(
            service.place_order(None, &mut cart, &request).await,
            Err(CheckoutError::NotAuthenticated)
        ));

        cart.clear().await;
        assert!(matches!(
            service.place_order(Some(&profile()), &mut cart, &request).await,
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_card_fields_required_for_card_only() {
        let (service, mut cart, remote) = setup().await;
        let mut blank = card();
        blank.cvv = SecretString::from("  ".to_string());
        let request = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Card(blank),
        };

        assert!(matches!(
            service.place_order(Some(&profile()), &mut cart, &request).await,
            Err(CheckoutError::MissingField("CVV"))
        ));
        assert!(remote.orders().is_empty());

        let cash = CheckoutRequest {
            shipping: shipping(),
            payment: Payment::Cash,
        };
        let order = service
            .place_order(Some(&profile()), &mut cart, &cash)
            .await
            .unwrap();
        assert_eq!(order.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_huge_stored_cart_totals_without_panicking() {
        let remote = FakeRemote::new();
        let local = MemoryStore::new();
        local
            .set(
                crate::storage::keys::CART,
                r#"[{"id": 1, "name": "x", "price": 1e20, "quantity": 4294967295}]"#,
            )
            .await
            .unwrap();
        let mut cart = CartManager::new(remote.clone(), local);
        cart.set_user(None).await;
        let service = CheckoutService::new(remote, Decimal::new(10, 2));

        let order = service
            .place_order(
                Some(&profile()),
                &mut cart,
                &CheckoutRequest {
                    shipping: shipping(),
                    payment: Payment::Cash,
                },
            )
            .await
            .unwrap();

        assert_eq!(order.total, Decimal::MAX);
    }

    #[test]
    fn test_shipping_validation() {
        let mut form = shipping();
        assert_eq!(form.validate().unwrap().city, "Pune");

        form.city = "   ".to_string();
        assert!(matches!(
            form.validate(),
            Err(CheckoutError::MissingField("City"))
        ));

        let mut form = shipping();
        form.email = "demo".to_string();
        assert!(matches!(
            form.validate(),
            Err(CheckoutError::InvalidEmail(EmailError::MissingAtSymbol))
        ));
    }
}

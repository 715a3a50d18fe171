//! Stripe payment-intent client

use serde::{Deserialize, Serialize};

use crate::utils::AppError;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// `POST /api/orders/checkout` request body
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Client-confirmable payment handle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

/// Stripe API client
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Create a payment intent and return its client secret
    ///
    /// Amount is in the major currency unit and converted to cents for the
    /// provider. Provider failures surface as 500s; the caller never sees
    /// provider internals.
    pub async fn create_payment_intent(
        &self,
        amount: f64,
        currency: &str,
    ) -> Result<CheckoutResponse, AppError> {
        let amount_cents = (amount * 100.0).round() as i64;

        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(STRIPE_API_URL)
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Stripe request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "Stripe Payment Intent Error");
            return Err(AppError::internal(
                "Failed to create Stripe Payment Intent".to_string(),
            ));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Invalid Stripe response: {}", e)))?;

        Ok(CheckoutResponse {
            client_secret: intent.client_secret,
        })
    }
}

//! Energy supplier API abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::{Consumption, ProductDetails, ProductSummary, Tariff, UserProfile};

/// Data-fetch collaborator for the tariffs and usage screens.
///
/// Implementations must be cheap to share behind an `Arc`; controllers hold
/// one for the lifetime of the screen.
#[async_trait]
pub trait EnergyApi: Send + Sync {
    /// List products on sale, optionally filtered to a postcode's region.
    async fn get_products(&self, postcode: Option<&str>)
        -> Result<Vec<ProductSummary>, ApiError>;

    /// Full product record including regional tariffs.
    async fn get_product_details(
        &self,
        product_code: &str,
        postcode: &str,
    ) -> Result<ProductDetails, ApiError>;

    /// The authenticated user's account and metering details.
    async fn get_user_profile(&self) -> Result<UserProfile, ApiError>;

    /// The tariff record behind a tariff code.
    async fn get_tariff(&self, tariff_code: &str) -> Result<Tariff, ApiError>;

    /// Metered consumption over the half-open interval `[from, to)`.
    async fn get_consumption(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Consumption>, ApiError>;
}

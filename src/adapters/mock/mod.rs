//! Scriptable collaborators for tests.
//!
//! [`MockEnergyApi`] returns whatever each endpoint was scripted with and
//! records calls for verification. [`StubStringProvider`] resolves every
//! resource to a fixed marker string.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::models::{
    Consumption, ProductDetails, ProductSummary, Tariff, UserProfile,
};
use crate::traits::{EnergyApi, StringResource, StringResourceProvider};

/// A recorded API call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetProducts { postcode: Option<String> },
    GetProductDetails { product_code: String, postcode: String },
    GetUserProfile,
    GetTariff { tariff_code: String },
    GetConsumption { from: DateTime<Utc>, to: DateTime<Utc> },
}

/// Mock [`EnergyApi`] with per-endpoint scripted results.
///
/// Unscripted endpoints answer with a generic error so tests fail loudly
/// rather than hang. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockEnergyApi {
    products: Arc<Mutex<Option<Result<Vec<ProductSummary>, ApiError>>>>,
    product_details: Arc<Mutex<Option<Result<ProductDetails, ApiError>>>>,
    user_profile: Arc<Mutex<Option<Result<UserProfile, ApiError>>>>,
    tariff: Arc<Mutex<Option<Result<Tariff, ApiError>>>>,
    consumption: Arc<Mutex<Option<Result<Vec<Consumption>, ApiError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockEnergyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_products(&self, result: Result<Vec<ProductSummary>, ApiError>) {
        *self.products.lock().unwrap() = Some(result);
    }

    pub fn script_product_details(&self, result: Result<ProductDetails, ApiError>) {
        *self.product_details.lock().unwrap() = Some(result);
    }

    pub fn script_user_profile(&self, result: Result<UserProfile, ApiError>) {
        *self.user_profile.lock().unwrap() = Some(result);
    }

    pub fn script_tariff(&self, result: Result<Tariff, ApiError>) {
        *self.tariff.lock().unwrap() = Some(result);
    }

    pub fn script_consumption(&self, result: Result<Vec<Consumption>, ApiError>) {
        *self.consumption.lock().unwrap() = Some(result);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn take<T: Clone>(
        slot: &Arc<Mutex<Option<Result<T, ApiError>>>>,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        slot.lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::other(format!("{endpoint} not scripted"))))
    }
}

#[async_trait]
impl EnergyApi for MockEnergyApi {
    async fn get_products(
        &self,
        postcode: Option<&str>,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        self.record(RecordedCall::GetProducts {
            postcode: postcode.map(str::to_string),
        });
        Self::take(&self.products, "get_products")
    }

    async fn get_product_details(
        &self,
        product_code: &str,
        postcode: &str,
    ) -> Result<ProductDetails, ApiError> {
        self.record(RecordedCall::GetProductDetails {
            product_code: product_code.to_string(),
            postcode: postcode.to_string(),
        });
        Self::take(&self.product_details, "get_product_details")
    }

    async fn get_user_profile(&self) -> Result<UserProfile, ApiError> {
        self.record(RecordedCall::GetUserProfile);
        Self::take(&self.user_profile, "get_user_profile")
    }

    async fn get_tariff(&self, tariff_code: &str) -> Result<Tariff, ApiError> {
        self.record(RecordedCall::GetTariff {
            tariff_code: tariff_code.to_string(),
        });
        Self::take(&self.tariff, "get_tariff")
    }

    async fn get_consumption(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Consumption>, ApiError> {
        self.record(RecordedCall::GetConsumption { from, to });
        Self::take(&self.consumption, "get_consumption")
    }
}

/// Stub [`StringResourceProvider`] resolving everything to a marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubStringProvider;

#[async_trait]
impl StringResourceProvider for StubStringProvider {
    async fn get_string(&self, _resource: StringResource, _args: &[&str]) -> String {
        "Stubbed string".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_endpoint_answers_with_error() {
        let api = MockEnergyApi::new();
        let err = api.get_user_profile().await.unwrap_err();
        assert_eq!(err.message(), Some("get_user_profile not scripted"));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let api = MockEnergyApi::new();
        api.script_products(Ok(Vec::new()));
        let _ = api.get_products(Some("WC1N 3AX")).await;
        let _ = api.get_user_profile().await;
        assert_eq!(
            api.calls(),
            vec![
                RecordedCall::GetProducts {
                    postcode: Some("WC1N 3AX".to_string())
                },
                RecordedCall::GetUserProfile,
            ]
        );
    }

    #[tokio::test]
    async fn test_stub_string_provider_returns_marker() {
        let text = StubStringProvider
            .get_string(StringResource::AccountErrorLoadTariff, &[])
            .await;
        assert_eq!(text, "Stubbed string");
    }
}

//! Reqwest implementation of [`EnergyApi`] for a Kraken-style REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    Consumption, ProductDetails, ProductFeature, ProductSummary, Tariff, UserProfile,
};
use crate::traits::EnergyApi;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONSUMPTION_PAGE_SIZE: u32 = 25_000;

/// HTTP client for the supplier's public REST API.
///
/// Account-scoped endpoints authenticate with the API key as the basic-auth
/// username, the supplier's convention for personal API access.
pub struct OctopusApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    account_number: Option<String>,
    mpan: Option<String>,
    meter_serial: Option<String>,
}

impl OctopusApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            account_number: config.account_number.clone(),
            mpan: config.mpan.clone(),
            meter_serial: config.meter_serial.clone(),
        })
    }

    fn authenticated(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.basic_auth(key, Option::<&str>::None),
            None => request,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self
            .authenticated(self.http.get(&url).query(query))
            .send()
            .await?
            .error_for_status()?;
        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }

    fn meter_point(&self) -> Result<(&str, &str), ApiError> {
        match (self.mpan.as_deref(), self.meter_serial.as_deref()) {
            (Some(mpan), Some(serial)) => Ok((mpan, serial)),
            _ => Err(ApiError::other("no electricity meter point configured")),
        }
    }
}

#[async_trait]
impl EnergyApi for OctopusApiClient {
    async fn get_products(
        &self,
        _postcode: Option<&str>,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        let page: PagedResults<ProductSummaryDto> = self
            .get_json(format!("{}/v1/products/", self.base_url), &[])
            .await?;
        Ok(page.results.into_iter().map(ProductSummaryDto::into_model).collect())
    }

    async fn get_product_details(
        &self,
        product_code: &str,
        _postcode: &str,
    ) -> Result<ProductDetails, ApiError> {
        let dto: ProductDetailsDto = self
            .get_json(
                format!("{}/v1/products/{}/", self.base_url, product_code),
                &[],
            )
            .await?;
        Ok(dto.into_model())
    }

    async fn get_user_profile(&self) -> Result<UserProfile, ApiError> {
        let account_number = self
            .account_number
            .clone()
            .ok_or_else(|| ApiError::other("no account number configured"))?;
        let dto: AccountDto = self
            .get_json(
                format!("{}/v1/accounts/{}/", self.base_url, account_number),
                &[],
            )
            .await?;
        dto.into_profile(account_number)
    }

    async fn get_tariff(&self, tariff_code: &str) -> Result<Tariff, ApiError> {
        let product_code = Tariff::extract_product_code(tariff_code)
            .ok_or_else(|| ApiError::other(format!("malformed tariff code {tariff_code}")))?;
        let details = self.get_product_details(&product_code, "").await?;
        details
            .tariffs
            .into_iter()
            .find(|t| t.tariff_code == tariff_code)
            .ok_or_else(|| ApiError::other(format!("tariff {tariff_code} not found")))
    }

    async fn get_consumption(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Consumption>, ApiError> {
        let (mpan, serial) = self.meter_point()?;
        let url = format!(
            "{}/v1/electricity-meter-points/{}/meters/{}/consumption/",
            self.base_url, mpan, serial
        );
        let page: PagedResults<ConsumptionDto> = self
            .get_json(
                url,
                &[
                    ("period_from", from.to_rfc3339()),
                    ("period_to", to.to_rfc3339()),
                    ("page_size", CONSUMPTION_PAGE_SIZE.to_string()),
                    ("order_by", "period".to_string()),
                ],
            )
            .await?;
        Ok(page.results.into_iter().map(ConsumptionDto::into_model).collect())
    }
}

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct PagedResults<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ProductSummaryDto {
    code: String,
    display_name: String,
    full_name: String,
    #[serde(default)]
    description: String,
    term: Option<u32>,
    available_from: DateTime<Utc>,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    is_variable: bool,
    #[serde(default)]
    is_green: bool,
    #[serde(default)]
    is_tracker: bool,
    #[serde(default)]
    is_prepay: bool,
    #[serde(default)]
    is_business: bool,
    #[serde(default)]
    is_restricted: bool,
}

impl ProductSummaryDto {
    fn features(&self) -> Vec<ProductFeature> {
        let flags = [
            (self.is_variable, ProductFeature::Variable),
            (self.is_green, ProductFeature::Green),
            (self.is_tracker, ProductFeature::Tracker),
            (self.is_prepay, ProductFeature::Prepay),
            (self.is_business, ProductFeature::Business),
            (self.is_restricted, ProductFeature::Restricted),
        ];
        flags
            .into_iter()
            .filter_map(|(set, feature)| set.then_some(feature))
            .collect()
    }

    fn into_model(self) -> ProductSummary {
        let features = self.features();
        ProductSummary {
            code: self.code,
            display_name: self.display_name,
            full_name: self.full_name,
            description: self.description,
            features,
            term: self.term,
            available_from: self.available_from,
            brand: self.brand,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductDetailsDto {
    #[serde(flatten)]
    summary: ProductSummaryDto,
    #[serde(default)]
    single_register_electricity_tariffs: HashMap<String, RegionTariffsDto>,
}

#[derive(Debug, Deserialize)]
struct RegionTariffsDto {
    direct_debit_monthly: Option<TariffDto>,
}

#[derive(Debug, Deserialize)]
struct TariffDto {
    code: String,
    #[serde(default)]
    standing_charge_inc_vat: f64,
    #[serde(default)]
    standard_unit_rate_inc_vat: f64,
}

impl ProductDetailsDto {
    fn into_model(self) -> ProductDetails {
        let features = self.summary.features();
        // Sort by region key so the pane order is stable across fetches.
        let mut regions: Vec<(String, RegionTariffsDto)> =
            self.single_register_electricity_tariffs.into_iter().collect();
        regions.sort_by(|a, b| a.0.cmp(&b.0));

        let tariffs = regions
            .into_iter()
            .filter_map(|(_, region)| region.direct_debit_monthly)
            .map(|dto| Tariff {
                tariff_code: dto.code,
                display_name: self.summary.display_name.clone(),
                full_name: self.summary.full_name.clone(),
                unit_rate_inc_vat: dto.standard_unit_rate_inc_vat,
                standing_charge_inc_vat: dto.standing_charge_inc_vat,
            })
            .collect();

        ProductDetails {
            code: self.summary.code,
            display_name: self.summary.display_name,
            full_name: self.summary.full_name,
            description: self.summary.description,
            features,
            term: self.summary.term,
            available_from: self.summary.available_from,
            tariffs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    #[serde(default)]
    properties: Vec<PropertyDto>,
}

#[derive(Debug, Deserialize)]
struct PropertyDto {
    #[serde(default)]
    postcode: Option<String>,
    #[serde(default)]
    moved_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    electricity_meter_points: Vec<MeterPointDto>,
}

#[derive(Debug, Deserialize)]
struct MeterPointDto {
    mpan: String,
    #[serde(default)]
    meters: Vec<MeterDto>,
    #[serde(default)]
    agreements: Vec<AgreementDto>,
}

#[derive(Debug, Deserialize)]
struct MeterDto {
    serial_number: String,
}

#[derive(Debug, Deserialize)]
struct AgreementDto {
    tariff_code: String,
    #[serde(default)]
    valid_to: Option<DateTime<Utc>>,
}

impl AccountDto {
    fn into_profile(self, account_number: String) -> Result<UserProfile, ApiError> {
        let property = self
            .properties
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::other("account has no properties"))?;
        let meter_point = property
            .electricity_meter_points
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::other("account has no electricity meter points"))?;
        let serial = meter_point
            .meters
            .first()
            .map(|m| m.serial_number.clone())
            .ok_or_else(|| ApiError::other("meter point has no meters"))?;
        let now = Utc::now();
        let tariff_code = meter_point
            .agreements
            .iter()
            .find(|a| a.valid_to.map(|until| until > now).unwrap_or(true))
            .map(|a| a.tariff_code.clone());

        Ok(UserProfile {
            account_number,
            postcode: property.postcode,
            mpan: meter_point.mpan,
            meter_serial_number: serial,
            tariff_code,
            moved_in_at: property.moved_in_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConsumptionDto {
    consumption: f64,
    interval_start: DateTime<Utc>,
    interval_end: DateTime<Utc>,
}

impl ConsumptionDto {
    fn into_model(self) -> Consumption {
        Consumption {
            kwh_consumed: self.consumption,
            interval_start: self.interval_start,
            interval_end: self.interval_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_summary_dto_maps_feature_flags() {
        let json = r#"{
            "code": "AGILE-24-10-01",
            "display_name": "Agile",
            "full_name": "Agile October 2024",
            "description": "Half-hourly pricing",
            "term": null,
            "available_from": "2024-10-01T00:00:00Z",
            "brand": "OCTOPUS_ENERGY",
            "is_variable": true,
            "is_green": true
        }"#;
        let dto: ProductSummaryDto = serde_json::from_str(json).unwrap();
        let model = dto.into_model();
        assert_eq!(model.code, "AGILE-24-10-01");
        assert_eq!(
            model.features,
            vec![ProductFeature::Variable, ProductFeature::Green]
        );
    }

    #[test]
    fn test_product_details_dto_flattens_regional_tariffs_sorted() {
        let json = r#"{
            "code": "VAR-22-11-01",
            "display_name": "Flexible",
            "full_name": "Flexible Tariff",
            "description": "Variable rates",
            "term": null,
            "available_from": "2022-11-01T00:00:00Z",
            "single_register_electricity_tariffs": {
                "_B": {"direct_debit_monthly": {"code": "E-1R-VAR-22-11-01-B", "standing_charge_inc_vat": 48.0, "standard_unit_rate_inc_vat": 29.1}},
                "_A": {"direct_debit_monthly": {"code": "E-1R-VAR-22-11-01-A", "standing_charge_inc_vat": 47.0, "standard_unit_rate_inc_vat": 28.5}}
            }
        }"#;
        let dto: ProductDetailsDto = serde_json::from_str(json).unwrap();
        let model = dto.into_model();
        assert_eq!(model.tariffs.len(), 2);
        assert_eq!(model.tariffs[0].tariff_code, "E-1R-VAR-22-11-01-A");
        assert_eq!(model.tariffs[1].tariff_code, "E-1R-VAR-22-11-01-B");
    }

    #[test]
    fn test_account_dto_picks_open_ended_agreement() {
        let json = r#"{
            "properties": [{
                "postcode": "WC1N 3AX",
                "electricity_meter_points": [{
                    "mpan": "1200023456789",
                    "meters": [{"serial_number": "21E1234567"}],
                    "agreements": [
                        {"tariff_code": "E-1R-OLD-20-01-01-A", "valid_to": "2021-01-01T00:00:00Z"},
                        {"tariff_code": "E-1R-VAR-22-11-01-A", "valid_to": null}
                    ]
                }]
            }]
        }"#;
        let dto: AccountDto = serde_json::from_str(json).unwrap();
        let profile = dto.into_profile("A-1234A5B6".to_string()).unwrap();
        assert_eq!(profile.tariff_code.as_deref(), Some("E-1R-VAR-22-11-01-A"));
        assert_eq!(profile.mpan, "1200023456789");
    }

    #[test]
    fn test_account_dto_without_properties_is_error() {
        let dto: AccountDto = serde_json::from_str("{}").unwrap();
        let err = dto.into_profile("A-1234A5B6".to_string()).unwrap_err();
        assert_eq!(err.message(), Some("account has no properties"));
    }
}

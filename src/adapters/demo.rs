//! Synthetic data source for demo mode.
//!
//! Used when no account is configured so the screens render something
//! meaningful. Values are deterministic: the same period always produces
//! the same cells.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};

use crate::error::ApiError;
use crate::models::{
    Consumption, ProductDetails, ProductFeature, ProductSummary, Tariff, UserProfile,
};
use crate::traits::EnergyApi;

const DEMO_TARIFF_CODE: &str = "E-1R-DEMO-VAR-24-04-01-A";

/// Deterministic in-memory [`EnergyApi`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoEnergyApi;

impl DemoEnergyApi {
    fn demo_tariff() -> Tariff {
        Tariff {
            tariff_code: DEMO_TARIFF_CODE.to_string(),
            display_name: "Demo Flexible".to_string(),
            full_name: "Demo Flexible April 2024".to_string(),
            unit_rate_inc_vat: 24.5,
            standing_charge_inc_vat: 47.8,
        }
    }

    fn demo_products() -> Vec<ProductSummary> {
        let available_from = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).single();
        let available_from = available_from.unwrap_or_else(Utc::now);
        vec![
            ProductSummary {
                code: "DEMO-VAR-24-04-01".to_string(),
                display_name: "Demo Flexible".to_string(),
                full_name: "Demo Flexible April 2024".to_string(),
                description: "A standard variable tariff with no exit fees.".to_string(),
                features: vec![ProductFeature::Variable],
                term: None,
                available_from,
                brand: "DEMO_ENERGY".to_string(),
            },
            ProductSummary {
                code: "DEMO-AGILE-24-04-01".to_string(),
                display_name: "Demo Agile".to_string(),
                full_name: "Demo Agile April 2024".to_string(),
                description: "Half-hourly prices that follow the wholesale market.".to_string(),
                features: vec![ProductFeature::Variable, ProductFeature::Green],
                term: None,
                available_from,
                brand: "DEMO_ENERGY".to_string(),
            },
            ProductSummary {
                code: "DEMO-FIX-24-04-01".to_string(),
                display_name: "Demo Fixed".to_string(),
                full_name: "Demo Fixed 12M April 2024".to_string(),
                description: "Twelve months of fixed unit rates.".to_string(),
                features: Vec::new(),
                term: Some(12),
                available_from,
                brand: "DEMO_ENERGY".to_string(),
            },
        ]
    }

    /// Household-shaped demand curve: overnight trough, morning and evening
    /// peaks. Deterministic per half hour.
    fn demand_at(at: DateTime<Utc>) -> f64 {
        let hour = at.hour() as f64 + at.minute() as f64 / 60.0;
        let base = 0.08;
        let morning = 0.35 * gaussian(hour, 7.5, 1.2);
        let evening = 0.55 * gaussian(hour, 19.0, 2.0);
        base + morning + evening
    }
}

fn gaussian(x: f64, center: f64, width: f64) -> f64 {
    let d = (x - center) / width;
    (-0.5 * d * d).exp()
}

#[async_trait]
impl EnergyApi for DemoEnergyApi {
    async fn get_products(
        &self,
        _postcode: Option<&str>,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        Ok(Self::demo_products())
    }

    async fn get_product_details(
        &self,
        product_code: &str,
        _postcode: &str,
    ) -> Result<ProductDetails, ApiError> {
        let summary = Self::demo_products()
            .into_iter()
            .find(|p| p.code == product_code)
            .ok_or_else(|| ApiError::HttpStatus { status: 404 })?;
        Ok(ProductDetails {
            code: summary.code,
            display_name: summary.display_name,
            full_name: summary.full_name,
            description: summary.description,
            features: summary.features,
            term: summary.term,
            available_from: summary.available_from,
            tariffs: vec![Self::demo_tariff()],
        })
    }

    async fn get_user_profile(&self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            account_number: "A-DEMO0001".to_string(),
            postcode: Some("N1 9AG".to_string()),
            mpan: "1200000000000".to_string(),
            meter_serial_number: "DEMO000001".to_string(),
            tariff_code: Some(DEMO_TARIFF_CODE.to_string()),
            moved_in_at: None,
        })
    }

    async fn get_tariff(&self, _tariff_code: &str) -> Result<Tariff, ApiError> {
        Ok(Self::demo_tariff())
    }

    async fn get_consumption(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Consumption>, ApiError> {
        let mut cells = Vec::new();
        let mut start = from;
        while start < to {
            let end = start + Duration::minutes(30);
            cells.push(Consumption {
                kwh_consumed: (Self::demand_at(start) * 1000.0).round() / 1000.0,
                interval_start: start,
                interval_end: end,
            });
            start = end;
        }
        Ok(cells)
    }
}

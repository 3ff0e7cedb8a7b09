//! Tariff product domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketing features a product can advertise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductFeature {
    Variable,
    Green,
    Tracker,
    Prepay,
    Business,
    Restricted,
}

/// A product as it appears in the browse list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    /// Product code, e.g. `AGILE-24-10-01`.
    pub code: String,
    /// Short name shown in lists.
    pub display_name: String,
    /// Full marketing name.
    pub full_name: String,
    /// One-paragraph product description.
    pub description: String,
    /// Advertised features.
    pub features: Vec<ProductFeature>,
    /// Contract term in months; `None` for open-ended products.
    pub term: Option<u32>,
    /// When the product went on sale.
    pub available_from: DateTime<Utc>,
    /// Brand the product is sold under.
    pub brand: String,
}

/// Full product record shown on the detail pane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetails {
    pub code: String,
    pub display_name: String,
    pub full_name: String,
    pub description: String,
    pub features: Vec<ProductFeature>,
    pub term: Option<u32>,
    pub available_from: DateTime<Utc>,
    /// Regional tariffs offered under this product.
    pub tariffs: Vec<Tariff>,
}

/// A concrete tariff under a product, priced for one retail region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tariff {
    /// Tariff code, e.g. `E-1R-AGILE-24-10-01-A`.
    pub tariff_code: String,
    pub display_name: String,
    pub full_name: String,
    /// Unit rate including VAT, in pence per kWh.
    pub unit_rate_inc_vat: f64,
    /// Standing charge including VAT, in pence per day.
    pub standing_charge_inc_vat: f64,
}

impl Tariff {
    /// Extract the product code embedded in a tariff code.
    ///
    /// Tariff codes follow `<fuel>-<rate>-<product-code>-<region>`, e.g.
    /// `E-1R-AGILE-24-10-01-A` carries product code `AGILE-24-10-01`.
    /// Returns `None` when the code has too few segments to split.
    pub fn extract_product_code(tariff_code: &str) -> Option<String> {
        let segments: Vec<&str> = tariff_code.split('-').collect();
        if segments.len() <= 3 {
            return None;
        }
        Some(segments[2..segments.len() - 1].join("-"))
    }

    /// The retail region letter this tariff is priced for, taken from the
    /// final segment of the tariff code.
    pub fn extract_retail_region(tariff_code: &str) -> Option<String> {
        let last = tariff_code.rsplit('-').next()?;
        if last.len() == 1 && last.chars().all(|c| c.is_ascii_uppercase()) {
            Some(last.to_string())
        } else {
            None
        }
    }

    /// The retail region of this tariff, when the code carries one.
    pub fn retail_region(&self) -> Option<String> {
        Self::extract_retail_region(&self.tariff_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_product_code_from_agile_tariff() {
        assert_eq!(
            Tariff::extract_product_code("E-1R-AGILE-24-10-01-A"),
            Some("AGILE-24-10-01".to_string())
        );
    }

    #[test]
    fn test_extract_product_code_from_short_code_is_none() {
        assert_eq!(Tariff::extract_product_code("E-1R-A"), None);
        assert_eq!(Tariff::extract_product_code(""), None);
    }

    #[test]
    fn test_extract_retail_region() {
        assert_eq!(
            Tariff::extract_retail_region("E-1R-VAR-22-11-01-C"),
            Some("C".to_string())
        );
        // Region segment must be a single uppercase letter.
        assert_eq!(Tariff::extract_retail_region("E-1R-VAR-22-11-01"), None);
    }

    #[test]
    fn test_product_feature_serde_names_are_snake_case() {
        let json = serde_json::to_string(&ProductFeature::Green).unwrap();
        assert_eq!(json, "\"green\"");
        let parsed: ProductFeature = serde_json::from_str("\"tracker\"").unwrap();
        assert_eq!(parsed, ProductFeature::Tracker);
    }
}

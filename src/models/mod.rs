//! Domain models shared across view states, controllers and adapters.
//!
//! These are the payload types a screen owns: they are replaced wholesale on
//! each successful fetch and never mutated in place.

mod account;
mod chart;
mod consumption;
mod product;

pub use account::UserProfile;
pub use chart::{BarChartData, Insights};
pub use consumption::{
    consumption_range, Consumption, ConsumptionGroupedCells, ConsumptionPresentationStyle,
    ConsumptionQueryFilter,
};
pub use product::{ProductDetails, ProductFeature, ProductSummary, Tariff};

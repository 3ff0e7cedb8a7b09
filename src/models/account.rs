//! Account-level domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's account and metering details.
///
/// Owned by the usage view state and replaced wholesale whenever the
/// account fetch completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Account number, e.g. `A-1234A5B6`.
    pub account_number: String,
    /// Postcode registered on the account, used to filter regional tariffs.
    pub postcode: Option<String>,
    /// Electricity meter point administration number.
    pub mpan: String,
    /// Serial number of the meter readings are pulled from.
    pub meter_serial_number: String,
    /// Tariff code the account is currently on, when known.
    pub tariff_code: Option<String>,
    /// When the user moved onto this supply.
    pub moved_in_at: Option<DateTime<Utc>>,
}

//! Record types, criticality tiers and the clean-row sentinel payload.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pool::{ScenarioRow, VendorRow, VulnRow};

/// Risk value carried by records with no active vulnerability.
pub const NO_RISK: &str = "None";
/// Placeholder for string fields that have no value on a clean record.
pub const NOT_APPLICABLE: &str = "N/A";
/// Description carried by clean records.
pub const CLEAN_DESCRIPTION: &str = "No current vulnerabilities reported.";
/// MTTR carried by clean records.
pub const CLEAN_MTTR: &str = "0";

// ============================================================================
// CRITICALITY
// ============================================================================

/// Vendor criticality tier, assigned uniformly to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criticality {
    #[serde(rename = "Tier 1 - Critical")]
    Critical,
    #[serde(rename = "Tier 2 - Important")]
    Important,
    #[serde(rename = "Tier 3 - Standard")]
    Standard,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Critical => "Tier 1 - Critical",
            Criticality::Important => "Tier 2 - Important",
            Criticality::Standard => "Tier 3 - Standard",
        }
    }

    /// One uniform draw over the three tiers.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Criticality::Critical,
            1 => Criticality::Important,
            _ => Criticality::Standard,
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RISK RECORD
// ============================================================================

/// Contact and detection timing shared by clean and dirty records.
#[derive(Debug, Clone)]
pub struct RecordDates {
    pub last_contact_date: String,
    pub days_since_last_contact: i64,
    pub detection_date: String,
    pub detection_delay_days: i64,
}

/// One synthesized vendor-risk record.
///
/// Field order matches the downstream report layout; serialization
/// preserves it. Records are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub vendor: String,
    pub region: String,
    pub sector: String,
    pub criticality: Criticality,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_name: String,
    pub contact_email: String,
    pub risk: String,
    pub cve_id: String,
    pub description: String,
    pub cvss_score: f64,
    pub last_contact_date: String,
    pub days_since_last_contact: i64,
    pub detection_date: String,
    pub detection_delay_days: i64,
    pub exposure_confirmed: String,
    pub patch_available: String,
    pub inject_complexity: String,
    pub mttr: String,
    pub enriched: bool,
}

impl RiskRecord {
    /// A record with no active vulnerability: the sentinel payload.
    pub fn clean(
        vendor: &VendorRow,
        criticality: Criticality,
        dates: RecordDates,
        enriched: bool,
    ) -> Self {
        Self {
            vendor: vendor.name.clone(),
            region: vendor.region.clone(),
            sector: vendor.sector.clone(),
            criticality,
            country: vendor.country.clone(),
            city: vendor.city.clone(),
            latitude: vendor.latitude,
            longitude: vendor.longitude,
            contact_name: vendor.contact_name.clone(),
            contact_email: vendor.contact_email.clone(),
            risk: NO_RISK.to_string(),
            cve_id: NOT_APPLICABLE.to_string(),
            description: CLEAN_DESCRIPTION.to_string(),
            cvss_score: 0.0,
            last_contact_date: dates.last_contact_date,
            days_since_last_contact: dates.days_since_last_contact,
            detection_date: dates.detection_date,
            detection_delay_days: dates.detection_delay_days,
            exposure_confirmed: "No".to_string(),
            patch_available: NOT_APPLICABLE.to_string(),
            inject_complexity: NO_RISK.to_string(),
            mttr: CLEAN_MTTR.to_string(),
            enriched,
        }
    }

    /// A record carrying an active vulnerability and its scenario.
    pub fn dirty(
        vendor: &VendorRow,
        criticality: Criticality,
        dates: RecordDates,
        vuln: &VulnRow,
        scenario: &ScenarioRow,
        enriched: bool,
    ) -> Self {
        Self {
            vendor: vendor.name.clone(),
            region: vendor.region.clone(),
            sector: vendor.sector.clone(),
            criticality,
            country: vendor.country.clone(),
            city: vendor.city.clone(),
            latitude: vendor.latitude,
            longitude: vendor.longitude,
            contact_name: vendor.contact_name.clone(),
            contact_email: vendor.contact_email.clone(),
            risk: scenario.risk_level.clone(),
            cve_id: vuln.vuln_id.clone(),
            description: vuln.description.clone(),
            cvss_score: vuln.cvss_score,
            last_contact_date: dates.last_contact_date,
            days_since_last_contact: dates.days_since_last_contact,
            detection_date: dates.detection_date,
            detection_delay_days: dates.detection_delay_days,
            exposure_confirmed: scenario.exposure_confirmed.clone(),
            patch_available: scenario.patch_available.clone(),
            inject_complexity: scenario.inject_complexity.clone(),
            mttr: scenario.mttr_range.clone(),
            enriched,
        }
    }

    /// True when the record carries the no-vulnerability payload.
    pub fn is_clean(&self) -> bool {
        self.risk == NO_RISK
    }
}

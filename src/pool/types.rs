//! Typed rows for the three reference pools.

/// One vendor from the vendor reference pool.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub name: String,
    pub region: String,
    pub sector: String,
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_name: String,
    pub contact_email: String,
}

/// One risk scenario template (severity posture plus remediation traits).
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub risk_level: String,
    pub exposure_confirmed: String,
    pub patch_available: String,
    pub inject_complexity: String,
    pub mttr_range: String,
}

/// One known vulnerability from the vulnerability pool.
#[derive(Debug, Clone, PartialEq)]
pub struct VulnRow {
    pub vuln_id: String,
    pub description: String,
    pub cvss_score: f64,
}

//! Reference pool loading.
//!
//! The generator never invents vendors, scenarios or vulnerabilities on
//! its own. Everything it emits is recombined from three CSV pools
//! (vendors, risk scenario templates, known vulnerabilities), loaded
//! here into typed rows. A copy of each pool ships inside the binary so
//! the tool runs without any files on disk.

pub mod csv;
pub mod types;

pub use types::{ScenarioRow, VendorRow, VulnRow};

use std::fs;

use crate::config::ForgeConfig;
use crate::error::ForgeResult;

// ============================================================================
// POOL SET
// ============================================================================

/// The three reference pools plus a sector lookup over the vendor pool.
pub struct PoolSet {
    pub vendors: Vec<VendorRow>,
    pub scenarios: Vec<ScenarioRow>,
    pub vulns: Vec<VulnRow>,
    /// Sectors in first-encounter order, each with the indices of the
    /// vendors belonging to it.
    sector_index: Vec<(String, Vec<usize>)>,
}

impl PoolSet {
    /// Loads all three pools from the configured paths.
    pub fn load(cfg: &ForgeConfig) -> ForgeResult<Self> {
        let vendors = fs::read_to_string(&cfg.vendor_pool)?;
        let scenarios = fs::read_to_string(&cfg.scenario_pool)?;
        let vulns = fs::read_to_string(&cfg.vuln_pool)?;
        Self::from_sources(
            &vendors,
            &cfg.vendor_pool.display().to_string(),
            &scenarios,
            &cfg.scenario_pool.display().to_string(),
            &vulns,
            &cfg.vuln_pool.display().to_string(),
        )
    }

    /// Loads the pools embedded in the binary at build time.
    pub fn builtin() -> ForgeResult<Self> {
        Self::from_sources(
            include_str!("../../data/vendors.csv"),
            "builtin:vendors",
            include_str!("../../data/scenario_templates.csv"),
            "builtin:scenario_templates",
            include_str!("../../data/vuln_pool.csv"),
            "builtin:vuln_pool",
        )
    }

    fn from_sources(
        vendors_raw: &str,
        vendors_file: &str,
        scenarios_raw: &str,
        scenarios_file: &str,
        vulns_raw: &str,
        vulns_file: &str,
    ) -> ForgeResult<Self> {
        let vendors = load_vendors(vendors_raw, vendors_file)?;
        let scenarios = load_scenarios(scenarios_raw, scenarios_file)?;
        let vulns = load_vulns(vulns_raw, vulns_file)?;
        Ok(Self::new(vendors, scenarios, vulns))
    }

    /// Builds a pool set from already-typed rows.
    pub fn new(vendors: Vec<VendorRow>, scenarios: Vec<ScenarioRow>, vulns: Vec<VulnRow>) -> Self {
        let sector_index = index_sectors(&vendors);
        Self {
            vendors,
            scenarios,
            vulns,
            sector_index,
        }
    }

    /// Sectors present in the vendor pool, in first-encounter order.
    pub fn sectors(&self) -> Vec<&str> {
        self.sector_index.iter().map(|(s, _)| s.as_str()).collect()
    }

    /// Indices into `vendors` for one sector, if any vendor has it.
    pub fn vendors_in(&self, sector: &str) -> Option<&[usize]> {
        self.sector_index
            .iter()
            .find(|(s, _)| s == sector)
            .map(|(_, ids)| ids.as_slice())
    }
}

fn index_sectors(vendors: &[VendorRow]) -> Vec<(String, Vec<usize>)> {
    let mut index: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, v) in vendors.iter().enumerate() {
        match index.iter().position(|(s, _)| s == &v.sector) {
            Some(slot) => index[slot].1.push(i),
            None => index.push((v.sector.clone(), vec![i])),
        }
    }
    index
}

// ============================================================================
// TYPED LOADERS
// ============================================================================

fn load_vendors(raw: &str, file: &str) -> ForgeResult<Vec<VendorRow>> {
    let table = csv::parse(raw, file)?;
    let name = table.column("Vendor_Name")?;
    let region = table.column("Region")?;
    let sector = table.column("Sector")?;
    let country = table.column("Country")?;
    let city = table.column("City")?;
    let latitude = table.column("Latitude")?;
    let longitude = table.column("Longitude")?;
    let contact_name = table.column("Contact_Name")?;
    let contact_email = table.column("Contact_Email")?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (line, fields) in &table.rows {
        out.push(VendorRow {
            name: fields[name].clone(),
            region: fields[region].clone(),
            sector: fields[sector].clone(),
            country: fields[country].clone(),
            city: fields[city].clone(),
            latitude: parse_f64(&table, *line, &fields[latitude], "Latitude")?,
            longitude: parse_f64(&table, *line, &fields[longitude], "Longitude")?,
            contact_name: fields[contact_name].clone(),
            contact_email: fields[contact_email].clone(),
        });
    }
    Ok(out)
}

fn load_scenarios(raw: &str, file: &str) -> ForgeResult<Vec<ScenarioRow>> {
    let table = csv::parse(raw, file)?;
    let risk_level = table.column("Risk_Level")?;
    let exposure = table.column("Exposure_Confirmed")?;
    let patch = table.column("Patch_Available")?;
    let complexity = table.column("Inject_Complexity")?;
    let mttr = table.column("MTTR_Range")?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (_, fields) in &table.rows {
        out.push(ScenarioRow {
            risk_level: fields[risk_level].clone(),
            exposure_confirmed: fields[exposure].clone(),
            patch_available: fields[patch].clone(),
            inject_complexity: fields[complexity].clone(),
            mttr_range: fields[mttr].clone(),
        });
    }
    Ok(out)
}

fn load_vulns(raw: &str, file: &str) -> ForgeResult<Vec<VulnRow>> {
    let table = csv::parse(raw, file)?;
    let vuln_id = table.column("Vuln_ID")?;
    let description = table.column("Description")?;
    let cvss = table.column("CVSS_Score")?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (line, fields) in &table.rows {
        out.push(VulnRow {
            vuln_id: fields[vuln_id].clone(),
            description: fields[description].clone(),
            cvss_score: parse_f64(&table, *line, &fields[cvss], "CVSS_Score")?,
        });
    }
    Ok(out)
}

fn parse_f64(table: &csv::Table, line: usize, value: &str, column: &str) -> ForgeResult<f64> {
    value.trim().parse().map_err(|_| {
        table.bad_row(line, format!("invalid number '{value}' in column '{column}'"))
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_builtin_pools_load() {
        let pools = PoolSet::builtin().unwrap();
        assert_eq!(pools.vendors.len(), 12);
        assert_eq!(pools.scenarios.len(), 8);
        assert_eq!(pools.vulns.len(), 16);
    }

    #[test]
    fn test_sector_index_keeps_first_encounter_order() {
        let pools = PoolSet::builtin().unwrap();
        assert_eq!(
            pools.sectors(),
            vec![
                "Energy",
                "Finance",
                "Healthcare",
                "Manufacturing",
                "Telecom",
                "Defense"
            ]
        );
        let energy = pools.vendors_in("Energy").unwrap();
        assert_eq!(energy.len(), 2);
        assert!(energy.iter().all(|&i| pools.vendors[i].sector == "Energy"));
        assert!(pools.vendors_in("Agriculture").is_none());
    }

    #[test]
    fn test_loads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let write = |name: &str, body: &str| {
            let path = dir.path().join(name);
            let mut f = std::fs::File::create(&path).unwrap();
            f.write_all(body.as_bytes()).unwrap();
            path
        };
        let cfg = ForgeConfig {
            vendor_pool: write(
                "v.csv",
                "Vendor_Name,Region,Sector,Country,City,Latitude,Longitude,Contact_Name,Contact_Email\n\
                 Acme,EMEA,Energy,DE,Berlin,52.5,13.4,Jo,jo@acme.example\n",
            ),
            scenario_pool: write(
                "s.csv",
                "Risk_Level,Exposure_Confirmed,Patch_Available,Inject_Complexity,MTTR_Range\n\
                 High,Yes,No,Medium,24-48h\n",
            ),
            vuln_pool: write(
                "u.csv",
                "Vuln_ID,Description,CVSS_Score\nCVE-2031-1,\"bad, very bad\",9.1\n",
            ),
            csv_dir: dir.path().to_path_buf(),
            db_path: dir.path().join("x.db"),
            feed_dir: dir.path().to_path_buf(),
        };

        let pools = PoolSet::load(&cfg).unwrap();
        assert_eq!(pools.vendors[0].name, "Acme");
        assert_eq!(pools.vendors[0].latitude, 52.5);
        assert_eq!(pools.vulns[0].description, "bad, very bad");
        assert_eq!(pools.scenarios[0].mttr_range, "24-48h");
    }

    #[test]
    fn test_bad_number_points_at_line() {
        let raw = "Vuln_ID,Description,CVSS_Score\nCVE-1,ok,9.1\nCVE-2,broken,high\n";
        let err = load_vulns(raw, "u.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("CVSS_Score"), "{msg}");
    }

    #[test]
    fn test_missing_sector_column_is_rejected() {
        let raw = "Vendor_Name,Region\nAcme,EMEA\n";
        assert!(load_vendors(raw, "v.csv").is_err());
    }
}

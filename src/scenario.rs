//! Scenario inputs for a projection run
//!
//! One Scenario holds every assumption the engine needs. The surrounding
//! input layer (CLI flags, a JSON file, or whatever front end drives this
//! crate) is responsible for range clamping; the engine treats the record
//! as trusted and immutable for the duration of one computation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// All assumptions for a single projection, in dollars / percent / years.
///
/// Percent fields are whole percentages (7.0 = 7%), matching how they are
/// entered; the engine divides by 100 where the math needs fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    // Capital costs
    /// Land purchase cost
    pub land_cost: f64,
    /// Cabin construction cost
    pub cabin_cost: f64,
    /// Campsite build-out cost
    pub campsite_cost: f64,
    /// Dome and other build-out cost
    pub dome_cost: f64,

    // Equity contributions
    pub amber_equity: f64,
    pub jason_equity: f64,

    // Financing
    /// Zero-interest owner loan, repaid flat at exit
    pub owner_loan: f64,
    /// Bank loan annual rate, 0-20
    pub bank_rate_pct: f64,
    /// Bank loan term in years, 1-30
    pub bank_term_years: u32,

    // Package prices (2-night stays) and day passes
    pub campsite_price: f64,
    pub cabin_price: f64,
    pub premium_price: f64,
    pub day_pass_price: f64,

    // Mix of nights across packages; the three shares sum to 100
    pub campsite_mix_pct: f64,
    pub cabin_mix_pct: f64,
    pub premium_mix_pct: f64,
    /// Day-pass sessions per year, independent of the overnight mix
    pub day_passes_per_year: f64,

    // Occupancy ramp
    /// Year-1 occupancy, 0-100
    pub occupancy_start_pct: f64,
    /// Year-5 occupancy, 0-100; held flat after year 5
    pub occupancy_end_pct: f64,

    // Growth and operating costs
    /// Real price growth per year, applied to all prices
    pub price_growth_pct: f64,
    /// Loaded wage per 90-minute session
    pub wage_per_session: f64,
    /// Wage cost-of-living adjustment per year
    pub wage_cola_pct: f64,
    /// Maintenance as % of structure cost (cabin + campsite + dome)
    pub maintenance_pct: f64,
    /// Admin as % of revenue
    pub admin_pct: f64,
    /// Other fixed operating expense per year
    pub fixed_opex: f64,

    // Exit assumptions
    /// NOP exit multiple, 2-6
    pub exit_multiple: f64,
    /// Land/improvement appreciation per year
    pub appreciation_pct: f64,
    /// Sale year, 5-30; also the projection horizon
    pub sale_year: u32,
}

impl Scenario {
    /// Load a scenario from a JSON file. Missing fields fall back to the
    /// defaults, so a file only needs the assumptions it overrides.
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let scenario: Scenario = serde_json::from_reader(file)?;
        log::debug!("loaded scenario from {}", path.display());
        Ok(scenario)
    }

    /// Total capital assets: land plus all structures.
    pub fn total_assets(&self) -> f64 {
        self.land_cost + self.cabin_cost + self.campsite_cost + self.dome_cost
    }

    /// Structure cost (everything but land); the maintenance base.
    pub fn structure_cost(&self) -> f64 {
        self.cabin_cost + self.campsite_cost + self.dome_cost
    }

    /// Combined equity contribution.
    pub fn total_equity(&self) -> f64 {
        self.amber_equity + self.jason_equity
    }

    /// Amount financed by the amortizing bank loan: whatever the equity
    /// contributions and owner loan do not cover, floored at zero.
    pub fn financed_gap(&self) -> f64 {
        (self.total_assets() - self.total_equity() - self.owner_loan).max(0.0)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            land_cost: 50_000.0,
            cabin_cost: 70_000.0,
            campsite_cost: 10_000.0,
            dome_cost: 70_000.0,
            amber_equity: 30_000.0,
            jason_equity: 30_000.0,
            owner_loan: 100_000.0,
            bank_rate_pct: 7.0,
            bank_term_years: 15,
            campsite_price: 350.0,
            cabin_price: 650.0,
            premium_price: 800.0,
            day_pass_price: 175.0,
            campsite_mix_pct: 30.0,
            cabin_mix_pct: 40.0,
            premium_mix_pct: 30.0,
            day_passes_per_year: 120.0,
            occupancy_start_pct: 20.0,
            occupancy_end_pct: 45.0,
            price_growth_pct: 0.0,
            wage_per_session: 52.5,
            wage_cola_pct: 4.0,
            maintenance_pct: 1.5,
            admin_pct: 8.0,
            fixed_opex: 5_000.0,
            exit_multiple: 3.0,
            appreciation_pct: 2.0,
            sale_year: 10,
        }
    }
}

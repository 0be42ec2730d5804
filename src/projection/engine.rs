//! Core projection engine for annual revenue/cost/cashflow projections

use crate::scenario::Scenario;
use super::amortization::{monthly_payment, remaining_balance};
use super::irr::{calculate_irr, payback_year};
use super::ledger::{
    ExitSummary, LedgerRow, ProjectionResult, ReturnMetrics, SensitivityPoint,
};
use super::occupancy::occupancy_vector;
use super::{NIGHTS_PER_STAY, NIGHTS_PER_YEAR};

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of points on the IRR-vs-multiple sensitivity curve
    pub sensitivity_samples: u32,

    /// Lowest exit multiple sampled
    pub sensitivity_multiple_low: f64,

    /// Highest exit multiple sampled
    pub sensitivity_multiple_high: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sensitivity_samples: 9,
            sensitivity_multiple_low: 2.0,
            sensitivity_multiple_high: 6.0,
        }
    }
}

/// Main projection engine
///
/// A pure transform: one Scenario in, one ProjectionResult out. Holds no
/// state between runs, so a single engine serves any number of scenarios.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the full projection for a scenario
    pub fn project(&self, scenario: &Scenario) -> ProjectionResult {
        log::debug!(
            "projecting {} years, financed gap ${:.0}",
            scenario.sale_year,
            scenario.financed_gap()
        );

        let ledger = self.build_ledger(scenario);
        let exit = self.calculate_exit(scenario, &ledger);
        let returns = self.calculate_returns(scenario, &ledger, &exit);
        let sensitivity = self.sensitivity_curve(scenario, &ledger, &exit);

        ProjectionResult {
            ledger,
            exit,
            returns,
            sensitivity,
        }
    }

    /// Build one ledger row per year, 1..=sale_year
    fn build_ledger(&self, scenario: &Scenario) -> Vec<LedgerRow> {
        let occ_vec = occupancy_vector(
            scenario.occupancy_start_pct / 100.0,
            scenario.occupancy_end_pct / 100.0,
            scenario.sale_year,
        );
        let bank_pmt_month = monthly_payment(
            scenario.financed_gap(),
            scenario.bank_rate_pct,
            scenario.bank_term_years,
        );

        (1..=scenario.sale_year)
            .map(|year| self.calculate_year(scenario, year, occ_vec[year as usize - 1], bank_pmt_month))
            .collect()
    }

    /// Calculate one year's ledger row
    fn calculate_year(
        &self,
        scenario: &Scenario,
        year: u32,
        occupancy: f64,
        bank_pmt_month: f64,
    ) -> LedgerRow {
        // Nights booked per package, split by the mix shares
        let nights = occupancy * NIGHTS_PER_YEAR;
        let campsite_stays = nights * scenario.campsite_mix_pct / 100.0 / NIGHTS_PER_STAY;
        let cabin_stays = nights * scenario.cabin_mix_pct / 100.0 / NIGHTS_PER_STAY;
        let premium_stays = nights * scenario.premium_mix_pct / 100.0 / NIGHTS_PER_STAY;
        let day_passes = scenario.day_passes_per_year;

        // Real price growth compounds from year 1, day passes included
        let price_factor = (1.0 + scenario.price_growth_pct / 100.0).powi(year as i32 - 1);
        let revenue = (campsite_stays * scenario.campsite_price
            + cabin_stays * scenario.cabin_price
            + premium_stays * scenario.premium_price
            + day_passes * scenario.day_pass_price)
            * price_factor;

        // Premium stays consume two dome sessions, day passes one each
        let sessions = campsite_stays + cabin_stays + 2.0 * premium_stays + day_passes;
        let wages = scenario.wage_per_session
            * (1.0 + scenario.wage_cola_pct / 100.0).powi(year as i32 - 1)
            * sessions;

        // Maintenance keys off static structure cost, so it never inflates
        let maintenance = scenario.structure_cost() * scenario.maintenance_pct / 100.0;
        let admin = revenue * scenario.admin_pct / 100.0;
        let opex = maintenance + admin + scenario.fixed_opex;
        let nop = revenue - wages - opex;

        let debt_service = if year <= scenario.bank_term_years {
            bank_pmt_month * 12.0
        } else {
            0.0
        };
        let fcf = nop - debt_service;

        let total_assets = scenario.total_assets();
        let roa = if total_assets > 0.0 { nop / total_assets } else { 0.0 };
        let w2_multiple = if wages > 0.0 { (revenue - opex) / wages } else { 0.0 };

        LedgerRow {
            year,
            occupancy_pct: occupancy * 100.0,
            campsite_stays,
            cabin_stays,
            premium_stays,
            day_passes,
            revenue,
            wages,
            opex,
            nop,
            debt_service,
            fcf,
            w2_multiple,
            roa,
        }
    }

    /// Exit valuation and equity proceeds at the sale year
    fn calculate_exit(&self, scenario: &Scenario, ledger: &[LedgerRow]) -> ExitSummary {
        // Land and structures appreciate at the same rate; structures carry
        // no separate depreciation curve in this model
        let appreciation = (1.0 + scenario.appreciation_pct / 100.0).powi(scenario.sale_year as i32);
        let appreciated_assets =
            scenario.land_cost * appreciation + scenario.structure_cost() * appreciation;

        let final_nop = ledger.last().map(|r| r.nop).unwrap_or(0.0);
        let nop_multiple_value = final_nop * scenario.exit_multiple;

        let months_elapsed = scenario.sale_year.min(scenario.bank_term_years) * 12;
        let bank_balance = remaining_balance(
            scenario.financed_gap(),
            scenario.bank_rate_pct,
            scenario.bank_term_years,
            months_elapsed,
        );

        let exit_proceeds =
            appreciated_assets + nop_multiple_value - bank_balance - scenario.owner_loan;
        let cumulative_nop: f64 = ledger.iter().map(|r| r.nop).sum();

        ExitSummary {
            appreciated_assets,
            nop_multiple_value,
            bank_balance,
            owner_loan_repayment: scenario.owner_loan,
            exit_proceeds,
            cumulative_nop,
            equity_proceeds: cumulative_nop + exit_proceeds,
        }
    }

    /// IRR and payback over the equity cashflow stream
    fn calculate_returns(
        &self,
        scenario: &Scenario,
        ledger: &[LedgerRow],
        exit: &ExitSummary,
    ) -> ReturnMetrics {
        let irr = calculate_irr(&equity_cashflows(scenario, ledger, exit.exit_proceeds));

        let fcfs: Vec<f64> = ledger.iter().map(|r| r.fcf).collect();
        let payback = payback_year(scenario.total_equity(), &fcfs);

        ReturnMetrics {
            irr,
            payback_year: payback,
        }
    }

    /// Recompute IRR at alternative exit multiples, holding all non-final
    /// years at their computed cashflows
    fn sensitivity_curve(
        &self,
        scenario: &Scenario,
        ledger: &[LedgerRow],
        exit: &ExitSummary,
    ) -> Vec<SensitivityPoint> {
        let samples = self.config.sensitivity_samples;
        if samples == 0 || ledger.is_empty() {
            return Vec::new();
        }

        let low = self.config.sensitivity_multiple_low;
        let high = self.config.sensitivity_multiple_high;
        let final_nop = ledger.last().map(|r| r.nop).unwrap_or(0.0);

        (0..samples)
            .map(|i| {
                let multiple = if samples == 1 {
                    low
                } else {
                    low + (high - low) * i as f64 / (samples - 1) as f64
                };
                let exit_at_multiple = exit.appreciated_assets + final_nop * multiple
                    - exit.bank_balance
                    - scenario.owner_loan;
                let irr_pct = calculate_irr(&equity_cashflows(scenario, ledger, exit_at_multiple))
                    .map(|r| r * 100.0);
                SensitivityPoint { multiple, irr_pct }
            })
            .collect()
    }
}

/// Equity cashflow stream: initial equity out, each year's FCF in, with exit
/// proceeds folded into the final year
fn equity_cashflows(scenario: &Scenario, ledger: &[LedgerRow], exit_proceeds: f64) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(ledger.len() + 1);
    cashflows.push(-scenario.total_equity());
    cashflows.extend(ledger.iter().map(|r| r.fcf));
    if !ledger.is_empty() {
        if let Some(last) = cashflows.last_mut() {
            *last += exit_proceeds;
        }
    }
    cashflows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ledger_length_and_year_order() {
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);

        assert_eq!(result.ledger.len(), 10);
        for (i, row) in result.ledger.iter().enumerate() {
            assert_eq!(row.year, i as u32 + 1);
        }
    }

    #[test]
    fn test_year_one_hand_computed() {
        // Default scenario, year 1: occ 20%, no price growth yet.
        // Nights = 0.2 * 365 = 73; stays = 73 * mix / 2 = 10.95 / 14.6 / 10.95
        // Revenue = 10.95*350 + 14.6*650 + 10.95*800 + 120*175 = 43,082.50
        // Sessions = 10.95 + 14.6 + 21.9 + 120 = 167.45
        // Wages = 52.5 * 167.45 = 8,791.125
        // OpEx = 150,000*1.5% + 43,082.50*8% + 5,000 = 10,696.60
        // NOP = 43,082.50 - 8,791.125 - 10,696.60 = 23,594.775
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);
        let y1 = &result.ledger[0];

        assert_relative_eq!(y1.occupancy_pct, 20.0, epsilon = 1e-9);
        assert_relative_eq!(y1.campsite_stays, 10.95, epsilon = 1e-9);
        assert_relative_eq!(y1.cabin_stays, 14.6, epsilon = 1e-9);
        assert_relative_eq!(y1.premium_stays, 10.95, epsilon = 1e-9);
        assert_relative_eq!(y1.revenue, 43_082.50, epsilon = 1e-6);
        assert_relative_eq!(y1.wages, 8_791.125, epsilon = 1e-6);
        assert!((y1.nop - 23_594.775).abs() < 1.0);
    }

    #[test]
    fn test_row_identities_hold_exactly() {
        let scenario = Scenario {
            price_growth_pct: 2.0,
            sale_year: 25,
            ..Scenario::default()
        };
        let result = ProjectionEngine::default().project(&scenario);

        for row in &result.ledger {
            assert_eq!(row.nop, row.revenue - row.wages - row.opex);
            assert_eq!(row.fcf, row.nop - row.debt_service);
        }
    }

    #[test]
    fn test_debt_service_stops_after_term() {
        let scenario = Scenario {
            bank_term_years: 15,
            sale_year: 20,
            ..Scenario::default()
        };
        let result = ProjectionEngine::default().project(&scenario);

        for row in &result.ledger {
            if row.year <= 15 {
                assert!(row.debt_service > 0.0, "year {} should carry debt", row.year);
            } else {
                assert_eq!(row.debt_service, 0.0, "year {} past the term", row.year);
            }
        }
    }

    #[test]
    fn test_cumulative_nop_matches_rows() {
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);

        let sum: f64 = result.ledger.iter().map(|r| r.nop).sum();
        assert_relative_eq!(result.exit.cumulative_nop, sum, epsilon = 1e-9);
    }

    #[test]
    fn test_longer_horizon_preserves_early_rows() {
        let base = Scenario::default();
        let doubled = Scenario {
            sale_year: base.sale_year * 2,
            ..base.clone()
        };

        let engine = ProjectionEngine::default();
        let short = engine.project(&base);
        let long = engine.project(&doubled);

        for (a, b) in short.ledger.iter().zip(long.ledger.iter()) {
            assert_eq!(a.revenue, b.revenue);
            assert_eq!(a.wages, b.wages);
            assert_eq!(a.opex, b.opex);
            assert_eq!(a.nop, b.nop);
            assert_eq!(a.debt_service, b.debt_service);
            assert_eq!(a.fcf, b.fcf);
        }

        // Every extra year has positive NOP under the defaults, so the
        // cumulative total must strictly rise
        assert!(long.exit.cumulative_nop > short.exit.cumulative_nop);
    }

    #[test]
    fn test_exit_math() {
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);
        let exit = &result.exit;

        // 200,000 appreciated at 2% over 10 years
        let expected_assets = 200_000.0 * 1.02_f64.powi(10);
        assert_relative_eq!(exit.appreciated_assets, expected_assets, epsilon = 1e-6);

        let final_nop = result.ledger.last().unwrap().nop;
        assert_relative_eq!(exit.nop_multiple_value, final_nop * 3.0, epsilon = 1e-9);

        assert_relative_eq!(
            exit.exit_proceeds,
            exit.appreciated_assets + exit.nop_multiple_value
                - exit.bank_balance
                - exit.owner_loan_repayment,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            exit.equity_proceeds,
            exit.cumulative_nop + exit.exit_proceeds,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bank_balance_zero_when_sale_after_term() {
        let scenario = Scenario {
            bank_term_years: 10,
            sale_year: 15,
            ..Scenario::default()
        };
        let result = ProjectionEngine::default().project(&scenario);
        assert_relative_eq!(result.exit.bank_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sensitivity_curve_shape() {
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);

        assert_eq!(result.sensitivity.len(), 9);
        assert_relative_eq!(result.sensitivity[0].multiple, 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.sensitivity[8].multiple, 6.0, epsilon = 1e-12);
        for pair in result.sensitivity.windows(2) {
            assert_relative_eq!(pair[1].multiple - pair[0].multiple, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sensitivity_matches_base_irr_at_scenario_multiple() {
        // Default exit multiple is 3, which sits on the sampled grid
        let scenario = Scenario::default();
        let result = ProjectionEngine::default().project(&scenario);

        let base_irr_pct = result.returns.irr.unwrap() * 100.0;
        let at_three = result
            .sensitivity
            .iter()
            .find(|p| (p.multiple - 3.0).abs() < 1e-9)
            .unwrap();
        assert_relative_eq!(at_three.irr_pct.unwrap(), base_irr_pct, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_equity_does_not_panic() {
        let scenario = Scenario {
            amber_equity: 0.0,
            jason_equity: 0.0,
            ..Scenario::default()
        };
        let result = ProjectionEngine::default().project(&scenario);

        // All-positive stream has no sign change: IRR is undefined, not a crash
        assert!(result.returns.irr.is_none());
        // Payback is immediate once year-1 FCF lands
        assert_eq!(result.returns.payback_year, Some(1));
    }

    #[test]
    fn test_zero_assets_and_wages_guards() {
        let scenario = Scenario {
            land_cost: 0.0,
            cabin_cost: 0.0,
            campsite_cost: 0.0,
            dome_cost: 0.0,
            wage_per_session: 0.0,
            occupancy_start_pct: 0.0,
            occupancy_end_pct: 0.0,
            day_passes_per_year: 0.0,
            ..Scenario::default()
        };
        let result = ProjectionEngine::default().project(&scenario);

        for row in &result.ledger {
            assert_eq!(row.roa, 0.0);
            assert_eq!(row.w2_multiple, 0.0);
        }
    }

    #[test]
    fn test_price_growth_compounds() {
        let flat = Scenario::default();
        let growing = Scenario {
            price_growth_pct: 3.0,
            ..Scenario::default()
        };

        let engine = ProjectionEngine::default();
        let flat_result = engine.project(&flat);
        let growing_result = engine.project(&growing);

        // Year 1 is unaffected; growth only compounds from year 2
        assert_eq!(
            flat_result.ledger[0].revenue,
            growing_result.ledger[0].revenue
        );
        // Both scenarios plateau occupancy after year 5; from there revenue
        // only moves with the price factor
        let flat_y6 = flat_result.ledger[5].revenue;
        let growing_y6 = growing_result.ledger[5].revenue;
        assert_relative_eq!(growing_y6, flat_y6 * 1.03_f64.powi(5), epsilon = 1e-6);
    }
}

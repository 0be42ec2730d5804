//! Ledger output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Projection year, 1-indexed
    pub year: u32,

    /// Occupancy rate for the year as a percentage
    pub occupancy_pct: f64,

    // Volume
    pub campsite_stays: f64,
    pub cabin_stays: f64,
    pub premium_stays: f64,
    pub day_passes: f64,

    // Income statement
    pub revenue: f64,
    pub wages: f64,
    pub opex: f64,
    /// Net operating profit: revenue - wages - opex
    pub nop: f64,

    // Cashflow
    pub debt_service: f64,
    /// Free cash flow: NOP - debt service
    pub fcf: f64,

    // Ratios
    /// (revenue - opex) / wages; 0 when wages are 0
    pub w2_multiple: f64,
    /// NOP / total assets; 0 when assets are 0
    pub roa: f64,
}

/// Exit valuation and equity proceeds at the sale year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSummary {
    /// Land plus structures, appreciated to the sale year
    pub appreciated_assets: f64,

    /// Final-year NOP times the exit multiple
    pub nop_multiple_value: f64,

    /// Outstanding bank loan balance at sale
    pub bank_balance: f64,

    /// Owner loan repaid flat at exit
    pub owner_loan_repayment: f64,

    /// Net exit proceeds: appreciation + NOP value - bank balance - owner loan
    pub exit_proceeds: f64,

    /// Sum of NOP over every projected year
    pub cumulative_nop: f64,

    /// Cumulative NOP plus exit proceeds
    pub equity_proceeds: f64,
}

/// Investor return metrics over the equity cashflow stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Equity IRR as a fraction (0.16 = 16%); None when no real root exists
    pub irr: Option<f64>,

    /// First year cumulative FCF recovers the initial equity; None if never
    pub payback_year: Option<u32>,
}

/// One point on the IRR-vs-exit-multiple sensitivity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub multiple: f64,
    /// IRR in percent at this multiple; None when the stream has no real root
    pub irr_pct: Option<f64>,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Annual ledger rows, ordered year 1..=sale_year
    pub ledger: Vec<LedgerRow>,

    /// Exit valuation and equity proceeds
    pub exit: ExitSummary,

    /// IRR and payback over the equity stream
    pub returns: ReturnMetrics,

    /// IRR at alternative exit multiples
    pub sensitivity: Vec<SensitivityPoint>,
}

impl ProjectionResult {
    /// Get summary statistics over the ledger
    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.ledger.iter().map(|r| r.revenue).sum();
        let total_wages: f64 = self.ledger.iter().map(|r| r.wages).sum();
        let total_opex: f64 = self.ledger.iter().map(|r| r.opex).sum();
        let cumulative_nop: f64 = self.ledger.iter().map(|r| r.nop).sum();
        let total_debt_service: f64 = self.ledger.iter().map(|r| r.debt_service).sum();
        let total_fcf: f64 = self.ledger.iter().map(|r| r.fcf).sum();

        ProjectionSummary {
            years: self.ledger.len() as u32,
            total_revenue,
            total_wages,
            total_opex,
            cumulative_nop,
            total_debt_service,
            total_fcf,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_revenue: f64,
    pub total_wages: f64,
    pub total_opex: f64,
    pub cumulative_nop: f64,
    pub total_debt_service: f64,
    pub total_fcf: f64,
}

//! Projection engine: amortization, the annual recurrence, exit math,
//! return metrics, and the exit-multiple sensitivity curve

mod amortization;
mod engine;
mod irr;
mod ledger;
mod occupancy;

pub use amortization::{monthly_payment, remaining_balance};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use irr::{calculate_irr, payback_year};
pub use ledger::{
    ExitSummary, LedgerRow, ProjectionResult, ProjectionSummary, ReturnMetrics, SensitivityPoint,
};
pub use occupancy::occupancy_vector;

/// Bookable nights per site per year.
pub const NIGHTS_PER_YEAR: f64 = 365.0;

/// Every overnight package is a 2-night stay.
pub const NIGHTS_PER_STAY: f64 = 2.0;

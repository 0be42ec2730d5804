//! Retreat Sandbox - Deterministic projection engine for a small retreat venture
//!
//! This library provides:
//! - Year-by-year revenue/cost/cashflow projections from a single Scenario
//! - Bank loan amortization (payment and remaining balance)
//! - Exit valuation and equity proceeds at the sale year
//! - Equity IRR, payback, and an IRR-vs-exit-multiple sensitivity curve

pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use projection::{LedgerRow, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::Scenario;

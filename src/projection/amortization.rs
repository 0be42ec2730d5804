//! Fixed-rate loan amortization helpers
//!
//! Both functions treat a zero rate the same as a zero principal: no payment
//! and no balance. The zero-interest owner loan is deliberately excluded from
//! amortization this way and only settles as a flat subtraction at exit.

/// Monthly payment on a fully-amortizing fixed-rate loan.
///
/// Returns 0.0 when `principal` or `annual_rate_pct` is 0.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    if principal == 0.0 || annual_rate_pct == 0.0 {
        return 0.0;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let n = (term_years * 12) as f64;
    principal * r / (1.0 - (1.0 + r).powf(-n))
}

/// Outstanding balance after `months_elapsed` payments.
///
/// Returns 0.0 when `principal` or `annual_rate_pct` is 0. The caller caps
/// `months_elapsed` at the loan's term; the result is floored at 0 so rounding
/// at the final payment never reports a negative balance.
pub fn remaining_balance(
    principal: f64,
    annual_rate_pct: f64,
    term_years: u32,
    months_elapsed: u32,
) -> f64 {
    if principal == 0.0 || annual_rate_pct == 0.0 {
        return 0.0;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let n = (term_years * 12) as i32;
    let p = months_elapsed as i32;
    let bal = principal * ((1.0 + r).powi(n) - (1.0 + r).powi(p)) / ((1.0 + r).powi(n) - 1.0);
    bal.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_principal_or_rate() {
        assert_eq!(monthly_payment(0.0, 7.0, 15), 0.0);
        assert_eq!(monthly_payment(40_000.0, 0.0, 15), 0.0);
        assert_eq!(remaining_balance(0.0, 7.0, 15, 60), 0.0);
        assert_eq!(remaining_balance(40_000.0, 0.0, 15, 60), 0.0);
    }

    #[test]
    fn test_payment_matches_standard_amortization() {
        // $40,000 at 7% over 15 years: $359.53/month per any mortgage table
        let pmt = monthly_payment(40_000.0, 7.0, 15);
        assert_relative_eq!(pmt, 359.53, epsilon = 0.05);
    }

    #[test]
    fn test_balance_starts_at_principal() {
        let bal = remaining_balance(40_000.0, 7.0, 15, 0);
        assert_relative_eq!(bal, 40_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_balance_non_increasing_and_zero_at_term() {
        let mut prev = f64::INFINITY;
        for months in (0..=180).step_by(12) {
            let bal = remaining_balance(40_000.0, 7.0, 15, months);
            assert!(bal <= prev, "balance rose at month {}", months);
            prev = bal;
        }
        assert_relative_eq!(remaining_balance(40_000.0, 7.0, 15, 180), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_payments_reconstruct_balance() {
        // One year of payments: balance should drop by principal paid,
        // i.e. payments made minus interest accrued
        let principal = 40_000.0;
        let pmt = monthly_payment(principal, 7.0, 15);
        let r = 7.0 / 100.0 / 12.0;

        let mut bal = principal;
        for _ in 0..12 {
            bal = bal * (1.0 + r) - pmt;
        }
        assert_relative_eq!(bal, remaining_balance(principal, 7.0, 15, 12), epsilon = 1e-6);
    }
}

//! Simple interest calculator
//!
//! Ancillary to the ledger itself: computes a fixed-rate simple interest
//! quote over the current balance. All figures are reported to two decimal
//! places.

use crate::types::{Amount, LedgerError};
use rust_decimal::Decimal;
use std::fmt;

/// Fixed annual rate, percent
fn annual_rate() -> Decimal {
    Decimal::new(40, 1) // 4.0
}

/// A computed interest projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestQuote {
    /// Principal the quote was computed over
    pub principal: Decimal,
    /// Annual rate in percent
    pub rate: Decimal,
    /// Number of years
    pub years: u32,
    /// Simple interest: `principal * rate * years / 100`
    pub interest: Decimal,
    /// Principal plus interest
    pub total: Decimal,
}

impl fmt::Display for InterestQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Principal: Rs{:.2}\nRate: {:.2}% per annum\nYears: {}\nInterest: Rs{:.2}\nEstimated balance: Rs{:.2}",
            self.principal, self.rate, self.years, self.interest, self.total
        )
    }
}

/// Compute a simple-interest quote at the fixed 4.0% rate
///
/// # Errors
///
/// `InvalidTerm` if `years` is zero.
pub fn simple_interest(principal: Amount, years: u32) -> Result<InterestQuote, LedgerError> {
    if years == 0 {
        return Err(LedgerError::invalid_term(years));
    }

    let principal = Decimal::from(principal);
    let rate = annual_rate();
    let interest =
        (principal * rate * Decimal::from(years) / Decimal::from(100u32)).round_dp(2);

    Ok(InterestQuote {
        principal: principal.round_dp(2),
        rate,
        years,
        interest,
        total: (principal + interest).round_dp(2),
    })
}

//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for engine types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_billing::Treasury;
use domain_settlement::{EngineError, Severity};

/// Asserts that two Money values are equal in amount and currency
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a result failed with the given error code
///
/// # Panics
///
/// Panics if the result is `Ok` or carries a different code
pub fn assert_error_code<T: std::fmt::Debug>(result: &Result<T, EngineError>, code: &str) {
    match result {
        Ok(value) => panic!("Expected error {code}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.code(), code, "Unexpected error: {err}"),
    }
}

/// Asserts that a result failed with a recoverable error
pub fn assert_recoverable<T: std::fmt::Debug>(result: &Result<T, EngineError>) {
    match result {
        Ok(value) => panic!("Expected recoverable error, got Ok({value:?})"),
        Err(err) => assert_eq!(
            err.severity(),
            Severity::Recoverable,
            "Expected recoverable error, got fatal {err}"
        ),
    }
}

/// Asserts that a result failed with a fatal error
pub fn assert_fatal<T: std::fmt::Debug>(result: &Result<T, EngineError>) {
    match result {
        Ok(value) => panic!("Expected fatal error, got Ok({value:?})"),
        Err(err) => assert!(err.is_fatal(), "Expected fatal error, got recoverable {err}"),
    }
}

/// Asserts that the treasury's books balance
pub fn assert_books_balanced(treasury: &Treasury) {
    let trial = treasury.trial_balance().expect("trial balance");
    assert!(
        trial.is_balanced,
        "Books out of balance: debits={}, credits={}",
        trial.total_debits,
        trial.total_credits
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_eq() {
        let a = Money::new(dec!(1.5), Currency::ETH);
        assert_money_eq(&a, &Money::new(dec!(1.50), Currency::ETH));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_eq_currency_mismatch() {
        assert_money_eq(&Money::zero(Currency::ETH), &Money::zero(Currency::USD));
    }

    #[test]
    fn test_assert_error_code() {
        let result: Result<(), EngineError> = Err(EngineError::CounterExhausted);
        assert_error_code(&result, "COUNTER_EXHAUSTED");
        assert_fatal(&result);
    }

    #[test]
    #[should_panic(expected = "Expected error")]
    fn test_assert_error_code_on_ok() {
        let result: Result<u8, EngineError> = Ok(1);
        assert_error_code(&result, "BANNED");
    }

    #[test]
    fn test_assert_recoverable() {
        let result: Result<(), EngineError> = Err(EngineError::Banned("x".into()));
        assert_recoverable(&result);
    }

    #[test]
    fn test_assert_books_balanced_on_fresh_treasury() {
        let treasury = Treasury::new(Currency::ETH).unwrap();
        assert_books_balanced(&treasury);
    }
}

//! Expense-share allocation.
//!
//! A share's amount is always `round(amount * percentage / 100, 2)`. Equal splits divide
//! 100% in basis points so the percentages add up exactly; the amounts themselves are not
//! reconciled against the expense total, so they may drift by up to a cent per share.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Allowed distance of the percentage total from 100.
pub const PERCENT_TOLERANCE: f64 = 0.01;

const BASIS_POINTS: i64 = 10_000;
const EPSILON: f64 = 1e-9;

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("expense amount must be greater than zero")]
    NonPositiveAmount,
    #[error("an expense must be split between at least one participant")]
    NoParticipants,
    #[error("cannot split between {0} participants")]
    TooManyParticipants(usize),
    #[error("participant {0} appears more than once in the split")]
    DuplicateParticipant(Uuid),
    #[error("percentage for {user} must be greater than 0 and at most 100, got {percentage}")]
    PercentageOutOfRange { user: Uuid, percentage: f64 },
    #[error("percentages must add up to 100, got {0:.2}")]
    PercentageTotal(f64),
    #[error("share for {user} is {actual:.2}, expected {expected:.2}")]
    AmountMismatch { user: Uuid, expected: f64, actual: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareAllocation {
    pub user_id: Uuid,
    pub percentage: f64,
    pub amount: f64,
}

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// `round(amount * percentage / 100, 2)`
pub fn share_amount(amount: f64, percentage: f64) -> f64 {
    (amount * percentage).round() / 100.0
}

/// Splits `amount` evenly. The first `10000 mod n` participants carry one extra basis point.
pub fn equal_split(amount: f64, participants: &[Uuid]) -> Result<Vec<ShareAllocation>, SplitError> {
    check_amount(amount)?;
    check_unique(participants.iter().copied())?;

    let n = participants.len() as i64;
    if n > BASIS_POINTS {
        return Err(SplitError::TooManyParticipants(participants.len()));
    }
    let base = BASIS_POINTS / n;
    let remainder = BASIS_POINTS % n;

    let shares: Vec<ShareAllocation> = participants
        .iter()
        .enumerate()
        .map(|(i, user_id)| {
            let points = base + i64::from((i as i64) < remainder);
            let percentage = points as f64 / 100.0;
            ShareAllocation { user_id: *user_id, percentage, amount: share_amount(amount, percentage) }
        })
        .collect();

    validate_allocation(amount, &shares)?;
    Ok(shares)
}

/// Splits `amount` by explicit percentages.
pub fn percentage_split(amount: f64, shares: &[(Uuid, f64)]) -> Result<Vec<ShareAllocation>, SplitError> {
    check_amount(amount)?;
    check_unique(shares.iter().map(|(user, _)| *user))?;

    // the range applies to the stored two-decimal value, so 0.004 is as invalid as 0
    let mut allocations = Vec::with_capacity(shares.len());
    for (user_id, requested) in shares {
        let percentage = round2(*requested);
        if !in_range(percentage) {
            return Err(SplitError::PercentageOutOfRange { user: *user_id, percentage: *requested });
        }
        allocations.push(ShareAllocation { user_id: *user_id, percentage, amount: share_amount(amount, percentage) });
    }

    validate_allocation(amount, &allocations)?;
    Ok(allocations)
}

/// Post-hoc check of a share set: unique holders, percentages summing to 100 ± 0.01,
/// and every amount matching its percentage.
pub fn validate_allocation(amount: f64, shares: &[ShareAllocation]) -> Result<(), SplitError> {
    check_unique(shares.iter().map(|s| s.user_id))?;

    if let Some(share) = shares.iter().find(|s| !in_range(s.percentage)) {
        return Err(SplitError::PercentageOutOfRange { user: share.user_id, percentage: share.percentage });
    }

    let total: f64 = shares.iter().map(|s| s.percentage).sum();
    if (total - 100.0).abs() > PERCENT_TOLERANCE + EPSILON {
        return Err(SplitError::PercentageTotal(total));
    }

    for share in shares {
        let expected = share_amount(amount, share.percentage);
        if to_cents(expected) != to_cents(share.amount) {
            return Err(SplitError::AmountMismatch {
                user: share.user_id,
                expected,
                actual: share.amount,
            });
        }
    }
    Ok(())
}

fn in_range(percentage: f64) -> bool {
    percentage.is_finite() && percentage > 0.0 && percentage <= 100.0
}

fn check_amount(amount: f64) -> Result<(), SplitError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(SplitError::NonPositiveAmount);
    }
    Ok(())
}

fn check_unique(users: impl Iterator<Item = Uuid>) -> Result<(), SplitError> {
    let mut seen = HashSet::new();
    let mut any = false;
    for user in users {
        any = true;
        if !seen.insert(user) {
            return Err(SplitError::DuplicateParticipant(user));
        }
    }
    if !any {
        return Err(SplitError::NoParticipants);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn percent_total(shares: &[ShareAllocation]) -> f64 {
        shares.iter().map(|s| s.percentage).sum()
    }

    #[test]
    fn equal_split_between_three_puts_the_extra_basis_point_first() {
        let people = users(3);
        let shares = equal_split(100.0, &people).unwrap();

        let percentages: Vec<f64> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(percentages, vec![33.34, 33.33, 33.33]);
        let amounts: Vec<f64> = shares.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![33.34, 33.33, 33.33]);
        assert_eq!(shares[0].user_id, people[0]);
    }

    #[test]
    fn equal_split_percentages_always_total_100() {
        for n in 1..=40 {
            let shares = equal_split(57.31, &users(n)).unwrap();
            assert!((percent_total(&shares) - 100.0).abs() <= PERCENT_TOLERANCE, "n = {n}");
        }
    }

    #[test]
    fn equal_split_amounts_follow_the_rounding_rule() {
        let shares = equal_split(10.0, &users(7)).unwrap();
        for share in &shares {
            assert_eq!(to_cents(share.amount), to_cents(share_amount(10.0, share.percentage)));
        }
        // 14.29% and 14.28% of 10.00 both round to 1.43; the drift is not reconciled.
        let total: i64 = shares.iter().map(|s| to_cents(s.amount)).sum();
        assert_eq!(total, 1001);
    }

    #[test]
    fn single_participant_takes_everything() {
        let shares = equal_split(42.5, &users(1)).unwrap();
        assert_eq!(shares[0].percentage, 100.0);
        assert_eq!(shares[0].amount, 42.5);
    }

    #[test]
    fn equal_split_rejects_empty_and_duplicate_lists() {
        assert_eq!(equal_split(10.0, &[]), Err(SplitError::NoParticipants));
        let a = Uuid::new_v4();
        assert_eq!(equal_split(10.0, &[a, a]), Err(SplitError::DuplicateParticipant(a)));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert_eq!(equal_split(0.0, &users(2)), Err(SplitError::NonPositiveAmount));
        assert_eq!(equal_split(-5.0, &users(2)), Err(SplitError::NonPositiveAmount));
        assert_eq!(equal_split(f64::NAN, &users(2)), Err(SplitError::NonPositiveAmount));
    }

    #[test]
    fn percentage_split_computes_rounded_amounts() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = percentage_split(80.0, &[(a, 62.5), (b, 37.5)]).unwrap();

        assert_eq!(shares[0], ShareAllocation { user_id: a, percentage: 62.5, amount: 50.0 });
        assert_eq!(shares[1], ShareAllocation { user_id: b, percentage: 37.5, amount: 30.0 });
    }

    #[test]
    fn percentage_total_within_tolerance_is_accepted() {
        let people = users(3);
        let shares = percentage_split(
            30.0,
            &[(people[0], 33.33), (people[1], 33.33), (people[2], 33.33)],
        )
        .unwrap();
        assert_eq!(shares.iter().map(|s| s.amount).collect::<Vec<_>>(), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn percentage_total_outside_tolerance_is_rejected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(matches!(
            percentage_split(10.0, &[(a, 50.0), (b, 49.98)]),
            Err(SplitError::PercentageTotal(_))
        ));
        assert!(matches!(
            percentage_split(10.0, &[(a, 60.0), (b, 60.0)]),
            Err(SplitError::PercentageTotal(_))
        ));
    }

    #[test]
    fn percentages_must_be_in_range() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(
            percentage_split(10.0, &[(a, 0.0), (b, 100.0)]),
            Err(SplitError::PercentageOutOfRange { user: a, percentage: 0.0 })
        );
        assert_eq!(
            percentage_split(10.0, &[(a, 120.0), (b, -20.0)]),
            Err(SplitError::PercentageOutOfRange { user: a, percentage: 120.0 })
        );
    }

    #[test]
    fn percentages_that_round_to_zero_are_rejected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(
            percentage_split(10.0, &[(a, 0.004), (b, 99.996)]),
            Err(SplitError::PercentageOutOfRange { user: a, percentage: 0.004 })
        );
        // 0.005 rounds up to the smallest storable share
        let shares = percentage_split(10.0, &[(a, 0.005), (b, 99.99)]).unwrap();
        assert!(shares.iter().all(|s| s.percentage > 0.0));
    }

    #[test]
    fn zero_percent_share_fails_validation() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = vec![
            ShareAllocation { user_id: a, percentage: 0.0, amount: 0.0 },
            ShareAllocation { user_id: b, percentage: 100.0, amount: 10.0 },
        ];
        assert_eq!(
            validate_allocation(10.0, &shares),
            Err(SplitError::PercentageOutOfRange { user: a, percentage: 0.0 })
        );
    }

    #[test]
    fn tampered_amount_fails_validation() {
        let people = users(2);
        let mut shares = equal_split(20.0, &people).unwrap();
        shares[1].amount = 9.99;

        assert_eq!(
            validate_allocation(20.0, &shares),
            Err(SplitError::AmountMismatch { user: people[1], expected: 10.0, actual: 9.99 })
        );
    }

    #[test]
    fn cents_helpers_round_trip_two_decimals() {
        assert_eq!(to_cents(12.34), 1234);
        assert_eq!(from_cents(1234), 12.34);
        assert_eq!(round2(2.675_000_1), 2.68);
    }
}

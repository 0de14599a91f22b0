use std::collections::HashMap;

use entity::{expense, expense_share};
use serde::Serialize;
use uuid::Uuid;

use crate::utils::split::{from_cents, to_cents};

/// Per-user position inside one activity. All sums are over two-decimal amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub user_id: Uuid,
    pub paid: f64,
    pub share: f64,
    pub balance: f64,
    pub owed_to_others: f64,
    pub owed_by_others: f64,
}

#[derive(Default)]
struct Tally {
    paid: i64,
    share: i64,
    owed_to_others: i64,
    owed_by_others: i64,
}

/// Folds expenses and their shares into balances. Current participants come first in the
/// given order, followed by anyone else who still appears in an expense.
pub fn compute_balances(
    participants: &[Uuid],
    expenses: &[(expense::Model, Vec<expense_share::Model>)],
) -> Vec<Balance> {
    let mut ledger = Ledger::new(participants);

    for (expense, shares) in expenses {
        ledger.entry(expense.paid_by).paid += to_cents(expense.amount);

        for share in shares {
            let cents = to_cents(share.amount);
            ledger.entry(share.user_id).share += cents;

            if !share.is_paid && share.user_id != expense.paid_by {
                ledger.entry(share.user_id).owed_to_others += cents;
                ledger.entry(expense.paid_by).owed_by_others += cents;
            }
        }
    }

    ledger.into_balances()
}

struct Ledger {
    order: Vec<Uuid>,
    tallies: HashMap<Uuid, Tally>,
}

impl Ledger {
    fn new(participants: &[Uuid]) -> Self {
        let mut ledger = Ledger { order: Vec::with_capacity(participants.len()), tallies: HashMap::new() };
        for id in participants {
            ledger.entry(*id);
        }
        ledger
    }

    fn entry(&mut self, user: Uuid) -> &mut Tally {
        let order = &mut self.order;
        self.tallies.entry(user).or_insert_with(|| {
            order.push(user);
            Tally::default()
        })
    }

    fn into_balances(mut self) -> Vec<Balance> {
        self.order
            .iter()
            .filter_map(|user_id| {
                let t = self.tallies.remove(user_id)?;
                Some(Balance {
                    user_id: *user_id,
                    paid: from_cents(t.paid),
                    share: from_cents(t.share),
                    balance: from_cents(t.paid - t.share),
                    owed_to_others: from_cents(t.owed_to_others),
                    owed_by_others: from_cents(t.owed_by_others),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn expense(paid_by: Uuid, amount: f64) -> expense::Model {
        expense::Model {
            id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            activity_id: Uuid::new_v4(),
            description: "dinner".to_string(),
            amount,
            paid_by,
            created_at: Utc::now(),
        }
    }

    fn share(expense: &expense::Model, user_id: Uuid, amount: f64, is_paid: bool) -> expense_share::Model {
        expense_share::Model {
            id: Uuid::new_v4(),
            expense_id: expense.id,
            user_id,
            percentage: 50.0,
            amount,
            is_paid,
            paid_at: None,
        }
    }

    #[test]
    fn payer_is_owed_the_unpaid_shares_of_others() {
        let (ana, ben) = (Uuid::new_v4(), Uuid::new_v4());
        let dinner = expense(ana, 60.0);
        let shares = vec![share(&dinner, ana, 30.0, true), share(&dinner, ben, 30.0, false)];

        let balances = compute_balances(&[ana, ben], &[(dinner, shares)]);

        assert_eq!(balances[0].user_id, ana);
        assert_eq!(balances[0].paid, 60.0);
        assert_eq!(balances[0].share, 30.0);
        assert_eq!(balances[0].balance, 30.0);
        assert_eq!(balances[0].owed_by_others, 30.0);
        assert_eq!(balances[1].balance, -30.0);
        assert_eq!(balances[1].owed_to_others, 30.0);
    }

    #[test]
    fn paid_shares_no_longer_count_as_debt() {
        let (ana, ben) = (Uuid::new_v4(), Uuid::new_v4());
        let taxi = expense(ben, 20.0);
        let shares = vec![share(&taxi, ana, 10.0, true), share(&taxi, ben, 10.0, true)];

        let balances = compute_balances(&[ana, ben], &[(taxi, shares)]);

        assert_eq!(balances[0].owed_to_others, 0.0);
        assert_eq!(balances[1].owed_by_others, 0.0);
        assert_eq!(balances[0].balance, -10.0);
        assert_eq!(balances[1].balance, 10.0);
    }

    #[test]
    fn former_participants_are_listed_after_current_ones() {
        let (ana, gone) = (Uuid::new_v4(), Uuid::new_v4());
        let hotel = expense(ana, 100.0);
        let shares = vec![share(&hotel, ana, 50.0, true), share(&hotel, gone, 50.0, false)];

        let balances = compute_balances(&[ana], &[(hotel, shares)]);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].user_id, gone);
        assert_eq!(balances[1].owed_to_others, 50.0);
    }

    #[test]
    fn participants_without_expenses_are_zeroed() {
        let ana = Uuid::new_v4();
        let balances = compute_balances(&[ana], &[]);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].balance, 0.0);
    }
}

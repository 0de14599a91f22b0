use entity::{expense, expense_share};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PercentageShare {
    pub user_id: Uuid,
    pub percentage: f64,
}

/// How an expense is divided. Serialized as `{"mode": "equal", ...}` or `{"mode": "percentage", ...}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SplitMethod {
    /// Omitting `participants` splits between every current participant.
    Equal {
        #[serde(default)]
        participants: Option<Vec<Uuid>>,
    },
    Percentage { shares: Vec<PercentageShare> },
}

impl Default for SplitMethod {
    fn default() -> Self {
        SplitMethod::Equal { participants: None }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct RExpenseCreate {
    pub task_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    #[validate(range(min = 0.01, max = 1000000000.0))]
    pub amount: f64,
    /// Defaults to the caller.
    pub paid_by: Option<Uuid>,
    #[serde(default)]
    pub split: SplitMethod,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RShareStatus {
    pub is_paid: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ExpenseRes {
    #[serde(flatten)]
    pub expense: expense::Model,
    pub shares: Vec<expense_share::Model>,
}

impl From<(expense::Model, Vec<expense_share::Model>)> for ExpenseRes {
    fn from((expense, shares): (expense::Model, Vec<expense_share::Model>)) -> Self {
        Self { expense, shares }
    }
}

//! Expense records and the draft submitted by the "new expense" form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Catalog, Category, EngineError, MoneyCents, ResultEngine};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One tracked spending transaction.
///
/// Records are immutable once built: the amount is never negative and the
/// category is always a catalog member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    id: String,
    amount: MoneyCents,
    category: Category,
    date: NaiveDate,
    description: String,
}

impl ExpenseRecord {
    pub fn new(
        id: impl Into<String>,
        amount: MoneyCents,
        category: Category,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> ResultEngine<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EngineError::InvalidExpense("empty id".to_string()));
        }
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "expense {id} has a negative amount"
            )));
        }
        Ok(Self {
            id,
            amount,
            category,
            date,
            description: description.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> MoneyCents {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Untrusted record as read from a dataset file.
#[derive(Debug, Deserialize)]
pub struct RawExpense {
    pub id: String,
    pub amount: serde_json::Number,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<RawExpense> for ExpenseRecord {
    type Error = EngineError;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        let amount = raw.amount.to_string().parse::<MoneyCents>()?;
        let category = raw.category.parse::<Category>()?;
        let date = parse_date(&raw.date)?;
        ExpenseRecord::new(raw.id, amount, category, date, raw.description)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(value.to_string()))
}

/// Input of the "new expense" form, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExpenseDraft {
    pub amount: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// A validated draft, ready to be handed to whatever persists expenses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewExpense {
    pub amount: MoneyCents,
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
}

impl ExpenseDraft {
    /// Validates the draft the way the form does: a positive amount with at
    /// most two decimals, a non-blank description and a catalog category.
    /// A missing date means `today`.
    ///
    /// The amount goes through [`MoneyCents`] parsing, so `12,50` and `$12`
    /// are accepted while thousands separators (`1,234.50`) are not.
    pub fn validate(&self, catalog: &Catalog, today: NaiveDate) -> ResultEngine<NewExpense> {
        let amount = self.amount.parse::<MoneyCents>()?;
        if amount.cents() <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(EngineError::InvalidExpense(
                "description is required".to_string(),
            ));
        }

        let category = match self.category.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => catalog.parse(value)?,
            _ => {
                return Err(EngineError::InvalidExpense(
                    "category is required".to_string(),
                ));
            }
        };

        let date = match self.date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => parse_date(value)?,
            _ => today,
        };

        Ok(NewExpense {
            amount,
            category,
            date,
            description: description.to_string(),
        })
    }
}

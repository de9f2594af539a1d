//! Request and response bodies exchanged with the pages and the
//! authentication backend.
//!
//! Amounts travel as integer cents (`*_cents`) next to a preformatted string,
//! so a renderer never has to do money arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod auth {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: u64,
        pub name: String,
        pub email: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: User,
    }

    /// Form posted by the login page.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginForm {
        pub email: String,
        pub password: String,
        /// Where to go after a successful login.
        pub redirect: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginPage {
        pub redirect: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LoginQuery {
        pub redirect: Option<String>,
    }
}

pub mod category {
    use super::*;

    /// A catalog entry with its presentation attributes.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub value: String,
        pub label: String,
        pub icon: String,
        pub color: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryStatsView {
        pub value: String,
        pub label: String,
        pub icon: String,
        pub color: String,
        pub expense_count: usize,
        pub total_cents: i64,
        pub total: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryListParams {
        pub search: Option<String>,
        /// `name`, `count` or `amount`.
        pub sort: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryStatsView>,
        pub category_count: usize,
        pub expense_count: usize,
        pub total_cents: i64,
        pub total: String,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub amount_cents: i64,
        pub amount: String,
        pub category: String,
        pub category_label: String,
        pub date: NaiveDate,
        /// "Today", "Yesterday", "3 days ago" or a short date.
        pub date_label: String,
        pub description: String,
    }

    /// Query string of the expense list and its CSV export.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseListParams {
        pub search: Option<String>,
        /// A category value or `all`.
        pub category: Option<String>,
        /// `all`, `7d`, `30d` or `90d`.
        pub window: Option<String>,
        /// `date`, `amount`, `category` or `description`.
        pub sort: Option<String>,
        /// `asc` or `desc`.
        pub dir: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
        pub count: usize,
        pub total_cents: i64,
        pub total: String,
    }

    /// Model of the "new expense" page.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseForm {
        pub categories: Vec<super::category::CategoryView>,
        pub today: NaiveDate,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(default)]
        pub amount: String,
        #[serde(default)]
        pub description: String,
        pub category: Option<String>,
        /// `YYYY-MM-DD`; today when missing.
        pub date: Option<String>,
    }
}

pub mod dashboard {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklyView {
        pub week_start: NaiveDate,
        /// "Feb 9"
        pub week_label: String,
        /// Category label to cents, only for categories with spending.
        pub amounts_cents: BTreeMap<String, i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        /// "February 2025"
        pub month_label: String,
        pub total_cents: i64,
        pub total: String,
        /// Percent change against the previous month; absent when that month
        /// had no spending.
        pub total_trend: Option<f64>,
        pub transaction_count: usize,
        pub transaction_trend: Option<f64>,
        pub most_expensive: Option<super::category::CategoryStatsView>,
        pub average_daily_cents: i64,
        pub average_daily: String,
        pub breakdown: Vec<super::category::CategoryStatsView>,
        pub weekly: Vec<WeeklyView>,
        pub recent: Vec<super::expense::ExpenseView>,
    }
}

pub mod landing {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Landing {
        pub name: String,
        pub links: Vec<String>,
    }
}

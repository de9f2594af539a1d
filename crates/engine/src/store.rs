//! Read-only expense collection.

use std::{collections::HashSet, path::Path};

use crate::{
    Catalog, Category, EngineError, ExpenseRecord, MoneyCents, ResultEngine,
    aggregation::total_amount,
    expense::{RawExpense, parse_date},
};

/// Seed data shown when no dataset is configured.
const MOCK_EXPENSES: [(&str, i64, Category, &str, &str); 10] = [
    ("1", 12550, Category::Food, "2025-02-11", "Grocery shopping at Whole Foods"),
    ("2", 2400, Category::Transport, "2025-02-11", "Uber ride to downtown"),
    ("3", 1599, Category::Entertainment, "2025-02-10", "Netflix subscription"),
    ("4", 550, Category::Food, "2025-02-10", "Morning coffee"),
    ("5", 3299, Category::Shopping, "2025-02-09", "Book purchase - Design patterns"),
    ("6", 8900, Category::Bills, "2025-02-08", "Electric bill"),
    ("7", 4500, Category::Healthcare, "2025-02-07", "Pharmacy - vitamins"),
    ("8", 1200, Category::Food, "2025-02-07", "Lunch at cafe"),
    ("9", 25000, Category::Education, "2025-02-05", "Online course subscription"),
    ("10", 18000, Category::Travel, "2025-02-04", "Hotel booking"),
];

/// Immutable list of expenses plus the catalog they are validated against.
#[derive(Clone, Debug)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
    catalog: Catalog,
}

impl ExpenseStore {
    /// Builds a store, checking that ids are unique, every category is
    /// listed in `catalog` and the amounts add up without overflowing.
    /// Amounts are non-negative, so every subset total fits as well.
    pub fn new(records: Vec<ExpenseRecord>, catalog: Catalog) -> ResultEngine<Self> {
        let mut ids = HashSet::with_capacity(records.len());
        for record in &records {
            if !ids.insert(record.id()) {
                return Err(EngineError::Dataset(format!(
                    "duplicate expense id \"{}\"",
                    record.id()
                )));
            }
            if !catalog.contains(record.category()) {
                return Err(EngineError::UnknownCategory(
                    record.category().value().to_string(),
                ));
            }
        }
        total_amount(&records)?;
        Ok(Self { records, catalog })
    }

    /// The built-in sample dataset with the standard catalog.
    pub fn mock() -> ResultEngine<Self> {
        let records = MOCK_EXPENSES
            .iter()
            .map(|(id, cents, category, date, description)| {
                ExpenseRecord::new(
                    *id,
                    MoneyCents::new(*cents),
                    *category,
                    parse_date(date)?,
                    *description,
                )
            })
            .collect::<ResultEngine<Vec<_>>>()?;
        Self::new(records, Catalog::standard())
    }

    /// Parses a JSON array of expenses.
    pub fn from_json_str(json: &str, catalog: Catalog) -> ResultEngine<Self> {
        let raw: Vec<RawExpense> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(ExpenseRecord::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Self::new(records, catalog)
    }

    /// Loads a JSON dataset from disk.
    pub fn load(path: impl AsRef<Path>, catalog: Catalog) -> ResultEngine<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&json, catalog)?;
        tracing::info!(
            "loaded {} expenses from {}",
            store.records.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Category catalog.
//!
//! Every expense belongs to exactly one [`Category`]. The [`Catalog`] pairs each
//! category with its display label and fixes the order used by "all
//! categories" views.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// Canonical value used in URLs, datasets and forms.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }

    /// Label shown to users by the standard catalog.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Icon name in the lucide icon set.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Category::Food => "utensils",
            Category::Transport => "car",
            Category::Shopping => "shopping-bag",
            Category::Entertainment => "film",
            Category::Bills => "zap",
            Category::Healthcare => "heart-pulse",
            Category::Education => "graduation-cap",
            Category::Travel => "plane",
            Category::Other => "circle-dollar-sign",
        }
    }

    /// Chart colour as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Category::Food => "#6366f1",
            Category::Transport => "#8b5cf6",
            Category::Shopping => "#06b6d4",
            Category::Entertainment => "#10b981",
            Category::Bills => "#f59e0b",
            Category::Healthcare => "#ec4899",
            Category::Education => "#14b8a6",
            Category::Travel => "#f97316",
            Category::Other => "#64748b",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.value() == s)
            .ok_or_else(|| EngineError::UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub category: Category,
    pub label: String,
}

/// Ordered set of categories with their labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The nine categories in their canonical order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: Category::ALL
                .into_iter()
                .map(|category| CatalogEntry {
                    category,
                    label: category.default_label().to_string(),
                })
                .collect(),
        }
    }

    /// Builds a catalog from `entries`, keeping their order.
    ///
    /// Fails when a category appears twice.
    pub fn new(entries: Vec<CatalogEntry>) -> ResultEngine<Self> {
        for (idx, entry) in entries.iter().enumerate() {
            if entries[..idx].iter().any(|e| e.category == entry.category) {
                return Err(EngineError::InvalidCatalog(format!(
                    "duplicate category \"{}\"",
                    entry.category
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.position(category).is_some()
    }

    pub(crate) fn position(&self, category: Category) -> Option<usize> {
        self.entries.iter().position(|e| e.category == category)
    }

    /// Label for `category`, failing when the catalog does not list it.
    pub fn label(&self, category: Category) -> ResultEngine<&str> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.label.as_str())
            .ok_or_else(|| EngineError::UnknownCategory(category.value().to_string()))
    }

    /// Label for `category`, falling back to its raw value.
    pub fn label_or_value(&self, category: Category) -> &str {
        self.label(category).unwrap_or(category.value())
    }

    /// Resolves a raw value against this catalog.
    pub fn parse(&self, value: &str) -> ResultEngine<Category> {
        let category = value.parse::<Category>()?;
        if !self.contains(category) {
            return Err(EngineError::UnknownCategory(value.to_string()));
        }
        Ok(category)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

use rust_decimal::Decimal;

use super::schema::{CategorySpec, Schema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAmounts {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl CategoryAmounts {
    fn zeroed(spec: &CategorySpec) -> Self {
        Self {
            name: spec.name.to_string(),
            entries: spec
                .entries
                .iter()
                .map(|e| Entry {
                    name: e.name.to_string(),
                    amount: Decimal::ZERO,
                })
                .collect(),
        }
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub(crate) fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }
}

/// Current cumulative amount per subcategory, in schema order.
///
/// The shape always mirrors the [`Schema`] it was built from; only amounts
/// change. Colors are looked up on the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub categories: Vec<CategoryAmounts>,
}

impl State {
    /// All-zero state shaped like `schema`.
    pub fn new(schema: &Schema) -> Self {
        Self {
            categories: schema.categories.iter().map(CategoryAmounts::zeroed).collect(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategoryAmounts> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Amount of `entry` inside `category`, if both exist.
    pub fn amount(&self, category: &str, entry: &str) -> Option<Decimal> {
        self.category(category)?.entry(entry).map(|e| e.amount)
    }

    /// Amount of the first subcategory called `entry`, in any category.
    #[cfg(test)]
    pub fn amount_of(&self, entry: &str) -> Option<Decimal> {
        self.categories
            .iter()
            .find_map(|c| c.entry(entry))
            .map(|e| e.amount)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter().map(move |e| (c.name.as_str(), e)))
    }

    /// True if the category and subcategory names equal the schema's at
    /// every level, ignoring order.
    pub fn has_shape_of(&self, schema: &Schema) -> bool {
        self.categories.len() == schema.categories.len()
            && schema.categories.iter().all(|spec| {
                self.category(spec.name).is_some_and(|c| {
                    c.entries.len() == spec.entries.len()
                        && spec.entries.iter().all(|e| c.entry(e.name).is_some())
                })
            })
    }
}

use rust_decimal::Decimal;

use crate::models::{
    round_percent, CategoryAmounts, HexColor, Schema, State, PLACEHOLDER_COLOR,
    PLACEHOLDER_LABEL,
};

/// One row of the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Share of the grand total, 0–100, two decimal places.
    pub percentage: Decimal,
}

/// A labeled, colored dataset handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    pub colors: Vec<HexColor>,
}

impl Series {
    pub fn segments(&self) -> impl Iterator<Item = (&str, Decimal, HexColor)> {
        self.labels
            .iter()
            .zip(&self.values)
            .zip(&self.colors)
            .map(|((l, v), c)| (l.as_str(), *v, *c))
    }
}

/// Outer ring keyed by category (percentages), inner ring keyed by
/// subcategory (raw amounts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub categories: Series,
    pub subcategories: Series,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartData {
    /// Every total is zero: draw the single gray placeholder segment.
    Placeholder(Series),
    Breakdown(ChartSeries),
}

#[cfg(test)]
impl ChartData {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

pub fn subcategory_total(category: &CategoryAmounts) -> Decimal {
    category.entries.iter().map(|e| e.amount).sum()
}

/// Sum of every amount. Ledger updates and decoding refuse states whose
/// total would overflow, so this never panics on a state they produced.
pub fn grand_total(state: &State) -> Decimal {
    state.categories.iter().map(subcategory_total).sum()
}

/// `None` if the amounts of `state` do not add up within `Decimal` range.
pub fn checked_grand_total(state: &State) -> Option<Decimal> {
    state
        .entries()
        .try_fold(Decimal::ZERO, |acc, (_, e)| acc.checked_add(e.amount))
}

/// Per-category totals and percentage shares, in state (schema) order.
/// A zero grand total yields 0% everywhere.
pub fn rollup(state: &State) -> Vec<CategoryShare> {
    let grand = grand_total(state);
    state
        .categories
        .iter()
        .map(|c| {
            let total = subcategory_total(c);
            let percentage = if grand > Decimal::ZERO {
                round_percent(total / grand * Decimal::ONE_HUNDRED)
            } else {
                Decimal::ZERO
            };
            CategoryShare {
                category: c.name.clone(),
                total,
                percentage,
            }
        })
        .collect()
}

pub fn is_empty(rollup: &[CategoryShare]) -> bool {
    rollup.iter().all(|share| share.total.is_zero())
}

pub fn placeholder_series() -> Series {
    Series {
        label: PLACEHOLDER_LABEL,
        labels: vec![PLACEHOLDER_LABEL.to_string()],
        values: vec![Decimal::ONE],
        colors: vec![PLACEHOLDER_COLOR],
    }
}

/// Build both rings. Only meaningful when `!is_empty(rollup)`; use
/// [`chart`] to get the placeholder handling for free.
pub fn build_series(schema: &Schema, state: &State, rollup: &[CategoryShare]) -> ChartSeries {
    let category_color = |name: &str| {
        schema
            .category(name)
            .map_or(PLACEHOLDER_COLOR, |spec| spec.color)
    };

    let categories = Series {
        label: "Categories",
        labels: rollup.iter().map(|s| s.category.clone()).collect(),
        values: rollup.iter().map(|s| s.percentage).collect(),
        colors: rollup.iter().map(|s| category_color(&s.category)).collect(),
    };

    let mut subcategories = Series {
        label: "Subcategories",
        labels: Vec::new(),
        values: Vec::new(),
        colors: Vec::new(),
    };
    for (category, entry) in state.entries() {
        let color = schema
            .category(category)
            .and_then(|spec| spec.entry(&entry.name))
            .map_or(PLACEHOLDER_COLOR, |spec| spec.color);
        subcategories.labels.push(entry.name.clone());
        subcategories.values.push(entry.amount);
        subcategories.colors.push(color);
    }

    ChartSeries {
        categories,
        subcategories,
    }
}

/// What the renderer should draw for `state`.
pub fn chart(schema: &Schema, state: &State) -> ChartData {
    let shares = rollup(state);
    if is_empty(&shares) {
        ChartData::Placeholder(placeholder_series())
    } else {
        ChartData::Breakdown(build_series(schema, state, &shares))
    }
}

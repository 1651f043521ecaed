/// A `#RRGGBB` display color. Colors are presentation data and live only on
/// the schema, never on [`State`](super::State).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub &'static str);

impl HexColor {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Parse into red, green and blue channels. `None` if the value is not
    /// a six-digit hex color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpec {
    pub name: &'static str,
    pub color: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: &'static str,
    pub color: HexColor,
    pub entries: &'static [EntrySpec],
}

impl CategorySpec {
    pub fn entry(&self, name: &str) -> Option<&EntrySpec> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// The fixed category hierarchy. Doubles as the initial state and as the
/// template imported documents are validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub categories: &'static [CategorySpec],
}

macro_rules! entry {
    ($name:expr, $color:expr) => {
        EntrySpec {
            name: $name,
            color: HexColor($color),
        }
    };
}

pub static DEFAULT_SCHEMA: Schema = Schema {
    categories: &[
        CategorySpec {
            name: "Essentials",
            color: HexColor("#1D3557"),
            entries: &[
                entry!("Housing", "#374E70"),
                entry!("Utilities", "#50688A"),
                entry!("Groceries", "#6A82A4"),
                entry!("Transport", "#839BBD"),
                entry!("Health", "#9CB4D6"),
            ],
        },
        CategorySpec {
            name: "Luxury",
            color: HexColor("#6A040F"),
            entries: &[
                entry!("Food", "#8B1C28"),
                entry!("Entertainment", "#A83642"),
                entry!("Shopping", "#C64F5B"),
            ],
        },
        CategorySpec {
            name: "Growth",
            color: HexColor("#1B4332"),
            entries: &[
                entry!("Savings", "#33594A"),
                entry!("Investment", "#4D7563"),
                entry!("Education", "#68817C"),
            ],
        },
    ],
};

/// Placeholder segment shown when every amount is zero.
pub const PLACEHOLDER_LABEL: &str = "No data";
pub const PLACEHOLDER_COLOR: HexColor = HexColor("#8c8c8c");

impl Schema {
    pub fn category(&self, name: &str) -> Option<&'static CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Every category containing a subcategory called `entry_name`.
    pub fn locate(&self, entry_name: &str) -> Vec<&'static CategorySpec> {
        self.categories
            .iter()
            .filter(|c| c.entry(entry_name).is_some())
            .collect()
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &'static str> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter().map(|e| e.name))
    }

    /// Subcategory names that appear in more than one category, sorted.
    pub fn duplicate_entry_names(&self) -> Vec<&'static str> {
        let mut seen = std::collections::BTreeMap::new();
        for name in self.entry_names() {
            *seen.entry(name).or_insert(0usize) += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }
}

mod money;
mod schema;
mod state;

pub use money::{floor_cents, parse_delta, parse_number, round_percent};
#[cfg(test)]
pub use schema::EntrySpec;
pub use schema::{
    CategorySpec, HexColor, Schema, DEFAULT_SCHEMA, PLACEHOLDER_COLOR, PLACEHOLDER_LABEL,
};
pub use state::{CategoryAmounts, Entry, State};

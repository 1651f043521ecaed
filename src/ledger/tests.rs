#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{CategorySpec, EntrySpec, HexColor, Schema, DEFAULT_SCHEMA};
use crate::rollup;

fn fresh() -> State {
    State::new(&DEFAULT_SCHEMA)
}

// ── Applying deltas ───────────────────────────────────────────

#[test]
fn test_add_truncates_to_cents() {
    let mut state = fresh();
    let outcome = apply_delta(&mut state, "Groceries", dec!(42.567));
    assert_eq!(
        outcome,
        ApplyOutcome::Applied {
            category: "Essentials".into(),
            amount: dec!(42.56),
        }
    );

    let rows = rollup::rollup(&state);
    assert_eq!(rollup::grand_total(&state), dec!(42.56));
    assert_eq!(rows[0].category, "Essentials");
    assert_eq!(rows[0].total, dec!(42.56));
    assert_eq!(rows[0].percentage, dec!(100.00));
}

#[test]
fn test_subtract_clamps_at_zero() {
    let mut state = fresh();
    apply_delta(&mut state, "Groceries", dec!(42.567));
    let outcome = apply_delta(&mut state, "Groceries", dec!(-100));
    assert_eq!(
        outcome,
        ApplyOutcome::Applied {
            category: "Essentials".into(),
            amount: Decimal::ZERO,
        }
    );
    assert_eq!(state.amount_of("Groceries"), Some(Decimal::ZERO));
}

#[test]
fn test_negative_delta_floors_away_from_zero() {
    let mut state = fresh();
    apply_delta(&mut state, "Food", dec!(1));
    apply_delta(&mut state, "Food", dec!(-0.011));
    assert_eq!(state.amount_of("Food"), Some(dec!(0.98)));
}

#[test]
fn test_deltas_accumulate() {
    let mut state = fresh();
    apply_delta(&mut state, "Savings", dec!(10));
    apply_delta(&mut state, "Savings", dec!(2.5));
    apply_delta(&mut state, "Savings", dec!(-0.5));
    assert_eq!(state.amount_of("Savings"), Some(dec!(12)));
}

#[test]
fn test_amounts_never_go_negative() {
    let mut state = fresh();
    let names: Vec<&str> = DEFAULT_SCHEMA.entry_names().collect();
    let deltas = [
        dec!(5), dec!(-7.129), dec!(0.001), dec!(-0.001), dec!(3.333), dec!(-1000), dec!(12.34),
    ];
    for (i, delta) in deltas.iter().enumerate() {
        let name = names[i % names.len()];
        apply_delta(&mut state, name, *delta);
        assert!(state.entries().all(|(_, e)| e.amount >= Decimal::ZERO));
    }
    assert!(state.has_shape_of(&DEFAULT_SCHEMA));
}

#[test]
fn test_unknown_subcategory_is_noop() {
    let mut state = fresh();
    let outcome = apply_delta(&mut state, "Yachts", dec!(100));
    assert_eq!(outcome, ApplyOutcome::UnknownSubcategory);
    assert!(!outcome.changed());
    assert_eq!(state, fresh());
}

#[test]
fn test_overflow_is_noop() {
    let mut state = fresh();
    apply_delta(&mut state, "Health", Decimal::MAX);
    let before = state.clone();
    assert_eq!(apply_delta(&mut state, "Health", Decimal::MAX), ApplyOutcome::Overflow);
    assert_eq!(state, before);
}

#[test]
fn test_grand_total_overflow_is_noop() {
    let mut state = fresh();
    let big = Decimal::from_scientific("4e28").unwrap();
    assert!(apply_delta(&mut state, "Housing", big).changed());
    let before = state.clone();

    assert_eq!(apply_delta(&mut state, "Savings", big), ApplyOutcome::Overflow);
    assert_eq!(state, before);
    assert_eq!(rollup::grand_total(&state), big);

    // the same subcategory can still grow while the total fits
    assert!(apply_delta(&mut state, "Housing", big / dec!(4)).changed());
    assert!(apply_delta(&mut state, "Savings", dec!(1)).changed());
}

#[test]
fn test_ambiguous_name_is_declined() {
    static DUPLICATED: Schema = Schema {
        categories: &[
            CategorySpec {
                name: "A",
                color: HexColor("#000000"),
                entries: &[EntrySpec { name: "Misc", color: HexColor("#111111") }],
            },
            CategorySpec {
                name: "B",
                color: HexColor("#000000"),
                entries: &[EntrySpec { name: "Misc", color: HexColor("#222222") }],
            },
        ],
    };
    let mut state = State::new(&DUPLICATED);
    let outcome = apply_delta(&mut state, "Misc", dec!(5));
    assert_eq!(outcome, ApplyOutcome::Ambiguous(vec!["A".into(), "B".into()]));
    assert_eq!(state, State::new(&DUPLICATED));
}

// ── Raw input ─────────────────────────────────────────────────

#[test]
fn test_apply_input_parses_prefix() {
    let mut state = fresh();
    assert!(apply_input(&mut state, "Transport", "  12abc").changed());
    assert!(apply_input(&mut state, "Transport", "1e1").changed());
    assert_eq!(state.amount_of("Transport"), Some(dec!(22)));
}

#[test]
fn test_apply_input_rejects_garbage() {
    let mut state = fresh();
    for raw in ["", "abc", "Infinity", "-", "."] {
        assert_eq!(apply_input(&mut state, "Transport", raw), ApplyOutcome::InvalidInput);
    }
    assert_eq!(state, fresh());
}

use calclab::bank::{ExampleBank, BUILTIN_EXAMPLES};
use calclab::analyze;

#[test]
fn every_builtin_example_analyzes() {
    for raw in BUILTIN_EXAMPLES {
        // Individual fields may fail (no elementary antiderivative, domain
        // issues over the interval) but parsing must always succeed.
        assert!(analyze(raw, 0.25, 0.75).is_ok(), "{raw}");
    }
}

#[test]
fn picks_are_deterministic_per_seed() {
    let bank = ExampleBank::builtin();
    assert_eq!(bank.pick(42, 4), bank.pick(42, 4));
    assert_eq!(bank.pick(42, 4).len(), 4);
}

#[test]
fn different_seeds_shuffle_differently() {
    let bank = ExampleBank::builtin();
    // Two seeds agreeing on a full 15-element order would need a collision
    // across 15! permutations.
    assert_ne!(bank.pick(42, bank.len()), bank.pick(43, bank.len()));
}

#[test]
fn pick_is_capped_at_the_bank_size() {
    let bank = ExampleBank::builtin();
    let all = bank.pick(7, 100);
    assert_eq!(all.len(), bank.len());
    for entry in &all {
        assert!(bank.entries().contains(entry), "{entry}");
    }
}

#[test]
fn empty_banks_yield_nothing() {
    let bank = ExampleBank::new(Vec::new());
    assert!(bank.is_empty());
    assert!(bank.pick(1, 3).is_empty());
}

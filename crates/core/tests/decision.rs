mod common;

use common::digit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roundvote_core::domain::decision::{Decision, DecisionRule, decide, most_frequent};
use roundvote_core::domain::digit::{Label, Outcome};

fn digits(ns: &[u8]) -> Vec<roundvote_core::domain::digit::Digit> {
    ns.iter().map(|n| digit(*n)).collect()
}

#[test]
fn three_big_digits_are_unanimous() {
    let d = decide(&digits(&[7, 8, 9]), 0.5);
    assert_eq!(
        d,
        Decision::Decided {
            outcome: Outcome::Label(Label::Big),
            rule: DecisionRule::UnanimousThree
        }
    );
}

#[test]
fn three_small_digits_are_unanimous() {
    let d = decide(&digits(&[0, 1, 2]), 0.5);
    assert_eq!(
        d,
        Decision::Decided {
            outcome: Outcome::Label(Label::Small),
            rule: DecisionRule::UnanimousThree
        }
    );
}

#[test]
fn majority_of_big_votes_wins() {
    let d = decide(&digits(&[5, 5, 1]), 0.5);
    assert_eq!(
        d,
        Decision::Decided {
            outcome: Outcome::Label(Label::Big),
            rule: DecisionRule::Majority
        }
    );
}

#[test]
fn single_digit_is_a_majority_of_one() {
    assert_eq!(decide(&digits(&[4]), 0.5).outcome(), Outcome::Label(Label::Small));
    assert_eq!(decide(&digits(&[6, 6]), 0.5).outcome(), Outcome::Label(Label::Big));
}

#[test]
fn four_unanimous_digits_fall_to_majority() {
    let d = decide(&digits(&[5, 6, 7, 8]), 0.5);
    assert_eq!(
        d,
        Decision::Decided {
            outcome: Outcome::Label(Label::Big),
            rule: DecisionRule::Majority
        }
    );
}

#[test]
fn tied_votes_with_distinct_digits_pick_one_of_them() {
    let input = digits(&[5, 1]);
    for rand01 in [0.0, 0.25, 0.49, 0.5, 0.75, 0.999] {
        let d = decide(&input, rand01);
        match d {
            Decision::Decided {
                outcome: Outcome::Digit(x),
                rule: DecisionRule::FrequencyTieBreak,
            } => assert!(input.contains(&x), "{x} not among inputs"),
            other => panic!("unexpected decision {other:?}"),
        }
    }
}

#[test]
fn tie_break_is_controlled_by_the_random_draw() {
    let input = digits(&[5, 1]);
    // candidates are ordered ascending: [1, 5]
    assert_eq!(decide(&input, 0.0).outcome(), Outcome::Digit(digit(1)));
    assert_eq!(decide(&input, 0.7).outcome(), Outcome::Digit(digit(5)));
    assert_eq!(decide(&input, 1.0).outcome(), Outcome::Digit(digit(5)));

    let four = digits(&[7, 2, 6, 1]);
    assert_eq!(decide(&four, 0.5).outcome(), Outcome::Digit(digit(6)));
}

#[test]
fn tied_votes_with_a_repeated_digit_pick_that_digit() {
    let d = decide(&digits(&[3, 8, 3, 9]), 0.9);
    assert_eq!(
        d,
        Decision::Decided {
            outcome: Outcome::Digit(digit(3)),
            rule: DecisionRule::Frequency
        }
    );
}

#[test]
fn most_frequent_lists_every_top_digit() {
    assert_eq!(most_frequent(&digits(&[4, 9, 4, 9, 1])), digits(&[4, 9]));
    assert_eq!(most_frequent(&digits(&[2])), digits(&[2]));
}

#[test]
fn empty_round_falls_back_to_the_random_draw() {
    assert_eq!(decide(&[], 0.0), Decision::Fallback(digit(0)));
    assert_eq!(decide(&[], 0.35), Decision::Fallback(digit(3)));
    assert_eq!(decide(&[], 0.999_999), Decision::Fallback(digit(9)));
    assert!(decide(&[], 0.5).is_fallback());
}

#[test]
fn empty_round_fallback_is_roughly_uniform() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let trials = 20_000;
    let mut counts = [0usize; 10];
    for _ in 0..trials {
        match decide(&[], rng.random::<f64>()) {
            Decision::Fallback(d) => counts[d.value() as usize] += 1,
            other => panic!("expected fallback, got {other:?}"),
        }
    }
    let expected = trials / 10;
    for (value, n) in counts.iter().enumerate() {
        assert!(
            n.abs_diff(expected) < expected / 5,
            "digit {value} drawn {n} times, expected about {expected}"
        );
    }
}

#[tokio::test]
async fn seeded_generator_replays_the_same_fallbacks() {
    use roundvote_core::infra::random::MutexRng;
    use roundvote_core::ports::random::RandomSource;

    let a = MutexRng::seeded(42);
    let b = MutexRng::seeded(42);
    for _ in 0..16 {
        let (x, y) = (a.next_f64().await, b.next_f64().await);
        assert!((0.0..1.0).contains(&x));
        assert_eq!(decide(&[], x), decide(&[], y));
    }
}

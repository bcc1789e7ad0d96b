//! Property tests: unbound variables are reported exactly, ignoring case.

use calcbook::{evaluate, Error, Table};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

const NAMES: [&str; 5] = ["alpha", "beta", "gamma", "delta", "eps"];

/// Spell `name` with an uppercase mask over its letters
fn spell(name: &str, mask: u8) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 8)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn missing_lists_exactly_the_unbound(
        used in proptest::sample::subsequence((0..NAMES.len()).collect::<Vec<_>>(), 1..=NAMES.len()),
        bound in proptest::collection::vec(any::<bool>(), NAMES.len()),
        masks in proptest::collection::vec(any::<u8>(), NAMES.len() * 2),
    ) {
        let terms: Vec<String> = used.iter().map(|&i| spell(NAMES[i], masks[i])).collect();
        let formula = format!("Total = {}", terms.join(" + "));

        let entries: Vec<String> = (0..NAMES.len())
            .filter(|&i| bound[i])
            .map(|i| format!("'{}': {}", spell(NAMES[i], masks[NAMES.len() + i]), i + 1))
            .collect();
        let inputs = format!("{{{}}}", entries.join(", "));

        let expected: Vec<String> = used
            .iter()
            .filter(|&&i| !bound[i])
            .map(|&i| NAMES[i].to_string())
            .collect();

        match evaluate(&formula, &inputs, &Table::new()) {
            Ok(eval) => {
                prop_assert!(expected.is_empty());
                let sum: usize = used.iter().map(|&i| i + 1).sum();
                prop_assert_eq!(eval.result, sum as f64);
                prop_assert_eq!(eval.variables.len(), used.len());
            }
            Err(Error::MissingVariables(missing)) => prop_assert_eq!(missing, expected),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

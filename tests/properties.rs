//! Property-based tests for tree growth and prediction.
//!
//! Streams are generated by proptest; every property must hold after any
//! sequence of updates.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use rusty_hoeffding::data::{features, FeatureValue, Features, Prediction, Target};
use rusty_hoeffding::trees::{HoeffdingTree, TreeParams};

const CATEGORIES: [&str; 4] = ["red", "green", "blue", "black"];

/// Grid values, values packed within a millionth of zero, and non-finite values.
fn arb_numeric() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (0u8..20).prop_map(|x| x as f64 / 2.0),
        2 => -1e-6f64..1e-6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn arb_example() -> impl Strategy<Value = (Features, u8)> {
    (
        arb_numeric(),
        arb_numeric(),
        0usize..CATEGORIES.len(),
        0u8..3,
    )
        .prop_map(|(x, w, category, class)| {
            let features = features([
                ("x", FeatureValue::Numeric(x)),
                ("w", FeatureValue::Numeric(w)),
                ("color", FeatureValue::from(CATEGORIES[category])),
            ]);
            (features, class)
        })
}

fn arb_params() -> impl Strategy<Value = TreeParams> {
    (1u64..20, 0usize..5, 0.01f64..0.99, 0.0f64..0.2).prop_map(
        |(patience, max_depth, confidence, tie_threshold)| {
            let mut params = TreeParams::new();
            params.set_patience(patience).unwrap();
            params.set_max_depth(Some(max_depth)).unwrap();
            params.set_confidence(confidence).unwrap();
            params.set_tie_threshold(tie_threshold).unwrap();
            params
        },
    )
}

fn grow(params: TreeParams, stream: &[(Features, u8)]) -> HoeffdingTree<u8> {
    let mut tree = HoeffdingTree::classifier(params).unwrap();
    for (features, class) in stream {
        tree.learn_one(features, &Target::Class(*class)).unwrap();
    }
    tree
}

fn assert_distribution(probas: &std::collections::HashMap<u8, f64>) {
    assert!(probas.values().all(|p| *p >= 0.0 && p.is_finite()));
    let total = probas.values().sum::<f64>();
    assert!((total - 1.0).abs() < 1e-9, "sums to {}", total);
}

proptest! {
    #[test]
    fn size_counts_reachable_leaves(
        params in arb_params(),
        stream in prop_vec(arb_example(), 1..300),
    ) {
        let tree = grow(params, &stream);
        let leaves = tree.root().leaves();
        prop_assert_eq!(tree.size(), leaves.len());

        for (features, _) in &stream {
            let leaf = tree.get_leaf(features);
            prop_assert!(leaves.iter().any(|other| std::ptr::eq(*other, leaf)));
        }
        for leaf in &leaves {
            prop_assert!(leaf.depth() <= tree.params().max_depth().unwrap_or(usize::MAX));
        }
    }

    #[test]
    fn predictions_are_distributions(
        params in arb_params(),
        stream in prop_vec(arb_example(), 1..300),
        query in arb_example(),
    ) {
        let tree = grow(params, &stream);
        let (query, _) = query;
        let leaf = tree.get_leaf(&query);

        let Prediction::Probabilities(probas) = tree.predict_one(&query) else {
            panic!("a classifier predicts probabilities");
        };
        let naive_bayes = tree.predict_naive_bayes(&query).unwrap();
        if leaf.n_samples() == 0 {
            prop_assert!(probas.is_empty());
            prop_assert!(naive_bayes.is_empty());
        } else {
            assert_distribution(&probas);
            assert_distribution(&naive_bayes);
        }
    }

    #[test]
    fn naive_bayes_tolerates_unseen_values(
        params in arb_params(),
        stream in prop_vec(arb_example(), 1..100),
    ) {
        let tree = grow(params, &stream);
        let query = features([
            ("x", FeatureValue::Numeric(-100.0)),
            ("color", FeatureValue::from("purple")),
            ("unseen", FeatureValue::Numeric(1.0)),
        ]);
        let naive_bayes = tree.predict_naive_bayes(&query).unwrap();
        if tree.get_leaf(&query).n_samples() > 0 {
            assert_distribution(&naive_bayes);
        }
    }

    #[test]
    fn reads_are_idempotent(
        params in arb_params(),
        stream in prop_vec(arb_example(), 1..200),
        query in arb_example(),
    ) {
        let tree = grow(params, &stream);
        let (query, _) = query;
        prop_assert!(std::ptr::eq(tree.get_leaf(&query), tree.get_leaf(&query)));
        prop_assert_eq!(tree.predict_one(&query), tree.predict_one(&query));
    }

    #[test]
    fn leaf_counts_sum_to_stream_length(
        stream in prop_vec(arb_example(), 1..300),
    ) {
        let mut params = TreeParams::new();
        params.set_patience(1_000).unwrap();
        let tree = grow(params, &stream);
        prop_assert_eq!(tree.n_samples(), stream.len() as u64);
        prop_assert_eq!(tree.get_leaf(&Features::new()).n_samples(), stream.len() as u64);
    }
}

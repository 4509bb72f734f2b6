//! Property-based tests for the netmix core
//!
//! Core properties tested:
//! 1. Responsibilities stay in [0, 1] and agree with the log-likelihood ratio
//! 2. Threshold indices never leave [0, total]
//! 3. The connectivity filter is idempotent and order preserving
//! 4. Subsets only contain scored nodes in ranking order
//! 5. Empirical p-values lie in [0, 1]
//! 6. EM keeps alpha in [0, 1] on arbitrary finite samples

use netmix::connectivity::restrict;
use netmix::mixture::{self, EmConfig, MixtureModel};
use netmix::progress::Silent;
use netmix::significance::summarize;
use netmix::subset::{positive_subset, rank_nodes, scan_statistic, scan_statistic_subset};
use netmix::transform::{compute_threshold_index, order_statistic_threshold};
use netmix::NodeScoreMap;
use proptest::prelude::*;

fn score_map() -> impl Strategy<Value = NodeScoreMap> {
    prop::collection::btree_map("[a-h][0-9]", -10.0f64..10.0, 0..30)
}

fn edge_list() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-h][0-9]", "[a-h][0-9]"), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_responsibility_in_unit_interval(
        x in -50.0f64..50.0,
        mu in -20.0f64..20.0,
        alpha in 0.0f64..=1.0,
    ) {
        let model = MixtureModel::new(mu, alpha);
        let r = model.responsibility(x);
        prop_assert!((0.0..=1.0).contains(&r));

        let llr = model.log_likelihood_ratio(x);
        if llr.is_finite() && llr.abs() < 30.0 {
            prop_assert!(((1.0 / (1.0 + (-llr).exp())) - r).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_threshold_index_bounded(
        excluded in 0usize..500,
        included in 0usize..500,
        alpha in -1.0f64..2.0,
    ) {
        let k = compute_threshold_index(excluded, alpha, included);
        prop_assert!(k >= excluded);
        prop_assert!(k <= excluded + included);
    }

    #[test]
    fn prop_order_statistic_threshold_within_range(
        values in prop::collection::vec(-100.0f64..100.0, 1..50),
        k in 0usize..60,
    ) {
        let t = order_statistic_threshold(&values, k);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(t >= min && t <= max);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_restrict_idempotent_and_ordered(
        nodes in prop::collection::vec("[a-h][0-9]", 0..30),
        edges in edge_list(),
    ) {
        let once = restrict(&nodes, &edges);
        let twice = restrict(&once, &edges);
        prop_assert_eq!(&once, &twice);

        // Kept nodes appear in their input order
        let mut positions = once
            .iter()
            .map(|node| nodes.iter().position(|n| n == node).unwrap());
        let mut last = None;
        for pos in &mut positions {
            prop_assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
        }
    }

    #[test]
    fn prop_positive_subset_is_positive_prefix(scores in score_map()) {
        let subset = positive_subset(&scores, None);
        prop_assert!(subset.iter().all(|node| scores[node] > 0.0));
        let positives = scores.values().filter(|&&s| s > 0.0).count();
        prop_assert_eq!(subset.len(), positives);
    }

    #[test]
    fn prop_scan_subset_is_ranking_prefix(scores in score_map(), edges in edge_list()) {
        let ranked: Vec<String> = rank_nodes(&scores)
            .into_iter()
            .map(|(node, _)| node.to_string())
            .collect();

        let subset = scan_statistic_subset(&scores, None);
        prop_assert_eq!(&subset[..], &ranked[..subset.len()]);

        let values: Vec<f64> = rank_nodes(&scores).into_iter().map(|(_, s)| s).collect();
        let scan = scan_statistic(&values);
        if scan.size > 0 {
            prop_assert!(scan.statistic > 0.0);
        }

        let filtered = scan_statistic_subset(&scores, Some(edges.as_slice()));
        prop_assert!(filtered.iter().all(|node| subset.contains(node)));
    }

    #[test]
    fn prop_p_value_in_unit_interval(
        observed in -100.0f64..100.0,
        permuted in prop::collection::vec(-100.0f64..100.0, 1..50),
    ) {
        let report = summarize(observed, &permuted);
        prop_assert!((0.0..=1.0).contains(&report.p_value));
        prop_assert_eq!(report.num_replicates, permuted.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(25))]

    #[test]
    fn prop_em_alpha_in_unit_interval(
        scores in prop::collection::vec(-8.0f64..8.0, 1..80),
    ) {
        let fit = mixture::fit(&scores, &EmConfig::quick(), &mut Silent).unwrap();
        prop_assert!((0.0..=1.0).contains(&fit.model.alpha));
        prop_assert!(fit.model.mu.is_finite());
    }
}

//! Property tests over both profiles.
//!
//! Node-count and id invariants, link endpoint invariants, threshold
//! monotonicity, the degree law, dequantization error bounds, and lenient
//! handling of every possible matrix truncation point.

use hashbrown::HashSet;
use proptest::prelude::*;
use simnet_codec::codec::{encode_rich, RichNodeRecord, TriangularMatrix};
use simnet_codec::{decode, DecodeConfig, EncodingProfile, GraphDataSet, Position, Rgb};

// ============================================================================
// Strategies
// ============================================================================

/// Raw rich buffer: `n` records of arbitrary bytes plus a full f32 matrix.
fn raw_rich_buffer() -> impl Strategy<Value = (usize, Vec<u8>)> {
    (0usize..12).prop_flat_map(|n| {
        let cells = n * n.saturating_sub(1) / 2;
        (
            Just(n),
            proptest::collection::vec(any::<u8>(), n * 16),
            proptest::collection::vec(0.0f32..=1.0, cells),
        )
            .prop_map(|(n, table, weights)| {
                let mut buf = table;
                buf.extend(weights.iter().flat_map(|w| w.to_le_bytes()));
                (n, buf)
            })
    })
}

/// Quantized profile over `n` distinct ids plus a full u8 matrix.
fn quantized_buffer() -> impl Strategy<Value = (EncodingProfile, Vec<u8>)> {
    (0usize..20).prop_flat_map(|n| {
        let cells = n * n.saturating_sub(1) / 2;
        proptest::collection::vec(any::<u8>(), cells).prop_map(move |bytes| {
            let ids: Vec<String> = (0..n).map(|i| format!("N{i}")).collect();
            (EncodingProfile::quantized(ids), bytes)
        })
    })
}

fn rich_node() -> impl Strategy<Value = RichNodeRecord> {
    (
        -1.09f64..1.09,
        -1.09f64..1.09,
        -1.09f64..1.09,
        0.0f64..1.31,
        any::<[u8; 3]>(),
        any::<u8>(),
    )
        .prop_map(|(x, y, z, radius, [r, g, b], group)| RichNodeRecord {
            id: String::new(),
            position: Position::new(x, y, z),
            radius,
            color: Rgb::new(r, g, b),
            group,
        })
}

fn link_set(graph: &GraphDataSet) -> HashSet<(usize, usize)> {
    graph
        .links()
        .iter()
        .map(|l| (l.source_index.0, l.target_index.0))
        .collect()
}

fn check_invariants(graph: &GraphDataSet, declared: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(graph.len(), declared);
    let ids: HashSet<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    prop_assert_eq!(ids.len(), declared, "ids must be pairwise distinct");
    prop_assert!(graph.nodes().iter().all(|n| !n.id.is_empty()));
    for link in graph.links() {
        prop_assert!(ids.contains(link.source.as_str()));
        prop_assert!(ids.contains(link.target.as_str()));
        prop_assert_ne!(&link.source, &link.target);
        prop_assert!(link.source_index > link.target_index);
        let (s, t) = graph.endpoints(link).unwrap();
        prop_assert_eq!(&s.id, &link.source);
        prop_assert_eq!(&t.id, &link.target);
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_rich_node_and_link_invariants((n, buf) in raw_rich_buffer()) {
        let decoded = decode(&buf, &EncodingProfile::rich(n), &DecodeConfig::default()).unwrap();
        prop_assert!(decoded.is_complete());
        check_invariants(&decoded.graph, n)?;
    }

    #[test]
    fn prop_quantized_invariants_and_degree_law((profile, bytes) in quantized_buffer()) {
        let decoded = decode(&bytes, &profile, &DecodeConfig::default()).unwrap();
        check_invariants(&decoded.graph, profile.node_count())?;

        let degrees = decoded.graph.degrees();
        prop_assert_eq!(degrees.iter().sum::<usize>(), 2 * decoded.graph.link_count());
        for (node, degree) in decoded.graph.nodes().iter().zip(degrees) {
            if degree == 0 {
                prop_assert_eq!(node.value, 0.5);
                prop_assert_eq!(node.color, Rgb::ISOLATED);
            } else {
                prop_assert_eq!(node.value, 1.0 + degree as f64 * 0.5);
            }
        }
    }

    #[test]
    fn prop_threshold_monotonic(
        (profile, bytes) in quantized_buffer(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = decode(&bytes, &profile, &DecodeConfig::default().with_threshold(lo)).unwrap();
        let high = decode(&bytes, &profile, &DecodeConfig::default().with_threshold(hi)).unwrap();
        prop_assert!(link_set(&high.graph).is_subset(&link_set(&low.graph)));
    }

    #[test]
    fn prop_rich_threshold_monotonic((n, buf) in raw_rich_buffer(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let profile = EncodingProfile::rich(n);
        let low = decode(&buf, &profile, &DecodeConfig::default().with_threshold(lo)).unwrap();
        let high = decode(&buf, &profile, &DecodeConfig::default().with_threshold(hi)).unwrap();
        prop_assert!(link_set(&high.graph).is_subset(&link_set(&low.graph)));
    }

    #[test]
    fn prop_rich_round_trip_within_quantization_error(
        records in proptest::collection::vec(rich_node(), 1..8),
        seed in proptest::collection::vec(0.0f32..=1.0, 28),
    ) {
        let n = records.len();
        let records: Vec<_> = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| { r.id = format!("{i}"); r })
            .collect();
        let cells: Vec<f64> = seed[..n * (n - 1) / 2].iter().map(|&w| f64::from(w)).collect();
        let matrix = TriangularMatrix::from_cells(n, cells).unwrap();
        let config = DecodeConfig::default().with_threshold(-1.0);

        let buf = encode_rich(&records, &matrix, &config).unwrap();
        let decoded = decode(&buf, &EncodingProfile::rich(n), &config).unwrap();

        let coord_tol = 1.0 / f64::from(config.coord_scale);
        let radius_tol = 1.0 / f64::from(config.radius_scale);
        for (orig, node) in records.iter().zip(decoded.graph.nodes()) {
            let p = node.position.unwrap();
            prop_assert_eq!(&node.id, &orig.id);
            prop_assert!((p.x - orig.position.x).abs() <= coord_tol);
            prop_assert!((p.y - orig.position.y).abs() <= coord_tol);
            prop_assert!((p.z - orig.position.z).abs() <= coord_tol);
            prop_assert!((node.value - orig.radius).abs() <= radius_tol);
            prop_assert_eq!(node.color, orig.color);
            prop_assert_eq!(node.group.clone(), Some(orig.group.to_string()));
        }

        // Every cell survives a -1 threshold, and f32 weights come back exactly.
        prop_assert_eq!(decoded.graph.link_count(), matrix.cells().len());
        for link in decoded.graph.links() {
            let original = matrix.get(link.source_index.0, link.target_index.0).unwrap();
            prop_assert_eq!(link.weight, original);
        }
    }

    #[test]
    fn prop_quantized_weights_within_one_step((profile, bytes) in quantized_buffer()) {
        let decoded = decode(&bytes, &profile, &DecodeConfig::default().with_threshold(0.0)).unwrap();
        prop_assert_eq!(decoded.graph.link_count(), bytes.len());
        for (link, &raw) in decoded.graph.links().iter().zip(&bytes) {
            prop_assert!((link.weight - f64::from(raw) / 255.0).abs() <= 1.0 / 255.0);
            prop_assert!((0.0..=1.0).contains(&link.weight));
        }
    }

    #[test]
    fn prop_any_matrix_truncation_is_lenient((profile, bytes) in quantized_buffer(), cut in any::<prop::sample::Index>()) {
        let keep = if bytes.is_empty() { 0 } else { cut.index(bytes.len() + 1) };
        let full = decode(&bytes, &profile, &DecodeConfig::default()).unwrap();
        let part = decode(&bytes[..keep], &profile, &DecodeConfig::default()).unwrap();

        prop_assert_eq!(part.cells_read, keep);
        prop_assert_eq!(part.is_complete(), keep == bytes.len());
        prop_assert_eq!(part.graph.len(), full.graph.len());
        prop_assert!(link_set(&part.graph).is_subset(&link_set(&full.graph)));
    }
}

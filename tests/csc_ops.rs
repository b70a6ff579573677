//! Integration tests for CSC slicing operations
//!
//! Tests verify correctness across:
//! - Node subsets, the identity subset and mixed index dtypes
//! - Pre-sliced and convenience neighbor selection
//! - Per-edge-type splitting
//! - Offset expansion
//! - Size hints, range checks and empty inputs
//! - Randomized agreement with naive references

mod common;

use common::{
    create_chunked_client, create_cpu_client, create_serial_client, random_ids, random_indptr,
    seeded_rng,
};
use graphslice::dtype::DType;
use graphslice::error::Error;
use graphslice::ops::{CscOps, ExpandIndptrConfig, IndexSelectCscConfig, SortingOps};
use graphslice::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use graphslice::tensor::Tensor;
use rand::Rng;

fn t<T: graphslice::dtype::Element>(data: &[T], device: &CpuDevice) -> Tensor<CpuRuntime> {
    Tensor::<CpuRuntime>::from_slice(data, &[data.len()], device)
}

/// Naive neighbor selection
fn select_reference(indptr: &[i64], indices: &[i64], nodes: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let mut new_indptr = vec![0i64];
    let mut new_indices = Vec::new();
    for &v in nodes {
        let (lo, hi) = (indptr[v as usize] as usize, indptr[v as usize + 1] as usize);
        new_indices.extend_from_slice(&indices[lo..hi]);
        new_indptr.push(new_indices.len() as i64);
    }
    (new_indptr, new_indices)
}

// ============================================================================
// slice_csc_indptr
// ============================================================================

#[test]
fn test_slice_csc_indptr_subset() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 2, 5], &device);
    let nodes = t(&[2i64, 0], &device);
    let (degrees, starts) = client.slice_csc_indptr(&indptr, Some(&nodes)).unwrap();

    assert_eq!(degrees.to_vec::<i64>(), [3, 2, 0]);
    assert_eq!(starts.to_vec::<i64>(), [2, 0]);
}

#[test]
fn test_slice_csc_indptr_mixed_dtypes() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i32, 2, 2, 5], &device);
    let nodes = t(&[1u8, 2], &device);
    let (degrees, starts) = client.slice_csc_indptr(&indptr, Some(&nodes)).unwrap();

    assert_eq!(degrees.dtype(), DType::I32);
    assert_eq!(degrees.to_vec::<i32>(), [0, 3, 0]);
    assert_eq!(starts.to_vec::<i32>(), [2, 2]);
}

#[test]
fn test_slice_csc_indptr_identity() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0u64, 1, 4, 4], &device);
    let (degrees, starts) = client.slice_csc_indptr(&indptr, None).unwrap();

    assert_eq!(degrees.to_vec::<u64>(), [1, 3, 0, 0]);
    assert_eq!(starts.to_vec::<u64>(), [0, 1, 4]);
}

#[test]
fn test_slice_csc_indptr_empty_subset() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2], &device);
    let nodes = t::<i64>(&[], &device);
    let (degrees, starts) = client.slice_csc_indptr(&indptr, Some(&nodes)).unwrap();

    assert_eq!(degrees.to_vec::<i64>(), [0]);
    assert_eq!(starts.shape(), &[0]);
}

#[test]
fn test_slice_csc_indptr_node_out_of_range() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 2, 5], &device);
    let nodes = t(&[0i64, 3], &device);
    let result = client.slice_csc_indptr(&indptr, Some(&nodes));

    assert!(matches!(
        result,
        Err(Error::IndexOutOfBounds { index: 3, size: 3 })
    ));
}

#[test]
fn test_slice_csc_indptr_rejects_empty_indptr() {
    let (client, device) = create_cpu_client();

    let indptr = t::<i64>(&[], &device);
    let result = client.slice_csc_indptr(&indptr, None);

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_slice_csc_indptr_decreasing_offsets() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 4, 2], &device);
    let nodes = t(&[1i64], &device);
    let result = client.slice_csc_indptr(&indptr, Some(&nodes));

    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

// ============================================================================
// index_select_csc
// ============================================================================

#[test]
fn test_index_select_csc() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 5, 5], &device);
    let indices = t(&[10i64, 11, 20, 21, 22], &device);
    let nodes = t(&[1i64, 2], &device);
    let (new_indptr, new_indices) = client
        .index_select_csc(&indptr, &indices, &nodes, None)
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i64>(), [0, 3, 3]);
    assert_eq!(new_indices.to_vec::<i64>(), [20, 21, 22]);
}

#[test]
fn test_index_select_csc_repeated_nodes() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i32, 2, 5], &device);
    let indices = t(&[7i32, 8, 9, 10, 11], &device);
    let nodes = t(&[0i32, 0, 1], &device);
    let (new_indptr, new_indices) = client
        .index_select_csc(&indptr, &indices, &nodes, Some(7))
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i32>(), [0, 2, 4, 7]);
    assert_eq!(new_indices.to_vec::<i32>(), [7, 8, 7, 8, 9, 10, 11]);
}

#[test]
fn test_index_select_csc_size_hint_mismatch() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 5, 5], &device);
    let indices = t(&[10i64, 11, 20, 21, 22], &device);
    let nodes = t(&[1i64, 2], &device);
    let result = client.index_select_csc(&indptr, &indices, &nodes, Some(4));

    assert!(matches!(
        result,
        Err(Error::SizeHintMismatch {
            hint: 4,
            actual: 3,
            ..
        })
    ));
}

#[test]
fn test_index_select_csc_float_payload() {
    let (client, device) = create_cpu_client();

    // Per-edge weights sliced with the same offsets as the neighbor ids
    let indptr = t(&[0i64, 1, 3], &device);
    let weights = t(&[0.5f32, 1.5, 2.5], &device);
    let nodes = t(&[1i64], &device);
    let (_, selected) = client
        .index_select_csc(&indptr, &weights, &nodes, None)
        .unwrap();

    assert_eq!(selected.to_vec::<f32>(), [1.5, 2.5]);
}

#[test]
fn test_index_select_csc_empty_nodes() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 5, 5], &device);
    let indices = t(&[10i64, 11, 20, 21, 22], &device);
    let nodes = t::<i64>(&[], &device);
    let (new_indptr, new_indices) = client
        .index_select_csc(&indptr, &indices, &nodes, None)
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i64>(), [0]);
    assert_eq!(new_indices.shape(), &[0]);
}

#[test]
fn test_index_select_csc_sliced_from_parts() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 5, 5], &device);
    let indices = t(&[10i64, 11, 20, 21, 22], &device);
    let nodes = t(&[2i64, 1, 0], &device);
    let (in_degree, sliced) = client.slice_csc_indptr(&indptr, Some(&nodes)).unwrap();

    let config = IndexSelectCscConfig {
        nodes_max: Some(2),
        output_size: Some(5),
    };
    let (new_indptr, new_indices) = client
        .index_select_csc_sliced(&in_degree, &sliced, &indices, &nodes, config)
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i64>(), [0, 0, 3, 5]);
    assert_eq!(new_indices.to_vec::<i64>(), [20, 21, 22, 10, 11]);
}

#[test]
fn test_index_select_csc_sliced_wide_scratch() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 5], &device);
    let indices = t(&[10i64, 11, 20, 21, 22], &device);
    let nodes = t(&[1i64, 0], &device);
    let (in_degree, sliced) = client.slice_csc_indptr(&indptr, Some(&nodes)).unwrap();

    // A bound past u32 selects 64-bit segment ids; results are unchanged
    let config = IndexSelectCscConfig {
        nodes_max: Some(u64::from(u32::MAX) + 1),
        output_size: None,
    };
    let (_, new_indices) = client
        .index_select_csc_sliced(&in_degree, &sliced, &indices, &nodes, config)
        .unwrap();

    assert_eq!(new_indices.to_vec::<i64>(), [20, 21, 22, 10, 11]);
}

#[test]
fn test_index_select_csc_sliced_rejects_non_int_nodes() {
    let (client, device) = create_cpu_client();

    let in_degree = t(&[1i64, 2, 0], &device);
    let sliced = t(&[0i64, 1], &device);
    let indices = t(&[1i64, 2, 3], &device);

    let float_nodes = t(&[0.0f32, 1.0], &device);
    let bool_nodes = client
        .isin(&t(&[0i64, 1], &device), &t(&[1i64], &device))
        .unwrap();
    assert_eq!(bool_nodes.dtype(), DType::Bool);

    for nodes in [float_nodes, bool_nodes] {
        let result = client.index_select_csc_sliced(
            &in_degree,
            &sliced,
            &indices,
            &nodes,
            IndexSelectCscConfig::default(),
        );
        assert!(matches!(result, Err(Error::UnsupportedDType { .. })));
    }
}

#[test]
fn test_index_select_csc_sliced_length_mismatch() {
    let (client, device) = create_cpu_client();

    let in_degree = t(&[1i64, 2, 0], &device);
    let sliced = t(&[0i64, 1], &device);
    let indices = t(&[1i64, 2, 3], &device);
    let nodes = t(&[0i64], &device);
    let result = client.index_select_csc_sliced(
        &in_degree,
        &sliced,
        &indices,
        &nodes,
        IndexSelectCscConfig::default(),
    );

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_index_select_csc_sliced_reads_past_indices() {
    let (client, device) = create_cpu_client();

    let in_degree = t(&[3i64, 0], &device);
    let sliced = t(&[1i64], &device);
    let indices = t(&[1i64, 2, 3], &device);
    let nodes = t(&[0i64], &device);
    let result = client.index_select_csc_sliced(
        &in_degree,
        &sliced,
        &indices,
        &nodes,
        IndexSelectCscConfig::default(),
    );

    assert!(matches!(result, Err(Error::IndexOutOfBounds { .. })));
}

fn check_random_select(client: &CpuClient, device: &CpuDevice, seed: u64) {
    let mut rng = seeded_rng(seed);
    let indptr = random_indptr(&mut rng, 2_000, 20);
    let num_edges = *indptr.last().unwrap() as usize;
    let indices = random_ids(&mut rng, num_edges, 1_000_000);
    let nodes = random_ids(&mut rng, 700, 2_000);

    let (expected_indptr, expected_indices) = select_reference(&indptr, &indices, &nodes);
    let (new_indptr, new_indices) = client
        .index_select_csc(
            &t(&indptr, device),
            &t(&indices, device),
            &t(&nodes, device),
            Some(expected_indices.len()),
        )
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i64>(), expected_indptr);
    assert_eq!(new_indices.to_vec::<i64>(), expected_indices);
}

#[test]
fn test_index_select_csc_matches_reference() {
    let (client, device) = create_cpu_client();
    check_random_select(&client, &device, 100);

    let (serial, device) = create_serial_client();
    check_random_select(&serial, &device, 101);

    let (chunked, device) = create_chunked_client(4, 13);
    check_random_select(&chunked, &device, 102);
}

#[test]
fn test_index_select_csc_parallel_matches_serial() {
    let mut rng = seeded_rng(55);
    let indptr = random_indptr(&mut rng, 1_000, 30);
    let num_edges = *indptr.last().unwrap() as usize;
    let indices: Vec<i32> = (0..num_edges).map(|_| rng.random_range(0..10_000)).collect();
    let nodes: Vec<u32> = (0..400).map(|_| rng.random_range(0..1_000)).collect();

    let (serial, device) = create_serial_client();
    let (parallel, _) = create_chunked_client(4, 7);
    let (a, b, c) = (t(&indptr, &device), t(&indices, &device), t(&nodes, &device));

    let (s_indptr, s_indices) = serial.index_select_csc(&a, &b, &c, None).unwrap();
    let (p_indptr, p_indices) = parallel.index_select_csc(&a, &b, &c, None).unwrap();
    assert_eq!(s_indptr.to_vec::<i64>(), p_indptr.to_vec::<i64>());
    assert_eq!(s_indices.to_vec::<i32>(), p_indices.to_vec::<i32>());
}

// ============================================================================
// slice_csc_indptr_hetero
// ============================================================================

#[test]
fn test_slice_csc_indptr_hetero() {
    let (client, device) = create_cpu_client();

    // Node 0 has tags [0, 0, 2], node 1 has tags [1]
    let sub_indptr = t(&[0i64, 3, 4], &device);
    let etypes = t(&[0u8, 0, 2, 1], &device);
    let sliced = t(&[100i64, 200], &device);
    let (new_sub, new_indeg, new_sliced) = client
        .slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 3)
        .unwrap();

    assert_eq!(new_sub.to_vec::<i64>(), [0, 2, 2, 3, 3, 4, 4]);
    assert_eq!(new_indeg.to_vec::<i64>(), [2, 0, 1, 0, 1, 0, 0]);
    assert_eq!(new_sliced.to_vec::<i64>(), [100, 102, 102, 200, 200, 201]);
}

#[test]
fn test_slice_csc_indptr_hetero_single_type() {
    let (client, device) = create_cpu_client();

    let sub_indptr = t(&[0i32, 2, 2, 3], &device);
    let etypes = t(&[0i32, 0, 0], &device);
    let sliced = t(&[5i32, 9, 1], &device);
    let (new_sub, new_indeg, new_sliced) = client
        .slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 1)
        .unwrap();

    assert_eq!(new_sub.to_vec::<i32>(), [0, 2, 2, 3]);
    assert_eq!(new_indeg.to_vec::<i32>(), [2, 0, 1, 0]);
    assert_eq!(new_sliced.to_vec::<i32>(), [5, 9, 1]);
}

#[test]
fn test_slice_csc_indptr_hetero_rejects_zero_fanouts() {
    let (client, device) = create_cpu_client();

    let sub_indptr = t(&[0i64, 1], &device);
    let etypes = t(&[0i64], &device);
    let sliced = t(&[0i64], &device);
    let result = client.slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 0);

    assert!(matches!(
        result,
        Err(Error::InvalidArgument {
            arg: "num_fanouts",
            ..
        })
    ));
}

#[test]
fn test_slice_csc_indptr_hetero_tag_out_of_range() {
    let (client, device) = create_cpu_client();

    let sub_indptr = t(&[0i64, 2], &device);
    let etypes = t(&[0i64, 2], &device);
    let sliced = t(&[0i64], &device);
    let result = client.slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 2);

    assert!(matches!(
        result,
        Err(Error::IndexOutOfBounds { index: 2, size: 2 })
    ));
}

#[test]
fn test_slice_csc_indptr_hetero_etypes_length_mismatch() {
    let (client, device) = create_cpu_client();

    let sub_indptr = t(&[0i64, 2], &device);
    let etypes = t(&[0i64, 1, 1], &device);
    let sliced = t(&[0i64], &device);
    let result = client.slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 2);

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_slice_csc_indptr_hetero_feeds_index_select() {
    let (client, device) = create_cpu_client();

    // Original graph: node 0 <- [10, 11, 12], node 1 <- [20]
    let indices = t(&[10i64, 11, 12, 20], &device);
    let sub_indptr = t(&[0i64, 3, 4], &device);
    let etypes = t(&[0u8, 1, 1, 1], &device);
    let sliced = t(&[0i64, 3], &device);
    let (_, new_indeg, new_sliced) = client
        .slice_csc_indptr_hetero(&sub_indptr, &etypes, &sliced, 2)
        .unwrap();

    let pairs = t(&[0i64, 1, 2, 3], &device);
    let (new_indptr, new_indices) = client
        .index_select_csc_sliced(
            &new_indeg,
            &new_sliced,
            &indices,
            &pairs,
            IndexSelectCscConfig::default(),
        )
        .unwrap();

    assert_eq!(new_indptr.to_vec::<i64>(), [0, 1, 3, 3, 4]);
    assert_eq!(new_indices.to_vec::<i64>(), [10, 11, 12, 20]);
}

/// Naive per-(node, type) split: counts and lower bounds by linear scan
fn hetero_reference(
    sub_indptr: &[i64],
    etypes: &[u8],
    sliced: &[i64],
    num_fanouts: usize,
) -> (Vec<i64>, Vec<i64>, Vec<i64>) {
    let r = sliced.len();
    let (mut new_sub, mut new_indeg, mut new_sliced) = (Vec::new(), Vec::new(), Vec::new());
    for v in 0..r {
        let seg = &etypes[sub_indptr[v] as usize..sub_indptr[v + 1] as usize];
        for t in 0..num_fanouts as u8 {
            let below = seg.iter().filter(|&&e| e < t).count() as i64;
            let equal = seg.iter().filter(|&&e| e == t).count() as i64;
            new_sub.push(sub_indptr[v] + below);
            new_indeg.push(equal);
            new_sliced.push(sliced[v] + below);
        }
    }
    new_sub.push(sub_indptr[r]);
    new_indeg.push(0);
    (new_sub, new_indeg, new_sliced)
}

#[test]
fn test_slice_csc_indptr_hetero_matches_reference() {
    let mut rng = seeded_rng(41);
    let (serial, device) = create_serial_client();
    let chunked: Vec<CpuClient> = (1..=4)
        .map(|min_len| create_chunked_client(4, min_len).0)
        .collect();

    for case in 0..50 {
        let num_fanouts = rng.random_range(1..=3usize);
        let r = rng.random_range(0..40usize);

        let mut sub_indptr = vec![0i64];
        let mut etypes: Vec<u8> = Vec::new();
        let mut sliced = Vec::with_capacity(r);
        for _ in 0..r {
            let degree = rng.random_range(0..7usize);
            let mut seg: Vec<u8> = (0..degree)
                .map(|_| rng.random_range(0..num_fanouts as u8))
                .collect();
            seg.sort_unstable();
            etypes.extend(seg);
            sub_indptr.push(etypes.len() as i64);
            sliced.push(rng.random_range(0..1_000i64));
        }
        let expected = hetero_reference(&sub_indptr, &etypes, &sliced, num_fanouts);

        let (a, e, s) = (t(&sub_indptr, &device), t(&etypes, &device), t(&sliced, &device));
        for client in std::iter::once(&serial).chain(&chunked) {
            let (new_sub, new_indeg, new_sliced) = client
                .slice_csc_indptr_hetero(&a, &e, &s, num_fanouts)
                .unwrap();
            assert_eq!(new_sub.to_vec::<i64>(), expected.0, "case {case}");
            assert_eq!(new_indeg.to_vec::<i64>(), expected.1, "case {case}");
            assert_eq!(new_sliced.to_vec::<i64>(), expected.2, "case {case}");
        }
    }
}

// ============================================================================
// expand_indptr
// ============================================================================

#[test]
fn test_expand_indptr() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 3], &device);
    let cols = client
        .expand_indptr(&indptr, DType::I64, ExpandIndptrConfig::default())
        .unwrap();

    assert_eq!(cols.to_vec::<i64>(), [0, 0, 1]);
}

#[test]
fn test_expand_indptr_with_node_ids() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i32, 1, 1, 3], &device);
    let config = ExpandIndptrConfig {
        node_ids: Some(t(&[40i64, 50, 60], &device)),
        output_size: Some(3),
    };
    let cols = client.expand_indptr(&indptr, DType::U16, config).unwrap();

    assert_eq!(cols.dtype(), DType::U16);
    assert_eq!(cols.to_vec::<u16>(), [40, 60, 60]);
}

#[test]
fn test_expand_indptr_node_ids_overflow() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 1], &device);
    let config = ExpandIndptrConfig {
        node_ids: Some(t(&[300i64], &device)),
        output_size: None,
    };
    let result = client.expand_indptr(&indptr, DType::U8, config);

    assert!(matches!(result, Err(Error::Overflow { .. })));
}

#[test]
fn test_expand_indptr_size_hint_mismatch() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 2, 3], &device);
    let config = ExpandIndptrConfig {
        node_ids: None,
        output_size: Some(2),
    };
    let result = client.expand_indptr(&indptr, DType::I64, config);

    assert!(matches!(result, Err(Error::SizeHintMismatch { .. })));
}

#[test]
fn test_expand_indptr_rejects_nonzero_start() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[1i64, 2, 3], &device);
    let result = client.expand_indptr(&indptr, DType::I64, ExpandIndptrConfig::default());

    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_expand_indptr_rejects_float_output() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64, 1], &device);
    let result = client.expand_indptr(&indptr, DType::F32, ExpandIndptrConfig::default());

    assert!(matches!(result, Err(Error::UnsupportedDType { .. })));
}

#[test]
fn test_expand_indptr_empty_graph() {
    let (client, device) = create_cpu_client();

    let indptr = t(&[0i64], &device);
    let cols = client
        .expand_indptr(&indptr, DType::I32, ExpandIndptrConfig::default())
        .unwrap();

    assert_eq!(cols.shape(), &[0]);
}

#[test]
fn test_expand_indptr_inverts_cumsum() {
    let mut rng = seeded_rng(77);
    let indptr = random_indptr(&mut rng, 3_000, 9);

    let (client, device) = create_chunked_client(4, 50);
    let cols = client
        .expand_indptr(&t(&indptr, &device), DType::I32, ExpandIndptrConfig::default())
        .unwrap()
        .to_vec::<i32>();

    let mut counts = vec![0i64; indptr.len() - 1];
    for &c in &cols {
        counts[c as usize] += 1;
    }
    for (v, &count) in counts.iter().enumerate() {
        assert_eq!(count, indptr[v + 1] - indptr[v]);
    }
    assert!(cols.windows(2).all(|w| w[0] <= w[1]));
}

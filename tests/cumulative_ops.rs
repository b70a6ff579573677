//! Integration tests for exclusive prefix sums
//!
//! Tests verify correctness across:
//! - Integer dtypes and output widening
//! - Overflow and negative-count rejection
//! - Empty input
//! - Agreement between serial and chunked parallel runs

mod common;

use common::{create_chunked_client, create_cpu_client, create_serial_client, seeded_rng};
use graphslice::dtype::DType;
use graphslice::error::Error;
use graphslice::ops::{CscOps, CumulativeOps};
use graphslice::runtime::cpu::CpuRuntime;
use graphslice::tensor::Tensor;
use rand::Rng;

#[test]
fn test_exclusive_cumsum_basic() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[3i64, 2, 0, 4], &[4], &device);
    let out = client.exclusive_cumsum(&a).unwrap();

    assert_eq!(out.shape(), &[4]);
    assert_eq!(out.dtype(), DType::I64);
    assert_eq!(out.to_vec::<i64>(), [0, 3, 5, 5]);
}

#[test]
fn test_exclusive_cumsum_empty() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice::<i32>(&[], &[0], &device);
    let out = client.exclusive_cumsum(&a).unwrap();

    assert_eq!(out.shape(), &[0]);
    assert!(out.to_vec::<i32>().is_empty());
}

#[test]
fn test_exclusive_cumsum_unsigned() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[1u32, 1, 1], &[3], &device);
    let out = client.exclusive_cumsum(&a).unwrap();

    assert_eq!(out.to_vec::<u32>(), [0, 1, 2]);
}

#[test]
fn test_exclusive_cumsum_overflow() {
    let (client, device) = create_cpu_client();

    // Prefix 200 does not fit i8
    let a = Tensor::<CpuRuntime>::from_slice(&[100i8, 100, 1], &[3], &device);
    let result = client.exclusive_cumsum(&a);

    assert!(matches!(
        result,
        Err(Error::Overflow {
            dtype: DType::I8,
            ..
        })
    ));
}

#[test]
fn test_exclusive_cumsum_to_widens() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[100i8, 100, 1], &[3], &device);
    let out = client.exclusive_cumsum_to(&a, DType::I16).unwrap();

    assert_eq!(out.dtype(), DType::I16);
    assert_eq!(out.to_vec::<i16>(), [0, 100, 200]);
}

#[test]
fn test_exclusive_cumsum_rejects_negative_counts() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[2i32, -1, 3], &[3], &device);
    let result = client.exclusive_cumsum(&a);

    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_exclusive_cumsum_rejects_float() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
    let result = client.exclusive_cumsum(&a);

    assert!(matches!(result, Err(Error::UnsupportedDType { .. })));
}

#[test]
fn test_exclusive_cumsum_rejects_2d() {
    let (client, device) = create_cpu_client();

    let a = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3, 4], &[2, 2], &device);
    let result = client.exclusive_cumsum(&a);

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_exclusive_cumsum_matches_reference() {
    let mut rng = seeded_rng(7);
    let counts: Vec<u16> = (0..10_000).map(|_| rng.random_range(0..50)).collect();

    let mut expected = Vec::with_capacity(counts.len());
    let mut acc = 0i64;
    for &c in &counts {
        expected.push(acc);
        acc += i64::from(c);
    }

    let (client, device) = create_chunked_client(4, 64);
    let a = Tensor::<CpuRuntime>::from_slice(&counts, &[counts.len()], &device);
    let out = client.exclusive_cumsum_to(&a, DType::I64).unwrap();

    assert_eq!(out.to_vec::<i64>(), expected);
}

#[test]
fn test_exclusive_cumsum_parallel_matches_serial() {
    let mut rng = seeded_rng(11);
    let counts: Vec<i32> = (0..5_000).map(|_| rng.random_range(0..9)).collect();

    let (serial, device) = create_serial_client();
    let (parallel, _) = create_chunked_client(3, 17);
    let a = Tensor::<CpuRuntime>::from_slice(&counts, &[counts.len()], &device);

    let s = serial.exclusive_cumsum(&a).unwrap().to_vec::<i32>();
    let p = parallel.exclusive_cumsum(&a).unwrap().to_vec::<i32>();
    assert_eq!(s, p);
}

#[test]
fn test_cumsum_of_degrees_rebuilds_indptr() {
    let (client, device) = create_cpu_client();
    let mut rng = seeded_rng(3);
    let indptr = common::random_indptr(&mut rng, 500, 12);

    let t = Tensor::<CpuRuntime>::from_slice(&indptr, &[indptr.len()], &device);
    let (degrees, _) = client.slice_csc_indptr(&t, None).unwrap();
    let rebuilt = client.exclusive_cumsum(&degrees).unwrap();

    assert_eq!(rebuilt.to_vec::<i64>(), indptr);
}

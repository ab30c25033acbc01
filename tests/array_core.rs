//! Integration tests for the array core: construction, reshape, arithmetic,
//! reductions and comparison.

use fusion_array::math::{self, Array, Nested, Reduced};
use fusion_array::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn arr1(values: Vec<f32>) -> Array<f32> {
    math::array::<f32, f32, _>(values).unwrap()
}

fn arr2(rows: Vec<Vec<f32>>) -> Array<f32> {
    math::array::<f32, f32, _>(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn zeros_and_ones_fill_every_shape() {
    let shapes: Vec<Vec<usize>> = vec![vec![], vec![3], vec![2, 3], vec![2, 6, 4, 4], vec![0, 5]];
    for dims in shapes {
        let z: Array<f32> = math::zeros(dims.clone());
        assert_eq!(z.dims(), dims.as_slice());
        assert_eq!(z.len(), dims.iter().product::<usize>());
        assert!(z.iter().all(|&v| v == 0.0));

        let o: Array<f64> = math::ones(dims.clone());
        assert_eq!(o.dims(), dims.as_slice());
        assert!(o.iter().all(|&v| v == 1.0));
    }
}

#[test]
fn rank_zero_zeros_is_a_scalar() {
    let z = Array::<f32>::zeros(Shape::scalar());
    assert_eq!(z.ndim(), 0);
    assert_eq!(z.item(), Some(&0.0));
    assert_eq!(z.to_string(), "0");
}

#[test]
fn array_infers_shape_from_nested_lists() {
    let a = arr2(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    assert_eq!(a.dims(), &[2, 3]);
    assert_eq!(a.ndim(), 2);
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn array_casts_integer_leaves() {
    let a: Array<f32> = math::array::<f32, i32, _>(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(a.dims(), &[2, 2]);
}

#[test]
fn array_of_empty_list_has_zero_length() {
    let a = arr1(vec![]);
    assert_eq!(a.dims(), &[0]);
    assert!(a.is_empty());
}

#[test]
fn array_rejects_ragged_input() {
    let ragged = Nested::from(vec![vec![1.0f32, 2.0], vec![3.0]]);
    let err = Array::<f32>::from_nested(ragged).unwrap_err();
    assert_eq!(err, ArrayError::Ragged);

    let mixed = Nested::List(vec![Nested::Scalar(1.0f32), Nested::List(vec![])]);
    assert_eq!(
        Array::<f32>::from_nested(mixed).unwrap_err(),
        ArrayError::Ragged
    );
}

#[test]
fn cast_recasts_existing_array() {
    let a = Array::<f64>::arange(3);
    let b: Array<f32> = a.cast().unwrap();
    assert_eq!(b.as_slice(), &[0.0f32, 1.0, 2.0]);
    assert_eq!(b.dims(), a.dims());
}

#[test]
fn cast_rejects_values_outside_target_range() {
    let big = Array::<f64>::full([2], f64::MAX);
    assert_eq!(big.cast::<f32>().unwrap_err(), ArrayError::Cast);

    let leaf: Nested<f64> = Nested::from(vec![1.0f64, f64::MAX]);
    assert_eq!(
        Array::<f32>::from_nested(leaf).unwrap_err(),
        ArrayError::Cast
    );

    let inf = Array::<f64>::full([1], f64::INFINITY).cast::<f32>().unwrap();
    assert!(inf.as_slice()[0].is_infinite());
}

#[test]
fn arange_counts_from_zero() {
    let a: Array<f32> = math::arange(5);
    assert_eq!(a.dims(), &[5]);
    assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn seeded_rand_is_reproducible() {
    let mut first = ArrayRng::seed_from_u64(2024);
    let mut second = ArrayRng::seed_from_u64(2024);
    let a: Array<f32> = first.rand([4, 3]);
    let b: Array<f32> = second.rand([4, 3]);
    assert_eq!(a, b);
    assert!(a.iter().all(|&x| (0.0..1.0).contains(&x)));
}

// ---------------------------------------------------------------------------
// Reshape and indexing
// ---------------------------------------------------------------------------

#[test]
fn reshape_free_dimension_round_trips() {
    init_logger();
    for (n, k) in [(8usize, 2isize), (12, 3), (12, 4), (6, 6), (0, 3)] {
        let a = Array::<f32>::arange(n);
        let r = math::reshape(&a, &[-1, k]).unwrap();
        assert_eq!(r.dims(), &[n / k as usize, k as usize]);
        assert_eq!(r.as_slice(), a.as_slice());
        assert_eq!(math::flatten(&r.to_nested()), a.to_vec());
    }
}

#[test]
fn reshape_rejects_inexact_free_dimension() {
    let a = Array::<f32>::arange(10);
    let err = a.reshape(&[-1, 4]).unwrap_err();
    assert_eq!(
        err,
        ArrayError::ReshapeSize {
            len: 10,
            shape: vec![-1, 4]
        }
    );
}

#[test]
fn reshape_rejects_two_free_dimensions() {
    let a = Array::<f32>::arange(8);
    assert!(matches!(
        a.reshape(&[-1, -1]),
        Err(ArrayError::MultipleFreeDims(_))
    ));
}

#[test]
fn reshape_with_huge_extents_is_an_error() {
    let a = Array::<f32>::zeros([0]);
    let err = a
        .reshape(&[isize::MAX, isize::MAX, 0, -1])
        .unwrap_err();
    assert!(matches!(err, ArrayError::ReshapeSize { len: 0, .. }));
}

#[test]
fn reshape_accepts_raw_nested_values() {
    let nested = Nested::from(vec![vec![0.0f32, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    let r = math::reshape_nested(&nested, &[3, -1]).unwrap();
    assert_eq!(r.dims(), &[3, 2]);
    assert_eq!(r.to_string(), "[[0, 1], [2, 3], [4, 5]]");
}

#[test]
fn get_returns_leading_axis_element() {
    let a = arr2(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(a.get(1).unwrap(), arr1(vec![3.0, 4.0]));
    assert_eq!(a[[1, 0]], 3.0);
    assert_eq!(a[&[0usize, 1][..]], 2.0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn index_out_of_range_panics() {
    let a = Array::<f32>::zeros([2, 2]);
    let _value: f32 = a[[2, 0]];
}

// ---------------------------------------------------------------------------
// Elementwise arithmetic
// ---------------------------------------------------------------------------

#[test]
fn add_and_multiply_commute() {
    let mut rng = ArrayRng::seed_from_u64(11);
    let a: Array<f32> = rng.rand([3, 4, 2]);
    let b: Array<f32> = rng.rand([3, 4, 2]);
    assert_eq!(math::add(&a, &b).unwrap(), math::add(&b, &a).unwrap());
    assert_eq!(
        math::multiply(&a, &b).unwrap(),
        math::multiply(&b, &a).unwrap()
    );
}

#[test]
fn multiply_broadcasts_over_leading_axis() {
    let a = arr2(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = arr1(vec![2.0, 2.0]);
    let out = math::multiply(&a, &b).unwrap();
    assert_eq!(out, arr2(vec![vec![2.0, 4.0], vec![6.0, 8.0]]));
}

#[test]
fn multiply_broadcast_matches_per_row_product() {
    let mut rng = ArrayRng::seed_from_u64(5);
    let a: Array<f32> = rng.rand([4, 3, 2]);
    let b: Array<f32> = rng.rand([3, 2]);
    let out = a.multiply(&b).unwrap();
    for i in 0..4 {
        let expected = a.get(i).unwrap().multiply(&b).unwrap();
        assert_eq!(out.get(i).unwrap(), expected);
    }
}

#[test]
fn multiply_by_scalar_array() {
    let a = arr1(vec![1.0, 2.0, 3.0]);
    let two = Array::scalar(2.0f32);
    assert_eq!(a.multiply(&two).unwrap().as_slice(), &[2.0, 4.0, 6.0]);
    assert_eq!(two.multiply(&a).unwrap().as_slice(), &[2.0, 4.0, 6.0]);
    assert_eq!(two.multiply(&two).unwrap().item(), Some(&4.0));
    assert_eq!(a.scale(0.5).as_slice(), &[0.5, 1.0, 1.5]);
}

#[test]
fn add_broadcasts_scalar_either_side() {
    let ones = Array::<f32>::ones([2, 2]);
    let three = Array::scalar(3.0f32);
    for sum in [ones.add(&three).unwrap(), three.add(&ones).unwrap()] {
        assert_eq!(sum.dims(), &[2, 2]);
        assert_eq!(sum.as_slice(), &[4.0, 4.0, 4.0, 4.0]);
    }
    assert_eq!(math::add(&three, &three).unwrap().item(), Some(&6.0));
}

#[test]
fn mismatched_shapes_fail_loudly() {
    let a = Array::<f32>::ones([2, 3]);
    let b = Array::<f32>::ones([3, 2]);
    let err = a.add(&b).unwrap_err();
    assert_eq!(
        err,
        ArrayError::ShapeMismatch {
            lhs: vec![2, 3],
            rhs: vec![3, 2]
        }
    );
    assert!(a.multiply(&b).is_err());
    assert!(a.multiply(&Array::<f32>::ones([2])).is_err());
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

#[test]
fn sum_over_rows() {
    let a = Array::<f32>::arange(8).reshape(&[2, 4]).unwrap();
    let s = a.sum_axis(1).unwrap();
    assert_eq!(s, arr1(vec![6.0, 22.0]));
    let s0 = a.sum_axis(0).unwrap();
    assert_eq!(s0.as_slice(), &[4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn axis_sums_preserve_total_mass() {
    let a = Array::<f64>::arange(60).reshape(&[3, 4, 5]).unwrap();
    let total = a.sum();
    for axis in 0..a.ndim() {
        let partial = a.sum_axis(axis).unwrap();
        assert_eq!(partial.ndim(), a.ndim() - 1);
        assert!((partial.sum() - total).abs() < 1e-9);
    }
}

#[test]
fn mean_global_and_by_axis() {
    let a = arr2(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(a.mean().unwrap(), 2.5);
    assert_eq!(a.mean_axis(0).unwrap(), arr1(vec![2.0, 3.0]));
    assert_eq!(a.mean_axis(1).unwrap(), arr1(vec![1.5, 3.5]));
}

#[test]
fn max_global_and_by_axis() {
    let a = arr1(vec![1.0, 5.0, 2.0, 3.0]);
    assert_eq!(a.max().unwrap(), 5.0);

    let b = arr2(vec![vec![1.0, 7.0], vec![4.0, 2.0]]);
    assert_eq!(b.max_axis(0).unwrap(), arr1(vec![4.0, 7.0]));
    assert_eq!(b.max_axis(1).unwrap(), arr1(vec![7.0, 4.0]));
}

#[test]
fn empty_reductions_are_errors() {
    let empty = arr1(vec![]);
    assert_eq!(empty.sum(), 0.0);
    assert_eq!(empty.mean().unwrap_err(), ArrayError::Empty("mean"));
    assert_eq!(empty.max().unwrap_err(), ArrayError::Empty("max"));
}

#[test]
fn zero_extent_axis_reductions() {
    let rows = Array::<f32>::zeros([2, 0]);
    assert_eq!(rows.sum_axis(1).unwrap().as_slice(), &[0.0, 0.0]);
    assert_eq!(rows.max_axis(1).unwrap_err(), ArrayError::Empty("max"));
    assert_eq!(rows.mean_axis(1).unwrap_err(), ArrayError::Empty("mean"));

    let nothing = Array::<f32>::zeros([0, 0]);
    for reduced in [
        nothing.sum_axis(1).unwrap(),
        nothing.max_axis(1).unwrap(),
        nothing.mean_axis(1).unwrap(),
    ] {
        assert_eq!(reduced.dims(), &[0]);
        assert!(reduced.is_empty());
    }
}

#[test]
fn free_function_reductions_follow_axis_argument() {
    let a = Array::<f32>::arange(6).reshape(&[2, 3]).unwrap();
    assert_eq!(math::sum(&a, None).unwrap(), Reduced::Scalar(15.0));
    assert_eq!(math::max(&a, None).unwrap().scalar(), Some(5.0));
    match math::mean(&a, Some(0)).unwrap() {
        Reduced::Array(m) => assert_eq!(m.as_slice(), &[1.5, 2.5, 3.5]),
        Reduced::Scalar(_) => panic!("axis reduction should produce an array"),
    }
    assert!(math::sum(&a, Some(2)).is_err());
    assert_eq!(
        a.reduce(Reduction::Max, Some(0)).unwrap().into_array().as_slice(),
        &[3.0, 4.0, 5.0]
    );
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[test]
fn allclose_is_reflexive() {
    let mut rng = ArrayRng::seed_from_u64(3);
    let a: Array<f32> = rng.rand([5, 5]);
    for tol in [0.0f32, 1e-8, 1e-5, 1.0] {
        assert!(math::allclose(&a, &a, tol));
    }
}

#[test]
fn allclose_respects_tolerance() {
    let a = arr1(vec![1.0, 2.0]);
    let b = arr1(vec![1.0, 2.001]);
    assert!(!math::allclose_default(&a, &b));
    assert!(math::allclose(&a, &b, 0.01));
}

#[test]
fn allclose_requires_equal_shapes() {
    let a = arr1(vec![1.0, 2.0, 3.0]);
    let b = arr1(vec![1.0, 2.0]);
    assert!(!math::allclose(&a, &b, 1.0));
    assert!(math::allclose(&arr1(vec![]), &arr1(vec![]), 0.0));
}

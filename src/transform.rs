//! Elementwise transforms shared by every arithmetic operation.
//!
//! Two shapes exist:
//!
//! - scalar transforms pair every element with one value and **assign** the
//!   result: `dst[i] = op(&src[i], &val)`
//! - binary transforms pair corresponding elements of two buffers and
//!   **accumulate** into the destination: `dst[i] += op(&v1[i], &v2[i])`
//!
//! The accumulation is visible when calling [`apply_to`] on a destination
//! that already holds values. The arithmetic methods of
//! [`DynamicBuffer`](crate::DynamicBuffer) and
//! [`DynamicMatrix`](crate::DynamicMatrix) always pass a zeroed destination.
//!
//! ```
//! use dynbuf::{transform, DynamicBuffer};
//!
//! let a = DynamicBuffer::from_slice(&[1, 2, 3]).unwrap();
//! let b = DynamicBuffer::from_slice(&[10, 20, 30]).unwrap();
//! let mut dst = DynamicBuffer::from_slice(&[100, 100, 100]).unwrap();
//!
//! transform::apply_to(&mut dst, &a, &b, |x, y| x + y);
//! assert_eq!(dst.as_slice(), &[111, 122, 133]);
//! ```

use std::ops::AddAssign;

use crate::core::DynamicBuffer;

/// Builds a new buffer where element `i` is `op(&src[i], val)`.
pub fn apply_scalar<T, U, S, F>(src: &DynamicBuffer<U>, val: &S, mut op: F) -> DynamicBuffer<T>
where
    F: FnMut(&U, &S) -> T,
{
    DynamicBuffer::from_boxed(src.iter().map(|x| op(x, val)).collect())
}

/// Writes `op(&src[i], val)` into `dst[i]` for every index.
///
/// # Panics
///
/// Panics if `dst` and `src` have different lengths.
pub fn apply_scalar_to<T, U, S, F>(dst: &mut DynamicBuffer<T>, src: &DynamicBuffer<U>, val: &S, mut op: F)
where
    F: FnMut(&U, &S) -> T,
{
    assert_same_len(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = op(s, val);
    }
}

/// Replaces every element `x` of `dst` with `op(&x, val)`.
pub fn apply_scalar_in_place<T, S, F>(dst: &mut DynamicBuffer<T>, val: &S, mut op: F)
where
    F: FnMut(&T, &S) -> T,
{
    for d in dst.iter_mut() {
        let next = op(d, val);
        *d = next;
    }
}

/// Adds `op(&v1[i], &v2[i])` onto `dst[i]` for every index.
///
/// # Panics
///
/// Panics if the three buffers do not share one length.
pub fn apply_to<T, A, B, F>(dst: &mut DynamicBuffer<T>, v1: &DynamicBuffer<A>, v2: &DynamicBuffer<B>, mut op: F)
where
    T: AddAssign,
    F: FnMut(&A, &B) -> T,
{
    assert_same_len(v1.len(), v2.len());
    assert_same_len(dst.len(), v1.len());
    for ((d, a), b) in dst.iter_mut().zip(v1.iter()).zip(v2.iter()) {
        *d += op(a, b);
    }
}

fn assert_same_len(left: usize, right: usize) {
    assert!(
        left == right,
        "Vectors have different sizes: {} and {}",
        left,
        right
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(values: &[i64]) -> DynamicBuffer<i64> {
        DynamicBuffer::from_slice(values).unwrap()
    }

    #[test]
    fn test_scalar_transform_assigns() {
        let src = buf(&[1, 2, 3]);
        let mut dst = buf(&[50, 50, 50]);

        apply_scalar_to(&mut dst, &src, &10i64, |x, v| x * v);

        assert_eq!(dst.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn test_scalar_transform_builds_new_buffer() {
        let src = buf(&[1, 2, 3]);
        let out: DynamicBuffer<String> = apply_scalar(&src, &"#", |x, p| format!("{p}{x}"));

        assert_eq!(out.len(), 3);
        assert_eq!(out[2], "#3");
    }

    #[test]
    fn test_scalar_transform_in_place() {
        let mut dst = buf(&[4, 5, 6]);
        apply_scalar_in_place(&mut dst, &1i64, |x, v| x - v);
        assert_eq!(dst.as_slice(), &[3, 4, 5]);
    }

    #[test]
    fn test_binary_transform_accumulates() {
        let v1 = buf(&[1, 2, 3]);
        let v2 = buf(&[4, 5, 6]);
        let mut dst = buf(&[1, 1, 1]);

        apply_to(&mut dst, &v1, &v2, |a, b| a * b);
        assert_eq!(dst.as_slice(), &[5, 11, 19]);

        apply_to(&mut dst, &v1, &v2, |a, b| a * b);
        assert_eq!(dst.as_slice(), &[9, 21, 37]);
    }

    #[test]
    fn test_binary_transform_on_zeroed_destination_is_plain_combine() {
        let v1 = buf(&[1, 2, 3]);
        let v2 = buf(&[4, 5, 6]);
        let mut dst = DynamicBuffer::<i64>::new(3).unwrap();

        apply_to(&mut dst, &v1, &v2, |a, b| a - b);
        assert_eq!(dst.as_slice(), &[-3, -3, -3]);
    }

    #[test]
    #[should_panic(expected = "Vectors have different sizes: 2 and 3")]
    fn test_binary_transform_rejects_mismatch() {
        let v1 = buf(&[1, 2]);
        let v2 = buf(&[4, 5, 6]);
        let mut dst = buf(&[0, 0]);
        apply_to(&mut dst, &v1, &v2, |a, b| a + b);
    }

    #[test]
    #[should_panic(expected = "Vectors have different sizes: 3 and 2")]
    fn test_scalar_transform_rejects_mismatch() {
        let src = buf(&[1, 2]);
        let mut dst = buf(&[0, 0, 0]);
        apply_scalar_to(&mut dst, &src, &1i64, |x, v| x + v);
    }
}

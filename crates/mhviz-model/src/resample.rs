#![forbid(unsafe_code)]

//! Stride resampling of convergence series.
//!
//! Full-resolution series can hold a thousand points per algorithm; charts
//! only need enough of them to draw the shape. [`resample`] keeps every
//! `stride`-th point starting from the first, and always keeps the last
//! point so the final objective value is never dropped.

use crate::error::{ModelError, Result};

/// Keep the points at indices `0, stride, 2*stride, ...` plus the last one.
///
/// An empty input yields an empty output. A stride of 1 is the identity.
///
/// # Errors
///
/// Returns [`ModelError::InvalidStride`] when `stride` is zero.
pub fn resample<T: Clone>(points: &[T], stride: usize) -> Result<Vec<T>> {
    if stride == 0 {
        return Err(ModelError::InvalidStride(stride));
    }
    let Some(last_index) = points.len().checked_sub(1) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(resampled_len(points.len(), stride));
    out.extend(points.iter().step_by(stride).cloned());
    if last_index % stride != 0 {
        out.push(points[last_index].clone());
    }
    Ok(out)
}

/// Number of points [`resample`] keeps for `len` inputs.
///
/// `stride` must be non-zero; zero yields `len` as if the stride were 1.
#[must_use]
pub const fn resampled_len(len: usize, stride: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let stride = if stride == 0 { 1 } else { stride };
    let last = len - 1;
    let tail = if last % stride != 0 { 1 } else { 0 };
    last / stride + 1 + tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_stride_is_rejected() {
        assert_eq!(resample(&[1, 2, 3], 0), Err(ModelError::InvalidStride(0)));
    }

    #[test]
    fn empty_input_stays_empty() {
        let empty: [u32; 0] = [];
        assert_eq!(resample(&empty, 20), Ok(vec![]));
        assert_eq!(resampled_len(0, 20), 0);
    }

    #[test]
    fn single_point_survives() {
        assert_eq!(resample(&[7], 20), Ok(vec![7]));
    }

    #[test]
    fn last_point_is_appended_when_off_stride() {
        let points: Vec<u32> = (0..10).collect();
        assert_eq!(resample(&points, 4), Ok(vec![0, 4, 8, 9]));
    }

    #[test]
    fn last_point_not_duplicated_when_on_stride() {
        let points: Vec<u32> = (0..9).collect();
        assert_eq!(resample(&points, 4), Ok(vec![0, 4, 8]));
    }

    #[test]
    fn thousand_points_stride_twenty() {
        let points: Vec<u32> = (0..1000).collect();
        let out = resample(&points, 20).unwrap();
        assert_eq!(out.len(), 51);
        assert_eq!(out.first(), Some(&0));
        assert_eq!(out.last(), Some(&999));
        assert_eq!(out[49], 980);
    }

    #[test]
    fn stride_one_is_identity() {
        let points: Vec<u32> = (0..17).collect();
        assert_eq!(resample(&points, 1).unwrap(), points);
    }

    proptest! {
        #[test]
        fn keeps_first_and_last(len in 1usize..400, stride in 1usize..64) {
            let points: Vec<usize> = (0..len).collect();
            let out = resample(&points, stride).unwrap();
            prop_assert_eq!(out.first(), Some(&0));
            prop_assert_eq!(out.last(), Some(&(len - 1)));
            prop_assert_eq!(out.len(), resampled_len(len, stride));
        }

        #[test]
        fn output_is_strictly_increasing(len in 0usize..400, stride in 1usize..64) {
            let points: Vec<usize> = (0..len).collect();
            let out = resample(&points, stride).unwrap();
            prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

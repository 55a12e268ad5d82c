//! Conversions between flat `f64` sequences and complex pairs.
//!
//! The flat convention interleaves real and imaginary parts:
//! `re0, im0, re1, im1, ...`.
use crate::error::{FftError, FftResult};
use rustfft::num_complex::Complex;

/// Interlaces real samples with zeros, doubling the length.
///
/// # Example
/// ```
/// use packfft::packing::expand_real_to_complex;
/// assert_eq!(expand_real_to_complex(&[1., 2.]), vec![1., 0., 2., 0.]);
/// ```
#[must_use]
pub fn expand_real_to_complex(real: &[f64]) -> Vec<f64> {
    real.iter().flat_map(|r| [*r, 0.]).collect()
}

/// Groups a complex-packed sequence into complex values.
///
/// # Errors
/// [`FftError::InvalidInputShape`] if `packed` has odd length.
pub fn to_pairs(packed: &[f64]) -> FftResult<Vec<Complex<f64>>> {
    check_even(packed)?;
    Ok(packed
        .chunks_exact(2)
        .map(|c| Complex::new(c[0], c[1]))
        .collect())
}

/// Flattens complex values into the packed convention.
#[must_use]
pub fn interleave(pairs: &[Complex<f64>]) -> Vec<f64> {
    pairs.iter().flat_map(|c| [c.re, c.im]).collect()
}

/// Lifts real samples to complex values with zero imaginary part.
pub(crate) fn real_to_pairs(real: &[f64]) -> Vec<Complex<f64>> {
    real.iter().map(|r| Complex::new(*r, 0.)).collect()
}

pub(crate) fn check_even(packed: &[f64]) -> FftResult<()> {
    if packed.len() % 2 == 0 {
        Ok(())
    } else {
        Err(FftError::InvalidInputShape { len: packed.len() })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_doubles_length_with_zero_imaginary() {
        let x = [1.2, 3.4, 5.6];
        let packed = expand_real_to_complex(&x);
        assert_eq!(packed, vec![1.2, 0., 3.4, 0., 5.6, 0.]);
        assert_eq!(interleave(&real_to_pairs(&x)), packed);
    }

    #[test]
    fn pairs_follow_re_im_order() {
        let pairs = to_pairs(&[1., -2., 3., 4.]).unwrap();
        assert_eq!(pairs, vec![Complex::new(1., -2.), Complex::new(3., 4.)]);
        assert_eq!(interleave(&pairs), vec![1., -2., 3., 4.]);
    }

    #[test]
    fn odd_length_is_rejected() {
        assert_eq!(
            to_pairs(&[1., 2., 3.]),
            Err(FftError::InvalidInputShape { len: 3 })
        );
    }

    #[test]
    fn empty_sequences_stay_empty() {
        assert!(expand_real_to_complex(&[]).is_empty());
        assert!(to_pairs(&[]).unwrap().is_empty());
    }
}

//! Console formatting of transform results.
use crate::error::FftResult;
use crate::packing::check_even;

/// Formats complex-packed values as `a + bi` / `a - bi`.
///
/// The imaginary part is shown as its magnitude, its sign carried by the
/// separator.
///
/// # Errors
/// [`FftError::InvalidInputShape`](crate::FftError::InvalidInputShape) for odd lengths.
///
/// # Example
/// ```
/// use packfft::display::format_complex;
/// assert_eq!(format_complex(&[1., -2., 3., 4.]).unwrap(), vec!["1 - 2i", "3 + 4i"]);
/// ```
pub fn format_complex(packed: &[f64]) -> FftResult<Vec<String>> {
    check_even(packed)?;
    Ok(packed
        .chunks_exact(2)
        .map(|c| {
            let glyph = if c[1] < 0. { '-' } else { '+' };
            format!("{} {} {}i", c[0], glyph, c[1].abs())
        })
        .collect())
}

/// Formats only the real component of each complex pair.
///
/// # Errors
/// [`FftError::InvalidInputShape`](crate::FftError::InvalidInputShape) for odd lengths.
pub fn format_real_parts(packed: &[f64]) -> FftResult<Vec<String>> {
    check_even(packed)?;
    Ok(packed.chunks_exact(2).map(|c| c[0].to_string()).collect())
}

//! # packfft: 1-dimensional FFT and inverse FFT on complex-packed buffers
//!
//! This library wraps an FFT engine, by default `RustFFT`, behind two
//! operations on flat `f64` sequences. Complex values are stored as
//! consecutive pairs `re0, im0, re1, im1, ...`; real input is widened to
//! that convention before transforming.
//!
//! The [`FftHandler`] owns no per-size state. Every call acquires a buffer
//! and a plan from its [`FftBackend`], runs the transform and releases both
//! before returning, so a handler can be shared between threads.
//!
//! Inverse transforms are normalized by *1/N* by default, such that an
//! inverse after a forward transform reconstructs the input.
//!
//! ## Example
//! Real input, forward and inverse
//! ```
//! use packfft::{FftHandler, Layout};
//!
//! let handler = FftHandler::new();
//! let xhat = handler.forward_transform(&[1.2, 3.4, 5.6, 7.8], Layout::Real).unwrap();
//! assert_eq!(xhat.len(), 8);
//! let x = handler.inverse_transform(&xhat).unwrap();
//! assert!((x[2] - 3.4).abs() < 1e-12);
//! ```
#![warn(missing_docs)]
pub mod backend;
pub mod display;
mod error;
pub mod packing;
mod reference;

pub use backend::{Direction, FftBackend, PlanFlag, RustFftBackend, RustFftPlan};
pub use error::{FftError, FftResult};
pub use reference::{NaiveDftBackend, NaiveDftPlan};
pub use rustfft::num_complex::Complex;

use backend::CallScope;
use log::debug;
use packing::{interleave, real_to_pairs, to_pairs};

/// How the samples handed to [`FftHandler::forward_transform`] are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// N real values.
    Real,
    /// N complex values packed as 2N doubles.
    Complex,
}

/// Scaling applied to the inverse transform output.
///
/// Forward results are never scaled.
#[derive(Clone, Copy)]
pub enum Normalization {
    /// Raw backend output, scaled by N.
    None,
    /// Divide by the number of complex samples N.
    Default,
    /// Apply a custom normalization function to the raw output.
    Custom(fn(&mut [Complex<f64>])),
}

impl Default for Normalization {
    fn default() -> Self {
        Normalization::Default
    }
}

impl std::fmt::Debug for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalization::None => f.write_str("None"),
            Normalization::Default => f.write_str("Default"),
            Normalization::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Normalization {
    #[allow(clippy::cast_precision_loss)]
    fn apply(self, data: &mut [Complex<f64>]) {
        match self {
            Normalization::None => {}
            Normalization::Default => {
                let n64 = 1. / data.len() as f64;
                for d in data.iter_mut() {
                    *d = *d * n64;
                }
            }
            Normalization::Custom(f) => f(data),
        }
    }
}

/// # 1-dimensional complex-to-complex Fourier Transform.
///
/// Transforms complex-packed sequences of *2N* doubles to sequences of the
/// same size and vice versa. Real sequences of size *N* are accepted by the
/// forward transform and widened to *2N* doubles.
///
/// The accompanying free functions are [`fft`] and [`ifft`], which use a
/// default handler over [`RustFftBackend`].
///
/// # Example
/// Complex input with a custom normalization
/// ```
/// use packfft::{Complex, FftHandler, Layout, Normalization};
///
/// fn halve(data: &mut [Complex<f64>]) {
///     for d in data.iter_mut() {
///         *d = *d * 0.5;
///     }
/// }
/// let handler = FftHandler::new().normalization(Normalization::Custom(halve));
/// let vhat = handler.forward_transform(&[1., 1., 1., 1.], Layout::Complex).unwrap();
/// assert_eq!(handler.inverse_transform(&vhat).unwrap(), vec![1., 1., 1., 1.]);
/// ```
#[derive(Debug, Clone)]
pub struct FftHandler<B = RustFftBackend> {
    backend: B,
    norm: Normalization,
    flag: PlanFlag,
}

impl FftHandler<RustFftBackend> {
    /// Creates a new `FftHandler` backed by `RustFFT`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packfft::FftHandler;
    /// let handler = FftHandler::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(RustFftBackend)
    }
}

impl Default for FftHandler<RustFftBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: FftBackend> FftHandler<B> {
    /// Creates a new `FftHandler` on top of `backend`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packfft::{FftHandler, NaiveDftBackend};
    /// let handler = FftHandler::with_backend(NaiveDftBackend);
    /// ```
    #[must_use]
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            norm: Normalization::default(),
            flag: PlanFlag::default(),
        }
    }

    /// Sets the normalization of inverse transforms.
    #[must_use]
    pub fn normalization(mut self, norm: Normalization) -> Self {
        self.norm = norm;
        self
    }

    /// Sets the planning effort requested from the backend.
    #[must_use]
    pub fn plan_flag(mut self, flag: PlanFlag) -> Self {
        self.flag = flag;
        self
    }

    /// The backend this handler delegates to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Forward DFT of `samples`; the result is complex-packed and unscaled.
    ///
    /// # Errors
    /// * [`FftError::InvalidInputShape`] if `layout` is [`Layout::Complex`]
    ///   and `samples` has odd length.
    /// * [`FftError::BackendAllocationFailure`] if the backend runs out of memory.
    pub fn forward_transform(&self, samples: &[f64], layout: Layout) -> FftResult<Vec<f64>> {
        let data = match layout {
            Layout::Real => real_to_pairs(samples),
            Layout::Complex => to_pairs(samples)?,
        };
        let out = self.run(&data, Direction::Forward)?;
        Ok(interleave(&out))
    }

    /// Inverse DFT of complex-packed `samples`, normalized per the handler.
    ///
    /// # Errors
    /// * [`FftError::InvalidInputShape`] if `samples` has odd length.
    /// * [`FftError::BackendAllocationFailure`] if the backend runs out of memory.
    pub fn inverse_transform(&self, samples: &[f64]) -> FftResult<Vec<f64>> {
        let data = to_pairs(samples)?;
        let mut out = self.run(&data, Direction::Inverse)?;
        self.norm.apply(&mut out);
        Ok(interleave(&out))
    }

    fn run(&self, data: &[Complex<f64>], direction: Direction) -> FftResult<Vec<Complex<f64>>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            "{:?} transform of {} complex samples ({:?})",
            direction,
            data.len(),
            self.flag
        );
        let mut scope = CallScope::new(&self.backend);
        scope.load(data)?;
        scope.plan(data.len(), direction, self.flag)?;
        scope.execute();
        Ok(scope.output())
    }
}

/// Forward transform through a default [`FftHandler`].
///
/// # Errors
/// See [`FftHandler::forward_transform`].
///
/// # Example
/// ```
/// use packfft::{fft, Layout};
/// let xhat = fft(&[1., -2., 3., 4.], Layout::Complex).unwrap();
/// assert_eq!(xhat, vec![4., 2., -2., -6.]);
/// ```
pub fn fft(samples: &[f64], layout: Layout) -> FftResult<Vec<f64>> {
    FftHandler::new().forward_transform(samples, layout)
}

/// Inverse transform through a default [`FftHandler`].
///
/// # Errors
/// See [`FftHandler::inverse_transform`].
pub fn ifft(samples: &[f64]) -> FftResult<Vec<f64>> {
    FftHandler::new().inverse_transform(samples)
}

/// Tests
#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(expected: &[f64], got: &[f64], dif: f64) {
        assert_eq!(expected.len(), got.len(), "Length mismatch");
        for (a, b) in expected.iter().zip(got.iter()) {
            if (a - b).abs() > dif {
                panic!("Large difference of values, got {} expected {}.", b, a)
            }
        }
    }

    #[test]
    /// Successive forward and inverse transform of real input
    fn test_real_roundtrip() {
        let x = [1.2, 3.4, 5.6, 7.8];
        let handler = FftHandler::new();
        let xhat = handler.forward_transform(&x, Layout::Real).unwrap();
        assert_close(
            &[18., 0., -4.4, 4.4, -4.4, 0., -4.4, -4.4],
            &xhat,
            1e-9,
        );
        let x_new = handler.inverse_transform(&xhat).unwrap();
        assert_close(&[1.2, 0., 3.4, 0., 5.6, 0., 7.8, 0.], &x_new, 1e-9);
    }

    #[test]
    /// Successive forward and inverse transform of complex input
    fn test_complex_roundtrip() {
        let z = [1., -2., 3., 4., 5., -6., 7., 8.];
        let handler = FftHandler::new();
        let zhat = handler.forward_transform(&z, Layout::Complex).unwrap();
        assert_close(&[16., 4., -8., 8., -4., -20., 0., 0.], &zhat, 1e-9);
        let z_new = handler.inverse_transform(&zhat).unwrap();
        assert_close(&z, &z_new, 1e-9);
    }

    #[test]
    fn test_rustfft_vs_naive() {
        let z: Vec<f64> = (0..18).map(|i| (i as f64).sin()).collect();
        let fast = FftHandler::new();
        let naive = FftHandler::with_backend(NaiveDftBackend);
        assert_close(
            &naive.forward_transform(&z, Layout::Complex).unwrap(),
            &fast.forward_transform(&z, Layout::Complex).unwrap(),
            1e-9,
        );
        assert_close(
            &naive.inverse_transform(&z).unwrap(),
            &fast.inverse_transform(&z).unwrap(),
            1e-9,
        );
    }

    #[test]
    fn test_odd_complex_input_is_rejected() {
        let handler = FftHandler::new();
        let err = FftError::InvalidInputShape { len: 3 };
        assert_eq!(
            handler.forward_transform(&[1., 2., 3.], Layout::Complex),
            Err(err.clone())
        );
        assert_eq!(handler.inverse_transform(&[1., 2., 3.]), Err(err));
        // odd length is fine for real input
        assert_eq!(
            handler.forward_transform(&[1., 2., 3.], Layout::Real).unwrap().len(),
            6
        );
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(fft(&[], Layout::Real).unwrap().is_empty());
        assert!(fft(&[], Layout::Complex).unwrap().is_empty());
        assert!(ifft(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_sample_is_identity() {
        assert_close(&[2.5, 0.], &fft(&[2.5], Layout::Real).unwrap(), 1e-12);
        assert_close(&[2.5, -1.], &ifft(&[2.5, -1.]).unwrap(), 1e-12);
    }

    #[test]
    fn test_normalization_none_keeps_scale() {
        let handler = FftHandler::new().normalization(Normalization::None);
        let x = [1., 0., 2., 0., 3., 0.];
        let xhat = handler.forward_transform(&x, Layout::Complex).unwrap();
        let scaled: Vec<f64> = x.iter().map(|v| v * 3.).collect();
        assert_close(&scaled, &handler.inverse_transform(&xhat).unwrap(), 1e-9);
    }

    #[test]
    fn test_measure_plan_roundtrip() {
        let handler = FftHandler::new().plan_flag(PlanFlag::Measure);
        let x = [0.5, -1.5, 2.25, 4., -3.];
        let xhat = handler.forward_transform(&x, Layout::Real).unwrap();
        let x_new = handler.inverse_transform(&xhat).unwrap();
        assert_close(&packing::expand_real_to_complex(&x), &x_new, 1e-9);
    }
}

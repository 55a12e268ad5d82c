//! Direct O(N²) DFT backend, used to cross-check `rustfft`.
use crate::backend::{allocate_zeroed, Direction, FftBackend, PlanFlag};
use crate::error::FftResult;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use std::f64::consts::PI;

/// Backend evaluating the DFT sum directly. Plan flags are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDftBackend;

/// Twiddle table and output scratch for a direct DFT.
pub struct NaiveDftPlan {
    twiddles: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl FftBackend for NaiveDftBackend {
    type Plan = NaiveDftPlan;

    #[allow(clippy::cast_precision_loss)]
    fn plan(&self, len: usize, direction: Direction, _flag: PlanFlag) -> FftResult<Self::Plan> {
        let sign = match direction {
            Direction::Forward => -1.,
            Direction::Inverse => 1.,
        };
        let mut twiddles = allocate_zeroed(len)?;
        for (k, w) in twiddles.iter_mut().enumerate() {
            let angle = sign * 2. * PI * k as f64 / len as f64;
            *w = Complex::new(angle.cos(), angle.sin());
        }
        let scratch = allocate_zeroed(len)?;
        Ok(NaiveDftPlan { twiddles, scratch })
    }

    fn execute(&self, plan: &mut Self::Plan, buffer: &mut [Complex<f64>]) {
        let n = plan.twiddles.len();
        for (k, out) in plan.scratch.iter_mut().enumerate() {
            let mut acc = Complex::zero();
            for (t, x) in buffer.iter().enumerate() {
                acc = acc + x * plan.twiddles[(k * t) % n];
            }
            *out = acc;
        }
        buffer.copy_from_slice(&plan.scratch);
    }
}

//! The FFT engine seam.
//!
//! A backend hands out buffers and transform plans. [`FftHandler`](crate::FftHandler)
//! acquires both at the start of a call and gives them back before returning,
//! also on error paths. Backends are expected to keep no state between calls.
use crate::error::{FftError, FftResult};
use log::{debug, trace};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftDirection, FftPlanner, FftPlannerScalar};
use std::mem::size_of;
use std::sync::Arc;
use std::time::Instant;

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Discrete Fourier transform, `exp(-2πi kn/N)` kernel.
    Forward,
    /// Un-normalized inverse, `exp(+2πi kn/N)` kernel.
    Inverse,
}

impl From<Direction> for FftDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Inverse => FftDirection::Inverse,
        }
    }
}

/// Planning effort requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlanFlag {
    /// Pick a plan from heuristics only.
    #[default]
    Estimate,
    /// Time candidate plans and keep the fastest.
    Measure,
}

/// An FFT engine consumed by [`FftHandler`](crate::FftHandler).
///
/// Buffers hold complex values; `plan` receives the number of complex
/// samples. Plans and buffers are released through `release_plan` and
/// `release_buffer`, which default to dropping the value.
pub trait FftBackend: Sync {
    /// Backend specific precomputed transform.
    type Plan;

    /// Allocates a zeroed buffer of `len` complex values.
    ///
    /// # Errors
    /// [`FftError::BackendAllocationFailure`] if the memory cannot be reserved.
    fn allocate(&self, len: usize) -> FftResult<Vec<Complex<f64>>> {
        allocate_zeroed(len)
    }

    /// Creates a plan for `len` complex samples.
    ///
    /// # Errors
    /// [`FftError::BackendAllocationFailure`] if plan resources cannot be reserved.
    fn plan(&self, len: usize, direction: Direction, flag: PlanFlag) -> FftResult<Self::Plan>;

    /// Executes `plan` in place on `buffer`.
    fn execute(&self, plan: &mut Self::Plan, buffer: &mut [Complex<f64>]);

    /// Gives a plan back to the backend.
    fn release_plan(&self, plan: Self::Plan) {
        drop(plan);
    }

    /// Gives a buffer back to the backend.
    fn release_buffer(&self, buffer: Vec<Complex<f64>>) {
        drop(buffer);
    }

    /// Process-wide teardown. Call once at shutdown, never between transforms.
    fn cleanup(&self) {}
}

/// Fallible zeroed allocation shared by the bundled backends.
///
/// # Errors
/// [`FftError::BackendAllocationFailure`] carrying the requested byte size.
pub fn allocate_zeroed(len: usize) -> FftResult<Vec<Complex<f64>>> {
    let requested = len.saturating_mul(size_of::<Complex<f64>>());
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FftError::BackendAllocationFailure { requested })?;
    buffer.resize(len, Complex::zero());
    trace!("allocated {} bytes", requested);
    Ok(buffer)
}

/// Buffer and plan held for the duration of one transform call.
///
/// Whatever has been acquired is released on drop.
pub(crate) struct CallScope<'a, B: FftBackend> {
    backend: &'a B,
    buffer: Option<Vec<Complex<f64>>>,
    plan: Option<B::Plan>,
}

impl<'a, B: FftBackend> CallScope<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self {
            backend,
            buffer: None,
            plan: None,
        }
    }

    /// Allocates the call buffer and fills it with `data`.
    pub(crate) fn load(&mut self, data: &[Complex<f64>]) -> FftResult<()> {
        let mut buffer = self.backend.allocate(data.len())?;
        buffer.copy_from_slice(data);
        self.buffer = Some(buffer);
        Ok(())
    }

    pub(crate) fn plan(&mut self, len: usize, direction: Direction, flag: PlanFlag) -> FftResult<()> {
        self.plan = Some(self.backend.plan(len, direction, flag)?);
        Ok(())
    }

    pub(crate) fn execute(&mut self) {
        if let (Some(plan), Some(buffer)) = (self.plan.as_mut(), self.buffer.as_mut()) {
            self.backend.execute(plan, buffer);
        }
    }

    /// Copies the buffer out into caller-owned memory.
    pub(crate) fn output(&self) -> Vec<Complex<f64>> {
        self.buffer.clone().unwrap_or_default()
    }
}

impl<B: FftBackend> Drop for CallScope<'_, B> {
    fn drop(&mut self) {
        if let Some(plan) = self.plan.take() {
            self.backend.release_plan(plan);
        }
        if let Some(buffer) = self.buffer.take() {
            trace!("releasing buffer of {} complex values", buffer.len());
            self.backend.release_buffer(buffer);
        }
    }
}

/// Backend over the `rustfft` planners.
///
/// # Example
/// ```
/// use packfft::{FftHandler, Layout, RustFftBackend};
/// let handler = FftHandler::with_backend(RustFftBackend);
/// let xhat = handler.forward_transform(&[1., 2.], Layout::Real).unwrap();
/// assert_eq!(xhat.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftBackend;

/// A `rustfft` plan together with its in-place scratch space.
pub struct RustFftPlan {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl RustFftPlan {
    fn new(fft: Arc<dyn Fft<f64>>) -> FftResult<Self> {
        let scratch = allocate_zeroed(fft.get_inplace_scratch_len())?;
        Ok(Self { fft, scratch })
    }

    fn run(&mut self, buffer: &mut [Complex<f64>]) {
        self.fft.process_with_scratch(buffer, &mut self.scratch);
    }
}

impl RustFftBackend {
    /// Times one execution of each candidate and keeps the fastest.
    fn measure(len: usize, direction: FftDirection) -> FftResult<RustFftPlan> {
        let candidates = [
            ("simd", FftPlanner::<f64>::new().plan_fft(len, direction)),
            ("scalar", FftPlannerScalar::<f64>::new().plan_fft(len, direction)),
        ];
        let mut trial = allocate_zeroed(len)?;
        let mut best: Option<(&str, u128, RustFftPlan)> = None;
        for (name, fft) in candidates {
            let mut plan = RustFftPlan::new(fft)?;
            trial.iter_mut().for_each(|v| *v = Complex::zero());
            let start = Instant::now();
            plan.run(&mut trial);
            let elapsed = start.elapsed().as_nanos();
            trace!("candidate {} took {} ns", name, elapsed);
            if best.as_ref().map_or(true, |(_, t, _)| elapsed < *t) {
                best = Some((name, elapsed, plan));
            }
        }
        match best {
            Some((name, _, plan)) => {
                debug!("measured plan for n = {}: {}", len, name);
                Ok(plan)
            }
            None => RustFftPlan::new(FftPlanner::<f64>::new().plan_fft(len, direction)),
        }
    }
}

impl FftBackend for RustFftBackend {
    type Plan = RustFftPlan;

    fn plan(&self, len: usize, direction: Direction, flag: PlanFlag) -> FftResult<Self::Plan> {
        let direction = FftDirection::from(direction);
        match flag {
            PlanFlag::Estimate => {
                RustFftPlan::new(FftPlanner::<f64>::new().plan_fft(len, direction))
            }
            PlanFlag::Measure => Self::measure(len, direction),
        }
    }

    fn execute(&self, plan: &mut Self::Plan, buffer: &mut [Complex<f64>]) {
        plan.run(buffer);
    }
}

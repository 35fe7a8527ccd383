//! passfft is a mixed-radix FFT library which computes complex-to-complex and real-to-real (halfcomplex) transforms of
//! any length.
//!
//! A transform of length `N` is split into factors, and each factor is computed by a "pass": dedicated butterflies for
//! radix 2, 3, 4, 5, 7, 8 and 11 (radix 2, 3, 4 and 5 for real data), a direct pass for other small primes, and
//! Bluestein's algorithm for large primes. Long complex transforms whose length is a multiple of the native SIMD width
//! can additionally be vectorized, by running independent sub-transforms in separate SIMD lanes.
//!
//! ### Usage
//!
//! The recommended way to use passfft is to create a [`FftPlanner`](crate::FftPlanner) instance and then call its
//! `plan_complex` or `plan_real` method. Plans are immutable, compute both directions, and can be reused and shared
//! between threads.
//!
//! ```
//! // Perform a forward FFT of size 1234, then an inverse FFT that restores the input
//! use passfft::{FftDirection, FftPlanner, Normalization, num_complex::Complex};
//!
//! let mut planner = FftPlanner::<f32>::new();
//! let fft = planner.plan_complex(1234);
//!
//! let mut buffer = vec![Complex{ re: 1.0f32, im: 0.0f32 }; 1234];
//! fft.process(&mut buffer, 1.0, FftDirection::Forward);
//! fft.process(&mut buffer, Normalization::Full.scale_factor(1234), FftDirection::Inverse);
//! ```
//!
//! Real transforms use FFTPACK's halfcomplex layout. [`RealFft`](crate::RealFft) can convert it to and from the usual
//! `N / 2 + 1` complex bins:
//!
//! ```
//! use passfft::{RealFft, num_complex::Complex};
//!
//! let fft = RealFft::<f64>::new(6, true);
//! let mut signal = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let mut spectrum = vec![Complex::new(0.0, 0.0); fft.spectrum_len()];
//! fft.process_r2c(&mut signal, &mut spectrum, 1.0);
//! assert!((spectrum[0].re - 21.0).abs() < 1e-12);
//! assert!((spectrum[3].re + 3.0).abs() < 1e-12);
//! ```
//!
//! ### Normalization
//!
//! passfft does not normalize outputs by itself. Every `process` method takes a scale factor which is applied to the
//! result; [`Normalization`](crate::Normalization) computes the usual choices.
//!
//! ### Scratch
//!
//! The `process` methods allocate scratch space on every call. Callers who transform many buffers should call
//! `process_with_scratch` instead, with a scratch buffer of at least `scratch_len()` elements.
//!
//! ### Feature Flags
//!
//! * `avx` (Enabled by default)
//!
//!     On x86_64 targets compiled with `target_feature = "avx"`, vectorized passes pack 8 x f32 or 4 x f64 into one
//!     lane vector.
//!
//! * `sse` (Enabled by default)
//!
//!     On other x86_64 targets, vectorized passes pack 4 x f32 or 2 x f64 into one lane vector.
//!
//! * `neon` (Enabled by default)
//!
//!     On AArch64 targets, vectorized passes pack 4 x f32 or 2 x f64 into one lane vector.
//!
//! On every other platform these features do nothing, and plans never build vectorized passes.

use std::fmt::Display;

pub use num_complex;
pub use num_traits;

mod algorithm;
mod array_utils;
mod common;
mod math_utils;
mod plan;
mod simd;
mod transform;
mod twiddles;

#[cfg(test)]
mod test_utils;

pub use crate::common::FftNum;
pub use crate::math_utils::{good_size_complex, good_size_real};
pub use crate::plan::{FftPlanner, PlanOptions};
pub use crate::simd::{FftVector, Lanes};
pub use crate::transform::{make_complex_plan, make_real_plan, ComplexFft, RealFft};
pub use crate::twiddles::UnityRoots;

/// Represents a FFT direction, IE a forward FFT or an inverse FFT
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum FftDirection {
    Forward,
    Inverse,
}
impl FftDirection {
    /// Returns the opposite direction of `self`.
    ///
    ///  - If `self` is `FftDirection::Forward`, returns `FftDirection::Inverse`
    ///  - If `self` is `FftDirection::Inverse`, returns `FftDirection::Forward`
    #[inline]
    pub fn opposite_direction(&self) -> FftDirection {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}
impl Display for FftDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Forward => f.write_str("Forward"),
            Self::Inverse => f.write_str("Inverse"),
        }
    }
}

/// Scale factor conventions for the `scale` argument of the `process` methods.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Normalization {
    /// Leave the result unscaled.
    None,
    /// Scale by `1 / sqrt(len)`. Applying this in both directions gives an orthonormal round trip.
    Ortho,
    /// Scale by `1 / len`. Applying this in one direction gives an exact round trip.
    Full,
}
impl Normalization {
    pub fn scale_factor<T: FftNum>(self, len: usize) -> T {
        let len = len as f64;
        let factor = match self {
            Self::None => 1.0,
            Self::Ortho => 1.0 / len.sqrt(),
            Self::Full => 1.0 / len,
        };
        T::from_f64(factor).unwrap()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(FftDirection::Forward.opposite_direction(), FftDirection::Inverse);
        assert_eq!(FftDirection::Inverse.opposite_direction(), FftDirection::Forward);
        assert_eq!(FftDirection::Inverse.to_string(), "Inverse");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(Normalization::None.scale_factor::<f64>(16), 1.0);
        assert_eq!(Normalization::Ortho.scale_factor::<f64>(16), 0.25);
        assert_eq!(Normalization::Full.scale_factor::<f32>(16), 0.0625);
    }
}

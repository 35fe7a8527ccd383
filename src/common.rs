use num_traits::{FromPrimitive, Signed};
use std::fmt::Debug;

use crate::simd::{FftVector, NativeF32, NativeF64};

/// Generic floating point number, implemented for f32 and f64
///
/// Every `FftNum` is also the scalar element type of its own transforms.
pub trait FftNum: Copy + FromPrimitive + Signed + Sync + Send + Debug + 'static + FftVector<Self> {
    /// The lane vector that vectorized passes use to run several independent transforms at once.
    ///
    /// On targets without a supported SIMD width this is the scalar type itself, and plans never build vectorized passes.
    type Vector: FftVector<Self>;
}

impl FftNum for f32 {
    type Vector = NativeF32;
}
impl FftNum for f64 {
    type Vector = NativeF64;
}

/// Converts a constant into `T`. Every constant used by the passes is exactly representable in f32 and f64.
#[inline(always)]
pub(crate) fn constant<T: FftNum>(value: f64) -> T {
    T::from_f64(value).unwrap()
}

/// Number of lanes in `T`'s native lane vector.
#[inline(always)]
pub(crate) fn native_lanes<T: FftNum>() -> usize {
    <T::Vector as FftVector<T>>::LANES
}

// Prints an error raised by an in-place FFT algorithm's `process_inplace` method
// Marked cold and inline never to keep all formatting code out of the many monomorphized process methods
#[cold]
#[inline(never)]
pub fn fft_error_inplace(
    expected_len: usize,
    actual_len: usize,
    expected_scratch: usize,
    actual_scratch: usize,
) {
    assert!(
        actual_len >= expected_len,
        "Provided FFT buffer was too small. Expected len = {}, got len = {}",
        expected_len,
        actual_len
    );
    assert_eq!(
        actual_len % expected_len,
        0,
        "Input FFT buffer must be a multiple of FFT length. Expected multiple of {}, got len = {}",
        expected_len,
        actual_len
    );
    assert!(
        actual_scratch >= expected_scratch,
        "Not enough scratch space was provided. Expected scratch len >= {}, got scratch len = {}",
        expected_scratch,
        actual_scratch
    );
}

// Prints an error raised by the spectrum packing helpers of the real transform
#[cold]
#[inline(never)]
pub fn fft_error_spectrum(expected_len: usize, actual_len: usize, expected_bins: usize, actual_bins: usize) {
    assert_eq!(
        actual_len, expected_len,
        "Halfcomplex buffer has the wrong length. Expected len = {}, got len = {}",
        expected_len, actual_len
    );
    assert_eq!(
        actual_bins, expected_bins,
        "Spectrum buffer has the wrong length. Expected {} bins, got {}",
        expected_bins, actual_bins
    );
}

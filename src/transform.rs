use std::sync::Arc;

use num_complex::Complex;
use num_traits::Zero;

use crate::algorithm::{BufferSide, ComplexPass, RealPass};
use crate::common::{fft_error_inplace, fft_error_spectrum, FftNum};
use crate::plan::{make_complex_pass, make_real_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::{scale_complex, UnityRoots};
use crate::FftDirection;

/// A complex-to-complex FFT of a fixed length.
///
/// The plan is immutable, computes both directions, and can be shared between threads. Execution is generic over the
/// element type: `Complex<f32>` / `Complex<f64>` for a single signal, or `Complex<Lanes<T, N>>` for `N` interleaved
/// signals.
///
/// ~~~
/// use passfft::num_complex::Complex;
/// use passfft::{ComplexFft, FftDirection, Normalization};
///
/// let fft = ComplexFft::<f64>::new(4, true);
/// let mut buffer = vec![Complex::new(1.0, 0.0); 4];
/// fft.process(&mut buffer, 1.0, FftDirection::Forward);
/// assert_eq!(buffer[0], Complex::new(4.0, 0.0));
///
/// fft.process(&mut buffer, Normalization::Full.scale_factor(4), FftDirection::Inverse);
/// assert_eq!(buffer[3], Complex::new(1.0, 0.0));
/// ~~~
pub struct ComplexFft<T> {
    len: usize,
    plan: ComplexPass<T>,
}

impl<T: FftNum> ComplexFft<T> {
    /// Plans a transform of length `len` with the default options.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn new(len: usize, vectorize: bool) -> Self {
        Self::with_options(len, vectorize, &PlanOptions::default())
    }

    pub fn with_options(len: usize, vectorize: bool, options: &PlanOptions) -> Self {
        assert!(len > 0, "FFT length must be nonzero");
        let roots = Arc::new(UnityRoots::new(len));
        let plan = make_complex_pass(1, 1, len, &roots, vectorize, options);
        let fft = Self { len, plan };
        tracing::debug!(
            len,
            vectorize,
            scratch_len = fft.scratch_len(),
            root = fft.plan.name(),
            "planned complex FFT"
        );
        fft
    }

    /// The length of the transforms this plan computes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of scratch elements `process_with_scratch` needs.
    pub fn scratch_len(&self) -> usize {
        let copy_len = if self.plan.needs_copy() { self.len } else { 0 };
        copy_len + self.plan.bufsize()
    }

    /// Computes an FFT in-place, and multiplies the result by `scale`.
    ///
    /// `buffer` is divided into chunks of `self.len()`, and each chunk is transformed separately. `scratch` must hold
    /// at least `self.scratch_len()` elements. Its contents are undefined afterwards.
    ///
    /// # Panics
    /// Panics if `buffer.len()` is not a multiple of `self.len()`, or if `scratch` is too short.
    pub fn process_with_scratch<V: FftVector<T>>(
        &self,
        buffer: &mut [Complex<V>],
        scratch: &mut [Complex<V>],
        scale: T,
        direction: FftDirection,
    ) {
        let required_scratch = self.scratch_len();
        if buffer.len() < self.len || buffer.len() % self.len != 0 || scratch.len() < required_scratch {
            fft_error_inplace(self.len, buffer.len(), required_scratch, scratch.len());
            return; // Unreachable, because fft_error_inplace asserts, but it helps codegen to put it here
        }

        let copy_len = if self.plan.needs_copy() { self.len } else { 0 };
        let (copy, buf) = scratch[..required_scratch].split_at_mut(copy_len);
        for chunk in buffer.chunks_exact_mut(self.len) {
            match self.plan.exec(chunk, copy, buf, direction) {
                BufferSide::Input => {
                    if scale != T::one() {
                        for value in chunk.iter_mut() {
                            *value = scale_complex(*value, scale);
                        }
                    }
                }
                BufferSide::Copy => {
                    if scale != T::one() {
                        for (value, result) in chunk.iter_mut().zip(copy.iter()) {
                            *value = scale_complex(*result, scale);
                        }
                    } else {
                        chunk.copy_from_slice(copy);
                    }
                }
            }
        }
    }

    /// Computes an FFT in-place, allocating the scratch it needs.
    pub fn process<V: FftVector<T>>(&self, buffer: &mut [Complex<V>], scale: T, direction: FftDirection) {
        let mut scratch = vec![Complex::zero(); self.scratch_len()];
        self.process_with_scratch(buffer, &mut scratch, scale, direction);
    }
}

/// A real-to-real FFT of a fixed length, working on FFTPACK's halfcomplex layout.
///
/// The forward transform turns `N` reals into `[r0, r1, i1, r2, i2, ...]`, the non-redundant half of the spectrum:
/// `r0` is the DC term, `(rk, ik)` the real and imaginary parts of bin `k`, and for even `N` the last element is the
/// real Nyquist term. The inverse transform reads the same layout and is unnormalized.
pub struct RealFft<T> {
    len: usize,
    plan: RealPass<T>,
}

impl<T: FftNum> RealFft<T> {
    /// Plans a transform of length `len` with the default options.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn new(len: usize, vectorize: bool) -> Self {
        Self::with_options(len, vectorize, &PlanOptions::default())
    }

    pub fn with_options(len: usize, vectorize: bool, options: &PlanOptions) -> Self {
        assert!(len > 0, "FFT length must be nonzero");
        let roots = Arc::new(UnityRoots::new(len));
        let plan = make_real_pass(1, 1, len, &roots, vectorize, options);
        let fft = Self { len, plan };
        tracing::debug!(
            len,
            vectorize,
            scratch_len = fft.scratch_len(),
            root = fft.plan.name(),
            "planned real FFT"
        );
        fft
    }

    /// The length of the transforms this plan computes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of complex bins of a spectrum: `len / 2 + 1`.
    pub fn spectrum_len(&self) -> usize {
        self.len / 2 + 1
    }

    /// The number of scratch elements `process_with_scratch` needs.
    pub fn scratch_len(&self) -> usize {
        let copy_len = if self.plan.needs_copy() { self.len } else { 0 };
        copy_len + self.plan.bufsize()
    }

    /// Computes a real FFT in-place, and multiplies the result by `scale`.
    ///
    /// Forward transforms turn real signals into halfcomplex spectra, inverse transforms do the reverse. `buffer` is
    /// divided into chunks of `self.len()`, and each chunk is transformed separately.
    ///
    /// # Panics
    /// Panics if `buffer.len()` is not a multiple of `self.len()`, or if `scratch` is shorter than
    /// `self.scratch_len()`.
    pub fn process_with_scratch<V: FftVector<T>>(
        &self,
        buffer: &mut [V],
        scratch: &mut [V],
        scale: T,
        direction: FftDirection,
    ) {
        let required_scratch = self.scratch_len();
        if buffer.len() < self.len || buffer.len() % self.len != 0 || scratch.len() < required_scratch {
            fft_error_inplace(self.len, buffer.len(), required_scratch, scratch.len());
            return; // Unreachable, because fft_error_inplace asserts, but it helps codegen to put it here
        }

        let copy_len = if self.plan.needs_copy() { self.len } else { 0 };
        let (copy, buf) = scratch[..required_scratch].split_at_mut(copy_len);
        for chunk in buffer.chunks_exact_mut(self.len) {
            match self.plan.exec(chunk, copy, buf, direction) {
                BufferSide::Input => {
                    if scale != T::one() {
                        for value in chunk.iter_mut() {
                            *value = *value * scale;
                        }
                    }
                }
                BufferSide::Copy => {
                    if scale != T::one() {
                        for (value, result) in chunk.iter_mut().zip(copy.iter()) {
                            *value = *result * scale;
                        }
                    } else {
                        chunk.copy_from_slice(copy);
                    }
                }
            }
        }
    }

    /// Computes a real FFT in-place, allocating the scratch it needs.
    pub fn process<V: FftVector<T>>(&self, buffer: &mut [V], scale: T, direction: FftDirection) {
        let mut scratch = vec![V::zero(); self.scratch_len()];
        self.process_with_scratch(buffer, &mut scratch, scale, direction);
    }

    /// Unpacks one halfcomplex spectrum into `len / 2 + 1` complex bins.
    ///
    /// # Panics
    /// Panics if `halfcomplex.len() != self.len()` or `spectrum.len() != self.spectrum_len()`.
    pub fn halfcomplex_to_spectrum<V: FftVector<T>>(&self, halfcomplex: &[V], spectrum: &mut [Complex<V>]) {
        if halfcomplex.len() != self.len || spectrum.len() != self.spectrum_len() {
            fft_error_spectrum(self.len, halfcomplex.len(), self.spectrum_len(), spectrum.len());
            return;
        }

        spectrum[0] = Complex::new(halfcomplex[0], V::zero());
        for k in 1..(self.len + 1) / 2 {
            spectrum[k] = Complex::new(halfcomplex[2 * k - 1], halfcomplex[2 * k]);
        }
        if self.len % 2 == 0 {
            spectrum[self.len / 2] = Complex::new(halfcomplex[self.len - 1], V::zero());
        }
    }

    /// Packs `len / 2 + 1` complex bins into one halfcomplex spectrum.
    ///
    /// The imaginary parts of the DC bin and, for even lengths, of the Nyquist bin are ignored.
    ///
    /// # Panics
    /// Panics if `halfcomplex.len() != self.len()` or `spectrum.len() != self.spectrum_len()`.
    pub fn spectrum_to_halfcomplex<V: FftVector<T>>(&self, spectrum: &[Complex<V>], halfcomplex: &mut [V]) {
        if halfcomplex.len() != self.len || spectrum.len() != self.spectrum_len() {
            fft_error_spectrum(self.len, halfcomplex.len(), self.spectrum_len(), spectrum.len());
            return;
        }

        halfcomplex[0] = spectrum[0].re;
        for k in 1..(self.len + 1) / 2 {
            halfcomplex[2 * k - 1] = spectrum[k].re;
            halfcomplex[2 * k] = spectrum[k].im;
        }
        if self.len % 2 == 0 {
            halfcomplex[self.len - 1] = spectrum[self.len / 2].re;
        }
    }

    /// Forward transform of one real signal into `len / 2 + 1` complex bins. `input` is overwritten with the
    /// halfcomplex result.
    pub fn process_r2c(&self, input: &mut [T], output: &mut [Complex<T>], scale: T) {
        if input.len() != self.len || output.len() != self.spectrum_len() {
            fft_error_spectrum(self.len, input.len(), self.spectrum_len(), output.len());
            return;
        }
        self.process(input, scale, FftDirection::Forward);
        self.halfcomplex_to_spectrum(input, output);
    }

    /// Inverse transform of `len / 2 + 1` complex bins into one real signal.
    pub fn process_c2r(&self, input: &[Complex<T>], output: &mut [T], scale: T) {
        self.spectrum_to_halfcomplex(input, output);
        self.process(output, scale, FftDirection::Inverse);
    }

    /// Computes the discrete Hartley transform `H_k = sum_n x_n * (cos + sin)(2*pi*k*n/N)` in-place, and multiplies
    /// the result by `scale`. Applying it twice with `scale = 1 / N` restores the input.
    pub fn process_hartley<V: FftVector<T>>(&self, buffer: &mut [V], scale: T) {
        let mut scratch = vec![V::zero(); self.scratch_len().max(self.len)];
        self.process_with_scratch(buffer, &mut scratch, scale, FftDirection::Forward);

        let len = self.len;
        for chunk in buffer.chunks_exact_mut(len) {
            let halfcomplex = &mut scratch[..len];
            halfcomplex.copy_from_slice(chunk);
            chunk[0] = halfcomplex[0];
            for k in 1..(len + 1) / 2 {
                // forward bins are sum x * (cos - i sin)
                let (re, im) = (halfcomplex[2 * k - 1], halfcomplex[2 * k]);
                chunk[k] = re - im;
                chunk[len - k] = re + im;
            }
            if len % 2 == 0 {
                chunk[len / 2] = halfcomplex[len - 1];
            }
        }
    }
}

/// Plans a complex transform of length `len` with the default options.
pub fn make_complex_plan<T: FftNum>(len: usize, vectorize: bool) -> ComplexFft<T> {
    ComplexFft::new(len, vectorize)
}

/// Plans a real transform of length `len` with the default options.
pub fn make_real_plan<T: FftNum>(len: usize, vectorize: bool) -> RealFft<T> {
    RealFft::new(len, vectorize)
}

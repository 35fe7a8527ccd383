use std::sync::Arc;

use num_complex::Complex;

use super::{BufferSide, ComplexPass};
use crate::array_utils::lanes_from_scalars;
use crate::common::{native_lanes, FftNum};
use crate::plan::{make_complex_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::UnityRoots;

/// Computes a length that is a multiple of the native lane count by packing independent sub-transforms into lanes.
///
/// A scalar radix-`LANES` pass first splits the transform into `LANES` interleaved sub-transforms of length
/// `ip / LANES`. Sub-transform `j` is then carried in lane `j`, so a single length `ip / LANES` plan computes all
/// of them at once, and the result is de-interleaved back into the input buffer.
pub(crate) struct Vectorized<T> {
    ip: usize,
    vlen: usize,
    spass: Box<ComplexPass<T>>,
    vpass: Box<ComplexPass<T>>,
}

impl<T: FftNum> Vectorized<T> {
    pub fn new(ip: usize, roots: &Arc<UnityRoots<T>>, options: &PlanOptions) -> Self {
        let vlen = native_lanes::<T>();
        assert!(
            vlen > 1 && ip % vlen == 0,
            "Cannot vectorize length {} with {} lanes",
            ip,
            vlen
        );

        let spass = make_complex_pass(1, ip / vlen, vlen, roots, false, options);
        let vpass = make_complex_pass(1, 1, ip / vlen, roots, false, options);
        tracing::trace!(ip, vlen, inner = vpass.name(), "built vectorized pass");

        Self {
            ip,
            vlen,
            spass: Box::new(spass),
            vpass: Box::new(vpass),
        }
    }

    pub fn bufsize(&self) -> usize {
        2 * self.ip + (self.vlen * self.vpass.bufsize()).max(self.spass.bufsize())
    }

    pub fn exec<V: FftVector<T>, const FWD: bool>(&self, cc: &mut [Complex<V>], buf: &mut [Complex<V>]) -> BufferSide {
        if let (Some(cc), Some(buf)) = (V::as_scalar_slice(cc), V::as_scalar_slice(buf)) {
            self.exec_scalar::<FWD>(cc, buf);
        } else {
            self.exec_blocks::<V, FWD>(cc, buf);
        }
        BufferSide::Input
    }

    fn exec_scalar<const FWD: bool>(&self, cc: &mut [Complex<T>], buf: &mut [Complex<T>]) {
        let (ip, vlen) = (self.ip, self.vlen);
        let m = ip / vlen;
        let (cc2_scalars, rest) = buf.split_at_mut(ip);
        let (ch2_scalars, buf2_scalars) = rest.split_at_mut(ip);

        // run the scalar pass
        let side = self.spass.exec_dir::<T, FWD>(cc, ch2_scalars, buf2_scalars);

        // lane j gets sub-transform j
        let cc2: &mut [Complex<T::Vector>] = lanes_from_scalars(cc2_scalars);
        {
            let res: &[Complex<T>] = match side {
                BufferSide::Input => cc,
                BufferSide::Copy => ch2_scalars,
            };
            for i in 0..m {
                for j in 0..vlen {
                    let value = res[j * m + i];
                    cc2[i].re.replace(j, value.re);
                    cc2[i].im.replace(j, value.im);
                }
            }
        }

        // run the lane pass
        let ch2: &mut [Complex<T::Vector>] = lanes_from_scalars(ch2_scalars);
        let buf2: &mut [Complex<T::Vector>] = lanes_from_scalars(buf2_scalars);
        let side = self.vpass.exec_dir::<T::Vector, FWD>(cc2, ch2, buf2);
        let res: &[Complex<T::Vector>] = match side {
            BufferSide::Input => cc2,
            BufferSide::Copy => ch2,
        };

        for i in 0..m {
            for j in 0..vlen {
                cc[i * vlen + j] = Complex::new(res[i].re.extract(j), res[i].im.extract(j));
            }
        }
    }

    // Input that is already made of lanes can't be packed further, so the sub-transforms run one after another
    fn exec_blocks<V: FftVector<T>, const FWD: bool>(&self, cc: &mut [Complex<V>], buf: &mut [Complex<V>]) {
        let (ip, vlen) = (self.ip, self.vlen);
        let m = ip / vlen;
        let (cc2, rest) = buf.split_at_mut(ip);
        let (ch2, buf2) = rest.split_at_mut(ip);

        match self.spass.exec_dir::<V, FWD>(cc, ch2, buf2) {
            BufferSide::Input => cc2.copy_from_slice(cc),
            BufferSide::Copy => cc2.copy_from_slice(ch2),
        }

        for (block, block_copy) in cc2.chunks_exact_mut(m).zip(ch2.chunks_exact_mut(m)) {
            if self.vpass.exec_dir::<V, FWD>(block, block_copy, buf2) == BufferSide::Copy {
                block.copy_from_slice(block_copy);
            }
        }

        transpose::transpose(cc2, cc, m, vlen);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::{check_complex_pass, random_signal};
    use crate::FftDirection;
    use num_traits::Zero;

    #[test]
    fn test_vectorized() {
        let vlen = native_lanes::<f64>();
        if vlen == 1 {
            return;
        }
        for &len in &[vlen * 2, vlen * 3, vlen * 11, vlen * 113, 512, 1200] {
            let roots = Arc::new(UnityRoots::new(len));
            let pass = ComplexPass::Vectorized(Vectorized::new(len, &roots, &PlanOptions::default()));
            check_complex_pass(&pass, len, FftDirection::Forward);
            check_complex_pass(&pass, len, FftDirection::Inverse);
        }
    }

    // Lane input takes the sequential path, which must agree with the packed path lane by lane
    #[test]
    fn test_vectorized_lane_input() {
        use crate::simd::Lanes;

        let vlen = native_lanes::<f64>();
        if vlen == 1 {
            return;
        }
        let len = vlen * 40;
        let roots = Arc::new(UnityRoots::new(len));
        let pass = Vectorized::new(len, &roots, &PlanOptions::default());

        let first = random_signal::<f64>(len);
        let second: Vec<Complex<f64>> = first.iter().map(|&c| c * 2.0 - Complex::new(1.0, 0.5)).collect();
        let mut lanes: Vec<Complex<Lanes<f64, 2>>> = first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| Complex::new(Lanes([a.re, b.re]), Lanes([a.im, b.im])))
            .collect();
        let mut scratch = vec![Complex::zero(); pass.bufsize()];
        pass.exec::<_, true>(&mut lanes, &mut scratch);

        for (lane, signal) in [first, second].iter().enumerate() {
            let mut expected = signal.clone();
            let mut scratch = vec![Complex::zero(); pass.bufsize()];
            pass.exec::<f64, true>(&mut expected, &mut scratch);
            for (got, expected) in lanes.iter().zip(expected.iter()) {
                let got = Complex::new(got.re.0[lane], got.im.0[lane]);
                assert!((got - expected).norm() < 1e-9, "lane {}: {} != {}", lane, got, expected);
            }
        }
    }
}

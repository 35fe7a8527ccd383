use std::sync::Arc;

use num_complex::Complex;
use num_traits::Zero;
use strength_reduce::StrengthReducedUsize;

use super::{root_stride, BufferSide, ComplexPass};
use crate::array_utils::lanes_from_scalars;
use crate::common::{native_lanes, FftNum};
use crate::math_utils::{complex_factors, split_into_packets};
use crate::plan::{make_complex_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::{special_mul, UnityRoots};

/// Runs `passes` one after another, ping-ponging between `p1` and `p2`. Returns the buffer that holds the result.
pub(crate) fn run_chain<T: FftNum, V: FftVector<T>, const FWD: bool>(
    passes: &[ComplexPass<T>],
    p1: &mut [Complex<V>],
    p2: &mut [Complex<V>],
    buf: &mut [Complex<V>],
) -> BufferSide {
    let mut side = BufferSide::Input;
    for pass in passes {
        let step = match side {
            BufferSide::Input => pass.exec_dir::<V, FWD>(p1, p2, buf),
            BufferSide::Copy => pass.exec_dir::<V, FWD>(p2, p1, buf),
        };
        if step == BufferSide::Copy {
            side = side.flip();
        }
    }
    side
}

/// Composes a composite factor `ip` out of one sub-pass per factor.
///
/// With `l1 == ido == 1` the sub-passes simply run in sequence on the whole buffer. Otherwise every column
/// `(i, k)` of the input is gathered into scratch space, transformed there by the sub-passes, then multiplied by this
/// pass's twiddles and scattered back. When running on scalars and the target has SIMD lanes, `LANES` columns are
/// gathered at once and transformed together.
pub(crate) struct MixedRadix<T> {
    l1: usize,
    ido: usize,
    ip: usize,
    passes: Box<[ComplexPass<T>]>,
    twiddles: Box<[Complex<T>]>,
    bufsize: usize,
    needs_copy: bool,
}

impl<T: FftNum> MixedRadix<T> {
    pub fn new(
        l1: usize,
        ido: usize,
        ip: usize,
        roots: &Arc<UnityRoots<T>>,
        vectorize: bool,
        options: &PlanOptions,
    ) -> Self {
        let rfct = root_stride(l1 * ido * ip, roots);
        let mut twiddles = vec![Complex::zero(); (ip - 1) * (ido - 1)];
        for j in 1..ip {
            for i in 1..ido {
                twiddles[(j - 1) + (i - 1) * (ip - 1)] = roots[rfct * j * l1 * i];
            }
        }

        let limit = if vectorize { options.packet_split_threshold } else { usize::MAX };
        let mut passes = Vec::new();
        let mut l1l = 1;
        if ip <= limit {
            for factor in complex_factors(ip) {
                passes.push(make_complex_pass(l1l, ip / (factor * l1l), factor, roots, vectorize, options));
                l1l *= factor;
            }
        } else {
            // two balanced packets keep the per-column scratch small
            for packet in split_into_packets(ip) {
                passes.push(make_complex_pass(l1l, ip / (packet * l1l), packet, roots, false, options));
                l1l *= packet;
            }
        }

        let mut bufsize = passes.iter().map(ComplexPass::bufsize).max().unwrap_or(0);
        let mut needs_copy = passes.iter().any(ComplexPass::needs_copy);
        if l1 != 1 || ido != 1 {
            needs_copy = true;
            bufsize += 2 * ip;
            bufsize *= native_lanes::<T>();
        }

        Self {
            l1,
            ido,
            ip,
            passes: passes.into_boxed_slice(),
            twiddles: twiddles.into_boxed_slice(),
            bufsize,
            needs_copy,
        }
    }

    pub fn bufsize(&self) -> usize {
        self.bufsize
    }

    pub fn needs_copy(&self) -> bool {
        self.needs_copy
    }

    #[cfg(test)]
    pub(crate) fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(ComplexPass::name).collect()
    }

    #[inline(always)]
    fn twiddle(&self, x: usize, i: usize) -> Complex<T> {
        self.twiddles[(i - 1) * (self.ip - 1) + x]
    }

    // Writes output m of column (i, k): to CH(i, k, m) if l1 > 1, otherwise back into CC(i, m, 0)
    #[inline(always)]
    fn store<V: FftVector<T>, const FWD: bool>(
        &self,
        cc: &mut [Complex<V>],
        ch: &mut [Complex<V>],
        value: Complex<V>,
        i: usize,
        k: usize,
        m: usize,
    ) {
        let value = if i == 0 || m == 0 {
            value
        } else {
            special_mul(value, self.twiddle(m - 1, i), FWD)
        };
        if self.l1 > 1 {
            ch[i + self.ido * (k + self.l1 * m)] = value;
        } else {
            cc[i + self.ido * m] = value;
        }
    }

    pub fn exec<V: FftVector<T>, const FWD: bool>(
        &self,
        cc: &mut [Complex<V>],
        ch: &mut [Complex<V>],
        buf: &mut [Complex<V>],
    ) -> BufferSide {
        if self.l1 == 1 && self.ido == 1 {
            return run_chain::<T, V, FWD>(&self.passes, cc, ch, buf);
        }

        if native_lanes::<T>() > 1 {
            if let (Some(cc), Some(ch), Some(buf)) =
                (V::as_scalar_slice(cc), V::as_scalar_slice(ch), V::as_scalar_slice(buf))
            {
                return self.exec_lanes::<FWD>(cc, ch, buf);
            }
        }

        let (l1, ido, ip) = (self.l1, self.ido, self.ip);
        let (cc2, rest) = buf.split_at_mut(ip);
        let (ch2, buf2) = rest.split_at_mut(ip);
        for k in 0..l1 {
            for i in 0..ido {
                for m in 0..ip {
                    cc2[m] = cc[i + ido * (m + ip * k)];
                }

                let side = run_chain::<T, V, FWD>(&self.passes, cc2, ch2, buf2);
                let res: &[Complex<V>] = match side {
                    BufferSide::Input => cc2,
                    BufferSide::Copy => ch2,
                };

                for m in 0..ip {
                    self.store::<V, FWD>(cc, ch, res[m], i, k, m);
                }
            }
        }
        self.output_side()
    }

    // Transforms LANES columns per step, with column n of the step in lane n
    fn exec_lanes<const FWD: bool>(
        &self,
        cc: &mut [Complex<T>],
        ch: &mut [Complex<T>],
        buf: &mut [Complex<T>],
    ) -> BufferSide {
        let (l1, ido, ip) = (self.l1, self.ido, self.ip);
        let vlen = native_lanes::<T>();
        let reduced_ido = StrengthReducedUsize::new(ido);

        let tbuf: &mut [Complex<T::Vector>] = lanes_from_scalars(buf);
        let (cc2, rest) = tbuf.split_at_mut(ip);
        let (ch2, buf2) = rest.split_at_mut(ip);

        let nvtrans = (l1 * ido + vlen - 1) / vlen;
        for itrans in 0..nvtrans {
            let base = itrans * vlen;
            let (k0, i0) = StrengthReducedUsize::div_rem(base, reduced_ido);
            if k0 == (base + vlen - 1) / reduced_ido {
                // every lane comes from the same k
                for m in 0..ip {
                    for n in 0..vlen {
                        let value = cc[i0 + n + ido * (m + ip * k0)];
                        cc2[m].re.replace(n, value.re);
                        cc2[m].im.replace(n, value.im);
                    }
                }
            } else {
                for n in 0..vlen {
                    let (k, i) = StrengthReducedUsize::div_rem(base + n, reduced_ido);
                    // lanes past the end repeat data from the last k, and are discarded below
                    let k = k.min(l1 - 1);
                    for m in 0..ip {
                        let value = cc[i + ido * (m + ip * k)];
                        cc2[m].re.replace(n, value.re);
                        cc2[m].im.replace(n, value.im);
                    }
                }
            }

            let side = run_chain::<T, T::Vector, FWD>(&self.passes, cc2, ch2, buf2);
            let res: &[Complex<T::Vector>] = match side {
                BufferSide::Input => cc2,
                BufferSide::Copy => ch2,
            };

            for n in 0..vlen {
                let (k, i) = StrengthReducedUsize::div_rem(base + n, reduced_ido);
                if k >= l1 {
                    break;
                }
                for m in 0..ip {
                    let value = Complex::new(res[m].re.extract(n), res[m].im.extract(n));
                    self.store::<T, FWD>(cc, ch, value, i, k, m);
                }
            }
        }
        self.output_side()
    }

    fn output_side(&self) -> BufferSide {
        if self.l1 > 1 {
            BufferSide::Copy
        } else {
            BufferSide::Input
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::check_complex_pass;
    use crate::FftDirection;

    fn check_mixed_radix(len: usize, vectorize: bool) {
        let roots = Arc::new(UnityRoots::new(len));
        let pass = MixedRadix::new(1, 1, len, &roots, vectorize, &PlanOptions::default());
        let pass = ComplexPass::MixedRadix(pass);
        check_complex_pass(&pass, len, FftDirection::Forward);
        check_complex_pass(&pass, len, FftDirection::Inverse);
    }

    #[test]
    fn test_mixed_radix() {
        for &len in &[6, 12, 15, 16, 21, 30, 36, 49, 60, 64, 77, 99, 120, 121, 210, 256, 360] {
            check_mixed_radix(len, false);
        }
    }

    #[test]
    fn test_mixed_radix_with_primes() {
        // generic prime and bluestein sub-passes
        for &len in &[26, 39, 34 * 3, 113 * 2, 127 * 4] {
            check_mixed_radix(len, false);
        }
    }

    #[test]
    fn test_mixed_radix_vectorized() {
        for &len in &[320, 384, 480, 1000, 1024, 2 * 509] {
            check_mixed_radix(len, true);
        }
    }

    #[test]
    fn test_packet_split() {
        let options = PlanOptions {
            packet_split_threshold: 100,
            ..PlanOptions::default()
        };
        let len = 3 * 5 * 7 * 11;
        let roots = Arc::new(UnityRoots::<f64>::new(len));
        let pass = MixedRadix::new(1, 1, len, &roots, true, &options);
        assert_eq!(pass.passes.len(), 2);

        let pass = ComplexPass::MixedRadix(pass);
        check_complex_pass(&pass, len, FftDirection::Forward);
        check_complex_pass(&pass, len, FftDirection::Inverse);
    }

    #[test]
    fn test_factor_order() {
        let roots = Arc::new(UnityRoots::<f32>::new(48));
        let pass = MixedRadix::new(1, 1, 48, &roots, false, &PlanOptions::default());
        assert_eq!(pass.pass_names(), vec!["radix-2", "radix-8", "radix-3"]);
        assert!(pass.needs_copy());
    }
}

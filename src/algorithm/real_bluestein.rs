use std::sync::Arc;

use num_complex::Complex;

use super::{BufferSide, ComplexPass, RealTwiddles};
use crate::array_utils::{into_complex_mut, View3, View3Mut};
use crate::common::FftNum;
use crate::plan::{make_complex_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::{conj_mul, UnityRoots};

/// Real pass for a large odd prime factor. Every column is widened to complex and transformed with a complex plan of
/// length `ip`, which is itself a Bluestein pass for the lengths that reach this code.
pub(crate) struct RealBluestein<T> {
    ip: usize,
    tw: RealTwiddles<T>,
    inner_fft: Box<ComplexPass<T>>,
}

impl<T: FftNum> RealBluestein<T> {
    pub fn new(
        l1: usize,
        ido: usize,
        ip: usize,
        roots: &Arc<UnityRoots<T>>,
        vectorize: bool,
        options: &PlanOptions,
    ) -> Self {
        assert!(ip % 2 == 1, "Bluestein length must be odd, got {}", ip);
        assert!(ido % 2 == 1, "Real Bluestein pass needs an odd ido, got {}", ido);

        let inner_fft = make_complex_pass(1, 1, ip, roots, vectorize, options);
        tracing::trace!(ip, l1, ido, inner = inner_fft.name(), "built real bluestein pass");
        Self {
            ip,
            tw: RealTwiddles::new(l1, ido, ip, roots),
            inner_fft: Box::new(inner_fft),
        }
    }

    /// In reals.
    pub fn bufsize(&self) -> usize {
        4 * self.ip + 2 * self.inner_fft.bufsize()
    }

    // Transforms the first ip elements of `buf` and returns them
    fn transform<'a, V: FftVector<T>, const FWD: bool>(&self, buf: &'a mut [Complex<V>]) -> &'a [Complex<V>] {
        let (cc2, rest) = buf.split_at_mut(self.ip);
        let (ch2, subbuf) = rest.split_at_mut(self.ip);
        match self.inner_fft.exec_dir::<V, FWD>(cc2, ch2, subbuf) {
            BufferSide::Input => cc2,
            BufferSide::Copy => ch2,
        }
    }

    pub fn forward<V: FftVector<T>>(&self, cc: &[V], ch: &mut [V], buf: &mut [V]) -> BufferSide {
        let (l1, ido, ip) = (self.tw.l1, self.tw.ido, self.ip);
        let buf = into_complex_mut(buf);
        let cc = View3::new(cc, ido, l1);
        let mut ch = View3Mut::new(ch, ido, ip);

        for k in 0..l1 {
            for m in 0..ip {
                buf[m] = Complex::new(cc[(0, k, m)], V::zero());
            }
            let res = self.transform::<V, true>(buf);
            ch[(0, 0, k)] = res[0].re;
            for m in 1..=ip / 2 {
                ch[(ido - 1, 2 * m - 1, k)] = res[m].re;
                ch[(0, 2 * m, k)] = res[m].im;
            }
        }
        if ido == 1 {
            return BufferSide::Copy;
        }

        let ipph = (ip + 1) / 2;
        for k in 0..l1 {
            for i in (2..ido).step_by(2) {
                let ic = ido - i;
                buf[0] = Complex::new(cc[(i - 1, k, 0)], cc[(i, k, 0)]);
                for m in 1..ip {
                    let (re, im) = conj_mul(
                        self.tw.wa(m - 1, i - 2),
                        self.tw.wa(m - 1, i - 1),
                        cc[(i - 1, k, m)],
                        cc[(i, k, m)],
                    );
                    buf[m] = Complex::new(re, im);
                }
                let res = self.transform::<V, true>(buf);
                ch[(i - 1, 0, k)] = res[0].re;
                ch[(i, 0, k)] = res[0].im;
                for m in 1..ipph {
                    ch[(i - 1, 2 * m, k)] = res[m].re;
                    ch[(ic - 1, 2 * m - 1, k)] = res[ip - m].re;
                    ch[(i, 2 * m, k)] = res[m].im;
                    ch[(ic, 2 * m - 1, k)] = -res[ip - m].im;
                }
            }
        }
        BufferSide::Copy
    }

    pub fn backward<V: FftVector<T>>(&self, cc: &[V], ch: &mut [V], buf: &mut [V]) -> BufferSide {
        let (l1, ido, ip) = (self.tw.l1, self.tw.ido, self.ip);
        let buf = into_complex_mut(buf);
        let cc = View3::new(cc, ido, ip);
        let mut ch = View3Mut::new(ch, ido, l1);

        for k in 0..l1 {
            buf[0] = Complex::new(cc[(0, 0, k)], V::zero());
            for m in 1..=ip / 2 {
                let value = Complex::new(cc[(ido - 1, 2 * m - 1, k)], cc[(0, 2 * m, k)]);
                buf[m] = value;
                buf[ip - m] = value.conj();
            }
            let res = self.transform::<V, false>(buf);
            for m in 0..ip {
                ch[(0, k, m)] = res[m].re;
            }
        }
        if ido == 1 {
            return BufferSide::Copy;
        }

        for k in 0..l1 {
            for i in (2..ido).step_by(2) {
                let ic = ido - i;
                buf[0] = Complex::new(cc[(i - 1, 0, k)], cc[(i, 0, k)]);
                for m in 1..=ip / 2 {
                    buf[m] = Complex::new(cc[(i - 1, 2 * m, k)], cc[(i, 2 * m, k)]);
                    buf[ip - m] = Complex::new(cc[(ic - 1, 2 * m - 1, k)], -cc[(ic, 2 * m - 1, k)]);
                }
                let res = self.transform::<V, false>(buf);
                ch[(i - 1, k, 0)] = res[0].re;
                ch[(i, k, 0)] = res[0].im;
                for m in 1..ip {
                    let (re, im) = conj_mul(
                        self.tw.wa(m - 1, i - 2),
                        -self.tw.wa(m - 1, i - 1),
                        res[m].re,
                        res[m].im,
                    );
                    ch[(i - 1, k, m)] = re;
                    ch[(i, k, m)] = im;
                }
            }
        }
        BufferSide::Copy
    }
}

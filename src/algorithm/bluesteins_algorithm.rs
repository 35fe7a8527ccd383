use std::sync::Arc;

use num_complex::Complex;
use num_traits::Zero;

use super::{BufferSide, ComplexPass, PassTwiddles};
use crate::array_utils::View3;
use crate::common::FftNum;
use crate::math_utils::good_size_complex;
use crate::plan::{make_complex_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::{special_mul, UnityRoots};

/// Implementation of Bluestein's Algorithm
///
/// This algorithm computes a prime-sized factor in O(nlogn) time. It does this by converting the size n DFT into a
/// cyclic convolution of size M >= 2n - 1, where M is chosen so that its own plan only uses the specialized radix
/// passes. The convolution is computed with a forward and an inverse FFT of size M.
///
/// It requires a large scratch space, proportional to M rather than n.
pub(crate) struct Bluestein<T> {
    ip: usize,
    ip2: usize,
    tw: PassTwiddles<T>,

    // the chirp exp(i*pi*m^2/ip), and the first ip2/2 + 1 entries of its scaled spectrum
    bk: Box<[Complex<T>]>,
    bkf: Box<[Complex<T>]>,

    inner_fft: Box<ComplexPass<T>>,
}

impl<T: FftNum> Bluestein<T> {
    pub fn new(
        l1: usize,
        ido: usize,
        ip: usize,
        roots: &Arc<UnityRoots<T>>,
        vectorize: bool,
        options: &PlanOptions,
    ) -> Self {
        let ip2 = good_size_complex(ip * 2 - 1);
        let inner_roots = Arc::new(UnityRoots::new(ip2));
        let inner_fft = make_complex_pass(1, 1, ip2, &inner_roots, vectorize, options);

        // the chirp angles are pi*m^2/ip = 2*pi*(m^2 mod 2ip)/2ip
        let local_roots;
        let roots2: &UnityRoots<T> = if roots.len() % (2 * ip) == 0 {
            &**roots
        } else {
            local_roots = UnityRoots::new(2 * ip);
            &local_roots
        };
        let rfct2 = roots2.len() / (2 * ip);
        let mut bk = Vec::with_capacity(ip);
        bk.push(Complex::new(T::one(), T::zero()));
        let mut coeff = 0;
        for m in 1..ip {
            coeff += 2 * m - 1;
            if coeff >= 2 * ip {
                coeff -= 2 * ip;
            }
            bk.push(roots2[coeff * rfct2]);
        }

        // zero padded, mirrored and scaled chirp, transformed forward
        let xn2 = T::one() / T::from_usize(ip2).unwrap();
        let mut tbkf = vec![Complex::zero(); ip2];
        tbkf[0] = bk[0] * xn2;
        for m in 1..ip {
            let value = bk[m] * xn2;
            tbkf[m] = value;
            tbkf[ip2 - m] = value;
        }
        let mut tbkf_copy = vec![Complex::zero(); if inner_fft.needs_copy() { ip2 } else { 0 }];
        let mut inner_scratch = vec![Complex::zero(); inner_fft.bufsize()];
        let side = inner_fft.exec_dir::<T, true>(&mut tbkf, &mut tbkf_copy, &mut inner_scratch);
        let spectrum = match side {
            BufferSide::Input => &tbkf,
            BufferSide::Copy => &tbkf_copy,
        };
        let bkf = spectrum[..ip2 / 2 + 1].to_vec().into_boxed_slice();

        tracing::trace!(ip, ip2, l1, ido, "built bluestein pass");

        Self {
            ip,
            ip2,
            tw: PassTwiddles::new(l1, ido, ip, roots),
            bk: bk.into_boxed_slice(),
            bkf,
            inner_fft: Box::new(inner_fft),
        }
    }

    pub fn bufsize(&self) -> usize {
        let copies = if self.inner_fft.needs_copy() { 2 } else { 1 };
        self.ip2 * copies + self.inner_fft.bufsize()
    }

    pub fn needs_copy(&self) -> bool {
        self.tw.l1 > 1
    }

    pub fn exec<V: FftVector<T>, const FWD: bool>(
        &self,
        cc: &mut [Complex<V>],
        ch: &mut [Complex<V>],
        buf: &mut [Complex<V>],
    ) -> BufferSide {
        let (l1, ido, ip, ip2) = (self.tw.l1, self.tw.ido, self.ip, self.ip2);
        let copy_len = if self.inner_fft.needs_copy() { ip2 } else { 0 };
        let (akf, rest) = buf.split_at_mut(ip2);
        let (akf2, inner_scratch) = rest.split_at_mut(copy_len);

        for k in 0..l1 {
            for i in 0..ido {
                // initialize a_k and FFT it
                {
                    let cc = View3::new(cc, ido, ip);
                    for m in 0..ip {
                        akf[m] = special_mul(cc[(i, m, k)], self.bk[m], FWD);
                    }
                }
                for element in akf[ip..].iter_mut() {
                    *element = Complex::zero();
                }

                let side = self.inner_fft.exec_dir::<V, true>(akf, akf2, inner_scratch);
                let (res, other) = match side {
                    BufferSide::Input => (&mut *akf, &mut *akf2),
                    BufferSide::Copy => (&mut *akf2, &mut *akf),
                };

                // do the convolution
                res[0] = special_mul(res[0], self.bkf[0], !FWD);
                for m in 1..(ip2 + 1) / 2 {
                    res[m] = special_mul(res[m], self.bkf[m], !FWD);
                    res[ip2 - m] = special_mul(res[ip2 - m], self.bkf[m], !FWD);
                }
                if ip2 % 2 == 0 {
                    res[ip2 / 2] = special_mul(res[ip2 / 2], self.bkf[ip2 / 2], !FWD);
                }

                // inverse FFT
                let side = self.inner_fft.exec_dir::<V, false>(res, other, inner_scratch);
                let res: &[Complex<V>] = match side {
                    BufferSide::Input => res,
                    BufferSide::Copy => other,
                };

                // multiply by b_k and the twiddle factors, and scatter to the output
                for m in 0..ip {
                    let factor = if i == 0 || m == 0 {
                        self.bk[m]
                    } else {
                        self.bk[m] * self.tw.twiddle(m - 1, i)
                    };
                    let value = special_mul(res[m], factor, FWD);
                    if l1 > 1 {
                        ch[i + ido * (k + l1 * m)] = value;
                    } else {
                        cc[i + ido * m] = value;
                    }
                }
            }
        }

        if l1 > 1 {
            BufferSide::Copy
        } else {
            BufferSide::Input
        }
    }
}

use num_complex::Complex;

use super::{root_stride, BufferSide, PassTwiddles};
use crate::array_utils::{View3, View3Mut};
use crate::common::FftNum;
use crate::simd::FftVector;
use crate::twiddles::{pm, special_mul, UnityRoots};

/// Direct DFT of an odd prime factor, computing the outputs `l` and `ip - l` together.
///
/// Costs O(ip^2) per column, so plans only use it for small primes that have no specialized butterfly.
pub(crate) struct GenericPrime<T> {
    ip: usize,
    tw: PassTwiddles<T>,
    csarr: Box<[Complex<T>]>,
}

impl<T: FftNum> GenericPrime<T> {
    pub fn new(l1: usize, ido: usize, ip: usize, roots: &UnityRoots<T>) -> Self {
        assert!(ip % 2 == 1 && ip >= 5, "Generic prime pass needs an odd factor >= 5, got {}", ip);

        let rfct = root_stride(l1 * ido * ip, roots);
        let csarr = (0..ip).map(|i| roots[rfct * ido * l1 * i]).collect();
        Self {
            ip,
            tw: PassTwiddles::new(l1, ido, ip, roots),
            csarr,
        }
    }

    #[inline(always)]
    fn root(&self, index: usize, forward: bool) -> Complex<T> {
        let root = self.csarr[index];
        if forward {
            root.conj()
        } else {
            root
        }
    }

    /// Computes into `cc`, using `ch` as temporary storage.
    pub fn exec<V: FftVector<T>, const FWD: bool>(&self, cc: &mut [Complex<V>], ch: &mut [Complex<V>]) -> BufferSide {
        let (l1, ido, ip) = (self.tw.l1, self.tw.ido, self.ip);
        let ipph = (ip + 1) / 2;
        let idl1 = ido * l1;

        // sums and differences of the symmetric input pairs
        {
            let cc = View3::new(cc, ido, ip);
            let mut ch = View3Mut::new(ch, ido, l1);
            for k in 0..l1 {
                for i in 0..ido {
                    ch[(i, k, 0)] = cc[(i, 0, k)];
                }
            }
            for j in 1..ipph {
                let jc = ip - j;
                for k in 0..l1 {
                    for i in 0..ido {
                        let (sum, diff) = pm(cc[(i, j, k)], cc[(i, jc, k)]);
                        ch[(i, k, j)] = sum;
                        ch[(i, k, jc)] = diff;
                    }
                }
            }
        }

        // output 0 is the sum of everything
        for ik in 0..idl1 {
            let mut sum = ch[ik];
            for j in 1..ipph {
                sum = sum + ch[ik + idl1 * j];
            }
            cc[ik] = sum;
        }

        for l in 1..ipph {
            let lc = ip - l;
            let wal = self.root(l, FWD);
            let wal2 = self.root(2 * l, FWD);
            for ik in 0..idl1 {
                let ch1 = ch[ik + idl1];
                let ch2 = ch[ik + idl1 * 2];
                let chm1 = ch[ik + idl1 * (ip - 1)];
                let chm2 = ch[ik + idl1 * (ip - 2)];
                let ch0 = ch[ik];
                cc[ik + idl1 * l] = Complex::new(
                    ch0.re + ch1.re * wal.re + ch2.re * wal2.re,
                    ch0.im + ch1.im * wal.re + ch2.im * wal2.re,
                );
                cc[ik + idl1 * lc] = Complex::new(
                    -(chm1.im * wal.im + chm2.im * wal2.im),
                    chm1.re * wal.im + chm2.re * wal2.im,
                );
            }

            let mut iwal = 2 * l;
            let mut j = 3;
            let mut jc = ip - 3;
            while j + 1 < ipph {
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal = self.root(iwal, FWD);
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal2 = self.root(iwal, FWD);
                for ik in 0..idl1 {
                    let (a, a2) = (ch[ik + idl1 * j], ch[ik + idl1 * (j + 1)]);
                    let (b, b2) = (ch[ik + idl1 * jc], ch[ik + idl1 * (jc - 1)]);
                    let out = &mut cc[ik + idl1 * l];
                    out.re = out.re + a.re * xwal.re + a2.re * xwal2.re;
                    out.im = out.im + a.im * xwal.re + a2.im * xwal2.re;
                    let out = &mut cc[ik + idl1 * lc];
                    out.re = out.re - (b.im * xwal.im + b2.im * xwal2.im);
                    out.im = out.im + b.re * xwal.im + b2.re * xwal2.im;
                }
                j += 2;
                jc -= 2;
            }
            while j < ipph {
                iwal += l;
                if iwal > ip {
                    iwal -= ip;
                }
                let xwal = self.root(iwal, FWD);
                for ik in 0..idl1 {
                    let a = ch[ik + idl1 * j];
                    let b = ch[ik + idl1 * jc];
                    let out = &mut cc[ik + idl1 * l];
                    out.re = out.re + a.re * xwal.re;
                    out.im = out.im + a.im * xwal.re;
                    let out = &mut cc[ik + idl1 * lc];
                    out.re = out.re - b.im * xwal.im;
                    out.im = out.im + b.re * xwal.im;
                }
                j += 1;
                jc -= 1;
            }
        }

        // recombine the pairs and apply the twiddles
        let mut cx = View3Mut::new(cc, ido, l1);
        for j in 1..ipph {
            let jc = ip - j;
            for k in 0..l1 {
                for i in 0..ido {
                    let (x1, x2) = pm(cx[(i, k, j)], cx[(i, k, jc)]);
                    if i == 0 {
                        cx[(i, k, j)] = x1;
                        cx[(i, k, jc)] = x2;
                    } else {
                        cx[(i, k, j)] = special_mul(x1, self.tw.twiddle(j - 1, i), FWD);
                        cx[(i, k, jc)] = special_mul(x2, self.tw.twiddle(jc - 1, i), FWD);
                    }
                }
            }
        }
        BufferSide::Input
    }
}

#[cfg(test)]
mod unit_tests {
    use super::super::ComplexPass;
    use super::*;
    use crate::test_utils::check_complex_pass;
    use crate::FftDirection;

    #[test]
    fn test_generic_prime() {
        for &len in &[13, 17, 19, 23, 29, 31, 37, 41, 97, 109] {
            let roots = UnityRoots::new(len);
            let pass = ComplexPass::GenericPrime(GenericPrime::new(1, 1, len, &roots));
            check_complex_pass(&pass, len, FftDirection::Forward);
            check_complex_pass(&pass, len, FftDirection::Inverse);
        }
    }

    #[test]
    fn test_generic_small_primes() {
        // the specialized butterflies cover these, but the generic pass must agree with them
        for &len in &[5, 7, 11] {
            let roots = UnityRoots::new(len);
            let pass = ComplexPass::GenericPrime(GenericPrime::new(1, 1, len, &roots));
            check_complex_pass(&pass, len, FftDirection::Forward);
            check_complex_pass(&pass, len, FftDirection::Inverse);
        }
    }
}

use super::{root_stride, BufferSide, RealTwiddles};
use crate::common::{constant, FftNum};
use crate::simd::FftVector;
use crate::twiddles::UnityRoots;

/// Direct real DFT of an odd factor `ip`, for factors that have no specialized real butterfly.
///
/// The forward direction leaves its result in the input buffer, the backward direction in the copy buffer.
pub(crate) struct RealGenericPrime<T> {
    ip: usize,
    tw: RealTwiddles<T>,
    // cos and sin of 2*pi*m/ip for m in 0..ip, interleaved
    csarr: Box<[T]>,
}

impl<T: FftNum> RealGenericPrime<T> {
    pub fn new(l1: usize, ido: usize, ip: usize, roots: &UnityRoots<T>) -> Self {
        assert!(ido % 2 == 1, "Real generic pass needs an odd ido, got {}", ido);
        assert!(ip % 2 == 1 && ip >= 5, "Real generic pass needs an odd factor >= 5, got {}", ip);

        let len = l1 * ido * ip;
        let rfct = root_stride(len, roots);
        let mut csarr = vec![T::zero(); 2 * ip];
        csarr[0] = T::one();
        let (mut i, mut ic) = (2, 2 * ip - 2);
        while i <= ic {
            let root = roots[i / 2 * rfct * (len / ip)];
            csarr[i] = root.re;
            csarr[i + 1] = root.im;
            csarr[ic] = root.re;
            csarr[ic + 1] = -root.im;
            i += 2;
            ic -= 2;
        }

        Self {
            ip,
            tw: RealTwiddles::new(l1, ido, ip, roots),
            csarr: csarr.into_boxed_slice(),
        }
    }

    // Sums the symmetric and antisymmetric parts of the ip-point DFT, from `src` into `dst`. Both are indexed as
    // `ik + idl1 * j`.
    fn combine<V: FftVector<T>>(&self, src: &[V], dst: &mut [V]) {
        let ip = self.ip;
        let ipph = (ip + 1) / 2;
        let idl1 = self.tw.ido * self.tw.l1;
        let cs = &self.csarr;

        for l in 1..ipph {
            let lc = ip - l;
            for ik in 0..idl1 {
                dst[ik + idl1 * l] = src[ik] + src[ik + idl1] * cs[2 * l] + src[ik + idl1 * 2] * cs[4 * l];
                dst[ik + idl1 * lc] =
                    src[ik + idl1 * (ip - 1)] * cs[2 * l + 1] + src[ik + idl1 * (ip - 2)] * cs[4 * l + 1];
            }
            let mut iang = 2 * l;
            for j in 3..ipph {
                let jc = ip - j;
                iang += l;
                if iang >= ip {
                    iang -= ip;
                }
                let (ar, ai) = (cs[2 * iang], cs[2 * iang + 1]);
                for ik in 0..idl1 {
                    dst[ik + idl1 * l] = dst[ik + idl1 * l] + src[ik + idl1 * j] * ar;
                    dst[ik + idl1 * lc] = dst[ik + idl1 * lc] + src[ik + idl1 * jc] * ai;
                }
            }
        }
    }

    pub fn forward<V: FftVector<T>>(&self, cc: &mut [V], ch: &mut [V]) -> BufferSide {
        let (l1, ido, ip) = (self.tw.l1, self.tw.ido, self.ip);
        let ipph = (ip + 1) / 2;
        let idl1 = ido * l1;
        // C1 and CH use the l1 layout, CC the ip layout
        let c1 = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
        let cci = |a: usize, b: usize, c: usize| a + ido * (b + ip * c);

        if ido > 1 {
            for j in 1..ipph {
                let jc = ip - j;
                for k in 0..l1 {
                    for i in (1..ido - 1).step_by(2) {
                        let (w1r, w1i) = (self.tw.wa(j - 1, i - 1), self.tw.wa(j - 1, i));
                        let (w2r, w2i) = (self.tw.wa(jc - 1, i - 1), self.tw.wa(jc - 1, i));
                        let (t1, t2) = (cc[c1(i, k, j)], cc[c1(i + 1, k, j)]);
                        let (t3, t4) = (cc[c1(i, k, jc)], cc[c1(i + 1, k, jc)]);
                        let x1 = t1 * w1r + t2 * w1i;
                        let x2 = t2 * w1r - t1 * w1i;
                        let x3 = t3 * w2r + t4 * w2i;
                        let x4 = t4 * w2r - t3 * w2i;
                        cc[c1(i, k, j)] = x3 + x1;
                        cc[c1(i + 1, k, jc)] = x3 - x1;
                        cc[c1(i + 1, k, j)] = x2 + x4;
                        cc[c1(i, k, jc)] = x2 - x4;
                    }
                }
            }
        }

        for j in 1..ipph {
            let jc = ip - j;
            for k in 0..l1 {
                let (a, b) = (cc[c1(0, k, jc)], cc[c1(0, k, j)]);
                cc[c1(0, k, jc)] = a - b;
                cc[c1(0, k, j)] = a + b;
            }
        }

        self.combine(cc, ch);
        for ik in 0..idl1 {
            let mut sum = cc[ik];
            for j in 1..ipph {
                sum = sum + cc[ik + idl1 * j];
            }
            ch[ik] = sum;
        }

        // everything is in ch now, scatter it back into cc as halfcomplex data
        for k in 0..l1 {
            for i in 0..ido {
                cc[cci(i, 0, k)] = ch[c1(i, k, 0)];
            }
        }
        for j in 1..ipph {
            let jc = ip - j;
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                cc[cci(ido - 1, j2, k)] = ch[c1(0, k, j)];
                cc[cci(0, j2 + 1, k)] = ch[c1(0, k, jc)];
            }
        }
        if ido == 1 {
            return BufferSide::Input;
        }
        for j in 1..ipph {
            let jc = ip - j;
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                for i in (1..ido - 1).step_by(2) {
                    let ic = ido - i - 2;
                    cc[cci(i, j2 + 1, k)] = ch[c1(i, k, j)] + ch[c1(i, k, jc)];
                    cc[cci(ic, j2, k)] = ch[c1(i, k, j)] - ch[c1(i, k, jc)];
                    cc[cci(i + 1, j2 + 1, k)] = ch[c1(i + 1, k, j)] + ch[c1(i + 1, k, jc)];
                    cc[cci(ic + 1, j2, k)] = ch[c1(i + 1, k, jc)] - ch[c1(i + 1, k, j)];
                }
            }
        }
        BufferSide::Input
    }

    pub fn backward<V: FftVector<T>>(&self, cc: &mut [V], ch: &mut [V]) -> BufferSide {
        let (l1, ido, ip) = (self.tw.l1, self.tw.ido, self.ip);
        let ipph = (ip + 1) / 2;
        let idl1 = ido * l1;
        let two = constant::<T>(2.0);
        let c1 = |a: usize, b: usize, c: usize| a + ido * (b + l1 * c);
        let cci = |a: usize, b: usize, c: usize| a + ido * (b + ip * c);

        for k in 0..l1 {
            for i in 0..ido {
                ch[c1(i, k, 0)] = cc[cci(i, 0, k)];
            }
        }
        for j in 1..ipph {
            let jc = ip - j;
            let j2 = 2 * j - 1;
            for k in 0..l1 {
                ch[c1(0, k, j)] = cc[cci(ido - 1, j2, k)] * two;
                ch[c1(0, k, jc)] = cc[cci(0, j2 + 1, k)] * two;
            }
        }
        if ido != 1 {
            for j in 1..ipph {
                let jc = ip - j;
                let j2 = 2 * j - 1;
                for k in 0..l1 {
                    for i in (1..ido - 1).step_by(2) {
                        let ic = ido - i - 2;
                        ch[c1(i, k, j)] = cc[cci(i, j2 + 1, k)] + cc[cci(ic, j2, k)];
                        ch[c1(i, k, jc)] = cc[cci(i, j2 + 1, k)] - cc[cci(ic, j2, k)];
                        ch[c1(i + 1, k, j)] = cc[cci(i + 1, j2 + 1, k)] - cc[cci(ic + 1, j2, k)];
                        ch[c1(i + 1, k, jc)] = cc[cci(i + 1, j2 + 1, k)] + cc[cci(ic + 1, j2, k)];
                    }
                }
            }
        }

        self.combine(ch, cc);
        for j in 1..ipph {
            for ik in 0..idl1 {
                ch[ik] = ch[ik] + ch[ik + idl1 * j];
            }
        }
        for j in 1..ipph {
            let jc = ip - j;
            for k in 0..l1 {
                let (a, b) = (cc[c1(0, k, j)], cc[c1(0, k, jc)]);
                ch[c1(0, k, jc)] = a + b;
                ch[c1(0, k, j)] = a - b;
            }
        }
        if ido == 1 {
            return BufferSide::Copy;
        }

        for j in 1..ipph {
            let jc = ip - j;
            for k in 0..l1 {
                for i in (1..ido - 1).step_by(2) {
                    let (a, b) = (cc[c1(i, k, j)], cc[c1(i + 1, k, jc)]);
                    let (c, d) = (cc[c1(i + 1, k, j)], cc[c1(i, k, jc)]);
                    ch[c1(i, k, j)] = a - b;
                    ch[c1(i, k, jc)] = a + b;
                    ch[c1(i + 1, k, j)] = c + d;
                    ch[c1(i + 1, k, jc)] = c - d;
                }
            }
        }

        // twiddles
        for j in 1..ip {
            for k in 0..l1 {
                for i in (1..ido - 1).step_by(2) {
                    let (wr, wi) = (self.tw.wa(j - 1, i - 1), self.tw.wa(j - 1, i));
                    let (t1, t2) = (ch[c1(i, k, j)], ch[c1(i + 1, k, j)]);
                    ch[c1(i, k, j)] = t1 * wr - t2 * wi;
                    ch[c1(i + 1, k, j)] = t2 * wr + t1 * wi;
                }
            }
        }
        BufferSide::Copy
    }
}

#[cfg(test)]
mod unit_tests {
    use super::super::RealPass;
    use super::*;
    use crate::test_utils::check_real_pass;

    #[test]
    fn test_real_generic_prime() {
        for &len in &[5, 7, 11, 13, 17, 31, 67, 131] {
            let roots = UnityRoots::new(len);
            let pass = RealPass::GenericPrime(RealGenericPrime::new(1, 1, len, &roots));
            check_real_pass(&pass, len);
        }
    }

    #[test]
    fn test_real_generic_roundtrip_with_twiddles() {
        use crate::test_utils::random_real_signal;

        for &(ip, l1, ido) in &[(7, 1, 3), (7, 2, 5), (11, 3, 3), (13, 1, 9)] {
            let len = ip * l1 * ido;
            let roots = UnityRoots::<f64>::new(len);
            let pass = RealGenericPrime::new(l1, ido, ip, &roots);

            let input = random_real_signal::<f64>(len);
            let mut data = input.clone();
            let mut scratch = vec![0.0; len];
            assert_eq!(pass.forward(&mut data, &mut scratch), BufferSide::Input);
            let mut output = vec![0.0; len];
            assert_eq!(pass.backward(&mut data, &mut output), BufferSide::Copy);

            for (got, expected) in output.iter().zip(input.iter()) {
                assert!((got - expected * ip as f64).abs() < 1e-9, "ip = {}, l1 = {}, ido = {}", ip, l1, ido);
            }
        }
    }
}

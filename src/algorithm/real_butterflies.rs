//! Radix 2, 3, 4 and 5 passes of real transforms.
//!
//! Forward passes read `CC(a, b, c) = cc[a + ido * (b + l1 * c)]` and write halfcomplex data to
//! `CH(a, b, c) = ch[a + ido * (b + ip * c)]`. Backward passes read the `ip` layout and write the `l1` layout.
//! Columns `i` come in pairs `(i - 1, i)` holding the real and imaginary part of one complex value, and `ic = ido - i`
//! is the mirrored column. Radix 3 and 5 need an odd `ido`.

use super::{BufferSide, RealTwiddles};
use crate::array_utils::{View3, View3Mut};
use crate::common::{constant, FftNum};
use crate::simd::FftVector;
use crate::twiddles::{conj_mul, pm};

// (a + b, i * (b - a)) for the pairs a = (rx, ix), b = (ry, iy)
#[inline(always)]
fn rearrange<V: Copy + std::ops::Add<Output = V> + std::ops::Sub<Output = V>>(
    rx: V,
    ix: V,
    ry: V,
    iy: V,
) -> (V, V, V, V) {
    (rx + ry, ix + iy, ix - iy, ry - rx)
}

#[inline(always)]
fn twiddle_pair<T: FftNum>(tw: &RealTwiddles<T>, x: usize, i: usize) -> (T, T) {
    (tw.wa(x, i - 2), tw.wa(x, i - 1))
}

pub(crate) fn radix2_forward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let cc = View3::new(cc, ido, l1);
    let mut ch = View3Mut::new(ch, ido, 2);

    for k in 0..l1 {
        let (sum, diff) = pm(cc[(0, k, 0)], cc[(0, k, 1)]);
        ch[(0, 0, k)] = sum;
        ch[(ido - 1, 1, k)] = diff;
    }
    if ido % 2 == 0 {
        for k in 0..l1 {
            ch[(0, 1, k)] = -cc[(ido - 1, k, 1)];
            ch[(ido - 1, 0, k)] = cc[(ido - 1, k, 0)];
        }
    }
    if ido <= 2 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (wr, wi) = twiddle_pair(tw, 0, i);
            let (tr2, ti2) = conj_mul(wr, wi, cc[(i - 1, k, 1)], cc[(i, k, 1)]);
            let (a, b) = pm(cc[(i - 1, k, 0)], tr2);
            ch[(i - 1, 0, k)] = a;
            ch[(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti2, cc[(i, k, 0)]);
            ch[(i, 0, k)] = a;
            ch[(ic, 1, k)] = b;
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix2_backward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let two = constant::<T>(2.0);
    let cc = View3::new(cc, ido, 2);
    let mut ch = View3Mut::new(ch, ido, l1);

    for k in 0..l1 {
        let (sum, diff) = pm(cc[(0, 0, k)], cc[(ido - 1, 1, k)]);
        ch[(0, k, 0)] = sum;
        ch[(0, k, 1)] = diff;
    }
    if ido % 2 == 0 {
        for k in 0..l1 {
            ch[(ido - 1, k, 0)] = cc[(ido - 1, 0, k)] * two;
            ch[(ido - 1, k, 1)] = -cc[(0, 1, k)] * two;
        }
    }
    if ido <= 2 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (re, tr2) = pm(cc[(i - 1, 0, k)], cc[(ic - 1, 1, k)]);
            let (ti2, im) = pm(cc[(i, 0, k)], cc[(ic, 1, k)]);
            ch[(i - 1, k, 0)] = re;
            ch[(i, k, 0)] = im;
            let (wr, wi) = twiddle_pair(tw, 0, i);
            let (a, b) = conj_mul(wr, wi, ti2, tr2);
            ch[(i, k, 1)] = a;
            ch[(i - 1, k, 1)] = b;
        }
    }
    BufferSide::Copy
}

const TAUR: f64 = -0.5;
const TAUI: f64 = 0.866_025_403_784_438_6;

pub(crate) fn radix3_forward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let (taur, taui) = (constant::<T>(TAUR), constant::<T>(TAUI));
    let cc = View3::new(cc, ido, l1);
    let mut ch = View3Mut::new(ch, ido, 3);

    for k in 0..l1 {
        let cr2 = cc[(0, k, 1)] + cc[(0, k, 2)];
        ch[(0, 0, k)] = cc[(0, k, 0)] + cr2;
        ch[(0, 2, k)] = (cc[(0, k, 2)] - cc[(0, k, 1)]) * taui;
        ch[(ido - 1, 1, k)] = cc[(0, k, 0)] + cr2 * taur;
    }
    if ido == 1 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (wr, wi) = twiddle_pair(tw, 0, i);
            let (dr2, di2) = conj_mul(wr, wi, cc[(i - 1, k, 1)], cc[(i, k, 1)]);
            let (wr, wi) = twiddle_pair(tw, 1, i);
            let (dr3, di3) = conj_mul(wr, wi, cc[(i - 1, k, 2)], cc[(i, k, 2)]);
            let (dr2, di2, dr3, di3) = rearrange(dr2, di2, dr3, di3);

            ch[(i - 1, 0, k)] = cc[(i - 1, k, 0)] + dr2;
            ch[(i, 0, k)] = cc[(i, k, 0)] + di2;
            let tr2 = cc[(i - 1, k, 0)] + dr2 * taur;
            let ti2 = cc[(i, k, 0)] + di2 * taur;
            let tr3 = dr3 * taui;
            let ti3 = di3 * taui;

            let (a, b) = pm(tr2, tr3);
            ch[(i - 1, 2, k)] = a;
            ch[(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti3, ti2);
            ch[(i, 2, k)] = a;
            ch[(ic, 1, k)] = b;
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix3_backward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let (taur, taui) = (constant::<T>(TAUR), constant::<T>(TAUI));
    let two = constant::<T>(2.0);
    let cc = View3::new(cc, ido, 3);
    let mut ch = View3Mut::new(ch, ido, l1);

    for k in 0..l1 {
        let tr2 = cc[(ido - 1, 1, k)] * two;
        let cr2 = cc[(0, 0, k)] + tr2 * taur;
        ch[(0, k, 0)] = cc[(0, 0, k)] + tr2;
        let ci3 = cc[(0, 2, k)] * (two * taui);
        let (a, b) = pm(cr2, ci3);
        ch[(0, k, 2)] = a;
        ch[(0, k, 1)] = b;
    }
    if ido == 1 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let tr2 = cc[(i - 1, 2, k)] + cc[(ic - 1, 1, k)];
            let ti2 = cc[(i, 2, k)] - cc[(ic, 1, k)];
            let cr2 = cc[(i - 1, 0, k)] + tr2 * taur;
            let ci2 = cc[(i, 0, k)] + ti2 * taur;
            ch[(i - 1, k, 0)] = cc[(i - 1, 0, k)] + tr2;
            ch[(i, k, 0)] = cc[(i, 0, k)] + ti2;
            let cr3 = (cc[(i - 1, 2, k)] - cc[(ic - 1, 1, k)]) * taui;
            let ci3 = (cc[(i, 2, k)] + cc[(ic, 1, k)]) * taui;

            let (dr3, dr2) = pm(cr2, ci3);
            let (di2, di3) = pm(ci2, cr3);
            let (wr, wi) = twiddle_pair(tw, 0, i);
            let (a, b) = conj_mul(wr, wi, di2, dr2);
            ch[(i, k, 1)] = a;
            ch[(i - 1, k, 1)] = b;
            let (wr, wi) = twiddle_pair(tw, 1, i);
            let (a, b) = conj_mul(wr, wi, di3, dr3);
            ch[(i, k, 2)] = a;
            ch[(i - 1, k, 2)] = b;
        }
    }
    BufferSide::Copy
}

const HSQT2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const SQRT2: f64 = std::f64::consts::SQRT_2;

pub(crate) fn radix4_forward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let hsqt2 = constant::<T>(HSQT2);
    let cc = View3::new(cc, ido, l1);
    let mut ch = View3Mut::new(ch, ido, 4);

    for k in 0..l1 {
        let (tr1, a) = pm(cc[(0, k, 3)], cc[(0, k, 1)]);
        ch[(0, 2, k)] = a;
        let (tr2, b) = pm(cc[(0, k, 0)], cc[(0, k, 2)]);
        ch[(ido - 1, 1, k)] = b;
        let (a, b) = pm(tr2, tr1);
        ch[(0, 0, k)] = a;
        ch[(ido - 1, 3, k)] = b;
    }
    if ido % 2 == 0 {
        for k in 0..l1 {
            let ti1 = -(cc[(ido - 1, k, 1)] + cc[(ido - 1, k, 3)]) * hsqt2;
            let tr1 = (cc[(ido - 1, k, 1)] - cc[(ido - 1, k, 3)]) * hsqt2;
            let (a, b) = pm(cc[(ido - 1, k, 0)], tr1);
            ch[(ido - 1, 0, k)] = a;
            ch[(ido - 1, 2, k)] = b;
            let (a, b) = pm(ti1, cc[(ido - 1, k, 2)]);
            ch[(0, 3, k)] = a;
            ch[(0, 1, k)] = b;
        }
    }
    if ido <= 2 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (wr, wi) = twiddle_pair(tw, 0, i);
            let (cr2, ci2) = conj_mul(wr, wi, cc[(i - 1, k, 1)], cc[(i, k, 1)]);
            let (wr, wi) = twiddle_pair(tw, 1, i);
            let (cr3, ci3) = conj_mul(wr, wi, cc[(i - 1, k, 2)], cc[(i, k, 2)]);
            let (wr, wi) = twiddle_pair(tw, 2, i);
            let (cr4, ci4) = conj_mul(wr, wi, cc[(i - 1, k, 3)], cc[(i, k, 3)]);

            let (tr1, tr4) = pm(cr4, cr2);
            let (ti1, ti4) = pm(ci2, ci4);
            let (tr2, tr3) = pm(cc[(i - 1, k, 0)], cr3);
            let (ti2, ti3) = pm(cc[(i, k, 0)], ci3);

            let (a, b) = pm(tr2, tr1);
            ch[(i - 1, 0, k)] = a;
            ch[(ic - 1, 3, k)] = b;
            let (a, b) = pm(ti1, ti2);
            ch[(i, 0, k)] = a;
            ch[(ic, 3, k)] = b;
            let (a, b) = pm(tr3, ti4);
            ch[(i - 1, 2, k)] = a;
            ch[(ic - 1, 1, k)] = b;
            let (a, b) = pm(tr4, ti3);
            ch[(i, 2, k)] = a;
            ch[(ic, 1, k)] = b;
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix4_backward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let sqrt2 = constant::<T>(SQRT2);
    let two = constant::<T>(2.0);
    let cc = View3::new(cc, ido, 4);
    let mut ch = View3Mut::new(ch, ido, l1);

    for k in 0..l1 {
        let (tr2, tr1) = pm(cc[(0, 0, k)], cc[(ido - 1, 3, k)]);
        let tr3 = cc[(ido - 1, 1, k)] * two;
        let tr4 = cc[(0, 2, k)] * two;
        let (a, b) = pm(tr2, tr3);
        ch[(0, k, 0)] = a;
        ch[(0, k, 2)] = b;
        let (a, b) = pm(tr1, tr4);
        ch[(0, k, 3)] = a;
        ch[(0, k, 1)] = b;
    }
    if ido % 2 == 0 {
        for k in 0..l1 {
            let (ti1, ti2) = pm(cc[(0, 3, k)], cc[(0, 1, k)]);
            let (tr2, tr1) = pm(cc[(ido - 1, 0, k)], cc[(ido - 1, 2, k)]);
            ch[(ido - 1, k, 0)] = tr2 + tr2;
            ch[(ido - 1, k, 1)] = (tr1 - ti1) * sqrt2;
            ch[(ido - 1, k, 2)] = ti2 + ti2;
            ch[(ido - 1, k, 3)] = -(tr1 + ti1) * sqrt2;
        }
    }
    if ido <= 2 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (tr2, tr1) = pm(cc[(i - 1, 0, k)], cc[(ic - 1, 3, k)]);
            let (ti1, ti2) = pm(cc[(i, 0, k)], cc[(ic, 3, k)]);
            let (tr4, ti3) = pm(cc[(i, 2, k)], cc[(ic, 1, k)]);
            let (tr3, ti4) = pm(cc[(i - 1, 2, k)], cc[(ic - 1, 1, k)]);

            let (re, cr3) = pm(tr2, tr3);
            let (im, ci3) = pm(ti2, ti3);
            ch[(i - 1, k, 0)] = re;
            ch[(i, k, 0)] = im;
            let (cr4, cr2) = pm(tr1, tr4);
            let (ci2, ci4) = pm(ti1, ti4);

            for (x, ci, cr) in [(0, ci2, cr2), (1, ci3, cr3), (2, ci4, cr4)] {
                let (wr, wi) = twiddle_pair(tw, x, i);
                let (a, b) = conj_mul(wr, wi, ci, cr);
                ch[(i, k, x + 1)] = a;
                ch[(i - 1, k, x + 1)] = b;
            }
        }
    }
    BufferSide::Copy
}

const TR11: f64 = 0.309_016_994_374_947_4;
const TI11: f64 = 0.951_056_516_295_153_5;
const TR12: f64 = -0.809_016_994_374_947_4;
const TI12: f64 = 0.587_785_252_292_473_1;

pub(crate) fn radix5_forward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let (tr11, ti11) = (constant::<T>(TR11), constant::<T>(TI11));
    let (tr12, ti12) = (constant::<T>(TR12), constant::<T>(TI12));
    let cc = View3::new(cc, ido, l1);
    let mut ch = View3Mut::new(ch, ido, 5);

    for k in 0..l1 {
        let (cr2, ci5) = pm(cc[(0, k, 4)], cc[(0, k, 1)]);
        let (cr3, ci4) = pm(cc[(0, k, 3)], cc[(0, k, 2)]);
        let c0 = cc[(0, k, 0)];
        ch[(0, 0, k)] = c0 + cr2 + cr3;
        ch[(ido - 1, 1, k)] = c0 + cr2 * tr11 + cr3 * tr12;
        ch[(0, 2, k)] = ci5 * ti11 + ci4 * ti12;
        ch[(ido - 1, 3, k)] = c0 + cr2 * tr12 + cr3 * tr11;
        ch[(0, 4, k)] = ci5 * ti12 - ci4 * ti11;
    }
    if ido == 1 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let mut d = [(cc[(i - 1, k, 0)], cc[(i, k, 0)]); 5];
            for (x, value) in d.iter_mut().enumerate().skip(1) {
                let (wr, wi) = twiddle_pair(tw, x - 1, i);
                *value = conj_mul(wr, wi, cc[(i - 1, k, x)], cc[(i, k, x)]);
            }
            let (dr2, di2, dr5, di5) = rearrange(d[1].0, d[1].1, d[4].0, d[4].1);
            let (dr3, di3, dr4, di4) = rearrange(d[2].0, d[2].1, d[3].0, d[3].1);
            let (re0, im0) = d[0];

            ch[(i - 1, 0, k)] = re0 + dr2 + dr3;
            ch[(i, 0, k)] = im0 + di2 + di3;
            let tr2 = re0 + dr2 * tr11 + dr3 * tr12;
            let ti2 = im0 + di2 * tr11 + di3 * tr12;
            let tr3 = re0 + dr2 * tr12 + dr3 * tr11;
            let ti3 = im0 + di2 * tr12 + di3 * tr11;
            let tr5 = dr5 * ti11 + dr4 * ti12;
            let ti5 = di5 * ti11 + di4 * ti12;
            let tr4 = dr5 * ti12 - dr4 * ti11;
            let ti4 = di5 * ti12 - di4 * ti11;

            let (a, b) = pm(tr2, tr5);
            ch[(i - 1, 2, k)] = a;
            ch[(ic - 1, 1, k)] = b;
            let (a, b) = pm(ti5, ti2);
            ch[(i, 2, k)] = a;
            ch[(ic, 1, k)] = b;
            let (a, b) = pm(tr3, tr4);
            ch[(i - 1, 4, k)] = a;
            ch[(ic - 1, 3, k)] = b;
            let (a, b) = pm(ti4, ti3);
            ch[(i, 4, k)] = a;
            ch[(ic, 3, k)] = b;
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix5_backward<T: FftNum, V: FftVector<T>>(tw: &RealTwiddles<T>, cc: &[V], ch: &mut [V]) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let (tr11, ti11) = (constant::<T>(TR11), constant::<T>(TI11));
    let (tr12, ti12) = (constant::<T>(TR12), constant::<T>(TI12));
    let cc = View3::new(cc, ido, 5);
    let mut ch = View3Mut::new(ch, ido, l1);

    for k in 0..l1 {
        let ti5 = cc[(0, 2, k)] + cc[(0, 2, k)];
        let ti4 = cc[(0, 4, k)] + cc[(0, 4, k)];
        let tr2 = cc[(ido - 1, 1, k)] + cc[(ido - 1, 1, k)];
        let tr3 = cc[(ido - 1, 3, k)] + cc[(ido - 1, 3, k)];
        let c0 = cc[(0, 0, k)];
        ch[(0, k, 0)] = c0 + tr2 + tr3;
        let cr2 = c0 + tr2 * tr11 + tr3 * tr12;
        let cr3 = c0 + tr2 * tr12 + tr3 * tr11;
        let ci5 = ti5 * ti11 + ti4 * ti12;
        let ci4 = ti5 * ti12 - ti4 * ti11;
        let (a, b) = pm(cr2, ci5);
        ch[(0, k, 4)] = a;
        ch[(0, k, 1)] = b;
        let (a, b) = pm(cr3, ci4);
        ch[(0, k, 3)] = a;
        ch[(0, k, 2)] = b;
    }
    if ido == 1 {
        return BufferSide::Copy;
    }
    for k in 0..l1 {
        for i in (2..ido).step_by(2) {
            let ic = ido - i;
            let (tr2, tr5) = pm(cc[(i - 1, 2, k)], cc[(ic - 1, 1, k)]);
            let (ti5, ti2) = pm(cc[(i, 2, k)], cc[(ic, 1, k)]);
            let (tr3, tr4) = pm(cc[(i - 1, 4, k)], cc[(ic - 1, 3, k)]);
            let (ti4, ti3) = pm(cc[(i, 4, k)], cc[(ic, 3, k)]);
            let (re0, im0) = (cc[(i - 1, 0, k)], cc[(i, 0, k)]);

            ch[(i - 1, k, 0)] = re0 + tr2 + tr3;
            ch[(i, k, 0)] = im0 + ti2 + ti3;
            let cr2 = re0 + tr2 * tr11 + tr3 * tr12;
            let ci2 = im0 + ti2 * tr11 + ti3 * tr12;
            let cr3 = re0 + tr2 * tr12 + tr3 * tr11;
            let ci3 = im0 + ti2 * tr12 + ti3 * tr11;
            let cr5 = tr5 * ti11 + tr4 * ti12;
            let cr4 = tr5 * ti12 - tr4 * ti11;
            let ci5 = ti5 * ti11 + ti4 * ti12;
            let ci4 = ti5 * ti12 - ti4 * ti11;

            let (dr4, dr3) = pm(cr3, ci4);
            let (di3, di4) = pm(ci3, cr4);
            let (dr5, dr2) = pm(cr2, ci5);
            let (di2, di5) = pm(ci2, cr5);

            for (x, di, dr) in [(0, di2, dr2), (1, di3, dr3), (2, di4, dr4), (3, di5, dr5)] {
                let (wr, wi) = twiddle_pair(tw, x, i);
                let (a, b) = conj_mul(wr, wi, di, dr);
                ch[(i, k, x + 1)] = a;
                ch[(i - 1, k, x + 1)] = b;
            }
        }
    }
    BufferSide::Copy
}

#[cfg(test)]
mod unit_tests {
    use super::super::RealPass;
    use super::*;
    use crate::test_utils::check_real_pass;
    use crate::twiddles::UnityRoots;

    fn make_radix(radix: usize, l1: usize, ido: usize, roots: &UnityRoots<f64>) -> RealPass<f64> {
        let tw = RealTwiddles::new(l1, ido, radix, roots);
        match radix {
            2 => RealPass::Radix2(tw),
            3 => RealPass::Radix3(tw),
            4 => RealPass::Radix4(tw),
            5 => RealPass::Radix5(tw),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_real_butterflies() {
        for &radix in &[2, 3, 4, 5] {
            let roots = UnityRoots::new(radix);
            let pass = make_radix(radix, 1, 1, &roots);
            check_real_pass(&pass, radix);
        }
    }

    // Feeding the backward pass with the forward pass's output must give back the input times the radix
    #[test]
    fn test_real_butterflies_with_twiddles() {
        use crate::test_utils::random_real_signal;

        for &(radix, ido) in &[(2, 4), (2, 5), (4, 2), (4, 6), (4, 3), (3, 3), (3, 7), (5, 5), (5, 9)] {
            for &l1 in &[1, 3] {
                let len = radix * ido * l1;
                let roots = UnityRoots::<f64>::new(len);
                let pass = make_radix(radix, l1, ido, &roots);

                let input = random_real_signal::<f64>(len);
                let mut data = input.clone();
                let mut copy = vec![0.0; len];
                let mut halfcomplex = match pass.exec_dir::<f64, true>(&mut data, &mut copy, &mut []) {
                    BufferSide::Input => data,
                    BufferSide::Copy => copy,
                };
                let mut copy = vec![0.0; len];
                let output = match pass.exec_dir::<f64, false>(&mut halfcomplex, &mut copy, &mut []) {
                    BufferSide::Input => halfcomplex,
                    BufferSide::Copy => copy,
                };

                for (n, (got, expected)) in output.iter().zip(input.iter()).enumerate() {
                    assert!(
                        (got - expected * radix as f64).abs() < 1e-10,
                        "radix = {}, l1 = {}, ido = {}, index {}",
                        radix,
                        l1,
                        ido,
                        n
                    );
                }
            }
        }
    }
}

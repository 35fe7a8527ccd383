use num_complex::Complex;
use num_traits::Zero;

use super::{BufferSide, PassTwiddles};
use crate::array_utils::{View3, View3Mut};
use crate::common::{constant, FftNum};
use crate::simd::FftVector;
use crate::twiddles::{pm, rotate_90};

// Sign applied to the imaginary parts of the butterfly constants
#[inline(always)]
fn direction_sign<const FWD: bool>() -> f64 {
    if FWD {
        -1.0
    } else {
        1.0
    }
}

// Computes outputs u and ip - u of an odd-radix butterfly from the symmetric sums and antisymmetric differences of the
// inputs, given cos(2*pi*u*(j+1)/ip) and +-sin(2*pi*u*(j+1)/ip) for each pair j.
#[inline(always)]
fn odd_radix_pair<T: FftNum, V: FftVector<T>, const H: usize>(
    t0: Complex<V>,
    sums: &[Complex<V>; H],
    diffs: &[Complex<V>; H],
    cos: [T; H],
    sin: [T; H],
) -> (Complex<V>, Complex<V>) {
    let mut ca = t0;
    let mut cb = Complex::<V>::zero();
    for j in 0..H {
        ca.re = ca.re + sums[j].re * cos[j];
        ca.im = ca.im + sums[j].im * cos[j];
        cb.im = cb.im + diffs[j].re * sin[j];
        cb.re = cb.re - diffs[j].im * sin[j];
    }
    (ca + cb, ca - cb)
}

pub(crate) fn radix2<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &mut [Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);

    // The first pass of a plan can work in place
    if l1 == 1 {
        let mut cc = View3Mut::new(cc, ido, 2);
        for i in 0..ido {
            let (sum, diff) = pm(cc[(i, 0, 0)], cc[(i, 1, 0)]);
            cc[(i, 0, 0)] = sum;
            cc[(i, 1, 0)] = tw.apply(diff, 0, i, FWD);
        }
        return BufferSide::Input;
    }

    let cc = View3::new(cc, ido, 2);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let (sum, diff) = pm(cc[(i, 0, k)], cc[(i, 1, k)]);
            ch[(i, k, 0)] = sum;
            ch[(i, k, 1)] = tw.apply(diff, 0, i, FWD);
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix3<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let tw1r: T = constant(-0.5);
    let tw1i: T = constant(direction_sign::<FWD>() * 0.866_025_403_784_438_6);

    let cc = View3::new(cc, ido, 3);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let t0 = cc[(i, 0, k)];
            let (t1, t2) = pm(cc[(i, 1, k)], cc[(i, 2, k)]);
            ch[(i, k, 0)] = t0 + t1;

            let (c1, c2) = odd_radix_pair(t0, &[t1], &[t2], [tw1r], [tw1i]);
            ch[(i, k, 1)] = tw.apply(c1, 0, i, FWD);
            ch[(i, k, 2)] = tw.apply(c2, 1, i, FWD);
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix4<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);

    let cc = View3::new(cc, ido, 4);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let (t2, t1) = pm(cc[(i, 0, k)], cc[(i, 2, k)]);
            let (t3, t4) = pm(cc[(i, 1, k)], cc[(i, 3, k)]);
            let t4 = rotate_90(t4, FWD);

            ch[(i, k, 0)] = t2 + t3;
            ch[(i, k, 1)] = tw.apply(t1 + t4, 0, i, FWD);
            ch[(i, k, 2)] = tw.apply(t2 - t3, 1, i, FWD);
            ch[(i, k, 3)] = tw.apply(t1 - t4, 2, i, FWD);
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix5<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let sign = direction_sign::<FWD>();
    let tw1r: T = constant(0.309_016_994_374_947_42);
    let tw1i: T = constant(sign * 0.951_056_516_295_153_57);
    let tw2r: T = constant(-0.809_016_994_374_947_42);
    let tw2i: T = constant(sign * 0.587_785_252_292_473_13);

    let cc = View3::new(cc, ido, 5);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let t0 = cc[(i, 0, k)];
            let (t1, t4) = pm(cc[(i, 1, k)], cc[(i, 4, k)]);
            let (t2, t3) = pm(cc[(i, 2, k)], cc[(i, 3, k)]);
            ch[(i, k, 0)] = t0 + t1 + t2;

            let sums = [t1, t2];
            let diffs = [t4, t3];
            let (c1, c4) = odd_radix_pair(t0, &sums, &diffs, [tw1r, tw2r], [tw1i, tw2i]);
            let (c2, c3) = odd_radix_pair(t0, &sums, &diffs, [tw2r, tw1r], [tw2i, -tw1i]);

            ch[(i, k, 1)] = tw.apply(c1, 0, i, FWD);
            ch[(i, k, 2)] = tw.apply(c2, 1, i, FWD);
            ch[(i, k, 3)] = tw.apply(c3, 2, i, FWD);
            ch[(i, k, 4)] = tw.apply(c4, 3, i, FWD);
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix7<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let sign = direction_sign::<FWD>();
    let tw1r: T = constant(0.623_489_801_858_733_53);
    let tw1i: T = constant(sign * 0.781_831_482_468_029_81);
    let tw2r: T = constant(-0.222_520_933_956_314_40);
    let tw2i: T = constant(sign * 0.974_927_912_181_823_61);
    let tw3r: T = constant(-0.900_968_867_902_419_13);
    let tw3i: T = constant(sign * 0.433_883_739_117_558_12);

    let cc = View3::new(cc, ido, 7);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let t1 = cc[(i, 0, k)];
            let (t2, t7) = pm(cc[(i, 1, k)], cc[(i, 6, k)]);
            let (t3, t6) = pm(cc[(i, 2, k)], cc[(i, 5, k)]);
            let (t4, t5) = pm(cc[(i, 3, k)], cc[(i, 4, k)]);
            ch[(i, k, 0)] = t1 + t2 + t3 + t4;

            let sums = [t2, t3, t4];
            let diffs = [t7, t6, t5];
            let (c1, c6) = odd_radix_pair(t1, &sums, &diffs, [tw1r, tw2r, tw3r], [tw1i, tw2i, tw3i]);
            let (c2, c5) = odd_radix_pair(t1, &sums, &diffs, [tw2r, tw3r, tw1r], [tw2i, -tw3i, -tw1i]);
            let (c3, c4) = odd_radix_pair(t1, &sums, &diffs, [tw3r, tw1r, tw2r], [tw3i, -tw1i, tw2i]);

            ch[(i, k, 1)] = tw.apply(c1, 0, i, FWD);
            ch[(i, k, 2)] = tw.apply(c2, 1, i, FWD);
            ch[(i, k, 3)] = tw.apply(c3, 2, i, FWD);
            ch[(i, k, 4)] = tw.apply(c4, 3, i, FWD);
            ch[(i, k, 5)] = tw.apply(c5, 4, i, FWD);
            ch[(i, k, 6)] = tw.apply(c6, 5, i, FWD);
        }
    }
    BufferSide::Copy
}

#[inline(always)]
fn rotate_45<T: FftNum, V: FftVector<T>>(a: Complex<V>, hsqt2: T, forward: bool) -> Complex<V> {
    if forward {
        Complex::new((a.re + a.im) * hsqt2, (a.im - a.re) * hsqt2)
    } else {
        Complex::new((a.re - a.im) * hsqt2, (a.im + a.re) * hsqt2)
    }
}

#[inline(always)]
fn rotate_135<T: FftNum, V: FftVector<T>>(a: Complex<V>, hsqt2: T, forward: bool) -> Complex<V> {
    if forward {
        Complex::new((a.im - a.re) * hsqt2, -(a.re + a.im) * hsqt2)
    } else {
        Complex::new(-(a.re + a.im) * hsqt2, (a.re - a.im) * hsqt2)
    }
}

pub(crate) fn radix8<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let hsqt2: T = constant(0.707_106_781_186_547_52);

    let cc = View3::new(cc, ido, 8);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            // odd inputs
            let (a1, a5) = pm(cc[(i, 1, k)], cc[(i, 5, k)]);
            let (a3, a7) = pm(cc[(i, 3, k)], cc[(i, 7, k)]);
            let a7 = rotate_90(a7, FWD);
            let (a1, a3) = pm(a1, a3);
            let a3 = rotate_90(a3, FWD);
            let (a5, a7) = pm(a5, a7);
            let a5 = rotate_45(a5, hsqt2, FWD);
            let a7 = rotate_135(a7, hsqt2, FWD);

            // even inputs
            let (a0, a4) = pm(cc[(i, 0, k)], cc[(i, 4, k)]);
            let (a2, a6) = pm(cc[(i, 2, k)], cc[(i, 6, k)]);
            let (a0, a2) = pm(a0, a2);

            ch[(i, k, 0)] = a0 + a1;
            ch[(i, k, 4)] = tw.apply(a0 - a1, 3, i, FWD);
            ch[(i, k, 2)] = tw.apply(a2 + a3, 1, i, FWD);
            ch[(i, k, 6)] = tw.apply(a2 - a3, 5, i, FWD);

            let a6 = rotate_90(a6, FWD);
            let (a4, a6) = pm(a4, a6);
            ch[(i, k, 1)] = tw.apply(a4 + a5, 0, i, FWD);
            ch[(i, k, 5)] = tw.apply(a4 - a5, 4, i, FWD);
            ch[(i, k, 3)] = tw.apply(a6 + a7, 2, i, FWD);
            ch[(i, k, 7)] = tw.apply(a6 - a7, 6, i, FWD);
        }
    }
    BufferSide::Copy
}

pub(crate) fn radix11<T: FftNum, V: FftVector<T>, const FWD: bool>(
    tw: &PassTwiddles<T>,
    cc: &[Complex<V>],
    ch: &mut [Complex<V>],
) -> BufferSide {
    let (l1, ido) = (tw.l1, tw.ido);
    let sign = direction_sign::<FWD>();
    let tw1r: T = constant(0.841_253_532_831_181_17);
    let tw1i: T = constant(sign * 0.540_640_817_455_597_58);
    let tw2r: T = constant(0.415_415_013_001_886_43);
    let tw2i: T = constant(sign * 0.909_631_995_354_518_37);
    let tw3r: T = constant(-0.142_314_838_273_285_14);
    let tw3i: T = constant(sign * 0.989_821_441_880_932_73);
    let tw4r: T = constant(-0.654_860_733_945_285_06);
    let tw4i: T = constant(sign * 0.755_749_574_354_258_28);
    let tw5r: T = constant(-0.959_492_973_614_497_39);
    let tw5i: T = constant(sign * 0.281_732_556_841_429_70);

    let cc = View3::new(cc, ido, 11);
    let mut ch = View3Mut::new(ch, ido, l1);
    for k in 0..l1 {
        for i in 0..ido {
            let t1 = cc[(i, 0, k)];
            let (t2, t11) = pm(cc[(i, 1, k)], cc[(i, 10, k)]);
            let (t3, t10) = pm(cc[(i, 2, k)], cc[(i, 9, k)]);
            let (t4, t9) = pm(cc[(i, 3, k)], cc[(i, 8, k)]);
            let (t5, t8) = pm(cc[(i, 4, k)], cc[(i, 7, k)]);
            let (t6, t7) = pm(cc[(i, 5, k)], cc[(i, 6, k)]);
            ch[(i, k, 0)] = t1 + t2 + t3 + t4 + t5 + t6;

            let sums = [t2, t3, t4, t5, t6];
            let diffs = [t11, t10, t9, t8, t7];
            let (c1, c10) = odd_radix_pair(
                t1,
                &sums,
                &diffs,
                [tw1r, tw2r, tw3r, tw4r, tw5r],
                [tw1i, tw2i, tw3i, tw4i, tw5i],
            );
            let (c2, c9) = odd_radix_pair(
                t1,
                &sums,
                &diffs,
                [tw2r, tw4r, tw5r, tw3r, tw1r],
                [tw2i, tw4i, -tw5i, -tw3i, -tw1i],
            );
            let (c3, c8) = odd_radix_pair(
                t1,
                &sums,
                &diffs,
                [tw3r, tw5r, tw2r, tw1r, tw4r],
                [tw3i, -tw5i, -tw2i, tw1i, tw4i],
            );
            let (c4, c7) = odd_radix_pair(
                t1,
                &sums,
                &diffs,
                [tw4r, tw3r, tw1r, tw5r, tw2r],
                [tw4i, -tw3i, tw1i, tw5i, -tw2i],
            );
            let (c5, c6) = odd_radix_pair(
                t1,
                &sums,
                &diffs,
                [tw5r, tw1r, tw4r, tw2r, tw3r],
                [tw5i, -tw1i, tw4i, -tw2i, tw3i],
            );

            ch[(i, k, 1)] = tw.apply(c1, 0, i, FWD);
            ch[(i, k, 2)] = tw.apply(c2, 1, i, FWD);
            ch[(i, k, 3)] = tw.apply(c3, 2, i, FWD);
            ch[(i, k, 4)] = tw.apply(c4, 3, i, FWD);
            ch[(i, k, 5)] = tw.apply(c5, 4, i, FWD);
            ch[(i, k, 6)] = tw.apply(c6, 5, i, FWD);
            ch[(i, k, 7)] = tw.apply(c7, 6, i, FWD);
            ch[(i, k, 8)] = tw.apply(c8, 7, i, FWD);
            ch[(i, k, 9)] = tw.apply(c9, 8, i, FWD);
            ch[(i, k, 10)] = tw.apply(c10, 9, i, FWD);
        }
    }
    BufferSide::Copy
}

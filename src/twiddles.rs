use std::f64::consts::FRAC_PI_4;
use std::ops::{Add, Index, Neg, Sub};

use num_complex::Complex;

use crate::common::FftNum;
use crate::simd::FftVector;

/// Table of the `len`-th roots of unity, `exp(2*pi*i*k/len)` for `k` in `0..len`.
///
/// Passes of a plan share one table and index into it with a stride, so the table length must be a multiple of
/// every length a pass covers. Forward passes conjugate the values they read.
pub struct UnityRoots<T> {
    roots: Box<[Complex<T>]>,
}

impl<T: FftNum> UnityRoots<T> {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "A table of roots of unity needs a nonzero length");

        let half = len / 2;
        let mut roots = Vec::with_capacity(len);
        for index in 0..=half {
            let (re, im) = unity_root(index, len);
            roots.push(Complex::new(T::from_f64(re).unwrap(), T::from_f64(im).unwrap()));
        }
        for index in half + 1..len {
            let mirrored = roots[len - index];
            roots.push(mirrored.conj());
        }

        Self {
            roots: roots.into_boxed_slice(),
        }
    }
}

impl<T> UnityRoots<T> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.roots.len()
    }
}

impl<T> Index<usize> for UnityRoots<T> {
    type Output = Complex<T>;

    #[inline(always)]
    fn index(&self, index: usize) -> &Complex<T> {
        &self.roots[index]
    }
}

// Computes exp(2*pi*i*index/len) with the angle reduced to the first octant, then rotated into place.
fn unity_root(index: usize, len: usize) -> (f64, f64) {
    let scaled = 8 * index as u128;
    let octant = (scaled / len as u128) as usize;
    let remainder = (scaled % len as u128) as f64;
    let len_float = len as f64;

    let (c, s) = if octant % 2 == 0 {
        let angle = FRAC_PI_4 * remainder / len_float;
        (angle.cos(), angle.sin())
    } else {
        let angle = FRAC_PI_4 * (len_float - remainder) / len_float;
        (angle.sin(), angle.cos())
    };

    match (octant / 2) % 4 {
        0 => (c, s),
        1 => (-s, c),
        2 => (-c, -s),
        _ => (s, -c),
    }
}

/// Multiplies `value` by `twiddle`, or by its conjugate for forward transforms.
#[inline(always)]
pub(crate) fn special_mul<T: FftNum, V: FftVector<T>>(
    value: Complex<V>,
    twiddle: Complex<T>,
    forward: bool,
) -> Complex<V> {
    if forward {
        Complex::new(
            value.re * twiddle.re + value.im * twiddle.im,
            value.im * twiddle.re - value.re * twiddle.im,
        )
    } else {
        Complex::new(
            value.re * twiddle.re - value.im * twiddle.im,
            value.re * twiddle.im + value.im * twiddle.re,
        )
    }
}

/// Multiplies by `-i` for forward transforms, by `i` otherwise.
#[inline(always)]
pub(crate) fn rotate_90<V: Copy + Neg<Output = V>>(value: Complex<V>, forward: bool) -> Complex<V> {
    if forward {
        Complex::new(value.im, -value.re)
    } else {
        Complex::new(-value.im, value.re)
    }
}

/// Returns `(a + b, a - b)`.
#[inline(always)]
pub(crate) fn pm<V: Copy + Add<Output = V> + Sub<Output = V>>(a: V, b: V) -> (V, V) {
    (a + b, a - b)
}

#[inline(always)]
pub(crate) fn scale_complex<T: FftNum, V: FftVector<T>>(value: Complex<V>, factor: T) -> Complex<V> {
    Complex::new(value.re * factor, value.im * factor)
}

/// Multiplies `re + i*im` by the conjugate of `wr + i*wi`.
#[inline(always)]
pub(crate) fn conj_mul<T: FftNum, V: FftVector<T>>(wr: T, wi: T, re: V, im: V) -> (V, V) {
    (re * wr + im * wi, im * wr - re * wi)
}

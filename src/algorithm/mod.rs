//! The pass families.
//!
//! A pass implements one factor `ip` of a transform, at a position described by `l1` (product of the factors applied
//! before it) and `ido` (product of the factors applied after it). Every pass reads its input buffer, may write a
//! second "copy" buffer of the same length, and reports which of the two holds its result.
//!
//! Complex passes read `CC(a, b, c) = cc[a + ido * (b + ip * c)]` and write `CH(a, b, c) = ch[a + ido * (b + l1 * c)]`.
//! Forward real passes read with the `l1` layout and write with the `ip` layout, backward real passes the reverse.

use num_complex::Complex;

use crate::common::FftNum;
use crate::simd::FftVector;
use crate::twiddles::{special_mul, UnityRoots};
use crate::FftDirection;

mod bluesteins_algorithm;
mod butterflies;
mod generic_prime;
mod mixed_radix;
mod real_bluestein;
mod real_butterflies;
mod real_generic_prime;
mod real_mixed_radix;
mod vectorized;

pub(crate) use self::bluesteins_algorithm::Bluestein;
pub(crate) use self::generic_prime::GenericPrime;
pub(crate) use self::mixed_radix::MixedRadix;
pub(crate) use self::real_bluestein::RealBluestein;
pub(crate) use self::real_generic_prime::RealGenericPrime;
pub(crate) use self::real_mixed_radix::RealMixedRadix;
pub(crate) use self::vectorized::Vectorized;

/// Which of the two buffers handed to a pass holds its result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BufferSide {
    Input,
    Copy,
}
impl BufferSide {
    #[inline(always)]
    pub fn flip(self) -> Self {
        match self {
            BufferSide::Input => BufferSide::Copy,
            BufferSide::Copy => BufferSide::Input,
        }
    }
}

/// Twiddle factors of a complex pass: `twiddle(j - 1, i) = roots[rfct * j * l1 * i]` for `j` in `1..ip`, `i` in `1..ido`.
pub(crate) struct PassTwiddles<T> {
    pub l1: usize,
    pub ido: usize,
    twiddles: Box<[Complex<T>]>,
}

impl<T: FftNum> PassTwiddles<T> {
    pub fn new(l1: usize, ido: usize, ip: usize, roots: &UnityRoots<T>) -> Self {
        let rfct = root_stride(l1 * ido * ip, roots);

        let mut twiddles = Vec::with_capacity((ip - 1) * (ido - 1));
        for j in 1..ip {
            for i in 1..ido {
                twiddles.push(roots[rfct * j * l1 * i]);
            }
        }
        Self {
            l1,
            ido,
            twiddles: twiddles.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn twiddle(&self, x: usize, i: usize) -> Complex<T> {
        self.twiddles[i - 1 + x * (self.ido - 1)]
    }

    /// Multiplies `value` by twiddle `(x, i)`. Column `i == 0` has unit twiddles.
    #[inline(always)]
    pub fn apply<V: FftVector<T>>(&self, value: Complex<V>, x: usize, i: usize, forward: bool) -> Complex<V> {
        if i == 0 {
            value
        } else {
            special_mul(value, self.twiddle(x, i), forward)
        }
    }
}

/// Returns the stride that maps a root of order `len` into the shared table.
pub(crate) fn root_stride<T>(len: usize, roots: &UnityRoots<T>) -> usize {
    assert_eq!(
        roots.len() % len,
        0,
        "Table of roots of unity has length {}, which is not a multiple of the pass length {}",
        roots.len(),
        len
    );
    roots.len() / len
}

pub(crate) enum ComplexPass<T> {
    Identity,
    Radix2(PassTwiddles<T>),
    Radix3(PassTwiddles<T>),
    Radix4(PassTwiddles<T>),
    Radix5(PassTwiddles<T>),
    Radix7(PassTwiddles<T>),
    Radix8(PassTwiddles<T>),
    Radix11(PassTwiddles<T>),
    GenericPrime(GenericPrime<T>),
    Bluestein(Bluestein<T>),
    MixedRadix(MixedRadix<T>),
    Vectorized(Vectorized<T>),
}

impl<T: FftNum> ComplexPass<T> {
    /// Scratch elements `exec` needs, in units of the element type it is executed with.
    pub fn bufsize(&self) -> usize {
        use self::ComplexPass::*;
        match *self {
            Bluestein(ref pass) => pass.bufsize(),
            MixedRadix(ref pass) => pass.bufsize(),
            Vectorized(ref pass) => pass.bufsize(),
            _ => 0,
        }
    }

    /// Whether `exec` needs a copy buffer distinct from its input.
    pub fn needs_copy(&self) -> bool {
        use self::ComplexPass::*;
        match *self {
            Identity => false,
            Radix2(ref tw) => tw.l1 > 1,
            Radix3(_) | Radix4(_) | Radix5(_) | Radix7(_) | Radix8(_) | Radix11(_) => true,
            GenericPrime(_) => true,
            Bluestein(ref pass) => pass.needs_copy(),
            MixedRadix(ref pass) => pass.needs_copy(),
            Vectorized(_) => false,
        }
    }

    pub fn name(&self) -> &'static str {
        use self::ComplexPass::*;
        match *self {
            Identity => "identity",
            Radix2(_) => "radix-2",
            Radix3(_) => "radix-3",
            Radix4(_) => "radix-4",
            Radix5(_) => "radix-5",
            Radix7(_) => "radix-7",
            Radix8(_) => "radix-8",
            Radix11(_) => "radix-11",
            GenericPrime(_) => "generic prime",
            Bluestein(_) => "bluestein",
            MixedRadix(_) => "mixed radix",
            Vectorized(_) => "vectorized",
        }
    }

    pub fn exec<V: FftVector<T>>(
        &self,
        cc: &mut [Complex<V>],
        ch: &mut [Complex<V>],
        buf: &mut [Complex<V>],
        direction: FftDirection,
    ) -> BufferSide {
        match direction {
            FftDirection::Forward => self.exec_dir::<V, true>(cc, ch, buf),
            FftDirection::Inverse => self.exec_dir::<V, false>(cc, ch, buf),
        }
    }

    pub fn exec_dir<V: FftVector<T>, const FWD: bool>(
        &self,
        cc: &mut [Complex<V>],
        ch: &mut [Complex<V>],
        buf: &mut [Complex<V>],
    ) -> BufferSide {
        use self::ComplexPass::*;
        match *self {
            Identity => BufferSide::Input,
            Radix2(ref tw) => butterflies::radix2::<T, V, FWD>(tw, cc, ch),
            Radix3(ref tw) => butterflies::radix3::<T, V, FWD>(tw, cc, ch),
            Radix4(ref tw) => butterflies::radix4::<T, V, FWD>(tw, cc, ch),
            Radix5(ref tw) => butterflies::radix5::<T, V, FWD>(tw, cc, ch),
            Radix7(ref tw) => butterflies::radix7::<T, V, FWD>(tw, cc, ch),
            Radix8(ref tw) => butterflies::radix8::<T, V, FWD>(tw, cc, ch),
            Radix11(ref tw) => butterflies::radix11::<T, V, FWD>(tw, cc, ch),
            GenericPrime(ref pass) => pass.exec::<V, FWD>(cc, ch),
            Bluestein(ref pass) => pass.exec::<V, FWD>(cc, ch, buf),
            MixedRadix(ref pass) => pass.exec::<V, FWD>(cc, ch, buf),
            Vectorized(ref pass) => pass.exec::<V, FWD>(cc, buf),
        }
    }
}

/// Twiddle factors of a real pass, stored as interleaved `(re, im)` pairs: `twiddle(x, i) = wa[i + x * (ido - 1)]`.
pub(crate) struct RealTwiddles<T> {
    pub l1: usize,
    pub ido: usize,
    twiddles: Box<[T]>,
}

impl<T: FftNum> RealTwiddles<T> {
    pub fn new(l1: usize, ido: usize, ip: usize, roots: &UnityRoots<T>) -> Self {
        let rfct = root_stride(l1 * ido * ip, roots);

        let mut twiddles = vec![T::zero(); (ip - 1) * (ido - 1)];
        for j in 1..ip {
            for i in 1..=(ido - 1) / 2 {
                let root = roots[rfct * j * l1 * i];
                twiddles[(j - 1) * (ido - 1) + 2 * i - 2] = root.re;
                twiddles[(j - 1) * (ido - 1) + 2 * i - 1] = root.im;
            }
        }
        Self {
            l1,
            ido,
            twiddles: twiddles.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn wa(&self, x: usize, i: usize) -> T {
        self.twiddles[i + x * (self.ido - 1)]
    }
}

pub(crate) enum RealPass<T> {
    Identity,
    Radix2(RealTwiddles<T>),
    Radix3(RealTwiddles<T>),
    Radix4(RealTwiddles<T>),
    Radix5(RealTwiddles<T>),
    GenericPrime(RealGenericPrime<T>),
    Bluestein(RealBluestein<T>),
    MixedRadix(RealMixedRadix<T>),
}

impl<T: FftNum> RealPass<T> {
    /// Scratch elements `exec` needs, in reals.
    pub fn bufsize(&self) -> usize {
        use self::RealPass::*;
        match *self {
            Bluestein(ref pass) => pass.bufsize(),
            MixedRadix(ref pass) => pass.bufsize(),
            _ => 0,
        }
    }

    pub fn needs_copy(&self) -> bool {
        use self::RealPass::*;
        match *self {
            Identity => false,
            MixedRadix(ref pass) => pass.needs_copy(),
            _ => true,
        }
    }

    pub fn name(&self) -> &'static str {
        use self::RealPass::*;
        match *self {
            Identity => "identity",
            Radix2(_) => "radix-2",
            Radix3(_) => "radix-3",
            Radix4(_) => "radix-4",
            Radix5(_) => "radix-5",
            GenericPrime(_) => "generic prime",
            Bluestein(_) => "bluestein",
            MixedRadix(_) => "mixed radix",
        }
    }

    pub fn exec<V: FftVector<T>>(&self, cc: &mut [V], ch: &mut [V], buf: &mut [V], direction: FftDirection) -> BufferSide {
        match direction {
            FftDirection::Forward => self.exec_dir::<V, true>(cc, ch, buf),
            FftDirection::Inverse => self.exec_dir::<V, false>(cc, ch, buf),
        }
    }

    pub fn exec_dir<V: FftVector<T>, const FWD: bool>(&self, cc: &mut [V], ch: &mut [V], buf: &mut [V]) -> BufferSide {
        use self::RealPass::*;
        match *self {
            Identity => BufferSide::Input,
            Radix2(ref tw) if FWD => real_butterflies::radix2_forward(tw, cc, ch),
            Radix2(ref tw) => real_butterflies::radix2_backward(tw, cc, ch),
            Radix3(ref tw) if FWD => real_butterflies::radix3_forward(tw, cc, ch),
            Radix3(ref tw) => real_butterflies::radix3_backward(tw, cc, ch),
            Radix4(ref tw) if FWD => real_butterflies::radix4_forward(tw, cc, ch),
            Radix4(ref tw) => real_butterflies::radix4_backward(tw, cc, ch),
            Radix5(ref tw) if FWD => real_butterflies::radix5_forward(tw, cc, ch),
            Radix5(ref tw) => real_butterflies::radix5_backward(tw, cc, ch),
            GenericPrime(ref pass) if FWD => pass.forward(cc, ch),
            GenericPrime(ref pass) => pass.backward(cc, ch),
            Bluestein(ref pass) if FWD => pass.forward(cc, ch, buf),
            Bluestein(ref pass) => pass.backward(cc, ch, buf),
            MixedRadix(ref pass) => pass.exec::<V, FWD>(cc, ch, buf),
        }
    }
}

//! Element types the passes can run on.
//!
//! Every pass is generic over a data element `V` that implements [`FftVector`]. Scalars run one transform at a time.
//! [`Lanes`] runs `N` independent transforms in lockstep: lane `j` of every element belongs to transform `j`.
//! The set of supported element types is closed: `f32`, `f64`, and `Lanes` of 2, 4 or 8 of either.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use num_complex::Complex;
use num_traits::{Num, One, Zero};

use crate::common::FftNum;

mod private {
    pub trait Sealed {}
}

/// A data element the passes can operate on: either a scalar, or a fixed number of lanes of scalars.
pub trait FftVector<T: FftNum>:
    Copy + Debug + Send + Sync + 'static + Num + Neg<Output = Self> + Mul<T, Output = Self> + private::Sealed
{
    /// Number of independent transforms carried by one element.
    const LANES: usize;

    /// Returns an element with `value` in every lane.
    fn splat(value: T) -> Self;

    /// Returns the value in lane `lane`.
    fn extract(self, lane: usize) -> T;

    /// Overwrites lane `lane` with `value`.
    fn replace(&mut self, lane: usize, value: T);

    /// Views a buffer of this element type as scalars, if this element type is the scalar itself.
    #[doc(hidden)]
    fn as_scalar_slice(data: &mut [Complex<Self>]) -> Option<&mut [Complex<T>]>;
}

macro_rules! impl_scalar_vector {
    ($($float:ty),*) => {$(
        impl private::Sealed for $float {}
        impl FftVector<$float> for $float {
            const LANES: usize = 1;

            #[inline(always)]
            fn splat(value: $float) -> Self {
                value
            }
            #[inline(always)]
            fn extract(self, _lane: usize) -> $float {
                self
            }
            #[inline(always)]
            fn replace(&mut self, _lane: usize, value: $float) {
                *self = value;
            }
            #[inline(always)]
            fn as_scalar_slice(data: &mut [Complex<Self>]) -> Option<&mut [Complex<$float>]> {
                Some(data)
            }
        }
    )*}
}
impl_scalar_vector!(f32, f64);

/// `N` lanes of `T`, combined elementwise.
///
/// Passing a buffer of `Complex<Lanes<T, N>>` to a plan transforms `N` interleaved signals with a single call:
///
/// ~~~
/// use passfft::num_complex::Complex;
/// use passfft::{ComplexFft, FftDirection, Lanes};
///
/// let fft = ComplexFft::<f64>::new(6, false);
///
/// // lane 0 holds an impulse, lane 1 holds a constant signal
/// let mut buffer: Vec<Complex<Lanes<f64, 2>>> = (0..6)
///     .map(|i| Complex::new(Lanes([if i == 0 { 1.0 } else { 0.0 }, 1.0]), Lanes([0.0, 0.0])))
///     .collect();
/// fft.process(&mut buffer, 1.0, FftDirection::Forward);
///
/// assert!((buffer[3].re.0[0] - 1.0).abs() < 1e-12);
/// assert!((buffer[0].re.0[1] - 6.0).abs() < 1e-12);
/// ~~~
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(transparent)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

macro_rules! lanes_binary_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident) => {
        impl<T: Copy + $op_trait<Output = T>, const N: usize> $op_trait for Lanes<T, N> {
            type Output = Self;
            #[inline(always)]
            fn $op_fn(mut self, rhs: Self) -> Self {
                for (lhs, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
                    *lhs = $op_trait::$op_fn(*lhs, *rhs);
                }
                self
            }
        }
        impl<T: Copy + $op_trait<Output = T>, const N: usize> $assign_trait for Lanes<T, N> {
            #[inline(always)]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = $op_trait::$op_fn(*self, rhs);
            }
        }
    };
}
lanes_binary_op!(Add, add, AddAssign, add_assign);
lanes_binary_op!(Sub, sub, SubAssign, sub_assign);
lanes_binary_op!(Mul, mul, MulAssign, mul_assign);
lanes_binary_op!(Div, div, DivAssign, div_assign);
lanes_binary_op!(Rem, rem, RemAssign, rem_assign);

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Lanes<T, N> {
    type Output = Self;
    #[inline(always)]
    fn neg(mut self) -> Self {
        for lane in self.0.iter_mut() {
            *lane = -*lane;
        }
        self
    }
}

impl<T: Copy + Zero, const N: usize> Zero for Lanes<T, N> {
    #[inline(always)]
    fn zero() -> Self {
        Lanes([T::zero(); N])
    }
    fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }
}

impl<T: Copy + One, const N: usize> One for Lanes<T, N> {
    #[inline(always)]
    fn one() -> Self {
        Lanes([T::one(); N])
    }
}

impl<T: Copy + Num, const N: usize> Num for Lanes<T, N> {
    type FromStrRadixErr = T::FromStrRadixErr;

    fn from_str_radix(text: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        T::from_str_radix(text, radix).map(|value| Lanes([value; N]))
    }
}

macro_rules! impl_lanes_vector {
    ($float:ty; $($lanes:literal),*) => {$(
        impl Mul<$float> for Lanes<$float, $lanes> {
            type Output = Self;
            #[inline(always)]
            fn mul(mut self, rhs: $float) -> Self {
                for lane in self.0.iter_mut() {
                    *lane = *lane * rhs;
                }
                self
            }
        }

        impl private::Sealed for Lanes<$float, $lanes> {}
        impl FftVector<$float> for Lanes<$float, $lanes> {
            const LANES: usize = $lanes;

            #[inline(always)]
            fn splat(value: $float) -> Self {
                Lanes([value; $lanes])
            }
            #[inline(always)]
            fn extract(self, lane: usize) -> $float {
                self.0[lane]
            }
            #[inline(always)]
            fn replace(&mut self, lane: usize, value: $float) {
                self.0[lane] = value;
            }
            #[inline(always)]
            fn as_scalar_slice(_data: &mut [Complex<Self>]) -> Option<&mut [Complex<$float>]> {
                None
            }
        }
    )*}
}
impl_lanes_vector!(f32; 2, 4, 8);
impl_lanes_vector!(f64; 2, 4, 8);

#[cfg(all(feature = "avx", target_arch = "x86_64", target_feature = "avx"))]
pub type NativeF32 = Lanes<f32, 8>;
#[cfg(all(feature = "avx", target_arch = "x86_64", target_feature = "avx"))]
pub type NativeF64 = Lanes<f64, 4>;

#[cfg(all(
    feature = "sse",
    target_arch = "x86_64",
    not(all(feature = "avx", target_feature = "avx"))
))]
pub type NativeF32 = Lanes<f32, 4>;
#[cfg(all(
    feature = "sse",
    target_arch = "x86_64",
    not(all(feature = "avx", target_feature = "avx"))
))]
pub type NativeF64 = Lanes<f64, 2>;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub type NativeF32 = Lanes<f32, 4>;
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub type NativeF64 = Lanes<f64, 2>;

#[cfg(not(any(
    all(feature = "avx", target_arch = "x86_64", target_feature = "avx"),
    all(feature = "sse", target_arch = "x86_64"),
    all(feature = "neon", target_arch = "aarch64")
)))]
pub type NativeF32 = f32;
#[cfg(not(any(
    all(feature = "avx", target_arch = "x86_64", target_feature = "avx"),
    all(feature = "sse", target_arch = "x86_64"),
    all(feature = "neon", target_arch = "aarch64")
)))]
pub type NativeF64 = f64;

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_lanes_arithmetic() {
        let a = Lanes([1.0f64, 2.0, 3.0, 4.0]);
        let b = Lanes([0.5f64, -1.0, 2.0, 0.0]);

        assert_eq!(a + b, Lanes([1.5, 1.0, 5.0, 4.0]));
        assert_eq!(a - b, Lanes([0.5, 3.0, 1.0, 4.0]));
        assert_eq!(a * b, Lanes([0.5, -2.0, 6.0, 0.0]));
        assert_eq!(a * 2.0, Lanes([2.0, 4.0, 6.0, 8.0]));
        assert_eq!(-a, Lanes([-1.0, -2.0, -3.0, -4.0]));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_lanes_access() {
        let mut v = <Lanes<f32, 8> as FftVector<f32>>::splat(3.0);
        v.replace(5, -1.0);
        for lane in 0..8 {
            let expected = if lane == 5 { -1.0 } else { 3.0 };
            assert_eq!(v.extract(lane), expected);
        }
        assert!(Lanes::<f32, 8>::zero().is_zero());
        assert!(!v.is_zero());
    }

    #[test]
    fn test_scalar_view() {
        let mut scalars = vec![Complex::new(1.0f64, 2.0); 4];
        assert!(<f64 as FftVector<f64>>::as_scalar_slice(&mut scalars).is_some());

        let mut lanes = vec![Complex::new(Lanes([1.0f64, 2.0]), Lanes([0.0, 0.0])); 4];
        assert!(<Lanes<f64, 2> as FftVector<f64>>::as_scalar_slice(&mut lanes).is_none());
    }
}

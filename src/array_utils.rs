use std::mem;
use std::ops::{Index, IndexMut};

use num_complex::Complex;

use crate::common::FftNum;
use crate::simd::FftVector;

/// Read-only view of a pass buffer as a 3D array. Element `(a, b, c)` lives at `a + ido * (b + n * c)`.
#[derive(Copy, Clone)]
pub struct View3<'a, D> {
    data: &'a [D],
    ido: usize,
    n: usize,
}
impl<'a, D> View3<'a, D> {
    #[inline(always)]
    pub fn new(data: &'a [D], ido: usize, n: usize) -> Self {
        Self { data, ido, n }
    }
}
impl<'a, D> Index<(usize, usize, usize)> for View3<'a, D> {
    type Output = D;

    #[inline(always)]
    fn index(&self, (a, b, c): (usize, usize, usize)) -> &D {
        &self.data[a + self.ido * (b + self.n * c)]
    }
}

/// Mutable counterpart of `View3`.
pub struct View3Mut<'a, D> {
    data: &'a mut [D],
    ido: usize,
    n: usize,
}
impl<'a, D> View3Mut<'a, D> {
    #[inline(always)]
    pub fn new(data: &'a mut [D], ido: usize, n: usize) -> Self {
        Self { data, ido, n }
    }
}
impl<'a, D> Index<(usize, usize, usize)> for View3Mut<'a, D> {
    type Output = D;

    #[inline(always)]
    fn index(&self, (a, b, c): (usize, usize, usize)) -> &D {
        &self.data[a + self.ido * (b + self.n * c)]
    }
}
impl<'a, D> IndexMut<(usize, usize, usize)> for View3Mut<'a, D> {
    #[inline(always)]
    fn index_mut(&mut self, (a, b, c): (usize, usize, usize)) -> &mut D {
        &mut self.data[a + self.ido * (b + self.n * c)]
    }
}

/// Reinterprets scalar scratch space as lane vectors. Trailing elements that don't fill a whole vector are dropped.
pub fn lanes_from_scalars<T: FftNum, V: FftVector<T>>(data: &mut [Complex<T>]) -> &mut [Complex<V>] {
    assert_eq!(
        mem::size_of::<Complex<V>>(),
        V::LANES * mem::size_of::<Complex<T>>()
    );
    assert_eq!(mem::align_of::<V>(), mem::align_of::<T>());

    let len = data.len() / V::LANES;
    // Safety: `V` is either `T` or a `repr(transparent)` array of `T`, so `Complex<V>` is a `repr(C)` struct of
    // `2 * V::LANES` values of `T` with the alignment of `T`, and every bit pattern is a valid float.
    unsafe { std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut Complex<V>, len) }
}

/// Reinterprets a buffer of reals as complex numbers. An odd trailing element is dropped.
pub fn into_complex_mut<V: Copy>(buffer: &mut [V]) -> &mut [Complex<V>] {
    let len = buffer.len() / 2;
    // Safety: `Complex<V>` is `repr(C)` with two fields of `V`, so it has the size of two `V` and the alignment of `V`
    unsafe { std::slice::from_raw_parts_mut(buffer.as_mut_ptr() as *mut Complex<V>, len) }
}

use num_complex::Complex;
use num_traits::{Float, Zero};

use rand::distributions::{uniform::SampleUniform, Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};

use crate::algorithm::{BufferSide, ComplexPass, RealPass};
use crate::{FftDirection, FftNum};

/// The seed for the random number generator used to generate
/// random signals. It's defined here so that we have deterministic
/// tests
const RNG_SEED: [u8; 32] = [
    1, 9, 1, 0, 1, 1, 4, 3, 1, 4, 9, 8, 4, 1, 4, 8, 2, 8, 1, 2, 2, 2, 6, 1, 2, 3, 4, 5, 6, 7, 8, 9,
];

pub fn random_signal<T: FftNum + SampleUniform>(length: usize) -> Vec<Complex<T>> {
    let mut sig = Vec::with_capacity(length);
    let dist: Uniform<T> = Uniform::new(-T::from_f64(10.0).unwrap(), T::from_f64(10.0).unwrap());
    let mut rng: StdRng = SeedableRng::from_seed(RNG_SEED);
    for _ in 0..length {
        sig.push(Complex {
            re: dist.sample(&mut rng),
            im: dist.sample(&mut rng),
        });
    }
    sig
}

pub fn random_real_signal<T: FftNum + SampleUniform>(length: usize) -> Vec<T> {
    let dist: Uniform<T> = Uniform::new(-T::from_f64(10.0).unwrap(), T::from_f64(10.0).unwrap());
    let mut rng: StdRng = SeedableRng::from_seed(RNG_SEED);
    (0..length).map(|_| dist.sample(&mut rng)).collect()
}

// Relative L2 error, loose enough for O(n^2) reference error in f32
fn close_enough<T: FftNum + Float>(error_sq: f64, norm_sq: f64) -> bool {
    let tolerance = T::epsilon().to_f64().unwrap() * 1e4;
    error_sq.sqrt() <= tolerance * norm_sq.sqrt().max(1.0)
}

pub fn compare_vectors<T: FftNum + Float>(vec1: &[Complex<T>], vec2: &[Complex<T>]) -> bool {
    assert_eq!(vec1.len(), vec2.len());
    let mut error_sq = 0.0;
    let mut norm_sq = 0.0;
    for (&a, &b) in vec1.iter().zip(vec2.iter()) {
        error_sq += (a - b).norm_sqr().to_f64().unwrap();
        norm_sq += b.norm_sqr().to_f64().unwrap();
    }
    close_enough::<T>(error_sq, norm_sq)
}

pub fn compare_real<T: FftNum + Float>(vec1: &[T], vec2: &[T]) -> bool {
    assert_eq!(vec1.len(), vec2.len());
    let mut error_sq = 0.0;
    let mut norm_sq = 0.0;
    for (&a, &b) in vec1.iter().zip(vec2.iter()) {
        error_sq += (a - b).to_f64().unwrap().powi(2);
        norm_sq += b.to_f64().unwrap().powi(2);
    }
    close_enough::<T>(error_sq, norm_sq)
}

// exp(sign * 2*pi*i*k/len), with k reduced first to keep the angle small
fn root(k: usize, len: usize, sign: f64) -> Complex<f64> {
    let angle = sign * 2.0 * std::f64::consts::PI * (k % len) as f64 / len as f64;
    Complex::from_polar(1.0, angle)
}

/// Naive O(n^2) DFT, evaluated in f64.
pub fn dft<T: FftNum + Float>(input: &[Complex<T>], direction: FftDirection) -> Vec<Complex<T>> {
    let len = input.len();
    let sign = match direction {
        FftDirection::Forward => -1.0,
        FftDirection::Inverse => 1.0,
    };
    (0..len)
        .map(|k| {
            let mut sum = Complex::<f64>::zero();
            for (n, value) in input.iter().enumerate() {
                let value = Complex::new(value.re.to_f64().unwrap(), value.im.to_f64().unwrap());
                sum = sum + value * root(k * n, len, sign);
            }
            Complex::new(T::from_f64(sum.re).unwrap(), T::from_f64(sum.im).unwrap())
        })
        .collect()
}

/// Naive forward real DFT, returned in halfcomplex order `[r0, r1, i1, r2, i2, ...]`.
pub fn real_dft<T: FftNum + Float>(input: &[T]) -> Vec<T> {
    let len = input.len();
    let complex: Vec<Complex<T>> = input.iter().map(|&x| Complex::new(x, T::zero())).collect();
    let spectrum = dft(&complex, FftDirection::Forward);

    let mut result = Vec::with_capacity(len);
    result.push(spectrum[0].re);
    for k in 1..(len + 1) / 2 {
        result.push(spectrum[k].re);
        result.push(spectrum[k].im);
    }
    if len % 2 == 0 && len > 0 {
        result.push(spectrum[len / 2].re);
    }
    result
}

/// Runs a whole-transform pass on a random signal, with exactly the scratch it asks for, and compares the result
/// with the naive DFT.
pub fn check_complex_pass(pass: &ComplexPass<f64>, len: usize, direction: FftDirection) {
    let input = random_signal::<f64>(len);
    let expected = dft(&input, direction);

    let mut data = input.clone();
    let mut copy = vec![Complex::zero(); if pass.needs_copy() { len } else { 0 }];
    let mut scratch = vec![Complex::zero(); pass.bufsize()];
    let actual = match pass.exec(&mut data, &mut copy, &mut scratch, direction) {
        BufferSide::Input => data,
        BufferSide::Copy => copy,
    };

    assert!(
        compare_vectors(&actual, &expected),
        "{} pass of length {} failed, direction = {}",
        pass.name(),
        len,
        direction
    );
}

/// Checks a whole-transform real pass in both directions: forward against the naive halfcomplex DFT, backward
/// against the unnormalized inverse of that DFT.
pub fn check_real_pass(pass: &RealPass<f64>, len: usize) {
    let input = random_real_signal::<f64>(len);
    let expected = real_dft(&input);

    let mut data = input.clone();
    let mut copy = vec![0.0; if pass.needs_copy() { len } else { 0 }];
    let mut scratch = vec![0.0; pass.bufsize()];
    let actual = match pass.exec(&mut data, &mut copy, &mut scratch, FftDirection::Forward) {
        BufferSide::Input => data,
        BufferSide::Copy => copy,
    };
    assert!(
        compare_real(&actual, &expected),
        "forward {} pass of length {} failed",
        pass.name(),
        len
    );

    let mut data = expected;
    let mut copy = vec![0.0; if pass.needs_copy() { len } else { 0 }];
    let actual = match pass.exec(&mut data, &mut copy, &mut scratch, FftDirection::Inverse) {
        BufferSide::Input => data,
        BufferSide::Copy => copy,
    };
    let scaled_input: Vec<f64> = input.iter().map(|x| x * len as f64).collect();
    assert!(
        compare_real(&actual, &scaled_input),
        "backward {} pass of length {} failed",
        pass.name(),
        len
    );
}

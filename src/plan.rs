use std::collections::HashMap;
use std::sync::Arc;

use crate::algorithm::*;
use crate::common::{native_lanes, FftNum};
use crate::math_utils::{complex_factors, real_factors};
use crate::transform::{ComplexFft, RealFft};
use crate::twiddles::UnityRoots;

/// Tuning knobs of the plan builder.
///
/// The defaults are what `ComplexFft::new` and `RealFft::new` use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlanOptions {
    /// Complex prime factors below this use the direct O(n^2) pass, larger ones use Bluestein's algorithm.
    pub complex_bluestein_threshold: usize,
    /// Real prime factors below this use the direct O(n^2) pass, larger ones use Bluestein's algorithm.
    pub real_bluestein_threshold: usize,
    /// Vectorized passes are only built for lengths strictly between these two bounds.
    pub vectorize_min_len: usize,
    pub vectorize_max_len: usize,
    /// Vectorized composite passes longer than this are split into two packets of roughly equal length.
    pub packet_split_threshold: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            complex_bluestein_threshold: 110,
            real_bluestein_threshold: 135,
            vectorize_min_len: 300,
            vectorize_max_len: 32768,
            packet_split_threshold: 1000,
        }
    }
}

/// Builds the complex pass for factor `ip` at position `(l1, ido)`.
///
/// `roots` must hold a multiple of `l1 * ido * ip` roots of unity.
pub(crate) fn make_complex_pass<T: FftNum>(
    l1: usize,
    ido: usize,
    ip: usize,
    roots: &Arc<UnityRoots<T>>,
    vectorize: bool,
    options: &PlanOptions,
) -> ComplexPass<T> {
    assert!(ip > 0, "FFT length must be nonzero");

    let vlen = native_lanes::<T>();
    if vectorize
        && vlen > 1
        && options.vectorize_min_len < ip
        && ip < options.vectorize_max_len
        && l1 == 1
        && ido == 1
        && ip % vlen == 0
    {
        return ComplexPass::Vectorized(Vectorized::new(ip, roots, options));
    }
    if ip == 1 {
        return ComplexPass::Identity;
    }

    let factors = complex_factors(ip);
    if factors.len() > 1 {
        return ComplexPass::MixedRadix(MixedRadix::new(l1, ido, ip, roots, vectorize, options));
    }

    match ip {
        2 => ComplexPass::Radix2(PassTwiddles::new(l1, ido, ip, roots)),
        3 => ComplexPass::Radix3(PassTwiddles::new(l1, ido, ip, roots)),
        4 => ComplexPass::Radix4(PassTwiddles::new(l1, ido, ip, roots)),
        5 => ComplexPass::Radix5(PassTwiddles::new(l1, ido, ip, roots)),
        7 => ComplexPass::Radix7(PassTwiddles::new(l1, ido, ip, roots)),
        8 => ComplexPass::Radix8(PassTwiddles::new(l1, ido, ip, roots)),
        11 => ComplexPass::Radix11(PassTwiddles::new(l1, ido, ip, roots)),
        _ => {
            debug_assert!(primal_check::miller_rabin(ip as u64));
            if ip < options.complex_bluestein_threshold {
                ComplexPass::GenericPrime(GenericPrime::new(l1, ido, ip, roots))
            } else {
                ComplexPass::Bluestein(Bluestein::new(l1, ido, ip, roots, vectorize, options))
            }
        }
    }
}

/// Builds the real pass for factor `ip` at position `(l1, ido)`.
pub(crate) fn make_real_pass<T: FftNum>(
    l1: usize,
    ido: usize,
    ip: usize,
    roots: &Arc<UnityRoots<T>>,
    vectorize: bool,
    options: &PlanOptions,
) -> RealPass<T> {
    assert!(ip > 0, "FFT length must be nonzero");
    if ip == 1 {
        return RealPass::Identity;
    }

    let factors = real_factors(ip);
    if factors.len() > 1 {
        return RealPass::MixedRadix(RealMixedRadix::new(l1, ido, ip, roots, vectorize, options));
    }

    match ip {
        2 => RealPass::Radix2(RealTwiddles::new(l1, ido, ip, roots)),
        3 => {
            assert!(ido % 2 == 1, "Real radix-3 pass needs an odd ido, got {}", ido);
            RealPass::Radix3(RealTwiddles::new(l1, ido, ip, roots))
        }
        4 => RealPass::Radix4(RealTwiddles::new(l1, ido, ip, roots)),
        5 => {
            assert!(ido % 2 == 1, "Real radix-5 pass needs an odd ido, got {}", ido);
            RealPass::Radix5(RealTwiddles::new(l1, ido, ip, roots))
        }
        _ => {
            debug_assert!(primal_check::miller_rabin(ip as u64));
            if ip < options.real_bluestein_threshold {
                RealPass::GenericPrime(RealGenericPrime::new(l1, ido, ip, roots))
            } else {
                RealPass::Bluestein(RealBluestein::new(l1, ido, ip, roots, vectorize, options))
            }
        }
    }
}

/// The FFT planner creates new FFT plans, and caches the ones it has already built.
///
/// ~~~
/// // Perform a forward FFT of size 1234
/// use std::sync::Arc;
/// use passfft::{FftDirection, FftPlanner, num_complex::Complex};
///
/// let mut planner = FftPlanner::<f32>::new();
/// let fft = planner.plan_complex(1234);
///
/// let mut buffer = vec![Complex{ re: 0.0f32, im: 0.0f32 }; 1234];
/// fft.process(&mut buffer, 1.0, FftDirection::Forward);
///
/// // The FFT instance returned by the planner has the type `Arc<ComplexFft<T>>`,
/// // so it can be shared between threads and cloned cheaply
/// let fft_clone = Arc::clone(&fft);
/// ~~~
///
/// If you plan on creating multiple FFT instances, it is recommended to reuse the same planner for all of them. Plans
/// are immutable and work for both directions, so the planner hands out the same instance for every request of a
/// given length.
pub struct FftPlanner<T: FftNum> {
    vectorize: bool,
    options: PlanOptions,
    complex_cache: HashMap<usize, Arc<ComplexFft<T>>>,
    real_cache: HashMap<usize, Arc<RealFft<T>>>,
}

impl<T: FftNum> FftPlanner<T> {
    /// Creates a new planner that builds vectorized plans with the default options.
    pub fn new() -> Self {
        Self::with_options(true, PlanOptions::default())
    }

    pub fn with_options(vectorize: bool, options: PlanOptions) -> Self {
        Self {
            vectorize,
            options,
            complex_cache: HashMap::new(),
            real_cache: HashMap::new(),
        }
    }

    /// Returns a complex FFT instance which computes transforms of size `len`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn plan_complex(&mut self, len: usize) -> Arc<ComplexFft<T>> {
        if let Some(instance) = self.complex_cache.get(&len) {
            return Arc::clone(instance);
        }
        let instance = Arc::new(ComplexFft::with_options(len, self.vectorize, &self.options));
        self.complex_cache.insert(len, Arc::clone(&instance));
        instance
    }

    /// Returns a real (halfcomplex) FFT instance which computes transforms of size `len`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn plan_real(&mut self, len: usize) -> Arc<RealFft<T>> {
        if let Some(instance) = self.real_cache.get(&len) {
            return Arc::clone(instance);
        }
        let instance = Arc::new(RealFft::with_options(len, self.vectorize, &self.options));
        self.real_cache.insert(len, Arc::clone(&instance));
        instance
    }
}

impl<T: FftNum> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn complex_name(len: usize, vectorize: bool) -> &'static str {
        let roots = Arc::new(UnityRoots::<f64>::new(len));
        make_complex_pass(1, 1, len, &roots, vectorize, &PlanOptions::default()).name()
    }

    fn real_name(len: usize) -> &'static str {
        let roots = Arc::new(UnityRoots::<f64>::new(len));
        make_real_pass(1, 1, len, &roots, false, &PlanOptions::default()).name()
    }

    #[test]
    fn test_complex_plan_choice() {
        assert_eq!(complex_name(1, false), "identity");
        assert_eq!(complex_name(8, false), "radix-8");
        assert_eq!(complex_name(11, false), "radix-11");
        assert_eq!(complex_name(13, false), "generic prime");
        assert_eq!(complex_name(109, false), "generic prime");
        assert_eq!(complex_name(113, false), "bluestein");
        assert_eq!(complex_name(16, false), "mixed radix");
        assert_eq!(complex_name(9, false), "mixed radix");
        // too short to vectorize
        assert_eq!(complex_name(256, true), "mixed radix");
    }

    #[test]
    fn test_complex_plan_vectorized() {
        let expected = if native_lanes::<f64>() > 1 { "vectorized" } else { "mixed radix" };
        assert_eq!(complex_name(1024, true), expected);
        assert_eq!(complex_name(1024, false), "mixed radix");
    }

    #[test]
    fn test_real_plan_choice() {
        assert_eq!(real_name(1), "identity");
        assert_eq!(real_name(2), "radix-2");
        assert_eq!(real_name(4), "radix-4");
        assert_eq!(real_name(5), "radix-5");
        assert_eq!(real_name(7), "generic prime");
        assert_eq!(real_name(131), "generic prime");
        assert_eq!(real_name(137), "bluestein");
        assert_eq!(real_name(8), "mixed radix");
        assert_eq!(real_name(6), "mixed radix");
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let options = PlanOptions {
            complex_bluestein_threshold: 10,
            real_bluestein_threshold: 10,
            ..PlanOptions::default()
        };
        let roots = Arc::new(UnityRoots::<f32>::new(13));
        assert_eq!(make_complex_pass(1, 1, 13, &roots, false, &options).name(), "bluestein");
        assert_eq!(make_real_pass(1, 1, 13, &roots, false, &options).name(), "bluestein");
    }

    #[test]
    #[should_panic]
    fn test_zero_length() {
        let roots = Arc::new(UnityRoots::<f32>::new(1));
        let _ = make_complex_pass(1, 1, 0, &roots, false, &PlanOptions::default());
    }

    #[test]
    #[should_panic]
    fn test_real_radix3_even_ido() {
        let roots = Arc::new(UnityRoots::<f32>::new(12));
        let _ = make_real_pass(1, 4, 3, &roots, false, &PlanOptions::default());
    }

    #[test]
    #[should_panic]
    fn test_real_radix5_even_ido() {
        let roots = Arc::new(UnityRoots::<f32>::new(10));
        let _ = make_real_pass(1, 2, 5, &roots, false, &PlanOptions::default());
    }

    #[test]
    fn test_planner_cache() {
        let mut planner = FftPlanner::<f32>::new();
        let first = planner.plan_complex(100);
        let second = planner.plan_complex(100);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 100);

        let real = planner.plan_real(100);
        assert!(Arc::ptr_eq(&real, &planner.plan_real(100)));
        assert!(!Arc::ptr_eq(&real, &planner.plan_real(101)));
    }
}

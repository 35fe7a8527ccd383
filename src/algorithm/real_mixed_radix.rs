use std::sync::Arc;

use super::{BufferSide, RealPass};
use crate::common::FftNum;
use crate::math_utils::real_factors;
use crate::plan::{make_real_pass, PlanOptions};
use crate::simd::FftVector;
use crate::twiddles::UnityRoots;

/// Chains one real pass per factor of a composite length.
///
/// Forward transforms apply the passes last to first, backward transforms first to last. Only whole transforms
/// (`l1 == ido == 1`) are supported: real factorizations never nest one composite pass inside another.
pub(crate) struct RealMixedRadix<T> {
    passes: Box<[RealPass<T>]>,
    bufsize: usize,
    needs_copy: bool,
}

impl<T: FftNum> RealMixedRadix<T> {
    pub fn new(
        l1: usize,
        ido: usize,
        ip: usize,
        roots: &Arc<UnityRoots<T>>,
        vectorize: bool,
        options: &PlanOptions,
    ) -> Self {
        assert!(
            l1 == 1 && ido == 1,
            "Real mixed radix passes only support whole transforms, got l1 = {}, ido = {}",
            l1,
            ido
        );

        let mut passes = Vec::new();
        let mut l1l = 1;
        for factor in real_factors(ip) {
            passes.push(make_real_pass(l1l, ip / (factor * l1l), factor, roots, vectorize, options));
            l1l *= factor;
        }
        let bufsize = passes.iter().map(RealPass::bufsize).max().unwrap_or(0);
        let needs_copy = passes.iter().any(RealPass::needs_copy);

        Self {
            passes: passes.into_boxed_slice(),
            bufsize,
            needs_copy,
        }
    }

    pub fn bufsize(&self) -> usize {
        self.bufsize
    }

    pub fn needs_copy(&self) -> bool {
        self.needs_copy
    }

    pub fn exec<V: FftVector<T>, const FWD: bool>(&self, cc: &mut [V], ch: &mut [V], buf: &mut [V]) -> BufferSide {
        let mut side = BufferSide::Input;
        let mut step = |pass: &RealPass<T>| {
            let result = match side {
                BufferSide::Input => pass.exec_dir::<V, FWD>(cc, ch, buf),
                BufferSide::Copy => pass.exec_dir::<V, FWD>(ch, cc, buf),
            };
            if result == BufferSide::Copy {
                side = side.flip();
            }
        };
        if FWD {
            self.passes.iter().rev().for_each(&mut step);
        } else {
            self.passes.iter().for_each(&mut step);
        }
        side
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::check_real_pass;

    #[test]
    fn test_real_mixed_radix() {
        for &len in &[6, 8, 12, 15, 16, 20, 30, 36, 49, 60, 64, 77, 100, 128, 210, 2 * 137, 3 * 139] {
            let roots = Arc::new(UnityRoots::new(len));
            let pass = RealMixedRadix::new(1, 1, len, &roots, false, &PlanOptions::default());
            check_real_pass(&RealPass::MixedRadix(pass), len);
        }
    }

    #[test]
    #[should_panic]
    fn test_real_mixed_radix_rejects_partial_transforms() {
        let roots = Arc::new(UnityRoots::<f32>::new(24));
        let _ = RealMixedRadix::new(2, 1, 12, &roots, false, &PlanOptions::default());
    }
}

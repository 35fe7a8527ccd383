use num_integer::Integer;

/// Factors an integer into its prime factors, in ascending order, with repetition.
pub fn prime_factors(mut n: usize) -> Vec<usize> {
    let mut result = Vec::new();

    let trailing_zeros = n.trailing_zeros();
    if n > 0 && trailing_zeros > 0 {
        result.extend(std::iter::repeat(2).take(trailing_zeros as usize));
        n >>= trailing_zeros;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        while n % divisor == 0 {
            result.push(divisor);
            n /= divisor;
        }
        divisor += 2;
    }
    if n > 1 {
        result.push(n);
    }

    result
}

// Pulls out the preferred factors first, then moves a single factor of 2 (if any) to the front of the list,
// then appends the remaining odd divisors in ascending order.
fn factorize_preferring(mut n: usize, preferred: &[usize]) -> Vec<usize> {
    let mut factors = Vec::new();
    for &factor in preferred {
        while n % factor == 0 {
            factors.push(factor);
            n /= factor;
        }
    }
    if n % 2 == 0 {
        n /= 2;
        factors.push(2);
        let last = factors.len() - 1;
        factors.swap(0, last);
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        while n % divisor == 0 {
            factors.push(divisor);
            n /= divisor;
        }
        divisor += 2;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// The order in which a complex transform of length `n` applies its factors.
pub fn complex_factors(n: usize) -> Vec<usize> {
    factorize_preferring(n, &[8, 4])
}

/// The order in which a real transform of length `n` applies its factors.
pub fn real_factors(n: usize) -> Vec<usize> {
    factorize_preferring(n, &[4])
}

/// Splits `n` into two factors of roughly equal size.
///
/// Prime factors are taken largest first, each one multiplying whichever packet is currently smaller.
pub fn split_into_packets(n: usize) -> [usize; 2] {
    let mut factors = prime_factors(n);
    factors.sort_unstable_by(|a, b| b.cmp(a));

    let mut packets = [1, 1];
    for factor in factors {
        if packets[0] > packets[1] {
            packets[1] *= factor;
        } else {
            packets[0] *= factor;
        }
    }
    packets
}

/// Returns the smallest integer that is >= `n` and has no prime factors other than 2, 3, 5, 7 and 11.
///
/// Complex transforms of such lengths only use the specialized radix passes.
pub fn good_size_complex(n: usize) -> usize {
    if n <= 12 {
        return n;
    }

    let mut best = 2 * n;
    let mut f11 = 1;
    while f11 < best {
        let mut f117 = f11;
        while f117 < best {
            let mut f1175 = f117;
            while f1175 < best {
                let mut x = f1175;
                while x < n {
                    x *= 2;
                }
                loop {
                    if x < n {
                        x *= 3;
                    } else if x > n {
                        if x < best {
                            best = x;
                        }
                        if x.is_odd() {
                            break;
                        }
                        x >>= 1;
                    } else {
                        return n;
                    }
                }
                f1175 *= 5;
            }
            f117 *= 7;
        }
        f11 *= 11;
    }
    best
}

/// Returns the smallest integer that is >= `n` and has no prime factors other than 2, 3 and 5.
///
/// Real transforms of such lengths only use the specialized radix passes.
pub fn good_size_real(n: usize) -> usize {
    if n <= 6 {
        return n;
    }

    let mut best = 2 * n;
    let mut f5 = 1;
    while f5 < best {
        let mut x = f5;
        while x < n {
            x *= 2;
        }
        loop {
            if x < n {
                x *= 3;
            } else if x > n {
                if x < best {
                    best = x;
                }
                if x.is_odd() {
                    break;
                }
                x >>= 1;
            } else {
                return n;
            }
        }
        f5 *= 5;
    }
    best
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn only_has_factors(mut n: usize, allowed: &[usize]) -> bool {
        for &factor in allowed {
            while n % factor == 0 {
                n /= factor;
            }
        }
        n == 1
    }

    #[test]
    fn test_prime_factors() {
        let test_list = vec![
            (2, vec![2]),
            (128, vec![2; 7]),
            (3, vec![3]),
            (81, vec![3; 4]),
            (5 * 5, vec![5, 5]),
            (2 * 3, vec![2, 3]),
            (2 * 3 * 5, vec![2, 3, 5]),
            (2 * 2 * 3 * 3 * 5 * 7, vec![2, 2, 3, 3, 5, 7]),
            (1009, vec![1009]),
            (1, vec![]),
        ];

        for (input, expected) in test_list {
            assert_eq!(prime_factors(input), expected, "n = {}", input);
        }
    }

    #[test]
    fn test_complex_factors() {
        assert_eq!(complex_factors(8), vec![8]);
        assert_eq!(complex_factors(16), vec![2, 8]);
        assert_eq!(complex_factors(2), vec![2]);
        assert_eq!(complex_factors(64 * 2), vec![2, 8, 8]);
        assert_eq!(complex_factors(32 * 7), vec![8, 4, 7]);
        assert_eq!(complex_factors(6 * 11), vec![2, 3, 11]);
        assert_eq!(complex_factors(113), vec![113]);
        assert_eq!(complex_factors(1), vec![]);

        for n in 1..2000 {
            assert_eq!(complex_factors(n).iter().product::<usize>(), n, "n = {}", n);
        }
    }

    #[test]
    fn test_real_factors() {
        assert_eq!(real_factors(4), vec![4]);
        assert_eq!(real_factors(8), vec![2, 4]);
        assert_eq!(real_factors(32), vec![2, 4, 4]);
        assert_eq!(real_factors(12), vec![4, 3]);
        assert_eq!(real_factors(2 * 3 * 5), vec![2, 3, 5]);

        for n in 1..2000 {
            assert_eq!(real_factors(n).iter().product::<usize>(), n, "n = {}", n);
        }
    }

    #[test]
    fn test_split_into_packets() {
        assert_eq!(split_into_packets(2 * 3), [3, 2]);
        assert_eq!(split_into_packets(1024), [32, 32]);
        assert_eq!(split_into_packets(1009 * 2), [1009, 2]);

        for n in 2..3000 {
            let packets = split_into_packets(n);
            assert_eq!(packets[0] * packets[1], n);
        }
    }

    #[test]
    fn test_good_size_complex() {
        assert_eq!(good_size_complex(1), 1);
        assert_eq!(good_size_complex(12), 12);
        assert_eq!(good_size_complex(13), 14);
        assert_eq!(good_size_complex(17), 18);
        assert_eq!(good_size_complex(225), 225);
        assert_eq!(good_size_complex(2 * 113 - 1), 225);
        assert_eq!(good_size_complex(2 * 127 - 1), 256);

        let mut previous = 0;
        for n in 1..5000 {
            let good = good_size_complex(n);
            assert!(good >= n);
            assert!(good >= previous);
            assert!(only_has_factors(good, &[2, 3, 5, 7, 11]), "n = {}, good = {}", n, good);
            previous = good;
        }
    }

    #[test]
    fn test_good_size_real() {
        assert_eq!(good_size_real(6), 6);
        assert_eq!(good_size_real(7), 8);
        assert_eq!(good_size_real(11), 12);
        assert_eq!(good_size_real(31), 32);
        assert_eq!(good_size_real(2 * 137 - 1), 288);

        let mut previous = 0;
        for n in 1..5000 {
            let good = good_size_real(n);
            assert!(good >= n);
            assert!(good >= previous);
            assert!(only_has_factors(good, &[2, 3, 5]), "n = {}, good = {}", n, good);
            previous = good;
        }
    }
}

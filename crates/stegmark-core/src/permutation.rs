//! Keyed pixel permutation.
//!
//! The permutation decides WHERE the watermark bits go. Embedder and extractor
//! both rebuild it from the secret key and the pixel count of the carrier, so
//! nothing besides the key has to be shared.
//!
//! # Note
//!
//! The shuffle draws `state % len` from a plain linear congruential generator.
//! The draw is slightly biased. The generator steps in double precision, where
//! `a * state` exceeds 2^53 and gets rounded before the modulo. Watermarks from
//! other producers of this format are laid out in exactly that order, so
//! neither the rounding nor the bias may change.

use std::slice::Iter;

use log::debug;

use crate::key::SecretKey;

/// Modulus of the generator, 2^31.
const LCG_MODULUS: f64 = 2_147_483_648.0;
const LCG_MULTIPLIER: f64 = 1_103_515_245.0;
const LCG_INCREMENT: f64 = 12_345.0;

/// Linear congruential generator, the whole state lives in this value.
///
/// The state is always an integral value below 2^31.
#[derive(Debug, Clone, PartialEq)]
pub struct Lcg {
    state: f64,
}

impl Lcg {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            state: f64::from(seed),
        }
    }

    pub fn from_key(key: &SecretKey) -> Self {
        Self::with_seed(derive_seed(key.as_str()))
    }

    /// Advances the state and returns it, always below 2^31.
    #[inline]
    pub fn next_state(&mut self) -> u32 {
        // separate multiply and add, a fused `mul_add` rounds differently
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state as u32
    }
}

/// Rolling string hash: `h = h * 31 + code unit`, wrapped to a signed 32 bit
/// integer, absolute value taken.
///
/// Code units are UTF-16.
pub fn derive_seed(key: &str) -> u32 {
    key.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Pixel visiting order, a bijection over `0..n`.
///
/// Indices are stored as `u32`, an RGBA image with more pixels would not fit
/// in memory anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<u32>,
}

impl Permutation {
    /// Builds the visiting order for `n` pixels from the given key.
    ///
    /// Identical `(key, n)` always give the identical order. `n` must not
    /// exceed `u32::MAX`.
    pub fn generate(key: &SecretKey, n: usize) -> Self {
        debug_assert!(n <= u32::MAX as usize, "too many pixels for a permutation");
        let mut rng = Lcg::from_key(key);
        let mut indices: Vec<u32> = (0..n).map(|i| i as u32).collect();

        // Fisher-Yates down to length 1, the last draw still advances the generator
        for len in (1..=n).rev() {
            let random_index = rng.next_state() as usize % len;
            indices.swap(len - 1, random_index);
        }
        debug!("generated permutation over {n} pixels");

        Self { indices }
    }

    /// Pixel index visited at step `i`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.indices.get(i).map(|&pixel| pixel as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, u32> {
        self.indices.iter()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }
}

impl IntoIterator for Permutation {
    type Item = u32;
    type IntoIter = std::vec::IntoIter<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a u32;
    type IntoIter = Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> SecretKey {
        SecretKey::new(k).unwrap()
    }

    #[test]
    fn test_derive_seed() {
        assert_eq!(derive_seed("a"), 97);
        assert_eq!(derive_seed("ab"), 3105);
        assert_eq!(derive_seed("mysecret"), 95_251_292);
        assert_eq!(derive_seed("VISIBLE_DEFAULT_KEY"), 1_636_018_868);
    }

    #[test]
    fn test_derive_seed_takes_absolute_of_negative_hash() {
        // wraps to a negative i32 before the absolute value is taken
        assert_eq!(derive_seed("watermark"), 213_424_028);
        assert_eq!(derive_seed("SuperSecret42"), 1_603_681_879);
    }

    #[test]
    fn test_lcg_first_draw() {
        let mut rng = Lcg::from_key(&key("mysecret"));
        assert_eq!(rng.next_state(), 649_391_728);
    }

    #[test]
    fn test_lcg_rounds_the_product_like_a_double() {
        // exact integer arithmetic would give 649_391_717, 583_694_138, 1_902_419_947
        let mut rng = Lcg::from_key(&key("mysecret"));
        let draws: Vec<u32> = (0..3).map(|_| rng.next_state()).collect();
        assert_eq!(draws, [649_391_728, 1_984_943_488, 1_410_013_184]);

        let mut rng = Lcg::from_key(&key("a"));
        let draws: Vec<u32> = (0..3).map(|_| rng.next_state()).collect();
        assert_eq!(draws, [1_814_292_358, 326_670_336, 413_722_688]);
    }

    #[test]
    fn test_lcg_stays_below_modulus() {
        let mut rng = Lcg::with_seed(u32::MAX >> 1);
        for _ in 0..1000 {
            assert!(rng.next_state() < 0x8000_0000);
        }
    }

    #[test]
    fn test_permutation_reference_order() {
        assert_eq!(
            Permutation::generate(&key("mysecret"), 10).as_slice(),
            &[1, 9, 3, 5, 6, 7, 2, 0, 4, 8]
        );
        assert_eq!(
            Permutation::generate(&key("VISIBLE_DEFAULT_KEY"), 8).as_slice(),
            &[5, 2, 3, 7, 1, 6, 4, 0]
        );
        assert_eq!(
            Permutation::generate(&key("a"), 5).as_slice(),
            &[1, 4, 2, 0, 3]
        );
        assert_eq!(
            Permutation::generate(&key("SuperSecret42"), 12).as_slice(),
            &[8, 10, 3, 7, 4, 9, 5, 11, 1, 2, 6, 0]
        );
    }

    #[test]
    fn test_permutation_deterministic() {
        let p1 = Permutation::generate(&key("test_seed"), 100);
        let p2 = Permutation::generate(&key("test_seed"), 100);

        assert_eq!(p1, p2);
    }

    #[test]
    fn test_permutation_different_keys() {
        let p1 = Permutation::generate(&key("seed_a"), 100);
        let p2 = Permutation::generate(&key("seed_b"), 100);

        let differences = p1.iter().zip(p2.iter()).filter(|(a, b)| a != b).count();
        assert!(
            differences > 50,
            "Only {} differences, expected > 50",
            differences
        );
    }

    #[test]
    fn test_permutation_bijective() {
        let p = Permutation::generate(&key("test"), 1000);

        let mut seen = vec![false; 1000];
        for &i in &p {
            assert!(!seen[i as usize], "Duplicate index {}", i);
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|&x| x), "Not all indices covered");
    }

    #[test]
    fn test_empty_permutation() {
        let p = Permutation::generate(&key("test"), 0);
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.get(0), None);
    }

    #[test]
    fn test_single_element() {
        let p = Permutation::generate(&key("test"), 1);
        assert_eq!(p.as_slice(), &[0]);
    }

    #[test]
    fn test_indices_take_four_bytes_each() {
        let p = Permutation::generate(&key("test"), 1000);
        assert_eq!(std::mem::size_of_val(p.as_slice()), 4 * 1000);
        assert_eq!(p.get(999).map(|i| i < 1000), Some(true));
    }
}

//! Pairing functions used for bucket selection in the unique table.
//!
//! All functions operate in wrapping `u64` arithmetic: nested pairings of large
//! node indices overflow, and only the low bits matter after masking.

/// [Cantor pairing function][cantor-pairing].
///
/// ```text
/// (a, b) -> (a + b) * (a + b + 1) / 2 + b
/// ```
///
/// [cantor-pairing]: https://en.wikipedia.org/wiki/Pairing_function#Cantor_pairing_function
pub fn pairing_cantor(a: u64, b: u64) -> u64 {
    let s = a.wrapping_add(b);
    // One of `s` and `s + 1` is even, halve it before multiplying.
    let (x, y) = if s % 2 == 0 {
        (s / 2, s.wrapping_add(1))
    } else {
        (s, s.wrapping_add(1) / 2)
    };
    x.wrapping_mul(y).wrapping_add(b)
}

/// [Pairing function][pairing] for two `u64` values.
///
/// [pairing]: https://en.wikipedia.org/wiki/Pairing_function
pub fn pairing2(a: u64, b: u64) -> u64 {
    pairing_cantor(a, b)
}

/// Pairing function for three `u64` values.
pub fn pairing3(a: u64, b: u64, c: u64) -> u64 {
    pairing2(pairing2(a, b), c)
}

pub trait MyHash {
    /// Hash used to select a bucket. Bijective on small inputs.
    fn hash(&self) -> u64;
}

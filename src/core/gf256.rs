// Arithmetic in the field of 256 elements, reduced by the AES polynomial
// x^8 + x^4 + x^3 + x + 1 (0x11B). Multiplication, exponentiation and
// inversion run a fixed instruction stream with mask-selected conditionals;
// there are no tables, so no secret-indexed loads either.

#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Mul, MulAssign};
use zeroize::Zeroize;

/// Low byte of the reducing polynomial; the x^8 term falls out of the byte
/// when a shift overflows.
const REDUCTION: u8 = 0x1B;

/// The finite field element type, wrapping a u8.
///
/// The wrapper keeps field arithmetic distinct from integer arithmetic on
/// share bytes; a raw `^` or `*` on `u8` would silently compute the wrong
/// thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
#[repr(transparent)]
pub struct GF256(pub u8);

impl From<u8> for GF256 {
    #[inline(always)]
    fn from(byte: u8) -> Self {
        GF256(byte)
    }
}

impl From<GF256> for u8 {
    #[inline(always)]
    fn from(element: GF256) -> u8 {
        element.0
    }
}

/// Addition is XOR; the field has characteristic 2, so subtraction is the
/// same operation and every element is its own additive inverse.
#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for GF256 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        GF256(self.0 ^ rhs.0)
    }
}

impl AddAssign for GF256 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Carry-less multiplication, reduced as it goes.
///
/// Eight rounds regardless of the operands: each round conditionally folds
/// the shifted left operand into the accumulator (mask from the right
/// operand's low bit) and conditionally reduces (mask from the spilled
/// degree-7 bit). No branches, no early exit.
impl Mul for GF256 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let mut acc = 0u8;
        let mut shifted = self.0;
        let mut bits = rhs.0;

        let mut round = 0;
        while round < 8 {
            acc ^= shifted & 0u8.wrapping_sub(bits & 1);
            let spill = 0u8.wrapping_sub(shifted >> 7);
            shifted = (shifted << 1) ^ (REDUCTION & spill);
            bits >>= 1;
            round += 1;
        }

        GF256(acc)
    }
}

impl MulAssign for GF256 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl GF256 {
    /// Raises `self` to the power `e` by square-and-multiply.
    ///
    /// Eight fixed rounds; the multiply of each round always happens and a
    /// mask selects whether its result is kept, so the timing does not
    /// depend on the exponent bits.
    #[inline(always)]
    pub fn pow(self, e: u8) -> Self {
        let mut result = GF256(1);
        let mut base = self;
        let mut exp = e;

        let mut round = 0;
        while round < 8 {
            let multiplied = result * base;
            let keep = 0u8.wrapping_sub(exp & 1);
            result = GF256((multiplied.0 & keep) | (result.0 & !keep));
            base = base * base;
            exp >>= 1;
            round += 1;
        }

        result
    }

    /// The multiplicative inverse, a^{-1} with a * a^{-1} = 1.
    ///
    /// By Fermat's little theorem the inverse is a^254 in a field of 256
    /// elements, so the exponentiation ladder does the work in constant
    /// time. Zero maps to zero; callers must never rely on that, and the
    /// recovery engine cannot ask for it because distinct nonzero share
    /// indices keep every denominator nonzero.
    #[inline(always)]
    pub fn inv(self) -> Self {
        self.pow(254)
    }

    /// self / rhs = self * inv(rhs), or None when dividing by zero. Upper
    /// layers must treat None as a logic error on their side.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        (rhs.0 != 0).then(|| self * rhs.inv())
    }
}

/// Evaluates p(x) = c0 + c1*x + ... + cn*x^n by Horner's rule, folding from
/// the highest coefficient down.
///
/// Runs in time fixed by `coeffs.len()`; no secret-dependent indexing. An
/// empty coefficient slice evaluates to 0.
pub fn poly_eval(coeffs: &[GF256], x: GF256) -> GF256 {
    coeffs.iter().rfold(GF256(0), |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_xor_and_self_inverse() {
        assert_eq!(GF256(0x35) + GF256(0x35), GF256(0x00));
        assert_eq!(GF256(0x80) + GF256(0x7F), GF256(0xFF));
        let mut a = GF256(0x9D);
        a += GF256(0x11);
        assert_eq!(a, GF256(0x8C));
    }

    #[test]
    fn multiplication_matches_known_products() {
        // Textbook constants for the AES polynomial.
        assert_eq!(GF256(0x57) * GF256(0x83), GF256(0xC1));
        assert_eq!(GF256(0x02) * GF256(0x1B), GF256(0x36));
        assert_eq!(GF256(0x02) * GF256(0x03), GF256(0x06));
        // Zero annihilates from either side.
        for a in [0x00u8, 0x01, 0xFF] {
            assert_eq!(GF256(a) * GF256(0x00), GF256(0x00));
            assert_eq!(GF256(0x00) * GF256(a), GF256(0x00));
        }
        // No reduction when the high bit is clear.
        let mut a = GF256(0x57);
        a *= GF256(0x02);
        assert_eq!(a, GF256(0xAE));
    }

    #[test]
    fn exponentiation_agrees_with_repeated_multiplication() {
        let base = GF256(0x53);
        let mut expected = GF256(1);
        for e in 0..=10u8 {
            assert_eq!(base.pow(e), expected, "exponent {e}");
            expected *= base;
        }
        // The multiplicative group has order 255.
        for a in 1u8..=255 {
            assert_eq!(GF256(a).pow(255), GF256(1), "a = {a:#04x}");
        }
    }

    #[test]
    fn every_nonzero_element_has_an_inverse() {
        for a in 1u8..=255 {
            assert_eq!(GF256(a) * GF256(a).inv(), GF256(1), "a = {a:#04x}");
        }
        // The zero convention.
        assert_eq!(GF256(0).inv(), GF256(0));
        assert_eq!(GF256(1).inv(), GF256(1));
    }

    #[test]
    fn division_refuses_zero_divisors() {
        assert_eq!(GF256(0x42).checked_div(GF256(0)), None);
        assert_eq!(GF256(0).checked_div(GF256(7)), Some(GF256(0)));
        let q = GF256(0xC1).checked_div(GF256(0x57)).unwrap();
        assert_eq!(q, GF256(0x83));
        assert_eq!(q * GF256(0x57), GF256(0xC1));
    }

    // Field laws on a sampled grid: associativity and distributivity.
    #[test]
    fn field_laws_hold_on_a_sample_grid() {
        let samples = [0x00u8, 0x01, 0x02, 0x03, 0x1B, 0x53, 0x80, 0xCA, 0xFF];
        for &a in &samples {
            for &b in &samples {
                for &c in &samples {
                    let (a, b, c) = (GF256(a), GF256(b), GF256(c));
                    assert_eq!((a + b) + c, a + (b + c));
                    assert_eq!((a * b) * c, a * (b * c));
                    assert_eq!(a * (b + c), a * b + a * c);
                }
            }
        }
    }

    #[test]
    fn horner_evaluation() {
        // p(x) = 3 + x + 2x^2
        let p = [GF256(3), GF256(1), GF256(2)];
        assert_eq!(poly_eval(&p, GF256(0)), GF256(3));
        assert_eq!(poly_eval(&p, GF256(1)), GF256(0)); // 3 ^ 1 ^ 2
        assert_eq!(poly_eval(&p, GF256(2)), GF256(9)); // 3 ^ 2 ^ 8
        assert_eq!(poly_eval(&[], GF256(5)), GF256(0));
    }
}

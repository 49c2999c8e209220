//! Overflow-safe decimal accumulation for the two integer magnitude classes.
//!
//! Each class carries a pair of thresholds per sign: `U` is the largest
//! accumulator magnitude that may still take another digit, `L` is the
//! largest digit allowed when the accumulator equals `U`. Checking both
//! before the multiply-add means the accumulator never wraps.

use std::fmt::{Debug, Display};

/// Sign of the numeral being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// A signed integer class the strict reader can produce.
pub trait Numeral: Copy + Ord + Display + Debug {
    /// Name used in diagnostics ("int", "long long").
    const KIND: &'static str;
    const ZERO: Self;
    /// `MAX / 10`.
    const MAX_U: Self;
    /// `MAX % 10`.
    const MAX_L: u8;
    /// `MIN / 10` (rounded toward zero).
    const MIN_U: Self;
    /// `|MIN % 10|`.
    const MIN_L: u8;

    /// `self * 10 + digit`, callers guarantee no overflow.
    fn shift_add(self, digit: u8) -> Self;
    /// `self * 10 - digit`, callers guarantee no overflow.
    fn shift_sub(self, digit: u8) -> Self;
    /// The value of a single leading digit with the given sign.
    fn from_digit(digit: u8, sign: Sign) -> Self;
}

macro_rules! impl_numeral {
    ($ty:ty, $kind:literal) => {
        impl Numeral for $ty {
            const KIND: &'static str = $kind;
            const ZERO: Self = 0;
            const MAX_U: Self = <$ty>::MAX / 10;
            const MAX_L: u8 = (<$ty>::MAX % 10) as u8;
            const MIN_U: Self = <$ty>::MIN / 10;
            const MIN_L: u8 = (<$ty>::MIN % 10).unsigned_abs() as u8;

            fn shift_add(self, digit: u8) -> Self {
                self * 10 + <$ty>::from(digit)
            }

            fn shift_sub(self, digit: u8) -> Self {
                self * 10 - <$ty>::from(digit)
            }

            fn from_digit(digit: u8, sign: Sign) -> Self {
                match sign {
                    Sign::Positive => <$ty>::from(digit),
                    Sign::Negative => -(<$ty>::from(digit)),
                }
            }
        }
    };
}

impl_numeral!(i32, "int");
impl_numeral!(i64, "long long");

/// Append one decimal digit (`0..=9`) to `acc`.
///
/// Returns `None` when the result would leave the representable range; the
/// check happens before the arithmetic.
pub fn accumulate<T: Numeral>(acc: T, digit: u8, sign: Sign) -> Option<T> {
    debug_assert!(digit <= 9);
    match sign {
        Sign::Positive => {
            if acc > T::MAX_U || (acc == T::MAX_U && digit > T::MAX_L) {
                None
            } else {
                Some(acc.shift_add(digit))
            }
        }
        Sign::Negative => {
            if acc < T::MIN_U || (acc == T::MIN_U && digit > T::MIN_L) {
                None
            } else {
                Some(acc.shift_sub(digit))
            }
        }
    }
}

/// Value of an ASCII decimal digit, if `byte` is one.
pub fn digit_value(byte: u8) -> Option<u8> {
    byte.is_ascii_digit().then(|| byte - b'0')
}

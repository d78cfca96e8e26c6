//! Exact decimal amounts and cent-rounded money.
//!
//! Salaries are summed exactly as base-10 decimals and rounded once at the
//! end, so `2750.625` really is a tie and rounds up to `2750.63`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    Invalid(String),
    #[error("amount out of range")]
    Overflow,
}

/// A decimal number stored as `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactAmount {
    mantissa: i128,
    scale: u32,
}

impl ExactAmount {
    pub const ZERO: ExactAmount = ExactAmount {
        mantissa: 0,
        scale: 0,
    };

    #[cfg(test)]
    pub(crate) fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }.normalized()
    }

    /// Digits after the decimal point, trailing zeros excluded.
    pub fn scale(self) -> u32 {
        self.scale
    }

    pub fn checked_add(self, other: ExactAmount) -> Result<ExactAmount, AmountError> {
        let scale = self.scale.max(other.scale);
        let lhs = rescale(self.mantissa, scale - self.scale)?;
        let rhs = rescale(other.mantissa, scale - other.scale)?;
        let mantissa = lhs.checked_add(rhs).ok_or(AmountError::Overflow)?;
        Ok(ExactAmount { mantissa, scale }.normalized())
    }

    /// Drop trailing fractional zeros; zero always has scale 0.
    fn normalized(mut self) -> Self {
        if self.mantissa == 0 {
            self.scale = 0;
        }
        while self.scale > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.scale -= 1;
        }
        self
    }

    /// Round to cents, halves away from zero.
    pub fn to_money(self) -> Result<Money, AmountError> {
        self.div_to_money(1)
    }

    /// Divide by `count` and round the exact quotient to cents, halves away
    /// from zero.
    pub fn div_to_money(self, count: u64) -> Result<Money, AmountError> {
        if count == 0 {
            return Ok(Money::ZERO);
        }
        let (cents, unit) = if self.scale >= 2 {
            match pow10(self.scale - 2) {
                Ok(unit) => (self.mantissa, unit),
                // one unit exceeds twice any mantissa
                Err(_) => return Ok(Money::ZERO),
            }
        } else {
            (rescale(self.mantissa, 2 - self.scale)?, 1)
        };
        Ok(Money::from_cents(div_round_half_up(cents, unit, count)))
    }
}

impl FromStr for ExactAmount {
    type Err = AmountError;

    /// Accepts `[+-]digits[.digits][e[+-]digits]` with surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::Invalid(s.to_string());
        let text = s.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => {
                let exp = &unsigned[at + 1..];
                let exp: i32 = exp.parse().map_err(|_| invalid())?;
                (&unsigned[..at], exp)
            }
            None => (unsigned, 0),
        };
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let fraction = fraction.trim_end_matches('0');

        let mut mantissa: i128 = 0;
        for digit in whole.bytes().chain(fraction.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or(AmountError::Overflow)?;
        }
        if negative {
            mantissa = -mantissa;
        }

        let scale = i64::try_from(fraction.len()).map_err(|_| AmountError::Overflow)?
            - i64::from(exponent);
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| AmountError::Overflow)?;
            Ok(ExactAmount { mantissa, scale }.normalized())
        } else {
            let shift = u32::try_from(-scale).map_err(|_| AmountError::Overflow)?;
            Ok(ExactAmount {
                mantissa: rescale(mantissa, shift)?,
                scale: 0,
            })
        }
    }
}

/// A signed amount of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i128);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i128) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i128 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ExactAmount>()?.to_money()
    }
}

fn pow10(exp: u32) -> Result<i128, AmountError> {
    10i128.checked_pow(exp).ok_or(AmountError::Overflow)
}

fn rescale(mantissa: i128, by: u32) -> Result<i128, AmountError> {
    if mantissa == 0 {
        return Ok(0);
    }
    mantissa
        .checked_mul(pow10(by)?)
        .ok_or(AmountError::Overflow)
}

/// `numerator / (unit * count)` rounded half away from zero, without forming
/// the product. `unit` and `count` are positive.
fn div_round_half_up(numerator: i128, unit: i128, count: u64) -> i128 {
    let magnitude = numerator.unsigned_abs();
    let unit = unit.unsigned_abs();
    let count = u128::from(count);
    let (whole, below_unit) = (magnitude / unit, magnitude % unit);
    let (quotient, rest) = (whole / count, whole % count);
    // remainder is (rest + below_unit / unit) / count, with below_unit < unit
    let round_up = if 2 * rest >= count {
        true
    } else {
        count - 2 * rest == 1 && 2 * below_unit >= unit
    };
    let rounded = (quotient + u128::from(round_up)) as i128;
    if numerator < 0 { -rounded } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_and_fractional() {
        assert_eq!("3000".parse::<ExactAmount>(), Ok(ExactAmount::new(3000, 0)));
        assert_eq!("2500.50".parse::<ExactAmount>(), Ok(ExactAmount::new(250050, 2)));
        assert_eq!(" -0.5 ".parse::<ExactAmount>(), Ok(ExactAmount::new(-5, 1)));
        assert_eq!(".5".parse::<ExactAmount>(), Ok(ExactAmount::new(5, 1)));
        assert_eq!("5.".parse::<ExactAmount>(), Ok(ExactAmount::new(5, 0)));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!("1e3".parse::<ExactAmount>(), Ok(ExactAmount::new(1000, 0)));
        assert_eq!("15E-1".parse::<ExactAmount>(), Ok(ExactAmount::new(15, 1)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", " ", "Salary", "12a", "1.2.3", "inf", "nan", ".", "-", "1e", "1 000"] {
            assert!(bad.parse::<ExactAmount>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_round_half_up_to_cents() {
        assert_eq!(money("123.456").to_string(), "123.46");
        assert_eq!(money("123.455").to_string(), "123.46");
        assert_eq!(money("123.454").to_string(), "123.45");
        assert_eq!(money("99.999").to_string(), "100.00");
        assert_eq!(money("100").to_string(), "100.00");
        assert_eq!(money("-1.005").to_string(), "-1.01");
        assert_eq!(money("-0.004").to_string(), "0.00");
    }

    #[test]
    fn test_average_rounds_exact_quotient() {
        let total = "5501.25".parse::<ExactAmount>().unwrap();
        assert_eq!(total.div_to_money(2).unwrap().to_string(), "2750.63");

        let total = "10".parse::<ExactAmount>().unwrap();
        assert_eq!(total.div_to_money(3).unwrap().to_string(), "3.33");
        assert_eq!(total.div_to_money(0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_checked_add_aligns_scales() {
        let a = "0.1".parse::<ExactAmount>().unwrap();
        let b = "0.02".parse::<ExactAmount>().unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum, ExactAmount::new(12, 2));
        assert_eq!(sum.to_money().unwrap().to_string(), "0.12");
    }

    #[test]
    fn test_trailing_zeros_are_dropped() {
        let amount = "2500.5000".parse::<ExactAmount>().unwrap();
        assert_eq!(amount.scale(), 1);
        assert_eq!("0.000".parse::<ExactAmount>().unwrap().scale(), 0);
        let long = format!("1.{}", "0".repeat(50));
        assert_eq!(long.parse::<ExactAmount>(), Ok(ExactAmount::new(1, 0)));
    }

    #[test]
    fn test_adding_to_zero_keeps_tiny_amounts() {
        let tiny = "1e-41".parse::<ExactAmount>().unwrap();
        let sum = ExactAmount::ZERO.checked_add(tiny).unwrap();
        assert_eq!(sum, tiny);
        assert_eq!(sum.to_money(), Ok(Money::ZERO));
        assert_eq!(sum.div_to_money(3), Ok(Money::ZERO));
    }

    #[test]
    fn test_average_of_fine_amounts_does_not_overflow() {
        let total = "0.123456789012345678901234567890123455".parse::<ExactAmount>().unwrap();
        assert_eq!(total.div_to_money(u64::MAX).unwrap(), Money::ZERO);
        assert_eq!(total.div_to_money(1).unwrap().to_string(), "0.12");

        // exactly half a cent after dividing
        let total = "0.01".parse::<ExactAmount>().unwrap();
        assert_eq!(total.div_to_money(2).unwrap().to_string(), "0.01");
        let total = "-0.01".parse::<ExactAmount>().unwrap();
        assert_eq!(total.div_to_money(2).unwrap().to_string(), "-0.01");
        assert_eq!(total.div_to_money(3).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = "9".repeat(60);
        assert_eq!(huge.parse::<ExactAmount>(), Err(AmountError::Overflow));
        assert_eq!("1e400".parse::<ExactAmount>(), Err(AmountError::Overflow));
    }
}

//! # Extended Rationals
//!
//! Exact rational numbers extended with `+inf` and `-inf`.
//!
//! ## Conventions
//!
//! - Total order: `-inf < finite < +inf`.
//! - `+inf` absorbs in addition, including `+inf + -inf = +inf`.
//! - `0 · ±inf = 0`.
//! - Division is only available through [`Rational::checked_div`], which
//!   rejects zero divisors and `±inf / ±inf`.
//!
//! ## Example
//!
//! ```rust
//! use nc_curves::Rational;
//!
//! let half: Rational = "0.5".parse().unwrap();
//! let third: Rational = "1/3".parse().unwrap();
//! assert_eq!((&half + &third).to_string(), "5/6");
//! assert_eq!(&Rational::PlusInfinity + &Rational::MinusInfinity, Rational::PlusInfinity);
//! ```

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::error::{CurveError, CurveResult};

/// An exact rational number, or one of the two infinities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rational {
    /// Negative infinity.
    MinusInfinity,
    /// A finite exact value.
    Finite(BigRational),
    /// Positive infinity.
    PlusInfinity,
}

/// A string that is not a rational literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rational literal '{0}'")]
pub struct ParseRationalError(pub String);

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Rational {
    /// Zero.
    pub fn zero() -> Self {
        Self::Finite(BigRational::zero())
    }

    /// One.
    pub fn one() -> Self {
        Self::Finite(BigRational::one())
    }

    /// An integer value.
    pub fn from_integer(value: i64) -> Self {
        Self::Finite(BigRational::from_integer(BigInt::from(value)))
    }

    /// The fraction `numer / denom`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::Rational;
    ///
    /// assert_eq!(Rational::new(6, 4).unwrap().to_string(), "3/2");
    /// assert!(Rational::new(1, 0).is_err());
    /// ```
    pub fn new(numer: i64, denom: i64) -> CurveResult<Self> {
        if denom == 0 {
            return Err(CurveError::DivisionByZero {
                numerator: Self::from_integer(numer),
                denominator: Self::zero(),
            });
        }
        Ok(Self::Finite(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self::Finite(value)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::Finite(BigRational::from_integer(value))
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl Rational {
    /// True for finite values.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// True for either infinity.
    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn is_plus_infinity(&self) -> bool {
        matches!(self, Self::PlusInfinity)
    }

    pub fn is_minus_infinity(&self) -> bool {
        matches!(self, Self::MinusInfinity)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(v) if v.is_zero())
    }

    /// Strictly greater than zero (`+inf` included).
    pub fn is_positive(&self) -> bool {
        self.sign() == Ordering::Greater
    }

    /// Strictly less than zero (`-inf` included).
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }

    /// The finite value, if any.
    pub fn as_finite(&self) -> Option<&BigRational> {
        match self {
            Self::Finite(v) => Some(v),
            _ => None,
        }
    }

    /// True when the value is a finite integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Finite(v) if v.is_integer())
    }

    fn sign(&self) -> Ordering {
        match self {
            Self::MinusInfinity => Ordering::Less,
            Self::PlusInfinity => Ordering::Greater,
            Self::Finite(v) => v.cmp(&BigRational::zero()),
        }
    }

    /// Numerator and denominator when both fit in `i64`.
    pub fn to_i64_pair(&self) -> Option<(i64, i64)> {
        let value = self.as_finite()?;
        Some((value.numer().to_i64()?, value.denom().to_i64()?))
    }

    /// Nearest `f64`, used only for rendering.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::MinusInfinity => f64::NEG_INFINITY,
            Self::PlusInfinity => f64::INFINITY,
            Self::Finite(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }
}

// =============================================================================
// ARITHMETIC
// =============================================================================

impl Rational {
    /// Largest integer not greater than the value; infinities map to themselves.
    pub fn floor(&self) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v.floor()),
            other => other.clone(),
        }
    }

    /// Smallest integer not less than the value; infinities map to themselves.
    pub fn ceil(&self) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v.ceil()),
            other => other.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v.abs()),
            _ => Self::PlusInfinity,
        }
    }

    /// `self / divisor`, or `None` for a zero divisor or `±inf / ±inf`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::Rational;
    ///
    /// let three = Rational::from_integer(3);
    /// assert_eq!(three.checked_div(&Rational::from_integer(2)), Some(Rational::new(3, 2).unwrap()));
    /// assert_eq!(three.checked_div(&Rational::PlusInfinity), Some(Rational::zero()));
    /// assert_eq!(three.checked_div(&Rational::zero()), None);
    /// ```
    pub fn checked_div(&self, divisor: &Rational) -> Option<Rational> {
        if divisor.is_zero() {
            return None;
        }
        match (self, divisor) {
            (Self::Finite(a), Self::Finite(b)) => Some(Self::Finite(a / b)),
            (Self::Finite(_), _) => Some(Self::zero()),
            (_, Self::Finite(_)) => Some(Self::infinity_with_sign(
                self.sign() == divisor.sign(),
            )),
            _ => None,
        }
    }

    /// Division that reports failures as [`CurveError::DivisionByZero`].
    pub fn try_div(&self, divisor: &Rational) -> CurveResult<Rational> {
        self.checked_div(divisor)
            .ok_or_else(|| CurveError::DivisionByZero {
                numerator: self.clone(),
                denominator: divisor.clone(),
            })
    }

    /// Least common multiple of two positive finite rationals: the smallest
    /// positive rational that is an integer multiple of both.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::Rational;
    ///
    /// let a = Rational::new(3, 2).unwrap();
    /// let b = Rational::new(5, 4).unwrap();
    /// assert_eq!(a.lcm(&b), Some(Rational::new(15, 2).unwrap()));
    /// ```
    pub fn lcm(&self, other: &Rational) -> Option<Rational> {
        let (a, b) = (self.as_finite()?, other.as_finite()?);
        if !a.is_positive() || !b.is_positive() {
            return None;
        }
        let numer = a.numer().lcm(b.numer());
        let denom = a.denom().gcd(b.denom());
        Some(Self::Finite(BigRational::new(numer, denom)))
    }

    fn infinity_with_sign(positive: bool) -> Self {
        if positive {
            Self::PlusInfinity
        } else {
            Self::MinusInfinity
        }
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        match (self, rhs) {
            (Rational::PlusInfinity, _) | (_, Rational::PlusInfinity) => Rational::PlusInfinity,
            (Rational::MinusInfinity, _) | (_, Rational::MinusInfinity) => Rational::MinusInfinity,
            (Rational::Finite(a), Rational::Finite(b)) => Rational::Finite(a + b),
        }
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self + &(-rhs)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        if self.is_zero() || rhs.is_zero() {
            return Rational::zero();
        }
        match (self, rhs) {
            (Rational::Finite(a), Rational::Finite(b)) => Rational::Finite(a * b),
            _ => Rational::infinity_with_sign(self.sign() == rhs.sign()),
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        match self {
            Rational::MinusInfinity => Rational::PlusInfinity,
            Rational::PlusInfinity => Rational::MinusInfinity,
            Rational::Finite(v) => Rational::Finite(-v),
        }
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        &self + &rhs
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        &self - &rhs
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        &self * &rhs
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -&self
    }
}

// =============================================================================
// TEXT FORM
// =============================================================================

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinusInfinity => write!(f, "-inf"),
            Self::PlusInfinity => write!(f, "+inf"),
            Self::Finite(v) if v.is_integer() => write!(f, "{}", v.numer()),
            Self::Finite(v) => write!(f, "{}/{}", v.numer(), v.denom()),
        }
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Parse an integer, `a/b` fraction, decimal or signed infinity.
    ///
    /// Decimals are converted exactly: `0.1` is `1/10`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRationalError(text.to_string());
        let trimmed = text.trim();

        match trimmed {
            "+inf" | "+infinity" => return Ok(Self::PlusInfinity),
            "-inf" | "-infinity" => return Ok(Self::MinusInfinity),
            _ => {}
        }

        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        let magnitude = if let Some((numer, denom)) = body.split_once('/') {
            if !digits(numer) || !digits(denom) {
                return Err(invalid());
            }
            let numer: BigInt = numer.parse().map_err(|_| invalid())?;
            let denom: BigInt = denom.parse().map_err(|_| invalid())?;
            if denom.is_zero() {
                return Err(invalid());
            }
            BigRational::new(numer, denom)
        } else if let Some((whole, fraction)) = body.split_once('.') {
            if !digits(whole) || !digits(fraction) {
                return Err(invalid());
            }
            let scale = BigInt::from(10u32).pow(fraction.len() as u32);
            let numer: BigInt = format!("{}{}", whole, fraction)
                .parse()
                .map_err(|_| invalid())?;
            BigRational::new(numer, scale)
        } else {
            if !digits(body) {
                return Err(invalid());
            }
            BigRational::from_integer(body.parse().map_err(|_| invalid())?)
        };

        Ok(Self::Finite(if negative { -magnitude } else { magnitude }))
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Rational {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_literal_forms() {
        assert_eq!(q("42"), Rational::from_integer(42));
        assert_eq!(q("-3/6"), Rational::new(-1, 2).unwrap());
        assert_eq!(q("0.125"), Rational::new(1, 8).unwrap());
        assert_eq!(q("+2.50"), Rational::new(5, 2).unwrap());
        assert_eq!(q("+inf"), Rational::PlusInfinity);
        assert_eq!(q("+infinity"), Rational::PlusInfinity);
        assert_eq!(q("-inf"), Rational::MinusInfinity);
        assert_eq!(q("-infinity"), Rational::MinusInfinity);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "inf", "1/0", "1.", ".5", "1 / 2", "abc", "--1"] {
            assert!(text.parse::<Rational>().is_err(), "Accepted: {:?}", text);
        }
    }

    #[test]
    fn test_display_reparses_exactly() {
        for text in ["7", "-7/3", "0.2", "+inf", "-infinity", "1000000000000000000000001/3"] {
            let value = q(text);
            assert_eq!(q(&value.to_string()), value, "Text: {}", text);
        }
        assert_eq!(q("0.2").to_string(), "1/5");
    }

    #[test]
    fn test_ordering() {
        assert!(Rational::MinusInfinity < q("-1000"));
        assert!(q("1/3") < q("1/2"));
        assert!(q("99999") < Rational::PlusInfinity);
    }

    #[test]
    fn test_infinity_conventions() {
        let inf = Rational::PlusInfinity;
        let minf = Rational::MinusInfinity;
        assert_eq!(&inf + &minf, inf);
        assert_eq!(&minf + &q("3"), minf);
        assert_eq!(&inf * &Rational::zero(), Rational::zero());
        assert_eq!(&minf * &q("-2"), inf);
        assert_eq!(&inf - &inf, inf);
        assert_eq!(inf.checked_div(&inf), None);
        assert_eq!(minf.checked_div(&q("2")), Some(minf.clone()));
    }

    #[test]
    fn test_floor_ceil() {
        assert_eq!(q("7/2").floor(), q("3"));
        assert_eq!(q("-7/2").floor(), q("-4"));
        assert_eq!(q("7/2").ceil(), q("4"));
        assert_eq!(Rational::PlusInfinity.floor(), Rational::PlusInfinity);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(q("2").lcm(&q("3")), Some(q("6")));
        assert_eq!(q("1/2").lcm(&q("1/3")), Some(q("1")));
        assert_eq!(q("0").lcm(&q("3")), None);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&q("-5/4")).unwrap();
        assert_eq!(json, "\"-5/4\"");
        let back: Rational = serde_json::from_str("\"+inf\"").unwrap();
        assert_eq!(back, Rational::PlusInfinity);
    }
}

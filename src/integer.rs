//! Immutable integer values.
//!
//! [`Integer`] wraps an `i64`. Arithmetic that can overflow is checked and
//! reports [`ErrorKind::Arithmetic`](crate::ErrorKind::Arithmetic) instead of
//! wrapping. Operations whose result may be fractional return a [`Number`].
//!
//! ```
//! use primitive_wrappers::{Integer, Number};
//!
//! let six = Integer::new(6);
//! assert_eq!(six.divide(Integer::new(3)).unwrap(), Number::Int(2));
//! assert_eq!(six.divide(Integer::new(4)).unwrap(), Number::Float(1.5));
//! assert_eq!(six.power(Integer::new(2)), Number::Int(36));
//! assert_eq!(Integer::new(7).add_leading_zeroes(2).unwrap(), "007");
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::Text;

/// An immutable signed 64-bit integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Integer(i64);

/// Result of an operation that is integral only sometimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    /// The value, when it is integral.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

impl Integer {
    /// Wrap `value`.
    pub const fn new(value: i64) -> Self {
        Integer(value)
    }

    /// The wrapped value.
    pub const fn value(self) -> i64 {
        self.0
    }

    /// The value as `f64`, rounded to the nearest representable float.
    pub fn to_float(self) -> f64 {
        self.0 as f64
    }

    /// Strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Strictly less than zero.
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Add one. Fails for `i64::MAX`.
    pub fn increment(self) -> Result<Integer> {
        self.checked(self.0.checked_add(1), "increment")
    }

    /// Subtract one. Fails for `i64::MIN`.
    pub fn decrement(self) -> Result<Integer> {
        self.checked(self.0.checked_sub(1), "decrement")
    }

    /// Absolute value. Fails for `i64::MIN`.
    pub fn to_positive(self) -> Result<Integer> {
        self.checked(self.0.checked_abs(), "absolute value")
    }

    /// Negated absolute value; always representable.
    pub fn to_negative(self) -> Integer {
        if self.0 > 0 {
            Integer(-self.0)
        } else {
            self
        }
    }

    /// Checked product.
    pub fn multiply(self, multiplier: Integer) -> Result<Integer> {
        self.checked(self.0.checked_mul(multiplier.0), "multiplication")
    }

    fn checked(self, result: Option<i64>, operation: &str) -> Result<Integer> {
        result
            .map(Integer)
            .ok_or_else(|| Error::arithmetic(format!("{} of {} overflows", operation, self.0)))
    }

    /// Raise to `exponent`.
    ///
    /// Integral when the exponent is non-negative and the result fits in an
    /// `i64`; a float otherwise.
    pub fn power(self, exponent: Integer) -> Number {
        u32::try_from(exponent.0)
            .ok()
            .and_then(|exp| self.0.checked_pow(exp))
            .map(Number::Int)
            .unwrap_or_else(|| Number::Float(self.to_float().powf(exponent.to_float())))
    }

    /// Divide by `divisor`: integral when exact, a float otherwise.
    pub fn divide(self, divisor: Integer) -> Result<Number> {
        if divisor.0 == 0 {
            return Err(Error::arithmetic("division by zero"));
        }
        match self.0.checked_rem(divisor.0) {
            Some(0) => Ok(self
                .0
                .checked_div(divisor.0)
                .map_or_else(|| Number::Float(self.to_float() / divisor.to_float()), Number::Int)),
            _ => Ok(Number::Float(self.to_float() / divisor.to_float())),
        }
    }

    /// Square root; NaN for negative values.
    pub fn sqrt(self) -> f64 {
        self.to_float().sqrt()
    }

    /// Natural logarithm; NaN for negative values, `-inf` for zero.
    pub fn natural_log(self) -> f64 {
        self.to_float().ln()
    }

    /// `self > other`
    pub fn is_greater_than(self, other: i64) -> bool {
        self.0 > other
    }

    /// `self < other`
    pub fn is_less_than(self, other: i64) -> bool {
        self.0 < other
    }

    /// `self >= other`
    pub fn is_greater_than_or_equal_to(self, other: i64) -> bool {
        self.0 >= other
    }

    /// `self <= other`
    pub fn is_less_than_or_equal_to(self, other: i64) -> bool {
        self.0 <= other
    }

    /// `zeroes` `'0'` characters followed by the decimal value.
    pub fn add_leading_zeroes(self, zeroes: i64) -> Result<Text> {
        let padding = Text::from("0").repeat(zeroes)?;
        Ok(padding.append(self.0.to_string()))
    }

    /// Map `value` linearly so that `min` is 0 and `max` is 1, clamped to
    /// `[0, 1]`.
    ///
    /// ```
    /// use primitive_wrappers::Integer;
    ///
    /// assert_eq!(Integer::scale_to_range(5.0, 0.0, 10.0).unwrap(), 0.5);
    /// assert_eq!(Integer::scale_to_range(15.0, 0.0, 10.0).unwrap(), 1.0);
    /// assert!(Integer::scale_to_range(1.0, 3.0, 3.0).is_err());
    /// ```
    pub fn scale_to_range(value: f64, min: f64, max: f64) -> Result<f64> {
        if min.partial_cmp(&max) != Some(Ordering::Less) {
            return Err(Error::domain(format!(
                "minimum {} must be less than maximum {}",
                min, max
            )));
        }
        Ok(Integer::ensure_in_range((value - min) / (max - min), 0.0, 1.0))
    }

    /// Clamp `value` to `[min, max]`; `min` wins when the bounds cross.
    pub fn ensure_in_range(value: f64, min: f64, max: f64) -> f64 {
        value.min(max).max(min)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer(value)
    }
}

impl From<Integer> for i64 {
    fn from(value: Integer) -> Self {
        value.0
    }
}

impl FromStr for Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(Integer)
            .map_err(|e| Error::domain(format!("'{}' is not an integer", s)).with_source(e))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

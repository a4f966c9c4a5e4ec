//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for base-10 decimal arithmetic, so operands
//! typed at the prompt ("0.1", "1e-3") are held exactly. Transcendentals
//! (ln, exp, sqrt) run at a caller-supplied precision.

use dashu_float::DBig;
use dashu_float::ops::{SquareRoot, Abs};
use dashu_int::IBig;
use dashu_int::ops::BitTest;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number: {0}")]
    ParseError(String),

    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default precision for calculations (decimal digits)
pub const DEFAULT_PRECISION: u32 = 50;

/// Significant digits shown by `Display`; trailing zeros are trimmed
const DISPLAY_DIGITS: usize = 28;

/// Smallest adjusted exponent printed without scientific notation
const PLAIN_MIN_EXPONENT: isize = -7;

/// Largest decimal exponent a power may produce
const MAX_POWER_EXPONENT: f64 = 1_000_000.0;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. All fallible operations return Results,
/// never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig has adequate precision for calculations
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION as usize).value()
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        let valid = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E');
        if s.is_empty() || !s.chars().all(valid) {
            return Err(NumberError::ParseError(s.to_string()));
        }

        // Scientific notation with integer mantissa: "602214076e15"
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let s_lower = s.to_lowercase();
            let parts: Vec<&str> = s_lower.split('e').collect();
            if parts.len() == 2 {
                let mantissa: IBig = parts[0].parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: i32 = parts[1].parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;

                let result = DBig::from_parts(mantissa, exp as isize);
                return Ok(Self { inner: Self::with_work_precision(result) });
            }
        }

        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Integer power (exact), square-and-multiply
    pub fn pow(&self, exp: i64) -> Result<Self, NumberError> {
        if exp == 0 {
            return Ok(Self::from_i64(1));
        }
        if let Some(bounded) = self.bound_power(&Self::from_i64(exp))? {
            return Ok(bounded);
        }

        let mut remaining = exp.unsigned_abs();
        let mut base = self.clone();
        let mut result = Self::from_i64(1);
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::from_i64(1).checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Real-valued power: x^y = exp(y * ln(x))
    pub fn pow_real(&self, exp: &Self, precision: u32) -> Result<Self, NumberError> {
        if exp.is_zero() {
            return Ok(Self::from_i64(1));
        }
        if self.is_zero() {
            return if exp.is_negative() {
                Err(NumberError::DivisionByZero)
            } else {
                Ok(Self::from_i64(0))
            };
        }
        if self.is_negative() && !exp.is_integer() {
            return Err(NumberError::DomainError(
                "negative base with fractional exponent".to_string()
            ));
        }
        if let Some(bounded) = self.bound_power(exp)? {
            return Ok(bounded);
        }

        // Integer exponents stay exact
        if let Some(e) = exp.to_i64() {
            return self.pow(e);
        }

        // Integer exponents past i64 only reach here with |x| close to 1
        let result = self.abs().ln(precision)?.mul(exp).exp(precision);
        if self.is_negative() && exp.is_odd_integer() {
            Ok(result.neg())
        } else {
            Ok(result)
        }
    }

    /// `Some(0)` when |x^y| is below the representable range, `Overflow`
    /// when above it, `None` when the power can be evaluated
    fn bound_power(&self, exp: &Self) -> Result<Option<Self>, NumberError> {
        let Some(log_base) = self.abs_log10() else {
            return Ok(None);
        };
        if log_base == 0.0 {
            return Ok(None);
        }

        let y = exp.to_f64().unwrap_or_else(|| match exp.abs_log10() {
            Some(log_y) if log_y > 0.0 => {
                if exp.is_negative() { f64::NEG_INFINITY } else { f64::INFINITY }
            }
            _ => 0.0,
        });

        let magnitude = log_base * y;
        if magnitude > MAX_POWER_EXPONENT {
            Err(NumberError::Overflow)
        } else if magnitude < -MAX_POWER_EXPONENT {
            Ok(Some(Self::from_i64(0)))
        } else {
            Ok(None)
        }
    }

    /// log10(|x|) from the leading digits; `None` for zero
    fn abs_log10(&self) -> Option<f64> {
        if self.is_zero() {
            return None;
        }
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let text = significand.to_string();
        let digits = text.trim_start_matches('-');
        let lead_len = digits.len().min(17);
        let lead: f64 = digits[..lead_len].parse().ok()?;
        Some(lead.log10() + (digits.len() - lead_len) as f64 + exponent as f64)
    }

    fn is_odd_integer(&self) -> bool {
        if !self.is_integer() {
            return false;
        }
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        if exponent > 0 {
            return false;
        }
        let whole = significand / IBig::from(10).pow(exponent.unsigned_abs());
        whole % IBig::from(2) != IBig::ZERO
    }

    // ========== Transcendental Functions ==========

    /// Square root
    pub fn sqrt(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "Cannot calculate square root of a negative number".to_string()
            ));
        }
        if self.is_zero() {
            return Ok(Self::from_i64(0));
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self { inner: val.sqrt() })
    }

    /// Natural logarithm
    pub fn ln(&self, precision: u32) -> Result<Self, NumberError> {
        if self.inner <= DBig::ZERO {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string()
            ));
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self { inner: val.ln() })
    }

    /// Exponential function (e^x)
    pub fn exp(&self, precision: u32) -> Self {
        let val = self.inner.clone().with_precision(precision as usize).value();
        Self { inner: val.exp() }
    }

    // ========== Other Operations ==========

    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }

        // DBig stores as significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_i64: i64 = match significand.try_into() {
            Ok(v) => v,
            Err(_) => return self.to_f64().and_then(Self::f64_to_i64),
        };

        if exponent == 0 {
            Some(sig_i64)
        } else if exponent > 0 && exponent <= 18 {
            sig_i64.checked_mul(10_i64.checked_pow(exponent as u32)?)
        } else if exponent < 0 && exponent >= -18 {
            let divisor = 10_i64.checked_pow((-exponent) as u32)?;
            if sig_i64 % divisor == 0 {
                Some(sig_i64 / divisor)
            } else {
                None
            }
        } else {
            self.to_f64().and_then(Self::f64_to_i64)
        }
    }

    fn f64_to_i64(f: f64) -> Option<i64> {
        if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Some(f.round() as i64)
        } else {
            None
        }
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            match TryInto::<i64>::try_into(significand.clone()) {
                Ok(i) => i as f64,
                Err(_) => {
                    let is_neg = significand < IBig::ZERO;
                    let abs_sig = if is_neg { -significand.clone() } else { significand.clone() };
                    match TryInto::<u64>::try_into(abs_sig) {
                        Ok(u) => if is_neg { -(u as f64) } else { u as f64 },
                        Err(_) => return None,
                    }
                }
            }
        } else {
            // Shift right to fit in 53 bits, then scale back up
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            (shifted_i64 as f64) * 2_f64.powi(extra_bits as i32)
        };

        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None;
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    // ========== Display ==========

    /// Base-10 text rounded to `DISPLAY_DIGITS` significant digits.
    ///
    /// Adjusted exponents outside `PLAIN_MIN_EXPONENT..DISPLAY_DIGITS`
    /// use scientific notation: `1.5E+30`, `2E-9`.
    fn render(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let rounded = self.inner.clone().with_precision(DISPLAY_DIGITS).value();
        let (significand, exponent) = rounded.into_repr().into_parts();
        let text = significand.to_string();
        let all_digits = text.trim_start_matches('-');
        let digits = all_digits.trim_end_matches('0');
        let exponent = exponent + (all_digits.len() - digits.len()) as isize;
        let adjusted = exponent + digits.len() as isize - 1;

        let body = if adjusted < PLAIN_MIN_EXPONENT || adjusted >= DISPLAY_DIGITS as isize {
            scientific(digits, adjusted)
        } else {
            plain(digits, exponent)
        };

        if significand < IBig::ZERO {
            format!("-{}", body)
        } else {
            body
        }
    }
}

/// `digits` × 10^`exponent` without an exponent marker
fn plain(digits: &str, exponent: isize) -> String {
    if exponent >= 0 {
        return format!("{}{}", digits, "0".repeat(exponent as usize));
    }
    let point = digits.len() as isize + exponent;
    if point > 0 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    } else {
        format!("0.{}{}", "0".repeat(point.unsigned_abs()), digits)
    }
}

fn scientific(digits: &str, adjusted: isize) -> String {
    let (first, rest) = digits.split_at(1);
    let sign = if adjusted < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{}E{}{}", first, sign, adjusted.unsigned_abs())
    } else {
        format!("{}.{}E{}{}", first, rest, sign, adjusted.unsigned_abs())
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}

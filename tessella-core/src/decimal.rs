//! Decimal encodings.
//!
//! Small decimals inline into the `ObjectId` payload as sign + scale +
//! magnitude fixed-point; everything else round-trips through a store as
//! canonical text parsed with `bigdecimal`.
//!
//! Inline payload layout (56 bits):
//!
//! ```text
//! bit  55      sign (1 = negative)
//! bits 51..54  scale (digits after the point, 0..=15)
//! bits  0..50  magnitude (unsigned, < 2^51)
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

use crate::error::{EngineError, Result};

const SIGN_BIT: u64 = 1 << 55;
const SCALE_SHIFT: u32 = 51;
const SCALE_MASK: u64 = 0xF;
const MAGNITUDE_MASK: u64 = (1 << 51) - 1;

/// Maximum scale the inline form can carry.
pub const MAX_INLINE_SCALE: u8 = 15;

/// Decimal value packed into an `ObjectId` payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecimalInlined(u64);

impl DecimalInlined {
    /// Wrap an inline payload (the 56 low bits of a DECIMAL_INLINED id).
    pub fn new(payload: u64) -> Self {
        Self(payload)
    }

    /// Pack sign / magnitude / scale, or `None` if they exceed the inline
    /// budget.
    pub fn pack(negative: bool, magnitude: u64, scale: u8) -> Option<u64> {
        if magnitude > MAGNITUDE_MASK || scale > MAX_INLINE_SCALE {
            return None;
        }
        let mut payload = magnitude | ((scale as u64) << SCALE_SHIFT);
        if negative && magnitude != 0 {
            payload |= SIGN_BIT;
        }
        Some(payload)
    }

    pub fn is_negative(self) -> bool {
        self.0 & SIGN_BIT != 0
    }

    pub fn scale(self) -> u8 {
        ((self.0 >> SCALE_SHIFT) & SCALE_MASK) as u8
    }

    pub fn magnitude(self) -> u64 {
        self.0 & MAGNITUDE_MASK
    }

    /// The payload with the sign cleared (absolute value).
    pub fn abs_payload(self) -> u64 {
        self.0 & !SIGN_BIT
    }

    /// Canonical text: trailing fraction zeros trimmed, the point dropped
    /// when the fraction empties.
    pub fn value_string(self) -> String {
        let scale = self.scale() as usize;
        let mut digits = self.magnitude().to_string();

        if scale > 0 {
            if digits.len() <= scale {
                // Left-pad so there is at least one integer digit.
                digits = format!("{:0>width$}", digits, width = scale + 1);
            }
            let split = digits.len() - scale;
            let (int_part, frac_part) = digits.split_at(split);
            let frac_trimmed = frac_part.trim_end_matches('0');
            digits = if frac_trimmed.is_empty() {
                int_part.to_string()
            } else {
                format!("{}.{}", int_part, frac_trimmed)
            };
        }

        if self.is_negative() {
            format!("-{}", digits)
        } else {
            digits
        }
    }

    /// Decode into a `BigDecimal` (for arithmetic that leaves the inline
    /// domain).
    pub fn to_big_decimal(self) -> BigDecimal {
        let mut int = BigInt::from(self.magnitude());
        if self.is_negative() {
            int = -int;
        }
        BigDecimal::new(int, self.scale() as i64)
    }
}

/// Try to pack a `BigDecimal` into the inline payload.
pub fn inline_from_big_decimal(value: &BigDecimal) -> Option<u64> {
    let normalized = value.normalized();
    let (int, exponent) = normalized.as_bigint_and_exponent();
    if exponent > MAX_INLINE_SCALE as i64 {
        return None;
    }
    let negative = int.sign() == num_bigint::Sign::Minus;
    let mut magnitude: u64 = int.magnitude().try_into().ok()?;
    // A negative exponent means trailing zeros were trimmed off an integer
    // value; restore them so the inline form carries scale zero.
    if exponent < 0 {
        for _ in 0..-exponent {
            magnitude = magnitude.checked_mul(10)?;
        }
    }
    DecimalInlined::pack(negative, magnitude, exponent.max(0) as u8)
}

/// Parse canonical decimal text from a store.
pub fn parse_external(text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text)
        .map_err(|e| EngineError::Malformed(format!("decimal {:?}: {}", text, e)))
}

/// Canonical text for an external decimal.
pub fn external_string(value: &BigDecimal) -> String {
    value.normalized().to_string()
}

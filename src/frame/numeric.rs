//! Text to value conversion for TFS tokens
//!
//! Integers follow `strtol` semantics and floats follow `strtod` semantics:
//! leading whitespace is skipped, the longest valid prefix is converted and
//! anything after it is ignored. A token with no valid prefix converts to
//! zero. [`TextMode::Strict`] turns any partial conversion into an error.

use super::errors::{FrameError, FrameResult};
use super::real::Real;
use super::types::DataType;

/// How tolerant text conversion is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    /// Best-effort conversion, never fails
    #[default]
    Lenient,
    /// The whole token must be a valid literal
    Strict,
}

/// A converted token and whether the whole token was consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub complete: bool,
}

impl<T> Parsed<T> {
    /// Applies `mode`, turning incomplete conversions into errors when strict.
    pub fn resolve(self, mode: TextMode, token: &str, expected: DataType) -> FrameResult<T> {
        if mode == TextMode::Strict && !self.complete {
            return Err(FrameError::InvalidText {
                token: token.to_string(),
                expected,
            });
        }
        Ok(self.value)
    }
}

/// Converts a base-10 integer prefix. Saturates on overflow.
pub fn parse_int(token: &str) -> Parsed<i64> {
    let trimmed = token.trim_start();
    let bytes = trimmed.as_bytes();

    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    let digits_start = i;
    let mut value: i64 = 0;
    let mut overflow = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        let digit = i64::from(bytes[i] - b'0');
        if !overflow {
            let next = value.checked_mul(10).and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            });
            match next {
                Some(v) => value = v,
                None => overflow = true,
            }
        }
        i += 1;
    }

    if i == digits_start {
        return Parsed {
            value: 0,
            complete: false,
        };
    }

    if overflow {
        value = if negative { i64::MIN } else { i64::MAX };
    }

    Parsed {
        value,
        complete: !overflow && trimmed[i..].trim_end().is_empty(),
    }
}

/// Converts a floating-point prefix (decimal, exponent, `inf`, `nan`).
pub fn parse_real<R: Real>(token: &str) -> Parsed<R> {
    let trimmed = token.trim_start();
    let len = float_prefix_len(trimmed);
    if len == 0 {
        return Parsed {
            value: R::default(),
            complete: false,
        };
    }

    match trimmed[..len].parse::<R>() {
        Ok(value) => Parsed {
            value,
            complete: trimmed[len..].trim_end().is_empty(),
        },
        Err(_) => Parsed {
            value: R::default(),
            complete: false,
        },
    }
}

/// Converts a boolean token: `true`/`t`/`1` and `false`/`f`/`0`, any case.
pub fn parse_bool(token: &str) -> Parsed<bool> {
    let trimmed = token.trim();
    let truthy = ["true", "t", "1"];
    let falsy = ["false", "f", "0"];

    if truthy.iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
        Parsed {
            value: true,
            complete: true,
        }
    } else if falsy.iter().any(|f| trimmed.eq_ignore_ascii_case(f)) {
        Parsed {
            value: false,
            complete: true,
        }
    } else {
        Parsed {
            value: false,
            complete: false,
        }
    }
}

/// Length in bytes of the longest `strtod`-convertible prefix of `s`.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    let rest = &bytes[i..];
    for word in ["infinity", "inf", "nan"] {
        if rest
            .get(..word.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(word.as_bytes()))
        {
            return i + word.len();
        }
    }

    let mut digits = 0;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < len && bytes[i] == b'.' {
        i += 1;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

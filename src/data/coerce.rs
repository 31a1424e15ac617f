// Lenient coercions for dynamic values
// Author: Gabriel Demetrios Lafis

use std::fmt;

use super::Value;

/// Convert a value to a string, using `fallback` when it is absent or null
pub fn to_string_safe(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_string(),
        Some(value) => value.to_string(),
    }
}

/// Convert a value to a finite number, using `fallback` when that is not possible
///
/// Finite numbers pass through unchanged. Everything else goes through the
/// same conversion a browser applies to `Number(value)`: strings are trimmed
/// and parsed (an empty string is zero), booleans become one or zero, and
/// null becomes zero. Any non-finite result is replaced by `fallback`.
pub fn to_number_safe(value: Option<&Value>, fallback: f64) -> f64 {
    let number = match value {
        Some(value) => value.to_number(),
        None => return fallback,
    };

    if number.is_finite() {
        number
    } else {
        fallback
    }
}

impl Value {
    /// Numeric conversion, `NaN` when the value has no numeric reading
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => parse_number(s),
            Value::Array(_) => parse_number(&self.to_string()),
            Value::Map(_) => f64::NAN,
        }
    }

    /// Whether the value counts as present for label fallbacks
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Map(_) => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // Nulls inside arrays join as empty strings
                    if !matches!(value, Value::Null) {
                        write!(f, "{}", value)?;
                    }
                }
                Ok(())
            }
            Value::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// Format a float the way a script runtime prints numbers
fn format_float(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if x == 0.0 {
        "0".to_string()
    } else if x.abs() >= 1e21 || x.abs() < 1e-6 {
        format_exponent(x)
    } else if x.fract() == 0.0 {
        format!("{:.0}", x)
    } else {
        format!("{}", x)
    }
}

/// Exponent form with an explicit sign on the exponent, e.g. `1.5e+300`
fn format_exponent(x: f64) -> String {
    let text = format!("{:e}", x);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Parse numeric text, `NaN` when it is not a number
fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // `str::parse` also accepts "inf" and "nan"; neither is numeric text here
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

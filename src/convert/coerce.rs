//! Generic value coercion.
//!
//! Converter-chain-independent conversion between primitive, textual,
//! numeric, decimal and timestamp representations. Used by the primitive
//! converter, by collection elements, and by the dispatcher's fallback.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::convert::error::ConversionError;
use crate::convert::timestamp::{format_timestamp, parse_timestamp};
use crate::core::types::{FloatKind, IntKind, TypeTag};
use crate::core::value::Value;

/// Coerce `value` into a value of type `target`.
pub fn coerce(value: &Value, target: &TypeTag) -> Result<Value, ConversionError> {
    if value.is_null() {
        return if target.admits_null() {
            Ok(Value::Null)
        } else {
            Err(unrepresentable(value, target))
        };
    }

    match target {
        TypeTag::Any => Ok(value.clone()),
        TypeTag::Nullable(inner) => coerce(value, inner),
        TypeTag::Bool => to_bool(value).map(Value::Bool),
        TypeTag::Char => to_char(value).map(Value::Char),
        TypeTag::Int(kind) => to_int(value, *kind),
        TypeTag::Float(kind) => to_float(value, *kind).map(Value::Float),
        TypeTag::String => to_text(value).map(Value::Text),
        TypeTag::Decimal => to_decimal(value).map(Value::Decimal),
        TypeTag::DateTime => to_timestamp(value).map(Value::DateTime),
        TypeTag::Enum(_) | TypeTag::Array(_) | TypeTag::List(_) | TypeTag::Record(_) => {
            if value.conforms_to(target) {
                Ok(value.clone())
            } else {
                Err(unsupported(value, target))
            }
        }
    }
}

fn unsupported(value: &Value, target: &TypeTag) -> ConversionError {
    ConversionError::Unsupported {
        source_kind: value.kind_name().to_string(),
        target: target.to_string(),
    }
}

fn unrepresentable(value: &Value, target: &TypeTag) -> ConversionError {
    ConversionError::Unrepresentable {
        value: value.to_string(),
        target: target.to_string(),
    }
}

fn parse_error(input: &str, target: &TypeTag) -> ConversionError {
    ConversionError::Parse {
        input: input.to_string(),
        target: target.to_string(),
    }
}

fn to_bool(value: &Value) -> Result<bool, ConversionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::UInt(u) => Ok(*u != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::Decimal(d) => Ok(!d.is_zero()),
        Value::Text(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if s.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(parse_error(s, &TypeTag::Bool))
            }
        }
        other => Err(unsupported(other, &TypeTag::Bool)),
    }
}

fn to_char(value: &Value) -> Result<char, ConversionError> {
    match value {
        Value::Char(c) => Ok(*c),
        Value::Text(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(parse_error(s, &TypeTag::Char)),
            }
        }
        Value::Int(_) | Value::UInt(_) => {
            let code = match value {
                Value::Int(i) => u32::try_from(*i).ok(),
                Value::UInt(u) => u32::try_from(*u).ok(),
                _ => None,
            };
            code.and_then(char::from_u32)
                .ok_or_else(|| unrepresentable(value, &TypeTag::Char))
        }
        other => Err(unsupported(other, &TypeTag::Char)),
    }
}

fn to_int(value: &Value, kind: IntKind) -> Result<Value, ConversionError> {
    let target = TypeTag::Int(kind);
    let n: i128 = match value {
        Value::Int(i) => *i as i128,
        Value::UInt(u) => *u as i128,
        Value::Bool(b) => *b as i128,
        Value::Char(c) => *c as u32 as i128,
        Value::Enum(ev) => ev.ordinal() as i128,
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(unrepresentable(value, &target));
            }
            // Saturates outside i128, which every kind's bounds reject below.
            f.round_ties_even() as i128
        }
        Value::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i128()
            .ok_or_else(|| unrepresentable(value, &target))?,
        Value::Text(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| parse_error(s, &target))?,
        other => return Err(unsupported(other, &target)),
    };

    if !kind.contains(n) {
        return Err(unrepresentable(value, &target));
    }

    Ok(if kind.is_signed() {
        Value::Int(n as i64)
    } else {
        Value::UInt(n as u64)
    })
}

fn to_float(value: &Value, kind: FloatKind) -> Result<f64, ConversionError> {
    let target = TypeTag::Float(kind);
    let f = match value {
        Value::Float(f) => *f,
        Value::Int(i) => *i as f64,
        Value::UInt(u) => *u as f64,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Decimal(d) => d
            .to_f64()
            .ok_or_else(|| unrepresentable(value, &target))?,
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| parse_error(s, &target))?,
        other => return Err(unsupported(other, &target)),
    };

    match kind {
        FloatKind::F64 => Ok(f),
        FloatKind::F32 => {
            let narrowed = f as f32;
            if narrowed.is_infinite() && f.is_finite() {
                Err(unrepresentable(value, &target))
            } else {
                Ok(narrowed as f64)
            }
        }
    }
}

fn to_text(value: &Value) -> Result<String, ConversionError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::DateTime(dt) => Ok(format_timestamp(dt)),
        Value::Bool(_)
        | Value::Int(_)
        | Value::UInt(_)
        | Value::Float(_)
        | Value::Char(_)
        | Value::Decimal(_)
        | Value::Enum(_) => Ok(value.to_string()),
        other => Err(unsupported(other, &TypeTag::String)),
    }
}

fn to_decimal(value: &Value) -> Result<Decimal, ConversionError> {
    match value {
        Value::Decimal(d) => Ok(*d),
        Value::Int(i) => Ok(Decimal::from(*i)),
        Value::UInt(u) => Ok(Decimal::from(*u)),
        Value::Bool(b) => Ok(Decimal::from(*b as u8)),
        Value::Enum(ev) => Ok(Decimal::from(ev.ordinal())),
        Value::Float(f) => {
            Decimal::try_from(*f).map_err(|_| unrepresentable(value, &TypeTag::Decimal))
        }
        Value::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|_| parse_error(s, &TypeTag::Decimal))
        }
        other => Err(unsupported(other, &TypeTag::Decimal)),
    }
}

fn to_timestamp(value: &Value) -> Result<NaiveDateTime, ConversionError> {
    match value {
        Value::DateTime(dt) => Ok(*dt),
        Value::Text(s) => parse_timestamp(s),
        other => Err(unsupported(other, &TypeTag::DateTime)),
    }
}

//! Scalar coercions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use super::unsupported;
use crate::config::CoercionConfig;
use crate::declaration::CoercionOptions;
use crate::error::CoercionError;
use crate::types::{AttrType, Primitive};
use crate::value::Value;

pub(super) fn coerce(
    target: Primitive,
    value: Value,
    options: &CoercionOptions,
    config: &CoercionConfig,
) -> Result<Value, CoercionError> {
    match target {
        Primitive::Int => to_int(value, config),
        Primitive::Float => to_float(value, config),
        Primitive::Bool => to_bool(value, config),
        Primitive::String => to_string(value),
        Primitive::Symbol => to_symbol(value, config),
        Primitive::Time => to_time(value, options, config),
    }
}

fn invalid(target: Primitive, input: impl ToString) -> CoercionError {
    CoercionError::InvalidFormat {
        target: target.name().to_string(),
        input: input.to_string(),
    }
}

fn rejected(value: &Value, target: Primitive) -> CoercionError {
    unsupported(value, &AttrType::Primitive(target))
}

fn whole_float(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn to_int(value: Value, config: &CoercionConfig) -> Result<Value, CoercionError> {
    match value {
        Value::Int(i) => Ok(Value::Int(i)),
        Value::Float(f) => whole_float(f)
            .map(Value::Int)
            .ok_or_else(|| invalid(Primitive::Int, f)),
        Value::String(s) => {
            let text = config.text(&s);
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_float))
                .map(Value::Int)
                .ok_or_else(|| invalid(Primitive::Int, Value::String(s.clone())))
        }
        other => Err(rejected(&other, Primitive::Int)),
    }
}

fn to_float(value: Value, config: &CoercionConfig) -> Result<Value, CoercionError> {
    match value {
        Value::Float(f) => Ok(Value::Float(f)),
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::String(s) => config
            .text(&s)
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(Primitive::Float, Value::String(s.clone()))),
        other => Err(rejected(&other, Primitive::Float)),
    }
}

fn to_bool(value: Value, config: &CoercionConfig) -> Result<Value, CoercionError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(b)),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Int(i) => Err(invalid(Primitive::Bool, i)),
        Value::String(s) => config
            .parse_bool(config.text(&s))
            .map(Value::Bool)
            .ok_or_else(|| invalid(Primitive::Bool, Value::String(s.clone()))),
        other => Err(rejected(&other, Primitive::Bool)),
    }
}

/// Values reaching here are never already strings; they get rendered.
fn to_string(value: Value) -> Result<Value, CoercionError> {
    match value {
        Value::String(s) | Value::Symbol(s) => Ok(Value::String(s)),
        Value::Int(i) => Ok(Value::String(i.to_string())),
        Value::Float(f) => Ok(Value::String(f.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Time(t) => Ok(Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
        other => Err(rejected(&other, Primitive::String)),
    }
}

fn to_symbol(value: Value, config: &CoercionConfig) -> Result<Value, CoercionError> {
    match value {
        Value::Symbol(s) => Ok(Value::Symbol(s)),
        Value::String(s) => {
            let text = config.text(&s);
            if text.is_empty() {
                Err(invalid(Primitive::Symbol, Value::String(s.clone())))
            } else {
                Ok(Value::Symbol(text.to_string()))
            }
        }
        other => Err(rejected(&other, Primitive::Symbol)),
    }
}

fn to_time(
    value: Value,
    options: &CoercionOptions,
    config: &CoercionConfig,
) -> Result<Value, CoercionError> {
    match value {
        Value::Time(t) => Ok(Value::Time(t)),
        Value::Int(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Value::Time)
            .ok_or_else(|| invalid(Primitive::Time, secs)),
        Value::String(s) => {
            let text = config.text(&s);
            let format = options.get("format").and_then(Value::as_str);
            format
                .and_then(|format| parse_with_format(text, format))
                .or_else(|| {
                    DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|t| t.with_timezone(&Utc))
                })
                .map(Value::Time)
                .ok_or_else(|| invalid(Primitive::Time, Value::String(s.clone())))
        }
        other => Err(rejected(&other, Primitive::Time)),
    }
}

/// Parse with a chrono format; date-only formats land on midnight UTC.
fn parse_with_format(text: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::opts;
    use chrono::TimeZone;

    fn run(target: Primitive, value: Value) -> Result<Value, CoercionError> {
        coerce(
            target,
            value,
            &CoercionOptions::default(),
            &CoercionConfig::default(),
        )
    }

    #[test]
    fn int_from_text_and_whole_float() {
        assert_eq!(run(Primitive::Int, Value::from(" 42 ")).unwrap(), Value::Int(42));
        assert_eq!(run(Primitive::Int, Value::from("3.0")).unwrap(), Value::Int(3));
        assert_eq!(run(Primitive::Int, Value::Float(-2.0)).unwrap(), Value::Int(-2));
    }

    #[test]
    fn int_rejects_fractions_and_bools() {
        assert!(matches!(
            run(Primitive::Int, Value::Float(2.5)),
            Err(CoercionError::InvalidFormat { .. })
        ));
        assert!(matches!(
            run(Primitive::Int, Value::Bool(true)),
            Err(CoercionError::Unsupported { kind: "Bool", .. })
        ));
    }

    #[test]
    fn int_respects_trim_setting() {
        let config = CoercionConfig {
            trim_strings: false,
            ..Default::default()
        };
        let result = coerce(
            Primitive::Int,
            Value::from(" 4"),
            &CoercionOptions::default(),
            &config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn float_from_int_and_text() {
        assert_eq!(run(Primitive::Float, Value::Int(2)).unwrap(), Value::Float(2.0));
        assert_eq!(run(Primitive::Float, Value::from("0.25")).unwrap(), Value::Float(0.25));
        assert!(run(Primitive::Float, Value::from("x")).is_err());
    }

    #[test]
    fn bool_from_spellings_and_digits() {
        assert_eq!(run(Primitive::Bool, Value::from("Yes")).unwrap(), Value::Bool(true));
        assert_eq!(run(Primitive::Bool, Value::from("off")).unwrap(), Value::Bool(false));
        assert_eq!(run(Primitive::Bool, Value::Int(1)).unwrap(), Value::Bool(true));
        assert!(run(Primitive::Bool, Value::Int(2)).is_err());
        assert!(run(Primitive::Bool, Value::from("perhaps")).is_err());
    }

    #[test]
    fn string_renders_scalars() {
        assert_eq!(run(Primitive::String, Value::Int(7)).unwrap(), Value::from("7"));
        assert_eq!(run(Primitive::String, Value::Bool(false)).unwrap(), Value::from("false"));
        assert_eq!(run(Primitive::String, Value::symbol("ok")).unwrap(), Value::from("ok"));
        assert!(run(Primitive::String, Value::Sequence(vec![])).is_err());
    }

    #[test]
    fn symbol_from_text() {
        assert_eq!(run(Primitive::Symbol, Value::from(" draft ")).unwrap(), Value::symbol("draft"));
        assert!(run(Primitive::Symbol, Value::from("  ")).is_err());
        assert!(run(Primitive::Symbol, Value::Int(1)).is_err());
    }

    #[test]
    fn time_from_rfc3339_and_seconds() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(
            run(Primitive::Time, Value::from("2024-05-01T14:00:00+02:00")).unwrap(),
            Value::Time(expected)
        );
        assert_eq!(
            run(Primitive::Time, Value::Int(expected.timestamp())).unwrap(),
            Value::Time(expected)
        );
        assert!(run(Primitive::Time, Value::from("yesterday")).is_err());
    }

    #[test]
    fn time_uses_format_option() {
        let options = opts().option("format", "%d/%m/%Y").coercion_options();
        let value = coerce(
            Primitive::Time,
            Value::from("01/05/2024"),
            &options,
            &CoercionConfig::default(),
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Time(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn time_renders_as_string() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(
            run(Primitive::String, Value::Time(t)).unwrap(),
            Value::from("2024-05-01T12:00:00Z")
        );
    }
}

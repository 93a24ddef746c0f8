//! Normalization of numeric placeholders.
//!
//! Device payloads arrive with numeric fields that may be JSON numbers,
//! numeric strings, `null`, or an empty string standing in for "no value".
//! The helpers here map all of those onto `Option`, so that an absent value
//! stays distinct from zero by the time it reaches the comparator.

use crate::{
    error::Result,
    field::{Field, FieldKind},
    Error,
};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde_json::Value;
use std::fmt;

/// Parse a textual numeric value. Blank text means "no value".
pub fn parse_optional_number(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Error::InvalidNumber(raw.to_string())),
    }
}

/// Parse a textual integer flag. Blank text means "no value".
///
/// Integral floats (`"1.0"`) are accepted, fractional ones are not.
pub fn parse_optional_integer(raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Some(value));
    }
    match trimmed.parse::<f64>() {
        Ok(value) => integral(value)
            .map(Some)
            .ok_or_else(|| Error::InvalidNumber(raw.to_string())),
        Err(_) => Err(Error::InvalidNumber(raw.to_string())),
    }
}

fn integral(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the nearest float is 2^63
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// `deserialize_with` helper for optional floating point device fields.
pub fn optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumberVisitor)
}

/// `deserialize_with` helper for optional integer flags such as `ray_trace`.
///
/// Booleans are accepted as 1/0.
pub fn optional_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerVisitor)
}

/// Normalize the numeric fields of an already-parsed device object in place.
///
/// Placeholders become `null`, numeric strings become numbers and boolean
/// `ray_trace` flags become 1/0. Kind payloads are left to the deserializer.
/// Values that are not objects are ignored.
pub fn normalize_device_value(device: &mut Value) -> Result<()> {
    let Some(object) = device.as_object_mut() else {
        return Ok(());
    };

    for field in Field::ALL {
        let Some(raw) = object.get_mut(field.name()) else {
            continue;
        };
        let normalized = match field.kind() {
            FieldKind::Number => Value::from(number_from_value(raw)?),
            FieldKind::Integer => Value::from(integer_from_value(raw)?),
            FieldKind::Text | FieldKind::List => continue,
        };
        *raw = normalized;
    }
    Ok(())
}

fn number_from_value(value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| Error::InvalidNumber(n.to_string())),
        Value::String(s) => parse_optional_number(s),
        other => Err(Error::InvalidNumber(other.to_string())),
    }
}

fn integer_from_value(value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(i64::from(*flag))),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .map(Some)
            .ok_or_else(|| Error::InvalidNumber(n.to_string())),
        Value::String(s) => parse_optional_integer(s),
        other => Err(Error::InvalidNumber(other.to_string())),
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, an empty string or null")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        if v.is_finite() {
            Ok(Some(v))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        parse_optional_number(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

struct IntegerVisitor;

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer, a boolean, an integer string, an empty string or null")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IntegerVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Ok(Some(i64::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        integral(v)
            .map(Some)
            .ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        parse_optional_integer(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "optional_number")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "optional_integer")]
        flag: Option<i64>,
    }

    fn probe(value: serde_json::Value) -> serde_json::Result<Probe> {
        serde_json::from_value(value)
    }

    #[test]
    fn empty_string_is_absent() {
        let p = probe(json!({"value": "", "flag": ""})).unwrap();
        assert_eq!(p.value, None);
        assert_eq!(p.flag, None);

        let p = probe(json!({"value": "   "})).unwrap();
        assert_eq!(p.value, None);
    }

    #[test]
    fn null_and_missing_are_absent() {
        let p = probe(json!({"value": null, "flag": null})).unwrap();
        assert_eq!(p.value, None);
        assert_eq!(p.flag, None);

        let p = probe(json!({})).unwrap();
        assert_eq!(p.value, None);
        assert_eq!(p.flag, None);
    }

    #[test]
    fn zero_is_present() {
        let p = probe(json!({"value": 0, "flag": 0})).unwrap();
        assert_eq!(p.value, Some(0.0));
        assert_eq!(p.flag, Some(0));
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let p = probe(json!({"value": "1.25", "flag": "1"})).unwrap();
        assert_eq!(p.value, Some(1.25));
        assert_eq!(p.flag, Some(1));

        let p = probe(json!({"flag": "0.0"})).unwrap();
        assert_eq!(p.flag, Some(0));
    }

    #[test]
    fn booleans_map_to_flags() {
        let p = probe(json!({"flag": true})).unwrap();
        assert_eq!(p.flag, Some(1));
        let p = probe(json!({"flag": false})).unwrap();
        assert_eq!(p.flag, Some(0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(probe(json!({"value": "north"})).is_err());
        assert!(probe(json!({"flag": "yes"})).is_err());
        assert!(probe(json!({"flag": 0.5})).is_err());
        assert!(probe(json!({"value": [1, 2]})).is_err());
        assert!(probe(json!({"value": "NaN"})).is_err());
        assert!(probe(json!({"value": "inf"})).is_err());
        assert!(probe(json!({"value": "-infinity"})).is_err());
        assert!(probe(json!({"flag": "NaN"})).is_err());
    }

    #[test]
    fn integer_bounds() {
        assert_eq!(
            parse_optional_integer("9223372036854775807"),
            Ok(Some(i64::MAX))
        );
        assert_eq!(
            parse_optional_integer("9223372036854775808"),
            Err(Error::InvalidNumber("9223372036854775808".into()))
        );
        assert_eq!(
            parse_optional_integer("-9223372036854775808.0"),
            Ok(Some(i64::MIN))
        );
        assert!(probe(json!({"flag": 9223372036854775808u64})).is_err());
    }

    #[test]
    fn device_value_normalized_in_place() {
        let mut device = json!({
            "fc": "AT1L0",
            "fg": "",
            "stand": "",
            "nom_loc_x": "",
            "nom_loc_y": " 12.5 ",
            "nom_ang_z": 3,
            "ray_trace": true,
            "kind": {"type": "aperture", "width": ""}
        });
        normalize_device_value(&mut device).unwrap();

        assert_eq!(device["nom_loc_x"], Value::Null);
        assert_eq!(device["nom_loc_y"], json!(12.5));
        assert_eq!(device["nom_ang_z"], json!(3.0));
        assert_eq!(device["ray_trace"], json!(1));
        assert_eq!(device["stand"], json!(""));
        assert_eq!(device["fg"], json!(""));
        assert_eq!(device["kind"]["width"], json!(""));
        assert!(device.get("nom_dim_x").is_none());
    }

    #[test]
    fn device_value_rejects_bad_numbers() {
        let mut device = json!({"fc": "A", "fg": "1", "nom_dim_y": "NaN"});
        assert_eq!(
            normalize_device_value(&mut device),
            Err(Error::InvalidNumber("NaN".into()))
        );

        let mut device = json!({"fc": "A", "fg": "1", "ray_trace": 0.5});
        assert_eq!(
            normalize_device_value(&mut device),
            Err(Error::InvalidNumber("0.5".into()))
        );

        let mut device = json!({"fc": "A", "fg": "1", "nom_loc_z": [1]});
        assert_eq!(
            normalize_device_value(&mut device),
            Err(Error::InvalidNumber("[1]".into()))
        );

        let mut not_an_object = json!(["A"]);
        assert_eq!(normalize_device_value(&mut not_an_object), Ok(()));
    }

    #[test]
    fn parse_helpers_report_raw_text() {
        assert_eq!(
            parse_optional_number("1,5"),
            Err(Error::InvalidNumber("1,5".into()))
        );
        assert_eq!(parse_optional_integer(" 7 "), Ok(Some(7)));
        assert_eq!(
            parse_optional_integer("2.5"),
            Err(Error::InvalidNumber("2.5".into()))
        );
    }
}

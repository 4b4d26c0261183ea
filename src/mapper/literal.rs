//! Conversion between scalar values and typed literals

use super::error::{MappingError, MappingResult};
use super::value::{Value, ValueType};
use crate::rdf::{Literal, NamedNode};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use oxiri::IriRef;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::NamedNodeRef;
use tracing::warn;

const INT_TYPES: &[NamedNodeRef<'static>] = &[
    xsd::INT,
    xsd::INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::UNSIGNED_INT,
];
const LONG_TYPES: &[NamedNodeRef<'static>] = &[xsd::LONG, xsd::UNSIGNED_LONG];
const FLOAT_TYPES: &[NamedNodeRef<'static>] = &[xsd::FLOAT, xsd::DECIMAL];
const SHORT_TYPES: &[NamedNodeRef<'static>] = &[xsd::SHORT, xsd::UNSIGNED_SHORT];
const BYTE_TYPES: &[NamedNodeRef<'static>] = &[xsd::BYTE, xsd::UNSIGNED_BYTE];
const STRING_TYPES: &[NamedNodeRef<'static>] = &[xsd::STRING, rdfs::LITERAL, rdf::LANG_STRING];

/// Turn a scalar into a literal
///
/// A datatype hint wins over the datatype inferred from the value; the value's
/// lexical form is then written under the hinted datatype. A language hint
/// only applies to strings.
pub fn to_literal(
    value: &Value,
    datatype: Option<&NamedNode>,
    language: Option<&str>,
) -> MappingResult<Literal> {
    if let Some(datatype) = datatype {
        let lexical = value
            .lexical()
            .ok_or_else(|| MappingError::UnsupportedValue(value.type_name().to_string()))?;
        return Ok(Literal::new_typed_literal(lexical, datatype.clone()));
    }

    let inferred = match value {
        Value::Bool(_) => xsd::BOOLEAN,
        Value::Byte(_) => xsd::BYTE,
        Value::Short(_) => xsd::SHORT,
        Value::Int(_) => xsd::INT,
        Value::Long(_) => xsd::LONG,
        Value::Float(_) => xsd::FLOAT,
        Value::Double(_) => xsd::DOUBLE,
        Value::DateTime(_) => xsd::DATE_TIME,
        Value::Char(_) => xsd::STRING,
        Value::Uri(_) => xsd::ANY_URI,
        Value::String(s) => {
            return match language {
                Some(tag) => Ok(Literal::new_language_tagged_literal(s.as_str(), tag)?),
                None => Ok(Literal::new_simple_literal(s.as_str())),
            }
        }
        other => {
            return Err(MappingError::UnsupportedValue(format!(
                "Unknown or unsupported primitive type: {}",
                other.type_name()
            )))
        }
    };

    let lexical = value.lexical().unwrap_or_default();
    Ok(Literal::new_typed_literal(lexical, inferred.into()))
}

/// Turn a literal into a scalar, guided by the declared target type
///
/// Returns `Ok(None)` for `xsd:anyURI` literals that are not valid IRI references.
/// Unknown datatypes are an error rather than a silent string.
pub fn from_literal(literal: &Literal, target: &ValueType) -> MappingResult<Option<Value>> {
    let datatype = literal.datatype();
    let dt = datatype.as_str();
    let lexical = literal.value();
    let is = |types: &[NamedNodeRef<'static>]| types.iter().any(|t| t.as_str() == dt);

    let value = if is(STRING_TYPES) {
        if *target == ValueType::Char {
            let mut chars = lexical.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => {
                    return Err(MappingError::InvalidLiteral {
                        lexical: lexical.to_string(),
                        expected: "char, but the value is a string".to_string(),
                    })
                }
            }
        } else {
            Value::String(lexical.to_string())
        }
    } else if dt == xsd::BOOLEAN.as_str() {
        match lexical.trim() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => return Err(invalid(lexical, "xsd:boolean")),
        }
    } else if is(INT_TYPES) {
        Value::Int(parse_number(lexical, "int")?)
    } else if is(LONG_TYPES) {
        Value::Long(parse_number(lexical, "long")?)
    } else if dt == xsd::DOUBLE.as_str() {
        Value::Double(parse_double(lexical)?)
    } else if is(FLOAT_TYPES) {
        Value::Float(parse_float(lexical)?)
    } else if is(SHORT_TYPES) {
        Value::Short(parse_number(lexical, "short")?)
    } else if is(BYTE_TYPES) {
        Value::Byte(parse_number(lexical, "byte")?)
    } else if dt == xsd::ANY_URI.as_str() {
        if IriRef::parse(lexical).is_err() {
            warn!("Literal value {} is not a valid URI, skipping it", lexical);
            return Ok(None);
        }
        Value::Uri(lexical.to_string())
    } else if dt == xsd::DATE.as_str() || dt == xsd::DATE_TIME.as_str() {
        Value::DateTime(parse_datetime(lexical)?)
    } else if dt == xsd::TIME.as_str() {
        let millis: i64 = parse_number(lexical, "time in epoch milliseconds")?;
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| invalid(lexical, "time in epoch milliseconds"))?;
        Value::DateTime(instant.fixed_offset())
    } else {
        return Err(MappingError::UnsupportedDatatype(literal.to_string()));
    };

    Ok(Some(value))
}

fn invalid(lexical: &str, expected: &str) -> MappingError {
    MappingError::InvalidLiteral {
        lexical: lexical.to_string(),
        expected: expected.to_string(),
    }
}

fn parse_number<N: std::str::FromStr>(lexical: &str, expected: &str) -> MappingResult<N> {
    let trimmed = lexical.trim();
    trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| invalid(lexical, expected))
}

fn parse_double(lexical: &str) -> MappingResult<f64> {
    match lexical.trim() {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        other => other.parse().map_err(|_| invalid(lexical, "double")),
    }
}

fn parse_float(lexical: &str) -> MappingResult<f32> {
    match lexical.trim() {
        "INF" | "+INF" => Ok(f32::INFINITY),
        "-INF" => Ok(f32::NEG_INFINITY),
        "NaN" => Ok(f32::NAN),
        other => other.parse().map_err(|_| invalid(lexical, "float")),
    }
}

/// Parse `xsd:dateTime` or `xsd:date`; values without an offset are taken as UTC
fn parse_datetime(lexical: &str) -> MappingResult<DateTime<FixedOffset>> {
    let trimmed = lexical.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().fixed_offset());
    }

    // a date is midnight in its own offset, `Z` or `±hh:mm`
    let (date, zone) = NaiveDate::parse_and_remainder(trimmed, "%Y-%m-%d")
        .map_err(|_| invalid(lexical, "xsd:dateTime"))?;
    let zone = if zone.is_empty() { "Z" } else { zone };
    DateTime::parse_from_rfc3339(&format!("{}T00:00:00{}", date.format("%Y-%m-%d"), zone))
        .map_err(|_| invalid(lexical, "xsd:dateTime"))
}

//! Value coercion: raw cell strings to typed statement objects.
//!
//! Coercion never fails and never drops a value. When a typed parse does
//! not succeed the raw string is kept as a plain literal.

use crate::column::ValueKind;
use crate::encode;
use crate::entity::EntityIndex;

/// Object position of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// IRI of a resource.
    Resource(String),
    /// Plain, untyped string literal.
    Text(String),
    /// `xsd:integer`.
    Integer(i64),
    /// `xsd:double`.
    Double(f64),
    /// `xsd:boolean`.
    Boolean(bool),
    /// `xsd:dateTime` carrying the raw lexical form, unvalidated.
    DateTime(String),
}

/// Coerce a trimmed raw value toward `kind`.
///
/// `Item` values resolve against `items` by id; unknown ids become
/// `namespace + encode(raw)` without creating an entity.
pub fn coerce(raw: &str, kind: ValueKind, items: &EntityIndex, namespace: &str) -> Object {
    let typed = match kind {
        ValueKind::Item => Some(match items.get(raw) {
            Some(entity) => Object::Resource(entity.uri.clone()),
            None => Object::Resource(encode::qualify(namespace, raw)),
        }),
        ValueKind::Boolean => parse_boolean(raw).map(Object::Boolean),
        ValueKind::Number => parse_number(raw),
        ValueKind::Date => Some(Object::DateTime(raw.to_string())),
        ValueKind::Text | ValueKind::Url => None,
    };
    typed.unwrap_or_else(|| Object::Text(raw.to_string()))
}

fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_number(raw: &str) -> Option<Object> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Object::Integer(n));
    }
    // Rust accepts "inf" and "NaN"; those stay text.
    raw.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(Object::Double)
}

//! The structural type model and the subtype relation.

use serde_json::Value;
use std::fmt;
use std::mem;

/// A structural type in the styling expression language.
///
/// `Value` is the top type, the union of every concrete kind. `Error` is the
/// bottom type, produced by failed sub-parses so that a single diagnostic
/// does not cascade into spurious mismatches further up the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Null,
    Number,
    String,
    Boolean,
    Object,
    Color,
    /// The union of all concrete kinds.
    Value,
    /// Item type plus an optional fixed length.
    Array(Box<Type>, Option<usize>),
    /// Bottom type: subtype of every type.
    Error,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Null => write!(f, "null"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Boolean => write!(f, "boolean"),
            Type::Object => write!(f, "object"),
            Type::Color => write!(f, "color"),
            Type::Value => write!(f, "value"),
            Type::Array(item, length) => match (item.as_ref(), length) {
                (_, Some(length)) => write!(f, "array<{item}, {length}>"),
                (Type::Value, None) => write!(f, "array"),
                (_, None) => write!(f, "array<{item}>"),
            },
            Type::Error => write!(f, "error"),
        }
    }
}

/// The fixed member set of the `Value` union.
fn value_member_types() -> [Type; 7] {
    [
        Type::Null,
        Type::Number,
        Type::String,
        Type::Boolean,
        Type::Color,
        Type::Object,
        Type::Array(Box::new(Type::Value), None),
    ]
}

/// Checks that `actual` may appear where `expected` is required.
///
/// The relation is asymmetric: `Error` is accepted everywhere, and `Value`
/// accepts any of its fixed member kinds but is itself only accepted where
/// `Value` is expected. Array compatibility is covariant in the item type;
/// an expected fixed length must match exactly. Member attempts under
/// `Value` never produce messages of their own; on failure the returned
/// message always names the outer `expected`/`actual` pair.
pub fn check_subtype(expected: &Type, actual: &Type) -> Result<(), String> {
    if *actual == Type::Error {
        return Ok(());
    }
    match expected {
        Type::Value => {
            if *actual == Type::Value {
                return Ok(());
            }
            for member in value_member_types() {
                if check_subtype(&member, actual).is_ok() {
                    return Ok(());
                }
            }
        }
        Type::Array(item, length) => {
            if let Type::Array(actual_item, actual_length) = actual {
                if check_subtype(item, actual_item).is_ok()
                    && (length.is_none() || length == actual_length)
                {
                    return Ok(());
                }
            }
        }
        _ => {
            // Beyond `Value` and `Array`, compatibility is kind equality.
            if mem::discriminant(expected) == mem::discriminant(actual) {
                return Ok(());
            }
        }
    }
    Err(format!("Expected {expected} but found {actual} instead."))
}

/// Computes the structural type of a raw JSON value.
///
/// Array element types collapse to `Value` as soon as two elements disagree;
/// the array length is always recorded.
pub fn type_of(value: &Value) -> Type {
    match value {
        Value::Null => Type::Null,
        Value::Bool(_) => Type::Boolean,
        Value::Number(_) => Type::Number,
        Value::String(_) => Type::String,
        Value::Object(_) => Type::Object,
        Value::Array(items) => {
            let mut item_type: Option<Type> = None;
            for item in items {
                let t = type_of(item);
                match &item_type {
                    None => item_type = Some(t),
                    Some(previous) if *previous == t => {}
                    Some(_) => {
                        item_type = Some(Type::Value);
                        break;
                    }
                }
            }
            Type::Array(Box::new(item_type.unwrap_or(Type::Value)), Some(items.len()))
        }
    }
}

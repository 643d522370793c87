//! SQL literal list formatting
//!
//! Renders a homogeneous list as SQL literals separated by a delimiter:
//! - `[1, 2, 3]` with `","` → `1,2,3`
//! - `["a", "b"]` with `","` → `'a','b'`
//!
//! Strings are wrapped in single quotes WITHOUT escaping. A value containing
//! `'` produces broken SQL; callers must not pass untrusted input.

use crate::error::WeaveError;
use crate::value::Value;

/// Delimiter used for `{{join.name}}` placeholders
pub const JOIN_DELIMITER: &str = ",";

/// Join a sequence of ints, floats, or strings into a delimited literal list
///
/// Every element must be the same kind. Empty, mixed, or nested sequences
/// and non-sequence values are rejected.
pub fn join(value: &Value, delim: &str) -> Result<String, WeaveError> {
    let Value::Seq(items) = value else {
        return Err(unsupported(value.kind()));
    };

    let Some(first) = items.first() else {
        return Err(unsupported("empty sequence"));
    };
    if first.is_seq() {
        return Err(unsupported("nested sequence"));
    }
    let kind = first.kind();
    if let Some(other) = items.iter().find(|item| item.kind() != kind) {
        return Err(WeaveError::UnsupportedType {
            found: format!("mixed sequence of {} and {}", kind, other.kind()),
        });
    }

    let mut out = String::with_capacity(items.len() * 4);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(delim);
        }
        write_literal(&mut out, item)?;
    }
    Ok(out)
}

/// Render one scalar as a SQL literal
///
/// Uses the same rule as [`join`] elements. Sequences are a `TypeMismatch`
/// since a single placeholder cannot hold a list.
pub fn render_literal(name: &str, value: &Value) -> Result<String, WeaveError> {
    if value.is_seq() {
        return Err(WeaveError::TypeMismatch {
            name: name.to_string(),
            expected: "scalar",
            found: value.kind(),
        });
    }
    let mut out = String::new();
    write_literal(&mut out, value)?;
    Ok(out)
}

fn write_literal(out: &mut String, value: &Value) -> Result<(), WeaveError> {
    match value {
        Value::Int(n) => out.push_str(&n.to_string()),
        // Display for f64 is the shortest representation that round-trips
        Value::Float(f) if f.is_finite() => out.push_str(&f.to_string()),
        Value::Float(f) => return Err(unsupported_owned(format!("non-finite float {}", f))),
        Value::Str(s) => {
            out.push('\'');
            out.push_str(s);
            out.push('\'');
        }
        Value::Seq(_) => return Err(unsupported("nested sequence")),
    }
    Ok(())
}

fn unsupported(found: &str) -> WeaveError {
    unsupported_owned(found.to_string())
}

fn unsupported_owned(found: String) -> WeaveError {
    WeaveError::UnsupportedType { found }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_int_slice() {
        assert_eq!(join(&Value::from(vec![1, 2, 3]), ",").unwrap(), "1,2,3");
    }

    #[test]
    fn test_join_string_slice() {
        assert_eq!(
            join(&Value::from(vec!["a", "b", "c"]), ",").unwrap(),
            "'a','b','c'"
        );
    }

    #[test]
    fn test_join_float_slice() {
        assert_eq!(
            join(&Value::from(vec![1.1, 2.2, 3.3]), ",").unwrap(),
            "1.1,2.2,3.3"
        );
    }

    #[test]
    fn test_join_int_slice_empty_delim() {
        assert_eq!(join(&Value::from(vec![1, 2, 3]), "").unwrap(), "123");
    }

    #[test]
    fn test_join_string_slice_empty_delim() {
        assert_eq!(
            join(&Value::from(vec!["a", "b", "c"]), "").unwrap(),
            "'a''b''c'"
        );
    }

    #[test]
    fn test_join_multichar_delim() {
        assert_eq!(
            join(&Value::from(vec![10, -2]), " OR x = ").unwrap(),
            "10 OR x = -2"
        );
    }

    #[test]
    fn test_join_single_element_has_no_delim() {
        assert_eq!(join(&Value::from(vec!["only"]), ",").unwrap(), "'only'");
    }

    #[test]
    fn test_join_float_shortest_form() {
        assert_eq!(
            join(&Value::from(vec![1.0, 0.1, 2.5e-7]), ",").unwrap(),
            "1,0.1,0.00000025"
        );
    }

    #[test]
    fn test_join_does_not_escape_quotes() {
        assert_eq!(join(&Value::from(vec!["o'brien"]), ",").unwrap(), "'o'brien'");
    }

    #[test]
    fn test_join_rejects_scalar() {
        let err = join(&Value::from(5), ",").unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedType { ref found } if found == "int"));
    }

    #[test]
    fn test_join_rejects_empty() {
        let err = join(&Value::Seq(vec![]), ",").unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedType { .. }));
    }

    #[test]
    fn test_join_rejects_mixed() {
        let mixed = Value::Seq(vec![Value::from(1), Value::from("a")]);
        let err = join(&mixed, ",").unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedType { ref found }
            if found == "mixed sequence of int and string"));
    }

    #[test]
    fn test_join_rejects_int_float_mix() {
        let mixed = Value::Seq(vec![Value::from(1), Value::from(1.5)]);
        assert!(join(&mixed, ",").is_err());
    }

    #[test]
    fn test_join_rejects_nested() {
        let nested = Value::Seq(vec![Value::from(vec![1]), Value::from(vec![2])]);
        let err = join(&nested, ",").unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedType { ref found } if found == "nested sequence"));
    }

    #[test]
    fn test_join_rejects_nan() {
        let err = join(&Value::from(vec![1.0, f64::NAN]), ",").unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedType { .. }));
    }

    #[test]
    fn test_render_literal_scalars() {
        assert_eq!(render_literal("id", &Value::from(123)).unwrap(), "123");
        assert_eq!(render_literal("name", &Value::from("abc")).unwrap(), "'abc'");
        assert_eq!(render_literal("ratio", &Value::from(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn test_render_literal_rejects_sequence() {
        let err = render_literal("ids", &Value::from(vec![1])).unwrap_err();
        assert!(matches!(err, WeaveError::TypeMismatch { ref name, expected: "scalar", found: "sequence" }
            if name == "ids"));
    }
}

//! ScriptValue — deep-copied boundary value representation
//!
//! Values crossing between the native side and the dynamic peer are deep
//! copies, independent of any runtime heap. The set of variants is fixed to
//! what base-type contracts declare; anything richer stays on its own side of
//! the boundary.

use std::fmt;

/// A value crossing the native/dynamic boundary.
///
/// Deep-copied on every crossing; never aliases a runtime heap.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// Null / absent value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 32-bit unsigned integer (case and alternative counts)
    UInt(u32),

    /// 64-bit floating point number
    Float(f64),

    /// String value (deep copy)
    Str(String),

    /// Sequence of 64-bit integers (deep copy)
    IntList(Vec<i64>),

    /// Sequence of strings (deep copy)
    StrList(Vec<String>),
}

impl ScriptValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ScriptValue::Null)
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScriptValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScriptValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as u32 if this is an unsigned integer
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            ScriptValue::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Get as f64 if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScriptValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a slice of i64 if this is an integer sequence
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            ScriptValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as a slice of strings if this is a string sequence
    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            ScriptValue::StrList(v) => Some(v),
            _ => None,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Null => "null",
            ScriptValue::Bool(_) => "boolean",
            ScriptValue::Int(_) => "integer",
            ScriptValue::UInt(_) => "unsigned integer",
            ScriptValue::Float(_) => "float",
            ScriptValue::Str(_) => "string",
            ScriptValue::IntList(_) => "integer sequence",
            ScriptValue::StrList(_) => "string sequence",
        }
    }
}

impl Default for ScriptValue {
    fn default() -> Self {
        ScriptValue::Null
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Null => write!(f, "null"),
            ScriptValue::Bool(b) => write!(f, "{}", b),
            ScriptValue::Int(i) => write!(f, "{}", i),
            ScriptValue::UInt(u) => write!(f, "{}", u),
            ScriptValue::Float(fl) => write!(f, "{}", fl),
            ScriptValue::Str(s) => write!(f, "\"{}\"", s),
            ScriptValue::IntList(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            ScriptValue::StrList(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\"", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(ScriptValue::Null.is_null());
        assert_eq!(ScriptValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ScriptValue::Int(-7).as_int(), Some(-7));
        assert_eq!(ScriptValue::UInt(7).as_uint(), Some(7));
        assert_eq!(ScriptValue::Str("hi".into()).as_str(), Some("hi"));
        assert_eq!(
            ScriptValue::IntList(vec![1, 2]).as_int_list(),
            Some(&[1i64, 2][..])
        );

        // Wrong-variant reads return None, never coerce
        assert_eq!(ScriptValue::Int(1).as_bool(), None);
        assert_eq!(ScriptValue::UInt(1).as_int(), None);
        assert_eq!(ScriptValue::Null.as_str(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(ScriptValue::Null.type_name(), "null");
        assert_eq!(ScriptValue::Bool(true).type_name(), "boolean");
        assert_eq!(ScriptValue::Int(0).type_name(), "integer");
        assert_eq!(ScriptValue::UInt(0).type_name(), "unsigned integer");
        assert_eq!(ScriptValue::StrList(vec![]).type_name(), "string sequence");
    }

    #[test]
    fn test_display() {
        assert_eq!(ScriptValue::Null.to_string(), "null");
        assert_eq!(ScriptValue::Int(42).to_string(), "42");
        assert_eq!(ScriptValue::Str("hello".into()).to_string(), "\"hello\"");
        assert_eq!(
            ScriptValue::StrList(vec!["a".into(), "b".into()]).to_string(),
            "[\"a\", \"b\"]"
        );
        assert_eq!(ScriptValue::IntList(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
    }
}

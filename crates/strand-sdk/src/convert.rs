//! Conversion traits between boundary values and Rust types
//!
//! `FromScript`/`ToScript` cover exactly the types base-type contracts
//! declare. Conversions never coerce across variants; a mismatch is a
//! structured `ConversionError` that the director surfaces as a marshaling
//! failure.

use crate::error::ConversionError;
use crate::value::ScriptValue;

/// Convert a boundary value into a Rust type.
pub trait FromScript: Sized {
    /// Convert from a ScriptValue, returning an error if the variant doesn't match.
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError>;
}

/// Convert a Rust type into a boundary value.
pub trait ToScript {
    /// Convert to a ScriptValue.
    fn to_script(self) -> ScriptValue;
}

fn mismatch(expected: &'static str, value: &ScriptValue) -> ConversionError {
    ConversionError {
        expected,
        got: value.type_name(),
    }
}

impl FromScript for ScriptValue {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl ToScript for ScriptValue {
    fn to_script(self) -> ScriptValue {
        self
    }
}

impl FromScript for bool {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        value.as_bool().ok_or_else(|| mismatch("boolean", &value))
    }
}

impl ToScript for bool {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Bool(self)
    }
}

impl FromScript for i64 {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        value.as_int().ok_or_else(|| mismatch("integer", &value))
    }
}

impl ToScript for i64 {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Int(self)
    }
}

impl FromScript for u32 {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        value
            .as_uint()
            .ok_or_else(|| mismatch("unsigned integer", &value))
    }
}

impl ToScript for u32 {
    fn to_script(self) -> ScriptValue {
        ScriptValue::UInt(self)
    }
}

impl FromScript for f64 {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        value.as_float().ok_or_else(|| mismatch("float", &value))
    }
}

impl ToScript for f64 {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Float(self)
    }
}

impl FromScript for String {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl ToScript for String {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Str(self)
    }
}

impl ToScript for &str {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Str(self.to_string())
    }
}

impl FromScript for Vec<i64> {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::IntList(v) => Ok(v),
            other => Err(mismatch("integer sequence", &other)),
        }
    }
}

impl ToScript for Vec<i64> {
    fn to_script(self) -> ScriptValue {
        ScriptValue::IntList(self)
    }
}

impl FromScript for Vec<String> {
    fn from_script(value: ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::StrList(v) => Ok(v),
            other => Err(mismatch("string sequence", &other)),
        }
    }
}

impl ToScript for Vec<String> {
    fn to_script(self) -> ScriptValue {
        ScriptValue::StrList(self)
    }
}

// Unit type (for methods that return nothing)
impl ToScript for () {
    fn to_script(self) -> ScriptValue {
        ScriptValue::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_script_primitives() {
        assert_eq!(bool::from_script(ScriptValue::Bool(true)).unwrap(), true);
        assert_eq!(i64::from_script(ScriptValue::Int(-3)).unwrap(), -3);
        assert_eq!(u32::from_script(ScriptValue::UInt(9)).unwrap(), 9);
        assert_eq!(
            String::from_script(ScriptValue::Str("x".into())).unwrap(),
            "x"
        );
        assert_eq!(
            Vec::<String>::from_script(ScriptValue::StrList(vec!["a".into()])).unwrap(),
            vec!["a".to_string()]
        );
    }

    #[test]
    fn test_from_script_mismatch() {
        let err = u32::from_script(ScriptValue::Int(5)).unwrap_err();
        assert_eq!(err.expected, "unsigned integer");
        assert_eq!(err.got, "integer");

        let err = String::from_script(ScriptValue::Null).unwrap_err();
        assert_eq!(err.expected, "string");
        assert_eq!(err.got, "null");
    }

    #[test]
    fn test_to_script() {
        assert_eq!(42i64.to_script(), ScriptValue::Int(42));
        assert_eq!(7u32.to_script(), ScriptValue::UInt(7));
        assert_eq!("hi".to_script(), ScriptValue::Str("hi".into()));
        assert_eq!(().to_script(), ScriptValue::Null);
        assert_eq!(
            vec![1i64, 2].to_script(),
            ScriptValue::IntList(vec![1, 2])
        );
    }

    #[test]
    fn test_script_value_passthrough() {
        let v = ScriptValue::StrList(vec!["a".into()]);
        assert_eq!(ScriptValue::from_script(v.clone()).unwrap(), v);
    }
}

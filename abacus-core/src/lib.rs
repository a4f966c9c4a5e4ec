//! Abacus Core - Fundamental types
//!
//! This crate provides the core types used throughout Abacus:
//! - `Number`: Arbitrary precision decimal numbers
//! - `Value`: Values returned by plugin commands
//! - `AbacusError`: Structured errors rendered at the prompt

mod number;
mod value;
mod error;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use value::Value;
pub use error::{AbacusError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, Value, AbacusError, DEFAULT_PRECISION};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
        }

        #[test]
        fn test_from_str_integer() {
            let n = Number::from_str("123").unwrap();
            assert_eq!(n.to_i64(), Some(123));
        }

        #[test]
        fn test_from_str_decimal() {
            let n = Number::from_str("3.14").unwrap();
            assert!(!n.is_integer());
        }

        #[test]
        fn test_from_str_fraction_is_rejected() {
            let err = Number::from_str("1/3").unwrap_err();
            assert_eq!(err.to_string(), "Invalid number: 1/3");
        }

        #[test]
        fn test_from_str_scientific() {
            let n = Number::from_str("1.5e2").unwrap();
            assert_eq!(n.to_i64(), Some(150));
        }

        #[test]
        fn test_decimal_is_exact() {
            // 0.1 + 0.2 is exactly 0.3 in base 10
            let a = Number::from_str("0.1").unwrap();
            let b = Number::from_str("0.2").unwrap();
            assert_eq!(a.add(&b), Number::from_str("0.3").unwrap());
        }

        #[test]
        fn test_add() {
            let a = Number::from_i64(10);
            let b = Number::from_i64(5);
            assert_eq!(a.add(&b).to_i64(), Some(15));
        }

        #[test]
        fn test_sub() {
            let a = Number::from_i64(20);
            let b = Number::from_i64(10);
            assert_eq!(a.sub(&b).to_i64(), Some(10));
        }

        #[test]
        fn test_mul() {
            let a = Number::from_i64(4);
            let b = Number::from_i64(5);
            assert_eq!(a.mul(&b).to_i64(), Some(20));
        }

        #[test]
        fn test_checked_div() {
            let a = Number::from_i64(20);
            let b = Number::from_i64(4);
            assert_eq!(a.checked_div(&b).unwrap().to_i64(), Some(5));
        }

        #[test]
        fn test_div_by_zero() {
            let a = Number::from_i64(42);
            let b = Number::from_i64(0);
            assert_eq!(a.checked_div(&b), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_sqrt() {
            let n = Number::from_i64(16);
            let result = n.sqrt(50).unwrap();
            assert_eq!(result.to_i64(), Some(4));
        }

        #[test]
        fn test_sqrt_5() {
            let n = Number::from_i64(5);
            let result = n.sqrt(50).unwrap();
            let decimal = result.to_string();
            assert!(decimal.starts_with("2.236"), "sqrt(5) should be ~2.236, got: {}", decimal);
        }

        #[test]
        fn test_sqrt_negative() {
            let n = Number::from_i64(-4);
            assert!(n.sqrt(50).is_err());
        }

        #[test]
        fn test_pow_real_fractional() {
            // 4^0.5 = 2
            let four = Number::from_i64(4);
            let half = Number::from_str("0.5").unwrap();
            let decimal = four.pow_real(&half, 50).unwrap().to_string();
            assert!(decimal == "2" || decimal.starts_with("2.0") || decimal.starts_with("1.99"),
                "4^0.5 should be 2, got: {}", decimal);

            // 10^2.5 ≈ 316.2
            let ten = Number::from_i64(10);
            let two_point_five = Number::from_str("2.5").unwrap();
            let decimal = ten.pow_real(&two_point_five, 50).unwrap().to_string();
            assert!(decimal.starts_with("316."), "10^2.5 should be ~316.2, got: {}", decimal);
        }

        #[test]
        fn test_is_zero() {
            assert!(Number::from_i64(0).is_zero());
            assert!(!Number::from_i64(1).is_zero());
        }

        #[test]
        fn test_is_negative() {
            assert!(Number::from_i64(-5).is_negative());
            assert!(!Number::from_i64(5).is_negative());
            assert!(!Number::from_i64(0).is_negative());
        }

        #[test]
        fn test_abs() {
            assert_eq!(Number::from_i64(-42).abs().to_i64(), Some(42));
            assert_eq!(Number::from_i64(42).abs().to_i64(), Some(42));
        }

        #[test]
        fn test_ordering() {
            let mut values = vec![Number::from_i64(50), Number::from_i64(5), Number::from_i64(15)];
            values.sort();
            assert_eq!(values[0].to_i64(), Some(5));
            assert_eq!(values[2].to_i64(), Some(50));
        }
    }

    mod value_tests {
        use super::*;
        use std::collections::BTreeMap;

        #[test]
        fn test_from_i64() {
            let v: Value = 42i64.into();
            assert!(matches!(v, Value::Number(_)));
            assert_eq!(v.as_number().unwrap().to_i64(), Some(42));
        }

        #[test]
        fn test_from_str() {
            let v: Value = "hello".into();
            assert_eq!(v.as_text(), Some("hello"));
        }

        #[test]
        fn test_type_name() {
            assert_eq!(Value::Number(Number::from_i64(0)).type_name(), "Number");
            assert_eq!(Value::Text("".to_string()).type_name(), "Text");
            assert_eq!(Value::Bool(true).type_name(), "Bool");
            assert_eq!(Value::Null.type_name(), "Null");
        }

        #[test]
        fn test_serializes_tagged() {
            let v = Value::from(Number::from_i64(4));
            assert_eq!(serde_json::to_value(&v).unwrap(), serde_json::json!({
                "type": "Number",
                "value": "4"
            }));
        }

        #[test]
        fn test_object_display_is_sorted() {
            let mut map = BTreeMap::new();
            map.insert("min".to_string(), Value::from(10));
            map.insert("count".to_string(), Value::from(3));
            let v = Value::Object(map);
            assert_eq!(v.to_string(), "{count: 3, min: 10}");
            assert_eq!(v.get("count").unwrap().as_number().unwrap().to_i64(), Some(3));
            assert!(v.get("max").unwrap_err().is(codes::UNDEFINED_FIELD));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = AbacusError::div_zero();
            assert_eq!(err.code, codes::DIV_ZERO);
            assert_eq!(err.message, "Cannot divide by zero.");
        }

        #[test]
        fn test_from_number_error() {
            let err: AbacusError = NumberError::DivisionByZero.into();
            assert!(err.is(codes::DIV_ZERO));

            let err: AbacusError = NumberError::ParseError("abc".to_string()).into();
            assert!(err.is(codes::INVALID_OPERAND));
            assert!(err.message.contains("abc"));
        }

        #[test]
        fn test_error_display() {
            let err = AbacusError::plugin_not_found("nope");
            let display = format!("{}", err);
            assert!(display.contains("PLUGIN_NOT_FOUND"));
            assert!(display.contains("suggestion"));
        }

        #[test]
        fn test_error_serializes_without_empty_suggestion() {
            let err = AbacusError::div_zero();
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json, serde_json::json!({
                "code": "DIV_ZERO",
                "message": "Cannot divide by zero."
            }));
        }
    }
}

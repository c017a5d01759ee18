// Shared helpers for the table-driven typed array cases.
use ferrule::typed_array::{ElementKind, TypedArray};
use ferrule::{Realm, Value};

/// A view of `kind` holding `elements`, as numbers or big integers
/// depending on the kind's family.
pub fn view_of(kind: ElementKind, elements: &[i64]) -> Value {
    let source = elements.iter().map(|&n| {
        if kind.is_bigint() {
            Value::bigint(n)
        } else {
            Value::Number(n as f64)
        }
    });
    TypedArray::from_values(kind, source)
        .expect("elements fit the kind's family")
        .into()
}

/// `n` in the same family as `like`: `2n` next to a big integer, `2`
/// next to a number.
pub fn lit(like: &Value, n: i64) -> Value {
    if like.as_bigint().is_some() {
        Value::bigint(n)
    } else {
        Value::Number(n as f64)
    }
}

/// Integer value of a number or big integer element.
pub fn int(value: &Value) -> i64 {
    match value.as_bigint() {
        Some(big) => i64::try_from(big).expect("element fits in i64"),
        None => value.as_number().expect("numeric element") as i64,
    }
}

/// Call `view.method(predicate)` with a predicate built from `test`.
pub fn call_with_predicate(
    view: &Value,
    method: &str,
    test: fn(&Value) -> bool,
) -> Result<Value, ferrule::Error> {
    let predicate = Value::native_fn("predicate", 3, move |_, _, args| {
        Ok(Value::Bool(test(&args[0])))
    });
    Realm::default().invoke(view, method, &[predicate])
}

// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    // Pattern matching cases - detect common pattern forms
    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Some($($pattern:tt)*) }) => {
        match $result {
            Some($($pattern)*) => {},
            other => panic!("Expected Some({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { None }) => {
        match $result {
            None => {},
            other => panic!("Expected None but got {:#?}", other),
        }
    };

    // Wildcard pattern
    ($result:expr, { _ }) => {
        // Always passes - just to ensure the expression compiles
        let _ = $result;
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            Ok(actual) => {
                pretty_assertions::assert_eq!($expected, actual, "Expected {:#?} but got {:#?}\n\n< expected / got >", $expected, actual);
            },
            other => panic!("Expected Ok(...) but got {:?}", other),
        }
    };
}

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    // Declared `length` of the method on every kind
    ([$($attrs:meta)*] length, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_length() {
            for &kind in kinds() {
                let view = $crate::cases::view_of(kind, input());
                let result = ferrule::Realm::default()
                    .method(&view, method())
                    .map(|builtin| builtin.length)
                    .ok_or(kind);
                assert_case!(result, $expected);
            }
        }
    };

    // Calling the method with no arguments at all
    ([$($attrs:meta)*] no_arguments, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_no_arguments() {
            for &kind in kinds() {
                let view = $crate::cases::view_of(kind, input());
                let result = ferrule::Realm::default().invoke(&view, method(), &[]);
                assert_case!(result, $expected);
            }
        }
    };

    // Calling the method with `undefined` as the callback
    ([$($attrs:meta)*] undefined_callback, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_undefined_callback() {
            for &kind in kinds() {
                let view = $crate::cases::view_of(kind, input());
                let result = ferrule::Realm::default()
                    .invoke(&view, method(), &[ferrule::Value::Undefined]);
                assert_case!(result, $expected);
            }
        }
    };

    // Any other field names a predicate check: `{ |v| ..., { expected } }`
    ([$($attrs:meta)*] $field_name:ident, { $predicate:expr, $expected:tt }) => {
        $(#[$attrs])*
        #[test]
        fn $field_name() {
            for &kind in kinds() {
                let view = $crate::cases::view_of(kind, input());
                let result = $crate::cases::call_with_predicate(&view, method(), $predicate);
                assert_case!(result, $expected);
            }
        }
    };

    // Generic case for unknown field shapes
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields (now correctly capturing braces)
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    // Parse assertion field with potential attributes (handles both cases)
    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name first, then method, kinds and input, then any order for assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        method: $method:expr,
        kinds: $kinds:expr,
        input: $input:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;
            use ferrule::typed_array::ElementKind;
            use ferrule::Value;

            fn method() -> &'static str {
                $method
            }

            fn kinds() -> &'static [ElementKind] {
                &$kinds
            }

            // Make `$input` available to all test functions
            fn input() -> &'static [i64] {
                &$input
            }

            // Generate all test functions
            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}

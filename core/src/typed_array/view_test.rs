use super::*;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().map(|n| Value::Number(*n)).collect()
}

#[test]
fn test_from_values_every_numeric_kind() {
    for kind in ElementKind::NUMERIC {
        let view = TypedArray::from_values(kind, numbers(&[2.0, 4.0, 6.0])).unwrap();
        assert_eq!(view.kind(), kind);
        assert_eq!(view.len(), 3);
        assert_eq!(view.byte_length(), 3 * kind.byte_width());
        assert_eq!(view.to_vec().unwrap(), numbers(&[2.0, 4.0, 6.0]));
    }
}

#[test]
fn test_from_values_every_bigint_kind() {
    for kind in ElementKind::BIGINT {
        let source = [2, 4, 6].map(Value::bigint);
        let view = TypedArray::from_values(kind, source.clone()).unwrap();
        assert_eq!(view.to_vec().unwrap(), source.to_vec());
        assert_eq!(view.get(0).unwrap().as_bigint(), Some(&BigInt::from(2)));
    }
}

#[test]
fn test_from_values_rejects_mixed_families() {
    let err = TypedArray::from_values(
        ElementKind::Uint8,
        [Value::from(1), Value::bigint(2)],
    )
    .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch(_)));

    let err = TypedArray::from_values(
        ElementKind::BigInt64,
        [Value::bigint(1), Value::from(2)],
    )
    .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch(_)));
}

#[test]
fn test_empty_view() {
    let view = TypedArray::with_length(ElementKind::Float64, 0).unwrap();
    assert!(view.is_empty());
    assert_eq!(view.to_vec().unwrap(), Vec::<Value>::new());
    assert_eq!(view.get(0), Err(Error::Bounds { index: 0, length: 0 }));
}

#[test]
fn test_with_length_is_zero_filled() {
    let view = TypedArray::with_length(ElementKind::Int16, 4).unwrap();
    assert_eq!(view.to_vec().unwrap(), numbers(&[0.0; 4]));

    let view = TypedArray::with_length(ElementKind::BigUint64, 2).unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![Value::bigint(0), Value::bigint(0)]);
}

#[test]
fn test_with_length_rejects_unaddressable_lengths() {
    for length in [usize::MAX, usize::MAX / 8 + 1] {
        assert!(matches!(
            TypedArray::with_length(ElementKind::Float64, length),
            Err(Error::Bounds { index: 0, length: l }) if l == length
        ));
    }
    assert!(matches!(
        TypedArray::with_length(ElementKind::Uint8, usize::MAX),
        Err(Error::Bounds { .. })
    ));
}

#[test]
fn test_set_coerces_and_wraps() {
    let view = TypedArray::with_length(ElementKind::Int8, 2).unwrap();
    view.set(0, &Value::from(200)).unwrap();
    view.set(1, &Value::Number(-3.7)).unwrap();
    assert_eq!(view.to_vec().unwrap(), numbers(&[-56.0, -3.0]));

    assert!(matches!(
        view.set(0, &Value::bigint(1)),
        Err(Error::TypeMismatch(_))
    ));
    assert_eq!(
        view.set(2, &Value::from(1)),
        Err(Error::Bounds { index: 2, length: 2 })
    );
}

#[test]
fn test_views_share_their_buffer() {
    let buffer = ArrayBuffer::new(8);
    let bytes = TypedArray::from_buffer(ElementKind::Uint8, buffer.clone(), 0, 8).unwrap();
    let words = TypedArray::from_buffer(ElementKind::Uint32, buffer.clone(), 4, 1).unwrap();

    words.set(0, &Value::Number(0x01020304 as f64)).unwrap();
    assert_eq!(
        bytes.to_vec().unwrap(),
        numbers(&[0.0, 0.0, 0.0, 0.0, 4.0, 3.0, 2.0, 1.0])
    );
    assert!(words.buffer().ptr_eq(&buffer));
    assert_eq!(words.byte_offset(), 4);
}

#[test]
fn test_from_buffer_validation() {
    let buffer = ArrayBuffer::new(8);
    assert!(matches!(
        TypedArray::from_buffer(ElementKind::Uint32, buffer.clone(), 2, 1),
        Err(Error::TypeMismatch(_))
    ));
    assert_eq!(
        TypedArray::from_buffer(ElementKind::Uint32, buffer.clone(), 4, 2).unwrap_err(),
        Error::Bounds { index: 0, length: 2 }
    );
    assert!(TypedArray::from_buffer(ElementKind::Float64, buffer, 0, 1).is_ok());
}

#[test]
fn test_detached_buffer_reads_fail() {
    let view = TypedArray::from_values(ElementKind::Uint16, numbers(&[1.0, 2.0])).unwrap();
    assert!(!view.is_out_of_bounds());

    view.buffer().detach();
    assert!(view.is_out_of_bounds());
    // Length is fixed for the lifetime of the view
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(0), Err(Error::Bounds { index: 0, length: 2 }));
    assert_eq!(
        view.set(1, &Value::from(1)),
        Err(Error::Bounds { index: 1, length: 2 })
    );
}

#[test]
fn test_shrunk_buffer_reads_fail_past_the_end() {
    let view =
        TypedArray::from_values(ElementKind::Uint32, numbers(&[1.0, 2.0, 3.0])).unwrap();
    view.buffer().resize(8);

    assert!(view.is_out_of_bounds());
    assert_eq!(view.get(1).unwrap(), Value::from(2));
    assert_eq!(view.get(2), Err(Error::Bounds { index: 2, length: 3 }));
    assert_eq!(view.to_vec(), Err(Error::Bounds { index: 2, length: 3 }));
}

#[test]
fn test_clones_are_the_same_view() {
    let view = TypedArray::with_length(ElementKind::Uint8, 1).unwrap();
    let alias = view.clone();
    alias.set(0, &Value::from(9)).unwrap();
    assert_eq!(view.get(0).unwrap(), Value::from(9));
    assert!(view.ptr_eq(&alias));
    assert!(!view.ptr_eq(&TypedArray::with_length(ElementKind::Uint8, 1).unwrap()));
}

use dynbuf::{DynError, DynamicBuffer, DynamicMatrix, ReadError, MAX_MATRIX_SIZE, MAX_VECTOR_SIZE};

#[test]
fn test_error_messages_quality() {
    let error = DynamicBuffer::<i32>::new(0).unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("Vector length 0"));
    assert!(message.contains(&MAX_VECTOR_SIZE.to_string()));

    let error = DynamicMatrix::<i32>::new(MAX_MATRIX_SIZE + 1).unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("Matrix size 10001"));

    let v = DynamicBuffer::from_slice(&[1, 2]).unwrap();
    let error = v.at(5).unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("Index 5 out of bounds"));
    assert!(message.contains("length 2"));

    let w = DynamicBuffer::from_slice(&[1, 2, 3]).unwrap();
    let message = format!("{}", v.try_add(&w).unwrap_err());
    assert!(message.contains("lengths 2 and 3"));

    let m = DynamicMatrix::<i32>::new(2).unwrap();
    let message = format!("{}", m.try_mul_vector(&w).unwrap_err());
    assert!(message.contains("2 columns"));
    assert!(message.contains("3 rows"));
}

#[test]
fn test_error_types_implement_standard_traits() {
    let error = DynError::MissingSource;

    // Test Debug
    let debug_str = format!("{:?}", error);
    assert!(!debug_str.is_empty());

    // Test Display
    let display_str = format!("{}", error);
    assert!(!display_str.is_empty());

    // Test Clone
    let cloned = error.clone();
    assert_eq!(error, cloned);

    // Test PartialEq
    assert_eq!(error, DynError::MissingSource);
    assert_ne!(error, DynError::SizeMismatch { left: 1, right: 2 });

    // Test Error trait
    let _: &dyn std::error::Error = &error;
    let _: &dyn std::error::Error = &ReadError::UnexpectedEof {
        expected: 1,
        found: 0,
    };
}

#[test]
fn test_read_error_sources() {
    use std::error::Error;

    let io = ReadError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
    assert!(io.to_string().contains("disk gone"));
    assert!(io.source().is_some());

    let shape = ReadError::from(DynError::LengthOutOfRange {
        length: 0,
        max: MAX_VECTOR_SIZE,
    });
    assert_eq!(
        shape.to_string(),
        DynError::LengthOutOfRange {
            length: 0,
            max: MAX_VECTOR_SIZE
        }
        .to_string()
    );
}

#[test]
fn test_comprehensive_error_scenarios() {
    // Test all error variants have proper error messages
    let errors = [
        DynError::LengthOutOfRange {
            length: 0,
            max: MAX_VECTOR_SIZE,
        },
        DynError::SizeOutOfRange {
            size: 0,
            max: MAX_MATRIX_SIZE,
        },
        DynError::MissingSource,
        DynError::SourceTooShort {
            required: 4,
            provided: 1,
        },
        DynError::IndexOutOfBounds {
            index: 5,
            length: 2,
        },
        DynError::SizeMismatch { left: 1, right: 2 },
        DynError::DimensionMismatch {
            columns: 2,
            rows: 3,
        },
        DynError::NotSquare {
            row: 0,
            expected: 2,
            found: 3,
        },
    ];

    for error in &errors {
        let message = format!("{}", error);
        assert!(
            !message.is_empty(),
            "Error message should not be empty for {:?}",
            error
        );
        assert!(
            message.len() > 10,
            "Error message should be descriptive for {:?}",
            error
        );
    }
}

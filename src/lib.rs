//! `dynbuf`: fixed-length owning vectors and square matrices with generic
//! elementwise arithmetic.
//!
//! [`DynamicBuffer<T>`] owns exactly one heap allocation of `len()` elements.
//! The length is chosen at construction, bounded by [`MAX_VECTOR_SIZE`], and
//! never changes. [`DynamicMatrix<T>`] is a square buffer of row buffers,
//! bounded by [`MAX_MATRIX_SIZE`].
//!
//! Every arithmetic operation is a thin wrapper over the elementwise
//! functions of the [`transform`] module, so the element type only needs the
//! operators the chosen operation uses.
//!
//! # Vectors
//!
//! ```
//! # use dynbuf::DynamicBuffer;
//! let v1 = DynamicBuffer::from_slice(&[1, 2, 3]).unwrap();
//! let v2 = DynamicBuffer::from_slice(&[4, 5, 6]).unwrap();
//!
//! assert_eq!((&v1 + &v2).as_slice(), &[5, 7, 9]);
//! assert_eq!(&v1 * &v2, 32); // dot product
//! assert_eq!((&v1 * 10).as_slice(), &[10, 20, 30]);
//! assert_eq!((&v1 + 1).as_slice(), &[2, 3, 4]);
//! assert_eq!((-&v1).as_slice(), &[-1, -2, -3]);
//!
//! // Fallible variants report mismatched lengths instead of panicking
//! let short = DynamicBuffer::from_slice(&[1, 2]).unwrap();
//! assert!(v1.try_add(&short).is_err());
//! assert!(v1.try_dot(&short).is_err());
//! ```
//!
//! Buffers are built with a default fill, a per-index generator, or by
//! copying a source sequence:
//!
//! ```
//! # use dynbuf::{DynamicBuffer, DynError};
//! let zeros = DynamicBuffer::<f64>::new(3).unwrap();
//! let squares = DynamicBuffer::from_fn(4, |i| i * i).unwrap();
//! let prefix = DynamicBuffer::copy_from(Some(&[7, 8, 9][..]), 2).unwrap();
//!
//! assert_eq!(zeros.as_slice(), &[0.0, 0.0, 0.0]);
//! assert_eq!(squares.as_slice(), &[0, 1, 4, 9]);
//! assert_eq!(prefix.as_slice(), &[7, 8]);
//!
//! assert_eq!(
//!     DynamicBuffer::<i32>::copy_from(None, 2).unwrap_err(),
//!     DynError::MissingSource
//! );
//! assert!(DynamicBuffer::<u8>::new(0).is_err());
//! ```
//!
//! # Matrices
//!
//! ```
//! # use dynbuf::{DynamicBuffer, DynamicMatrix, MatVecRule};
//! let m = DynamicMatrix::try_from(vec![vec![1, 2], vec![3, 4]]).unwrap();
//!
//! assert_eq!((&m * 2).to_string(), "2 4\n6 8");
//! assert_eq!((&m * &m).to_string(), "1 4\n9 16"); // elementwise
//! assert_eq!(m.try_matmul(&m).unwrap().to_string(), "7 10\n15 22");
//!
//! let v = DynamicBuffer::from_slice(&[1, 2]).unwrap();
//! assert_eq!((&m * &v).as_slice(), &[5, 11]);
//! assert_eq!(
//!     m.try_mul_vector_with(&v, MatVecRule::RowInvariant).unwrap().as_slice(),
//!     &[3, 14]
//! );
//! ```
//!
//! # Text Format
//!
//! Vectors print as single-space separated elements, matrices as one such
//! line per row with no trailing newline. Reading accepts any whitespace:
//!
//! ```
//! # use dynbuf::{DynamicBuffer, DynamicMatrix};
//! let mut m = DynamicMatrix::<i32>::new(2).unwrap();
//! let mut input = "1 2\n3   4\n5 6 7".as_bytes();
//! m.read_from(&mut input).unwrap();
//! assert_eq!(m.to_string(), "1 2\n3 4");
//!
//! let mut v = DynamicBuffer::<i32>::new(3).unwrap();
//! v.read_from(&mut input).unwrap();
//! assert_eq!(v.to_string(), "5 6 7");
//!
//! let parsed: DynamicBuffer<f64> = "0.5 1.5".parse().unwrap();
//! assert_eq!(parsed.len(), 2);
//! ```

mod core;
mod error;
mod iter;
mod matrix;
mod stream;
pub mod transform;

// Re-export public types and traits
pub use crate::core::{DynamicBuffer, MAX_VECTOR_SIZE};
pub use crate::error::{DynError, ReadError};
pub use crate::iter::Elements;
pub use crate::matrix::{DynamicMatrix, MatVecRule, MAX_MATRIX_SIZE};
pub use crate::stream::TokenReader;

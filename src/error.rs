use thiserror::Error;

/// Error types for `DynamicBuffer` and `DynamicMatrix` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DynError {
    /// Requested vector length is zero or above the vector limit
    #[error("Vector length {length} is out of range: expected 1..={max}")]
    LengthOutOfRange {
        /// Length that was requested
        length: usize,
        /// Largest allowed length
        max: usize,
    },
    /// Requested matrix size is zero or above the matrix limit
    #[error("Matrix size {size} is out of range: expected 1..={max}")]
    SizeOutOfRange {
        /// Size that was requested
        size: usize,
        /// Largest allowed size
        max: usize,
    },
    /// No source sequence was supplied where one is required
    #[error("Missing source: construction from a sequence requires a source")]
    MissingSource,
    /// Source sequence holds fewer elements than requested
    #[error("Source too short: {required} elements required, {provided} elements provided")]
    SourceTooShort {
        /// Number of elements requested
        required: usize,
        /// Number of elements in the source
        provided: usize,
    },
    /// Index is beyond the buffer length
    #[error("Index {index} out of bounds for buffer of length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Length of the buffer
        length: usize,
    },
    /// Operands of a binary operation have different lengths
    #[error("Size mismatch: operands have lengths {left} and {right}")]
    SizeMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
    /// Matrix columns do not match the vector rows
    #[error("Dimension mismatch: matrix has {columns} columns, vector has {rows} rows")]
    DimensionMismatch {
        /// Number of matrix columns
        columns: usize,
        /// Number of vector rows
        rows: usize,
    },
    /// A row of a matrix source has the wrong length
    #[error("Matrix is not square: row {row} has {found} elements, expected {expected}")]
    NotSquare {
        /// Offending row
        row: usize,
        /// Expected row length
        expected: usize,
        /// Actual row length
        found: usize,
    },
}

/// Error types for reading buffers and matrices from text
#[derive(Error, Debug)]
pub enum ReadError {
    /// The underlying reader failed
    #[error("I/O error while reading: {0}")]
    Io(#[from] std::io::Error),
    /// Input ended before every element was read
    #[error("Unexpected end of input: expected {expected} elements, found {found}")]
    UnexpectedEof {
        /// Number of elements required
        expected: usize,
        /// Number of elements read before the input ended
        found: usize,
    },
    /// A token could not be parsed as the element type
    #[error("Cannot parse token {token:?} at position {index}")]
    Parse {
        /// Zero-based position of the token in the element stream
        index: usize,
        /// Token text
        token: String,
    },
    /// Parsed text does not describe a valid buffer or matrix
    #[error(transparent)]
    Shape(#[from] DynError),
}

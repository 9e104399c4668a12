use std::fmt;
use std::io::BufRead;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::core::DynamicBuffer;
use crate::error::{DynError, ReadError};
use crate::iter::Elements;
use crate::stream;
use crate::transform;

/// Largest number of rows (and columns) a `DynamicMatrix` may have
pub const MAX_MATRIX_SIZE: usize = 10_000;

/// Formula used by matrix-vector multiplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatVecRule {
    /// `result[r] = Σ_c m[r][c] * v[c]`
    #[default]
    Standard,
    /// `result[r] = Σ_c m[r][c] * v[r]`: every entry of row `r` is scaled by `v[r]`
    RowInvariant,
}

/// A square matrix stored as a buffer of row buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicMatrix<T> {
    rows: DynamicBuffer<DynamicBuffer<T>>,
}

fn check_size(size: usize) -> Result<(), DynError> {
    if size == 0 || size > MAX_MATRIX_SIZE {
        log::debug!("rejecting matrix size {size}, limit is {MAX_MATRIX_SIZE}");
        return Err(DynError::SizeOutOfRange {
            size,
            max: MAX_MATRIX_SIZE,
        });
    }
    Ok(())
}

fn check_same_size(left: usize, right: usize) -> Result<(), DynError> {
    if left != right {
        return Err(DynError::SizeMismatch { left, right });
    }
    Ok(())
}

impl<T> DynamicMatrix<T> {
    /// Creates a `size`×`size` matrix of default elements.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeOutOfRange` if `size` is 0 or above `MAX_MATRIX_SIZE`.
    pub fn new(size: usize) -> Result<Self, DynError>
    where
        T: Default,
    {
        check_size(size)?;
        let rows = DynamicBuffer::try_from_fn(size, |_| DynamicBuffer::new(size))?;
        Ok(Self { rows })
    }

    /// Creates a matrix where element `(row, col)` is `generator(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeOutOfRange` if `size` is 0 or above `MAX_MATRIX_SIZE`.
    pub fn from_fn<F>(size: usize, mut generator: F) -> Result<Self, DynError>
    where
        F: FnMut(usize, usize) -> T,
    {
        check_size(size)?;
        let rows = DynamicBuffer::try_from_fn(size, |row| {
            DynamicBuffer::from_fn(size, |col| generator(row, col))
        })?;
        Ok(Self { rows })
    }

    /// Wraps an already built buffer of rows.
    ///
    /// Squareness is not checked; every row must have as many elements as
    /// there are rows.
    #[must_use]
    pub fn from_rows(rows: DynamicBuffer<DynamicBuffer<T>>) -> Self {
        Self { rows }
    }

    /// Number of rows, equal to the number of columns.
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &DynamicBuffer<DynamicBuffer<T>> {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> DynamicBuffer<DynamicBuffer<T>> {
        self.rows
    }

    /// Checked row access.
    ///
    /// # Errors
    ///
    /// Returns `DynError::IndexOutOfBounds` if `row >= size()`.
    pub fn at(&self, row: usize) -> Result<&DynamicBuffer<T>, DynError> {
        self.rows.at(row)
    }

    /// Checked mutable row access.
    ///
    /// # Errors
    ///
    /// Returns `DynError::IndexOutOfBounds` if `row >= size()`.
    pub fn at_mut(&mut self, row: usize) -> Result<&mut DynamicBuffer<T>, DynError> {
        self.rows.at_mut(row)
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// Returns `DynError::IndexOutOfBounds` if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, DynError> {
        self.rows.at(row)?.at(col)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DynamicBuffer<T>> {
        self.rows.iter()
    }

    /// Iterates over every element in row-major order.
    pub fn elements(&self) -> Elements<'_, T> {
        Elements::new(self)
    }

    /// Exchanges the contents of two matrices without copying rows.
    pub fn swap(&mut self, other: &mut Self) {
        self.rows.swap(&mut other.rows);
    }

    #[must_use]
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let size = self.size();
        Self::from_rows(DynamicBuffer::from_boxed(
            (0..size)
                .map(|col| {
                    DynamicBuffer::from_boxed(
                        (0..size).map(|row| self.rows[row][col].clone()).collect(),
                    )
                })
                .collect(),
        ))
    }

    // Matrix-scalar operations

    #[must_use]
    pub fn mul_scalar(&self, val: T) -> Self
    where
        T: Clone + Mul<Output = T>,
    {
        Self::from_rows(transform::apply_scalar(&self.rows, &val, |row, v| {
            row.mul_scalar(v.clone())
        }))
    }

    pub fn mul_scalar_assign(&mut self, val: T)
    where
        T: Clone + Mul<Output = T>,
    {
        transform::apply_scalar_in_place(&mut self.rows, &val, |row, v| row.mul_scalar(v.clone()));
    }

    // Matrix-vector operations

    /// Multiplies by a column vector with the default rule.
    ///
    /// # Errors
    ///
    /// Returns `DynError::DimensionMismatch` if `v.len() != size()`.
    pub fn try_mul_vector(&self, v: &DynamicBuffer<T>) -> Result<DynamicBuffer<T>, DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        self.try_mul_vector_with(v, MatVecRule::default())
    }

    /// Multiplies by a column vector with the given rule.
    ///
    /// # Errors
    ///
    /// Returns `DynError::DimensionMismatch` if `v.len() != size()`.
    pub fn try_mul_vector_with(
        &self,
        v: &DynamicBuffer<T>,
        rule: MatVecRule,
    ) -> Result<DynamicBuffer<T>, DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        if self.size() != v.len() {
            return Err(DynError::DimensionMismatch {
                columns: self.size(),
                rows: v.len(),
            });
        }
        Ok(self.mul_vector_unchecked(v, rule))
    }

    fn mul_vector_unchecked(&self, v: &DynamicBuffer<T>, rule: MatVecRule) -> DynamicBuffer<T>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        let mut result = DynamicBuffer::<T>::zeroed_like(v);
        for (r, (acc, row)) in result.iter_mut().zip(self.rows.iter()).enumerate() {
            for (c, entry) in row.iter().enumerate() {
                let factor = match rule {
                    MatVecRule::Standard => &v[c],
                    MatVecRule::RowInvariant => &v[r],
                };
                *acc += entry.clone() * factor.clone();
            }
        }
        result
    }

    // Matrix-matrix operations

    fn zip_rows<F>(&self, other: &Self, op: F) -> Self
    where
        T: Clone + Default + AddAssign + Add<Output = T>,
        F: FnMut(&DynamicBuffer<T>, &DynamicBuffer<T>) -> DynamicBuffer<T>,
    {
        let mut dst = Self::from_rows(DynamicBuffer::from_boxed(
            self.rows.iter().map(DynamicBuffer::zeroed_like).collect(),
        ));
        transform::apply_to(&mut dst.rows, &self.rows, &other.rows, op);
        dst
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_add(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T>,
    {
        check_same_size(self.size(), other.size())?;
        Ok(self.zip_rows(other, |a, b| a + b))
    }

    /// In-place elementwise sum; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_add_assign(&mut self, other: &Self) -> Result<(), DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T>,
    {
        let mut sum = self.try_add(other)?;
        self.swap(&mut sum);
        Ok(())
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T> + Sub<Output = T>,
    {
        check_same_size(self.size(), other.size())?;
        Ok(self.zip_rows(other, |a, b| a - b))
    }

    /// In-place elementwise difference; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<(), DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T> + Sub<Output = T>,
    {
        let mut diff = self.try_sub(other)?;
        self.swap(&mut diff);
        Ok(())
    }

    /// Elementwise (Hadamard) product; this is what `*` between matrices does.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_hadamard(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T> + Mul<Output = T>,
    {
        check_same_size(self.size(), other.size())?;
        Ok(self.zip_rows(other, DynamicBuffer::hadamard))
    }

    /// In-place elementwise product; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_hadamard_assign(&mut self, other: &Self) -> Result<(), DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T> + Mul<Output = T>,
    {
        let mut product = self.try_hadamard(other)?;
        self.swap(&mut product);
        Ok(())
    }

    /// Row-by-column matrix product.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the sizes differ.
    pub fn try_matmul(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        check_same_size(self.size(), other.size())?;
        let size = self.size();
        Self::from_fn(size, |row, col| {
            let mut acc = T::default();
            for k in 0..size {
                acc += self.rows[row][k].clone() * other.rows[k][col].clone();
            }
            acc
        })
    }

    // Text input

    /// Reads `size()*size()` elements in row-major order.
    ///
    /// On error `self` keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::UnexpectedEof` if the input ends early,
    /// `ReadError::Parse` for a malformed token, or `ReadError::Io`.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<(), ReadError>
    where
        T: FromStr,
    {
        let size = self.size();
        let mut values = stream::read_elements::<T, R>(reader, size * size)?.into_iter();
        let mut fresh = Self::from_rows(DynamicBuffer::from_boxed(
            (0..size)
                .map(|_| DynamicBuffer::from_boxed(values.by_ref().take(size).collect()))
                .collect(),
        ));
        self.swap(&mut fresh);
        Ok(())
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for DynamicMatrix<T> {
    type Error = DynError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        check_size(size)?;
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != size)
        {
            return Err(DynError::NotSquare {
                row,
                expected: size,
                found,
            });
        }
        let rows = rows
            .into_iter()
            .map(DynamicBuffer::<T>::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(DynamicBuffer::try_from(rows)?))
    }
}

impl<T> Index<usize> for DynamicMatrix<T> {
    type Output = DynamicBuffer<T>;

    fn index(&self, row: usize) -> &DynamicBuffer<T> {
        &self.rows[row]
    }
}

impl<T> IndexMut<usize> for DynamicMatrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut DynamicBuffer<T> {
        &mut self.rows[row]
    }
}

impl<T> Index<(usize, usize)> for DynamicMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row][col]
    }
}

impl<T> IndexMut<(usize, usize)> for DynamicMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.rows[row][col]
    }
}

impl<T> Mul<T> for &DynamicMatrix<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynamicMatrix<T>;

    fn mul(self, rhs: T) -> DynamicMatrix<T> {
        self.mul_scalar(rhs)
    }
}

impl<T> MulAssign<T> for DynamicMatrix<T>
where
    T: Clone + Mul<Output = T>,
{
    fn mul_assign(&mut self, rhs: T) {
        self.mul_scalar_assign(rhs);
    }
}

// Operator forms panic where the `try_` methods return an error.

impl<T> Add<&DynamicMatrix<T>> for &DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    type Output = DynamicMatrix<T>;

    fn add(self, rhs: &DynamicMatrix<T>) -> DynamicMatrix<T> {
        self.zip_rows(rhs, |a, b| a + b)
    }
}

impl<T> AddAssign<&DynamicMatrix<T>> for DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    fn add_assign(&mut self, rhs: &DynamicMatrix<T>) {
        let mut sum = &*self + rhs;
        self.swap(&mut sum);
    }
}

impl<T> Sub<&DynamicMatrix<T>> for &DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T> + Sub<Output = T>,
{
    type Output = DynamicMatrix<T>;

    fn sub(self, rhs: &DynamicMatrix<T>) -> DynamicMatrix<T> {
        self.zip_rows(rhs, |a, b| a - b)
    }
}

impl<T> SubAssign<&DynamicMatrix<T>> for DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T> + Sub<Output = T>,
{
    fn sub_assign(&mut self, rhs: &DynamicMatrix<T>) {
        let mut diff = &*self - rhs;
        self.swap(&mut diff);
    }
}

/// Elementwise (Hadamard) product.
impl<T> Mul<&DynamicMatrix<T>> for &DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T> + Mul<Output = T>,
{
    type Output = DynamicMatrix<T>;

    fn mul(self, rhs: &DynamicMatrix<T>) -> DynamicMatrix<T> {
        self.zip_rows(rhs, DynamicBuffer::hadamard)
    }
}

impl<T> MulAssign<&DynamicMatrix<T>> for DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Add<Output = T> + Mul<Output = T>,
{
    fn mul_assign(&mut self, rhs: &DynamicMatrix<T>) {
        let mut product = &*self * rhs;
        self.swap(&mut product);
    }
}

impl<T> Mul<&DynamicBuffer<T>> for &DynamicMatrix<T>
where
    T: Clone + Default + AddAssign + Mul<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn mul(self, rhs: &DynamicBuffer<T>) -> DynamicBuffer<T> {
        assert!(
            self.size() == rhs.len(),
            "Matrix columns count {} should be equal to the count of vector rows {}",
            self.size(),
            rhs.len()
        );
        self.mul_vector_unchecked(rhs, MatVecRule::default())
    }
}

impl<T: fmt::Display> fmt::Display for DynamicMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(row, f)?;
        }
        Ok(())
    }
}

impl<T: FromStr> FromStr for DynamicMatrix<T> {
    type Err = ReadError;

    /// One row per non-blank line; the result must be square.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut offset = 0;
        let mut rows = Vec::new();
        for line in s.lines().filter(|line| !line.trim().is_empty()) {
            let row: Vec<T> = stream::parse_tokens(line, offset)?;
            offset += row.len();
            rows.push(row);
        }
        Ok(Self::try_from(rows)?)
    }
}

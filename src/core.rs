use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{DynError, ReadError};
use crate::stream;
use crate::transform;

/// Largest number of elements a `DynamicBuffer` may hold
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// A fixed-length vector owning its elements in one heap allocation
#[derive(Debug, PartialEq, Eq)]
pub struct DynamicBuffer<T> {
    mem: Box<[T]>,
}

fn check_length(length: usize) -> Result<(), DynError> {
    if length == 0 || length > MAX_VECTOR_SIZE {
        log::debug!("rejecting vector length {length}, limit is {MAX_VECTOR_SIZE}");
        return Err(DynError::LengthOutOfRange {
            length,
            max: MAX_VECTOR_SIZE,
        });
    }
    Ok(())
}

fn check_same_len(left: usize, right: usize) -> Result<(), DynError> {
    if left != right {
        return Err(DynError::SizeMismatch { left, right });
    }
    Ok(())
}

impl<T> DynamicBuffer<T> {
    /// Creates a buffer of `length` default elements.
    ///
    /// # Errors
    ///
    /// Returns `DynError::LengthOutOfRange` if `length` is 0 or above `MAX_VECTOR_SIZE`.
    pub fn new(length: usize) -> Result<Self, DynError>
    where
        T: Default,
    {
        Self::from_fn(length, |_| T::default())
    }

    /// Creates a buffer where element `i` is `generator(i)`.
    ///
    /// If the generator panics, the elements built so far are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DynError::LengthOutOfRange` if `length` is 0 or above `MAX_VECTOR_SIZE`.
    pub fn from_fn<F>(length: usize, generator: F) -> Result<Self, DynError>
    where
        F: FnMut(usize) -> T,
    {
        check_length(length)?;
        log::trace!("allocating buffer of {length} elements");
        Ok(Self::from_boxed((0..length).map(generator).collect()))
    }

    /// Creates a buffer from a fallible generator.
    ///
    /// Construction stops at the first error; elements built so far are dropped.
    ///
    /// # Errors
    ///
    /// Returns the generator's error, or `DynError::LengthOutOfRange`
    /// converted into `E` if `length` is invalid.
    pub fn try_from_fn<E, F>(length: usize, generator: F) -> Result<Self, E>
    where
        E: From<DynError>,
        F: FnMut(usize) -> Result<T, E>,
    {
        check_length(length)?;
        log::trace!("allocating buffer of {length} elements");
        let mem = (0..length).map(generator).collect::<Result<Box<[T]>, E>>()?;
        Ok(Self::from_boxed(mem))
    }

    /// Copies the first `length` elements of `source`.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `DynError::MissingSource` if `source` is `None`
    /// - `DynError::LengthOutOfRange` if `length` is invalid
    /// - `DynError::SourceTooShort` if `source` holds fewer than `length` elements
    pub fn copy_from(source: Option<&[T]>, length: usize) -> Result<Self, DynError>
    where
        T: Clone,
    {
        let source = source.ok_or(DynError::MissingSource)?;
        check_length(length)?;
        if source.len() < length {
            return Err(DynError::SourceTooShort {
                required: length,
                provided: source.len(),
            });
        }
        Ok(Self::from_boxed(source[..length].into()))
    }

    /// Copies every element of `source`.
    ///
    /// # Errors
    ///
    /// Returns `DynError::LengthOutOfRange` if `source` is empty or too long.
    pub fn from_slice(source: &[T]) -> Result<Self, DynError>
    where
        T: Clone,
    {
        Self::copy_from(Some(source), source.len())
    }

    /// Wraps storage whose length the caller has already validated.
    pub(crate) fn from_boxed(mem: Box<[T]>) -> Self {
        debug_assert!(!mem.is_empty() && mem.len() <= MAX_VECTOR_SIZE);
        Self { mem }
    }

    /// Same length as `other`, every element `T::default()`.
    pub(crate) fn zeroed_like<U>(other: &DynamicBuffer<U>) -> Self
    where
        T: Default,
    {
        Self::from_boxed((0..other.len()).map(|_| T::default()).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mem.len()
    }

    /// Alias of [`len`](Self::len).
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Always `false`: a buffer holds at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// Returns `DynError::IndexOutOfBounds` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DynError> {
        let length = self.len();
        self.mem
            .get(index)
            .ok_or(DynError::IndexOutOfBounds { index, length })
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    ///
    /// Returns `DynError::IndexOutOfBounds` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynError> {
        let length = self.len();
        self.mem
            .get_mut(index)
            .ok_or(DynError::IndexOutOfBounds { index, length })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.mem
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.mem
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.mem.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.mem.iter_mut()
    }

    #[must_use]
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.mem
    }

    /// Exchanges the contents of two buffers without copying elements.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.mem, &mut other.mem);
    }

    // Scalar operations

    #[must_use]
    pub fn add_scalar(&self, val: T) -> Self
    where
        T: Clone + Add<Output = T>,
    {
        transform::apply_scalar(self, &val, |x, v| x.clone() + v.clone())
    }

    pub fn add_scalar_assign(&mut self, val: T)
    where
        T: Clone + Add<Output = T>,
    {
        transform::apply_scalar_in_place(self, &val, |x, v| x.clone() + v.clone());
    }

    #[must_use]
    pub fn sub_scalar(&self, val: T) -> Self
    where
        T: Clone + Sub<Output = T>,
    {
        transform::apply_scalar(self, &val, |x, v| x.clone() - v.clone())
    }

    pub fn sub_scalar_assign(&mut self, val: T)
    where
        T: Clone + Sub<Output = T>,
    {
        transform::apply_scalar_in_place(self, &val, |x, v| x.clone() - v.clone());
    }

    #[must_use]
    pub fn mul_scalar(&self, val: T) -> Self
    where
        T: Clone + Mul<Output = T>,
    {
        transform::apply_scalar(self, &val, |x, v| x.clone() * v.clone())
    }

    pub fn mul_scalar_assign(&mut self, val: T)
    where
        T: Clone + Mul<Output = T>,
    {
        transform::apply_scalar_in_place(self, &val, |x, v| x.clone() * v.clone());
    }

    // Vector operations

    fn zip_with<F>(&self, other: &Self, op: F) -> Self
    where
        T: Default + AddAssign,
        F: FnMut(&T, &T) -> T,
    {
        let mut dst = Self::zeroed_like(self);
        transform::apply_to(&mut dst, self, other, op);
        dst
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_add(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Add<Output = T>,
    {
        check_same_len(self.len(), other.len())?;
        Ok(self.zip_with(other, |a, b| a.clone() + b.clone()))
    }

    /// In-place elementwise sum; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
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
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Sub<Output = T>,
    {
        check_same_len(self.len(), other.len())?;
        Ok(self.zip_with(other, |a, b| a.clone() - b.clone()))
    }

    /// In-place elementwise difference; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<(), DynError>
    where
        T: Clone + Default + AddAssign + Sub<Output = T>,
    {
        let mut diff = self.try_sub(other)?;
        self.swap(&mut diff);
        Ok(())
    }

    /// Elementwise (Hadamard) product.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[must_use]
    pub fn hadamard(&self, other: &Self) -> Self
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        self.zip_with(other, |a, b| a.clone() * b.clone())
    }

    /// Elementwise (Hadamard) product.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_hadamard(&self, other: &Self) -> Result<Self, DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        check_same_len(self.len(), other.len())?;
        Ok(self.hadamard(other))
    }

    /// In-place elementwise product; `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_hadamard_assign(&mut self, other: &Self) -> Result<(), DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        let mut product = self.try_hadamard(other)?;
        self.swap(&mut product);
        Ok(())
    }

    /// Sum of pairwise products.
    ///
    /// # Errors
    ///
    /// Returns `DynError::SizeMismatch` if the lengths differ.
    pub fn try_dot(&self, other: &Self) -> Result<T, DynError>
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        check_same_len(self.len(), other.len())?;
        Ok(self.dot_unchecked(other))
    }

    fn dot_unchecked(&self, other: &Self) -> T
    where
        T: Clone + Default + AddAssign + Mul<Output = T>,
    {
        let mut result = T::default();
        for (a, b) in self.iter().zip(other.iter()) {
            result += a.clone() * b.clone();
        }
        result
    }

    // Text input

    /// Reads exactly `len()` whitespace-separated elements from `reader`.
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
        let values = stream::read_elements(reader, self.len())?;
        let mut fresh = Self::from_boxed(values.into_boxed_slice());
        self.swap(&mut fresh);
        Ok(())
    }
}

impl<T: Clone> Clone for DynamicBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            mem: self.mem.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        self.swap(&mut tmp);
    }
}

impl<T> TryFrom<Vec<T>> for DynamicBuffer<T> {
    type Error = DynError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        check_length(values.len())?;
        Ok(Self::from_boxed(values.into_boxed_slice()))
    }
}

impl<T> Index<usize> for DynamicBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.mem[index]
    }
}

impl<T> IndexMut<usize> for DynamicBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.mem[index]
    }
}

impl<T> AsRef<[T]> for DynamicBuffer<T> {
    fn as_ref(&self) -> &[T] {
        &self.mem
    }
}

// Scalar operators, `v + s`, `v -= s` and so on.

impl<T> Add<T> for &DynamicBuffer<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn add(self, rhs: T) -> DynamicBuffer<T> {
        self.add_scalar(rhs)
    }
}

impl<T> Add<T> for DynamicBuffer<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn add(mut self, rhs: T) -> DynamicBuffer<T> {
        self.add_scalar_assign(rhs);
        self
    }
}

impl<T> AddAssign<T> for DynamicBuffer<T>
where
    T: Clone + Add<Output = T>,
{
    fn add_assign(&mut self, rhs: T) {
        self.add_scalar_assign(rhs);
    }
}

impl<T> Sub<T> for &DynamicBuffer<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn sub(self, rhs: T) -> DynamicBuffer<T> {
        self.sub_scalar(rhs)
    }
}

impl<T> Sub<T> for DynamicBuffer<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn sub(mut self, rhs: T) -> DynamicBuffer<T> {
        self.sub_scalar_assign(rhs);
        self
    }
}

impl<T> SubAssign<T> for DynamicBuffer<T>
where
    T: Clone + Sub<Output = T>,
{
    fn sub_assign(&mut self, rhs: T) {
        self.sub_scalar_assign(rhs);
    }
}

impl<T> Mul<T> for &DynamicBuffer<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn mul(self, rhs: T) -> DynamicBuffer<T> {
        self.mul_scalar(rhs)
    }
}

impl<T> Mul<T> for DynamicBuffer<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn mul(mut self, rhs: T) -> DynamicBuffer<T> {
        self.mul_scalar_assign(rhs);
        self
    }
}

impl<T> MulAssign<T> for DynamicBuffer<T>
where
    T: Clone + Mul<Output = T>,
{
    fn mul_assign(&mut self, rhs: T) {
        self.mul_scalar_assign(rhs);
    }
}

// Operator forms panic where the `try_` methods return `SizeMismatch`.

impl<T> Add<&DynamicBuffer<T>> for &DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn add(self, rhs: &DynamicBuffer<T>) -> DynamicBuffer<T> {
        self.zip_with(rhs, |a, b| a.clone() + b.clone())
    }
}

impl<T> Add<&DynamicBuffer<T>> for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn add(self, rhs: &DynamicBuffer<T>) -> DynamicBuffer<T> {
        &self + rhs
    }
}

impl<T> AddAssign<&DynamicBuffer<T>> for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    fn add_assign(&mut self, rhs: &DynamicBuffer<T>) {
        let mut sum = &*self + rhs;
        self.swap(&mut sum);
    }
}

impl<T> AddAssign for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Add<Output = T>,
{
    fn add_assign(&mut self, rhs: DynamicBuffer<T>) {
        *self += &rhs;
    }
}

impl<T> Sub<&DynamicBuffer<T>> for &DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Sub<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn sub(self, rhs: &DynamicBuffer<T>) -> DynamicBuffer<T> {
        self.zip_with(rhs, |a, b| a.clone() - b.clone())
    }
}

impl<T> Sub<&DynamicBuffer<T>> for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Sub<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn sub(self, rhs: &DynamicBuffer<T>) -> DynamicBuffer<T> {
        &self - rhs
    }
}

impl<T> SubAssign<&DynamicBuffer<T>> for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Sub<Output = T>,
{
    fn sub_assign(&mut self, rhs: &DynamicBuffer<T>) {
        let mut diff = &*self - rhs;
        self.swap(&mut diff);
    }
}

impl<T> SubAssign for DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Sub<Output = T>,
{
    fn sub_assign(&mut self, rhs: DynamicBuffer<T>) {
        *self -= &rhs;
    }
}

/// Dot product.
impl<T> Mul<&DynamicBuffer<T>> for &DynamicBuffer<T>
where
    T: Clone + Default + AddAssign + Mul<Output = T>,
{
    type Output = T;

    fn mul(self, rhs: &DynamicBuffer<T>) -> T {
        assert!(
            self.len() == rhs.len(),
            "Vectors have different sizes: {} and {}",
            self.len(),
            rhs.len()
        );
        self.dot_unchecked(rhs)
    }
}

impl<T> Neg for &DynamicBuffer<T>
where
    T: Clone + Neg<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn neg(self) -> DynamicBuffer<T> {
        transform::apply_scalar(self, &(), |x, _| -x.clone())
    }
}

impl<T> Neg for DynamicBuffer<T>
where
    T: Clone + Neg<Output = T>,
{
    type Output = DynamicBuffer<T>;

    fn neg(self) -> DynamicBuffer<T> {
        -&self
    }
}

impl<T: fmt::Display> fmt::Display for DynamicBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        Ok(())
    }
}

impl<T: FromStr> FromStr for DynamicBuffer<T> {
    type Err = ReadError;

    /// Every whitespace-separated token of `s` becomes one element.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = stream::parse_tokens(s, 0)?;
        Ok(Self::try_from(values)?)
    }
}

use crate::core::DynamicBuffer;
use crate::matrix::DynamicMatrix;

impl<'a, T> IntoIterator for &'a DynamicBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynamicBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_boxed_slice().into_vec().into_iter()
    }
}

/// Iterates over the rows of a matrix
impl<'a, T> IntoIterator for &'a DynamicMatrix<T> {
    type Item = &'a DynamicBuffer<T>;
    type IntoIter = std::slice::Iter<'a, DynamicBuffer<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the elements of a `DynamicMatrix`
///
/// This iterator implements `Clone`.
pub struct Elements<'a, T> {
    matrix: &'a DynamicMatrix<T>,
    row: usize,
    col: usize,
    remaining: usize,
}

impl<T> Clone for Elements<'_, T> {
    fn clone(&self) -> Self {
        Self {
            matrix: self.matrix,
            row: self.row,
            col: self.col,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Elements<'a, T> {
    pub(crate) fn new(matrix: &'a DynamicMatrix<T>) -> Self {
        Self {
            matrix,
            row: 0,
            col: 0,
            remaining: matrix.iter().map(DynamicBuffer::len).sum(),
        }
    }
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let matrix = self.matrix;
        while self.row < matrix.size() {
            let row = &matrix[self.row];
            if self.col < row.len() {
                let value = &row[self.col];
                self.col += 1;
                self.remaining -= 1;
                return Some(value);
            }
            self.row += 1;
            self.col = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Elements<'_, T> {}

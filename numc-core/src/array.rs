//! The leaf expression: an owned, row-major n-dimensional array.

use alloc::{vec, vec::Vec};
use core::slice;

use crate::{
    error::{EvalError, ShapeError},
    eval::Assign,
    expr::ArrayOp,
    shape::Shape,
    traits::NumTraits,
};

/// A dense n-dimensional array with contiguous row-major storage.
///
/// `&Array<T>` is the leaf of every expression tree. The array itself never takes part in
/// composition by value, so an expression always borrows the arrays it reads and cannot outlive
/// them.
///
/// # Invariant
///
/// `data.len() == shape.size()` at all times.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Array<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: NumTraits> Array<T> {
    /// Creates a zero-filled array.
    pub fn new(shape: Shape) -> Self {
        Self::zeros(shape)
    }

    /// Creates a zero-filled array.
    pub fn zeros(shape: Shape) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Creates an array filled with ones.
    pub fn ones(shape: Shape) -> Self {
        Self::from_elem(shape, T::one())
    }

    /// Creates a zero-filled array from a slice of extents.
    pub fn from_extents(extents: &[usize]) -> Result<Self, ShapeError> {
        Ok(Self::new(Shape::from_raw(extents)?))
    }
}

impl<T: Clone> Array<T> {
    /// Creates an array with every coefficient set to `elem`.
    pub fn from_elem(shape: Shape, elem: T) -> Self {
        Self {
            data: vec![elem; shape.size()],
            shape,
        }
    }
}

impl<T> Array<T> {
    /// Creates an array from row-major coefficients, checking that their number matches the shape.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, EvalError> {
        if data.len() != shape.size() {
            return Err(EvalError::LengthMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(unsafe { Self::from_vec_unchecked(shape, data) })
    }

    /// Creates an array from row-major coefficients without checking their number.
    ///
    /// # Safety
    ///
    /// caller must ensure `data.len() == shape.size()`
    pub unsafe fn from_vec_unchecked(shape: Shape, data: Vec<T>) -> Self {
        Self { shape, data }
    }

    /// Decomposes the array into its shape and row-major coefficients.
    pub fn into_raw(self) -> (Shape, Vec<T>) {
        (self.shape, self.data)
    }

    /// Shape of the array.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no coefficients.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major coefficients.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major coefficients.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over the coefficients in row-major order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Coefficient at a multi-index, or `None` if the index is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.shape.offset(index).map(|i| &self.data[i])
    }

    /// Mutable coefficient at a multi-index, or `None` if the index is out of bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.shape.offset(index).map(|i| &mut self.data[i])
    }

    /// Returns a task that evaluates `expr` into this array's storage.
    ///
    /// `expr` must have the same shape and element type as the array. Since the task holds the
    /// array mutably, `expr` cannot read the array it writes to.
    pub fn assign<E: ArrayOp<Scalar = T>>(&mut self, expr: E) -> Assign<'_, T, E> {
        Assign::new(self, expr)
    }
}

impl<T: NumTraits> From<Shape> for Array<T> {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Copy> ArrayOp for &Array<T> {
    type Scalar = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn coeff(&self, index: usize) -> T {
        self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use super::*;
    use crate::shape;

    #[test]
    fn constructors_own_a_matching_buffer() -> Result<(), anyhow::Error> {
        let a = Array::<f32>::new(shape![3, 4, 5]);
        assert_eq!(a.shape(), shape![3, 4, 5]);
        assert_eq!(a.len(), 60);
        assert!(a.iter().all(|&x| x == 0.0));

        let b: Array<i32> = Array::from_extents(&[2, 2])?;
        assert_eq!(b.shape(), shape![2, 2]);

        let c: Array<u8> = shape![4].into();
        assert_eq!(c.as_slice(), &[0, 0, 0, 0]);

        let d = Array::<f64>::ones(shape![2]);
        assert_eq!(d.as_slice(), &[1.0, 1.0]);

        let e = Array::<f64>::new(shape![]);
        assert_eq!(e.len(), 1);
        Ok(())
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Array::from_vec(shape![2, 3], vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            EvalError::LengthMismatch {
                shape: shape![2, 3],
                len: 3
            }
        );
    }

    #[test]
    fn multi_index_access_is_row_major() -> Result<(), anyhow::Error> {
        let mut a = Array::from_vec(shape![2, 3], vec![0, 1, 2, 3, 4, 5])?;
        assert_eq!(a.get(&[1, 0]), Some(&3));
        assert_eq!(a.get(&[0, 2]), Some(&2));
        assert_eq!(a.get(&[2, 0]), None);

        *a.get_mut(&[1, 2]).unwrap() = 50;
        assert_eq!(a.as_slice()[5], 50);
        Ok(())
    }

    #[test]
    fn too_many_extents_is_an_error() {
        assert!(Array::<f32>::from_extents(&[1; 9]).is_err());
    }
}

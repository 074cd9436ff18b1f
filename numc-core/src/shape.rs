//! Fixed-capacity shape of an n-dimensional array.

use core::{fmt, ops::Index};

use crate::error::ShapeError;

/// Maximum number of axes a `Shape` can hold.
pub const MAX_DIMS: usize = 8;

/// Extents of an n-dimensional array, with the total element count cached.
///
/// A shape is a plain value: it is built once, copied around, and never mutated. Unused trailing
/// slots of the backing storage are always zero, so derived equality and hashing only observe the
/// live extents.
///
/// A shape with zero axes has `size() == 1` (the empty product).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Shape {
    data: [usize; MAX_DIMS],
    dims: usize,
    size: usize,
}

/// Builds a `Shape` from a variadic list of extents.
///
/// ```
/// use numc_core::shape;
///
/// let s = shape![3, 4, 5];
/// assert_eq!(s.size(), 60);
/// assert_eq!(shape![].size(), 1);
/// ```
#[macro_export]
macro_rules! shape {
    ( $( $x:expr ),* $(,)? ) => {
        $crate::shape::Shape::new([$($x),*])
    };
}

impl Shape {
    /// Creates a shape from a fixed-size list of extents.
    ///
    /// # Panics
    ///
    /// Panics if `N > MAX_DIMS`, or if the product of the extents overflows `usize`. The
    /// `shape!` macro goes through this constructor and panics in the same cases.
    pub const fn new<const N: usize>(extents: [usize; N]) -> Self {
        assert!(N <= MAX_DIMS, "too many dimensions for Shape");
        let size = match checked_size(&extents) {
            Some(size) => size,
            None => panic!("shape size overflows usize"),
        };
        let mut data = [0; MAX_DIMS];
        let mut i = 0;
        while i < N {
            data[i] = extents[i];
            i += 1;
        }
        Self {
            data,
            dims: N,
            size,
        }
    }

    /// Creates a shape from a slice of extents, checking the capacity and the total size.
    pub fn from_raw(extents: &[usize]) -> Result<Self, ShapeError> {
        if extents.len() > MAX_DIMS {
            return Err(ShapeError::TooManyDims(extents.len()));
        }
        let size = checked_size(extents).ok_or(ShapeError::SizeOverflow)?;
        let mut data = [0; MAX_DIMS];
        data[..extents.len()].copy_from_slice(extents);
        Ok(Self {
            data,
            dims: extents.len(),
            size,
        })
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of axes.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Extent of axis `i`, or `None` if the shape has no such axis.
    pub fn get(&self, i: usize) -> Option<usize> {
        self.as_slice().get(i).copied()
    }

    /// The live extents.
    pub fn as_slice(&self) -> &[usize] {
        &self.data[..self.dims]
    }

    /// Iterates over the live extents.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.as_slice().iter().copied()
    }

    /// Row-major strides. Slots past `dims()` are zero.
    ///
    /// Strides of a shape with a zero extent saturate instead of overflowing; such a shape has no
    /// valid index.
    pub fn strides(&self) -> [usize; MAX_DIMS] {
        let mut strides = [0; MAX_DIMS];
        let mut acc: usize = 1;
        for i in (0..self.dims).rev() {
            strides[i] = acc;
            acc = acc.saturating_mul(self.data[i]);
        }
        strides
    }

    /// Linear row-major offset of a multi-index, or `None` if the index has the wrong number of
    /// axes or is out of bounds on any axis.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.dims || self.size == 0 {
            return None;
        }
        let strides = self.strides();
        index
            .iter()
            .zip(self.iter())
            .zip(strides.iter())
            .try_fold(0, |acc, ((&i, n), &s)| (i < n).then_some(acc + i * s))
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        assert!(
            i < self.dims,
            "axis {i} out of range for shape with {} dimensions",
            self.dims
        );
        &self.data[i]
    }
}

/// Product of the extents, or `None` if it overflows. Any zero extent makes the product zero.
const fn checked_size(extents: &[usize]) -> Option<usize> {
    let mut i = 0;
    while i < extents.len() {
        if extents[i] == 0 {
            return Some(0);
        }
        i += 1;
    }
    let mut size: usize = 1;
    i = 0;
    while i < extents.len() {
        size = match size.checked_mul(extents[i]) {
            Some(size) => size,
            None => return None,
        };
        i += 1;
    }
    Some(size)
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(extents: [usize; N]) -> Self {
        Self::new(extents)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = ShapeError;
    fn try_from(extents: &[usize]) -> Result<Self, Self::Error> {
        Self::from_raw(extents)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, n) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{n}")?;
        }
        write!(f, ")")
    }
}

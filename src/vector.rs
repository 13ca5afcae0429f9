use core::fmt;
use std::ops::{Add, AddAssign, Deref, Index, IndexMut, Mul, Sub};

use crate::error::{check_index, check_same_size, check_size, Error, Result};
use crate::MAX_VECTOR_SIZE;

/// Element type stored in vectors and matrices.
///
/// `T::default()` is the value a freshly constructed container is filled with,
/// and the starting point of every dot product.
pub trait Scalar:
    Copy + Default + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + AddAssign
{
}

impl<T> Scalar for T where
    T: Copy + Default + PartialEq + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + AddAssign
{
}

/// A vector whose length is fixed at construction and bounded by [`MAX_VECTOR_SIZE`].
///
/// Cloning allocates a fresh buffer; two vectors never share elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicVector<T> {
    data: Vec<T>,
}

/// Sum of the pairwise products of `a` and `b`.
pub fn dot_product<T: Scalar>(a: &DynamicVector<T>, b: &DynamicVector<T>) -> Result<T> {
    check_same_size(a.size(), b.size())?;

    let mut sum = T::default();
    for i in 0..a.size() {
        sum += a[i] * b[i];
    }

    Ok(sum)
}

impl<T> Deref for DynamicVector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T: Clone + Default> DynamicVector<T> {
    /// Creates a vector of `size` default elements.
    ///
    /// Fails with [`Error::InvalidSize`] unless `1 <= size <= MAX_VECTOR_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size, MAX_VECTOR_SIZE)?;
        log::trace!("new vector of size {size}");
        Ok(Self {
            data: vec![T::default(); size],
        })
    }

    /// Copies the first `length` elements of `source` into a new vector.
    ///
    /// A `source` shorter than `length` is reported as [`Error::SizeMismatch`].
    pub fn from_slice(source: &[T], length: usize) -> Result<Self> {
        check_size(length, MAX_VECTOR_SIZE)?;
        if source.len() < length {
            return Err(Error::SizeMismatch {
                left: source.len(),
                right: length,
            });
        }
        Ok(Self {
            data: source[..length].to_vec(),
        })
    }
}

impl<T> DynamicVector<T> {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the elements. The length stays fixed.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Checked access to element `index`.
    pub fn at(&self, index: usize) -> Result<&T> {
        check_index(index, self.size())?;
        Ok(&self.data[index])
    }

    /// Checked mutable access to element `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.size())?;
        Ok(&mut self.data[index])
    }
}

impl<T: Scalar> DynamicVector<T> {
    fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        check_same_size(self.size(), other.size())?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl<T: Clone + Default> Default for DynamicVector<T> {
    fn default() -> Self {
        Self {
            data: vec![T::default()],
        }
    }
}

impl<T> TryFrom<Vec<T>> for DynamicVector<T> {
    type Error = Error;

    fn try_from(data: Vec<T>) -> Result<Self> {
        check_size(data.len(), MAX_VECTOR_SIZE)?;
        Ok(Self { data })
    }
}

/// Unchecked access: no size validation beyond the panic of the underlying buffer.
impl<T> Index<usize> for DynamicVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DynamicVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: Scalar> Add<T> for &DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn add(self, rhs: T) -> Self::Output {
        self.map(|x| x + rhs)
    }
}

impl<T: Scalar> Sub<T> for &DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn sub(self, rhs: T) -> Self::Output {
        self.map(|x| x - rhs)
    }
}

impl<T: Scalar> Mul<T> for &DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|x| x * rhs)
    }
}

impl<T: Scalar> Add<T> for DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn add(mut self, rhs: T) -> Self::Output {
        self.data.iter_mut().for_each(|x| *x = *x + rhs);
        self
    }
}

impl<T: Scalar> Sub<T> for DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn sub(mut self, rhs: T) -> Self::Output {
        self.data.iter_mut().for_each(|x| *x = *x - rhs);
        self
    }
}

impl<T: Scalar> Mul<T> for DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn mul(mut self, rhs: T) -> Self::Output {
        self.data.iter_mut().for_each(|x| *x = *x * rhs);
        self
    }
}

impl<T: Scalar> Add<&DynamicVector<T>> for &DynamicVector<T> {
    type Output = Result<DynamicVector<T>>;

    fn add(self, rhs: &DynamicVector<T>) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Sub<&DynamicVector<T>> for &DynamicVector<T> {
    type Output = Result<DynamicVector<T>>;

    fn sub(self, rhs: &DynamicVector<T>) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

/// Dot product.
impl<T: Scalar> Mul<&DynamicVector<T>> for &DynamicVector<T> {
    type Output = Result<T>;

    fn mul(self, rhs: &DynamicVector<T>) -> Self::Output {
        dot_product(self, rhs)
    }
}

impl<T> fmt::Display for DynamicVector<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.data.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
fn vector_of(values: &[i32]) -> DynamicVector<i32> {
    DynamicVector::from_slice(values, values.len()).expect("valid test vector")
}

#[test]
fn test_create_vector_with_positive_length() {
    let v = DynamicVector::<i32>::new(5).unwrap();
    assert_eq!(v.size(), 5);
    assert!(v.iter().all(|&x| x == 0));
}

#[test]
fn test_cant_create_too_large_vector() {
    assert_eq!(
        DynamicVector::<i32>::new(MAX_VECTOR_SIZE + 1),
        Err(Error::InvalidSize {
            size: MAX_VECTOR_SIZE + 1,
            max: MAX_VECTOR_SIZE
        })
    );
}

#[test]
fn test_cant_create_vector_with_zero_length() {
    assert!(matches!(
        DynamicVector::<i32>::new(0),
        Err(Error::InvalidSize { size: 0, .. })
    ));
}

#[test]
fn test_default_vector_has_one_element() {
    let v = DynamicVector::<i32>::default();
    assert_eq!(v.size(), 1);
    assert_eq!(v[0], 0);
}

#[test]
fn test_convert_slice_to_vector() -> anyhow::Result<()> {
    let arr = [1, 2, 3];
    let v = DynamicVector::from_slice(&arr, 2)?;
    assert_eq!(v.size(), 2);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    Ok(())
}

#[test]
fn test_convert_short_slice_fails() {
    let arr = [1, 2];
    assert_eq!(
        DynamicVector::from_slice(&arr, 3),
        Err(Error::SizeMismatch { left: 2, right: 3 })
    );
    assert!(matches!(
        DynamicVector::from_slice(&arr, 0),
        Err(Error::InvalidSize { .. })
    ));
}

#[test]
fn test_try_from_vec() -> anyhow::Result<()> {
    let v = DynamicVector::try_from(vec![4, 5])?;
    assert_eq!(v.as_slice(), &[4, 5]);
    assert!(DynamicVector::<i32>::try_from(Vec::new()).is_err());
    Ok(())
}

#[test]
fn test_copied_vector_is_equal_to_source() -> anyhow::Result<()> {
    let mut v = DynamicVector::new(2)?;
    for i in 0..v.size() {
        v[i] = i as i32;
    }
    let v1 = v.clone();
    assert_eq!(v, v1);
    Ok(())
}

#[test]
fn test_copied_vector_has_its_own_memory() {
    let v = vector_of(&[0, 1]);
    let mut v1 = v.clone();
    for i in 0..v1.size() {
        v1[i] = i as i32 + 5;
    }
    assert_eq!(v[0], 0);
    assert_eq!(v[1], 1);
    assert_ne!(v1[0], 0);
    assert_ne!(v1[1], 1);
}

#[test]
fn test_set_and_get_element() -> anyhow::Result<()> {
    let mut v = DynamicVector::new(4)?;
    v[0] = 4;
    assert_eq!(v[0], 4);
    *v.at_mut(3)? = 7;
    assert_eq!(*v.at(3)?, 7);
    Ok(())
}

#[test]
fn test_at_rejects_too_large_index() {
    let mut v = DynamicVector::<i32>::new(5).unwrap();
    assert_eq!(v.at(5), Err(Error::IndexOutOfRange { index: 5, size: 5 }));
    assert!(v.at_mut(5).is_err());
    assert!(v.at_mut(usize::MAX).is_err());
    assert!(v.iter().all(|&x| x == 0));
}

#[test]
#[should_panic]
fn test_unchecked_index_out_of_range_panics() {
    let v = DynamicVector::<i32>::new(2).unwrap();
    let _x = v[2];
}

#[test]
fn test_assign_vector_to_itself() {
    let mut v = vector_of(&[0, 1]);
    v = v.clone();
    assert_eq!(v[0], 0);
    assert_eq!(v[1], 1);
}

#[test]
fn test_assign_changes_vector_size() -> anyhow::Result<()> {
    let v = vector_of(&[0, 1, 2, 3, 4]);
    let mut v1 = DynamicVector::new(10)?;
    v1.clone_from(&v);
    assert_eq!(v1.size(), 5);
    assert_eq!(v1, v);

    let mut v2 = vector_of(&[5, 6]);
    v2.clone_from(&v);
    assert_eq!(v2, v);
    Ok(())
}

#[test]
fn test_vectors_with_different_size_are_not_equal() {
    let v1 = vector_of(&[0, 1, 2, 3, 4]);
    let v2 = vector_of(&[0, 1]);
    assert!(v1 != v2);
    assert!(v1 == v1);
}

#[test]
fn test_scalar_operations() {
    let v = vector_of(&[1, 2]);
    assert_eq!(&v + 1, vector_of(&[2, 3]));
    assert_eq!(&v - 1, vector_of(&[0, 1]));
    assert_eq!(&v * 2, vector_of(&[2, 4]));
    assert_eq!(v * 0, vector_of(&[0, 0]));
}

#[test]
fn test_add_and_subtract_vectors() -> anyhow::Result<()> {
    let v1 = vector_of(&[0, 1]);
    let v2 = vector_of(&[1, 2]);
    assert_eq!((&v1 + &v2)?, vector_of(&[1, 3]));

    let v3 = vector_of(&[1, 4]);
    assert_eq!((&v3 - &v2)?, vector_of(&[0, 2]));
    Ok(())
}

#[test]
fn test_cant_combine_vectors_with_not_equal_size() {
    let v1 = vector_of(&[0, 1]);
    let v2 = vector_of(&[1, 2, 3, 4, 5]);
    let mismatch: Result<DynamicVector<i32>> = Err(Error::SizeMismatch { left: 2, right: 5 });
    assert_eq!(&v1 + &v2, mismatch.clone());
    assert_eq!(&v1 - &v2, mismatch);
    assert_eq!(&v1 * &v2, Err(Error::SizeMismatch { left: 2, right: 5 }));
}

#[test]
fn test_dot_product() -> anyhow::Result<()> {
    let v1 = vector_of(&[1, 2]);
    let v2 = vector_of(&[2, 3]);
    assert_eq!((&v1 * &v2)?, 8);
    assert_eq!(dot_product(&v2, &v1)?, 8);
    Ok(())
}

#[test]
fn test_vector_display() {
    assert_eq!(format!("{}", vector_of(&[1, 2, 3])), "{1 2 3}");
    assert_eq!(format!("{}", vector_of(&[7])), "{7}");
}

#[test]
fn test_random_copies_are_independent() -> anyhow::Result<()> {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..50 {
        let size = rng.random_range(1..64usize);
        let data: Vec<i64> = (0..size).map(|_| rng.random_range(-100..100)).collect();
        let original = DynamicVector::try_from(data)?;
        let mut copy = original.clone();
        assert_eq!(copy, original);

        let i = rng.random_range(0..size);
        *copy.at_mut(i)? += 1;
        assert_ne!(copy, original);
        assert_eq!(*original.at(i)? + 1, copy[i]);
        assert!(original.at(size).is_err());
    }
    Ok(())
}

#[test]
fn test_random_sizes_are_validated() {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..50 {
        let size = rng.random_range(0..128usize);
        let result = DynamicVector::<f64>::new(size);
        assert_eq!(result.is_ok(), size >= 1);
        if let Ok(v) = result {
            let other = DynamicVector::<f64>::new(size + 1).unwrap();
            assert!(v != other);
        }
    }
}

use core::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use crate::error::{check_index, check_same_size, check_size, Error, Result};
use crate::vector::{dot_product, DynamicVector, Scalar};
use crate::MAX_MATRIX_SIZE;

/// A square matrix stored as `size` row vectors of length `size`.
///
/// Row access through indexing hands out slices, so a row can be edited in
/// place but never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMatrix<T> {
    rows: Vec<DynamicVector<T>>,
}

/// Matrix product `a * b`.
///
/// Entry `(i, j)` is the dot product of row `i` of `a` with column `j` of `b`.
pub fn multiply<T: Scalar>(a: &DynamicMatrix<T>, b: &DynamicMatrix<T>) -> Result<DynamicMatrix<T>> {
    check_same_size(a.size(), b.size())?;
    log::trace!("multiplying {n}x{n} matrices", n = a.size());

    let mut result = DynamicMatrix::new(a.size())?;
    for j in 0..b.size() {
        let col = b.column(j)?;
        for i in 0..a.size() {
            result.rows[i][j] = dot_product(&a.rows[i], &col)?;
        }
    }
    Ok(result)
}

impl<T: Clone + Default> DynamicMatrix<T> {
    /// Creates a `size` x `size` matrix of default elements.
    ///
    /// Fails with [`Error::InvalidSize`] unless `1 <= size <= MAX_MATRIX_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size, MAX_MATRIX_SIZE)?;
        log::trace!("new {size}x{size} matrix");
        let rows = (0..size)
            .map(|_| DynamicVector::new(size))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Builds a matrix from its rows. Every row must be as long as there are rows.
    pub fn from_rows(rows: Vec<DynamicVector<T>>) -> Result<Self> {
        let size = rows.len();
        check_size(size, MAX_MATRIX_SIZE)?;
        if let Some(row) = rows.iter().find(|row| row.size() != size) {
            return Err(Error::SizeMismatch {
                left: row.size(),
                right: size,
            });
        }
        Ok(Self { rows })
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Result<DynamicVector<T>> {
        check_index(j, self.size())?;
        self.rows.iter().map(|row| row[j].clone()).collect::<Vec<_>>().try_into()
    }
}

impl<T> DynamicMatrix<T> {
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &DynamicVector<T>> {
        self.rows.iter()
    }

    /// Checked access to element `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> Result<&T> {
        check_index(i, self.size())?;
        self.rows[i].at(j)
    }

    /// Checked mutable access to element `(i, j)`.
    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        check_index(i, self.size())?;
        self.rows[i].at_mut(j)
    }
}

impl<T: Scalar> DynamicMatrix<T> {
    fn zip_rows(
        &self,
        other: &Self,
        f: impl Fn(&DynamicVector<T>, &DynamicVector<T>) -> Result<DynamicVector<T>>,
    ) -> Result<Self> {
        check_same_size(self.size(), other.size())?;
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }
}

impl<T: Clone + Default> Default for DynamicMatrix<T> {
    fn default() -> Self {
        Self {
            rows: vec![DynamicVector::default()],
        }
    }
}

/// Unchecked row access.
impl<T> Index<usize> for DynamicMatrix<T> {
    type Output = [T];

    fn index(&self, i: usize) -> &Self::Output {
        self.rows[i].as_slice()
    }
}

impl<T> IndexMut<usize> for DynamicMatrix<T> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        self.rows[i].as_mut_slice()
    }
}

impl<T: Scalar> Add<&DynamicMatrix<T>> for &DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn add(self, rhs: &DynamicMatrix<T>) -> Self::Output {
        self.zip_rows(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Sub<&DynamicMatrix<T>> for &DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn sub(self, rhs: &DynamicMatrix<T>) -> Self::Output {
        self.zip_rows(rhs, |a, b| a - b)
    }
}

impl<T: Scalar> Mul<T> for &DynamicMatrix<T> {
    type Output = DynamicMatrix<T>;

    fn mul(self, rhs: T) -> Self::Output {
        DynamicMatrix {
            rows: self.rows.iter().map(|row| row * rhs).collect(),
        }
    }
}

impl<T: Scalar> Mul<T> for DynamicMatrix<T> {
    type Output = DynamicMatrix<T>;

    fn mul(self, rhs: T) -> Self::Output {
        DynamicMatrix {
            rows: self.rows.into_iter().map(|row| row * rhs).collect(),
        }
    }
}

impl<T: Scalar> Mul<&DynamicVector<T>> for &DynamicMatrix<T> {
    type Output = Result<DynamicVector<T>>;

    fn mul(self, rhs: &DynamicVector<T>) -> Self::Output {
        check_same_size(self.size(), rhs.size())?;
        self.rows
            .iter()
            .map(|row| dot_product(row, rhs))
            .collect::<Result<Vec<_>>>()?
            .try_into()
    }
}

impl<T: Scalar> Mul<&DynamicMatrix<T>> for &DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn mul(self, rhs: &DynamicMatrix<T>) -> Self::Output {
        multiply(self, rhs)
    }
}

impl<T> fmt::Display for DynamicMatrix<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, row) in self.rows.iter().enumerate() {
            for (j, x) in row.iter().enumerate() {
                write!(f, "{}", x)?;
                if j != self.size() - 1 {
                    write!(f, " ")?;
                }
            }
            if i != self.size() - 1 {
                write!(f, ", ")?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
fn matrix_of<const N: usize>(values: [[i32; N]; N]) -> DynamicMatrix<i32> {
    let rows = values
        .iter()
        .map(|row| DynamicVector::try_from(row.to_vec()))
        .collect::<Result<Vec<_>>>()
        .expect("valid test rows");
    DynamicMatrix::from_rows(rows).expect("square test matrix")
}

#[cfg(test)]
fn sample() -> DynamicMatrix<i32> {
    matrix_of([[0, 1], [2, 3]])
}

#[test]
fn test_create_matrix_with_positive_length() -> anyhow::Result<()> {
    let m = DynamicMatrix::<i32>::new(5)?;
    assert_eq!(m.size(), 5);
    assert!(m.rows().all(|row| row.size() == 5 && row.iter().all(|&x| x == 0)));
    Ok(())
}

#[test]
fn test_cant_create_too_large_matrix() {
    assert_eq!(
        DynamicMatrix::<i32>::new(MAX_MATRIX_SIZE + 1),
        Err(Error::InvalidSize {
            size: MAX_MATRIX_SIZE + 1,
            max: MAX_MATRIX_SIZE
        })
    );
    assert!(DynamicMatrix::<i32>::new(0).is_err());
}

#[test]
fn test_from_rows_requires_square_input() -> anyhow::Result<()> {
    let rows = vec![
        DynamicVector::try_from(vec![1, 2])?,
        DynamicVector::try_from(vec![3, 4, 5])?,
    ];
    assert_eq!(
        DynamicMatrix::from_rows(rows),
        Err(Error::SizeMismatch { left: 3, right: 2 })
    );
    assert!(matches!(
        DynamicMatrix::<i32>::from_rows(Vec::new()),
        Err(Error::InvalidSize { size: 0, .. })
    ));
    Ok(())
}

#[test]
fn test_copied_matrix_is_equal_to_source() {
    let m = sample();
    let m1 = m.clone();
    assert!(m == m1);
}

#[test]
fn test_copied_matrix_has_its_own_memory() {
    let mut m = sample();
    let m1 = m.clone();
    m = m * 0;
    assert_eq!(m, matrix_of([[0, 0], [0, 0]]));
    assert_eq!(m1[0][0], 0);
    assert_eq!(m1[0][1], 1);
    assert_eq!(m1[1][0], 2);
    assert_eq!(m1[1][1], 3);
}

#[test]
fn test_set_and_get_element() -> anyhow::Result<()> {
    let mut m = DynamicMatrix::new(2)?;
    m[0][0] = 0;
    m[0][1] = 1;
    m[1][0] = 2;
    m[1][1] = 3;
    assert_eq!(m, sample());
    *m.at_mut(1, 0)? = 9;
    assert_eq!(*m.at(1, 0)?, 9);
    Ok(())
}

#[test]
fn test_at_rejects_too_large_index() {
    let mut m = sample();
    let big = MAX_MATRIX_SIZE + 1;
    assert_eq!(m.at(big, 0), Err(Error::IndexOutOfRange { index: big, size: 2 }));
    assert_eq!(m.at(0, big), Err(Error::IndexOutOfRange { index: big, size: 2 }));
    assert!(m.at_mut(big, big).is_err());
    assert!(m.at_mut(2, 0).is_err());
    assert!(m.at_mut(0, 2).is_err());
    assert_eq!(m, sample());
}

#[test]
#[should_panic]
fn test_unchecked_row_out_of_range_panics() {
    let m = sample();
    let _row = &m[2];
}

#[test]
fn test_assign_matrix_to_itself() {
    let mut m = sample();
    m = m.clone();
    assert_eq!(m, sample());
}

#[test]
fn test_assign_changes_matrix_size() -> anyhow::Result<()> {
    let m = sample();
    let mut m1 = DynamicMatrix::new(4)?;
    let mut m2 = DynamicMatrix::new(1)?;
    m1.clone_from(&m);
    m2.clone_from(&m);
    assert_eq!(m1.size(), 2);
    assert_eq!(m2.size(), 2);
    assert_eq!(m1, m);
    assert_eq!(m2, m);
    Ok(())
}

#[test]
fn test_matrices_with_different_size_are_not_equal() -> anyhow::Result<()> {
    let m = DynamicMatrix::<i32>::new(2)?;
    let m1 = DynamicMatrix::<i32>::new(5)?;
    assert!(m != m1);
    assert!(m == m);
    Ok(())
}

#[test]
fn test_add_and_subtract_matrices() -> anyhow::Result<()> {
    let m = sample();
    let m1 = m.clone();
    assert_eq!((&m + &m1)?, matrix_of([[0, 2], [4, 6]]));

    let doubled = &m1 * 2;
    assert_eq!((&doubled - &m)?, sample());
    Ok(())
}

#[test]
fn test_cant_combine_matrices_with_not_equal_size() -> anyhow::Result<()> {
    let m = DynamicMatrix::<i32>::new(2)?;
    let m1 = DynamicMatrix::<i32>::new(4)?;
    assert_eq!(&m + &m1, Err(Error::SizeMismatch { left: 2, right: 4 }));
    assert_eq!(&m - &m1, Err(Error::SizeMismatch { left: 2, right: 4 }));
    assert_eq!(&m * &m1, Err(Error::SizeMismatch { left: 2, right: 4 }));
    Ok(())
}

#[test]
fn test_multiply_matrix_by_vector() -> anyhow::Result<()> {
    let m = matrix_of([[1, 2], [0, 3]]);
    let v = DynamicVector::try_from(vec![1, 2])?;
    assert_eq!((&m * &v)?.as_slice(), &[5, 6]);

    let short = DynamicVector::try_from(vec![1, 2, 3])?;
    assert_eq!(&m * &short, Err(Error::SizeMismatch { left: 2, right: 3 }));
    Ok(())
}

#[test]
fn test_multiply_matrices() -> anyhow::Result<()> {
    let m1 = matrix_of([[1, 2], [0, 3]]);
    let m2 = matrix_of([[2, 3], [0, 4]]);
    assert_eq!((&m1 * &m2)?, matrix_of([[2, 11], [0, 12]]));

    let a = matrix_of([[1, 2], [3, 4]]);
    let c = multiply(&a, &a)?;
    assert_eq!(c, matrix_of([[7, 10], [15, 22]]));
    Ok(())
}

#[test]
fn test_matrix_display() -> anyhow::Result<()> {
    let a = matrix_of([[1, 2], [3, 4]]);
    let c = (&a * &a)?;
    assert_eq!(format!("{}", c), "{7 10, 15 22}");
    assert_eq!(format!("{}", DynamicMatrix::<i32>::default()), "{0}");
    Ok(())
}

#[test]
fn test_column() -> anyhow::Result<()> {
    let m = sample();
    assert_eq!(m.column(1)?.as_slice(), &[1, 3]);
    assert_eq!(m.column(2), Err(Error::IndexOutOfRange { index: 2, size: 2 }));
    Ok(())
}

#[test]
fn test_random_product_matches_triple_sum() -> anyhow::Result<()> {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..20 {
        let n = rng.random_range(1..8usize);
        let mut a = DynamicMatrix::<i64>::new(n)?;
        let mut b = DynamicMatrix::<i64>::new(n)?;
        for i in 0..n {
            for j in 0..n {
                a[i][j] = rng.random_range(-10..10);
                b[i][j] = rng.random_range(-10..10);
            }
        }

        let c = (&a * &b)?;
        for i in 0..n {
            for j in 0..n {
                let expected: i64 = (0..n).map(|k| a[i][k] * b[k][j]).sum();
                assert_eq!(*c.at(i, j)?, expected);
            }
        }

        let copy = a.clone();
        a[0][0] += 1;
        assert_ne!(a, copy);
    }
    Ok(())
}

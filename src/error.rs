use thiserror::Error;

/// Errors raised by the checked operations of vectors and matrices.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested size is zero or above the configured maximum.
    #[error("invalid size {size}: must be in 1..={max}")]
    InvalidSize { size: usize, max: usize },

    /// Checked accessor called with an index outside `[0, size)`.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Operands of a binary operator have incompatible sizes.
    #[error("size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_size(size: usize, max: usize) -> Result<()> {
    if size == 0 || size > max {
        log::debug!("rejected size {size} (max {max})");
        return Err(Error::InvalidSize { size, max });
    }
    Ok(())
}

pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
    if index >= size {
        return Err(Error::IndexOutOfRange { index, size });
    }
    Ok(())
}

pub(crate) fn check_same_size(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::SizeMismatch { left, right });
    }
    Ok(())
}

#[test]
fn test_size_bounds() {
    assert!(check_size(1, 4).is_ok());
    assert!(check_size(4, 4).is_ok());
    assert_eq!(check_size(0, 4), Err(Error::InvalidSize { size: 0, max: 4 }));
    assert_eq!(check_size(5, 4), Err(Error::InvalidSize { size: 5, max: 4 }));
}

#[test]
fn test_error_messages() {
    let e = Error::IndexOutOfRange { index: 5, size: 5 };
    assert_eq!(e.to_string(), "index 5 out of range for size 5");
    let e = Error::SizeMismatch { left: 2, right: 3 };
    assert_eq!(e.to_string(), "size mismatch: 2 vs 3");
    let e = Error::InvalidSize { size: 0, max: 10 };
    assert_eq!(e.to_string(), "invalid size 0: must be in 1..=10");
}

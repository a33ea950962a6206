use thiserror::Error;

/// Errors reported by the checked entry points of [`SimpleVec`](crate::SimpleVec)
/// and [`OwnedArray`](crate::OwnedArray).
///
/// Contract violations (unchecked indexing, erasing past the end, popping an
/// empty vector) are not represented here: they panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// `at`/`at_mut` was called with `index >= len`.
  #[error("index {index} is out of range for length {len}")]
  OutOfRange { index: usize, len: usize },

  /// The C allocator could not provide the requested block.
  #[error("failed to allocate {capacity} elements of {elem_size} bytes")]
  AllocationFailed { capacity: usize, elem_size: usize },

  /// The requested element count does not fit in `isize::MAX` bytes.
  #[error("capacity overflow: {requested} elements")]
  CapacityOverflow { requested: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Capacity to pre-allocate when building a [`SimpleVec`](crate::SimpleVec),
/// without giving it any elements.
///
/// ```rust
/// use simplevec::{ReserveHint, SimpleVec};
///
/// let v: SimpleVec<i32> = SimpleVec::from_hint(ReserveHint::new(10));
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReserveHint {
  capacity: usize,
}

impl ReserveHint {
  pub const fn new(capacity: usize) -> Self {
    Self { capacity }
  }

  pub const fn capacity(self) -> usize {
    self.capacity
  }
}

impl From<usize> for ReserveHint {
  fn from(capacity: usize) -> Self {
    Self::new(capacity)
  }
}

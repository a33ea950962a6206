//! Layout arithmetic for element arrays handed to the C allocator.

use std::{alloc::Layout, mem};

use crate::error::{Error, Result};

/// Rounds `value` up to the next multiple of the machine word.
///
/// `posix_memalign` only accepts alignments that are a power of two *and* a
/// multiple of `size_of::<*mut c_void>()`; rounding an element alignment up
/// to the word satisfies both.
///
/// # Examples
///
/// ```rust
/// use simplevec::word_align;
///
/// match std::mem::size_of::<usize>() {
///     8 => assert_eq!(word_align!(2), 8),   // 64 bit machine.
///     4 => assert_eq!(word_align!(2), 4),   // 32 bit machine.
///     _ => {},
/// };
/// assert_eq!(word_align!(64), 64);
/// ```
#[macro_export]
macro_rules! word_align {
  ($value:expr) => {
    ($value + ::std::mem::size_of::<usize>() - 1) & !(::std::mem::size_of::<usize>() - 1)
  };
}

/// Layout of `len` contiguous `T`s, or `CapacityOverflow` if the byte size
/// does not fit in `isize::MAX`.
pub(crate) fn array_layout<T>(len: usize) -> Result<Layout> {
  Layout::array::<T>(len).map_err(|_| Error::CapacityOverflow { requested: len })
}

/// Alignment to request from `posix_memalign` for an array of `T`.
pub(crate) fn c_alignment<T>() -> usize {
  word_align!(mem::align_of::<T>())
}

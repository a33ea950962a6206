use std::{
  alloc, fmt,
  marker::PhantomData,
  mem,
  ops::{Index, IndexMut},
  ptr::{self, NonNull},
  slice,
};

use libc::{c_void, free, posix_memalign};
use log::trace;

use crate::{
  error::{Error, Result},
  layout::{array_layout, c_alignment},
};

fn allocate<T>(len: usize) -> Result<NonNull<T>> {
  let layout = array_layout::<T>(len)?;

  if layout.size() == 0 {
    return Ok(NonNull::dangling());
  }

  let mut raw: *mut c_void = ptr::null_mut();
  let rc = unsafe { posix_memalign(&mut raw, c_alignment::<T>(), layout.size()) };

  if rc != 0 || raw.is_null() {
    return Err(Error::AllocationFailed {
      capacity: len,
      elem_size: mem::size_of::<T>(),
    });
  }

  trace!("allocated {} x {} bytes at {:?}", len, mem::size_of::<T>(), raw);

  // SAFETY: checked non-null above.
  Ok(unsafe { NonNull::new_unchecked(raw as *mut T) })
}

unsafe fn deallocate<T>(
  ptr: NonNull<T>,
  len: usize,
) {
  if mem::size_of::<T>() == 0 {
    return;
  }

  trace!("freeing {} x {} bytes at {:?}", len, mem::size_of::<T>(), ptr);

  unsafe { free(ptr.as_ptr() as *mut c_void) };
}

/// Diverges on an allocation error from an infallible entry point, the same
/// way the standard collections do.
pub(crate) fn alloc_failure<T>(
  len: usize,
  err: Error,
) -> ! {
  match (&err, array_layout::<T>(len)) {
    (Error::AllocationFailed { .. }, Ok(layout)) => alloc::handle_alloc_error(layout),
    _ => panic!("{err}"),
  }
}

/// Drops the filled prefix and frees the block if `T::default()` panics
/// half way through a fill.
struct FillGuard<T> {
  ptr: NonNull<T>,
  filled: usize,
  len: usize,
}

impl<T> Drop for FillGuard<T> {
  fn drop(&mut self) {
    unsafe {
      ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.filled));
      deallocate(self.ptr, self.len);
    }
  }
}

/// Sole owner of one contiguous, fully initialised block of `T`s obtained
/// from the C allocator.
///
/// A length of zero is represented by owning nothing at all: no block is
/// requested and [`is_allocated`](Self::is_allocated) reports `false`.
/// The type is move-only; ownership leaves it through a Rust move,
/// [`take`](Self::take) or [`release`](Self::release).
pub struct OwnedArray<T> {
  ptr: Option<NonNull<T>>,
  len: usize,
  _owns: PhantomData<T>,
}

unsafe impl<T: Send> Send for OwnedArray<T> {}
unsafe impl<T: Sync> Sync for OwnedArray<T> {}

impl<T> OwnedArray<T> {
  /// An array that owns nothing.
  pub const fn empty() -> Self {
    Self {
      ptr: None,
      len: 0,
      _owns: PhantomData,
    }
  }

  /// Allocates `len` slots, each holding `T::default()`.
  ///
  /// # Panics
  ///
  /// Panics if the byte size overflows and aborts through
  /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the allocator
  /// refuses the request. See [`try_new`](Self::try_new).
  pub fn new(len: usize) -> Self
  where
    T: Default,
  {
    Self::try_new(len).unwrap_or_else(|err| alloc_failure::<T>(len, err))
  }

  pub fn try_new(len: usize) -> Result<Self>
  where
    T: Default,
  {
    if len == 0 {
      return Ok(Self::empty());
    }

    let ptr = allocate::<T>(len)?;
    let mut guard = FillGuard { ptr, filled: 0, len };

    while guard.filled < len {
      unsafe { ptr.as_ptr().add(guard.filled).write(T::default()) };
      guard.filled += 1;
    }

    mem::forget(guard);

    Ok(Self {
      ptr: Some(ptr),
      len,
      _owns: PhantomData,
    })
  }

  /// Adopts a block previously handed out by [`release`](Self::release).
  /// A null `ptr` yields the empty array.
  ///
  /// # Safety
  ///
  /// `ptr` and `len` must be exactly a pair returned by `release`, and the
  /// caller must not touch the block through `ptr` afterwards.
  pub unsafe fn from_raw_parts(
    ptr: *mut T,
    len: usize,
  ) -> Self {
    match NonNull::new(ptr) {
      Some(ptr) => Self {
        ptr: Some(ptr),
        len,
        _owns: PhantomData,
      },
      None => Self::empty(),
    }
  }

  /// Gives up ownership without dropping anything and leaves `self` empty.
  ///
  /// The returned block must come back through
  /// [`from_raw_parts`](Self::from_raw_parts) to be freed. A second call
  /// returns `(null, 0)`.
  #[must_use = "the released block leaks unless it is adopted again"]
  pub fn release(&mut self) -> (*mut T, usize) {
    let len = mem::replace(&mut self.len, 0);

    match self.ptr.take() {
      Some(ptr) => (ptr.as_ptr(), len),
      None => (ptr::null_mut(), 0),
    }
  }

  /// Moves ownership out, leaving `self` empty.
  pub fn take(&mut self) -> Self {
    mem::take(self)
  }

  pub fn swap(
    &mut self,
    other: &mut Self,
  ) {
    mem::swap(self, other);
  }

  /// `true` while a block is owned.
  #[inline]
  pub fn is_allocated(&self) -> bool {
    self.ptr.is_some()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Start of the owned block, null when nothing is owned.
  #[inline]
  pub fn as_ptr(&self) -> *const T {
    self.ptr.map_or(ptr::null(), |ptr| ptr.as_ptr() as *const T)
  }

  #[inline]
  pub fn as_mut_ptr(&mut self) -> *mut T {
    self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
  }

  #[inline]
  pub fn as_slice(&self) -> &[T] {
    match self.ptr {
      Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
      None => &[],
    }
  }

  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [T] {
    match self.ptr {
      Some(ptr) => unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.len) },
      None => &mut [],
    }
  }

  /// # Safety
  ///
  /// `index < self.len()`.
  #[inline]
  pub unsafe fn get_unchecked(
    &self,
    index: usize,
  ) -> &T {
    debug_assert!(index < self.len);
    unsafe { &*self.as_ptr().add(index) }
  }

  /// # Safety
  ///
  /// `index < self.len()`.
  #[inline]
  pub unsafe fn get_unchecked_mut(
    &mut self,
    index: usize,
  ) -> &mut T {
    debug_assert!(index < self.len);
    unsafe { &mut *self.as_mut_ptr().add(index) }
  }
}

impl<T> Default for OwnedArray<T> {
  fn default() -> Self {
    Self::empty()
  }
}

impl<T> Drop for OwnedArray<T> {
  fn drop(&mut self) {
    if let Some(ptr) = self.ptr.take() {
      unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), self.len));
        deallocate(ptr, self.len);
      }
    }
  }
}

impl<T> Index<usize> for OwnedArray<T> {
  type Output = T;

  #[inline]
  fn index(
    &self,
    index: usize,
  ) -> &T {
    &self.as_slice()[index]
  }
}

impl<T> IndexMut<usize> for OwnedArray<T> {
  #[inline]
  fn index_mut(
    &mut self,
    index: usize,
  ) -> &mut T {
    &mut self.as_mut_slice()[index]
  }
}

impl<T: fmt::Debug> fmt::Debug for OwnedArray<T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_list().entries(self.as_slice()).finish()
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
  };

  use super::*;

  /// Counts how many times values sharing a counter have been dropped.
  #[derive(Debug, Default, Clone)]
  pub(crate) struct DropCounter(pub(crate) Rc<Cell<usize>>);

  impl Drop for DropCounter {
    fn drop(&mut self) {
      self.0.set(self.0.get() + 1);
    }
  }

  #[test]
  fn test_new_default_fills() {
    let array = OwnedArray::<u64>::new(6);

    assert!(array.is_allocated());
    assert_eq!(array.len(), 6);
    assert_eq!(array.as_slice(), &[0; 6]);
  }

  #[test]
  fn test_zero_len_owns_nothing() {
    let mut array = OwnedArray::<String>::new(0);

    assert!(!array.is_allocated());
    assert!(array.as_ptr().is_null());
    assert!(array.as_slice().is_empty());
    assert_eq!(array.release(), (ptr::null_mut(), 0));
  }

  #[test]
  fn test_index_read_write() {
    let mut array = OwnedArray::<u16>::new(4);

    for i in 0..4 {
      array[i] = (i + 1) as u16;
    }

    assert_eq!(array[0], 1);
    assert_eq!(array[3], 4);
    assert_eq!(unsafe { *array.get_unchecked(2) }, 3);

    unsafe { *array.get_unchecked_mut(1) = 20 };
    assert_eq!(array.as_slice(), &[1, 20, 3, 4]);
  }

  #[test]
  #[should_panic]
  fn test_index_past_end_panics() {
    let array = OwnedArray::<u8>::new(2);
    let _ = array[2];
  }

  #[test]
  fn test_release_then_adopt() {
    let mut array = OwnedArray::<u32>::new(3);
    array[1] = 7;

    let (raw, len) = array.release();
    assert!(!raw.is_null());
    assert_eq!(len, 3);
    assert!(!array.is_allocated());

    // Releasing twice must not hand the block out again.
    assert_eq!(array.release(), (ptr::null_mut(), 0));

    let adopted = unsafe { OwnedArray::from_raw_parts(raw, len) };
    assert!(adopted.is_allocated());
    assert_eq!(adopted.as_slice(), &[0, 7, 0]);
  }

  #[test]
  fn test_adopt_null_is_empty() {
    let array = unsafe { OwnedArray::<u32>::from_raw_parts(ptr::null_mut(), 0) };
    assert!(!array.is_allocated());
  }

  #[test]
  fn test_take_and_swap() {
    let mut a = OwnedArray::<u8>::new(2);
    let mut b = OwnedArray::<u8>::new(5);
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    a.swap(&mut b);
    assert_eq!(a.as_ptr(), b_ptr);
    assert_eq!(b.as_ptr(), a_ptr);
    assert_eq!((a.len(), b.len()), (5, 2));

    let moved = a.take();
    assert_eq!(moved.as_ptr(), b_ptr);
    assert!(!a.is_allocated());
    assert_eq!(a.len(), 0);
  }

  #[test]
  fn test_drops_every_slot_once() {
    let drops = Rc::new(Cell::new(0));

    {
      let mut array = OwnedArray::<DropCounter>::new(4);
      for slot in array.as_mut_slice() {
        *slot = DropCounter(drops.clone());
      }
      // Overwriting above drops the four defaults, which count nothing shared.
      assert_eq!(drops.get(), 0);
    }

    assert_eq!(drops.get(), 4);
  }

  #[test]
  fn test_released_block_is_not_dropped() {
    let drops = Rc::new(Cell::new(0));
    let mut array = OwnedArray::<DropCounter>::new(2);
    array[0] = DropCounter(drops.clone());

    let (raw, len) = array.release();
    drop(array);
    assert_eq!(drops.get(), 0);

    drop(unsafe { OwnedArray::from_raw_parts(raw, len) });
    assert_eq!(drops.get(), 1);
  }

  #[test]
  fn test_over_aligned_elements() {
    #[derive(Default)]
    #[repr(align(64))]
    struct Line(#[allow(dead_code)] u8);

    let array = OwnedArray::<Line>::new(3);
    assert_eq!(array.as_ptr() as usize % 64, 0);
  }

  #[test]
  fn test_zero_sized_elements() {
    let mut array = OwnedArray::<()>::new(10);

    assert!(array.is_allocated());
    assert_eq!(array.len(), 10);
    array[9] = ();
  }

  #[test]
  fn test_panicking_default_drops_filled_prefix() {
    thread_local! {
      static BUILT: Cell<usize> = const { Cell::new(0) };
      static DROPPED: Cell<usize> = const { Cell::new(0) };
    }

    struct Fragile;

    impl Default for Fragile {
      fn default() -> Self {
        let built = BUILT.with(|b| {
          b.set(b.get() + 1);
          b.get()
        });
        if built == 3 {
          panic!("third default fails");
        }
        Fragile
      }
    }

    impl Drop for Fragile {
      fn drop(&mut self) {
        DROPPED.with(|d| d.set(d.get() + 1));
      }
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| OwnedArray::<Fragile>::new(5)));

    assert!(result.is_err());
    assert_eq!(DROPPED.with(Cell::get), 2);
  }

  #[test]
  fn test_try_new_overflow() {
    let err = OwnedArray::<u64>::try_new(usize::MAX).unwrap_err();
    assert_eq!(err, Error::CapacityOverflow { requested: usize::MAX });
  }

  #[test]
  fn test_debug() {
    let mut array = OwnedArray::<i32>::new(2);
    array[1] = -1;
    assert_eq!(format!("{array:?}"), "[0, -1]");
  }
}

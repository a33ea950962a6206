use std::{
  borrow::Borrow,
  cmp::{self, Ordering},
  fmt,
  hash::{Hash, Hasher},
  mem,
  ops::{Deref, DerefMut, Index, IndexMut},
  slice,
};

use log::debug;

use crate::{
  buffer::{OwnedArray, alloc_failure},
  error::{Error, Result},
  hint::ReserveHint,
};

/// A growable array backed by an [`OwnedArray`].
///
/// The first [`len`](Self::len) slots of the buffer are the elements; the
/// remaining slots up to [`capacity`](Self::capacity) are scratch space that
/// always holds a valid (default or stale) `T`. Positions are plain indices:
/// [`begin`](Self::begin) is `0` and [`end`](Self::end) is `len()`.
///
/// Growth follows two distinct rules:
///
/// ```text
///   push_back on a full vector   -> resize(len + 1) -> capacity 2 * (len + 1)
///   insert on a full vector      -> capacity max(2 * len, 1)
///   resize(n) with n > len       -> capacity 2 * n
///   reserve(n) with n > capacity -> capacity n
/// ```
///
/// Any reallocation invalidates references and positions taken before it.
pub struct SimpleVec<T> {
  buf: OwnedArray<T>,
  len: usize,
}

impl<T> SimpleVec<T> {
  /// An empty vector with no allocation.
  pub const fn new() -> Self {
    Self {
      buf: OwnedArray::empty(),
      len: 0,
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Position of the first element.
  #[inline]
  pub fn begin(&self) -> usize {
    0
  }

  /// Position one past the last element.
  #[inline]
  pub fn end(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.buf.as_slice()[..self.len]
  }

  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [T] {
    let len = self.len;
    &mut self.buf.as_mut_slice()[..len]
  }

  pub fn iter(&self) -> slice::Iter<'_, T> {
    self.as_slice().iter()
  }

  pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
    self.as_mut_slice().iter_mut()
  }

  /// Checked access.
  ///
  /// # Errors
  ///
  /// [`Error::OutOfRange`] if `index >= len()`.
  pub fn at(
    &self,
    index: usize,
  ) -> Result<&T> {
    if index >= self.len {
      return Err(Error::OutOfRange {
        index,
        len: self.len,
      });
    }
    Ok(&self.buf[index])
  }

  /// Checked mutable access, see [`at`](Self::at).
  pub fn at_mut(
    &mut self,
    index: usize,
  ) -> Result<&mut T> {
    if index >= self.len {
      return Err(Error::OutOfRange {
        index,
        len: self.len,
      });
    }
    Ok(&mut self.buf[index])
  }

  /// Access with no check at all.
  ///
  /// # Safety
  ///
  /// `index < self.len()`.
  #[inline]
  pub unsafe fn get_unchecked(
    &self,
    index: usize,
  ) -> &T {
    debug_assert!(index < self.len);
    unsafe { self.buf.get_unchecked(index) }
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
    unsafe { self.buf.get_unchecked_mut(index) }
  }

  /// Removes the element at `pos`, shifting the tail left by one.
  ///
  /// Returns the position now holding the element that followed the erased
  /// one, which is `end()` when the last element was erased. Capacity is
  /// kept; the erased value lingers in the scratch area until overwritten.
  ///
  /// # Panics
  ///
  /// Panics if `pos >= len()`.
  pub fn erase(
    &mut self,
    pos: usize,
  ) -> usize {
    assert!(pos < self.len, "erase position {pos} out of range for length {}", self.len);

    self.buf.as_mut_slice()[pos..self.len].rotate_left(1);
    self.len -= 1;
    pos
  }

  /// Forgets the last element. Capacity is kept.
  ///
  /// # Panics
  ///
  /// Panics if the vector is empty.
  pub fn pop_back(&mut self) {
    assert!(!self.is_empty(), "pop_back on an empty SimpleVec");
    self.len -= 1;
  }

  /// Sets the length to zero. Capacity and the stored values are kept.
  pub fn clear(&mut self) {
    self.len = 0;
  }

  pub fn swap(
    &mut self,
    other: &mut Self,
  ) {
    self.buf.swap(&mut other.buf);
    mem::swap(&mut self.len, &mut other.len);
  }

  /// Moves the contents out, leaving `self` with no elements and no capacity.
  pub fn take(&mut self) -> Self {
    mem::take(self)
  }
}

impl<T: Default> SimpleVec<T> {
  /// `len` default values, capacity `len`.
  pub fn with_len(len: usize) -> Self {
    Self {
      buf: OwnedArray::new(len),
      len,
    }
  }

  /// No elements, capacity exactly `capacity`.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buf: OwnedArray::new(capacity),
      len: 0,
    }
  }

  pub fn from_hint(hint: ReserveHint) -> Self {
    Self::with_capacity(hint.capacity())
  }

  /// `len` clones of `value`, capacity `len`.
  pub fn from_elem(
    len: usize,
    value: T,
  ) -> Self
  where
    T: Clone,
  {
    let mut v = Self::with_len(len);
    v.as_mut_slice().fill(value);
    v
  }

  /// Appends `value`, growing through [`resize`](Self::resize) when full.
  pub fn push_back(
    &mut self,
    value: T,
  ) {
    if self.len < self.capacity() {
      self.len += 1;
    } else {
      self.resize(self.len + 1);
    }

    let last = self.len - 1;
    self.buf[last] = value;
  }

  /// Inserts `value` before `pos` and returns the position it landed at.
  ///
  /// `pos == end()` appends. A full vector is moved into a new buffer of
  /// capacity `max(2 * len, 1)`; otherwise the tail is shifted right in
  /// place.
  ///
  /// # Panics
  ///
  /// Panics if `pos > len()`.
  pub fn insert(
    &mut self,
    pos: usize,
    value: T,
  ) -> usize {
    assert!(pos <= self.len, "insert position {pos} past the end of length {}", self.len);

    let len = self.len;

    if len == self.capacity() {
      let new_capacity = cmp::max(len.saturating_mul(2), 1);
      let mut fresh = OwnedArray::new(new_capacity);
      let old = self.buf.as_mut_slice();

      fresh.as_mut_slice()[..pos].swap_with_slice(&mut old[..pos]);
      fresh[pos] = value;
      fresh.as_mut_slice()[pos + 1..=len].swap_with_slice(&mut old[pos..len]);

      debug!("insert grew capacity {} -> {}", len, new_capacity);
      self.buf = fresh;
    } else {
      let shifted = &mut self.buf.as_mut_slice()[pos..=len];
      shifted.rotate_right(1);
      shifted[0] = value;
    }

    self.len += 1;
    pos
  }

  /// Sets the length to `new_size`.
  ///
  /// Growing always moves into a fresh buffer of capacity `2 * new_size`,
  /// so every new slot holds `T::default()`. Shrinking only lowers the
  /// length.
  pub fn resize(
    &mut self,
    new_size: usize,
  ) {
    if let Err(err) = self.try_resize(new_size) {
      alloc_failure::<T>(new_size.saturating_mul(2), err);
    }
  }

  /// Fallible [`resize`](Self::resize); on error the vector is unchanged.
  pub fn try_resize(
    &mut self,
    new_size: usize,
  ) -> Result<()> {
    if new_size > self.len {
      let new_capacity = new_size
        .checked_mul(2)
        .ok_or(Error::CapacityOverflow { requested: new_size })?;
      self.relocate(new_capacity, "resize")?;
    }

    self.len = new_size;
    Ok(())
  }

  /// Grows capacity to exactly `new_capacity` if it is larger than the
  /// current one; otherwise does nothing. The length is unchanged.
  pub fn reserve(
    &mut self,
    new_capacity: usize,
  ) {
    if let Err(err) = self.try_reserve(new_capacity) {
      alloc_failure::<T>(new_capacity, err);
    }
  }

  /// Fallible [`reserve`](Self::reserve); on error the vector is unchanged.
  pub fn try_reserve(
    &mut self,
    new_capacity: usize,
  ) -> Result<()> {
    if new_capacity > self.capacity() {
      self.relocate(new_capacity, "reserve")?;
    }
    Ok(())
  }

  /// Moves the elements into a fully built buffer of `new_capacity` slots.
  /// The old buffer is only replaced once the new one exists.
  fn relocate(
    &mut self,
    new_capacity: usize,
    reason: &str,
  ) -> Result<()> {
    debug_assert!(new_capacity >= self.len);

    let mut fresh = OwnedArray::try_new(new_capacity)?;
    let len = self.len;
    fresh.as_mut_slice()[..len].swap_with_slice(&mut self.buf.as_mut_slice()[..len]);

    debug!("{} grew capacity {} -> {}", reason, self.capacity(), new_capacity);
    self.buf = fresh;
    Ok(())
  }
}

impl<T> Default for SimpleVec<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone + Default> Clone for SimpleVec<T> {
  fn clone(&self) -> Self {
    let mut copy = Self::with_len(self.len);
    copy.as_mut_slice().clone_from_slice(self.as_slice());
    copy
  }
}

impl<T> Deref for SimpleVec<T> {
  type Target = [T];

  #[inline]
  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> DerefMut for SimpleVec<T> {
  #[inline]
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T> AsRef<[T]> for SimpleVec<T> {
  fn as_ref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> Borrow<[T]> for SimpleVec<T> {
  fn borrow(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> Index<usize> for SimpleVec<T> {
  type Output = T;

  /// Unchecked in spirit: `index < len()` is the caller's job. A violation
  /// panics instead of reading scratch slots.
  #[inline]
  fn index(
    &self,
    index: usize,
  ) -> &T {
    &self.as_slice()[index]
  }
}

impl<T> IndexMut<usize> for SimpleVec<T> {
  #[inline]
  fn index_mut(
    &mut self,
    index: usize,
  ) -> &mut T {
    &mut self.as_mut_slice()[index]
  }
}

impl<T: Default, const N: usize> From<[T; N]> for SimpleVec<T> {
  fn from(values: [T; N]) -> Self {
    let mut v = Self::with_len(N);
    for (slot, value) in v.iter_mut().zip(values) {
      *slot = value;
    }
    v
  }
}

impl<T: Default> From<Vec<T>> for SimpleVec<T> {
  fn from(values: Vec<T>) -> Self {
    let mut v = Self::with_len(values.len());
    for (slot, value) in v.iter_mut().zip(values) {
      *slot = value;
    }
    v
  }
}

impl<T: Default> From<ReserveHint> for SimpleVec<T> {
  fn from(hint: ReserveHint) -> Self {
    Self::from_hint(hint)
  }
}

impl<T: Default> FromIterator<T> for SimpleVec<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Vec<T>>())
  }
}

impl<T: Default> Extend<T> for SimpleVec<T> {
  fn extend<I: IntoIterator<Item = T>>(
    &mut self,
    iter: I,
  ) {
    for value in iter {
      self.push_back(value);
    }
  }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

impl<T: PartialEq> PartialEq for SimpleVec<T> {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: Eq> Eq for SimpleVec<T> {}

impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
  fn partial_cmp(
    &self,
    other: &Self,
  ) -> Option<Ordering> {
    self.as_slice().partial_cmp(other.as_slice())
  }
}

impl<T: Ord> Ord for SimpleVec<T> {
  fn cmp(
    &self,
    other: &Self,
  ) -> Ordering {
    self.as_slice().cmp(other.as_slice())
  }
}

impl<T: Hash> Hash for SimpleVec<T> {
  fn hash<H: Hasher>(
    &self,
    state: &mut H,
  ) {
    self.as_slice().hash(state);
  }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVec<T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_list().entries(self.as_slice()).finish()
  }
}

/// Builds a [`SimpleVec`](crate::SimpleVec) from a literal list, with
/// capacity equal to the number of elements.
///
/// # Examples
///
/// ```rust
/// use simplevec::simple_vec;
///
/// let v = simple_vec![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 3);
///
/// let zeros = simple_vec![0u8; 4];
/// assert_eq!(zeros.as_slice(), &[0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! simple_vec {
  () => {
    $crate::SimpleVec::new()
  };
  ($elem:expr; $n:expr) => {
    $crate::SimpleVec::from_elem($n, $elem)
  };
  ($($value:expr),+ $(,)?) => {
    $crate::SimpleVec::from([$($value),+])
  };
}

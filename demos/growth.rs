use simplevec::{OwnedArray, ReserveHint, SimpleVec, simple_vec};

/// Prints the logical length, the capacity and the start of the block, so
/// each step shows whether the vector moved to a new allocation.
fn print_state<T: std::fmt::Debug>(
  label: &str,
  v: &SimpleVec<T>,
) {
  println!(
    "[{}] len = {}, capacity = {}, block = {:?}, items = {:?}",
    label,
    v.len(),
    v.capacity(),
    v.as_ptr(),
    v,
  );
}

fn main() {
  // --------------------------------------------------------------------
  // 1) Appending from nothing goes through resize(len + 1), so capacity
  //    jumps 0 -> 2 -> 2 -> 6.
  // --------------------------------------------------------------------
  let mut pushed = SimpleVec::new();
  print_state("push: start", &pushed);
  for i in 1..=3 {
    pushed.push_back(i);
    print_state("push", &pushed);
  }

  // --------------------------------------------------------------------
  // 2) Inserting into a full vector doubles the length instead:
  //    0 -> 1 -> 2 -> 4.
  // --------------------------------------------------------------------
  let mut inserted = SimpleVec::new();
  for c in ['c', 'b', 'a'] {
    inserted.insert(inserted.begin(), c);
    print_state("insert at begin", &inserted);
  }

  // --------------------------------------------------------------------
  // 3) resize(n) over-allocates to 2 * n; shrinking keeps the block.
  // --------------------------------------------------------------------
  let mut resized = SimpleVec::<u32>::new();
  resized.resize(5);
  print_state("resize(5)", &resized);
  resized.resize(2);
  print_state("resize(2)", &resized);

  // --------------------------------------------------------------------
  // 4) A reservation hint allocates up front without adding elements.
  // --------------------------------------------------------------------
  let mut reserved = SimpleVec::from_hint(ReserveHint::new(10));
  print_state("from_hint(10)", &reserved);
  reserved.extend(0..10u64);
  print_state("filled to capacity", &reserved);
  reserved.reserve(5);
  print_state("reserve(5) is a no-op", &reserved);

  // --------------------------------------------------------------------
  // 5) Erase, checked access and comparison.
  // --------------------------------------------------------------------
  let mut small = simple_vec![1, 2, 3];
  small.erase(1);
  print_state("erase(1)", &small);
  match small.at(small.len()) {
    Ok(value) => println!("[at] unexpected value {value}"),
    Err(err) => println!("[at] {err}"),
  }
  println!("[cmp] [1, 2] < [1, 2, 3]: {}", simple_vec![1, 2] < simple_vec![1, 2, 3]);

  // --------------------------------------------------------------------
  // 6) The raw block can leave an OwnedArray and come back.
  // --------------------------------------------------------------------
  let mut block = OwnedArray::<u16>::new(4);
  block[0] = 0xBEEF;
  let (raw, len) = block.release();
  println!("\n[release] ptr = {:?}, len = {}, still owns = {}", raw, len, block.is_allocated());
  let adopted = unsafe { OwnedArray::from_raw_parts(raw, len) };
  println!("[adopt] first = 0x{:X}", adopted[0]);
}

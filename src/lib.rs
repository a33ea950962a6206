//! # simplevec - A Minimal Growable Array
//!
//! This crate provides [`SimpleVec`], a small dynamic array, and
//! [`OwnedArray`], the single-owner heap block it is built on. Memory comes
//! straight from the C allocator (`posix_memalign` / `free`).
//!
//! ## Overview
//!
//! ```text
//!   SimpleVec<T>
//!
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │  len = 4                  capacity = 8                           │
//!   │                                                                  │
//!   │   ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐              │
//!   │   │  a  │  b  │  c  │  d  │  ·  │  ·  │  ·  │  ·  │  OwnedArray  │
//!   │   └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘              │
//!   │   ▲                       ▲                       ▲              │
//!   │   │                       │                       │              │
//!   │ begin()                 end()                 capacity           │
//!   │                                                                  │
//!   │   [0, len)        live elements                                  │
//!   │   [len, capacity) scratch: default or stale values, never read   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   simplevec
//!   ├── buffer     - OwnedArray: one block, one owner
//!   ├── error      - Error / Result
//!   ├── hint       - ReserveHint construction option
//!   ├── layout     - word_align! and array layout helpers (internal)
//!   ├── macros     - simple_vec![..]
//!   └── vector     - SimpleVec
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use simplevec::{simple_vec, ReserveHint, SimpleVec};
//!
//! let mut v = simple_vec![2, 3];
//! v.insert(v.begin(), 1);
//! v.push_back(4);
//! assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
//!
//! // Checked access reports instead of panicking.
//! assert!(v.at(v.len()).is_err());
//!
//! let reserved: SimpleVec<u8> = SimpleVec::from_hint(ReserveHint::new(16));
//! assert_eq!((reserved.len(), reserved.capacity()), (0, 16));
//! ```
//!
//! ## Growth
//!
//! Appending and inserting grow by different rules, and explicit resizing
//! over-allocates to twice the requested length:
//!
//! ```text
//!   push_back  len == capacity  ──► resize(len + 1)     capacity = 2 * (len + 1)
//!   insert     len == capacity  ──► new block           capacity = max(2 * len, 1)
//!   resize(n)  n > len          ──► new block           capacity = 2 * n
//!   reserve(n) n > capacity     ──► new block           capacity = n
//!
//!   push_back x3 from empty:   cap 0 ──► 2 ──► 2 ──► 6
//!   insert    x3 from empty:   cap 0 ──► 1 ──► 2 ──► 4
//! ```
//!
//! Every new block is fully built before the old one is given up, so a
//! failed allocation leaves the vector as it was.
//!
//! ## Ownership
//!
//! ```text
//!   OwnedArray::new(n) ──► owns block ──┬──► drop      frees exactly once
//!                                       ├──► take()    moves out, source empty
//!                                       └──► release() raw (ptr, len), source empty
//!                                                 │
//!                        from_raw_parts(ptr, len) ◄┘
//! ```
//!
//! ## Contracts
//!
//! - `v[i]`, `erase`, `pop_back` and `insert` past `end()` are caller
//!   errors and panic.
//! - `at`/`at_mut` are the checked path and return [`Error::OutOfRange`].
//! - `get_unchecked` is the zero-cost path and is `unsafe`.
//!
//! ## Limitations
//!
//! - **Single-threaded**: no internal synchronisation
//! - **`T: Default`**: every slot, including scratch, holds a value
//! - **Unix-only**: relies on `libc::posix_memalign`

mod buffer;
mod error;
mod hint;
mod layout;
mod macros;
mod vector;

pub use buffer::OwnedArray;
pub use error::{Error, Result};
pub use hint::ReserveHint;
pub use vector::SimpleVec;

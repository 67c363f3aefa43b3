#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

mod crypto;
mod error;
mod key;

pub use crypto::*;
pub use error::*;
pub use key::*;

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

mod build;
mod iter;
mod merge;
mod mutate;
mod node;
mod prove;
mod query;
mod tree;

pub use node::Node;
pub use tree::Tree;

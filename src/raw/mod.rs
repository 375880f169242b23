mod arena;
mod handle;
mod node;
mod raw_bst_map;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_bst_map::{RawBstMap, predecessor_in, successor_in};

mod arena;
mod handle;
mod node;
mod raw_bstree;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use node::{Node, Side};
pub(crate) use raw_bstree::{RawBSTree, Slot, Walk};

//! Block stacks used by the engine

use crate::block::Block;

/// A LIFO stack of blocks. Index 0 of [`Stack::peek`] is the top.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    data: Vec<Block>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the top
    pub fn push(
        &mut self,
        block: Block,
    ) {
        self.data.push(block);
    }

    /// The block `index` places below the top
    pub fn peek(
        &self,
        index: usize,
    ) -> Option<&Block> {
        let len = self.data.len();
        if index < len {
            self.data.get(len - 1 - index)
        } else {
            None
        }
    }

    /// Pop the top
    pub fn pop(&mut self) -> Option<Block> {
        self.data.pop()
    }

    /// Exchange the top two entries. Returns false if there are fewer than two.
    pub fn swap_top(&mut self) -> bool {
        let len = self.data.len();
        if len < 2 {
            return false;
        }
        self.data.swap(len - 1, len - 2);
        true
    }

    /// Depth
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stack holds nothing
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move every entry, bottom first, onto the end of `dst`.
    pub fn drain_into(
        &mut self,
        dst: &mut Vec<Block>,
    ) {
        dst.append(&mut self.data);
    }

    /// Entries from bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.data.iter()
    }

    /// Entries from bottom to top, by value
    pub fn into_vec(self) -> Vec<Block> {
        self.data
    }
}

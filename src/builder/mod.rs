//! Interactive block-stack editor
//!
//! A [`Builder`] is a stack of blocks edited one command at a time: push a
//! primitive, wrap or unwrap a quotation, join or split a composition, mint
//! or follow a link, shuffle entries, reduce the top. Commands that need more
//! entries than the stack holds do nothing.

use std::fmt;

use hashbrown::HashMap;
use tracing::debug;

use crate::block::{compose, quote, Block, LinkHash, Prim};
use crate::codec::{hash_of, EncodeResult};
use crate::vm::{reduce, Stack};


/// A stack of blocks under construction.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    stack: Stack,
    /// Links minted by [`Builder::mk_link`] and what they stand for
    links: HashMap<LinkHash, Block>,
}

impl Builder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Push any block.
    pub fn push(
        &mut self,
        block: Block,
    ) {
        self.stack.push(block);
    }

    fn op(
        &mut self,
        prim: Prim,
    ) {
        self.stack.push(Block::Prim(prim));
    }

    pub fn op_id(&mut self) {
        self.stack.push(Block::Id);
    }

    pub fn op_app(&mut self) {
        self.op(Prim::App);
    }

    pub fn op_box(&mut self) {
        self.op(Prim::Box);
    }

    pub fn op_cat(&mut self) {
        self.op(Prim::Cat);
    }

    pub fn op_copy(&mut self) {
        self.op(Prim::Copy);
    }

    pub fn op_drop(&mut self) {
        self.op(Prim::Drop);
    }

    pub fn op_swap(&mut self) {
        self.op(Prim::Swap);
    }

    /// Quote the top entry.
    pub fn mk_box(&mut self) {
        if let Some(top) = self.stack.pop() {
            self.stack.push(quote(top));
        }
    }

    /// Replace a quotation on top with its body.
    pub fn rm_box(&mut self) {
        let body = match self.stack.peek(0) {
            Some(Block::Quote(body)) => (**body).clone(),
            _ => return,
        };
        self.stack.pop();
        self.stack.push(body);
    }

    /// Compose the top two entries, lower one first.
    pub fn mk_cat(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let (Some(rhs), Some(lhs)) = (self.stack.pop(), self.stack.pop()) {
            self.stack.push(compose([lhs, rhs]));
        }
    }

    /// Split a composition on top into its first item and the rest.
    pub fn rm_cat(&mut self) {
        let (fst, snd) = match self.stack.peek(0) {
            Some(Block::Pair(fst, snd)) => ((**fst).clone(), (**snd).clone()),
            _ => return,
        };
        self.stack.pop();
        self.stack.push(fst);
        self.stack.push(snd);
    }

    /// Replace the top entry with its content address.
    ///
    /// Fails, leaving the stack alone, if the entry mentions a name.
    pub fn mk_link(&mut self) -> EncodeResult<()> {
        let Some(top) = self.stack.peek(0) else {
            return Ok(());
        };
        let hash = hash_of(top)?;
        if let Some(top) = self.stack.pop() {
            debug!(link = %hash.to_hex(), "minted");
            self.links.insert(hash, top);
        }
        self.stack.push(Block::Link(hash));
        Ok(())
    }

    /// Replace a link on top with the block it was minted from. Links this
    /// builder did not mint stay as they are.
    pub fn rm_link(&mut self) {
        let body = match self.stack.peek(0) {
            Some(Block::Link(hash)) => match self.links.get(hash) {
                Some(body) => body.clone(),
                None => return,
            },
            _ => return,
        };
        self.stack.pop();
        self.stack.push(body);
    }

    pub fn copy_top(&mut self) {
        if let Some(top) = self.stack.peek(0) {
            let top = top.clone();
            self.stack.push(top);
        }
    }

    pub fn drop_top(&mut self) {
        self.stack.pop();
    }

    pub fn swap_top(&mut self) {
        self.stack.swap_top();
    }

    /// Reduce the top entry with at most `quota` rewrites.
    pub fn reduce(
        &mut self,
        quota: usize,
    ) {
        if let Some(top) = self.stack.pop() {
            self.stack.push(reduce(top, quota));
        }
    }

    /// The whole stack composed bottom to top.
    pub fn block(&self) -> Block {
        compose(self.stack.iter().cloned())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Entries bottom to top, separated by ` - `.
impl fmt::Display for Builder {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, block) in self.stack.iter().enumerate() {
            if i > 0 {
                f.write_str(" - ")?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

//! Block algebra
//!
//! A block is executable code. ABC is a combinator calculus with six
//! operators:
//!
//! ```text
//!         [A] app  = A
//!         [A] box  = [[A]]
//!     [A] [B] cat  = [A B]
//!         [A] copy = [A] [A]
//!         [A] drop =
//!     [A] [B] swap = [B] [A]
//! ```
//!
//! plus three substructural markers (`nocopy`, `nodrop`, `noswap`), two
//! equality guards (`eq`, `neq`) and a reserved `tag`. Code is hyperlinked
//! with a content-based addressing scheme: a block may refer to another
//! block by the SHA-256 hash of its bytecode.
//!
//! Composition is kept in a right-associated, `Id`-free normal form by every
//! constructor in this module, which is what makes bytecode and rendering
//! deterministic.

use std::fmt;
use std::sync::Arc;

pub mod capability;
pub mod equality;

pub use capability::{copyable, droppable, swappable};
pub use equality::equal;

#[cfg(test)]
pub(crate) mod tests;

/// Length of a content address in bytes.
pub const HASH_LEN: usize = 32;

/// Primitive operators and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    /// `[A] app = A`
    App,
    /// `[A] box = [[A]]`
    Box,
    /// `[A] [B] cat = [A B]`
    Cat,
    /// `[A] copy = [A] [A]`
    Copy,
    /// `[A] drop =`
    Drop,
    /// `[A] [B] swap = [B] [A]`
    Swap,
    /// Makes the enclosing value fail `copyable`.
    NoCopy,
    /// Makes the enclosing value fail `droppable`.
    NoDrop,
    /// Makes the enclosing value fail `swappable`.
    NoSwap,
    /// Passes when the top two values are structurally equal.
    Eq,
    /// Passes when the top two values differ.
    Neq,
    /// Reserved runtime hook. Never rewrites.
    Tag,
}

impl Prim {
    /// Every primitive, in opcode order.
    pub const ALL: [Prim; 12] = [
        Prim::App,
        Prim::Box,
        Prim::Cat,
        Prim::Copy,
        Prim::Drop,
        Prim::Swap,
        Prim::NoCopy,
        Prim::NoDrop,
        Prim::NoSwap,
        Prim::Eq,
        Prim::Neq,
        Prim::Tag,
    ];

    /// Short name used by the textual notation.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Prim::App => "app",
            Prim::Box => "box",
            Prim::Cat => "cat",
            Prim::Copy => "copy",
            Prim::Drop => "drop",
            Prim::Swap => "swap",
            Prim::NoCopy => "nocopy",
            Prim::NoDrop => "nodrop",
            Prim::NoSwap => "noswap",
            Prim::Eq => "eq",
            Prim::Neq => "neq",
            Prim::Tag => "tag",
        }
    }

    /// Inverse of [`Prim::mnemonic`].
    pub fn from_mnemonic(word: &str) -> Option<Prim> {
        Prim::ALL.into_iter().find(|prim| prim.mnemonic() == word)
    }

    /// Whether this primitive is one of the three substructural markers.
    pub fn is_marker(self) -> bool {
        matches!(self, Prim::NoCopy | Prim::NoDrop | Prim::NoSwap)
    }
}

impl fmt::Display for Prim {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A content address: the SHA-256 of a block's canonical bytecode.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHash(pub [u8; HASH_LEN]);

impl LinkHash {
    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Parse 64 hex digits.
    pub fn from_hex(text: &str) -> Option<LinkHash> {
        let mut buf = [0u8; HASH_LEN];
        hex::decode_to_slice(text, &mut buf).ok()?;
        Some(LinkHash(buf))
    }

    /// Lowercase hex digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for LinkHash {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "LinkHash({})", self.to_hex())
    }
}

/// A block of code.
///
/// Blocks are immutable and freely shared. Build composites with
/// [`compose`], [`Block::cat`] and [`quote`] rather than the `Pair` variant
/// directly so the normal form holds: no `Pair` has a `Pair` as its first
/// component and no `Pair` has `Id` on either side.
#[derive(Debug, Clone)]
pub enum Block {
    /// The empty program.
    Id,
    /// A primitive operator or marker.
    Prim(Prim),
    /// Code wrapped for later application.
    Quote(Arc<Block>),
    /// Sequential composition.
    Pair(Arc<Block>, Arc<Block>),
    /// Opaque content-addressed reference.
    Link(LinkHash),
    /// Numeric literal.
    Num(f64),
    /// Unresolved name, only produced by the textual reader.
    Var(Arc<str>),
}

/// Wrap a block in a quotation.
pub fn quote(body: Block) -> Block {
    Block::Quote(Arc::new(body))
}

/// Compose blocks left to right into normal form.
///
/// Zero blocks give `Id`, a single block comes back as it is. The spine of
/// the last non-empty operand is shared rather than rebuilt.
pub fn compose<I>(xs: I) -> Block
where
    I: IntoIterator<Item = Block>,
{
    let mut xs: Vec<Block> = xs.into_iter().collect();
    if xs.len() == 1 && xs[0].is_normal() {
        return xs.pop().unwrap_or_default();
    }
    let mut acc = Block::Id;
    while let Some(block) = xs.pop() {
        if matches!(block, Block::Id) {
            continue;
        }
        if matches!(acc, Block::Id) && block.is_normal() {
            acc = block;
            continue;
        }
        let mut atoms = Vec::new();
        block.atoms_into(&mut atoms);
        for atom in atoms.into_iter().rev() {
            acc = if acc.is_id() {
                atom
            } else {
                Block::Pair(Arc::new(atom), Arc::new(acc))
            };
        }
    }
    acc
}

/// Compose blocks that are each already in normal form.
///
/// Only the top-level spines are walked; quoted bodies are taken as they
/// are, so building `n` nested quotations this way stays linear.
pub(crate) fn compose_normal(mut xs: Vec<Block>) -> Block {
    let mut acc = Block::Id;
    while let Some(block) = xs.pop() {
        if acc.is_id() {
            acc = block;
            continue;
        }
        let items: Vec<Block> = block.items().cloned().collect();
        for item in items.into_iter().rev() {
            acc = Block::Pair(Arc::new(item), Arc::new(acc));
        }
    }
    acc
}

impl Block {
    /// Shorthand for `Block::Prim`.
    pub const fn prim(prim: Prim) -> Block {
        Block::Prim(prim)
    }

    /// Numeric literal.
    pub fn num(value: f64) -> Block {
        Block::Num(value)
    }

    /// Unresolved name.
    pub fn var(name: &str) -> Block {
        Block::Var(Arc::from(name))
    }

    /// Link to the given hash.
    pub fn link(hash: [u8; HASH_LEN]) -> Block {
        Block::Link(LinkHash(hash))
    }

    /// `self` followed by `rest`.
    pub fn cat(
        &self,
        rest: &Block,
    ) -> Block {
        compose([self.clone(), rest.clone()])
    }

    /// `[self]`
    pub fn quoted(&self) -> Block {
        quote(self.clone())
    }

    /// Whether the block is the empty program.
    pub fn is_id(&self) -> bool {
        matches!(self, Block::Id)
    }

    /// Whether the block can sit on the data stack.
    pub fn is_value(&self) -> bool {
        matches!(self, Block::Quote(_) | Block::Link(_) | Block::Num(_))
    }

    /// Body of a quotation.
    pub fn as_quote(&self) -> Option<&Block> {
        match self {
            Block::Quote(body) => Some(&**body),
            _ => None,
        }
    }

    /// Whether the block, including every quoted body, is in normal form.
    pub fn is_normal(&self) -> bool {
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            match block {
                Block::Pair(fst, snd) => {
                    if matches!(**fst, Block::Pair(..) | Block::Id) || snd.is_id() {
                        return false;
                    }
                    pending.push(&**fst);
                    pending.push(&**snd);
                }
                Block::Quote(body) => pending.push(&**body),
                _ => {}
            }
        }
        true
    }

    /// Number of leaves: primitives, values and quotation wrappers.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            match block {
                Block::Id => {}
                Block::Pair(fst, snd) => {
                    pending.push(&**fst);
                    pending.push(&**snd);
                }
                Block::Quote(body) => {
                    count += 1;
                    pending.push(&**body);
                }
                _ => count += 1,
            }
        }
        count
    }

    /// Whether [`Block::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the top-level items of the composition, left to right.
    pub fn items(&self) -> Items<'_> {
        Items { rest: Some(self) }
    }

    /// Push the non-`Pair`, non-`Id` pieces of this block in program order.
    /// Quoted bodies are normalised on the way.
    fn atoms_into(
        &self,
        out: &mut Vec<Block>,
    ) {
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            match block {
                Block::Id => {}
                Block::Pair(fst, snd) => {
                    pending.push(&**snd);
                    pending.push(&**fst);
                }
                Block::Quote(body) if !body.is_normal() => {
                    out.push(quote(compose([(**body).clone()])));
                }
                other => out.push(other.clone()),
            }
        }
    }
}

/// Iterator over the top-level items of a normal-form composition.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    rest: Option<&'a Block>,
}

impl<'a> Iterator for Items<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rest.take()? {
            Block::Id => None,
            Block::Pair(fst, snd) => {
                self.rest = Some(&**snd);
                Some(&**fst)
            }
            other => Some(other),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::Id
    }
}

impl From<Prim> for Block {
    fn from(prim: Prim) -> Self {
        Block::Prim(prim)
    }
}

impl From<f64> for Block {
    fn from(value: f64) -> Self {
        Block::Num(value)
    }
}

impl From<LinkHash> for Block {
    fn from(hash: LinkHash) -> Self {
        Block::Link(hash)
    }
}

impl PartialEq for Block {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        equal(self, other)
    }
}

// Dropping a long spine or a deep quotation recursively would overflow the
// native stack, so uniquely owned children are hollowed out into a worklist.
impl Drop for Block {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);
        while let Some(mut block) = pending.pop() {
            take_children(&mut block, &mut pending);
        }
    }
}

fn take_children(
    block: &mut Block,
    out: &mut Vec<Block>,
) {
    match block {
        Block::Quote(body) => {
            if let Some(body) = Arc::get_mut(body) {
                out.push(std::mem::take(body));
            }
        }
        Block::Pair(fst, snd) => {
            if let Some(fst) = Arc::get_mut(fst) {
                out.push(std::mem::take(fst));
            }
            if let Some(snd) = Arc::get_mut(snd) {
                out.push(std::mem::take(snd));
            }
        }
        _ => {}
    }
}

enum Token<'a> {
    Open,
    Close,
    Leaf(&'a Block),
}

/// Human-readable notation: mnemonics separated by single spaces,
/// quotations in brackets, `Id` as nothing.
impl fmt::Display for Block {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut pending = vec![Token::Leaf(self)];
        let mut after_open = true;
        while let Some(token) = pending.pop() {
            match token {
                Token::Leaf(Block::Id) => {}
                Token::Leaf(Block::Pair(fst, snd)) => {
                    pending.push(Token::Leaf(snd.as_ref()));
                    pending.push(Token::Leaf(fst.as_ref()));
                }
                Token::Leaf(Block::Quote(body)) => {
                    pending.push(Token::Close);
                    pending.push(Token::Leaf(body.as_ref()));
                    pending.push(Token::Open);
                }
                Token::Open => {
                    if !after_open {
                        f.write_str(" ")?;
                    }
                    f.write_str("[")?;
                    after_open = true;
                }
                Token::Close => {
                    f.write_str("]")?;
                    after_open = false;
                }
                Token::Leaf(leaf) => {
                    if !after_open {
                        f.write_str(" ")?;
                    }
                    match leaf {
                        Block::Prim(prim) => f.write_str(prim.mnemonic())?,
                        Block::Link(hash) => write!(f, "#{}", hash.to_hex())?,
                        Block::Num(value) => write!(f, "{}", value)?,
                        Block::Var(name) => f.write_str(name)?,
                        _ => {}
                    }
                    after_open = false;
                }
            }
        }
        Ok(())
    }
}

/// Render a block in the textual notation.
pub fn render(block: &Block) -> String {
    block.to_string()
}

//! Rewrite rules
//!
//! | block | fires when | effect |
//! |---|---|---|
//! | `app` | top is `[A]` | pop, queue `A` |
//! | `box` | arity >= 1 | `A` -> `[A]` |
//! | `cat` | top two are quotations | `[A] [B]` -> `[A B]` |
//! | `copy` | top is copyable | `A` -> `A A` |
//! | `drop` | top is droppable | `A` -> |
//! | `swap` | top two are swappable | `A B` -> `B A` |
//! | `eq` / `neq` | top two are (not) equal | vanishes |
//! | markers | never | stuck |
//! | `tag` | never | set aside |

use std::sync::Arc;

use tracing::debug;

use super::engine::Reducer;
use crate::block::{compose_normal, copyable, droppable, equal, quote, swappable, Block, Prim};

/// What a single rewrite attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// A rewrite happened; costs one unit of fuel.
    Progress,
    /// The precondition failed; the block goes to the trash.
    Stuck,
    /// Bookkeeping that costs nothing: a value pushed, a pair split, `Id`.
    Quiet,
    /// Neither rewritten nor trashed.
    Aside,
}

impl Reducer<'_> {
    pub(super) fn rewrite(
        &mut self,
        block: &Block,
    ) -> Step {
        match block {
            Block::Id => Step::Quiet,
            Block::Quote(_) | Block::Link(_) | Block::Num(_) => {
                self.data.push(block.clone());
                Step::Quiet
            }
            Block::Pair(fst, snd) => {
                self.work.push((**snd).clone());
                self.work.push((**fst).clone());
                Step::Quiet
            }
            Block::Var(name) => match self.resolver.resolve(name) {
                Ok(body) => {
                    debug!(name = %name, "resolved");
                    self.work.push(body);
                    Step::Progress
                }
                Err(err) => {
                    debug!(name = %name, error = %err, "unresolved");
                    Step::Stuck
                }
            },
            Block::Prim(prim) => self.apply(*prim),
        }
    }

    fn apply(
        &mut self,
        prim: Prim,
    ) -> Step {
        match prim {
            Prim::App => self.app(),
            Prim::Box => self.box_top(),
            Prim::Cat => self.cat(),
            Prim::Copy => self.copy(),
            Prim::Drop => self.drop_top(),
            Prim::Swap => self.swap(),
            Prim::Eq => self.guard(true),
            Prim::Neq => self.guard(false),
            Prim::NoCopy | Prim::NoDrop | Prim::NoSwap => Step::Stuck,
            Prim::Tag => Step::Aside,
        }
    }

    fn app(&mut self) -> Step {
        let body = match self.data.peek(0) {
            Some(Block::Quote(body)) => Arc::clone(body),
            _ => return Step::Stuck,
        };
        self.data.pop();
        self.work.push((*body).clone());
        Step::Progress
    }

    fn box_top(&mut self) -> Step {
        match self.data.pop() {
            Some(top) => {
                self.data.push(quote(top));
                Step::Progress
            }
            None => Step::Stuck,
        }
    }

    fn cat(&mut self) -> Step {
        let (lower, upper) = match (self.data.peek(1), self.data.peek(0)) {
            (Some(Block::Quote(lower)), Some(Block::Quote(upper))) => {
                (Arc::clone(lower), Arc::clone(upper))
            }
            _ => return Step::Stuck,
        };
        self.data.pop();
        self.data.pop();
        self.data
            .push(quote(compose_normal(vec![(*lower).clone(), (*upper).clone()])));
        Step::Progress
    }

    fn copy(&mut self) -> Step {
        match self.data.peek(0) {
            Some(top) if copyable(top) => {
                let top = top.clone();
                self.data.push(top);
                Step::Progress
            }
            _ => Step::Stuck,
        }
    }

    fn drop_top(&mut self) -> Step {
        match self.data.peek(0) {
            Some(top) if droppable(top) => {
                self.data.pop();
                Step::Progress
            }
            _ => Step::Stuck,
        }
    }

    fn swap(&mut self) -> Step {
        match (self.data.peek(0), self.data.peek(1)) {
            (Some(fst), Some(snd)) if swappable(fst) && swappable(snd) => {
                self.data.swap_top();
                Step::Progress
            }
            _ => Step::Stuck,
        }
    }

    /// `eq` passes on equal operands, `neq` on different ones. Neither
    /// touches the stack.
    fn guard(
        &mut self,
        want_equal: bool,
    ) -> Step {
        match (self.data.peek(0), self.data.peek(1)) {
            (Some(fst), Some(snd)) if equal(fst, snd) == want_equal => Step::Progress,
            _ => Step::Stuck,
        }
    }
}

//! Textual reader
//!
//! Reads the notation produced by [`render`](crate::block::render):
//! whitespace-separated words, `[` and `]` around quotations, mnemonics for
//! primitives, decimal or exponential literals for numbers, `#` plus 64 hex
//! digits for links. Any other identifier longer than two characters is a
//! name, resolved through a [`Resolver`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{compose, compose_normal, quote, Block, LinkHash, Prim};

mod errors;
mod resolve;

pub use errors::{ReadError, ReadResult};
pub use resolve::{FileResolver, MapResolver, NoResolver, Resolver};

#[cfg(test)]
mod tests;

static NUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$").expect("number pattern")
});

static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]+$").expect("identifier pattern"));

/// Whether `word` is a valid name: a letter followed by letters, digits or
/// dashes, more than two characters long.
pub fn is_name(word: &str) -> bool {
    word.len() > 2 && IDENT.is_match(word) && Prim::from_mnemonic(word).is_none()
}

/// Parse text into a block, keeping names as unresolved `Var`s.
pub fn parse(text: &str) -> ReadResult<Block> {
    let text = text.replace('[', " [ ").replace(']', " ] ");
    let mut build: Vec<Block> = Vec::new();
    let mut stack: Vec<Vec<Block>> = Vec::new();
    for word in text.split_whitespace() {
        match word {
            "[" => stack.push(std::mem::take(&mut build)),
            "]" => {
                let outer = stack.pop().ok_or(ReadError::Unbalanced)?;
                let body = compose_normal(std::mem::replace(&mut build, outer));
                build.push(quote(body));
            }
            _ => build.push(parse_word(word)?),
        }
    }
    if !stack.is_empty() {
        return Err(ReadError::Unbalanced);
    }
    Ok(compose_normal(build))
}

fn parse_word(word: &str) -> ReadResult<Block> {
    if let Some(prim) = Prim::from_mnemonic(word) {
        return Ok(Block::Prim(prim));
    }
    if NUM.is_match(word) {
        let value: f64 = word
            .parse()
            .map_err(|_| ReadError::BadNumber(word.to_string()))?;
        return Ok(Block::Num(value));
    }
    if let Some(digits) = word.strip_prefix('#') {
        return LinkHash::from_hex(digits)
            .map(Block::Link)
            .ok_or_else(|| ReadError::UnknownWord(word.to_string()));
    }
    if word.chars().count() <= 2 {
        return Err(ReadError::Reserved(word.to_string()));
    }
    if IDENT.is_match(word) {
        return Ok(Block::var(word));
    }
    Err(ReadError::UnknownWord(word.to_string()))
}

/// Parse text and substitute every name with its resolved body.
pub fn read(
    text: &str,
    resolver: &dyn Resolver,
) -> ReadResult<Block> {
    let block = parse(text)?;
    substitute(&block, resolver)
}

/// Replace every `Var` in `block` with what `resolver` gives for it.
pub fn substitute(
    block: &Block,
    resolver: &dyn Resolver,
) -> ReadResult<Block> {
    substitute_with(block, &mut |name| resolver.resolve(name))
}

pub(crate) fn substitute_with(
    block: &Block,
    lookup: &mut dyn FnMut(&str) -> ReadResult<Block>,
) -> ReadResult<Block> {
    match block {
        Block::Var(name) => lookup(name),
        Block::Quote(body) => Ok(quote(substitute_with(body, lookup)?)),
        Block::Pair(..) => {
            let mut items = Vec::new();
            for item in block.items() {
                items.push(substitute_with(item, lookup)?);
            }
            Ok(compose(items))
        }
        other => Ok(other.clone()),
    }
}

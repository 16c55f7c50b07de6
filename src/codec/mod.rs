//! Bytecode codec
//!
//! A self-delimiting byte stream: one opcode per primitive, `Begin ... End`
//! around a quoted body, and fixed-width payloads after `Link` and `Num`.
//! `Id` has no encoding at all, so `decode(encode(b))` gives back `b` for
//! every block without unresolved names.

use std::io::{self, Read, Write};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::block::{compose_normal, quote, Block, LinkHash, HASH_LEN};

mod errors;
mod opcode;

pub use errors::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use opcode::Opcode;

#[cfg(test)]
mod tests;

const NUM_LEN: usize = 8;

enum Frame<'a> {
    Block(&'a Block),
    End,
}

/// Write the bytecode of `block` to `dst`.
pub fn encode_into<W: Write>(
    block: &Block,
    dst: &mut W,
) -> EncodeResult<()> {
    let mut pending = vec![Frame::Block(block)];
    while let Some(frame) = pending.pop() {
        let block = match frame {
            Frame::End => {
                dst.write_all(&[Opcode::End.as_u8()])?;
                continue;
            }
            Frame::Block(block) => block,
        };
        match block {
            Block::Id => {}
            Block::Prim(prim) => dst.write_all(&[Opcode::of(*prim).as_u8()])?,
            Block::Quote(body) => {
                dst.write_all(&[Opcode::Begin.as_u8()])?;
                pending.push(Frame::End);
                pending.push(Frame::Block(&**body));
            }
            Block::Pair(fst, snd) => {
                pending.push(Frame::Block(&**snd));
                pending.push(Frame::Block(&**fst));
            }
            Block::Link(hash) => {
                dst.write_all(&[Opcode::Link.as_u8()])?;
                dst.write_all(hash.as_bytes())?;
            }
            Block::Num(value) => {
                dst.write_all(&[Opcode::Num.as_u8()])?;
                dst.write_all(&value.to_bits().to_be_bytes())?;
            }
            Block::Var(name) => return Err(EncodeError::UnresolvedVar(name.to_string())),
        }
    }
    Ok(())
}

/// Bytecode of `block`.
pub fn encode(block: &Block) -> EncodeResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode_into(block, &mut buf)?;
    Ok(buf)
}

/// Content address of `block`: the SHA-256 of its bytecode, as a link.
pub fn link_of(block: &Block) -> EncodeResult<Block> {
    Ok(Block::Link(hash_of(block)?))
}

/// SHA-256 of the bytecode of `block`.
pub fn hash_of(block: &Block) -> EncodeResult<LinkHash> {
    let bytes = encode(block)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(LinkHash(hasher.finalize().into()))
}

/// Read one block from a stream of bytecode.
///
/// End of stream with every quotation closed is success. A stray `End`, a
/// quotation still open at end of stream, an unknown opcode or a short
/// payload are errors.
pub fn decode<R: Read>(src: R) -> DecodeResult<Block> {
    let mut src = src.bytes();
    let mut build: Vec<Block> = Vec::new();
    let mut stack: Vec<Vec<Block>> = Vec::new();
    while let Some(byte) = src.next() {
        let code = byte?;
        let op = Opcode::try_from(code).map_err(DecodeError::UnknownOpcode)?;
        match op {
            Opcode::Begin => {
                stack.push(std::mem::take(&mut build));
            }
            Opcode::End => {
                let outer = stack.pop().ok_or(DecodeError::UnexpectedEnd)?;
                let body = compose_normal(std::mem::replace(&mut build, outer));
                build.push(quote(body));
            }
            Opcode::Link => {
                let (hash, got) = read_array::<_, HASH_LEN>(&mut src)?;
                if got != HASH_LEN {
                    return Err(DecodeError::TruncatedLink(got));
                }
                build.push(Block::Link(LinkHash(hash)));
            }
            Opcode::Num => {
                let (bits, got) = read_array::<_, NUM_LEN>(&mut src)?;
                if got != NUM_LEN {
                    return Err(DecodeError::TruncatedNum(got));
                }
                build.push(Block::Num(f64::from_bits(u64::from_be_bytes(bits))));
            }
            other => {
                if let Some(prim) = other.prim() {
                    build.push(Block::Prim(prim));
                }
            }
        }
    }
    if !stack.is_empty() {
        debug!(open = stack.len(), "bytecode ended inside a quotation");
        return Err(DecodeError::UnclosedBegin(stack.len()));
    }
    Ok(compose_normal(build))
}

/// Decode a complete bytecode buffer.
pub fn decode_bytes(bytes: &[u8]) -> DecodeResult<Block> {
    decode(bytes)
}

/// Read up to `N` payload bytes, reporting how many were available.
fn read_array<I, const N: usize>(src: &mut I) -> DecodeResult<([u8; N], usize)>
where
    I: Iterator<Item = io::Result<u8>>,
{
    let mut buf = [0u8; N];
    #[allow(clippy::needless_range_loop)]
    for got in 0..N {
        match src.next() {
            Some(byte) => buf[got] = byte?,
            None => return Ok((buf, got)),
        }
    }
    Ok((buf, N))
}

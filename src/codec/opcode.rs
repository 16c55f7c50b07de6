//! Bytecode opcodes
//!
//! One byte per token. `Begin`/`End` bracket a quotation, `Link` is followed
//! by 32 raw hash bytes and `Num` by 8 bytes of big-endian IEEE-754 bits.

use std::fmt;

use crate::block::Prim;

/// Bytecode opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Open a quotation.
    Begin = 0x00,
    App = 0x01,
    Box = 0x02,
    Cat = 0x03,
    Copy = 0x04,
    Drop = 0x05,
    Swap = 0x06,
    NoCopy = 0x07,
    NoDrop = 0x08,
    NoSwap = 0x09,
    Eq = 0x0A,
    Neq = 0x0B,
    Tag = 0x0C,
    /// Followed by a 32-byte hash.
    Link = 0x0D,
    /// Close a quotation.
    End = 0x0E,
    /// Followed by an 8-byte float.
    Num = 0x0F,
}

impl Opcode {
    /// The opcode byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Opcode of a primitive.
    pub fn of(prim: Prim) -> Opcode {
        match prim {
            Prim::App => Opcode::App,
            Prim::Box => Opcode::Box,
            Prim::Cat => Opcode::Cat,
            Prim::Copy => Opcode::Copy,
            Prim::Drop => Opcode::Drop,
            Prim::Swap => Opcode::Swap,
            Prim::NoCopy => Opcode::NoCopy,
            Prim::NoDrop => Opcode::NoDrop,
            Prim::NoSwap => Opcode::NoSwap,
            Prim::Eq => Opcode::Eq,
            Prim::Neq => Opcode::Neq,
            Prim::Tag => Opcode::Tag,
        }
    }

    /// The primitive this opcode stands for, if it is a single-byte token.
    pub fn prim(self) -> Option<Prim> {
        match self {
            Opcode::App => Some(Prim::App),
            Opcode::Box => Some(Prim::Box),
            Opcode::Cat => Some(Prim::Cat),
            Opcode::Copy => Some(Prim::Copy),
            Opcode::Drop => Some(Prim::Drop),
            Opcode::Swap => Some(Prim::Swap),
            Opcode::NoCopy => Some(Prim::NoCopy),
            Opcode::NoDrop => Some(Prim::NoDrop),
            Opcode::NoSwap => Some(Prim::NoSwap),
            Opcode::Eq => Some(Prim::Eq),
            Opcode::Neq => Some(Prim::Neq),
            Opcode::Tag => Some(Prim::Tag),
            Opcode::Begin | Opcode::End | Opcode::Link | Opcode::Num => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.prim() {
            Some(prim) => write!(f, "{}", prim),
            None => write!(f, "{:?}", self),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Opcode::Begin),
            0x01 => Ok(Opcode::App),
            0x02 => Ok(Opcode::Box),
            0x03 => Ok(Opcode::Cat),
            0x04 => Ok(Opcode::Copy),
            0x05 => Ok(Opcode::Drop),
            0x06 => Ok(Opcode::Swap),
            0x07 => Ok(Opcode::NoCopy),
            0x08 => Ok(Opcode::NoDrop),
            0x09 => Ok(Opcode::NoSwap),
            0x0A => Ok(Opcode::Eq),
            0x0B => Ok(Opcode::Neq),
            0x0C => Ok(Opcode::Tag),
            0x0D => Ok(Opcode::Link),
            0x0E => Ok(Opcode::End),
            0x0F => Ok(Opcode::Num),
            other => Err(other),
        }
    }
}

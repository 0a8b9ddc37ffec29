//! Opcode table
//!
//! Maps every byte value to a mnemonic and the number of immediate bytes that
//! follow it in the code stream. The table is total: bytes without an assigned
//! instruction map to [`Mnemonic::Undefined`] rather than failing.
//!
//! # Immediate operands
//!
//! Only the push family carries immediates. `PUSH1` (0x60) through `PUSH32`
//! (0x7F) are followed by `byte - 0x5F` bytes of literal data; every other
//! instruction, including `PUSH0`, is a single byte.
//!
//! # Placeholder sentinel
//!
//! Puzzle templates mark open operator slots with [`PLACEHOLDER`], a byte that
//! no EVM revision assigns. It decodes as [`Mnemonic::Insert`].

use std::fmt;

/// Byte standing in for a not yet chosen operator in a puzzle template.
pub const PLACEHOLDER: u8 = 0xCC;

/// First opcode of the push family with an immediate operand (PUSH1)
pub const PUSH1: u8 = 0x60;

/// Last opcode of the push family (PUSH32)
pub const PUSH32: u8 = 0x7F;

/// Arithmetic opcodes a player may place into a template
pub mod arith {
    /// ADD - a + b
    pub const ADD: u8 = 0x01;

    /// MUL - a * b
    pub const MUL: u8 = 0x02;

    /// SUB - a - b
    pub const SUB: u8 = 0x03;

    /// DIV - integer division, division by zero yields zero
    pub const DIV: u8 = 0x04;
}

/// Instruction names, one tag per instruction (the push, dup, swap and log
/// families carry their width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Stop,
    Add,
    Mul,
    Sub,
    Div,
    Sdiv,
    Mod,
    Smod,
    Addmod,
    Mulmod,
    Exp,
    Signextend,
    Lt,
    Gt,
    Slt,
    Sgt,
    Eq,
    Iszero,
    And,
    Or,
    Xor,
    Not,
    Byte,
    Shl,
    Shr,
    Sar,
    Keccak256,
    Address,
    Balance,
    Origin,
    Caller,
    Callvalue,
    Calldataload,
    Calldatasize,
    Calldatacopy,
    Codesize,
    Codecopy,
    Gasprice,
    Extcodesize,
    Extcodecopy,
    Returndatasize,
    Returndatacopy,
    Extcodehash,
    Blockhash,
    Coinbase,
    Timestamp,
    Number,
    Prevrandao,
    Gaslimit,
    Chainid,
    Selfbalance,
    Basefee,
    Blobhash,
    Blobbasefee,
    Pop,
    Mload,
    Mstore,
    Mstore8,
    Sload,
    Sstore,
    Jump,
    Jumpi,
    Pc,
    Msize,
    Gas,
    Jumpdest,
    Tload,
    Tstore,
    Mcopy,
    Push0,
    /// PUSH1..PUSH32, width in bytes
    Push(u8),
    /// DUP1..DUP16
    Dup(u8),
    /// SWAP1..SWAP16
    Swap(u8),
    /// LOG0..LOG4, topic count
    Log(u8),
    Create,
    Call,
    Callcode,
    Return,
    Delegatecall,
    Create2,
    Staticcall,
    Revert,
    Invalid,
    Selfdestruct,
    /// Open operator slot in a puzzle template
    Insert,
    /// Byte with no assigned instruction
    Undefined,
}

impl Mnemonic {
    /// Mnemonic for a single opcode byte
    pub fn from_byte(byte: u8) -> Self {
        use Mnemonic::*;
        match byte {
            0x00 => Stop,
            0x01 => Add,
            0x02 => Mul,
            0x03 => Sub,
            0x04 => Div,
            0x05 => Sdiv,
            0x06 => Mod,
            0x07 => Smod,
            0x08 => Addmod,
            0x09 => Mulmod,
            0x0a => Exp,
            0x0b => Signextend,
            0x10 => Lt,
            0x11 => Gt,
            0x12 => Slt,
            0x13 => Sgt,
            0x14 => Eq,
            0x15 => Iszero,
            0x16 => And,
            0x17 => Or,
            0x18 => Xor,
            0x19 => Not,
            0x1a => Byte,
            0x1b => Shl,
            0x1c => Shr,
            0x1d => Sar,
            0x20 => Keccak256,
            0x30 => Address,
            0x31 => Balance,
            0x32 => Origin,
            0x33 => Caller,
            0x34 => Callvalue,
            0x35 => Calldataload,
            0x36 => Calldatasize,
            0x37 => Calldatacopy,
            0x38 => Codesize,
            0x39 => Codecopy,
            0x3a => Gasprice,
            0x3b => Extcodesize,
            0x3c => Extcodecopy,
            0x3d => Returndatasize,
            0x3e => Returndatacopy,
            0x3f => Extcodehash,
            0x40 => Blockhash,
            0x41 => Coinbase,
            0x42 => Timestamp,
            0x43 => Number,
            0x44 => Prevrandao,
            0x45 => Gaslimit,
            0x46 => Chainid,
            0x47 => Selfbalance,
            0x48 => Basefee,
            0x49 => Blobhash,
            0x4a => Blobbasefee,
            0x50 => Pop,
            0x51 => Mload,
            0x52 => Mstore,
            0x53 => Mstore8,
            0x54 => Sload,
            0x55 => Sstore,
            0x56 => Jump,
            0x57 => Jumpi,
            0x58 => Pc,
            0x59 => Msize,
            0x5a => Gas,
            0x5b => Jumpdest,
            0x5c => Tload,
            0x5d => Tstore,
            0x5e => Mcopy,
            0x5f => Push0,
            PUSH1..=PUSH32 => Push(byte - 0x5f),
            0x80..=0x8f => Dup(byte - 0x7f),
            0x90..=0x9f => Swap(byte - 0x8f),
            0xa0..=0xa4 => Log(byte - 0xa0),
            PLACEHOLDER => Insert,
            0xf0 => Create,
            0xf1 => Call,
            0xf2 => Callcode,
            0xf3 => Return,
            0xf4 => Delegatecall,
            0xf5 => Create2,
            0xfa => Staticcall,
            0xfd => Revert,
            0xfe => Invalid,
            0xff => Selfdestruct,
            _ => Undefined,
        }
    }

    /// Number of immediate bytes following the opcode
    pub fn immediate_len(&self) -> usize {
        match self {
            Mnemonic::Push(width) => *width as usize,
            _ => 0,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Mnemonic::*;
        let name = match self {
            Push(n) => return write!(f, "PUSH{}", n),
            Dup(n) => return write!(f, "DUP{}", n),
            Swap(n) => return write!(f, "SWAP{}", n),
            Log(n) => return write!(f, "LOG{}", n),
            Stop => "STOP",
            Add => "ADD",
            Mul => "MUL",
            Sub => "SUB",
            Div => "DIV",
            Sdiv => "SDIV",
            Mod => "MOD",
            Smod => "SMOD",
            Addmod => "ADDMOD",
            Mulmod => "MULMOD",
            Exp => "EXP",
            Signextend => "SIGNEXTEND",
            Lt => "LT",
            Gt => "GT",
            Slt => "SLT",
            Sgt => "SGT",
            Eq => "EQ",
            Iszero => "ISZERO",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Not => "NOT",
            Byte => "BYTE",
            Shl => "SHL",
            Shr => "SHR",
            Sar => "SAR",
            Keccak256 => "KECCAK256",
            Address => "ADDRESS",
            Balance => "BALANCE",
            Origin => "ORIGIN",
            Caller => "CALLER",
            Callvalue => "CALLVALUE",
            Calldataload => "CALLDATALOAD",
            Calldatasize => "CALLDATASIZE",
            Calldatacopy => "CALLDATACOPY",
            Codesize => "CODESIZE",
            Codecopy => "CODECOPY",
            Gasprice => "GASPRICE",
            Extcodesize => "EXTCODESIZE",
            Extcodecopy => "EXTCODECOPY",
            Returndatasize => "RETURNDATASIZE",
            Returndatacopy => "RETURNDATACOPY",
            Extcodehash => "EXTCODEHASH",
            Blockhash => "BLOCKHASH",
            Coinbase => "COINBASE",
            Timestamp => "TIMESTAMP",
            Number => "NUMBER",
            Prevrandao => "PREVRANDAO",
            Gaslimit => "GASLIMIT",
            Chainid => "CHAINID",
            Selfbalance => "SELFBALANCE",
            Basefee => "BASEFEE",
            Blobhash => "BLOBHASH",
            Blobbasefee => "BLOBBASEFEE",
            Pop => "POP",
            Mload => "MLOAD",
            Mstore => "MSTORE",
            Mstore8 => "MSTORE8",
            Sload => "SLOAD",
            Sstore => "SSTORE",
            Jump => "JUMP",
            Jumpi => "JUMPI",
            Pc => "PC",
            Msize => "MSIZE",
            Gas => "GAS",
            Jumpdest => "JUMPDEST",
            Tload => "TLOAD",
            Tstore => "TSTORE",
            Mcopy => "MCOPY",
            Push0 => "PUSH0",
            Create => "CREATE",
            Call => "CALL",
            Callcode => "CALLCODE",
            Return => "RETURN",
            Delegatecall => "DELEGATECALL",
            Create2 => "CREATE2",
            Staticcall => "STATICCALL",
            Revert => "REVERT",
            Invalid => "INVALID",
            Selfdestruct => "SELFDESTRUCT",
            Insert => "INSERT",
            Undefined => "UNDEFINED",
        };
        f.write_str(name)
    }
}

/// One row of the opcode table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub byte: u8,
    pub mnemonic: Mnemonic,
    pub immediate_len: usize,
}

lazy_static! {
    static ref OPCODE_TABLE: Vec<OpcodeEntry> = (0..=u8::MAX)
        .map(|byte| {
            let mnemonic = Mnemonic::from_byte(byte);
            OpcodeEntry {
                byte,
                mnemonic,
                immediate_len: mnemonic.immediate_len(),
            }
        })
        .collect();
}

/// Look up the table entry for a byte. Never fails.
pub fn lookup(byte: u8) -> &'static OpcodeEntry {
    &OPCODE_TABLE[byte as usize]
}

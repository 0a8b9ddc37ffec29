use crate::error::DecodeError;
use crate::opcodes::{self, Mnemonic};
use crate::util::to_hex_upper;
use log::debug;
use std::fmt::{Display, Error, Formatter};

/// A decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode within the code
    pub pc: usize,
    /// The raw opcode value
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    /// Immediate operand bytes, empty for everything but PUSH1..PUSH32
    pub immediate: Vec<u8>,
}

impl Instruction {
    /// Decode the instruction starting at `pc`
    pub fn decode(code: &[u8], pc: usize) -> Result<Self, DecodeError> {
        if pc >= code.len() {
            return Err(DecodeError::OutOfBounds {
                pc,
                len: code.len(),
            });
        }

        let entry = opcodes::lookup(code[pc]);
        let start = pc + 1;
        let available = code.len() - start;
        if entry.immediate_len > available {
            debug!(
                "{:#04x}: {} wants {} immediate bytes, only {} left",
                pc, entry.mnemonic, entry.immediate_len, available
            );
            return Err(DecodeError::TruncatedOperand {
                pc,
                expected: entry.immediate_len,
                available,
            });
        }

        Ok(Instruction {
            pc,
            opcode: entry.byte,
            mnemonic: entry.mnemonic,
            immediate: code[start..start + entry.immediate_len].to_vec(),
        })
    }

    /// Total size of instruction in bytes
    pub fn size(&self) -> usize {
        1 + self.immediate.len()
    }

    /// Offset of the following instruction
    pub fn next_pc(&self) -> usize {
        self.pc + self.size()
    }

    pub fn is_placeholder(&self) -> bool {
        self.mnemonic == Mnemonic::Insert
    }

    /// Opcode and immediate as they appear in the code
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.immediate);
        bytes
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.mnemonic)?;
        if !self.immediate.is_empty() {
            write!(f, " {}", to_hex_upper(&self.immediate))?;
        }
        Ok(())
    }
}

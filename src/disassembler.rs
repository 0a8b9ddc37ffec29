use crate::error::DecodeError;
use crate::instruction::Instruction;
use log::debug;

/// Splits a code buffer into instructions. No execution semantics: jump
/// targets, push data and unreachable tails are all decoded the same way.
pub struct Disassembler<'a> {
    code: &'a [u8],
}

impl<'a> Disassembler<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Disassembler { code }
    }

    /// Iterate over instructions in code order.
    ///
    /// Yields at most one error; iteration stops after it.
    pub fn instructions(&self) -> Instructions<'a> {
        Instructions {
            code: self.code,
            pc: 0,
            failed: false,
        }
    }

    /// Decode the whole buffer. A truncated trailing push fails the whole call.
    pub fn decode_all(&self) -> Result<Vec<Instruction>, DecodeError> {
        let instructions = self.instructions().collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Disassembled {} instructions ({} bytes)",
            instructions.len(),
            self.code.len()
        );
        Ok(instructions)
    }
}

pub struct Instructions<'a> {
    code: &'a [u8],
    pc: usize,
    failed: bool,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pc >= self.code.len() {
            return None;
        }
        match Instruction::decode(self.code, self.pc) {
            Ok(instruction) => {
                self.pc = instruction.next_pc();
                Some(Ok(instruction))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Convenience function to decode a complete code buffer
pub fn decode(code: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    Disassembler::new(code).decode_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::{Mnemonic, PLACEHOLDER};
    use test_log::test;

    #[test]
    fn test_empty_input() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_byte_instructions_get_consecutive_pcs() {
        let code = vec![0x01, 0x02, 0x03, 0x04, 0x5b, 0x00, 0xfd, 0x0c];
        let instructions = decode(&code).unwrap();
        assert_eq!(instructions.len(), code.len());
        for (i, inst) in instructions.iter().enumerate() {
            assert_eq!(inst.pc, i);
            assert_eq!(inst.opcode, code[i]);
        }
        assert_eq!(instructions[7].mnemonic, Mnemonic::Undefined);
    }

    #[test]
    fn test_pc_counts_bytes_not_instructions() {
        // PUSH1 0a, PUSH3 010203, ADD, PUSH32 <32 bytes>, STOP
        let mut code = vec![0x60, 0x0a, 0x62, 0x01, 0x02, 0x03, 0x01, 0x7f];
        code.extend(std::iter::repeat(0xee).take(32));
        code.push(0x00);

        let pcs: Vec<usize> = decode(&code).unwrap().iter().map(|i| i.pc).collect();
        assert_eq!(pcs, vec![0, 2, 6, 7, 40]);
    }

    #[test]
    fn test_push_data_is_not_decoded() {
        // PUSH2 whose data looks like PUSH1 + STOP
        let code = vec![0x61, 0x60, 0x00, 0x01];
        let instructions = decode(&code).unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].immediate, vec![0x60, 0x00]);
        assert_eq!(instructions[1].pc, 3);
    }

    #[test]
    fn test_truncated_push_is_fatal() {
        let code = vec![0x60, 0x01, 0x63, 0x01, 0x02];
        assert_eq!(
            decode(&code),
            Err(DecodeError::TruncatedOperand {
                pc: 2,
                expected: 4,
                available: 2,
            })
        );
        // a push with no data at all
        assert!(matches!(
            decode(&[0x60]),
            Err(DecodeError::TruncatedOperand { available: 0, .. })
        ));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let code = vec![0x01, 0x61, 0x01];
        let mut it = Disassembler::new(&code).instructions();
        assert!(it.next().unwrap().is_ok());
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_placeholders_decode_as_insert() {
        let code = vec![0x60, 0x01, 0x60, 0x02, PLACEHOLDER];
        let instructions = decode(&code).unwrap();
        assert_eq!(instructions[2].mnemonic, Mnemonic::Insert);
        assert_eq!(instructions[2].pc, 4);
    }
}

//! Puzzle templates and placeholder substitution
//!
//! A template is ordinary code with [`PLACEHOLDER`] bytes where the player's
//! operators go. Substitution is byte-for-byte: the n-th placeholder from the
//! left receives the n-th operator, every other byte is copied unchanged.

use crate::disassembler;
use crate::error::PuzzleError;
use crate::instruction::Instruction;
use crate::opcodes::PLACEHOLDER;
use crate::util::{parse_hex_code, to_hex};
use crate::validator::{SolutionInput, OPERATOR_COUNT};
use log::debug;

/// A puzzle skeleton with exactly [`OPERATOR_COUNT`] open operator slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleTemplate {
    id: usize,
    bytes: Vec<u8>,
    instructions: Vec<Instruction>,
}

impl PuzzleTemplate {
    /// Build a template from code bytes, checking that the code decodes cleanly
    /// and that every placeholder byte is a standalone instruction.
    pub fn new(id: usize, bytes: Vec<u8>) -> Result<Self, PuzzleError> {
        let instructions = disassembler::decode(&bytes)?;

        if let Some(inst) = instructions
            .iter()
            .find(|inst| inst.immediate.contains(&PLACEHOLDER))
        {
            return Err(PuzzleError::PlaceholderInImmediate { pc: inst.pc });
        }

        let found = instructions.iter().filter(|inst| inst.is_placeholder()).count();
        if found != OPERATOR_COUNT {
            return Err(PuzzleError::WrongPlaceholderCount {
                expected: OPERATOR_COUNT,
                found,
            });
        }

        Ok(PuzzleTemplate {
            id,
            bytes,
            instructions,
        })
    }

    /// Parse corpus text such as `600a600bXX...`
    pub fn from_hex(id: usize, text: &str) -> Result<Self, PuzzleError> {
        Self::new(id, parse_hex_code(text)?)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decoded listing of the template, placeholders shown as INSERT
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Byte offsets of the placeholders, left to right
    pub fn placeholder_offsets(&self) -> Vec<usize> {
        placeholder_offsets(&self.bytes)
    }
}

/// A template with every placeholder filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCode {
    bytes: Vec<u8>,
}

impl ResolvedCode {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        ResolvedCode { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex without prefix, as handed to runners and playground links
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

pub fn placeholder_offsets(code: &[u8]) -> Vec<usize> {
    code.iter()
        .enumerate()
        .filter(|(_, b)| **b == PLACEHOLDER)
        .map(|(i, _)| i)
        .collect()
}

/// Replace placeholders left to right with `operators`.
///
/// Fails when the number of placeholders and operators differ.
pub fn substitute(code: &[u8], operators: &[u8]) -> Result<Vec<u8>, PuzzleError> {
    let placeholders = code.iter().filter(|b| **b == PLACEHOLDER).count();
    if placeholders != operators.len() {
        return Err(PuzzleError::PlaceholderCountMismatch {
            placeholders,
            operators: operators.len(),
        });
    }

    let mut next = operators.iter();
    let resolved = code
        .iter()
        .map(|&b| match b {
            PLACEHOLDER => next.next().copied().unwrap_or(b),
            _ => b,
        })
        .collect();
    Ok(resolved)
}

/// Fill a template with a validated solution
pub fn resolve(
    template: &PuzzleTemplate,
    solution: &SolutionInput,
) -> Result<ResolvedCode, PuzzleError> {
    let bytes = substitute(&template.bytes, &solution.operator_bytes())?;
    debug!(
        "Resolved puzzle {} with {}: {}",
        template.id,
        solution,
        to_hex(&bytes)
    );
    Ok(ResolvedCode::from_bytes(bytes))
}

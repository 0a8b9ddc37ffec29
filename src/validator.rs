//! Player input validation
//!
//! A solution is typed as the three operator opcodes back to back, e.g.
//! `010203` for ADD, MUL, SUB. Anything else is rejected with the single
//! [`ValidationFailure`] value and the player is asked again.

use crate::error::ValidationFailure;
use crate::opcodes::{arith, Mnemonic};
use crate::util::hex_value;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Number of operator slots in every puzzle
pub const OPERATOR_COUNT: usize = 3;

/// The four operators a player may place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Mul,
    Sub,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Mul, Operator::Sub, Operator::Div];

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            arith::ADD => Some(Operator::Add),
            arith::MUL => Some(Operator::Mul),
            arith::SUB => Some(Operator::Sub),
            arith::DIV => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Operator::Add => arith::ADD,
            Operator::Mul => arith::MUL,
            Operator::Sub => arith::SUB,
            Operator::Div => arith::DIV,
        }
    }

    pub fn mnemonic(self) -> Mnemonic {
        Mnemonic::from_byte(self.byte())
    }
}

/// Three validated operators in the order the player typed them.
///
/// The first operator fills the leftmost placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionInput {
    operators: [Operator; OPERATOR_COUNT],
}

impl SolutionInput {
    pub fn operators(&self) -> &[Operator; OPERATOR_COUNT] {
        &self.operators
    }

    pub fn operator_bytes(&self) -> [u8; OPERATOR_COUNT] {
        self.operators.map(Operator::byte)
    }
}

impl fmt::Display for SolutionInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for op in &self.operators {
            write!(f, "{:02x}", op.byte())?;
        }
        Ok(())
    }
}

impl FromStr for SolutionInput {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Check raw player text and turn it into a [`SolutionInput`].
///
/// The text must be exactly six hex digits (either case) forming three
/// allowed operator bytes. No trimming happens here.
pub fn validate(raw: &str) -> Result<SolutionInput, ValidationFailure> {
    let digits = raw.as_bytes();
    if digits.len() != OPERATOR_COUNT * 2 {
        debug!("Rejecting solution '{}': wrong length {}", raw, digits.len());
        return Err(ValidationFailure);
    }

    let mut operators = [Operator::Add; OPERATOR_COUNT];
    for (slot, pair) in operators.iter_mut().zip(digits.chunks(2)) {
        let byte = match (hex_value(pair[0]), hex_value(pair[1])) {
            (Some(hi), Some(lo)) => (hi << 4) | lo,
            _ => {
                debug!("Rejecting solution '{}': not hex", raw);
                return Err(ValidationFailure);
            }
        };
        *slot = Operator::from_byte(byte).ok_or_else(|| {
            debug!("Rejecting solution '{}': {:02x} is not an operator", raw, byte);
            ValidationFailure
        })?;
    }

    Ok(SolutionInput { operators })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_accepts_three_operators() {
        let solution = validate("010203").unwrap();
        assert_eq!(
            solution.operators(),
            &[Operator::Add, Operator::Mul, Operator::Sub]
        );
    }

    #[test]
    fn test_preserves_order() {
        let solution = validate("040201").unwrap();
        assert_eq!(solution.operator_bytes(), [0x04, 0x02, 0x01]);
        assert_eq!(solution.to_string(), "040201");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(validate("01020"), Err(ValidationFailure));
        assert_eq!(validate("01020304"), Err(ValidationFailure));
        assert_eq!(validate(""), Err(ValidationFailure));
        assert_eq!(validate(" 010203"), Err(ValidationFailure));
    }

    #[test]
    fn test_rejects_disallowed_bytes() {
        assert_eq!(validate("0105aa"), Err(ValidationFailure));
        assert_eq!(validate("000102"), Err(ValidationFailure));
        assert_eq!(validate("0a0102"), Err(ValidationFailure));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert_eq!(validate("01020g"), Err(ValidationFailure));
        assert_eq!(validate("+1+2+3"), Err(ValidationFailure));
        // six bytes, five characters
        assert_eq!(validate("01é03"), Err(ValidationFailure));
    }

    #[test]
    fn test_operator_bytes_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_byte(op.byte()), Some(op));
        }
        assert_eq!(Operator::Div.mnemonic(), Mnemonic::Div);
    }

    #[test]
    fn test_from_str() {
        let solution: SolutionInput = "030401".parse().unwrap();
        assert_eq!(solution.operator_bytes(), [0x03, 0x04, 0x01]);
        assert!("zz".parse::<SolutionInput>().is_err());
    }
}

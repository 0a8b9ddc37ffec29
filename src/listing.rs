//! Terminal listing of decoded instructions
//!
//! Three columns: byte position, raw hex of the instruction, mnemonic text.
//! A few mnemonics are tinted so the shape of a puzzle stands out:
//! STOP green, REVERT red, JUMPDEST cyan and open slots (INSERT) blue.

use crate::instruction::Instruction;
use crate::opcodes::Mnemonic;
use crate::util::to_hex_upper;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Spacing after the widest hex column entry
const HEX_COLUMN_GAP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub position: String,
    pub hex: String,
    pub text: String,
    pub color: Option<Color>,
}

pub fn tint(mnemonic: Mnemonic) -> Option<Color> {
    match mnemonic {
        Mnemonic::Stop => Some(Color::Green),
        Mnemonic::Revert => Some(Color::Red),
        Mnemonic::Jumpdest => Some(Color::Cyan),
        Mnemonic::Insert => Some(Color::Blue),
        _ => None,
    }
}

pub fn rows(instructions: &[Instruction]) -> Vec<ListingRow> {
    instructions
        .iter()
        .map(|inst| {
            let color = if inst.immediate.is_empty() {
                tint(inst.mnemonic)
            } else {
                None
            };
            ListingRow {
                position: format!("{:02X}", inst.pc),
                hex: to_hex_upper(&inst.bytes()),
                text: inst.to_string(),
                color,
            }
        })
        .collect()
}

fn write_cell<W: Write>(out: &mut W, text: &str, color: Option<Color>, colored: bool) -> io::Result<()> {
    match color {
        Some(color) if colored => queue!(out, SetForegroundColor(color), Print(text), ResetColor),
        _ => queue!(out, Print(text)),
    }
}

/// Write the listing, one instruction per line
pub fn write_listing<W: Write>(
    out: &mut W,
    instructions: &[Instruction],
    colored: bool,
) -> io::Result<()> {
    let rows = rows(instructions);
    let width = rows.iter().map(|r| r.hex.len()).max().unwrap_or(0) + HEX_COLUMN_GAP;

    for row in &rows {
        write_cell(out, &row.position, Some(Color::DarkGrey), colored)?;
        queue!(out, Print("      "))?;
        write_cell(out, &format!("{:<width$}", row.hex, width = width), row.color, colored)?;
        queue!(out, Print(" "))?;
        write_cell(out, &row.text, row.color, colored)?;
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Plain text listing, mainly for logs and tests
pub fn render(instructions: &[Instruction]) -> String {
    let mut out = Vec::new();
    // writing to a Vec cannot fail
    let _ = write_listing(&mut out, instructions, false);
    String::from_utf8_lossy(&out).into_owned()
}

/// `#`-boxed title such as
///
/// ```text
/// ############
/// # Puzzle 3 #
/// ############
/// ```
pub fn title_banner(puzzle_number: usize) -> String {
    let text = format!("Puzzle {}", puzzle_number);
    let border = "#".repeat(text.len() + 4);
    format!("{}\n# {} #\n{}\n", border, text, border)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::decode;
    use crate::util::parse_hex_code;
    use test_log::test;

    #[test]
    fn test_rows() {
        let code = parse_hex_code("600aXX5b00fd").unwrap();
        let rows = rows(&decode(&code).unwrap());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].position, "00");
        assert_eq!(rows[0].hex, "600A");
        assert_eq!(rows[0].text, "PUSH1 0A");
        assert_eq!(rows[0].color, None);
        assert_eq!(rows[1].position, "02");
        assert_eq!(rows[1].text, "INSERT");
        assert_eq!(rows[1].color, Some(Color::Blue));
        assert_eq!(rows[2].color, Some(Color::Cyan));
        assert_eq!(rows[3].color, Some(Color::Green));
        assert_eq!(rows[4].color, Some(Color::Red));
    }

    #[test]
    fn test_positions_are_byte_offsets_in_hex() {
        let mut code = Vec::new();
        for _ in 0..9 {
            code.extend_from_slice(&[0x60, 0x01]);
        }
        code.push(0x00);
        let rows = rows(&decode(&code).unwrap());
        assert_eq!(rows.last().unwrap().position, "12");
    }

    #[test]
    fn test_render_plain() {
        let code = parse_hex_code("6102ff01").unwrap();
        let text = render(&decode(&code).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        // widest hex is 6 chars, padded to 11
        assert_eq!(lines[0], "00      6102FF      PUSH2 02FF");
        assert_eq!(lines[1], "03      01          ADD");
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let code = parse_hex_code("00").unwrap();
        let mut out = Vec::new();
        write_listing(&mut out, &decode(&code).unwrap(), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("STOP"));
    }

    #[test]
    fn test_title_banner() {
        assert_eq!(
            title_banner(3),
            "############\n# Puzzle 3 #\n############\n"
        );
    }
}

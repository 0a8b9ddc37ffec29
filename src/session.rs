//! Interactive play loop
//!
//! The session owns the terminal side of the game: it shows a puzzle, keeps
//! asking until the input validates, reports the verdict and asks whether to
//! continue. Counters live in an explicit [`SessionState`] value that is
//! threaded through the loop and returned at the end.

use crate::attempt::{Attempt, AttemptReport, Outcome, Submission};
use crate::bridge::ExecutionBridge;
use crate::corpus::{Corpus, PuzzlePicker};
use crate::disassembler;
use crate::error::{PuzzleError, SessionError};
use crate::listing::{title_banner, write_listing};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::debug;
use std::io::{self, BufRead, Write};

pub const WELCOME: &str = "\nWelcome to the 4=10 EVM Codes puzzle game!\n\n\
Your task is to manipulate the 4 numbers on the stack to yield 10 using the 4 basic mathematical operations.\n\n\
The only allowed opcodes are 01 (ADD), 02 (MUL), 03 (SUB) and 04 (DIV).\n";

pub const SOLUTION_PROMPT: &str = "Enter the opcodes unseparated:";
pub const PLAY_NEXT_PROMPT: &str = "Do you want to play the next puzzle?";
pub const TRY_AGAIN_PROMPT: &str = "Do you want to try again?";
pub const SOLVED_MESSAGE: &str = "Puzzle solved!";
pub const WRONG_MESSAGE: &str = "Wrong solution :(";
pub const FAREWELL: &str = "Thanks for playing!";

/// Counters carried from one attempt to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Number shown in the title, starting at 1
    pub puzzle_number: usize,
    /// Corpus index of the current puzzle
    pub puzzle_index: usize,
    /// Judged attempts on the current puzzle
    pub attempts: usize,
    pub total_attempts: usize,
    pub solved: usize,
    /// Lines rejected by validation, over the whole session
    pub reprompts: usize,
}

impl SessionState {
    pub fn new(puzzle_index: usize) -> Self {
        SessionState {
            puzzle_number: 1,
            puzzle_index,
            attempts: 0,
            total_attempts: 0,
            solved: 0,
            reprompts: 0,
        }
    }

    pub fn record(self, outcome: Outcome, reprompts: usize) -> Self {
        SessionState {
            attempts: self.attempts + 1,
            total_attempts: self.total_attempts + 1,
            solved: self.solved + usize::from(outcome == Outcome::Solved),
            reprompts: self.reprompts + reprompts,
            ..self
        }
    }

    /// Move on to a new puzzle
    pub fn advance(self, puzzle_index: usize) -> Self {
        SessionState {
            puzzle_number: self.puzzle_number + 1,
            puzzle_index,
            attempts: 0,
            ..self
        }
    }
}

/// Line reader that reports end of input instead of returning empty lines forever.
///
/// Bytes that are not UTF-8 come through as replacement characters, so a
/// garbled line is just another invalid answer.
pub struct LineInput<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Next line without its terminator, `None` once input is exhausted
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            debug!("Input: EOF detected");
            return Ok(None);
        }
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }
        let line = String::from_utf8_lossy(&self.buffer).into_owned();
        debug!("Input received: '{}'", line);
        Ok(Some(line))
    }
}

pub struct Session<'c, R: BufRead, W: Write, B: ExecutionBridge> {
    corpus: &'c Corpus,
    picker: PuzzlePicker,
    input: LineInput<R>,
    out: W,
    bridge: B,
    colored: bool,
}

impl<'c, R: BufRead, W: Write, B: ExecutionBridge> Session<'c, R, W, B> {
    pub fn new(corpus: &'c Corpus, picker: PuzzlePicker, input: R, out: W, bridge: B) -> Self {
        Session {
            corpus,
            picker,
            input: LineInput::new(input),
            out,
            bridge,
            colored: false,
        }
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Play until the player declines or input runs out
    pub fn run(&mut self) -> Result<SessionState, SessionError> {
        writeln!(self.out, "{}", WELCOME)?;
        let mut state = SessionState::new(self.picker.pick(self.corpus.len()));

        loop {
            let report = match self.play_puzzle(&state)? {
                Some(report) => report,
                None => return self.farewell(state),
            };
            state = state.record(report.outcome, report.invalid_inputs);

            let question = match report.outcome {
                Outcome::Solved => PLAY_NEXT_PROMPT,
                Outcome::Rejected => TRY_AGAIN_PROMPT,
            };
            if !self.confirm(question)? {
                return self.farewell(state);
            }
            if report.outcome == Outcome::Solved {
                state = state.advance(self.picker.pick(self.corpus.len()));
            }
            debug!("Session state: {:?}", state);
        }
    }

    /// One attempt at the current puzzle. `None` when input ran out first.
    fn play_puzzle(&mut self, state: &SessionState) -> Result<Option<AttemptReport>, SessionError> {
        let corpus = self.corpus;
        let template = corpus
            .get(state.puzzle_index)
            .ok_or(SessionError::NoSuchPuzzle(state.puzzle_index))?;

        writeln!(self.out, "{}", title_banner(state.puzzle_number))?;
        write_listing(&mut self.out, template.instructions(), self.colored)?;
        writeln!(self.out)?;

        let mut attempt = Attempt::new(template);
        loop {
            self.prompt(SOLUTION_PROMPT)?;
            let line = match self.input.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            match attempt.submit(line.trim()) {
                Ok(Submission::Accepted) => break,
                Ok(Submission::Ignored) => {
                    return Err(PuzzleError::AttemptNotReady("solution already taken").into())
                }
                Err(_) => continue,
            }
        }

        let report = attempt.finish(&mut self.bridge)?.clone();

        writeln!(self.out)?;
        let resolved = disassembler::decode(report.resolved.bytes()).map_err(PuzzleError::from)?;
        write_listing(&mut self.out, &resolved, self.colored)?;
        writeln!(self.out)?;
        match report.outcome {
            Outcome::Solved => self.colored_line(SOLVED_MESSAGE, Color::Green)?,
            Outcome::Rejected => self.colored_line(WRONG_MESSAGE, Color::Red)?,
        }
        writeln!(self.out)?;
        writeln!(self.out, "Run it in evm.codes: {}", report.playground_url)?;
        writeln!(self.out)?;
        Ok(Some(report))
    }

    /// Yes/no question, empty answer means yes and end of input means no
    fn confirm(&mut self, question: &str) -> Result<bool, SessionError> {
        loop {
            self.prompt(&format!("{} (Y/n)", question))?;
            let answer = match self.input.read_line()? {
                Some(line) => line.trim().to_ascii_lowercase(),
                None => return Ok(false),
            };
            match answer.as_str() {
                "" | "y" | "yes" => {
                    writeln!(self.out)?;
                    return Ok(true);
                }
                "n" | "no" => {
                    writeln!(self.out)?;
                    return Ok(false);
                }
                _ => continue,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        if self.colored {
            queue!(self.out, SetForegroundColor(Color::Green), Print("? "), ResetColor)?;
        } else {
            write!(self.out, "? ")?;
        }
        write!(self.out, "{} ", text)?;
        self.out.flush()
    }

    fn colored_line(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.colored {
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor, Print("\n"))
        } else {
            writeln!(self.out, "{}", text)
        }
    }

    fn farewell(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        writeln!(self.out, "{}", FAREWELL)?;
        self.out.flush()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_state_record_and_advance() {
        let state = SessionState::new(5)
            .record(Outcome::Rejected, 3)
            .record(Outcome::Solved, 0);
        assert_eq!(state.attempts, 2);
        assert_eq!(state.solved, 1);
        assert_eq!(state.puzzle_number, 1);

        let state = state.advance(9);
        assert_eq!(state.puzzle_number, 2);
        assert_eq!(state.puzzle_index, 9);
        assert_eq!(state.attempts, 0);
        assert_eq!(state.total_attempts, 2);
        assert_eq!(state.reprompts, 3);
    }

    #[test]
    fn test_line_input() {
        let mut input = LineInput::new("010203\r\n  \nlast".as_bytes());
        assert_eq!(input.read_line().unwrap(), Some("010203".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("  ".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("last".to_string()));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_line_input_survives_bad_utf8() {
        let mut input = LineInput::new(&b"\xff\xfe01\n010203\n"[..]);
        assert_eq!(
            input.read_line().unwrap(),
            Some("\u{fffd}\u{fffd}01".to_string())
        );
        assert_eq!(input.read_line().unwrap(), Some("010203".to_string()));
    }
}

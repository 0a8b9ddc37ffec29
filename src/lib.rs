#![crate_name = "fourten"]

#[macro_use]
extern crate lazy_static;

pub mod attempt;
pub mod bridge;
pub mod config;
pub mod corpus;
pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod listing;
pub mod opcodes;
pub mod session;
pub mod template;
pub mod util;
pub mod validator;

pub use attempt::{Attempt, AttemptReport, AttemptState, Outcome};
pub use bridge::{CommandBridge, ExecutionBridge};
pub use config::Config;
pub use corpus::{Corpus, PuzzlePicker};
pub use error::{BridgeError, DecodeError, PuzzleError, ValidationFailure};
pub use instruction::Instruction;
pub use session::{Session, SessionState};
pub use template::{resolve, substitute, PuzzleTemplate, ResolvedCode};
pub use validator::{validate, SolutionInput};

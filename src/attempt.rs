//! One attempt at one puzzle
//!
//! ```text
//! AwaitingInput --submit ok--> Resolving --step--> Judging --step--> Solved | Rejected
//!       ^   |
//!       +---+ submit fails (re-prompt, state unchanged)
//! ```
//!
//! The attempt never loops on its own: the caller feeds input and drives
//! [`Attempt::step`] (or [`Attempt::finish`]) so every suspension point stays
//! visible to the session.

use crate::bridge::ExecutionBridge;
use crate::error::{PuzzleError, ValidationFailure};
use crate::template::{resolve, PuzzleTemplate, ResolvedCode};
use crate::validator::{validate, SolutionInput};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    Rejected,
}

/// What became of a submitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// A solution was already taken; the line was dropped
    Ignored,
}

/// What happened, handed to the session once the attempt is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub outcome: Outcome,
    pub solution: SolutionInput,
    pub resolved: ResolvedCode,
    pub playground_url: String,
    /// Lines turned away before the solution was accepted
    pub invalid_inputs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    AwaitingInput,
    Resolving(SolutionInput),
    Judging {
        solution: SolutionInput,
        resolved: ResolvedCode,
    },
    Solved(AttemptReport),
    Rejected(AttemptReport),
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Solved(_) | AttemptState::Rejected(_))
    }

    pub fn report(&self) -> Option<&AttemptReport> {
        match self {
            AttemptState::Solved(report) | AttemptState::Rejected(report) => Some(report),
            _ => None,
        }
    }
}

pub struct Attempt<'t> {
    template: &'t PuzzleTemplate,
    state: AttemptState,
    /// Inputs turned away while awaiting a valid solution
    invalid_inputs: usize,
}

impl<'t> Attempt<'t> {
    pub fn new(template: &'t PuzzleTemplate) -> Self {
        Attempt {
            template,
            state: AttemptState::AwaitingInput,
            invalid_inputs: 0,
        }
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn template(&self) -> &PuzzleTemplate {
        self.template
    }

    pub fn invalid_inputs(&self) -> usize {
        self.invalid_inputs
    }

    /// Offer raw player text. Only accepted while awaiting input.
    pub fn submit(&mut self, raw: &str) -> Result<Submission, ValidationFailure> {
        if self.state != AttemptState::AwaitingInput {
            debug!("Ignoring input '{}', attempt already has a solution", raw);
            return Ok(Submission::Ignored);
        }
        match validate(raw) {
            Ok(solution) => {
                self.state = AttemptState::Resolving(solution);
                Ok(Submission::Accepted)
            }
            Err(e) => {
                self.invalid_inputs += 1;
                Err(e)
            }
        }
    }

    /// Perform one transition. Bridge failures count as a rejection;
    /// substitution failures are returned.
    pub fn step(&mut self, bridge: &mut dyn ExecutionBridge) -> Result<&AttemptState, PuzzleError> {
        let next = match &self.state {
            AttemptState::AwaitingInput => {
                return Err(PuzzleError::AttemptNotReady("no valid solution submitted"))
            }
            AttemptState::Resolving(solution) => AttemptState::Judging {
                solution: *solution,
                resolved: resolve(self.template, solution)?,
            },
            AttemptState::Judging { solution, resolved } => {
                let passed = match bridge.execute(resolved) {
                    Ok(passed) => passed,
                    Err(e) => {
                        warn!("Execution failed, counting as rejected: {}", e);
                        false
                    }
                };
                let report = AttemptReport {
                    outcome: if passed {
                        Outcome::Solved
                    } else {
                        Outcome::Rejected
                    },
                    solution: *solution,
                    resolved: resolved.clone(),
                    playground_url: bridge.playground_url(resolved),
                    invalid_inputs: self.invalid_inputs,
                };
                debug!(
                    "Puzzle {} with {}: {:?}",
                    self.template.id(),
                    solution,
                    report.outcome
                );
                if passed {
                    AttemptState::Solved(report)
                } else {
                    AttemptState::Rejected(report)
                }
            }
            AttemptState::Solved(_) | AttemptState::Rejected(_) => return Ok(&self.state),
        };
        self.state = next;
        Ok(&self.state)
    }

    /// Drive the attempt to a terminal state
    pub fn finish(&mut self, bridge: &mut dyn ExecutionBridge) -> Result<&AttemptReport, PuzzleError> {
        while !self.state.is_terminal() {
            self.step(bridge)?;
        }
        self.state
            .report()
            .ok_or(PuzzleError::AttemptNotReady("attempt ended without a report"))
    }
}

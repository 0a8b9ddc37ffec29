//! Puzzle corpus and random puzzle selection
//!
//! The corpus is a JSON file of the form `{"puzzles": ["<hex>", ...]}` where
//! each entry is template code with `XX` marking the operator slots. Every
//! entry is checked when the file is loaded so a broken template never
//! reaches a player.

use crate::error::CorpusError;
use crate::template::PuzzleTemplate;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct CorpusFile {
    puzzles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Corpus {
    templates: Vec<PuzzleTemplate>,
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        debug!("Loading puzzle corpus: {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json_str(&text)?;
        info!("Loaded {} puzzles from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = serde_json::from_str(text)?;
        Self::from_hex_strings(&file.puzzles)
    }

    /// Build from in-memory template text; the template id is its index
    pub fn from_hex_strings<S: AsRef<str>>(puzzles: &[S]) -> Result<Self, CorpusError> {
        if puzzles.is_empty() {
            return Err(CorpusError::Empty);
        }
        let templates = puzzles
            .iter()
            .enumerate()
            .map(|(index, text)| {
                PuzzleTemplate::from_hex(index, text.as_ref())
                    .map_err(|source| CorpusError::Template { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Corpus { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PuzzleTemplate> {
        self.templates.get(index)
    }
}

/// RandMode controls puzzle order. Predictable for tests and replays, uniform for play
pub enum RandMode {
    Predictable,
    RandomUniform,
}

pub struct PuzzlePicker {
    rng: Box<dyn RngCore>,
    rand_mode: RandMode,
}

impl PuzzlePicker {
    pub fn new_uniform() -> PuzzlePicker {
        PuzzlePicker {
            rng: Box::new(StdRng::from_entropy()),
            rand_mode: RandMode::RandomUniform,
        }
    }

    pub fn new_predictable(seed: u64) -> PuzzlePicker {
        PuzzlePicker {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            rand_mode: RandMode::Predictable,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> PuzzlePicker {
        match seed {
            Some(seed) => Self::new_predictable(seed),
            None => Self::new_uniform(),
        }
    }

    pub fn is_predictable(&self) -> bool {
        matches!(self.rand_mode, RandMode::Predictable)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, PuzzleError};
    use test_log::test;

    const PUZZLES: &str = r#"{"puzzles": [
        "6002600360046005XXXXXX600a14601557600080fd5b00",
        "6001600160016007XXXXXX600a14601557600080fd5b00"
    ]}"#;

    #[test]
    fn test_load_from_json() {
        let corpus = Corpus::from_json_str(PUZZLES).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().id(), 1);
        assert!(corpus.get(2).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("fourten-corpus-{}.json", std::process::id()));
        fs::write(&path, PUZZLES).unwrap();
        let corpus = Corpus::load(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(corpus.unwrap().len(), 2);
    }

    #[test]
    fn test_bad_corpus() {
        assert!(matches!(
            Corpus::from_json_str(r#"{"puzzles": []}"#),
            Err(CorpusError::Empty)
        ));
        assert!(matches!(
            Corpus::from_json_str(r#"{"levels": []}"#),
            Err(CorpusError::Parse(_))
        ));
        assert!(matches!(
            Corpus::from_hex_strings(&["XXXXXX", "XXXXXX61"]),
            Err(CorpusError::Template {
                index: 1,
                source: PuzzleError::Decode(DecodeError::TruncatedOperand { .. })
            })
        ));
        assert!(matches!(
            Corpus::load(Path::new("/nonexistent/puzzles.json")),
            Err(CorpusError::Io { .. })
        ));
    }

    #[test]
    fn test_predictable_picker_repeats() {
        let mut a = PuzzlePicker::new_predictable(42);
        let mut b = PuzzlePicker::new_predictable(42);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(25047)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(25047)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|i| *i < 25047));
        assert!(a.is_predictable());
        assert!(!PuzzlePicker::new_uniform().is_predictable());
    }
}

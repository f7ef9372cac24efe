use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type QuestionId = u32;
pub type OptionKey = String;

/// A single multiple-choice question as it appears in a bank file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: BTreeMap<OptionKey, String>,
    pub correct_answer: OptionKey,
    pub points: u32,
}

impl Question {
    pub fn is_correct(&self, key: &str) -> bool {
        self.correct_answer == key
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(&self.correct_answer).map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("unable to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question bank `{0}` contains no questions")]
    Empty(String),
    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),
    #[error("question {id}: correct answer `{key}` is not one of its options")]
    MissingCorrectOption { id: QuestionId, key: OptionKey },
    #[error("unknown topic `{0}`")]
    UnknownTopic(String),
    #[error("embedded question bank `{0}` is missing or not valid UTF-8")]
    MissingAsset(String),
}

/// Bank files are either a bare array of questions or a titled object
#[derive(Deserialize)]
#[serde(untagged)]
enum BankFile {
    Titled {
        title: String,
        questions: Vec<Question>,
    },
    Bare(Vec<Question>),
}

/// An ordered set of questions, unique by id, loaded before any session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, BankError> {
        let bank = Self {
            title: title.into(),
            questions,
        };
        bank.validate()?;
        Ok(bank)
    }

    /// Parse a bank from JSON text. `default_title` is used for bare arrays.
    pub fn from_json(json: &str, default_title: &str) -> Result<Self, BankError> {
        match serde_json::from_str::<BankFile>(json)? {
            BankFile::Titled { title, questions } => Self::new(title, questions),
            BankFile::Bare(questions) => Self::new(default_title, questions),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let default_title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Quiz")
            .to_string();
        let bank = Self::from_json(&json, &default_title)?;
        log::info!(
            "loaded {} questions from {}",
            bank.questions.len(),
            path.display()
        );
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    fn validate(&self) -> Result<(), BankError> {
        if self.questions.is_empty() {
            return Err(BankError::Empty(self.title.clone()));
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id) {
                return Err(BankError::DuplicateId(q.id));
            }
            if !q.options.contains_key(&q.correct_answer) {
                return Err(BankError::MissingCorrectOption {
                    id: q.id,
                    key: q.correct_answer.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: QuestionId, correct: &str, points: u32) -> Question {
    let options = ["a", "b", "c", "d"]
        .iter()
        .map(|k| (k.to_string(), format!("answer {} for question {}", k, id)))
        .collect();
    Question {
        id,
        question: format!("question {}", id),
        options,
        correct_answer: correct.to_string(),
        points,
    }
}

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use std::str::FromStr;

use crate::question::{BankError, QuestionBank};

static BANK_DIR: Dir = include_dir!("src/bank");

/// Question banks compiled into the binary
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Topic {
    Economics,
    PropertyProtection,
}

impl Topic {
    pub fn all() -> &'static [Topic] {
        &[Topic::Economics, Topic::PropertyProtection]
    }

    fn file_name(&self) -> &'static str {
        match self {
            Topic::Economics => "economics.json",
            Topic::PropertyProtection => "property_protection.json",
        }
    }

    pub fn load(&self) -> Result<QuestionBank, BankError> {
        let bank = load_embedded(self.file_name(), &self.to_string())?;
        log::info!("loaded topic {} ({} questions)", self, bank.len());
        Ok(bank)
    }
}

fn load_embedded(file_name: &str, default_title: &str) -> Result<QuestionBank, BankError> {
    let json = BANK_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| BankError::MissingAsset(file_name.to_string()))?;
    QuestionBank::from_json(json, default_title)
}

impl FromStr for Topic {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Topic as ValueEnum>::from_str(s, true).map_err(|_| BankError::UnknownTopic(s.to_string()))
    }
}

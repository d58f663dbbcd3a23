//! Submission payload handed to a sink once the wizard completes.

use super::files::FileHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inline game source, each part edited independently
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBundle {
    pub html: String,
    pub css: String,
    pub javascript: String,
}

impl CodeBundle {
    /// At least one of the three parts has non-blank content
    pub fn has_content(&self) -> bool {
        [&self.html, &self.css, &self.javascript]
            .iter()
            .any(|part| !part.trim().is_empty())
    }
}

/// The delivered game content, exactly one kind per submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionContent {
    Url(String),
    Code(CodeBundle),
    Files(Vec<FileHandle>),
}

/// Finalized wizard output: `{ name, url | code | files }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    #[serde(flatten)]
    pub content: SubmissionContent,
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            SubmissionContent::Url(url) => write!(f, "\"{}\" from URL {}", self.name, url.trim()),
            SubmissionContent::Code(code) => {
                let parts: Vec<&str> = [
                    ("HTML", &code.html),
                    ("CSS", &code.css),
                    ("JavaScript", &code.javascript),
                ]
                .into_iter()
                .filter(|(_, src)| !src.trim().is_empty())
                .map(|(label, _)| label)
                .collect();
                write!(f, "\"{}\" from inline code ({})", self.name, parts.join(", "))
            }
            SubmissionContent::Files(files) => {
                let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
                write!(
                    f,
                    "\"{}\" from {} file(s): {}",
                    self.name,
                    files.len(),
                    names.join(", ")
                )
            }
        }
    }
}

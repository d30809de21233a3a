//! Skill Gap Analyzer — fixed vocabulary checked against JD and resume text.
//!
//! Default matching is plain case-insensitive substring containment, so
//! "java" is found inside "javascript" and "git" inside "github".
//! `SkillMatchMode::WordBoundary` is the opt-in stricter alternative.

use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Lowercase skill keywords, checked in this order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "sql",
    "nosql",
    "javascript",
    "html",
    "css",
    "react",
    "angular",
    "node.js",
    "django",
    "flask",
    "spring",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "machine learning",
    "deep learning",
    "nlp",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "git",
    "github",
    "excel",
    "tableau",
    "power bi",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    /// Any occurrence counts, even inside a longer word.
    #[default]
    Substring,
    /// The occurrence must not touch an alphanumeric character on either side.
    WordBoundary,
}

impl FromStr for SkillMatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "word_boundary" | "word-boundary" => Ok(Self::WordBoundary),
            other => Err(anyhow!(
                "unknown skill match mode '{other}' (expected 'substring' or 'word_boundary')"
            )),
        }
    }
}

impl SkillMatchMode {
    /// `haystack` must already be lowercased.
    fn matches(self, haystack: &str, skill: &str) -> bool {
        match self {
            Self::Substring => haystack.contains(skill),
            Self::WordBoundary => haystack.match_indices(skill).any(|(start, _)| {
                let before = haystack[..start].chars().next_back();
                let after = haystack[start + skill.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

/// Vocabulary terms the job description asks for, in vocabulary order.
pub fn jd_skills(jd_text: &str, vocabulary: &[&str], mode: SkillMatchMode) -> Vec<String> {
    let jd_lower = jd_text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| mode.matches(&jd_lower, skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// JD skills the resume never mentions, in vocabulary order.
pub fn missing_skills(
    resume_text: &str,
    jd_text: &str,
    vocabulary: &[&str],
    mode: SkillMatchMode,
) -> Vec<String> {
    let resume_lower = resume_text.to_lowercase();
    jd_skills(jd_text, vocabulary, mode)
        .into_iter()
        .filter(|skill| !mode.matches(&resume_lower, skill))
        .collect()
}

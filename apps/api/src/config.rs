use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::evaluation::skills::SkillMatchMode;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which embedding backend powers the similarity scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// Local ONNX sentence-transformer via fastembed.
    FastEmbed,
    /// Deterministic bag-of-words hashing. Offline, no model download.
    Hashing,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastembed" => Ok(Self::FastEmbed),
            "hashing" => Ok(Self::Hashing),
            other => Err(anyhow!(
                "unknown embedding backend '{other}' (expected 'fastembed' or 'hashing')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_model: String,
    pub model_cache_dir: PathBuf,
    pub eager_model_load: bool,
    pub skill_match_mode: SkillMatchMode,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            embedding_backend: var("EMBEDDING_BACKEND", "fastembed")
                .parse()
                .context("EMBEDDING_BACKEND is invalid")?,
            embedding_model: var("EMBEDDING_MODEL", crate::embedding::DEFAULT_MODEL),
            model_cache_dir: PathBuf::from(var("MODEL_CACHE_DIR", ".fastembed_cache")),
            eager_model_load: parse_bool(&var("EAGER_MODEL_LOAD", "false"))
                .context("EAGER_MODEL_LOAD must be a boolean")?,
            skill_match_mode: var("SKILL_MATCH_MODE", "substring")
                .parse()
                .context("SKILL_MATCH_MODE is invalid")?,
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("'{other}' is not a boolean")),
    }
}

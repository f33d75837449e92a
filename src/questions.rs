//! Question sources: where a [`QuestionPool`] comes from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::games::ladder::{OptionLabel, Question, QuestionOptions, QuestionPool};

/// Column headers of a spreadsheet export, with the short English aliases
/// also accepted.
const SHEET_COLUMNS: [(&str, &str); 6] = [
    ("Pergunta", "prompt"),
    ("Opção A", "A"),
    ("Opção B", "B"),
    ("Opção C", "C"),
    ("Opção D", "D"),
    ("Resposta Certa", "correct"),
];

/// On-disk and over-the-wire layout of a question bank.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionBank {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

impl QuestionBank {
    fn into_questions(self) -> Vec<Question> {
        match self {
            QuestionBank::Wrapped { questions } | QuestionBank::Bare(questions) => questions,
        }
    }
}

/// One row of a spreadsheet export.
#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(rename = "Pergunta", alias = "prompt")]
    prompt: String,
    #[serde(rename = "Opção A", alias = "A")]
    a: String,
    #[serde(rename = "Opção B", alias = "B")]
    b: String,
    #[serde(rename = "Opção C", alias = "C")]
    c: String,
    #[serde(rename = "Opção D", alias = "D")]
    d: String,
    #[serde(rename = "Resposta Certa", alias = "correct")]
    correct: OptionLabel,
}

impl From<SheetRow> for Question {
    fn from(row: SheetRow) -> Self {
        Question::new(
            row.prompt,
            QuestionOptions::new(row.a, row.b, row.c, row.d),
            row.correct,
        )
    }
}

fn parse_sheet(content: &str) -> Result<Vec<Question>, QuestionSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| QuestionSourceError::new(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let missing: Vec<&str> = SHEET_COLUMNS
        .iter()
        .filter(|(name, alias)| !headers.iter().any(|h| h == *name || h == *alias))
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "Question sheet is missing columns");
        return Err(QuestionSourceError::new(format!(
            "Question sheet is missing columns: {}",
            missing.join(", ")
        )));
    }

    reader
        .deserialize::<SheetRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Question::from).map_err(|e| {
                QuestionSourceError::new(format!("Invalid question sheet row {}: {}", i + 1, e))
            })
        })
        .collect()
}

/// Serialization format of a question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    /// TOML with a top-level `[[questions]]` array.
    Toml,
    /// JSON, either `{"questions": [...]}` or a bare array.
    Json,
    /// CSV spreadsheet export with `Pergunta`, `Opção A`..`Opção D` and
    /// `Resposta Certa` columns.
    Csv,
}

impl BankFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, QuestionSourceError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            _ => Err(QuestionSourceError::new(format!(
                "Unsupported question bank extension: {}",
                path.display()
            ))),
        }
    }

    /// Picks the format of a remote bank.
    ///
    /// CSV when the server says so or the URL asks for a CSV export
    /// (`.csv` path or `output=csv`), JSON otherwise.
    pub fn from_url(url: &str, content_type: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if content_type.contains("csv")
            || path.to_ascii_lowercase().ends_with(".csv")
            || url.contains("output=csv")
        {
            Self::Csv
        } else {
            Self::Json
        }
    }
}

/// Parses a question bank.
///
/// # Errors
///
/// Returns [`QuestionSourceError`] if `content` is not a valid bank.
#[instrument(skip(content), fields(len = content.len()))]
pub fn parse_bank(content: &str, format: BankFormat) -> Result<Vec<Question>, QuestionSourceError> {
    let questions = match format {
        BankFormat::Toml => toml::from_str::<QuestionBank>(content)
            .map_err(|e| {
                QuestionSourceError::new(format!("Failed to parse TOML question bank: {}", e))
            })?
            .into_questions(),
        BankFormat::Json => serde_json::from_str::<QuestionBank>(content)
            .map_err(|e| {
                QuestionSourceError::new(format!("Failed to parse JSON question bank: {}", e))
            })?
            .into_questions(),
        BankFormat::Csv => parse_sheet(content)?,
    };
    debug!(count = questions.len(), "Parsed question bank");
    Ok(questions)
}

/// Supplies the pool of candidate questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Loads every available question.
    async fn fetch_pool(&self) -> Result<QuestionPool, QuestionSourceError>;

    /// Human-readable location, for logs and messages.
    fn describe(&self) -> String;
}

/// Question bank stored in a local TOML or JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_pool(&self) -> Result<QuestionPool, QuestionSourceError> {
        let format = BankFormat::from_path(&self.path)?;
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            QuestionSourceError::new(format!(
                "Failed to read question bank {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let pool = QuestionPool::new(parse_bank(&content, format)?);
        info!(questions = pool.len(), "Loaded question bank from file");
        Ok(pool)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Question bank served over HTTP(S), as JSON or a CSV sheet export.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source fetching `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_pool(&self) -> Result<QuestionPool, QuestionSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| QuestionSourceError::new(format!("Failed to fetch {}: {}", self.url, e)))?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let format = BankFormat::from_url(&self.url, &content_type);
        debug!(?format, %content_type, "Decoding remote question bank");

        let content = response.text().await.map_err(|e| {
            QuestionSourceError::new(format!("Failed to read {}: {}", self.url, e))
        })?;
        let pool = QuestionPool::new(parse_bank(&content, format)?);
        info!(questions = pool.len(), "Loaded question bank over HTTP");
        Ok(pool)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Chooses a source for `location`: HTTP for `http(s)://` URLs, a file otherwise.
pub fn source_for(location: &str) -> Box<dyn QuestionSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Question bank loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Question source error: {} at {}:{}", message, file, line)]
pub struct QuestionSourceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl QuestionSourceError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

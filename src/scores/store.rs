//! Persistent high score table
//!
//! Scores live in a plain text file, one decimal integer per line, only
//! ever appended to. Reading sorts them for display.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a finished game's score, creating the file if needed
    pub fn append(&self, score: u32) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open score file {:?}", self.path))?;

        writeln!(file, "{}", score)
            .with_context(|| format!("Failed to write score to {:?}", self.path))?;

        Ok(())
    }

    /// Every recorded score, highest first. Equal scores keep their file order.
    ///
    /// A missing file means no games have been recorded yet. Reading stops
    /// at the first token that is not a score; everything before it is kept.
    pub fn load_all(&self) -> Result<Vec<u32>> {
        let mut contents = String::new();
        match File::open(&self.path) {
            Ok(mut file) => {
                file.read_to_string(&mut contents)
                    .with_context(|| format!("Failed to read score file {:?}", self.path))?;
            }
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to open score file {:?}", self.path));
            }
        }

        let mut scores = parse_scores(&contents, &self.path);
        // sort_by is stable, so ties stay in file order
        scores.sort_by(|a, b| b.cmp(a));
        Ok(scores)
    }

    /// The best `limit` scores, highest first
    pub fn top(&self, limit: usize) -> Result<Vec<u32>> {
        let mut scores = self.load_all()?;
        scores.truncate(limit);
        Ok(scores)
    }
}

fn parse_scores(contents: &str, path: &Path) -> Vec<u32> {
    let mut scores = Vec::new();

    for token in contents.split_whitespace() {
        match token.parse::<u32>() {
            Ok(score) => scores.push(score),
            Err(_) => {
                log::warn!(
                    "Malformed record {:?} in {:?}, ignoring it and the rest of the file",
                    token,
                    path
                );
                break;
            }
        }
    }

    scores
}

/// High-score persistence: one decimal integer in a plain text file.
///
/// The game never fails because of this file.  `load` treats anything it
/// cannot read as "no previous best" and `save` is best-effort; the
/// `try_*` variants expose the underlying error for callers that care.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = ".tunnel_digger_score";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("high score file is not a number: {0}")]
    Parse(#[from] ParseIntError),
}

#[derive(Clone, Debug)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.tunnel_digger_score`, or the working directory if `HOME` is
    /// unset.
    pub fn default_location() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(PathBuf::from(home).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<u32, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(text.trim().parse()?)
    }

    pub fn try_save(&self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }

    /// The stored best, or 0 when the file is missing or unreadable.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("ignoring {}: {}", self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, score: u32) {
        if let Err(e) = self.try_save(score) {
            log::warn!("could not write {}: {}", self.path.display(), e);
        }
    }
}

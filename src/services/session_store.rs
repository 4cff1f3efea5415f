use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{domain::Session, error::ScrapeError};

/// Cookie files on disk, one per account.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        SessionStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, account: &str) -> PathBuf {
        let account: String = account
            .chars()
            .map(|c| match c {
                '/' | '\\' => '_',
                c => c,
            })
            .collect();
        self.dir.join(format!("contactout-{}-cookies.json", account))
    }

    /// `Ok(None)` when nothing has been saved for `account` yet.
    pub fn load(&self, account: &str) -> Result<Option<Session>, ScrapeError> {
        let raw = match fs::read_to_string(self.path_for(account)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, account: &str, session: &Session) -> Result<(), ScrapeError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.path_for(account),
            serde_json::to_string_pretty(session)?,
        )?;
        Ok(())
    }
}

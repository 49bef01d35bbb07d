use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::session::{
    SessionError,
    config::{SessionConfig, SessionDocument},
};

/// How a new session configuration is merged into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeMode {
    /// Append; fails if the name is taken.
    Add,
    /// Replace every session with the same name.
    Override,
    /// Merge registered classes into the existing session `target`.
    Update { target: String },
}

/// What [`SessionManager::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Added { name: String },
    Replaced { name: String },
    Updated { name: String },
}

impl MergeOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Added { name } | Self::Replaced { name } | Self::Updated { name } => name,
        }
    }
}

/// Owner of one session document.
///
/// The document is read once on [`load`](Self::load), changed in memory and
/// only written back on [`save`](Self::save). Session names stay unique after
/// every successful operation; failed operations leave the document untouched.
#[derive(Debug)]
pub struct SessionManager {
    path: PathBuf,
    document: SessionDocument,
}

impl SessionManager {
    /// Default document file name inside a workspace.
    pub const FILE_NAME: &'static str = ".sessions.toml";

    /// Loads the document at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] if the file exists but cannot be
    /// read or parsed, and [`SessionError::UnsupportedFormat`] if the
    /// extension is neither `toml` nor `json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let ext = extension(&path)?;

        let document = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| SessionError::Malformed {
                path: path.clone(),
                message: e.to_string(),
            })?;
            parse(&content, ext).map_err(|message| SessionError::Malformed {
                path: path.clone(),
                message,
            })?
        } else {
            debug!("{} does not exist, starting empty", path.display());
            SessionDocument::default()
        };

        Ok(Self { path, document })
    }

    /// Writes the whole document back, replacing the previous file content.
    ///
    /// This is a plain write: an interrupted save can leave a truncated file
    /// behind, which the next [`load`](Self::load) reports as malformed.
    pub fn save(&self) -> Result<(), SessionError> {
        let content = match extension(&self.path)? {
            "json" => serde_json::to_string_pretty(&self.document)
                .map_err(|e| SessionError::Serialize(e.to_string()))?,
            _ => toml::to_string_pretty(&self.document)
                .map_err(|e| SessionError::Serialize(e.to_string()))?,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, content).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("wrote session document {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &SessionDocument {
        &self.document
    }

    pub fn exists(&self, name: &str) -> bool {
        self.document.sessions.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&SessionConfig> {
        self.document.sessions.iter().find(|s| s.name == name)
    }

    /// Session names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.document
            .sessions
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Appends `cfg` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Duplicate`] if a session with the same name exists.
    pub fn add(&mut self, cfg: SessionConfig) -> Result<(), SessionError> {
        if self.exists(&cfg.name) {
            return Err(SessionError::Duplicate { name: cfg.name });
        }
        debug!("adding session {}", cfg.name);
        self.document.sessions.push(cfg);
        Ok(())
    }

    /// Removes every session named like `cfg`, then appends `cfg`.
    pub fn add_and_override(&mut self, cfg: SessionConfig) {
        let before = self.document.sessions.len();
        self.document.sessions.retain(|s| s.name != cfg.name);

        let removed = before - self.document.sessions.len();
        if removed > 1 {
            warn!("removed {removed} sessions named {}", cfg.name);
        }
        self.document.sessions.push(cfg);
    }

    /// Merges the classes registered in `cfg` into the session `name`.
    ///
    /// Only the class set changes; connection and context of the existing
    /// session are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session is named `name`.
    pub fn update(&mut self, name: &str, cfg: &SessionConfig) -> Result<(), SessionError> {
        let session = self
            .document
            .sessions
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SessionError::NotFound {
                name: name.to_string(),
            })?;

        session.classes.extend(cfg.classes.iter().cloned());
        debug!("session {name} now registers {} classes", session.classes.len());
        Ok(())
    }

    /// Merges `cfg` according to `mode`.
    pub fn apply(&mut self, cfg: SessionConfig, mode: MergeMode) -> Result<MergeOutcome, SessionError> {
        match mode {
            MergeMode::Add => {
                let name = cfg.name.clone();
                self.add(cfg)?;
                Ok(MergeOutcome::Added { name })
            }
            MergeMode::Override => {
                let name = cfg.name.clone();
                let existed = self.exists(&name);
                self.add_and_override(cfg);
                if existed {
                    Ok(MergeOutcome::Replaced { name })
                } else {
                    Ok(MergeOutcome::Added { name })
                }
            }
            MergeMode::Update { target } => {
                self.update(&target, &cfg)?;
                Ok(MergeOutcome::Updated { name: target })
            }
        }
    }
}

fn extension(path: &Path) -> Result<&str, SessionError> {
    match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
        "toml" | "tml" => Ok("toml"),
        "json" => Ok("json"),
        ext => Err(SessionError::UnsupportedFormat {
            ext: ext.to_string(),
        }),
    }
}

fn parse(content: &str, ext: &str) -> Result<SessionDocument, String> {
    match ext {
        "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

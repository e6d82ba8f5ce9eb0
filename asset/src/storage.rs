use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;
use lb_error::Result;
use tokio::fs;

use crate::kind::AssetKind;

pub const PUBLIC_PREFIX: &str = "/uploads";

const TEMP_DIR: &str = "temp";

/// On-disk layout of the asset directories under one storage root.
pub struct AssetStorage {
    root: PathBuf,
}

impl AssetStorage {
    /// Creates the scratch and per-kind directories if they are missing.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        std::fs::create_dir_all(root.join(TEMP_DIR))?;
        for kind in AssetKind::ALL {
            std::fs::create_dir_all(root.join(kind.dir_name()))?;
        }

        lb_log::info(
            Some("🗂️"),
            format!("[AssetStorage] Using storage root {}", root.display()),
        );

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }

    pub fn kind_dir(&self, kind: AssetKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    pub fn public_ref(kind: AssetKind, name: &str) -> String {
        format!("{PUBLIC_PREFIX}/{}/{name}", kind.dir_name())
    }

    /// Maps a public reference back to its file. Only the final path segment
    /// is honored, so a reference can never escape the kind directory.
    pub fn resolve(&self, kind: AssetKind, public_ref: &str) -> Option<PathBuf> {
        let dir_prefix = format!("{PUBLIC_PREFIX}/{}/", kind.dir_name());
        let name = public_ref.strip_prefix(&dir_prefix)?;
        let name = Path::new(name).file_name()?;
        Some(self.kind_dir(kind).join(name))
    }

    /// Picks a fresh final name `<kind>-<timestamp><ext>`. The timestamp is
    /// bumped while the name is taken, so a replacement never lands on the
    /// file it is about to supersede.
    pub async fn allocate(&self, kind: AssetKind, extension: &str) -> Result<(PathBuf, String)> {
        let mut timestamp = Utc::now().timestamp_millis();
        loop {
            let name = format!("{}-{timestamp}{extension}", kind.prefix());
            let path = self.kind_dir(kind).join(&name);
            if !fs::try_exists(&path).await? {
                return Ok((path, Self::public_ref(kind, &name)));
            }
            timestamp += 1;
        }
    }

    /// Removes a stored file. A file that is already gone counts as removed;
    /// the return value tells whether anything was deleted.
    pub async fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

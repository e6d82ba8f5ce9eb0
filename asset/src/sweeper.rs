use std::{
    path::PathBuf,
    time::{Duration, SystemTime},
};

use anyhow::Result;
use tokio::{fs, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::storage::AssetStorage;

const SCRATCH_MAX_AGE: Duration = Duration::from_secs(60 * 60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Periodically deletes scratch files left behind by aborted or failed
/// uploads. Finalized assets are never touched.
pub struct ScratchSweeper {
    temp_dir: PathBuf,
    max_age: Duration,
    interval: Duration,
}

impl ScratchSweeper {
    pub fn new(storage: &AssetStorage) -> Self {
        lb_log::info(Some("⚡"), "[ScratchSweeper] Initializing component");

        Self {
            temp_dir: storage.temp_dir(),
            max_age: SCRATCH_MAX_AGE,
            interval: SWEEP_INTERVAL,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Returns how many scratch files were removed.
    pub async fn sweep(&self) -> Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;

        let mut entries = fs::read_dir(&self.temp_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let age = now
                .duration_since(metadata.modified()?)
                .unwrap_or(Duration::ZERO);
            if age >= self.max_age {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    pub fn run(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        lb_log::info(Some("💫"), "[ScratchSweeper] Running component");

        tokio::spawn((|| async move {
            let mut interval = time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        break;
                    }
                    _ = interval.tick() => match self.sweep().await {
                        Ok(0) => {}
                        Ok(removed) => lb_log::info(
                            Some("🧹"),
                            format!("[ScratchSweeper] Removed {removed} stale scratch file(s)"),
                        ),
                        Err(err) => {
                            lb_log::warn(None, format!("[ScratchSweeper] Sweep failed: {err}"))
                        }
                    },
                }
            }

            lb_log::info(None, "[ScratchSweeper] Shutting down component");
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sweep_removes_only_stale_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path()).unwrap();
        std::fs::write(storage.temp_dir().join("image-1-1.png"), b"x").unwrap();
        std::fs::write(
            storage
                .kind_dir(crate::AssetKind::Project)
                .join("project-1.png"),
            b"x",
        )
        .unwrap();

        assert_eq!(ScratchSweeper::new(&storage).sweep().await.unwrap(), 0);

        let removed = ScratchSweeper::new(&storage)
            .with_max_age(Duration::ZERO)
            .sweep()
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(std::fs::read_dir(storage.temp_dir()).unwrap().count(), 0);
        assert!(storage
            .kind_dir(crate::AssetKind::Project)
            .join("project-1.png")
            .exists());
    }

    #[tokio::test]
    async fn run_stops_when_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path()).unwrap();
        let cancel_token = CancellationToken::new();
        cancel_token.cancel();

        ScratchSweeper::new(&storage)
            .run(cancel_token)
            .await
            .unwrap();
    }
}

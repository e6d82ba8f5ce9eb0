use async_trait::async_trait;
use lb_error::Result;

use crate::{
    kind::AssetKind,
    staging::{self, InboundFile, StagedUpload},
    storage::AssetStorage,
    transform,
};

/// A content record that owns exactly one finalized asset.
#[async_trait]
pub trait AssetOwner: Send + Sync {
    type Store: ?Sized + Sync;

    const KIND: AssetKind;

    /// Public reference of the current asset.
    fn image(&self) -> &str;

    fn set_image(&mut self, image: &str);

    /// Inserts or updates the record.
    async fn save_record(&mut self, store: &Self::Store) -> anyhow::Result<()>;

    async fn delete_record(&self, store: &Self::Store) -> anyhow::Result<()>;
}

pub struct AssetPipeline {
    storage: AssetStorage,
}

impl AssetPipeline {
    pub fn new(storage: AssetStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &AssetStorage {
        &self.storage
    }

    pub async fn stage(&self, file: &InboundFile) -> Result<StagedUpload> {
        staging::stage(&self.storage.temp_dir(), file).await
    }

    /// Crops the staged upload into its final place, builds the record around
    /// the new public reference and persists it. A failed save leaves the
    /// cropped file behind.
    pub async fn create<T, F>(&self, staged: StagedUpload, store: &T::Store, build: F) -> Result<T>
    where
        T: AssetOwner,
        F: FnOnce(&str) -> T + Send,
    {
        let public_ref = self.finalize(T::KIND, &staged).await?;

        let mut record = build(&public_ref);
        if let Err(err) = record.save_record(store).await {
            lb_log::warn(
                None,
                format!("[AssetPipeline] Record not saved, {public_ref} is orphaned"),
            );
            return Err(err.into());
        }

        Ok(record)
    }

    /// Saves pending changes of `record`. With a new upload the asset is
    /// swapped: the new file is committed before the previous one is removed,
    /// and failing to remove the previous file only costs disk space.
    pub async fn replace<T>(
        &self,
        record: &mut T,
        staged: Option<StagedUpload>,
        store: &T::Store,
    ) -> Result<()>
    where
        T: AssetOwner,
    {
        let staged = match staged {
            Some(staged) => staged,
            None => {
                record.save_record(store).await?;
                return Ok(());
            }
        };

        let previous = self.storage.resolve(T::KIND, record.image());
        let public_ref = self.finalize(T::KIND, &staged).await?;

        record.set_image(&public_ref);
        record.save_record(store).await?;

        if let Some(previous) = previous {
            if let Err(err) = self.storage.remove(&previous).await {
                lb_log::warn(
                    None,
                    format!(
                        "[AssetPipeline] Failed to remove previous asset {}: {err}",
                        previous.display()
                    ),
                );
            }
        }

        Ok(())
    }

    /// Deletes the record's asset, then the record. An asset that is already
    /// gone is not an error.
    pub async fn remove<T>(&self, record: &T, store: &T::Store) -> Result<()>
    where
        T: AssetOwner,
    {
        if let Some(path) = self.storage.resolve(T::KIND, record.image()) {
            if !self.storage.remove(&path).await? {
                lb_log::debug(
                    None,
                    format!("[AssetPipeline] Asset {} was already gone", path.display()),
                );
            }
        }

        Ok(record.delete_record(store).await?)
    }

    async fn finalize(&self, kind: AssetKind, staged: &StagedUpload) -> Result<String> {
        let (path, public_ref) = self.storage.allocate(kind, staged.extension()).await?;
        transform::cover_crop(staged.path(), &path).await?;

        lb_log::debug(
            Some("🖼️"),
            format!(
                "[AssetPipeline] Finalized {} as {public_ref}",
                staged.original_name()
            ),
        );

        Ok(public_ref)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        path::PathBuf,
        sync::{
            atomic::{AtomicBool, Ordering},
            Mutex,
        },
    };

    use bytes::Bytes;
    use image::{Rgb, RgbImage};
    use lb_error::Error;
    use tempfile::TempDir;

    use super::*;
    use crate::transform::{TARGET_HEIGHT, TARGET_WIDTH};

    #[derive(Clone)]
    struct Poster {
        id: u32,
        title: String,
        image: String,
    }

    #[derive(Default)]
    struct PosterStore {
        rows: Mutex<HashMap<u32, Poster>>,
        fail_saves: AtomicBool,
    }

    #[async_trait]
    impl AssetOwner for Poster {
        type Store = PosterStore;

        const KIND: AssetKind = AssetKind::Project;

        fn image(&self) -> &str {
            &self.image
        }

        fn set_image(&mut self, image: &str) {
            self.image = image.to_owned();
        }

        async fn save_record(&mut self, store: &PosterStore) -> anyhow::Result<()> {
            if store.fail_saves.load(Ordering::SeqCst) {
                anyhow::bail!("store unavailable");
            }
            store.rows.lock().unwrap().insert(self.id, self.clone());
            Ok(())
        }

        async fn delete_record(&self, store: &PosterStore) -> anyhow::Result<()> {
            match store.rows.lock().unwrap().remove(&self.id) {
                Some(_) => Ok(()),
                None => Err(Error::NotFound("Poster not found".to_owned()).into()),
            }
        }
    }

    fn pipeline() -> (TempDir, AssetPipeline) {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path()).unwrap();
        (dir, AssetPipeline::new(storage))
    }

    fn jpeg_upload(width: u32, height: u32) -> InboundFile {
        let mut buf = std::io::Cursor::new(Vec::new());
        RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
            .write_to(&mut buf, image::ImageFormat::Jpeg)
            .unwrap();
        InboundFile::new(
            "image",
            &Some("skyline.jpg".to_owned()),
            &Some(mime::IMAGE_JPEG),
            Bytes::from(buf.into_inner()),
        )
    }

    fn asset_path(pipeline: &AssetPipeline, record: &Poster) -> PathBuf {
        pipeline
            .storage()
            .resolve(AssetKind::Project, record.image())
            .unwrap()
    }

    fn entries(dir: PathBuf) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn create_crops_and_persists() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();

        let staged = pipeline.stage(&jpeg_upload(1200, 800)).await.unwrap();
        let record = pipeline
            .create(staged, &store, |image| Poster {
                id: 1,
                title: "Skyline Tower".to_owned(),
                image: image.to_owned(),
            })
            .await
            .unwrap();

        assert!(record.image().starts_with("/uploads/projects/project-"));
        assert!(record.image().ends_with(".jpg"));
        assert_eq!(
            image::image_dimensions(asset_path(&pipeline, &record)).unwrap(),
            (TARGET_WIDTH, TARGET_HEIGHT)
        );
        assert_eq!(entries(pipeline.storage().temp_dir()), 0);
        assert_eq!(store.rows.lock().unwrap()[&1].title, "Skyline Tower");
    }

    #[tokio::test]
    async fn create_with_corrupt_image_persists_nothing() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();
        let upload = InboundFile::new(
            "image",
            &Some("broken.png".to_owned()),
            &Some(mime::IMAGE_PNG),
            Bytes::from_static(b"not an image"),
        );

        let staged = pipeline.stage(&upload).await.unwrap();
        let err = pipeline
            .create(staged, &store, |image| Poster {
                id: 1,
                title: "Broken".to_owned(),
                image: image.to_owned(),
            })
            .await
            .err()
            .unwrap();

        assert!(matches!(err, Error::Processing(_)));
        assert!(store.rows.lock().unwrap().is_empty());
        assert_eq!(entries(pipeline.storage().kind_dir(AssetKind::Project)), 0);
    }

    #[tokio::test]
    async fn create_with_failing_store_reports_error() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();
        store.fail_saves.store(true, Ordering::SeqCst);

        let staged = pipeline.stage(&jpeg_upload(600, 600)).await.unwrap();
        let err = pipeline
            .create(staged, &store, |image| Poster {
                id: 1,
                title: "Unsaved".to_owned(),
                image: image.to_owned(),
            })
            .await
            .err()
            .unwrap();

        assert!(matches!(err, Error::Internal(_)));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_swaps_asset_and_removes_previous() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();

        let staged = pipeline.stage(&jpeg_upload(1200, 800)).await.unwrap();
        let mut record = pipeline
            .create(staged, &store, |image| Poster {
                id: 7,
                title: "Before".to_owned(),
                image: image.to_owned(),
            })
            .await
            .unwrap();
        let previous = asset_path(&pipeline, &record);

        record.title = "After".to_owned();
        let staged = pipeline.stage(&jpeg_upload(300, 900)).await.unwrap();
        pipeline
            .replace(&mut record, Some(staged), &store)
            .await
            .unwrap();

        let current = asset_path(&pipeline, &record);
        assert_ne!(previous, current);
        assert!(!previous.exists());
        assert_eq!(
            image::image_dimensions(&current).unwrap(),
            (TARGET_WIDTH, TARGET_HEIGHT)
        );
        assert_eq!(entries(pipeline.storage().kind_dir(AssetKind::Project)), 1);

        let saved = store.rows.lock().unwrap()[&7].clone();
        assert_eq!(saved.title, "After");
        assert_eq!(saved.image, record.image);
    }

    #[tokio::test]
    async fn replace_without_upload_touches_no_files() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();

        let staged = pipeline.stage(&jpeg_upload(800, 800)).await.unwrap();
        let mut record = pipeline
            .create(staged, &store, |image| Poster {
                id: 3,
                title: "Old title".to_owned(),
                image: image.to_owned(),
            })
            .await
            .unwrap();
        let image_before = record.image.clone();
        let modified_before = std::fs::metadata(asset_path(&pipeline, &record))
            .unwrap()
            .modified()
            .unwrap();

        record.title = "New title".to_owned();
        pipeline.replace(&mut record, None, &store).await.unwrap();

        assert_eq!(record.image, image_before);
        assert_eq!(
            std::fs::metadata(asset_path(&pipeline, &record))
                .unwrap()
                .modified()
                .unwrap(),
            modified_before
        );
        assert_eq!(store.rows.lock().unwrap()[&3].title, "New title");
        assert_eq!(entries(pipeline.storage().kind_dir(AssetKind::Project)), 1);
    }

    #[tokio::test]
    async fn replace_with_missing_previous_file_still_succeeds() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();
        let mut record = Poster {
            id: 9,
            title: "Dangling".to_owned(),
            image: "/uploads/projects/project-1.jpg".to_owned(),
        };

        let staged = pipeline.stage(&jpeg_upload(500, 400)).await.unwrap();
        pipeline
            .replace(&mut record, Some(staged), &store)
            .await
            .unwrap();

        assert!(asset_path(&pipeline, &record).exists());
        assert_ne!(record.image, "/uploads/projects/project-1.jpg");
    }

    #[tokio::test]
    async fn replace_keeps_new_asset_when_previous_cannot_be_removed() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();

        // A non-empty directory under the previous name cannot be unlinked.
        let stuck = pipeline
            .storage()
            .kind_dir(AssetKind::Project)
            .join("project-stuck.jpg");
        std::fs::create_dir(&stuck).unwrap();
        std::fs::write(stuck.join("keep"), b"x").unwrap();

        let mut record = Poster {
            id: 11,
            title: "Stuck".to_owned(),
            image: "/uploads/projects/project-stuck.jpg".to_owned(),
        };

        let staged = pipeline.stage(&jpeg_upload(640, 480)).await.unwrap();
        pipeline
            .replace(&mut record, Some(staged), &store)
            .await
            .unwrap();

        assert_ne!(record.image, "/uploads/projects/project-stuck.jpg");
        assert_eq!(
            image::image_dimensions(asset_path(&pipeline, &record)).unwrap(),
            (TARGET_WIDTH, TARGET_HEIGHT)
        );
        assert_eq!(store.rows.lock().unwrap()[&11].image, record.image);
        assert!(stuck.is_dir());
    }

    #[tokio::test]
    async fn remove_deletes_file_and_record_then_reports_not_found() {
        let (_dir, pipeline) = pipeline();
        let store = PosterStore::default();

        let staged = pipeline.stage(&jpeg_upload(640, 480)).await.unwrap();
        let record = pipeline
            .create(staged, &store, |image| Poster {
                id: 5,
                title: "Doomed".to_owned(),
                image: image.to_owned(),
            })
            .await
            .unwrap();
        let path = asset_path(&pipeline, &record);

        pipeline.remove(&record, &store).await.unwrap();

        assert!(!path.exists());
        assert!(store.rows.lock().unwrap().is_empty());

        let err = pipeline.remove(&record, &store).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}

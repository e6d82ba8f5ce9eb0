use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use lb_error::{Error, Result};
use mime::Mime;
use rand::Rng;
use tokio::fs;

pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 6] = ["jpeg", "jpg", "png", "gif", "webp", "bmp"];

/// An uploaded file held in memory, before anything touches the disk.
#[derive(Clone)]
pub struct InboundFile {
    field_name: String,
    file_name: Option<String>,
    content_type: Option<Mime>,
    data: Bytes,
}

impl InboundFile {
    pub fn new(
        field_name: &str,
        file_name: &Option<String>,
        content_type: &Option<Mime>,
        data: Bytes,
    ) -> Self {
        Self {
            field_name: field_name.to_owned(),
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            data,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn file_name(&self) -> &Option<String> {
        &self.file_name
    }

    pub fn content_type(&self) -> &Option<Mime> {
        &self.content_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Extension of the original file name including the leading dot, or an
    /// empty string when there is none.
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.size() > MAX_UPLOAD_SIZE {
            return Err(too_large());
        }

        // Either signal is enough.
        let is_image_mime = self
            .content_type
            .as_ref()
            .is_some_and(|mime| mime.type_() == mime::IMAGE);
        let extension = self.extension().to_lowercase();
        let is_image_ext = ALLOWED_EXTENSIONS.contains(&extension.trim_start_matches('.'));

        if is_image_mime || is_image_ext {
            Ok(())
        } else {
            Err(Error::Validation(
                "Only image files are allowed! Please upload JPG, PNG, GIF, or WEBP files."
                    .to_owned(),
            ))
        }
    }
}

pub fn too_large() -> Error {
    Error::Validation(format!(
        "File too large! Maximum size is {} MB.",
        MAX_UPLOAD_SIZE / (1024 * 1024)
    ))
}

/// A validated upload written to the scratch directory. Consumed by the
/// transform, which removes the scratch file once the crop succeeds.
pub struct StagedUpload {
    path: PathBuf,
    original_name: String,
    extension: String,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

pub fn scratch_name(file: &InboundFile) -> String {
    let suffix = rand::thread_rng().gen_range(0..1_000_000_000_u32);
    format!(
        "{}-{}-{suffix}{}",
        file.field_name(),
        Utc::now().timestamp_millis(),
        file.extension()
    )
}

pub async fn stage(temp_dir: &Path, file: &InboundFile) -> Result<StagedUpload> {
    file.validate()?;

    let path = temp_dir.join(scratch_name(file));
    fs::write(&path, file.data()).await?;

    lb_log::debug(
        Some("📥"),
        format!("[AssetStaging] Staged upload at {}", path.display()),
    );

    Ok(StagedUpload {
        path,
        original_name: file.file_name().to_owned().unwrap_or_default(),
        extension: file.extension(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(name: Option<&str>, mime: Option<&str>, data: &[u8]) -> InboundFile {
        InboundFile::new(
            "image",
            &name.map(str::to_owned),
            &mime.map(|mime| mime.parse().unwrap()),
            Bytes::copy_from_slice(data),
        )
    }

    #[test]
    fn extension_keeps_original_case_and_dot() {
        assert_eq!(inbound(Some("Tower.JPG"), None, b"x").extension(), ".JPG");
        assert_eq!(inbound(Some("archive.tar.gz"), None, b"x").extension(), ".gz");
        assert_eq!(inbound(Some("README"), None, b"x").extension(), "");
        assert_eq!(inbound(None, None, b"x").extension(), "");
    }

    #[test]
    fn accepts_image_mime_or_allowed_extension() {
        assert!(inbound(Some("a.png"), Some("image/png"), b"x").validate().is_ok());
        assert!(inbound(Some("a.bin"), Some("image/png"), b"x").validate().is_ok());
        assert!(inbound(Some("a.WEBP"), Some("application/octet-stream"), b"x")
            .validate()
            .is_ok());
        assert!(inbound(Some("a.bmp"), None, b"x").validate().is_ok());
    }

    #[test]
    fn rejects_non_image() {
        let err = inbound(Some("notes.txt"), Some("text/plain"), b"hello")
            .validate()
            .unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.starts_with("Only image files are allowed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_oversized_upload() {
        let data = vec![0_u8; MAX_UPLOAD_SIZE + 1];
        let err = inbound(Some("big.png"), Some("image/png"), &data)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let data = vec![0_u8; MAX_UPLOAD_SIZE];
        assert!(inbound(Some("edge.png"), Some("image/png"), &data)
            .validate()
            .is_ok());
    }

    #[test]
    fn scratch_name_combines_field_timestamp_and_suffix() {
        let name = scratch_name(&inbound(Some("photo.jpeg"), None, b"x"));
        let parts: Vec<&str> = name.trim_end_matches(".jpeg").split('-').collect();

        assert!(name.ends_with(".jpeg"));
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "image");
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }

    #[tokio::test]
    async fn stage_writes_bytes_to_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = inbound(Some("photo.png"), Some("image/png"), b"raw bytes");

        let staged = stage(dir.path(), &file).await.unwrap();

        assert_eq!(staged.path().parent(), Some(dir.path()));
        assert_eq!(staged.original_name(), "photo.png");
        assert_eq!(staged.extension(), ".png");
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"raw bytes");
    }

    #[tokio::test]
    async fn rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = inbound(Some("notes.txt"), Some("text/plain"), b"hello");

        assert!(stage(dir.path(), &file).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

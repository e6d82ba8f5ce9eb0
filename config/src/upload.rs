use serde::Deserialize;

#[derive(Deserialize)]
pub struct UploadConfig {
    path: String,
}

impl UploadConfig {
    /// Storage root holding the `temp`, `projects` and `clients` directories.
    pub fn path(&self) -> &str {
        &self.path
    }
}

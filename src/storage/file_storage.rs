use crate::{
    error::{Result, TallyError},
    storage::KeyValueStore,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
///
/// Each key is stored in its own file under `<root>/.tally/`. Writes go to a
/// temporary file first and are renamed into place.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TALLY_DIR: &'static str = ".tally";
    const VALUE_EXTENSION: &'static str = "value";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TALLY_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn value_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(TallyError::StorageError(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::VALUE_EXTENSION)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the storage directory
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists()
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.value_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.value_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &file_path).await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.value_file(key)?;

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}

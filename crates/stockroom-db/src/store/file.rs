//! # Flat-File Store
//!
//! Keeps products as `name,quantity,unit_price,total_price` lines in a text
//! file.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  append(product)                                                        │
//! │     open(append, create) ──► write_all(one line) ──► flush              │
//! │                                                                         │
//! │  rewrite_all(products)                                                  │
//! │     write .inventory.txt.<uuid>.tmp ──► sync ──► rename over original   │
//! │                                                                         │
//! │  A reader sees either the old file or the new one, never a mix.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file is only guarded against this process; another process editing
//! it during a rewrite can still lose its changes.

use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use stockroom_core::record::{decode_all, encode_all, encode_line};
use stockroom_core::Product;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::DbResult;
use crate::store::RecordStore;

/// Record store backed by a delimited text file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes file access within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store for the file at `path`.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "inventory".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }

    async fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;

        // A hand-edited file may lack its final newline.
        let mut payload = String::with_capacity(line.len() + 1);
        if file.metadata().await?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1)).await?;
            file.read_exact(&mut last).await?;
            if last[0] != b'\n' {
                payload.push('\n');
            }
        }
        payload.push_str(line);

        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn replace_contents(&self, contents: &str) -> std::io::Result<()> {
        let temp = self.temp_path();

        let written = async {
            let mut file = fs::File::create(&temp).await?;
            file.write_all(contents.as_bytes()).await?;
            file.sync_all().await?;
            fs::rename(&temp, &self.path).await
        }
        .await;

        if written.is_err() {
            if let Err(e) = fs::remove_file(&temp).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %temp.display(), error = %e, "Failed to remove temporary file");
                }
            }
        }

        written
    }
}

#[async_trait]
impl RecordStore for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn append(&self, product: &Product) -> DbResult<()> {
        let _guard = self.lock.lock().await;
        debug!(path = %self.path.display(), name = %product.name, "Appending product line");

        self.append_line(&encode_line(product)).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to append product");
            e.into()
        })
    }

    async fn read_all(&self) -> DbResult<Vec<Product>> {
        let _guard = self.lock.lock().await;

        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Inventory file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read inventory file");
                return Err(e.into());
            }
        };

        let mut products = Vec::new();
        for decoded in decode_all(&contents) {
            match decoded {
                Ok(product) => {
                    if !product.has_consistent_total() {
                        warn!(
                            path = %self.path.display(),
                            name = %product.name,
                            total_price = product.total_price,
                            "Stored total disagrees with quantity * unit_price"
                        );
                    }
                    products.push(product);
                }
                Err(e) => warn!(path = %self.path.display(), error = %e, "Skipping malformed line"),
            }
        }

        debug!(count = products.len(), "Read products from file");
        Ok(products)
    }

    async fn rewrite_all(&self, products: &[Product]) -> DbResult<()> {
        let _guard = self.lock.lock().await;
        debug!(path = %self.path.display(), count = products.len(), "Rewriting inventory file");

        self.replace_contents(&encode_all(products))
            .await
            .map_err(|e| {
                error!(path = %self.path.display(), error = %e, "Failed to rewrite inventory file");
                e.into()
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::SortOrder;

    fn temp_store() -> FileStore {
        let path = std::env::temp_dir().join(format!("stockroom-{}.txt", Uuid::new_v4()));
        FileStore::new(path)
    }

    async fn cleanup(store: &FileStore) {
        let _ = fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let store = temp_store();
        assert!(store.read_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_append_writes_one_line() {
        let store = temp_store();
        store.append(&Product::new("iphone", 2, 1350)).await.unwrap();
        store.append(&Product::new("dell xps", 1, 2100)).await.unwrap();

        let contents = fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(contents, "iphone,2,1350,2700\ndell xps,1,2100,2100\n");

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_append_repairs_missing_trailing_newline() {
        let store = temp_store();
        fs::write(store.path(), "apple,1,2,2").await.unwrap();

        store.append(&Product::new("pear", 1, 3)).await.unwrap();

        let products = store.read_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "pear");

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let store = temp_store();
        fs::write(store.path(), "apple,1,2,2\nbroken line\n\npear,x,1,1\nfig,2,2,4\n")
            .await
            .unwrap();

        let names: Vec<String> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["apple", "fig"]);

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let store = temp_store();
        fs::write(store.path(), b"apple,1,2,2\n\xff\xfe,1,1,1\n")
            .await
            .unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec![Product::new("apple", 1, 2)]);

        store.append(&Product::new("pear", 1, 3)).await.unwrap();
        let names: Vec<String> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["apple", "pear"]);

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_stale_total_is_kept_as_stored() {
        let store = temp_store();
        fs::write(store.path(), "pen,3,2,7\n").await.unwrap();

        let products = store.read_all().await.unwrap();
        assert_eq!(products[0].total_price, 7);
        assert!(!products[0].has_consistent_total());

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_rewrite_replaces_contents_without_leftovers() {
        let store = temp_store();
        store.append(&Product::new("apple", 1, 1)).await.unwrap();
        store.append(&Product::new("pear", 1, 1)).await.unwrap();

        store
            .rewrite_all(&[Product::new("fig", 3, 2)])
            .await
            .unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec![Product::new("fig", 3, 2)]);

        let dir = store.path().parent().unwrap().to_path_buf();
        let prefix = format!(".{}.", store.path().file_name().unwrap().to_string_lossy());
        let mut entries = fs::read_dir(&dir).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().starts_with(&prefix));
        }

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_rewrite_to_empty() {
        let store = temp_store();
        store.append(&Product::new("apple", 1, 1)).await.unwrap();
        store.rewrite_all(&[]).await.unwrap();

        assert!(store.read_all().await.unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.path()).await.unwrap(), "");

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_find_and_sort() {
        let store = temp_store();
        for name in ["banana", "apple", "cherry"] {
            store.append(&Product::new(name, 1, 1)).await.unwrap();
        }

        let located = store.find_by_name("apple").await.unwrap().unwrap();
        assert_eq!(located.position, 1);
        assert!(store.find_by_name("durian").await.unwrap().is_none());

        let sorted: Vec<String> = store
            .sorted_by_name(SortOrder::Ascending)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(sorted, vec!["apple", "banana", "cherry"]);

        cleanup(&store).await;
    }

    #[tokio::test]
    async fn test_unwritable_location_is_an_error() {
        let dir = std::env::temp_dir().join(format!("stockroom-missing-{}", Uuid::new_v4()));
        let store = FileStore::new(dir.join("inventory.txt"));

        let err = store.append(&Product::new("apple", 1, 1)).await.unwrap_err();
        assert!(err.is_storage());

        let err = store.rewrite_all(&[]).await.unwrap_err();
        assert!(err.is_storage());
    }
}

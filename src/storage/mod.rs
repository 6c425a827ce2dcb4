pub mod blob;
pub mod json_backend;

use std::path::Path;

use crate::{domain::Book, errors::BookError};

pub type Result<T> = std::result::Result<T, BookError>;

/// Abstraction over persistence backends capable of storing books and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &Book, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Book>;
    fn list_books(&self) -> Result<Vec<String>>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, book: &Book, name: &str, note: Option<&str>) -> Result<String>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Book>;

    fn load_from_path(&self, path: &Path) -> Result<Book> {
        json_backend::load_book_from_path(path)
    }
}

pub use blob::DirectoryBlobStore;
pub use json_backend::{book_warnings, JsonStorage};

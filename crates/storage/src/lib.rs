#![forbid(unsafe_code)]

pub mod memory;
pub mod repository;
pub mod seed;

pub use memory::{InMemoryCatalog, InMemoryProgressStore};
pub use repository::{
    CourseCatalog, LessonContentProvider, ProgressStore, Storage, StorageError,
};

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;

pub use quill_core::{CommentRepository, PostRepository, StorageError};

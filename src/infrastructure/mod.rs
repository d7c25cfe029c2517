pub mod http;
pub mod memory_repository;
pub mod persistence;
pub mod rendering;
pub mod services;

pub use memory_repository::{InMemoryAnnotationRepository, InMemoryNoteRepository};

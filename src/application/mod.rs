pub mod annotation_service;
pub mod note_service;

pub use annotation_service::AnnotationService;
pub use note_service::NoteService;

pub mod drawing;
pub mod entities;
pub mod repository;
pub mod store;
pub mod value_objects;

pub use drawing::{DrawStep, DrawingSession, DrawingTool};
pub use entities::{
    AnalysisNote, Annotation, AnnotationDraft, AnnotationPatch, MarkupStyle, NoteDraft, NotePatch,
};
pub use repository::{AnnotationRepository, AnnotationStorage, NoteRepository};
pub use store::{AnnotationStore, LoadTicket, StoredAnnotations};
pub use value_objects::{Anchor, AnnotationId, AnnotationKind, Color, LineStyle, LineWidth, Symbol};

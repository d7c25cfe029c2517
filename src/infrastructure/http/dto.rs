use serde::Deserialize;

use crate::domain::annotations::{Annotation, Symbol};

/// DTO for the annotation list endpoint.
#[derive(Debug, Deserialize)]
pub struct AnnotationListResponse {
    pub symbol: Symbol,
    pub count: usize,
    pub annotations: Vec<Annotation>,
}

/// DTO for delete confirmations, e.g. `{"message": "Annotation 7 deleted"}`.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

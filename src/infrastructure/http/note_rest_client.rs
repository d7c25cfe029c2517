use gloo_net::http::Request;

use crate::domain::annotations::{AnalysisNote, NoteDraft, NotePatch, NoteRepository, Symbol};
use crate::domain::errors::ApiResult;

use super::dto::MessageResponse;
use super::{DEFAULT_BASE_URL, read_json, transport_error};

/// REST client for the one-note-per-symbol resource. A missing note comes
/// back as a plain 404 - deliberately not translated here.
#[derive(Clone)]
pub struct NoteRestClient {
    base_url: String,
}

impl Default for NoteRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRestClient {
    pub fn new() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn note_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/notes/{}", self.base_url, symbol.value())
    }
}

impl NoteRepository for NoteRestClient {
    async fn get(&self, symbol: &Symbol) -> ApiResult<AnalysisNote> {
        let response = Request::get(&self.note_url(symbol)).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn put(&self, symbol: &Symbol, draft: &NoteDraft) -> ApiResult<AnalysisNote> {
        let response = Request::put(&self.note_url(symbol))
            .json(draft)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn patch(&self, symbol: &Symbol, patch: &NotePatch) -> ApiResult<AnalysisNote> {
        let response = Request::patch(&self.note_url(symbol))
            .json(patch)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn delete(&self, symbol: &Symbol) -> ApiResult<()> {
        let response = Request::delete(&self.note_url(symbol)).send().await.map_err(transport_error)?;
        let _confirmation: MessageResponse = read_json(response).await?;
        Ok(())
    }
}

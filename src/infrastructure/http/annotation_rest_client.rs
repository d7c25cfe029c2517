use gloo_net::http::Request;

use crate::domain::annotations::{
    Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, AnnotationRepository, Symbol,
};
use crate::domain::errors::ApiResult;
use crate::domain::logging::{LogComponent, get_logger};

use super::dto::{AnnotationListResponse, MessageResponse};
use super::{DEFAULT_BASE_URL, read_json, transport_error};

/// REST client for the dashboard's annotation collection.
#[derive(Clone)]
pub struct AnnotationRestClient {
    base_url: String,
}

impl Default for AnnotationRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationRestClient {
    pub fn new() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn list_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/annotations/{}", self.base_url, symbol.value())
    }

    pub fn create_url(&self) -> String {
        format!("{}/api/annotations", self.base_url)
    }

    pub fn by_id_url(&self, id: AnnotationId) -> String {
        format!("{}/api/annotations/id/{}", self.base_url, id.value())
    }

    pub fn delete_all_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/annotations/{}/all", self.base_url, symbol.value())
    }
}

impl AnnotationRepository for AnnotationRestClient {
    async fn list(&self, symbol: &Symbol) -> ApiResult<Vec<Annotation>> {
        let url = self.list_url(symbol);
        get_logger().info(
            LogComponent::Infrastructure("AnnotationApi"),
            &format!("📡 Fetching annotations from: {url}"),
        );

        let response = Request::get(&url).send().await.map_err(transport_error)?;
        let list: AnnotationListResponse = read_json(response).await?;

        get_logger().info(
            LogComponent::Infrastructure("AnnotationApi"),
            &format!("✅ Loaded {} annotations for {}", list.count, symbol.value()),
        );
        Ok(list.annotations)
    }

    async fn create(&self, draft: &AnnotationDraft) -> ApiResult<Annotation> {
        let response = Request::post(&self.create_url())
            .json(draft)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn get(&self, id: AnnotationId) -> ApiResult<Annotation> {
        let response = Request::get(&self.by_id_url(id)).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn update(&self, id: AnnotationId, patch: &AnnotationPatch) -> ApiResult<Annotation> {
        let response = Request::patch(&self.by_id_url(id))
            .json(patch)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn delete(&self, id: AnnotationId) -> ApiResult<()> {
        let response = Request::delete(&self.by_id_url(id)).send().await.map_err(transport_error)?;
        let _confirmation: MessageResponse = read_json(response).await?;
        Ok(())
    }

    async fn delete_all(&self, symbol: &Symbol) -> ApiResult<()> {
        let response =
            Request::delete(&self.delete_all_url(symbol)).send().await.map_err(transport_error)?;
        let _confirmation: MessageResponse = read_json(response).await?;
        Ok(())
    }
}

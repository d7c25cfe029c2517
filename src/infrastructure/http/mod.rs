pub mod annotation_rest_client;
pub mod dto;
pub mod note_rest_client;

pub use annotation_rest_client::AnnotationRestClient;
pub use note_rest_client::NoteRestClient;

use gloo_net::http::Response;
use serde::de::DeserializeOwned;

use crate::domain::errors::{ApiResult, AppError};

/// The dashboard backend's dev-server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

pub(crate) fn transport_error(err: gloo_net::Error) -> AppError {
    AppError::Network(format!("{err:?}"))
}

/// Map one response to one typed outcome. Non-2xx becomes `Http` with the
/// status preserved so callers can tell 404-as-absence from real failures.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        return Err(AppError::Http { status: response.status(), message: response.status_text() });
    }
    response.json::<T>().await.map_err(|err| AppError::Decode(format!("{err:?}")))
}

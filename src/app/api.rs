//! HTTP client for the tag library backend.

use prompt_flow::gallery::{GalleryDraft, GalleryItem, GalleryList};
use prompt_flow::import::{
    BatchImportRequest, BatchImportResponse, ImportCandidate, ParseRequest, ParseResponse,
};
use prompt_flow::settings::{ConfigResponse, ConfigUpdate, LlmTestRequest, LlmTestResponse};
use prompt_flow::{
    Category, CategoryDraft, FlowError, LibrarySnapshot, RelevanceRequest, RelevanceResponse, Tag,
    TagDraft,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got an answer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered `success: false`.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    #[error("unreadable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Local(#[from] FlowError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// The backend's own message when it gave one, otherwise `fallback`.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            ApiError::Local(err) => err.notice(),
            _ => fallback.to_string(),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Unwraps a response body. A body without `success` counts as success.
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if is_success(status) => return Err(ApiError::Decode(err)),
        Err(_) => return Err(ApiError::Status(status, body.to_string())),
    };
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ApiError::Rejected(message));
    }
    if !is_success(status) {
        return Err(ApiError::Status(status, body.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Deserialize)]
struct TagEnvelope {
    tag: Tag,
}

#[derive(Deserialize)]
struct CategoryEnvelope {
    category: Category,
}

#[derive(Deserialize)]
struct ItemEnvelope {
    item: GalleryItem,
}

/// A picked image file, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("HTTP {status}, {} bytes", body.len());
        decode(status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<IgnoredAny>(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    // ========== Library ==========

    pub async fn library(&self) -> ApiResult<LibrarySnapshot> {
        self.get("/api/tags").await
    }

    pub async fn create_tag(&self, draft: &TagDraft) -> ApiResult<Tag> {
        let envelope: TagEnvelope = self.post("/api/tags", draft).await?;
        Ok(envelope.tag)
    }

    pub async fn update_tag(&self, id: &str, draft: &TagDraft) -> ApiResult<Tag> {
        let envelope: TagEnvelope = self.put(&format!("/api/tags/{id}"), draft).await?;
        Ok(envelope.tag)
    }

    pub async fn delete_tag(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/tags/{id}")).await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<Category> {
        let envelope: CategoryEnvelope = self.post("/api/categories", draft).await?;
        Ok(envelope.category)
    }

    pub async fn update_category(&self, id: &str, draft: &CategoryDraft) -> ApiResult<Category> {
        let envelope: CategoryEnvelope = self.put(&format!("/api/categories/{id}"), draft).await?;
        Ok(envelope.category)
    }

    pub async fn delete_category(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/categories/{id}")).await
    }

    // ========== Parsing and import ==========

    pub async fn parse_tags(&self, text: &str) -> ApiResult<ParseResponse> {
        let request = ParseRequest { text: text.to_string() };
        self.post("/api/tags/parse", &request).await
    }

    pub async fn import_tags(&self, tags: Vec<ImportCandidate>) -> ApiResult<BatchImportResponse> {
        self.post("/api/tags/batch", &BatchImportRequest { tags }).await
    }

    pub async fn analyze_relevance(&self, request: &RelevanceRequest) -> ApiResult<RelevanceResponse> {
        self.post("/api/tags/analyze-relevance", request).await
    }

    // ========== Gallery ==========

    pub async fn gallery(&self) -> ApiResult<GalleryList> {
        self.get("/api/gallery").await
    }

    fn gallery_form(draft: &GalleryDraft, image: Option<ImageUpload>) -> ApiResult<Form> {
        let mut form = Form::new();
        for (name, value) in draft.fields() {
            form = form.text(name, value.to_string());
        }
        if let Some(image) = image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)?;
            form = form.part("image", part);
        }
        Ok(form)
    }

    pub async fn upload_gallery_item(
        &self,
        draft: &GalleryDraft,
        image: ImageUpload,
    ) -> ApiResult<GalleryItem> {
        let form = Self::gallery_form(draft, Some(image))?;
        let request = self.client.post(self.url("/api/gallery")).multipart(form);
        let envelope: ItemEnvelope = self.send(request).await?;
        Ok(envelope.item)
    }

    /// Without a new image the stored one is kept.
    pub async fn update_gallery_item(
        &self,
        id: &str,
        draft: &GalleryDraft,
        image: Option<ImageUpload>,
    ) -> ApiResult<GalleryItem> {
        let form = Self::gallery_form(draft, image)?;
        let request = self
            .client
            .put(self.url(&format!("/api/gallery/{id}")))
            .multipart(form);
        let envelope: ItemEnvelope = self.send(request).await?;
        Ok(envelope.item)
    }

    pub async fn delete_gallery_item(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/gallery/{id}")).await
    }

    // ========== Settings ==========

    pub async fn config(&self) -> ApiResult<ConfigResponse> {
        self.get("/api/config").await
    }

    pub async fn save_config(&self, update: &ConfigUpdate) -> ApiResult<()> {
        self.put::<IgnoredAny, _>("/api/config", update).await?;
        Ok(())
    }

    pub async fn test_llm(&self, request: &LlmTestRequest) -> ApiResult<LlmTestResponse> {
        self.post("/api/config/test-llm", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn decode_unwraps_tag_envelope() {
        let body = r#"{"success": true, "tag": {"id": "7", "name_en": "cat", "weight": 0}}"#;
        let envelope: TagEnvelope = decode(200, body).unwrap();
        assert_eq!(envelope.tag.id, "7");
        assert_eq!(envelope.tag.weight, 1.0);
    }

    #[test]
    fn decode_accepts_bodies_without_success_flag() {
        let snapshot: LibrarySnapshot = decode(200, r#"{"tags": [], "categories": []}"#).unwrap();
        assert!(snapshot.tags.is_empty());
    }

    #[rstest]
    #[case(400, r#"{"success": false, "error": "No input text provided"}"#, "No input text provided")]
    #[case(404, r#"{"success": false, "error": "Category not found"}"#, "Category not found")]
    #[case(200, r#"{"success": false}"#, "保存失败")]
    fn rejected_bodies_surface_backend_message(
        #[case] status: u16,
        #[case] body: &str,
        #[case] notice: &str,
    ) {
        let err = decode::<IgnoredAny>(status, body).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
        assert_eq!(err.notice("保存失败"), notice);
    }

    #[test]
    fn non_json_error_page_is_a_status_error() {
        let err = decode::<IgnoredAny>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Status(502, _)));
        assert_eq!(err.notice("请求失败"), "请求失败");
    }

    #[test]
    fn non_json_success_is_a_decode_error() {
        let err = decode::<IgnoredAny>(200, "ok").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn local_errors_use_their_own_notice() {
        let err = ApiError::from(FlowError::NothingToImport);
        assert_eq!(err.notice("导入失败"), "没有可导入的新标签");
    }

    #[test]
    fn tag_draft_payload_shape() {
        let draft = TagDraft {
            name_en: "cat".into(),
            name_zh: "猫".into(),
            category_id: None,
            weight: 1.2,
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name_en": "cat", "name_zh": "猫", "category_id": null, "weight": 1.2})
        );
    }

    #[test]
    fn batch_import_payload_shape() {
        let request = BatchImportRequest {
            tags: vec![ImportCandidate {
                name_en: "smile".into(),
                name_zh: "微笑".into(),
                category_id: Some("c1".into()),
                weight: 1.0,
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"tags": [{"name_en": "smile", "name_zh": "微笑", "category_id": "c1", "weight": 1.0}]})
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/api/tags"), "http://localhost:5000/api/tags");
    }
}

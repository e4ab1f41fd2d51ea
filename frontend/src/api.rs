//! HTTP implementation of the sync boundary, on top of `gloo-net`.

use common::editor::{NewsletterPayload, StagedFile};
use common::error::ApiError;
use common::model::newsletter::{ImageId, Newsletter, NewsletterId};
use common::model::story::{StoryId, SuccessStory};
use common::sync::{self, AdminApi, AdminExists, Endpoints, NewsletterApi, StoryApi};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData, Url};

/// A file picked in the browser, with an object URL for its thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile {
    pub file: File,
    pub preview_url: Option<String>,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        let preview_url = Url::create_object_url_with_blob(&file).ok();
        Self { file, preview_url }
    }

    /// Frees the thumbnail URL once the file left the editor.
    pub fn release(&self) {
        if let Some(url) = &self.preview_url {
            let _ = Url::revoke_object_url(url);
        }
    }
}

impl StagedFile for BrowserFile {
    fn file_name(&self) -> String {
        self.file.name()
    }

    fn byte_len(&self) -> u64 {
        self.file.size() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(api_base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(api_base),
        }
    }

    pub fn media_url(&self, path: &str) -> String {
        self.endpoints.media_url(path)
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

async fn execute(request: Result<Request, gloo_net::Error>) -> Result<(u16, String), ApiError> {
    let request = request.map_err(|e| ApiError::Transport(e.to_string()))?;
    let url = request.url();
    let method = request.method();
    let response = request.send().await.map_err(|e| {
        log::warn!("api: {:?} {} failed: {}", method, url, e);
        ApiError::Transport(e.to_string())
    })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    log::debug!("api: {:?} {} -> {}", method, url, status);
    Ok((status, body))
}

async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let (status, body) = execute(builder.build()).await?;
    sync::decode(status, &body)
}

async fn fetch_empty(builder: RequestBuilder) -> Result<(), ApiError> {
    let (status, body) = execute(builder.build()).await?;
    sync::check_status(status, &body)
}

fn multipart(payload: &NewsletterPayload<BrowserFile>) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in payload.text_fields() {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    for image in &payload.images {
        form.append_with_blob_and_filename("images", &image.file, &image.file.name())
            .map_err(js_error)?;
    }
    Ok(form)
}

async fn send_form(builder: RequestBuilder, payload: &NewsletterPayload<BrowserFile>) -> Result<Newsletter, ApiError> {
    let form = multipart(payload)?;
    let (status, body) = execute(builder.body(form)).await?;
    sync::decode(status, &body)
}

impl NewsletterApi for HttpApi {
    type File = BrowserFile;

    async fn list(&self) -> Result<Vec<Newsletter>, ApiError> {
        fetch_json(Request::get(&self.endpoints.newsletters())).await
    }

    async fn create(&self, payload: NewsletterPayload<BrowserFile>) -> Result<Newsletter, ApiError> {
        send_form(Request::post(&self.endpoints.newsletters()), &payload).await
    }

    async fn update(
        &self,
        id: NewsletterId,
        payload: NewsletterPayload<BrowserFile>,
    ) -> Result<Newsletter, ApiError> {
        send_form(Request::put(&self.endpoints.newsletter(id)), &payload).await
    }

    async fn delete(&self, id: NewsletterId) -> Result<(), ApiError> {
        fetch_empty(Request::delete(&self.endpoints.newsletter(id))).await
    }

    async fn delete_all(&self) -> Result<(), ApiError> {
        fetch_empty(Request::delete(&self.endpoints.newsletters_delete_all())).await
    }

    async fn delete_attachment(
        &self,
        newsletter_id: NewsletterId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        fetch_empty(Request::delete(
            &self.endpoints.newsletter_image(newsletter_id, image_id),
        ))
        .await
    }
}

impl StoryApi for HttpApi {
    async fn list_stories(&self) -> Result<Vec<SuccessStory>, ApiError> {
        fetch_json(Request::get(&self.endpoints.success_stories())).await
    }

    async fn delete_story(&self, id: StoryId) -> Result<(), ApiError> {
        fetch_empty(Request::delete(&self.endpoints.success_story(id))).await
    }
}

impl AdminApi for HttpApi {
    async fn check_admin_exists(&self) -> Result<bool, ApiError> {
        let answer: AdminExists = fetch_json(Request::get(&self.endpoints.check_admin_exists())).await?;
        Ok(answer.exists)
    }
}

//! REST client for the plan_vision API.
//!
//! Every request carries the stored bearer token. A 401 from any endpoint
//! publishes [`AuthEvent::Unauthorized`](crate::events::AuthEvent) before the
//! error is returned.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use planvision_core::types::DbId;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ClientConfig;
use crate::domain::{AuthUser, Generation, ImageType, InputImage, Project, RenderConfig, Style};
use crate::dto::{
    AuthResponseDto, CreateInputImageRequest, CreateProjectRequest, CreateRenderConfigRequest,
    GenerationStatusDto, ImageTypeDto, InputImageDto, ProjectDto, RenderConfigDto, SessionDto,
    SignInRequest, SignUpRequest, StyleDto,
};
use crate::error::{ClientError, ClientResult};
use crate::events::AuthEvents;
use crate::session::SessionBackend;
use crate::token_store::TokenStore;

/// Error body produced by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    events: AuthEvents,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        events: AuthEvents,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
            events,
        })
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let mut request = self.http.request(method, url);
        if let Some(token) = self.tokens.get_token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.events.publish_unauthorized();
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(response.json().await?)
    }

    // ========== Auth ==========

    /// Sign in and store the issued token.
    pub async fn sign_in_email(&self, email: &str, password: &str) -> ClientResult<AuthUser> {
        let auth: AuthResponseDto = self
            .post("/api/auth/sign-in/email", &SignInRequest { email, password })
            .await?;
        self.tokens.save(&auth.token);
        Ok(auth.user)
    }

    /// Create an account and store the issued token.
    pub async fn sign_up_email(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthUser> {
        let auth: AuthResponseDto = self
            .post(
                "/api/auth/sign-up/email",
                &SignUpRequest {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        self.tokens.save(&auth.token);
        Ok(auth.user)
    }

    pub async fn get_session(&self) -> ClientResult<AuthUser> {
        let session: SessionDto = self.get("/api/auth/get-session").await?;
        Ok(session.user)
    }

    /// Invalidate the token server-side. The local copy is left alone.
    pub async fn sign_out(&self) -> ClientResult<()> {
        self.send(self.request(Method::POST, "/api/auth/sign-out")?)
            .await?;
        Ok(())
    }

    // ========== Catalog ==========

    pub async fn image_types(&self) -> ClientResult<Vec<ImageType>> {
        let dtos: Vec<ImageTypeDto> = self.get("/image-types").await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    /// Styles, optionally only those usable with `image_type_id`.
    pub async fn styles(&self, image_type_id: Option<DbId>) -> ClientResult<Vec<Style>> {
        let path = match image_type_id {
            Some(id) => format!("/styles?imageTypeId={id}"),
            None => "/styles".to_string(),
        };
        let dtos: Vec<StyleDto> = self.get(&path).await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    // ========== Projects ==========

    pub async fn projects(&self) -> ClientResult<Vec<Project>> {
        let dtos: Vec<ProjectDto> = self.get("/projects").await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    pub async fn create_project(&self, name: &str) -> ClientResult<Project> {
        let dto: ProjectDto = self
            .post("/projects", &CreateProjectRequest { name })
            .await?;
        Ok(dto.into())
    }

    /// Register an image that is already hosted at `url`.
    pub async fn create_input_image(&self, url: &str) -> ClientResult<InputImage> {
        let dto: InputImageDto = self
            .post("/input-images", &CreateInputImageRequest { url })
            .await?;
        Ok(dto.into())
    }

    pub async fn create_render_config(
        &self,
        request: &CreateRenderConfigRequest,
    ) -> ClientResult<RenderConfig> {
        let dto: RenderConfigDto = self.post("/render-configs", request).await?;
        Ok(dto.into())
    }

    // ========== Generations ==========

    /// Queue a render for `render_config_id`.
    pub async fn request_generation(&self, render_config_id: DbId) -> ClientResult<Generation> {
        let dto: GenerationStatusDto = self
            .post(
                &format!("/render-configs/{render_config_id}/generations"),
                &serde_json::json!({}),
            )
            .await?;
        Ok(dto.into())
    }

    /// Poll one generation.
    pub async fn generation(&self, id: DbId) -> ClientResult<Generation> {
        let dto: GenerationStatusDto = self.get(&format!("/generations/{id}")).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl SessionBackend for ApiClient {
    async fn fetch_session(&self) -> ClientResult<AuthUser> {
        self.get_session().await
    }

    async fn sign_out(&self) -> ClientResult<()> {
        ApiClient::sign_out(self).await
    }
}

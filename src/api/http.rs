use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::client::ChatApi;
use super::error::ApiError;
use super::types::{
    CallbackRequest, ConversationSummary, CreatedConversation, CredentialRequest, HistoryMessage,
    LoginResponse, SendRequest, SendResponse, TitleRequest, VerifyResponse,
};
use crate::config::ClientConfig;
use crate::services::store::CredentialStore;

/// reqwest-backed implementation of [`ChatApi`].
///
/// The bearer token is read from the credential store on every request, so a
/// logout taking effect mid-session is honored immediately; a request sent
/// with no token simply comes back as a 401.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    store: CredentialStore,
}

impl HttpApi {
    pub fn new(config: &ClientConfig, store: CredentialStore) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            store,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.store.load().await {
            Ok(Some((token, _))) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    fn transport_error(err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }

    fn parse_error_message(status: StatusCode, body: &str) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: String,
        }

        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            parsed.error
        } else {
            format!("HTTP {}: request failed", status.as_u16())
        }
    }

    async fn check(method: &str, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        tracing::debug!(%status, method, path, "api response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthInvalid);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: Self::parse_error_message(status, &body),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ChatApi for HttpApi {
    async fn exchange_credential(
        &self,
        provider: &str,
        credential: &str,
    ) -> Result<LoginResponse, ApiError> {
        let path = format!("/api/auth/{provider}");
        let response = self
            .client
            .post(self.endpoint(&path))
            .json(&CredentialRequest {
                credential: credential.to_string(),
            })
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("POST", &path, response).await?).await
    }

    async fn exchange_oauth_code(
        &self,
        provider: &str,
        code: &str,
    ) -> Result<LoginResponse, ApiError> {
        let path = format!("/api/auth/{provider}/callback");
        let response = self
            .client
            .post(self.endpoint(&path))
            .json(&CallbackRequest {
                code: code.to_string(),
            })
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("POST", &path, response).await?).await
    }

    async fn verify_token(&self, token: &str) -> Result<bool, ApiError> {
        let path = "/api/auth/verify";
        let response = self
            .client
            .get(self.endpoint(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let response = Self::check("GET", path, response).await?;
        let body: VerifyResponse = Self::decode(response).await?;
        Ok(body.valid)
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        let path = "/api/chat/conversations";
        let builder = self.client.get(self.endpoint(path));
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("GET", path, response).await?).await
    }

    async fn create_conversation(&self, title: &str) -> Result<CreatedConversation, ApiError> {
        let path = "/api/chat/conversation";
        let builder = self.client.post(self.endpoint(path)).json(&TitleRequest {
            title: title.to_string(),
        });
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("POST", path, response).await?).await
    }

    async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/chat/conversation/{conversation_id}");
        let builder = self.client.put(self.endpoint(&path)).json(&TitleRequest {
            title: title.to_string(),
        });
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check("PUT", &path, response).await?;
        Ok(())
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/chat/conversation/{conversation_id}");
        let builder = self.client.delete(self.endpoint(&path));
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::check("DELETE", &path, response).await?;
        Ok(())
    }

    async fn conversation_history(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, ApiError> {
        let path = format!("/api/chat/conversation/{conversation_id}");
        let builder = self.client.get(self.endpoint(&path));
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("GET", &path, response).await?).await
    }

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ApiError> {
        let path = "/api/chat";
        let builder = self.client.post(self.endpoint(path)).json(request);
        let response = self
            .authorized(builder)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::decode(Self::check("POST", path, response).await?).await
    }
}

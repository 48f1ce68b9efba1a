use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use usergate_auth::Credential;
use usergate_core::{ListParams, User, UserId, UserInput};

/// Thin HTTP client for the user service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    server: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server: impl Into<String>) -> Self {
        let server = server.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            server,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Exchange credentials for a token and keep it for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.url("/login"))
            .json(&Credential::new(username, password))
            .send()
            .await
            .context("Failed to connect to server")?;

        let body: Value = decode(resp).await?;
        let token = body
            .get("token")
            .and_then(|v| v.as_str())
            .context("Login response carried no token")?
            .to_string();

        tracing::debug!("logged in as {}", username);
        self.token = Some(token.clone());
        Ok(token)
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<User>> {
        let resp = self
            .authed(self.http.get(self.url("/users")).query(params))
            .send()
            .await
            .context("Failed to connect to server")?;
        decode(resp).await
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        let resp = self
            .authed(self.http.get(self.url(&format!("/users/{}", id))))
            .send()
            .await
            .context("Failed to connect to server")?;
        decode(resp).await
    }

    pub async fn create(&self, input: &UserInput) -> Result<User> {
        let resp = self
            .authed(self.http.post(self.url("/users")).json(input))
            .send()
            .await
            .context("Failed to connect to server")?;
        decode(resp).await
    }

    pub async fn update(&self, id: UserId, input: &UserInput) -> Result<User> {
        let resp = self
            .authed(self.http.put(self.url(&format!("/users/{}", id))).json(input))
            .send()
            .await
            .context("Failed to connect to server")?;
        decode(resp).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete(&self, id: UserId) -> Result<String> {
        let resp = self
            .authed(self.http.delete(self.url(&format!("/users/{}", id))))
            .send()
            .await
            .context("Failed to connect to server")?;

        let body: Value = decode(resp).await?;
        Ok(body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("deleted")
            .to_string())
    }
}

/// Decode a success body, or turn the server's `{"error","message"}` into an error.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text().await.context("Failed to read response")?;

    if !status.is_success() {
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let err = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        anyhow::bail!("Server returned {}: {}", status, err);
    }

    serde_json::from_str(&text).context("Failed to parse response")
}

/// One line per record, as shown by `list` and `get`.
pub fn format_user(user: &User) -> String {
    format!(
        "ID: {}, Name: {}, Email: {}, Age: {}",
        user.id, user.name, user.email, user.age
    )
}

use crate::models::{Group, GroupColor, GroupPage, GroupSearchResponse, Note};
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "https://pocketnotesappapi.vercel.app";
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;
pub(crate) const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        /// `{ "error": ... }` string from the response body, when present.
        server_error: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    fn http(status: reqwest::StatusCode, body: String, path: &str) -> Self {
        if status == reqwest::StatusCode::NOT_FOUND {
            return Self::NotFound(path.to_string());
        }

        let server_error = server_error_message(&body);
        let message = server_error
            .clone()
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "unexpected response".to_string());
        Self::Http {
            status: status.as_u16(),
            message,
            server_error,
        }
    }

    /// Message suitable for a toast: the server's own wording when it gave one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { server_error, .. } => server_error.as_deref(),
            _ => None,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Extract `error` from a JSON error body like `{"error":"Group already exists"}`.
pub(crate) fn server_error_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    v.get("error")
        .and_then(|e| e.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub page_size: u32,
    pub search_debounce_ms: u32,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut cfg = Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        };

        // Deployments may inject `window.ENV = { API_URL, PAGE_SIZE, SEARCH_DEBOUNCE_MS }`.
        // `api_url` is accepted too for older index.html templates.
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return cfg;
        };

        let get = |key: &str| js_sys::Reflect::get(&env, &key.into()).ok();

        if let Some(url) = get("API_URL")
            .and_then(|v| v.as_string())
            .or_else(|| get("api_url").and_then(|v| v.as_string()))
        {
            cfg.api_url = url;
        }
        if let Some(n) = get("PAGE_SIZE").and_then(|v| v.as_f64()) {
            if n >= 1.0 {
                cfg.page_size = n as u32;
            }
        }
        if let Some(n) = get("SEARCH_DEBOUNCE_MS").and_then(|v| v.as_f64()) {
            if n >= 0.0 {
                cfg.search_debounce_ms = n as u32;
            }
        }

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreateGroupRequest {
    pub name: String,
    pub color: GroupColor,
}

impl CreateGroupRequest {
    /// Both a non-blank name and an explicit color choice are required.
    pub fn new(name: &str, color: Option<GroupColor>) -> ApiResult<Self> {
        let name = name.trim();
        match color {
            Some(color) if !name.is_empty() => Ok(Self {
                name: name.to_string(),
                color,
            }),
            _ => Err(ApiError::Validation("All fields are required.".to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateNoteRequest {
    pub group_id: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateNoteRequest {
    pub content: String,
}

/// Rejects content that is empty once trimmed; the original text is kept as-is otherwise.
pub(crate) fn validate_note_content(content: &str) -> ApiResult<&str> {
    if content.trim().is_empty() {
        Err(ApiError::Validation("Note cannot be empty".to_string()))
    } else {
        Ok(content)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &EnvConfig) -> Self {
        Self::new(cfg.api_url.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed to send");
            ApiError::network(e)
        })?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(%method, path, %status, "request rejected");
            Err(ApiError::http(status, body, path))
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    pub(crate) fn groups_path(page: u32, limit: u32) -> String {
        format!("/api/groups?page={page}&limit={limit}")
    }

    pub(crate) fn search_path(query: &str) -> String {
        format!(
            "/api/groups/search?query={}",
            urlencoding::encode(query.trim())
        )
    }

    pub(crate) fn group_notes_path(group_id: &str) -> String {
        format!("/api/groups/{}/notes", urlencoding::encode(group_id))
    }

    pub(crate) fn note_path(note_id: &str) -> String {
        format!("/api/notes/{}", urlencoding::encode(note_id))
    }

    pub async fn list_groups(&self, page: u32, limit: u32) -> ApiResult<GroupPage> {
        tracing::debug!(page, limit, "fetching group page");
        self.request(Method::GET, &Self::groups_path(page, limit), None::<&()>)
            .await
    }

    /// Walks every page; used where the complete roster is needed (share dialog).
    pub async fn list_all_groups(&self, limit: u32) -> ApiResult<Vec<Group>> {
        let mut out: Vec<Group> = Vec::new();
        let mut page = 1;
        loop {
            let res = self.list_groups(page, limit).await?;
            merge_unique_groups(&mut out, res.data);
            if page >= res.total_pages {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    pub async fn search_groups(&self, query: &str) -> ApiResult<Vec<Group>> {
        let res: GroupSearchResponse = self
            .request(Method::GET, &Self::search_path(query), None::<&()>)
            .await?;
        Ok(res.data)
    }

    pub async fn create_group(&self, req: &CreateGroupRequest) -> ApiResult<Group> {
        tracing::info!(name = %req.name, color = %req.color, "creating group");
        self.request(Method::POST, "/api/groups", Some(req)).await
    }

    pub async fn list_notes(&self, group_id: &str) -> ApiResult<Vec<Note>> {
        tracing::debug!(group_id, "fetching notes");
        self.request(Method::GET, &Self::group_notes_path(group_id), None::<&()>)
            .await
    }

    pub async fn create_note(&self, group_id: &str, content: &str) -> ApiResult<Note> {
        let content = validate_note_content(content)?;
        self.request(
            Method::POST,
            "/api/notes",
            Some(&CreateNoteRequest {
                group_id: group_id.to_string(),
                content: content.to_string(),
            }),
        )
        .await
    }

    pub async fn update_note(&self, note_id: &str, content: &str) -> ApiResult<Note> {
        let content = validate_note_content(content)?;
        self.request(
            Method::PUT,
            &Self::note_path(note_id),
            Some(&UpdateNoteRequest {
                content: content.to_string(),
            }),
        )
        .await
    }

    /// The acknowledgment body varies between deployments and is not parsed.
    pub async fn delete_note(&self, note_id: &str) -> ApiResult<()> {
        self.send(Method::DELETE, &Self::note_path(note_id), None::<&()>)
            .await?;
        Ok(())
    }
}

/// Append `incoming` to `groups`, skipping ids already present (in either list).
pub(crate) fn merge_unique_groups(groups: &mut Vec<Group>, incoming: Vec<Group>) -> usize {
    let mut added = 0;
    for g in incoming {
        if g.id.trim().is_empty() || groups.iter().any(|x| x.id == g.id) {
            continue;
        }
        groups.push(g);
        added += 1;
    }
    added
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ClientError, JobHandle, JobSnapshot, JobStatus};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two remote operations the tracker needs. Idempotent observation:
/// `fetch_status` has no side effects and may be called any number of times.
#[async_trait::async_trait]
pub trait JobService: Send + Sync {
    async fn submit(&self, url: &str) -> Result<JobHandle, ClientError>;
    async fn fetch_status(&self, job_id: &str) -> Result<JobSnapshot, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpJobService {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpJobService {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let base_url = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ClientError::Transport(format!("invalid base url: {err}")))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Liveness probe against `/clone/health`. Outside the tracking core:
    /// the poll loop never calls this.
    pub async fn health(&self) -> bool {
        let Ok(endpoint) = self.base_url.join("/clone/health") else {
            return false;
        };
        match self.client.get(endpoint).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Transport(format!("invalid endpoint {path}: {err}")))
    }
}

#[async_trait::async_trait]
impl JobService for HttpJobService {
    async fn submit(&self, url: &str) -> Result<JobHandle, ClientError> {
        let endpoint = self.endpoint("/api/clone")?;
        let response = self
            .client
            .post(endpoint)
            .json(&CloneRequestBody { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: CloneResponseBody = response.json().await.map_err(map_reqwest_error)?;
        Ok(JobHandle {
            job_id: body.job_id,
            initial_status: body.status,
            message: body.message,
        })
    }

    async fn fetch_status(&self, job_id: &str) -> Result<JobSnapshot, ClientError> {
        let endpoint = self.endpoint(&format!("/api/clone/{job_id}"))?;
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: CloneResultBody = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.into_snapshot())
    }
}

#[derive(Debug, Serialize)]
struct CloneRequestBody<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct CloneResponseBody {
    job_id: String,
    status: JobStatus,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CloneResultBody {
    job_id: String,
    status: JobStatus,
    original_url: String,
    cloned_html: Option<String>,
    error_message: Option<String>,
}

impl CloneResultBody {
    /// A snapshot never carries both a payload and an error detail for the
    /// same terminal transition: Completed keeps the document, Failed keeps
    /// the detail, everything else carries neither.
    fn into_snapshot(self) -> JobSnapshot {
        let (result_payload, error_detail) = match self.status {
            JobStatus::Completed => (self.cloned_html, None),
            JobStatus::Failed => (None, self.error_message),
            JobStatus::Pending | JobStatus::Processing => (None, None),
        };
        JobSnapshot {
            job_id: self.job_id,
            status: self.status,
            original_url: self.original_url,
            result_payload,
            error_detail,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Drains a non-2xx response for an optional `{detail}` body, falling back
/// to the HTTP status line. Error bodies are not guaranteed to be JSON.
async fn service_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let detail = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.detail),
        Err(_) => None,
    };
    ClientError::Service(detail.unwrap_or_else(|| status.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Transport(format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return ClientError::Transport(format!("connection failed: {err}"));
    }
    ClientError::Transport(err.to_string())
}

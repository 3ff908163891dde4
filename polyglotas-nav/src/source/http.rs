//! REST curriculum source
//!
//! Endpoints, relative to the configured base URL:
//! - `GET /units` → `{ "units": [...] }`
//! - `GET /units/{id}/lessons` → `{ "lessons": [...] }`
//! - `GET /lessons/{id}/phrases` → `{ "phrases": [...] }`
//! - `GET /permissions` → `{ "tier": "free" | "starter" | "pro" }`
//!
//! When an API key is configured it is sent both as the `apikey` header and
//! as a bearer token, which is what the managed backend's gateway expects.

use async_trait::async_trait;
use polyglotas_common::config::ResolvedConfig;
use polyglotas_common::curriculum::{LessonId, LessonPhrases, UnitId, UnitLessons, UnitList};
use polyglotas_common::{Error, Result, TierPermissions};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::CurriculumSource;

pub struct HttpCurriculumSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCurriculumSource {
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("polyglotas-nav/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url));
        }
        let response = response.error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CurriculumSource for HttpCurriculumSource {
    async fn fetch_units(&self) -> Result<UnitList> {
        self.get_json("units").await
    }

    async fn fetch_unit_lessons(&self, unit_id: UnitId) -> Result<UnitLessons> {
        self.get_json(&format!("units/{}/lessons", unit_id)).await
    }

    async fn fetch_lesson_phrases(&self, lesson_id: LessonId) -> Result<LessonPhrases> {
        self.get_json(&format!("lessons/{}/phrases", lesson_id)).await
    }

    async fn fetch_permissions(&self) -> Result<TierPermissions> {
        self.get_json("permissions").await
    }
}

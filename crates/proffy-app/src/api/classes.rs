//! HTTP implementation of the classes API
//!
//! `GET {base}/classes?subject=..&week_day=..&time=HH:mm`, answered with a
//! JSON array of teachers.

use crate::config::api::{CLASSES_PATH, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::network::HttpClient;
use proffy::model::{FilterCriteria, Teacher};
use tracing::info;

use super::traits::ClassesApi;

/// Classes API over HTTP
pub struct HttpClassesApi {
    client: HttpClient,
    base_url: String,
}

impl HttpClassesApi {
    /// Client for the default backend
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client for a custom backend
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl ClassesApi for HttpClassesApi {
    fn search_classes(&self, criteria: &FilterCriteria) -> Result<Vec<Teacher>> {
        let teachers: Vec<Teacher> = self
            .client
            .get_json(&self.url(CLASSES_PATH), &criteria.query_params())?;
        info!(
            subject = %criteria.subject,
            week_day = criteria.week_day.number(),
            time = %criteria.formatted_time(),
            results = teachers.len(),
            "classes search completed"
        );
        Ok(teachers)
    }
}

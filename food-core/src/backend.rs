use crate::{
    Config,
    backend::http::HttpBackend,
    error::BackendError,
    model::{DescriptionDetail, RecipeDetail, RecommendRequest, RecommendResponse},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// The recommendation service and its recipe/description generators.
#[async_trait]
pub trait FoodBackend: Send + Sync + Debug {
    /// `POST /recommend`. Any failure is reported as [`BackendError::RecommendationsUnavailable`].
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, BackendError>;

    /// `POST /generate_recipe`. Failures are [`BackendError::Recipe`].
    async fn generate_recipe(&self, food_name: &str) -> Result<RecipeDetail, BackendError>;

    /// `POST /generate_description`. Failures are [`BackendError::Description`].
    async fn generate_description(&self, food_name: &str)
    -> Result<DescriptionDetail, BackendError>;
}

/// Construct the HTTP backend from config (and the `FOOD_API_URL` override).
pub fn backend_from_config(config: &Config) -> anyhow::Result<Box<dyn FoodBackend>> {
    let backend = HttpBackend::new(config.api_base_url(), config.detail_base_url())?;
    Ok(Box::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_default_config() {
        let cfg = Config { api_base_url: Some("http://127.0.0.1:9".into()), ..Config::default() };
        assert!(backend_from_config(&cfg).is_ok());
    }

    #[test]
    fn backend_from_config_rejects_bad_url() {
        let cfg = Config { detail_base_url: Some("not a url".into()), ..Config::default() };
        let err = backend_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid backend URL"));
    }
}

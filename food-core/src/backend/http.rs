use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::BackendError,
    model::{DescriptionDetail, RecipeDetail, RecommendRequest, RecommendResponse},
};

use super::FoodBackend;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// JSON-over-HTTP client for the recommendation backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    api_base_url: String,
    detail_base_url: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct DetailRequest<'a> {
    food_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    #[serde(default)]
    recipe: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DescriptionEnvelope {
    #[serde(default)]
    description: Option<Value>,
}

impl HttpBackend {
    pub fn new(api_base_url: impl Into<String>, detail_base_url: impl Into<String>) -> Result<Self> {
        let api_base_url = normalize_base(api_base_url.into())?;
        let detail_base_url = normalize_base(detail_base_url.into())?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_base_url, detail_base_url, http })
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B, what: &str) -> Result<String> {
        debug!(url, "POST {what}");

        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {what} request"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "{what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }

    async fn fetch_recommendations(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let url = format!("{}/recommend", self.api_base_url);
        let body = self.post_json(&url, request, "recommendation").await?;

        serde_json::from_str(&body).context("Failed to parse recommendation JSON")
    }

    async fn fetch_recipe(&self, food_name: &str) -> Result<RecipeDetail> {
        let url = format!("{}/generate_recipe", self.detail_base_url);
        let body = self.post_json(&url, &DetailRequest { food_name }, "recipe").await?;

        let envelope: RecipeEnvelope =
            serde_json::from_str(&body).context("Recipe response was not valid JSON")?;
        let recipe = envelope.recipe.ok_or_else(|| anyhow!("No recipe returned"))?;

        decode_nested(recipe, "recipe")
    }

    async fn fetch_description(&self, food_name: &str) -> Result<DescriptionDetail> {
        let url = format!("{}/generate_description", self.detail_base_url);
        let body = self.post_json(&url, &DetailRequest { food_name }, "description").await?;

        let envelope: DescriptionEnvelope =
            serde_json::from_str(&body).context("Description response was not valid JSON")?;
        let description = envelope.description.ok_or_else(|| anyhow!("No description returned"))?;

        decode_nested(description, "description")
    }
}

#[async_trait]
impl FoodBackend for HttpBackend {
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, BackendError> {
        self.fetch_recommendations(request).await.map_err(|err| {
            warn!(error = ?err, location = %request.location, "recommendation fetch failed");
            BackendError::RecommendationsUnavailable { reason: format!("{err:#}") }
        })
    }

    async fn generate_recipe(&self, food_name: &str) -> Result<RecipeDetail, BackendError> {
        self.fetch_recipe(food_name).await.map_err(|err| {
            warn!(error = ?err, food_name, "recipe generation failed");
            BackendError::Recipe(err.to_string())
        })
    }

    async fn generate_description(
        &self,
        food_name: &str,
    ) -> Result<DescriptionDetail, BackendError> {
        self.fetch_description(food_name).await.map_err(|err| {
            warn!(error = ?err, food_name, "description generation failed");
            BackendError::Description(err.to_string())
        })
    }
}

/// The generators wrap their JSON answer in a string field; decode that
/// inner document. An already-structured value is accepted as is.
fn decode_nested<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    match value {
        Value::String(raw) if raw.trim().is_empty() => Err(anyhow!("No {what} returned")),
        Value::String(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("The {what} payload was not valid JSON")),
        Value::Null => Err(anyhow!("No {what} returned")),
        other => serde_json::from_value(other)
            .with_context(|| format!("The {what} payload had an unexpected shape")),
    }
}

fn normalize_base(url: String) -> Result<String> {
    Url::parse(&url).with_context(|| format!("Invalid backend URL: {url}"))?;
    Ok(url.trim_end_matches('/').to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_string_is_decoded() {
        let raw = json!("{\"steps\": \"<ol><li>Boil</li></ol>\", \"video_link\": null}");
        let recipe: RecipeDetail = decode_nested(raw, "recipe").expect("nested recipe decodes");
        assert_eq!(recipe.steps, "<ol><li>Boil</li></ol>");
        assert_eq!(recipe.video_link, None);
    }

    #[test]
    fn nested_object_is_accepted() {
        let raw = json!({ "description": "Crispy and golden." });
        let detail: DescriptionDetail = decode_nested(raw, "description").expect("object decodes");
        assert_eq!(detail.description, "Crispy and golden.");
    }

    #[test]
    fn empty_or_malformed_nested_payload_fails() {
        let err = decode_nested::<RecipeDetail>(json!(""), "recipe").unwrap_err();
        assert_eq!(err.to_string(), "No recipe returned");

        let err = decode_nested::<RecipeDetail>(json!("API request failed"), "recipe").unwrap_err();
        assert_eq!(err.to_string(), "The recipe payload was not valid JSON");
    }

    #[test]
    fn base_urls_lose_trailing_slash() {
        assert_eq!(
            normalize_base("http://localhost:5000/".into()).expect("valid url"),
            "http://localhost:5000"
        );
        assert!(normalize_base("localhost".into()).is_err());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}

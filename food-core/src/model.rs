use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A resolved pair of coordinates, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// The location recommendations are requested for.
///
/// Either both coordinates are known or neither is; the unresolved form is
/// what the client holds before any resolution has happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    coordinates: Option<Coordinates>,
    name: String,
}

impl Location {
    pub fn new(coordinates: Coordinates, name: impl Into<String>) -> Self {
        Self { coordinates: Some(coordinates), name: name.into() }
    }

    pub fn unresolved() -> Self {
        Self { coordinates: None, name: String::new() }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location: String,
}

impl From<&Location> for RecommendRequest {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            location: location.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<FoodItem>,

    #[serde(default)]
    pub weather: Option<WeatherPayload>,

    /// Meal-time bucket the backend chose, e.g. "lunch" or "late-night".
    #[serde(default)]
    pub mealtime: Option<String>,
}

/// Price as sent by the backend: usually a number, sometimes a
/// currency-formatted string such as `"$12.99"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Price {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64().map(Price::Number).unwrap_or_default(),
            Value::String(s) => Price::Text(s),
            _ => Price::Missing,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FoodItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default)]
    pub price: Price,

    /// Rating out of 5; anything non-numeric reads as 0.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate: f64,

    #[serde(default)]
    pub img: Option<String>,

    #[serde(default, rename = "orderLink")]
    pub order_link: Option<String>,

    #[serde(default, rename = "_category")]
    pub category: Option<String>,
}

impl FoodItem {
    /// An item known only by name, e.g. one picked on the command line.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// Weather as reported alongside a recommendation (OpenWeather "current" shape).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather: Vec<WeatherCondition>,

    #[serde(default)]
    pub main: Option<WeatherMain>,

    /// Seconds east of UTC at the target location.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub timezone: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,
}

impl WeatherPayload {
    /// Lowercase keyword of the first condition entry ("clear", "rain", ...).
    pub fn condition_keyword(&self) -> Option<String> {
        self.weather
            .first()
            .map(|w| w.main.as_deref().unwrap_or_default().to_lowercase())
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    /// "Place: condition" line, e.g. "New York: light rain". The condition
    /// prefers the detailed description over the category keyword.
    pub fn summary(&self) -> Option<String> {
        let condition = self.weather.first()?;
        let text = [condition.description.as_deref(), condition.main.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())?;

        Some(match self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(place) => format!("{place}: {text}"),
            None => text.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherMain {
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub temp: Option<f64>,
}

/// Generated recipe: HTML step list plus an optional video URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeDetail {
    pub steps: String,
    #[serde(default)]
    pub video_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DescriptionDetail {
    pub description: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    lenient_opt_f64(deserializer).map(Option::unwrap_or_default)
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| value.as_f64().map(|f| f.round() as i64)))
}

//! Core library for the `food` recommendation client.
//!
//! This crate defines:
//! - Configuration, including the persisted theme
//! - Location resolution with demo-city fallback
//! - The recommendation backend client and its detail lookups
//! - Pure helpers: weather context text and list sorting
//! - Session state for the recommendation list and the detail view
//!
//! It is used by `food-cli`, but can also be reused by other front-ends.

pub mod app;
pub mod backend;
pub mod config;
pub mod context;
pub mod detail;
pub mod error;
pub mod location;
pub mod model;
pub mod sort;
pub mod theme;

pub use app::{AppState, RequestTicket};
pub use backend::{FoodBackend, backend_from_config};
pub use config::Config;
pub use context::weather_context;
pub use detail::{DetailTab, DetailView};
pub use error::{BackendError, LocationError};
pub use location::{LocationChoice, LocationResolver};
pub use model::{
    Coordinates, DescriptionDetail, FoodItem, Location, Price, RecipeDetail, RecommendRequest,
    RecommendResponse, WeatherPayload,
};
pub use sort::{SortKey, sort_items};
pub use theme::Theme;

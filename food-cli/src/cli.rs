use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use food_core::{
    AppState, BackendError, Config, Coordinates, DescriptionDetail, DetailView, FoodBackend,
    FoodItem, LocationChoice, LocationResolver, RecipeDetail, SortKey, Theme, backend_from_config,
    config::{DEFAULT_API_BASE_URL, DeviceConfig},
    location::locator_for,
};
use inquire::{Confirm, CustomType, Select, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "food", version, about = "Weather-aware food recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show recommendations for the current or a demo location.
    Recommend {
        /// Demo location name (see `food locations`), or "current".
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,

        /// Device latitude; used instead of the configured device position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Device longitude.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Sort key: name, price or rating.
        #[arg(long, default_value = "name")]
        sort: String,
    },

    /// Generate a recipe and/or description for a dish.
    Detail {
        /// Dish name, as shown in the recommendation list.
        food: String,

        /// Only fetch the recipe.
        #[arg(long)]
        recipe: bool,

        /// Only fetch the description.
        #[arg(long)]
        description: bool,
    },

    /// List the demo locations.
    Locations,

    /// Show or toggle the colour theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Interactively edit the configuration file.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Switch between light and dark.
    Toggle,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Recommend { location, lat, lon, sort } => {
                let device = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                recommend(location.as_deref(), device, SortKey::parse(&sort)).await
            }
            Command::Detail { food, recipe, description } => {
                // No flag means both.
                let both = !recipe && !description;
                detail(food, recipe || both, description || both).await
            }
            Command::Locations => {
                render::print_locations();
                Ok(())
            }
            Command::Theme { action } => theme(action.unwrap_or(ThemeAction::Show)),
            Command::Configure => configure(),
        }
    }
}

async fn recommend(
    location: Option<&str>,
    device: Option<Coordinates>,
    sort: SortKey,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let backend = backend_from_config(&config)?;

    let device = device.or_else(|| config.device_coordinates());
    let resolver = LocationResolver::new(locator_for(device));
    let resolved = match location {
        Some(name) => resolver.select(LocationChoice::from_name(name)?).await?,
        None => resolver.resolve_current().await,
    };

    let mut state = AppState::new(config.theme());
    state.set_sort_key(sort);

    if let Some(ticket) = state.location_changed(resolved) {
        match backend.recommend(ticket.request()).await {
            Ok(response) => {
                state.fetch_succeeded(&ticket, response);
            }
            Err(err) => {
                state.fetch_failed(&ticket, &err);
            }
        }
    }

    render::print_recommendations(&state);

    if let Some(err) = state.error() {
        bail!("{err}");
    }

    Ok(())
}

async fn detail(food: String, want_recipe: bool, want_description: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let backend = backend_from_config(&config)?;

    let mut view = DetailView::open(FoodItem::named(food));
    let (recipe, description) =
        fetch_details(backend.as_ref(), &view.food().name, want_recipe, want_description).await;

    if let Some(result) = recipe {
        view.apply_recipe(result);
    }
    if let Some(result) = description {
        view.apply_description(result);
    }

    render::print_detail(&view, config.theme());
    Ok(())
}

/// Run the requested lookups concurrently; neither affects the other.
async fn fetch_details(
    backend: &dyn FoodBackend,
    name: &str,
    want_recipe: bool,
    want_description: bool,
) -> (Option<Result<RecipeDetail, BackendError>>, Option<Result<DescriptionDetail, BackendError>>) {
    debug!(name, want_recipe, want_description, "fetching details");

    let recipe = async {
        if want_recipe { Some(backend.generate_recipe(name).await) } else { None }
    };
    let description = async {
        if want_description { Some(backend.generate_description(name).await) } else { None }
    };

    tokio::join!(recipe, description)
}

fn theme(action: ThemeAction) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            config.toggle_theme();
            config.save()?;
        }
    }

    render::print_theme(config.theme());
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_default =
        config.api_base_url.clone().unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let api = Text::new("Recommendation API base URL:")
        .with_default(&api_default)
        .prompt()
        .context("Failed to read API base URL")?;

    let detail_default = config.detail_base_url();
    let detail = Text::new("Recipe/description API base URL:")
        .with_default(&detail_default)
        .prompt()
        .context("Failed to read detail base URL")?;

    let current = config.theme();
    let themes = Theme::all().to_vec();
    let cursor = themes.iter().position(|t| *t == current).unwrap_or_default();
    let theme = Select::new("Theme:", themes)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read theme")?;

    let use_device = Confirm::new("Use a fixed device position for \"Current Location\"?")
        .with_default(config.device.is_some())
        .prompt()
        .context("Failed to read device choice")?;

    config.device = if use_device {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read longitude")?;
        Some(DeviceConfig { latitude, longitude })
    } else {
        None
    };

    config.api_base_url = Some(api.trim().to_string());
    config.detail_base_url = Some(detail.trim().to_string());
    config.set_theme(theme);

    // Reject unusable URLs before writing them out.
    backend_from_config(&config)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

use food_core::{
    AppState, DetailTab, DetailView, Theme,
    detail::{display_price, embed_video_link, markup_to_text},
    location::DEMO_LOCATIONS,
};

fn theme_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☀️",
        Theme::Dark => "🌙",
    }
}

pub fn print_recommendations(state: &AppState) {
    println!("{} Food recommendations", theme_glyph(state.theme()));

    if let Some(location) = state.location() {
        println!("Location: {}", location.name());
    }
    if let Some(summary) = state.weather_summary() {
        println!("Weather: {summary}");
    }
    if let Some(mealtime) = state.mealtime() {
        println!("Meal time: {mealtime}");
    }
    for line in state.weather_context().lines() {
        println!("{line}");
    }

    // The error itself is reported by the caller.
    if state.error().is_some() {
        return;
    }

    let items = state.sorted_recommendations();
    if items.is_empty() {
        println!("\nNo recommendations right now.");
        return;
    }

    println!("\nSorted by {}:", state.sort_key());
    for (idx, item) in items.iter().enumerate() {
        let price = display_price(&item.price);
        let category = item.category.as_deref().map(|c| format!("  [{c}]")).unwrap_or_default();
        println!("{:>3}. {:<32} {:>10}  {:.1} / 5{category}", idx + 1, item.name, price, item.rate);
        if let Some(link) = item.order_link.as_deref().filter(|l| !l.trim().is_empty()) {
            println!("     Order: {link}");
        }
    }
}

pub fn print_detail(view: &DetailView, theme: Theme) {
    println!("{} {}", theme_glyph(theme), view.food().name);

    let price = view.display_price();
    if !price.is_empty() {
        println!("Price: {price}");
    }
    if let Some(category) = &view.food().category {
        println!("Category: {category}");
    }

    if let Some(recipe) = view.recipe() {
        let marker = if view.active_tab() == Some(DetailTab::Recipe) { "*" } else { "" };
        println!("\nRecipe steps{marker}:");
        println!("{}", markup_to_text(&recipe.steps));
        if let Some(link) = &recipe.video_link {
            println!("Video: {}", embed_video_link(link));
        }
    }
    if let Some(err) = view.recipe_error() {
        println!("\n{err}");
    }

    if let Some(description) = view.description() {
        let marker = if view.active_tab() == Some(DetailTab::Description) { "*" } else { "" };
        println!("\nAbout this dish{marker}:");
        println!("{description}");
    }
    if let Some(err) = view.description_error() {
        println!("\n{err}");
    }

    println!("\nOrder online: {}", view.order_url());
}

pub fn print_locations() {
    println!("  0. Current Location (device, falls back to New York, USA)");
    for (idx, demo) in DEMO_LOCATIONS.iter().enumerate() {
        println!(
            "{:>3}. {} ({:.4}, {:.4})",
            idx + 1,
            demo.name,
            demo.coordinates.latitude,
            demo.coordinates.longitude
        );
    }
}

pub fn print_theme(theme: Theme) {
    println!("{} Theme: {theme}", theme_glyph(theme));
}

//! State behind the per-item detail view: the lazily generated recipe and
//! description, their errors, and link helpers.
//!
//! A view lives only while the item is open; dropping it discards whatever
//! was fetched, so reopening the item fetches again.

use crate::{
    error::BackendError,
    model::{DescriptionDetail, FoodItem, Price, RecipeDetail},
};

const ORDER_SEARCH_BASE: &str = "https://www.google.com/search?q=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Recipe,
    Description,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    food: FoodItem,
    recipe: Option<RecipeDetail>,
    description: Option<String>,
    recipe_error: Option<String>,
    description_error: Option<String>,
    active_tab: Option<DetailTab>,
}

impl DetailView {
    pub fn open(food: FoodItem) -> Self {
        Self {
            food,
            recipe: None,
            description: None,
            recipe_error: None,
            description_error: None,
            active_tab: None,
        }
    }

    pub fn food(&self) -> &FoodItem {
        &self.food
    }

    pub fn recipe(&self) -> Option<&RecipeDetail> {
        self.recipe.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn recipe_error(&self) -> Option<&str> {
        self.recipe_error.as_deref()
    }

    pub fn description_error(&self) -> Option<&str> {
        self.description_error.as_deref()
    }

    pub fn active_tab(&self) -> Option<DetailTab> {
        self.active_tab
    }

    /// Record the outcome of a recipe fetch. Only recipe state is touched.
    pub fn apply_recipe(&mut self, result: Result<RecipeDetail, BackendError>) {
        match result {
            Ok(recipe) => {
                self.recipe = Some(recipe);
                self.recipe_error = None;
                self.active_tab = Some(DetailTab::Recipe);
            }
            Err(err) => self.recipe_error = Some(err.to_string()),
        }
    }

    /// Record the outcome of a description fetch. Only description state is touched.
    pub fn apply_description(&mut self, result: Result<DescriptionDetail, BackendError>) {
        match result {
            Ok(detail) => {
                self.description = Some(detail.description);
                self.description_error = None;
                self.active_tab = Some(DetailTab::Description);
            }
            Err(err) => self.description_error = Some(err.to_string()),
        }
    }

    /// Switch tabs; only tabs with loaded content can be shown.
    pub fn show(&mut self, tab: DetailTab) -> bool {
        let available = match tab {
            DetailTab::Recipe => self.recipe.is_some(),
            DetailTab::Description => self.description.is_some(),
        };
        if available {
            self.active_tab = Some(tab);
        }
        available
    }

    pub fn display_price(&self) -> String {
        display_price(&self.food.price)
    }

    /// The backend's location-aware order link when it sent one, else a
    /// plain web search for the dish.
    pub fn order_url(&self) -> String {
        match self.food.order_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => link.to_string(),
            _ => order_search_url(&self.food.name),
        }
    }
}

/// `$12.50` for numeric prices; text prices are shown verbatim.
pub fn display_price(price: &Price) -> String {
    match price {
        Price::Number(n) => format!("${n:.2}"),
        Price::Text(s) => s.clone(),
        Price::Missing => String::new(),
    }
}

/// Web search link for ordering `food_name` online.
pub fn order_search_url(food_name: &str) -> String {
    let query = format!("order {food_name} online");
    format!("{ORDER_SEARCH_BASE}{}", urlencoding::encode(&query))
}

/// Turn a YouTube watch link into its embeddable form.
pub fn embed_video_link(link: &str) -> String {
    link.replace("watch?v=", "embed/")
}

/// Plain-text rendering of the generated recipe markup.
///
/// Tags are never passed through: list items become `- ` lines, block
/// boundaries become newlines, everything else is dropped.
pub fn markup_to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.chars().peekable();

    while let Some(c) = chars.next() {
        // A `<` not followed by a tag name, `/` or `!` is literal text.
        let opens_tag = c == '<'
            && chars
                .peek()
                .is_some_and(|&next| next.is_ascii_alphabetic() || matches!(next, '/' | '!'));
        if !opens_tag {
            out.push(c);
            continue;
        }

        let tag: String = chars.by_ref().take_while(|&c| c != '>').collect();
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match name.as_str() {
            "li" if !tag.starts_with('/') => out.push_str("\n- "),
            "li" | "br" | "p" | "ol" | "ul" | "div" | "h1" | "h2" | "h3" | "h4" => out.push('\n'),
            _ => {}
        }
    }

    decode_entities(&out)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> RecipeDetail {
        RecipeDetail {
            steps: "<ol><li>Knead</li><li>Bake</li></ol>".into(),
            video_link: Some("https://www.youtube.com/watch?v=abc123".into()),
        }
    }

    #[test]
    fn successful_fetch_switches_tab() {
        let mut view = DetailView::open(FoodItem::named("Focaccia"));
        assert_eq!(view.active_tab(), None);

        view.apply_recipe(Ok(recipe()));
        assert_eq!(view.active_tab(), Some(DetailTab::Recipe));

        view.apply_description(Ok(DescriptionDetail { description: "Airy bread.".into() }));
        assert_eq!(view.active_tab(), Some(DetailTab::Description));
        assert_eq!(view.description(), Some("Airy bread."));

        assert!(view.show(DetailTab::Recipe));
        assert_eq!(view.active_tab(), Some(DetailTab::Recipe));
    }

    #[test]
    fn failure_is_scoped_to_its_operation() {
        let mut view = DetailView::open(FoodItem::named("Focaccia"));
        view.apply_description(Ok(DescriptionDetail { description: "Airy bread.".into() }));

        view.apply_recipe(Err(BackendError::Recipe("No recipe returned".into())));

        assert_eq!(view.recipe_error(), Some("Failed to generate recipe. No recipe returned"));
        assert_eq!(view.description_error(), None);
        assert_eq!(view.description(), Some("Airy bread."));
        assert_eq!(view.active_tab(), Some(DetailTab::Description));
    }

    #[test]
    fn retry_clears_the_error() {
        let mut view = DetailView::open(FoodItem::named("Focaccia"));
        view.apply_recipe(Err(BackendError::Recipe("timeout".into())));
        view.apply_recipe(Ok(recipe()));

        assert_eq!(view.recipe_error(), None);
        assert!(view.recipe().is_some());
    }

    #[test]
    fn cannot_show_an_empty_tab() {
        let mut view = DetailView::open(FoodItem::named("Focaccia"));
        assert!(!view.show(DetailTab::Description));
        assert_eq!(view.active_tab(), None);
    }

    #[test]
    fn reopening_starts_empty() {
        let mut view = DetailView::open(FoodItem::named("Focaccia"));
        view.apply_recipe(Ok(recipe()));
        drop(view);

        let view = DetailView::open(FoodItem::named("Focaccia"));
        assert!(view.recipe().is_none());
    }

    #[test]
    fn price_display() {
        assert_eq!(display_price(&Price::Number(12.5)), "$12.50");
        assert_eq!(display_price(&Price::Text("$3.99".into())), "$3.99");
        assert_eq!(display_price(&Price::Missing), "");
    }

    #[test]
    fn order_link_is_url_escaped() {
        assert_eq!(
            order_search_url("Mac & Cheese"),
            "https://www.google.com/search?q=order%20Mac%20%26%20Cheese%20online"
        );
    }

    #[test]
    fn order_url_prefers_backend_link() {
        let food = FoodItem {
            order_link: Some("https://www.google.com/search?q=order+Dosa+in+New+Delhi".into()),
            ..FoodItem::named("Dosa")
        };
        assert_eq!(
            DetailView::open(food).order_url(),
            "https://www.google.com/search?q=order+Dosa+in+New+Delhi"
        );

        let food = FoodItem { order_link: Some(" ".into()), ..FoodItem::named("Dosa") };
        assert_eq!(
            DetailView::open(food).order_url(),
            "https://www.google.com/search?q=order%20Dosa%20online"
        );
    }

    #[test]
    fn video_link_embeds() {
        assert_eq!(
            embed_video_link("https://www.youtube.com/watch?v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn markup_becomes_plain_steps() {
        let text = markup_to_text(
            "<ol>\n<li>Mix <b>flour</b> &amp; water</li>\n<li>Rest 1&nbsp;hour</li></ol><script>x</script>",
        );
        assert_eq!(text, "- Mix flour & water\n- Rest 1 hour\nx");
    }

    #[test]
    fn bare_angle_brackets_are_kept() {
        let text = markup_to_text("<ol><li>Bake < 5 min at 200°C</li><li>Cool for <10 min</li></ol>");
        assert_eq!(text, "- Bake < 5 min at 200°C\n- Cool for <10 min");

        assert_eq!(markup_to_text("3 <4 & trailing <"), "3 <4 & trailing <");
        assert_eq!(markup_to_text("a<!-- note -->b"), "ab");
    }
}

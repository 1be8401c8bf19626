use feruca::Collator;

use crate::model::{FoodItem, Price};

/// Key the recommendation list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Rating,
    /// Keep the backend's order.
    Unsorted,
}

impl SortKey {
    /// Parse a key name; anything unrecognised keeps the input order.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "rating" | "rate" => SortKey::Rating,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Unsorted => "none",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return a new, stably sorted copy of `items`.
pub fn sort_items(items: &[FoodItem], key: SortKey) -> Vec<FoodItem> {
    let mut sorted = items.to_vec();

    match key {
        SortKey::Name => {
            // CLDR root collation: accents and case are secondary to the base letter.
            let mut collator = Collator::default();
            sorted.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()))
        }
        SortKey::Price => {
            sorted.sort_by(|a, b| numeric_price(&a.price).total_cmp(&numeric_price(&b.price)))
        }
        SortKey::Rating => sorted.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
        SortKey::Unsorted => {}
    }

    sorted
}

/// Numeric value of a price; text keeps only digits and dots, and anything
/// unparseable counts as 0.
pub fn numeric_price(price: &Price) -> f64 {
    match price {
        Price::Number(n) => *n,
        Price::Text(s) => parse_price_text(s),
        Price::Missing => 0.0,
    }
}

fn parse_price_text(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    // Longest prefix with at most one dot, e.g. "1.2.3" reads as 1.2.
    let end = cleaned
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(cleaned.len(), |(i, _)| i);

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

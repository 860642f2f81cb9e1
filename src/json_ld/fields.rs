use html_escape::decode_html_entities;

use super::schema::{IngredientEntry, RecipeImage, RecipeVideo, RecipeYield};
use crate::model::Ingredient;

/// Decode one level of HTML entities; already-escaped entities stay escaped.
pub(crate) fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// First usable image URL: the first list entry, the string itself, or the object's `url`.
pub fn image_url(image: Option<&RecipeImage>) -> Option<String> {
    match image? {
        RecipeImage::Url(url) => Some(url.clone()),
        RecipeImage::Urls(urls) => urls.first().cloned(),
        RecipeImage::Object(image) => Some(image.url.clone()),
    }
}

/// Servings from `recipeYield`.
///
/// The whole element is read as a number when it is one ("4", " 6 ", "2.5"),
/// otherwise its leading digits are used ("4 servings"). Anything else is 0.
pub fn servings(recipe_yield: Option<&RecipeYield>) -> u32 {
    let Some(element) = recipe_yield.and_then(RecipeYield::first) else {
        return 0;
    };
    if element.is_empty() {
        return 0;
    }

    if let Ok(number) = element.trim().parse::<f64>() {
        if number.is_finite() {
            // saturating cast, negatives clamp to 0
            return number.max(0.0) as u32;
        }
    }

    let digits: String = element.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// First `contentUrl` among the recipe's videos
pub fn video_url(video: Option<&RecipeVideo>) -> Option<String> {
    match video? {
        RecipeVideo::Single(video) => video.content_url.clone(),
        RecipeVideo::Multiple(videos) => videos.iter().find_map(|v| v.content_url.clone()),
    }
}

/// Flatten grouped ingredient lines once, decode entities and trim
pub fn ingredients(entries: &[IngredientEntry]) -> Vec<Ingredient> {
    entries
        .iter()
        .flat_map(|entry| match entry {
            IngredientEntry::Line(line) => std::slice::from_ref(line),
            IngredientEntry::Group(lines) => lines.as_slice(),
        })
        .map(|line| Ingredient::new(decode_html_symbols(line).trim()))
        .collect()
}

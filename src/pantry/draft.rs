use serde::Serialize;

use crate::format::{render_nutrition, Locale};
use crate::json_ld::{NutritionInformation, RecipeYield};
use crate::model::Recipe;

/// What to append to the method text of a pantry recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftOptions {
    pub embed_nutrition: bool,
    pub embed_video: bool,
    pub locale: Locale,
}

/// Recipe body as the pantry service expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PantryRecipeDraft {
    pub name: String,
    /// HTML method text
    pub description: String,
    pub base_servings: u32,
    /// Uploaded separately from the recipe body
    #[serde(skip)]
    pub image_url: Option<String>,
}

impl PantryRecipeDraft {
    pub fn from_recipe(recipe: &Recipe, options: &DraftOptions) -> Self {
        let mut description = recipe.steps.clone();

        if options.embed_nutrition {
            if let Some(nutrition) = stored_nutrition(recipe) {
                let fallback = recipe
                    .nutrition_servings
                    .clone()
                    .or_else(|| (recipe.servings > 0).then(|| recipe.servings.to_string()))
                    .map(RecipeYield::Text);
                description.push_str(&render_nutrition(
                    &nutrition,
                    fallback.as_ref(),
                    options.locale,
                ));
            }
        }

        if options.embed_video {
            if let Some(embed) = recipe.video_url.as_deref().and_then(youtube_embed) {
                description.push_str(&embed);
            }
        }

        Self {
            name: recipe.name.clone(),
            description,
            base_servings: recipe.servings,
            image_url: recipe.image_url.clone(),
        }
    }
}

/// Rebuild a nutrition object from the flat columns; `None` when nothing was stored
fn stored_nutrition(recipe: &Recipe) -> Option<NutritionInformation> {
    let nutrition = NutritionInformation {
        calories: recipe.calories.clone(),
        carbohydrate_content: recipe.carbohydrate_content.clone(),
        cholesterol_content: recipe.cholesterol_content.clone(),
        fat_content: recipe.fat_content.clone(),
        fiber_content: recipe.fiber_content.clone(),
        protein_content: recipe.protein_content.clone(),
        saturated_fat_content: recipe.saturated_fat_content.clone(),
        sodium_content: recipe.sodium_content.clone(),
        sugar_content: recipe.sugar_content.clone(),
        trans_fat_content: recipe.trans_fat_content.clone(),
        unsaturated_fat_content: recipe.unsaturated_fat_content.clone(),
        ..Default::default()
    };
    let has_values = nutrition.present().next().is_some();
    has_values.then_some(nutrition)
}

/// Player markup for YouTube links; other video hosts are not embedded.
pub fn youtube_embed(video_url: &str) -> Option<String> {
    let id = ["https://www.youtube.com/watch?v=", "https://youtube.com/watch?v=", "https://youtu.be/"]
        .iter()
        .find_map(|prefix| video_url.strip_prefix(prefix))?;
    let id = id.split(['&', '?', '#']).next().unwrap_or_default();
    if id.is_empty() {
        return None;
    }

    Some(format!(
        r#"<p><iframe frameborder="0" src="//www.youtube.com/embed/{id}" width="640" height="360" class="note-video-clip"></iframe><br></p>"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            name: "Pancakes".to_string(),
            url: "https://example.com/pancakes".to_string(),
            steps: "<ol><li>Mix</li></ol>".to_string(),
            image_url: Some("https://example.com/pancakes.jpg".to_string()),
            servings: 4,
            ..Recipe::default()
        }
    }

    #[test]
    fn test_plain_draft() {
        let draft = PantryRecipeDraft::from_recipe(&recipe(), &DraftOptions::default());
        assert_eq!(draft.name, "Pancakes");
        assert_eq!(draft.description, "<ol><li>Mix</li></ol>");
        assert_eq!(draft.base_servings, 4);

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Pancakes",
                "description": "<ol><li>Mix</li></ol>",
                "base_servings": 4
            })
        );
    }

    #[test]
    fn test_nutrition_uses_servings_fallback() {
        let recipe = Recipe {
            calories: Some("250".to_string()),
            ..recipe()
        };
        let options = DraftOptions {
            embed_nutrition: true,
            locale: Locale::De,
            ..DraftOptions::default()
        };

        let draft = PantryRecipeDraft::from_recipe(&recipe, &options);
        assert!(draft.description.contains("<td>Kalorien</td><td>250</td>"));
        assert!(draft.description.ends_with("<p>Portionsgröße: 4</p>"));
    }

    #[test]
    fn test_nutrition_prefers_stored_serving_size() {
        let recipe = Recipe {
            calories: Some("250".to_string()),
            nutrition_servings: Some("2 pancakes".to_string()),
            ..recipe()
        };
        let options = DraftOptions {
            embed_nutrition: true,
            ..DraftOptions::default()
        };

        let draft = PantryRecipeDraft::from_recipe(&recipe, &options);
        assert!(draft.description.ends_with("<p>Serving Size: 2 pancakes</p>"));
    }

    #[test]
    fn test_no_stored_nutrition_adds_nothing() {
        let options = DraftOptions {
            embed_nutrition: true,
            ..DraftOptions::default()
        };
        let draft = PantryRecipeDraft::from_recipe(&recipe(), &options);
        assert_eq!(draft.description, "<ol><li>Mix</li></ol>");
    }

    #[test]
    fn test_video_embed() {
        let recipe = Recipe {
            video_url: Some("https://www.youtube.com/watch?v=abc123&t=42".to_string()),
            ..recipe()
        };
        let options = DraftOptions {
            embed_video: true,
            ..DraftOptions::default()
        };

        let draft = PantryRecipeDraft::from_recipe(&recipe, &options);
        assert!(draft
            .description
            .ends_with(r#"src="//www.youtube.com/embed/abc123" width="640" height="360" class="note-video-clip"></iframe><br></p>"#));
    }

    #[test]
    fn test_youtube_embed_hosts() {
        assert!(youtube_embed("https://youtu.be/xyz").unwrap().contains("/embed/xyz\""));
        assert!(youtube_embed("https://example.com/video.mp4").is_none());
        assert!(youtube_embed("https://youtu.be/").is_none());
    }
}

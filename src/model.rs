use serde::Serialize;

use crate::format::Locale;

/// Canonical recipe record handed to the persistence layer.
///
/// Nutrition values are mirrored flatly from the source `NutritionInformation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    /// Origin URL, empty when the recipe was imported from raw HTML
    pub url: String,
    /// Instructions formatted as an HTML fragment
    pub steps: String,
    pub image_url: Option<String>,
    /// Parsed from `recipeYield`, 0 when unparseable
    pub servings: u32,
    pub video_url: Option<String>,
    pub calories: Option<String>,
    pub nutrition_servings: Option<String>,
    pub carbohydrate_content: Option<String>,
    pub cholesterol_content: Option<String>,
    pub fat_content: Option<String>,
    pub fiber_content: Option<String>,
    pub protein_content: Option<String>,
    pub saturated_fat_content: Option<String>,
    pub sodium_content: Option<String>,
    pub sugar_content: Option<String>,
    pub trans_fat_content: Option<String>,
    pub unsaturated_fat_content: Option<String>,
}

/// One scraped ingredient line. Product linking happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub scraped_name: String,
}

impl Ingredient {
    pub fn new(scraped_name: impl Into<String>) -> Self {
        Self {
            scraped_name: scraped_name.into(),
        }
    }
}

/// Result of one extraction: the recipe and its ordered ingredients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydratedRecipe {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    /// Locale resolved for this import, whether or not a nutrition table was rendered
    #[serde(skip)]
    pub locale: Locale,
}

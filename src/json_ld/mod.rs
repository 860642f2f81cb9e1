//! Schema.org Recipe extraction from JSON-LD metadata.

pub mod fields;
mod loader;
pub mod schema;
mod selector;

pub use loader::{load_from_html, load_from_url, MetadataNode};
pub use schema::{
    HowToSection, HowToStep, ImageObject, IngredientEntry, InstructionStep, Nutrient,
    NutritionInformation, RecipeImage, RecipeInstructions, RecipeType, RecipeVideo, RecipeYield,
    SchemaError, ValidatedRecipe,
};
pub use selector::select_recipe;

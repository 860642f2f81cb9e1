//! Import Schema.org recipes from web pages.
//!
//! A document's JSON-LD scripts are scanned for the first block that validates
//! as a `Recipe`, which is then normalized into a [`Recipe`] record with HTML
//! steps and a list of [`Ingredient`]s.
//!
//! ```
//! use recipe_buddy_import::{hydrate_recipe_from_html, HydrateOptions};
//!
//! let html = r#"<script type="application/ld+json">
//!     {"@type": "Recipe", "name": "Tea", "recipeIngredient": ["Water", "Tea bag"],
//!      "recipeInstructions": "Boil\nSteep"}
//! </script>"#;
//!
//! let hydrated = hydrate_recipe_from_html(html, &HydrateOptions::default()).unwrap();
//! assert_eq!(hydrated.recipe.steps, "Boil<br>Steep");
//! assert_eq!(hydrated.ingredients.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod fetchers;
pub mod format;
pub mod hydrate;
pub mod importer;
pub mod json_ld;
pub mod model;
pub mod pantry;

pub use config::{load_config, FetchConfig, ImportConfig, PantryConfig};
pub use error::ImportError;
pub use format::{format_instructions, render_nutrition, InstructionFormatter, Locale};
pub use hydrate::{
    hydrate_nodes, hydrate_recipe, hydrate_recipe_from_html, hydrate_recipe_with, validate_url,
    HydrateOptions,
};
pub use importer::{RecipeImporter, RecipeImporterBuilder};
pub use json_ld::{load_from_html, load_from_url, select_recipe, MetadataNode, ValidatedRecipe};
pub use model::{HydratedRecipe, Ingredient, Recipe};

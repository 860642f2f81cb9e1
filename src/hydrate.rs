use log::debug;
use url::Url;

use crate::config::{FetchConfig, ImportConfig};
use crate::error::ImportError;
use crate::fetchers::RequestFetcher;
use crate::format::{InstructionFormatter, Locale};
use crate::json_ld::{self, fields, MetadataNode, ValidatedRecipe};
use crate::model::{HydratedRecipe, Recipe};

/// Options applied while turning a validated recipe into canonical records
#[derive(Debug, Clone, Copy)]
pub struct HydrateOptions {
    /// Language of the nutrition table
    pub locale: Locale,
    /// Append the nutrition table to the steps when the recipe has nutrition data
    pub embed_nutrition: bool,
}

impl Default for HydrateOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            embed_nutrition: true,
        }
    }
}

impl From<&ImportConfig> for HydrateOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            locale: config.locale,
            embed_nutrition: config.embed_nutrition,
        }
    }
}

/// Check that `url` is an absolute http(s) URL before anything is fetched
pub fn validate_url(url: &str) -> Result<Url, ImportError> {
    let parsed = Url::parse(url).map_err(|e| ImportError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ImportError::InvalidUrl(format!(
            "{url}: unsupported scheme '{scheme}'"
        ))),
    }
}

/// Fetch `url` with the default fetch settings and extract its recipe.
pub async fn hydrate_recipe(
    url: &str,
    options: &HydrateOptions,
) -> Result<HydratedRecipe, ImportError> {
    let fetcher = RequestFetcher::new(&FetchConfig::default())?;
    hydrate_recipe_with(&fetcher, url, options).await
}

/// Like [`hydrate_recipe`], using a caller-configured fetcher.
pub async fn hydrate_recipe_with(
    fetcher: &RequestFetcher,
    url: &str,
    options: &HydrateOptions,
) -> Result<HydratedRecipe, ImportError> {
    validate_url(url)?;
    let nodes = json_ld::load_from_url(fetcher, url).await?;
    hydrate_nodes(&nodes, url, options)
}

/// Extract the recipe from an HTML document supplied directly. The origin URL stays empty.
pub fn hydrate_recipe_from_html(
    html: &str,
    options: &HydrateOptions,
) -> Result<HydratedRecipe, ImportError> {
    let nodes = json_ld::load_from_html(html)?;
    hydrate_nodes(&nodes, "", options)
}

/// Select the recipe among `nodes` and normalize it.
pub fn hydrate_nodes(
    nodes: &[MetadataNode],
    origin_url: &str,
    options: &HydrateOptions,
) -> Result<HydratedRecipe, ImportError> {
    let recipe = json_ld::select_recipe(nodes)?;
    canonicalize(recipe, origin_url, options)
}

fn canonicalize(
    source: ValidatedRecipe,
    origin_url: &str,
    options: &HydrateOptions,
) -> Result<HydratedRecipe, ImportError> {
    let nutrition = source.nutrition.as_ref().filter(|_| options.embed_nutrition);
    let steps = InstructionFormatter::new(options.locale).format(
        &source.instructions,
        nutrition,
        source.recipe_yield.as_ref(),
    )?;

    let ingredients = fields::ingredients(&source.ingredients);
    debug!(
        "Recipe '{}' has {} ingredient(s)",
        source.name,
        ingredients.len()
    );

    let mut recipe = Recipe {
        name: fields::decode_html_symbols(&source.name).trim().to_string(),
        url: origin_url.to_string(),
        steps,
        image_url: fields::image_url(source.image.as_ref()),
        servings: fields::servings(source.recipe_yield.as_ref()),
        video_url: fields::video_url(source.video.as_ref()),
        ..Recipe::default()
    };

    if let Some(nutrition) = source.nutrition {
        recipe.calories = nutrition.calories;
        recipe.nutrition_servings = nutrition.serving_size;
        recipe.carbohydrate_content = nutrition.carbohydrate_content;
        recipe.cholesterol_content = nutrition.cholesterol_content;
        recipe.fat_content = nutrition.fat_content;
        recipe.fiber_content = nutrition.fiber_content;
        recipe.protein_content = nutrition.protein_content;
        recipe.saturated_fat_content = nutrition.saturated_fat_content;
        recipe.sodium_content = nutrition.sodium_content;
        recipe.sugar_content = nutrition.sugar_content;
        recipe.trans_fat_content = nutrition.trans_fat_content;
        recipe.unsaturated_fat_content = nutrition.unsaturated_fat_content;
    }

    Ok(HydratedRecipe {
        recipe,
        ingredients,
        locale: options.locale,
    })
}

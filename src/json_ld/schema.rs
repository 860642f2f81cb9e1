//! Structural contract a JSON-LD candidate must satisfy to count as a Recipe.
//!
//! The shapes are serde sum types; anything serde cannot map onto them, or that
//! fails the checks in [`ValidatedRecipe::from_value`], rejects the whole
//! candidate. Unknown keys are ignored.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why a candidate was not accepted as a Recipe
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("@type does not name Recipe")]
    NotARecipe,

    #[error("field shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("instruction step with unrecognized @type")]
    UnrecognizedStep,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidatedRecipe {
    #[serde(rename = "@type")]
    pub kind: RecipeType,
    pub name: String,
    #[serde(rename = "recipeIngredient")]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(rename = "recipeInstructions")]
    pub instructions: RecipeInstructions,
    pub image: Option<RecipeImage>,
    #[serde(rename = "recipeYield")]
    pub recipe_yield: Option<RecipeYield>,
    pub nutrition: Option<NutritionInformation>,
    pub video: Option<RecipeVideo>,
}

impl ValidatedRecipe {
    /// Validate a candidate JSON value against the Recipe contract.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        if !names_recipe(value.get("@type")) {
            return Err(SchemaError::NotARecipe);
        }

        let recipe = ValidatedRecipe::deserialize(value)?;
        if !recipe.kind.is_recipe() {
            return Err(SchemaError::NotARecipe);
        }
        if let RecipeInstructions::Steps(steps) = &recipe.instructions {
            if contains_unrecognized(steps) {
                return Err(SchemaError::UnrecognizedStep);
            }
        }

        Ok(recipe)
    }
}

/// Cheap pre-check so breadcrumbs and organizations skip full deserialization
fn names_recipe(kind: Option<&Value>) -> bool {
    match kind {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("Recipe")),
        _ => false,
    }
}

fn contains_unrecognized(steps: &[InstructionStep]) -> bool {
    steps.iter().any(|step| match step {
        InstructionStep::HowToStep(_) => false,
        InstructionStep::HowToSection(section) => contains_unrecognized(&section.steps),
        InstructionStep::Unrecognized => true,
    })
}

/// `@type`: either the literal "Recipe" or a list of types that includes it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeType {
    Single(String),
    Multiple(Vec<String>),
}

impl RecipeType {
    pub fn is_recipe(&self) -> bool {
        match self {
            RecipeType::Single(kind) => kind == "Recipe",
            RecipeType::Multiple(kinds) => kinds.iter().any(|k| k == "Recipe"),
        }
    }
}

/// Ingredient entries; some sites group lines one level deep
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Line(String),
    Group(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInstructions {
    Text(String),
    Steps(Vec<InstructionStep>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "@type")]
pub enum InstructionStep {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
    /// Any other tag. Rejected by validation, fatal when formatted.
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HowToStep {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HowToSection {
    pub name: String,
    #[serde(rename = "itemListElement")]
    pub steps: Vec<InstructionStep>,
}

impl InstructionStep {
    pub fn step(text: impl Into<String>) -> Self {
        InstructionStep::HowToStep(HowToStep { text: text.into() })
    }

    pub fn section(name: impl Into<String>, steps: Vec<InstructionStep>) -> Self {
        InstructionStep::HowToSection(HowToSection {
            name: name.into(),
            steps,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeImage {
    Url(String),
    Urls(Vec<String>),
    Object(ImageObject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ImageObjectTag {
    ImageObject,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: ImageObjectTag,
    pub url: String,
    pub height: Option<f64>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeYield {
    Text(String),
    List(Vec<String>),
}

impl RecipeYield {
    /// The scalar itself, or the first element of a list
    pub fn first(&self) -> Option<&str> {
        match self {
            RecipeYield::Text(text) => Some(text),
            RecipeYield::List(items) => items.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum NutritionTag {
    #[default]
    NutritionInformation,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInformation {
    #[serde(rename = "@type")]
    pub kind: NutritionTag,
    pub calories: Option<String>,
    pub carbohydrate_content: Option<String>,
    pub cholesterol_content: Option<String>,
    pub fat_content: Option<String>,
    pub fiber_content: Option<String>,
    pub protein_content: Option<String>,
    pub saturated_fat_content: Option<String>,
    pub serving_size: Option<String>,
    pub sodium_content: Option<String>,
    pub sugar_content: Option<String>,
    pub trans_fat_content: Option<String>,
    pub unsaturated_fat_content: Option<String>,
}

/// Nutrients in the order they are rendered. `servingSize` is not a nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Calories,
    Carbohydrate,
    Cholesterol,
    Fat,
    Fiber,
    Protein,
    SaturatedFat,
    Sodium,
    Sugar,
    TransFat,
    UnsaturatedFat,
}

impl Nutrient {
    pub const ALL: [Nutrient; 11] = [
        Nutrient::Calories,
        Nutrient::Carbohydrate,
        Nutrient::Cholesterol,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::Protein,
        Nutrient::SaturatedFat,
        Nutrient::Sodium,
        Nutrient::Sugar,
        Nutrient::TransFat,
        Nutrient::UnsaturatedFat,
    ];
}

impl NutritionInformation {
    pub fn value(&self, nutrient: Nutrient) -> Option<&str> {
        let value = match nutrient {
            Nutrient::Calories => &self.calories,
            Nutrient::Carbohydrate => &self.carbohydrate_content,
            Nutrient::Cholesterol => &self.cholesterol_content,
            Nutrient::Fat => &self.fat_content,
            Nutrient::Fiber => &self.fiber_content,
            Nutrient::Protein => &self.protein_content,
            Nutrient::SaturatedFat => &self.saturated_fat_content,
            Nutrient::Sodium => &self.sodium_content,
            Nutrient::Sugar => &self.sugar_content,
            Nutrient::TransFat => &self.trans_fat_content,
            Nutrient::UnsaturatedFat => &self.unsaturated_fat_content,
        };
        value.as_deref()
    }

    /// Present nutrients in rendering order
    pub fn present(&self) -> impl Iterator<Item = (Nutrient, &str)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter_map(move |nutrient| self.value(nutrient).map(|value| (nutrient, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeVideo {
    Single(VideoObject),
    Multiple(Vec<VideoObject>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoObject {
    #[serde(rename = "contentUrl")]
    pub content_url: Option<String>,
}

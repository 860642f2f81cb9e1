use html_escape::encode_text;
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::json_ld::{Nutrient, NutritionInformation, RecipeYield};

/// Language of the rendered nutrition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Map a locale tag such as `de`, `de_DE` or `en-GB`. Unsupported languages fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.trim().split(['_', '-']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("de") {
            Locale::De
        } else {
            Locale::En
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Locale::En => "Nutrition Information",
            Locale::De => "Nährwertangaben",
        }
    }

    fn serving_size(self) -> &'static str {
        match self {
            Locale::En => "Serving Size",
            Locale::De => "Portionsgröße",
        }
    }

    fn label(self, nutrient: Nutrient) -> &'static str {
        match (self, nutrient) {
            (Locale::En, Nutrient::Calories) => "Calories",
            (Locale::En, Nutrient::Carbohydrate) => "Carbohydrates",
            (Locale::En, Nutrient::Cholesterol) => "Cholesterol",
            (Locale::En, Nutrient::Fat) => "Fat",
            (Locale::En, Nutrient::Fiber) => "Fiber",
            (Locale::En, Nutrient::Protein) => "Protein",
            (Locale::En, Nutrient::SaturatedFat) => "Saturated Fat",
            (Locale::En, Nutrient::Sodium) => "Sodium",
            (Locale::En, Nutrient::Sugar) => "Sugar",
            (Locale::En, Nutrient::TransFat) => "Trans Fat",
            (Locale::En, Nutrient::UnsaturatedFat) => "Unsaturated Fat",
            (Locale::De, Nutrient::Calories) => "Kalorien",
            (Locale::De, Nutrient::Carbohydrate) => "Kohlenhydrate",
            (Locale::De, Nutrient::Cholesterol) => "Cholesterin",
            (Locale::De, Nutrient::Fat) => "Fett",
            (Locale::De, Nutrient::Fiber) => "Ballaststoffe",
            (Locale::De, Nutrient::Protein) => "Eiweiß",
            (Locale::De, Nutrient::SaturatedFat) => "Gesättigte Fettsäuren",
            (Locale::De, Nutrient::Sodium) => "Natrium",
            (Locale::De, Nutrient::Sugar) => "Zucker",
            (Locale::De, Nutrient::TransFat) => "Transfettsäuren",
            (Locale::De, Nutrient::UnsaturatedFat) => "Ungesättigte Fettsäuren",
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::from_tag(&tag)
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Locale::from_tag(tag))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::De => write!(f, "de"),
        }
    }
}

/// Render the nutrition table: heading, one row per present nutrient in
/// fixed order, then a serving-size line.
///
/// The serving size comes from the nutrition object itself, else from the
/// first entry of `servings_fallback`. Without either the line is omitted.
pub fn render_nutrition(
    nutrition: &NutritionInformation,
    servings_fallback: Option<&RecipeYield>,
    locale: Locale,
) -> String {
    let mut html = format!("<h4>{}</h4><table><tbody>", locale.heading());
    for (nutrient, value) in nutrition.present() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            locale.label(nutrient),
            encode_text(value)
        ));
    }
    html.push_str("</tbody></table>");

    let serving_size = nutrition
        .serving_size
        .as_deref()
        .or_else(|| servings_fallback.and_then(RecipeYield::first));
    if let Some(serving_size) = serving_size {
        html.push_str(&format!(
            "<p>{}: {}</p>",
            locale.serving_size(),
            encode_text(serving_size)
        ));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NutritionInformation {
        NutritionInformation {
            calories: Some("200".to_string()),
            serving_size: Some("1 cup".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("de"), Locale::De);
        assert_eq!(Locale::from_tag("de_AT"), Locale::De);
        assert_eq!(Locale::from_tag("DE-de"), Locale::De);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_english_table() {
        let html = render_nutrition(&sample(), None, Locale::En);
        assert_eq!(
            html,
            "<h4>Nutrition Information</h4><table><tbody>\
             <tr><td>Calories</td><td>200</td></tr>\
             </tbody></table><p>Serving Size: 1 cup</p>"
        );
    }

    #[test]
    fn test_german_table() {
        let html = render_nutrition(&sample(), None, Locale::De);
        assert!(html.contains("Nährwertangaben"));
        assert!(html.contains("<tr><td>Kalorien</td><td>200</td></tr>"));
        assert!(html.ends_with("<p>Portionsgröße: 1 cup</p>"));
    }

    #[test]
    fn test_rows_follow_fixed_order() {
        let nutrition = NutritionInformation {
            unsaturated_fat_content: Some("3 g".to_string()),
            sodium_content: Some("120 mg".to_string()),
            calories: Some("310".to_string()),
            ..Default::default()
        };
        let html = render_nutrition(&nutrition, None, Locale::En);

        let calories = html.find("Calories").unwrap();
        let sodium = html.find("Sodium").unwrap();
        let unsaturated = html.find("Unsaturated Fat").unwrap();
        assert!(calories < sodium && sodium < unsaturated);
        assert!(!html.contains("Serving Size"));
    }

    #[test]
    fn test_serving_size_fallbacks() {
        let nutrition = NutritionInformation {
            fat_content: Some("9 g".to_string()),
            ..Default::default()
        };

        let list = RecipeYield::List(vec!["4".to_string(), "4 bowls".to_string()]);
        let html = render_nutrition(&nutrition, Some(&list), Locale::En);
        assert!(html.ends_with("<p>Serving Size: 4</p>"));

        let scalar = RecipeYield::Text("2 portions".to_string());
        let html = render_nutrition(&nutrition, Some(&scalar), Locale::En);
        assert!(html.ends_with("<p>Serving Size: 2 portions</p>"));

        let own = NutritionInformation {
            serving_size: Some("100 g".to_string()),
            ..nutrition
        };
        let html = render_nutrition(&own, Some(&scalar), Locale::En);
        assert!(html.ends_with("<p>Serving Size: 100 g</p>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let nutrition = NutritionInformation {
            sugar_content: Some("<5 g".to_string()),
            ..Default::default()
        };
        let html = render_nutrition(&nutrition, None, Locale::En);
        assert!(html.contains("<td>&lt;5 g</td>"));
    }
}

use crate::error::ImportError;
use crate::json_ld::{HowToSection, InstructionStep, NutritionInformation, RecipeInstructions, RecipeYield};

use super::nutrition::{render_nutrition, Locale};

/// Turns recipe instructions into the HTML fragment stored as the recipe's steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionFormatter {
    locale: Locale,
}

impl InstructionFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Format `instructions`, appending the localized nutrition table when
    /// `nutrition` is present.
    pub fn format(
        &self,
        instructions: &RecipeInstructions,
        nutrition: Option<&NutritionInformation>,
        servings_fallback: Option<&RecipeYield>,
    ) -> Result<String, ImportError> {
        let mut html = format_instructions(instructions)?;
        if let Some(nutrition) = nutrition {
            html.push_str(&render_nutrition(nutrition, servings_fallback, self.locale));
        }
        Ok(html)
    }
}

/// Format instructions without a nutrition table.
///
/// Text keeps its content with newlines turned into `<br>`. Consecutive steps
/// share one `<ol>`; each section gets an `<h4>` and its own closed `<ol>`.
pub fn format_instructions(instructions: &RecipeInstructions) -> Result<String, ImportError> {
    match instructions {
        RecipeInstructions::Text(text) => Ok(text.replace("\r\n", "<br>").replace('\n', "<br>")),
        RecipeInstructions::Steps(steps) => format_steps(steps),
    }
}

fn format_steps(steps: &[InstructionStep]) -> Result<String, ImportError> {
    let mut html = String::new();
    let mut in_list = false;

    for (index, step) in steps.iter().enumerate() {
        match step {
            InstructionStep::HowToStep(step) => {
                if !in_list {
                    html.push_str("<ol>");
                    in_list = true;
                }
                push_item(&mut html, &step.text);
            }
            InstructionStep::HowToSection(section) => {
                if in_list {
                    html.push_str("</ol>");
                    in_list = false;
                }
                push_section(&mut html, section)?;
            }
            InstructionStep::Unrecognized => {
                return Err(ImportError::InvalidStepType {
                    index,
                    section: None,
                })
            }
        }
    }

    if in_list {
        html.push_str("</ol>");
    }
    Ok(html)
}

fn push_section(html: &mut String, section: &HowToSection) -> Result<(), ImportError> {
    html.push_str(&format!("<h4>{}</h4><ol>", section.name));
    for (index, step) in section.steps.iter().enumerate() {
        match step {
            InstructionStep::HowToStep(step) => push_item(html, &step.text),
            // nested sections become a list item holding their own heading and list
            InstructionStep::HowToSection(nested) => {
                html.push_str("<li>");
                push_section(html, nested)?;
                html.push_str("</li>");
            }
            InstructionStep::Unrecognized => {
                return Err(ImportError::InvalidStepType {
                    index,
                    section: Some(section.name.clone()),
                })
            }
        }
    }
    html.push_str("</ol>");
    Ok(())
}

fn push_item(html: &mut String, text: &str) {
    html.push_str("<li>");
    html.push_str(text);
    html.push_str("</li>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(steps: Vec<InstructionStep>) -> RecipeInstructions {
        RecipeInstructions::Steps(steps)
    }

    #[test]
    fn test_plain_text_without_newlines_is_unchanged() {
        let text = RecipeInstructions::Text("Boil water, then steep.".to_string());
        assert_eq!(format_instructions(&text).unwrap(), "Boil water, then steep.");
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        let text = RecipeInstructions::Text("Boil\nSteep\r\nServe".to_string());
        assert_eq!(format_instructions(&text).unwrap(), "Boil<br>Steep<br>Serve");
    }

    #[test]
    fn test_single_step() {
        let html = format_instructions(&steps(vec![InstructionStep::step("Boil water")])).unwrap();
        assert_eq!(html, "<ol><li>Boil water</li></ol>");
    }

    #[test]
    fn test_section_is_self_contained() {
        let html = format_instructions(&steps(vec![InstructionStep::section(
            "Sauce",
            vec![InstructionStep::step("Mix"), InstructionStep::step("Simmer")],
        )]))
        .unwrap();
        assert_eq!(html, "<h4>Sauce</h4><ol><li>Mix</li><li>Simmer</li></ol>");
    }

    #[test]
    fn test_steps_around_sections() {
        let html = format_instructions(&steps(vec![
            InstructionStep::step("Preheat"),
            InstructionStep::step("Grease pan"),
            InstructionStep::section("Batter", vec![InstructionStep::step("Whisk")]),
            InstructionStep::step("Bake"),
        ]))
        .unwrap();
        assert_eq!(
            html,
            "<ol><li>Preheat</li><li>Grease pan</li></ol>\
             <h4>Batter</h4><ol><li>Whisk</li></ol>\
             <ol><li>Bake</li></ol>"
        );
    }

    #[test]
    fn test_nested_section() {
        let html = format_instructions(&steps(vec![InstructionStep::section(
            "Cake",
            vec![
                InstructionStep::step("Mix"),
                InstructionStep::section("Frosting", vec![InstructionStep::step("Whip")]),
            ],
        )]))
        .unwrap();
        assert_eq!(
            html,
            "<h4>Cake</h4><ol><li>Mix</li><li><h4>Frosting</h4><ol><li>Whip</li></ol></li></ol>"
        );
    }

    #[test]
    fn test_empty_step_list() {
        assert_eq!(format_instructions(&steps(vec![])).unwrap(), "");
    }

    #[test]
    fn test_unrecognized_step_is_fatal() {
        let result = format_instructions(&steps(vec![
            InstructionStep::step("Boil"),
            InstructionStep::Unrecognized,
        ]));
        assert!(matches!(
            result,
            Err(ImportError::InvalidStepType {
                index: 1,
                section: None
            })
        ));
    }

    #[test]
    fn test_unrecognized_step_inside_section() {
        let result = format_instructions(&steps(vec![InstructionStep::section(
            "Sauce",
            vec![InstructionStep::Unrecognized],
        )]));
        match result {
            Err(ImportError::InvalidStepType { index, section }) => {
                assert_eq!(index, 0);
                assert_eq!(section.as_deref(), Some("Sauce"));
            }
            other => panic!("expected InvalidStepType, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_from_json() {
        let instructions: RecipeInstructions =
            serde_json::from_str(r#"[{"@type": "Unknown", "text": "?"}]"#).unwrap();
        assert!(matches!(
            format_instructions(&instructions),
            Err(ImportError::InvalidStepType { .. })
        ));
    }

    #[test]
    fn test_formatter_appends_nutrition() {
        let nutrition = NutritionInformation {
            calories: Some("200".to_string()),
            serving_size: Some("1 cup".to_string()),
            ..Default::default()
        };
        let formatter = InstructionFormatter::new(Locale::En);
        let html = formatter
            .format(
                &steps(vec![InstructionStep::step("Boil water")]),
                Some(&nutrition),
                None,
            )
            .unwrap();

        assert!(html.starts_with("<ol><li>Boil water</li></ol><h4>Nutrition Information</h4>"));
        assert!(html.contains("<td>Calories</td><td>200</td>"));
        assert!(html.ends_with("<p>Serving Size: 1 cup</p>"));
    }

    #[test]
    fn test_formatter_without_nutrition() {
        let formatter = InstructionFormatter::new(Locale::De);
        let html = formatter
            .format(&RecipeInstructions::Text("Boil".to_string()), None, None)
            .unwrap();
        assert_eq!(html, "Boil");
    }
}

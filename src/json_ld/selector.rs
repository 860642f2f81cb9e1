use log::{debug, info, warn};
use serde_json::Value;
use std::iter;

use super::loader::MetadataNode;
use super::schema::ValidatedRecipe;
use crate::error::ImportError;

/// Return the first candidate, in document order, that validates as a Recipe.
///
/// Each node is parsed lazily and scanning stops at the first match. A node
/// that holds an array contributes its elements; an object contributes itself
/// followed by the entries of its `@graph`, if any.
pub fn select_recipe(nodes: &[MetadataNode]) -> Result<ValidatedRecipe, ImportError> {
    for node in nodes {
        let Some(json) = parse_node(node) else {
            continue;
        };

        let found = candidates(&json)
            .enumerate()
            .find_map(|(position, candidate)| match ValidatedRecipe::from_value(candidate) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    debug!(
                        "Node {} candidate {} is not a Recipe: {}",
                        node.index, position, e
                    );
                    None
                }
            });

        if let Some(recipe) = found {
            info!("Found Recipe '{}' in metadata node {}", recipe.name, node.index);
            return Ok(recipe);
        }
    }

    Err(ImportError::NoRecipeFound { nodes: nodes.len() })
}

fn candidates(json: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match json {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(object) => {
            let graph = object
                .get("@graph")
                .and_then(Value::as_array)
                .into_iter()
                .flatten();
            Box::new(iter::once(json).chain(graph))
        }
        other => Box::new(iter::once(other)),
    }
}

fn parse_node(node: &MetadataNode) -> Option<Value> {
    if node.content.trim().is_empty() {
        debug!("No text content in node {}, trying next node", node.index);
        return None;
    }

    match serde_json::from_str(&node.content) {
        Ok(json) => Some(json),
        Err(source) => match serde_json::from_str(&repair_json(&node.content)) {
            Ok(json) => {
                debug!("Node {} parsed after repair", node.index);
                Some(json)
            }
            Err(_) => {
                warn!(
                    "{}",
                    ImportError::MalformedNodeJson {
                        index: node.index,
                        source
                    }
                );
                None
            }
        },
    }
}

const WRAPPERS: [(&str, &str); 3] = [
    ("<!--", "-->"),
    ("//<![CDATA[", "//]]>"),
    ("<![CDATA[", "]]>"),
];

/// Undo the common ways CMSes mangle JSON-LD: comment or CDATA wrappers and
/// trailing commas. String contents are never touched.
fn repair_json(raw: &str) -> String {
    let mut body = raw.trim();
    for (open, close) in WRAPPERS {
        if let Some(inner) = body.strip_prefix(open) {
            body = inner.strip_suffix(close).unwrap_or(inner).trim();
        }
    }

    let chars: Vec<char> = body.chars().collect();
    let mut repaired = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            repaired.push(c);
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                repaired.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']') | None) {
                    repaired.push(c);
                }
            }
            _ => repaired.push(c),
        }
    }

    repaired
}

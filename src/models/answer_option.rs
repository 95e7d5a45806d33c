use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnswerOption {
    #[serde(default)]
    #[validate(length(min = 1, message = "Answer id cannot be empty"))]
    pub id: String,
    pub content: AnswerContent,
    #[serde(default)]
    #[validate(range(min = 1, message = "Order index must be at least 1"))]
    pub order_index: u32,
}

impl AnswerOption {
    pub fn text(id: impl Into<String>, text: impl Into<String>, order_index: u32) -> Self {
        Self {
            id: id.into(),
            content: AnswerContent::Text(TextContent {
                text: text.into(),
                value: None,
            }),
            order_index,
        }
    }

    pub fn pair(
        id: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
        order_index: u32,
    ) -> Self {
        Self {
            id: id.into(),
            content: AnswerContent::Pair(Pair::new(left, right)),
            order_index,
        }
    }

    /// The value a correct-answer reference is compared against.
    pub fn resolved_value(&self) -> Option<&str> {
        match &self.content {
            AnswerContent::Text(t) => Some(t.resolved_value()),
            _ => None,
        }
    }

    /// Whether `reference` names this answer, either by id or by resolved value.
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        self.id == reference || self.resolved_value() == Some(reference)
    }
}

/// Answer payload. The shape that is legal depends on the question kind,
/// so anything that is neither a text nor a pair is kept as raw JSON and
/// reported by the validator instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerContent {
    Pair(Pair),
    Text(TextContent),
    Other(JsonValue),
}

impl AnswerContent {
    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            AnswerContent::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            AnswerContent::Pair(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TextContent {
    pub fn resolved_value(&self) -> &str {
        match self.value.as_deref() {
            Some(v) if !v.trim().is_empty() => v,
            _ => &self.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

impl Pair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_takes_precedence_over_text() {
        let content: AnswerContent =
            serde_json::from_value(json!({ "text": "Paris", "value": "paris" })).unwrap();
        let option = AnswerOption {
            id: "a".into(),
            content,
            order_index: 1,
        };
        assert_eq!(option.resolved_value(), Some("paris"));
        assert!(option.is_referenced_by("a"));
        assert!(option.is_referenced_by("paris"));
        assert!(!option.is_referenced_by("Paris"));
    }

    #[test]
    fn blank_value_falls_back_to_text() {
        let text = TextContent {
            text: "London".into(),
            value: Some("  ".into()),
        };
        assert_eq!(text.resolved_value(), "London");
    }

    #[test]
    fn content_shapes_deserialize_untagged() {
        let pair: AnswerContent =
            serde_json::from_value(json!({ "left": "H2O", "right": "Water" })).unwrap();
        assert_eq!(pair.as_pair(), Some(&Pair::new("H2O", "Water")));

        let other: AnswerContent = serde_json::from_value(json!({ "image": "x.png" })).unwrap();
        assert!(matches!(other, AnswerContent::Other(_)));
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer_option::Pair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleSelect,
    DragDrop,
    Matching,
    Ordering,
    VideoPopup,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 6] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultipleSelect,
        QuestionKind::DragDrop,
        QuestionKind::Matching,
        QuestionKind::Ordering,
        QuestionKind::VideoPopup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultipleSelect => "multiple_select",
            QuestionKind::DragDrop => "drag_drop",
            QuestionKind::Matching => "matching",
            QuestionKind::Ordering => "ordering",
            QuestionKind::VideoPopup => "video_popup",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown question type code: {0}")]
pub struct UnknownKind(pub String);

/// Parses a question type `code` as served by the reference-data API.
/// Codes are matched case-insensitively and `-` or spaces count as `_`.
impl FromStr for QuestionKind {
    type Err = UnknownKind;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalized: String = code
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        QuestionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownKind(code.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerConfig {
    SingleChoice(SingleChoiceConfig),
    MultipleSelect(MultipleSelectConfig),
    DragDrop(DragDropConfig),
    Matching(MatchingConfig),
    Ordering(OrderingConfig),
    VideoPopup(VideoPopupConfig),
}

impl AnswerConfig {
    pub fn kind(&self) -> QuestionKind {
        match self {
            AnswerConfig::SingleChoice(_) => QuestionKind::SingleChoice,
            AnswerConfig::MultipleSelect(_) => QuestionKind::MultipleSelect,
            AnswerConfig::DragDrop(_) => QuestionKind::DragDrop,
            AnswerConfig::Matching(_) => QuestionKind::Matching,
            AnswerConfig::Ordering(_) => QuestionKind::Ordering,
            AnswerConfig::VideoPopup(_) => QuestionKind::VideoPopup,
        }
    }

    /// Blank configuration a freshly selected kind starts from.
    pub fn empty(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleChoice => AnswerConfig::SingleChoice(SingleChoiceConfig::default()),
            QuestionKind::MultipleSelect => {
                AnswerConfig::MultipleSelect(MultipleSelectConfig::default())
            }
            QuestionKind::DragDrop => AnswerConfig::DragDrop(DragDropConfig::with_first_zone()),
            QuestionKind::Matching => AnswerConfig::Matching(MatchingConfig::default()),
            QuestionKind::Ordering => AnswerConfig::Ordering(OrderingConfig::default()),
            QuestionKind::VideoPopup => AnswerConfig::VideoPopup(VideoPopupConfig::default()),
        }
    }
}

/// Config fields default when omitted; the validator reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleChoiceConfig {
    #[serde(default)]
    pub options_count: usize,
    /// Answer id or resolved answer value.
    #[serde(default)]
    pub correct: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleSelectConfig {
    #[serde(default)]
    pub options_count: usize,
    #[serde(default)]
    pub correct: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragDropConfig {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub correct: Vec<ZoneAssignment>,
}

impl DragDropConfig {
    pub fn with_first_zone() -> Self {
        Self {
            zones: vec![Zone::labelled(Zone::default_label(0))],
            correct: Vec::new(),
        }
    }

    /// First `"Vùng {n}"` label not already taken by a zone.
    pub fn next_zone_label(&self) -> String {
        (0..=self.zones.len())
            .map(Zone::default_label)
            .find(|label| self.zones.iter().all(|z| &z.text != label))
            .unwrap_or_else(|| Zone::default_label(self.zones.len()))
    }

    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// Label of the zone an option is currently assigned to.
    pub fn zone_label_of(&self, option_id: &str) -> Option<&str> {
        self.correct
            .iter()
            .find(|c| c.id == option_id)
            .and_then(|c| self.zone(&c.zone))
            .map(|z| z.text.as_str())
    }
}

/// Drop target. `id` is generated once and never changes; `text` and
/// `value` are the mutable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub text: String,
    pub value: String,
}

impl Zone {
    pub fn labelled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: Uuid::new_v4().to_string(),
            text: label.clone(),
            value: label,
        }
    }

    pub fn default_label(existing: usize) -> String {
        format!("Vùng {}", existing + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAssignment {
    /// Answer option id.
    pub id: String,
    /// Zone id.
    pub zone: String,
    /// Resolved value of the option at assignment time.
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub correct: Vec<Pair>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    #[serde(default)]
    pub items_count: usize,
    #[serde(default)]
    pub correct: Vec<OrderingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingEntry {
    pub id: String,
    #[serde(default)]
    pub value: String,
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPopupConfig {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub popup_times: Vec<PopupTime>,
}

impl VideoPopupConfig {
    pub fn total_options(&self) -> usize {
        self.popup_times.iter().map(|p| p.options.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupTime {
    pub id: String,
    /// Seconds from the start of the video.
    pub time: f64,
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_parses_from_reference_codes() {
        assert_eq!("single_choice".parse::<QuestionKind>(), Ok(QuestionKind::SingleChoice));
        assert_eq!("MULTIPLE-SELECT".parse::<QuestionKind>(), Ok(QuestionKind::MultipleSelect));
        assert_eq!(" Drag Drop ".parse::<QuestionKind>(), Ok(QuestionKind::DragDrop));
        assert_eq!(
            "essay".parse::<QuestionKind>(),
            Err(UnknownKind("essay".to_string()))
        );
    }

    #[test]
    fn config_is_tagged_by_kind() {
        let config: AnswerConfig = serde_json::from_value(json!({
            "kind": "ordering",
            "items_count": 2,
            "correct": [{ "id": "x", "value": "First", "order": 1 }]
        }))
        .unwrap();
        assert_eq!(config.kind(), QuestionKind::Ordering);

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["kind"], "ordering");
        assert_eq!(back["correct"][0]["order"], 1);
    }

    #[test]
    fn empty_drag_drop_starts_with_one_zone() {
        let AnswerConfig::DragDrop(config) = AnswerConfig::empty(QuestionKind::DragDrop) else {
            panic!("expected drag_drop config");
        };
        assert_eq!(config.zones.len(), 1);
        assert_eq!(config.zones[0].text, "Vùng 1");
        assert!(config.correct.is_empty());
    }

    #[test]
    fn every_kind_has_an_empty_shape() {
        for kind in QuestionKind::ALL {
            assert_eq!(AnswerConfig::empty(kind).kind(), kind);
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::answer_config::{AnswerConfig, DragDropConfig, Zone, ZoneAssignment};
use crate::models::answer_option::AnswerOption;
use crate::models::draft::QuestionDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoringLimits {
    pub max_zones: usize,
    pub max_options: usize,
    pub min_options: usize,
}

impl Default for AuthoringLimits {
    fn default() -> Self {
        Self {
            max_zones: 10,
            max_options: 20,
            min_options: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Drag and drop editing needs a drag_drop question, not {0}")]
    WrongKind(String),

    #[error("At most {0} zones are allowed")]
    TooManyZones(usize),

    #[error("A question needs at least one zone")]
    LastZone,

    #[error("Zone {0} not found")]
    ZoneNotFound(String),

    #[error("Zone name cannot be empty")]
    BlankZoneName,

    #[error("At most {0} answer options are allowed")]
    TooManyOptions(usize),

    #[error("At least {0} answer options are required")]
    TooFewOptions(usize),

    #[error("Answer text cannot be empty")]
    BlankOption,

    #[error("Answer option {0} not found")]
    OptionNotFound(String),
}

/// One authoring action, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    AddZone,
    RemoveZone { zone_id: String },
    RenameZone { zone_id: String, label: String },
    AddOption { text: String },
    RemoveOption { option_id: String },
    Assign { option_id: String, zone_id: String },
    Unassign { option_id: String },
}

/// Mutations over a drag_drop draft that keep `zones`, `correct` and the
/// answer list consistent with each other.
pub struct DragDropEditor<'a> {
    answers: &'a mut Vec<AnswerOption>,
    config: &'a mut DragDropConfig,
    limits: AuthoringLimits,
}

impl<'a> DragDropEditor<'a> {
    pub fn new(
        answers: &'a mut Vec<AnswerOption>,
        config: &'a mut DragDropConfig,
        limits: AuthoringLimits,
    ) -> Self {
        Self {
            answers,
            config,
            limits,
        }
    }

    pub fn for_draft(draft: &'a mut QuestionDraft, limits: AuthoringLimits) -> Result<Self, EditError> {
        match &mut draft.answer_config {
            AnswerConfig::DragDrop(config) => Ok(Self::new(&mut draft.answers, config, limits)),
            other => Err(EditError::WrongKind(other.kind().to_string())),
        }
    }

    pub fn apply(&mut self, op: EditOp) -> Result<(), EditError> {
        match op {
            EditOp::AddZone => self.add_zone().map(|_| ()),
            EditOp::RemoveZone { zone_id } => self.remove_zone(&zone_id),
            EditOp::RenameZone { zone_id, label } => self.rename_zone(&zone_id, &label),
            EditOp::AddOption { text } => self.add_option(&text).map(|_| ()),
            EditOp::RemoveOption { option_id } => self.remove_option(&option_id),
            EditOp::Assign { option_id, zone_id } => self.assign(&option_id, &zone_id),
            EditOp::Unassign { option_id } => self.unassign(&option_id),
        }
    }

    /// Appends `"Vùng {n+1}"` and returns its id.
    pub fn add_zone(&mut self) -> Result<String, EditError> {
        if self.config.zones.len() >= self.limits.max_zones {
            return Err(EditError::TooManyZones(self.limits.max_zones));
        }
        let zone = Zone::labelled(self.config.next_zone_label());
        let id = zone.id.clone();
        self.config.zones.push(zone);
        Ok(id)
    }

    /// Drops the zone together with every placement into it.
    pub fn remove_zone(&mut self, zone_id: &str) -> Result<(), EditError> {
        let idx = self.zone_index(zone_id)?;
        if self.config.zones.len() <= 1 {
            return Err(EditError::LastZone);
        }
        self.config.zones.remove(idx);
        self.config.correct.retain(|c| c.zone != zone_id);
        Ok(())
    }

    /// Placements reference the zone id, so only the label changes.
    pub fn rename_zone(&mut self, zone_id: &str, label: &str) -> Result<(), EditError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(EditError::BlankZoneName);
        }
        let idx = self.zone_index(zone_id)?;
        let zone = &mut self.config.zones[idx];
        zone.text = label.to_string();
        zone.value = label.to_string();
        Ok(())
    }

    /// Appends a text option with the next order index and returns its id.
    pub fn add_option(&mut self, text: &str) -> Result<String, EditError> {
        if self.answers.len() >= self.limits.max_options {
            return Err(EditError::TooManyOptions(self.limits.max_options));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(EditError::BlankOption);
        }
        let next = self.answers.iter().map(|a| a.order_index).max().unwrap_or(0) + 1;
        let id = Uuid::new_v4().to_string();
        self.answers.push(AnswerOption::text(id.clone(), text, next));
        Ok(id)
    }

    pub fn remove_option(&mut self, option_id: &str) -> Result<(), EditError> {
        let idx = self.option_index(option_id)?;
        if self.answers.len() <= self.limits.min_options {
            return Err(EditError::TooFewOptions(self.limits.min_options));
        }
        self.answers.remove(idx);
        for (i, answer) in self.answers.iter_mut().enumerate() {
            answer.order_index = i as u32 + 1;
        }
        self.config.correct.retain(|c| c.id != option_id);
        Ok(())
    }

    /// Places an option into a zone, replacing any earlier placement.
    pub fn assign(&mut self, option_id: &str, zone_id: &str) -> Result<(), EditError> {
        let option = &self.answers[self.option_index(option_id)?];
        self.zone_index(zone_id)?;
        let value = option.resolved_value().unwrap_or_default().to_string();

        match self.config.correct.iter_mut().find(|c| c.id == option_id) {
            Some(entry) => {
                entry.zone = zone_id.to_string();
                entry.value = value;
            }
            None => self.config.correct.push(ZoneAssignment {
                id: option_id.to_string(),
                zone: zone_id.to_string(),
                value,
            }),
        }
        Ok(())
    }

    pub fn unassign(&mut self, option_id: &str) -> Result<(), EditError> {
        self.option_index(option_id)?;
        self.config.correct.retain(|c| c.id != option_id);
        Ok(())
    }

    fn zone_index(&self, zone_id: &str) -> Result<usize, EditError> {
        self.config
            .zones
            .iter()
            .position(|z| z.id == zone_id)
            .ok_or_else(|| EditError::ZoneNotFound(zone_id.to_string()))
    }

    fn option_index(&self, option_id: &str) -> Result<usize, EditError> {
        self.answers
            .iter()
            .position(|a| a.id == option_id)
            .ok_or_else(|| EditError::OptionNotFound(option_id.to_string()))
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::answer_config::{
    AnswerConfig, DragDropConfig, MatchingConfig, MultipleSelectConfig, OrderingConfig,
    QuestionKind, SingleChoiceConfig, VideoPopupConfig,
};
use crate::models::answer_option::{AnswerContent, AnswerOption, Pair};
use crate::models::question::Question;
use crate::utils::validation::field_errors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Non-empty, ordered list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", summarize(.0))]
pub struct FieldErrors(Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

#[derive(Default)]
struct Report {
    errors: Vec<FieldError>,
}

impl Report {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(self.errors))
        }
    }
}

pub struct ValidationService;

impl ValidationService {
    /// Full submit-time check: required fields, kind/type agreement, then
    /// the answer configuration rules.
    pub fn validate_question(
        question: &Question,
        question_type_code: Option<&str>,
    ) -> Result<(), FieldErrors> {
        let mut report = Report::default();

        if let Err(errors) = question.validate() {
            report.errors.extend(field_errors("", &errors));
        }

        if let Some(code) = question_type_code {
            match code.parse::<QuestionKind>() {
                Ok(kind) if kind != question.kind() => report.push(
                    "answer_config.kind",
                    format!(
                        "Answer configuration is {} but the selected question type is {}",
                        question.kind(),
                        kind
                    ),
                ),
                Ok(_) => {}
                Err(e) => report.push("question_type_id", e.to_string()),
            }
        }

        check_answers(&mut report, &question.answers, &question.answer_config);
        let outcome = report.finish();
        tracing::debug!(
            kind = %question.kind(),
            errors = outcome.as_ref().err().map(|e| e.as_slice().len()).unwrap_or(0),
            "question validated"
        );
        outcome
    }

    pub fn validate_answers(
        answers: &[AnswerOption],
        config: &AnswerConfig,
    ) -> Result<(), FieldErrors> {
        let mut report = Report::default();
        check_answers(&mut report, answers, config);
        report.finish()
    }
}

fn check_answers(report: &mut Report, answers: &[AnswerOption], config: &AnswerConfig) {
    check_content_shape(report, answers, config.kind());
    check_unique_ids(report, answers);

    match config {
        AnswerConfig::SingleChoice(c) => check_single_choice(report, answers, c),
        AnswerConfig::MultipleSelect(c) => check_multiple_select(report, answers, c),
        AnswerConfig::DragDrop(c) => check_drag_drop(report, answers, c),
        AnswerConfig::Matching(c) => check_matching(report, answers, c),
        AnswerConfig::Ordering(c) => check_ordering(report, answers, c),
        AnswerConfig::VideoPopup(c) => check_video_popup(report, answers, c),
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Text,
    Pair,
}

fn check_content_shape(report: &mut Report, answers: &[AnswerOption], kind: QuestionKind) {
    let expected = match kind {
        QuestionKind::Matching => Some(Shape::Pair),
        QuestionKind::SingleChoice | QuestionKind::MultipleSelect | QuestionKind::Ordering => {
            Some(Shape::Text)
        }
        QuestionKind::DragDrop | QuestionKind::VideoPopup => None,
    };

    for (i, answer) in answers.iter().enumerate() {
        let field = format!("answers[{}].content", i);
        match (expected, &answer.content) {
            (Some(Shape::Pair), AnswerContent::Pair(p)) | (None, AnswerContent::Pair(p)) => {
                if p.left.trim().is_empty() || p.right.trim().is_empty() {
                    report.push(field, "Both sides of the pair must be filled in");
                }
            }
            (Some(Shape::Text), AnswerContent::Text(t)) | (None, AnswerContent::Text(t)) => {
                if t.text.trim().is_empty() {
                    report.push(field, "Answer text cannot be empty");
                }
            }
            (Some(Shape::Pair), _) => {
                report.push(field, "Matching answers need a left and a right side")
            }
            (Some(Shape::Text), _) => report.push(field, "Answer needs a text"),
            (None, AnswerContent::Other(_)) => {}
        }
    }
}

fn check_unique_ids(report: &mut Report, answers: &[AnswerOption]) {
    let mut seen = HashSet::new();
    for (i, answer) in answers.iter().enumerate() {
        if !answer.id.is_empty() && !seen.insert(answer.id.as_str()) {
            report.push(
                format!("answers[{}].id", i),
                format!("Duplicate answer id {}", answer.id),
            );
        }
    }
}

fn check_count(report: &mut Report, field: &str, expected: usize, actual: usize) {
    if expected == 0 {
        report.push(field, "Specify how many answer options the question has");
    } else if expected != actual {
        report.push(
            field,
            format!(
                "Expected {} answer options but {} were provided",
                expected, actual
            ),
        );
    }
}

fn unmatched(reference: &str) -> String {
    format!("Correct answer \"{}\" does not match any answer option", reference)
}

fn ambiguous(reference: &str, count: usize) -> String {
    format!(
        "Correct answer \"{}\" matches {} answer options",
        reference, count
    )
}

/// Indices of the answers a correct-answer reference names.
fn referenced(answers: &[AnswerOption], reference: &str) -> Vec<usize> {
    answers
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_referenced_by(reference))
        .map(|(i, _)| i)
        .collect()
}

fn check_single_choice(report: &mut Report, answers: &[AnswerOption], c: &SingleChoiceConfig) {
    check_count(report, "answer_config.options_count", c.options_count, answers.len());

    if c.correct.trim().is_empty() {
        report.push("answer_config.correct", "Select the correct answer");
        return;
    }
    match referenced(answers, &c.correct).len() {
        0 => report.push("answer_config.correct", unmatched(&c.correct)),
        1 => {}
        n => report.push("answer_config.correct", ambiguous(&c.correct, n)),
    }
}

fn check_multiple_select(report: &mut Report, answers: &[AnswerOption], c: &MultipleSelectConfig) {
    check_count(report, "answer_config.options_count", c.options_count, answers.len());

    if c.correct.is_empty() {
        report.push("answer_config.correct", "Select at least one correct answer");
        return;
    }

    let mut seen = HashSet::new();
    for reference in &c.correct {
        match referenced(answers, reference).as_slice() {
            [] => report.push("answer_config.correct", unmatched(reference)),
            [idx] => {
                if !seen.insert(*idx) {
                    report.push(
                        "answer_config.correct",
                        format!("Answer option {} is selected more than once", answers[*idx].id),
                    );
                }
            }
            many => report.push("answer_config.correct", ambiguous(reference, many.len())),
        }
    }
}

fn check_drag_drop(report: &mut Report, answers: &[AnswerOption], c: &DragDropConfig) {
    if c.zones.is_empty() {
        report.push("answer_config.zones", "Add at least one drop zone");
    }
    for (i, zone) in c.zones.iter().enumerate() {
        if zone.text.trim().is_empty() {
            report.push(
                format!("answer_config.zones[{}].text", i),
                "Zone name cannot be empty",
            );
        }
    }

    if c.correct.len() != answers.len() {
        report.push(
            "answer_config.correct",
            format!(
                "Every answer option must be placed in a zone ({} of {} placed)",
                c.correct.len(),
                answers.len()
            ),
        );
    }

    let mut placed = HashSet::new();
    for (i, entry) in c.correct.iter().enumerate() {
        if !answers.iter().any(|a| a.id == entry.id) {
            report.push(
                format!("answer_config.correct[{}].id", i),
                format!("Unknown answer option {}", entry.id),
            );
        } else if !placed.insert(entry.id.as_str()) {
            report.push(
                format!("answer_config.correct[{}].id", i),
                format!("Answer option {} is placed in more than one zone", entry.id),
            );
        }
        if c.zone(&entry.zone).is_none() {
            report.push(
                format!("answer_config.correct[{}].zone", i),
                format!("Unknown drop zone {}", entry.zone),
            );
        }
    }
}

fn check_matching(report: &mut Report, answers: &[AnswerOption], c: &MatchingConfig) {
    if c.pairs.len() < 2 {
        report.push("answer_config.pairs", "At least 2 pairs are required");
    }
    if c.pairs.len() != answers.len() {
        report.push(
            "answer_config.pairs",
            format!(
                "Expected {} pairs but {} answers were provided",
                c.pairs.len(),
                answers.len()
            ),
        );
    }

    let universe: HashSet<&Pair> = answers.iter().filter_map(|a| a.content.as_pair()).collect();

    for (i, answer) in answers.iter().enumerate() {
        if let Some(pair) = answer.content.as_pair() {
            if !c.pairs.contains(pair) {
                report.push(
                    format!("answers[{}].content", i),
                    format!(
                        "Pair \"{}\" - \"{}\" is missing from the configured pairs",
                        pair.left, pair.right
                    ),
                );
            }
        }
    }

    let mut configured = HashSet::new();
    for (i, pair) in c.pairs.iter().enumerate() {
        if !universe.contains(pair) {
            report.push(
                format!("answer_config.pairs[{}]", i),
                format!(
                    "Pair \"{}\" - \"{}\" does not belong to any answer option",
                    pair.left, pair.right
                ),
            );
        } else if !configured.insert(pair) {
            report.push(
                format!("answer_config.pairs[{}]", i),
                "Pair is listed more than once",
            );
        }
    }

    if c.correct.is_empty() {
        report.push("answer_config.correct", "Specify at least one correct pair");
    }
    let mut marked = HashSet::new();
    for (i, pair) in c.correct.iter().enumerate() {
        let field = format!("answer_config.correct[{}]", i);
        if !c.pairs.contains(pair) {
            report.push(field, "Correct pair is not one of the configured pairs");
        } else if !universe.contains(pair) {
            report.push(field, "Correct pair does not belong to any answer option");
        } else if !marked.insert(pair) {
            report.push(field, "Correct pair is listed more than once");
        }
    }
}

fn check_ordering(report: &mut Report, answers: &[AnswerOption], c: &OrderingConfig) {
    check_count(report, "answer_config.items_count", c.items_count, answers.len());

    if c.correct.len() != answers.len() {
        report.push(
            "answer_config.correct",
            format!(
                "Expected a position for each of the {} answers but got {}",
                answers.len(),
                c.correct.len()
            ),
        );
    }

    let mut seen = HashSet::new();
    let mut positions = HashSet::new();
    for (i, entry) in c.correct.iter().enumerate() {
        if !positions.insert(entry.order) {
            report.push(
                format!("answer_config.correct[{}].order", i),
                format!("Position {} is used more than once", entry.order),
            );
        }
        match answers.iter().find(|a| a.id == entry.id) {
            None => report.push(
                format!("answer_config.correct[{}].id", i),
                format!("Unknown answer option {}", entry.id),
            ),
            Some(_) if !seen.insert(entry.id.as_str()) => report.push(
                format!("answer_config.correct[{}].id", i),
                format!("Answer option {} is ordered more than once", entry.id),
            ),
            Some(answer) if answer.order_index != entry.order => report.push(
                format!("answer_config.correct[{}].order", i),
                format!(
                    "Position {} does not match the answer's order index {}",
                    entry.order, answer.order_index
                ),
            ),
            Some(_) => {}
        }
    }
}

fn check_video_popup(report: &mut Report, answers: &[AnswerOption], c: &VideoPopupConfig) {
    if c.url.trim().is_empty() {
        report.push("answer_config.url", "Video URL is required");
    }

    let total = c.total_options();
    if total != answers.len() {
        report.push(
            "answer_config.popup_times",
            format!(
                "Popups hold {} options but {} answers were provided",
                total,
                answers.len()
            ),
        );
    }

    for (i, popup) in c.popup_times.iter().enumerate() {
        if !popup.options.contains(&popup.correct) {
            report.push(
                format!("answer_config.popup_times[{}].correct", i),
                "Correct answer must be one of the popup options",
            );
        }
    }
}

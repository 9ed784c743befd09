#![forbid(unsafe_code)]

mod catalog;

pub use catalog::SECTIONS;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// The step that is marked done on a first visit and survives a reset.
pub const WELCOME_STEP: &str = "welcome";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPosition {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub target_element: Option<&'static str>,
    pub position: Option<StepPosition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuideSection {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub steps: &'static [GuideStep],
}

impl GuideSection {
    pub fn contains_step(&self, step_id: &str) -> bool {
        self.steps.iter().any(|step| step.id == step_id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GuideCatalog {
    sections: &'static [GuideSection],
}

impl Default for GuideCatalog {
    fn default() -> Self {
        Self { sections: SECTIONS }
    }
}

impl GuideCatalog {
    pub fn new(sections: &'static [GuideSection]) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &'static [GuideSection] {
        self.sections
    }

    pub fn steps(&self) -> impl Iterator<Item = &'static GuideStep> + 'static {
        let sections: &'static [GuideSection] = self.sections;
        sections.iter().flat_map(|section| section.steps.iter())
    }

    pub fn step(&self, step_id: &str) -> Option<&'static GuideStep> {
        self.steps().find(|step| step.id == step_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&'static GuideSection> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn total_steps(&self) -> usize {
        self.sections.iter().map(|section| section.steps.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GuideError {
    #[error("unknown guide step: {0}")]
    UnknownStep(String),
    #[error("unknown guide section: {0}")]
    UnknownSection(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideProgress {
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub completed_sections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_visited: Option<OffsetDateTime>,
}

impl GuideProgress {
    /// Progress after a reset: only the welcome step stays done.
    pub fn after_reset(now: OffsetDateTime) -> Self {
        Self {
            completed_steps: vec![WELCOME_STEP.to_string()],
            completed_sections: Vec::new(),
            current_step: None,
            last_visited: Some(now),
        }
    }

    /// Drops ids the catalog no longer knows and re-derives finished sections.
    pub fn retain_known(&mut self, catalog: &GuideCatalog) {
        self.completed_steps
            .retain(|id| catalog.step(id).is_some());
        let mut seen = std::collections::HashSet::new();
        self.completed_steps.retain(|id| seen.insert(id.clone()));
        self.completed_sections
            .retain(|id| catalog.section(id).is_some());
        self.mark_finished_sections(catalog);
        if self
            .current_step
            .as_deref()
            .is_some_and(|id| catalog.step(id).is_none())
        {
            self.current_step = None;
        }
    }

    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.completed_steps.iter().any(|id| id == step_id)
    }

    pub fn is_section_completed(&self, section_id: &str) -> bool {
        self.completed_sections.iter().any(|id| id == section_id)
    }

    pub fn next_step(&self, catalog: &GuideCatalog) -> Option<&'static GuideStep> {
        catalog
            .steps()
            .find(|step| !self.is_step_completed(step.id))
    }

    /// Records a finished step. Returns `false` when it was already done.
    pub fn complete(
        &mut self,
        catalog: &GuideCatalog,
        step_id: &str,
        now: OffsetDateTime,
    ) -> Result<bool, GuideError> {
        let Some(step) = catalog.step(step_id) else {
            return Err(GuideError::UnknownStep(step_id.to_string()));
        };
        if self.is_step_completed(step.id) {
            return Ok(false);
        }
        self.completed_steps.push(step.id.to_string());
        self.mark_finished_sections(catalog);
        self.current_step = self.next_step(catalog).map(|next| next.id.to_string());
        self.last_visited = Some(now);
        Ok(true)
    }

    /// Points the current step at the first incomplete one if none is set.
    pub fn start(&mut self, catalog: &GuideCatalog) -> bool {
        if self.current_step.is_some() {
            return false;
        }
        match self.next_step(catalog) {
            Some(step) => {
                self.current_step = Some(step.id.to_string());
                true
            }
            None => false,
        }
    }

    pub fn percentage(&self, catalog: &GuideCatalog) -> f64 {
        let total = catalog.total_steps();
        if total == 0 {
            return 0.0;
        }
        let done = catalog
            .steps()
            .filter(|step| self.is_step_completed(step.id))
            .count();
        done as f64 * 100.0 / total as f64
    }

    pub fn section_percentage(
        &self,
        catalog: &GuideCatalog,
        section_id: &str,
    ) -> Result<f64, GuideError> {
        let Some(section) = catalog.section(section_id) else {
            return Err(GuideError::UnknownSection(section_id.to_string()));
        };
        if section.steps.is_empty() {
            return Ok(0.0);
        }
        let done = section
            .steps
            .iter()
            .filter(|step| self.is_step_completed(step.id))
            .count();
        Ok(done as f64 * 100.0 / section.steps.len() as f64)
    }

    fn mark_finished_sections(&mut self, catalog: &GuideCatalog) {
        for section in catalog.sections() {
            let finished = section
                .steps
                .iter()
                .all(|step| self.is_step_completed(step.id));
            if finished && !self.is_section_completed(section.id) {
                self.completed_sections.push(section.id.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests;

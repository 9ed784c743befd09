#![forbid(unsafe_code)]

use super::*;
use ln_core::guide::{GuideCatalog, GuideProgress, GuideSection, GuideStep, WELCOME_STEP};

/// Walks a user through the fixed guide catalog, saving progress after every change.
#[derive(Debug)]
pub struct GuideTracker<'a> {
    local: &'a mut LocalStorage,
    catalog: GuideCatalog,
    progress: GuideProgress,
}

impl<'a> GuideTracker<'a> {
    pub(super) fn load(local: &'a mut LocalStorage) -> Result<Self, StoreError> {
        Self::load_with(local, GuideCatalog::default())
    }

    pub fn load_with(local: &'a mut LocalStorage, catalog: GuideCatalog) -> Result<Self, StoreError> {
        let mut progress = match local.get_item(GUIDE_PROGRESS_KEY)? {
            Some(raw) => serde_json::from_str::<GuideProgress>(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "guide progress is unreadable, starting over");
                GuideProgress::default()
            }),
            None => GuideProgress::default(),
        };
        progress.retain_known(&catalog);
        let mut tracker = Self {
            local,
            catalog,
            progress,
        };
        if tracker.progress.completed_steps.is_empty() && tracker.catalog.step(WELCOME_STEP).is_some() {
            debug!("first guide visit");
            tracker.complete_step(WELCOME_STEP)?;
        }
        Ok(tracker)
    }

    pub fn catalog(&self) -> &GuideCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> &GuideProgress {
        &self.progress
    }

    pub fn step(&self, step_id: &str) -> Option<&'static GuideStep> {
        self.catalog.step(step_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&'static GuideSection> {
        self.catalog.section(section_id)
    }

    pub fn current_step(&self) -> Option<&'static GuideStep> {
        self.progress
            .current_step
            .as_deref()
            .and_then(|id| self.catalog.step(id))
    }

    pub fn next_step(&self) -> Option<&'static GuideStep> {
        self.progress.next_step(&self.catalog)
    }

    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.progress.is_step_completed(step_id)
    }

    pub fn is_section_completed(&self, section_id: &str) -> bool {
        self.progress.is_section_completed(section_id)
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progress.percentage(&self.catalog)
    }

    pub fn completed_section_count(&self) -> usize {
        self.progress.completed_sections.len()
    }

    pub fn section_progress(&self, section_id: &str) -> Result<f64, StoreError> {
        Ok(self.progress.section_percentage(&self.catalog, section_id)?)
    }

    /// Returns `false` when the step was already done.
    pub fn complete_step(&mut self, step_id: &str) -> Result<bool, StoreError> {
        let changed = self
            .progress
            .complete(&self.catalog, step_id, dates::now_utc())?;
        if changed {
            self.save()?;
            debug!(step = step_id, "guide step completed");
        }
        Ok(changed)
    }

    pub fn skip_step(&mut self, step_id: &str) -> Result<bool, StoreError> {
        self.complete_step(step_id)
    }

    pub fn start(&mut self) -> Result<Option<&'static GuideStep>, StoreError> {
        if self.progress.start(&self.catalog) {
            self.save()?;
        }
        Ok(self.current_step())
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.progress = GuideProgress::after_reset(dates::now_utc());
        self.save()?;
        info!("guide progress reset");
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.progress)?;
        self.local.set_item(GUIDE_PROGRESS_KEY, &json)
    }
}

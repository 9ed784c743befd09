#![forbid(unsafe_code)]

use super::{Args, ToolResult};
use crate::{McpServer, ai_ok, optional_string, require_string, store_error_response};
use ln_core::guide::GuideSection;
use ln_storage::GuideTracker;
use serde_json::{Value, json};

fn section_view(guide: &GuideTracker<'_>, section: &GuideSection) -> Value {
    let steps = section
        .steps
        .iter()
        .map(|step| {
            json!({
                "id": step.id,
                "title": step.title,
                "icon": step.icon,
                "completed": guide.is_step_completed(step.id)
            })
        })
        .collect::<Vec<_>>();
    json!({
        "id": section.id,
        "title": section.title,
        "description": section.description,
        "icon": section.icon,
        "completed": guide.is_section_completed(section.id),
        "progress": guide.section_progress(section.id).unwrap_or(0.0),
        "steps": steps
    })
}

fn status_view(guide: &GuideTracker<'_>) -> Value {
    let catalog = guide.catalog();
    json!({
        "percentage": guide.progress_percentage(),
        "completedSteps": guide.progress().completed_steps,
        "completedSections": guide.completed_section_count(),
        "totalSteps": catalog.total_steps(),
        "totalSections": catalog.sections().len(),
        "currentStep": guide.current_step(),
        "nextStep": guide.next_step()
    })
}

impl McpServer {
    pub(crate) fn tool_guide_status(&mut self, args: &Args) -> ToolResult {
        let section_id = optional_string(args, "sectionId")?;
        let guide = self.store.guide().map_err(store_error_response)?;
        let mut status = status_view(&guide);
        let sections = match section_id.as_deref() {
            Some(id) => {
                guide.section_progress(id).map_err(store_error_response)?;
                guide
                    .section(id)
                    .map(|section| vec![section_view(&guide, section)])
                    .unwrap_or_default()
            }
            None => guide
                .catalog()
                .sections()
                .iter()
                .map(|section| section_view(&guide, section))
                .collect(),
        };
        if let Some(obj) = status.as_object_mut() {
            obj.insert("sections".to_string(), Value::Array(sections));
        }
        Ok(ai_ok("guide_status", status))
    }

    pub(crate) fn tool_guide_start(&mut self, _args: &Args) -> ToolResult {
        let mut guide = self.store.guide().map_err(store_error_response)?;
        let current = guide.start().map_err(store_error_response)?;
        Ok(ai_ok(
            "guide_start",
            json!({ "currentStep": current, "percentage": guide.progress_percentage() }),
        ))
    }

    pub(crate) fn tool_guide_complete(&mut self, args: &Args) -> ToolResult {
        self.finish_guide_step("guide_complete", args)
    }

    pub(crate) fn tool_guide_skip(&mut self, args: &Args) -> ToolResult {
        self.finish_guide_step("guide_skip", args)
    }

    pub(crate) fn tool_guide_reset(&mut self, _args: &Args) -> ToolResult {
        let mut guide = self.store.guide().map_err(store_error_response)?;
        guide.reset().map_err(store_error_response)?;
        Ok(ai_ok("guide_reset", status_view(&guide)))
    }

    fn finish_guide_step(&mut self, intent: &str, args: &Args) -> ToolResult {
        let step_id = require_string(args, "stepId")?;
        let mut guide = self.store.guide().map_err(store_error_response)?;
        let changed = if intent == "guide_skip" {
            guide.skip_step(&step_id)
        } else {
            guide.complete_step(&step_id)
        }
        .map_err(store_error_response)?;
        let mut status = status_view(&guide);
        if let Some(obj) = status.as_object_mut() {
            obj.insert("stepId".to_string(), Value::String(step_id));
            obj.insert("changed".to_string(), Value::Bool(changed));
        }
        Ok(ai_ok(intent, status))
    }
}

#![forbid(unsafe_code)]

use super::{Args, ToolResult};
use crate::{
    McpServer, ai_error, ai_ok, optional_nullable_string, optional_string, optional_usize,
    require_family_id, require_string, store_error_response,
};
use ln_core::FamilyPatch;
use ln_core::model::Family;
use ln_core::stats::{FamilyStats, generation_title};
use ln_core::tree;
use serde_json::{Value, json};

fn family_summary(family: &Family) -> Value {
    json!({
        "id": family.id,
        "name": family.name,
        "totalMembers": tree::count(&family.members),
        "roots": family.members.len(),
        "createdAt": ln_core::dates::to_rfc3339(family.created_at),
        "updatedAt": ln_core::dates::to_rfc3339(family.updated_at),
        "coverPhoto": family.cover_photo
    })
}

impl McpServer {
    pub(crate) fn tool_family_create(&mut self, args: &Args) -> ToolResult {
        let name = require_string(args, "name")?;
        let family = self.store.add_family(&name).map_err(store_error_response)?;
        Ok(ai_ok("family_create", json!({ "family": family })))
    }

    pub(crate) fn tool_family_list(&mut self, _args: &Args) -> ToolResult {
        let families = self
            .store
            .families()
            .iter()
            .map(family_summary)
            .collect::<Vec<_>>();
        Ok(ai_ok(
            "family_list",
            json!({ "count": families.len(), "families": families }),
        ))
    }

    pub(crate) fn tool_family_get(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let Some(family) = self.store.family(family_id) else {
            return Err(store_error_response(ln_storage::StoreError::UnknownFamily(
                family_id,
            )));
        };
        Ok(ai_ok(
            "family_get",
            json!({ "family": family, "stats": FamilyStats::compute(family) }),
        ))
    }

    pub(crate) fn tool_family_update(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let patch = FamilyPatch {
            name: optional_string(args, "name")?,
            cover_photo: optional_nullable_string(args, "coverPhoto")?,
        };
        if patch.is_empty() {
            return Err(ai_error(
                "INVALID_INPUT",
                "provide name and/or coverPhoto",
            ));
        }
        let family = self
            .store
            .update_family(family_id, patch)
            .map_err(store_error_response)?;
        Ok(ai_ok("family_update", json!({ "family": family })))
    }

    pub(crate) fn tool_family_delete(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let removed = self
            .store
            .delete_family(family_id)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "family_delete",
            json!({ "deleted": family_summary(&removed) }),
        ))
    }

    pub(crate) fn tool_family_duplicate(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let copy = self
            .store
            .duplicate_family(family_id)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "family_duplicate",
            json!({ "source": family_id, "family": copy }),
        ))
    }

    pub(crate) fn tool_family_sample(&mut self, _args: &Args) -> ToolResult {
        let family = self
            .store
            .create_sample_family()
            .map_err(store_error_response)?;
        Ok(ai_ok("family_sample", json!({ "family": family })))
    }

    pub(crate) fn tool_family_stats(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let stats = self
            .store
            .family_stats(family_id)
            .map_err(store_error_response)?;
        let titles = (0..stats.generations)
            .map(generation_title)
            .collect::<Vec<_>>();
        Ok(ai_ok(
            "family_stats",
            json!({ "familyId": family_id, "stats": stats, "generationTitles": titles }),
        ))
    }

    pub(crate) fn tool_family_level(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let Some(level) = optional_usize(args, "level")? else {
            return Err(ai_error("INVALID_INPUT", "level is required"));
        };
        let members = self
            .store
            .members_at_level(family_id, level)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "family_level",
            json!({
                "familyId": family_id,
                "level": level,
                "title": generation_title(level),
                "count": members.len(),
                "members": members
            }),
        ))
    }

    pub(crate) fn tool_family_flatten(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let rows = self
            .store
            .flatten(family_id)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "family_flatten",
            json!({ "familyId": family_id, "count": rows.len(), "rows": rows }),
        ))
    }
}

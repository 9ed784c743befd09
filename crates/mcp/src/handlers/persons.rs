#![forbid(unsafe_code)]

use super::{Args, ToolResult};
use crate::{
    McpServer, StoreError, ai_error, ai_ok, ai_ok_with_warnings, parse_new_person,
    parse_person_patch, require_family_id, require_person_id, require_string,
    store_error_response, warning,
};
use ln_core::tree;
use serde_json::json;

impl McpServer {
    pub(crate) fn tool_person_add(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let data = parse_new_person(args)?;
        let person = self
            .store
            .add_person(family_id, data)
            .map_err(store_error_response)?;
        let generation = self.store.generation_of(family_id, person.id);
        Ok(ai_ok(
            "person_add",
            json!({ "familyId": family_id, "person": person, "generation": generation }),
        ))
    }

    pub(crate) fn tool_person_get(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let person_id = require_person_id(args)?;
        let details = self
            .store
            .person_details(family_id, person_id)
            .map_err(store_error_response)?;
        let Some(person) = self.store.person(family_id, person_id) else {
            return Err(store_error_response(StoreError::UnknownPerson(person_id)));
        };
        Ok(ai_ok(
            "person_get",
            json!({
                "familyId": family_id,
                "person": person,
                "details": details,
                "generation": self.store.generation_of(family_id, person_id),
                "parentName": self.store.parent_name(family_id, person_id)
            }),
        ))
    }

    pub(crate) fn tool_person_update(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let person_id = require_person_id(args)?;
        let patch = parse_person_patch(args)?;
        if patch.is_empty() {
            return Err(ai_error("INVALID_INPUT", "no fields to update"));
        }
        let person = self
            .store
            .update_person(family_id, person_id, patch)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "person_update",
            json!({
                "familyId": family_id,
                "person": person,
                "generation": self.store.generation_of(family_id, person_id)
            }),
        ))
    }

    pub(crate) fn tool_person_delete(&mut self, args: &Args) -> ToolResult {
        let family_id = require_family_id(args)?;
        let person_id = require_person_id(args)?;
        let removed = self
            .store
            .delete_person(family_id, person_id)
            .map_err(store_error_response)?;
        let removed_count = tree::count(std::slice::from_ref(&removed));
        let result = json!({
            "familyId": family_id,
            "deleted": removed.id,
            "removedCount": removed_count
        });
        if removed_count > 1 {
            let message = format!("{} descendant(s) were deleted too", removed_count - 1);
            return Ok(ai_ok_with_warnings(
                "person_delete",
                result,
                vec![warning("DESCENDANTS_DELETED", &message)],
            ));
        }
        Ok(ai_ok("person_delete", result))
    }

    pub(crate) fn tool_person_search(&mut self, args: &Args) -> ToolResult {
        let query = require_string(args, "query")?;
        let hits = self.store.search_persons(&query);
        Ok(ai_ok(
            "person_search",
            json!({ "query": query.trim(), "count": hits.len(), "hits": hits }),
        ))
    }
}

#![forbid(unsafe_code)]

use super::{Args, ToolResult};
use crate::{
    McpServer, ai_error, ai_ok, optional_i64, require_i64, require_string, store_error_response,
};
use ln_core::{FamilyId, PersonId};
use serde_json::json;

impl McpServer {
    pub(crate) fn tool_store_stats(&mut self, _args: &Args) -> ToolResult {
        let stats = self.store.statistics().map_err(store_error_response)?;
        Ok(ai_ok(
            "store_stats",
            json!({
                "statistics": stats,
                "totalGenerations": self.store.total_generations(),
                "quotaBytes": self.store.config().quota_bytes
            }),
        ))
    }

    pub(crate) fn tool_data_export(&mut self, args: &Args) -> ToolResult {
        let family_id = optional_i64(args, "familyId")?.map(FamilyId::new);
        let person_id = optional_i64(args, "personId")?.map(PersonId::new);
        let (scope, exported) = match (family_id, person_id) {
            (None, None) => ("all", self.store.export_json()),
            (Some(family_id), None) => ("family", self.store.export_family_json(family_id)),
            (Some(family_id), Some(person_id)) => (
                "person",
                self.store.export_person_json(family_id, person_id),
            ),
            (None, Some(_)) => {
                return Err(ai_error("INVALID_INPUT", "personId needs familyId"));
            }
        };
        let text = exported.map_err(store_error_response)?;
        Ok(ai_ok(
            "data_export",
            json!({ "scope": scope, "bytes": text.len(), "json": text }),
        ))
    }

    pub(crate) fn tool_data_import(&mut self, args: &Args) -> ToolResult {
        let text = require_string(args, "json")?;
        let summary = self
            .store
            .import_json(&text)
            .map_err(store_error_response)?;
        Ok(ai_ok("data_import", json!({ "imported": summary })))
    }

    pub(crate) fn tool_data_clear(&mut self, _args: &Args) -> ToolResult {
        self.store.clear_all_data().map_err(store_error_response)?;
        Ok(ai_ok("data_clear", json!({ "cleared": true })))
    }

    pub(crate) fn tool_backup_create(&mut self, _args: &Args) -> ToolResult {
        let backup = self.store.create_backup().map_err(store_error_response)?;
        Ok(ai_ok("backup_create", json!({ "backup": backup })))
    }

    pub(crate) fn tool_backup_list(&mut self, _args: &Args) -> ToolResult {
        let backups = self.store.backups().map_err(store_error_response)?;
        Ok(ai_ok(
            "backup_list",
            json!({
                "count": backups.len(),
                "maxBackups": self.store.config().max_backups,
                "backups": backups
            }),
        ))
    }

    pub(crate) fn tool_backup_restore(&mut self, args: &Args) -> ToolResult {
        let backup_id = require_i64(args, "backupId")?;
        let summary = self
            .store
            .restore_backup(backup_id)
            .map_err(store_error_response)?;
        Ok(ai_ok(
            "backup_restore",
            json!({ "backupId": backup_id, "imported": summary }),
        ))
    }

    pub(crate) fn tool_backup_delete(&mut self, args: &Args) -> ToolResult {
        let backup_id = require_i64(args, "backupId")?;
        let removed = self
            .store
            .delete_backup(backup_id)
            .map_err(store_error_response)?;
        Ok(ai_ok("backup_delete", json!({ "deleted": removed })))
    }
}

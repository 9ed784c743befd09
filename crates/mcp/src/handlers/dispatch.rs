#![forbid(unsafe_code)]

use super::{Args, ToolResult};
use crate::McpServer;
use serde_json::Value;

pub(crate) const TOOL_NAMES: &[&str] = &[
    "family_create",
    "family_list",
    "family_get",
    "family_update",
    "family_delete",
    "family_duplicate",
    "family_sample",
    "family_stats",
    "family_level",
    "family_flatten",
    "person_add",
    "person_get",
    "person_update",
    "person_delete",
    "person_search",
    "store_stats",
    "data_export",
    "data_import",
    "data_clear",
    "backup_create",
    "backup_list",
    "backup_restore",
    "backup_delete",
    "guide_status",
    "guide_start",
    "guide_complete",
    "guide_skip",
    "guide_reset",
];

fn route(server: &mut McpServer, name: &str, args: &Args) -> Option<ToolResult> {
    let result = match name {
        "family_create" => server.tool_family_create(args),
        "family_list" => server.tool_family_list(args),
        "family_get" => server.tool_family_get(args),
        "family_update" => server.tool_family_update(args),
        "family_delete" => server.tool_family_delete(args),
        "family_duplicate" => server.tool_family_duplicate(args),
        "family_sample" => server.tool_family_sample(args),
        "family_stats" => server.tool_family_stats(args),
        "family_level" => server.tool_family_level(args),
        "family_flatten" => server.tool_family_flatten(args),
        "person_add" => server.tool_person_add(args),
        "person_get" => server.tool_person_get(args),
        "person_update" => server.tool_person_update(args),
        "person_delete" => server.tool_person_delete(args),
        "person_search" => server.tool_person_search(args),
        "store_stats" => server.tool_store_stats(args),
        "data_export" => server.tool_data_export(args),
        "data_import" => server.tool_data_import(args),
        "data_clear" => server.tool_data_clear(args),
        "backup_create" => server.tool_backup_create(args),
        "backup_list" => server.tool_backup_list(args),
        "backup_restore" => server.tool_backup_restore(args),
        "backup_delete" => server.tool_backup_delete(args),
        "guide_status" => server.tool_guide_status(args),
        "guide_start" => server.tool_guide_start(args),
        "guide_complete" => server.tool_guide_complete(args),
        "guide_skip" => server.tool_guide_skip(args),
        "guide_reset" => server.tool_guide_reset(args),
        _ => return None,
    };
    Some(result)
}

pub(crate) fn dispatch_handler(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let empty = Args::new();
    let args = args.as_object().unwrap_or(&empty);
    route(server, name, args).map(|result| result.unwrap_or_else(|err| err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ln_storage::{FamilyStore, StoreConfig};
    use std::collections::BTreeSet;

    #[test]
    fn handler_definitions_and_dispatch_are_in_sync() {
        let mut defined = BTreeSet::<String>::new();
        for tool in super::super::handler_definitions() {
            let Some(name) = tool.get("name").and_then(|v| v.as_str()) else {
                continue;
            };
            defined.insert(name.to_string());
        }

        let store = FamilyStore::open_in_memory(StoreConfig::default()).expect("store");
        let mut server = McpServer::new(store);
        let mut dispatched = BTreeSet::<String>::new();
        for name in TOOL_NAMES {
            assert!(
                route(&mut server, name, &Args::new()).is_some(),
                "{name} is listed but not routed"
            );
            dispatched.insert((*name).to_string());
        }

        let missing_in_definitions = dispatched.difference(&defined).cloned().collect::<Vec<_>>();
        let missing_in_dispatch = defined.difference(&dispatched).cloned().collect::<Vec<_>>();

        assert!(
            missing_in_definitions.is_empty() && missing_in_dispatch.is_empty(),
            "tool dispatch/definitions mismatch\n  dispatch-only: {missing_in_definitions:?}\n  definitions-only: {missing_in_dispatch:?}"
        );
    }
}

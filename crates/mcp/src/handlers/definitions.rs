#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn tool(name: &str, description: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

fn id_schema(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

fn nullable_string(description: &str) -> Value {
    json!({ "type": ["string", "null"], "description": description })
}

fn person_properties(for_update: bool) -> Value {
    let text = |description: &str| {
        if for_update {
            nullable_string(description)
        } else {
            json!({ "type": "string", "description": description })
        }
    };
    let parent = if for_update {
        json!({
            "type": ["integer", "null"],
            "description": "Move the person (with descendants) under this parent; null makes it a root."
        })
    } else {
        id_schema("Parent person id; omit to add a root.")
    };
    json!({
        "familyId": id_schema("Family id."),
        "firstName": { "type": "string" },
        "lastName": { "type": "string" },
        "gender": { "type": "string", "enum": ["male", "female"] },
        "phone": text("Phone number."),
        "address": text("Postal address."),
        "email": text("Email address."),
        "photo": text("Photo reference (URL or data URI)."),
        "birthDate": text("YYYY-MM-DD."),
        "deathDate": text("YYYY-MM-DD."),
        "profession": text("Profession."),
        "notes": text("Free-form notes."),
        "parentId": parent
    })
}

fn family_tools() -> Vec<Value> {
    let family_id = json!({ "familyId": id_schema("Family id.") });
    vec![
        tool(
            "family_create",
            "Create an empty family.",
            json!({ "name": { "type": "string" } }),
            &["name"],
        ),
        tool("family_list", "List families with member counts.", json!({}), &[]),
        tool(
            "family_get",
            "Get a family with its full member tree.",
            family_id.clone(),
            &["familyId"],
        ),
        tool(
            "family_update",
            "Rename a family or change its cover photo.",
            json!({
                "familyId": id_schema("Family id."),
                "name": { "type": "string" },
                "coverPhoto": nullable_string("Cover photo reference; null clears it.")
            }),
            &["familyId"],
        ),
        tool(
            "family_delete",
            "Delete a family and everyone in it.",
            family_id.clone(),
            &["familyId"],
        ),
        tool(
            "family_duplicate",
            "Copy a family with fresh ids.",
            family_id.clone(),
            &["familyId"],
        ),
        tool(
            "family_sample",
            "Add a small sample family to explore with.",
            json!({}),
            &[],
        ),
        tool(
            "family_stats",
            "Member, gender and generation counts for a family.",
            family_id.clone(),
            &["familyId"],
        ),
        tool(
            "family_level",
            "Members at one generation level (roots are level 0).",
            json!({
                "familyId": id_schema("Family id."),
                "level": { "type": "integer", "minimum": 0 }
            }),
            &["familyId", "level"],
        ),
        tool(
            "family_flatten",
            "Family members as flat rows in tree order.",
            family_id,
            &["familyId"],
        ),
    ]
}

fn person_tools() -> Vec<Value> {
    let person_ref = json!({
        "familyId": id_schema("Family id."),
        "personId": id_schema("Person id.")
    });
    let mut update_props = person_properties(true);
    if let Some(obj) = update_props.as_object_mut() {
        obj.insert("personId".to_string(), id_schema("Person id."));
    }
    vec![
        tool(
            "person_add",
            "Add a person as a root or under an existing parent.",
            person_properties(false),
            &["familyId", "firstName", "lastName"],
        ),
        tool(
            "person_get",
            "Get a person with a computed summary.",
            person_ref.clone(),
            &["familyId", "personId"],
        ),
        tool(
            "person_update",
            "Merge-patch a person; null clears optional fields.",
            update_props,
            &["familyId", "personId"],
        ),
        tool(
            "person_delete",
            "Delete a person and all descendants.",
            person_ref,
            &["familyId", "personId"],
        ),
        tool(
            "person_search",
            "Case-insensitive name search across all families.",
            json!({ "query": { "type": "string" } }),
            &["query"],
        ),
    ]
}

fn data_tools() -> Vec<Value> {
    let backup_id = json!({ "backupId": id_schema("Backup id.") });
    vec![
        tool(
            "store_stats",
            "Totals, storage use and last backup time.",
            json!({}),
            &[],
        ),
        tool(
            "data_export",
            "Export everything, one family, or one person as JSON.",
            json!({
                "familyId": id_schema("Limit the export to this family."),
                "personId": id_schema("Export a single person (needs familyId).")
            }),
            &[],
        ),
        tool(
            "data_import",
            "Replace all families with an exported JSON document.",
            json!({ "json": { "type": "string" } }),
            &["json"],
        ),
        tool(
            "data_clear",
            "Delete every family. Backups are kept.",
            json!({}),
            &[],
        ),
        tool("backup_create", "Snapshot all families.", json!({}), &[]),
        tool("backup_list", "List backups, newest first.", json!({}), &[]),
        tool(
            "backup_restore",
            "Replace all families with a backup.",
            backup_id.clone(),
            &["backupId"],
        ),
        tool("backup_delete", "Delete a backup.", backup_id, &["backupId"]),
    ]
}

fn guide_tools() -> Vec<Value> {
    let step_id = json!({ "stepId": { "type": "string" } });
    vec![
        tool(
            "guide_status",
            "Guide catalog with progress, current and next step.",
            json!({ "sectionId": { "type": "string", "description": "Limit to one section." } }),
            &[],
        ),
        tool(
            "guide_start",
            "Point the guide at the first unfinished step.",
            json!({}),
            &[],
        ),
        tool(
            "guide_complete",
            "Mark a guide step as done.",
            step_id.clone(),
            &["stepId"],
        ),
        tool("guide_skip", "Skip a guide step.", step_id, &["stepId"]),
        tool(
            "guide_reset",
            "Start the guide over (welcome stays done).",
            json!({}),
            &[],
        ),
    ]
}

pub(crate) fn handler_definitions() -> Vec<Value> {
    let mut handlers = Vec::new();
    handlers.extend(family_tools());
    handlers.extend(person_tools());
    handlers.extend(data_tools());
    handlers.extend(guide_tools());
    handlers.sort_by_key(|tool| {
        tool.get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    });
    handlers
}

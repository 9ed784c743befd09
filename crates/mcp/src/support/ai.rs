#![forbid(unsafe_code)]

use crate::StoreError;
use serde_json::{Value, json};

/// Stable error code for a store failure, as seen by tool callers.
pub(crate) fn store_error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::UnknownFamily(_) => "UNKNOWN_FAMILY",
        StoreError::UnknownPerson(_) => "UNKNOWN_PERSON",
        StoreError::UnknownParent(_) => "UNKNOWN_PARENT",
        StoreError::WouldCreateCycle { .. } => "WOULD_CREATE_CYCLE",
        StoreError::InvalidInput(_) => "INVALID_INPUT",
        StoreError::InvalidImport(_) | StoreError::DuplicatePersonId(_) => "INVALID_IMPORT",
        StoreError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
        StoreError::UnknownBackup(_) => "UNKNOWN_BACKUP",
        StoreError::BackupCorrupted(_) => "BACKUP_CORRUPTED",
        StoreError::UnknownGuideStep(_) | StoreError::UnknownGuideSection(_) => "UNKNOWN_STEP",
        StoreError::Io(_) | StoreError::Sql(_) | StoreError::Json(_) => "STORE_ERROR",
    }
}

fn store_error_recovery(err: &StoreError) -> Option<&'static str> {
    match err {
        StoreError::UnknownFamily(_) => Some("Call family_list to see existing family ids."),
        StoreError::UnknownPerson(_) | StoreError::UnknownParent(_) => {
            Some("Call family_get to see the person ids of the family.")
        }
        StoreError::WouldCreateCycle { .. } => {
            Some("Pick a parent outside the person's own subtree.")
        }
        StoreError::QuotaExceeded { .. } => {
            Some("Delete old backups or families to free local storage.")
        }
        StoreError::UnknownBackup(_) => Some("Call backup_list to see available backups."),
        StoreError::UnknownGuideStep(_) => Some("Call guide_status to see the step ids."),
        _ => None,
    }
}

pub(crate) fn format_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Io(e) => format!("IO: {e}"),
        StoreError::Sql(e) => format!("SQL: {e}"),
        StoreError::Json(e) => format!("JSON: {e}"),
        other => {
            let text = other.to_string();
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => text,
            }
        }
    }
}

pub(crate) fn store_error_response(err: StoreError) -> Value {
    tracing::warn!(code = store_error_code(&err), error = %err, "tool failed");
    ai_error_with(
        store_error_code(&err),
        &format_store_error(&err),
        store_error_recovery(&err),
    )
}

pub(crate) fn warning(code: &str, message: &str) -> Value {
    json!({
        "code": code,
        "message": message
    })
}

pub(crate) fn ai_ok_with_warnings(intent: &str, result: Value, warnings: Vec<Value>) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "warnings": warnings,
        "error": null
    })
}

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    ai_ok_with_warnings(intent, result, Vec::new())
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    ai_error_with(code, message, None)
}

pub(crate) fn ai_error_with(code: &str, message: &str, recovery: Option<&str>) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert(
            "recovery".to_string(),
            Value::String(recovery.trim().to_string()),
        );
    }

    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "warnings": [],
        "error": Value::Object(error_obj)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ln_core::{FamilyId, PersonId};

    #[test]
    fn store_errors_map_to_stable_codes() {
        let cases = [
            (StoreError::UnknownFamily(FamilyId::new(1)), "UNKNOWN_FAMILY"),
            (StoreError::UnknownParent(PersonId::new(2)), "UNKNOWN_PARENT"),
            (StoreError::DuplicatePersonId(PersonId::new(3)), "INVALID_IMPORT"),
            (StoreError::BackupCorrupted(4), "BACKUP_CORRUPTED"),
            (StoreError::UnknownGuideSection("x".to_string()), "UNKNOWN_STEP"),
        ];
        for (err, code) in cases {
            assert_eq!(store_error_code(&err), code);
        }
    }

    #[test]
    fn error_envelope_carries_recovery() {
        let resp = store_error_response(StoreError::UnknownFamily(FamilyId::new(9)));
        assert_eq!(resp["success"], false);
        assert_eq!(resp["error"]["code"], "UNKNOWN_FAMILY");
        assert_eq!(resp["error"]["message"], "Unknown family 9");
        assert!(resp["error"]["recovery"].is_string());
    }
}

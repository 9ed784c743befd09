#![forbid(unsafe_code)]

use ln_core::PersonId;
use ln_storage::{FamilyStore, StoreConfig, StoreError};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> FamilyStore {
    FamilyStore::open(dir.path(), StoreConfig::default()).expect("open store")
}

#[test]
fn export_document_shape() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_store(&dir);
    store.create_sample_family().expect("sample");

    let doc: Value = serde_json::from_str(&store.export_json().expect("export")).expect("json");
    assert_eq!(doc["version"], "1.0.0");
    assert_eq!(doc["totalFamilies"], 1);
    assert_eq!(doc["totalPersons"], 4);
    assert!(doc["exportDate"].is_string());
    let founder = &doc["families"][0]["members"][0];
    assert_eq!(founder["firstName"], "Jean");
    assert_eq!(founder["gender"], "male");
    assert_eq!(founder["children"][0]["parentId"], founder["id"]);
}

#[test]
fn export_then_import_into_fresh_store() {
    let source_dir = TempDir::new().expect("temp dir");
    let mut source = open_store(&source_dir);
    let family = source.create_sample_family().expect("sample");
    let text = source.export_json().expect("export");

    let target_dir = TempDir::new().expect("temp dir");
    let mut target = open_store(&target_dir);
    target.add_family("Replaced").expect("add");
    let summary = target.import_json(&text).expect("import");
    assert_eq!(summary.families, 1);
    assert_eq!(summary.persons, 4);
    assert_eq!(target.families(), source.families());

    // New ids never collide with imported ones.
    let next = target.add_family("Next").expect("add");
    assert!(next.id.get() > family.id.get());
}

#[test]
fn family_export_reimports_as_array() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_store(&dir);
    let family = store.create_sample_family().expect("sample");
    store.add_family("Other").expect("add");

    let text = store.export_family_json(family.id).expect("export family");
    let summary = store.import_json(&text).expect("import");
    assert_eq!(summary.families, 1);
    assert_eq!(store.families()[0].id, family.id);
}

#[test]
fn import_accepts_legacy_keys_and_rebuilds_links() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_store(&dir);
    let text = r#"{
      "families": [{
        "id": 10,
        "name": "Legacy",
        "members": [{
          "id": 11,
          "prenom": "Anne",
          "nom": "Morel",
          "genre": "femme",
          "dateNaissance": "1950-04-02T00:00:00.000Z",
          "parentId": 999,
          "children": [{ "id": 12, "prenom": "Luc", "nom": "Morel", "genre": "homme" }]
        }]
      }]
    }"#;
    let summary = store.import_json(text).expect("import");
    assert_eq!(summary.persons, 2);

    let family = &store.families()[0];
    let anne = &family.members[0];
    assert_eq!(anne.first_name, "Anne");
    assert_eq!(anne.parent_id, None);
    assert_eq!(anne.birth_date.map(|d| d.year()), Some(1950));
    assert!(anne.created_at.is_some());
    assert_eq!(anne.children[0].parent_id, Some(PersonId::new(11)));
    assert_eq!(anne.children[0].gender, ln_core::Gender::Male);
}

#[test]
fn invalid_imports_leave_data_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_store(&dir);
    store.create_sample_family().expect("sample");

    for text in ["not json", r#"{"version":"1.0.0"}"#, r#"{"families":{}}"#, "42"] {
        assert!(
            matches!(store.import_json(text), Err(StoreError::InvalidImport(_))),
            "{text}"
        );
    }
    let duplicate = r#"[{"id":1,"name":"Dup","members":[{"id":5,"children":[{"id":5}]}]}]"#;
    assert!(matches!(
        store.import_json(duplicate),
        Err(StoreError::DuplicatePersonId(id)) if id == PersonId::new(5)
    ));
    assert_eq!(store.families().len(), 1);
    assert_eq!(store.total_persons(), 4);
}

#[test]
fn person_export_is_the_record() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_store(&dir);
    let family = store.create_sample_family().expect("sample");
    let alice = &family.members[0].children[0];

    let value: Value =
        serde_json::from_str(&store.export_person_json(family.id, alice.id).expect("export"))
            .expect("json");
    assert_eq!(value["firstName"], "Alice");
    assert_eq!(value["lastName"], "Dupont");
    assert!(matches!(
        store.export_person_json(family.id, PersonId::new(1)),
        Err(StoreError::UnknownPerson(_))
    ));
}

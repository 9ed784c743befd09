use super::*;
use pretty_assertions::assert_eq;
use time::macros::datetime;

fn catalog() -> GuideCatalog {
    GuideCatalog::default()
}

#[test]
fn catalog_has_five_sections_of_three_steps_with_unique_ids() {
    let catalog = catalog();
    assert_eq!(catalog.sections().len(), 5);
    assert_eq!(catalog.total_steps(), 15);
    let mut ids = catalog.steps().map(|s| s.id).collect::<Vec<_>>();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 15);
    assert_eq!(catalog.steps().next().map(|s| s.id), Some(WELCOME_STEP));
}

#[test]
fn next_step_follows_catalog_order() {
    let catalog = catalog();
    let now = datetime!(2024-01-01 0:00 UTC);
    let mut progress = GuideProgress::default();
    assert_eq!(progress.next_step(&catalog).map(|s| s.id), Some("welcome"));

    progress.complete(&catalog, "create-first-family", now).unwrap();
    assert_eq!(progress.next_step(&catalog).map(|s| s.id), Some("welcome"));
    progress.complete(&catalog, "welcome", now).unwrap();
    assert_eq!(
        progress.next_step(&catalog).map(|s| s.id),
        Some("add-first-person")
    );
    assert_eq!(progress.current_step.as_deref(), Some("add-first-person"));
}

#[test]
fn completing_last_step_of_section_marks_section() {
    let catalog = catalog();
    let now = datetime!(2024-01-01 0:00 UTC);
    let mut progress = GuideProgress::default();
    assert!(progress.complete(&catalog, "welcome", now).unwrap());
    assert!(progress.complete(&catalog, "create-first-family", now).unwrap());
    assert!(!progress.is_section_completed("getting-started"));
    assert!(progress.complete(&catalog, "add-first-person", now).unwrap());
    assert!(progress.is_section_completed("getting-started"));
    assert_eq!(progress.completed_sections, vec!["getting-started".to_string()]);

    assert!(!progress.complete(&catalog, "welcome", now).unwrap());
    assert_eq!(progress.completed_steps.len(), 3);
    assert_eq!(progress.percentage(&catalog), 20.0);
    assert_eq!(
        progress.section_percentage(&catalog, "getting-started").unwrap(),
        100.0
    );
    assert_eq!(
        progress.section_percentage(&catalog, "views-navigation").unwrap(),
        0.0
    );
}

#[test]
fn unknown_ids_are_rejected() {
    let catalog = catalog();
    let now = datetime!(2024-01-01 0:00 UTC);
    let mut progress = GuideProgress::default();
    assert_eq!(
        progress.complete(&catalog, "nope", now),
        Err(GuideError::UnknownStep("nope".to_string()))
    );
    assert_eq!(
        progress.section_percentage(&catalog, "nope"),
        Err(GuideError::UnknownSection("nope".to_string()))
    );
}

#[test]
fn finishing_everything_leaves_no_next_step() {
    let catalog = catalog();
    let now = datetime!(2024-01-01 0:00 UTC);
    let mut progress = GuideProgress::default();
    for step in catalog.steps() {
        progress.complete(&catalog, step.id, now).unwrap();
    }
    assert_eq!(progress.next_step(&catalog), None);
    assert_eq!(progress.current_step, None);
    assert_eq!(progress.completed_sections.len(), 5);
    assert_eq!(progress.percentage(&catalog), 100.0);
    assert!(!progress.start(&catalog));
}

#[test]
fn start_and_reset() {
    let catalog = catalog();
    let now = datetime!(2024-01-01 0:00 UTC);
    let mut progress = GuideProgress::default();
    assert!(progress.start(&catalog));
    assert_eq!(progress.current_step.as_deref(), Some("welcome"));
    assert!(!progress.start(&catalog));

    let reset = GuideProgress::after_reset(now);
    assert_eq!(reset.completed_steps, vec![WELCOME_STEP.to_string()]);
    assert!(reset.completed_sections.is_empty());
    assert_eq!(reset.current_step, None);
}

#[test]
fn retain_known_drops_stale_ids() {
    let catalog = catalog();
    let mut progress = GuideProgress {
        completed_steps: vec![
            "welcome".to_string(),
            "legacy-step".to_string(),
            "welcome".to_string(),
        ],
        completed_sections: vec!["legacy-section".to_string()],
        current_step: Some("legacy-step".to_string()),
        last_visited: None,
    };
    progress.retain_known(&catalog);
    assert_eq!(progress.completed_steps, vec!["welcome".to_string()]);
    assert!(progress.completed_sections.is_empty());
    assert_eq!(progress.current_step, None);
}

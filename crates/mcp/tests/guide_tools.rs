#![forbid(unsafe_code)]

mod support;

use pretty_assertions::assert_eq;
use serde_json::json;
use support::*;

#[test]
fn status_starts_after_welcome() {
    let mut server = Server::start_initialized();
    let status = server.call_ok("guide_status", json!({}));
    assert_eq!(status["completedSteps"], json!(["welcome"]));
    assert_eq!(status["totalSteps"], 15);
    assert_eq!(status["totalSections"], 5);
    assert_eq!(status["nextStep"]["id"], "create-first-family");
    assert_eq!(status["sections"][0]["id"], "getting-started");
    assert_eq!(status["sections"][0]["steps"][0]["completed"], true);
}

#[test]
fn completing_a_section() {
    let mut server = Server::start_initialized();
    let first = server.call_ok("guide_complete", json!({ "stepId": "create-first-family" }));
    assert_eq!(first["changed"], true);
    let again = server.call_ok("guide_complete", json!({ "stepId": "create-first-family" }));
    assert_eq!(again["changed"], false);

    let skipped = server.call_ok("guide_skip", json!({ "stepId": "add-first-person" }));
    assert_eq!(skipped["completedSections"], 1);
    assert_eq!(skipped["currentStep"]["id"], "switch-families");
    assert_eq!(skipped["percentage"], 20.0);

    let section = server.call_ok("guide_status", json!({ "sectionId": "getting-started" }));
    assert_eq!(section["sections"].as_array().expect("sections").len(), 1);
    assert_eq!(section["sections"][0]["completed"], true);
    assert_eq!(section["sections"][0]["progress"], 100.0);
}

#[test]
fn unknown_step_and_section() {
    let mut server = Server::start_initialized();
    let body = server.call("guide_complete", json!({ "stepId": "fly" }));
    assert_tool_error(&body, "UNKNOWN_STEP");
    let body = server.call("guide_status", json!({ "sectionId": "nowhere" }));
    assert_tool_error(&body, "UNKNOWN_STEP");
    let body = server.call("guide_skip", json!({}));
    assert_tool_error(&body, "INVALID_INPUT");
}

#[test]
fn start_and_reset() {
    let mut server = Server::start_initialized();
    let started = server.call_ok("guide_start", json!({}));
    assert_eq!(started["currentStep"]["id"], "create-first-family");

    server.call_ok("guide_complete", json!({ "stepId": "statistics" }));
    let reset = server.call_ok("guide_reset", json!({}));
    assert_eq!(reset["completedSteps"], json!(["welcome"]));
    assert_eq!(reset["currentStep"], serde_json::Value::Null);
}

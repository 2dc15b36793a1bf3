//! End-to-end tests for `keyscene keyword` commands.

mod fixtures;
use fixtures::*;

use keyscene::models::HandlerKind;

// ============================================================================
// List / Find
// ============================================================================

#[test]
fn test_keyword_list_json() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["ground", "ledge"]));

    let output = env.run(&["keyword", "list", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["count"], 2);
    assert_eq!(result["keywords"][1]["keyword"], "ledge");
    assert_eq!(result["keywords"][1]["handler"], "GROUND");
    assert_eq!(result["keywords"][1]["index"], 1);
}

#[test]
fn test_keyword_list_empty() {
    let env = TestEnv::new();
    env.write_session(&mut empty_session());

    let output = env.run(&["keyword", "list"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No keywords defined."));
}

#[test]
fn test_keyword_find() {
    let env = TestEnv::new();
    let mut session = session_with_keywords(&["ground", "ground"]);
    session
        .keywords
        .set_entry(1, None, Some(HandlerKind::new("SCENERY")))
        .unwrap();
    env.write_session(&mut session);

    // First match wins
    let output = env.run(&["keyword", "find", "ground", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);
    assert_eq!(result["handler"], "GROUND");
    assert_eq!(result["found"], true);

    let output = env.run(&["keyword", "find", "Ground", "--json"]);
    let result = stdout_json(&output);
    assert_eq!(result["handler"], "NONE");
    assert_eq!(result["found"], false);
}

// ============================================================================
// Add
// ============================================================================

#[test]
fn test_keyword_add_to_empty_list() {
    let env = TestEnv::new();
    env.write_session(&mut empty_session());

    let output = env.run(&[
        "keyword", "add", "--index", "5", "--keyword", "ground", "--handler", "ground",
    ]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let session = env.read_session();
    assert_eq!(keyword_texts(&session), vec!["ground"]);
    assert_eq!(session.keywords.entries()[0].handler, HandlerKind::new("GROUND"));
}

#[test]
fn test_keyword_add_in_middle() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b", "c"]));

    let output = env.run(&["keyword", "add", "--index", "1", "--keyword", "x"]);
    assert_eq!(output.status.code(), Some(0));

    let session = env.read_session();
    assert_eq!(keyword_texts(&session), vec!["a", "x", "b", "c"]);
    assert!(session.keywords.entries()[1].handler.is_none());
}

#[test]
fn test_keyword_add_defaults_to_end() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b"]));

    let output = env.run(&["keyword", "add", "--keyword", "z"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a", "b", "z"]);
}

#[test]
fn test_keyword_add_negative_index_accepted() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b"]));

    let output = env.run(&["keyword", "add", "--index", "-1", "--answers", "0", "--keyword", "first"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(keyword_texts(&env.read_session()), vec!["first", "a", "b"]);
}

#[test]
fn test_keyword_add_large_index_declined() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b"]));

    let output = env.run(&["keyword", "add", "--index", "9", "--answers", "1"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No keyword added."));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a", "b"]);
}

#[test]
fn test_keyword_add_unknown_handler() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a"]));

    let output = env.run(&["keyword", "add", "--keyword", "lava", "--handler", "LAVA"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown handler 'LAVA'"));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a"]);
}

#[test]
fn test_keyword_add_custom_handler_from_config() {
    let env = TestEnv::new();
    env.write_config("[[handlers]]\nname = \"LADDER\"\ndescription = \"Climbable\"\n");
    env.write_session(&mut empty_session());

    let output = env.run(&["keyword", "add", "--keyword", "rungs", "--handler", "ladder"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        env.read_session().keywords.entries()[0].handler,
        HandlerKind::new("LADDER")
    );
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_keyword_remove() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b", "c"]));

    let output = env.run(&["keyword", "remove", "--index", "1"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a", "c"]);
}

#[test]
fn test_keyword_remove_large_index_accepted() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b", "c"]));

    let output = env.run(&["keyword", "remove", "--index", "3", "--answers", "0"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a", "b"]);
}

#[test]
fn test_keyword_remove_negative_index_declined() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b"]));

    let output = env.run(&["keyword", "remove", "--index", "-2", "--answers", "1"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(keyword_texts(&env.read_session()), vec!["a", "b"]);
}

#[test]
fn test_keyword_remove_from_empty_list() {
    let env = TestEnv::new();
    env.write_session(&mut empty_session());

    let output = env.run(&["keyword", "remove", "--index", "0"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: No List"));
}

// ============================================================================
// Set
// ============================================================================

#[test]
fn test_keyword_set() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a", "b"]));

    let output = env.run(&["keyword", "set", "--index", "1", "--keyword", "bush", "--handler", "scenery"]);
    assert_eq!(output.status.code(), Some(0));

    let session = env.read_session();
    assert_eq!(keyword_texts(&session), vec!["a", "bush"]);
    assert_eq!(session.keywords.entries()[1].handler, HandlerKind::new("SCENERY"));
}

#[test]
fn test_keyword_set_out_of_range() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a"]));

    let output = env.run(&["keyword", "set", "--index", "4", "--keyword", "x"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_keyword_set_requires_a_change() {
    let env = TestEnv::new();
    env.write_session(&mut session_with_keywords(&["a"]));

    let output = env.run(&["keyword", "set", "--index", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

mod support;

use predicates::str::contains;
use support::TestDir;

#[test]
fn add_then_list_persists_across_runs() {
    let dir = TestDir::new();

    let added = dir.json(&["todo", "add", "buy", "milk"]);
    assert_eq!(added["schema_version"], "tabboard.v1");
    assert_eq!(added["command"], "todo add");
    assert_eq!(added["status"], "success");
    assert_eq!(added["data"]["added"], true);
    assert_eq!(added["data"]["task"]["text"], "buy milk");
    assert_eq!(added["data"]["task"]["completed"], false);

    let listed = dir.json(&["todo", "list"]);
    let items = listed["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "buy milk");
    assert_eq!(items[0]["id"], added["data"]["task"]["id"]);
    assert_eq!(listed["data"]["counters"]["total"], 1);

    let raw = dir.read_slot("todos").expect("slot written");
    assert!(raw.contains("\"createdAt\""));
}

#[test]
fn blank_add_is_a_noop() {
    let dir = TestDir::new();
    dir.cmd()
        .args(["todo", "add", "   "])
        .assert()
        .success()
        .stdout(contains("nothing added"));

    assert!(dir.read_slot("todos").is_none());
    let stats = dir.json(&["todo", "stats"]);
    assert_eq!(stats["data"]["total"], 0);
}

#[test]
fn toggle_and_filters_track_counters() {
    let dir = TestDir::new();
    let first = dir.json(&["todo", "add", "first"]);
    dir.json(&["todo", "add", "second"]);
    let id = first["data"]["task"]["id"].as_str().expect("id").to_string();

    let toggled = dir.json(&["todo", "toggle", &id]);
    assert_eq!(toggled["data"]["matched"], true);
    assert_eq!(toggled["data"]["completed"], true);

    let completed = dir.json(&["todo", "list", "--filter", "completed"]);
    let items = completed["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "first");
    assert_eq!(completed["data"]["filter"], "completed");

    let pending = dir.json(&["todo", "list", "--filter", "pending"]);
    assert_eq!(pending["data"]["items"][0]["text"], "second");
    for view in [&completed, &pending] {
        assert_eq!(view["data"]["counters"]["total"], 2);
        assert_eq!(view["data"]["counters"]["pending"], 1);
        assert_eq!(view["data"]["counters"]["completed"], 1);
    }
}

#[test]
fn remove_deletes_permanently() {
    let dir = TestDir::new();
    let added = dir.json(&["todo", "add", "gone soon"]);
    let id = added["data"]["task"]["id"].as_str().expect("id").to_string();

    let removed = dir.json(&["todo", "rm", &id]);
    assert_eq!(removed["command"], "todo rm");
    assert_eq!(removed["data"]["matched"], true);
    assert_eq!(removed["data"]["counters"]["total"], 0);
    assert_eq!(dir.read_slot("todos").as_deref(), Some("[]"));
}

#[test]
fn unknown_id_reports_no_match() {
    let dir = TestDir::new();
    dir.json(&["todo", "add", "keep me"]);

    dir.cmd()
        .args(["todo", "toggle", "nonexistent-id"])
        .assert()
        .success()
        .stdout(contains("no task with id 'nonexistent-id'"));

    let listed = dir.json(&["todo", "list"]);
    assert_eq!(listed["data"]["items"][0]["completed"], false);
}

#[test]
fn loads_blob_with_numeric_ids() {
    let dir = TestDir::new();
    dir.write_slot(
        "todos",
        r#"[{"id":1700000000000,"text":"legacy","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}]"#,
    )
    .expect("write slot");

    let toggled = dir.json(&["todo", "toggle", "1700000000000"]);
    assert_eq!(toggled["data"]["matched"], true);
    assert_eq!(toggled["data"]["completed"], false);
    assert_eq!(
        dir.read_slot("todos").as_deref(),
        Some(r#"[{"id":1700000000000,"text":"legacy","completed":false,"createdAt":"2023-11-14T22:13:20.000Z"}]"#)
    );
}

#[test]
fn malformed_slot_starts_empty() {
    let dir = TestDir::new();
    dir.write_slot("todos", "{not json").expect("write slot");

    let stats = dir.json(&["todo", "stats"]);
    assert_eq!(stats["status"], "success");
    assert_eq!(stats["data"]["total"], 0);

    let toggled = dir.json(&["todo", "toggle", "bogus"]);
    assert_eq!(toggled["data"]["matched"], false);
    assert_eq!(dir.read_slot("todos").as_deref(), Some("{not json"));
}

#[test]
fn config_slot_name_is_honored() {
    let dir = TestDir::new();
    dir.write_config("[store]\nslot = \"chores\"\n")
        .expect("write config");

    dir.json(&["todo", "add", "sweep"]);
    assert!(dir.read_slot("chores").is_some());
    assert!(dir.read_slot("todos").is_none());
}

#[test]
fn missing_explicit_config_is_user_error() {
    let dir = TestDir::new();
    let missing = dir.path().join("absent.toml");

    let output = dir
        .cmd()
        .arg("--json")
        .arg("--config")
        .arg(&missing)
        .args(["todo", "stats"])
        .output()
        .expect("run tabboard");
    assert_eq!(output.status.code(), Some(2));

    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["command"], "todo stats");
    assert_eq!(envelope["error"]["kind"], "user_error");
}

#[test]
fn quiet_suppresses_human_output() {
    let dir = TestDir::new();
    dir.cmd()
        .args(["-q", "todo", "add", "silent"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn reads_do_not_create_data_dir() {
    let dir = TestDir::new();
    let fresh = dir.path().join("fresh");

    for args in [["todo", "list"], ["todo", "stats"]] {
        dir.cmd()
            .arg("--data-dir")
            .arg(&fresh)
            .args(args)
            .assert()
            .success();
        assert!(!fresh.exists(), "{args:?} created the data dir");
    }

    dir.cmd()
        .arg("--data-dir")
        .arg(&fresh)
        .args(["todo", "add", "first"])
        .assert()
        .success();
    assert!(fresh.join("todos.json").is_file());
}

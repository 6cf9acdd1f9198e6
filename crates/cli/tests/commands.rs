//! Integration tests for the commands that need no device.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

fn storeshot_binary() -> PathBuf {
	let mut path = std::env::current_exe().unwrap();
	path.pop();
	path.pop();
	path.push("storeshot");
	path
}

fn run_in(dir: &Path, args: &[&str]) -> (Value, bool) {
	let output = Command::new(storeshot_binary())
		.current_dir(dir)
		.args(args)
		.output()
		.expect("failed to execute storeshot");

	let stdout = String::from_utf8_lossy(&output.stdout);
	let json = serde_json::from_str(&stdout).unwrap_or_else(|_| serde_json::json!({ "raw": stdout }));
	(json, output.status.success())
}

#[test]
fn list_describes_the_storyboard() {
	let dir = tempfile::tempdir().unwrap();

	let (json, success) = run_in(dir.path(), &["list"]);

	assert!(success, "list should succeed: {json}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "list");
	let shots = json["data"]["shots"].as_array().unwrap();
	assert_eq!(shots.len(), 10);
	assert_eq!(shots[0]["file"], "01_map_overview_tap_any_spot_to_get_your_forecast.png");
	assert_eq!(json["data"]["locations"].as_array().unwrap().len(), 5);
}

#[test]
fn clean_removes_only_pngs() {
	let dir = tempfile::tempdir().unwrap();
	let phone = dir.path().join("shots").join("phone");
	std::fs::create_dir_all(&phone).unwrap();
	std::fs::write(phone.join("01_old.png"), b"stale").unwrap();
	std::fs::write(phone.join("02_old.png"), b"stale").unwrap();
	std::fs::write(phone.join("notes.txt"), b"keep").unwrap();

	let (json, success) = run_in(dir.path(), &["clean", "--output", "shots"]);

	assert!(success, "clean should succeed: {json}");
	assert_eq!(json["data"]["removed"], 2);
	assert!(phone.join("notes.txt").exists());
	assert!(!phone.join("01_old.png").exists());
}

#[test]
fn config_file_in_working_directory_is_picked_up() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("storeshot.json"), r#"{ "device": "Pixel_9" }"#).unwrap();

	let (json, success) = run_in(dir.path(), &["clean"]);

	assert!(!success);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(json["error"]["message"].as_str().unwrap().contains("Pixel_9"));
}

#[test]
fn malformed_config_is_a_config_error() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

	let (json, success) = run_in(dir.path(), &["list", "--config", "broken.json"]);

	assert!(!success);
	assert_eq!(json["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn unknown_shot_number_fails_before_connecting() {
	let dir = tempfile::tempdir().unwrap();

	let (json, success) = run_in(dir.path(), &["run", "--only", "3,42", "--server", "http://127.0.0.1:1"]);

	assert!(!success);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(json["error"]["message"].as_str().unwrap().contains("42"));
}

#[test]
fn unreachable_server_is_a_session_error() {
	let dir = tempfile::tempdir().unwrap();

	let (json, success) = run_in(dir.path(), &["guard", "--server", "http://127.0.0.1:1"]);

	assert!(!success);
	assert_eq!(json["command"], "guard");
	assert_eq!(json["error"]["code"], "SESSION_ERROR");
}

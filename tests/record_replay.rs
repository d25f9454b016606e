//! Record a live session, then replay it without a terminal.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use phonegen::cassette::recorder::CassetteRecorder;
use phonegen::commands::generate::{run_with_context, RunOptions, RunOutcome};
use phonegen::context::ServiceContext;
use phonegen::interaction::Presets;
use phonegen::phone::OutputSink;
use serde_json::json;

fn phonegen(args: &[&str], env: (&str, &Path), stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_phonegen"))
        .args(args)
        .env_remove("PHONEGEN_RECORD")
        .env_remove("PHONEGEN_REPLAY")
        .env(env.0, env.1)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn phonegen");
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().expect("failed to wait for phonegen")
}

fn assert_success(output: &Output) {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn recorded_session_replays_to_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("numbers.txt");
    let cassettes = dir.path().join("cassettes");

    let answers = format!("999\n1\n07\n2\n{}\n", target.display());
    let recorded = phonegen(&[], ("PHONEGEN_RECORD", &cassettes), &answers);
    assert_success(&recorded);
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to:"));
    let first = std::fs::read_to_string(&target).unwrap();
    std::fs::remove_file(&target).unwrap();

    let prompt_cassette = cassettes.join("prompt.cassette.yaml");
    let yaml = std::fs::read_to_string(&prompt_cassette).unwrap();
    assert!(yaml.contains("Enter the first 3 known digits:"));
    assert!(yaml.contains("Save to a file"));
    let clock_yaml = std::fs::read_to_string(cassettes.join("clock.cassette.yaml")).unwrap();
    assert_eq!(clock_yaml.matches("method: now").count(), 101);

    // Replay needs no stdin at all, and the progress bar stays on
    let replayed = phonegen(&[], ("PHONEGEN_REPLAY", &cassettes), "");
    assert_success(&replayed);
    let second = std::fs::read_to_string(&target).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.lines().next(), Some("9990000007"));
    assert_eq!(second.lines().count(), 100_000);
}

#[test]
fn prompt_cassette_alone_replays_with_progress_on() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("numbers.txt");
    let cassettes = dir.path().join("cassettes");

    let answers = format!("123\n45\n2\n{}\n", target.display());
    assert_success(&phonegen(&["--no-progress"], ("PHONEGEN_RECORD", &cassettes), &answers));
    std::fs::remove_file(&target).unwrap();

    // The clock was never read while recording; replay must not need it
    let prompts = cassettes.join("prompt.cassette.yaml");
    assert_success(&phonegen(&[], ("PHONEGEN_REPLAY", &prompts), ""));
    std::fs::remove_file(&target).unwrap();
    assert_success(&phonegen(&[], ("PHONEGEN_REPLAY", &cassettes), ""));

    let content = std::fs::read_to_string(&target).unwrap();
    assert_eq!(content.lines().next(), Some("1230000045"));
    assert_eq!(content.lines().count(), 100_000);
}

#[test]
fn replay_directory_without_cassettes_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = phonegen(&[], ("PHONEGEN_REPLAY", dir.path()), "");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "{stderr}");
    assert!(stderr.contains("prompt.cassette.yaml"));
}

#[test]
fn hand_written_cassette_drives_a_file_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.cassette.yaml");
    let target = dir.path().join("out.txt");
    let mut recorder = CassetteRecorder::new(&path, "hand-written", "test");
    recorder.record("prompt", "text", json!({}), json!({"Ok": "123"}));
    recorder.record("prompt", "text", json!({}), json!({"Ok": "4"}));
    recorder.record("prompt", "text", json!({}), json!({"Ok": "45"}));
    recorder.record("prompt", "select", json!({}), json!({"Ok": "Save to a file"}));
    recorder.record("prompt", "text", json!({}), json!({"Ok": target.display().to_string()}));
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(&path).unwrap();
    let mut out = Vec::new();
    let outcome =
        run_with_context(&ctx, &mut out, &Presets::default(), RunOptions { progress: false })
            .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed { sink: OutputSink::File(target.clone()), count: 100_000 }
    );
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(">> Input must be exactly 2 digits long."));
    assert!(text.contains("Successfully saved 100,000 combinations"));
    assert_eq!(std::fs::read_to_string(&target).unwrap().lines().count(), 100_000);
}

#[test]
fn cancelled_answer_in_cassette_cancels_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cancel.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&path, "cancel", "test");
    recorder.record("prompt", "text", json!({}), json!({"Ok": null}));
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(&path).unwrap();
    let outcome = run_with_context(
        &ctx,
        &mut Vec::<u8>::new(),
        &Presets::default(),
        RunOptions { progress: false },
    )
    .unwrap();

    assert_eq!(outcome, RunOutcome::Cancelled);
}

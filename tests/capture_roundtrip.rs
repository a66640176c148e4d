//! Library-level tests for the capture step, without the HTTP layer.

use scanbridge::{capture::run_capture, CaptureConfig, CaptureMode, OutputFormat};

fn simulated_config(dir: &tempfile::TempDir, bytes: &[u8]) -> CaptureConfig {
    let source = dir.path().join("source.png");
    std::fs::write(&source, bytes).expect("write fixture");
    CaptureConfig {
        mode: CaptureMode::Simulated,
        format: OutputFormat::Png,
        simulated_source: source,
        ..CaptureConfig::default()
    }
}

#[tokio::test]
async fn stored_artifact_matches_capture_output() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = simulated_config(&dir, b"png-ish payload");

    let artifact = run_capture(&cfg, dir.path()).await.unwrap();
    assert_eq!(artifact.path, dir.path().join(&artifact.filename));

    let stored = std::fs::read(&artifact.path).unwrap();
    assert_eq!(stored, b"png-ish payload");
}

#[tokio::test]
async fn repeated_captures_within_a_second_are_permitted() {
    // Same-second captures may collide on the timestamped name; the later
    // write wins and both calls succeed.
    let dir = tempfile::tempdir().unwrap();
    let cfg = simulated_config(&dir, b"payload");

    let first = run_capture(&cfg, dir.path()).await.unwrap();
    let second = run_capture(&cfg, dir.path()).await.unwrap();

    assert!(first.path.exists());
    assert!(second.path.exists());
}

#[tokio::test]
async fn each_capture_produces_a_fresh_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = simulated_config(&dir, b"payload");

    let artifact = run_capture(&cfg, dir.path()).await.unwrap();

    // Trigger is repeatable; artifacts are never mutated after creation
    let before = std::fs::read(&artifact.path).unwrap();
    let _ = run_capture(&cfg, dir.path()).await.unwrap();
    let after = std::fs::read(&artifact.path).unwrap();
    assert_eq!(before, after);
}

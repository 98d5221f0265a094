use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::Path;
use std::process::Command; // Run programs
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn sample_text() -> Vec<u8> {
    "The quick brown fox jumps over the lazy dog.\n"
        .repeat(500)
        .into_bytes()
}

fn write_sample(dir: &Path, name: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(name);
    std::fs::write(&path, sample_text())?;
    Ok(path)
}

fn file_round_trip(backend: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_sample(temp_dir.path(), "fox.txt")?;
    let bwz_path = temp_dir.path().join("fox.txt.bwz");

    Command::cargo_bin("bwz")?
        .arg("--backend")
        .arg(backend)
        .arg(&in_path)
        .assert()
        .success();
    assert!(!in_path.exists());
    assert!(bwz_path.exists());
    assert!(std::fs::read(&bwz_path)?.len() < sample_text().len());

    Command::cargo_bin("bwz")?
        .arg("-d")
        .arg(&bwz_path)
        .assert()
        .success();
    assert!(!bwz_path.exists());
    assert_eq!(std::fs::read(&in_path)?, sample_text());
    Ok(())
}

#[test]
fn huffman_file_round_trip() -> STDRESULT {
    file_round_trip("huffman")
}

#[test]
fn arith_file_round_trip() -> STDRESULT {
    file_round_trip("arith")
}

#[test]
fn stdout_and_stdin_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_sample(temp_dir.path(), "fox.txt")?;

    let compressed = Command::cargo_bin("bwz")?
        .arg("-c")
        .arg("--backend")
        .arg("huffman")
        .arg(&in_path)
        .output()?;
    assert!(compressed.status.success());
    assert_eq!(&compressed.stdout[..5], b"BWZh9");
    // -c leaves the input alone
    assert!(in_path.exists());

    // write_stdin lives on assert_cmd's own Command
    let restored = assert_cmd::Command::cargo_bin("bwz")?
        .arg("-d")
        .write_stdin(compressed.stdout)
        .output()?;
    assert!(restored.status.success());
    assert_eq!(restored.stdout, sample_text());
    Ok(())
}

#[test]
fn keep_and_force() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_sample(temp_dir.path(), "fox.txt")?;

    Command::cargo_bin("bwz")?
        .arg("-k")
        .arg("--fast")
        .arg(&in_path)
        .assert()
        .success();
    assert!(in_path.exists());

    Command::cargo_bin("bwz")?
        .arg("-k")
        .arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    Command::cargo_bin("bwz")?
        .arg("-kf")
        .arg(&in_path)
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_mode_rejects_garbage() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_sample(temp_dir.path(), "fox.txt")?;

    Command::cargo_bin("bwz")?
        .arg("-t")
        .arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a bwz stream"));
    // -t never removes anything
    assert!(in_path.exists());
    Ok(())
}

#[test]
fn verbose_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = write_sample(temp_dir.path(), "fox.txt")?;

    let compressed = Command::cargo_bin("bwz")?
        .arg("-k")
        .arg("-c")
        .arg("-vv")
        .arg(&in_path)
        .output()?;
    assert!(compressed.status.success());
    // release builds compile info! out
    if cfg!(debug_assertions) {
        assert!(String::from_utf8_lossy(&compressed.stderr).contains("Initialization Start"));
    }

    let restored = assert_cmd::Command::cargo_bin("bwz")?
        .arg("-d")
        .arg("-vvvv")
        .write_stdin(compressed.stdout)
        .output()?;
    assert!(restored.status.success());
    assert_eq!(restored.stdout, sample_text());
    Ok(())
}

use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::cargo_bin("uci-supervisor").unwrap()
}

#[test]
fn help_lists_flags() {
    let output = bin().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--config", "--engine", "--option", "--skill-level", "--elo", "--fen"] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
}

#[test]
fn engine_or_config_is_required() {
    let output = bin().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("either --config or --engine is required"), "{stderr}");
}

#[test]
fn bad_option_fails_before_engine_start() {
    let output = bin()
        .args(["--engine", "/nonexistent/stockfish", "--option", "Bogus=1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid --option 'Bogus=1'"), "{stderr}");
    assert!(!stderr.contains("spawn"), "{stderr}");

    let output = bin()
        .args(["--engine", "/nonexistent/stockfish", "--option", "Threads=lots"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn missing_engine_binary_is_reported() {
    let output = bin().args(["--engine", "/nonexistent/stockfish"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start engine session"), "{stderr}");
}

#[test]
fn config_with_unknown_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    fs::write(&path, "[engine]\npath = \"stockfish\"\nhash = 64\n").unwrap();

    let output = bin().arg("--config").arg(&path).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "{stderr}");
}

#[cfg(unix)]
const ENGINE: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "id name Stockfish 16"; echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
  esac
done
"#;

#[cfg(unix)]
#[test]
fn prints_applied_options_as_json() {
    let output = bin()
        .args(["--engine", "sh", "--engine-arg", "-c", "--engine-arg", ENGINE])
        .args(["--option", "Threads=2", "--option", "Ponder=true", "--elo", "1800"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["Threads"], 2);
    assert_eq!(json["Hash"], 16);
    assert_eq!(json["Ponder"], true);
    assert_eq!(json["UCI_Elo"], 1800);
    assert_eq!(json["UCI_LimitStrength"], true);
    assert_eq!(json["Debug Log File"], "");
}

#[cfg(unix)]
#[test]
fn config_elo_alone_enables_limit_strength() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    let config = format!(
        "[engine]\npath = \"sh\"\nargs = [\"-c\", '''{ENGINE}''']\n\n[options]\nUCI_Elo = 2000\n"
    );
    fs::write(&path, config).unwrap();

    let output = bin().arg("--config").arg(&path).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["UCI_Elo"], 2000);
    assert_eq!(json["UCI_LimitStrength"], true);
}

use std::fs;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

fn resolve_bin_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_rrh") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) { "rrh.exe" } else { "rrh" };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve rrh binary path for integration test"),
    }
}

pub fn run_cli(args: &[&str]) -> CmdResult {
    let output = Command::new(resolve_bin_path())
        .args(args)
        .env("RUST_BACKTRACE", "1")
        .output()
        .expect("execute rrh command");

    CmdResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Write a config file pointing the harness at scratch copies of its
/// external files, and return its path.
pub fn write_config(
    dir: &std::path::Path,
    golden_file: &std::path::Path,
    demo_source: &std::path::Path,
) -> PathBuf {
    let path = dir.join("rrh.toml");
    let body = format!(
        "[paths]\ngolden_file = {:?}\ndemo_source = {:?}\n",
        golden_file.display().to_string(),
        demo_source.display().to_string(),
    );
    fs::write(&path, body).expect("write test config");
    path
}

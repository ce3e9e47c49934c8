use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// An empty repository created through the binary
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_grit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grit").expect("Failed to find grit binary");
    cmd.current_dir(dir).args(args).env_remove("RUST_LOG");
    cmd
}

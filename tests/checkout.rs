use crate::common::command::{init_repository_dir, run_grit_command};
use crate::common::object::{write_branch, write_commit, write_object, write_tree};
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use grit::artifacts::objects::object_type::ObjectType;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn checkout_branch_into_new_directory(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let contents = (0..3)
        .map(|_| Words(3..8).fake::<Vec<String>>().join(" "))
        .collect::<Vec<_>>();

    let one = write_object(dir, ObjectType::Blob, contents[0].as_bytes());
    let two = write_object(dir, ObjectType::Blob, contents[1].as_bytes());
    let three = write_object(dir, ObjectType::Blob, contents[2].as_bytes());
    let b = write_tree(dir, &[("100644", "3.txt", &three)]);
    let a = write_tree(dir, &[("100644", "2.txt", &two), ("40000", "b", &b)]);
    let root = write_tree(dir, &[("100644", "1.txt", &one), ("40000", "a", &a)]);
    let commit = write_commit(dir, &root, "Initial commit");
    write_branch(dir, "master", &commit);

    run_grit_command(dir, &["checkout", "master", "out"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "Checked out {}",
            commit.to_short_oid()
        )));

    let out = dir.join("out");
    pretty_assertions::assert_eq!(std::fs::read_to_string(out.join("1.txt"))?, contents[0]);
    pretty_assertions::assert_eq!(std::fs::read_to_string(out.join("a/2.txt"))?, contents[1]);
    pretty_assertions::assert_eq!(std::fs::read_to_string(out.join("a/b/3.txt"))?, contents[2]);

    run_grit_command(dir, &["checkout", "master", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path already exists"));

    Ok(())
}

#[rstest]
fn checkout_blob_is_rejected(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let blob = write_object(dir, ObjectType::Blob, b"just a file");

    run_grit_command(dir, &["checkout", blob.as_ref(), "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a blob, expected a commit"));

    assert!(!dir.join("out").exists());

    Ok(())
}

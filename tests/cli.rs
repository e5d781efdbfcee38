//! End-to-end tests that drive the compiled binary over stdin, with the
//! store pointed at `memory:///` so no network is involved.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

/// Helper to write a throwaway service account key file.
fn key_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp key file");
    write!(file, "{{\"type\": \"service_account\"}}").expect("Failed to write temp key file");
    file
}

/// Base command: account + key positionals, clean environment, in-memory store.
fn demo_command(key: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("blobstore-demo").expect("Failed to find binary");
    cmd.arg("demo-account@example.com")
        .arg(key.path())
        .env_remove("RUST_LOG")
        .env_remove("BLOBSTORE_DEMO_STORE_URL")
        .env_remove("BLOBSTORE_DEMO_CONTAINER_PREFIX")
        .env_remove("BLOBSTORE_DEMO_BLOB_PREFIX")
        .env_remove("BLOBSTORE_DEMO_PAYLOAD")
        .env_remove("BLOBSTORE_DEMO_CONTENT_TYPE")
        .env_remove("BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE")
        .env_remove("BLOBSTORE_DEMO_MULTIPART_PART_SIZE")
        .env_remove("BLOBSTORE_DEMO_KEEP_MULTIPART_ARTIFACTS")
        .env("BLOBSTORE_DEMO_STORE_URL", "memory:///");
    cmd
}

/// A missing key file must fail fast, before any store work.
#[test]
fn missing_key_file_exits_with_code_one() {
    let mut cmd = Command::cargo_bin("blobstore-demo").expect("Failed to find binary");
    cmd.arg("demo-account@example.com")
        .arg("/definitely/not/a/key.json")
        .env_remove("RUST_LOG")
        .env("BLOBSTORE_DEMO_STORE_URL", "memory:///")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Cannot open service account private key file: /definitely/not/a/key.json",
        ));
}

/// Selecting 9 prints the menu exactly once and exits cleanly.
#[test]
fn exit_selection_stops_the_loop() {
    let key = key_file();
    demo_command(&key)
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Object storage demo").count(1))
        .stdout(predicate::str::contains("Choose an option: "));
}

/// Closing stdin without a selection also exits cleanly.
#[test]
fn closed_stdin_exits_cleanly() {
    let key = key_file();
    demo_command(&key).write_stdin("").assert().success();
}

/// Every input outside the menu, numeric or not, gets the same reply.
#[test]
fn out_of_menu_input_prints_not_a_valid_option() {
    let key = key_file();
    demo_command(&key)
        .write_stdin("x\n7\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a valid option").count(2));
}

/// Options 4 and 5 both hit the provider stub.
#[test]
fn provider_options_print_the_stub_message() {
    let key = key_file();
    demo_command(&key)
        .write_stdin("4\n5\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not implemented yet").count(2));
}

/// The round trip stores "data" and prints the exact payload back.
#[test]
fn blob_round_trip_prints_the_stored_payload() {
    let key = key_file();
    demo_command(&key)
        .write_stdin("2\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Object etag is: "))
        .stdout(predicate::str::contains("The retrieved payload is: data"))
        .stdout(predicate::str::contains("Deleting the blob and the container"))
        .stdout(predicate::str::contains("Deleted!"));
}

/// Multipart honors the configured sizes and cleans up by default.
#[test]
fn multipart_upload_reports_completion_and_cleans_up() {
    let key = key_file();
    demo_command(&key)
        .env("BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE", "131072")
        .env("BLOBSTORE_DEMO_MULTIPART_PART_SIZE", "32768")
        .write_stdin("3\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Uploading 131072 bytes in parts of 32768 bytes",
        ))
        .stdout(predicate::str::contains("Multipart upload complete, etag is: "))
        .stdout(predicate::str::contains("Deleted!"));
}

/// With no size overrides the full 33 MiB default payload is uploaded.
#[test]
fn multipart_defaults_to_the_33_mib_payload() {
    let key = key_file();
    demo_command(&key)
        .write_stdin("3\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Uploading 34603008 bytes in parts of 8388608 bytes",
        ))
        .stdout(predicate::str::contains("Deleted!"));
}

/// --keep-multipart-artifacts preserves the container and says so.
#[test]
fn keep_flag_leaves_the_multipart_container_in_place() {
    let key = key_file();
    demo_command(&key)
        .arg("--keep-multipart-artifacts")
        .env("BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE", "65536")
        .env("BLOBSTORE_DEMO_MULTIPART_PART_SIZE", "32768")
        .write_stdin("3\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leaving container "))
        .stdout(predicate::str::contains("Deleted!").not());
}

/// The create/delete demo also works against a local filesystem store.
#[test]
fn container_demo_works_against_a_local_store() {
    let key = key_file();
    let store_dir = tempfile::tempdir().expect("Failed to create store dir");
    demo_command(&key)
        .env(
            "BLOBSTORE_DEMO_STORE_URL",
            format!("file://{}", store_dir.path().display()),
        )
        .write_stdin("1\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating container demo-container-"))
        .stdout(predicate::str::contains("Deleted!"));
}

/// An unparseable store URL is a startup error, reported on stderr.
#[test]
fn unparseable_store_url_is_a_startup_error() {
    let key = key_file();
    demo_command(&key)
        .env("BLOBSTORE_DEMO_STORE_URL", "not a url")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid store URL"));
}

/// A size too large to represent is a startup error, not a wrapped
/// payload.
#[test]
fn oversized_multipart_size_is_a_startup_error() {
    let key = key_file();
    demo_command(&key)
        .env("BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE", "18446744073709551616")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE",
        ));
}

use assert_cmd::Command;

#[test]
fn openapi_prints_every_catalog_path() {
    let output = Command::cargo_bin("catalog-cli")
        .unwrap()
        .args(["openapi", "--compact"])
        .env("CATALOG_ENV", "local")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for path in [
        "/authors",
        "/authors/{id}",
        "/genres",
        "/books/{id}",
        "/book-copies",
        "/book-copies/{id}",
    ] {
        assert!(document["paths"][path].is_object(), "missing {path}");
    }
    assert!(document["components"]["schemas"]["BookCopy"].is_object());
}

#[test]
fn unknown_environment_fails_startup() {
    Command::cargo_bin("catalog-cli")
        .unwrap()
        .arg("openapi")
        .env("CATALOG_ENV", "moon")
        .assert()
        .failure();
}

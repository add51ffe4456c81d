use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dog(id: &str, name: &str, breed: &str) -> Value {
    json!({
        "id": id,
        "img": format!("https://img.example/{id}.jpg"),
        "name": name,
        "age": 3,
        "zip_code": "10001",
        "breed": breed,
    })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"name": "Ada Lovelace", "email": "ada@example.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "fetch-access-token=tok123; Path=/; HttpOnly")
                .set_body_string("OK"),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Beagle", "Poodle"])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param_is_missing("breeds"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"resultIds": ["b1"], "total": 1})),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dogs/"))
        .and(body_json(json!(["b1"])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([dog("b1", "Snoopy", "Beagle")])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("breeds", "Poodle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"resultIds": ["p1"], "total": 1})),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dogs/"))
        .and(body_json(json!(["p1"])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([dog("p1", "Fifi", "Poodle")])),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_browse_logs_in_and_filters_by_breed() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("pawfind")
        .env("PAWFIND_HOME", home.path())
        .env("PAWFIND_API_BASE_URL", server.uri())
        .env_remove("PAWFIND_SESSION_TOKEN")
        .arg("browse")
        .write_stdin("login Ada Lovelace ada@example.com\nbreed poodle\nphoto 1\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log in with"))
        .stdout(predicate::str::contains("Welcome, Ada Lovelace!"))
        .stdout(predicate::str::contains("Snoopy"))
        .stdout(predicate::str::contains("Fifi"))
        .stdout(predicate::str::contains("Page 1 of 1 | 1 dogs | Poodle"))
        .stdout(predicate::str::contains("Photo of Fifi: https://img.example/p1.jpg"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[tokio::test]
async fn test_browse_shows_login_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("pawfind")
        .env("PAWFIND_HOME", home.path())
        .env("PAWFIND_API_BASE_URL", server.uri())
        .env_remove("PAWFIND_SESSION_TOKEN")
        .arg("browse")
        .write_stdin("login Ada ada@example.com\n:q\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Login failed. Please check your credentials.",
        ));
}

#[tokio::test]
async fn test_browse_requires_login_for_search_commands() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultIds": [], "total": 0})))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("pawfind")
        .env("PAWFIND_HOME", home.path())
        .env("PAWFIND_API_BASE_URL", server.uri())
        .env_remove("PAWFIND_SESSION_TOKEN")
        .arg("browse")
        .write_stdin("sort\nnext\n:q\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Log in to search for dogs."));
}

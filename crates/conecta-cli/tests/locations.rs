//! Location listing tests against a mock IBGE service.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_conecta_home() -> TempDir {
    TempDir::new().expect("create temp conecta home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn test_locations_lists_states() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/localidades/estados"))
        .and(query_param("orderBy", "nome"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 35, "sigla": "SP", "nome": "São Paulo"},
            {"id": 33, "sigla": "RJ", "nome": "Rio de Janeiro"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_IBGE_URL", server.uri())
        .env("CONECTA_BLOCK_REAL_API", "1")
        .args(["locations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SP"))
        .stdout(predicate::str::contains("São Paulo"))
        .stdout(predicate::str::contains("Rio de Janeiro"));
}

#[tokio::test]
async fn test_locations_lists_districts_of_a_state() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/localidades/estados/SP/distritos"))
        .and(query_param("orderBy", "nome"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 350010805, "nome": "Adamantina"},
            {"id": 350010905, "nome": "Adolfo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_IBGE_URL", server.uri())
        .env("CONECTA_BLOCK_REAL_API", "1")
        .args(["locations", "--uf", "SP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adamantina"))
        .stdout(predicate::str::contains("Adolfo"));
}

#[tokio::test]
async fn test_categories_lists_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categoria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "nome": "Eletrônicos", "tipo": "PRODUTO"},
            {"id": 5, "nome": "Aulas", "tipo": "SERVICO"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_API_URL", server.uri())
        .args(["categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eletrônicos"))
        .stdout(predicate::str::contains("PRODUTO"))
        .stdout(predicate::str::contains("Aulas"))
        .stdout(predicate::str::contains("SERVICO"));
}

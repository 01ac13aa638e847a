//! End-to-end session tests against a mock backend.
//!
//! Runs the real binary with `CONECTA_HOME` pointed at a temp directory and
//! `CONECTA_API_URL` at a wiremock server.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_conecta_home() -> TempDir {
    TempDir::new().expect("create temp conecta home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn test_login_stores_session_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logar"))
        .and(body_json(serde_json::json!({
            "username": "ana",
            "senha": "segredo123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok_cli_integration_12345"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_API_URL", server.uri())
        .args(["login", "--username", "ana", "--password", "segredo123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login realizado com sucesso."));

    let stored = std::fs::read_to_string(home.path().join("auth.json")).unwrap();
    assert!(stored.contains("tok_cli_integration_12345"));
}

#[tokio::test]
async fn test_login_failure_reports_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logar"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Credenciais inválidas"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_API_URL", server.uri())
        .args(["login", "--username", "ana", "--password", "errada"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Erro ao tentar fazer login."))
        .stderr(predicate::str::contains("Credenciais inválidas"));

    assert!(!home.path().join("auth.json").exists());
}

/// A 401 on an authenticated call clears the stored session and tells the
/// user how to start a new one.
#[tokio::test]
async fn test_expired_session_is_cleared_and_reported() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    std::fs::write(
        home.path().join("auth.json"),
        r#"{"token": "tok_expired"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/anuncio/meus-anuncios"))
        .and(header("authorization", "Bearer tok_expired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token inválido"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_API_URL", server.uri())
        .args(["mine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Erro 401: Token inválido ou expirado."))
        .stderr(predicate::str::contains("conecta login"));

    assert!(!home.path().join("auth.json").exists());
}

#[tokio::test]
async fn test_mine_lists_own_ads_with_status() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_conecta_home();
    let server = MockServer::start().await;

    std::fs::write(
        home.path().join("auth.json"),
        r#"{"token": "tok_seller"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/anuncio/meus-anuncios"))
        .and(header("authorization", "Bearer tok_seller"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 7,
                "titulo": "Bicicleta aro 29",
                "descricao": "Pouco usada",
                "preco": 1234.56,
                "localidade": "Campinas",
                "status": "Pendente",
                "imagens": []
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("conecta")
        .env("CONECTA_HOME", home.path())
        .env("CONECTA_API_URL", server.uri())
        .args(["mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Meus Anúncios (1)"))
        .stdout(predicate::str::contains("Bicicleta aro 29"))
        .stdout(predicate::str::contains("R$ 1.234,56"))
        .stdout(predicate::str::contains("Pendente"));
}

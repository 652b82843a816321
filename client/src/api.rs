use votacao_common::ErrorResponse;

/// Fixed text shown whenever a request never produced an HTTP response.
pub const CONNECTION_ERROR: &str = "Erro de conexão com o servidor.";

/// What a single API call can fail with. `Server` carries the `error` text
/// from the response body when there was one; the caller supplies the
/// per-action fallback.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("servidor respondeu {status}")]
    Server { status: u16, message: Option<String> },
    #[error("falha de conexão: {0}")]
    Connection(#[from] reqwest::Error),
}

impl ApiError {
    /// Message for the blocking alert: the server's own text when present,
    /// the per-action fallback otherwise, and the fixed connectivity text
    /// for transport failures.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { message: None, .. } => fallback.to_string(),
            ApiError::Connection(_) => CONNECTION_ERROR.to_string(),
        }
    }
}

/// Resolves a response under the shared policy: any 2xx counts as success,
/// anything else becomes `ApiError::Server` with the body's `error` text
/// when the body turns out to be JSON. Empty and non-JSON bodies are
/// tolerated.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|body| body.error),
        Err(_) => None,
    };

    Err(ApiError::Server { status, message })
}

/// Account endpoints.
pub mod auth {
    use votacao_common::{LoginRequest, LoginResponse, RegisterRequest};

    use super::{check_status, ApiError};

    pub async fn register(server_url: &str, nickname: &str, password: &str) -> Result<(), ApiError> {
        let request = RegisterRequest {
            nickname: nickname.to_string(),
            password: password.to_string(),
        };

        let client = reqwest::Client::new();
        let url = format!("{server_url}/register");

        let response = client.post(&url).json(&request).send().await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn login(
        server_url: &str,
        nickname: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            nickname: nickname.to_string(),
            password: password.to_string(),
        };

        let client = reqwest::Client::new();
        let url = format!("{server_url}/login");

        let response = client.post(&url).json(&request).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Player listing and mutation endpoints.
pub mod players {
    use votacao_common::{DeletePlayerRequest, Player, SetAdminRequest, VoteRequest};

    use super::{check_status, ApiError};

    pub async fn fetch(server_url: &str) -> Result<Vec<Player>, ApiError> {
        let client = reqwest::Client::new();
        let url = format!("{server_url}/players");

        let response = client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn vote(server_url: &str, request: &VoteRequest) -> Result<(), ApiError> {
        let client = reqwest::Client::new();
        let url = format!("{server_url}/vote");

        let response = client.post(&url).json(request).send().await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn delete(server_url: &str, player_id: i64, requester: &str) -> Result<(), ApiError> {
        let request = DeletePlayerRequest {
            requester: requester.to_string(),
        };

        let client = reqwest::Client::new();
        let url = format!("{server_url}/players/{player_id}");

        let response = client.delete(&url).json(&request).send().await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn set_admin(server_url: &str, request: &SetAdminRequest) -> Result<(), ApiError> {
        let client = reqwest::Client::new();
        let url = format!("{server_url}/set_admin");

        let response = client.post(&url).json(request).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use votacao_common::{SetAdminRequest, VoteRequest};

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Reads one full HTTP request: headers plus a content-length body.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data).into_owned();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Serves exactly one canned response and hands back what the client
    /// sent, so tests can assert on the wire format.
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            request
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn login_posts_credentials_and_parses_the_admin_flag() {
        let (url, handle) =
            serve_once(http_response("200 OK", r#"{"ok":true,"is_admin":true}"#)).await;

        let response = auth::login(&url, "ana", "secret").await.unwrap();
        assert!(response.is_admin);

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /login "));
        assert!(request.contains(r#""nickname":"ana""#));
        assert!(request.contains(r#""password":"secret""#));
    }

    #[tokio::test]
    async fn login_failure_surfaces_the_server_error_text() {
        let (url, handle) = serve_once(http_response(
            "400 BAD REQUEST",
            r#"{"error":"Apelido ou senha incorretos"}"#,
        ))
        .await;

        let err = auth::login(&url, "ana", "wrong").await.unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Apelido ou senha incorretos"));
            }
            other => panic!("expected a server error, got {other:?}"),
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_failure_body_leaves_no_message() {
        let (url, handle) =
            serve_once(http_response("502 BAD GATEWAY", "upstream fell over")).await;

        let err = auth::register(&url, "ana", "secret").await.unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, None);
            }
            other => panic!("expected a server error, got {other:?}"),
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn fetch_parses_the_player_listing() {
        let body = r#"[
            {"id":1,"name":"Ana","is_admin":true,"votes":4,"avg_score":7.25},
            {"id":2,"name":"Bob","is_admin":false,"votes":0,"avg_score":null}
        ]"#;
        let (url, handle) = serve_once(http_response("200 OK", body)).await;

        let players = players::fetch(&url).await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Ana");
        assert_eq!(players[0].avg_score, Some(7.25));
        assert_eq!(players[1].votes, 0);
        assert_eq!(players[1].avg_score, None);

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /players "));
    }

    #[tokio::test]
    async fn vote_posts_the_wire_body() {
        let (url, handle) =
            serve_once(http_response("200 OK", r#"{"ok":true,"updated":false}"#)).await;

        let request = VoteRequest {
            player_id: 2,
            score: 7.5,
            voter: "ana".to_string(),
        };
        players::vote(&url, &request).await.unwrap();

        let sent = handle.await.unwrap();
        assert!(sent.starts_with("POST /vote "));
        assert!(sent.contains(r#""player_id":2"#));
        assert!(sent.contains(r#""score":7.5"#));
        assert!(sent.contains(r#""voter":"ana""#));
    }

    #[tokio::test]
    async fn delete_targets_the_player_path_with_the_requester_body() {
        let (url, handle) = serve_once(http_response("200 OK", r#"{"ok":true}"#)).await;

        players::delete(&url, 7, "ana").await.unwrap();

        let sent = handle.await.unwrap();
        assert!(sent.starts_with("DELETE /players/7 "));
        assert!(sent.contains(r#""requester":"ana""#));
    }

    #[tokio::test]
    async fn set_admin_posts_the_requested_direction() {
        let (url, handle) = serve_once(http_response("200 OK", r#"{"ok":true}"#)).await;

        let request = SetAdminRequest {
            requester: "ana".to_string(),
            target: "bob".to_string(),
            is_admin: true,
        };
        players::set_admin(&url, &request).await.unwrap();

        let sent = handle.await.unwrap();
        assert!(sent.starts_with("POST /set_admin "));
        assert!(sent.contains(r#""requester":"ana""#));
        assert!(sent.contains(r#""target":"bob""#));
        assert!(sent.contains(r#""is_admin":true"#));
    }

    #[tokio::test]
    async fn refused_connection_maps_to_the_connectivity_message() {
        // Bind and drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = players::fetch(&format!("http://{addr}")).await.unwrap_err();
        assert!(matches!(err, ApiError::Connection(_)));
        assert_eq!(
            err.alert_message("Erro ao carregar jogadores."),
            CONNECTION_ERROR
        );
    }

    #[test]
    fn alert_message_prefers_server_text_over_the_fallback() {
        let with_text = ApiError::Server {
            status: 400,
            message: Some("cannot delete last admin".to_string()),
        };
        assert_eq!(
            with_text.alert_message("Erro ao excluir conta."),
            "cannot delete last admin"
        );

        let without_text = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(without_text.alert_message("Erro ao votar."), "Erro ao votar.");
    }
}

use school_qa::llm::{ChatMessage, LanguageModel, LlmClient};
use school_qa::QaError;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Request line and JSON body seen by the fake Ollama server
struct CapturedRequest {
    request_line: String,
    body: Value,
}

/// Serve exactly one HTTP request with the given status and body
async fn serve_once(status: &'static str, reply: String) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = headers
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

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
        }

        let body = serde_json::from_slice(&buf[header_end..header_end + content_length]).unwrap_or(Value::Null);
        let request_line = headers.lines().next().unwrap_or_default().to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reply.len(),
            reply
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(CapturedRequest { request_line, body });
    });

    (format!("http://{}", addr), rx)
}

#[tokio::test]
async fn test_chat_reply_is_extracted() -> Result<(), Box<dyn std::error::Error>> {
    let reply = r#"{"model":"llama3","message":{"role":"assistant","content":"  SELECT COUNT(*) FROM students;\n"},"done":true}"#;
    let (base_url, captured) = serve_once("200 OK", reply.to_string()).await;

    // Trailing slash must not produce a double slash in the path
    let client = LlmClient::new("llama3".to_string(), format!("{}/", base_url));
    let text = client
        .complete(&[
            ChatMessage::system("You are an expert SQL assistant."),
            ChatMessage::user("How many students are there?"),
        ])
        .await?;

    assert_eq!(text, "SELECT COUNT(*) FROM students;");

    let request = captured.await?;
    assert!(request.request_line.starts_with("POST /api/chat "));
    assert_eq!(request.body["model"], "llama3");
    assert_eq!(request.body["stream"], false);
    assert_eq!(request.body["messages"][0]["role"], "system");
    assert_eq!(request.body["messages"][1]["role"], "user");
    assert_eq!(request.body["messages"][1]["content"], "How many students are there?");

    Ok(())
}

#[tokio::test]
async fn test_generate_style_reply_is_accepted() {
    let (base_url, _captured) = serve_once("200 OK", r#"{"response":"There are 40 students."}"#.to_string()).await;

    let client = LlmClient::new("llama3".to_string(), base_url);
    let text = client.complete(&[ChatMessage::user("hi")]).await.unwrap();
    assert_eq!(text, "There are 40 students.");
}

#[tokio::test]
async fn test_server_error_becomes_llm_error() {
    let (base_url, _captured) =
        serve_once("500 Internal Server Error", r#"{"error":"model not found"}"#.to_string()).await;

    let client = LlmClient::new("missing-model".to_string(), base_url);
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    match err {
        QaError::Llm(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("model not found"));
        }
        other => panic!("expected an LLM error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_becomes_llm_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = LlmClient::new("llama3".to_string(), format!("http://{}", addr));
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
    assert!(matches!(err, QaError::Llm(_)));
}

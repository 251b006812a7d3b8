//! The `tiny_http` listener on a real socket.

mod support;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rota_server::HttpServer;
use support::{Harness, Setup};

struct Running {
    base: String,
    stop: tokio::sync::oneshot::Sender<()>,
    task: tokio::task::JoinHandle<Result<(), rota_server::ServerError>>,
}

fn spawn_server(h: &Harness) -> Running {
    let server = HttpServer::bind("127.0.0.1:0", Arc::clone(&h.app)).expect("bind");
    let addr = server.local_addr().expect("ip listener");
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    let task = tokio::spawn(server.run_until(async {
        let _ = stopped.await;
    }));
    Running {
        base: format!("http://{addr}"),
        stop,
        task,
    }
}

async fn wait_until_ready(client: &reqwest::Client, base: &str) {
    for _ in 0..100 {
        let status: serde_json::Value = client
            .get(format!("{base}/check-status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if status["ready"] == serde_json::Value::Bool(true) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server never became ready");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn setup_and_analysis_over_http() {
    let h = Harness::new(Setup::default());
    let running = spawn_server(&h);
    let client = reqwest::Client::new();

    let index = client.get(&running.base).send().await.unwrap();
    assert_eq!(index.status(), 200);
    let content_type = index.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(index.text().await.unwrap().contains("id=\"loading\""));

    let started = client
        .get(format!("{}/start-setup", running.base))
        .send()
        .await
        .unwrap();
    assert_eq!(started.text().await.unwrap(), "Started");
    wait_until_ready(&client, &running.base).await;

    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(b"name,date,shift\nAna Lima,2024-01-01,morning\n".to_vec())
                .file_name("roster.csv"),
        )
        .text("date", "2024-01-01")
        .text("shift", "morning");
    let reply = client
        .post(format!("{}/analyze", running.base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(reply.status(), 200);
    assert!(reply.text().await.unwrap().contains("Ana Lima"));
    assert!(h.uploads_dir.join("roster.csv").is_file());

    running.stop.send(()).unwrap();
    running.task.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_path_is_404() {
    let h = Harness::new(Setup::default());
    let running = spawn_server(&h);

    let reply = reqwest::get(format!("{}/missing", running.base)).await.unwrap();
    assert_eq!(reply.status(), 404);

    running.stop.send(()).unwrap();
    running.task.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn head_gets_headers_without_body() {
    let h = Harness::new(Setup::default());
    let running = spawn_server(&h);

    let reply = reqwest::Client::new()
        .head(format!("{}/check-status", running.base))
        .send()
        .await
        .unwrap();
    assert_eq!(reply.status(), 200);
    assert_eq!(reply.headers()["content-type"], "application/json");
    assert!(reply.text().await.unwrap().is_empty());

    running.stop.send(()).unwrap();
    running.task.await.unwrap().unwrap();
}

#[test]
fn bind_failure_names_the_address() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();
    let h = Harness::new(Setup::default());

    let error = HttpServer::bind("256.0.0.1:80", Arc::clone(&h.app))
        .err()
        .expect("invalid address");
    assert!(error.to_string().contains("256.0.0.1:80"));
}

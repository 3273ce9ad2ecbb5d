//! Runs the client against a gateway served on an ephemeral port.

use reqwest::Url;
use std::net::SocketAddr;
use std::sync::Mutex;
use tinylink_client::{interactive, TinylinkClient};
use tinylink_core::ShortCode;
use tinylink_gateway::{App, AppState};
use tinylink_generator::HashGenerator;
use tinylink_shortener::ShortenerService;
use tinylink_storage::Store;
use tokio::net::TcpListener;

async fn spawn_gateway() -> SocketAddr {
    let service = ShortenerService::new(Store::in_memory(), HashGenerator::new());
    let router = App::router(AppState::new(service));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

async fn client() -> TinylinkClient {
    let addr = spawn_gateway().await;
    TinylinkClient::new(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn shorten_then_expand() {
    let client = client().await;

    let code = client.shorten("http://example.com").await.unwrap();
    assert_eq!(code.as_str(), "1d22d4");

    let url = client.expand(&code).await.unwrap();
    assert_eq!(url.as_deref(), Some("http://example.com"));
}

#[tokio::test]
async fn expand_unknown_code() {
    let client = client().await;

    let url = client.expand(&ShortCode::new("nope")).await.unwrap();
    assert!(url.is_none());
}

#[tokio::test]
async fn urls_with_reserved_characters_survive_the_form() {
    let client = client().await;
    let original = "https://example.com/search?q=a&b=c d#frag";

    let code = client.shorten(original).await.unwrap();
    let url = client.expand(&code).await.unwrap();

    assert_eq!(url.as_deref(), Some(original));
}

#[tokio::test]
async fn empty_url_is_an_error() {
    let client = client().await;

    let err = client.shorten("").await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
}

#[tokio::test]
async fn interactive_session() {
    let client = client().await;
    let base = client.base_url().clone();

    let opened = Mutex::new(Vec::<Url>::new());
    let input = format!(
        "1\nhttp://example.com\n3\n{base}getFullURL/1d22d4\n3\nnope\n2\n{base}1d22d4\n9\n0\n"
    );
    let mut output = Vec::new();

    interactive::run(&client, input.as_bytes(), &mut output, |url| {
        opened.lock().unwrap().push(url.clone());
        Ok(())
    })
    .await
    .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains(&format!("Short URL: {base}getFullURL/1d22d4")), "{output}");
    assert!(output.contains("Full URL: http://example.com"), "{output}");
    assert!(output.contains("Error: short URL not found"), "{output}");
    assert!(output.contains("Invalid choice."), "{output}");

    let opened = opened.into_inner().unwrap();
    assert_eq!(opened, vec![base.join("1d22d4").unwrap()]);
}

#[tokio::test]
async fn interactive_session_ends_with_input() {
    let client = client().await;
    let mut output = Vec::new();

    interactive::run(&client, "1\n".as_bytes(), &mut output, |_| Ok(()))
        .await
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.ends_with("URL to shorten: "), "{output}");
}

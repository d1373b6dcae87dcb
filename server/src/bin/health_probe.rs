//! Container health check for the board server.
//!
//! Calls `GET /health` once and exits 0 only when the server answers 200
//! with `"status": "ok"`. Reads `HTTP_PORT_API` (default 8081) and `HOST`
//! (default localhost).

use ::std::process::exit;
use ::std::time::Duration;

async fn probe(url: &str) -> ::anyhow::Result<()> {
    let client = ::reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()?;

    let response = client.get(url).send().await?;

    let status = response.status();

    if !status.is_success() {
        ::anyhow::bail!("unhealthy: {}", status);
    }

    let body: ::serde_json::Value = response.json().await?;

    if body["status"] != "ok" {
        ::anyhow::bail!("unhealthy: {}", body);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let port = ::std::env::var("HTTP_PORT_API").unwrap_or_else(|_| "8081".into());
    let host = ::std::env::var("HOST").unwrap_or_else(|_| "localhost".into());

    let url = format!("http://{}:{}/health", host, port);

    match probe(&url).await {
        Ok(()) => {
            println!("healthy");
            exit(0);
        }
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    }
}

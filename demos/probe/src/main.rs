//! Probe
//!
//! Sends one request through a fully decorated trip client and prints the
//! outcome. Usage: `probe [METHOD] URL`, with an optional `PROBE_TOKEN`
//! environment variable for bearer authentication.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::time::Duration;

use trip::middleware::RETRYABLE_STATUS_CODES;
use trip::prelude::*;

const ATTEMPTS: u32 = 3;
const DELAY: Duration = Duration::from_millis(200);

// ============================================================================
// Client
// ============================================================================

/// Build the probe client.
///
/// The logger comes first so a call logs once whatever the retry count; the
/// idempotency key sits outside the retry so attempts share it.
fn build_client(token: Option<&str>) -> trip::Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(10))
        .with_logger(|line| eprintln!("{line}"))
        .with_user_agent(concat!("trip-probe/", env!("CARGO_PKG_VERSION")));

    if let Some(token) = token {
        builder = builder.with_bearer_token(token);
    }

    Ok(builder
        .with_idempotency_key()
        .with_retry(ATTEMPTS, DELAY, RETRYABLE_STATUS_CODES)?
        .build())
}

/// Send `method url` and return the status line and body.
async fn probe(client: &Client, method: Method, url: &str) -> trip::Result<(String, String)> {
    let url = trip::url::Url::parse(url)?;
    let request = Request::builder(method, url).build();
    let response = client.send(request).await?;
    let status = response.status_text();
    let body = response.text().await?;
    Ok((status, body))
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> trip::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (method, url) = match args.as_slice() {
        [url] => (Method::Get, url.as_str()),
        [method, url] => (method.parse::<Method>()?, url.as_str()),
        _ => {
            eprintln!("usage: probe [METHOD] URL");
            std::process::exit(2);
        }
    };

    let token = std::env::var("PROBE_TOKEN").ok();
    let client = build_client(token.as_deref())?;

    let (status, body) = probe(&client, method, url).await?;
    println!("{status}");
    println!("{body}");

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================

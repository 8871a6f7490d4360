use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "feed-cli")]
#[command(about = "Command-line client for the reactive feed service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the static hero
    Hero,
    /// List restaurants at or below a price, logged under an identifier
    Restaurants {
        /// Caller identifier attached to the server's log lines
        uid: String,
        /// Maximum price per person
        price: String,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let res = client
        .get(endpoint(&cli.url, &cli.command)?)
        .headers(headers)
        .send()
        .await?;
    print_response(res).await
}

/// Target URL for `command`. Each path segment is percent-encoded, so an
/// identifier containing `/` or `?` stays a single segment.
fn endpoint(base: &str, command: &Commands) -> Result<Url, Box<dyn std::error::Error>> {
    let segments = match command {
        Commands::Hero => vec!["hero", "get-hero"],
        Commands::Restaurants { uid, price } => vec![uid.as_str(), "restaurants", price.as_str()],
        Commands::Health => vec!["health"],
    };

    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("service returned status {}", status).into());
    }

    if let Some(id) = res.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        eprintln!("x-request-id: {}", id);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

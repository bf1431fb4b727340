mod input;
mod render;

use clap::Parser;
use input::{parse_line, Command, HELP};
use render::Renderer;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use voter_lookup::client::driver;
use voter_lookup::client::http::HttpSearchBackend;
use voter_lookup::client::view::{SearchView, ViewEvent};
use voter_lookup::search::types::DEFAULT_LIMIT;
use voter_lookup::wards::WARDS;

#[derive(Debug, Parser)]
#[command(name = "voter-lookup-ui", about = "Interactive voter search")]
struct UiArgs {
    /// Base URL of the lookup server.
    #[arg(long, env = "VOTER_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Results per page.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: i64,

    /// Start restricted to this ward code.
    #[arg(long)]
    ward: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = UiArgs::parse();

    let backend = Arc::new(HttpSearchBackend::new(&args.server));
    tracing::info!("Using lookup server {}", backend.base_url());

    let (tx, rx) = mpsc::channel(64);
    let mut renderer = Renderer::default();
    let view_task = tokio::spawn(driver::run(
        SearchView::new(args.limit),
        backend,
        rx,
        move |view: &SearchView| renderer.update(view),
    ));

    if args.ward.is_some() {
        tx.send(ViewEvent::SetWard(args.ward)).await?;
    }

    println!("Voter Information Portal");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_line(&line) {
            Command::Event(event) => event,
            Command::ListWards => {
                for ward in WARDS {
                    println!("  {}  {}", ward.code, ward.name);
                }
                continue;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        if tx.send(event).await.is_err() {
            tracing::warn!("View loop stopped");
            break;
        }
    }

    drop(tx);
    view_task.await?;

    Ok(())
}

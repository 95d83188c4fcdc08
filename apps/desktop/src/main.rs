use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, CatalogController, ConversationController, HttpBackend, SendOutcome,
    SendRejection,
};
use shared::domain::Category;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_line, Command, HELP};

#[derive(Parser, Debug)]
struct Args {
    /// Overrides `server_url` from client.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "beer")]
    category: Category,
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let backend =
        Arc::new(HttpBackend::from_settings(&settings).context("failed to configure backend")?);
    info!(server_url = %settings.server_url, "catalog client starting");

    let mut catalog = CatalogController::new(backend.clone());
    let mut conversation = ConversationController::new(backend);
    catalog.select_category(args.category);

    print!("{}", render::transcript_view(&conversation));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if let Flow::Quit = handle_line(&line, &mut catalog, &mut conversation) {
                    return Ok(());
                }
            }
            applied = catalog.resolve_next() => {
                if let Some(notice) = render::fetch_notice(applied) {
                    println!("{notice}");
                    print!("{}", render::catalog_view(&catalog));
                }
            }
            applied = conversation.resolve_next() => {
                if let Some(reply) = render::latest_reply(&conversation, applied) {
                    println!("{reply}");
                }
            }
        }
    }

    // stdin closed: let outstanding requests land before exiting.
    while catalog.is_loading() {
        if let Some(notice) = render::fetch_notice(catalog.resolve_next().await) {
            println!("{notice}");
        }
    }
    while conversation.is_awaiting_response() {
        let applied = conversation.resolve_next().await;
        if let Some(reply) = render::latest_reply(&conversation, applied) {
            println!("{reply}");
        }
    }
    Ok(())
}

fn handle_line(
    line: &str,
    catalog: &mut CatalogController,
    conversation: &mut ConversationController,
) -> Flow {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Flow::Continue,
        Err(err) => {
            println!("{err}");
            return Flow::Continue;
        }
    };

    match command {
        Command::Category(category) => {
            catalog.select_category(category);
            print!("{}", render::catalog_view(catalog));
        }
        Command::Filter(sub_filter) => match catalog.select_sub_filter(sub_filter) {
            Ok(()) => print!("{}", render::catalog_view(catalog)),
            Err(err) => println!("{err}"),
        },
        Command::Refresh => {
            catalog.refresh();
            println!("refreshing {}", catalog.category());
        }
        Command::Products => print!("{}", render::catalog_view(catalog)),
        Command::Say(text) => {
            conversation.update_draft(text);
            report_send(conversation);
        }
        Command::Draft(text) => conversation.update_draft(text),
        Command::Send => report_send(conversation),
        Command::Transcript => print!("{}", render::transcript_view(conversation)),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn report_send(conversation: &mut ConversationController) {
    match conversation.send() {
        SendOutcome::Sent(_) => {
            if let Some(turn) = conversation.turns().last() {
                println!("you> {}", turn.text);
            }
        }
        SendOutcome::Ignored(SendRejection::EmptyDraft) => println!("nothing to send"),
        SendOutcome::Ignored(SendRejection::AwaitingResponse) => {
            println!("still waiting for the last answer; your message is kept as a draft")
        }
    }
}

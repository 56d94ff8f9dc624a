use anyhow::Result;
use sage_chat::ChatController;
use sage_client::{AskClient, ClientConfig, FeedbackSender};
use sage_store::{FileStorage, SessionStore};
use sage_types::{AnswerMode, Sender};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sage_demo=info,sage_chat=debug,sage_client=debug".into()),
        )
        .init();

    let base_url = std::env::var("SAGE_BASE_URL")
        .unwrap_or_else(|_| sage_client::DEFAULT_BASE_URL.to_string());
    let state_dir = std::env::var("SAGE_STATE_DIR").unwrap_or_else(|_| "./sage-state".to_string());

    let storage = FileStorage::new(&state_dir)?;
    let store = SessionStore::load(Box::new(storage))?;
    let config = ClientConfig::default().with_base_url(&base_url);
    let client = AskClient::new(config)?;
    let feedback = FeedbackSender::new(&base_url)?;

    let mut chat = ChatController::new(store, client).with_feedback(feedback);

    println!("Sage tutor REPL ({} sessions on disk)", chat.store().sessions().len());
    println!("Commands: /new /sessions /select <id> /rename <title> /delete /reset /mode <easy|intermediate|advanced> /quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit", _) => break,
            ("/new", _) => {
                chat.new_session()?;
                println!("started a fresh session");
            }
            ("/sessions", _) => {
                for session in chat.store().sessions() {
                    let marker = if Some(session.id.as_str()) == chat.store().current_session_id() {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} {}  {}  ({})", marker, session.id, session.title, session.timestamp);
                }
            }
            ("/select", id) if !id.is_empty() => {
                chat.select_session(id)?;
                println!("switched to {}", id);
            }
            ("/rename", title) if !title.is_empty() => {
                if let Some(id) = chat.store().current_session_id().map(str::to_string) {
                    chat.rename_session(&id, title)?;
                } else {
                    println!("no active session");
                }
            }
            ("/delete", _) => {
                if let Some(id) = chat.store().current_session_id().map(str::to_string) {
                    chat.delete_session(&id)?;
                    println!("deleted {}", id);
                } else {
                    println!("no active session");
                }
            }
            ("/select", _) => println!("usage: /select <id>"),
            ("/rename", _) => println!("usage: /rename <title>"),
            ("/reset", _) => chat.reset()?,
            ("/mode", mode) => {
                match mode {
                    "easy" => chat.set_mode(AnswerMode::Easy),
                    "intermediate" => chat.set_mode(AnswerMode::Intermediate),
                    "advanced" => chat.set_mode(AnswerMode::Advanced),
                    _ => {
                        println!("unknown mode: {}", mode);
                        continue;
                    }
                }
                println!("mode set to {}", mode);
            }
            _ if line.is_empty() => {}
            _ => {
                chat.send_message(line).await?;
                for message in chat.messages().iter().rev().take_while(|m| m.sender == Sender::Assistant).collect::<Vec<_>>().into_iter().rev() {
                    let tag = if message.is_error { "error" } else { "sage" };
                    println!("[{}] {}", tag, message.content);
                }
            }
        }
    }

    Ok(())
}

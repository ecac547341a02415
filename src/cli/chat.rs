use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use crate::chat::{ChatBox, Clipboard, Emoji, SendOutcome};
use crate::core::ChatConfig;

/// Sanitized HTML as terminal friendly text
fn render(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|_| html.to_string())
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = ChatConfig::default();
    let mut chat = ChatBox::from_config(&config);
    let mut rl = DefaultEditor::new()?;

    println!("Chatting via {}", config.relay_url);
    println!("Commands: /emoji <emoji>, /attach <path>, Ctrl-D to quit");

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if let Some(emoji) = line.strip_prefix("/emoji ") {
                    chat.surface_mut().insert_emoji(Emoji::from_char(emoji.trim()));
                    println!("[emoji added to your next message]");
                    continue;
                }
                if let Some(path) = line.strip_prefix("/attach ") {
                    match chat.attach_file(Path::new(path.trim())) {
                        Some(id) => {
                            if let Some(msg) = chat.transcript().get(id) {
                                println!("{}", render(msg.text.as_str()));
                            }
                        }
                        None => println!("Not a file: {}", path.trim()),
                    }
                    continue;
                }

                chat.surface_mut().paste(&Clipboard::plain(&line));
                match chat.send().await {
                    SendOutcome::Skipped => {}
                    SendOutcome::Failed(id) => {
                        if let Some(msg) = chat.transcript().get(id) {
                            println!("{}", render(msg.text.as_str()));
                        }
                    }
                    SendOutcome::Replying(_) => {
                        let mut shown = String::new();
                        while let Some(msg) = chat.next_render().await {
                            let rendered = render(msg.text.as_str());
                            // Markup can change how earlier text renders so
                            // fall back to reprinting the whole reply
                            match rendered.strip_prefix(shown.as_str()) {
                                Some(rest) => print!("{}", rest),
                                None => print!("\n{}", rendered),
                            }
                            io::stdout().flush()?;
                            shown = rendered;
                        }
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

//! Interactive terminal chat with MobileGuru.
//!
//! This binary drives a `ChatController` directly against the upstream
//! service using a GEMINI_API_KEY from the environment.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! mobileguru-chat
//!
//! # Specify a model
//! mobileguru-chat --model gemini-2.5-flash-preview-09-2025
//!
//! # Override the persona
//! mobileguru-chat --system "You are a laconic phone reviewer"
//!
//! # Disable colors (useful for piping output)
//! mobileguru-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/system [prompt]` - Show or replace the system instruction
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use mobileguru::config::{ChatArgs, ChatConfig};
use mobileguru::render::render_markdown;
use mobileguru::{ChatController, GeminiClient, Relay, RetryPolicy, SendOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("mobileguru-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let client = GeminiClient::with_options(
        None,
        config.endpoint.clone(),
        Some(config.model.clone()),
        None,
    )?;
    let mut controller = ChatController::new(client, config.system_prompt.clone())
        .with_retry_policy(RetryPolicy::new(config.max_attempts));
    let mut rl = DefaultEditor::new()?;

    println!("MobileGuru chat (model: {})", config.model);
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(command) = line.strip_prefix('/') {
                    if handle_command(command, &mut controller) {
                        break;
                    }
                    continue;
                }

                println!("MobileGuru:");
                match controller.send_message(line).await {
                    SendOutcome::Answer(text) => {
                        println!("{}\n", render_markdown(&text, config.use_color));
                    }
                    SendOutcome::Unavailable { fallback, detail } => {
                        println!("{}\n", fallback);
                        eprintln!("    (error: {})", detail);
                    }
                    SendOutcome::Busy => {
                        println!("(still working on the previous message)\n");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Input error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Handle a slash command; returns true when the REPL should exit.
fn handle_command<R: Relay>(command: &str, controller: &mut ChatController<R>) -> bool {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => {
            println!("Goodbye!");
            return true;
        }
        "clear" => {
            controller.clear();
            println!("    Conversation cleared.");
        }
        "system" => {
            if rest.is_empty() {
                println!("    System instruction: {}", controller.instruction());
            } else {
                controller.set_instruction(rest);
                println!("    System instruction replaced.");
            }
        }
        "stats" => {
            println!("    Session Statistics:");
            println!("      Turns: {}", controller.log().len());
            println!(
                "      Exchanges: {}",
                controller.log().len() / 2
            );
        }
        "help" => {
            println!("    /help              Show this help");
            println!("    /clear             Clear conversation history");
            println!("    /system [prompt]   Show or replace the system instruction");
            println!("    /stats             Show session statistics");
            println!("    /quit              Exit");
        }
        _ => {
            println!("    Unknown command: /{name} (try /help)");
        }
    }
    false
}

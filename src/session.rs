use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::io::{AsyncBufRead, Lines};

use crate::config::EndpointConfig;
use crate::history::SessionLog;
use crate::models::chat::{AnswerRecord, Role};
use crate::protocol::{self, QueryError, QueryOptions};
use crate::transport::Transport;

/// One line of user input, classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ShowLog,
    Empty,
    Ask(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        match trimmed.to_lowercase().as_str() {
            "exit" | "quit" | "q" => Command::Quit,
            "log" => Command::ShowLog,
            _ => Command::Ask(trimmed.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub top_k: Option<u32>,
    pub chat_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            top_k: None,
            chat_timeout: Duration::from_secs(60),
        }
    }
}

/// The interactive loop: reads commands and questions, drives the request
/// protocol, renders answers, and keeps the session log current.
pub struct ChatSession {
    endpoints: EndpointConfig,
    transport: Arc<dyn Transport>,
    log: Box<dyn SessionLog>,
    options: SessionOptions,
}

impl ChatSession {
    pub fn new(
        endpoints: EndpointConfig,
        transport: Arc<dyn Transport>,
        log: Box<dyn SessionLog>,
        options: SessionOptions,
    ) -> Self {
        Self {
            endpoints,
            transport,
            log,
            options,
        }
    }

    /// Runs until `exit`/`quit`/`q`, end of input, or Ctrl-C. Per-question
    /// failures are reported and the loop continues; nothing recoverable
    /// escapes this function.
    pub async fn run<R>(&mut self, input: &mut Lines<R>)
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            print_prompt();
            let line = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    None
                }
                read = input.next_line() => read.unwrap_or(None),
            };
            let Some(line) = line else { break };

            match Command::parse(&line) {
                Command::Quit => break,
                Command::Empty => continue,
                Command::ShowLog => self.show_log(),
                Command::Ask(question) => {
                    // An interrupt mid-request abandons the in-flight call
                    // and ends the session cleanly.
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            println!();
                            break;
                        }
                        _ = self.process_question(&question) => {}
                    }
                }
            }
        }
        self.terminate();
    }

    async fn process_question(&mut self, question: &str) {
        // The USER turn goes into the log before the request leaves.
        self.record_turn(Role::User, question);

        let options = QueryOptions {
            top_k: self.options.top_k,
            timeout: self.options.chat_timeout,
        };
        match protocol::ask_question(
            self.transport.as_ref(),
            &self.endpoints,
            question,
            &options,
        )
        .await
        {
            Ok(record) => {
                println!("{}", render_answer(&record));
                self.record_turn(Role::Assistant, &record.log_message());
            }
            Err(QueryError::Status { status, body }) => {
                eprintln!("Server error {}: {}", status, body);
            }
            Err(QueryError::Connection(err)) => {
                eprintln!("Request failed: {}", err);
            }
            Err(QueryError::Malformed(err)) => {
                eprintln!("The server answered but the response was unreadable: {}", err);
            }
        }
    }

    fn show_log(&self) {
        match self.log.read_all() {
            Ok(Some(content)) => {
                println!("--- Conversation Log ---");
                println!("{}", content.trim_end());
                println!("------------------------");
            }
            Ok(None) => println!("No conversation history recorded yet."),
            Err(err) => warn!("could not read the session log: {}", err),
        }
    }

    fn record_turn(&mut self, role: Role, message: &str) {
        if let Err(err) = self.log.record_turn(role, message) {
            warn!("could not record the {} turn: {}", role, err);
        }
    }

    fn terminate(&mut self) {
        match self.log.flush() {
            Ok(()) if self.log.path().exists() => {
                println!("Conversation saved to {}", self.log.path().display());
            }
            Ok(()) => {}
            Err(err) => warn!("could not save the conversation log: {}", err),
        }
        println!("Goodbye!");
    }
}

fn print_prompt() {
    print!("> You: ");
    let _ = std::io::stdout().flush();
}

/// Terminal rendering of an answer record. Sources are shown only when the
/// server supplied any.
pub fn render_answer(record: &AnswerRecord) -> String {
    let mut out = String::from("\n--- Response ---\n");
    out.push_str(&format!("Answer: {}\n", record.answer));
    if !record.sources.is_empty() {
        out.push_str(&format!("Sources: {}\n", record.sources.join(", ")));
    }
    out.push_str(&format!("Confidence: {}", record.confidence));
    out
}

//! Terminal front-end: transcript on stdout, status and errors on stderr.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::agent::Tool;
use crate::chat::Chat;
use crate::openai::ChatModel;

pub const TITLE: &str = "🏀 Basketball Results Search Chatbot";
pub const CAPTION: &str = "Ask about basketball game results, scores, and news!";
const PROMPT: &str = "> ";
const THINKING: &str = "Searching and thinking...";

pub const HELP: &str = "\
Instructions
  1. Create a `.env` file with `OPENAI_API_KEY=your_key_here`
  2. Type your message at the prompt
  3. Press Enter to send
  4. The assistant can search the web for current information!
  5. Ask about the Lithuanian Basketball League (LKL), Euroleague, NBA, or Lithuanian teams!

Commands
  /clear     clear chat history
  /history   show the conversation so far
  /help      show this help
  /quit      exit

Features
  ✅ Web Search: ask about current basketball news and results
  ✅ Lithuanian Basketball: special focus on LKL and Lithuanian teams
  ✅ Intelligent Routing: only answers basketball-related questions
  ✅ Source Citations: clickable sources in responses";

enum Command {
    Quit,
    Clear,
    History,
    Help,
    Message,
}

fn parse_command(line: &str) -> Command {
    match line {
        "/quit" | "/exit" => Command::Quit,
        "/clear" => Command::Clear,
        "/history" => Command::History,
        "/help" => Command::Help,
        _ => Command::Message,
    }
}

/// Reads messages line by line until EOF or `/quit`. One turn is in flight at a time.
pub async fn run_interactive<M, T, R, O, E>(
    chat: &mut Chat<M, T>,
    input: R,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    M: ChatModel,
    T: Tool,
    R: AsyncBufRead + Unpin,
    O: Write,
    E: Write,
{
    writeln!(out, "{TITLE}\n{CAPTION}\nType /help for instructions.\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Command::Quit => break,
            Command::Clear => {
                chat.reset();
                writeln!(out, "Chat history cleared.\n")?;
            }
            Command::History => print_history(chat, out)?,
            Command::Help => writeln!(out, "{HELP}\n")?,
            Command::Message => ask(chat, line, out, err).await?,
        }
    }
    Ok(())
}

/// Runs a single turn and prints the reply.
pub async fn ask<M, T, O, E>(
    chat: &mut Chat<M, T>,
    text: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    M: ChatModel,
    T: Tool,
    O: Write,
    E: Write,
{
    writeln!(err, "{THINKING}")?;
    err.flush()?;

    let mut failure = None;
    let reply = chat
        .submit(text, |message| failure = Some(message.to_string()))
        .await;

    if let Some(message) = failure {
        writeln!(err, "error: {message}")?;
    }
    match reply.text() {
        Some(text) => writeln!(out, "{text}\n"),
        None => writeln!(out),
    }
}

fn print_history<M, T, O>(chat: &Chat<M, T>, out: &mut O) -> io::Result<()>
where
    M: ChatModel,
    T: Tool,
    O: Write,
{
    let visible = chat.session().visible();
    if visible.is_empty() {
        return writeln!(out, "(no messages yet)\n");
    }
    for turn in visible {
        writeln!(out, "[{}] {}\n", turn.role(), turn.content())?;
    }
    Ok(())
}

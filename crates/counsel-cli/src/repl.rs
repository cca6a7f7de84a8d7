use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub const COMMANDS: &[&str] = &["/trigger", "/title", "/status", "/end", "/help"];

/// A slash command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Trigger(Option<String>),
    Title,
    Status,
    End,
    Help,
    Unknown(String),
}

/// Parses `line` as a slash command; `None` for ordinary text.
pub fn parse_command(line: &str) -> Option<SlashCommand> {
    let line = line.trim();
    if !line.starts_with('/') {
        return None;
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    Some(match name {
        "/trigger" => SlashCommand::Trigger(Some(rest.to_string()).filter(|r| !r.is_empty())),
        "/title" => SlashCommand::Title,
        "/status" => SlashCommand::Status,
        "/end" | "/quit" | "/exit" => SlashCommand::End,
        "/help" => SlashCommand::Help,
        other => SlashCommand::Unknown(other.to_string()),
    })
}

/// Completion, highlighting and hints for slash commands.
#[derive(Clone, Default)]
pub struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ChatHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("안녕하세요"), None);
        assert_eq!(
            parse_command("/trigger 면접 준비"),
            Some(SlashCommand::Trigger(Some("면접 준비".into())))
        );
        assert_eq!(parse_command("/trigger"), Some(SlashCommand::Trigger(None)));
        assert_eq!(parse_command(" /end "), Some(SlashCommand::End));
        assert_eq!(
            parse_command("/nope"),
            Some(SlashCommand::Unknown("/nope".into()))
        );
    }
}

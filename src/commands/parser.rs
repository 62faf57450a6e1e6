//! Parser for bot commands in message text.
//!
//! A pure parser that extracts structured commands from unstructured chat
//! message text.

use super::types::Command;

/// Parses the first bot command found in message text.
///
/// # Arguments
///
/// * `text` - The message text to parse
/// * `bot_name` - The bot name without the `@` prefix (e.g., `"github-relay"`)
///
/// # Parsing Rules
///
/// - The trigger `@{bot_name}` is case-insensitive
/// - The trigger must be at a word boundary (not preceded by alphanumeric chars)
/// - Command names are case-insensitive
/// - Whitespace between tokens is flexible (spaces, tabs)
/// - If multiple mentions are present, the first one followed by a valid
///   command wins
/// - Returns `None` if no valid command is found
///
/// # Examples
///
/// ```
/// use github_webex_relay::commands::{parse_command, Command};
///
/// assert_eq!(parse_command("@github-relay ping", "github-relay"), Some(Command::Ping));
/// assert_eq!(parse_command("@GitHub-Relay PING", "github-relay"), Some(Command::Ping));
/// assert_eq!(parse_command("hey @github-relay ping", "github-relay"), Some(Command::Ping));
/// // Not a valid mention (preceded by alphanumeric):
/// assert_eq!(parse_command("foo@github-relay ping", "github-relay"), None);
/// ```
pub fn parse_command(text: &str, bot_name: &str) -> Option<Command> {
    let trigger = format!("@{}", bot_name);
    // Find all occurrences of @bot_name (case-insensitive, at word boundary)
    let mut search_start = 0;
    while let Some(abs_pos) = find_trigger(text, search_start, &trigger) {
        let after_trigger = &text[abs_pos + trigger.len()..];

        if let Some(cmd) = try_parse_after_trigger(after_trigger) {
            return Some(cmd);
        }

        // Move past this trigger and continue searching
        search_start = abs_pos + trigger.len();
    }
    None
}

/// Finds the next occurrence of the trigger (case-insensitive) at a valid word boundary.
/// Returns the byte position of the `@` character if found.
fn find_trigger(text: &str, start: usize, trigger: &str) -> Option<usize> {
    let mut search_pos = start;

    while search_pos < text.len() {
        // Find the next '@' character
        let at_pos = text[search_pos..].find('@')?;
        let abs_pos = search_pos + at_pos;

        // Try to get the candidate slice. This may return None if the end position
        // lands in the middle of a multi-byte UTF-8 character.
        if let Some(candidate) = text.get(abs_pos..abs_pos + trigger.len()) {
            if candidate.eq_ignore_ascii_case(trigger) {
                // Check left boundary: must be start of string or preceded by non-alphanumeric
                let valid_boundary = abs_pos == 0 || {
                    let prev_char = text[..abs_pos].chars().next_back().unwrap();
                    !prev_char.is_alphanumeric()
                };
                if valid_boundary {
                    return Some(abs_pos);
                }
            }
        }

        // Move past this '@' and continue searching
        search_pos = abs_pos + 1;
    }
    None
}

/// Attempts to parse a command from text immediately following the trigger.
fn try_parse_after_trigger(text: &str) -> Option<Command> {
    // Must have at least one whitespace character after trigger
    let text = text.strip_prefix(|c: char| c.is_ascii_whitespace())?;
    let text = text.trim_start();

    // Extract the command word (everything up to the next whitespace)
    let (cmd_word, _) = split_first_word(text);

    match cmd_word.to_ascii_lowercase().as_str() {
        "ping" => Some(Command::Ping),
        _ => None,
    }
}

/// Splits text at the first whitespace, returning (word, rest).
/// If no whitespace, returns (text, "").
fn split_first_word(text: &str) -> (&str, &str) {
    match text.find(|c: char| c.is_ascii_whitespace()) {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}

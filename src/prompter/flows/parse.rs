use crate::core::types::ShortcutKey;
use crate::errors::{Error, Result};
use crate::prompter::models::CalendarCommand;

pub(crate) const USAGE: &str = "\
Keys:      n | t | w | m | left | right
Navigate:  goto <date> | select <date>
Quick add: click <date> <px> | add <title>
Dialog:    new <title>
Gestures:  down cell <date> | down event <id> <date> <px> | down edge <id> <px>
           move <date> <px> | up <date> <px>
Other:     esc | del <event-id> | focus on|off | log | config | set <KEY> <value> | exit";

fn usage_error(command: &str, expected: &str) -> Error {
    Error::parse(format!("Usage: {command} {expected}"))
}

/// Word `i` of `words`, or a usage error naming what was expected.
fn arg<'a>(words: &[&'a str], i: usize, command: &str, expected: &str) -> Result<&'a str> {
    words
        .get(i)
        .copied()
        .ok_or_else(|| usage_error(command, expected))
}

/// Everything after the command word, trimmed; must not be empty.
fn rest(line: &str, command: &str, expected: &str) -> Result<String> {
    let tail = line
        .trim()
        .split_once(char::is_whitespace)
        .map(|(_, t)| t.trim())
        .unwrap_or("");
    if tail.is_empty() {
        Err(usage_error(command, expected))
    } else {
        Ok(tail.to_string())
    }
}

pub(crate) fn parse_command(line: &str) -> Result<CalendarCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(head) = words.first() else {
        return Err(Error::parse("Empty command."));
    };
    let command = head.to_ascii_lowercase();

    if words.len() == 1 && ShortcutKey::try_from(head).is_ok() {
        return Ok(CalendarCommand::Key(command));
    }

    let parsed = match command.as_str() {
        "goto" => CalendarCommand::Goto(arg(&words, 1, "goto", "<date>")?.into()),
        "select" => CalendarCommand::Select(arg(&words, 1, "select", "<date>")?.into()),
        "click" => CalendarCommand::Click {
            day: arg(&words, 1, "click", "<date> <px>")?.into(),
            px: arg(&words, 2, "click", "<date> <px>")?.into(),
        },
        "add" => CalendarCommand::QuickAdd(rest(line, "add", "<title>")?),
        "new" => CalendarCommand::SubmitDialog(rest(line, "new", "<title>")?),
        "esc" | "cancel" => CalendarCommand::Cancel,
        "down" => parse_down(&words)?,
        "move" => CalendarCommand::Move {
            day: arg(&words, 1, "move", "<date> <px>")?.into(),
            px: arg(&words, 2, "move", "<date> <px>")?.into(),
        },
        "up" => CalendarCommand::Up {
            day: arg(&words, 1, "up", "<date> <px>")?.into(),
            px: arg(&words, 2, "up", "<date> <px>")?.into(),
        },
        "del" => CalendarCommand::Delete(arg(&words, 1, "del", "<event-id>")?.into()),
        "focus" => CalendarCommand::Focus(arg(&words, 1, "focus", "on|off")?.to_ascii_lowercase()),
        "log" => CalendarCommand::Log,
        "config" => CalendarCommand::ShowConfig,
        "set" => CalendarCommand::Set {
            key: arg(&words, 1, "set", "<KEY> <value>")?.into(),
            value: arg(&words, 2, "set", "<KEY> <value>")?.into(),
        },
        "help" | "?" => CalendarCommand::Help,
        _ => {
            return Err(Error::parse(format!(
                "Unknown command: '{head}'. Type 'help' for the command list."
            )));
        }
    };
    Ok(parsed)
}

fn parse_down(words: &[&str]) -> Result<CalendarCommand> {
    const EXPECTED: &str = "cell <date> | event <id> <date> <px> | edge <id> <px>";
    let target = arg(words, 1, "down", EXPECTED)?.to_ascii_lowercase();
    match target.as_str() {
        "cell" => Ok(CalendarCommand::DownCell(
            arg(words, 2, "down cell", "<date>")?.into(),
        )),
        "event" => {
            let expected = "<id> <date> <px>";
            Ok(CalendarCommand::DownEvent {
                occurrence_id: arg(words, 2, "down event", expected)?.into(),
                day: arg(words, 3, "down event", expected)?.into(),
                px: arg(words, 4, "down event", expected)?.into(),
            })
        }
        "edge" => Ok(CalendarCommand::DownEdge {
            occurrence_id: arg(words, 2, "down edge", "<id> <px>")?.into(),
            px: arg(words, 3, "down edge", "<id> <px>")?.into(),
        }),
        _ => Err(usage_error("down", EXPECTED)),
    }
}

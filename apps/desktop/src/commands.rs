//! Line commands accepted by the terminal front-end.

use anyhow::{bail, Result};
use shared::domain::{Category, SubFilter};

pub const HELP: &str = "\
commands:
  category <beer|whisky|vodka|rum>   switch category (resets the whisky filter)
  filter <label>                     whisky sub-filter, e.g. `filter single malts`
  refresh                            re-fetch the current category
  products                           show the current grid
  say <text>                         type <text> and send it to the assistant
  draft <text>                       replace the unsent message
  send                               send the unsent message
  transcript                         show the conversation
  help                               show this help
  quit                               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Category(Category),
    Filter(SubFilter),
    Refresh,
    Products,
    Say(String),
    Draft(String),
    Send,
    Transcript,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "category" | "c" => Command::Category(rest.parse()?),
        "filter" | "f" => Command::Filter(rest.parse()?),
        "refresh" => Command::Refresh,
        "products" | "p" => Command::Products,
        "say" => Command::Say(rest.to_string()),
        "draft" => Command::Draft(rest.to_string()),
        "send" => Command::Send,
        "transcript" | "t" => Command::Transcript,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command '{other}' (try `help`)"),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_and_multi_word_filter() {
        assert_eq!(
            parse_line("category Whisky").expect("parse"),
            Some(Command::Category(Category::Whisky))
        );
        assert_eq!(
            parse_line("filter   made in india whisky ").expect("parse"),
            Some(Command::Filter(SubFilter::MadeInIndiaWhisky))
        );
    }

    #[test]
    fn say_keeps_text_verbatim_after_verb() {
        assert_eq!(
            parse_line("say 5k budget for 6/8 people").expect("parse"),
            Some(Command::Say("5k budget for 6/8 people".into()))
        );
        assert_eq!(parse_line("say").expect("parse"), Some(Command::Say(String::new())));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line("   ").expect("parse"), None);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_line("dance").is_err());
        assert!(parse_line("category gin").is_err());
        assert!(parse_line("filter bourbon").is_err());
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the application
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Toggle display of timestamps in the results pane
    Timestamps,
    // Drop every notice from the results pane
    Clear,
    // Jump to the newest result line
    Tail,
    // Render every compound held in the similarity store
    ViewAll,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "ts" | "timestamps" => Ok(Command::Timestamps),
            "clear" => Ok(Command::Clear),
            "tail" => Ok(Command::Tail),
            "all" | "viewall" => Ok(Command::ViewAll),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("ts"), Ok(Command::Timestamps));
        assert_eq!(Command::parse("clear"), Ok(Command::Clear));
        assert_eq!(Command::parse("tail"), Ok(Command::Tail));
        assert_eq!(Command::parse("all"), Ok(Command::ViewAll));
    }

    #[test]
    fn parse_theme_requires_an_argument() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn empty_input_is_the_close_sentinel() {
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn unknown_command_reports_the_word() {
        assert_eq!(
            Command::parse("frobnicate now"),
            Err("unknown command: frobnicate".to_string())
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(Command::parse("  tail  "), Ok(Command::Tail));
    }
}

//! Menu commands and the static screens around them.

use std::fmt;
use std::str::FromStr;

/// Short forms of `exit`, accepted but not listed in the menu.
const EXIT_ALIASES: [&str; 3] = ["q", "quit", "ex"];

/// A command typed at the `> ` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Show,
    Help,
    Remove,
    Search,
    Clear,
    SortAsc,
    SortDec,
    Exit,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Show,
        Command::Help,
        Command::Remove,
        Command::Search,
        Command::Clear,
        Command::SortAsc,
        Command::SortDec,
        Command::Exit,
    ];

    /// The text the user types.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Show => "show",
            Command::Help => "help",
            Command::Remove => "remove",
            Command::Search => "search",
            Command::Clear => "clear",
            Command::SortAsc => "sort asc",
            Command::SortDec => "sort dec",
            Command::Exit => "exit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if EXIT_ALIASES.contains(&input.as_str()) {
            return Ok(Command::Exit);
        }
        Command::ALL
            .into_iter()
            .find(|command| command.keyword() == input)
            .ok_or_else(|| format!("unknown command '{}'", s.trim()))
    }
}

/// Banner printed above the menu.
pub fn logo() -> &'static str {
    concat!(
        "\n",
        "            *******************\n",
        "            **   STOCKROOM   **\n",
        "            *******************\n",
    )
}

/// The list of commands.
pub fn menu_items() -> String {
    let mut out = String::from("Menu items: \n");
    out.push_str(&"-".repeat(30));
    out.push('\n');
    for command in Command::ALL {
        out.push_str(&format!(" -  {}\n", command));
    }
    out
}

/// Text printed by `help`.
pub fn manual() -> &'static str {
    concat!(
        "\n",
        "An application to manage the inventory of a shop.\n",
        "\n",
        "Features:\n",
        "- User authorization.\n",
        "- Add, remove, search and show products.\n",
        "- Show products sorted by name with `sort asc` and `sort dec`.\n",
        "\n",
        "Type `exit` to leave the program.\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("add".parse::<Command>(), Ok(Command::Add));
        assert_eq!("  show \n".parse::<Command>(), Ok(Command::Show));
        assert_eq!("SORT ASC".parse::<Command>(), Ok(Command::SortAsc));
        assert_eq!("sort dec".parse::<Command>(), Ok(Command::SortDec));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Exit));
        assert_eq!("q".parse::<Command>(), Ok(Command::Exit));
        assert_eq!("Quit".parse::<Command>(), Ok(Command::Exit));
        assert_eq!(" ex ".parse::<Command>(), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("sort".parse::<Command>().is_err());
        assert!("sort  asc".parse::<Command>().is_err());
        assert!("quit".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_keywords_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.keyword().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_menu_lists_every_command() {
        let menu = menu_items();
        assert!(menu.starts_with("Menu items: \n"));
        assert!(menu.contains(" -  sort asc\n"));
        assert!(!menu.contains(" -  quit\n"));
        assert_eq!(menu.lines().count(), 2 + Command::ALL.len());
    }
}

use voter_lookup::client::view::ViewEvent;

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(ViewEvent),
    ListWards,
    Help,
    Quit,
}

/// Plain text replaces the query; lines starting with `/` are commands.
pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();

    let Some(command) = trimmed.strip_prefix('/') else {
        return Command::Event(ViewEvent::QueryChanged(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "search" | "s" => Command::Event(ViewEvent::Submit),
        "more" | "m" => Command::Event(ViewEvent::LoadMore),
        "clear" | "c" => Command::Event(ViewEvent::QueryChanged(String::new())),
        "ward" | "w" if arg.is_empty() => Command::Event(ViewEvent::SetWard(None)),
        "ward" | "w" => Command::Event(ViewEvent::SetWard(Some(arg.to_string()))),
        "wards" => Command::ListWards,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Help,
    }
}

pub const HELP: &str = "Type a name, voter ID or house number to search.
  /search       search now
  /more         load the next page
  /ward <code>  restrict to a ward (/ward alone clears it)
  /wards        list ward codes
  /clear        clear the query
  /quit         exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_query() {
        assert_eq!(
            parse_line("Anil Kumar"),
            Command::Event(ViewEvent::QueryChanged("Anil Kumar".to_string()))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line("/search"), Command::Event(ViewEvent::Submit));
        assert_eq!(parse_line(" /more "), Command::Event(ViewEvent::LoadMore));
        assert_eq!(
            parse_line("/clear"),
            Command::Event(ViewEvent::QueryChanged(String::new()))
        );
        assert_eq!(parse_line("/wards"), Command::ListWards);
        assert_eq!(parse_line("/quit"), Command::Quit);
        assert_eq!(parse_line("/bogus"), Command::Help);
    }

    #[test]
    fn test_ward_command() {
        assert_eq!(
            parse_line("/ward 049"),
            Command::Event(ViewEvent::SetWard(Some("049".to_string())))
        );
        assert_eq!(parse_line("/ward"), Command::Event(ViewEvent::SetWard(None)));
    }
}

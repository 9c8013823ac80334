use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
Commands:
  /clone <audio-file>   clone your voice from a recording (wav/mp3/webm/ogg)
  /voice <id>           use an existing voice identifier
  /transcript           show the conversation so far
  /help                 show this help
  /quit                 leave
Anything else is sent to the bear.";

#[derive(Debug, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Quit,
    Transcript,
    Clone(PathBuf),
    Voice(String),
    /// Recognized as a command but unusable; carries the message to show.
    Invalid(String),
}

/// Interpret slash-prefixed input as a local command. Anything else goes
/// to the chat session.
pub fn parse_command(input: &str) -> Option<LocalCommand> {
    let input = input.strip_prefix('/')?;
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    Some(match name {
        "help" => LocalCommand::Help,
        "quit" | "exit" => LocalCommand::Quit,
        "transcript" => LocalCommand::Transcript,
        "clone" if !rest.is_empty() => LocalCommand::Clone(PathBuf::from(rest)),
        "clone" => LocalCommand::Invalid("usage: /clone <audio-file>".to_string()),
        "voice" if !rest.is_empty() => LocalCommand::Voice(rest.to_string()),
        "voice" => LocalCommand::Invalid("usage: /voice <id>".to_string()),
        other => LocalCommand::Invalid(format!("unknown command /{other}; try /help")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("tell me a story"), None);
    }

    #[test]
    fn clone_takes_a_path() {
        assert_eq!(
            parse_command("/clone my voice.wav"),
            Some(LocalCommand::Clone(PathBuf::from("my voice.wav")))
        );
        assert!(matches!(
            parse_command("/clone"),
            Some(LocalCommand::Invalid(_))
        ));
    }

    #[test]
    fn voice_takes_an_identifier() {
        assert_eq!(
            parse_command("/voice v-42"),
            Some(LocalCommand::Voice("v-42".to_string()))
        );
    }

    #[test]
    fn unknown_commands_are_flagged() {
        assert!(matches!(
            parse_command("/dance"),
            Some(LocalCommand::Invalid(_))
        ));
    }

    #[test]
    fn quit_and_exit_both_leave() {
        assert_eq!(parse_command("/quit"), Some(LocalCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(LocalCommand::Quit));
    }
}

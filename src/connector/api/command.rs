/// A command as issued by a chat user, independent of how it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    Ask {
        question: String,
        model: Option<String>,
    },
    Models,
    Status,
    Ping,
    Help,
}

impl RelayCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RelayCommand::Ask { .. } => "ask",
            RelayCommand::Models => "models",
            RelayCommand::Status => "status",
            RelayCommand::Ping => "ping",
            RelayCommand::Help => "help",
        }
    }

    /// Parses a slash command such as `/ask --model llama3 why is the sky blue?`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Err(format!("Commands start with '/'. Try /help. Got: {line}"));
        };

        let (name, args) = split_first_word(rest);

        match name {
            "ask" => Self::parse_ask(args),
            "models" => Ok(RelayCommand::Models),
            "status" => Ok(RelayCommand::Status),
            "ping" => Ok(RelayCommand::Ping),
            "help" => Ok(RelayCommand::Help),
            other => Err(format!("Unknown command /{other}. Try /help.")),
        }
    }

    fn parse_ask(args: &str) -> Result<Self, String> {
        let (first, remainder) = split_first_word(args);
        let (model, question) = if first == "--model" {
            let (model, question) = split_first_word(remainder);
            if model.is_empty() {
                return Err("--model needs a model id".to_string());
            }
            (Some(model.to_string()), question)
        } else {
            (None, args)
        };

        if question.is_empty() {
            return Err("Usage: /ask [--model <id>] <question>".to_string());
        }

        Ok(RelayCommand::Ask {
            question: question.to_string(),
            model,
        })
    }
}

fn split_first_word(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(word, rest)| (word, rest.trim()))
}

pub const HELP_TEXT: &str = "\
Available commands:
  /ask [--model <id>] <question>  Ask a question to your Open WebUI instance
  /models                         List available models
  /status                         Show the status of your Open WebUI instance
  /ping                           Check that the relay is responding
  /help                           Show this message
  /quit                           Leave the shell";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_and_without_model() {
        assert_eq!(
            RelayCommand::parse("/ask Say hi"),
            Ok(RelayCommand::Ask {
                question: "Say hi".to_string(),
                model: None
            })
        );
        assert_eq!(
            RelayCommand::parse("  /ask --model llama3   Say hi  "),
            Ok(RelayCommand::Ask {
                question: "Say hi".to_string(),
                model: Some("llama3".to_string())
            })
        );
    }

    #[test]
    fn test_parse_ask_requires_question() {
        assert!(RelayCommand::parse("/ask").is_err());
        assert!(RelayCommand::parse("/ask --model llama3").is_err());
        assert!(RelayCommand::parse("/ask --model").is_err());
        assert_eq!(
            RelayCommand::parse("/ask --models are fun"),
            Ok(RelayCommand::Ask {
                question: "--models are fun".to_string(),
                model: None
            })
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(RelayCommand::parse("/models"), Ok(RelayCommand::Models));
        assert_eq!(RelayCommand::parse("/status"), Ok(RelayCommand::Status));
        assert_eq!(RelayCommand::parse("/ping"), Ok(RelayCommand::Ping));
        assert_eq!(RelayCommand::parse("/help"), Ok(RelayCommand::Help));
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(RelayCommand::parse("hello").unwrap_err().contains("/help"));
        assert!(RelayCommand::parse("/dance").unwrap_err().contains("Unknown command"));
    }
}

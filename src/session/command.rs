use std::str::FromStr;

use thiserror::Error;

use crate::model::activity::ActivityLabel;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`force` needs an activity label")]
    MissingLabel,
    #[error("{0}")]
    BadLabel(String),
}

/// Operator controls accepted on the session input stream, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    Start,
    Stop,
    Toggle,
    Force(ActivityLabel),
    ClearForce,
    Classify,
    Status,
    History,
    Help,
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let cmd = match head.to_ascii_lowercase().as_str() {
            "start" | "run" => OperatorCommand::Start,
            "stop" | "pause" => OperatorCommand::Stop,
            "toggle" => OperatorCommand::Toggle,
            "force" => {
                let rest = parts.collect::<Vec<_>>().join("_");
                if rest.is_empty() {
                    return Err(CommandError::MissingLabel);
                }
                let label = rest
                    .parse::<ActivityLabel>()
                    .map_err(|e| CommandError::BadLabel(e.to_string()))?;
                return Ok(OperatorCommand::Force(label));
            }
            "clear" | "unforce" => OperatorCommand::ClearForce,
            "classify" | "test" => OperatorCommand::Classify,
            "status" => OperatorCommand::Status,
            "history" => OperatorCommand::History,
            "help" | "?" => OperatorCommand::Help,
            "quit" | "exit" | "q" => OperatorCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}

pub const HELP_TEXT: &str = "\
commands:
  start | stop | toggle   control the periodic mock classification
  force <label>           treat <label> as ground truth on the next ticks
  clear                   drop the forced label
  classify                classify the recorded sample with the loaded model
  status                  show loop, model and history state
  history                 print the prediction history, newest first
  quit                    leave the session";

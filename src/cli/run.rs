use anyhow::{anyhow, Result};
use clap::Args;
use serde_json::json;
use std::io::{self, Read};
use std::str::FromStr;
use tokio::sync::mpsc;
use tracing::{debug, info};

use paginator::{PageEvent, PaginationState, PaginatorConfig, PaginatorError, PaginatorIntl};

use super::state_args::StateArgs;
use super::view::{print_view, OutputFormat};

/// Drive a pagination state through a sequence of actions
#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub state: StateArgs,

    /// Actions: next, previous, first, last, size=N, index=N, length=N.
    /// If not provided, they are read from stdin
    pub actions: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One step applied to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    PageSize(usize),
    PageIndex(usize),
    Length(usize),
}

impl FromStr for Action {
    type Err = PaginatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PaginatorError::InvalidAction(s.to_string());
        let trimmed = s.trim().to_lowercase();

        match trimmed.as_str() {
            "next" | "n" => return Ok(Action::Next),
            "previous" | "prev" | "p" => return Ok(Action::Previous),
            "first" => return Ok(Action::First),
            "last" => return Ok(Action::Last),
            _ => {}
        }

        let (key, value) = trimmed.split_once('=').ok_or_else(invalid)?;
        let value: usize = value.trim().parse().map_err(|_| invalid())?;

        match key.trim() {
            "size" => Ok(Action::PageSize(value)),
            "index" => Ok(Action::PageIndex(value)),
            "length" => Ok(Action::Length(value)),
            _ => Err(invalid()),
        }
    }
}

impl Action {
    /// Apply to the state; returns whether a navigation was performed.
    pub fn apply(self, state: &mut PaginationState) -> bool {
        match self {
            Action::Next => state.next_page(),
            Action::Previous => state.previous_page(),
            Action::First => state.first_page(),
            Action::Last => state.last_page(),
            Action::PageSize(size) => {
                state.change_page_size(size);
                true
            }
            Action::PageIndex(index) => {
                state.set_page_index(index);
                false
            }
            Action::Length(length) => {
                state.set_length(length);
                false
            }
        }
    }
}

impl RunCommand {
    pub async fn execute(&self, config: &PaginatorConfig) -> Result<()> {
        debug!("Executing run command");

        let actions = self.get_actions()?;
        let intl = PaginatorIntl::shared();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = self.state.build(config, intl.clone()).with_event_sender(tx);
        info!("Running {} action(s) from page {}", actions.len(), state.page_index());

        for action in actions {
            let applied = action.apply(&mut state);
            if !applied {
                debug!("{:?} did not navigate", action);
            }
            while let Ok(event) = rx.try_recv() {
                self.print_event(&event, &intl);
            }
        }

        print_view(&state, &intl, self.format);
        state.dispose();
        Ok(())
    }

    fn get_actions(&self) -> Result<Vec<Action>> {
        let raw = if !self.actions.is_empty() {
            self.actions.clone()
        } else {
            debug!("Reading actions from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
            buffer.split_whitespace().map(str::to_string).collect()
        };

        raw.iter()
            .map(|action| action.parse::<Action>().map_err(anyhow::Error::from))
            .collect()
    }

    fn print_event(&self, event: &PageEvent, intl: &PaginatorIntl) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", json!({ "event": "page", "data": event }));
            }
            OutputFormat::Text => {
                println!(
                    "page {} -> {} ({})",
                    event.previous_page_index,
                    event.page_index,
                    intl.range_label(event.page_index, event.page_size, event.length)
                );
            }
        }
    }
}

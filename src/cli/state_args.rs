//! Flags shared by every subcommand that builds a pagination state.

use clap::Args;
use serde_json::Value;
use std::sync::Arc;

use paginator::{PaginationState, PaginatorConfig, PaginatorInput, PaginatorIntl};

/// Raw state inputs; values are coerced the same way host updates are.
#[derive(Debug, Args)]
pub struct StateArgs {
    /// Total number of items
    #[arg(short = 'l', long = "length")]
    pub length: Option<String>,

    /// Items per page (0 disables pagination)
    #[arg(short = 's', long = "page-size")]
    pub page_size: Option<String>,

    /// Starting page index (0-based)
    #[arg(short = 'i', long = "page-index")]
    pub page_index: Option<String>,

    /// Comma-separated page size options, e.g. "5,10,25"
    #[arg(short = 'o', long = "options")]
    pub page_size_options: Option<String>,

    /// Hide the page size selector
    #[arg(long = "hide-page-size")]
    pub hide_page_size: bool,

    /// Show first/last page buttons
    #[arg(long = "show-first-last-buttons")]
    pub show_first_last_buttons: bool,
}

impl StateArgs {
    /// Build and initialize a state from config defaults overlaid with flags.
    pub fn build(&self, config: &PaginatorConfig, intl: Arc<PaginatorIntl>) -> PaginationState {
        let mut state = PaginationState::with_config(config, intl);
        self.apply_to(&mut state);
        state.initialize();
        state
    }

    /// Apply flags as raw host input, before initialization.
    pub fn apply_to(&self, state: &mut PaginationState) {
        for input in self.inputs() {
            state.apply(input);
        }
    }

    fn inputs(&self) -> Vec<PaginatorInput> {
        let raw = |value: &String| Value::String(value.clone());
        let mut inputs = Vec::new();

        if let Some(ref options) = self.page_size_options {
            inputs.push(PaginatorInput::PageSizeOptions(raw(options)));
        }
        if let Some(ref page_size) = self.page_size {
            inputs.push(PaginatorInput::PageSize(raw(page_size)));
        }
        if let Some(ref length) = self.length {
            inputs.push(PaginatorInput::Length(raw(length)));
        }
        if let Some(ref page_index) = self.page_index {
            inputs.push(PaginatorInput::PageIndex(raw(page_index)));
        }
        if self.hide_page_size {
            inputs.push(PaginatorInput::HidePageSize(Value::Bool(true)));
        }
        if self.show_first_last_buttons {
            inputs.push(PaginatorInput::ShowFirstLastButtons(Value::Bool(true)));
        }

        inputs
    }
}

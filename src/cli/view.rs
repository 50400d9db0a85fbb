use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::debug;

use paginator::{PaginationState, PaginatorConfig, PaginatorIntl};

use super::state_args::StateArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print the derived view for the given inputs
#[derive(Debug, Args)]
pub struct ViewCommand {
    #[command(flatten)]
    pub state: StateArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ViewCommand {
    pub async fn execute(&self, config: &PaginatorConfig) -> Result<()> {
        debug!("Executing view command");

        let intl = PaginatorIntl::shared();
        let mut state = self.state.build(config, intl.clone());
        print_view(&state, &intl, self.format);
        state.dispose();
        Ok(())
    }
}

pub fn print_view(state: &PaginationState, intl: &PaginatorIntl, format: OutputFormat) {
    let view = state.view();
    let range = intl.range_label(view.page_index, view.page_size, view.length);

    match format {
        OutputFormat::Json => {
            println!("{}", json!({ "event": "view", "data": view, "range": range }));
        }
        OutputFormat::Text => {
            let labels = intl.labels();
            println!("{}", range);
            println!(
                "page {} (last {}), {}: {}, {}: {}",
                view.page_index,
                view.last_page_index,
                labels.previous_page,
                availability(view.has_previous_page),
                labels.next_page,
                availability(view.has_next_page)
            );
            if !view.hide_page_size {
                let options: Vec<String> = view
                    .displayed_page_size_options
                    .iter()
                    .map(|size| {
                        if *size == view.page_size {
                            format!("[{}]", size)
                        } else {
                            size.to_string()
                        }
                    })
                    .collect();
                println!("{} {}", labels.items_per_page, options.join(" "));
            }
            if view.show_first_last_buttons {
                println!("{} / {}", labels.first_page, labels.last_page);
            }
            if view.is_out_of_range() {
                println!("warning: page index is past the last page");
            }
        }
    }
}

fn availability(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

use crate::coerce::{coerce_bool, coerce_number, coerce_number_list, parse_number_list};
use crate::errors::{PaginatorError, PaginatorResult};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default options applied to every pagination state the host creates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaginatorConfig {
    /// Initial page size; unset lets the first option or the fallback win
    pub page_size: Option<usize>,

    /// Page sizes offered in the size selector
    pub page_size_options: Vec<usize>,

    /// Whether to hide the size selector
    pub hide_page_size: bool,

    /// Whether to show first/last page buttons
    pub show_first_last_buttons: bool,
}

impl PaginatorConfig {
    /// Build configuration from defaults, a config file and the environment.
    ///
    /// An explicit path must exist; the default locations are optional.
    pub async fn init(explicit_path: Option<&Path>) -> PaginatorResult<Self> {
        debug!("Initializing paginator configuration");

        let mut config = Self::default();

        match Self::load_from_file(explicit_path).await {
            Ok(value) => config.apply_value(&value),
            Err(PaginatorError::ConfigNotFound) => debug!("No paginator config file found"),
            Err(e) => return Err(e),
        }

        config.load_from_env();

        for warning in config.warnings() {
            warn!("{}", warning);
        }

        Ok(config)
    }

    /// Candidate config files, most specific first.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.paginator.json"),
            PathBuf::from("./paginator.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("paginator").join("paginator.json"));
        }

        paths
    }

    /// Read the first config file found as raw JSON.
    pub async fn load_from_file(explicit_path: Option<&Path>) -> PaginatorResult<Value> {
        let candidates = match explicit_path {
            Some(path) => vec![path.to_path_buf()],
            None => Self::config_paths()
                .into_iter()
                .filter(|path| path.exists())
                .collect(),
        };

        let Some(path) = candidates.into_iter().next() else {
            return Err(PaginatorError::ConfigNotFound);
        };

        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| PaginatorError::ConfigRead { path: path.clone(), source })?;
        serde_json::from_str(&content).map_err(|source| PaginatorError::ConfigParse { path, source })
    }

    /// Overlay the keys present in a raw JSON object, coercing each value.
    pub fn apply_value(&mut self, value: &Value) {
        if let Some(page_size) = value.get("page_size") {
            self.page_size = Some(coerce_number(page_size)).filter(|size| *size > 0);
        }
        if let Some(options) = value.get("page_size_options") {
            self.page_size_options = coerce_number_list(options);
        }
        if let Some(hide) = value.get("hide_page_size") {
            self.hide_page_size = coerce_bool(hide);
        }
        if let Some(show) = value.get("show_first_last_buttons") {
            self.show_first_last_buttons = coerce_bool(show);
        }
    }

    /// Load overrides from `PAGINATOR_*` environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup, typically the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(page_size) = lookup("PAGINATOR_PAGE_SIZE") {
            let size = coerce_number(&Value::String(page_size));
            self.page_size = (size > 0).then_some(size);
        }

        if let Some(options) = lookup("PAGINATOR_PAGE_SIZE_OPTIONS") {
            self.page_size_options = parse_number_list(&options);
        }

        if let Some(hide) = lookup("PAGINATOR_HIDE_PAGE_SIZE") {
            self.hide_page_size = coerce_bool(&Value::String(hide));
        }

        if let Some(show) = lookup("PAGINATOR_SHOW_FIRST_LAST_BUTTONS") {
            self.show_first_last_buttons = coerce_bool(&Value::String(show));
        }
    }

    /// Non-fatal problems worth logging.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.page_size_options.contains(&0) {
            warnings.push(
                "page_size_options contains 0; selecting it disables pagination".to_string(),
            );
        }

        if self.page_size.is_none() && self.page_size_options.first() == Some(&0) {
            warnings.push(
                "first page size option is 0 and no page_size is set; pagination starts disabled"
                    .to_string(),
            );
        }

        warnings
    }
}

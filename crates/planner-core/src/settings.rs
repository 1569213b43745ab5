use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::budget::EditPolicy;
use crate::models::{Channel, Country, Industry, KpiGoal, PlanStatus, ProductType};
use crate::regions::GermanRegion;

/// Directory name under the home directory holding the store, logs and
/// last-used parameters.
pub const APP_DIR_NAME: &str = ".media-planner";

/// `~/.media-planner`, or `./.media-planner` when no home directory exists.
pub fn app_dir() -> PathBuf {
    app_dir_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
}

pub fn app_dir_in(base_dir: &Path) -> PathBuf {
    base_dir.join(APP_DIR_NAME)
}

/// Accept `all` or any plan status for `--status`.
fn parse_status_filter(value: &str) -> Result<String, String> {
    let value = value.trim().to_lowercase();
    if value == "all" || value.parse::<PlanStatus>().is_ok() {
        Ok(value)
    } else {
        Err(format!(
            "expected 'all' or one of: {}",
            PlanStatus::ALL.map(|s| s.as_str()).join(", ")
        ))
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal media planning: plan list, budget editor and planning assistant
#[derive(Parser, Debug, Clone)]
#[command(
    name = "media-planner",
    about = "Terminal media planning: plan list, budget editor and planning assistant",
    version
)]
pub struct Settings {
    /// View to open
    #[arg(long, default_value = "list", value_parser = ["list", "budget", "chat", "create", "summary"])]
    pub view: String,

    /// Plan store file (defaults to ~/.media-planner/plans.json)
    #[arg(long, env = "MEDIA_PLANNER_STORE")]
    pub store: Option<PathBuf>,

    /// Plan id for the budget and summary views
    #[arg(long)]
    pub plan_id: Option<String>,

    /// Initial client-name search for the list view
    #[arg(long)]
    pub search: Option<String>,

    /// Initial status filter for the list view
    #[arg(long, default_value = "all", value_parser = parse_status_filter)]
    pub status: String,

    /// Display theme
    #[arg(long, default_value = "dark", value_parser = ["dark", "light", "classic"])]
    pub theme: String,

    /// How out-of-range budget edits are handled
    #[arg(long, default_value = "clamp", value_parser = ["clamp", "strict"])]
    pub policy: String,

    // ── Creation flags (--view create) ────────────────────────────────────────
    /// Client name
    #[arg(long)]
    pub client: Option<String>,

    /// Product or service
    #[arg(long)]
    pub product_type: Option<ProductType>,

    /// Client industry
    #[arg(long)]
    pub industry: Option<Industry>,

    /// Comma-separated KPI goals
    #[arg(long, value_delimiter = ',')]
    pub goals: Vec<KpiGoal>,

    /// Target country
    #[arg(long, default_value = "germany")]
    pub country: Country,

    /// Campaign start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Campaign end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Comma-separated channels (recommended channels when omitted)
    #[arg(long, value_delimiter = ',')]
    pub channels: Vec<Channel>,

    /// Comma-separated German states (recommended states when omitted)
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<GermanRegion>,

    /// Comma-separated age ranges
    #[arg(long, value_delimiter = ',')]
    pub ages: Vec<String>,

    /// Comma-separated genders
    #[arg(long, value_delimiter = ',')]
    pub genders: Vec<String>,

    /// Comma-separated income levels
    #[arg(long, value_delimiter = ',')]
    pub income: Vec<String>,

    /// Comma-separated interests
    #[arg(long, value_delimiter = ',')]
    pub interests: Vec<String>,

    /// Total budget in euros (seeded from the channel costs when omitted)
    #[arg(long)]
    pub total: Option<f64>,

    /// Plan description
    #[arg(long)]
    pub description: Option<String>,

    /// Send the created plan for approval instead of saving a draft
    #[arg(long)]
    pub submit: bool,

    // ── Diagnostics ───────────────────────────────────────────────────────────
    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.media-planner/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        app_dir_in(base_dir).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but with an explicit argument
    /// list and config path, so tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(path = %config_path.display(), error = %e, "could not clear last-used params");
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Only interactive views are ever persisted.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "store") && settings.store.is_none() {
            settings.store = last.store;
        }
        if !is_arg_explicitly_set(&matches, "policy") {
            if let Some(v) = last.policy {
                settings.policy = v;
            }
        }

        settings = Self::apply_debug(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(path = %config_path.display(), error = %e, "could not save last-used params");
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Parsed `--policy`; unknown values fall back to clamping.
    pub fn edit_policy(&self) -> EditPolicy {
        self.policy.parse().unwrap_or_default()
    }

    /// Parsed `--status`; `None` means all statuses.
    pub fn status_filter(&self) -> Option<PlanStatus> {
        self.status.parse().ok()
    }

    /// `--store`, or `~/.media-planner/plans.json`.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| app_dir().join("plans.json"))
    }

    /// Whether the view takes over the terminal.
    pub fn is_tui_view(&self) -> bool {
        matches!(self.view.as_str(), "list" | "budget")
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            view: s.is_tui_view().then(|| s.view.clone()),
            theme: Some(s.theme.clone()),
            store: s.store.clone(),
            policy: Some(s.policy.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

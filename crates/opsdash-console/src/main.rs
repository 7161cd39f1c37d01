//! OpsDash console: entry point.
//!
//! Manages the stored configuration of the operations dashboard from a
//! terminal: inspect it, edit it, reset it, and move it between machines as
//! JSON.
//!
//! # Usage
//!
//! ```text
//! opsdash [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show     Print the current configuration
//!   export   Write the configuration as indented JSON
//!   import   Replace the configuration with a (partial) JSON document
//!   reset    Restore the built-in defaults
//!   edit     Change fields and commit them in one step
//!   check    List advisory hints for the panel contents
//!
//! Options:
//!   --settings    <PATH>  Console settings file
//!   --storage-dir <DIR>   Directory holding the dashboard document
//!   --ephemeral           Keep everything in memory for this run
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Description                                   |
//! |-----------------------|-----------------------------------------------|
//! | `OPSDASH_SETTINGS`    | Settings file (default: platform config dir)  |
//! | `OPSDASH_STORAGE_DIR` | Storage directory (overrides the settings)    |
//! | `RUST_LOG`            | Log filter (overrides `console.log_level`)    |
//!
//! Logs go to stderr so that `export` output can be piped.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use opsdash_console::application::config_store::{ConfigStore, KeyValueStorage};
use opsdash_console::application::session::DashboardSession;
use opsdash_console::infrastructure::settings::{
    load_settings, load_settings_from, Settings, SettingsError,
};
use opsdash_console::infrastructure::storage::{FileStorage, MemoryStorage};
use opsdash_core::{config_hints, ColumnPreset, DashboardConfig, PanelId};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Configuration manager for the operations dashboard.
#[derive(Debug, Parser)]
#[command(
    name = "opsdash",
    about = "Inspect, edit and transfer the operations dashboard configuration",
    version
)]
struct Cli {
    /// Console settings file (TOML).
    #[arg(long, global = true, env = "OPSDASH_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding the dashboard document.
    ///
    /// Overrides `storage.dir` from the settings file.
    #[arg(long, global = true, env = "OPSDASH_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Use in-memory storage: start from the defaults and persist nothing.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current configuration.
    Show,

    /// Write the configuration as indented JSON.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the configuration with a (partial) JSON document.
    ///
    /// Missing or invalid fields take their default values.
    Import {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Restore the built-in defaults.
    Reset,

    /// Change fields and commit them in one step.
    Edit(EditArgs),

    /// List advisory hints for the panel contents.
    Check,
}

/// Field changes for `opsdash edit`.  Values go through the same
/// normalization as the interactive editor.
#[derive(Debug, Default, Args)]
struct EditArgs {
    /// Dashboard title.
    #[arg(long)]
    name: Option<String>,

    /// Refresh interval in seconds (clamped to 30..=3600).
    #[arg(long)]
    refresh: Option<String>,

    /// Column widths as three comma-separated percentages, e.g. `30,45,25`.
    #[arg(long, conflicts_with = "preset")]
    columns: Option<String>,

    /// Named column layout: cameras, balanced or weather.
    #[arg(long)]
    preset: Option<ColumnPreset>,

    /// Panel content as `ID=CONTENT`; a bare URL becomes an iframe.
    ///
    /// May be given more than once.
    #[arg(long = "panel", value_name = "ID=CONTENT")]
    panels: Vec<String>,
}

impl EditArgs {
    /// Opens a draft on `session`, applies every given field and commits it.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed `--columns` or `--panel` value (the
    /// draft is discarded and nothing is saved) or when the commit fails.
    fn apply<S: KeyValueStorage>(
        self,
        session: &mut DashboardSession<S>,
    ) -> anyhow::Result<DashboardConfig> {
        let columns = self.columns.as_deref().map(parse_columns).transpose()?;
        let panels = self
            .panels
            .iter()
            .map(|assignment| parse_panel_assignment(assignment))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let draft = session.begin_edit();
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(refresh) = self.refresh {
            draft.refresh_interval = refresh;
        }
        if let Some(preset) = self.preset {
            draft.apply_preset(preset);
        }
        if let Some(columns) = columns {
            draft.columns = columns;
        }
        for (id, content) in panels {
            draft.set_panel(id, content);
        }

        match session.commit_edit() {
            Ok(cfg) => Ok(cfg.clone()),
            Err(e) => {
                session.discard_edit();
                Err(e).context("failed to save edited configuration")
            }
        }
    }
}

/// Splits `A,B,C` into the three raw column fields of the editor.
fn parse_columns(text: &str) -> anyhow::Result<[String; 3]> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] => Ok([a.to_string(), b.to_string(), c.to_string()]),
        _ => bail!("--columns expects three comma-separated values, got '{text}'"),
    }
}

/// Parses `ID=CONTENT` into a panel id and its raw content.
fn parse_panel_assignment(text: &str) -> anyhow::Result<(PanelId, String)> {
    let (id, content) = text
        .split_once('=')
        .with_context(|| format!("--panel expects ID=CONTENT, got '{text}'"))?;
    let id: PanelId = id.trim().parse()?;
    Ok((id, content.to_string()))
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Executes `command` against `session`, returning what to print on stdout.
fn run<S: KeyValueStorage>(
    session: &mut DashboardSession<S>,
    command: Command,
) -> anyhow::Result<String> {
    match command {
        Command::Show => Ok(describe(session.current())),
        Command::Export { output } => {
            let text = session.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("exported configuration to {}", path.display());
                    Ok(String::new())
                }
                None => Ok(text),
            }
        }
        Command::Import { file } => {
            let text = read_input(&file)?;
            let cfg = session.import(&text)?;
            Ok(format!("Imported '{}'.", cfg.display_title()))
        }
        Command::Reset => {
            let cfg = session.reset()?;
            Ok(format!("Reset to defaults ('{}').", cfg.display_title()))
        }
        Command::Edit(args) => {
            let cfg = args.apply(session)?;
            Ok(describe(&cfg))
        }
        Command::Check => {
            let hints = config_hints(session.current());
            if hints.is_empty() {
                return Ok("No issues found.".to_string());
            }
            Ok(hints
                .iter()
                .map(|(id, hint)| format!("{}: {hint}", id.label()))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn read_input(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

/// Human-readable summary of `cfg` as the renderer would apply it.
fn describe(cfg: &DashboardConfig) -> String {
    let [left, center, right] = cfg.column_layout();
    let mut lines = vec![
        format!("Title:    {}", cfg.display_title()),
        format!(
            "Refresh:  every {}s",
            cfg.effective_refresh_interval().as_secs()
        ),
        format!("Columns:  {left}% / {center}% / {right}%"),
        "Panels:".to_string(),
    ];
    for (id, content) in cfg.panels.iter() {
        lines.push(format!("  {:<22} {content}", id.label()));
    }
    lines.join("\n")
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Loads the settings named on the command line, or the platform default.
///
/// A platform without a config directory falls back to default settings.
fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let loaded = match &cli.settings {
        Some(path) => load_settings_from(path),
        None => match load_settings() {
            Err(SettingsError::NoPlatformConfigDir) => Ok(Settings::default()),
            other => other,
        },
    };
    loaded.context("failed to load console settings")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    // RUST_LOG wins over the settings file.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.console.log_level)),
        )
        .init();

    let output = if cli.ephemeral {
        debug!("using in-memory storage");
        let mut session = DashboardSession::open(ConfigStore::new(MemoryStorage::new()));
        run(&mut session, cli.command)?
    } else {
        let dir = match cli.storage_dir {
            Some(dir) => dir,
            None => settings
                .storage_dir()
                .context("no storage directory configured")?,
        };
        debug!("using storage directory {}", dir.display());
        let mut session = DashboardSession::open(ConfigStore::new(FileStorage::new(dir)));
        run(&mut session, cli.command)?
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DashboardSession<MemoryStorage> {
        DashboardSession::open(ConfigStore::new(MemoryStorage::new()))
    }

    #[test]
    fn test_cli_defaults_to_persistent_storage() {
        let cli = Cli::parse_from(["opsdash", "show"]);
        assert!(!cli.ephemeral);
        assert!(matches!(cli.command, Command::Show));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        // Arrange / Act
        let cli = Cli::parse_from(["opsdash", "reset", "--storage-dir", "/tmp/dash", "--ephemeral"]);

        // Assert
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/dash")));
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_cli_parses_edit_fields() {
        // Arrange / Act
        let cli = Cli::parse_from([
            "opsdash",
            "edit",
            "--name",
            "Storm Watch",
            "--preset",
            "Weather",
            "--panel",
            "centerTop=https://radar.example/",
            "--panel",
            "rightBottom=<p>x</p>",
        ]);

        // Assert
        let Command::Edit(args) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(args.name.as_deref(), Some("Storm Watch"));
        assert_eq!(args.preset, Some(ColumnPreset::Weather));
        assert_eq!(args.panels.len(), 2);
    }

    #[test]
    fn test_cli_rejects_unknown_preset() {
        let result = Cli::try_parse_from(["opsdash", "edit", "--preset", "wide"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_columns_with_preset() {
        let result = Cli::try_parse_from([
            "opsdash", "edit", "--preset", "cameras", "--columns", "30,40,30",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_columns_requires_three_values() {
        assert_eq!(
            parse_columns("30, 45,25").unwrap(),
            ["30".to_string(), "45".to_string(), "25".to_string()]
        );
        assert!(parse_columns("30,70").is_err());
        assert!(parse_columns("10,20,30,40").is_err());
    }

    #[test]
    fn test_parse_panel_assignment_keeps_equals_in_content() {
        let (id, content) = parse_panel_assignment("leftTop=https://x.example/?a=1").unwrap();
        assert_eq!(id, PanelId::LeftTop);
        assert_eq!(content, "https://x.example/?a=1");
    }

    #[test]
    fn test_parse_panel_assignment_rejects_unknown_id() {
        assert!(parse_panel_assignment("middle=x").is_err());
        assert!(parse_panel_assignment("no separator").is_err());
    }

    #[test]
    fn test_edit_commits_normalized_values() {
        // Arrange
        let mut session = session();
        let args = EditArgs {
            refresh: Some("5".to_string()),
            columns: Some("90,90,5".to_string()),
            panels: vec!["centerTop=https://radar.example/".to_string()],
            ..EditArgs::default()
        };

        // Act
        let cfg = args.apply(&mut session).unwrap();

        // Assert
        assert_eq!(cfg.refresh_interval_sec, 30.0);
        assert_eq!(cfg.columns_pct, [49.0, 46.0, 5.0]);
        assert_eq!(
            cfg.panels.get(PanelId::CenterTop),
            r#"<iframe src="https://radar.example/" loading="lazy"></iframe>"#
        );
        assert!(!session.is_editing());
    }

    #[test]
    fn test_edit_with_bad_panel_saves_nothing() {
        let mut session = session();
        let args = EditArgs {
            name: Some("Half applied".to_string()),
            panels: vec!["bogus=x".to_string()],
            ..EditArgs::default()
        };

        assert!(args.apply(&mut session).is_err());
        assert_eq!(session.current(), &DashboardConfig::default());
        assert!(!session.is_editing());
    }

    #[test]
    fn test_run_check_reports_twitch_hint() {
        // Arrange
        let mut session = session();
        session
            .import(r#"{"panels": {"rightTop": "<iframe src=\"https://player.twitch.tv/?channel=wx\"></iframe>"}}"#)
            .unwrap();

        // Act
        let output = run(&mut session, Command::Check).unwrap();

        // Assert
        assert!(output.starts_with("Right Top: Twitch note"), "got {output}");
    }

    #[test]
    fn test_run_show_uses_effective_values() {
        let mut session = session();
        session
            .import(r#"{"name": "", "refreshIntervalSec": 5}"#)
            .unwrap();

        let output = run(&mut session, Command::Show).unwrap();

        assert!(output.contains("Title:    Operations Dashboard"));
        assert!(output.contains("every 30s"));
        assert!(output.contains("35% / 40% / 25%"));
    }

    #[test]
    fn test_run_reset_restores_defaults() {
        let mut session = session();
        session.import(r#"{"name": "Custom"}"#).unwrap();

        run(&mut session, Command::Reset).unwrap();

        assert_eq!(session.current(), &DashboardConfig::default());
    }
}

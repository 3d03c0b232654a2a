#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{bail, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use planscope::config::{self, AppConfig, TuiPreferences, Validatable};
use planscope::history::{self, HistoryCommand, HistoryStatus, HistoryStore};
use planscope::reports::{render_plan, should_use_color};
use planscope::runner::{self, Tool};
use planscope::tui::{
    run_viewer, RunOptions, Theme, ThemeChoice, ViewerApp, ViewerOptions, ViewerOutcome,
};
use planscope::{parse_plan, update, Plan};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NO_CHANGES: &str = "No changes. Infrastructure is up-to-date.";

#[derive(Parser)]
#[command(name = "planscope")]
#[command(version)]
#[command(about = "Browse Terraform and OpenTofu plans in the terminal", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "EXIT CODES:
  0  Success
  1  Error (unreadable input, tool failure, bad configuration)
  2  Apply was confirmed in the viewer but the tool run failed")]
struct Cli {
    /// Plan output to view; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the plan as text instead of opening the viewer
    #[arg(short, long, global = true)]
    print: bool,

    /// Color theme
    #[arg(long, global = true, value_parser = clap::builder::PossibleValuesParser::new(ThemeChoice::NAMES))]
    theme: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to config file (default: auto-discover .planscope.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run plan, save it to history and open it in the viewer
    Plan(RunArgs),

    /// Run plan, review it in the viewer, then apply on confirmation
    Apply(RunArgs),

    /// List, view or prune saved runs
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show, export or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Plan a destroy run
    #[arg(long)]
    destroy: bool,

    /// Tool binary to run (default: terraform or tofu from PATH)
    #[arg(long)]
    tool: Option<String>,

    /// Extra arguments passed to the tool, after `--`
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved runs, newest first
    List,
    /// Open a saved run in the viewer
    View {
        /// Entry id as shown by `history list`
        id: usize,
    },
    /// Delete entries beyond the configured maximum
    Prune,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write an example .planscope.yaml in the current directory
    Init,
}

/// Settings shared by every command that shows a plan.
struct Session {
    config: AppConfig,
    theme: Theme,
    print: bool,
    colored: bool,
}

impl Session {
    fn show(&self, plan: Plan, apply_enabled: bool) -> Result<ViewerOutcome> {
        if self.print {
            print!("{}", render_plan(&plan, self.colored));
            return Ok(ViewerOutcome::default());
        }

        let options = ViewerOptions::from_config(&self.config).with_apply(apply_enabled);
        let mut app = ViewerApp::new(plan, self.theme, options);
        let run = RunOptions {
            mouse: self.config.tui.mouse_enabled,
            tick_rate: Duration::from_millis(self.config.tui.tick_rate_ms),
        };
        let updates = update::spawn_check(&self.config.update);
        Ok(run_viewer(&mut app, run, Some(updates))?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, opens_viewer(&cli));

    let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("using config {}", path.display());
    }
    for problem in config.validate() {
        tracing::warn!("config: {problem}");
    }

    let print = cli.print || !io::stdout().is_terminal();
    let session = Session {
        theme: resolve_theme(cli.theme.as_deref(), &config)?,
        colored: should_use_color(cli.no_color),
        print,
        config,
    };

    let exit_code = match cli.command {
        None => {
            view_input(&session, cli.file.as_deref())?;
            0
        }
        Some(Commands::Plan(args)) => run_tool(&session, HistoryCommand::Plan, args)?,
        Some(Commands::Apply(args)) => {
            let command = if args.destroy {
                HistoryCommand::Destroy
            } else {
                HistoryCommand::Apply
            };
            run_tool(&session, command, args)?
        }
        Some(Commands::History { action }) => {
            run_history(&session, action)?;
            0
        }
        Some(Commands::Config { action }) => {
            run_config(&session.config, loaded_from.as_deref(), action)?;
            0
        }
        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "planscope", &mut io::stdout());
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Whether this invocation will take over the terminal.
fn opens_viewer(cli: &Cli) -> bool {
    let viewer_command = match &cli.command {
        None | Some(Commands::Plan(_) | Commands::Apply(_)) => true,
        Some(Commands::History { action }) => matches!(action, HistoryAction::View { .. }),
        Some(_) => false,
    };
    viewer_command && !cli.print && io::stdout().is_terminal()
}

/// Logs go to stderr. While the viewer owns the screen they are off unless
/// asked for with `--verbose` or `RUST_LOG`.
fn init_logging(verbose: bool, viewer: bool) {
    let log_level = if verbose {
        "debug"
    } else if viewer {
        "off"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Theme from the flag, then a non-default config value, then the last
/// theme remembered in preferences. An explicit flag is remembered.
fn resolve_theme(flag: Option<&str>, config: &AppConfig) -> Result<Theme> {
    let name = match flag {
        Some(name) => name.to_string(),
        None if config.tui.theme != "auto" => config.tui.theme.clone(),
        None => TuiPreferences::load().theme,
    };
    let Some(choice) = ThemeChoice::from_name(&name) else {
        if flag.is_some() {
            bail!(
                "unknown theme '{name}' (expected one of: {})",
                ThemeChoice::NAMES.join(", ")
            );
        }
        tracing::warn!("ignoring unknown theme '{name}'");
        return Ok(Theme::resolve(ThemeChoice::Auto));
    };

    if flag.is_some() {
        let prefs = TuiPreferences {
            theme: choice.name().to_string(),
        };
        if let Err(e) = prefs.save() {
            tracing::debug!("could not save preferences: {e}");
        }
    }
    Ok(Theme::resolve(choice))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no plan input: pass a file or pipe plan output on stdin");
            }
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read plan from stdin")?;
            Ok(text)
        }
    }
}

fn view_input(session: &Session, file: Option<&Path>) -> Result<()> {
    let from_stdin = file.map_or(true, |f| f == Path::new("-"));
    let text = read_input(file)?;

    // Piped input is gone once read, so keep a copy.
    if from_stdin {
        if let Some(store) = history_store(&session.config) {
            save_entry(&store, HistoryCommand::View, None, &text);
        }
    }

    let plan = parse_plan(&text);
    tracing::debug!(resources = plan.resources.len(), "parsed plan");
    session.show(plan, false)?;
    Ok(())
}

// ============================================================================
// plan / apply
// ============================================================================

fn run_tool(session: &Session, command: HistoryCommand, args: RunArgs) -> Result<i32> {
    let preferred = args
        .tool
        .as_deref()
        .or(session.config.runner.tool.as_deref());
    let tool = Tool::detect(preferred)?;
    let tool_args = if args.destroy {
        runner::ensure_destroy_flag(args.args)
    } else {
        args.args
    };

    let plan_file = runner::temp_plan_file();
    let result = plan_and_review(session, &tool, command, &tool_args, &plan_file);
    if plan_file.exists() {
        if let Err(e) = std::fs::remove_file(&plan_file) {
            tracing::debug!("could not remove {}: {e}", plan_file.display());
        }
    }
    result
}

fn plan_and_review(
    session: &Session,
    tool: &Tool,
    command: HistoryCommand,
    args: &[String],
    plan_file: &Path,
) -> Result<i32> {
    eprintln!("Running {} plan...", tool.name());
    let output = tool.plan(args, Some(plan_file))?;

    let store = history_store(&session.config);
    let initial_status = (command != HistoryCommand::Plan).then_some(HistoryStatus::Pending);
    let entry = store.as_ref().and_then(|store| {
        let content = format!("{}{output}", history::run_header(tool.name(), command, args));
        let entry = save_entry(store, command, initial_status, &content);
        if let Err(e) = store.prune() {
            tracing::warn!("could not prune history: {e}");
        }
        entry
    });

    let plan = parse_plan(&output);
    if plan.resources.is_empty() {
        println!("{NO_CHANGES}");
        if initial_status.is_some() {
            finish_entry(store.as_ref(), entry, None, HistoryStatus::Cancelled);
        }
        return Ok(0);
    }

    let outcome = session.show(plan, !session.print)?;
    if !outcome.apply_requested {
        if initial_status.is_some() {
            finish_entry(store.as_ref(), entry, None, HistoryStatus::Cancelled);
        }
        return Ok(0);
    }

    if let (Some(store), Some(path)) = (store.as_ref(), entry.as_deref()) {
        if let Err(e) = store.append(path, "\n--- APPLY OUTPUT ---\n") {
            tracing::warn!("could not update history: {e}");
        }
    }

    eprintln!("Applying with {}...", tool.name());
    match tool.apply(plan_file) {
        Ok(()) => {
            let footer = history::apply_footer(true, None);
            finish_entry(store.as_ref(), entry, Some(&footer), HistoryStatus::Success);
            Ok(0)
        }
        Err(e) => {
            let message = e.to_string();
            let footer = history::apply_footer(false, Some(&message));
            finish_entry(store.as_ref(), entry, Some(&footer), HistoryStatus::Failed);
            eprintln!("Error: {message}");
            Ok(2)
        }
    }
}

// ============================================================================
// history
// ============================================================================

fn history_store(config: &AppConfig) -> Option<HistoryStore> {
    if !config.history.enabled {
        return None;
    }
    match HistoryStore::from_config(&config.history) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("history disabled: {e}");
            None
        }
    }
}

fn save_entry(
    store: &HistoryStore,
    command: HistoryCommand,
    status: Option<HistoryStatus>,
    content: &str,
) -> Option<PathBuf> {
    match store.save(command, status, content) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("could not save history: {e}");
            None
        }
    }
}

/// Append an optional footer and record the final status.
fn finish_entry(
    store: Option<&HistoryStore>,
    entry: Option<PathBuf>,
    footer: Option<&str>,
    status: HistoryStatus,
) {
    let (Some(store), Some(path)) = (store, entry) else {
        return;
    };
    if let Some(footer) = footer {
        if let Err(e) = store.append(&path, footer) {
            tracing::warn!("could not update history: {e}");
        }
    }
    if let Err(e) = store.set_status(&path, status) {
        tracing::warn!("could not update history: {e}");
    }
}

fn run_history(session: &Session, action: HistoryAction) -> Result<()> {
    let store = HistoryStore::from_config(&session.config.history)?;
    match action {
        HistoryAction::List => {
            let entries = store.list()?;
            if entries.is_empty() {
                println!("No history entries in {}", store.dir().display());
                return Ok(());
            }
            for entry in &entries {
                let summary = store.summary(entry).ok().flatten();
                println!("{}", entry.display_line(summary.as_ref()));
            }
        }
        HistoryAction::View { id } => {
            let (entry, content) = store.get(id)?;
            tracing::debug!(path = %entry.path.display(), "viewing history entry");
            session.show(parse_plan(&content), false)?;
        }
        HistoryAction::Prune => {
            let removed = store.prune()?;
            println!("Removed {removed} history entries");
        }
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn run_config(config: &AppConfig, loaded_from: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Schema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".planscope.yaml");
            if target.exists() {
                bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}

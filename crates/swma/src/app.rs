//! Wiring between parsed arguments, configuration and the tool registry.

use crate::{
    cli::{Cli, Command, RunArgs},
    error::{CliError, CliResult},
    terminal::CliContext,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use swma_common::{single_line, truncate_string, LoggingConfig};
use swma_config::{Config, ConfigLoader};
use swma_feeds::CurrentConditions;
use swma_tools::{
    tools::{forecast::PROBABILITY_FILE, goes::PROTON_FILE, goes::XRAY_FILE},
    Selection, ToolEnv, ToolRegistry,
};
use tracing::{debug, info};

const LIST_WIDTH: usize = 100;

/// Loads the configuration and applies the command line overrides.
pub fn load_config(cli: &Cli) -> CliResult<Config> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.output.directory.clone_from(dir);
    }
    Ok(config)
}

/// Logging settings with `-v` raising the level.
pub fn logging_config(config: &Config, verbose: u8) -> LoggingConfig {
    let mut logging = config.logging.to_logging_config();
    match verbose {
        0 => {}
        1 => logging.level = "debug".to_string(),
        _ => logging.level = "trace".to_string(),
    }
    logging
}

/// A registry tool plus the answers to its selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Tool name or slug.
    pub tool: String,
    /// Preset selections.
    pub selections: Vec<(Selection, String)>,
    /// Chart file name to redirect, and where to.
    pub output: Option<(&'static str, PathBuf)>,
}

impl Invocation {
    fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            selections: Vec::new(),
            output: None,
        }
    }

    fn select(mut self, selection: Selection, value: impl Into<String>) -> Self {
        self.selections.push((selection, value.into()));
        self
    }

    fn redirect(mut self, file_name: &'static str, output: Option<&PathBuf>) -> Self {
        self.output = output.map(|path| (file_name, path.clone()));
        self
    }

    /// The tool run a command stands for; `None` for `list` and `conditions`.
    pub fn from_command(command: &Command) -> Option<Self> {
        let invocation = match command {
            Command::Run(RunArgs {
                tool,
                mode,
                no_flares,
                timeline,
                pfss,
            }) => {
                let mut invocation = Self::new(tool.as_str())
                    .select(Selection::Flares, (!no_flares).to_string())
                    .select(Selection::Pfss, pfss.to_string());
                if let Some(mode) = mode {
                    invocation = invocation.select(Selection::Mode, mode.as_str());
                }
                if let Some(timeline) = timeline {
                    invocation = invocation.select(Selection::Timeline, timeline.as_str());
                }
                invocation
            }
            Command::Xrays {
                mode,
                no_flares,
                output,
            } => Self::new("xrays")
                .select(Selection::Mode, mode.as_str())
                .select(Selection::Flares, (!no_flares).to_string())
                .redirect(XRAY_FILE, output.as_ref()),
            Command::Protons { mode, output } => Self::new("protons")
                .select(Selection::Mode, mode.as_str())
                .redirect(PROTON_FILE, output.as_ref()),
            Command::Forecast { timeline, output } => Self::new("forecast")
                .select(Selection::Timeline, timeline.as_str())
                .redirect(PROBABILITY_FILE, output.as_ref()),
            Command::List | Command::Conditions => return None,
        };
        Some(invocation)
    }

    fn context<W: Write + Send>(&self, dir: &Path, out: W) -> CliContext<W> {
        let mut ctx = CliContext::new(dir, out);
        for (selection, value) in &self.selections {
            ctx = ctx.with_selection(*selection, value.as_str());
        }
        if let Some((file_name, path)) = &self.output {
            ctx = ctx.with_output(file_name, path.as_path());
        }
        ctx
    }
}

fn prepare_output_dir(dir: &Path) -> CliResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| CliError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

async fn run_tool<W: Write + Send>(invocation: &Invocation, config: &Config, out: W) -> CliResult<W> {
    let env = ToolEnv::from_config(config)?;
    let dir = config.output.directory.as_path();
    prepare_output_dir(dir)?;
    debug!(tool = %invocation.tool, dir = %dir.display(), "Running tool from the command line");

    let mut ctx = invocation.context(dir, out);
    ToolRegistry::standard().run(&invocation.tool, &env, &mut ctx).await?;
    info!(tool = %invocation.tool, files = ctx.written().len(), "Done");
    Ok(ctx.into_inner())
}

/// Runs one command, writing text to `out`, and hands `out` back.
pub async fn execute<W: Write + Send>(command: &Command, config: &Config, mut out: W) -> CliResult<W> {
    if let Some(invocation) = Invocation::from_command(command) {
        return run_tool(&invocation, config, out).await;
    }

    match command {
        Command::List => {
            for entry in ToolRegistry::standard().entries() {
                writeln!(out, "{:<10} {}", entry.slug, entry.name)?;
                if let Some(description) = entry.description {
                    writeln!(out, "{:<10} {}", "", truncate_string(&single_line(description), LIST_WIDTH))?;
                }
            }
        }
        Command::Conditions => {
            let env = ToolEnv::from_config(config)?;
            let conditions = CurrentConditions::fetch(&env.client, &env.feeds.swpc_base_url).await?;
            writeln!(out, "{conditions}")?;
        }
        _ => {}
    }
    Ok(out)
}

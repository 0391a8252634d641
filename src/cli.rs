//! CLI argument parsing and command dispatch
//!
//! Built-in commands (`auth`, `version`) are derived with clap. The remote
//! commands are generated from [`anytype_cli::registry::COMMANDS`], one
//! subcommand per entry, grouped by the first path segment.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, Subcommand};
use log::debug;

use anytype_cli::client::HttpBackend;
use anytype_cli::config::Config;
use anytype_cli::defaults::default_config_path;
use anytype_cli::dispatch::{Dispatcher, Invocation};
use anytype_cli::output::{OutputConfig, OutputFormat};
use anytype_cli::registry::{self, CommandSpec};
use anytype_cli::suggestions;

use crate::commands;

/// Options accepted by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the config file (default: ~/.anytype-cli/config.yaml)
    #[arg(long, global = true, value_name = "FILE", env = "ANYTYPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the Anytype API, overriding the config file
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the config file and apply `--base-url`.
    pub fn load_config(&self) -> Result<(PathBuf, Config)> {
        let path = self.config.clone().unwrap_or_else(default_config_path);
        let mut config =
            Config::load(&path).map_err(|e| suggestions::config_unreadable(&path, &e))?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        debug!("Using config {} against {}", path.display(), config.base_url);
        Ok((path, config))
    }
}

#[derive(Subcommand, Debug)]
enum Builtin {
    /// Authenticate with the Anytype app
    Auth(commands::auth::AuthArgs),
    /// Show version information
    Version,
}

/// Parsed command line.
pub struct Cli {
    matches: ArgMatches,
}

impl Cli {
    /// Parse `std::env::args`, exiting on usage errors.
    pub fn parse() -> Self {
        Self {
            matches: command().get_matches(),
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let globals = GlobalArgs::from_arg_matches(&self.matches)?;
        init_logging(&globals);
        let output = OutputConfig::from_env_and_flag(&globals.color);

        let name = self
            .matches
            .subcommand_name()
            .ok_or_else(|| anyhow!("no command given"))?;

        if Builtin::has_subcommand(name) {
            return match Builtin::from_arg_matches(&self.matches)? {
                Builtin::Auth(args) => commands::auth::execute(args, &globals, &output),
                Builtin::Version => commands::version::execute(),
            };
        }

        let (spec, leaf) =
            find_spec(&self.matches).ok_or_else(|| anyhow!("unknown command '{name}'"))?;
        run_registry_command(spec, leaf, &globals)
    }
}

/// The full clap command tree.
pub fn command() -> Command {
    let cmd = Command::new("anytype-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Anytype CLI - Manage your Anytype spaces and objects from the terminal")
        .subcommand_required(true)
        .arg_required_else_help(true);
    let cmd = GlobalArgs::augment_args(cmd);
    let cmd = Builtin::augment_subcommands(cmd);
    registry_subcommands(cmd)
}

fn registry_subcommands(mut cmd: Command) -> Command {
    let mut groups: Vec<(&'static str, Vec<Command>)> = Vec::new();

    for spec in registry::COMMANDS {
        match *spec.path {
            [name] => cmd = cmd.subcommand(leaf_command(name, spec)),
            [group, name] => {
                let leaf = leaf_command(name, spec);
                match groups.iter_mut().find(|(g, _)| *g == group) {
                    Some((_, leaves)) => leaves.push(leaf),
                    None => groups.push((group, vec![leaf])),
                }
            }
            _ => {}
        }
    }

    for (group, leaves) in groups {
        cmd = cmd.subcommand(
            Command::new(group)
                .about(registry::group_about(group).unwrap_or_default())
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommands(leaves),
        );
    }
    cmd
}

fn leaf_command(name: &'static str, spec: &'static CommandSpec) -> Command {
    let mut cmd = Command::new(name).about(spec.about);

    for positional in spec.positionals {
        let mut arg = Arg::new(positional.name)
            .help(positional.help)
            .required(true);
        if positional.is_variadic() {
            arg = arg.num_args(1..).action(ArgAction::Append);
        }
        cmd = cmd.arg(arg);
    }

    for flag in spec.flags {
        let mut arg = Arg::new(flag.name)
            .long(flag.name)
            .help(flag.help)
            .value_name("VALUE")
            .allow_hyphen_values(true)
            .required(flag.required);
        if let Some(default) = flag.default {
            arg = arg.default_value(default);
        }
        if !flag.choices.is_empty() {
            arg = arg.value_parser(PossibleValuesParser::new(flag.choices.iter().copied()));
        }
        cmd = cmd.arg(arg);
    }
    cmd
}

fn find_spec(matches: &ArgMatches) -> Option<(&'static CommandSpec, &ArgMatches)> {
    let (first, sub) = matches.subcommand()?;
    if let Some(spec) = registry::find(&[first]) {
        return Some((spec, sub));
    }
    let (second, leaf) = sub.subcommand()?;
    registry::find(&[first, second]).map(|spec| (spec, leaf))
}

fn invocation(spec: &CommandSpec, matches: &ArgMatches) -> Invocation {
    let names = spec
        .positionals
        .iter()
        .map(|p| p.name)
        .chain(spec.flags.iter().map(|f| f.name));

    let mut invocation = Invocation::new();
    for name in names {
        if let Some(values) = matches.get_many::<String>(name) {
            invocation.set(name, values.cloned());
        }
    }
    invocation
}

fn run_registry_command(spec: &CommandSpec, matches: &ArgMatches, globals: &GlobalArgs) -> Result<()> {
    let (_, config) = globals.load_config()?;
    config
        .require_credentials()
        .map_err(|e| suggestions::explain(e, &config.base_url))?;

    let backend = HttpBackend::new(&config.base_url, config.app_key.as_str())?;
    let out = Dispatcher::new(&backend, config.timeout())
        .format(globals.output)
        .run(spec, &invocation(spec, matches))
        .map_err(|e| suggestions::explain(e, &config.base_url))?;
    print!("{out}");
    Ok(())
}

fn init_logging(globals: &GlobalArgs) {
    let level = if globals.verbose {
        "debug"
    } else {
        globals.log_level.as_str()
    };

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None);
    // A second init only happens in tests; ignore it.
    let _ = builder.try_init();
}

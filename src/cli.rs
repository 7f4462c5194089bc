// CLI module for argument parsing and path resolution

use crate::config::UserConfig;
use crate::error::{LazyClaudeError, Result};
use crate::paths::{self, ResolvedPaths, DEFAULT_PROJECT_SUBDIR};
use clap::parser::ValueSource;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// LazyClaude - curate which shared resources are linked into a project
///
/// Resources live in category directories of a global store. Applying one
/// creates a symlink to it inside the project; removing it deletes the link.
#[derive(Parser, Debug, Clone)]
#[command(name = "lazyclaude")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project directory whose managed subdirectory receives the links
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// Root of the global resource store [default: ~/.config/claude]
    #[arg(short = 'g', long = "global-root", env = "LAZYCLAUDE_GLOBAL_ROOT")]
    pub global_root: Option<String>,

    /// Name of the managed directory inside the project [default: .claude]
    #[arg(short = 's', long = "project-subdir", env = "LAZYCLAUDE_PROJECT_SUBDIR")]
    pub project_subdir: Option<String>,

    /// Write logs to this file instead of the default cache location
    #[arg(long = "log-file")]
    pub log_file: Option<String>,

    /// Store the --global-root, --project-subdir and --log-file given on the
    /// command line in the user config and exit (environment values are not
    /// stored)
    #[arg(long = "save-config", action = ArgAction::SetTrue)]
    pub save_config: bool,

    /// `global_root` came from `LAZYCLAUDE_GLOBAL_ROOT`
    #[arg(skip)]
    pub global_root_from_env: bool,

    /// `project_subdir` came from `LAZYCLAUDE_PROJECT_SUBDIR`
    #[arg(skip)]
    pub project_subdir_from_env: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        match Self::try_parse_args_from(std::env::args_os()) {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Parses `argv`, recording which values were filled in from the
    /// environment rather than given as flags
    pub fn try_parse_args_from<I, T>(argv: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(argv)?;
        let mut args = Self::from_arg_matches(&matches)?;
        args.global_root_from_env =
            matches.value_source("global_root") == Some(ValueSource::EnvVariable);
        args.project_subdir_from_env =
            matches.value_source("project_subdir") == Some(ValueSource::EnvVariable);
        Ok(args)
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.project.exists() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project.display()
            ));
        }

        if !self.project.is_dir() {
            return Err(format!(
                "Project path is not a directory: {}",
                self.project.display()
            ));
        }

        if let Some(ref subdir) = self.project_subdir {
            paths::validate_project_subdir(subdir)?;
        }

        Ok(())
    }

    /// Folds the command-line values into the user config, for
    /// `--save-config`. Values taken from the environment are left out.
    pub fn merge_into(&self, config: &UserConfig) -> UserConfig {
        let flag = |value: &Option<String>, from_env: bool| value.clone().filter(|_| !from_env);
        UserConfig {
            global_root: flag(&self.global_root, self.global_root_from_env)
                .or_else(|| config.global_root.clone()),
            project_subdir: flag(&self.project_subdir, self.project_subdir_from_env)
                .or_else(|| config.project_subdir.clone()),
            log_file: self.log_file.clone().or_else(|| config.log_file.clone()),
        }
    }
}

/// Configuration derived from CLI arguments and the user config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub paths: ResolvedPaths,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves every setting: command line (or env) first, then the user
    /// config file, then the built-in default.
    pub fn resolve(args: &Args, user: &UserConfig) -> Result<Self> {
        let global_root = match args.global_root.as_ref().or(user.global_root.as_ref()) {
            Some(raw) => paths::expand_path(raw)?,
            None => paths::default_global_root()?,
        };

        let subdir = args
            .project_subdir
            .as_deref()
            .or(user.project_subdir.as_deref())
            .unwrap_or(DEFAULT_PROJECT_SUBDIR);
        paths::validate_project_subdir(subdir).map_err(LazyClaudeError::ConfigError)?;

        let project = paths::absolutize(&args.project)?;
        let log_file = match args.log_file.as_ref().or(user.log_file.as_ref()) {
            Some(raw) => Some(paths::absolutize(&paths::expand_path(raw)?)?),
            None => default_log_file(),
        };

        Ok(AppConfig {
            paths: ResolvedPaths {
                global_root: paths::absolutize(&global_root)?,
                project_root: paths::project_managed_root(&project, subdir),
            },
            log_file,
        })
    }
}

/// `<cache_dir>/lazyclaude/lazyclaude.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("lazyclaude").join("lazyclaude.log"))
}

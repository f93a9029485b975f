//! Command runner and privilege wrapper
//!
//! Every external effect an agent has goes through [`CommandRunner`], so
//! observers and actions can be driven by a scripted fake in tests.

use crate::error::{Error, Result};
use crate::types::CommandOutput;
use std::process::Command;

/// Build a `Vec<String>` argv from string-like parts
#[macro_export]
macro_rules! argv {
    ($($part:expr),* $(,)?) => {
        vec![$(::std::string::String::from($part)),*]
    };
}

/// Runs one external command to completion
pub trait CommandRunner {
    /// Run `argv` and capture its output.
    ///
    /// With `require_success`, a nonzero exit becomes
    /// [`Error::CommandFailed`]; otherwise the exit code is returned for the
    /// caller to interpret.
    fn run(&self, argv: &[String], require_success: bool) -> Result<CommandOutput>;

    /// Run a query where a nonzero exit is a valid negative answer
    fn probe(&self, argv: &[String]) -> Result<CommandOutput> {
        self.run(argv, false)
    }

    /// Run a command that must succeed
    fn check(&self, argv: &[String]) -> Result<CommandOutput> {
        self.run(argv, true)
    }
}

/// Runner backed by real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], require_success: bool) -> Result<CommandOutput> {
        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
        let command = render(argv);
        log::debug!("running: {command}");

        let output: CommandOutput = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                command: command.clone(),
                source,
            })?
            .into();

        log::trace!("exit {}: {command}", output.code);

        if require_success && !output.success() {
            return Err(Error::CommandFailed {
                command,
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }
}

/// Principal an external command acts as
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Privilege {
    /// Whoever runs the agent
    #[default]
    Current,
    /// Another account, reached through `sudo -u`
    User(String),
}

impl Privilege {
    /// Privilege for an optional user name
    pub fn for_user(user: Option<&str>) -> Self {
        match user {
            Some(name) => Self::User(name.to_string()),
            None => Self::Current,
        }
    }

    /// Prefix `argv` so it runs as this principal
    pub fn wrap(&self, argv: Vec<String>) -> Vec<String> {
        match self {
            Self::Current => argv,
            Self::User(name) => {
                let mut wrapped = argv!["sudo", "-u", name.as_str()];
                wrapped.extend(argv);
                wrapped
            }
        }
    }
}

/// Render an argv for logs and error messages
pub fn render(argv: &[String]) -> String {
    argv.join(" ")
}

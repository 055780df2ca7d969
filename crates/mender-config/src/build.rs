//! Parses the configured build command into a program and its arguments.
//!
//! The command is stored as a single string so it can be set from a
//! configuration file, an environment variable or a flag without list syntax.
//! Shell-word rules apply: quoting groups words, but no shell is spawned.

use thiserror::Error;

/// A build invocation split into a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
}

impl BuildCommand {
    /// Splits `line` using shell-word rules.
    ///
    /// # Errors
    ///
    /// Returns [`BuildCommandError::Unbalanced`] when quoting is not closed and
    /// [`BuildCommandError::Empty`] when no program remains.
    pub fn parse(line: &str) -> Result<Self, BuildCommandError> {
        let words = shlex::split(line).ok_or_else(|| BuildCommandError::Unbalanced {
            command: line.to_string(),
        })?;
        let mut words = words.into_iter();
        let program = words.next().ok_or(BuildCommandError::Empty)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Executable to spawn.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Errors raised while parsing a build command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildCommandError {
    /// The command contained no words.
    #[error("the build command is empty")]
    Empty,
    /// A quote was opened but never closed.
    #[error("the build command has unbalanced quoting: {command}")]
    Unbalanced { command: String },
}

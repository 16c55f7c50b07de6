//! Interactive block-building shell
//!
//! Each input line is a sequence of builder commands separated by spaces.
//! `push` takes the rest of the line as text. After every line the builder
//! stack is printed; `quit` writes the composed block as bytecode to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::builder::Builder;
use crate::codec::{encode_into, EncodeError};
use crate::reader::{read, Resolver};


/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// History size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// History file path
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

fn default_prompt() -> String {
    "abc> ".to_string()
}

fn default_history_size() -> usize {
    1000
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_size: default_history_size(),
            history_file: None,
        }
    }
}

/// Result of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellResult {
    /// Every command ran
    Success,
    /// Text to show, such as help
    Output(String),
    /// At least one command failed; the rest still ran
    Error(String),
    /// Exit signal
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

const HELP: &str = "\
Commands (several per line, separated by spaces):
  opid opapp opbox opcat opcopy opdrop opswap   push a primitive
  mkbox / rmbox       quote the top entry / unquote it
  mkcat / rmcat       join the top two entries / split the top one
  mklink / rmlink     replace the top entry by its hash / undo
  copy drop swap      shuffle the stack
  reduce              reduce the top entry
  push <text>         read the rest of the line and push it
  help                show this text
  quit                write the composed stack as bytecode and exit";

/// Interactive shell over a [`Builder`].
#[derive(Debug)]
pub struct Shell<R: Resolver> {
    config: ShellConfig,
    quota: usize,
    builder: Builder,
    resolver: R,
}

impl<R: Resolver> Shell<R> {
    /// Create a shell that reduces with `quota` and reads names through
    /// `resolver`.
    pub fn new(
        config: ShellConfig,
        quota: usize,
        resolver: R,
    ) -> Self {
        Self {
            config,
            quota,
            builder: Builder::new(),
            resolver,
        }
    }

    /// The stack being built
    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Run the shell until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .max_history_size(self.config.history_size)?
            .build();
        let mut editor: Editor<(), FileHistory> = Editor::with_config(rl_config)?;
        if let Some(ref history_file) = self.config.history_file {
            if history_file.exists() {
                let _ = editor.load_history(history_file);
            }
        }

        println!("ABC shell v{} - type `help` for commands", crate::VERSION);
        loop {
            match editor.readline(&self.config.prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    match self.execute(&line) {
                        ShellResult::Exit => {
                            let stdout = io::stdout();
                            self.write_block(&mut stdout.lock())?;
                            break;
                        }
                        ShellResult::Error(msg) => println!("{}", msg),
                        ShellResult::Output(msg) => println!("{}", msg),
                        ShellResult::Success => {}
                    }
                    println!("{}", self.builder);
                }
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => {
                    println!("(Interrupted)");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(ref history_file) = self.config.history_file {
            if let Err(err) = editor.save_history(history_file) {
                debug!(error = %err, "could not save history");
            }
        }
        Ok(())
    }

    /// Run every command on `line`.
    pub fn execute(
        &mut self,
        line: &str,
    ) -> ShellResult {
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let mut rest = line.trim();
        while !rest.is_empty() {
            let (word, tail) = split_word(rest);
            rest = tail;
            match word {
                "opid" => self.builder.op_id(),
                "opapp" => self.builder.op_app(),
                "opbox" => self.builder.op_box(),
                "opcat" => self.builder.op_cat(),
                "opcopy" => self.builder.op_copy(),
                "opdrop" => self.builder.op_drop(),
                "opswap" => self.builder.op_swap(),
                "mkbox" => self.builder.mk_box(),
                "mkcat" => self.builder.mk_cat(),
                "mklink" => {
                    if let Err(err) = self.builder.mk_link() {
                        errors.push(format!("Error: {}", err));
                    }
                }
                "rmbox" => self.builder.rm_box(),
                "rmcat" => self.builder.rm_cat(),
                "rmlink" => self.builder.rm_link(),
                "copy" => self.builder.copy_top(),
                "drop" => self.builder.drop_top(),
                "swap" => self.builder.swap_top(),
                "reduce" => self.builder.reduce(self.quota),
                "push" => {
                    match read(rest, &self.resolver) {
                        Ok(block) => self.builder.push(block),
                        Err(err) => errors.push(format!("Error: {}", err)),
                    }
                    rest = "";
                }
                "help" => output.push(HELP.to_string()),
                "quit" => return ShellResult::Exit,
                other => errors.push(format!("Unknown command: {}", other)),
            }
        }
        if !errors.is_empty() {
            output.append(&mut errors);
            ShellResult::Error(output.join("\n"))
        } else if !output.is_empty() {
            ShellResult::Output(output.join("\n"))
        } else {
            ShellResult::Success
        }
    }

    /// Write the composed stack as bytecode.
    pub fn write_block<W: Write>(
        &self,
        dst: &mut W,
    ) -> Result<(), ShellError> {
        encode_into(&self.builder.block(), dst)?;
        dst.flush()?;
        Ok(())
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim_start()),
        None => (text, ""),
    }
}

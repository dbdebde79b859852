//! Serializing font tables to ttx XML

use std::{
    path::Path,
    process::{Command, Stdio},
};

use log::debug;
use write_fonts::types::Tag;

use crate::Error;

/// Something that can write a subset of a font's tables as text.
pub trait TableDumper {
    /// Write the named `tables` of the binary font at `font` to `out`,
    /// replacing any existing file.
    fn dump(&self, font: &Path, tables: &[Tag], out: &Path) -> Result<(), Error>;
}

/// Dumps tables by shelling out to fontTools' `ttx`.
#[derive(Clone, Debug)]
pub struct Ttx {
    command: String,
}

impl Ttx {
    pub fn new(command: impl Into<String>) -> Self {
        Ttx {
            command: command.into(),
        }
    }

    /// `true` if the executable can be launched at all.
    pub fn is_available(&self) -> bool {
        tool_is_available(&self.command, "--version")
    }
}

impl Default for Ttx {
    fn default() -> Self {
        Ttx::new("ttx")
    }
}

impl TableDumper for Ttx {
    fn dump(&self, font: &Path, tables: &[Tag], out: &Path) -> Result<(), Error> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("-q");
        for table in tables {
            cmd.arg("-t").arg(table.to_string());
        }
        cmd.arg("-o").arg(out).arg(font);
        run_tool(&self.command, &mut cmd)
    }
}

/// Run a prepared command to completion, mapping failure to an [`Error`].
pub(crate) fn run_tool(tool: &str, cmd: &mut Command) -> Result<(), Error> {
    debug!("running {cmd:?}");
    let output = cmd.output().map_err(|source| Error::ToolLaunch {
        tool: tool.to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}

pub(crate) fn tool_is_available(tool: &str, version_flag: &str) -> bool {
    Command::new(tool)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

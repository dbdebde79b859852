//! Compiling features with fontTools' feaLib

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{pipeline::Pipeline, ttx::run_tool, Error};

/// Runs `fonttools feaLib`, which adds the features to a copy of the font.
#[derive(Clone, Debug)]
pub struct FontTools {
    command: String,
    font_path: PathBuf,
}

impl FontTools {
    pub fn new(command: impl Into<String>, font_path: impl Into<PathBuf>) -> Self {
        FontTools {
            command: command.into(),
            font_path: font_path.into(),
        }
    }

    fn command(&self, fea: &Path, out: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg("feaLib")
            .arg("-o")
            .arg(out)
            .arg(fea)
            .arg(&self.font_path);
        cmd
    }
}

impl Pipeline for FontTools {
    fn name(&self) -> &str {
        "fonttools"
    }

    fn snapshot_suffix(&self) -> &str {
        ".fonttools.ttx"
    }

    fn compile(&self, fea: &Path, out: &Path) -> Result<(), Error> {
        run_tool(&self.command, &mut self.command(fea, out))
    }
}

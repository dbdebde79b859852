//! Compiling features with the AFDKO production compiler

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{pipeline::Pipeline, ttx::run_tool, Error};

/// Builds a complete font with `makeotf`, the way one would from a shell.
///
/// `makeotf` fills in any parameters not given here from the font itself.
#[derive(Clone, Debug)]
pub struct Makeotf {
    command: String,
    font_path: PathBuf,
}

impl Makeotf {
    pub fn new(command: impl Into<String>, font_path: impl Into<PathBuf>) -> Self {
        Makeotf {
            command: command.into(),
            font_path: font_path.into(),
        }
    }

    fn command(&self, fea: &Path, out: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg("-f")
            .arg(&self.font_path)
            .arg("-ff")
            .arg(fea)
            .arg("-o")
            .arg(out);
        cmd
    }
}

impl Pipeline for Makeotf {
    fn name(&self) -> &str {
        "afdko"
    }

    fn snapshot_suffix(&self) -> &str {
        ".afdko.ttx"
    }

    fn compile(&self, fea: &Path, out: &Path) -> Result<(), Error> {
        run_tool(&self.command, &mut self.command(fea, out))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn cli_style_arguments() {
        let makeotf = Makeotf::new("makeotf", "resources/Ref.otf");
        let cmd = makeotf.command(Path::new("liga.fea"), Path::new("output/tmp/out.otf"));
        assert_eq!(cmd.get_program(), OsStr::new("makeotf"));
        let args = cmd.get_args().collect::<Vec<_>>();
        assert_eq!(
            args,
            ["-f", "resources/Ref.otf", "-ff", "liga.fea", "-o", "output/tmp/out.otf"]
                .map(OsStr::new)
        );
    }

    #[test]
    fn launch_failure() {
        let makeotf = Makeotf::new("definitely-not-makeotf", "Ref.otf");
        let err = makeotf
            .compile(Path::new("liga.fea"), Path::new("out.otf"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolLaunch { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_failure() {
        let makeotf = Makeotf::new("false", "Ref.otf");
        let err = makeotf
            .compile(Path::new("liga.fea"), Path::new("out.otf"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }), "{err:?}");
    }
}

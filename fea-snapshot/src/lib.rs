//! Regression testing for feature file compilation.
//!
//! A feature file is compiled against a reference font by one or more
//! [pipelines](pipeline::Pipeline). The resulting layout tables are written
//! as ttx XML next to the previous run's output, and any difference is
//! reported as a unified diff.

mod args;
mod config;
mod error;
pub mod pipeline;
pub mod snapshot;
pub mod ttx;

#[cfg(test)]
mod test_utils;

pub use args::{Args, PipelineKind};
pub use config::Config;
pub use error::Error;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::debug;

use pipeline::Pipeline;
use snapshot::Snapshot;
use ttx::TableDumper;

pub fn require_dir(dir: &Path) -> Result<PathBuf, Error> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::ExpectedDirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(Error::file_io(dir))?
    }
    debug!("require_dir {:?}", dir);
    Ok(dir.to_path_buf())
}

/// Run every configured pipeline over the feature file.
///
/// Differences from the previous snapshots are written to `report`; they do
/// not make the run fail.
pub fn run(config: &Config, dumper: &dyn TableDumper, report: &mut dyn Write) -> Result<(), Error> {
    require_dir(&config.output_dir)?;
    for kind in &config.pipelines {
        let pipeline = kind.create(config);
        println!("running {}", pipeline.name());
        compare_results(pipeline.as_ref(), config, dumper, report)?;
    }
    Ok(())
}

/// Compile with `pipeline`, regenerate its snapshot and report any change.
///
/// The compiled font only lives for the duration of this call, in a
/// temporary directory inside the output directory.
pub fn compare_results(
    pipeline: &dyn Pipeline,
    config: &Config,
    dumper: &dyn TableDumper,
    report: &mut dyn Write,
) -> Result<Snapshot, Error> {
    let temp_dir = tempfile::Builder::new()
        .prefix(".fea-snapshot-")
        .tempdir_in(&config.output_dir)
        .map_err(Error::file_io(&config.output_dir))?;
    let font_path = temp_dir
        .path()
        .join(format!("{}-out.otf", pipeline.name()));
    pipeline.compile(&config.fea_path, &font_path)?;
    // makeotf reports some failures only on stdout, with a zero exit status
    if !font_path.is_file() {
        return Err(Error::MissingOutput(font_path));
    }

    let snapshot_path = config.snapshot_path(pipeline.snapshot_suffix());
    debug!("writing {}", snapshot_path.display());
    let snapshot = snapshot::write_snapshot(dumper, &font_path, &config.tables, &snapshot_path)?;

    if let Some(diff) = snapshot.diff() {
        report
            .write_all(diff.as_bytes())
            .map_err(Error::StdioWriteFail)?;
    }
    Ok(snapshot)
}

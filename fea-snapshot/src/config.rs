//! The settings for a single run

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use write_fonts::types::Tag;

use crate::{
    args::{PipelineKind, DEFAULT_PIPELINES, DEFAULT_TABLES},
    Args, Error,
};

static FEA_EXTENSION: &str = "fea";

/// Everything a run needs to know, resolved from the command line.
///
/// Nothing here outlives a single invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub fea_path: PathBuf,
    pub font_path: PathBuf,
    pub output_dir: PathBuf,
    pub tables: Vec<Tag>,
    pub pipelines: Vec<PipelineKind>,
    pub ttx: String,
    pub makeotf: String,
    pub fonttools: String,
}

impl Config {
    /// Create a new config from the provided cli arguments.
    ///
    /// Fails with [`Error::NotFeaFile`] if the input does not have a `.fea`
    /// extension. This touches nothing on disk.
    pub fn new(args: Args) -> Result<Config, Error> {
        if args.input_fea.extension() != Some(OsStr::new(FEA_EXTENSION)) {
            return Err(Error::NotFeaFile(args.input_fea));
        }
        let tables = if args.tables.is_empty() {
            DEFAULT_TABLES.to_vec()
        } else {
            args.tables
        };
        let pipelines = if args.pipelines.is_empty() {
            DEFAULT_PIPELINES.to_vec()
        } else {
            args.pipelines
        };
        Ok(Config {
            fea_path: args.input_fea,
            font_path: args.font,
            output_dir: args.output_dir,
            tables,
            pipelines,
            ttx: args.ttx,
            makeotf: args.makeotf,
            fonttools: args.fonttools,
        })
    }

    /// The snapshot file for a pipeline with the given suffix.
    ///
    /// This is the stem of the feature file plus the suffix, inside the
    /// output directory.
    pub fn snapshot_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(snapshot_file_name(&self.fea_path, suffix))
    }
}

fn snapshot_file_name(fea_path: &Path, suffix: &str) -> String {
    let stem = fea_path
        .file_stem()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();
    format!("{stem}{suffix}")
}

//! Command line arguments

use std::{fmt::Display, path::PathBuf, str::FromStr};

use clap::Parser;
use write_fonts::types::Tag;

/// Compile a feature file against a reference font and diff the layout
/// tables with the previous run.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, long_about = None)]
pub struct Args {
    /// Path to the feature file
    #[arg(value_name = "FEATURES")]
    pub input_fea: PathBuf,

    /// The reference font the features are compiled against
    #[arg(short, long)]
    #[clap(default_value = "./resources/Compagnon-Roman.otf")]
    pub font: PathBuf,

    /// Directory snapshots are written to. Created if missing.
    #[arg(short, long)]
    #[clap(default_value = "./output")]
    pub output_dir: PathBuf,

    /// A table to serialize. May be repeated; defaults to GDEF, GSUB and GPOS.
    #[arg(short, long = "table", value_parser = parse_tag)]
    pub tables: Vec<Tag>,

    /// A compiler pipeline to run, one of fea-rs/afdko/fonttools (case insensitive).
    ///
    /// May be repeated. Defaults to fea-rs followed by afdko.
    #[arg(short, long = "pipeline")]
    pub pipelines: Vec<PipelineKind>,

    /// The fontTools `ttx` executable, used to serialize tables to XML
    #[arg(long)]
    #[clap(default_value = "ttx")]
    pub ttx: String,

    /// The AFDKO `makeotf` executable
    #[arg(long)]
    #[clap(default_value = "makeotf")]
    pub makeotf: String,

    /// The `fonttools` executable, used by the fonttools pipeline
    #[arg(long)]
    #[clap(default_value = "fonttools")]
    pub fonttools: String,
}

impl Args {
    /// Arguments for the given feature file, everything else at its default.
    pub fn new(input_fea: impl Into<PathBuf>) -> Self {
        Args::parse_from([
            std::ffi::OsString::from("fea-snapshot"),
            input_fea.into().into_os_string(),
        ])
    }
}

/// The tables written when none are requested
pub(crate) const DEFAULT_TABLES: [Tag; 3] = [
    Tag::new(b"GDEF"),
    Tag::new(b"GSUB"),
    Tag::new(b"GPOS"),
];

pub(crate) const DEFAULT_PIPELINES: [PipelineKind; 2] = [PipelineKind::FeaRs, PipelineKind::Afdko];

fn parse_tag(s: &str) -> Result<Tag, String> {
    Tag::new_checked(s.as_bytes()).map_err(|e| format!("bad table tag '{s}': {e}"))
}

/// Which compiler to run the feature file through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineKind {
    /// The fea-rs feature compiler, run in-process
    FeaRs,
    /// The AFDKO `makeotf` production compiler
    Afdko,
    /// The fontTools feaLib compiler
    FontTools,
}

impl Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PipelineKind::FeaRs => f.write_str("fea-rs"),
            PipelineKind::Afdko => f.write_str("afdko"),
            PipelineKind::FontTools => f.write_str("fonttools"),
        }
    }
}

impl FromStr for PipelineKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static ERR_MSG: &str = "expected one of 'fea-rs', 'afdko', 'fonttools'";
        match s.to_ascii_lowercase().trim() {
            "fea-rs" | "fears" => Ok(Self::FeaRs),
            "afdko" | "makeotf" => Ok(Self::Afdko),
            "fonttools" => Ok(Self::FontTools),
            _ => Err(ERR_MSG),
        }
    }
}

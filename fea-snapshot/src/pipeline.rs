//! The compilers a feature file can be run through

use std::path::Path;

use crate::{args::PipelineKind, Config, Error};

mod fea;
mod fonttools;
mod makeotf;

pub use self::fea::FeaRs;
pub use self::fonttools::FontTools;
pub use self::makeotf::Makeotf;

/// One way of turning a feature file plus the reference font into a binary font.
pub trait Pipeline {
    /// A short name, shown when the pipeline runs.
    fn name(&self) -> &str;

    /// Appended to the feature file's stem to name this pipeline's snapshot.
    fn snapshot_suffix(&self) -> &str;

    /// Compile `fea` and write the resulting font to `out`.
    ///
    /// `out` does not exist when this is called.
    fn compile(&self, fea: &Path, out: &Path) -> Result<(), Error>;
}

impl PipelineKind {
    /// Create the pipeline for this kind from the run's settings.
    pub fn create(&self, config: &Config) -> Box<dyn Pipeline> {
        match self {
            PipelineKind::FeaRs => Box::new(FeaRs::new(&config.font_path)),
            PipelineKind::Afdko => Box::new(Makeotf::new(&config.makeotf, &config.font_path)),
            PipelineKind::FontTools => {
                Box::new(FontTools::new(&config.fonttools, &config.font_path))
            }
        }
    }
}

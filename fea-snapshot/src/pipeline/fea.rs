//! Compiling features in-process with fea-rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use fea_rs::{
    compile::{Compilation, NopFeatureProvider, NopVariationInfo},
    Compiler, GlyphMap,
};
use fontdrasil::types::GlyphName;
use log::{debug, warn};
use skrifa::GlyphNames;
use write_fonts::{
    from_obj::ToOwnedTable,
    read::{FontRef, ReadError, TableProvider},
    tables::{head::Head, hhea::Hhea, os2::Os2, vhea::Vhea},
    types::Tag,
    FontBuilder,
};

use crate::{pipeline::Pipeline, Error};

/// The layout tables a compilation owns.
///
/// Existing copies in the reference font are discarded, even when the
/// feature file does not produce a replacement.
const LAYOUT_TABLES: [Tag; 3] = [GDEF, GSUB, GPOS];

const GDEF: Tag = Tag::new(b"GDEF");
const GSUB: Tag = Tag::new(b"GSUB");
const GPOS: Tag = Tag::new(b"GPOS");

/// Applies a feature file directly to the reference font using fea-rs.
#[derive(Clone, Debug)]
pub struct FeaRs {
    font_path: PathBuf,
}

impl FeaRs {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        FeaRs {
            font_path: font_path.into(),
        }
    }

    /// Compile `fea` against the reference font, returning the new font's bytes.
    pub fn compile_to_bytes(&self, fea: &Path) -> Result<Vec<u8>, Error> {
        let data = fs::read(&self.font_path).map_err(Error::file_io(&self.font_path))?;
        let glyph_map = glyph_order(&data)?;
        debug!(
            "{} glyphs in {}",
            glyph_map.len(),
            self.font_path.display()
        );
        let compilation = Compiler::<NopFeatureProvider, NopVariationInfo>::new(
            fea.as_os_str().to_owned(),
            &glyph_map,
        )
        .compile()?;
        let font = FontRef::new(&data)?;
        apply(&compilation, font)
    }
}

impl Pipeline for FeaRs {
    fn name(&self) -> &str {
        "fea-rs"
    }

    fn snapshot_suffix(&self) -> &str {
        ".fea-rs.ttx"
    }

    fn compile(&self, fea: &Path, out: &Path) -> Result<(), Error> {
        let bytes = self.compile_to_bytes(fea)?;
        debug!("writing {} bytes to {}", bytes.len(), out.display());
        fs::write(out, bytes).map_err(Error::file_io(out))
    }
}

/// The glyph order of a binary font, by name.
///
/// Names come from `post`, then the `CFF` charset; glyphs without either are
/// given synthetic `gidN` names.
pub(crate) fn glyph_order(data: &[u8]) -> Result<GlyphMap, Error> {
    let font =
        skrifa::raw::FontRef::new(data).map_err(|e| Error::GlyphOrder(e.to_string()))?;
    let names = GlyphNames::new(&font);
    debug!("glyph names sourced from {:?}", names.source());
    let glyph_map: GlyphMap = names
        .iter()
        .map(|(_, name)| GlyphName::new(name.as_str()))
        .collect();
    if glyph_map.get(".notdef") != Some(Default::default()) {
        warn!("the first glyph of the reference font is not '.notdef'");
    }
    Ok(glyph_map)
}

/// Build a new font from the compilation and the reference `font`.
///
/// `BASE` and `STAT` blocks replace the reference tables outright. `head`,
/// `hhea`, `vhea` and `OS/2` blocks only set the fields a feature file can
/// express, on top of the reference copy. The reference `name` table is
/// always kept. Everything else is copied unchanged.
fn apply(compilation: &Compilation, font: FontRef) -> Result<Vec<u8>, Error> {
    let mut builder = FontBuilder::new();
    if let Some(gdef) = compilation.gdef.as_ref() {
        builder.add_table(gdef)?;
    }
    if let Some(gsub) = compilation.gsub.as_ref() {
        builder.add_table(gsub)?;
    }
    if let Some(gpos) = compilation.gpos.as_ref() {
        builder.add_table(gpos)?;
    }
    if let Some(base) = compilation.base.as_ref() {
        builder.add_table(base)?;
    }
    if let Some(stat) = compilation.stat.as_ref() {
        builder.add_table(stat)?;
    }
    if let Some(fea_head) = compilation.head.as_ref() {
        let head = merge_head(reference_table(font.head())?, fea_head);
        builder.add_table(&head)?;
    }
    if let Some(fea_hhea) = compilation.hhea.as_ref() {
        let hhea = merge_hhea(reference_table(font.hhea())?, fea_hhea);
        builder.add_table(&hhea)?;
    }
    if let Some(fea_vhea) = compilation.vhea.as_ref() {
        let vhea = merge_vhea(reference_table(font.vhea())?, fea_vhea);
        builder.add_table(&vhea)?;
    }
    if let Some(fea_os2) = compilation.os2.as_ref() {
        let os2 = merge_os2(reference_table(font.os2())?, fea_os2);
        builder.add_table(&os2)?;
    }
    if compilation.name.is_some() {
        debug!("FEA generated 'name', keeping the reference font's copy");
    }

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if LAYOUT_TABLES.contains(&tag) || builder.contains(tag) {
            continue;
        }
        match font.table_data(tag) {
            Some(data) => {
                builder.add_raw(tag, data.as_bytes());
            }
            None => warn!("data for '{tag}' is malformed, dropping it"),
        }
    }
    Ok(builder.build())
}

/// The reference font's copy of a table, or `None` if it has none.
fn reference_table<R, T>(table: Result<R, ReadError>) -> Result<Option<T>, Error>
where
    R: ToOwnedTable<T>,
{
    match table {
        Ok(table) => Ok(Some(table.to_owned_table())),
        Err(ReadError::TableIsMissing(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn merge_head(reference: Option<Head>, fea: &Head) -> Head {
    let Some(mut head) = reference else {
        return fea.clone();
    };
    head.font_revision = fea.font_revision;
    head
}

fn merge_hhea(reference: Option<Hhea>, fea: &Hhea) -> Hhea {
    let Some(mut hhea) = reference else {
        return fea.clone();
    };
    hhea.ascender = fea.ascender;
    hhea.descender = fea.descender;
    hhea.line_gap = fea.line_gap;
    hhea.caret_offset = fea.caret_offset;
    hhea
}

fn merge_vhea(reference: Option<Vhea>, fea: &Vhea) -> Vhea {
    let Some(mut vhea) = reference else {
        return fea.clone();
    };
    vhea.ascender = fea.ascender;
    vhea.descender = fea.descender;
    vhea.line_gap = fea.line_gap;
    vhea
}

/// Metrics and character ranges measured from the glyphs stay as they are.
fn merge_os2(reference: Option<Os2>, fea: &Os2) -> Os2 {
    let Some(mut os2) = reference else {
        return fea.clone();
    };
    os2.us_weight_class = fea.us_weight_class;
    os2.us_width_class = fea.us_width_class;
    os2.fs_type = fea.fs_type;
    os2.s_family_class = fea.s_family_class;
    os2.panose_10 = fea.panose_10;
    os2.ul_unicode_range_1 = fea.ul_unicode_range_1;
    os2.ul_unicode_range_2 = fea.ul_unicode_range_2;
    os2.ul_unicode_range_3 = fea.ul_unicode_range_3;
    os2.ul_unicode_range_4 = fea.ul_unicode_range_4;
    os2.ach_vend_id = fea.ach_vend_id;
    os2.s_typo_ascender = fea.s_typo_ascender;
    os2.s_typo_descender = fea.s_typo_descender;
    os2.s_typo_line_gap = fea.s_typo_line_gap;
    os2.us_win_ascent = fea.us_win_ascent;
    os2.us_win_descent = fea.us_win_descent;
    os2.ul_code_page_range_1 = fea.ul_code_page_range_1;
    os2.ul_code_page_range_2 = fea.ul_code_page_range_2;
    os2.sx_height = fea.sx_height;
    os2.s_cap_height = fea.s_cap_height;
    // fields a version 2 table needs; fea-rs fills them with zeros
    os2.us_default_char = os2.us_default_char.or(fea.us_default_char);
    os2.us_break_char = os2.us_break_char.or(fea.us_break_char);
    os2.us_max_context = os2.us_max_context.or(fea.us_max_context);
    os2.us_lower_optical_point_size = fea
        .us_lower_optical_point_size
        .or(os2.us_lower_optical_point_size);
    os2.us_upper_optical_point_size = fea
        .us_upper_optical_point_size
        .or(os2.us_upper_optical_point_size);
    os2
}

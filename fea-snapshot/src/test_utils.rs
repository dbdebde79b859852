//! Helpers shared by tests

use std::{
    cell::Cell,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use skrifa::GlyphNames;
use write_fonts::{
    read::{
        tables::gsub::{SingleSubst, SubstitutionLookup},
        FontRef, TableProvider,
    },
    tables::{maxp::Maxp, post::Post},
    types::Tag,
    FontBuilder,
};

use crate::{ttx::TableDumper, Error};

/// A font with the given glyph order (in `post`) and any extra raw tables.
pub(crate) fn build_font(glyph_names: &[&str], extra: &[(Tag, &[u8])]) -> Vec<u8> {
    let maxp = Maxp {
        num_glyphs: glyph_names.len().try_into().unwrap(),
        ..Default::default()
    };
    let post = Post::new_v2(glyph_names.iter().copied());
    let mut builder = FontBuilder::new();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&post).unwrap();
    for (tag, data) in extra {
        builder.add_raw(*tag, data.to_vec());
    }
    builder.build()
}

pub(crate) fn write_fea(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Every single substitution in the font's GSUB, as (input, output) names.
pub(crate) fn single_substitutions(font_data: &[u8]) -> Vec<(String, String)> {
    let font = FontRef::new(font_data).unwrap();
    let Ok(gsub) = font.gsub() else {
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for lookup in gsub.lookup_list().unwrap().lookups().iter() {
        let SubstitutionLookup::Single(lookup) = lookup.unwrap() else {
            continue;
        };
        for subtable in lookup.subtables().iter() {
            match subtable.unwrap() {
                SingleSubst::Format1(table) => {
                    let delta = table.delta_glyph_id() as i32;
                    for gid in table.coverage().unwrap().iter() {
                        let target = (gid.to_u16() as i32 + delta) as u16;
                        pairs.push((gid.to_u16(), target));
                    }
                }
                SingleSubst::Format2(table) => {
                    let coverage = table.coverage().unwrap();
                    for (gid, target) in coverage.iter().zip(table.substitute_glyph_ids()) {
                        pairs.push((gid.to_u16(), target.get().to_u16()));
                    }
                }
            }
        }
    }

    let names_font = skrifa::raw::FontRef::new(font_data).unwrap();
    let names = GlyphNames::new(&names_font);
    let name = |gid: u16| {
        names
            .get(skrifa::GlyphId::new(gid as u32))
            .unwrap()
            .as_str()
            .to_string()
    };
    pairs
        .into_iter()
        .map(|(input, output)| (name(input), name(output)))
        .collect()
}

/// A stand-in for `ttx` that writes single substitutions as ttx-ish XML.
///
/// The `<ttFont>` element carries `version`, so tests can check that it is
/// ignored when comparing.
pub(crate) struct SubstitutionDumper {
    pub(crate) version: &'static str,
    pub(crate) calls: Cell<usize>,
}

impl SubstitutionDumper {
    pub(crate) fn new(version: &'static str) -> Self {
        SubstitutionDumper {
            version,
            calls: Cell::new(0),
        }
    }
}

impl TableDumper for SubstitutionDumper {
    fn dump(&self, font: &Path, tables: &[Tag], out: &Path) -> Result<(), Error> {
        self.calls.set(self.calls.get() + 1);
        let data = fs::read(font).map_err(Error::file_io(font))?;
        let mut xml = String::new();
        writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").unwrap();
        writeln!(xml, "<ttFont ttLibVersion=\"{}\">", self.version).unwrap();
        if tables.contains(&Tag::new(b"GSUB")) {
            writeln!(xml, "  <GSUB>").unwrap();
            for (input, output) in single_substitutions(&data) {
                writeln!(xml, "    <Substitution in=\"{input}\" out=\"{output}\"/>").unwrap();
            }
            writeln!(xml, "  </GSUB>").unwrap();
        }
        writeln!(xml, "</ttFont>").unwrap();
        fs::write(out, xml).map_err(Error::file_io(out))
    }
}

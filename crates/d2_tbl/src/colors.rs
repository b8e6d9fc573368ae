//! Color-marker substitution applied to string values.
//!
//! Values stored in a TBL file embed inline color escapes: the prefix `ÿc` optionally
//! followed by a single code character. Editors work with human-readable markers like
//! `\red;` instead, so the writer rewrites markers to escapes before computing string
//! lengths and the reader performs the reciprocal expansion when presenting values.
//!
//! The mapping is an injected read-only table rather than a global: it is loaded once
//! at startup (built-in palette, optionally extended from a `customcolors.ini` style
//! resource) and shared by reference with the reader and writer.

use std::io::BufRead;

use tracing::warn;

/// The escape prefix embedded in stored values.
pub const COLOR_PREFIX: &str = "\u{FF}c";

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColorEntry {
    /// human-readable marker, e.g. `\red;`
    marker: String,
    /// code character following the prefix; `None` for the default marker
    code: Option<char>,
}

/// Read-only mapping between human-readable color markers and escape codes.
///
/// The first entry is the default marker: it maps to the bare prefix with no code
/// character, and any escape whose code character is unrecognized expands back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<ColorEntry>,
}

impl Default for ColorMap {
    fn default() -> Self {
        let named = [
            ("\\white;", '0'),
            ("\\red;", '1'),
            ("\\green;", '2'),
            ("\\blue;", '3'),
            ("\\gold;", '4'),
            ("\\grey;", '5'),
            ("\\black;", '6'),
            ("\\tan;", '7'),
            ("\\orange;", '8'),
            ("\\yellow;", '9'),
            ("\\darkgreen;", ':'),
            ("\\purple;", ';'),
        ];

        let mut entries = vec![ColorEntry {
            marker: "\\color;".to_string(),
            code: None,
        }];
        entries.extend(named.into_iter().map(|(marker, code)| ColorEntry {
            marker: marker.to_string(),
            code: Some(code),
        }));

        ColorMap { entries }
    }
}

impl ColorMap {
    /// Extend the built-in palette with custom markers read from an ini-style resource.
    ///
    /// Lines starting with `#` are comments; data lines are
    /// `name<TAB>hex code<TAB>hex RGB`. The RGB component only matters for rendering
    /// and is ignored here. Malformed lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<ColorMap> {
        let mut map = ColorMap::default();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 3 {
                warn!("skipping malformed custom color line: {line:?}");
                continue;
            }

            let code = fields[1]
                .strip_prefix("0x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32);
            let Some(code) = code else {
                warn!("skipping custom color with bad code: {line:?}");
                continue;
            };

            map.entries.push(ColorEntry {
                marker: fields[0].to_string(),
                code: Some(code),
            });
        }
        Ok(map)
    }

    /// Rewrite human-readable markers to their internal escape form.
    ///
    /// Applied to values before encoding, so string lengths are computed on the
    /// substituted text.
    pub fn encode_markers(&self, text: &str) -> String {
        let mut out = text.to_string();
        for entry in &self.entries {
            match entry.code {
                Some(code) => {
                    let mut escape = String::from(COLOR_PREFIX);
                    escape.push(code);
                    out = out.replace(&entry.marker, &escape);
                }
                None => out = out.replace(&entry.marker, COLOR_PREFIX),
            }
        }
        out
    }

    /// Expand internal escapes back to human-readable markers.
    ///
    /// An escape with a recognized code character becomes that marker; a bare prefix,
    /// or one followed by an unknown code, becomes the default marker and the unknown
    /// character is kept as ordinary text.
    pub fn decode_codes(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find(COLOR_PREFIX) {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + COLOR_PREFIX.len()..];

            let entry = rest
                .chars()
                .next()
                .and_then(|c| self.entries.iter().find(|e| e.code == Some(c)));
            match entry {
                Some(entry) => {
                    out.push_str(&entry.marker);
                    rest = &rest[entry.code.unwrap().len_utf8()..];
                }
                None => out.push_str(&self.entries[0].marker),
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_marker_maps_to_bare_prefix() {
        let colors = ColorMap::default();
        assert_eq!(colors.encode_markers("\\color;text"), "\u{FF}ctext");
    }

    #[test]
    fn named_marker_round_trips() {
        let colors = ColorMap::default();
        let encoded = colors.encode_markers("\\red;Health \\gold;Potion");
        assert_eq!(encoded, "\u{FF}c1Health \u{FF}c4Potion");
        assert_eq!(colors.decode_codes(&encoded), "\\red;Health \\gold;Potion");
    }

    #[test]
    fn unknown_code_expands_to_default_marker() {
        let colors = ColorMap::default();
        assert_eq!(colors.decode_codes("\u{FF}cZrest"), "\\color;Zrest");
        assert_eq!(colors.decode_codes("trailing \u{FF}c"), "trailing \\color;");
    }

    #[test]
    fn plain_text_is_untouched() {
        let colors = ColorMap::default();
        assert_eq!(colors.encode_markers("no markers here"), "no markers here");
        assert_eq!(colors.decode_codes("no escapes here"), "no escapes here");
    }

    #[test]
    fn custom_colors_are_appended() -> std::io::Result<()> {
        let ini = "# comment line\n\\puce;\t0x21\t#A95C68\nbad line\n";
        let colors = ColorMap::from_reader(Cursor::new(ini))?;

        assert_eq!(colors.encode_markers("\\puce;x"), "\u{FF}c!x");
        assert_eq!(colors.decode_codes("\u{FF}c!x"), "\\puce;x");
        // defaults still present
        assert_eq!(colors.encode_markers("\\red;"), "\u{FF}c1");
        Ok(())
    }
}

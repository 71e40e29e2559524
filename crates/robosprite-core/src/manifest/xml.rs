//! Hierarchical markup manifest format.
//!
//! ```text
//! <!-- This file is generated automatically from robot.pov -->
//! <sprite>
//!   <mode name="walk_d">
//!     <frame img="robot/frame000.png"/>
//!   </mode>
//! </sprite>
//! ```
//!
//! The parser only understands this subset: comments, an optional XML
//! declaration, and `sprite`/`mode`/`frame` elements with double-quoted
//! attributes.

use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;

use super::{Manifest, ManifestError, ManifestResult, ManifestWriter, ModeCursor};

/// Streaming writer for the XML format.
pub struct XmlManifestWriter<W: Write> {
    out: W,
    cursor: ModeCursor,
}

impl<W: Write> XmlManifestWriter<W> {
    /// Creates a writer, emitting the generated-file comment and the root tag.
    pub fn new(mut out: W, source: &str) -> ManifestResult<Self> {
        writeln!(
            out,
            "<!-- This file is generated automatically from {} -->",
            source.replace("--", "- -")
        )?;
        writeln!(out, "<sprite>")?;
        Ok(Self {
            out,
            cursor: ModeCursor::default(),
        })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ManifestWriter for XmlManifestWriter<W> {
    fn begin_mode(&mut self, name: &str) -> ManifestResult<()> {
        self.cursor.begin(name)?;
        writeln!(self.out, "  <mode name=\"{}\">", escape(name))?;
        Ok(())
    }

    fn frame(&mut self, index: usize, path: &str) -> ManifestResult<()> {
        self.cursor.frame(index, path)?;
        writeln!(self.out, "    <frame img=\"{}\"/>", escape(path))?;
        Ok(())
    }

    fn end_mode(&mut self) -> ManifestResult<()> {
        if self.cursor.end() {
            writeln!(self.out, "  </mode>")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ManifestResult<()> {
        writeln!(self.out, "</sprite>")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Escapes text for use inside a double-quoted attribute.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"(?s)<!--.*?-->|<\?.*?\?>|<(/?)([A-Za-z_][\w.-]*)((?:\s+[^>]*?)?)\s*(/?)>"#)
            .expect("invalid regex pattern")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*"([^"]*)""#).expect("invalid regex pattern")
    })
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    attr_regex()
        .captures_iter(attrs)
        .find(|c| &c[1] == name)
        .map(|c| unescape(&c[2]))
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    Outside,
    Sprite,
    Mode,
    Closed,
}

pub(super) fn parse(text: &str) -> ManifestResult<Manifest> {
    let mut manifest = Manifest::new();
    let mut depth = Depth::Outside;
    let mut last_end = 0;

    for caps in tag_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let line = line_of(text, whole.start());

        if !text[last_end..whole.start()].trim().is_empty() {
            return Err(ManifestError::parse(line, "unexpected text between tags"));
        }
        last_end = whole.end();

        let Some(name) = caps.get(2) else {
            // comment or declaration
            continue;
        };
        let closing = !caps[1].is_empty();
        let self_closing = !caps[4].is_empty();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        depth = match (depth, name.as_str(), closing) {
            (Depth::Outside, "sprite", false) if self_closing => Depth::Closed,
            (Depth::Outside, "sprite", false) => Depth::Sprite,
            (Depth::Sprite, "sprite", true) => Depth::Closed,
            (Depth::Sprite, "mode", false) => {
                let mode = attribute(attrs, "name")
                    .ok_or_else(|| ManifestError::parse(line, "<mode> without a name"))?;
                manifest.push_mode(mode);
                if self_closing {
                    Depth::Sprite
                } else {
                    Depth::Mode
                }
            }
            (Depth::Mode, "mode", true) => Depth::Sprite,
            (Depth::Mode, "frame", false) if self_closing => {
                let img = attribute(attrs, "img")
                    .ok_or_else(|| ManifestError::parse(line, "<frame> without an img"))?;
                manifest.push_frame(img);
                Depth::Mode
            }
            (_, tag, closing) => {
                let slash = if closing { "/" } else { "" };
                return Err(ManifestError::parse(
                    line,
                    format!("unexpected <{}{}> here", slash, tag),
                ));
            }
        };
    }

    if !text[last_end..].trim().is_empty() {
        return Err(ManifestError::parse(
            line_of(text, last_end),
            "unexpected trailing text",
        ));
    }

    match depth {
        Depth::Closed => Ok(manifest),
        Depth::Outside => Err(ManifestError::parse(1, "missing <sprite> root")),
        _ => Err(ManifestError::parse(
            line_of(text, text.len()),
            "unterminated <sprite>",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_writer_output() {
        let mut writer = XmlManifestWriter::new(Vec::new(), "robot.pov").unwrap();
        writer.begin_mode("walk_d").unwrap();
        writer.frame(0, "robot/frame000.png").unwrap();
        writer.end_mode().unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "<!-- This file is generated automatically from robot.pov -->\n\
             <sprite>\n\
             \x20 <mode name=\"walk_d\">\n\
             \x20   <frame img=\"robot/frame000.png\"/>\n\
             \x20 </mode>\n\
             </sprite>\n"
        );
    }

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"a&b<"c">'d'"#;
        assert_eq!(unescape(&escape(raw)), raw);
        assert_eq!(escape("a&b"), "a&amp;b");
    }

    #[test]
    fn test_parse_compact_document() {
        let text = r#"<?xml version="1.0"?><sprite><mode name="walk"><frame img="a.png"/><frame img = "b.png" /></mode><mode name="idle"/></sprite>"#;
        let manifest = parse(text).unwrap();
        assert_eq!(manifest.mode_count(), 2);
        assert_eq!(manifest.modes()[0].frames, vec!["a.png", "b.png"]);
        assert!(manifest.modes()[1].frames.is_empty());
    }

    #[test]
    fn test_parse_rejects_frame_outside_mode() {
        let err = parse("<sprite>\n<frame img=\"a.png\"/>\n</sprite>").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_unterminated_root() {
        assert!(parse("<sprite><mode name=\"walk\"></mode>").is_err());
        assert!(parse("").is_err());
        assert!(parse("<sprite></sprite>junk").is_err());
    }

    #[test]
    fn test_parse_requires_attributes() {
        assert!(parse("<sprite><mode></mode></sprite>").is_err());
        assert!(parse("<sprite><mode name=\"m\"><frame/></mode></sprite>").is_err());
    }
}

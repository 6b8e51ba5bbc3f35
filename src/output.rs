//! Output writers for the composed map document.
//!
//! Supports a human-readable summary (with colors) and JSON.

use std::io::{self, Write};

use crate::map::MapDocument;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable terminal summary (default)
    #[default]
    Human,
    /// The full map document as JSON
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s} (expected: human, json)")),
        }
    }
}

/// Truecolor swatch for a `#rrggbb` legend color; plain block otherwise.
fn swatch(color: &str) -> String {
    let hex = color.strip_prefix('#');
    if let Some(hex) = hex {
        if hex.len() == 6 {
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                let (r, g, b) = ((rgb >> 16) & 0xff, (rgb >> 8) & 0xff, rgb & 0xff);
                return format!("\x1b[38;2;{r};{g};{b}m\u{25a0}{RESET}");
            }
        }
    }
    "\u{25a0}".to_string()
}

/// Write the human-readable map summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human<W: Write>(writer: &mut W, doc: &MapDocument) -> io::Result<()> {
    writeln!(
        writer,
        "{BOLD}Map{RESET} {DIM}center {:.1},{:.1} zoom {}{RESET}",
        doc.center[0], doc.center[1], doc.zoom
    )?;

    writeln!(writer, "\n{BOLD}Basemaps{RESET}")?;
    for basemap in doc.control.basemaps() {
        let marker = if basemap.name == doc.control.active_basemap().name {
            "*"
        } else {
            " "
        };
        writeln!(writer, "  {marker} {}", basemap.name)?;
    }

    writeln!(writer, "\n{BOLD}Overlays{RESET}")?;
    for group in doc.control.overlays() {
        let state = if group.visible { "visible" } else { "hidden " };
        writeln!(
            writer,
            "  {DIM}{state}{RESET} {:<18} {:>5} features",
            group.name,
            group.len()
        )?;
        if let Some(source) = &group.source {
            writeln!(writer, "          {DIM}{source}{RESET}")?;
        }
    }

    writeln!(writer, "\n{BOLD}Legend{RESET}")?;
    for entry in &doc.legend.entries {
        writeln!(writer, "  {} {}", swatch(entry.color), entry.label())?;
    }

    Ok(())
}

/// Write the map document as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, doc: &MapDocument) -> io::Result<()> {
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Write the document in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_document<W: Write>(writer: &mut W, doc: &MapDocument, format: Format) -> io::Result<()> {
    match format {
        Format::Human => write_human(writer, doc),
        Format::Json => write_json(writer, doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Basemap, LayerGroup};
    use crate::map::MapDocument;

    fn doc() -> MapDocument {
        MapDocument::compose(
            Basemap::standard_set("tok"),
            LayerGroup::new("Earthquakes"),
            LayerGroup::new("Tectonic Plates"),
            LayerGroup::new("Major Earthquakes"),
        )
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<Format>().unwrap(), Format::Human);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_human_summary_lists_layers_and_legend() {
        let mut buf = Vec::new();
        write_human(&mut buf, &doc()).expect("write");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.contains("Earthquakes"));
        assert!(text.contains("Tectonic Plates"));
        assert!(text.contains("Night Mode"));
        assert!(text.contains("5+"));
    }

    #[test]
    fn test_json_output_is_the_document() {
        let mut buf = Vec::new();
        write_json(&mut buf, &doc()).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(value["zoom"], 3);
    }

    #[test]
    fn test_swatch_parses_hex() {
        assert!(swatch("#ea2c2c").contains("38;2;234;44;44"));
        assert_eq!(swatch("red"), "\u{25a0}");
    }
}

use super::{read_markdown, ProcessOnConfig};
use crate::prelude::{println, *};
use colored::Colorize;
use processon_core::document::{build_document, decode, to_wire, DefEncoding, DocumentPayload};
use processon_core::outline::{count_nodes, OutlineNode, UuidIds};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct EncodeOptions {
    /// Markdown file to read (reads stdin when omitted or `-`)
    pub file: Option<PathBuf>,

    /// Print the parsed outline as an indented tree instead of the wire document
    #[arg(long)]
    pub outline: bool,

    /// Decode the produced wire text again and compare it with the parsed document
    #[arg(long, conflicts_with = "outline")]
    pub check: bool,
}

/// Result of reading the wire text back
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WireCheck {
    pub title: String,
    pub decoded_title: String,
    pub topics: usize,
    pub decoded_topics: usize,
}

impl WireCheck {
    pub fn is_consistent(&self) -> bool {
        self.title == self.decoded_title && self.topics == self.decoded_topics
    }
}

/// Decode `wire` and compare title and topic count with `document`.
pub fn check_wire(
    document: &DocumentPayload,
    wire: &str,
    encoding: DefEncoding,
) -> Result<WireCheck, Error> {
    let decoded = decode(wire, encoding)?;

    Ok(WireCheck {
        title: document.title.clone(),
        decoded_title: decoded.title,
        topics: count_nodes(&document.children),
        decoded_topics: count_nodes(&decoded.children),
    })
}

/// Format the forest as indented text (2 spaces per level).
///
/// Multi-line titles are shown by their first line.
pub fn format_outline_indented(forest: &[OutlineNode]) -> String {
    fn walk(nodes: &[OutlineNode], level: usize, out: &mut Vec<String>) {
        for node in nodes {
            let first_line = node.title.lines().next().unwrap_or_default();
            out.push(f!("{}{}", "  ".repeat(level), first_line));
            walk(&node.children, level + 1, out);
        }
    }

    let mut lines = Vec::new();
    walk(forest, 0, &mut lines);
    lines.join("\n")
}

pub async fn run(options: EncodeOptions, config: &ProcessOnConfig) -> Result<()> {
    let markdown = read_markdown(options.file).await?;
    let document = build_document(&markdown, &mut UuidIds).map_err(Error::from)?;

    if options.outline {
        println!("{}", document.title.bold());
        println!("{}", format_outline_indented(&document.children));
        println!();
        println!("{} topic(s)", count_nodes(&document.children));
        return Ok(());
    }

    let wire = to_wire(&document, config.def_encoding).map_err(Error::from)?;

    if options.check {
        let verdict = check_wire(&document, &wire, config.def_encoding)?;
        if !verdict.is_consistent() {
            return Err(eyre!(
                "wire text does not round-trip: title {:?} -> {:?}, {} -> {} topic(s)",
                verdict.title,
                verdict.decoded_title,
                verdict.topics,
                verdict.decoded_topics
            ));
        }
        println!(
            "{} {:?}, {} topic(s), {} bytes",
            "ok".green(),
            verdict.title,
            verdict.topics,
            wire.len()
        );
        return Ok(());
    }

    println!("{wire}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use processon_core::outline::{parse, SequentialIds};

    #[test]
    fn test_format_outline_indented() {
        let forest = parse(
            "## A\nnote\n- x\n  - y\n## B".lines(),
            &mut SequentialIds::default(),
        );
        assert_eq!(format_outline_indented(&forest), "A\n  x\n    y\nB");
    }

    #[test]
    fn test_check_wire_round_trips_both_encodings() {
        let markdown = "# Plan 100%\n## Ship & tell\n- a\n  - b\ndetail\n## Done";
        for encoding in [DefEncoding::Percent, DefEncoding::Json] {
            let document = build_document(markdown, &mut SequentialIds::default()).unwrap();
            let wire = to_wire(&document, encoding).unwrap();
            let verdict = check_wire(&document, &wire, encoding).unwrap();

            assert!(verdict.is_consistent());
            assert_eq!(verdict.decoded_title, "Plan 100%");
            assert_eq!(verdict.decoded_topics, 4);
        }
    }

    #[test]
    fn test_check_wire_detects_mismatch() {
        let document = build_document("# A\n## x\n## y", &mut SequentialIds::default()).unwrap();
        let other = build_document("# B\n## x", &mut SequentialIds::default()).unwrap();
        let wire = to_wire(&other, DefEncoding::Json).unwrap();

        let verdict = check_wire(&document, &wire, DefEncoding::Json).unwrap();
        assert!(!verdict.is_consistent());
        assert_eq!(verdict.topics, 2);
        assert_eq!(verdict.decoded_topics, 1);
    }

    #[test]
    fn test_check_wire_wrong_encoding_is_protocol_error() {
        let document = build_document("# A\n## x", &mut SequentialIds::default()).unwrap();
        let wire = to_wire(&document, DefEncoding::Percent).unwrap();

        assert!(matches!(
            check_wire(&document, &wire, DefEncoding::Json),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn test_format_outline_empty() {
        assert_eq!(format_outline_indented(&[]), "");
    }
}

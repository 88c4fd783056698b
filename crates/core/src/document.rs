//! Forest to ProcessOn mind-map document.
//!
//! The document is what the endpoint stores under the `def` form field: a root
//! topic carrying the title, a layout tag, a pre-serialized theme and the topic
//! forest produced by [`crate::outline::parse`].

use serde::{Deserialize, Serialize};

use crate::error::MindMapError;
use crate::outline::{parse, IdGenerator, OutlineNode};

/// Root title used when the Markdown has no `# ` line ("untitled mind map").
pub const DEFAULT_TITLE: &str = "未命名思维导图";

/// Free-form mind-map layout.
pub const STRUCTURE_MIND_FREE: &str = "mind_free";

/// Prefix of the line that names the document.
const TITLE_MARKER: &str = "# ";

/// Visual theme attached to every document, already serialized.
pub const THEME: &str = r##"{"background":"#ffffff","version":"v6.1.1","common":{"bold":false,"italic":false,"textAlign":"left"},"connectionStyle":{"lineWidth":2,"lineColor":"#C7654E","color":"#ffffff","lineType":"dashed"},"summaryTopic":{"font-size":"14px","summaryLineColor":"#C7654E","summaryLineWidth":2,"summaryLineType":"curve_complex"},"boundaryStyle":{"lineColor":"#C7654E","lineWidth":2,"lineType":2,"dasharray":"6,3","fill":"#C7654E","opacity":"0.1"},"centerTopic":{"font-size":30,"lineStyle":{"lineType":"curve","lineWidth":3},"shape":"radiansRectangle","background":"#C7654E","border-color":"#C7654E","font-weight":"bold"},"secTopic":{"font-size":18,"lineStyle":{"lineType":"roundBroken","lineWidth":2},"shape":"radiansRectangle","background":"autoColor","border-color":"autoColor"},"childTopic":{"font-size":14,"lineStyle":{"lineType":"roundBroken","lineWidth":2},"shape":"underline","border-width":2,"border-color":"autoColor","childBgOpacity":"0.16","anticipateBackground":"autoColor"},"w1":1,"w2":12,"autoColor":true,"colorList":["#729B8D","#EED484","#E19873","#DFE8D7"],"skeletonId":"mindmap_curve_green-default","colorCardId":"system","colorMinorId":"mind-style1"}"##;

/// How the serialized document is written into the `def` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefEncoding {
    /// Pretty-printed JSON text.
    Json,
    /// JSON text percent-encoded as a URI component.
    #[default]
    Percent,
}

/// Mind-map document as stored by ProcessOn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub root: String,
    #[serde(rename = "showWatermark")]
    pub show_watermark: bool,
    pub structure: String,
    pub theme: String,
    pub title: String,
    pub depth: u32,
    pub id: String,
    pub children: Vec<OutlineNode>,
}

impl DocumentPayload {
    pub fn new(title: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        DocumentPayload {
            root: "true".to_string(),
            show_watermark: false,
            structure: STRUCTURE_MIND_FREE.to_string(),
            theme: THEME.to_string(),
            title: title.into(),
            depth: 1,
            id: "root".to_string(),
            children,
        }
    }
}

/// Split Markdown into the document title and the lines left for the outline parser.
///
/// Blank lines are dropped. The first line starting with `"# "` names the
/// document and is removed; any later `# ` line stays and becomes a level-1
/// heading.
pub fn split_title(markdown: &str) -> Result<(Option<String>, Vec<&str>), MindMapError> {
    let lines: Vec<&str> = markdown
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(MindMapError::Input("Markdown content is empty".to_string()));
    }

    let title_index = lines
        .iter()
        .position(|line| line.starts_with(TITLE_MARKER));

    let title = title_index.map(|i| lines[i][TITLE_MARKER.len()..].trim().to_string());

    let content = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != title_index)
        .map(|(_, line)| *line)
        .collect();

    Ok((title, content))
}

/// Parse Markdown into a complete document payload.
pub fn build_document(
    markdown: &str,
    ids: &mut dyn IdGenerator,
) -> Result<DocumentPayload, MindMapError> {
    let (title, content) = split_title(markdown)?;
    let children = parse(content, ids);

    let title = title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(DocumentPayload::new(title, children))
}

/// Serialize a payload into the text sent as `def`.
pub fn to_wire(payload: &DocumentPayload, encoding: DefEncoding) -> Result<String, MindMapError> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(match encoding {
        DefEncoding::Json => json,
        DefEncoding::Percent => urlencoding::encode(&json).into_owned(),
    })
}

/// Markdown to wire text in one step.
pub fn encode(
    markdown: &str,
    encoding: DefEncoding,
    ids: &mut dyn IdGenerator,
) -> Result<String, MindMapError> {
    let payload = build_document(markdown, ids)?;
    to_wire(&payload, encoding)
}

/// Read wire text back into a payload. Node parents are not part of the wire
/// format and come back as `None`.
pub fn decode(wire: &str, encoding: DefEncoding) -> Result<DocumentPayload, MindMapError> {
    let json = match encoding {
        DefEncoding::Json => wire.to_string(),
        DefEncoding::Percent => urlencoding::decode(wire)
            .map_err(|e| MindMapError::Encoding(format!("Invalid percent-encoding: {e}")))?
            .into_owned(),
    };
    Ok(serde_json::from_str(&json)?)
}

//! The two trace formats: structured XML and flat legacy lines.
//!
//! Both encode the same [`TraceEvent`] stream.  Tag, attribute, and
//! first-token names are fixed for the lifetime of a run so the output is
//! replayable byte-for-byte by external tools.

use std::fmt::Write as _;

use crate::event::TraceEvent;

// ── TraceFormat ───────────────────────────────────────────────────────────────

/// Renders events to text.  Implemented by [`XmlFormat`] and
/// [`LegacyFormat`]; the session drives whichever the configuration chose.
pub trait TraceFormat {
    /// Written at the head of every output file.
    fn preamble(&self) -> String;

    /// Render one event, including its trailing newline.
    fn render(&self, event: &TraceEvent) -> String;

    /// Written before every output file is closed.
    fn epilogue(&self) -> String;
}

/// Which trace format to produce.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatKind {
    /// Structured tag/attribute elements with open/close nesting.
    #[default]
    Xml,
    /// One whitespace-delimited record per line.
    Legacy,
}

impl FormatKind {
    pub fn create(self) -> Box<dyn TraceFormat> {
        match self {
            FormatKind::Xml => Box::new(XmlFormat),
            FormatKind::Legacy => Box::new(LegacyFormat),
        }
    }
}

// ── XML ───────────────────────────────────────────────────────────────────────

/// Escape the five XML-reserved characters in an attribute value.
fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// The structured mode: every open element has a matching close, and a
/// receive references its transmit by `uid` without re-opening it.
pub struct XmlFormat;

impl TraceFormat for XmlFormat {
    fn preamble(&self) -> String {
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<anim ver=\"1\">\n".to_owned()
    }

    fn render(&self, event: &TraceEvent) -> String {
        let mut out = String::new();
        match event {
            TraceEvent::TopologyStart { bounds } => {
                let _ = writeln!(
                    out,
                    "<topology minX=\"{}\" minY=\"{}\" maxX=\"{}\" maxY=\"{}\">",
                    bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
                );
            }
            TraceEvent::Node { id, pos, label } => match label {
                Some(text) => {
                    let _ = writeln!(
                        out,
                        "  <node id=\"{}\" locX=\"{}\" locY=\"{}\" descr=\"{}\"/>",
                        id.0,
                        pos.x,
                        pos.y,
                        xml_escape(text)
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "  <node id=\"{}\" locX=\"{}\" locY=\"{}\"/>",
                        id.0, pos.x, pos.y
                    );
                }
            },
            TraceEvent::Link { from, to } => {
                let _ = writeln!(out, "  <link fromId=\"{}\" toId=\"{}\"/>", from.0, to.0);
            }
            TraceEvent::TopologyEnd => out.push_str("</topology>\n"),
            TraceEvent::Position { node, time, pos } => {
                let _ = writeln!(
                    out,
                    "<node id=\"{}\" t=\"{}\" locX=\"{}\" locY=\"{}\"/>",
                    node.0,
                    time.as_secs_f64(),
                    pos.x,
                    pos.y
                );
            }
            TraceEvent::WirelessTx {
                uid,
                from,
                time,
                range,
                meta,
            } => {
                let _ = write!(
                    out,
                    "<wpacket uid=\"{}\" fromId=\"{}\" t=\"{}\" range=\"{}\"",
                    uid.0,
                    from.0,
                    time.as_secs_f64(),
                    range
                );
                finish_tx_element(&mut out, "wpacket", meta.as_deref());
            }
            TraceEvent::WiredTx {
                uid,
                from,
                time,
                meta,
            } => {
                let _ = write!(
                    out,
                    "<packet uid=\"{}\" fromId=\"{}\" t=\"{}\"",
                    uid.0,
                    from.0,
                    time.as_secs_f64()
                );
                finish_tx_element(&mut out, "packet", meta.as_deref());
            }
            TraceEvent::Rx { uid, to, time, tx } => match tx {
                Some(tx) => {
                    let _ = writeln!(
                        out,
                        "<rx uid=\"{}\" toId=\"{}\" t=\"{}\" fromId=\"{}\" txTime=\"{}\"/>",
                        uid.0,
                        to.0,
                        time.as_secs_f64(),
                        tx.from.0,
                        tx.tx_time.as_secs_f64()
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "<rx uid=\"{}\" toId=\"{}\" t=\"{}\"/>",
                        uid.0,
                        to.0,
                        time.as_secs_f64()
                    );
                }
            },
            TraceEvent::Placeholder => {
                out.push_str("<wpacket uid=\"0\" fromId=\"0\" t=\"0\" range=\"0\"/>\n");
            }
        }
        out
    }

    fn epilogue(&self) -> String {
        "</anim>\n".to_owned()
    }
}

/// Close a transmit element: self-closing when there is no metadata, open
/// form with a nested `meta` child otherwise.
fn finish_tx_element(out: &mut String, tag: &str, meta: Option<&str>) {
    match meta {
        None => out.push_str("/>\n"),
        Some(info) => {
            let _ = writeln!(out, ">\n  <meta info=\"{}\"/>\n</{}>", xml_escape(info), tag);
        }
    }
}

// ── Legacy ────────────────────────────────────────────────────────────────────

/// The flat line-oriented mode.  First token names the record; free text
/// (labels, metadata) comes last so readers can take the rest of the line.
pub struct LegacyFormat;

impl TraceFormat for LegacyFormat {
    fn preamble(&self) -> String {
        String::new()
    }

    fn render(&self, event: &TraceEvent) -> String {
        match event {
            TraceEvent::TopologyStart { bounds } => format!(
                "topology {} {} {} {}\n",
                bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
            ),
            TraceEvent::Node { id, pos, label } => match label {
                Some(text) => format!("node {} {} {} {}\n", id.0, pos.x, pos.y, text),
                None => format!("node {} {} {}\n", id.0, pos.x, pos.y),
            },
            TraceEvent::Link { from, to } => format!("link {} {}\n", from.0, to.0),
            TraceEvent::TopologyEnd => String::new(),
            TraceEvent::Position { node, time, pos } => format!(
                "pos {} {} {} {}\n",
                node.0,
                time.as_secs_f64(),
                pos.x,
                pos.y
            ),
            TraceEvent::WirelessTx {
                uid,
                from,
                time,
                range,
                meta,
            } => {
                let mut line = format!(
                    "wtx {} {} {} {}\n",
                    uid.0,
                    from.0,
                    time.as_secs_f64(),
                    range
                );
                if let Some(info) = meta {
                    let _ = writeln!(line, "meta {} {}", uid.0, info);
                }
                line
            }
            TraceEvent::WiredTx {
                uid,
                from,
                time,
                meta,
            } => {
                let mut line = format!("tx {} {} {}\n", uid.0, from.0, time.as_secs_f64());
                if let Some(info) = meta {
                    let _ = writeln!(line, "meta {} {}", uid.0, info);
                }
                line
            }
            TraceEvent::Rx { uid, to, time, tx } => match tx {
                Some(tx) => format!(
                    "rx {} {} {} {} {}\n",
                    uid.0,
                    to.0,
                    time.as_secs_f64(),
                    tx.from.0,
                    tx.tx_time.as_secs_f64()
                ),
                None => format!("rx {} {} {}\n", uid.0, to.0, time.as_secs_f64()),
            },
            TraceEvent::Placeholder => "dummy\n".to_owned(),
        }
    }

    fn epilogue(&self) -> String {
        String::new()
    }
}

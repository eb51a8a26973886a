//! Outline record extraction from mindmap XML exports.
//!
//! The exports are project-management XML documents: a root element carrying
//! an `xmlns` declaration, a `Tasks` collection, and one `Task` per outline
//! node with `Name`, `OutlineNumber` and `OutlineLevel` children. Records are
//! emitted in document order, which is depth-first outline order.

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::{VarmapError, VarmapResult};

/// Namespace assumed when the root element declares none.
pub const DEFAULT_NAMESPACE: &str = "http://schemas.microsoft.com/project";

/// One flat outline entry, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRecord {
    pub name: String,
    /// Dotted numeric path, e.g. "1.2.3".
    pub position: String,
    /// Nesting depth, 1-based.
    pub level: u32,
}

impl OutlineRecord {
    pub fn new(name: impl Into<String>, position: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            level,
        }
    }
}

/// Validate the input resource and extract its outline records.
///
/// The resource must exist and carry a `.xml` extension; both are checked
/// before any parsing is attempted.
pub fn read_outline_file(path: &Path, fallback_namespace: &str) -> VarmapResult<Vec<OutlineRecord>> {
    info!("Reading file: {}", path.display());

    if !path.is_file() {
        return Err(VarmapError::InvalidInput {
            path: path.to_path_buf(),
            reason: "file doesn't exist".to_string(),
        });
    }
    if path.extension().and_then(|e| e.to_str()) != Some("xml") {
        return Err(VarmapError::InvalidInput {
            path: path.to_path_buf(),
            reason: "must be an XML file".to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_outline(&content, fallback_namespace)
}

/// Which required Task field is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskField {
    Name,
    Position,
    Level,
}

#[derive(Debug, Default)]
struct PartialTask {
    name: Option<String>,
    position: Option<String>,
    level: Option<String>,
}

impl PartialTask {
    fn finish(self, position_re: &Regex) -> VarmapResult<OutlineRecord> {
        let name = self
            .name
            .ok_or_else(|| VarmapError::MalformedDocument("Task without a Name".to_string()))?;
        let position = self.position.ok_or_else(|| {
            VarmapError::MalformedDocument(format!("Task '{name}' without an OutlineNumber"))
        })?;
        let level = self.level.ok_or_else(|| {
            VarmapError::MalformedDocument(format!("Task '{name}' without an OutlineLevel"))
        })?;

        if !position_re.is_match(&position) {
            return Err(VarmapError::MalformedDocument(format!(
                "Task '{name}': OutlineNumber '{position}' is not a dotted numeric path"
            )));
        }
        let level: u32 = level.trim().parse().map_err(|_| {
            VarmapError::MalformedDocument(format!(
                "Task '{name}': OutlineLevel '{level}' is not an integer"
            ))
        })?;

        Ok(OutlineRecord {
            name,
            position,
            level,
        })
    }
}

/// Parse outline records out of mindmap XML content.
///
/// Elements are matched by local name; the namespace declared on the root
/// element (or the given fallback when absent) is resolved and logged but
/// not enforced per element. Fails with `MalformedDocument` when the Tasks
/// collection is missing or a Task lacks a required field. An empty Tasks
/// collection yields an empty record list; the tree builder rejects it.
pub fn parse_outline(content: &str, fallback_namespace: &str) -> VarmapResult<Vec<OutlineRecord>> {
    info!("Parsing XML data");

    let mut reader = Reader::from_str(strip_bom(content));
    reader.config_mut().trim_text(true);

    let position_re = Regex::new(r"^\d+(\.\d+)*$").unwrap();

    let mut records = Vec::new();
    let mut saw_root = false;
    let mut seen_tasks = false;
    let mut in_tasks = false;
    let mut task: Option<PartialTask> = None;
    let mut field: Option<TaskField> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if !saw_root {
                    saw_root = true;
                    let ns = declared_namespace(&e)
                        .unwrap_or_else(|| fallback_namespace.to_string());
                    debug!("document namespace: {}", ns);
                    continue;
                }

                match local {
                    b"Tasks" if task.is_none() => {
                        in_tasks = true;
                        seen_tasks = true;
                    }
                    b"Task" if in_tasks => task = Some(PartialTask::default()),
                    b"Name" | b"OutlineNumber" | b"OutlineLevel" if task.is_some() => {
                        field = Some(match local {
                            b"Name" => TaskField::Name,
                            b"OutlineNumber" => TaskField::Position,
                            _ => TaskField::Level,
                        });
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Empty(e)) => {
                // Self-closing field, e.g. <Name/>: present but empty.
                let name = e.name();
                if let Some(partial) = task.as_mut() {
                    match local_name(name.as_ref()) {
                        b"Name" => partial.name = Some(String::new()),
                        b"OutlineNumber" => partial.position = Some(String::new()),
                        b"OutlineLevel" => partial.level = Some(String::new()),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                match (local, field) {
                    (b"Name", Some(TaskField::Name))
                    | (b"OutlineNumber", Some(TaskField::Position))
                    | (b"OutlineLevel", Some(TaskField::Level)) => {
                        if let Some(partial) = task.as_mut() {
                            let value = std::mem::take(&mut text);
                            match field {
                                Some(TaskField::Name) => partial.name = Some(value),
                                Some(TaskField::Position) => partial.position = Some(value),
                                Some(TaskField::Level) => partial.level = Some(value),
                                None => {}
                            }
                        }
                        field = None;
                    }
                    (b"Task", _) => {
                        if let Some(partial) = task.take() {
                            records.push(partial.finish(&position_re)?);
                        }
                    }
                    (b"Tasks", _) => in_tasks = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(VarmapError::Xml(e)),
            _ => {}
        }
    }

    if !seen_tasks {
        return Err(VarmapError::MalformedDocument(
            "Tasks element missing".to_string(),
        ));
    }

    debug!("extracted {} outline records", records.len());
    Ok(records)
}

/// Strip the local part from a possibly prefixed element name.
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// The default namespace declared on an element, if any.
fn declared_namespace(e: &quick_xml::events::BytesStart) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"xmlns" {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

/// Strip a UTF-8 BOM some exporters prepend.
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

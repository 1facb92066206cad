//! YAML flattening into dotted property keys
//!
//! Nested mappings become dotted keys, scalar lists become comma-separated
//! values and lists containing mappings are indexed (`key[0].child`).
//! Multi-document files are merged in document order.
//!
//! Scalars keep their source text: `1.10` stays `1.10` and `0x1F` stays
//! `0x1F`. A `~` key gives a value to its parent path, so `cors: {~: true,
//! origins: x}` yields both `cors` and `cors.origins`.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::{ParseError, PropertyMap};

/// Flatten YAML content into a property map.
///
/// # Errors
///
/// Returns a [`ParseError`] when the content is not valid YAML, when a
/// document is not a mapping, or when a mapping key is a collection.
pub fn flatten(content: &str) -> Result<PropertyMap, ParseError> {
    let mut events = EventLog::default();
    Parser::new_from_str(content)
        .load(&mut events, true)
        .map_err(|e| ParseError::new(e.marker().line(), e.to_string()))?;

    let mut reader = TreeReader::new(events.0);
    let mut map = PropertyMap::new();

    while let Some((document, line)) = reader.next_document()? {
        match document {
            Node::Null => {}
            Node::Mapping(_) => flatten_into(&mut map, "", &document)?,
            other => {
                return Err(ParseError::new(
                    line,
                    format!(
                        "expected a mapping at the document root, found {}",
                        other.kind()
                    ),
                ));
            }
        }
    }

    Ok(map)
}

/// A YAML node with scalars kept as written.
#[derive(Debug, Clone)]
enum Node {
    Null,
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "a scalar",
            Self::Sequence(_) => "a sequence",
            Self::Mapping(_) => "a mapping",
        }
    }

    fn scalar_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Default)]
struct EventLog(Vec<(Event, Marker)>);

impl MarkedEventReceiver for EventLog {
    fn on_event(&mut self, event: Event, mark: Marker) {
        self.0.push((event, mark));
    }
}

/// Rebuilds document trees from the parser's event stream.
struct TreeReader {
    events: std::vec::IntoIter<(Event, Marker)>,
    anchors: HashMap<usize, Node>,
    line: usize,
}

impl TreeReader {
    fn new(events: Vec<(Event, Marker)>) -> Self {
        Self {
            events: events.into_iter(),
            anchors: HashMap::new(),
            line: 0,
        }
    }

    fn next_document(&mut self) -> Result<Option<(Node, usize)>, ParseError> {
        while let Some((event, mark)) = self.events.next() {
            self.line = mark.line();
            match event {
                Event::StreamEnd => break,
                Event::Scalar(..)
                | Event::SequenceStart(..)
                | Event::MappingStart(..)
                | Event::Alias(..) => {
                    let line = self.line;
                    return self.node(event).map(|node| Some((node, line)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn next_event(&mut self) -> Result<Event, ParseError> {
        match self.events.next() {
            Some((event, mark)) => {
                self.line = mark.line();
                Ok(event)
            }
            None => Err(ParseError::new(self.line, "unexpected end of YAML stream")),
        }
    }

    fn node(&mut self, event: Event) -> Result<Node, ParseError> {
        match event {
            Event::Scalar(text, style, anchor, ..) => {
                let node = if style == TScalarStyle::Plain && is_null(&text) {
                    Node::Null
                } else {
                    Node::Scalar(text)
                };
                Ok(self.remember(anchor, node))
            }
            Event::Alias(anchor) => Ok(self.anchors.get(&anchor).cloned().unwrap_or(Node::Null)),
            Event::SequenceStart(anchor, ..) => {
                let mut items = Vec::new();
                loop {
                    let event = self.next_event()?;
                    if matches!(event, Event::SequenceEnd) {
                        break;
                    }
                    items.push(self.node(event)?);
                }
                Ok(self.remember(anchor, Node::Sequence(items)))
            }
            Event::MappingStart(anchor, ..) => {
                let mut entries = Vec::new();
                loop {
                    let event = self.next_event()?;
                    if matches!(event, Event::MappingEnd) {
                        break;
                    }
                    let key = self.node(event)?;
                    let event = self.next_event()?;
                    let value = self.node(event)?;
                    entries.push((key, value));
                }
                Ok(self.remember(anchor, Node::Mapping(entries)))
            }
            other => Err(ParseError::new(
                self.line,
                format!("unexpected YAML event {other:?}"),
            )),
        }
    }

    fn remember(&mut self, anchor: usize, node: Node) -> Node {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        node
    }
}

fn is_null(text: &str) -> bool {
    matches!(text, "~" | "null" | "Null" | "NULL" | "")
}

fn flatten_into(map: &mut PropertyMap, prefix: &str, node: &Node) -> Result<(), ParseError> {
    match node {
        Node::Null => {}
        Node::Scalar(text) => {
            if !prefix.is_empty() {
                map.insert(prefix.to_string(), text.clone());
            }
        }
        Node::Mapping(entries) => {
            for (key, child) in entries {
                let path = match key {
                    Node::Null => prefix.to_string(),
                    Node::Scalar(segment) if prefix.is_empty() => segment.clone(),
                    Node::Scalar(segment) => format!("{prefix}.{segment}"),
                    other => {
                        return Err(ParseError::new(
                            0,
                            format!("mapping keys must be scalars, found {}", other.kind()),
                        ));
                    }
                };
                flatten_into(map, &path, child)?;
            }
        }
        Node::Sequence(items) => {
            if items.iter().all(|item| item.scalar_text().is_some()) {
                let joined = items
                    .iter()
                    .filter_map(Node::scalar_text)
                    .map(|item| item.replace(',', "\\,"))
                    .collect::<Vec<_>>()
                    .join(",");
                map.insert(prefix.to_string(), joined);
            } else {
                for (index, item) in items.iter().enumerate() {
                    flatten_into(map, &format!("{prefix}[{index}]"), item)?;
                }
            }
        }
    }
    Ok(())
}

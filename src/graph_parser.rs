use winnow::prelude::*;
use winnow::ascii::{Caseless, space0, space1};
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::token::{literal, take_until, take_while};

use crate::error::{ParseError, Result};
use crate::graph_ast::*;

const HEADER_SUGGESTION: &str =
    "Use 'flowchart LR', 'flowchart RL', 'flowchart TB', or 'flowchart BT'";
const LINE_SUGGESTION: &str = "Only 'A --> B' or 'A[Label]' are supported";
const NODE_SUGGESTION: &str = "Use 'ID' or 'ID[Label]'";

/// Parses a flowchart into a graph. Stops at the first malformed line.
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("%%"));

    let (header_line, header_text) = lines.next().ok_or(ParseError::EmptyInput)?;
    let direction = header
        .parse(header_text)
        .map_err(|_| ParseError::UnsupportedDiagram {
            line: header_line,
            suggestion: Some(HEADER_SUGGESTION),
        })?;

    let mut graph = Graph::new(direction);
    for (line_no, text) in lines {
        let refs = statement
            .parse(text)
            .map_err(|_| diagnose(line_no, text))?;
        for node in &refs {
            graph.declare_node(node.id, node.label);
        }
        for pair in refs.windows(2) {
            graph.add_edge(pair[0].id, pair[1].id);
        }
    }

    tracing::debug!(
        direction = direction.keyword(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "parsed flowchart"
    );
    Ok(graph)
}

/// Picks the most specific error for a line the grammar rejected: the first
/// bad reference of an arrow chain, or the whole line otherwise.
fn diagnose(line: usize, text: &str) -> ParseError {
    if text.contains("-->") {
        let bad_segment = text
            .split("-->")
            .map(str::trim)
            .find(|segment| node_ref.parse(*segment).is_err());
        if let Some(segment) = bad_segment {
            return ParseError::InvalidSyntax {
                line,
                text: segment.to_string(),
                suggestion: Some(NODE_SUGGESTION),
            };
        }
    }
    ParseError::InvalidSyntax {
        line,
        text: text.to_string(),
        suggestion: Some(LINE_SUGGESTION),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NodeRef<'s> {
    id: &'s str,
    label: Option<&'s str>,
}

fn header(input: &mut &str) -> winnow::Result<Direction> {
    literal(Caseless("flowchart")).parse_next(input)?;
    space1.parse_next(input)?;
    direction.parse_next(input)
}

fn direction(input: &mut &str) -> winnow::Result<Direction> {
    alt((
        literal(Caseless("LR")).value(Direction::LeftRight),
        literal(Caseless("RL")).value(Direction::RightLeft),
        literal(Caseless("TB")).value(Direction::TopBottom),
        literal(Caseless("BT")).value(Direction::BottomTop),
    ))
    .parse_next(input)
}

/// One or more node references joined by `-->`. A single reference is a bare
/// node declaration.
fn statement<'s>(input: &mut &'s str) -> winnow::Result<Vec<NodeRef<'s>>> {
    let first = node_ref.parse_next(input)?;
    let rest: Vec<NodeRef<'s>> =
        repeat(0.., preceded((space0, "-->", space0), node_ref)).parse_next(input)?;
    let mut refs = Vec::with_capacity(rest.len() + 1);
    refs.push(first);
    refs.extend(rest);
    Ok(refs)
}

/// Word characters, Unicode letters and digits included, so ids like `café`
/// or `節点` are accepted.
fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn node_ref<'s>(input: &mut &'s str) -> winnow::Result<NodeRef<'s>> {
    let id = identifier.parse_next(input)?;
    let label = opt(bracketed_label).parse_next(input)?;
    Ok(NodeRef {
        id,
        label: label.filter(|l| !l.is_empty()),
    })
}

fn bracketed_label<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited("[", take_until(0.., "]"), "]").parse_next(input)
}

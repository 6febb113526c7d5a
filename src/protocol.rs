//! Line-oriented commands that build graphs:
//!
//! ```text
//! V 5
//! E {<0,1>,<1,2>,<3,4>}
//! s 0 2
//! ```
//!
//! `V` starts a fresh graph, `E` sets its edges once and completes it, `s`
//! asks for a shortest path in the current graph.

use std::io::BufRead;
use thiserror::Error;

use crate::graph::{Graph, GraphError, Vertex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Vertices(i64),
    Edges(Vec<(i64, i64)>),
    ShortestPath(i64, i64),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("no command entered")]
    Empty,
    #[error("command unknown: '{0}'")]
    UnknownCommand(String),
    #[error("incorrect command, {0}")]
    Malformed(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("must define graph with at least zero vertices, got {0}")]
    NegativeVertexCount(i64),
    #[error("no graph defined yet")]
    NoGraph,
    #[error("cannot redefine the graph edges")]
    EdgesAlreadySet,
    #[error("vertex {0} does not exist")]
    UnknownVertex(i64),
    #[error("no path exists between {0} and {1}")]
    NoPath(Vertex, Vertex),
    #[error("input ended before a graph was complete")]
    Incomplete,
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

fn number(token: &str) -> Result<i64, ProtocolError> {
    token
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidNumber(token.trim().to_string()))
}

fn parse_edges(params: &str) -> Result<Vec<(i64, i64)>, ProtocolError> {
    let stripped: String = params
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '<' | '>') && !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return Ok(Vec::new());
    }
    let endpoints = stripped
        .split(',')
        .map(number)
        .collect::<Result<Vec<_>, _>>()?;
    if endpoints.len() % 2 != 0 {
        return Err(ProtocolError::Malformed("edge list has an unpaired vertex"));
    }
    Ok(endpoints.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(cmd) = chars.next() else {
        return Err(ProtocolError::Empty);
    };
    let params = chars.as_str();
    if !params.is_empty() && !params.starts_with(char::is_whitespace) {
        return Err(ProtocolError::UnknownCommand(line.to_string()));
    }
    match cmd {
        'V' => {
            let mut tokens = params.split_whitespace();
            let (Some(n), None) = (tokens.next(), tokens.next()) else {
                return Err(ProtocolError::Malformed("expected 'V <vertices>'"));
            };
            Ok(Command::Vertices(number(n)?))
        }
        'E' => {
            if params.trim().is_empty() {
                return Err(ProtocolError::Malformed("expected 'E {<a,b>,...}'"));
            }
            Ok(Command::Edges(parse_edges(params)?))
        }
        's' => {
            let mut tokens = params.split_whitespace();
            let (Some(a), Some(b), None) = (tokens.next(), tokens.next(), tokens.next()) else {
                return Err(ProtocolError::Malformed("expected 's <from> <to>'"));
            };
            Ok(Command::ShortestPath(number(a)?, number(b)?))
        }
        _ => Err(ProtocolError::UnknownCommand(line.to_string())),
    }
}

/// What the caller should do after a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to report yet.
    Pending,
    /// The current graph just got its edges and is ready to solve.
    GraphReady,
    Path(Vec<Vertex>),
}

/// Graph under construction, fed one command at a time.
#[derive(Debug, Default)]
pub struct Session {
    graph: Option<Graph>,
    edges_set: bool,
}

impl Session {
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn apply(&mut self, command: Command) -> Result<Reply, ProtocolError> {
        match command {
            Command::Vertices(n) => {
                if n < 0 {
                    return Err(ProtocolError::NegativeVertexCount(n));
                }
                self.graph = Some(Graph::new(n)?);
                self.edges_set = false;
                Ok(Reply::Pending)
            }
            Command::Edges(edges) => {
                let graph = self.graph.as_mut().ok_or(ProtocolError::NoGraph)?;
                if self.edges_set {
                    return Err(ProtocolError::EdgesAlreadySet);
                }
                graph.try_set_edges(&edges)?;
                self.edges_set = true;
                Ok(Reply::GraphReady)
            }
            Command::ShortestPath(a, b) => {
                let graph = self.graph.as_ref().ok_or(ProtocolError::NoGraph)?;
                let from = vertex_in(graph, a)?;
                let to = vertex_in(graph, b)?;
                let path = graph.path(from, to);
                if path.is_empty() {
                    return Err(ProtocolError::NoPath(from, to));
                }
                Ok(Reply::Path(path))
            }
        }
    }
}

fn vertex_in(graph: &Graph, vertex: i64) -> Result<Vertex, ProtocolError> {
    match Vertex::try_from(vertex) {
        Ok(v) if v < graph.vertices() => Ok(v),
        _ => Err(ProtocolError::UnknownVertex(vertex)),
    }
}

/// Replays commands from `reader` until the first complete graph.
pub fn parse_input(reader: impl BufRead) -> Result<Graph, ProtocolError> {
    let mut session = Session::default();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if session.apply(parse_command(&line)?)? == Reply::GraphReady {
            return session.graph.take().ok_or(ProtocolError::Incomplete);
        }
    }
    Err(ProtocolError::Incomplete)
}

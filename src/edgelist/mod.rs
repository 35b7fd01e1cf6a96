use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num,
};

use crate::graph::{Graph, Node};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgeListError {
    #[error("malformed or missing header: {0}")]
    MalformedHeader(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("record must start with e, n or c: {0}")]
    UnknownRecordType(String),
    #[error("io error")]
    IO(#[from] io::Error),
    #[error("not a valid node id")]
    ParseError(#[from] num::ParseIntError),
}

type Result<T> = std::result::Result<T, EdgeListError>;

/// Reads a graph from an edge-list file. The format is line oriented:
/// a `p burn d` or `p burn u` header picks the orientation, `e A B` records
/// an edge, `n A` declares a node with no edges, and lines starting with `c`
/// are comments.
pub fn parse(filename: &str) -> Result<Graph> {
    let file = File::open(filename)?;
    read_from(BufReader::new(file))
}

pub fn read_from<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph: Option<Graph> = None;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        let words: Vec<&str> = trimmed.split_ascii_whitespace().collect();
        match &mut graph {
            None => graph = Some(parse_header(&words, trimmed)?),
            Some(graph) => parse_record(graph, &words, trimmed)?,
        }
    }

    graph.ok_or_else(|| EdgeListError::MalformedHeader("<empty input>".to_string()))
}

fn parse_header(words: &[&str], line: &str) -> Result<Graph> {
    match words {
        ["p", "burn", "d"] => Ok(Graph::directed()),
        ["p", "burn", "u"] => Ok(Graph::undirected()),
        _ => Err(EdgeListError::MalformedHeader(line.to_string())),
    }
}

fn parse_record(graph: &mut Graph, words: &[&str], line: &str) -> Result<()> {
    match words {
        ["e", from, to] => {
            graph.add_edge(Node(from.parse()?), Node(to.parse()?));
            Ok(())
        }
        ["n", node] => {
            graph.add_node(Node(node.parse()?));
            Ok(())
        }
        ["e", ..] | ["n", ..] => Err(EdgeListError::InvalidRecord(line.to_string())),
        _ => Err(EdgeListError::UnknownRecordType(line.to_string())),
    }
}

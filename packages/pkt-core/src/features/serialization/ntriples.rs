//! N-Triples writer
//!
//! Produces a valid N-Triples document (one triple per line, absolute IRIs).
//! Lines follow the graph's ordering, so identical graphs serialize to
//! identical bytes.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::Result;
use crate::shared::KnowledgeGraph;

/// Serialize to an in-memory N-Triples document.
#[must_use]
pub fn to_ntriples(graph: &KnowledgeGraph) -> String {
    let mut out = String::with_capacity(graph.len() * 128);
    for triple in graph {
        out.push_str(&triple.to_string());
        out.push_str(" .\n");
    }
    out
}

/// Write `graph` to `path`, creating parent directories. Returns the triple count.
pub fn write_ntriples(graph: &KnowledgeGraph, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for triple in graph {
        writeln!(writer, "{} .", triple)?;
    }
    writer.flush()?;
    Ok(graph.len())
}

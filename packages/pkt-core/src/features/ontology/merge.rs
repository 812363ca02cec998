// Ontology Merging
//
// Merging (with import closure) is delegated to an external tool. The engine
// only makes sure a merged artifact exists at the canonical path before it
// loads the vocabulary.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;
use walkdir::WalkDir;

use super::loader::load_graph;
use crate::errors::{KgError, Result};
use crate::features::serialization::write_ntriples;
use crate::shared::KnowledgeGraph;

const ONTOLOGY_EXTENSIONS: &[&str] = &["owl", "rdf", "ttl", "nt", "xml"];

/// External collaborator that merges ontology files into one artifact.
pub trait OntologyMerger: Send + Sync {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
}

/// Ontology files under `dir`, sorted, hidden files skipped.
pub fn list_ontology_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| KgError::Io(e.into()))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let known = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| ONTOLOGY_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if entry.file_type().is_file() && !hidden && known {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Merge `ontology_dir` into `merged_path` unless it already exists.
///
/// Returns `true` when a merge ran.
pub fn ensure_merged(
    merger: &dyn OntologyMerger,
    ontology_dir: &Path,
    merged_path: &Path,
) -> Result<bool> {
    if merged_path.is_file() {
        info!("Using existing merged ontology {}", merged_path.display());
        return Ok(false);
    }

    let inputs = list_ontology_files(ontology_dir)?;
    if inputs.is_empty() {
        return Err(KgError::Merge(format!(
            "no ontology files found in {}",
            ontology_dir.display()
        )));
    }
    if let Some(parent) = merged_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!(
        "Merging {} ontologies into {}",
        inputs.len(),
        merged_path.display()
    );
    merger.merge(&inputs, merged_path)?;

    if !merged_path.is_file() {
        return Err(KgError::Merge(format!(
            "merger did not produce {}",
            merged_path.display()
        )));
    }
    Ok(true)
}

// ============================================================
// Adapters
// ============================================================

/// Runs an owltools-compatible command:
/// `<program> <inputs..> --merge-import-closure --merge-support-ontologies -o <output>`
#[derive(Debug, Clone)]
pub struct CommandMerger {
    pub program: PathBuf,
    pub extra_args: Vec<String>,
}

impl CommandMerger {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn command(&self, inputs: &[PathBuf], output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(inputs)
            .arg("--merge-import-closure")
            .arg("--merge-support-ontologies")
            .args(&self.extra_args)
            .arg("-o")
            .arg(output);
        cmd
    }
}

impl OntologyMerger for CommandMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let status = self.command(inputs, output).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(KgError::Merge(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )))
        }
    }
}

/// Plain set union of every input, written as N-Triples. No import closure.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionMerger;

impl OntologyMerger for UnionMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let mut merged = KnowledgeGraph::new();
        for input in inputs {
            merged.union(load_graph(input)?);
        }
        write_ntriples(&merged, output)?;
        Ok(())
    }
}

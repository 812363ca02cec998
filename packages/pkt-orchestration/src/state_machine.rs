//! BuildStateMachine
//!
//! One instance per build. Everything that decides what a build does is fixed
//! at construction (variant, approach, gated flags, worker count, locations)
//! and validated up front; `construct_graph` then runs the stages in order:
//!
//! ```text
//! relations → merged ontology → vocabulary → workers → error log
//!           → namespace cleanup → split + write → (decode + write)
//! ```

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};

use pkt_core::config::{BuildConfig, BuildOptions, BuildVariant};
use pkt_core::features::edge_construction::{
    EdgeSpecDocument, EdgeStatistics, EdgeTask, ErrorLog, NodeMetadata, WorkerContext,
};
use pkt_core::features::ontology::{
    ensure_merged, load_graph, OntologyMerger, OntologyVocabulary, RelationDictionaries, UnionMerger,
};
use pkt_core::features::post_processing::{anonymize_restrictions, split_graph};
use pkt_core::features::serialization::{write_encoded_artifacts, write_ntriples, write_rdfxml, EncodedArtifacts};
use pkt_core::features::subclass_map::SubclassResolver;
use pkt_core::KnowledgeGraph;

use crate::coordinator::BuildCoordinator;
use crate::decoder::{OwlDecoder, RestrictionDecoder};
use crate::error::{OrchestratorError, Result};
use crate::naming::OutputNames;

/// Stages of `construct_graph`, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
    ProcessRelations,
    MergeOntologies,
    LoadOntology,
    ConstructEdges,
    WriteErrorLog,
    NamespaceCleanup,
    SplitAndWrite,
    DecodeOwl,
}

impl BuildStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStage::ProcessRelations => "process_relations",
            BuildStage::MergeOntologies => "merge_ontologies",
            BuildStage::LoadOntology => "load_ontology",
            BuildStage::ConstructEdges => "construct_edges",
            BuildStage::WriteErrorLog => "write_error_log",
            BuildStage::NamespaceCleanup => "namespace_cleanup",
            BuildStage::SplitAndWrite => "split_and_write",
            BuildStage::DecodeOwl => "decode_owl",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTiming {
    pub stage: BuildStage,
    pub duration_ms: u64,
}

/// Summary returned by `construct_graph`
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub build_type: String,
    /// `true` when this build ran the ontology merge
    pub merged_ontologies: bool,
    pub ontology_triples: usize,
    pub constructed_triples: usize,
    /// Triple count after namespace cleanup
    pub total_triples: usize,
    pub logic_triples: usize,
    pub annotation_triples: usize,
    pub owlnets_triples: Option<usize>,
    pub purified_triples: Option<usize>,
    pub error_log: ErrorLog,
    pub edge_statistics: Vec<EdgeStatistics>,
    pub outputs: Vec<PathBuf>,
    pub stages: Vec<StageTiming>,
}

struct StageClock<'a> {
    build_type: &'a str,
    started: Instant,
    timings: Vec<StageTiming>,
}

impl<'a> StageClock<'a> {
    fn new(build_type: &'a str) -> Self {
        Self {
            build_type,
            started: Instant::now(),
            timings: Vec::new(),
        }
    }

    fn finish(&mut self, stage: BuildStage) {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        info!("{}: {} finished in {} ms", self.build_type, stage, duration_ms);
        self.timings.push(StageTiming { stage, duration_ms });
        self.started = Instant::now();
    }
}

pub struct BuildStateMachine {
    config: BuildConfig,
    edges: EdgeSpecDocument,
    resolver: SubclassResolver,
    metadata: Option<NodeMetadata>,
    merger: Box<dyn OntologyMerger>,
    decoder: Box<dyn OwlDecoder>,
    relations: OnceLock<RelationDictionaries>,
}

impl BuildStateMachine {
    /// Validate `options` for `variant` and load the build inputs.
    pub fn new(variant: BuildVariant, options: &BuildOptions) -> Result<Self> {
        Self::from_config(BuildConfig::from_options(variant, options)?)
    }

    pub fn from_config(config: BuildConfig) -> Result<Self> {
        let edges = EdgeSpecDocument::load(&config.paths.edge_spec())?;
        let resolver = SubclassResolver::load(&config.paths.subclass_map())?;
        let metadata = if config.node_data.is_enabled() {
            Some(NodeMetadata::load(&config.paths.node_metadata())?)
        } else {
            None
        };

        info!(
            "{}: {} edge types, {} mapped ids, approach={}, inverse_relations={}, decode_owl={}, workers={}",
            config.variant.build_type(),
            edges.len(),
            resolver.len(),
            config.approach,
            config.inverse_relations,
            config.decode_owl,
            config.workers
        );

        Ok(Self {
            config,
            edges,
            resolver,
            metadata,
            merger: Box::new(UnionMerger),
            decoder: Box::new(RestrictionDecoder),
            relations: OnceLock::new(),
        })
    }

    pub fn with_merger(mut self, merger: impl OntologyMerger + 'static) -> Self {
        self.merger = Box::new(merger);
        self
    }

    pub fn with_decoder(mut self, decoder: impl OwlDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn edges(&self) -> &EdgeSpecDocument {
        &self.edges
    }

    pub fn build_type(&self) -> &'static str {
        self.config.variant.build_type()
    }

    pub fn output_names(&self) -> OutputNames {
        OutputNames::for_config(&self.config)
    }

    /// Relation labels and inverses, loaded once. Labels load whenever the
    /// labels file exists; inverses only when inverse relations are enabled.
    pub fn process_relations(&self) -> Result<&RelationDictionaries> {
        if let Some(dictionaries) = self.relations.get() {
            return Ok(dictionaries);
        }
        let labels = self.config.paths.relations_labels();
        let mut dictionaries = if labels.is_file() {
            RelationDictionaries::load_labels(&labels)?
        } else {
            RelationDictionaries::empty()
        };
        if self.config.inverse_relations.is_enabled() {
            dictionaries.load_inverses(&self.config.paths.inverse_relations())?;
        }
        Ok(self.relations.get_or_init(|| dictionaries))
    }

    /// Inverse relation to build for `relation`, if any.
    pub fn check_relations(&self, relation: &str, edge_list: &[(String, String)]) -> Result<Option<String>> {
        Ok(self.process_relations()?.check_relations(relation, edge_list))
    }

    /// One task per edge type. Inverses come from the edge specification or,
    /// failing that, the relation dictionaries; none when disabled.
    pub fn edge_tasks(&self) -> Result<Vec<EdgeTask>> {
        let inverse_enabled = self.config.inverse_relations.is_enabled();
        let mut tasks = Vec::with_capacity(self.edges.len());
        for spec in self.edges.edges.values() {
            let inverse = if !inverse_enabled {
                None
            } else if let Some(declared) = &spec.inverse_relation {
                Some(declared.clone())
            } else {
                self.check_relations(&spec.relation, &spec.edge_list)?
            };
            tasks.push(EdgeTask::new(spec.clone()).with_inverse(inverse));
        }
        Ok(tasks)
    }

    pub fn construct_graph(&self) -> Result<BuildReport> {
        let build_type = self.build_type();
        let paths = &self.config.paths;
        let names = self.output_names();
        let mut clock = StageClock::new(build_type);
        info!("{}: constructing knowledge graph", build_type);

        let relations = self.process_relations()?;
        clock.finish(BuildStage::ProcessRelations);

        let merged_path = paths.merged_ontology();
        let merged_ontologies = match self.config.variant {
            BuildVariant::Full | BuildVariant::Partial => {
                ensure_merged(self.merger.as_ref(), &paths.ontologies(), &merged_path)?
            }
            BuildVariant::PostClosure => {
                if !merged_path.is_file() {
                    return Err(OrchestratorError::MissingMergedOntology(merged_path));
                }
                false
            }
        };
        clock.finish(BuildStage::MergeOntologies);

        let ontology = load_graph(&merged_path)?;
        let vocabulary = OntologyVocabulary::from_graph(&ontology);
        let ontology_triples = ontology.len();
        info!(
            "{}: ontology has {} triples, {} classes, {} object properties",
            build_type,
            ontology_triples,
            vocabulary.classes.len(),
            vocabulary.object_properties.len()
        );
        clock.finish(BuildStage::LoadOntology);

        let ctx = WorkerContext {
            approach: self.config.approach,
            resolver: &self.resolver,
            vocabulary: &vocabulary,
            relations,
            metadata: self.metadata.as_ref(),
            entity_namespaces: &self.edges.entity_namespaces,
        };
        let coordinator = BuildCoordinator::new(self.config.workers)?;
        let constructed = coordinator.run(ontology, self.edge_tasks()?, ctx)?;
        let constructed_triples = constructed.graph.len() - ontology_triples;
        clock.finish(BuildStage::ConstructEdges);

        constructed.error_log.write(&paths.subclass_log())?;
        if !constructed.error_log.is_empty() {
            warn!(
                "{}: {} ids could not be mapped ({}), see {}",
                build_type,
                constructed.error_log.miss_count(),
                constructed.error_log.edge_types().collect::<Vec<_>>().join(", "),
                paths.subclass_log().display()
            );
        }
        clock.finish(BuildStage::WriteErrorLog);

        let graph = anonymize_restrictions(constructed.graph);
        clock.finish(BuildStage::NamespaceCleanup);

        let mut outputs = Vec::new();
        let split = split_graph(&graph);
        write_ntriples(&split.logic, &names.logic_only)?;
        write_ntriples(&split.annotations, &names.annotations_only)?;
        write_ntriples(&graph, &names.owl)?;
        write_rdfxml(&graph, &names.main_file)?;
        outputs.extend([
            names.main_file.clone(),
            names.logic_only.clone(),
            names.annotations_only.clone(),
            names.owl.clone(),
        ]);
        outputs.extend(artifact_paths(write_encoded_artifacts(
            &graph,
            &OutputNames::encoding_stem(&names.owl),
        )?));
        info!(
            "{}: {} triples ({} logic, {} annotations)",
            build_type,
            split.total(),
            split.logic.len(),
            split.annotations.len()
        );
        clock.finish(BuildStage::SplitAndWrite);

        let (owlnets_triples, purified_triples) = if self.config.decode_owl.is_enabled() {
            let decoded = self.decoder.decode(&graph, self.config.approach)?;
            outputs.extend(write_with_encoding(&decoded.owlnets, &names.owlnets)?);
            outputs.extend(write_with_encoding(&decoded.purified, &names.owlnets_purified)?);
            info!(
                "{}: OWL-NETS {} triples, purified {} triples",
                build_type,
                decoded.owlnets.len(),
                decoded.purified.len()
            );
            clock.finish(BuildStage::DecodeOwl);
            (Some(decoded.owlnets.len()), Some(decoded.purified.len()))
        } else {
            (None, None)
        };

        Ok(BuildReport {
            build_type: build_type.to_string(),
            merged_ontologies,
            ontology_triples,
            constructed_triples,
            total_triples: graph.len(),
            logic_triples: split.logic.len(),
            annotation_triples: split.annotations.len(),
            owlnets_triples,
            purified_triples,
            error_log: constructed.error_log,
            edge_statistics: constructed.stats,
            outputs,
            stages: clock.timings,
        })
    }
}

fn artifact_paths(artifacts: EncodedArtifacts) -> [PathBuf; 4] {
    [
        artifacts.integers,
        artifacts.identifiers,
        artifacts.identifier_map,
        artifacts.node_labels,
    ]
}

fn write_with_encoding(graph: &KnowledgeGraph, path: &std::path::Path) -> Result<Vec<PathBuf>> {
    write_ntriples(graph, path)?;
    let mut written = vec![path.to_path_buf()];
    written.extend(artifact_paths(write_encoded_artifacts(
        graph,
        &OutputNames::encoding_stem(path),
    )?));
    Ok(written)
}

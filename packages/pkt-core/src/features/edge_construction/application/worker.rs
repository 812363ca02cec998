//! EdgeTypeWorker
//!
//! Builds the graph fragment for the edge types assigned to one worker. All
//! state is private to the worker (fragment, error log, object-property
//! snapshot) and handed back as an owned `WorkerOutput`; no I/O happens here.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

use crate::config::ConstructionApproach;
use crate::errors::Result;
use crate::features::axiom_patterns::build;
use crate::features::edge_construction::domain::{
    DataType, EdgeSpec, EdgeStatistics, ErrorLog, NodeMetadata,
};
use crate::features::ontology::{validate_relation_iri, OntologyVocabulary, RelationDictionaries};
use crate::features::subclass_map::SubclassResolver;
use crate::shared::vocab::{expand, ns, OWL_CLASS, OWL_OBJECT_PROPERTY, RDFS_LABEL, RDFS_SUBCLASS_OF, RDF_TYPE};
use crate::shared::{KnowledgeGraph, Node, Triple};

/// Read-only inputs shared by every worker of a build
#[derive(Debug, Clone, Copy)]
pub struct WorkerContext<'a> {
    pub approach: ConstructionApproach,
    pub resolver: &'a SubclassResolver,
    pub vocabulary: &'a OntologyVocabulary,
    pub relations: &'a RelationDictionaries,
    /// `Some` only when node metadata is enabled
    pub metadata: Option<&'a NodeMetadata>,
    pub entity_namespaces: &'a BTreeMap<String, String>,
}

/// One edge type with its relation (and optional inverse) already expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTask {
    pub spec: EdgeSpec,
    pub relation: String,
    pub inverse: Option<String>,
}

impl EdgeTask {
    /// Relation and the edge type's declared inverse, expanded into OBO.
    pub fn new(spec: EdgeSpec) -> Self {
        let relation = spec.relation_uri();
        let inverse = spec.inverse_relation.as_deref().map(|r| expand(ns::OBO, r));
        Self {
            spec,
            relation,
            inverse,
        }
    }

    pub fn with_inverse(mut self, inverse: Option<String>) -> Self {
        self.inverse = inverse.map(|r| expand(ns::OBO, &r));
        self
    }

    pub fn edge_type(&self) -> &str {
        &self.spec.edge_type
    }
}

/// Everything a worker produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerOutput {
    pub fragment: KnowledgeGraph,
    pub error_log: ErrorLog,
    pub stats: Vec<EdgeStatistics>,
}

pub struct EdgeTypeWorker<'a> {
    ctx: WorkerContext<'a>,
    object_properties: HashSet<String>,
    fragment: KnowledgeGraph,
    error_log: ErrorLog,
    stats: Vec<EdgeStatistics>,
}

impl<'a> EdgeTypeWorker<'a> {
    pub fn new(ctx: WorkerContext<'a>) -> Self {
        Self {
            object_properties: ctx.vocabulary.object_properties.clone(),
            ctx,
            fragment: KnowledgeGraph::new(),
            error_log: ErrorLog::new(),
            stats: Vec::new(),
        }
    }

    /// Process `tasks` in order and return the worker's output.
    pub fn run(ctx: WorkerContext<'a>, tasks: &[EdgeTask]) -> Result<WorkerOutput> {
        let mut worker = Self::new(ctx);
        for task in tasks {
            worker.process(task)?;
        }
        Ok(worker.finish())
    }

    /// Classes of a raw id, recording the id under `edge_type` on a miss.
    pub fn map_node_to_class(&mut self, edge_type: &str, id: &str) -> Option<&'a [String]> {
        let resolver: &'a SubclassResolver = self.ctx.resolver;
        let classes = resolver.resolve(id);
        if classes.is_none() {
            self.error_log.record(edge_type, id);
        }
        classes
    }

    /// True iff every class-typed side is a known ontology class.
    pub fn check_classes(&self, data_type: DataType, subject_uri: &str, object_uri: &str) -> bool {
        let known = |uri: &str| self.ctx.vocabulary.contains_class(uri);
        (!data_type.subject.is_class() || known(subject_uri))
            && (!data_type.object.is_class() || known(object_uri))
    }

    /// Fails on a malformed relation IRI. Unknown well-formed relations are
    /// declared in the fragment; returns `true` when that happened.
    pub fn verify_object_property(&mut self, uri: &str) -> Result<bool> {
        if self.object_properties.contains(uri) {
            return Ok(false);
        }
        validate_relation_iri(uri)?;
        self.object_properties.insert(uri.to_string());
        self.fragment
            .insert(Triple::iris(uri, RDF_TYPE, OWL_OBJECT_PROPERTY));
        debug!("Declared object property {}", uri);
        Ok(true)
    }

    /// Build every pair of one edge type into the fragment.
    pub fn process(&mut self, task: &EdgeTask) -> Result<&EdgeStatistics> {
        let spec = &task.spec;
        let edge_type = spec.edge_type.as_str();

        let relations: Vec<&str> = std::iter::once(task.relation.as_str())
            .chain(task.inverse.as_deref())
            .collect();
        for relation in &relations {
            if !self.object_properties.contains(*relation) {
                validate_relation_iri(relation)?;
            }
        }

        let mut owl_triples: BTreeSet<Triple> = BTreeSet::new();
        let mut annotations: Vec<Triple> = Vec::new();
        let mut skipped = 0usize;
        let mut declared = false;

        for (subject_id, object_id) in &spec.edge_list {
            let subject_uri = spec.subject_uri(subject_id);
            let object_uri = spec.object_uri(object_id);

            let subject_classes = self.side_classes(spec.data_type.subject.is_class(), edge_type, subject_id);
            let object_classes = self.side_classes(spec.data_type.object.is_class(), edge_type, object_id);
            let (Some(subject_classes), Some(object_classes)) = (subject_classes, object_classes) else {
                skipped += 1;
                continue;
            };

            if !self.check_classes(spec.data_type, &subject_uri, &object_uri) {
                debug!(
                    "{}: skipping ({}, {}), class not in ontology",
                    edge_type, subject_uri, object_uri
                );
                skipped += 1;
                continue;
            }

            if !declared {
                for relation in &relations {
                    self.verify_object_property(relation)?;
                }
                declared = true;
            }

            owl_triples.extend(build(
                &subject_uri,
                &object_uri,
                &task.relation,
                task.inverse.as_deref(),
                self.ctx.approach,
            ));
            owl_triples.extend(self.class_membership(&subject_uri, subject_classes));
            owl_triples.extend(self.class_membership(&object_uri, object_classes));

            if let Some(metadata) = self.ctx.metadata {
                annotations.extend(metadata.node_triples(&subject_uri));
                annotations.extend(metadata.node_triples(&object_uri));
            }
        }

        if !owl_triples.is_empty() {
            if let Some(metadata) = self.ctx.metadata {
                for relation in std::iter::once(&task.relation).chain(task.inverse.as_ref()) {
                    let label = metadata
                        .relation_label(relation)
                        .or_else(|| self.ctx.relations.label_of(relation));
                    if let Some(label) = label {
                        annotations.push(Triple::new(Node::iri(relation.as_str()), RDFS_LABEL, Node::literal(label)));
                    }
                }
            }
        }

        let subjects: HashSet<&str> = spec.edge_list.iter().map(|(s, _)| s.as_str()).collect();
        let objects: HashSet<&str> = spec.edge_list.iter().map(|(_, o)| o.as_str()).collect();
        let owl_triples: Vec<Triple> = owl_triples.into_iter().collect();
        let stats = EdgeStatistics::compute(
            edge_type,
            &owl_triples,
            subjects.len(),
            objects.len(),
            spec.edge_list.len(),
            self.ctx.entity_namespaces,
        );
        info!("{}: {}", edge_type, stats);
        if skipped > 0 {
            debug!("{}: {} of {} pairs skipped", edge_type, skipped, spec.edge_list.len());
        }

        self.fragment.extend(owl_triples);
        self.fragment.extend(annotations);
        self.stats.push(stats);
        let last = self.stats.len() - 1;
        Ok(&self.stats[last])
    }

    pub fn finish(self) -> WorkerOutput {
        WorkerOutput {
            fragment: self.fragment,
            error_log: self.error_log,
            stats: self.stats,
        }
    }

    /// `Some(&[])` for class sides, the resolved classes otherwise.
    fn side_classes(&mut self, is_class: bool, edge_type: &str, id: &str) -> Option<&'a [String]> {
        if is_class {
            Some(&[][..])
        } else {
            self.map_node_to_class(edge_type, id)
        }
    }

    /// Ties a resolved entity to its ontology classes. Instance builds also
    /// pun the entity as an `owl:Class`, which the subclass pattern already
    /// asserts on its own.
    fn class_membership(&self, node: &str, classes: &[String]) -> Vec<Triple> {
        let predicate = match self.ctx.approach {
            ConstructionApproach::Subclass => RDFS_SUBCLASS_OF,
            ConstructionApproach::Instance => RDF_TYPE,
        };
        let mut triples: Vec<Triple> = classes
            .iter()
            .flat_map(|class| {
                [
                    Triple::iris(node, predicate, class),
                    Triple::iris(class, RDF_TYPE, OWL_CLASS),
                ]
            })
            .collect();
        if self.ctx.approach == ConstructionApproach::Instance && !classes.is_empty() {
            triples.push(Triple::iris(node, RDF_TYPE, OWL_CLASS));
        }
        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::edge_construction::domain::{EdgeSpecDocument, NodeKind};
    use crate::errors::KgError;
    use std::collections::HashMap;

    const GENE_NS: &str = "https://www.ncbi.nlm.nih.gov/gene/";
    const OBO: &str = "http://purl.obolibrary.org/obo/";
    const RO: &str = "http://purl.obolibrary.org/obo/RO_0003302";

    struct Fixture {
        resolver: SubclassResolver,
        vocabulary: OntologyVocabulary,
        relations: RelationDictionaries,
        namespaces: BTreeMap<String, String>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut entries = HashMap::new();
            entries.insert("3".to_string(), vec!["SO_0001217".to_string()]);
            entries.insert("9".to_string(), vec!["SO_0001217".to_string(), "SO_0000704".to_string()]);
            entries.insert("10".to_string(), vec!["SO_0001217".to_string()]);

            let mut vocabulary = OntologyVocabulary::default();
            for class in ["HP_0000716", "HP_0002511", "SO_0001217", "DOID_3075", "DOID_1080"] {
                vocabulary.classes.insert(format!("{}{}", OBO, class));
            }
            vocabulary.object_properties.insert(RO.to_string());

            Self {
                resolver: SubclassResolver::from_entries(entries).unwrap(),
                vocabulary,
                relations: RelationDictionaries::empty(),
                namespaces: BTreeMap::new(),
            }
        }

        fn ctx(&self, approach: ConstructionApproach) -> WorkerContext<'_> {
            WorkerContext {
                approach,
                resolver: &self.resolver,
                vocabulary: &self.vocabulary,
                relations: &self.relations,
                metadata: None,
                entity_namespaces: &self.namespaces,
            }
        }
    }

    fn task(edge_type: &str, data_type: &str, relation: &str, pairs: &[(&str, &str)]) -> EdgeTask {
        let mut root = serde_json::Map::new();
        root.insert(
            edge_type.to_string(),
            serde_json::json!({
                "data_type": data_type,
                "edge_relation": relation,
                "uri": [GENE_NS, OBO],
                "edge_list": pairs,
            }),
        );
        let doc = EdgeSpecDocument::parse(&serde_json::Value::Object(root).to_string()).unwrap();
        EdgeTask::new(doc.edges[edge_type].clone())
    }

    #[test]
    fn test_resolution_miss_is_recorded_and_skipped() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "entity-class", "RO_0003302", &[("2", "HP_0000716")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]).unwrap();
        assert!(output.fragment.is_empty());
        assert_eq!(output.error_log.get("gene-phenotype"), Some(&["2".to_string()][..]));
        assert_eq!(output.stats[0].owl_edges, 0);
    }

    #[test]
    fn test_entity_class_subclass_edge() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "entity-class", "RO_0003302", &[("3", "HP_0000716")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]).unwrap();
        // 9 pattern + (gene ⊑ SO) + (SO a Class)
        assert_eq!(output.fragment.len(), 11);
        assert!(output.fragment.contains(&Triple::iris(
            &format!("{}3", GENE_NS),
            RDFS_SUBCLASS_OF,
            &format!("{}SO_0001217", OBO)
        )));
        assert!(output.error_log.is_empty());
    }

    #[test]
    fn test_entity_class_instance_edge() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "instance-class", "RO_0003302", &[("3", "HP_0000716")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Instance), &[task]).unwrap();
        // 6 pattern + typing + class declaration + entity pun
        assert_eq!(output.fragment.len(), 9);
        let gene = format!("{}3", GENE_NS);
        assert!(output.fragment.contains(&Triple::iris(&gene, RDF_TYPE, &format!("{}SO_0001217", OBO))));
        assert!(output.fragment.contains(&Triple::iris(&gene, RDF_TYPE, OWL_CLASS)));
        assert!(!output.fragment.contains(&Triple::iris(
            &format!("{}HP_0000716", OBO),
            RDF_TYPE,
            OWL_CLASS
        )));
    }

    #[test]
    fn test_entity_class_instance_edge_with_inverse() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "instance-class", "RO_0003302", &[("3", "HP_0000716")])
            .with_inverse(Some("RO_0003302".to_string()));

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Instance), &[task]).unwrap();
        // 11 listed, the self-inverse declaration collapses
        assert_eq!(output.fragment.len(), 10);
        assert!(output.fragment.contains(&Triple::iris(
            &format!("{}HP_0000716", OBO),
            RO,
            &format!("{}3", GENE_NS)
        )));
    }

    #[test]
    fn test_entity_entity_instance_edge() {
        let fixture = Fixture::new();
        let task = task("gene-gene", "instance-instance", "RO_0003302", &[("3", "10")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Instance), &[task]).unwrap();
        // 12 listed, both genes share one class declaration
        assert_eq!(output.fragment.len(), 11);
    }

    #[test]
    fn test_entity_entity_instance_edge_with_inverse() {
        let fixture = Fixture::new();
        let task = task("gene-gene", "instance-instance", "RO_0003302", &[("3", "10")])
            .with_inverse(Some("RO_0003302".to_string()));

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Instance), &[task]).unwrap();
        assert_eq!(output.fragment.len(), 12);
    }

    #[test]
    fn test_instance_edge_with_two_classes() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "instance-class", "RO_0003302", &[("9", "HP_0000716")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Instance), &[task]).unwrap();
        // 6 pattern + 2 classes × (typing + declaration) + one pun
        assert_eq!(output.fragment.len(), 11);
        assert!(output.fragment.contains(&Triple::iris(
            &format!("{}9", GENE_NS),
            RDF_TYPE,
            &format!("{}SO_0000704", OBO)
        )));
    }

    #[test]
    fn test_skipped_edge_type_declares_nothing() {
        let fixture = Fixture::new();
        let task = task("gene-phenotype", "entity-class", "RO_0002435", &[("2", "HP_0000716")]);

        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]).unwrap();
        assert!(output.fragment.is_empty());
        assert_eq!(output.stats[0].owl_edges, 0);
    }

    #[test]
    fn test_malformed_relation_fails_even_when_every_pair_skips() {
        let fixture = Fixture::new();
        let mut task = task("gene-phenotype", "entity-class", "RO_0003302", &[("2", "HP_0000716")]);
        task.relation = "not a relation".to_string();
        assert!(matches!(
            EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]),
            Err(KgError::Validation(_))
        ));
    }

    #[test]
    fn test_check_classes_all_typings() {
        let fixture = Fixture::new();
        let worker = EdgeTypeWorker::new(fixture.ctx(ConstructionApproach::Subclass));
        let known = format!("{}DOID_3075", OBO);
        let unknown = format!("{}DOID_0000", OBO);
        let entity = format!("{}3", GENE_NS);
        let c = NodeKind::Class;
        let e = NodeKind::Entity;

        assert!(worker.check_classes(DataType::new(c, c), &known, &known));
        assert!(!worker.check_classes(DataType::new(c, c), &known, &unknown));
        assert!(!worker.check_classes(DataType::new(c, c), &unknown, &known));

        assert!(worker.check_classes(DataType::new(c, e), &known, &entity));
        assert!(!worker.check_classes(DataType::new(c, e), &unknown, &entity));

        assert!(worker.check_classes(DataType::new(e, c), &entity, &known));
        assert!(!worker.check_classes(DataType::new(e, c), &entity, &unknown));

        assert!(worker.check_classes(DataType::new(e, e), &entity, &entity));
    }

    #[test]
    fn test_unknown_class_soft_fails_pair() {
        let fixture = Fixture::new();
        let task = task(
            "disease-disease",
            "class-class",
            "RO_0003302",
            &[("DOID_3075", "DOID_1080"), ("DOID_3075", "DOID_0000")],
        );
        let output = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]).unwrap();
        assert_eq!(output.fragment.len(), 9);
        assert!(output.error_log.is_empty());
    }

    #[test]
    fn test_verify_object_property() {
        let fixture = Fixture::new();
        let mut worker = EdgeTypeWorker::new(fixture.ctx(ConstructionApproach::Subclass));

        assert!(!worker.verify_object_property(RO).unwrap());
        assert!(worker
            .verify_object_property("http://purl.obolibrary.org/obo/RO_0002435")
            .unwrap());
        assert!(!worker
            .verify_object_property("http://purl.obolibrary.org/obo/RO_0002435")
            .unwrap());
        assert!(matches!(
            worker.verify_object_property("RO 0002435"),
            Err(KgError::Validation(_))
        ));
        assert!(matches!(
            worker.verify_object_property("http://purl.obolibrary.org/obo/RO 0002435"),
            Err(KgError::Validation(_))
        ));

        let output = worker.finish();
        assert_eq!(output.fragment.len(), 1);
        // Shared vocabulary is untouched
        assert_eq!(fixture.vocabulary.object_properties.len(), 1);
    }

    #[test]
    fn test_malformed_relation_fails_worker() {
        let fixture = Fixture::new();
        let mut task = task("gene-phenotype", "entity-class", "RO_0003302", &[("3", "HP_0000716")]);
        task.relation = "not a relation".to_string();
        assert!(EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &[task]).is_err());
    }

    #[test]
    fn test_rerun_is_identical() {
        let fixture = Fixture::new();
        let tasks = vec![task(
            "gene-phenotype",
            "entity-class",
            "RO_0003302",
            &[("3", "HP_0000716"), ("9", "HP_0002511"), ("2", "HP_0000716")],
        )
        .with_inverse(Some("RO_0002200".to_string()))];

        let first = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &tasks).unwrap();
        let second = EdgeTypeWorker::run(fixture.ctx(ConstructionApproach::Subclass), &tasks).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            crate::features::serialization::to_ntriples(&first.fragment),
            crate::features::serialization::to_ntriples(&second.fragment)
        );
    }

    #[test]
    fn test_metadata_triples() {
        let fixture = Fixture::new();
        let metadata: NodeMetadata = serde_json::from_value(serde_json::json!({
            "nodes": {
                "https://www.ncbi.nlm.nih.gov/gene/3": {"label": "A2MP1", "synonyms": ["A2MP"]},
                "http://purl.obolibrary.org/obo/HP_0000716": {"label": "Depression", "description": "A mood disorder"}
            },
            "relations": {
                "http://purl.obolibrary.org/obo/RO_0003302": {"label": "causes or contributes to condition"}
            }
        }))
        .unwrap();
        let mut ctx = fixture.ctx(ConstructionApproach::Subclass);
        ctx.metadata = Some(&metadata);

        let task = task("gene-phenotype", "entity-class", "RO_0003302", &[("3", "HP_0000716")]);
        let output = EdgeTypeWorker::run(ctx, &[task]).unwrap();
        // 11 construction triples + 2 gene + 2 phenotype + 1 relation label
        assert_eq!(output.fragment.len(), 16);
        assert!(output.fragment.contains(&Triple::new(
            Node::iri(RO),
            RDFS_LABEL,
            Node::literal("causes or contributes to condition")
        )));
    }
}

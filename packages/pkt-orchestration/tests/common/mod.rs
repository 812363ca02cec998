//! Shared resource fixture for build pipeline tests
//!
//! Five ontology classes and one object property; two edge types over them.
//! Gene `2` is absent from the subclass map, `DOID_9999` from the ontology.

#![allow(dead_code)]

use pkt_core::config::BuildOptions;
use std::fs;
use std::path::{Path, PathBuf};

pub const ONTOLOGY: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/HP_0000716"/>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/HP_0002511"/>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/SO_0001217"/>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/DOID_3075"/>
  <owl:Class rdf:about="http://purl.obolibrary.org/obo/DOID_1080"/>
  <owl:ObjectProperty rdf:about="http://purl.obolibrary.org/obo/RO_0003302"/>
</rdf:RDF>
"#;

pub const EDGES: &str = r#"{
  "entity_namespaces": {"gene": "https://www.ncbi.nlm.nih.gov/gene/"},
  "gene-phenotype": {
    "data_type": "entity-class",
    "edge_relation": "RO_0003302",
    "uri": ["https://www.ncbi.nlm.nih.gov/gene/", "http://purl.obolibrary.org/obo/"],
    "edge_list": [["2", "HP_0000716"], ["3", "HP_0000716"], ["3", "HP_0002511"]]
  },
  "disease-disease": {
    "data_type": "class-class",
    "edge_relation": "RO_0003302",
    "uri": ["http://purl.obolibrary.org/obo/", "http://purl.obolibrary.org/obo/"],
    "edge_list": [["DOID_3075", "DOID_1080"], ["DOID_3075", "DOID_9999"]]
  }
}"#;

pub const SUBCLASS_MAP: &str = r#"{"3": ["SO_0001217"]}"#;

pub const RELATIONS_LABELS: &str = "\
http://purl.obolibrary.org/obo/RO_0003302\tcauses or contributes to condition
http://purl.obolibrary.org/obo/RO_0003303\tcondition has contributing cause
";

pub const INVERSE_RELATIONS: &str = "RO_0003302\towl:inverseOf\tRO_0003303\n";

pub const NODE_METADATA: &str = r#"{
  "nodes": {
    "https://www.ncbi.nlm.nih.gov/gene/3": {
      "label": "A2MP1",
      "description": "alpha-2-macroglobulin pseudogene 1"
    },
    "http://purl.obolibrary.org/obo/HP_0000716": {"label": "Depressivity"}
  },
  "relations": {
    "http://purl.obolibrary.org/obo/RO_0003302": {"label": "causes or contributes to condition"}
  }
}"#;

/// Ontology triples: five class declarations and one property declaration
pub const ONTOLOGY_TRIPLES: usize = 6;
/// Constructed triples before cleanup, no metadata, no inverse. Every
/// ontology declaration is repeated by some pattern.
pub const MERGED_TRIPLES: usize = 26;
/// Three restrictions, two named-restriction declarations dropped each
pub const CLEANED_TRIPLES: usize = MERGED_TRIPLES - 6;
/// Gene 3 label + definition, HP_0000716 label, RO_0003302 label
pub const METADATA_TRIPLES: usize = 4;

pub fn write(path: PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Seed every resource artifact under `dir`.
pub fn seed_resources(dir: &Path) {
    write(dir.join("ontologies/hp_with_imports.owl"), ONTOLOGY);
    write(dir.join("Master_Edge_List_Dict.json"), EDGES);
    write(dir.join("construction_approach/subclass_construction_map.json"), SUBCLASS_MAP);
    write(dir.join("relations_data/RELATIONS_LABELS.txt"), RELATIONS_LABELS);
    write(dir.join("relations_data/INVERSE_RELATIONS.txt"), INVERSE_RELATIONS);
    write(dir.join("node_data/node_metadata_dict.json"), NODE_METADATA);
}

/// Subclass build, every optional stage off.
pub fn options(resources: &Path, write_location: &Path) -> BuildOptions {
    BuildOptions::new(resources)
        .with_approach("subclass")
        .with_node_data("no")
        .with_inverse_relations("no")
        .with_decode_owl("no")
        .with_cpus(2)
        .with_write_location(write_location)
        .with_kg_version("v3.0.0")
}

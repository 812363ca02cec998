//! IRI constants for the vocabularies the edge patterns are built from.

/// Namespace prefixes.
pub mod ns {
    /// OWL 2 namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OBO Foundry PURL namespace. Class-typed ids always expand into it.
    pub const OBO: &str = "http://purl.obolibrary.org/obo/";
    /// Namespace for nodes minted during construction (restriction nodes).
    pub const PKT: &str = "https://github.com/callahantiff/PheKnowLator/pkt/";
}

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// IAO "definition" annotation, used for node descriptions.
pub const OBO_DEFINITION: &str = "http://purl.obolibrary.org/obo/IAO_0000115";
pub const OBO_HAS_EXACT_SYNONYM: &str =
    "http://www.geneontology.org/formats/oboInOwl#hasExactSynonym";

/// Predicates treated as annotations even when the graph never declares them.
pub const WELL_KNOWN_ANNOTATIONS: &[&str] = &[
    RDFS_LABEL,
    RDFS_COMMENT,
    OBO_DEFINITION,
    OBO_HAS_EXACT_SYNONYM,
    "http://www.w3.org/2000/01/rdf-schema#seeAlso",
    "http://www.w3.org/2002/07/owl#versionInfo",
    "http://www.w3.org/2002/07/owl#deprecated",
    "http://www.geneontology.org/formats/oboInOwl#hasBroadSynonym",
    "http://www.geneontology.org/formats/oboInOwl#hasNarrowSynonym",
    "http://www.geneontology.org/formats/oboInOwl#hasRelatedSynonym",
    "http://www.geneontology.org/formats/oboInOwl#hasDbXref",
    "http://www.geneontology.org/formats/oboInOwl#id",
    "http://purl.org/dc/elements/1.1/description",
    "http://purl.org/dc/terms/description",
    "http://www.w3.org/2004/02/skos/core#definition",
];

/// Expand a raw local id into an IRI under `prefix`.
///
/// Ids that already carry a scheme are returned untouched.
pub fn expand(prefix: &str, id: &str) -> String {
    if is_absolute(id) {
        id.to_string()
    } else {
        format!("{}{}", prefix, id)
    }
}

/// Cheap scheme check, `http:`, `https:` or `urn:` style.
pub fn is_absolute(id: &str) -> bool {
    match id.split_once(':') {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && !rest.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && (rest.starts_with("//") || scheme.eq_ignore_ascii_case("urn"))
        }
        None => false,
    }
}

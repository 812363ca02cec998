// Edge Statistics
//
// Human-readable summary logged per edge type:
// "{owl} OWL Edges, {orig} Original Edges; {nodes} OWL Nodes, Original Nodes: {n1} {a}(s), {n2} {b}(s)"

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::shared::{Node, Triple};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStatistics {
    pub edge_type: String,
    pub owl_edges: usize,
    pub original_edges: usize,
    pub owl_nodes: usize,
    pub subject_nodes: usize,
    pub object_nodes: usize,
    /// OWL node count per configured namespace short name
    pub namespace_nodes: BTreeMap<String, usize>,
}

impl EdgeStatistics {
    /// `owl_triples` are the distinct triples built for the edge type;
    /// `subjects` / `objects` the distinct raw ids of its edge list.
    pub fn compute(
        edge_type: &str,
        owl_triples: &[Triple],
        subjects: usize,
        objects: usize,
        original_edges: usize,
        entity_namespaces: &BTreeMap<String, String>,
    ) -> Self {
        let mut nodes: HashSet<&Node> = HashSet::new();
        for triple in owl_triples {
            nodes.insert(&triple.subject);
            if !triple.object.is_literal() {
                nodes.insert(&triple.object);
            }
        }

        let namespace_nodes = entity_namespaces
            .iter()
            .map(|(name, prefix)| {
                let count = nodes
                    .iter()
                    .filter(|n| n.as_iri().map(|i| i.starts_with(prefix.as_str())).unwrap_or(false))
                    .count();
                (name.clone(), count)
            })
            .collect();

        Self {
            edge_type: edge_type.to_string(),
            owl_edges: owl_triples.len(),
            original_edges,
            owl_nodes: nodes.len(),
            subject_nodes: subjects,
            object_nodes: objects,
            namespace_nodes,
        }
    }

    fn labels(&self) -> (&str, &str) {
        match self.edge_type.split_once('-') {
            Some((a, b)) => (a, b),
            None => (self.edge_type.as_str(), self.edge_type.as_str()),
        }
    }
}

impl fmt::Display for EdgeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.labels();
        write!(
            f,
            "{} OWL Edges, {} Original Edges; {} OWL Nodes, Original Nodes: {} {}(s), {} {}(s)",
            self.owl_edges, self.original_edges, self.owl_nodes, self.subject_nodes, a, self.object_nodes, b
        )?;
        if !self.namespace_nodes.is_empty() {
            let parts: Vec<String> = self
                .namespace_nodes
                .iter()
                .map(|(name, count)| format!("{} {}", count, name))
                .collect();
            write!(f, " (OWL Nodes by namespace: {})", parts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges() -> Vec<Triple> {
        [(1, 2, 3), (3, 2, 5), (4, 6, 7)]
            .iter()
            .map(|(s, p, o)| {
                Triple::iris(
                    &format!("http://a/{}", s),
                    &format!("http://p/{}", p),
                    &format!("http://a/{}", o),
                )
            })
            .collect()
    }

    #[test]
    fn test_statistics_string() {
        let stats = EdgeStatistics::compute("gene-gene", &edges(), 3, 3, 8, &BTreeMap::new());
        assert_eq!(
            stats.to_string(),
            "3 OWL Edges, 8 Original Edges; 5 OWL Nodes, Original Nodes: 3 gene(s), 3 gene(s)"
        );
    }

    #[test]
    fn test_statistics_labels_follow_edge_type() {
        let stats = EdgeStatistics::compute("drug-gene", &edges(), 3, 3, 8, &BTreeMap::new());
        assert_eq!(
            stats.to_string(),
            "3 OWL Edges, 8 Original Edges; 5 OWL Nodes, Original Nodes: 3 drug(s), 3 gene(s)"
        );
    }

    #[test]
    fn test_namespace_breakdown() {
        let mut namespaces = BTreeMap::new();
        namespaces.insert("a".to_string(), "http://a/".to_string());
        namespaces.insert("b".to_string(), "http://b/".to_string());

        let stats = EdgeStatistics::compute("gene-gene", &edges(), 3, 3, 8, &namespaces);
        assert_eq!(stats.namespace_nodes["a"], 5);
        assert_eq!(stats.namespace_nodes["b"], 0);
        assert!(stats.to_string().ends_with("(OWL Nodes by namespace: 5 a, 0 b)"));
    }
}

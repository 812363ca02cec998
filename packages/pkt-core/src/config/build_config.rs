//! Build configuration
//!
//! `BuildOptions` is the raw, user-facing input (JSON file or CLI flags).
//! `BuildConfig::from_options` validates it once and produces the immutable
//! configuration every later stage reads.

use super::error::{ConfigError, ConfigResult};
use super::resources::{require_non_empty_dir, require_non_empty_file, ResourcePaths};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

// ============================================================================
// Two-valued flags
// ============================================================================

/// Closed yes/no option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Yes,
    No,
}

impl Toggle {
    pub fn is_enabled(self) -> bool {
        self == Toggle::Yes
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Yes => "yes",
            Toggle::No => "no",
        }
    }

    /// Parse a flag value, case-insensitive.
    pub fn parse(flag: &str, value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Toggle::Yes),
            "no" => Ok(Toggle::No),
            _ => Err(ConfigError::InvalidFlagValue {
                flag: flag.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Parse a flag from an untyped JSON value. Only strings are accepted.
    pub fn from_value(flag: &str, value: &Value) -> ConfigResult<Self> {
        match value {
            Value::String(s) => Self::parse(flag, s),
            other => Err(ConfigError::InvalidFlagType {
                flag: flag.to_string(),
                found: json_type_name(other).to_string(),
            }),
        }
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Toggle::Yes
        } else {
            Toggle::No
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Construction approach / build variant
// ============================================================================

/// How relations are axiomatized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionApproach {
    /// Entities as classes, relations as existential restrictions
    Subclass,
    /// Entities as individuals, relations as direct assertions
    Instance,
}

impl ConstructionApproach {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructionApproach::Subclass => "subclass",
            ConstructionApproach::Instance => "instance",
        }
    }

    pub fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "subclass" => Ok(ConstructionApproach::Subclass),
            "instance" => Ok(ConstructionApproach::Instance),
            _ => Err(ConfigError::UnsupportedApproach(value.to_string())),
        }
    }
}

impl fmt::Display for ConstructionApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build variant, fixed for the lifetime of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildVariant {
    Full,
    Partial,
    /// Partial build over an ontology whose closure was materialized upstream
    PostClosure,
}

impl BuildVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Full => "full",
            BuildVariant::Partial => "partial",
            BuildVariant::PostClosure => "post-closure",
        }
    }

    /// Human-readable build type
    pub fn build_type(&self) -> &'static str {
        match self {
            BuildVariant::Full => "Full Build",
            BuildVariant::Partial => "Partial Build",
            BuildVariant::PostClosure => "Post-Closure Build",
        }
    }

    pub fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(BuildVariant::Full),
            "partial" => Ok(BuildVariant::Partial),
            "post-closure" | "post_closure" | "postclosure" => Ok(BuildVariant::PostClosure),
            _ => Err(ConfigError::UnknownVariant(value.to_string())),
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Raw options
// ============================================================================

fn default_flag() -> Value {
    Value::String("no".to_string())
}

fn default_approach() -> String {
    "subclass".to_string()
}

/// 75% of logical cores, never less than one
pub fn default_workers() -> usize {
    (num_cpus::get() * 3 / 4).max(1)
}

/// Unvalidated build options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    #[serde(default = "default_approach")]
    pub construction_approach: String,
    #[serde(default = "default_flag")]
    pub node_data: Value,
    #[serde(default = "default_flag")]
    pub inverse_relations: Value,
    #[serde(default = "default_flag")]
    pub decode_owl: Value,
    #[serde(default)]
    pub cpus: Option<usize>,
    pub resources: PathBuf,
    #[serde(default)]
    pub write_location: Option<PathBuf>,
    #[serde(default)]
    pub kg_version: Option<String>,
}

impl BuildOptions {
    pub fn new(resources: impl Into<PathBuf>) -> Self {
        Self {
            construction_approach: default_approach(),
            node_data: default_flag(),
            inverse_relations: default_flag(),
            decode_owl: default_flag(),
            cpus: None,
            resources: resources.into(),
            write_location: None,
            kg_version: None,
        }
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_approach(mut self, approach: impl Into<String>) -> Self {
        self.construction_approach = approach.into();
        self
    }

    pub fn with_node_data(mut self, value: impl Into<Value>) -> Self {
        self.node_data = value.into();
        self
    }

    pub fn with_inverse_relations(mut self, value: impl Into<Value>) -> Self {
        self.inverse_relations = value.into();
        self
    }

    pub fn with_decode_owl(mut self, value: impl Into<Value>) -> Self {
        self.decode_owl = value.into();
        self
    }

    pub fn with_cpus(mut self, cpus: usize) -> Self {
        self.cpus = Some(cpus);
        self
    }

    pub fn with_write_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_location = Some(path.into());
        self
    }

    pub fn with_kg_version(mut self, version: impl Into<String>) -> Self {
        self.kg_version = Some(version.into());
        self
    }
}

// ============================================================================
// Validated configuration
// ============================================================================

/// Immutable, validated build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub variant: BuildVariant,
    pub approach: ConstructionApproach,
    pub node_data: Toggle,
    pub inverse_relations: Toggle,
    pub decode_owl: Toggle,
    pub workers: usize,
    pub paths: ResourcePaths,
    pub kg_version: String,
}

impl BuildConfig {
    /// Validate raw options for `variant`.
    ///
    /// Checks run in a fixed order and stop at the first failure: ontology
    /// directory, edge specification, subclass map, construction approach,
    /// flags, worker count, then the artifacts the enabled stages need.
    pub fn from_options(variant: BuildVariant, options: &BuildOptions) -> ConfigResult<Self> {
        let write_location = options
            .write_location
            .clone()
            .unwrap_or_else(|| options.resources.join("knowledge_graphs"));
        let paths = ResourcePaths::new(options.resources.clone(), write_location);

        require_non_empty_dir(&paths.ontologies())?;
        require_non_empty_file("edge specification", &paths.edge_spec())?;
        require_non_empty_file("subclass map", &paths.subclass_map())?;

        let approach = ConstructionApproach::parse(&options.construction_approach)?;
        let node_data = Toggle::from_value("node_data", &options.node_data)?;
        let requested_inverse = Toggle::from_value("inverse_relations", &options.inverse_relations)?;
        let requested_decode = Toggle::from_value("decode_owl", &options.decode_owl)?;

        let workers = options.cpus.unwrap_or_else(default_workers);
        if workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(workers));
        }

        let (inverse_relations, decode_owl) =
            gate_flags(variant, approach, requested_inverse, requested_decode);

        if inverse_relations.is_enabled() || node_data.is_enabled() {
            require_non_empty_file("relation labels", &paths.relations_labels())?;
        }
        if inverse_relations.is_enabled() {
            require_non_empty_file("inverse relations", &paths.inverse_relations())?;
        }
        if node_data.is_enabled() {
            require_non_empty_file("node metadata", &paths.node_metadata())?;
        }

        Ok(Self {
            variant,
            approach,
            node_data,
            inverse_relations,
            decode_owl,
            workers,
            paths,
            kg_version: options
                .kg_version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        })
    }
}

/// Stage gating for instance construction.
///
/// Instance construction never builds inverse relations. Partial and
/// post-closure instance builds also never decode.
fn gate_flags(
    variant: BuildVariant,
    approach: ConstructionApproach,
    inverse: Toggle,
    decode: Toggle,
) -> (Toggle, Toggle) {
    if approach != ConstructionApproach::Instance {
        return (inverse, decode);
    }
    if inverse.is_enabled() {
        warn!("{}: inverse relations are disabled for instance construction", variant.build_type());
    }
    let decode = match variant {
        BuildVariant::Full => decode,
        BuildVariant::Partial | BuildVariant::PostClosure => {
            if decode.is_enabled() {
                warn!("{}: OWL decoding is disabled for instance construction", variant.build_type());
            }
            Toggle::No
        }
    };
    (Toggle::No, decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn seeded_resources(dir: &Path) {
        fs::create_dir_all(dir.join("ontologies")).unwrap();
        fs::write(dir.join("ontologies/so_with_imports.owl"), "<rdf/>").unwrap();
        fs::write(dir.join("Master_Edge_List_Dict.json"), "{}").unwrap();
        fs::create_dir_all(dir.join("construction_approach")).unwrap();
        fs::write(
            dir.join("construction_approach/subclass_construction_map.json"),
            "{}",
        )
        .unwrap();
        fs::create_dir_all(dir.join("relations_data")).unwrap();
        fs::write(dir.join("relations_data/RELATIONS_LABELS.txt"), "x").unwrap();
        fs::write(dir.join("relations_data/INVERSE_RELATIONS.txt"), "x").unwrap();
    }

    #[test]
    fn test_toggle_parse() {
        assert_eq!(Toggle::parse("node_data", "YES").unwrap(), Toggle::Yes);
        assert_eq!(Toggle::parse("node_data", "no").unwrap(), Toggle::No);
        assert!(matches!(
            Toggle::parse("node_data", "true"),
            Err(ConfigError::InvalidFlagValue { .. })
        ));
    }

    #[test]
    fn test_toggle_from_value_rejects_other_types() {
        for value in [json!(true), json!(1), json!(null), json!(["yes"])] {
            assert!(matches!(
                Toggle::from_value("decode_owl", &value),
                Err(ConfigError::InvalidFlagType { .. })
            ));
        }
        assert_eq!(Toggle::from_value("decode_owl", &json!("yes")).unwrap(), Toggle::Yes);
    }

    #[test]
    fn test_variant_labels() {
        assert_eq!(BuildVariant::Full.build_type(), "Full Build");
        assert_eq!(BuildVariant::Partial.build_type(), "Partial Build");
        assert_eq!(BuildVariant::PostClosure.build_type(), "Post-Closure Build");
        assert_eq!(BuildVariant::parse("post-closure").unwrap(), BuildVariant::PostClosure);
        assert!(BuildVariant::parse("nightly").is_err());
    }

    #[test]
    fn test_config_from_options() {
        let dir = tempfile::tempdir().unwrap();
        seeded_resources(dir.path());

        let options = BuildOptions::new(dir.path())
            .with_inverse_relations("yes")
            .with_decode_owl("yes")
            .with_cpus(2)
            .with_kg_version("2.1.0");
        let config = BuildConfig::from_options(BuildVariant::Full, &options).unwrap();

        assert_eq!(config.approach, ConstructionApproach::Subclass);
        assert_eq!(config.inverse_relations, Toggle::Yes);
        assert_eq!(config.decode_owl, Toggle::Yes);
        assert_eq!(config.node_data, Toggle::No);
        assert_eq!(config.workers, 2);
        assert_eq!(config.kg_version, "2.1.0");
        assert_eq!(
            config.paths.write_location,
            dir.path().join("knowledge_graphs")
        );
    }

    #[test]
    fn test_partial_instance_forces_flags_off() {
        let dir = tempfile::tempdir().unwrap();
        seeded_resources(dir.path());

        let options = BuildOptions::new(dir.path())
            .with_approach("instance")
            .with_inverse_relations("yes")
            .with_decode_owl("yes");

        for variant in [BuildVariant::Partial, BuildVariant::PostClosure] {
            let config = BuildConfig::from_options(variant, &options).unwrap();
            assert_eq!(config.inverse_relations, Toggle::No);
            assert_eq!(config.decode_owl, Toggle::No);
        }

        let full = BuildConfig::from_options(BuildVariant::Full, &options).unwrap();
        assert_eq!(full.inverse_relations, Toggle::No);
        assert_eq!(full.decode_owl, Toggle::Yes);
    }

    #[test]
    fn test_validation_errors_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions::new(dir.path());
        assert!(matches!(
            BuildConfig::from_options(BuildVariant::Full, &options),
            Err(ConfigError::MissingDirectory { .. })
        ));

        seeded_resources(dir.path());
        let bad_approach = BuildOptions::new(dir.path()).with_approach("hybrid");
        assert!(matches!(
            BuildConfig::from_options(BuildVariant::Full, &bad_approach),
            Err(ConfigError::UnsupportedApproach(_))
        ));

        let bad_flag = BuildOptions::new(dir.path()).with_node_data(json!(1));
        assert!(matches!(
            BuildConfig::from_options(BuildVariant::Full, &bad_flag),
            Err(ConfigError::InvalidFlagType { .. })
        ));

        let no_workers = BuildOptions::new(dir.path()).with_cpus(0);
        assert!(matches!(
            BuildConfig::from_options(BuildVariant::Full, &no_workers),
            Err(ConfigError::InvalidWorkerCount(0))
        ));

        let no_metadata = BuildOptions::new(dir.path()).with_node_data("yes");
        assert!(matches!(
            BuildConfig::from_options(BuildVariant::Full, &no_metadata),
            Err(ConfigError::MissingArtifact { .. })
        ));
    }

    #[test]
    fn test_relation_artifacts_required_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        seeded_resources(dir.path());
        fs::remove_file(dir.path().join("relations_data/INVERSE_RELATIONS.txt")).unwrap();

        let options = BuildOptions::new(dir.path()).with_inverse_relations("yes");
        let err = BuildConfig::from_options(BuildVariant::Full, &options).unwrap_err();
        assert!(err.to_string().contains("inverse relations"));

        let disabled = BuildOptions::new(dir.path());
        assert!(BuildConfig::from_options(BuildVariant::Full, &disabled).is_ok());
    }

    #[test]
    fn test_relation_labels_required_for_node_data() {
        let dir = tempfile::tempdir().unwrap();
        seeded_resources(dir.path());
        fs::create_dir_all(dir.path().join("node_data")).unwrap();
        fs::write(dir.path().join("node_data/node_metadata_dict.json"), "{}").unwrap();
        fs::remove_file(dir.path().join("relations_data/INVERSE_RELATIONS.txt")).unwrap();

        let instance = BuildOptions::new(dir.path())
            .with_approach("instance")
            .with_node_data("yes");
        assert!(BuildConfig::from_options(BuildVariant::Partial, &instance).is_ok());

        fs::remove_file(dir.path().join("relations_data/RELATIONS_LABELS.txt")).unwrap();
        let err = BuildConfig::from_options(BuildVariant::Partial, &instance).unwrap_err();
        assert!(err.to_string().contains("relation labels"));
    }

    #[test]
    fn test_options_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        fs::write(
            &path,
            r#"{"construction_approach": "instance", "node_data": "yes", "resources": "./resources"}"#,
        )
        .unwrap();

        let options = BuildOptions::from_json_file(&path).unwrap();
        assert_eq!(options.construction_approach, "instance");
        assert_eq!(options.node_data, json!("yes"));
        assert_eq!(options.decode_owl, json!("no"));
        assert_eq!(options.cpus, None);
    }
}

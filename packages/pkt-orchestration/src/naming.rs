//! Output naming
//!
//! Every artifact name is a pure function of the build variant and flags:
//!
//! ```text
//! PheKnowLator_v{version}_{variant}_{approach}_{inverseRelations|relationsOnly}_{noOWL|OWL}.owl
//! ```
//!
//! `noOWL` marks builds that also emit decoded (OWL-NETS) graphs. The stem is
//! the file name with its last `_` segment removed.

use serde::Serialize;
use std::path::{Path, PathBuf};

use pkt_core::config::{BuildConfig, BuildVariant, ConstructionApproach, Toggle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputNames {
    pub main_file: PathBuf,
    pub logic_only: PathBuf,
    pub annotations_only: PathBuf,
    pub owl: PathBuf,
    pub owlnets: PathBuf,
    pub owlnets_purified: PathBuf,
    stem: PathBuf,
}

impl OutputNames {
    pub fn new(
        write_location: &Path,
        version: &str,
        variant: BuildVariant,
        approach: ConstructionApproach,
        inverse_relations: Toggle,
        decode_owl: Toggle,
    ) -> Self {
        let version = version.trim_start_matches('v');
        let relations = if inverse_relations.is_enabled() {
            "inverseRelations"
        } else {
            "relationsOnly"
        };
        let owl = if decode_owl.is_enabled() { "noOWL" } else { "OWL" };
        let file_name = format!(
            "PheKnowLator_v{}_{}_{}_{}_{}.owl",
            version,
            variant.as_str(),
            approach.as_str(),
            relations,
            owl
        );

        let stem_name = match file_name.rsplit_once('_') {
            Some((stem, _)) => stem.to_string(),
            None => file_name.trim_end_matches(".owl").to_string(),
        };
        let stem = write_location.join(&stem_name);
        let derived = |suffix: &str| write_location.join(format!("{}{}", stem_name, suffix));

        Self {
            main_file: write_location.join(&file_name),
            logic_only: derived("_OWL_LogicOnly.nt"),
            annotations_only: derived("_OWL_AnnotationsOnly.nt"),
            owl: derived("_OWL.nt"),
            owlnets: derived("_OWLNETS.nt"),
            owlnets_purified: derived(&format!(
                "_OWLNETS_{}_purified.nt",
                approach.as_str().to_uppercase()
            )),
            stem,
        }
    }

    pub fn for_config(config: &BuildConfig) -> Self {
        Self::new(
            &config.paths.write_location,
            &config.kg_version,
            config.variant,
            config.approach,
            config.inverse_relations,
            config.decode_owl,
        )
    }

    pub fn stem(&self) -> &Path {
        &self.stem
    }

    /// Stem handed to the integer-map writer for an N-Triples output
    /// (`…_OWL.nt` → `…_OWL`).
    pub fn encoding_stem(path: &Path) -> String {
        let text = path.to_string_lossy();
        text.strip_suffix(".nt").unwrap_or(&*text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().to_string()
    }

    #[test]
    fn test_full_subclass_names() {
        let names = OutputNames::new(
            Path::new("/kg"),
            "3.0.0",
            BuildVariant::Full,
            ConstructionApproach::Subclass,
            Toggle::Yes,
            Toggle::Yes,
        );
        assert_eq!(
            names.main_file,
            PathBuf::from("/kg/PheKnowLator_v3.0.0_full_subclass_inverseRelations_noOWL.owl")
        );
        assert_eq!(
            file_name(&names.logic_only),
            "PheKnowLator_v3.0.0_full_subclass_inverseRelations_OWL_LogicOnly.nt"
        );
        assert_eq!(
            file_name(&names.annotations_only),
            "PheKnowLator_v3.0.0_full_subclass_inverseRelations_OWL_AnnotationsOnly.nt"
        );
        assert_eq!(
            file_name(&names.owl),
            "PheKnowLator_v3.0.0_full_subclass_inverseRelations_OWL.nt"
        );
        assert_eq!(
            file_name(&names.owlnets),
            "PheKnowLator_v3.0.0_full_subclass_inverseRelations_OWLNETS.nt"
        );
        assert_eq!(
            file_name(&names.owlnets_purified),
            "PheKnowLator_v3.0.0_full_subclass_inverseRelations_OWLNETS_SUBCLASS_purified.nt"
        );
    }

    #[test]
    fn test_post_closure_instance_names() {
        let names = OutputNames::new(
            Path::new("kg"),
            "v2.1.0",
            BuildVariant::PostClosure,
            ConstructionApproach::Instance,
            Toggle::No,
            Toggle::No,
        );
        assert_eq!(
            file_name(&names.main_file),
            "PheKnowLator_v2.1.0_post-closure_instance_relationsOnly_OWL.owl"
        );
        assert_eq!(
            file_name(names.stem()),
            "PheKnowLator_v2.1.0_post-closure_instance_relationsOnly"
        );
        assert_eq!(
            file_name(&names.owlnets_purified),
            "PheKnowLator_v2.1.0_post-closure_instance_relationsOnly_OWLNETS_INSTANCE_purified.nt"
        );
    }

    #[test]
    fn test_encoding_stem() {
        assert_eq!(
            OutputNames::encoding_stem(Path::new("/kg/PheKnowLator_OWL.nt")),
            "/kg/PheKnowLator_OWL"
        );
    }
}

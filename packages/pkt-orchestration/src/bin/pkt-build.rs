//! `pkt-build`: builds one PheKnowLator knowledge graph.
//!
//! **Usage:**
//! ```text
//! pkt-build --variant full --approach subclass --node-data yes \
//!     --inverse-relations yes --decode-owl yes --resources ./resources
//! pkt-build --variant post-closure --config build.json --cpus 4
//! pkt-build --variant full --stage-from /data/archive --archive-to /data/archive
//! ```
//!
//! Flags given on the command line override the `--config` file. Logging
//! follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pkt_core::config::{BuildOptions, BuildVariant};
use pkt_core::features::ontology::CommandMerger;
use pkt_orchestration::{archive_outputs, stage_resources, BuildReport, BuildStateMachine};
use pkt_storage::LocalDirectoryStorage;

/// Build a PheKnowLator knowledge graph.
#[derive(Parser, Debug)]
#[command(name = "pkt-build", version, about = "Build a PheKnowLator knowledge graph")]
struct Args {
    /// Build variant: full, partial or post-closure.
    #[arg(long, default_value = "full")]
    variant: String,

    /// Construction approach: subclass or instance.
    #[arg(long)]
    approach: Option<String>,

    /// Embed node metadata (yes/no).
    #[arg(long)]
    node_data: Option<String>,

    /// Build inverse relations (yes/no).
    #[arg(long)]
    inverse_relations: Option<String>,

    /// Decode OWL semantics into OWL-NETS graphs (yes/no).
    #[arg(long)]
    decode_owl: Option<String>,

    /// Worker count (default: 75% of logical CPUs).
    #[arg(long)]
    cpus: Option<usize>,

    /// Resource directory.
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Output directory (default: <resources>/knowledge_graphs).
    #[arg(long)]
    write_location: Option<PathBuf>,

    /// Version segment of output file names.
    #[arg(long)]
    kg_version: Option<String>,

    /// JSON file with build options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// External merge program (owltools-compatible) used instead of the
    /// built-in union merge.
    #[arg(long)]
    merge_command: Option<PathBuf>,

    /// Storage directory to stage resources from before the build.
    #[arg(long)]
    stage_from: Option<PathBuf>,

    /// Name prefix of staged resources.
    #[arg(long, default_value = "resources")]
    stage_prefix: String,

    /// Storage directory to archive outputs to after the build.
    #[arg(long)]
    archive_to: Option<PathBuf>,

    /// Name prefix of archived outputs (default: knowledge_graphs/<variant>).
    #[arg(long)]
    archive_prefix: Option<String>,

    /// Where to write the JSON build report (default: next to the outputs).
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn build_options(&self) -> Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => BuildOptions::from_json_file(path)
                .with_context(|| format!("Failed to read build options from {}", path.display()))?,
            None => BuildOptions::new(PathBuf::from("./resources")),
        };
        if let Some(resources) = &self.resources {
            options.resources = resources.clone();
        }
        if let Some(approach) = &self.approach {
            options = options.with_approach(approach.as_str());
        }
        if let Some(value) = &self.node_data {
            options = options.with_node_data(value.as_str());
        }
        if let Some(value) = &self.inverse_relations {
            options = options.with_inverse_relations(value.as_str());
        }
        if let Some(value) = &self.decode_owl {
            options = options.with_decode_owl(value.as_str());
        }
        if let Some(cpus) = self.cpus {
            options = options.with_cpus(cpus);
        }
        if let Some(path) = &self.write_location {
            options = options.with_write_location(path.clone());
        }
        if let Some(version) = &self.kg_version {
            options = options.with_kg_version(version.as_str());
        }
        Ok(options)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn print_summary(report: &BuildReport) {
    println!("{}", report.build_type);
    println!(
        "  {} ontology triples, {} constructed, {} after cleanup ({} logic, {} annotations)",
        report.ontology_triples,
        report.constructed_triples,
        report.total_triples,
        report.logic_triples,
        report.annotation_triples
    );
    if let (Some(owlnets), Some(purified)) = (report.owlnets_triples, report.purified_triples) {
        println!("  OWL-NETS: {} triples, purified: {} triples", owlnets, purified);
    }
    for stats in &report.edge_statistics {
        println!("  {}: {}", stats.edge_type, stats);
    }
    if !report.error_log.is_empty() {
        println!(
            "  {} unmapped ids in {} edge types",
            report.error_log.miss_count(),
            report.error_log.len()
        );
    }
    for output in &report.outputs {
        println!("  Written: {}", output.display());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let variant = BuildVariant::parse(&args.variant)?;
    let options = args.build_options()?;

    if let Some(root) = &args.stage_from {
        let storage = LocalDirectoryStorage::new(root)
            .with_context(|| format!("Failed to open storage at {}", root.display()))?;
        stage_resources(&storage, &args.stage_prefix, &options.resources)
            .context("Failed to stage resources")?;
    }

    let mut machine =
        BuildStateMachine::new(variant, &options).context("Invalid build configuration")?;
    if let Some(program) = &args.merge_command {
        machine = machine.with_merger(CommandMerger::new(program));
    }

    let report = machine
        .construct_graph()
        .with_context(|| format!("{} failed", machine.build_type()))?;
    print_summary(&report);

    let report_path = args.report.clone().unwrap_or_else(|| {
        let stem = machine.output_names().stem().to_string_lossy().to_string();
        PathBuf::from(format!("{}_BuildReport.json", stem))
    });
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize build report")?;
    fs::write(&report_path, json)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    info!("Build report written to {}", report_path.display());

    if let Some(root) = &args.archive_to {
        let storage = LocalDirectoryStorage::new(root)
            .with_context(|| format!("Failed to open storage at {}", root.display()))?;
        let prefix = args
            .archive_prefix
            .clone()
            .unwrap_or_else(|| format!("knowledge_graphs/{}", variant.as_str()));
        let mut outputs = report.outputs.clone();
        outputs.push(report_path);
        archive_outputs(&storage, &outputs, &prefix).context("Failed to archive outputs")?;
    }

    Ok(())
}

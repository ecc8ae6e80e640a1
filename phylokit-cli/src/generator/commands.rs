//! IQ-Tree command lines

use super::layout::JobLayout;
use super::settings::GeneratorSettings;
use crate::input::alignments::base_name;
use crate::jobspec::shell_path;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One per-locus IQ-Tree run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocusJob {
    /// Alignment file name without its extension
    pub base: String,
    /// Alignment file
    pub alignment: PathBuf,
    /// `<loci>/<base>`
    pub output_dir: PathBuf,
    /// Shell command line
    pub command: String,
}

impl LocusJob {
    /// Build the single-threaded run for `alignment`
    pub fn new(settings: &GeneratorSettings, layout: &JobLayout, alignment: &Path) -> Self {
        let base = base_name(alignment);
        let output_dir = layout.loci_dir.join(&base);
        let prefix = output_dir.join(&base);
        let log_file = layout.log_dir.join(format!("{base}-iqtree.log"));

        let command = format!(
            "{tool} -s {input} --prefix {prefix} -B {bootstrap} -T 1 > {log} 2>&1",
            tool = settings.tool_path,
            input = shell_path(alignment),
            prefix = shell_path(&prefix),
            bootstrap = settings.bootstrap,
            log = shell_path(&log_file),
        );

        Self {
            base,
            alignment: alignment.to_path_buf(),
            output_dir,
            command,
        }
    }
}

/// Partitioned analysis over the whole input directory
///
/// Runs with as many threads as the aggregation job has CPUs.
pub fn concat_command(settings: &GeneratorSettings, layout: &JobLayout) -> String {
    format!(
        "{tool} -p {input} --prefix {prefix} -B {bootstrap} -T {threads} > {log} 2>&1",
        tool = settings.tool_path,
        input = shell_path(&settings.input_dir),
        prefix = shell_path(&layout.concat_dir.join(&settings.job_name)),
        bootstrap = settings.bootstrap,
        threads = settings.tasks,
        log = shell_path(&layout.concat_dir.join("concat-terminal.log")),
    )
}

/// Gene and site concordance factors against the concatenated tree
pub fn concord_command(settings: &GeneratorSettings, layout: &JobLayout) -> String {
    let species_tree = layout
        .concat_dir
        .join(format!("{}.treefile", settings.job_name));
    format!(
        "{tool} -t {tree} --gcf {loci} -p {input} --scf 100 --cf-verbose --prefix {prefix} -T 1 > {log} 2>&1",
        tool = settings.tool_path,
        tree = shell_path(&species_tree),
        loci = shell_path(&layout.loci_treefile),
        input = shell_path(&settings.input_dir),
        prefix = shell_path(&layout.concord_dir.join(&settings.job_name)),
        log = shell_path(&layout.concord_dir.join("concord-terminal.log")),
    )
}

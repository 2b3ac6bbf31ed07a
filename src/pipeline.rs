//! End-to-end annotation run
//!
//! VCF file → variant table → bulk annotation → CSV report. The report file
//! is only created once every record is built and both lookups succeeded,
//! and it replaces any earlier report in one rename.

use crate::annotation::{merge_annotations, AnnotationSource, MergeStats};
use crate::core::{write_atomic, CompatMode, Result};
use crate::formats::{build_table_from_file, format_row, write_report, BuildStats};
use std::io::Write;
use std::path::Path;

/// Default report path
pub const DEFAULT_OUTPUT: &str = "vcf_annotated_final.csv";

/// Statistics of one run
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub build: BuildStats,
    pub merge: MergeStats,
}

/// Annotate `input` and write the CSV report to `output`
pub fn annotate_vcf<P, Q, S>(input: P, output: Q, source: &S, mode: CompatMode) -> Result<RunStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AnnotationSource + ?Sized,
{
    annotate_vcf_echo(input, output, source, mode, None)
}

/// Like [`annotate_vcf`], also writing each report row to `echo` once the
/// report is in place
pub fn annotate_vcf_echo<P, Q, S>(
    input: P,
    output: Q,
    source: &S,
    mode: CompatMode,
    echo: Option<&mut dyn Write>,
) -> Result<RunStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AnnotationSource + ?Sized,
{
    let (mut table, build) = build_table_from_file(input.as_ref(), mode)?;
    log::info!(
        "Built {} records from {} sites ({} ids)",
        table.len(),
        build.sites,
        table.ids().len()
    );

    let merge = merge_annotations(&mut table, source)?;

    write_atomic(output.as_ref(), |writer| write_report(&table, writer))?;
    log::info!("Wrote {} rows to {:?}", table.len(), output.as_ref());

    if let Some(echo) = echo {
        for record in table.records() {
            writeln!(echo, "{}", format_row(record))?;
        }
        echo.flush()?;
    }

    Ok(RunStats { build, merge })
}

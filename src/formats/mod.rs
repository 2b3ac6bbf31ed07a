//! File format adapters
//!
//! VCF input and CSV report output.

pub mod report;
pub mod vcf;

pub use report::{format_row, header_line, render_report, write_report, HEADER};
pub use vcf::{
    build_table, build_table_from_file, decompose_site, BuildStats, VariantTableBuilder,
    VcfRecordView,
};

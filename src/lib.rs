//! vcf-annotator - VCF variant annotation
//!
//! Reads a VCF file, splits multi-allelic sites into one record per alternate
//! allele, derives read metrics from the INFO column and adds population
//! frequency and consequence from the ExAC bulk API. The result is a flat CSV
//! report with one row per allele.
//!
//! # Example
//!
//! ```ignore
//! use vcf_annotator::{annotate_vcf, CompatMode, ExacClient};
//!
//! let client = ExacClient::builder().finish()?;
//! let stats = annotate_vcf("sample.vcf", "sample.csv", &client, CompatMode::Improved)?;
//! println!("{} records", stats.build.records);
//! ```

pub mod annotation;
pub mod core;
pub mod formats;
pub mod pipeline;

// Re-export commonly used types
pub use crate::annotation::{
    apply_annotations, merge_annotations, AnnotationSource, ConsequenceResponse, ExacClient,
    FrequencyResponse, MergeStats,
};
pub use crate::core::{
    AnnotatorError, CompatMode, Consequence, Frequency, InfoError, InfoTable, ServiceError,
    VariantRecord, VariantTable, VcfParseError,
};
pub use crate::formats::{build_table, render_report, write_report, BuildStats};
pub use crate::pipeline::{annotate_vcf, annotate_vcf_echo, RunStats, DEFAULT_OUTPUT};

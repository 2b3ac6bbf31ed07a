//! Population annotations from the ExAC bulk API
//!
//! [`AnnotationSource`] is the seam between the pipeline and the service:
//! [`ExacClient`] talks HTTP, tests plug in canned responses.

mod client;
mod merge;
mod response;

pub use client::{
    ExacClient, ExacClientBuilder, CONSEQUENCE_ENDPOINT, DEFAULT_EXAC_API, FREQUENCY_ENDPOINT,
};
pub use merge::{apply_annotations, merge_annotations, MergeStats};
pub use response::{ConsequenceResponse, FrequencyResponse};

use crate::core::ServiceResult;

/// Bulk lookup of variant annotations
///
/// Each method is called once per run with every variant id, in discovery
/// order. Ids use the `chrom-pos-ref-alt` form.
pub trait AnnotationSource {
    /// Allele frequencies keyed by variant id
    fn frequencies(&self, ids: &[String]) -> ServiceResult<FrequencyResponse>;

    /// Ranked consequences keyed by variant id
    fn consequences(&self, ids: &[String]) -> ServiceResult<ConsequenceResponse>;
}

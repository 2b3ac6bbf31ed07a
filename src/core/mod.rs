//! Core variant model
//!
//! This module contains INFO column extraction, the variant record model,
//! error types and the input layer.

mod error;
pub mod info;
pub mod io;
mod record;

pub use error::{
    AnnotatorError, InfoError, InfoResult, Result, ServiceError, ServiceResult, VcfParseError,
};
pub use info::{AlleleContext, AlleleField, CompatMode, InfoTable, SiteField, EMPTY_VALUE};
pub use io::{
    detect_compression, open_vcf, write_atomic, CompressionFormat, LineIterator,
    DEFAULT_BUFFER_SIZE,
};
pub use record::{
    read_fraction, round_to, variant_key, Consequence, Frequency, VariantRecord, VariantTable,
};

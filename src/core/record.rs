//! Variant records and the insertion-ordered table that holds them

use std::collections::HashMap;
use std::fmt;

/// Build a `chrom-pos-ref-alt` variant key, the id format of the ExAC bulk API
///
/// `pos` is the POS column text as written; it is not renormalized.
pub fn variant_key(chrom: &str, pos: &str, ref_allele: &str, alt_allele: &str) -> String {
    format!("{}-{}-{}-{}", chrom, pos, ref_allele, alt_allele)
}

/// Round to a fixed number of decimal places
///
/// Rounds the exact binary value, ties to even: `0.0625` becomes `0.062` and
/// `1.0005` (stored just below the tie) becomes `1.0`. Fixed-precision
/// formatting does exact digit generation, so the decimal text is parsed back.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Fraction of `depth` made up by `reads`, rounded to 3 decimals
///
/// Returns 0.0 for a depth of zero or below (the `-1` empty-value sentinel).
#[inline]
pub fn read_fraction(reads: f64, depth: i64) -> f64 {
    if depth <= 0 {
        return 0.0;
    }
    round_to(reads / depth as f64, 3)
}

/// Allele frequency as reported by the annotation service
///
/// Integral JSON numbers keep their integer form (`1`, not `1.0`) in the
/// report; decimals are rounded to 3 places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
    Integer(i64),
    Decimal(f64),
}

impl Frequency {
    pub fn rounded(self, decimals: usize) -> Self {
        match self {
            Frequency::Integer(n) => Frequency::Integer(n),
            Frequency::Decimal(x) => Frequency::Decimal(round_to(x, decimals)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Integer(n) => write!(f, "{}", n),
            Frequency::Decimal(x) => write!(f, "{:?}", x),
        }
    }
}

/// Functional consequence reported by the annotation service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Consequence {
    /// Highest-ranked consequence label
    Known(String),
    /// The service has the variant but reports no consequence
    Unknown,
    /// The variant or its consequence key is absent from the response
    #[default]
    Missing,
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consequence::Known(label) => f.write_str(label),
            Consequence::Unknown => f.write_str("Unknown"),
            Consequence::Missing => f.write_str("NA"),
        }
    }
}

/// One alternate allele of a VCF site with read metrics and annotations
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    /// `chrom-pos-ref-alt`
    pub key: String,
    pub variant_type: String,
    /// Total depth at the site, shared by every allele of the site
    pub depth: i64,
    pub variant_reads: f64,
    pub ref_reads: f64,
    pub percent_var: f64,
    pub percent_ref: f64,
    /// Allele frequency called from the reads
    pub internal_freq: f64,
    /// Allele frequency from the annotation service, `None` renders as `NA`
    pub external_freq: Option<Frequency>,
    pub consequence: Consequence,
}

/// Records in first-insertion order plus every discovered id
///
/// A key seen twice keeps its original row position and takes the later
/// values. The id list keeps both occurrences.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    records: Vec<VariantRecord>,
    index: HashMap<String, usize>,
    ids: Vec<String>,
}

impl VariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, returning true if it replaced an existing key
    pub fn insert(&mut self, record: VariantRecord) -> bool {
        self.ids.push(record.key.clone());
        match self.index.get(&record.key) {
            Some(&slot) => {
                self.records[slot] = record;
                true
            }
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    /// Variant ids in discovery order, duplicates included
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Records in output order
    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn get(&self, key: &str) -> Option<&VariantRecord> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut VariantRecord> {
        match self.index.get(key) {
            Some(&slot) => Some(&mut self.records[slot]),
            None => None,
        }
    }

    /// Number of distinct records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

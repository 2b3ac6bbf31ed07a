//! VCF variant record builder
//!
//! Parses VCF data lines, splits multi-allelic sites into one record per
//! alternate allele and fills each record with read metrics taken from the
//! INFO column.

use crate::core::{
    open_vcf, read_fraction, round_to, variant_key, AlleleContext, AlleleField, AnnotatorError,
    CompatMode, Consequence, InfoTable, LineIterator, SiteField, VariantRecord, VariantTable,
    VcfParseError,
};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// Minimum column count: CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO
const MIN_FIELDS: usize = 8;

/// Zero-copy VCF record view for parsing
/// Only splits CHROM and POS immediately, other fields are kept as byte slices
pub struct VcfRecordView<'a> {
    /// Original line bytes
    line: &'a [u8],
    /// Chromosome name
    pub chrom: &'a str,
    /// Position text as written in the file
    pub pos: &'a str,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> VcfRecordView<'a> {
    /// Parse a VCF line with minimal allocation
    pub fn parse(line: &'a [u8]) -> Result<Self, VcfParseError> {
        if line.is_empty() {
            return Err(VcfParseError::EmptyLine);
        }

        let mut field_bounds = Vec::with_capacity(10);
        let mut start_pos = 0;

        while let Some(tab_pos) = memchr(b'\t', &line[start_pos..]) {
            let end_pos = start_pos + tab_pos;
            field_bounds.push((start_pos, end_pos));
            start_pos = end_pos + 1;
        }
        field_bounds.push((start_pos, line.len()));

        if field_bounds.len() < MIN_FIELDS {
            return Err(VcfParseError::TooFewFields {
                expected: MIN_FIELDS,
                found: field_bounds.len(),
            });
        }

        let chrom = std::str::from_utf8(&line[field_bounds[0].0..field_bounds[0].1])
            .map_err(|_| VcfParseError::InvalidUtf8("CHROM"))?;

        let pos = std::str::from_utf8(&line[field_bounds[1].0..field_bounds[1].1])
            .map_err(|_| VcfParseError::InvalidUtf8("POS"))?;

        Ok(Self {
            line,
            chrom,
            pos,
            field_bounds,
        })
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Get field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .and_then(|(start, end)| std::str::from_utf8(&self.line[*start..*end]).ok())
    }

    /// Get REF field (field 3)
    pub fn ref_allele(&self) -> Option<&'a str> {
        self.field(3)
    }

    /// Get ALT field (field 4)
    pub fn alt_alleles(&self) -> Option<&'a str> {
        self.field(4)
    }

    /// Get INFO field (field 7)
    pub fn info(&self) -> Option<&'a str> {
        self.field(7)
    }
}

/// Counters collected while building the variant table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Header lines skipped
    pub headers: usize,
    /// Blank lines skipped
    pub blank: usize,
    /// Data lines (sites) processed
    pub sites: usize,
    /// Records produced, one per alternate allele
    pub records: usize,
    /// Records that replaced an earlier record with the same key
    pub collisions: usize,
    /// Sites whose depth was zero or missing
    pub zero_depth: usize,
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, VcfParseError> {
    value.trim().parse().map_err(|_| VcfParseError::MalformedNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, VcfParseError> {
    value.trim().parse().map_err(|_| VcfParseError::MalformedNumber {
        field,
        value: value.to_string(),
    })
}

/// Split one VCF site into a record per alternate allele
///
/// Depth and reference reads are read once and shared by every allele; `AO`
/// and `AF` are indexed by the allele's position in the ALT column. Records
/// come back unannotated.
pub fn decompose_site(
    view: &VcfRecordView<'_>,
    mode: CompatMode,
) -> Result<Vec<VariantRecord>, VcfParseError> {
    let ref_allele = view.ref_allele().ok_or(VcfParseError::InvalidUtf8("REF"))?;
    let alt_alleles = view.alt_alleles().ok_or(VcfParseError::InvalidUtf8("ALT"))?;
    let info = InfoTable::parse(view.info().ok_or(VcfParseError::InvalidUtf8("INFO"))?);

    let variant_type = info.site_value(SiteField::VariantType, mode)?;
    let depth = parse_int("DP", info.site_value(SiteField::Depth, mode)?)?;
    let ref_reads = parse_float("RO", info.site_value(SiteField::RefObservations, mode)?)?;

    if depth <= 0 {
        log::warn!(
            "Depth {} at {}:{}, read percentages reported as 0",
            depth,
            view.chrom,
            view.pos
        );
    }
    let percent_ref = read_fraction(ref_reads, depth);

    AlleleContext::iter_alt(alt_alleles)
        .map(|ctx| -> Result<VariantRecord, VcfParseError> {
            let variant_reads =
                parse_float("AO", info.allele_value(AlleleField::AltObservations, &ctx, mode)?)?;
            let internal_freq =
                parse_float("AF", info.allele_value(AlleleField::AlleleFrequency, &ctx, mode)?)?;

            Ok(VariantRecord {
                key: variant_key(view.chrom, view.pos, ref_allele, ctx.allele),
                variant_type: variant_type.to_string(),
                depth,
                variant_reads,
                ref_reads,
                percent_var: read_fraction(variant_reads, depth),
                percent_ref,
                internal_freq: round_to(internal_freq, 3),
                external_freq: None,
                consequence: Consequence::Missing,
            })
        })
        .collect()
}

/// Accumulates records from VCF lines in input order
pub struct VariantTableBuilder {
    mode: CompatMode,
    table: VariantTable,
    stats: BuildStats,
    line_no: usize,
}

impl VariantTableBuilder {
    pub fn new(mode: CompatMode) -> Self {
        Self {
            mode,
            table: VariantTable::new(),
            stats: BuildStats::default(),
            line_no: 0,
        }
    }

    /// Feed the next line of the file
    ///
    /// Header lines (`#`) and blank lines are skipped. Errors carry the
    /// 1-based line number.
    pub fn push_line(&mut self, line: &str) -> Result<(), AnnotatorError> {
        self.line_no += 1;
        let line = line.trim_end();

        if line.is_empty() {
            self.stats.blank += 1;
            return Ok(());
        }
        if line.starts_with('#') {
            self.stats.headers += 1;
            return Ok(());
        }

        let records = VcfRecordView::parse(line.as_bytes())
            .and_then(|view| decompose_site(&view, self.mode))
            .map_err(|source| AnnotatorError::InvalidRecord {
                line: self.line_no,
                source,
            })?;

        self.stats.sites += 1;
        if records.first().map_or(false, |r| r.depth <= 0) {
            self.stats.zero_depth += 1;
        }

        for record in records {
            log::debug!("{}: {} reads of {}", record.key, record.variant_reads, record.depth);
            let key = record.key.clone();
            if self.table.insert(record) {
                log::warn!("Duplicate variant {} at line {} replaces earlier record", key, self.line_no);
                self.stats.collisions += 1;
            }
            self.stats.records += 1;
        }
        Ok(())
    }

    pub fn finish(self) -> (VariantTable, BuildStats) {
        (self.table, self.stats)
    }
}

/// Build the variant table from a reader of VCF text
pub fn build_table<R: BufRead>(
    reader: R,
    mode: CompatMode,
) -> Result<(VariantTable, BuildStats), AnnotatorError> {
    let mut builder = VariantTableBuilder::new(mode);
    let mut lines = LineIterator::new(reader);

    while let Some(line) = lines.next_line() {
        builder.push_line(line?)?;
    }

    Ok(builder.finish())
}

/// Build the variant table from a plain or compressed VCF file
pub fn build_table_from_file<P: AsRef<Path>>(
    path: P,
    mode: CompatMode,
) -> Result<(VariantTable, BuildStats), AnnotatorError> {
    let reader = open_vcf(path)?;
    build_table(reader, mode)
}

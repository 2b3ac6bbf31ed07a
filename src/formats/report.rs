//! CSV report output
//!
//! One header line, then one comma-joined row per record in table order.
//! Fields are numbers and short controlled-vocabulary labels, so no quoting
//! is applied.

use crate::core::{VariantRecord, VariantTable};
use std::io::{self, Write};

/// Report columns in output order
pub const HEADER: [&str; 10] = [
    "Variant (chr-pos-referenceAllele-variantAllele)",
    "VariantType",
    "DepthOfCoverage",
    "VariantReads",
    "ReferenceAlleleReads",
    "PercentageOfReads-Variant",
    "PercentageOfReads-Ref",
    "AlleleFreqVCF",
    "AlleleFreqExac",
    "VariantConsequence",
];

/// Missing external frequency
const NOT_AVAILABLE: &str = "NA";

/// Shortest round-trip form, always with a decimal point (`5.0`, `0.25`)
#[inline]
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Header line without the trailing newline
pub fn header_line() -> String {
    HEADER.join(",")
}

/// Format one record as a CSV row without the trailing newline
pub fn format_row(record: &VariantRecord) -> String {
    let external_freq = match record.external_freq {
        Some(freq) => freq.to_string(),
        None => NOT_AVAILABLE.to_string(),
    };

    let fields = [
        record.key.clone(),
        record.variant_type.clone(),
        record.depth.to_string(),
        format_float(record.variant_reads),
        format_float(record.ref_reads),
        format_float(record.percent_var),
        format_float(record.percent_ref),
        format_float(record.internal_freq),
        external_freq,
        record.consequence.to_string(),
    ];
    fields.join(",")
}

/// Write the header and all rows
pub fn write_report<W: Write>(table: &VariantTable, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", header_line())?;
    for record in table.records() {
        writeln!(writer, "{}", format_row(record))?;
    }
    writer.flush()
}

/// Render the whole report into a string
pub fn render_report(table: &VariantTable) -> String {
    let mut output = header_line();
    output.push('\n');
    for record in table.records() {
        output.push_str(&format_row(record));
        output.push('\n');
    }
    output
}

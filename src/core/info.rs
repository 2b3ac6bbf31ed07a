//! INFO column extraction
//!
//! Pulls subfields out of the semicolon-delimited INFO column of a VCF record.
//! Two lookups are provided:
//!
//! - [`InfoTable::extract`] selects the Nth token *containing* a phrase. This is
//!   the lookup used by [`CompatMode::Strict`], where `RO=` resolves to the
//!   second match (`PRO` comes first in freebayes output).
//! - [`InfoTable::site`] and [`InfoTable::allele`] look up exact keys through a
//!   fixed schema, with per-site and per-allele fields kept as distinct types.

use super::error::{InfoError, InfoResult};

/// Returned in place of a value when an INFO key is present but empty
pub const EMPTY_VALUE: &str = "-1";

/// How INFO subfields are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatMode {
    /// Exact key lookup through [`SiteField`] / [`AlleleField`]
    #[default]
    Improved,
    /// Substring phrase lookup with positional disambiguation
    Strict,
}

/// INFO subfields that hold one value for the whole site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteField {
    /// `TYPE`
    VariantType,
    /// `DP`, total read depth
    Depth,
    /// `RO`, reads supporting the reference allele
    RefObservations,
}

impl SiteField {
    /// Exact INFO key
    pub fn key(&self) -> &'static str {
        match self {
            SiteField::VariantType => "TYPE",
            SiteField::Depth => "DP",
            SiteField::RefObservations => "RO",
        }
    }

    /// Phrase and occurrence used by strict mode
    pub fn phrase(&self) -> (&'static str, usize) {
        match self {
            SiteField::VariantType => ("TYPE=", 0),
            SiteField::Depth => ("DP=", 0),
            // matches PRO first, then RO
            SiteField::RefObservations => ("RO=", 1),
        }
    }
}

/// INFO subfields with one value per alternate allele
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleField {
    /// `AO`, reads supporting the alternate allele
    AltObservations,
    /// `AF`, allele frequency called from the reads
    AlleleFrequency,
}

impl AlleleField {
    /// Exact INFO key
    pub fn key(&self) -> &'static str {
        match self {
            AlleleField::AltObservations => "AO",
            AlleleField::AlleleFrequency => "AF",
        }
    }

    /// Phrase and occurrence used by strict mode
    pub fn phrase(&self) -> (&'static str, usize) {
        match self {
            AlleleField::AltObservations => ("AO=", 0),
            AlleleField::AlleleFrequency => ("AF=", 0),
        }
    }
}

/// One alternate allele of a site and its position in the ALT column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlleleContext<'a> {
    pub index: usize,
    pub allele: &'a str,
}

impl<'a> AlleleContext<'a> {
    /// Enumerate the alleles of a comma-separated ALT column
    pub fn iter_alt(alt: &'a str) -> impl Iterator<Item = AlleleContext<'a>> {
        alt.split(',')
            .enumerate()
            .map(|(index, allele)| AlleleContext { index, allele })
    }
}

/// Ordered INFO tokens of one record
///
/// Kept as a sequence rather than a map: tokens sharing a key prefix are
/// told apart by position in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoTable<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> InfoTable<'a> {
    /// Split an INFO column on `;`
    pub fn parse(info: &'a str) -> Self {
        Self {
            tokens: info.split(';').collect(),
        }
    }

    /// Raw `KEY=value` / flag tokens in column order
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Select the `occurrence`-th token containing `phrase` and return its
    /// value at `allele_index`.
    ///
    /// An empty value yields [`EMPTY_VALUE`] without allele indexing.
    ///
    /// # Examples
    /// ```
    /// use vcf_annotator::core::InfoTable;
    ///
    /// let info = InfoTable::parse("PRO=0.5;RO=12;AO=5,3");
    /// assert_eq!(info.extract("RO=", 0, 1).unwrap(), "12");
    /// assert_eq!(info.extract("AO=", 1, 0).unwrap(), "3");
    /// ```
    pub fn extract(&self, phrase: &str, allele_index: usize, occurrence: usize) -> InfoResult<&'a str> {
        let matches: Vec<&'a str> = self
            .tokens
            .iter()
            .copied()
            .filter(|token| token.contains(phrase))
            .collect();

        let token = matches.get(occurrence).copied().ok_or_else(|| InfoError::FieldNotFound {
            phrase: phrase.to_string(),
            occurrence,
            found: matches.len(),
        })?;

        select_value(phrase, token_value(token), allele_index)
    }

    /// Raw value of the first token whose key is exactly `key`
    ///
    /// Flags (tokens without `=`) have an empty value.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.tokens
            .iter()
            .copied()
            .find(|token| token_key(token) == key)
            .map(token_value)
    }

    /// Value of a site-level field
    pub fn site(&self, field: SiteField) -> InfoResult<&'a str> {
        let key = field.key();
        let value = self.value(key).ok_or_else(|| missing(key))?;
        select_value(key, value, 0)
    }

    /// Value of a per-allele field for the allele in `ctx`
    pub fn allele(&self, field: AlleleField, ctx: &AlleleContext<'_>) -> InfoResult<&'a str> {
        let key = field.key();
        let value = self.value(key).ok_or_else(|| missing(key))?;
        select_value(key, value, ctx.index)
    }

    /// Site-level lookup honoring the compatibility mode
    pub fn site_value(&self, field: SiteField, mode: CompatMode) -> InfoResult<&'a str> {
        match mode {
            CompatMode::Improved => self.site(field),
            CompatMode::Strict => {
                let (phrase, occurrence) = field.phrase();
                self.extract(phrase, 0, occurrence)
            }
        }
    }

    /// Per-allele lookup honoring the compatibility mode
    pub fn allele_value(
        &self,
        field: AlleleField,
        ctx: &AlleleContext<'_>,
        mode: CompatMode,
    ) -> InfoResult<&'a str> {
        match mode {
            CompatMode::Improved => self.allele(field, ctx),
            CompatMode::Strict => {
                let (phrase, occurrence) = field.phrase();
                self.extract(phrase, ctx.index, occurrence)
            }
        }
    }
}

#[inline]
fn token_key(token: &str) -> &str {
    token.split('=').next().unwrap_or(token)
}

#[inline]
fn token_value(token: &str) -> &str {
    token.split('=').nth(1).unwrap_or("")
}

fn missing(key: &str) -> InfoError {
    InfoError::FieldNotFound {
        phrase: key.to_string(),
        occurrence: 0,
        found: 0,
    }
}

fn select_value<'v>(field: &str, value: &'v str, index: usize) -> InfoResult<&'v str> {
    if value.is_empty() {
        return Ok(EMPTY_VALUE);
    }
    value
        .split(',')
        .nth(index)
        .ok_or_else(|| InfoError::AlleleOutOfRange {
            field: field.to_string(),
            index,
            available: value.split(',').count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREEBAYES_INFO: &str = "AB=0;AF=0.5,0.25;AO=7,2;DP=40;DPB=40;PAO=0,0;PRO=0;RO=31;TYPE=snp,del";

    #[test]
    fn test_extract_first_occurrence() {
        let info = InfoTable::parse("TYPE=snp;DP=20;RO=12");
        assert_eq!(info.extract("TYPE=", 0, 0).unwrap(), "snp");
        assert_eq!(info.extract("DP=", 0, 0).unwrap(), "20");
    }

    #[test]
    fn test_extract_second_occurrence_skips_prefix_match() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        assert_eq!(info.extract("RO=", 0, 0).unwrap(), "0");
        assert_eq!(info.extract("RO=", 0, 1).unwrap(), "31");
    }

    #[test]
    fn test_extract_allele_index() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        assert_eq!(info.extract("AO=", 0, 0).unwrap(), "7");
        assert_eq!(info.extract("AO=", 1, 0).unwrap(), "2");
        assert_eq!(info.extract("AF=", 1, 0).unwrap(), "0.25");
    }

    #[test]
    fn test_extract_empty_value_sentinel() {
        let info = InfoTable::parse("TYPE=;DP=10");
        // allele index is not applied to an empty value
        assert_eq!(info.extract("TYPE=", 3, 0).unwrap(), EMPTY_VALUE);
    }

    #[test]
    fn test_extract_missing_occurrence() {
        let info = InfoTable::parse("TYPE=snp;DP=20;RO=12");
        let err = info.extract("RO=", 0, 1).unwrap_err();
        assert_eq!(
            err,
            InfoError::FieldNotFound {
                phrase: "RO=".to_string(),
                occurrence: 1,
                found: 1,
            }
        );
    }

    #[test]
    fn test_extract_allele_out_of_range() {
        let info = InfoTable::parse("AO=5");
        let err = info.extract("AO=", 1, 0).unwrap_err();
        assert_eq!(
            err,
            InfoError::AlleleOutOfRange {
                field: "AO=".to_string(),
                index: 1,
                available: 1,
            }
        );
    }

    #[test]
    fn test_value_exact_key() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        assert_eq!(info.value("RO"), Some("31"));
        assert_eq!(info.value("PRO"), Some("0"));
        assert_eq!(info.value("AO"), Some("7,2"));
        assert_eq!(info.value("O"), None);
    }

    #[test]
    fn test_value_flag() {
        let info = InfoTable::parse("DP=10;DB;AF=0.5");
        assert_eq!(info.value("DB"), Some(""));
    }

    #[test]
    fn test_site_fields() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        assert_eq!(info.site(SiteField::Depth).unwrap(), "40");
        assert_eq!(info.site(SiteField::RefObservations).unwrap(), "31");
        // multi-valued TYPE reads the first entry
        assert_eq!(info.site(SiteField::VariantType).unwrap(), "snp");
    }

    #[test]
    fn test_allele_fields() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        let alleles: Vec<_> = AlleleContext::iter_alt("T,G").collect();
        assert_eq!(info.allele(AlleleField::AltObservations, &alleles[0]).unwrap(), "7");
        assert_eq!(info.allele(AlleleField::AltObservations, &alleles[1]).unwrap(), "2");
        assert_eq!(info.allele(AlleleField::AlleleFrequency, &alleles[1]).unwrap(), "0.25");
    }

    #[test]
    fn test_site_missing_key() {
        let info = InfoTable::parse("TYPE=snp;DP=20");
        assert!(matches!(
            info.site(SiteField::RefObservations),
            Err(InfoError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_modes_agree_on_freebayes_layout() {
        let info = InfoTable::parse(FREEBAYES_INFO);
        for field in [SiteField::Depth, SiteField::RefObservations] {
            assert_eq!(
                info.site_value(field, CompatMode::Improved).unwrap(),
                info.site_value(field, CompatMode::Strict).unwrap()
            );
        }
        for ctx in AlleleContext::iter_alt("T,G") {
            assert_eq!(
                info.allele_value(AlleleField::AltObservations, &ctx, CompatMode::Improved).unwrap(),
                info.allele_value(AlleleField::AltObservations, &ctx, CompatMode::Strict).unwrap()
            );
        }
    }

    #[test]
    fn test_iter_alt_no_call() {
        let alleles: Vec<_> = AlleleContext::iter_alt(".").collect();
        assert_eq!(alleles, vec![AlleleContext { index: 0, allele: "." }]);
    }
}

//! Property-based tests for INFO column extraction

use proptest::prelude::*;
use vcf_annotator::core::{
    AlleleContext, AlleleField, CompatMode, InfoError, InfoTable, SiteField, EMPTY_VALUE,
};

/// Comma-separated numeric values
fn arb_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0u32..10000).prop_map(|n| n.to_string()), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every in-range allele index returns the matching list entry in both lookups
    #[test]
    fn prop_allele_index_selects_value(values in arb_values()) {
        let info_str = format!("DP=10;AO={};PAO=0", values.join(","));
        let info = InfoTable::parse(&info_str);

        for (i, expected) in values.iter().enumerate() {
            prop_assert_eq!(info.extract("AO=", i, 0).unwrap(), expected.as_str());
            let ctx = AlleleContext { index: i, allele: "A" };
            prop_assert_eq!(
                info.allele_value(AlleleField::AltObservations, &ctx, CompatMode::Improved).unwrap(),
                expected.as_str()
            );
        }
    }

    /// One index past the end is reported, not defaulted
    #[test]
    fn prop_allele_index_past_end(values in arb_values()) {
        let info_str = format!("AF={}", values.join(","));
        let info = InfoTable::parse(&info_str);
        let ctx = AlleleContext { index: values.len(), allele: "A" };

        let err = info.allele(AlleleField::AlleleFrequency, &ctx).unwrap_err();
        prop_assert_eq!(
            err,
            InfoError::AlleleOutOfRange {
                field: "AF".to_string(),
                index: values.len(),
                available: values.len(),
            }
        );
    }

    /// Token order decides which prefix match strict mode reads
    #[test]
    fn prop_second_match_is_exact_key(pro in 0u32..100, ro in 0u32..100) {
        let info_str = format!("DP=200;PRO={};RO={};TYPE=snp", pro, ro);
        let info = InfoTable::parse(&info_str);
        let ro_text = ro.to_string();

        prop_assert_eq!(
            info.site_value(SiteField::RefObservations, CompatMode::Strict).unwrap(),
            ro_text.as_str()
        );
        prop_assert_eq!(info.site(SiteField::RefObservations).unwrap(), ro_text.as_str());
    }

    /// Empty values short-circuit to the sentinel whatever the allele index
    #[test]
    fn prop_empty_value_sentinel(index in 0usize..10) {
        let info = InfoTable::parse("TYPE=;AO=;DP=5");
        let ctx = AlleleContext { index, allele: "G" };

        prop_assert_eq!(info.extract("AO=", index, 0).unwrap(), EMPTY_VALUE);
        prop_assert_eq!(info.allele(AlleleField::AltObservations, &ctx).unwrap(), EMPTY_VALUE);
    }
}

/// Tokens are kept in column order
#[test]
fn test_tokens_preserve_order() {
    let info = InfoTable::parse("TYPE=snp;DB;DP=20;RO=12");
    assert_eq!(info.tokens(), &["TYPE=snp", "DB", "DP=20", "RO=12"]);
}

/// Strict mode fails when only one token contains "RO="
#[test]
fn test_strict_single_ro_token() {
    let info = InfoTable::parse("TYPE=snp;DP=20;RO=12;AO=5,3;AF=0.25,0.15");
    assert_eq!(
        info.site_value(SiteField::RefObservations, CompatMode::Strict),
        Err(InfoError::FieldNotFound {
            phrase: "RO=".to_string(),
            occurrence: 1,
            found: 1,
        })
    );
    assert_eq!(info.site_value(SiteField::RefObservations, CompatMode::Improved), Ok("12"));
}

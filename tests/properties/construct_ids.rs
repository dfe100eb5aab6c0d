//! Property tests for construct id validation.

use proptest::prelude::*;

use terrastack::ConstructId;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation never panics on arbitrary input.
    #[test]
    fn property_validation_never_panics(s in "(?s).{0,64}") {
        let _ = ConstructId::new(s);
    }

    /// PROPERTY: identifiers matching the documented grammar are accepted verbatim.
    #[test]
    fn property_valid_ids_round_trip(s in "[A-Za-z_][A-Za-z0-9_-]{0,31}") {
        let id = ConstructId::new(s.clone()).unwrap();
        prop_assert_eq!(id.as_str(), s.as_str());
    }

    /// PROPERTY: ids containing a dot or slash are rejected.
    #[test]
    fn property_separators_rejected(
        head in "[a-z]{1,8}",
        sep in prop::sample::select(vec!['.', '/', ' ', '$']),
        tail in "[a-z]{0,8}",
    ) {
        let id = format!("{}{}{}", head, sep, tail);
        prop_assert!(ConstructId::new(id).is_err());
    }
}

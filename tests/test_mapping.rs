use isoprune::identity::{
    ExclusionSet, ListingFormat, MappingError, NameCodeMapping, TableFormat, load_feature_table,
    load_reference_listing, parse_feature_table, parse_reference_listing,
};
use std::fs;

const LISTING: &str = "pwn\tPaiwan\n\
                       ami\tAmis\n\
                       tgl\tTagalog\n\
                       XXX\tOld Javanese\n\
                       XXX\tProto-Oceanic\n";

const WALS_EXPORT: &str = "wals_code,iso_code,glottocode,Name,latitude\n\
                           pai,pwn,paiw1248,Paiwan,22.5\n\
                           tag,tgl,taga1270,Tagalog,15.0\n\
                           amb,?,ambl1234,Amblong,-15.0\n\
                           xyz,,,Unknown,0.0\n\
                           fut,fud,east2447,\"Futuna, East\",-14.3\n";

// --- TESTS NAME CODE MAPPING ---
#[test]
fn test_mapping_duplicates() {
    let mapping: NameCodeMapping = [("Foo", "L1"), ("Bar", "L1"), ("Baz", "L2"), ("foo", "L1")]
        .into_iter()
        .collect();

    assert_eq!(mapping.len(), 4);
    assert!(!mapping.is_injective());
    assert_eq!(mapping.duplicated_codes().into_iter().collect::<Vec<_>>(), vec!["L1"]);
    assert_eq!(mapping.names_for("L1"), vec!["Bar", "Foo", "foo"]);
    assert_eq!(
        mapping.lowercase_names_for("L1").into_iter().collect::<Vec<_>>(),
        vec!["bar", "foo"]
    );
}

#[test]
fn test_mapping_remove_excluded() {
    let mut mapping: NameCodeMapping = [("Foo", "L1"), ("Bar", "L1"), ("Baz", "L2")]
        .into_iter()
        .collect();
    let exclusions: ExclusionSet = ["BAR", "qux"].into_iter().collect();

    assert_eq!(mapping.remove_excluded(&exclusions), vec!["Bar"]);
    assert!(mapping.is_injective());
    assert_eq!(mapping.get("Bar"), None);
    assert_eq!(mapping.get("Foo"), Some("L1"));
}

#[test]
fn test_mapping_to_listing() {
    let mapping: NameCodeMapping = [("Tagalog", "tgl"), ("Paiwan", "pwn"), ("Amis", "ami")]
        .into_iter()
        .collect();
    assert_eq!(mapping.to_listing(b'\t'), "ami\tAmis\npwn\tPaiwan\ntgl\tTagalog\n");
}

#[test]
fn test_mapping_listing_reads_back() {
    let mut mapping = parse_feature_table(WALS_EXPORT, "export", &TableFormat::default()).unwrap();
    mapping.insert("The \"Kwaio\" language", "kwd");

    let listing = mapping.to_listing(b',');
    assert_eq!(
        listing,
        "fud,\"Futuna, East\"\n\
         kwd,\"The \"\"Kwaio\"\" language\"\n\
         pwn,Paiwan\n\
         tgl,Tagalog\n"
    );

    let format = ListingFormat {
        delimiter: b',',
        ..ListingFormat::default()
    };
    let read_back = parse_reference_listing(&listing, "listing", &format).unwrap();
    assert_eq!(read_back.mapping, mapping);
    assert!(read_back.untranslatable.is_empty());
}

#[test]
fn test_exclusion_set_is_case_insensitive() {
    let mut exclusions = ExclusionSet::new();
    assert!(exclusions.insert("East Futuna"));
    assert!(!exclusions.insert("EAST FUTUNA"));

    assert_eq!(exclusions.len(), 1);
    assert!(exclusions.contains("east futuna"));
    assert!(exclusions.contains("East Futuna"));
    assert_eq!(exclusions.iter().collect::<Vec<_>>(), vec!["east futuna"]);
}

// --- TESTS REFERENCE LISTING ---
#[test]
fn test_reference_listing() {
    let listing = parse_reference_listing(LISTING, "listing", &ListingFormat::default()).unwrap();

    assert_eq!(listing.mapping.len(), 3);
    assert_eq!(listing.mapping.get("Paiwan"), Some("pwn"));
    assert_eq!(listing.mapping.get("Tagalog"), Some("tgl"));
    assert_eq!(listing.untranslatable, vec!["Old Javanese", "Proto-Oceanic"]);
}

#[test]
fn test_reference_listing_trims_fields() {
    let listing =
        parse_reference_listing("pwn \t Paiwan \r\n\n", "listing", &ListingFormat::default())
            .unwrap();
    assert_eq!(listing.mapping.get("Paiwan"), Some("pwn"));
}

#[test]
fn test_reference_listing_custom_format() {
    let format = ListingFormat {
        delimiter: b';',
        untranslatable_code: "none".to_string(),
    };
    let listing = parse_reference_listing("pwn;Paiwan\nnone;Old Javanese\n", "listing", &format)
        .unwrap();
    assert_eq!(listing.mapping.len(), 1);
    assert_eq!(listing.untranslatable, vec!["Old Javanese"]);
}

#[test]
fn test_reference_listing_empty_code_is_untranslatable() {
    let listing =
        parse_reference_listing("\tKove\npwn\tPaiwan\n", "listing", &ListingFormat::default())
            .unwrap();
    assert_eq!(listing.mapping.len(), 1);
    assert_eq!(listing.mapping.get("Kove"), None);
    assert_eq!(listing.untranslatable, vec!["Kove"]);
}

#[test]
fn test_reference_listing_wrong_field_count() {
    let input = "pwn\tPaiwan\nami Amis\n";
    let err = parse_reference_listing(input, "iso.txt", &ListingFormat::default()).unwrap_err();

    match err {
        MappingError::FieldCount {
            origin,
            line,
            expected,
            found,
            record,
        } => {
            assert_eq!(origin, "iso.txt");
            assert_eq!(line, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
            assert_eq!(record, "ami Amis");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_reference_listing_extra_field() {
    let input = "pwn\tPaiwan\textra\n";
    let err = parse_reference_listing(input, "iso.txt", &ListingFormat::default()).unwrap_err();
    assert!(matches!(err, MappingError::FieldCount { found: 3, .. }));
    assert!(err.to_string().contains("iso.txt line 1"));
}

// --- TESTS FEATURE TABLE ---
#[test]
fn test_feature_table() {
    let mapping = parse_feature_table(WALS_EXPORT, "language.csv", &TableFormat::default()).unwrap();

    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.get("Paiwan"), Some("pwn"));
    assert_eq!(mapping.get("Tagalog"), Some("tgl"));
    assert_eq!(mapping.get("Futuna, East"), Some("fud"));
    // Missing and empty codes are unresolvable
    assert_eq!(mapping.get("Amblong"), None);
    assert_eq!(mapping.get("Unknown"), None);
}

#[test]
fn test_feature_table_missing_column() {
    let input = "wals_code,Name\npai,Paiwan\n";
    let err = parse_feature_table(input, "language.csv", &TableFormat::default()).unwrap_err();
    match err {
        MappingError::MissingColumn { origin, column } => {
            assert_eq!(origin, "language.csv");
            assert_eq!(column, "iso_code");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_feature_table_missing_header() {
    let err = parse_feature_table("\n\n", "language.csv", &TableFormat::default()).unwrap_err();
    assert!(matches!(err, MappingError::MissingHeader { .. }));
}

#[test]
fn test_feature_table_wrong_field_count() {
    let input = "Name,iso_code\nPaiwan,pwn\nTagalog,tgl,extra\n";
    let err = parse_feature_table(input, "language.csv", &TableFormat::default()).unwrap_err();
    assert!(matches!(
        err,
        MappingError::FieldCount {
            line: 3,
            expected: 2,
            found: 3,
            ..
        }
    ));
}

#[test]
fn test_feature_table_unclosed_quote() {
    let input = "Name,iso_code\n\"Paiwan,pwn\n";
    let err = parse_feature_table(input, "language.csv", &TableFormat::default()).unwrap_err();
    assert!(matches!(err, MappingError::Malformed { .. }));
}

// --- TESTS FILE LOADING ---
#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let listing_path = dir.path().join("iso.austronesian.txt");
    let table_path = dir.path().join("language.csv");
    fs::write(&listing_path, LISTING).unwrap();
    fs::write(&table_path, WALS_EXPORT).unwrap();

    let listing = load_reference_listing(&listing_path, &ListingFormat::default()).unwrap();
    assert_eq!(listing.mapping.len(), 3);

    let mapping = load_feature_table(&table_path, &TableFormat::default()).unwrap();
    assert_eq!(mapping.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let err = load_reference_listing(&path, &ListingFormat::default()).unwrap_err();
    match err {
        MappingError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other:?}"),
    }
}

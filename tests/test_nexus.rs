use isoprune::newick::LengthFormat;
use isoprune::nexus::{TreeFileReader, parse_file, parse_str};
use isoprune::parser::byte_parser::ByteParser;
use isoprune::parser::parsing_error::ParsingErrorType;
use std::io::Write;

const MCCT_FILE: &str = "#NEXUS

[Summary tree of a posterior sample]
Begin taxa;
\tDimensions ntax=4;
\t\tTaxlabels
\t\t\tPaiwan
\t\t\tTagalog
\t\t\t'East Futuna'
\t\t\tCebuano
\t\t\t;
End;
Begin trees;
\tTranslate
\t\t1 Paiwan,
\t\t2 Tagalog,
\t\t3 'East Futuna',
\t\t4 Cebuano
;
tree TREE1 = [&R] ((1[&height=0.2]:0.8,(2:0.5,4:0.5)[&posterior=0.97]:0.3):0.2,3:1.0);
End;
";

// --- TESTS TREE EXTRACTION ---
#[test]
fn test_mcct_file_with_translate() {
    let trees = parse_str(MCCT_FILE).unwrap();
    assert_eq!(trees.len(), 1);

    let tree = &trees[0];
    assert_eq!(tree.name(), Some("TREE1"));
    assert_eq!(
        tree.leaf_names(),
        vec!["Paiwan", "Tagalog", "Cebuano", "East Futuna"]
    );
    assert_eq!(
        tree.to_newick(LengthFormat::Shortest),
        "((Paiwan:0.8,(Tagalog:0.5,Cebuano:0.5):0.3):0.2,'East Futuna':1);"
    );
}

#[test]
fn test_multiple_trees() {
    let input = "#NEXUS\nbegin trees;\n\
        tree STATE_0 = ((A:1,B:1):1,C:2);\n\
        tree STATE_1000 = ((A:1,C:1):1,B:2);\n\
        UTREE * unrooted = (A:1,B:1,C:1);\n\
        end;\n";
    let trees = parse_str(input).unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(trees[0].name(), Some("STATE_0"));
    assert_eq!(trees[1].name(), Some("STATE_1000"));
    assert_eq!(trees[2].name(), Some("unrooted"));
    assert_eq!(trees[1].leaf_names(), vec!["A", "C", "B"]);
}

#[test]
fn test_trees_without_translate() {
    let input = "#NEXUS\nBEGIN TREES;\n\tTREE con = ((Paiwan:1,Amis:1):1,Rukai:2);\nEND;";
    let trees = parse_str(input).unwrap();
    assert_eq!(trees[0].leaf_names(), vec!["Paiwan", "Amis", "Rukai"]);
}

#[test]
fn test_quoted_tree_name() {
    let input = "begin trees; tree 'consensus tree' = (A,B); end;";
    let trees = parse_str(input).unwrap();
    assert_eq!(trees[0].name(), Some("consensus tree"));
}

#[test]
fn test_plain_newick_lines() {
    let trees = parse_str("(A:1,B:1);\n((C,D),E);\n").unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].name(), None);
    assert_eq!(trees[1].leaf_names(), vec!["C", "D", "E"]);
}

#[test]
fn test_no_trees() {
    let trees = parse_str("#NEXUS\nBegin taxa;\nDimensions ntax=2;\nEnd;\n").unwrap();
    assert!(trees.is_empty());
}

#[test]
fn test_next_tree() {
    let mut reader = TreeFileReader::new(ByteParser::for_str(
        "begin trees; tree a = (A,B); tree b = (C,D); end;",
    ));

    assert_eq!(reader.next_tree().unwrap().unwrap().name(), Some("a"));
    assert_eq!(reader.next_tree().unwrap().unwrap().name(), Some("b"));
    assert!(reader.next_tree().unwrap().is_none());
}

// --- TESTS PARSING ERRORS ---
#[test]
fn test_tree_command_without_equals() {
    let err = parse_str("begin trees; tree broken (A,B); end;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTreesBlock(_)));
}

#[test]
fn test_translate_duplicate_key() {
    let input = "begin trees; translate 1 Paiwan, 1 Amis; tree t = (1,2); end;";
    let err = parse_str(input).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTranslateCommand(_)));
}

#[test]
fn test_translate_missing_label() {
    let input = "begin trees; translate 1 Paiwan, 2; tree t = (1,2); end;";
    let err = parse_str(input).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTranslateCommand(_)));
}

#[test]
fn test_invalid_newick_in_tree_command() {
    let err = parse_str("begin trees; tree t = ((A,B); end;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

// --- TESTS FILE ACCESS ---
#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MCCT_FILE.as_bytes()).unwrap();

    let trees = parse_file(file.path()).unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].num_leaves(), 4);
}

#[test]
fn test_parse_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_file(dir.path().join("missing.trees"));
    assert!(matches!(result, Err(isoprune::PipelineError::Io(_))));
}

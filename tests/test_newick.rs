use isoprune::model::{BranchLength, Node};
use isoprune::newick::{LengthFormat, NewickParser, format_branch_length, parse_str, to_newick_lines};
use isoprune::parser::byte_parser::ByteParser;
use isoprune::parser::parsing_error::ParsingErrorType;
use std::collections::HashMap;

fn lengths_in_preorder(newick: &str) -> Vec<Option<f64>> {
    parse_str(newick)
        .unwrap()
        .nodes()
        .map(|node| node.branch_length().map(|length| *length))
        .collect()
}

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    assert_eq!(
        lengths_in_preorder("((A:1.0,B:2.0):3.0,C:4.0):0.5;"),
        vec![Some(0.5), Some(3.0), Some(1.0), Some(2.0), Some(4.0)]
    );

    // Relationships
    let root = tree.root();
    assert_eq!(root.children().len(), 2);
    let internal = &root.children()[0];
    assert!(internal.is_internal());
    assert_eq!(internal.children()[0].name(), Some("A"));
    assert_eq!(internal.children()[1].name(), Some("B"));
    assert_eq!(root.children()[1].name(), Some("C"));
}

#[test]
fn test_tree_without_branch_lengths() {
    let tree = parse_str("((A,B),C);").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert!(tree.nodes().all(|node| node.branch_length().is_none()));
}

#[test]
fn test_multifurcating_tree() {
    let tree = parse_str("(Paiwan:1,Amis:1,Puyuma:1,(Rukai:0.5,Saisiyat:0.5):0.5);").unwrap();
    assert_eq!(tree.root().children().len(), 4);
    assert_eq!(tree.num_leaves(), 5);
}

#[test]
fn test_internal_labels() {
    let tree = parse_str("((A:1,B:1)Formosan:1,C:2)root;").unwrap();
    assert_eq!(tree.root().name(), Some("root"));
    assert_eq!(tree.root().children()[0].name(), Some("Formosan"));
    assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
}

#[test]
fn test_quoted_labels() {
    let tree = parse_str("('East Futuna':1,'Ma''anyan':1, Tagalog :2);").unwrap();
    assert_eq!(tree.leaf_names(), vec!["East Futuna", "Ma'anyan", "Tagalog"]);
}

#[test]
fn test_comments_and_whitespace() {
    let newick = "[&R] ( \n\t(A[&height=1.0]:[&rate=0.3]1.0, B:1.0)[&posterior=0.9]:0.5 ,\nC:1.5 ) ;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    assert_eq!(tree.root().children()[1].branch_length(), Some(BranchLength::new(1.5)));
}

#[test]
fn test_scientific_notation() {
    assert_eq!(
        lengths_in_preorder("(A:1.5e-3,B:2E2);"),
        vec![None, Some(0.0015), Some(200.0)]
    );
}

#[test]
fn test_unnamed_leaves() {
    let tree = parse_str("(A:1,:1,(B:1,));").unwrap();
    assert_eq!(tree.leaf_names(), vec!["A", "", "B", ""]);
}

#[test]
fn test_single_leaf() {
    let tree = parse_str("A:1.0;").unwrap();
    assert!(tree.root().is_leaf());
    assert_eq!(tree.num_leaves(), 1);
}

#[test]
fn test_translation() {
    let translation = HashMap::from([
        ("1".to_string(), "Paiwan".to_string()),
        ("2".to_string(), "East Futuna".to_string()),
    ]);
    let mut parser = ByteParser::for_str("((1:1,2:1):1,3:2);");
    let tree = NewickParser::new()
        .with_translation(translation)
        .parse_str(&mut parser)
        .unwrap();

    // Keys without translation are kept verbatim
    assert_eq!(tree.leaf_names(), vec!["Paiwan", "East Futuna", "3"]);
}

#[test]
fn test_parse_all() {
    let parser = ByteParser::for_str("(A,B);\n(C,D);\n\n((E,F),G);\n");
    let trees = NewickParser::new().parse_all(parser).unwrap();
    assert_eq!(trees.len(), 3);
    assert_eq!(trees[2].leaf_names(), vec!["E", "F", "G"]);
}

// --- TESTS PARSING ERRORS ---
#[test]
fn test_missing_semicolon() {
    let err = parse_str("(A:1,B:1)").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse_str("((A:1,B:1):1,C:1;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));

    let err = parse_str("((A:1,B:1").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof);
}

#[test]
fn test_invalid_branch_lengths() {
    for newick in ["(A:abc,B:1);", "(A:-1,B:1);", "(A:,B:1);", "(A:1e999,B:1);"] {
        let err = parse_str(newick).unwrap_err();
        assert!(
            matches!(err.kind(), ParsingErrorType::InvalidBranchLength(_)),
            "{newick} gave {err}"
        );
    }
}

#[test]
fn test_empty_input() {
    let err = parse_str("  [just a comment] ").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof);
}

// --- TESTS NEWICK WRITING ---
#[test]
fn test_write_tree() {
    let newick = "((A:1,B:2)x:3,C:4):0.5;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.to_newick(LengthFormat::Shortest), newick);
}

#[test]
fn test_write_quotes_labels() {
    let tree = parse_str("('East Futuna':1,'Ma''anyan':1);").unwrap();
    assert_eq!(
        tree.to_newick(LengthFormat::Shortest),
        "('East Futuna':1,'Ma''anyan':1);"
    );
}

#[test]
fn test_write_never_uses_exponents() {
    let tree = parse_str("(A:1e-7,B:2.5E+10,C:0.000001234);").unwrap();
    let newick = tree.to_newick(LengthFormat::Shortest);
    assert_eq!(newick, "(A:0.0000001,B:25000000000,C:0.000001234);");
    assert!(!newick.contains(['e', 'E']));
}

#[test]
fn test_write_fixed_decimals() {
    let tree = parse_str("(A:0.123456,B:2);").unwrap();
    assert_eq!(tree.to_newick(LengthFormat::Decimals(3)), "(A:0.123,B:2.000);");
    assert_eq!(format_branch_length(BranchLength::new(1e-9), LengthFormat::Decimals(2)), "0.00");
}

#[test]
fn test_write_empty_tree() {
    let mut tree = parse_str("(A:1,B:1);").unwrap();
    tree.prune_leaves(|_| true);
    assert_eq!(tree.to_newick(LengthFormat::Shortest), "();");
}

#[test]
fn test_write_lines() {
    let trees = vec![parse_str("(A,B);").unwrap(), parse_str("(C,D);").unwrap()];
    assert_eq!(to_newick_lines(&trees, LengthFormat::Shortest), "(A,B);\n(C,D);\n");
}

#[test]
fn test_round_trip() {
    let newicks = [
        "((pwn:0.1234567,ami:0.5):1.75,(tgl:0.000012,ceb:3.3333333333333335):0.25);",
        "(('Old Javanese':1e-12,mlg:2):3,(haw:1,mri:1,smo:1):2);",
        "(a,(b,(c,d)));",
    ];

    for newick in newicks {
        let tree = parse_str(newick).unwrap();
        let written = tree.to_newick(LengthFormat::Shortest);
        let reparsed = parse_str(&written).unwrap();

        assert_eq!(reparsed.leaf_names(), tree.leaf_names(), "{written}");
        assert_eq!(lengths_in_preorder(&written), lengths_in_preorder(newick), "{written}");
    }
}

#[test]
fn test_build_and_write() {
    let tree = isoprune::model::Tree::new(Node::new_internal(
        vec![
            Node::new_leaf("pwn", Some(BranchLength::new(1.0))),
            Node::new_leaf("", Some(BranchLength::new(1.0))),
        ],
        None,
    ));
    assert_eq!(tree.to_newick(LengthFormat::Shortest), "(pwn:1,:1);");
}

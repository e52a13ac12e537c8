use cwscript_core::types::{Block, Node, Property, Scalar};
use cwscript_dsl::{parse_preserving, parse_str, print};

/// Helper: preserving parse then print must reproduce the input byte for byte.
fn assert_round_trip(source: &str) {
    let document = parse_preserving(source);
    let printed = print(&document);
    assert_eq!(
        printed, source,
        "preserving round trip changed the text\n\nDocument:\n{document:#?}"
    );
}

/// Helper: strict parse, print, strict parse again; both trees must match.
fn assert_strict_idempotent(source: &str) {
    let first = parse_str(source).expect("first parse should succeed");
    let printed = print(&first);
    let second = parse_str(&printed).unwrap_or_else(|e| {
        panic!("second parse (after printing) failed: {e}\n\nPrinted:\n{printed}");
    });
    assert_eq!(first, second, "tree changed after print\n\nPrinted:\n{printed}");
}

#[test]
fn round_trip_simple_property() {
    assert_round_trip("foo = \"bar\"\n");
}

#[test]
fn round_trip_odd_spacing() {
    assert_round_trip("foo   =\t\t\"bar\"   \n\n\n  baz=1");
}

#[test]
fn round_trip_crlf() {
    assert_round_trip("a = {\r\n\tb = 1\r\n}\r\n");
}

#[test]
fn round_trip_empty_blocks() {
    assert_round_trip("a = {}\nb = { }\nc {\n}\n");
}

#[test]
fn round_trip_nested_conditions() {
    assert_round_trip(
        "trigger = {\n    OR = {\n        AND { a = yes b = no }\n        NOT = { c = yes }\n    }\n}\n",
    );
}

#[test]
fn round_trip_comments_everywhere() {
    assert_round_trip(
        "# top\n\n# second\nkey # between key and operator\n= # after operator\nvalue # trailing\nblock = { # after brace\n\tx = 1 # after x\n\t# before close\n}\n# end of file\n",
    );
}

#[test]
fn round_trip_lists_and_values() {
    assert_round_trip("tags = { \"Gameplay\"  \"Balance\" }\nids = {\n\t1 2 3\n\tfour\n}\n");
}

#[test]
fn round_trip_comparisons() {
    assert_round_trip("limit = { num_pops >= 10 size != 2 x<3 }\n");
}

#[test]
fn round_trip_without_final_newline() {
    assert_round_trip("a = 1");
}

#[test]
fn round_trip_whitespace_and_comment_only_files() {
    assert_round_trip("");
    assert_round_trip("   \n\t\n");
    assert_round_trip("# only a comment");
    assert_round_trip("# one\n  # two\n\n");
}

#[test]
fn round_trip_unterminated_string_at_end() {
    assert_round_trip("name = \"never closed");
}

#[test]
fn round_trip_unicode() {
    assert_round_trip("名前 = \"ñandú\"\n");
}

#[test]
fn strict_idempotent_samples() {
    assert_strict_idempotent("a = 1\nb = { c = \"d\" e = f }\n");
    assert_strict_idempotent("AND { x = 1 }\nOR = { NOT = { y = 2 } }\n");
    assert_strict_idempotent("list = { a \"b\" 3 }\nempty {}\n");
    assert_strict_idempotent("v = OR { z >= 1 }\n");
}

#[test]
fn edited_value_keeps_surrounding_layout() {
    let mut document = parse_preserving("cost  =  2   # base\nother = 1\n");
    let Node::Property(cost) = &mut document.children[0] else {
        panic!("expected property");
    };
    cost.value = Scalar::number(5).into();
    assert_eq!(print(&document), "cost  =  5   # base\nother = 1\n");
}

#[test]
fn appended_child_gets_its_own_indented_line() {
    let mut document = parse_preserving("civic = {\n\tcost = 1\n}\n");
    let Node::Property(civic) = &mut document.children[0] else {
        panic!("expected property");
    };
    civic
        .block_mut()
        .expect("block value")
        .push(Property::new("is_origin", Scalar::yes_no(false)));
    assert_eq!(print(&document), "civic = {\n\tcost = 1\n\tis_origin = no\n}\n");
}

#[test]
fn appended_top_level_node_after_preserved_text() {
    let mut document = parse_preserving("# header\na = 1");
    document.push(Block::new("b").with(Property::new("c", Scalar::number(2))));
    assert_eq!(print(&document), "# header\na = 1\nb {\n\tc = 2\n}\n");
}

#[test]
fn appended_to_empty_preserved_block() {
    let mut document = parse_preserving("tags = {}\n");
    let Node::Property(tags) = &mut document.children[0] else {
        panic!("expected property");
    };
    tags.block_mut()
        .expect("block value")
        .push(Scalar::string("Gameplay"));
    assert_eq!(print(&document), "tags = {\n\t\"Gameplay\"\n}\n");
}

#[test]
fn malformed_input_is_tolerated() {
    // The stray `=` is dropped; everything else survives.
    let document = parse_preserving("= \"bar\"\nfoo = 1\n");
    assert_eq!(print(&document), " \nfoo = 1\n");
    assert!(parse_str("= \"bar\"\nfoo = 1\n").is_err());
}

/// Preserving parse, then layout normalization.
fn normalize(source: &str) -> String {
    let mut document = parse_preserving(source);
    document.strip_formatting();
    print(&document)
}

#[test]
fn normalizing_keeps_comments_inside_their_block() {
    let source = "trigger = {\n    # has_ethic = x\n  always = yes\n}\nother = 1\n";
    let normalized = normalize(source);
    assert_eq!(
        normalized,
        "trigger = {\n\t# has_ethic = x\n\talways = yes\n}\nother = 1\n"
    );
    assert_eq!(normalize(&normalized), normalized);

    let closing = normalize("trigger = { always = yes\n# closing note\n}\n");
    assert_eq!(closing, "trigger = {\n\talways = yes\n\t# closing note\n}\n");
    assert_eq!(normalize(&closing), closing);

    let empty = normalize("NOR = {\n# nothing yet\n}\n");
    assert_eq!(empty, "NOR = {\n\t# nothing yet\n}\n");
    assert_eq!(normalize(&empty), empty);
}

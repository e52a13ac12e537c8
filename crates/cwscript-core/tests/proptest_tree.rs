use proptest::prelude::*;
use cwscript_core::types::{Block, Combinator, Condition, Document, Node, Property, Scalar};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        "[a-zA-Z0-9 _.:]{0,20}".prop_map(Scalar::string),
        any::<i32>().prop_map(Scalar::number),
        key_strategy().prop_map(Scalar::identifier),
        any::<bool>().prop_map(Scalar::yes_no),
    ]
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec((key_strategy(), scalar_strategy(), any::<bool>()), 0..8).prop_map(
        |entries| {
            let mut document = Document::named("common/test.txt");
            for (key, scalar, nested) in entries {
                if nested {
                    let block = Block::anonymous().with(Property::new(key.clone(), scalar));
                    document.push(Property::new(key, block));
                } else {
                    document.push(Property::new(key, scalar));
                }
            }
            document
        },
    )
}

proptest! {
    #[test]
    fn rendered_string_reads_back_as_content(s in "[^\"]([^\"]{0,20}[^\"])?") {
        let rendered = Scalar::string(s.as_str()).render().into_owned();
        let read = Scalar::String(rendered);
        let read_text = read.text();
        prop_assert_eq!(read_text.as_ref(), s.as_str());
    }

    #[test]
    fn quoted_strings_are_never_requoted(s in "[a-z ]{0,20}") {
        let quoted = format!("\"{s}\"");
        let scalar = Scalar::string(quoted.as_str());
        let rendered = scalar.render();
        prop_assert_eq!(rendered.as_ref(), quoted.as_str());
    }

    #[test]
    fn integers_parse_back(n in any::<i64>()) {
        prop_assert_eq!(Scalar::number(n).as_i64(), Some(n));
    }

    #[test]
    fn document_json_roundtrip(document in document_strategy()) {
        let json = serde_json::to_string(&document).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(document, back);
    }

    #[test]
    fn set_property_keeps_a_single_entry(
        document in document_strategy(),
        key in key_strategy(),
        n in any::<i32>(),
    ) {
        let mut document = document;
        let before = document.properties().filter(|p| p.key == key).count();
        document.set_property(&key, Scalar::number(n));
        let after = document.properties().filter(|p| p.key == key).count();
        prop_assert_eq!(after, before.max(1));
        let found = document.property(&key).and_then(Property::scalar);
        prop_assert_eq!(found, Some(&Scalar::number(n)));
    }

    #[test]
    fn remove_property_clears_every_entry(document in document_strategy(), key in key_strategy()) {
        let mut document = document;
        let len = document.len();
        let removed = document.remove_property(&key);
        prop_assert_eq!(document.len(), len - removed);
        prop_assert!(document.property(&key).is_none());
    }
}

#[test]
fn civic_shaped_tree_roundtrips_through_json() {
    let civic = Block::anonymous()
        .with(Property::new("corporate", Scalar::yes_no(true)))
        .with(Property::new(
            "potential",
            Block::anonymous().with(
                Condition::assigned(Combinator::Or)
                    .with(Property::new("has_ethic", Scalar::identifier("ethic_militarist")))
                    .with(Property::new("has_ethic", Scalar::identifier("ethic_fanatic_militarist"))),
            ),
        ));
    let document = Document::new().with(Property::new("civic_warrior_culture", civic));

    let json = serde_json::to_value(&document).unwrap();
    let back: Document = serde_json::from_value(json).unwrap();
    assert_eq!(back, document);

    let (id, body) = back.definitions().next().unwrap();
    assert_eq!(id, "civic_warrior_culture");
    assert_eq!(body.scalar("corporate").and_then(Scalar::as_bool), Some(true));
    let condition = body.section("potential").unwrap().conditions().next().unwrap();
    let ethics: Vec<_> = condition.scalars_for("has_ethic").map(|s| s.raw()).collect();
    assert_eq!(ethics, ["ethic_militarist", "ethic_fanatic_militarist"]);
    assert!(matches!(back.children[0], Node::Property(_)));
}

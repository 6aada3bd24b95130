//! Serializer round-trip law over generated documents

use folio_document::{
    serializer, ContentTree, HeadingLevel, ImageAttrs, Mark, Node, TextAlign, TreeError,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn marks() -> impl Strategy<Value = Vec<Mark>> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[a-z]{1,8}\\.com"),
    )
        .prop_map(|(bold, italic, underline, link)| {
            let mut marks = Vec::new();
            if bold {
                marks.push(Mark::Bold);
            }
            if italic {
                marks.push(Mark::Italic);
            }
            if underline {
                marks.push(Mark::Underline);
            }
            if let Some(href) = link {
                marks.push(Mark::link(&href));
            }
            marks
        })
}

fn align() -> impl Strategy<Value = TextAlign> {
    prop_oneof![
        Just(TextAlign::Left),
        Just(TextAlign::Center),
        Just(TextAlign::Right)
    ]
}

fn inline() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => ("[a-zA-Z0-9 é世]{1,12}", marks()).prop_map(|(text, marks)| Node::text_with(text, marks)),
        1 => (
            "[a-z]{1,8}\\.png",
            proptest::option::of("[a-z ]{0,8}"),
            50u32..2000,
            align(),
        )
            .prop_map(|(src, alt, width, align)| {
                Node::image(
                    ImageAttrs::new(src)
                        .with_alt(alt)
                        .with_width(width)
                        .with_text_align(align),
                )
            }),
    ]
}

fn block() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        vec(inline(), 0..4).prop_map(Node::paragraph),
        (
            prop_oneof![Just(HeadingLevel::H1), Just(HeadingLevel::H2)],
            vec(inline(), 0..3)
        )
            .prop_map(|(level, content)| Node::heading(level, content)),
        Just(Node::horizontal_rule()),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            vec(vec(inner.clone(), 1..3).prop_map(Node::list_item), 1..3)
                .prop_map(Node::bullet_list),
            vec(vec(inner.clone(), 1..3).prop_map(Node::list_item), 1..3)
                .prop_map(Node::ordered_list),
            vec(
                (any::<bool>(), vec(inner, 1..3))
                    .prop_map(|(checked, content)| Node::task_item(checked, content)),
                1..3
            )
            .prop_map(Node::task_list),
        ]
    })
}

fn document() -> impl Strategy<Value = ContentTree> {
    vec(block(), 0..6).prop_map(|blocks| ContentTree::new(Node::doc(blocks)).unwrap())
}

proptest! {
    #[test]
    fn deserialize_inverts_serialize(tree in document()) {
        let json = serializer::serialize(&tree);
        let parsed = serializer::deserialize(&json).unwrap();
        prop_assert_eq!(&parsed, &tree);
        prop_assert_eq!(serializer::serialize(&parsed), json);
    }

    #[test]
    fn pretty_output_parses_to_the_same_tree(tree in document()) {
        let parsed = serializer::deserialize(&serializer::serialize_pretty(&tree)).unwrap();
        prop_assert_eq!(parsed, tree);
    }

    #[test]
    fn every_accepted_tree_round_trips(
        href in "(https?://| https://|HTTP://)?[a-z.]{0,8}",
        src in "[a-z./]{0,6}"
    ) {
        let root = Node::doc(vec![Node::paragraph(vec![
            Node::text_with("link", [Mark::Link { href }]),
            Node::image(ImageAttrs::new(src)),
        ])]);

        if let Ok(tree) = ContentTree::new(root) {
            let parsed = serializer::deserialize(&serializer::serialize(&tree)).unwrap();
            prop_assert_eq!(parsed, tree);
        }
    }
}

#[test]
fn raw_link_href_is_not_a_valid_tree() {
    let root = Node::doc(vec![Node::paragraph(vec![Node::text_with(
        "x",
        [Mark::Link {
            href: "example.com".to_string(),
        }],
    )])]);

    assert!(matches!(
        ContentTree::new(root),
        Err(TreeError::UnnormalizedHref { .. })
    ));
}

#[test]
fn image_without_source_is_not_a_valid_tree() {
    let root = Node::doc(vec![Node::paragraph(vec![Node::image(ImageAttrs::new(""))])]);
    assert!(matches!(
        ContentTree::new(root),
        Err(TreeError::EmptyImageSource(_))
    ));
}

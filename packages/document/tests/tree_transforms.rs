//! Copy-on-write transforms and schema enforcement

use folio_document::{
    serializer, ContentTree, HeadingLevel, ImageAttrs, Node, NodeType, Path, TreeError,
};

fn meeting_doc() -> ContentTree {
    ContentTree::new(Node::doc(vec![
        Node::heading(HeadingLevel::H1, vec![Node::text("Agenda")]),
        Node::bullet_list(vec![
            Node::list_item(vec![Node::paragraph(vec![Node::text("first")])]),
            Node::list_item(vec![Node::paragraph(vec![Node::text("second")])]),
        ]),
        Node::paragraph(vec![Node::text("closing")]),
    ]))
    .unwrap()
}

#[test]
fn test_failed_insert_leaves_tree_identical() {
    let tree = meeting_doc();
    let snapshot = serializer::serialize(&tree);
    let handle = tree.clone();

    let result = tree.insert_child(&Path::root(), 0, Node::image(ImageAttrs::new("cat.png")));

    assert_eq!(
        result,
        Err(TreeError::IllegalChild {
            parent: NodeType::Doc,
            child: NodeType::Image,
        })
    );
    assert!(tree.ptr_eq(&handle));
    assert_eq!(serializer::serialize(&tree), snapshot);
}

#[test]
fn test_insert_image_inside_paragraph() {
    let tree = meeting_doc();
    let edited = tree
        .insert_child(&Path::from([2]), 1, Node::image(ImageAttrs::new("cat.png")))
        .unwrap();

    assert_eq!(edited.get(&Path::from([2])).unwrap().child_count(), 2);
    assert_eq!(tree.get(&Path::from([2])).unwrap().child_count(), 1);
    assert_eq!(edited.images(), vec![Path::from([2, 1])]);
}

#[test]
fn test_list_accepts_only_list_items() {
    let tree = meeting_doc();
    let result = tree.insert_child(&Path::from([1]), 0, Node::paragraph(vec![]));
    assert_eq!(
        result,
        Err(TreeError::IllegalChild {
            parent: NodeType::BulletList,
            child: NodeType::Paragraph,
        })
    );
}

#[test]
fn test_insert_checks_the_inserted_subtree() {
    let tree = meeting_doc();
    let bad = Node::paragraph(vec![Node::horizontal_rule()]);
    assert!(matches!(
        tree.insert_child(&Path::root(), 0, bad),
        Err(TreeError::IllegalChild { .. })
    ));
}

#[test]
fn test_remove_nested_node() {
    let tree = meeting_doc();
    let edited = tree.remove_at(&Path::from([1, 0])).unwrap();

    let list = edited.get(&Path::from([1])).unwrap();
    assert_eq!(list.child_count(), 1);
    assert_eq!(list.text_content(), "second");
    assert_eq!(
        edited.remove_at(&Path::from([1, 5])),
        Err(TreeError::PathNotFound(Path::from([1, 5])))
    );
}

#[test]
fn test_replace_root_requires_doc() {
    let tree = meeting_doc();
    assert_eq!(
        tree.replace_at(&Path::root(), Node::paragraph(vec![])),
        Err(TreeError::NotADocument(NodeType::Paragraph))
    );
    let replaced = tree.replace_at(&Path::root(), Node::doc(vec![])).unwrap();
    assert_eq!(replaced.root().child_count(), 0);
}

#[test]
fn test_replace_missing_path() {
    let tree = meeting_doc();
    assert_eq!(
        tree.replace_at(&Path::from([9, 0]), Node::text("x")),
        Err(TreeError::PathNotFound(Path::from([9, 0])))
    );
}

#[test]
fn test_unchanged_siblings_are_shared() {
    let tree = meeting_doc();
    let edited = tree
        .replace_at(&Path::from([2, 0]), Node::text("bye"))
        .unwrap();

    let before = tree.get_shared(&Path::from([1])).unwrap();
    let after = edited.get_shared(&Path::from([1])).unwrap();
    assert!(std::sync::Arc::ptr_eq(&before, &after));
}

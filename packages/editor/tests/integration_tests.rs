//! Integration tests for editor crate

use folio_document::{
    serializer, ContentTree, HeadingLevel, ImageAttrs, MarkType, Node, NodeType, Path, TextAlign,
};
use folio_editor::{Command, CommandEngine, EditError};

fn sample() -> ContentTree {
    ContentTree::new(Node::doc(vec![
        Node::heading(HeadingLevel::H1, vec![Node::text("Title")]),
        Node::paragraph(vec![Node::text("Hello world")]),
        Node::paragraph(vec![Node::image(ImageAttrs::new("https://example.com/a.png"))]),
    ]))
    .unwrap()
}

fn bold(start: usize, end: usize) -> Command {
    Command::ToggleMark {
        mark: MarkType::Bold,
        start,
        end,
    }
}

#[test]
fn test_toggle_twice_restores_tree() {
    let original = sample();
    let mut engine = CommandEngine::new(original.clone());

    engine.apply(bold(2, 9)).unwrap();
    assert!(engine.tree().range_has_mark(2..9, MarkType::Bold));
    assert_ne!(engine.tree(), &original);

    engine.apply(bold(2, 9)).unwrap();
    assert_eq!(engine.tree(), &original);
    assert_eq!(
        serializer::serialize(engine.tree()),
        serializer::serialize(&original)
    );
}

#[test]
fn test_partial_mark_is_extended_not_removed() {
    let mut engine = CommandEngine::new(sample());

    engine.apply(bold(5, 8)).unwrap();
    engine.apply(bold(5, 12)).unwrap();

    assert!(engine.tree().range_has_mark(5..12, MarkType::Bold));
}

#[test]
fn test_undo_n_then_redo_n() {
    let original = sample();
    let mut engine = CommandEngine::new(original.clone());

    let commands = vec![
        bold(0, 5),
        Command::SetHeadingLevel {
            path: Path::from([1]),
            level: HeadingLevel::H2,
        },
        Command::SetImageAttributes {
            path: Path::from([2, 0]),
            width: Some(420),
            text_align: Some(TextAlign::Center),
        },
        Command::SetLink {
            start: 5,
            end: 10,
            href: Some("example.com".to_string()),
        },
    ];

    let mut states = vec![original.clone()];
    for command in commands {
        states.push(engine.apply(command).unwrap());
    }

    for expected in states.iter().rev().skip(1) {
        engine.undo();
        assert_eq!(engine.tree(), expected);
    }
    assert!(!engine.can_undo());

    for expected in states.iter().skip(1) {
        engine.redo();
        assert_eq!(engine.tree(), expected);
    }
    assert!(!engine.can_redo());
}

#[test]
fn test_heading_toggle_reverts_to_paragraph() {
    let mut engine = CommandEngine::new(sample());
    let path = Path::from([0]);

    engine
        .apply(Command::SetHeadingLevel {
            path: path.clone(),
            level: HeadingLevel::H1,
        })
        .unwrap();

    assert_eq!(engine.tree().get(&path).unwrap().node_type(), NodeType::Paragraph);
    assert_eq!(engine.tree().text_content(), sample().text_content());
}

#[test]
fn test_align_on_paragraph_is_rejected() {
    let mut engine = CommandEngine::new(sample());

    let result = engine.apply(Command::SetBlockAlign {
        path: Path::from([1]),
        align: TextAlign::Right,
    });

    assert!(matches!(result, Err(EditError::KindMismatch { .. })));
    assert_eq!(engine.undo_levels(), 0);
}

#[test]
fn test_width_is_clamped_to_minimum() {
    let mut engine = CommandEngine::new(sample());
    let path = Path::from([2, 0]);

    engine
        .apply(Command::SetImageAttributes {
            path: path.clone(),
            width: Some(10),
            text_align: None,
        })
        .unwrap();

    let attrs = engine.tree().get(&path).unwrap().image_attrs().unwrap();
    assert_eq!(attrs.width(), folio_document::MIN_IMAGE_WIDTH);
}

#[test]
fn test_insert_image_between_blocks_wraps_in_paragraph() {
    let mut engine = CommandEngine::new(sample());

    let tree = engine
        .apply(Command::InsertImage {
            at: Path::from([1]),
            src: "https://example.com/b.png".to_string(),
            alt: Some("diagram".to_string()),
        })
        .unwrap();

    let wrapper = tree.get(&Path::from([1])).unwrap();
    assert_eq!(wrapper.node_type(), NodeType::Paragraph);
    let image = tree.get(&Path::from([1, 0])).unwrap().image_attrs().unwrap();
    assert_eq!(image.src(), "https://example.com/b.png");
    assert_eq!(image.alt(), Some("diagram"));
    assert_eq!(tree.root().child_count(), 4);
}

#[test]
fn test_delete_then_undo() {
    let original = sample();
    let mut engine = CommandEngine::new(original.clone());

    engine
        .apply(Command::DeleteNode {
            path: Path::from([0]),
        })
        .unwrap();
    assert_eq!(engine.tree().root().child_count(), 2);

    engine.undo();
    assert_eq!(engine.tree(), &original);
}

#[test]
fn test_out_of_range_command_leaves_history_alone() {
    let mut engine = CommandEngine::new(sample());
    engine.apply(bold(0, 2)).unwrap();

    let before = engine.tree().clone();
    let result = engine.apply(bold(3, 1000));

    assert!(result.is_err());
    assert!(engine.tree().ptr_eq(&before));
    assert_eq!(engine.undo_levels(), 1);
}


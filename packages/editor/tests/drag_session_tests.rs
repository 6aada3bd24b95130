//! Interactive resize drags against a real engine

use folio_document::{ContentTree, ImageAttrs, Node, Path};
use folio_editor::{Command, CommandEngine, DragState, EndOutcome, ImageResizeSession};
use std::time::{Duration, Instant};

fn engine_with_image() -> CommandEngine {
    let tree = ContentTree::new(Node::doc(vec![
        Node::paragraph(vec![Node::text("Before")]),
        Node::paragraph(vec![Node::image(
            ImageAttrs::new("https://example.com/cat.png").with_width(300),
        )]),
        Node::paragraph(vec![Node::text("After")]),
    ]))
    .unwrap();
    CommandEngine::new(tree)
}

fn image_path() -> Path {
    Path::from([1, 0])
}

fn width_of(engine: &CommandEngine) -> u32 {
    engine
        .tree()
        .get(&image_path())
        .unwrap()
        .image_attrs()
        .unwrap()
        .width()
}

#[test]
fn test_drag_commits_single_command() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    assert_eq!(session.update(110), Some(310));
    assert_eq!(session.update(140), Some(340));
    assert_eq!(session.update(90), Some(290));

    // Pointer moves never reach the engine
    assert_eq!(engine.undo_levels(), 0);
    assert_eq!(width_of(&engine), 300);

    let outcome = session.end(&mut engine).unwrap();
    assert!(matches!(outcome, EndOutcome::Committed(_)));
    assert_eq!(width_of(&engine), 290);
    assert_eq!(engine.undo_levels(), 1);

    engine.undo();
    assert_eq!(width_of(&engine), 300);
}

#[test]
fn test_drag_below_minimum_clamps() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 400).unwrap();
    assert_eq!(session.update(0), Some(folio_document::MIN_IMAGE_WIDTH));

    session.end(&mut engine).unwrap();
    assert_eq!(width_of(&engine), folio_document::MIN_IMAGE_WIDTH);
}

#[test]
fn test_drag_back_to_start_issues_nothing() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    session.update(180);
    session.update(100);

    assert_eq!(session.end(&mut engine).unwrap(), EndOutcome::Unchanged);
    assert_eq!(engine.undo_levels(), 0);
}

#[test]
fn test_end_without_begin() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    assert_eq!(session.update(50), None);
    assert_eq!(session.end(&mut engine).unwrap(), EndOutcome::NotDragging);
    assert_eq!(engine.undo_levels(), 0);
}

#[test]
fn test_target_deleted_mid_drag_is_discarded() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    session.update(150);

    engine
        .apply(Command::DeleteNode {
            path: Path::from([1]),
        })
        .unwrap();
    let after_delete = engine.tree().clone();

    // [1, 0] now resolves to the text of the paragraph that moved up
    assert_eq!(session.end(&mut engine).unwrap(), EndOutcome::Discarded);
    assert_eq!(engine.tree(), &after_delete);
    assert_eq!(engine.undo_levels(), 1);
    assert_eq!(session.state(), DragState::Idle);
}

#[test]
fn test_target_path_gone_mid_drag_is_discarded() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    session.update(60);

    engine
        .apply(Command::DeleteNode { path: image_path() })
        .unwrap();

    assert_eq!(session.end(&mut engine).unwrap(), EndOutcome::Discarded);
    assert_eq!(engine.undo_levels(), 1);
}

#[test]
fn test_abandoned_drag_times_out() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::with_timeout(Duration::from_millis(500));

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    session.update(160);

    let now = Instant::now();
    assert_eq!(session.expire_if_stale(now, &mut engine).unwrap(), None);
    assert!(session.is_dragging());

    let later = now + Duration::from_secs(1);
    let outcome = session.expire_if_stale(later, &mut engine).unwrap();
    assert!(matches!(outcome, Some(EndOutcome::Committed(_))));
    assert_eq!(width_of(&engine), 360);
    assert_eq!(engine.undo_levels(), 1);
    assert!(!session.is_dragging());
}

#[test]
fn test_cancel_mid_drag_commits_once() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    session.update(130);

    let outcome = session.cancel(&mut engine).unwrap();
    assert!(matches!(outcome, EndOutcome::Committed(_)));
    assert_eq!(width_of(&engine), 330);
    assert_eq!(engine.undo_levels(), 1);
    assert_eq!(session.state(), DragState::Idle);

    // A second cancel has nothing left to commit
    assert_eq!(session.cancel(&mut engine).unwrap(), EndOutcome::NotDragging);
    assert_eq!(engine.undo_levels(), 1);
}

#[test]
fn test_second_begin_restarts_gesture() {
    let mut engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    session.begin_on(engine.tree(), image_path(), 100).unwrap();
    assert_eq!(session.update(200), Some(400));

    // The first gesture is dropped; the new anchor reads the tree again
    session.begin_on(engine.tree(), image_path(), 500).unwrap();
    assert_eq!(session.update(520), Some(320));

    session.end(&mut engine).unwrap();
    assert_eq!(width_of(&engine), 320);
    assert_eq!(engine.undo_levels(), 1);
}

#[test]
fn test_path_shifted_onto_other_image_is_discarded() {
    let tree = ContentTree::new(Node::doc(vec![
        Node::paragraph(vec![Node::image(
            ImageAttrs::new("https://example.com/a.png").with_width(300),
        )]),
        Node::paragraph(vec![Node::image(
            ImageAttrs::new("https://example.com/b.png").with_width(500),
        )]),
    ]))
    .unwrap();
    let mut engine = CommandEngine::new(tree);
    let mut session = ImageResizeSession::new();
    let first = Path::from([0, 0]);

    session.begin_on(engine.tree(), first.clone(), 100).unwrap();
    session.update(150);

    engine
        .apply(Command::DeleteNode {
            path: Path::from([0]),
        })
        .unwrap();

    // [0, 0] is now the second image, which must keep its own width
    assert_eq!(session.end(&mut engine).unwrap(), EndOutcome::Discarded);
    let width = engine
        .tree()
        .get(&first)
        .unwrap()
        .image_attrs()
        .unwrap()
        .width();
    assert_eq!(width, 500);
    assert_eq!(engine.undo_levels(), 1);
}

#[test]
fn test_begin_on_text_is_rejected() {
    let engine = engine_with_image();
    let mut session = ImageResizeSession::new();

    let result = session.begin_on(engine.tree(), Path::from([0, 0]), 10);
    assert!(result.is_err());
    assert_eq!(session.state(), DragState::Idle);
}

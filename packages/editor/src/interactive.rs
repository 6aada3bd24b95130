//! # Interactive Attribute Sessions
//!
//! Decouples high-frequency pointer input from the committed command stream.
//!
//! While a drag is in progress the session only updates a local live value
//! that the host renders; nothing reaches the engine. On release exactly one
//! command is issued, so a single undo step restores the value from before
//! the drag.
//!
//! ```text
//!          begin                 end
//!   Idle ─────────▶ Dragging ─────────▶ Idle
//!                    │    ▲             (commit once if value changed)
//!                    └────┘
//!                    update (local only)
//! ```

use crate::commands::Command;
use crate::engine::CommandSink;
use crate::errors::EditError;
use folio_document::{ContentTree, Node, Path, MIN_IMAGE_WIDTH};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default time without pointer activity after which a drag is abandoned
pub const DEFAULT_DRAG_TIMEOUT: Duration = Duration::from_secs(10);

/// A node attribute edited by a continuous horizontal drag
pub trait ContinuousAttribute {
    type Value: Copy + PartialEq + Debug;

    /// Read the attribute from a node, `None` if the node does not carry it
    fn read(node: &Node) -> Option<Self::Value>;

    /// Value for a pointer moved `delta` pixels since the gesture started
    fn value_for(anchor: Self::Value, delta: i64) -> Self::Value;

    /// The command that commits `value` to the node at `path`
    fn commit(path: &Path, value: Self::Value) -> Command;
}

/// Image width driven by the resize handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageWidth;

impl ContinuousAttribute for ImageWidth {
    type Value = u32;

    fn read(node: &Node) -> Option<u32> {
        node.image_attrs().map(|attrs| attrs.width())
    }

    fn value_for(anchor: u32, delta: i64) -> u32 {
        let width = (i64::from(anchor) + delta).max(i64::from(MIN_IMAGE_WIDTH));
        u32::try_from(width).unwrap_or(u32::MAX)
    }

    fn commit(path: &Path, width: u32) -> Command {
        Command::SetImageAttributes {
            path: path.clone(),
            width: Some(width),
            text_align: None,
        }
    }
}

/// Transient state of one in-progress drag; never serialized
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<V> {
    pub path: Path,
    pub anchor_pointer_x: i64,
    pub anchor_value: V,
    pub live_value: V,
    last_activity: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// What [`InteractiveAttributeSession::end`] did
#[derive(Debug, Clone, PartialEq)]
pub enum EndOutcome {
    /// No drag was in progress
    NotDragging,

    /// The value ended where it started; no command issued
    Unchanged,

    /// One command was applied, producing this tree
    Committed(ContentTree),

    /// The target node disappeared mid-drag; the change was dropped
    Discarded,
}

/// Drag controller for one interactive node instance
#[derive(Debug)]
pub struct InteractiveAttributeSession<A: ContinuousAttribute = ImageWidth> {
    drag: Option<DragSession<A::Value>>,
    timeout: Duration,
    _attribute: PhantomData<A>,
}

/// Session driving the image resize handle
pub type ImageResizeSession = InteractiveAttributeSession<ImageWidth>;

impl<A: ContinuousAttribute> InteractiveAttributeSession<A> {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_DRAG_TIMEOUT)
    }

    /// Session whose drags are abandoned after `timeout` without pointer activity
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            drag: None,
            timeout,
            _attribute: PhantomData,
        }
    }

    pub fn state(&self) -> DragState {
        if self.drag.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragSession<A::Value>> {
        self.drag.as_ref()
    }

    /// Value to render while dragging
    pub fn display_value(&self) -> Option<A::Value> {
        self.drag.as_ref().map(|drag| drag.live_value)
    }

    /// Start a gesture on the node at `path`.
    ///
    /// Calling this mid-drag restarts from the new anchor; the previous
    /// gesture is dropped without committing.
    pub fn begin(&mut self, path: Path, pointer_x: i64, current: A::Value) {
        if let Some(previous) = &self.drag {
            debug!(path = %previous.path, "Restarting drag, previous gesture dropped");
        }

        self.drag = Some(DragSession {
            path,
            anchor_pointer_x: pointer_x,
            anchor_value: current,
            live_value: current,
            last_activity: Instant::now(),
        });
    }

    /// Start a gesture, reading the current value from the node in `tree`
    pub fn begin_on(
        &mut self,
        tree: &ContentTree,
        path: Path,
        pointer_x: i64,
    ) -> Result<(), EditError> {
        let node = tree.get(&path)?;
        let current = A::read(node).ok_or_else(|| EditError::KindMismatch {
            path: path.clone(),
            expected: "an interactive node",
            found: node.node_type(),
        })?;
        self.begin(path, pointer_x, current);
        Ok(())
    }

    /// Track pointer movement. Local only: never touches the engine.
    ///
    /// Returns the new live value, or `None` while idle.
    pub fn update(&mut self, pointer_x: i64) -> Option<A::Value> {
        let drag = self.drag.as_mut()?;
        drag.live_value = A::value_for(drag.anchor_value, pointer_x - drag.anchor_pointer_x);
        drag.last_activity = Instant::now();
        Some(drag.live_value)
    }

    /// Finish the gesture, committing at most one command through `sink`.
    ///
    /// A target that no longer resolves (deleted mid-drag) is not an error:
    /// the pending value is discarded. So is a target path that now holds a
    /// node whose value differs from the anchor, since paths shift when
    /// earlier siblings are removed.
    pub fn end<S: CommandSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<EndOutcome, EditError> {
        let Some(drag) = self.drag.take() else {
            return Ok(EndOutcome::NotDragging);
        };

        if drag.live_value == drag.anchor_value {
            return Ok(EndOutcome::Unchanged);
        }

        let current = sink.tree().get(&drag.path).ok().and_then(A::read);
        if current != Some(drag.anchor_value) {
            warn!(
                path = %drag.path,
                anchor = ?drag.anchor_value,
                found = ?current,
                "Drag target changed, change discarded"
            );
            return Ok(EndOutcome::Discarded);
        }

        match sink.apply(A::commit(&drag.path, drag.live_value)) {
            Ok(tree) => {
                debug!(path = %drag.path, value = ?drag.live_value, "Drag committed");
                Ok(EndOutcome::Committed(tree))
            }
            Err(e) if e.is_stale_target() => {
                warn!(path = %drag.path, error = %e, "Drag target is gone, change discarded");
                Ok(EndOutcome::Discarded)
            }
            Err(e) => Err(e),
        }
    }

    /// Force the gesture to end, e.g. when the editor loses focus
    pub fn cancel<S: CommandSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<EndOutcome, EditError> {
        if self.drag.is_some() {
            debug!("Drag cancelled, forcing end");
        }
        self.end(sink)
    }

    /// End a drag whose pointer has been silent for longer than the timeout.
    ///
    /// Covers a pointer-up that never arrives. Returns `None` when no drag
    /// was stale.
    pub fn expire_if_stale<S: CommandSink + ?Sized>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<Option<EndOutcome>, EditError> {
        let stale = self
            .drag
            .as_ref()
            .is_some_and(|drag| now.saturating_duration_since(drag.last_activity) >= self.timeout);

        if !stale {
            return Ok(None);
        }

        warn!(timeout_ms = self.timeout.as_millis() as u64, "Drag timed out, forcing end");
        self.end(sink).map(Some)
    }
}

impl<A: ContinuousAttribute> Default for InteractiveAttributeSession<A> {
    fn default() -> Self {
        Self::new()
    }
}

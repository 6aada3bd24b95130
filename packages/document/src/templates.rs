//! Built-in starting documents offered when a new document is created.

use crate::mark::Mark;
use crate::node::{HeadingLevel, Node};
use crate::serializer;
use crate::tree::ContentTree;

/// A named starting document
#[derive(Debug, Clone)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    document: Option<ContentTree>,
}

impl Template {
    /// Tree the template starts from; `None` for the blank template
    pub fn document(&self) -> Option<&ContentTree> {
        self.document.as_ref()
    }

    /// Persisted content, as stored for a freshly created document.
    ///
    /// The blank template stores an empty string.
    pub fn content(&self) -> String {
        self.document
            .as_ref()
            .map(serializer::serialize)
            .unwrap_or_default()
    }
}

pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "blank",
            name: "Blank document",
            description: "Start from an empty page",
            document: None,
        },
        Template {
            id: "weekly_report",
            name: "Weekly report",
            description: "Progress this week, plan for next week and open issues",
            document: Some(weekly_report()),
        },
        Template {
            id: "meeting_notes",
            name: "Meeting notes",
            description: "Attendees, agenda and action items",
            document: Some(meeting_notes()),
        },
    ]
}

pub fn find_template(id: &str) -> Option<Template> {
    templates().into_iter().find(|t| t.id == id)
}

fn para(text: &str) -> Node {
    Node::paragraph(vec![Node::text(text)])
}

fn heading(level: HeadingLevel, text: &str) -> Node {
    Node::heading(level, vec![Node::text(text)])
}

fn weekly_report() -> ContentTree {
    ContentTree::from_trusted(Node::doc(vec![
        heading(HeadingLevel::H1, "Weekly Report"),
        heading(HeadingLevel::H2, "This week"),
        Node::bullet_list(vec![
            Node::list_item(vec![para("Finished task A")]),
            Node::list_item(vec![para("Followed up on project B")]),
        ]),
        heading(HeadingLevel::H2, "Next week"),
        Node::paragraph(vec![]),
    ]))
}

fn meeting_notes() -> ContentTree {
    ContentTree::from_trusted(Node::doc(vec![
        heading(HeadingLevel::H1, "Meeting Notes"),
        Node::paragraph(vec![
            Node::text_with("Time: ", [Mark::Bold]),
            Node::text("YYYY-MM-DD"),
        ]),
        Node::paragraph(vec![Node::text_with("Attendees: ", [Mark::Bold])]),
        Node::horizontal_rule(),
        heading(HeadingLevel::H2, "Agenda"),
        Node::ordered_list(vec![Node::list_item(vec![para("Topic one")])]),
        heading(HeadingLevel::H2, "Decisions and actions"),
        Node::task_list(vec![Node::task_item(
            false,
            vec![para("@someone to follow up")],
        )]),
    ]))
}

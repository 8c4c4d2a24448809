//! Depth-first walk over a parse tree.
//!
//! The walker turns a finished [`ParseNode`] tree into the enter/exit event
//! sequence a [`ParseListener`] reacts to. Entry fires before any descendant,
//! exit after all of them.

use crate::errors::errors::Error;

use super::tree::{ParseChild, ParseNode, Rule};

/// Reacts to rule entry and exit during a walk.
///
/// Both callbacks are fallible; the first error aborts the walk.
pub trait ParseListener {
    fn enter_rule(&mut self, node: &ParseNode) -> Result<(), Error>;
    fn exit_rule(&mut self, node: &ParseNode) -> Result<(), Error>;
}

pub fn walk<L: ParseListener>(listener: &mut L, node: &ParseNode) -> Result<(), Error> {
    listener.enter_rule(node)?;

    for child in &node.children {
        if let ParseChild::Rule(child) = child {
            walk(listener, child)?;
        }
    }

    listener.exit_rule(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseEvent {
    Enter(Rule),
    Exit(Rule),
}

/// Records the event sequence a walk would deliver.
#[derive(Default)]
pub struct EventRecorder {
    pub events: Vec<ParseEvent>,
}

impl ParseListener for EventRecorder {
    fn enter_rule(&mut self, node: &ParseNode) -> Result<(), Error> {
        self.events.push(ParseEvent::Enter(node.rule));
        Ok(())
    }

    fn exit_rule(&mut self, node: &ParseNode) -> Result<(), Error> {
        self.events.push(ParseEvent::Exit(node.rule));
        Ok(())
    }
}

pub fn events(tree: &ParseNode) -> Vec<ParseEvent> {
    let mut recorder = EventRecorder::default();
    // The recorder never fails
    let _ = walk(&mut recorder, tree);
    recorder.events
}

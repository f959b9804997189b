use engine::{ClassList, NodeId, Surface};

use crate::config::QuestionConfig;
use crate::rainbow::Rainbow;

const WRONG_CLASS: &str = "forced-wrong";
const HINT_CLASS: &str = "forced-hint";
const HINT_VISIBLE: &str = "visible";

/// Node handles of one on-screen forced question.
///
/// Only one of these may exist at a time; the owner enforces that. Every operation tolerates the
/// nodes having been detached underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedDialog {
    overlay: NodeId,
    dialog: NodeId,
    options: Vec<NodeId>,
    hint: Option<NodeId>,
    hint_text: String,
}

impl ForcedDialog {
    pub fn build<S: Surface>(surface: &mut S, host: NodeId, question: &QuestionConfig) -> Self {
        let overlay = surface.create_node(host, ClassList::from_names(["forced-modal"]));
        let dialog = surface.create_node(overlay, ClassList::from_names(["forced-dialog"]));

        let prompt = surface.create_node(dialog, ClassList::from_names(["forced-question"]));
        Rainbow::QUESTION.write(surface, prompt, &question.prompt);

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let classes =
                    ClassList::from_names(["forced-btn".to_string(), button_class(i)]);
                surface.create_text_node(dialog, classes, &option.label)
            })
            .collect();

        Self {
            overlay,
            dialog,
            options,
            hint: None,
            hint_text: question.hint.clone(),
        }
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn dialog(&self) -> NodeId {
        self.dialog
    }

    pub fn options(&self) -> &[NodeId] {
        &self.options
    }

    /// Index of the option button `node`, if it is one.
    pub fn option_at(&self, node: NodeId) -> Option<usize> {
        self.options.iter().position(|id| *id == node)
    }

    /// Restarts the attention animation even if the previous one is still running.
    pub fn shake<S: Surface>(&self, surface: &mut S) {
        surface.remove_class(self.dialog, WRONG_CLASS);
        surface.restart_animation(self.dialog);
        surface.add_class(self.dialog, WRONG_CLASS);
    }

    pub fn show_hint<S: Surface>(&mut self, surface: &mut S) {
        let hint = match self.hint {
            Some(hint) => hint,
            None => {
                let hint = surface.create_text_node(
                    self.dialog,
                    ClassList::from_names([HINT_CLASS]),
                    &self.hint_text,
                );
                self.hint = Some(hint);
                hint
            }
        };
        surface.remove_class(hint, HINT_VISIBLE);
        surface.restart_animation(hint);
        surface.add_class(hint, HINT_VISIBLE);
    }

    pub fn dismiss<S: Surface>(self, surface: &mut S) {
        if !surface.remove_node(self.overlay) {
            tracing::trace!("forced dialog was already detached");
        }
    }
}

/// `forced-btn-a`, `forced-btn-b`, ... past `z` the index is used.
fn button_class(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("forced-btn-{}", char::from(b'a' + i)),
        None => format!("forced-btn-{index}"),
    }
}

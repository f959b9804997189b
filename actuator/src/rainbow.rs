use std::time::Duration;

use engine::{ClassList, NodeId, Surface};

pub const CHAR_CLASS: &str = "rainbow-char";

/// Per-character gradient text: every character gets its own span whose hue walks around the
/// color wheel, with a staggered animation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rainbow {
    pub hue_step: u32,
    pub hue_spread: u32,
    pub delay_step: Duration,
}

impl Rainbow {
    pub const QUESTION: Rainbow = Rainbow {
        hue_step: 48,
        hue_spread: 90,
        delay_step: Duration::from_millis(45),
    };

    pub const MERGE_MESSAGE: Rainbow = Rainbow {
        hue_step: 35,
        hue_spread: 70,
        delay_step: Duration::from_millis(50),
    };

    pub fn gradient(&self, index: usize) -> String {
        let hue = (index as u64 * self.hue_step as u64 % 360) as u32;
        let end = (hue + self.hue_spread) % 360;
        format!("linear-gradient(90deg, hsl({hue},100%,60%), hsl({end},100%,60%))")
    }

    pub fn delay(&self, index: usize) -> String {
        format!("{}ms", self.delay_step.as_millis() * index as u128)
    }

    /// Appends one span per character of `text` under `parent`.
    pub fn write<S: Surface>(&self, surface: &mut S, parent: NodeId, text: &str) -> Vec<NodeId> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                let mut buf = [0u8; 4];
                let span = surface.create_text_node(
                    parent,
                    ClassList::from_names([CHAR_CLASS]),
                    ch.encode_utf8(&mut buf),
                );
                surface.set_style(span, "display", Some("inline-block"));
                surface.set_style(span, "background", Some(&self.gradient(i)));
                surface.set_style(span, "background-clip", Some("text"));
                surface.set_style(span, "animation-delay", Some(&self.delay(i)));
                span
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use engine::ViewTree;

    use super::*;

    #[test]
    fn hues_wrap_around_the_wheel() {
        let r = Rainbow::MERGE_MESSAGE;
        assert_eq!(
            r.gradient(0),
            "linear-gradient(90deg, hsl(0,100%,60%), hsl(70,100%,60%))"
        );
        // 11 * 35 = 385 -> 25; 25 + 70 = 95
        assert_eq!(
            r.gradient(11),
            "linear-gradient(90deg, hsl(25,100%,60%), hsl(95,100%,60%))"
        );
        // 6 * 48 = 288; 288 + 90 = 378 -> 18
        assert_eq!(
            Rainbow::QUESTION.gradient(6),
            "linear-gradient(90deg, hsl(288,100%,60%), hsl(18,100%,60%))"
        );
    }

    #[test]
    fn write_splits_on_characters_not_bytes() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let spans = Rainbow::QUESTION.write(&mut tree, root, "喷火鱼");

        assert_eq!(spans.len(), 3);
        assert_eq!(tree.text(spans[1]), Some("火"));
        assert_eq!(tree.style(spans[2], "animation-delay"), Some("90ms"));
        assert!(tree.has_class(spans[0], CHAR_CLASS));
    }
}

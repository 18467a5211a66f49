use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Single-line text field with a caret (byte offset into `text`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    caret: usize,
}

impl LineEditor {
    /// Caret goes to the end; focusing a row never selects its text.
    pub fn with_text(text: &str) -> Self {
        LineEditor {
            text: text.to_string(),
            caret: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    /// Insert at the caret. Line breaks become spaces; items are one line.
    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();
        self.text.insert_str(self.caret, &clean);
        self.caret += clean.len();
    }

    /// Apply an editing key. Returns true if the text changed; caret-only
    /// moves return false. Unknown keys are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let m = key.modifiers;
        match key.code {
            KeyCode::Left if m.contains(KeyModifiers::ALT) => {
                self.caret = unicode::word_boundary_left(&self.text, self.caret);
                false
            }
            KeyCode::Right if m.contains(KeyModifiers::ALT) => {
                self.caret = unicode::word_boundary_right(&self.text, self.caret);
                false
            }
            KeyCode::Char('b') if m.contains(KeyModifiers::ALT) => {
                self.caret = unicode::word_boundary_left(&self.text, self.caret);
                false
            }
            KeyCode::Char('f') if m.contains(KeyModifiers::ALT) => {
                self.caret = unicode::word_boundary_right(&self.text, self.caret);
                false
            }
            KeyCode::Left
                if m.contains(KeyModifiers::CONTROL) || m.contains(KeyModifiers::SUPER) =>
            {
                self.caret = 0;
                false
            }
            KeyCode::Right
                if m.contains(KeyModifiers::CONTROL) || m.contains(KeyModifiers::SUPER) =>
            {
                self.caret = self.text.len();
                false
            }
            KeyCode::Left => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.caret) {
                    self.caret = prev;
                }
                false
            }
            KeyCode::Right => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.caret) {
                    self.caret = next;
                }
                false
            }
            KeyCode::Home => {
                self.caret = 0;
                false
            }
            KeyCode::End => {
                self.caret = self.text.len();
                false
            }
            KeyCode::Char('a') if m.contains(KeyModifiers::CONTROL) => {
                self.caret = 0;
                false
            }
            KeyCode::Char('e') if m.contains(KeyModifiers::CONTROL) => {
                self.caret = self.text.len();
                false
            }
            // Kill to start / end of line
            KeyCode::Char('u') if m.contains(KeyModifiers::CONTROL) => {
                self.drain_to(0)
            }
            KeyCode::Char('k') if m.contains(KeyModifiers::CONTROL) => {
                self.drain_to(self.text.len())
            }
            KeyCode::Backspace if m.contains(KeyModifiers::ALT) => {
                self.drain_to(unicode::word_boundary_left(&self.text, self.caret))
            }
            KeyCode::Char('w') if m.contains(KeyModifiers::CONTROL) => {
                self.drain_to(unicode::word_boundary_left(&self.text, self.caret))
            }
            KeyCode::Backspace => match unicode::prev_grapheme_boundary(&self.text, self.caret) {
                Some(prev) => self.drain_to(prev),
                None => false,
            },
            KeyCode::Delete => match unicode::next_grapheme_boundary(&self.text, self.caret) {
                Some(next) => self.drain_to(next),
                None => false,
            },
            KeyCode::Char(c)
                if !m.intersects(
                    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER,
                ) =>
            {
                self.text.insert(self.caret, c);
                self.caret += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Remove the text between the caret and `to`, leaving the caret at the
    /// start of the removed range.
    fn drain_to(&mut self, to: usize) -> bool {
        let (start, end) = if to < self.caret {
            (to, self.caret)
        } else {
            (self.caret, to)
        };
        if start == end {
            return false;
        }
        self.text.drain(start..end);
        self.caret = start;
        true
    }
}

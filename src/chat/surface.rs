//! The editable input area the user types into.
//!
//! Content is a flat list of segments with a caret index between
//! them. Text typed or pasted by the user is kept verbatim and is only
//! sanitized when it leaves the surface.

/// An emoji rendered as an inline image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emoji {
    pub alt: String,
    pub src: String,
}

impl Emoji {
    pub fn new(alt: &str, src: &str) -> Self {
        Self {
            alt: alt.to_string(),
            src: src.to_string(),
        }
    }

    /// Image from the jsDelivr hosted Apple emoji set, named by the
    /// code points of `emoji`.
    pub fn from_char(emoji: &str) -> Self {
        let code = emoji
            .chars()
            .filter(|c| *c != '\u{fe0f}')
            .map(|c| format!("{:x}", c as u32))
            .collect::<Vec<_>>()
            .join("-");
        let src = format!(
            "https://cdn.jsdelivr.net/npm/emoji-datasource-apple/img/apple/64/{}.png",
            code
        );
        Self::new(emoji, &src)
    }

    fn to_html(&self) -> String {
        format!(
            r#"<img alt="{}" src="{}">"#,
            escape_attr(&self.alt),
            escape_attr(&self.src)
        )
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Char(char),
    Emoji(Emoji),
}

/// What a paste event carries. Only the plain text flavor is ever
/// inserted.
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    pub plain: Option<String>,
    pub html: Option<String>,
}

impl Clipboard {
    pub fn plain(text: &str) -> Self {
        Self {
            plain: Some(text.to_string()),
            html: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EditableSurface {
    segments: Vec<Segment>,
    caret: usize,
}

impl EditableSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the caret, counted in segments from the start
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Move the caret, clamped to the content
    pub fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.segments.len());
    }

    pub fn move_caret_to_end(&mut self) {
        self.caret = self.segments.len();
    }

    /// Insert text at the caret and move the caret past it
    pub fn insert_text(&mut self, text: &str) {
        let inserted: Vec<Segment> = text.chars().map(Segment::Char).collect();
        let count = inserted.len();
        self.segments.splice(self.caret..self.caret, inserted);
        self.caret += count;
    }

    /// Paste only the plain text flavor. Rich content is dropped so no
    /// markup from another page can sneak into the surface.
    pub fn paste(&mut self, clipboard: &Clipboard) {
        if let Some(text) = &clipboard.plain {
            self.insert_text(text);
        }
    }

    /// Insert an emoji image followed by a space with the caret placed
    /// right after the space
    pub fn insert_emoji(&mut self, emoji: Emoji) {
        self.segments.splice(
            self.caret..self.caret,
            [Segment::Emoji(emoji), Segment::Char(' ')],
        );
        self.caret += 2;
    }

    /// Visible text, with emoji contributing their alt text
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Char(c) => c.to_string(),
                Segment::Emoji(emoji) => emoji.alt.clone(),
            })
            .collect()
    }

    /// Raw content as markup. Typed text is passed through untouched.
    pub fn content_html(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Char(c) => c.to_string(),
                Segment::Emoji(emoji) => emoji.to_html(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.caret = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_text_at_caret() {
        let mut surface = EditableSurface::new();
        surface.insert_text("held");
        surface.set_caret(3);
        surface.insert_text("lo wor");
        assert_eq!(surface.text(), "hello world");
        assert_eq!(surface.caret(), 9);
    }

    #[test]
    fn test_paste_ignores_html() {
        let mut surface = EditableSurface::new();
        surface.paste(&Clipboard {
            plain: Some("safe text".to_string()),
            html: Some(r#"<img src=x onerror="alert(1)">"#.to_string()),
        });
        assert_eq!(surface.content_html(), "safe text");
    }

    #[test]
    fn test_paste_html_only_inserts_nothing() {
        let mut surface = EditableSurface::new();
        surface.paste(&Clipboard {
            plain: None,
            html: Some("<b>rich</b>".to_string()),
        });
        assert!(surface.is_empty());
        assert_eq!(surface.caret(), 0);
    }

    #[test]
    fn test_insert_emoji_moves_caret_past_space() {
        let mut surface = EditableSurface::new();
        surface.insert_text("hi!");
        surface.set_caret(2);
        surface.insert_emoji(Emoji::new("😀", "https://example.com/1f600.png"));
        assert_eq!(surface.caret(), 4);
        assert_eq!(surface.text(), "hi😀 !");

        surface.insert_text("x");
        assert_eq!(surface.text(), "hi😀 x!");
    }

    #[test]
    fn test_emoji_html() {
        let mut surface = EditableSurface::new();
        surface.insert_emoji(Emoji::from_char("😀"));
        assert_eq!(
            surface.content_html(),
            r#"<img alt="😀" src="https://cdn.jsdelivr.net/npm/emoji-datasource-apple/img/apple/64/1f600.png"> "#
        );
    }

    #[test]
    fn test_set_caret_is_clamped() {
        let mut surface = EditableSurface::new();
        surface.insert_text("abc");
        surface.set_caret(100);
        assert_eq!(surface.caret(), 3);
    }

    #[test]
    fn test_clear() {
        let mut surface = EditableSurface::new();
        surface.insert_text("abc");
        surface.clear();
        assert!(surface.is_empty());
        assert_eq!(surface.caret(), 0);
        assert_eq!(surface.text(), "");
    }
}

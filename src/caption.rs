//! Caption Hashtags
//!
//! Splits generated captions into plain text and `#tag` runs so they can be
//! highlighted, either as inline markup or as styled terminal spans.
//!
//! A tag starts at `#` and runs until whitespace or `»`. The terminator is
//! not part of the tag; it begins the following text segment. A tag still
//! open at the end of the caption is closed there.

/// Closing delimiter used by the caption generator besides whitespace.
pub const TAG_DELIMITER: char = '»';

pub const TAG_OPEN: &str = "<span class=\"hashtag\">";
pub const TAG_CLOSE: &str = "</span>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Tag(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::Tag(s) => s,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsideTag,
}

fn ends_tag(c: char) -> bool {
    c.is_whitespace() || c == TAG_DELIMITER
}

/// Scan `caption` into alternating text and tag segments.
pub fn segments(caption: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Outside;

    for c in caption.chars() {
        match state {
            ScanState::Outside if c == '#' => {
                if !current.is_empty() {
                    out.push(Segment::Text(std::mem::take(&mut current)));
                }
                current.push(c);
                state = ScanState::InsideTag;
            }
            ScanState::InsideTag if ends_tag(c) => {
                out.push(Segment::Tag(std::mem::take(&mut current)));
                current.push(c);
                state = ScanState::Outside;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        out.push(match state {
            ScanState::Outside => Segment::Text(current),
            ScanState::InsideTag => Segment::Tag(current),
        });
    }
    out
}

/// Wrap every hashtag in `caption` with [`TAG_OPEN`] / [`TAG_CLOSE`].
///
/// Captions without `#` come back unchanged. Nothing is escaped.
pub fn render_markup(caption: &str) -> String {
    let mut out = String::with_capacity(caption.len());
    for segment in segments(caption) {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Tag(tag) => {
                out.push_str(TAG_OPEN);
                out.push_str(&tag);
                out.push_str(TAG_CLOSE);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Segment {
        Segment::Tag(s.to_string())
    }

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn test_no_hashtags_is_identity() {
        for caption in ["", "a cat on a sofa", "price: 5 » 4", "<b>bold</b>"] {
            assert_eq!(render_markup(caption), caption);
        }
    }

    #[test]
    fn test_space_and_delimiter_terminate_tags() {
        assert_eq!(
            segments("#hello world #foo»bar"),
            vec![tag("#hello"), text(" world "), tag("#foo"), text("»bar")]
        );
        assert_eq!(
            render_markup("#hello world #foo»bar"),
            "<span class=\"hashtag\">#hello</span> world <span class=\"hashtag\">#foo</span>»bar"
        );
    }

    #[test]
    fn test_unterminated_tag_is_closed() {
        assert_eq!(segments("sunset #beach"), vec![text("sunset "), tag("#beach")]);
        let markup = render_markup("sunset #beach");
        assert!(markup.ends_with(TAG_CLOSE));
        assert_eq!(markup.matches(TAG_OPEN).count(), markup.matches(TAG_CLOSE).count());
    }

    #[test]
    fn test_hash_inside_tag_stays_in_tag() {
        assert_eq!(segments("#a#b c"), vec![tag("#a#b"), text(" c")]);
    }

    #[test]
    fn test_lone_hash() {
        assert_eq!(segments("# x"), vec![tag("#"), text(" x")]);
    }

    #[test]
    fn test_segments_concatenate_to_input() {
        let caption = "dogs #play\nin the #park»today #";
        let joined: String = segments(caption).iter().map(Segment::as_str).collect();
        assert_eq!(joined, caption);
    }
}

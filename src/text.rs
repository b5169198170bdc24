use std::ops::Range;
use web_sys::HtmlTextAreaElement;

/// What the shell needs from a text editing component.
/// Ranges are byte offsets into [`TextBuffer::value`].
pub trait TextBuffer {
    fn set_value(&mut self, text: &str);
    fn value(&self) -> String;
    fn focus(&self);
    fn select(&mut self, range: Range<usize>);

    fn find(&mut self, query: &str, whole_word: bool, select_first: bool) -> Option<Range<usize>> {
        let found = find_text(&self.value(), query, whole_word)?;
        if select_first {
            self.select(found.clone());
        }
        Some(found)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

pub fn find_text(haystack: &str, query: &str, whole_word: bool) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }
    haystack
        .match_indices(query)
        .map(|(start, m)| start..start + m.len())
        .find(|r| {
            !whole_word
                || (!haystack[..r.start].chars().next_back().is_some_and(is_word_char)
                    && !haystack[r.end..].chars().next().is_some_and(is_word_char))
        })
}

/// Select and focus the source text of room `id`. Tries the `id:` key in
/// its plain and quoted forms before falling back to the bare id.
pub fn jump_to_room(buffer: &mut impl TextBuffer, id: &str) -> Option<Range<usize>> {
    let queries = [
        format!("id: {id}"),
        format!("id: \"{id}\""),
        format!("id: '{id}'"),
        id.to_string(),
    ];
    let found = queries.iter().find_map(|q| buffer.find(q, true, true))?;
    buffer.focus();
    Some(found)
}

const LINE_HEIGHT_PX: i32 = 18;

pub struct TextArea {
    element: HtmlTextAreaElement,
}

impl TextArea {
    pub fn new(element: HtmlTextAreaElement) -> Self {
        Self { element }
    }
}

fn utf16_offset(text: &str, byte: usize) -> u32 {
    text[..byte].encode_utf16().count() as u32
}

impl TextBuffer for TextArea {
    fn set_value(&mut self, text: &str) {
        self.element.set_value(text);
    }

    fn value(&self) -> String {
        self.element.value()
    }

    fn focus(&self) {
        let _ = self.element.focus();
    }

    fn select(&mut self, range: Range<usize>) {
        let text = self.element.value();
        let (start, end) = (utf16_offset(&text, range.start), utf16_offset(&text, range.end));
        if self.element.set_selection_range(start, end).is_err() {
            log::debug!("selection {start}..{end} rejected");
        }
        // textarea does not scroll to a programmatic selection on its own
        let line = text[..range.start].matches('\n').count() as i32;
        let top = line * LINE_HEIGHT_PX - self.element.client_height() / 2;
        self.element.set_scroll_top(top.max(0));
    }
}

//! Header search field.
//!
//! Collapsed until focused. Submitting hands the raw query to an injected
//! callback; what the callback does is up to the owner.

use crate::input::LineInput;

pub type SearchCallback = Box<dyn FnMut(&str)>;

pub struct SearchBar {
    expanded: bool,
    focused: bool,
    input: LineInput,
    placeholder: String,
    on_search: SearchCallback,
}

impl SearchBar {
    pub fn new(placeholder: impl Into<String>, on_search: SearchCallback) -> Self {
        Self {
            expanded: false,
            focused: false,
            input: LineInput::default(),
            placeholder: placeholder.into(),
            on_search,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn input(&self) -> &LineInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut LineInput {
        &mut self.input
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Dropdown hint is shown while expanded with any text.
    pub fn shows_dropdown(&self) -> bool {
        self.expanded && !self.input.text().is_empty()
    }

    /// Focus (or icon click) expands the field.
    pub fn focus(&mut self) {
        self.expanded = true;
        self.focused = true;
    }

    /// Blur from an outside click. The query text is kept.
    pub fn blur(&mut self) {
        self.expanded = false;
        self.focused = false;
    }

    /// Route a click. Clicks inside the field never collapse it.
    pub fn click(&mut self, inside: bool) {
        if inside {
            self.focus();
        } else if self.expanded || self.focused {
            self.blur();
        }
    }

    /// Clear the text and refocus the field.
    pub fn clear(&mut self) {
        self.input.clear();
        self.focus();
    }

    /// Emit the raw query if its trimmed form is non-empty.
    pub fn submit(&mut self) -> bool {
        if self.input.is_blank() {
            return false;
        }
        (self.on_search)(self.input.text());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_bar() -> (SearchBar, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let bar = SearchBar::new(
            "Search...",
            Box::new(move |q: &str| sink.borrow_mut().push(q.to_string())),
        );
        (bar, seen)
    }

    fn type_into(bar: &mut SearchBar, s: &str) {
        for c in s.chars() {
            bar.input_mut().insert(c);
        }
    }

    #[test]
    fn test_starts_collapsed() {
        let (bar, _) = recording_bar();
        assert!(!bar.is_expanded());
        assert!(!bar.is_focused());
        assert!(!bar.shows_dropdown());
    }

    #[test]
    fn test_submit_passes_raw_query() {
        let (mut bar, seen) = recording_bar();
        bar.focus();
        type_into(&mut bar, "  etl jobs ");
        assert!(bar.submit());
        assert_eq!(seen.borrow().as_slice(), ["  etl jobs ".to_string()]);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let (mut bar, seen) = recording_bar();
        bar.focus();
        type_into(&mut bar, " \t ");
        assert!(!bar.submit());
        assert!(seen.borrow().is_empty());
        assert_eq!(bar.input().text(), " \t ");
        assert!(bar.is_expanded());
    }

    #[test]
    fn test_inside_click_keeps_expanded() {
        let (mut bar, seen) = recording_bar();
        bar.click(true);
        type_into(&mut bar, "api");
        bar.click(true);
        assert!(bar.is_expanded());
        assert!(bar.shows_dropdown());
        assert!(seen.borrow().is_empty());

        bar.click(false);
        assert!(!bar.is_expanded());
        assert!(!bar.is_focused());
        assert_eq!(bar.input().text(), "api");
    }

    #[test]
    fn test_clear_refocuses() {
        let (mut bar, _) = recording_bar();
        bar.focus();
        type_into(&mut bar, "services");
        bar.blur();
        bar.clear();
        assert_eq!(bar.input().text(), "");
        assert!(bar.is_focused());
        assert!(bar.is_expanded());
    }
}

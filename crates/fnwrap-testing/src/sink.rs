use fnwrap_core::Sink;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every diagnostic line for later assertion.
#[derive(Default)]
pub struct Capture {
    lines: RefCell<Vec<String>>,
}

impl Capture {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Lines captured so far, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Captured lines joined with newlines, for snapshot assertions.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Sink for Capture {
    fn line(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

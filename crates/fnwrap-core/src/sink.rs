use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Destination for diagnostic lines: call counts, cache notices, trace
/// output. Diagnostics are side output, never part of a call's result.
pub trait Sink {
    fn line(&self, text: &str);
}

/// Default sink: one line to standard output per diagnostic.
pub struct Stdout;

impl Sink for Stdout {
    fn line(&self, text: &str) {
        println!("{}", text);
    }
}

/// Sink over any writer. Write failures are ignored.
pub struct Writer<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Consume the sink and hand back the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Sink for Writer<W> {
    fn line(&self, text: &str) {
        let _ = writeln!(self.out.borrow_mut(), "{}", text);
    }
}

/// The default sink shared by wrapper constructors.
pub fn stdout() -> Rc<dyn Sink> {
    Rc::new(Stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_collects_lines() {
        let sink = Writer::new(Vec::new());
        sink.line("first");
        sink.line("second");

        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        assert_eq!(out, "first\nsecond\n");
    }
}

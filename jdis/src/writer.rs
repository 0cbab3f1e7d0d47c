//! Line buffered text output with indentation and a comment column.
//!
//! The writer is the only place layout lives: the renderer says what goes on a line,
//! the writer decides where. Lines are right trimmed when finished, so padding that
//! ends up with nothing after it never leaves trailing spaces in the output.

/// Builds the output text line by line.
///
/// The indent depth is explicit state on the writer, changed with [`indent`][TextWriter::indent]
/// and [`dedent`][TextWriter::dedent]; there is no shared or global indentation anywhere else.
pub struct TextWriter {
	out: String,
	line: String,
	depth: usize,
	indent_width: usize,
	comment_column: usize,
}

impl TextWriter {
	pub fn new(indent_width: usize, comment_column: usize) -> TextWriter {
		TextWriter {
			out: String::new(),
			line: String::new(),
			depth: 0,
			indent_width,
			comment_column,
		}
	}

	pub fn indent(&mut self) {
		self.depth += 1;
	}

	pub fn dedent(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}

	/// Appends to the current line, writing the indent first if the line is still empty.
	pub fn push(&mut self, text: &str) {
		if self.line.is_empty() && !text.is_empty() {
			for _ in 0..(self.depth * self.indent_width) {
				self.line.push(' ');
			}
		}
		self.line.push_str(text);
	}

	/// Pads the current line up to the comment column, with at least one space in
	/// between when the line already reaches past it.
	pub fn pad_to_comment_column(&mut self) {
		while self.line.chars().count() < self.comment_column {
			self.line.push(' ');
		}
		if !self.line.ends_with(' ') {
			self.line.push(' ');
		}
	}

	/// Finishes the current line: trims trailing whitespace and starts a new one.
	pub fn newline(&mut self) {
		self.out.push_str(self.line.trim_end());
		self.out.push('\n');
		self.line.clear();
	}

	/// Writes one whole line.
	pub fn line(&mut self, text: &str) {
		self.push(text);
		self.newline();
	}

	/// Writes one whole line with a `// comment` at the comment column.
	pub fn line_with_comment(&mut self, text: &str, comment: &str) {
		self.push(text);
		self.pad_to_comment_column();
		self.push("// ");
		self.push(comment);
		self.newline();
	}

	pub fn blank(&mut self) {
		self.out.push('\n');
	}

	pub fn finish(mut self) -> String {
		if !self.line.is_empty() {
			self.newline();
		}
		self.out
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	#[test]
	fn indentation_applies_per_line() {
		let mut w = TextWriter::new(2, 40);

		w.line("a {");
		w.indent();
		w.push("b");
		w.push(" = 1;");
		w.newline();
		w.indent();
		w.line("c");
		w.dedent();
		w.dedent();
		w.line("}");

		assert_eq!(w.finish(), "a {\n  b = 1;\n    c\n}\n");
	}

	#[test]
	fn comments_align_at_the_comment_column() {
		let mut w = TextWriter::new(2, 10);

		w.line_with_comment("short", "one");
		w.line_with_comment("quite a bit longer", "two");

		assert_eq!(w.finish(), "short     // one\nquite a bit longer // two\n");
	}

	#[test]
	fn finished_lines_are_right_trimmed() {
		let mut w = TextWriter::new(2, 40);

		w.push("text");
		w.pad_to_comment_column();
		w.newline();

		assert_eq!(w.finish(), "text\n");
	}

	#[test]
	fn dedent_at_depth_zero_stays_at_zero() {
		let mut w = TextWriter::new(4, 40);

		w.dedent();
		w.line("still flush left");

		assert_eq!(w.finish(), "still flush left\n");
	}
}

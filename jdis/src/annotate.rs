//! Side notes interleaved with the instruction stream.
//!
//! Every enabled detail kind gets its own [`Annotator`], built fresh per code
//! attribute. An annotator is a map from bytecode offset to prepared note lines;
//! the renderer asks for [`notes_before`][Annotator::notes_before] and
//! [`notes_after`][Annotator::notes_after] at every instruction and
//! [`flush`][Annotator::flush]es at the end for ranges that close exactly at the
//! code length, one past the last valid offset.
//!
//! Notes at the same offset come out in the order of the table they were built
//! from. That's the whole ordering contract; nothing re-sorts them.

use indexmap::IndexMap;
use jclass::class_constants::type_annotation;
use jclass::frame::{Frame, VerificationType};
use jclass::tree::annotation::{TargetInfo, TypeAnnotation};
use jclass::tree::attribute::{LineNumber, LocalVariable};
use jclass::tree::method::code::ExceptionTableEntry;
use java_string::JavaStr;
use crate::pool_display::{escape_name, java_descriptor, java_name, PoolDisplay};

/// Prepared notes for one detail kind, keyed by bytecode offset.
#[derive(Debug, Default)]
pub struct Annotator {
	before: IndexMap<u32, Vec<String>>,
	after: IndexMap<u32, Vec<String>>,
}

impl Annotator {
	fn note_before(&mut self, pc: u32, note: String) {
		self.before.entry(pc).or_default().push(note);
	}

	fn note_after(&mut self, pc: u32, note: String) {
		self.after.entry(pc).or_default().push(note);
	}

	/// The notes to print before the instruction at `pc`.
	pub fn notes_before(&self, pc: u32) -> &[String] {
		self.before.get(&pc).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The notes to print after the instruction at `pc`.
	pub fn notes_after(&self, pc: u32) -> &[String] {
		self.after.get(&pc).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The notes whose ranges close exactly at the end of the code array.
	pub fn flush(&self, code_length: u32) -> &[String] {
		self.notes_before(code_length)
	}

	/// `line <n>` where a line number table row starts.
	pub fn lines(table: &[LineNumber]) -> Annotator {
		let mut annotator = Annotator::default();
		for row in table {
			annotator.note_before(row.start_pc as u32, format!("line {}", row.line_number));
		}
		annotator
	}

	/// `start local` and `end local` notes from a `LocalVariableTable`, or the
	/// `generic` flavor from a `LocalVariableTypeTable` (where the descriptor
	/// column holds a field signature instead).
	pub fn local_variables(table: &[LocalVariable], generic: bool, pd: &mut PoolDisplay) -> Annotator {
		let mut annotator = Annotator::default();
		for row in table {
			let name = pd.utf8(row.name_index);
			let described = if generic {
				format!("generic local {} // {} {name}", row.index, java_signature(&pd.utf8_raw(row.descriptor_index)))
			} else {
				format!("local {} // {} {name}", row.index, java_descriptor(&pd.utf8_raw(row.descriptor_index)))
			};
			annotator.note_before(row.start_pc as u32, format!("start {described}"));
			annotator.note_before(row.start_pc as u32 + row.length as u32, format!("end {described}"));
		}
		annotator
	}

	/// `try[i] start`, `try[i] end` and `catch[i] <type>` notes from the
	/// exception table, numbered by table position.
	pub fn try_blocks(table: &[ExceptionTableEntry], pd: &mut PoolDisplay) -> Annotator {
		let mut annotator = Annotator::default();
		for (i, entry) in table.iter().enumerate() {
			annotator.note_before(entry.start_pc as u32, format!("try[{i}] start"));
			annotator.note_before(entry.end_pc as u32, format!("try[{i}] end"));

			let catch_type = if entry.catch_type == 0 {
				"any".to_owned()
			} else {
				pd.java_class_name(entry.catch_type)
			};
			annotator.note_before(entry.handler_pc as u32, format!("catch[{i}] {catch_type}"));
		}
		annotator
	}

	/// The reconstructed locals and stack at every recorded offset, plus the
	/// implicit frame printed before the first instruction.
	pub fn stack_maps(initial: Option<&Frame>, frames: &IndexMap<u16, Frame>, pd: &mut PoolDisplay) -> Annotator {
		let mut annotator = Annotator::default();
		if let Some(initial) = initial {
			annotator.note_before(0, format!("StackMap locals: {}", verification_types(&initial.locals, pd)));
		}
		for (&pc, frame) in frames {
			annotator.note_before(pc as u32, format!("StackMap locals: {}", verification_types(&frame.locals, pd)));
			annotator.note_before(pc as u32, format!("StackMap stack: {}", verification_types(&frame.stack, pd)));
		}
		annotator
	}

	/// `@<type>: <target>` notes for type annotations that target a bytecode
	/// offset, directly or through a local variable range.
	pub fn type_annotations<'a>(annotations: impl Iterator<Item = &'a TypeAnnotation>, pd: &mut PoolDisplay) -> Annotator {
		let mut annotator = Annotator::default();
		for annotation in annotations {
			let Some(target) = offset_target_name(annotation.target_type) else {
				continue;
			};
			let annotation_type = java_descriptor(&pd.utf8_raw(annotation.annotation.type_index));
			let note = format!("@{annotation_type}: {target}");

			match &annotation.target_info {
				TargetInfo::Offset { offset } |
				TargetInfo::TypeArgument { offset, .. } => {
					annotator.note_after(*offset as u32, note);
				},
				TargetInfo::Localvar { table } => {
					for entry in table {
						annotator.note_before(entry.start_pc as u32, note.clone());
					}
				},
				_ => {},
			}
		}
		annotator
	}
}

/// Renders a field signature as java, falling back to the quoted raw text.
fn java_signature(text: &JavaStr) -> String {
	match crate::signature::parse_field_signature(text) {
		Ok(parsed) => parsed.java(),
		Err(_) => escape_name(text),
	}
}

fn verification_types(types: &[VerificationType], pd: &mut PoolDisplay) -> String {
	let mut out = String::from("[");
	for (i, ty) in types.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		out.push_str(&verification_type(ty, pd));
	}
	out.push(']');
	out
}

fn verification_type(ty: &VerificationType, pd: &mut PoolDisplay) -> String {
	match ty {
		VerificationType::Top => "top".to_owned(),
		VerificationType::Integer => "int".to_owned(),
		VerificationType::Float => "float".to_owned(),
		VerificationType::Long => "long".to_owned(),
		VerificationType::Double => "double".to_owned(),
		VerificationType::Null => "null".to_owned(),
		VerificationType::UninitializedThis => "uninitialized_this".to_owned(),
		VerificationType::Object { class_index } => format!("class {}", pd.class_name(*class_index)),
		VerificationType::NamedObject { name } => format!("class {}", java_name(name)),
		VerificationType::Uninitialized { offset } => format!("uninitialized {offset}"),
	}
}

/// The display name of a target type that pins a bytecode offset; `None` for the
/// declaration targets, which are rendered with their member, not inside code.
fn offset_target_name(target_type: u8) -> Option<&'static str> {
	Some(match target_type {
		type_annotation::INSTANCE_OF => "instanceof",
		type_annotation::NEW => "new",
		type_annotation::CONSTRUCTOR_REFERENCE => "constructor reference",
		type_annotation::METHOD_REFERENCE => "method reference",
		type_annotation::CAST => "cast",
		type_annotation::CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT => "constructor invocation type argument",
		type_annotation::METHOD_INVOCATION_TYPE_ARGUMENT => "method invocation type argument",
		type_annotation::CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT => "constructor reference type argument",
		type_annotation::METHOD_REFERENCE_TYPE_ARGUMENT => "method reference type argument",
		type_annotation::LOCAL_VARIABLE => "local variable",
		type_annotation::RESOURCE_VARIABLE => "resource variable",
		_ => return None,
	})
}

#[cfg(test)]
mod testing {
	use std::io::Cursor;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use jclass::class_constants::pool;
	use jclass::Pool;
	use super::*;

	fn utf8_pool(strings: &[&str]) -> Result<Pool> {
		let mut bytes: Vec<u8> = Vec::new();
		bytes.extend((strings.len() as u16 + 1).to_be_bytes());
		for string in strings {
			bytes.push(pool::UTF8);
			bytes.extend((string.len() as u16).to_be_bytes());
			bytes.extend(string.as_bytes());
		}
		Pool::read(&mut Cursor::new(bytes))
	}

	#[test]
	fn line_notes_sit_at_their_start_pc() {
		let annotator = Annotator::lines(&[
			LineNumber { start_pc: 0, line_number: 4 },
			LineNumber { start_pc: 5, line_number: 5 },
			LineNumber { start_pc: 5, line_number: 6 },
		]);

		assert_eq!(annotator.notes_before(0), ["line 4"]);
		assert_eq!(annotator.notes_before(5), ["line 5", "line 6"]);
		assert_eq!(annotator.notes_before(3), [] as [&str; 0]);
	}

	#[test]
	fn local_variable_ranges_open_and_close() -> Result<()> {
		let pool = utf8_pool(&["i", "I"])?;
		let mut pd = PoolDisplay::new(&pool, 0, true);

		let annotator = Annotator::local_variables(&[
			LocalVariable { start_pc: 2, length: 6, name_index: 1, descriptor_index: 2, index: 1 },
		], false, &mut pd);

		assert_eq!(annotator.notes_before(2), ["start local 1 // int i"]);
		assert_eq!(annotator.notes_before(8), ["end local 1 // int i"]);
		assert_eq!(pd.into_faults(), Vec::new());

		Ok(())
	}

	#[test]
	fn ranges_ending_at_the_code_length_flush() -> Result<()> {
		let pool = utf8_pool(&["x", "J"])?;
		let mut pd = PoolDisplay::new(&pool, 0, true);

		let annotator = Annotator::local_variables(&[
			LocalVariable { start_pc: 0, length: 10, name_index: 1, descriptor_index: 2, index: 0 },
		], false, &mut pd);

		assert_eq!(annotator.flush(10), ["end local 0 // long x"]);

		Ok(())
	}

	#[test]
	fn try_notes_number_by_table_position() -> Result<()> {
		let pool = utf8_pool(&[])?;
		let mut pd = PoolDisplay::new(&pool, 0, true);

		let annotator = Annotator::try_blocks(&[
			ExceptionTableEntry { start_pc: 0, end_pc: 4, handler_pc: 7, catch_type: 0 },
			ExceptionTableEntry { start_pc: 0, end_pc: 4, handler_pc: 12, catch_type: 9 },
		], &mut pd);

		assert_eq!(annotator.notes_before(0), ["try[0] start", "try[1] start"]);
		assert_eq!(annotator.notes_before(4), ["try[0] end", "try[1] end"]);
		assert_eq!(annotator.notes_before(7), ["catch[0] any"]);
		assert_eq!(annotator.notes_before(12), ["catch[1] #9"]);
		assert_eq!(pd.into_faults().len(), 1);

		Ok(())
	}

	#[test]
	fn stack_map_notes_render_both_lists() -> Result<()> {
		let pool = utf8_pool(&[])?;
		let mut pd = PoolDisplay::new(&pool, 0, true);

		let initial = Frame {
			locals: vec![VerificationType::Integer],
			stack: Vec::new(),
		};
		let mut frames = IndexMap::new();
		frames.insert(8u16, Frame {
			locals: vec![VerificationType::Integer, VerificationType::Long],
			stack: vec![VerificationType::Null],
		});

		let annotator = Annotator::stack_maps(Some(&initial), &frames, &mut pd);

		assert_eq!(annotator.notes_before(0), ["StackMap locals: [int]"]);
		assert_eq!(annotator.notes_before(8), [
			"StackMap locals: [int, long]",
			"StackMap stack: [null]",
		]);

		Ok(())
	}
}

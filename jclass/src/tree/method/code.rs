use crate::tree::attribute::Attribute;

/// The `Code` attribute of a method.
///
/// The bytecode stays as raw bytes; decode it with
/// [`InsnReader`][crate::bytecode::InsnReader], which can run over it any
/// number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
	pub max_stack: u16,
	pub max_locals: u16,
	pub bytecode: Vec<u8>,
	pub exception_table: Vec<ExceptionTableEntry>,
	pub attributes: Vec<Attribute>,
}

/// One exception handler: active on `start_pc..end_pc`, jumping to `handler_pc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionTableEntry {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	/// A `Class` pool index naming the caught class, or zero to catch everything.
	pub catch_type: u16,
}

pub mod code;

use std::fmt::{Debug, Formatter};
use crate::tree::attribute::Attribute;

/// A method of a class, with name and descriptor kept as constant pool indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<Attribute>,
}

impl Method {
	pub fn access(&self) -> MethodAccess {
		MethodAccess::from(self.access_flags)
	}
}

/// The access flags of a method, parsed into its named bits.
#[derive(Copy, Clone, PartialEq)]
pub struct MethodAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_synchronized: bool,
	pub is_bridge: bool,
	pub is_varargs: bool,
	pub is_native: bool,
	pub is_abstract: bool,
	pub is_strict: bool,
	pub is_synthetic: bool,
}

impl Debug for MethodAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("MethodAccess { ")?;
		if self.is_public       { f.write_str("public ")?; }
		if self.is_private      { f.write_str("private ")?; }
		if self.is_protected    { f.write_str("protected ")?; }
		if self.is_static       { f.write_str("static ")?; }
		if self.is_final        { f.write_str("final ")?; }
		if self.is_synchronized { f.write_str("synchronized ")?; }
		if self.is_bridge       { f.write_str("bridge ")?; }
		if self.is_varargs      { f.write_str("varargs ")?; }
		if self.is_native       { f.write_str("native ")?; }
		if self.is_abstract     { f.write_str("abstract ")?; }
		if self.is_strict       { f.write_str("strict ")?; }
		if self.is_synthetic    { f.write_str("synthetic ")?; }
		f.write_str("}")
	}
}

impl From<u16> for MethodAccess {
	fn from(value: u16) -> Self {
		MethodAccess {
			is_public:       value & 0x0001 != 0,
			is_private:      value & 0x0002 != 0,
			is_protected:    value & 0x0004 != 0,
			is_static:       value & 0x0008 != 0,
			is_final:        value & 0x0010 != 0,
			is_synchronized: value & 0x0020 != 0,
			is_bridge:       value & 0x0040 != 0,
			is_varargs:      value & 0x0080 != 0,
			is_native:       value & 0x0100 != 0,
			is_abstract:     value & 0x0400 != 0,
			is_strict:       value & 0x0800 != 0,
			is_synthetic:    value & 0x1000 != 0,
		}
	}
}

/// The access flags of an entry of the `MethodParameters` attribute.
#[derive(Copy, Clone, PartialEq)]
pub struct ParameterAccess {
	pub is_final: bool,
	pub is_synthetic: bool,
	pub is_mandated: bool,
}

impl Debug for ParameterAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ParameterAccess { ")?;
		if self.is_final     { f.write_str("final ")?; }
		if self.is_synthetic { f.write_str("synthetic ")?; }
		if self.is_mandated  { f.write_str("mandated ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ParameterAccess {
	fn from(value: u16) -> Self {
		ParameterAccess {
			is_final:     value & 0x0010 != 0,
			is_synthetic: value & 0x1000 != 0,
			is_mandated:  value & 0x8000 != 0,
		}
	}
}

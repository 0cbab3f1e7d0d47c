use std::fmt::{Debug, Formatter};
use crate::tree::attribute::Attribute;

/// A field of a class, with name and descriptor kept as constant pool indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<Attribute>,
}

impl Field {
	pub fn access(&self) -> FieldAccess {
		FieldAccess::from(self.access_flags)
	}
}

/// The access flags of a field, parsed into its named bits.
#[derive(Copy, Clone, PartialEq)]
pub struct FieldAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_volatile: bool,
	pub is_transient: bool,
	pub is_synthetic: bool,
	pub is_enum: bool,
}

impl Debug for FieldAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("FieldAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_private    { f.write_str("private ")?; }
		if self.is_protected  { f.write_str("protected ")?; }
		if self.is_static     { f.write_str("static ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_volatile   { f.write_str("volatile ")?; }
		if self.is_transient  { f.write_str("transient ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

impl From<u16> for FieldAccess {
	fn from(value: u16) -> Self {
		FieldAccess {
			is_public:    value & 0x0001 != 0,
			is_private:   value & 0x0002 != 0,
			is_protected: value & 0x0004 != 0,
			is_static:    value & 0x0008 != 0,
			is_final:     value & 0x0010 != 0,
			is_volatile:  value & 0x0040 != 0,
			is_transient: value & 0x0080 != 0,
			is_synthetic: value & 0x1000 != 0,
			is_enum:      value & 0x4000 != 0,
		}
	}
}

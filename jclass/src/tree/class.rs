use std::fmt::{Debug, Formatter};
use crate::class_reader::Fault;
use crate::class_reader::pool::Pool;
use crate::tree::attribute::Attribute;
use crate::tree::field::Field;
use crate::tree::method::Method;
use crate::tree::version::Version;

/// A decoded class file.
///
/// The `this_class`, `super_class` and interface entries are constant pool indices, like in the
/// stored format; so are the names and descriptors inside [`Field`], [`Method`] and the
/// attributes. Use [`pool`][ClassFile::pool] to resolve them.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub version: Version,
	pub pool: Pool,
	pub access_flags: u16,
	pub this_class: u16,
	/// Zero for `java/lang/Object` and for module-info class files.
	pub super_class: u16,
	pub interfaces: Vec<u16>,
	pub fields: Vec<Field>,
	pub methods: Vec<Method>,
	pub attributes: Vec<Attribute>,
	/// The faults collected while decoding, in the order they were found.
	pub faults: Vec<Fault>,
}

impl ClassFile {
	pub fn access(&self) -> ClassAccess {
		ClassAccess::from(self.access_flags)
	}
}

/// The access flags of a class, parsed into its named bits.
#[derive(Copy, Clone, PartialEq)]
pub struct ClassAccess {
	pub is_public: bool,
	pub is_final: bool,
	pub is_super: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
	pub is_module: bool,
}

impl Debug for ClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_super      { f.write_str("super ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		if self.is_module     { f.write_str("module ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ClassAccess {
	fn from(value: u16) -> Self {
		ClassAccess {
			is_public:     value & 0x0001 != 0,
			is_final:      value & 0x0010 != 0,
			is_super:      value & 0x0020 != 0,
			is_interface:  value & 0x0200 != 0,
			is_abstract:   value & 0x0400 != 0,
			is_synthetic:  value & 0x1000 != 0,
			is_annotation: value & 0x2000 != 0,
			is_enum:       value & 0x4000 != 0,
			is_module:     value & 0x8000 != 0,
		}
	}
}

/// The access flags of an entry of the `InnerClasses` attribute.
#[derive(Copy, Clone, PartialEq)]
pub struct InnerClassAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
}

impl Debug for InnerClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("InnerClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_private    { f.write_str("private ")?; }
		if self.is_protected  { f.write_str("protected ")?; }
		if self.is_static     { f.write_str("static ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

impl From<u16> for InnerClassAccess {
	fn from(value: u16) -> Self {
		InnerClassAccess {
			is_public:     value & 0x0001 != 0,
			is_private:    value & 0x0002 != 0,
			is_protected:  value & 0x0004 != 0,
			is_static:     value & 0x0008 != 0,
			is_final:      value & 0x0010 != 0,
			is_interface:  value & 0x0200 != 0,
			is_abstract:   value & 0x0400 != 0,
			is_synthetic:  value & 0x1000 != 0,
			is_annotation: value & 0x2000 != 0,
			is_enum:       value & 0x4000 != 0,
		}
	}
}

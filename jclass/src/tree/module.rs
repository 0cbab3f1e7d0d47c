use std::fmt::{Debug, Formatter};

/// The payload of the `Module` attribute of a `module-info` class file.
///
/// All `*_index` fields are constant pool indices. `module_version_index` and the
/// `requires_version_index` fields are zero when no version is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
	pub module_name_index: u16,
	pub module_flags: u16,
	pub module_version_index: u16,
	pub requires: Vec<ModuleRequires>,
	pub exports: Vec<ModuleExports>,
	pub opens: Vec<ModuleOpens>,
	pub uses: Vec<u16>,
	pub provides: Vec<ModuleProvides>,
}

impl Module {
	pub fn flags(&self) -> ModuleFlags {
		ModuleFlags::from(self.module_flags)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRequires {
	pub requires_index: u16,
	pub requires_flags: u16,
	pub requires_version_index: u16,
}

impl ModuleRequires {
	pub fn flags(&self) -> ModuleRequiresFlags {
		ModuleRequiresFlags::from(self.requires_flags)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleExports {
	pub exports_index: u16,
	pub exports_flags: u16,
	pub exports_to_index: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOpens {
	pub opens_index: u16,
	pub opens_flags: u16,
	pub opens_to_index: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProvides {
	pub provides_index: u16,
	pub provides_with_index: Vec<u16>,
}

/// The flags of the module itself, parsed into their named bits.
#[derive(Copy, Clone, PartialEq)]
pub struct ModuleFlags {
	pub is_open: bool,
	pub is_synthetic: bool,
	pub is_mandated: bool,
}

impl Debug for ModuleFlags {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ModuleFlags { ")?;
		if self.is_open      { f.write_str("open ")?; }
		if self.is_synthetic { f.write_str("synthetic ")?; }
		if self.is_mandated  { f.write_str("mandated ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ModuleFlags {
	fn from(value: u16) -> Self {
		ModuleFlags {
			is_open:      value & 0x0020 != 0,
			is_synthetic: value & 0x1000 != 0,
			is_mandated:  value & 0x8000 != 0,
		}
	}
}

/// The flags of one `requires` entry of a module.
#[derive(Copy, Clone, PartialEq)]
pub struct ModuleRequiresFlags {
	pub is_transitive: bool,
	pub is_static_phase: bool,
	pub is_synthetic: bool,
	pub is_mandated: bool,
}

impl Debug for ModuleRequiresFlags {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ModuleRequiresFlags { ")?;
		if self.is_transitive   { f.write_str("transitive ")?; }
		if self.is_static_phase { f.write_str("static ")?; }
		if self.is_synthetic    { f.write_str("synthetic ")?; }
		if self.is_mandated     { f.write_str("mandated ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ModuleRequiresFlags {
	fn from(value: u16) -> Self {
		ModuleRequiresFlags {
			is_transitive:   value & 0x0020 != 0,
			is_static_phase: value & 0x0040 != 0,
			is_synthetic:    value & 0x1000 != 0,
			is_mandated:     value & 0x8000 != 0,
		}
	}
}

//! Renders decoded class files as javap-shaped disassembly text.
//!
//! The entry point is [`disassemble`]: it takes a [`ClassFile`] from the
//! `jclass` crate and a set of [`RenderOptions`] and produces [`Rendered`]
//! text plus the faults found along the way. Rendering itself never fails;
//! only [`disassemble_bytes`] can return an error, and only for a file whose
//! outer structure (magic, version, constant pool) is broken.
//!
//! Anything inside the class that doesn't resolve — dangling pool indices,
//! attributes with the wrong payload, undecodable instructions — renders as a
//! placeholder or hex dump and shows up in [`Rendered::faults`].

mod annotate;
mod pool_display;
mod render;
mod signature;
mod writer;

use anyhow::Result;
use jclass::Fault;
use jclass::class_constants::flags;
use jclass::tree::class::ClassFile;

/// What to render, javap-style: the flags of the CLI map onto this.
#[derive(Debug, Clone)]
pub struct RenderOptions {
	/// Verbose mode: version/flags header, all attributes, pool comments everywhere.
	pub show_all_attributes: bool,
	/// `descriptor:` lines under each member.
	pub show_descriptors: bool,
	/// `LineNumberTable:` and `LocalVariable(Type)Table:` blocks under code.
	pub show_line_and_local_var_tables: bool,
	/// `Code:` blocks with the instruction listing.
	pub show_disassembly: bool,
	/// The `Constant pool:` dump.
	pub show_constant_pool: bool,
	pub access_filter: AccessFilter,
	/// Which note kinds to interleave with the instruction listing.
	pub details: Details,
	/// Drop the `Owner.` part of member refs into the file's own class.
	pub simplify_same_class_refs: bool,
	pub indent_width: usize,
	pub comment_column: usize,
}

impl Default for RenderOptions {
	fn default() -> RenderOptions {
		RenderOptions {
			show_all_attributes: false,
			show_descriptors: false,
			show_line_and_local_var_tables: false,
			show_disassembly: false,
			show_constant_pool: false,
			access_filter: AccessFilter::Package,
			details: Details::default(),
			simplify_same_class_refs: true,
			indent_width: 2,
			comment_column: 40,
		}
	}
}

/// The least visible access level of members still shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessFilter {
	Public,
	Protected,
	/// Package-private and up; the javap default.
	Package,
	Private,
}

impl AccessFilter {
	pub fn shows(self, access_flags: u16) -> bool {
		let level = if access_flags & flags::ACC_PUBLIC != 0 {
			AccessFilter::Public
		} else if access_flags & flags::ACC_PROTECTED != 0 {
			AccessFilter::Protected
		} else if access_flags & flags::ACC_PRIVATE != 0 {
			AccessFilter::Private
		} else {
			AccessFilter::Package
		};
		level <= self
	}
}

/// The note kinds interleaved with the instruction listing, each backed by one
/// annotator. All off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Details {
	/// `line <n>` notes from the line number table.
	pub source: bool,
	/// `start local` / `end local` notes.
	pub local_vars: bool,
	/// `start generic local` / `end generic local` notes.
	pub local_var_types: bool,
	/// Reconstructed `StackMap locals:` / `StackMap stack:` notes.
	pub stack_maps: bool,
	/// `try[i]` / `catch[i]` notes from the exception table.
	pub try_blocks: bool,
	/// `@Type: target` notes for offset-targeted type annotations.
	pub type_annotations: bool,
}

impl Details {
	pub fn all() -> Details {
		Details {
			source: true,
			local_vars: true,
			local_var_types: true,
			stack_maps: true,
			try_blocks: true,
			type_annotations: true,
		}
	}
}

/// The output of [`disassemble`]: the text, and every fault found while
/// decoding and rendering, in the order they were hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
	pub text: String,
	pub faults: Vec<Fault>,
}

/// Renders a decoded class file. Never fails: anything that doesn't resolve
/// becomes a placeholder in the text and a fault in the result.
pub fn disassemble(class: &ClassFile, options: &RenderOptions) -> Rendered {
	let (text, render_faults) = render::render(class, options);

	let mut faults = class.faults.clone();
	faults.extend(render_faults);
	Rendered { text, faults }
}

/// Decodes and renders a class file from bytes. The only errors are the header
/// faults of [`jclass::read_class_bytes`]; everything past the constant pool
/// degrades into placeholders instead.
pub fn disassemble_bytes(bytes: &[u8], options: &RenderOptions) -> Result<Rendered> {
	let class = jclass::read_class_bytes(bytes)?;
	Ok(disassemble(&class, options))
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	#[test]
	fn access_filter_levels() {
		let public = flags::ACC_PUBLIC | flags::ACC_STATIC;
		let protected = flags::ACC_PROTECTED;
		let package = flags::ACC_FINAL;
		let private = flags::ACC_PRIVATE;

		assert_eq!(AccessFilter::Public.shows(public), true);
		assert_eq!(AccessFilter::Public.shows(protected), false);
		assert_eq!(AccessFilter::Public.shows(package), false);
		assert_eq!(AccessFilter::Public.shows(private), false);

		assert_eq!(AccessFilter::Protected.shows(protected), true);
		assert_eq!(AccessFilter::Protected.shows(package), false);

		assert_eq!(AccessFilter::Package.shows(package), true);
		assert_eq!(AccessFilter::Package.shows(private), false);

		assert_eq!(AccessFilter::Private.shows(private), true);
		assert_eq!(AccessFilter::Private.shows(public), true);
	}
}

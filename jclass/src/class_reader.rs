use std::fmt::{Display, Formatter};
use std::io::{Cursor, Read};
use anyhow::{anyhow, bail, Context, Result};
use java_string::JavaStr;
use log::warn;
use crate::{class_constants, jstring, ClassRead};
use crate::class_constants::{attribute, type_annotation};
use crate::class_reader::pool::Pool;
use crate::frame::FrameRecord;
use crate::tree::annotation::{Annotation, ElementValue, ElementValuePair, LocalvarTargetEntry, TargetInfo, TypeAnnotation, TypePathSegment};
use crate::tree::attribute::{Attribute, BootstrapMethod, InnerClass, LineNumber, LocalVariable, MethodParameter, ModuleHash, RecordComponent};
use crate::tree::class::ClassFile;
use crate::tree::field::Field;
use crate::tree::method::code::{Code, ExceptionTableEntry};
use crate::tree::method::Method;
use crate::tree::module::{Module, ModuleExports, ModuleOpens, ModuleProvides, ModuleRequires};
use crate::tree::version::Version;

pub(crate) mod pool;

/// A part of a class file that didn't decode, recorded instead of failing the read.
///
/// Only the outer structure, up to and including the field and method tables, is load
/// bearing enough for its errors to abort; everything further in becomes a `Fault`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
	pub kind: FaultKind,
	/// Where it happened, like `method main:([Ljava/lang/String;)V`.
	pub location: String,
	pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
	/// A constant pool index that is dangling or points at an entry of the wrong tag.
	PoolResolution,
	/// An attribute payload that doesn't match the shape its name promises.
	AttributeShape,
	/// A bytecode instruction that couldn't be decoded.
	InstructionDecode,
}

impl Display for Fault {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let kind = match self.kind {
			FaultKind::PoolResolution => "pool resolution fault",
			FaultKind::AttributeShape => "attribute shape fault",
			FaultKind::InstructionDecode => "instruction decode fault",
		};
		write!(f, "{kind} at {}: {}", self.location, self.detail)
	}
}

pub(crate) fn read(reader: &mut impl Read) -> Result<ClassFile> {
	let magic = reader.read_u32()?;
	if magic != class_constants::MAGIC {
		bail!("wrong magic: got {magic:#x}, expected 0xCAFEBABE");
	}

	let minor = reader.read_u16()?;
	let major = reader.read_u16()?;
	let version = Version { major, minor };

	let pool = Pool::read(reader).context("while reading the constant pool")?;

	let access_flags = reader.read_u16()?;
	let this_class = reader.read_u16()?;
	let super_class = reader.read_u16()?;
	let interfaces = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| r.read_u16()
	)?;

	let class_location = match pool.get_class(this_class) {
		Ok(name) => format!("class {name}"),
		Err(_) => "class".to_owned(),
	};

	let mut faults = Vec::new();

	let fields = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| {
			let access_flags = r.read_u16()?;
			let name_index = r.read_u16()?;
			let descriptor_index = r.read_u16()?;
			let location = member_location(&pool, "field", name_index, descriptor_index);
			let attributes = read_attributes(r, &pool, &mut faults, &location)?;
			Ok(Field { access_flags, name_index, descriptor_index, attributes })
		}
	).with_context(|| anyhow!("while reading the fields of {class_location}"))?;

	let methods = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| {
			let access_flags = r.read_u16()?;
			let name_index = r.read_u16()?;
			let descriptor_index = r.read_u16()?;
			let location = member_location(&pool, "method", name_index, descriptor_index);
			let attributes = read_attributes(r, &pool, &mut faults, &location)?;
			Ok(Method { access_flags, name_index, descriptor_index, attributes })
		}
	).with_context(|| anyhow!("while reading the methods of {class_location}"))?;

	let attributes = read_attributes(reader, &pool, &mut faults, &class_location)
		.with_context(|| anyhow!("while reading the attributes of {class_location}"))?;

	let mut trailing = Vec::new();
	reader.read_to_end(&mut trailing)?;
	if !trailing.is_empty() {
		warn!("ignoring {} trailing bytes after the end of {class_location}", trailing.len());
	}

	Ok(ClassFile {
		version,
		pool,
		access_flags,
		this_class,
		super_class,
		interfaces,
		fields,
		methods,
		attributes,
		faults,
	})
}

fn utf8_or_index(pool: &Pool, index: u16) -> String {
	match pool.get_utf8(index) {
		Ok(string) => string.to_string(),
		Err(_) => format!("#{index}"),
	}
}

fn member_location(pool: &Pool, kind: &str, name_index: u16, descriptor_index: u16) -> String {
	format!("{kind} {}:{}", utf8_or_index(pool, name_index), utf8_or_index(pool, descriptor_index))
}

fn read_attributes(reader: &mut impl Read, pool: &Pool, faults: &mut Vec<Fault>, location: &str) -> Result<Vec<Attribute>> {
	let attributes_count = reader.read_u16()?;
	let mut attributes = Vec::with_capacity(attributes_count as usize);
	for _ in 0..attributes_count {
		attributes.push(read_attribute(reader, pool, faults, location)?);
	}
	Ok(attributes)
}

/// Reads one attribute. The whole declared payload is consumed from `reader` up front,
/// so a payload that doesn't decode never desyncs the attributes after it.
fn read_attribute(reader: &mut impl Read, pool: &Pool, faults: &mut Vec<Fault>, location: &str) -> Result<Attribute> {
	let name_index = reader.read_u16()?;
	let length = reader.read_u32_as_usize()?;
	let data = reader.read_u8_vec(length)?;

	let name = match pool.get_utf8(name_index) {
		Ok(name) => name.to_owned(),
		Err(e) => {
			faults.push(Fault {
				kind: FaultKind::PoolResolution,
				location: location.to_owned(),
				detail: format!("attribute name: {e:#}"),
			});
			return Ok(Attribute::Unknown { name: format!("#{name_index}").into(), data, reason: None });
		},
	};

	let mut cursor = Cursor::new(data);
	match decode_attribute(&name, &mut cursor, pool, faults, location) {
		Ok(Some(attribute)) => {
			let consumed = cursor.position() as usize;
			let data = cursor.into_inner();
			if consumed != data.len() {
				faults.push(Fault {
					kind: FaultKind::AttributeShape,
					location: location.to_owned(),
					detail: format!("attribute {name} declares {} bytes but decoding used {consumed}", data.len()),
				});
			}
			Ok(attribute)
		},
		Ok(None) => Ok(Attribute::Unknown { name, data: cursor.into_inner(), reason: None }),
		Err(e) => {
			faults.push(Fault {
				kind: FaultKind::AttributeShape,
				location: location.to_owned(),
				detail: format!("attribute {name}: {e:#}"),
			});
			Ok(Attribute::Unknown {
				name,
				data: cursor.into_inner(),
				reason: Some(format!("{e:#}")),
			})
		},
	}
}

/// Decodes the payload of an attribute with a predefined name; `Ok(None)` means the
/// name isn't predefined and the caller keeps the raw bytes.
fn decode_attribute(
	name: &JavaStr,
	reader: &mut Cursor<Vec<u8>>,
	pool: &Pool,
	faults: &mut Vec<Fault>,
	location: &str,
) -> Result<Option<Attribute>> {
	Ok(Some(match name {
		name if name == attribute::CONSTANT_VALUE => Attribute::ConstantValue {
			constant_value_index: reader.read_u16()?,
		},
		name if name == attribute::CODE => Attribute::Code(read_code(reader, pool, faults, location)?),
		name if name == attribute::STACK_MAP_TABLE => Attribute::StackMapTable {
			entries: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| FrameRecord::read(r)
			)?,
		},
		name if name == attribute::EXCEPTIONS => Attribute::Exceptions {
			exception_index_table: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| r.read_u16()
			)?,
		},
		name if name == attribute::INNER_CLASSES => Attribute::InnerClasses {
			classes: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(InnerClass {
					inner_class_info_index: r.read_u16()?,
					outer_class_info_index: r.read_u16()?,
					inner_name_index: r.read_u16()?,
					inner_class_access_flags: r.read_u16()?,
				})
			)?,
		},
		name if name == attribute::ENCLOSING_METHOD => Attribute::EnclosingMethod {
			class_index: reader.read_u16()?,
			method_index: reader.read_u16()?,
		},
		name if name == attribute::SYNTHETIC => Attribute::Synthetic,
		name if name == attribute::SIGNATURE => Attribute::Signature {
			signature_index: reader.read_u16()?,
		},
		name if name == attribute::SOURCE_FILE => Attribute::SourceFile {
			sourcefile_index: reader.read_u16()?,
		},
		name if name == attribute::SOURCE_DEBUG_EXTENSION => {
			let mut rest = Vec::new();
			reader.read_to_end(&mut rest)?;
			Attribute::SourceDebugExtension {
				debug_extension: jstring::from_vec_to_string(rest)?,
			}
		},
		name if name == attribute::LINE_NUMBER_TABLE => Attribute::LineNumberTable {
			line_number_table: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LineNumber {
					start_pc: r.read_u16()?,
					line_number: r.read_u16()?,
				})
			)?,
		},
		name if name == attribute::LOCAL_VARIABLE_TABLE => Attribute::LocalVariableTable {
			local_variable_table: read_local_variables(reader)?,
		},
		name if name == attribute::LOCAL_VARIABLE_TYPE_TABLE => Attribute::LocalVariableTypeTable {
			local_variable_type_table: read_local_variables(reader)?,
		},
		name if name == attribute::DEPRECATED => Attribute::Deprecated,
		name if name == attribute::RUNTIME_VISIBLE_ANNOTATIONS => Attribute::RuntimeVisibleAnnotations {
			annotations: read_annotations(reader)?,
		},
		name if name == attribute::RUNTIME_INVISIBLE_ANNOTATIONS => Attribute::RuntimeInvisibleAnnotations {
			annotations: read_annotations(reader)?,
		},
		name if name == attribute::RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS => Attribute::RuntimeVisibleParameterAnnotations {
			parameter_annotations: read_parameter_annotations(reader)?,
		},
		name if name == attribute::RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS => Attribute::RuntimeInvisibleParameterAnnotations {
			parameter_annotations: read_parameter_annotations(reader)?,
		},
		name if name == attribute::RUNTIME_VISIBLE_TYPE_ANNOTATIONS => Attribute::RuntimeVisibleTypeAnnotations {
			annotations: read_type_annotations(reader)?,
		},
		name if name == attribute::RUNTIME_INVISIBLE_TYPE_ANNOTATIONS => Attribute::RuntimeInvisibleTypeAnnotations {
			annotations: read_type_annotations(reader)?,
		},
		name if name == attribute::ANNOTATION_DEFAULT => Attribute::AnnotationDefault {
			default_value: read_element_value(reader)?,
		},
		name if name == attribute::BOOTSTRAP_METHODS => Attribute::BootstrapMethods {
			bootstrap_methods: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(BootstrapMethod {
					bootstrap_method_ref: r.read_u16()?,
					bootstrap_arguments: r.read_vec(
						|r| r.read_u16_as_usize(),
						|r| r.read_u16()
					)?,
				})
			)?,
		},
		name if name == attribute::METHOD_PARAMETERS => Attribute::MethodParameters {
			parameters: reader.read_vec(
				|r| Ok(r.read_u8()? as usize),
				|r| Ok(MethodParameter {
					name_index: r.read_u16()?,
					access_flags: r.read_u16()?,
				})
			)?,
		},
		name if name == attribute::MODULE => Attribute::Module(read_module(reader)?),
		name if name == attribute::MODULE_PACKAGES => Attribute::ModulePackages {
			package_index_table: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| r.read_u16()
			)?,
		},
		name if name == attribute::MODULE_MAIN_CLASS => Attribute::ModuleMainClass {
			main_class_index: reader.read_u16()?,
		},
		name if name == attribute::MODULE_HASHES => Attribute::ModuleHashes {
			algorithm_index: reader.read_u16()?,
			hashes: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| {
					let module_name_index = r.read_u16()?;
					let hash_length = r.read_u16_as_usize()?;
					Ok(ModuleHash {
						module_name_index,
						hash: r.read_u8_vec(hash_length)?,
					})
				}
			)?,
		},
		name if name == attribute::MODULE_RESOLUTION => Attribute::ModuleResolution {
			resolution_flags: reader.read_u16()?,
		},
		name if name == attribute::MODULE_TARGET => Attribute::ModuleTarget {
			target_platform_index: reader.read_u16()?,
		},
		name if name == attribute::NEST_HOST => Attribute::NestHost {
			host_class_index: reader.read_u16()?,
		},
		name if name == attribute::NEST_MEMBERS => Attribute::NestMembers {
			classes: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| r.read_u16()
			)?,
		},
		name if name == attribute::RECORD => {
			let components_count = reader.read_u16()?;
			let mut components = Vec::with_capacity(components_count as usize);
			for _ in 0..components_count {
				let name_index = reader.read_u16()?;
				let descriptor_index = reader.read_u16()?;
				let location = member_location(pool, "record component", name_index, descriptor_index);
				let attributes = read_attributes(reader, pool, faults, &location)?;
				components.push(RecordComponent { name_index, descriptor_index, attributes });
			}
			Attribute::Record { components }
		},
		name if name == attribute::PERMITTED_SUBCLASSES => Attribute::PermittedSubclasses {
			classes: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| r.read_u16()
			)?,
		},
		_ => return Ok(None),
	}))
}

fn read_code(reader: &mut impl Read, pool: &Pool, faults: &mut Vec<Fault>, location: &str) -> Result<Code> {
	let max_stack = reader.read_u16()?;
	let max_locals = reader.read_u16()?;

	let code_length = reader.read_u32_as_usize()?;
	let bytecode = reader.read_u8_vec(code_length)?;

	let exception_table = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| Ok(ExceptionTableEntry {
			start_pc: r.read_u16()?,
			end_pc: r.read_u16()?,
			handler_pc: r.read_u16()?,
			catch_type: r.read_u16()?,
		})
	)?;

	let attributes = read_attributes(reader, pool, faults, location)?;

	Ok(Code { max_stack, max_locals, bytecode, exception_table, attributes })
}

fn read_local_variables(reader: &mut impl Read) -> Result<Vec<LocalVariable>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| Ok(LocalVariable {
			start_pc: r.read_u16()?,
			length: r.read_u16()?,
			name_index: r.read_u16()?,
			descriptor_index: r.read_u16()?,
			index: r.read_u16()?,
		})
	)
}

fn read_annotations(reader: &mut impl Read) -> Result<Vec<Annotation>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_annotation(r)
	)
}

fn read_parameter_annotations(reader: &mut impl Read) -> Result<Vec<Vec<Annotation>>> {
	// the parameter count is a single byte here, unlike everywhere else
	reader.read_vec(
		|r| Ok(r.read_u8()? as usize),
		|r| read_annotations(r)
	)
}

fn read_annotation(reader: &mut impl Read) -> Result<Annotation> {
	Ok(Annotation {
		type_index: reader.read_u16()?,
		element_value_pairs: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ElementValuePair {
				element_name_index: r.read_u16()?,
				value: read_element_value(r)?,
			})
		)?,
	})
}

fn read_element_value(reader: &mut impl Read) -> Result<ElementValue> {
	Ok(match reader.read_u8()? {
		tag @ (b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's') => ElementValue::Const {
			tag,
			const_value_index: reader.read_u16()?,
		},
		b'e' => ElementValue::Enum {
			type_name_index: reader.read_u16()?,
			const_name_index: reader.read_u16()?,
		},
		b'c' => ElementValue::Class {
			class_info_index: reader.read_u16()?,
		},
		b'@' => ElementValue::Annotation(read_annotation(reader)?),
		b'[' => ElementValue::Array(reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| read_element_value(r)
		)?),
		tag => bail!("unknown element_value tag {:?}", tag as char),
	})
}

fn read_type_annotations(reader: &mut impl Read) -> Result<Vec<TypeAnnotation>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_type_annotation(r)
	)
}

fn read_type_annotation(reader: &mut impl Read) -> Result<TypeAnnotation> {
	let target_type = reader.read_u8()?;
	let target_info = read_target_info(reader, target_type)?;
	let target_path = reader.read_vec(
		|r| Ok(r.read_u8()? as usize),
		|r| Ok(TypePathSegment {
			type_path_kind: r.read_u8()?,
			type_argument_index: r.read_u8()?,
		})
	)?;
	let annotation = read_annotation(reader)?;

	Ok(TypeAnnotation { target_type, target_info, target_path, annotation })
}

fn read_target_info(reader: &mut impl Read, target_type: u8) -> Result<TargetInfo> {
	Ok(match target_type {
		type_annotation::CLASS_TYPE_PARAMETER |
		type_annotation::METHOD_TYPE_PARAMETER => TargetInfo::TypeParameter {
			type_parameter_index: reader.read_u8()?,
		},
		type_annotation::CLASS_EXTENDS => TargetInfo::Supertype {
			supertype_index: reader.read_u16()?,
		},
		type_annotation::CLASS_TYPE_PARAMETER_BOUND |
		type_annotation::METHOD_TYPE_PARAMETER_BOUND => TargetInfo::TypeParameterBound {
			type_parameter_index: reader.read_u8()?,
			bound_index: reader.read_u8()?,
		},
		type_annotation::FIELD |
		type_annotation::METHOD_RETURN |
		type_annotation::METHOD_RECEIVER => TargetInfo::Empty,
		type_annotation::METHOD_FORMAL_PARAMETER => TargetInfo::FormalParameter {
			formal_parameter_index: reader.read_u8()?,
		},
		type_annotation::THROWS => TargetInfo::Throws {
			throws_type_index: reader.read_u16()?,
		},
		type_annotation::LOCAL_VARIABLE |
		type_annotation::RESOURCE_VARIABLE => TargetInfo::Localvar {
			table: reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalvarTargetEntry {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					index: r.read_u16()?,
				})
			)?,
		},
		type_annotation::EXCEPTION_PARAMETER => TargetInfo::Catch {
			exception_table_index: reader.read_u16()?,
		},
		type_annotation::INSTANCE_OF |
		type_annotation::NEW |
		type_annotation::CONSTRUCTOR_REFERENCE |
		type_annotation::METHOD_REFERENCE => TargetInfo::Offset {
			offset: reader.read_u16()?,
		},
		type_annotation::CAST |
		type_annotation::CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT |
		type_annotation::METHOD_INVOCATION_TYPE_ARGUMENT |
		type_annotation::CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT |
		type_annotation::METHOD_REFERENCE_TYPE_ARGUMENT => TargetInfo::TypeArgument {
			offset: reader.read_u16()?,
			type_argument_index: reader.read_u8()?,
		},
		tag => bail!("unknown type annotation target type {tag:#04x}"),
	})
}

fn read_module(reader: &mut impl Read) -> Result<Module> {
	Ok(Module {
		module_name_index: reader.read_u16()?,
		module_flags: reader.read_u16()?,
		module_version_index: reader.read_u16()?,
		requires: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ModuleRequires {
				requires_index: r.read_u16()?,
				requires_flags: r.read_u16()?,
				requires_version_index: r.read_u16()?,
			})
		)?,
		exports: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ModuleExports {
				exports_index: r.read_u16()?,
				exports_flags: r.read_u16()?,
				exports_to_index: r.read_vec(
					|r| r.read_u16_as_usize(),
					|r| r.read_u16()
				)?,
			})
		)?,
		opens: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ModuleOpens {
				opens_index: r.read_u16()?,
				opens_flags: r.read_u16()?,
				opens_to_index: r.read_vec(
					|r| r.read_u16_as_usize(),
					|r| r.read_u16()
				)?,
			})
		)?,
		uses: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| r.read_u16()
		)?,
		provides: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ModuleProvides {
				provides_index: r.read_u16()?,
				provides_with_index: r.read_vec(
					|r| r.read_u16_as_usize(),
					|r| r.read_u16()
				)?,
			})
		)?,
	})
}

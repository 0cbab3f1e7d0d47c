use java_string::JavaString;
use crate::frame::FrameRecord;
use crate::tree::annotation::{Annotation, ElementValue, TypeAnnotation};
use crate::tree::class::InnerClassAccess;
use crate::tree::method::code::Code;
use crate::tree::method::ParameterAccess;
use crate::tree::module::Module;

/// An attribute, decoded into its own shape where the name is known.
///
/// An attribute whose name isn't one of the predefined ones, and one whose payload doesn't decode,
/// becomes [`Unknown`][Attribute::Unknown] and keeps the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	ConstantValue {
		constant_value_index: u16,
	},
	Code(Code),
	StackMapTable {
		entries: Vec<FrameRecord>,
	},
	Exceptions {
		exception_index_table: Vec<u16>,
	},
	InnerClasses {
		classes: Vec<InnerClass>,
	},
	EnclosingMethod {
		class_index: u16,
		/// Zero when the enclosing context isn't a method body.
		method_index: u16,
	},
	Synthetic,
	Signature {
		signature_index: u16,
	},
	SourceFile {
		sourcefile_index: u16,
	},
	SourceDebugExtension {
		debug_extension: JavaString,
	},
	LineNumberTable {
		line_number_table: Vec<LineNumber>,
	},
	LocalVariableTable {
		local_variable_table: Vec<LocalVariable>,
	},
	LocalVariableTypeTable {
		local_variable_type_table: Vec<LocalVariable>,
	},
	Deprecated,
	RuntimeVisibleAnnotations {
		annotations: Vec<Annotation>,
	},
	RuntimeInvisibleAnnotations {
		annotations: Vec<Annotation>,
	},
	RuntimeVisibleParameterAnnotations {
		parameter_annotations: Vec<Vec<Annotation>>,
	},
	RuntimeInvisibleParameterAnnotations {
		parameter_annotations: Vec<Vec<Annotation>>,
	},
	RuntimeVisibleTypeAnnotations {
		annotations: Vec<TypeAnnotation>,
	},
	RuntimeInvisibleTypeAnnotations {
		annotations: Vec<TypeAnnotation>,
	},
	AnnotationDefault {
		default_value: ElementValue,
	},
	BootstrapMethods {
		bootstrap_methods: Vec<BootstrapMethod>,
	},
	MethodParameters {
		parameters: Vec<MethodParameter>,
	},
	Module(Module),
	ModulePackages {
		package_index_table: Vec<u16>,
	},
	ModuleMainClass {
		main_class_index: u16,
	},
	ModuleHashes {
		algorithm_index: u16,
		hashes: Vec<ModuleHash>,
	},
	ModuleResolution {
		resolution_flags: u16,
	},
	ModuleTarget {
		target_platform_index: u16,
	},
	NestHost {
		host_class_index: u16,
	},
	NestMembers {
		classes: Vec<u16>,
	},
	Record {
		components: Vec<RecordComponent>,
	},
	PermittedSubclasses {
		classes: Vec<u16>,
	},
	/// An attribute that couldn't be decoded into one of the shapes above.
	Unknown {
		name: JavaString,
		data: Vec<u8>,
		/// `None` when the name simply isn't a predefined one; otherwise the decode error.
		reason: Option<String>,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerClass {
	pub inner_class_info_index: u16,
	/// Zero for local and anonymous classes.
	pub outer_class_info_index: u16,
	/// Zero for anonymous classes.
	pub inner_name_index: u16,
	pub inner_class_access_flags: u16,
}

impl InnerClass {
	pub fn access(&self) -> InnerClassAccess {
		InnerClassAccess::from(self.inner_class_access_flags)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumber {
	pub start_pc: u16,
	pub line_number: u16,
}

/// An entry of either `LocalVariableTable` or `LocalVariableTypeTable`; for the latter the
/// `descriptor_index` points at a field signature instead of a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVariable {
	pub start_pc: u16,
	pub length: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub index: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapMethod {
	/// A `MethodHandle` pool index.
	pub bootstrap_method_ref: u16,
	pub bootstrap_arguments: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodParameter {
	/// Zero when the parameter has no name.
	pub name_index: u16,
	pub access_flags: u16,
}

impl MethodParameter {
	pub fn access(&self) -> ParameterAccess {
		ParameterAccess::from(self.access_flags)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHash {
	pub module_name_index: u16,
	pub hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordComponent {
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<Attribute>,
}

/// An annotation, as stored: the type and the element names are constant pool indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
	/// An `Utf8` pool index holding the field descriptor of the annotation interface.
	pub type_index: u16,
	pub element_value_pairs: Vec<ElementValuePair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementValuePair {
	pub element_name_index: u16,
	pub value: ElementValue,
}

/// The value of an annotation element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
	/// Tags `B`, `C`, `D`, `F`, `I`, `J`, `S`, `Z` and `s`: a primitive or string constant.
	/// The tag decides how the pool entry behind `const_value_index` is to be interpreted.
	Const { tag: u8, const_value_index: u16 },
	/// Tag `e`: an enum constant, both indices are `Utf8` entries.
	Enum { type_name_index: u16, const_name_index: u16 },
	/// Tag `c`: a class literal, the index is an `Utf8` entry holding a return descriptor.
	Class { class_info_index: u16 },
	/// Tag `@`: a nested annotation.
	Annotation(Annotation),
	/// Tag `[`: an array of values.
	Array(Vec<ElementValue>),
}

/// An annotation on a *type use*, from one of the `Runtime*TypeAnnotations` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
	/// The `target_type` byte; see [`class_constants::type_annotation`][crate::class_constants::type_annotation].
	pub target_type: u8,
	pub target_info: TargetInfo,
	pub target_path: Vec<TypePathSegment>,
	pub annotation: Annotation,
}

/// Where exactly a [`TypeAnnotation`] sits; which variant is used follows from the `target_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetInfo {
	TypeParameter { type_parameter_index: u8 },
	Supertype { supertype_index: u16 },
	TypeParameterBound { type_parameter_index: u8, bound_index: u8 },
	Empty,
	FormalParameter { formal_parameter_index: u8 },
	Throws { throws_type_index: u16 },
	Localvar { table: Vec<LocalvarTargetEntry> },
	Catch { exception_table_index: u16 },
	Offset { offset: u16 },
	TypeArgument { offset: u16, type_argument_index: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalvarTargetEntry {
	pub start_pc: u16,
	pub length: u16,
	pub index: u16,
}

/// One step into a compound type, like "type argument 0 of" or "array element of".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePathSegment {
	pub type_path_kind: u8,
	pub type_argument_index: u8,
}

//! Display strings for constant pool entries.
//!
//! Nothing in here ever fails: an index that doesn't resolve, points at the wrong
//! tag, or resolves only partway renders as the placeholder `#<index>`, and the
//! failure is recorded as a [`Fault`]. That keeps a dangling reference local to
//! the one operand or pool line it sits in.

use java_string::{JavaStr, JavaString};
use jclass::{Fault, FaultKind, Pool, PoolEntry};
use jclass::class_constants::method_handle;
use jclass::tree::descriptor::{parse_field_descriptor, ArrayType, Type};

/// Renders pool indices as text, collecting resolution faults on the side.
///
/// The current location is part of the state so that a fault found while printing,
/// say, an `ldc` operand names the method it happened in.
pub struct PoolDisplay<'a> {
	pool: &'a Pool,
	/// The binary name of the class the pool belongs to, when it resolved.
	own_class: Option<&'a JavaStr>,
	simplify_same_class_refs: bool,
	location: String,
	faults: Vec<Fault>,
}

impl<'a> PoolDisplay<'a> {
	pub fn new(pool: &'a Pool, this_class: u16, simplify_same_class_refs: bool) -> PoolDisplay<'a> {
		PoolDisplay {
			pool,
			own_class: pool.get_class(this_class).ok(),
			simplify_same_class_refs,
			location: String::from("class"),
			faults: Vec::new(),
		}
	}

	pub fn set_location(&mut self, location: impl Into<String>) {
		self.location = location.into();
	}

	pub fn location(&self) -> &str {
		&self.location
	}

	pub fn into_faults(self) -> Vec<Fault> {
		self.faults
	}

	fn fault(&mut self, index: u16, error: anyhow::Error) -> String {
		self.faults.push(Fault {
			kind: FaultKind::PoolResolution,
			location: self.location.clone(),
			detail: format!("{error:#}"),
		});
		placeholder(index)
	}

	/// The escaped text behind an `Utf8` entry, or the placeholder.
	pub fn utf8(&mut self, index: u16) -> String {
		match self.pool.get_utf8(index) {
			Ok(string) => escape_name(string),
			Err(e) => self.fault(index, e),
		}
	}

	/// The raw text behind an `Utf8` entry, unescaped, for callers that parse it
	/// further. Falls back to the placeholder text like everything else.
	pub fn utf8_raw(&mut self, index: u16) -> JavaString {
		match self.pool.get_utf8(index) {
			Ok(string) => string.to_owned(),
			Err(e) => JavaString::from(self.fault(index, e)),
		}
	}

	/// The escaped binary name behind a `Class` entry, or the placeholder.
	pub fn class_name(&mut self, index: u16) -> String {
		match self.pool.get_class(index) {
			Ok(name) => escape_name(name),
			Err(e) => self.fault(index, e),
		}
	}

	/// Like [`class_name`][Self::class_name], but as a source-like dotted name.
	pub fn java_class_name(&mut self, index: u16) -> String {
		match self.pool.get_class(index) {
			Ok(name) => java_name(name),
			Err(e) => self.fault(index, e),
		}
	}

	pub fn module_name(&mut self, index: u16) -> String {
		match self.pool.get_module(index) {
			Ok(name) => escape_name(name),
			Err(e) => self.fault(index, e),
		}
	}

	pub fn package_name(&mut self, index: u16) -> String {
		match self.pool.get_package(index) {
			Ok(name) => escape_name(name),
			Err(e) => self.fault(index, e),
		}
	}

	/// `name:descriptor` behind a `NameAndType` entry, each part falling back on its own.
	pub fn name_and_type(&mut self, index: u16) -> String {
		let (name_index, descriptor_index) = match self.pool.get(index) {
			Ok(&PoolEntry::NameAndType { name_index, descriptor_index }) => (name_index, descriptor_index),
			Ok(_) | Err(_) => {
				let e = anyhow::anyhow!("pool index {index} is not a NameAndType entry");
				return self.fault(index, e);
			},
		};
		format!("{}:{}", self.utf8(name_index), self.utf8(descriptor_index))
	}

	/// `owner.name:descriptor` behind one of the three member ref entries.
	///
	/// A reference into the pool's own class drops the `owner.` part when the
	/// simplification option is on. Sub-entries that don't resolve fall back to
	/// placeholders one by one, so a dangling name doesn't take the owner with it.
	pub fn member_ref(&mut self, index: u16) -> String {
		let (class_index, name_and_type_index) = match self.pool.get(index) {
			Ok(&PoolEntry::FieldRef { class_index, name_and_type_index }) |
			Ok(&PoolEntry::MethodRef { class_index, name_and_type_index }) |
			Ok(&PoolEntry::InterfaceMethodRef { class_index, name_and_type_index }) =>
				(class_index, name_and_type_index),
			Ok(_) | Err(_) => {
				let e = anyhow::anyhow!("pool index {index} is not a member ref entry");
				return self.fault(index, e);
			},
		};

		let name_and_type = self.name_and_type(name_and_type_index);

		let same_class = self.simplify_same_class_refs
			&& self.own_class.is_some()
			&& self.pool.get_class(class_index).ok() == self.own_class;
		if same_class {
			name_and_type
		} else {
			format!("{}.{name_and_type}", self.class_name(class_index))
		}
	}

	fn dynamic(&mut self, index: u16) -> String {
		let (bootstrap_index, name_and_type_index) = match self.pool.get(index) {
			Ok(&PoolEntry::Dynamic { bootstrap_method_attribute_index, name_and_type_index }) |
			Ok(&PoolEntry::InvokeDynamic { bootstrap_method_attribute_index, name_and_type_index }) =>
				(bootstrap_method_attribute_index, name_and_type_index),
			Ok(_) | Err(_) => {
				let e = anyhow::anyhow!("pool index {index} is not a Dynamic or InvokeDynamic entry");
				return self.fault(index, e);
			},
		};
		format!("#{bootstrap_index}:{}", self.name_and_type(name_and_type_index))
	}

	/// `REF_<kind> <target>`, the form used for `MethodHandle` entries and
	/// bootstrap method rows.
	pub fn method_handle(&mut self, index: u16) -> String {
		match self.pool.get_method_handle(index) {
			Ok((kind, reference_index)) => {
				let target = match kind {
					method_handle::GET_FIELD | method_handle::GET_STATIC |
					method_handle::PUT_FIELD | method_handle::PUT_STATIC |
					method_handle::INVOKE_VIRTUAL..=method_handle::INVOKE_INTERFACE =>
						self.member_ref(reference_index),
					_ => placeholder(reference_index),
				};
				format!("{} {target}", method_handle_kind(kind))
			},
			Err(e) => self.fault(index, e),
		}
	}

	/// The value of an annotation element constant, interpreted per its tag
	/// byte: the tag decides which pool accessor applies and how the value is
	/// spelled.
	pub fn element_const(&mut self, tag: u8, index: u16) -> String {
		let value = match tag {
			b'B' | b'S' | b'I' => self.pool.get_integer(index).map(|v| format!("{v}")),
			b'C' => self.pool.get_integer(index).map(|v| match char::from_u32(v as u32) {
				Some(c) => format!("'{c}'"),
				None => format!("{v}"),
			}),
			b'Z' => self.pool.get_integer_as_boolean(index).map(|v| format!("{v}")),
			b'J' => self.pool.get_long(index).map(|v| format!("{v}l")),
			b'F' => self.pool.get_float(index).map(float_string),
			b'D' => self.pool.get_double(index).map(double_string),
			b's' => self.pool.get_utf8(index).map(|s| format!("\"{}\"", escape_text(s))),
			tag => Err(anyhow::anyhow!("unknown element value tag {tag:#04x}")),
		};
		match value {
			Ok(value) => value,
			Err(e) => self.fault(index, e),
		}
	}

	/// The tagged display of any entry, the form used in instruction comments:
	/// `int 5`, `String hi`, `Method java/io/PrintStream.println:(I)V` and so on.
	pub fn constant(&mut self, index: u16) -> String {
		let entry = match self.pool.get(index) {
			Ok(entry) => entry,
			Err(e) => return self.fault(index, e),
		};
		match *entry {
			PoolEntry::Utf8 { ref string } => format!("Utf8 {}", escape_text(string)),
			PoolEntry::Integer { bytes } => format!("int {bytes}"),
			PoolEntry::Float { bytes } => format!("float {}", float_string(f32::from_bits(bytes))),
			PoolEntry::Long { bytes } => format!("long {bytes}l"),
			PoolEntry::Double { bytes } => format!("double {}", double_string(f64::from_bits(bytes))),
			PoolEntry::Class { .. } => format!("class {}", self.class_name(index)),
			PoolEntry::String { string_index } => match self.pool.get_utf8(string_index) {
				Ok(string) => format!("String {}", escape_text(string)),
				Err(e) => format!("String {}", self.fault(string_index, e)),
			},
			PoolEntry::FieldRef { .. } => format!("Field {}", self.member_ref(index)),
			PoolEntry::MethodRef { .. } => format!("Method {}", self.member_ref(index)),
			PoolEntry::InterfaceMethodRef { .. } => format!("InterfaceMethod {}", self.member_ref(index)),
			PoolEntry::NameAndType { .. } => format!("NameAndType {}", self.name_and_type(index)),
			PoolEntry::MethodHandle { .. } => format!("MethodHandle {}", self.method_handle(index)),
			PoolEntry::MethodType { descriptor_index } => format!("MethodType {}", self.utf8(descriptor_index)),
			PoolEntry::Dynamic { .. } => format!("Dynamic {}", self.dynamic(index)),
			PoolEntry::InvokeDynamic { .. } => format!("InvokeDynamic {}", self.dynamic(index)),
			PoolEntry::Module { .. } => format!("Module {}", self.module_name(index)),
			PoolEntry::Package { .. } => format!("Package {}", self.package_name(index)),
		}
	}

	/// One line of the constant pool dump: the tag name, the value in its stored
	/// form, and the resolved comment for entries that reference other entries.
	pub fn dump_entry(&mut self, index: u16, entry: &PoolEntry) -> (&'static str, String, Option<String>) {
		match *entry {
			PoolEntry::Utf8 { ref string } =>
				("Utf8", escape_text(string), None),
			PoolEntry::Integer { bytes } =>
				("Integer", format!("{bytes}"), None),
			PoolEntry::Float { bytes } =>
				("Float", float_string(f32::from_bits(bytes)), None),
			PoolEntry::Long { bytes } =>
				("Long", format!("{bytes}l"), None),
			PoolEntry::Double { bytes } =>
				("Double", double_string(f64::from_bits(bytes)), None),
			PoolEntry::Class { name_index } =>
				("Class", placeholder(name_index), Some(self.utf8(name_index))),
			PoolEntry::String { string_index } =>
				("String", placeholder(string_index), Some(self.utf8(string_index))),
			PoolEntry::FieldRef { class_index, name_and_type_index } =>
				("Fieldref", format!("#{class_index}.#{name_and_type_index}"), Some(self.member_ref(index))),
			PoolEntry::MethodRef { class_index, name_and_type_index } =>
				("Methodref", format!("#{class_index}.#{name_and_type_index}"), Some(self.member_ref(index))),
			PoolEntry::InterfaceMethodRef { class_index, name_and_type_index } =>
				("InterfaceMethodref", format!("#{class_index}.#{name_and_type_index}"), Some(self.member_ref(index))),
			PoolEntry::NameAndType { name_index, descriptor_index } =>
				("NameAndType", format!("#{name_index}:#{descriptor_index}"), Some(self.name_and_type(index))),
			PoolEntry::MethodHandle { reference_kind, reference_index } =>
				("MethodHandle", format!("{reference_kind}:#{reference_index}"), Some(self.method_handle(index))),
			PoolEntry::MethodType { descriptor_index } =>
				("MethodType", placeholder(descriptor_index), Some(self.utf8(descriptor_index))),
			PoolEntry::Dynamic { bootstrap_method_attribute_index, name_and_type_index } =>
				("Dynamic", format!("#{bootstrap_method_attribute_index}:#{name_and_type_index}"), Some(self.dynamic(index))),
			PoolEntry::InvokeDynamic { bootstrap_method_attribute_index, name_and_type_index } =>
				("InvokeDynamic", format!("#{bootstrap_method_attribute_index}:#{name_and_type_index}"), Some(self.dynamic(index))),
			PoolEntry::Module { name_index } =>
				("Module", placeholder(name_index), Some(self.utf8(name_index))),
			PoolEntry::Package { name_index } =>
				("Package", placeholder(name_index), Some(self.utf8(name_index))),
		}
	}
}

pub(crate) fn placeholder(index: u16) -> String {
	format!("#{index}")
}

fn method_handle_kind(kind: u8) -> String {
	match kind {
		method_handle::GET_FIELD          => "REF_getField".to_owned(),
		method_handle::GET_STATIC         => "REF_getStatic".to_owned(),
		method_handle::PUT_FIELD          => "REF_putField".to_owned(),
		method_handle::PUT_STATIC         => "REF_putStatic".to_owned(),
		method_handle::INVOKE_VIRTUAL     => "REF_invokeVirtual".to_owned(),
		method_handle::INVOKE_STATIC      => "REF_invokeStatic".to_owned(),
		method_handle::INVOKE_SPECIAL     => "REF_invokeSpecial".to_owned(),
		method_handle::NEW_INVOKE_SPECIAL => "REF_newInvokeSpecial".to_owned(),
		method_handle::INVOKE_INTERFACE   => "REF_invokeInterface".to_owned(),
		kind => format!("REF_{kind}"),
	}
}

/// Whether the name reads as `/` separated identifier words, needing no quoting.
fn is_identifier_path(name: &JavaStr) -> bool {
	let mut at_part_start = true;
	for ch in name.chars() {
		let Some(c) = ch.as_char() else {
			return false;
		};
		if c == '/' {
			if at_part_start {
				return false;
			}
			at_part_start = true;
		} else if at_part_start {
			if !(c.is_alphabetic() || c == '_' || c == '$') {
				return false;
			}
			at_part_start = false;
		} else if !(c.is_alphanumeric() || c == '_' || c == '$') {
			return false;
		}
	}
	!name.is_empty() && !at_part_start
}

/// Escapes the content of a name or string: the named escapes for the usual
/// suspects, `\uxxxx` for other control characters and for unpaired surrogates.
fn escape_text(text: &JavaStr) -> String {
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch.as_char() {
			Some('\t') => out.push_str("\\t"),
			Some('\n') => out.push_str("\\n"),
			Some('\u{8}') => out.push_str("\\b"),
			Some('\u{c}') => out.push_str("\\f"),
			Some('\r') => out.push_str("\\r"),
			Some('\\') => out.push_str("\\\\"),
			Some('"') => out.push_str("\\\""),
			Some('\'') => out.push_str("\\'"),
			Some(c) if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			Some(c) => out.push(c),
			// an unpaired surrogate, which a rust string cannot hold
			None => out.push_str(&format!("\\u{:04x}", ch.as_u32())),
		}
	}
	out
}

/// A binary name, quoted and escaped when it isn't a plain identifier path.
pub(crate) fn escape_name(name: &JavaStr) -> String {
	if is_identifier_path(name) {
		name.to_string()
	} else {
		format!("\"{}\"", escape_text(name))
	}
}

/// A binary name as it would appear in source: dots for slashes, quoted when odd.
pub(crate) fn java_name(name: &JavaStr) -> String {
	if is_identifier_path(name) {
		name.to_string().replace('/', ".")
	} else {
		format!("\"{}\"", escape_text(name))
	}
}

/// The source-like rendering of a parsed field descriptor type.
pub(crate) fn java_type(parsed: &Type) -> String {
	match parsed {
		Type::B => "byte".to_owned(),
		Type::C => "char".to_owned(),
		Type::D => "double".to_owned(),
		Type::F => "float".to_owned(),
		Type::I => "int".to_owned(),
		Type::J => "long".to_owned(),
		Type::S => "short".to_owned(),
		Type::Z => "boolean".to_owned(),
		Type::Object(name) => java_name(name),
		Type::Array(dimension, inner) => {
			let mut out = match inner {
				ArrayType::B => "byte".to_owned(),
				ArrayType::C => "char".to_owned(),
				ArrayType::D => "double".to_owned(),
				ArrayType::F => "float".to_owned(),
				ArrayType::I => "int".to_owned(),
				ArrayType::J => "long".to_owned(),
				ArrayType::S => "short".to_owned(),
				ArrayType::Z => "boolean".to_owned(),
				ArrayType::Object(name) => java_name(name),
			};
			for _ in 0..*dimension {
				out.push_str("[]");
			}
			out
		},
	}
}

/// Renders a field descriptor as a java type, falling back to the quoted raw
/// text when it doesn't parse as one.
pub(crate) fn java_descriptor(descriptor: &JavaStr) -> String {
	match parse_field_descriptor(descriptor) {
		Ok(parsed) => java_type(&parsed),
		Err(_) => escape_name(descriptor),
	}
}

pub(crate) fn float_string(value: f32) -> String {
	if value.is_nan() {
		"NaNf".to_owned()
	} else if value.is_infinite() {
		if value < 0.0 { "-Infinityf".to_owned() } else { "Infinityf".to_owned() }
	} else if value == value.trunc() && value.abs() < 1e16 {
		format!("{value:.1}f")
	} else {
		format!("{value}f")
	}
}

pub(crate) fn double_string(value: f64) -> String {
	if value.is_nan() {
		"NaNd".to_owned()
	} else if value.is_infinite() {
		if value < 0.0 { "-Infinityd".to_owned() } else { "Infinityd".to_owned() }
	} else if value == value.trunc() && value.abs() < 1e16 {
		format!("{value:.1}d")
	} else {
		format!("{value}d")
	}
}

#[cfg(test)]
mod testing {
	use std::io::Cursor;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use jclass::class_constants::pool;
	use super::*;

	struct PoolBuilder {
		bytes: Vec<u8>,
		count: u16,
	}

	impl PoolBuilder {
		fn new() -> PoolBuilder {
			PoolBuilder { bytes: Vec::new(), count: 1 }
		}

		fn utf8(mut self, text: &str) -> PoolBuilder {
			self.bytes.push(pool::UTF8);
			self.bytes.extend((text.len() as u16).to_be_bytes());
			self.bytes.extend(text.as_bytes());
			self.count += 1;
			self
		}

		fn entry(mut self, tag: u8, payload: &[u8]) -> PoolBuilder {
			self.bytes.push(tag);
			self.bytes.extend(payload);
			self.count += 1;
			if tag == pool::LONG || tag == pool::DOUBLE {
				self.count += 1;
			}
			self
		}

		fn build(self) -> Result<Pool> {
			let mut bytes = self.count.to_be_bytes().to_vec();
			bytes.extend(self.bytes);
			Pool::read(&mut Cursor::new(bytes))
		}
	}

	#[test]
	fn names_quote_and_escape() {
		assert_eq!(escape_name(JavaStr::from_str("java/lang/Object")), "java/lang/Object");
		assert_eq!(escape_name(JavaStr::from_str("<init>")), "\"<init>\"");
		assert_eq!(escape_name(JavaStr::from_str("[I")), "\"[I\"");
		assert_eq!(escape_name(JavaStr::from_str("a\tb")), "\"a\\tb\"");
		assert_eq!(escape_name(JavaStr::from_str("a\u{1}b")), "\"a\\u0001b\"");
		assert_eq!(escape_name(JavaStr::from_str("")), "\"\"");
		assert_eq!(escape_name(JavaStr::from_str("a//b")), "\"a//b\"");
		assert_eq!(escape_name(JavaStr::from_str("3x")), "\"3x\"");
		assert_eq!(escape_name(JavaStr::from_str("$inner_1")), "$inner_1");
	}

	#[test]
	fn java_names_use_dots() {
		assert_eq!(java_name(JavaStr::from_str("java/lang/Object")), "java.lang.Object");
		assert_eq!(java_name(JavaStr::from_str("[Ljava/lang/Object;")), "\"[Ljava/lang/Object;\"");
	}

	#[test]
	fn numbers_carry_their_suffix() {
		assert_eq!(float_string(1.5), "1.5f");
		assert_eq!(float_string(2.0), "2.0f");
		assert_eq!(float_string(f32::NAN), "NaNf");
		assert_eq!(float_string(f32::NEG_INFINITY), "-Infinityf");
		assert_eq!(double_string(-0.25), "-0.25d");
		assert_eq!(double_string(3.0), "3.0d");
		assert_eq!(double_string(f64::INFINITY), "Infinityd");
	}

	#[test]
	fn member_refs_resolve_and_simplify() -> Result<()> {
		let pool = PoolBuilder::new()
			.utf8("Test")                            // 1
			.entry(pool::CLASS, &[0, 1])             // 2
			.utf8("other/Owner")                     // 3
			.entry(pool::CLASS, &[0, 3])             // 4
			.utf8("run")                             // 5
			.utf8("()V")                             // 6
			.entry(pool::NAME_AND_TYPE, &[0, 5, 0, 6]) // 7
			.entry(pool::METHOD_REF, &[0, 2, 0, 7])  // 8: Test.run:()V
			.entry(pool::METHOD_REF, &[0, 4, 0, 7])  // 9: other/Owner.run:()V
			.build()?;

		let mut pd = PoolDisplay::new(&pool, 2, true);
		assert_eq!(pd.member_ref(8), "run:()V");
		assert_eq!(pd.member_ref(9), "other/Owner.run:()V");
		assert_eq!(pd.into_faults(), Vec::new());

		let mut pd = PoolDisplay::new(&pool, 2, false);
		assert_eq!(pd.member_ref(8), "Test.run:()V");

		Ok(())
	}

	#[test]
	fn dangling_references_become_placeholders_with_faults() -> Result<()> {
		let pool = PoolBuilder::new()
			.utf8("Test")                            // 1
			.entry(pool::CLASS, &[0, 1])             // 2
			.entry(pool::CLASS, &[0, 40])            // 3: dangling name
			.entry(pool::NAME_AND_TYPE, &[0, 50, 0, 60]) // 4: both dangling
			.entry(pool::METHOD_REF, &[0, 3, 0, 4])  // 5
			.build()?;

		let mut pd = PoolDisplay::new(&pool, 2, true);
		pd.set_location("method m:()V");

		assert_eq!(pd.member_ref(5), "#3.#50:#60");
		assert_eq!(pd.constant(77), "#77");

		let faults = pd.into_faults();
		assert_eq!(faults.len(), 4);
		assert!(faults.iter().all(|f| f.kind == FaultKind::PoolResolution));
		assert_eq!(faults[0].location, "method m:()V");

		Ok(())
	}

	#[test]
	fn constants_are_tagged() -> Result<()> {
		let pool = PoolBuilder::new()
			.utf8("hi\nthere")                       // 1
			.entry(pool::STRING, &[0, 1])            // 2
			.entry(pool::INTEGER, &[0xff, 0xff, 0xff, 0xfb]) // 3: -5
			.entry(pool::LONG, &[0, 0, 0, 0, 0, 0, 0, 9]) // 4 (and 5)
			.entry(pool::FLOAT, &[0x3f, 0xc0, 0, 0]) // 6: 1.5
			.utf8("()V")                             // 7
			.entry(pool::METHOD_TYPE, &[0, 7])       // 8
			.build()?;

		let mut pd = PoolDisplay::new(&pool, 0, true);
		assert_eq!(pd.constant(2), "String hi\\nthere");
		assert_eq!(pd.constant(3), "int -5");
		assert_eq!(pd.constant(4), "long 9l");
		assert_eq!(pd.constant(6), "float 1.5f");
		assert_eq!(pd.constant(8), "MethodType ()V");

		Ok(())
	}

	#[test]
	fn dump_shows_the_stored_form() -> Result<()> {
		let pool = PoolBuilder::new()
			.utf8("Test")                            // 1
			.entry(pool::CLASS, &[0, 1])             // 2
			.utf8("x")                               // 3
			.utf8("I")                               // 4
			.entry(pool::NAME_AND_TYPE, &[0, 3, 0, 4]) // 5
			.entry(pool::FIELD_REF, &[0, 2, 0, 5])   // 6
			.build()?;

		let mut pd = PoolDisplay::new(&pool, 0, false);

		let entry = pool.get(6)?.clone();
		assert_eq!(pd.dump_entry(6, &entry), ("Fieldref", "#2.#5".to_owned(), Some("Test.x:I".to_owned())));

		let entry = pool.get(2)?.clone();
		assert_eq!(pd.dump_entry(2, &entry), ("Class", "#1".to_owned(), Some("Test".to_owned())));

		Ok(())
	}
}

//! Parsing and rendering of generic signatures from the `Signature` attribute.
//!
//! Signatures extend the descriptor grammar with type parameters, type arguments,
//! wildcards and type variables; see
//! [the JVMS](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.7.9.1)
//! for the grammar. Parsing builds a small tree, rendering turns it back into
//! source-like java, `java/util/List<Ljava/lang/String;>` becoming
//! `java.util.List<java.lang.String>`.

use std::iter::Peekable;
use anyhow::{anyhow, bail, Context, Result};
use java_string::{Chars, JavaStr, JavaString};
use crate::pool_display::java_name;

/// The signature of a class: type parameters, generic superclass, generic interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
	pub type_parameters: Vec<TypeParameter>,
	pub superclass: ClassType,
	pub interfaces: Vec<ClassType>,
}

/// The signature of a method, including `throws` types when any are generic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
	pub type_parameters: Vec<TypeParameter>,
	pub parameters: Vec<TypeSignature>,
	/// [`None`] means the method returns `void`.
	pub result: Option<TypeSignature>,
	pub throws: Vec<ReferenceType>,
}

/// One declared type parameter, like `T extends Number & Comparable<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
	pub name: JavaString,
	/// The class bound; the grammar allows leaving it empty (`<T:>` style).
	pub class_bound: Option<ReferenceType>,
	pub interface_bounds: Vec<ReferenceType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
	Byte,
	Char,
	Double,
	Float,
	Int,
	Long,
	Short,
	Boolean,
	Reference(ReferenceType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceType {
	Class(ClassType),
	TypeVariable(JavaString),
	Array(Box<TypeSignature>),
}

/// A possibly parameterized class type, like `java/util/Map<K, V>.Entry<K, V>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassType {
	/// The binary name of the outermost class of the chain.
	pub name: JavaString,
	pub type_arguments: Vec<TypeArgument>,
	/// The `.Inner<...>` chain, one simple name with arguments per step.
	pub nested: Vec<(JavaString, Vec<TypeArgument>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
	/// `*`, rendering as `?`.
	Any,
	/// `+`, rendering as `? extends ...`.
	Extends(ReferenceType),
	/// `-`, rendering as `? super ...`.
	Super(ReferenceType),
	Exact(ReferenceType),
}

pub fn parse_class_signature(signature: &JavaStr) -> Result<ClassSignature> {
	let mut chars = signature.chars().peekable();

	let type_parameters = read_type_parameters(&mut chars)
		.with_context(|| anyhow!("failed to read class signature {signature:?}"))?;
	let superclass = read_class_type(&mut chars)
		.with_context(|| anyhow!("failed to read superclass of signature {signature:?}"))?;

	let mut interfaces = Vec::new();
	while chars.peek().is_some() {
		let interface = read_class_type(&mut chars)
			.with_context(|| anyhow!("failed to read superinterface of signature {signature:?}"))?;
		interfaces.push(interface);
	}

	Ok(ClassSignature { type_parameters, superclass, interfaces })
}

pub fn parse_method_signature(signature: &JavaStr) -> Result<MethodSignature> {
	let mut chars = signature.chars().peekable();

	let type_parameters = read_type_parameters(&mut chars)
		.with_context(|| anyhow!("failed to read method signature {signature:?}"))?;

	if chars.next_if_eq(&'(').is_none() {
		bail!("method signature {signature:?} doesn't continue with '('");
	}
	let mut parameters = Vec::new();
	loop {
		if chars.next_if_eq(&')').is_some() {
			break;
		}
		let parameter = read_type_signature(&mut chars)
			.with_context(|| anyhow!("failed to read parameter of signature {signature:?}"))?;
		parameters.push(parameter);
	}

	let result = if chars.next_if_eq(&'V').is_some() {
		None
	} else {
		let result = read_type_signature(&mut chars)
			.with_context(|| anyhow!("failed to read result of signature {signature:?}"))?;
		Some(result)
	};

	let mut throws = Vec::new();
	while chars.next_if_eq(&'^').is_some() {
		let thrown = if chars.peek().is_some_and(|&ch| ch == 'T') {
			read_type_variable(&mut chars)?
		} else {
			ReferenceType::Class(read_class_type(&mut chars)?)
		};
		throws.push(thrown);
	}

	if chars.peek().is_some() {
		bail!("expected end of method signature {signature:?}, got {:?} remaining", JavaString::from_iter(chars));
	}

	Ok(MethodSignature { type_parameters, parameters, result, throws })
}

pub fn parse_field_signature(signature: &JavaStr) -> Result<ReferenceType> {
	let mut chars = signature.chars().peekable();

	let parsed = read_reference_type(&mut chars)
		.with_context(|| anyhow!("failed to read field signature {signature:?}"))?;

	if chars.peek().is_some() {
		bail!("expected end of field signature {signature:?}, got {:?} remaining", JavaString::from_iter(chars));
	}

	Ok(parsed)
}

fn read_type_parameters(chars: &mut Peekable<Chars>) -> Result<Vec<TypeParameter>> {
	let mut type_parameters = Vec::new();
	if chars.next_if_eq(&'<').is_none() {
		return Ok(type_parameters);
	}
	loop {
		if chars.next_if_eq(&'>').is_some() {
			if type_parameters.is_empty() {
				bail!("type parameter list is empty");
			}
			return Ok(type_parameters);
		}

		let mut name = JavaString::new();
		loop {
			let char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of signature"))?;
			if char == ':' {
				break;
			}
			name.push_java(char);
		}
		if name.is_empty() {
			bail!("type parameter has an empty name");
		}

		// the class bound may be missing, the interface bounds each start with another ':'
		let class_bound = match chars.peek() {
			Some(&ch) if ch == ':' || ch == '>' => None,
			_ => Some(read_reference_type(chars)?),
		};
		let mut interface_bounds = Vec::new();
		while chars.next_if_eq(&':').is_some() {
			interface_bounds.push(read_reference_type(chars)?);
		}

		type_parameters.push(TypeParameter { name, class_bound, interface_bounds });
	}
}

fn read_type_signature(chars: &mut Peekable<Chars>) -> Result<TypeSignature> {
	let char = chars.peek().copied().ok_or_else(|| anyhow!("unexpected abrupt ending of signature"))?;
	Ok(if char == 'B' {
		chars.next();
		TypeSignature::Byte
	} else if char == 'C' {
		chars.next();
		TypeSignature::Char
	} else if char == 'D' {
		chars.next();
		TypeSignature::Double
	} else if char == 'F' {
		chars.next();
		TypeSignature::Float
	} else if char == 'I' {
		chars.next();
		TypeSignature::Int
	} else if char == 'J' {
		chars.next();
		TypeSignature::Long
	} else if char == 'S' {
		chars.next();
		TypeSignature::Short
	} else if char == 'Z' {
		chars.next();
		TypeSignature::Boolean
	} else {
		TypeSignature::Reference(read_reference_type(chars)?)
	})
}

fn read_reference_type(chars: &mut Peekable<Chars>) -> Result<ReferenceType> {
	let char = chars.peek().copied().ok_or_else(|| anyhow!("unexpected abrupt ending of signature"))?;
	if char == 'L' {
		Ok(ReferenceType::Class(read_class_type(chars)?))
	} else if char == 'T' {
		read_type_variable(chars)
	} else if char == '[' {
		chars.next();
		Ok(ReferenceType::Array(Box::new(read_type_signature(chars)?)))
	} else {
		bail!("unexpected char {char:?} in signature");
	}
}

fn read_type_variable(chars: &mut Peekable<Chars>) -> Result<ReferenceType> {
	chars.next(); // the 'T'
	let mut name = JavaString::new();
	loop {
		let char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of signature"))?;
		if char == ';' {
			break;
		}
		name.push_java(char);
	}
	if name.is_empty() {
		bail!("type variable has an empty name");
	}
	Ok(ReferenceType::TypeVariable(name))
}

fn read_class_type(chars: &mut Peekable<Chars>) -> Result<ClassType> {
	if chars.next_if_eq(&'L').is_none() {
		bail!("class type signature doesn't start with 'L'");
	}

	let (name, type_arguments) = read_class_type_part(chars)?;
	if name.is_empty() {
		bail!("class type signature has an empty name");
	}

	let mut nested = Vec::new();
	while chars.next_if_eq(&'.').is_some() {
		let (simple_name, arguments) = read_class_type_part(chars)?;
		if simple_name.is_empty() {
			bail!("nested class type signature has an empty name");
		}
		nested.push((simple_name, arguments));
	}

	if chars.next_if_eq(&';').is_none() {
		bail!("class type signature doesn't end with ';'");
	}

	Ok(ClassType { name, type_arguments, nested })
}

/// Reads one name (with slashes for the outermost part) and its optional `<...>`.
/// Stops before the `.`, `;` or end that follows.
fn read_class_type_part(chars: &mut Peekable<Chars>) -> Result<(JavaString, Vec<TypeArgument>)> {
	let mut name = JavaString::new();
	loop {
		match chars.peek().copied() {
			None => bail!("unexpected abrupt ending of signature"),
			Some(ch) if ch == ';' || ch == '.' => break,
			Some(ch) if ch == '<' => {
				chars.next();
				let mut arguments = Vec::new();
				loop {
					if chars.next_if_eq(&'>').is_some() {
						if arguments.is_empty() {
							bail!("type argument list is empty");
						}
						return Ok((name, arguments));
					}
					arguments.push(read_type_argument(chars)?);
				}
			},
			Some(ch) => {
				chars.next();
				name.push_java(ch);
			},
		}
	}
	Ok((name, Vec::new()))
}

fn read_type_argument(chars: &mut Peekable<Chars>) -> Result<TypeArgument> {
	Ok(if chars.next_if_eq(&'*').is_some() {
		TypeArgument::Any
	} else if chars.next_if_eq(&'+').is_some() {
		TypeArgument::Extends(read_reference_type(chars)?)
	} else if chars.next_if_eq(&'-').is_some() {
		TypeArgument::Super(read_reference_type(chars)?)
	} else {
		TypeArgument::Exact(read_reference_type(chars)?)
	})
}

impl TypeSignature {
	pub fn java(&self) -> String {
		match self {
			TypeSignature::Byte => "byte".to_owned(),
			TypeSignature::Char => "char".to_owned(),
			TypeSignature::Double => "double".to_owned(),
			TypeSignature::Float => "float".to_owned(),
			TypeSignature::Int => "int".to_owned(),
			TypeSignature::Long => "long".to_owned(),
			TypeSignature::Short => "short".to_owned(),
			TypeSignature::Boolean => "boolean".to_owned(),
			TypeSignature::Reference(reference) => reference.java(),
		}
	}
}

impl ReferenceType {
	pub fn java(&self) -> String {
		match self {
			ReferenceType::Class(class_type) => class_type.java(),
			ReferenceType::TypeVariable(name) => name.to_string(),
			ReferenceType::Array(inner) => format!("{}[]", inner.java()),
		}
	}

	fn is_object(&self) -> bool {
		matches!(self, ReferenceType::Class(class_type)
			if class_type.name == "java/lang/Object" && class_type.type_arguments.is_empty() && class_type.nested.is_empty())
	}
}

impl ClassType {
	pub fn java(&self) -> String {
		let mut out = java_name(&self.name);
		push_type_arguments(&mut out, &self.type_arguments);
		for (simple_name, arguments) in &self.nested {
			out.push('.');
			out.push_str(&simple_name.to_string());
			push_type_arguments(&mut out, arguments);
		}
		out
	}
}

fn push_type_arguments(out: &mut String, arguments: &[TypeArgument]) {
	if arguments.is_empty() {
		return;
	}
	out.push('<');
	for (i, argument) in arguments.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		match argument {
			TypeArgument::Any => out.push('?'),
			TypeArgument::Extends(reference) => {
				out.push_str("? extends ");
				out.push_str(&reference.java());
			},
			TypeArgument::Super(reference) => {
				out.push_str("? super ");
				out.push_str(&reference.java());
			},
			TypeArgument::Exact(reference) => out.push_str(&reference.java()),
		}
	}
	out.push('>');
}

/// Renders a `<T extends A & B, U>` list, or nothing when there are no parameters.
/// An `extends java.lang.Object` bound alone is left out, like in source.
pub fn type_parameters_java(type_parameters: &[TypeParameter]) -> String {
	if type_parameters.is_empty() {
		return String::new();
	}
	let mut out = String::from("<");
	for (i, parameter) in type_parameters.iter().enumerate() {
		if i > 0 {
			out.push_str(", ");
		}
		out.push_str(&parameter.name.to_string());

		let mut bounds: Vec<String> = Vec::new();
		if let Some(class_bound) = &parameter.class_bound {
			if !class_bound.is_object() || !parameter.interface_bounds.is_empty() {
				bounds.push(class_bound.java());
			}
		}
		for bound in &parameter.interface_bounds {
			bounds.push(bound.java());
		}
		if !bounds.is_empty() {
			out.push_str(" extends ");
			out.push_str(&bounds.join(" & "));
		}
	}
	out.push('>');
	out
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	fn field(signature: &str) -> Result<String> {
		Ok(parse_field_signature(JavaStr::from_str(signature))?.java())
	}

	#[test]
	fn field_signatures() -> Result<()> {
		assert_eq!(field("Ljava/util/List<Ljava/lang/String;>;")?, "java.util.List<java.lang.String>");
		assert_eq!(field("Ljava/util/Map<TK;TV;>;")?, "java.util.Map<K, V>");
		assert_eq!(field("[TT;")?, "T[]");
		assert_eq!(field("[[I")?, "int[][]");
		assert_eq!(field("Ljava/util/List<*>;")?, "java.util.List<?>");
		assert_eq!(field("Ljava/util/List<+Ljava/lang/Number;>;")?, "java.util.List<? extends java.lang.Number>");
		assert_eq!(field("Ljava/util/List<-TT;>;")?, "java.util.List<? super T>");
		assert_eq!(field("Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;")?, "java.util.Map<K, V>.Entry<K, V>");
		Ok(())
	}

	#[test]
	fn field_signature_errors() {
		assert!(parse_field_signature(JavaStr::from_str("")).is_err());
		assert!(parse_field_signature(JavaStr::from_str("I")).is_err());
		assert!(parse_field_signature(JavaStr::from_str("Ljava/util/List<>;")).is_err());
		assert!(parse_field_signature(JavaStr::from_str("Ljava/util/List<Ljava/lang/String;>")).is_err());
		assert!(parse_field_signature(JavaStr::from_str("T;")).is_err());
		assert!(parse_field_signature(JavaStr::from_str("Ljava/util/List;junk")).is_err());
	}

	#[test]
	fn method_signatures() -> Result<()> {
		let signature = parse_method_signature(JavaStr::from_str("<T:Ljava/lang/Object;>(TT;I)TT;^Ljava/io/IOException;"))?;

		assert_eq!(type_parameters_java(&signature.type_parameters), "<T>");
		assert_eq!(signature.parameters.len(), 2);
		assert_eq!(signature.parameters[0].java(), "T");
		assert_eq!(signature.parameters[1].java(), "int");
		assert_eq!(signature.result.as_ref().map(TypeSignature::java), Some("T".to_owned()));
		assert_eq!(signature.throws.len(), 1);
		assert_eq!(signature.throws[0].java(), "java.io.IOException");

		Ok(())
	}

	#[test]
	fn method_signature_void_result() -> Result<()> {
		let signature = parse_method_signature(JavaStr::from_str("()V"))?;

		assert_eq!(signature.type_parameters, Vec::new());
		assert_eq!(signature.parameters, Vec::new());
		assert_eq!(signature.result, None);
		assert_eq!(signature.throws, Vec::new());

		Ok(())
	}

	#[test]
	fn method_signature_errors() {
		assert!(parse_method_signature(JavaStr::from_str("")).is_err());
		assert!(parse_method_signature(JavaStr::from_str("<>()V")).is_err());
		assert!(parse_method_signature(JavaStr::from_str("(TT;")).is_err());
		assert!(parse_method_signature(JavaStr::from_str("()VX")).is_err());
		assert!(parse_method_signature(JavaStr::from_str("()TT;^I")).is_err());
	}

	#[test]
	fn class_signatures() -> Result<()> {
		let signature = parse_class_signature(JavaStr::from_str(
			"<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;Ljava/lang/Comparable<TE;>;Ljava/io/Serializable;"
		))?;

		assert_eq!(type_parameters_java(&signature.type_parameters), "<E extends java.lang.Enum<E>>");
		assert_eq!(signature.superclass.java(), "java.lang.Object");
		assert_eq!(signature.interfaces.len(), 2);
		assert_eq!(signature.interfaces[0].java(), "java.lang.Comparable<E>");
		assert_eq!(signature.interfaces[1].java(), "java.io.Serializable");

		Ok(())
	}

	#[test]
	fn type_parameter_bounds_join_with_ampersand() -> Result<()> {
		let signature = parse_class_signature(JavaStr::from_str(
			"<T:Ljava/lang/Number;:Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;"
		))?;

		assert_eq!(
			type_parameters_java(&signature.type_parameters),
			"<T extends java.lang.Number & java.lang.Comparable<T>>",
		);

		Ok(())
	}

	#[test]
	fn interface_only_bound_keeps_the_object_class_bound_out() -> Result<()> {
		let signature = parse_class_signature(JavaStr::from_str(
			"<T::Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;"
		))?;

		assert_eq!(signature.type_parameters[0].class_bound, None);
		assert_eq!(
			type_parameters_java(&signature.type_parameters),
			"<T extends java.lang.Comparable<T>>",
		);

		Ok(())
	}
}

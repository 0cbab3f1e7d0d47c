use std::iter::Peekable;
use anyhow::{anyhow, bail, Context, Result};
use java_string::{Chars, JavaCodePoint, JavaStr, JavaString};

/// Represents a type from a field or method descriptor.
///
/// In case of an array, use the [`Type::Array`] variant; its dimension should
/// never be zero.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Type {
	/// A `byte`.
	B,
	/// A `char`.
	C,
	/// A `double`.
	D,
	/// A `float`.
	F,
	/// An `int`.
	I,
	/// A `long`.
	J,
	/// A `short`.
	S,
	/// A `boolean`.
	Z,
	/// An instance of the class with the given binary name, like `java/lang/Object`.
	Object(JavaString),
	/// An array type, represented by the dimension and the inner [`ArrayType`].
	Array(u8, ArrayType),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ArrayType {
	B,
	C,
	D,
	F,
	I,
	J,
	S,
	Z,
	Object(JavaString),
}

// The grammar for descriptors is:
//   FieldDescriptor:
//     FieldType
//
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//     "L" ClassName ";" |
//     "[" FieldType
fn read_field_type(chars: &mut Peekable<Chars>) -> Result<Type> {
	const B: JavaCodePoint = JavaCodePoint::from_char('B');
	const C: JavaCodePoint = JavaCodePoint::from_char('C');
	const D: JavaCodePoint = JavaCodePoint::from_char('D');
	const F: JavaCodePoint = JavaCodePoint::from_char('F');
	const I: JavaCodePoint = JavaCodePoint::from_char('I');
	const J: JavaCodePoint = JavaCodePoint::from_char('J');
	const L: JavaCodePoint = JavaCodePoint::from_char('L');
	const S: JavaCodePoint = JavaCodePoint::from_char('S');
	const Z: JavaCodePoint = JavaCodePoint::from_char('Z');

	let mut array_dimension: u8 = 0;
	while chars.next_if_eq(&'[').is_some() {
		array_dimension = array_dimension.checked_add(1)
			.ok_or_else(|| anyhow!("descriptor has more than 255 array dimensions"))?;
	}

	if array_dimension == 0 {
		let char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
		let descriptor = match char {
			B => Type::B,
			C => Type::C,
			D => Type::D,
			F => Type::F,
			I => Type::I,
			J => Type::J,
			S => Type::S,
			Z => Type::Z,
			L => Type::Object(read_class_name(chars)?),
			x => {
				bail!("unexpected char {x:?} in descriptor");
			}
		};

		Ok(descriptor)
	} else {
		let char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
		let descriptor = match char {
			B => Type::Array(array_dimension, ArrayType::B),
			C => Type::Array(array_dimension, ArrayType::C),
			D => Type::Array(array_dimension, ArrayType::D),
			F => Type::Array(array_dimension, ArrayType::F),
			I => Type::Array(array_dimension, ArrayType::I),
			J => Type::Array(array_dimension, ArrayType::J),
			S => Type::Array(array_dimension, ArrayType::S),
			Z => Type::Array(array_dimension, ArrayType::Z),
			L => Type::Array(array_dimension, ArrayType::Object(read_class_name(chars)?)),
			x => {
				bail!("unexpected char {x:?} in descriptor");
			}
		};

		Ok(descriptor)
	}
}

/// Reads the class name of an `L` `ClassName` `;` field type, after the `L` is already consumed.
fn read_class_name(chars: &mut Peekable<Chars>) -> Result<JavaString> {
	let mut s = JavaString::new();

	let mut char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
	while char != ';' {
		s.push_java(char);

		char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
	}

	Ok(s)
}

/// Attempts to parse a field descriptor.
///
/// A field descriptor is defined by the [grammar](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.3.2) in the
/// Java Virtual Machine Specification.
pub fn parse_field_descriptor(descriptor: &JavaStr) -> Result<Type> {
	let mut chars = descriptor.chars().peekable();

	let parsed = read_field_type(&mut chars)
		.with_context(|| anyhow!("failed to read field descriptor {descriptor:?}"))?;

	if chars.peek().is_some() {
		bail!("expected end of field descriptor {descriptor:?}, got {:?} remaining", JavaString::from_iter(chars));
	}

	Ok(parsed)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedMethodDescriptor {
	pub parameter_descriptors: Vec<Type>,
	/// [`None`] means the method returns `void`.
	pub return_descriptor: Option<Type>,
}

/// Attempts to parse a method descriptor, like `(IDLjava/lang/Thread;)Ljava/lang/Object;`.
pub fn parse_method_descriptor(descriptor: &JavaStr) -> Result<ParsedMethodDescriptor> {
	let mut chars = descriptor.chars().peekable();

	if chars.next_if_eq(&'(').is_none() {
		bail!("method descriptor {descriptor:?} doesn't start with '('");
	}

	let mut parameter_descriptors = Vec::new();
	loop {
		if chars.next_if_eq(&')').is_some() {
			break;
		}

		let parsed = read_field_type(&mut chars)
			.with_context(|| anyhow!("failed to read parameter descriptor of {descriptor:?}"))?;
		parameter_descriptors.push(parsed);
	}

	let return_descriptor = if chars.next_if_eq(&'V').is_some() {
		None
	} else {
		let parsed = read_field_type(&mut chars)
			.with_context(|| anyhow!("failed to read return descriptor of {descriptor:?}"))?;

		Some(parsed)
	};

	if chars.peek().is_some() {
		bail!("expected end of method descriptor {descriptor:?}, got {} remaining", JavaString::from_iter(chars));
	}

	Ok(ParsedMethodDescriptor {
		parameter_descriptors,
		return_descriptor,
	})
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use java_string::{JavaStr, JavaString};
	use crate::tree::descriptor::{parse_field_descriptor, parse_method_descriptor, ArrayType, ParsedMethodDescriptor, Type};

	fn object(name: &str) -> Type {
		Type::Object(JavaString::from(name))
	}

	#[test]
	fn field_parse() -> Result<()> {
		assert_eq!(parse_field_descriptor(JavaStr::from_str("I"))?, Type::I);
		assert_eq!(parse_field_descriptor(JavaStr::from_str("D"))?, Type::D);
		assert_eq!(
			parse_field_descriptor(JavaStr::from_str("Ljava/lang/Thread;"))?,
			object("java/lang/Thread"),
		);
		assert_eq!(
			parse_field_descriptor(JavaStr::from_str("[[[D"))?,
			Type::Array(3, ArrayType::D),
		);
		assert_eq!(
			parse_field_descriptor(JavaStr::from_str("[Ljava/lang/Object;"))?,
			Type::Array(1, ArrayType::Object(JavaString::from("java/lang/Object"))),
		);
		Ok(())
	}

	#[test]
	fn field_parse_err() {
		assert!(parse_field_descriptor(JavaStr::from_str("")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("V")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("(")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str(")")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("()")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("[V")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("()V")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("(D)I")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("L;DV")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("II")).is_err());
		assert!(parse_field_descriptor(JavaStr::from_str("Ljava/lang/Thread")).is_err());
	}

	#[test]
	fn method_parse() -> Result<()> {
		assert_eq!(
			parse_method_descriptor(JavaStr::from_str("(IDLjava/lang/Thread;)Ljava/lang/Object;"))?,
			ParsedMethodDescriptor {
				parameter_descriptors: vec![
					Type::I,
					Type::D,
					object("java/lang/Thread"),
				],
				return_descriptor: Some(object("java/lang/Object")),
			},
		);

		assert_eq!(
			parse_method_descriptor(JavaStr::from_str("([Ljava/lang/String;)V"))?,
			ParsedMethodDescriptor {
				parameter_descriptors: vec![
					Type::Array(1, ArrayType::Object(JavaString::from("java/lang/String"))),
				],
				return_descriptor: None,
			},
		);

		assert_eq!(
			parse_method_descriptor(JavaStr::from_str("()V"))?,
			ParsedMethodDescriptor {
				parameter_descriptors: Vec::new(),
				return_descriptor: None,
			},
		);

		Ok(())
	}

	#[test]
	fn method_parse_err() {
		assert!(parse_method_descriptor(JavaStr::from_str("")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(D")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(V")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("()")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(I)")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(V)D")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(D)[")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(D)[V")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("[(D)V")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("(L;;)V")).is_err());
		assert!(parse_method_descriptor(JavaStr::from_str("()VV")).is_err());
	}
}

//! Methods for converting the string format used in the Java Virtual Machine Specification to
//! rust strings.
//!
//! The Java Virtual Machine Specification's string format is using a 2x3-format and storing `\0`
//! using two bytes.
//!
//! See <https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.4.7> for the complete specification of
//! the string format used in the Java Virtual Machine Specification.

use anyhow::{anyhow, Context, Result};
use java_string::JavaString;

/// Takes in a vec of data, tries to read it into a [`JavaString`].
pub(crate) fn from_vec_to_string(vec: Vec<u8>) -> Result<JavaString> {
	JavaString::from_modified_utf8(vec)
		.with_context(|| anyhow!("invalid java utf8 contents"))
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use java_string::JavaStr;
	use pretty_assertions::assert_eq;
	use crate::jstring::from_vec_to_string;

	fn decode_to_str(raw: &[u8], string: &str) -> Result<()> {
		decode_to_java_str(raw, JavaStr::from_str(string))
	}
	fn decode_to_java_str(raw: &[u8], str: &JavaStr) -> Result<()> {
		assert_eq!(from_vec_to_string(raw.to_owned())?, str);
		Ok(())
	}

	#[test]
	fn zero() -> Result<()> {
		decode_to_str(&[0b1100_0000, 0b1000_0000, 0b1100_0000, 0b1000_0000, 0b1100_0000, 0b1000_0000], "\0\0\0")
	}

	#[test]
	fn one_byte() -> Result<()> {
		decode_to_str(&(0x01..=0x7f).collect::<Vec<u8>>(), &('\u{0001}'..='\u{007f}').collect::<String>())?;
		decode_to_str(&(0x01..=0x7f).rev().collect::<Vec<u8>>(), &('\u{0001}'..='\u{007f}').rev().collect::<String>())
	}

	#[test]
	fn two_bytes() -> Result<()> {
		let vec = &[
			0b1100_0000, 0b1000_0000,
			0b1100_0010, 0b1000_0000,
			0b1100_1111, 0b1000_1010,
			0b1101_0011, 0b1011_1110,
			0b1101_1110, 0b1011_1010,
			0b1101_0110, 0b1011_1110,
			0b1101_1111, 0b1011_1111,
		];
		decode_to_java_str(vec, JavaStr::from_str("\u{0000}\u{0080}\u{03ca}\u{04fe}\u{07ba}\u{05be}\u{07ff}"))
	}

	#[test]
	fn three_bytes() -> Result<()> {
		let vec = &[
			0b1110_0000, 0b1010_0000, 0b1000_0000,
			0b1110_0001, 0b1000_1000, 0b1011_0100,
			0b1110_0100, 0b1000_1100, 0b1010_0001,
			0b1110_0111, 0b1010_0010, 0b1001_1101,
			0b1110_1100, 0b1010_1011, 0b1011_1110,
			0b1110_1011, 0b1010_1010, 0b1011_1110,
			0b1110_1111, 0b1011_1111, 0b1011_1111,
		];
		decode_to_java_str(vec, JavaStr::from_str("\u{0800}\u{1234}\u{4321}\u{789d}\u{cafe}\u{babe}\u{ffff}"))
	}

	#[test]
	fn six_bytes() -> Result<()> {
		let vec = &[
			0b1110_1101, 0b1010_0000, 0b1000_0000, 0b1110_1101, 0b1011_0000, 0b1000_0000,
			0b1110_1101, 0b1010_0000, 0b1000_1000, 0b1110_1101, 0b1011_1101, 0b1000_0101,
			0b1110_1101, 0b1010_0100, 0b1001_0000, 0b1110_1101, 0b1011_1100, 0b1010_0001,
			0b1110_1101, 0b1010_0101, 0b1001_1110, 0b1110_1101, 0b1011_0010, 0b1001_1101,
			0b1110_1101, 0b1010_1011, 0b1010_1011, 0b1110_1101, 0b1011_1111, 0b1010_1011,
			0b1110_1101, 0b1010_1001, 0b1010_1111, 0b1110_1101, 0b1011_1001, 0b1010_0110,
			0b1110_1101, 0b1010_1111, 0b1011_1111, 0b1110_1101, 0b1011_1111, 0b1011_1111,
		];
		decode_to_java_str(vec, JavaStr::from_str("\u{010000}\u{012345}\u{054321}\u{06789d}\u{0cafeb}\u{0abe66}\u{10ffff}"))
	}

	#[test]
	fn unmatched_surrogate() -> Result<()> {
		// Not valid unicode, but valid in the class file string format. The resulting code
		// points have no char equivalent.
		for vec in [
			vec![ 0b1110_1101, 0b1010_0000, 0b1000_0000 ],
			vec![ 0b1110_1101, 0b1010_1010, 0b1011_1111 ],
			vec![ 0b1110_1101, 0b1010_1111, 0b1011_1111 ],
			vec![ 0b1110_1101, 0b1011_0000, 0b1000_0000 ],
			vec![ 0b1110_1101, 0b1011_0101, 0b1010_1010 ],
			vec![ 0b1110_1101, 0b1011_1111, 0b1011_1111 ],
		] {
			let string = from_vec_to_string(vec)?;
			assert_eq!(string.chars().count(), 1);
			assert!(string.chars().all(|cp| cp.as_char().is_none()));
		}

		Ok(())
	}
}

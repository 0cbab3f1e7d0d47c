//! A crate for decoding [Java Class Files](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html).
//!
//! This only reads class files; it does not write them back. The decoded
//! [`ClassFile`][tree::class::ClassFile] keeps the constant pool and all raw
//! cross-reference indices around, since a disassembler wants to print `#n`
//! style operands and must survive dangling references instead of rejecting
//! the whole file.
//!
//! Only faults in the outer structure (magic, version, the constant pool
//! itself, a truncated field/method table) are `Err` from [`read_class`].
//! Everything further in, like an attribute whose payload doesn't match its
//! name, decodes to a placeholder and is recorded in
//! [`ClassFile::faults`][tree::class::ClassFile].

pub mod tree;
pub mod bytecode;
pub mod frame;

pub mod class_constants;
mod class_reader;
mod jstring;

pub use class_reader::pool::{Pool, PoolEntry};
pub use class_reader::{Fault, FaultKind};

use std::io::{Cursor, Read};
use anyhow::{Context, Result};
use crate::tree::class::ClassFile;

/// Reads a single java class file from the reader.
pub fn read_class(reader: &mut impl Read) -> Result<ClassFile> {
	class_reader::read(reader)
}

/// Reads a single java class file from a byte slice.
pub fn read_class_bytes(bytes: &[u8]) -> Result<ClassFile> {
	class_reader::read(&mut Cursor::new(bytes))
}

trait ClassRead {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]>;
	fn read_u8(&mut self) -> Result<u8> {
		Ok(u8::from_be_bytes(self.read_n().context("couldn't read u8, perhaps the data's end is reached?")?))
	}
	fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_n().context("couldn't read u16, perhaps the data's end is reached?")?))
	}
	fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_n().context("couldn't read i8, perhaps the data's end is reached?")?))
	}
	fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_n().context("couldn't read i16, perhaps the data's end is reached?")?))
	}
	fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_n().context("couldn't read u32, perhaps the data's end is reached?")?))
	}
	fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_be_bytes(self.read_n().context("couldn't read u64, perhaps the data's end is reached?")?))
	}
	fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_n().context("couldn't read i32, perhaps the data's end is reached?")?))
	}
	fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_n().context("couldn't read i64, perhaps the data's end is reached?")?))
	}

	fn read_u16_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u16()? as usize)
	}
	fn read_u32_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u32()? as usize)
	}
	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>>;
	fn read_vec<T, S, E>(&mut self, get_size: S, mut get_element: E) -> Result<Vec<T>>
		where
			S: FnOnce(&mut Self) -> Result<usize>,
			E: FnMut(&mut Self) -> Result<T>
	{
		let size = get_size(self)?;
		let mut vec = Vec::with_capacity(size);
		for _ in 0..size {
			vec.push(get_element(self)?);
		}
		Ok(vec)
	}
}
impl<T: Read> ClassRead for T {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0u8; N];
		self.read_exact(&mut buf)?;
		Ok(buf)
	}
	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>> {
		let mut vec = std::vec::from_elem(0, size);
		self.read_exact(&mut vec)?;
		Ok(vec)
	}
}

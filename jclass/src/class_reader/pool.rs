use std::io::Read;
use anyhow::{anyhow, bail, Context, Result};
use java_string::{JavaStr, JavaString};
use crate::class_constants::pool;
use crate::{ClassRead, jstring};

/// A field or method reference, resolved down to the strings behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRef<'a> {
	pub class: &'a JavaStr,
	pub name: &'a JavaStr,
	pub descriptor: &'a JavaStr,
}

/// One constant pool entry, exactly as stored: entries referencing other entries keep the raw
/// indices. Resolution to the strings behind them happens on access, via [`Pool`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolEntry {
	Class { name_index: u16 },
	FieldRef { class_index: u16, name_and_type_index: u16 },
	MethodRef { class_index: u16, name_and_type_index: u16 },
	InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
	String { string_index: u16 },
	Integer { bytes: i32 },
	Float { bytes: u32 },
	Long { bytes: i64 },
	Double { bytes: u64 },
	NameAndType { name_index: u16, descriptor_index: u16 },
	Utf8 { string: JavaString },
	MethodHandle { reference_kind: u8, reference_index: u16 },
	MethodType { descriptor_index: u16 },
	Dynamic { bootstrap_method_attribute_index: u16, name_and_type_index: u16 },
	InvokeDynamic { bootstrap_method_attribute_index: u16, name_and_type_index: u16 },
	Module { name_index: u16 },
	Package { name_index: u16 },
}

impl PoolEntry {
	fn as_utf8(&self) -> Result<&JavaStr> {
		let PoolEntry::Utf8 { string } = self else {
			bail!("pool entry not `Utf8`: {self:?}");
		};
		Ok(string)
	}

	fn as_string<'a>(&self, pool: &'a Pool) -> Result<&'a JavaStr> {
		let PoolEntry::String { string_index } = *self else {
			bail!("pool entry not `String`: {self:?}");
		};
		pool.get_utf8(string_index)
	}

	fn as_class<'a>(&self, pool: &'a Pool) -> Result<&'a JavaStr> {
		let PoolEntry::Class { name_index } = *self else {
			bail!("pool entry not `Class`: {self:?}");
		};
		pool.get_utf8(name_index)
	}

	fn as_name_and_type<'a>(&self, pool: &'a Pool) -> Result<(&'a JavaStr, &'a JavaStr)> {
		let PoolEntry::NameAndType { name_index, descriptor_index } = *self else {
			bail!("pool entry not `NameAndType`: {self:?}");
		};
		let name = pool.get_utf8(name_index)?;
		let descriptor = pool.get_utf8(descriptor_index)?;
		Ok((name, descriptor))
	}

	fn as_member_ref<'a>(&self, pool: &'a Pool) -> Result<MemberRef<'a>> {
		let (class_index, name_and_type_index) = match *self {
			PoolEntry::FieldRef { class_index, name_and_type_index } |
			PoolEntry::MethodRef { class_index, name_and_type_index } |
			PoolEntry::InterfaceMethodRef { class_index, name_and_type_index } => (class_index, name_and_type_index),
			_ => bail!("pool entry not `FieldRef`, `MethodRef` or `InterfaceMethodRef`: {self:?}"),
		};

		let class = pool.get_class(class_index)?;
		let (name, descriptor) = pool.get_name_and_type(name_and_type_index)?;
		Ok(MemberRef { class, name, descriptor })
	}

	fn as_package<'a>(&self, pool: &'a Pool) -> Result<&'a JavaStr> {
		let PoolEntry::Package { name_index } = *self else {
			bail!("pool entry not `Package`: {self:?}");
		};
		pool.get_utf8(name_index)
	}

	fn as_module<'a>(&self, pool: &'a Pool) -> Result<&'a JavaStr> {
		let PoolEntry::Module { name_index } = *self else {
			bail!("pool entry not `Module`: {self:?}");
		};
		pool.get_utf8(name_index)
	}

	fn as_integer(&self) -> Result<i32> {
		let PoolEntry::Integer { bytes } = *self else {
			bail!("pool entry not `Integer`: {self:?}");
		};
		Ok(bytes)
	}

	fn as_long(&self) -> Result<i64> {
		let PoolEntry::Long { bytes } = *self else {
			bail!("pool entry not `Long`: {self:?}");
		};
		Ok(bytes)
	}

	fn as_float(&self) -> Result<f32> {
		let PoolEntry::Float { bytes } = *self else {
			bail!("pool entry not `Float`: {self:?}");
		};
		Ok(f32::from_bits(bytes))
	}

	fn as_double(&self) -> Result<f64> {
		let PoolEntry::Double { bytes } = *self else {
			bail!("pool entry not `Double`: {self:?}");
		};
		Ok(f64::from_bits(bytes))
	}

	fn as_method_handle(&self) -> Result<(u8, u16)> {
		let PoolEntry::MethodHandle { reference_kind, reference_index } = *self else {
			bail!("pool entry not `MethodHandle`: {self:?}");
		};
		Ok((reference_kind, reference_index))
	}

	fn as_method_type<'a>(&self, pool: &'a Pool) -> Result<&'a JavaStr> {
		let PoolEntry::MethodType { descriptor_index } = *self else {
			bail!("pool entry not `MethodType`: {self:?}");
		};
		pool.get_utf8(descriptor_index)
	}

	fn as_dynamic<'a>(&self, pool: &'a Pool) -> Result<(u16, &'a JavaStr, &'a JavaStr)> {
		let (bootstrap_method_attribute_index, name_and_type_index) = match *self {
			PoolEntry::Dynamic { bootstrap_method_attribute_index, name_and_type_index } |
			PoolEntry::InvokeDynamic { bootstrap_method_attribute_index, name_and_type_index } =>
				(bootstrap_method_attribute_index, name_and_type_index),
			_ => bail!("pool entry not `Dynamic` or `InvokeDynamic`: {self:?}"),
		};

		let (name, descriptor) = pool.get_name_and_type(name_and_type_index)?;
		Ok((bootstrap_method_attribute_index, name, descriptor))
	}
}

/// The constant pool of a class file.
///
/// The pool keeps entries in their stored form, so a broken entry only fails when something
/// actually looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
	/// We store a [`None`] for the zero index, as well as for the upper indices of [`PoolEntry::Double`] and [`PoolEntry::Long`].
	inner: Vec<Option<PoolEntry>>,
}

impl Pool {
	/// Reads the constant pool from the specified reader. The first thing read is an `u16` specifying the size of the constant pool.
	pub fn read(reader: &mut impl Read) -> Result<Pool> {
		let mut pool = vec![None];

		let constant_pool_count = reader.read_u16_as_usize()?;
		while pool.len() < constant_pool_count {
			match reader.read_u8()? {
				pool::UTF8 => {
					let length = reader.read_u16_as_usize()?;
					let vec = reader.read_u8_vec(length)?;
					let string = jstring::from_vec_to_string(vec)
						.with_context(|| anyhow!("at pool index {}", pool.len()))?;
					let entry = PoolEntry::Utf8 { string };
					pool.push(Some(entry));
				},
				pool::INTEGER => {
					let bytes = reader.read_i32()?;
					let entry = PoolEntry::Integer { bytes };
					pool.push(Some(entry));
				},
				pool::FLOAT => {
					let bytes = reader.read_u32()?;
					let entry = PoolEntry::Float { bytes };
					pool.push(Some(entry));
				},
				pool::LONG => {
					let bytes = reader.read_i64()?;
					let entry = PoolEntry::Long { bytes };
					pool.push(Some(entry));
					pool.push(None); // long and double take up two pool slots
				},
				pool::DOUBLE => {
					let bytes = reader.read_u64()?;
					let entry = PoolEntry::Double { bytes };
					pool.push(Some(entry));
					pool.push(None); // long and double take up two pool slots
				},
				pool::CLASS => {
					let name_index = reader.read_u16()?;
					let entry = PoolEntry::Class { name_index };
					pool.push(Some(entry));
				},
				pool::STRING => {
					let string_index = reader.read_u16()?;
					let entry = PoolEntry::String { string_index };
					pool.push(Some(entry));
				},
				pool::FIELD_REF => {
					let class_index = reader.read_u16()?;
					let name_and_type_index = reader.read_u16()?;
					let entry = PoolEntry::FieldRef { class_index, name_and_type_index };
					pool.push(Some(entry));
				},
				pool::METHOD_REF => {
					let class_index = reader.read_u16()?;
					let name_and_type_index = reader.read_u16()?;
					let entry = PoolEntry::MethodRef { class_index, name_and_type_index };
					pool.push(Some(entry));
				},
				pool::INTERFACE_METHOD_REF => {
					let class_index = reader.read_u16()?;
					let name_and_type_index = reader.read_u16()?;
					let entry = PoolEntry::InterfaceMethodRef { class_index, name_and_type_index };
					pool.push(Some(entry));
				},
				pool::NAME_AND_TYPE => {
					let name_index = reader.read_u16()?;
					let descriptor_index = reader.read_u16()?;
					let entry = PoolEntry::NameAndType { name_index, descriptor_index };
					pool.push(Some(entry));
				},
				pool::METHOD_HANDLE => {
					let reference_kind = reader.read_u8()?;
					let reference_index = reader.read_u16()?;
					let entry = PoolEntry::MethodHandle { reference_kind, reference_index };
					pool.push(Some(entry));
				},
				pool::METHOD_TYPE => {
					let descriptor_index = reader.read_u16()?;
					let entry = PoolEntry::MethodType { descriptor_index };
					pool.push(Some(entry));
				},
				pool::DYNAMIC => {
					let bootstrap_method_attribute_index = reader.read_u16()?;
					let name_and_type_index = reader.read_u16()?;
					let entry = PoolEntry::Dynamic { bootstrap_method_attribute_index, name_and_type_index };
					pool.push(Some(entry));
				},
				pool::INVOKE_DYNAMIC => {
					let bootstrap_method_attribute_index = reader.read_u16()?;
					let name_and_type_index = reader.read_u16()?;
					let entry = PoolEntry::InvokeDynamic { bootstrap_method_attribute_index, name_and_type_index };
					pool.push(Some(entry));
				},
				pool::MODULE => {
					let name_index = reader.read_u16()?;
					let entry = PoolEntry::Module { name_index };
					pool.push(Some(entry));
				},
				pool::PACKAGE => {
					let name_index = reader.read_u16()?;
					let entry = PoolEntry::Package { name_index };
					pool.push(Some(entry));
				},
				tag => bail!("unknown constant pool tag {tag} at pool index {}", pool.len()),
			};
		}

		Ok(Pool { inner: pool })
	}

	pub fn get(&self, index: u16) -> Result<&PoolEntry> {
		if let Some(Some(entry)) = self.inner.get(index as usize) {
			Ok(entry)
		} else {
			bail!("pool entry at index {index:?} is not there: either index too large or the upper half of long or double");
		}
	}

	/// Iterates the occupied entries in index order. The zero index and the upper halves of
	/// [`PoolEntry::Long`] and [`PoolEntry::Double`] entries are skipped.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &PoolEntry)> {
		self.inner.iter().enumerate()
			.filter_map(|(index, entry)| Some((index as u16, entry.as_ref()?)))
	}

	/// Returns [`None`] if `index` is zero, otherwise returns [`Some`] of the result of the function `f`.
	pub fn get_optional<'a, T: 'a>(&'a self, index: u16, f: impl Fn(&'a Pool, u16) -> Result<T>) -> Result<Option<T>> {
		if index == 0 {
			Ok(None)
		} else {
			Ok(Some(f(self, index)?))
		}
	}

	pub fn get_utf8(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_utf8().pool_context(index)
	}

	pub fn get_class(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_class(self).pool_context(index)
	}

	pub fn get_string(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_string(self).pool_context(index)
	}

	pub fn get_package(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_package(self).pool_context(index)
	}

	pub fn get_module(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_module(self).pool_context(index)
	}

	pub fn get_name_and_type(&self, index: u16) -> Result<(&JavaStr, &JavaStr)> {
		self.get(index)?.as_name_and_type(self).pool_context(index)
	}

	/// Works for all three of [`PoolEntry::FieldRef`], [`PoolEntry::MethodRef`] and
	/// [`PoolEntry::InterfaceMethodRef`]. Match on the entry itself if you need to know which one it was.
	pub fn get_member_ref(&self, index: u16) -> Result<MemberRef> {
		self.get(index)?.as_member_ref(self).pool_context(index)
	}

	pub fn get_integer(&self, index: u16) -> Result<i32> {
		self.get(index)?.as_integer().pool_context(index)
	}
	pub fn get_integer_as_byte(&self, index: u16) -> Result<i8> {
		let integer = self.get_integer(index)?;
		Ok(integer as i8)
	}
	pub fn get_integer_as_char(&self, index: u16) -> Result<u16> {
		let integer = self.get_integer(index)?;
		Ok(integer as u16)
	}
	pub fn get_integer_as_short(&self, index: u16) -> Result<i16> {
		let integer = self.get_integer(index)?;
		Ok(integer as i16)
	}
	pub fn get_integer_as_boolean(&self, index: u16) -> Result<bool> {
		Ok(self.get_integer(index)? != 0)
	}
	pub fn get_double(&self, index: u16) -> Result<f64> {
		self.get(index)?.as_double().pool_context(index)
	}
	pub fn get_float(&self, index: u16) -> Result<f32> {
		self.get(index)?.as_float().pool_context(index)
	}
	pub fn get_long(&self, index: u16) -> Result<i64> {
		self.get(index)?.as_long().pool_context(index)
	}

	pub fn get_method_handle(&self, index: u16) -> Result<(u8, u16)> {
		self.get(index)?.as_method_handle().pool_context(index)
	}

	pub fn get_method_type(&self, index: u16) -> Result<&JavaStr> {
		self.get(index)?.as_method_type(self).pool_context(index)
	}

	/// Works for both [`PoolEntry::Dynamic`] and [`PoolEntry::InvokeDynamic`]: gives the bootstrap
	/// method attribute index and the name and descriptor behind the name and type index.
	pub fn get_dynamic(&self, index: u16) -> Result<(u16, &JavaStr, &JavaStr)> {
		self.get(index)?.as_dynamic(self).pool_context(index)
	}
}

/// Tiny helper trait for adding pool indices to errors.
trait PoolContext {
	fn pool_context(self, index: u16) -> Self;
}
impl<T> PoolContext for Result<T> {
	fn pool_context(self, index: u16) -> Self {
		self.with_context(|| anyhow!("while getting pool index {index}"))
	}
}

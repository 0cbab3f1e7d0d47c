//! Stack map frames, as stored in the `StackMapTable` attribute and as reconstructed
//! per bytecode offset.
//!
//! The stored form is a delta encoding: each [`FrameRecord`] describes how the frame
//! changes relative to its predecessor, and at which offset delta it applies. Use
//! [`reconstruct`] to expand the records into full [`Frame`]s keyed by bytecode offset,
//! starting from the implicit frame at offset zero built by [`initial_frame`].

use std::io::Read;
use anyhow::{bail, Result};
use indexmap::IndexMap;
use java_string::{JavaStr, JavaString};
use crate::ClassRead;
use crate::tree::descriptor::{parse_method_descriptor, ArrayType, Type};

/// A verification type, one entry of a frame's locals or stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationType {
	Top,
	Integer,
	Float,
	Long,
	Double,
	Null,
	UninitializedThis,
	/// Tag 7: the class is a `Class` pool index.
	Object { class_index: u16 },
	/// Never stored; only produced by [`initial_frame`], where the class comes out of the
	/// method descriptor and so has no pool entry to point at.
	NamedObject { name: JavaString },
	/// Tag 8: the offset of the `new` instruction that made the object.
	Uninitialized { offset: u16 },
}

impl VerificationType {
	pub(crate) fn read(reader: &mut impl Read) -> Result<VerificationType> {
		Ok(match reader.read_u8()? {
			0 => VerificationType::Top,
			1 => VerificationType::Integer,
			2 => VerificationType::Float,
			3 => VerificationType::Double,
			4 => VerificationType::Long,
			5 => VerificationType::Null,
			6 => VerificationType::UninitializedThis,
			7 => VerificationType::Object { class_index: reader.read_u16()? },
			8 => VerificationType::Uninitialized { offset: reader.read_u16()? },
			tag => bail!("unknown verification type tag {tag}"),
		})
	}
}

/// One entry of the `StackMapTable` attribute, still in its stored delta form.
///
/// See [the JVMS](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.7.4)
/// for how the frame type ranges map to the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRecord {
	/// Frame types 0 to 63; the frame type is the offset delta.
	Same { frame_type: u8 },
	/// Frame types 64 to 127; the frame type minus 64 is the offset delta.
	SameLocals1StackItem { frame_type: u8, stack: VerificationType },
	/// Frame type 247.
	SameLocals1StackItemExtended { offset_delta: u16, stack: VerificationType },
	/// Frame types 248 to 250; 251 minus the frame type locals are dropped.
	Chop { frame_type: u8, offset_delta: u16 },
	/// Frame type 251.
	SameExtended { offset_delta: u16 },
	/// Frame types 252 to 254; the frame type minus 251 locals are added.
	Append { frame_type: u8, offset_delta: u16, locals: Vec<VerificationType> },
	/// Frame type 255.
	Full { offset_delta: u16, locals: Vec<VerificationType>, stack: Vec<VerificationType> },
}

impl FrameRecord {
	pub(crate) fn read(reader: &mut impl Read) -> Result<FrameRecord> {
		let frame_type = reader.read_u8()?;
		Ok(match frame_type {
			0..=63 => FrameRecord::Same { frame_type },
			64..=127 => FrameRecord::SameLocals1StackItem {
				frame_type,
				stack: VerificationType::read(reader)?,
			},
			247 => FrameRecord::SameLocals1StackItemExtended {
				offset_delta: reader.read_u16()?,
				stack: VerificationType::read(reader)?,
			},
			248..=250 => FrameRecord::Chop {
				frame_type,
				offset_delta: reader.read_u16()?,
			},
			251 => FrameRecord::SameExtended {
				offset_delta: reader.read_u16()?,
			},
			252..=254 => {
				let offset_delta = reader.read_u16()?;
				let mut locals = Vec::with_capacity((frame_type - 251) as usize);
				for _ in 0..(frame_type - 251) {
					locals.push(VerificationType::read(reader)?);
				}
				FrameRecord::Append { frame_type, offset_delta, locals }
			},
			255 => FrameRecord::Full {
				offset_delta: reader.read_u16()?,
				locals: reader.read_vec(
					|r| r.read_u16_as_usize(),
					|r| VerificationType::read(r)
				)?,
				stack: reader.read_vec(
					|r| r.read_u16_as_usize(),
					|r| VerificationType::read(r)
				)?,
			},
			_ => bail!("unknown stack map frame type {frame_type}"),
		})
	}

	/// The frame type byte, also for the variants where it's implied.
	pub fn frame_type(&self) -> u8 {
		match self {
			FrameRecord::Same { frame_type } |
			FrameRecord::SameLocals1StackItem { frame_type, .. } |
			FrameRecord::Chop { frame_type, .. } |
			FrameRecord::Append { frame_type, .. } => *frame_type,
			FrameRecord::SameLocals1StackItemExtended { .. } => 247,
			FrameRecord::SameExtended { .. } => 251,
			FrameRecord::Full { .. } => 255,
		}
	}

	/// The offset delta, also for the variants where it's packed into the frame type.
	pub fn offset_delta(&self) -> u16 {
		match self {
			FrameRecord::Same { frame_type } => *frame_type as u16,
			FrameRecord::SameLocals1StackItem { frame_type, .. } => (*frame_type - 64) as u16,
			FrameRecord::SameLocals1StackItemExtended { offset_delta, .. } |
			FrameRecord::Chop { offset_delta, .. } |
			FrameRecord::SameExtended { offset_delta } |
			FrameRecord::Append { offset_delta, .. } |
			FrameRecord::Full { offset_delta, .. } => *offset_delta,
		}
	}
}

/// A full frame: the verification types of the locals and of the operand stack.
///
/// A `Long` or `Double` entry stands for two local slots but is stored as one entry,
/// like in the class file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
	pub locals: Vec<VerificationType>,
	pub stack: Vec<VerificationType>,
}

/// Expands the delta encoded records into full frames, keyed by bytecode offset in
/// record order.
///
/// The offset of each frame is the previous offset plus the record's delta, plus one
/// for every record but the first. Malformed deltas wrap around rather than fail; a
/// chop of more locals than the frame has empties the locals.
pub fn reconstruct(initial: &Frame, records: &[FrameRecord]) -> IndexMap<u16, Frame> {
	let mut frames = IndexMap::with_capacity(records.len());

	let mut frame = initial.clone();
	let mut offset = 0u16;
	let mut first = true;

	for record in records {
		offset = offset.wrapping_add(record.offset_delta()).wrapping_add(if first { 0 } else { 1 });
		first = false;

		match record {
			FrameRecord::Same { .. } | FrameRecord::SameExtended { .. } => {
				frame.stack.clear();
			},
			FrameRecord::SameLocals1StackItem { stack, .. } |
			FrameRecord::SameLocals1StackItemExtended { stack, .. } => {
				frame.stack.clear();
				frame.stack.push(stack.clone());
			},
			FrameRecord::Chop { frame_type, .. } => {
				let chopped = (251 - frame_type) as usize;
				frame.locals.truncate(frame.locals.len().saturating_sub(chopped));
				frame.stack.clear();
			},
			FrameRecord::Append { locals, .. } => {
				frame.locals.extend_from_slice(locals);
				frame.stack.clear();
			},
			FrameRecord::Full { locals, stack, .. } => {
				frame.locals = locals.clone();
				frame.stack = stack.clone();
			},
		}

		frames.insert(offset, frame.clone());
	}

	frames
}

/// Builds the implicit frame at offset zero: the receiver (when there is one) followed
/// by one entry per parameter of the method descriptor, with an empty stack.
pub fn initial_frame(descriptor: &JavaStr, this_class: Option<u16>) -> Result<Frame> {
	let parsed = parse_method_descriptor(descriptor)?;

	let mut locals = Vec::with_capacity(parsed.parameter_descriptors.len() + 1);
	if let Some(class_index) = this_class {
		locals.push(VerificationType::Object { class_index });
	}
	for parameter in parsed.parameter_descriptors {
		locals.push(verification_type_of(parameter));
	}

	Ok(Frame { locals, stack: Vec::new() })
}

fn verification_type_of(parameter: Type) -> VerificationType {
	match parameter {
		Type::B | Type::C | Type::I | Type::S | Type::Z => VerificationType::Integer,
		Type::F => VerificationType::Float,
		Type::J => VerificationType::Long,
		Type::D => VerificationType::Double,
		Type::Object(name) => VerificationType::NamedObject { name },
		Type::Array(dimension, inner) => {
			let mut name = JavaString::new();
			for _ in 0..dimension {
				name.push('[');
			}
			match inner {
				ArrayType::B => name.push('B'),
				ArrayType::C => name.push('C'),
				ArrayType::D => name.push('D'),
				ArrayType::F => name.push('F'),
				ArrayType::I => name.push('I'),
				ArrayType::J => name.push('J'),
				ArrayType::S => name.push('S'),
				ArrayType::Z => name.push('Z'),
				ArrayType::Object(object_name) => {
					name.push('L');
					name.push_java_str(&object_name);
					name.push(';');
				},
			}
			VerificationType::NamedObject { name }
		},
	}
}

//! Decoding of the `code` array of a `Code` attribute into instructions.
//!
//! [`InsnReader`] is an iterator over [`Insn`]s. Branch offsets stay relative to the
//! instruction, like in the stored form; callers that want absolute targets add the
//! [`pc`][Insn::pc] themselves.

use anyhow::{anyhow, bail, Context, Result};
use crate::ClassRead;
use crate::class_constants::opcode;

/// A single decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insn {
	/// The offset of the opcode byte, from the start of the code array.
	pub pc: u32,
	/// For `wide` prefixed instructions, the opcode behind the prefix.
	pub opcode: u8,
	pub wide: bool,
	pub operand: Operand,
}

impl Insn {
	/// The mnemonic, with the `_w` suffix for `wide` prefixed instructions.
	pub fn mnemonic(&self) -> String {
		match mnemonic(self.opcode) {
			Some(m) if self.wide => format!("{m}_w"),
			Some(m) => m.to_owned(),
			None => format!("bytecode {}", self.opcode),
		}
	}
}

/// The operand of an instruction, distinguished by shape rather than by opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
	None,
	/// A local variable index, widened to `u16` for the `wide` forms.
	Local { index: u16 },
	Iinc { index: u16, value: i16 },
	/// A branch offset, relative to the pc of this instruction.
	Branch { offset: i32 },
	/// A constant pool index.
	Pool { index: u16 },
	/// A constant pool index with an extra byte: the count of `invokeinterface`, the
	/// dimensions of `multianewarray`, and always zero for `invokedynamic`.
	PoolAndValue { index: u16, value: u8 },
	/// The primitive type code of `newarray`, 4 (`boolean`) to 11 (`long`).
	ArrayType { atype: u8 },
	/// The value pushed by `bipush` or `sipush`.
	Immediate { value: i32 },
	TableSwitch { default: i32, low: i32, high: i32, offsets: Vec<i32> },
	LookupSwitch { default: i32, pairs: Vec<(i32, i32)> },
}

/// Iterates over the instructions of a code array.
///
/// Yields `Err` once for the first malformed instruction, with the error naming the
/// offset, and ends there; the bytes after a broken instruction can't be trusted to
/// be on an instruction boundary.
pub struct InsnReader<'a> {
	code: &'a [u8],
	pos: usize,
	failed: bool,
}

impl<'a> InsnReader<'a> {
	pub fn new(code: &'a [u8]) -> InsnReader<'a> {
		InsnReader { code, pos: 0, failed: false }
	}

	fn read_insn(&mut self) -> Result<Insn> {
		let pc = self.pos as u32;
		let mut reader = &self.code[self.pos..];

		let mut opcode = reader.read_u8()?;
		let wide = opcode == opcode::WIDE;
		if wide {
			opcode = reader.read_u8()?;
		}

		let operand = if wide {
			match opcode {
				opcode::ILOAD..=opcode::ALOAD | opcode::ISTORE..=opcode::ASTORE | opcode::RET =>
					Operand::Local { index: reader.read_u16()? },
				opcode::IINC => Operand::Iinc {
					index: reader.read_u16()?,
					value: reader.read_i16()?,
				},
				_ => bail!("opcode {opcode:#04x} cannot be wide"),
			}
		} else {
			match opcode {
				opcode::NOP..=opcode::DCONST_1 |
				opcode::ILOAD_0..=opcode::SALOAD |
				opcode::ISTORE_0..=opcode::LXOR |
				opcode::I2L..=opcode::DCMPG |
				opcode::IRETURN..=opcode::RETURN |
				opcode::ARRAYLENGTH | opcode::ATHROW |
				opcode::MONITORENTER | opcode::MONITOREXIT =>
					Operand::None,
				opcode::BIPUSH => Operand::Immediate { value: reader.read_i8()? as i32 },
				opcode::SIPUSH => Operand::Immediate { value: reader.read_i16()? as i32 },
				opcode::LDC => Operand::Pool { index: reader.read_u8()? as u16 },
				opcode::LDC_W | opcode::LDC2_W => Operand::Pool { index: reader.read_u16()? },
				opcode::ILOAD..=opcode::ALOAD | opcode::ISTORE..=opcode::ASTORE | opcode::RET =>
					Operand::Local { index: reader.read_u8()? as u16 },
				opcode::IINC => Operand::Iinc {
					index: reader.read_u8()? as u16,
					value: reader.read_i8()? as i16,
				},
				opcode::IFEQ..=opcode::JSR | opcode::IFNULL | opcode::IFNONNULL =>
					Operand::Branch { offset: reader.read_i16()? as i32 },
				opcode::GOTO_W | opcode::JSR_W =>
					Operand::Branch { offset: reader.read_i32()? },
				opcode::TABLESWITCH => {
					// between zero and three padding bytes align the operands to the code start
					while (self.code.len() - reader.len()) % 4 != 0 {
						reader.read_u8()?;
					}
					let default = reader.read_i32()?;
					let low = reader.read_i32()?;
					let high = reader.read_i32()?;
					if low > high {
						bail!("tableswitch with low {low} greater than high {high}");
					}
					let count = (high as i64 - low as i64 + 1) as usize;
					// don't trust the declared count for the allocation
					let mut offsets = Vec::with_capacity(count.min(reader.len() / 4));
					for _ in 0..count {
						offsets.push(reader.read_i32()?);
					}
					Operand::TableSwitch { default, low, high, offsets }
				},
				opcode::LOOKUPSWITCH => {
					while (self.code.len() - reader.len()) % 4 != 0 {
						reader.read_u8()?;
					}
					let default = reader.read_i32()?;
					let npairs = reader.read_i32()?;
					if npairs < 0 {
						bail!("lookupswitch with negative entry count {npairs}");
					}
					let count = npairs as usize;
					let mut pairs = Vec::with_capacity(count.min(reader.len() / 8));
					for _ in 0..count {
						pairs.push((reader.read_i32()?, reader.read_i32()?));
					}
					Operand::LookupSwitch { default, pairs }
				},
				opcode::GETSTATIC..=opcode::INVOKESTATIC |
				opcode::NEW | opcode::ANEWARRAY |
				opcode::CHECKCAST | opcode::INSTANCEOF =>
					Operand::Pool { index: reader.read_u16()? },
				opcode::INVOKEINTERFACE => {
					let index = reader.read_u16()?;
					let value = reader.read_u8()?;
					reader.read_u8()?; // the fourth byte is always zero, not checked
					Operand::PoolAndValue { index, value }
				},
				opcode::INVOKEDYNAMIC => {
					let index = reader.read_u16()?;
					reader.read_u16()?; // two zero bytes
					Operand::PoolAndValue { index, value: 0 }
				},
				opcode::NEWARRAY => Operand::ArrayType { atype: reader.read_u8()? },
				opcode::MULTIANEWARRAY => Operand::PoolAndValue {
					index: reader.read_u16()?,
					value: reader.read_u8()?,
				},
				_ => bail!("unknown opcode {opcode:#04x}"),
			}
		};

		self.pos = self.code.len() - reader.len();
		Ok(Insn { pc, opcode, wide, operand })
	}
}

impl<'a> Iterator for InsnReader<'a> {
	type Item = Result<Insn>;

	fn next(&mut self) -> Option<Result<Insn>> {
		if self.failed || self.pos >= self.code.len() {
			return None;
		}

		let pc = self.pos;
		let result = self.read_insn().with_context(|| anyhow!("at bytecode offset {pc}"));
		if result.is_err() {
			self.failed = true;
		}
		Some(result)
	}
}

/// The mnemonic of an opcode, `None` for the reserved and undefined ones.
pub fn mnemonic(opcode: u8) -> Option<&'static str> {
	Some(match opcode {
		opcode::NOP             => "nop",
		opcode::ACONST_NULL     => "aconst_null",
		opcode::ICONST_M1       => "iconst_m1",
		opcode::ICONST_0        => "iconst_0",
		opcode::ICONST_1        => "iconst_1",
		opcode::ICONST_2        => "iconst_2",
		opcode::ICONST_3        => "iconst_3",
		opcode::ICONST_4        => "iconst_4",
		opcode::ICONST_5        => "iconst_5",
		opcode::LCONST_0        => "lconst_0",
		opcode::LCONST_1        => "lconst_1",
		opcode::FCONST_0        => "fconst_0",
		opcode::FCONST_1        => "fconst_1",
		opcode::FCONST_2        => "fconst_2",
		opcode::DCONST_0        => "dconst_0",
		opcode::DCONST_1        => "dconst_1",
		opcode::BIPUSH          => "bipush",
		opcode::SIPUSH          => "sipush",
		opcode::LDC             => "ldc",
		opcode::LDC_W           => "ldc_w",
		opcode::LDC2_W          => "ldc2_w",
		opcode::ILOAD           => "iload",
		opcode::LLOAD           => "lload",
		opcode::FLOAD           => "fload",
		opcode::DLOAD           => "dload",
		opcode::ALOAD           => "aload",
		opcode::ILOAD_0         => "iload_0",
		opcode::ILOAD_1         => "iload_1",
		opcode::ILOAD_2         => "iload_2",
		opcode::ILOAD_3         => "iload_3",
		opcode::LLOAD_0         => "lload_0",
		opcode::LLOAD_1         => "lload_1",
		opcode::LLOAD_2         => "lload_2",
		opcode::LLOAD_3         => "lload_3",
		opcode::FLOAD_0         => "fload_0",
		opcode::FLOAD_1         => "fload_1",
		opcode::FLOAD_2         => "fload_2",
		opcode::FLOAD_3         => "fload_3",
		opcode::DLOAD_0         => "dload_0",
		opcode::DLOAD_1         => "dload_1",
		opcode::DLOAD_2         => "dload_2",
		opcode::DLOAD_3         => "dload_3",
		opcode::ALOAD_0         => "aload_0",
		opcode::ALOAD_1         => "aload_1",
		opcode::ALOAD_2         => "aload_2",
		opcode::ALOAD_3         => "aload_3",
		opcode::IALOAD          => "iaload",
		opcode::LALOAD          => "laload",
		opcode::FALOAD          => "faload",
		opcode::DALOAD          => "daload",
		opcode::AALOAD          => "aaload",
		opcode::BALOAD          => "baload",
		opcode::CALOAD          => "caload",
		opcode::SALOAD          => "saload",
		opcode::ISTORE          => "istore",
		opcode::LSTORE          => "lstore",
		opcode::FSTORE          => "fstore",
		opcode::DSTORE          => "dstore",
		opcode::ASTORE          => "astore",
		opcode::ISTORE_0        => "istore_0",
		opcode::ISTORE_1        => "istore_1",
		opcode::ISTORE_2        => "istore_2",
		opcode::ISTORE_3        => "istore_3",
		opcode::LSTORE_0        => "lstore_0",
		opcode::LSTORE_1        => "lstore_1",
		opcode::LSTORE_2        => "lstore_2",
		opcode::LSTORE_3        => "lstore_3",
		opcode::FSTORE_0        => "fstore_0",
		opcode::FSTORE_1        => "fstore_1",
		opcode::FSTORE_2        => "fstore_2",
		opcode::FSTORE_3        => "fstore_3",
		opcode::DSTORE_0        => "dstore_0",
		opcode::DSTORE_1        => "dstore_1",
		opcode::DSTORE_2        => "dstore_2",
		opcode::DSTORE_3        => "dstore_3",
		opcode::ASTORE_0        => "astore_0",
		opcode::ASTORE_1        => "astore_1",
		opcode::ASTORE_2        => "astore_2",
		opcode::ASTORE_3        => "astore_3",
		opcode::IASTORE         => "iastore",
		opcode::LASTORE         => "lastore",
		opcode::FASTORE         => "fastore",
		opcode::DASTORE         => "dastore",
		opcode::AASTORE         => "aastore",
		opcode::BASTORE         => "bastore",
		opcode::CASTORE         => "castore",
		opcode::SASTORE         => "sastore",
		opcode::POP             => "pop",
		opcode::POP2            => "pop2",
		opcode::DUP             => "dup",
		opcode::DUP_X1          => "dup_x1",
		opcode::DUP_X2          => "dup_x2",
		opcode::DUP2            => "dup2",
		opcode::DUP2_X1         => "dup2_x1",
		opcode::DUP2_X2         => "dup2_x2",
		opcode::SWAP            => "swap",
		opcode::IADD            => "iadd",
		opcode::LADD            => "ladd",
		opcode::FADD            => "fadd",
		opcode::DADD            => "dadd",
		opcode::ISUB            => "isub",
		opcode::LSUB            => "lsub",
		opcode::FSUB            => "fsub",
		opcode::DSUB            => "dsub",
		opcode::IMUL            => "imul",
		opcode::LMUL            => "lmul",
		opcode::FMUL            => "fmul",
		opcode::DMUL            => "dmul",
		opcode::IDIV            => "idiv",
		opcode::LDIV            => "ldiv",
		opcode::FDIV            => "fdiv",
		opcode::DDIV            => "ddiv",
		opcode::IREM            => "irem",
		opcode::LREM            => "lrem",
		opcode::FREM            => "frem",
		opcode::DREM            => "drem",
		opcode::INEG            => "ineg",
		opcode::LNEG            => "lneg",
		opcode::FNEG            => "fneg",
		opcode::DNEG            => "dneg",
		opcode::ISHL            => "ishl",
		opcode::LSHL            => "lshl",
		opcode::ISHR            => "ishr",
		opcode::LSHR            => "lshr",
		opcode::IUSHR           => "iushr",
		opcode::LUSHR           => "lushr",
		opcode::IAND            => "iand",
		opcode::LAND            => "land",
		opcode::IOR             => "ior",
		opcode::LOR             => "lor",
		opcode::IXOR            => "ixor",
		opcode::LXOR            => "lxor",
		opcode::IINC            => "iinc",
		opcode::I2L             => "i2l",
		opcode::I2F             => "i2f",
		opcode::I2D             => "i2d",
		opcode::L2I             => "l2i",
		opcode::L2F             => "l2f",
		opcode::L2D             => "l2d",
		opcode::F2I             => "f2i",
		opcode::F2L             => "f2l",
		opcode::F2D             => "f2d",
		opcode::D2I             => "d2i",
		opcode::D2L             => "d2l",
		opcode::D2F             => "d2f",
		opcode::I2B             => "i2b",
		opcode::I2C             => "i2c",
		opcode::I2S             => "i2s",
		opcode::LCMP            => "lcmp",
		opcode::FCMPL           => "fcmpl",
		opcode::FCMPG           => "fcmpg",
		opcode::DCMPL           => "dcmpl",
		opcode::DCMPG           => "dcmpg",
		opcode::IFEQ            => "ifeq",
		opcode::IFNE            => "ifne",
		opcode::IFLT            => "iflt",
		opcode::IFGE            => "ifge",
		opcode::IFGT            => "ifgt",
		opcode::IFLE            => "ifle",
		opcode::IF_ICMPEQ       => "if_icmpeq",
		opcode::IF_ICMPNE       => "if_icmpne",
		opcode::IF_ICMPLT       => "if_icmplt",
		opcode::IF_ICMPGE       => "if_icmpge",
		opcode::IF_ICMPGT       => "if_icmpgt",
		opcode::IF_ICMPLE       => "if_icmple",
		opcode::IF_ACMPEQ       => "if_acmpeq",
		opcode::IF_ACMPNE       => "if_acmpne",
		opcode::GOTO            => "goto",
		opcode::JSR             => "jsr",
		opcode::RET             => "ret",
		opcode::TABLESWITCH     => "tableswitch",
		opcode::LOOKUPSWITCH    => "lookupswitch",
		opcode::IRETURN         => "ireturn",
		opcode::LRETURN         => "lreturn",
		opcode::FRETURN         => "freturn",
		opcode::DRETURN         => "dreturn",
		opcode::ARETURN         => "areturn",
		opcode::RETURN          => "return",
		opcode::GETSTATIC       => "getstatic",
		opcode::PUTSTATIC       => "putstatic",
		opcode::GETFIELD        => "getfield",
		opcode::PUTFIELD        => "putfield",
		opcode::INVOKEVIRTUAL   => "invokevirtual",
		opcode::INVOKESPECIAL   => "invokespecial",
		opcode::INVOKESTATIC    => "invokestatic",
		opcode::INVOKEINTERFACE => "invokeinterface",
		opcode::INVOKEDYNAMIC   => "invokedynamic",
		opcode::NEW             => "new",
		opcode::NEWARRAY        => "newarray",
		opcode::ANEWARRAY       => "anewarray",
		opcode::ARRAYLENGTH     => "arraylength",
		opcode::ATHROW          => "athrow",
		opcode::CHECKCAST       => "checkcast",
		opcode::INSTANCEOF      => "instanceof",
		opcode::MONITORENTER    => "monitorenter",
		opcode::MONITOREXIT     => "monitorexit",
		opcode::WIDE            => "wide",
		opcode::MULTIANEWARRAY  => "multianewarray",
		opcode::IFNULL          => "ifnull",
		opcode::IFNONNULL       => "ifnonnull",
		opcode::GOTO_W          => "goto_w",
		opcode::JSR_W           => "jsr_w",
		_ => return None,
	})
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	fn read_all(code: &[u8]) -> Result<Vec<Insn>> {
		InsnReader::new(code).collect()
	}

	#[test]
	fn a_counting_loop() -> Result<()> {
		// iconst_0; istore_1; then compare against 10, increment and loop
		let code = [
			0x03,
			0x3c,
			0x1b,
			0x10, 10,
			0xa2, 0x00, 0x09,
			0x84, 0x01, 0x01,
			0xa7, 0xff, 0xf7,
			0xb1,
		];

		assert_eq!(read_all(&code)?, vec![
			Insn { pc: 0, opcode: opcode::ICONST_0, wide: false, operand: Operand::None },
			Insn { pc: 1, opcode: opcode::ISTORE_1, wide: false, operand: Operand::None },
			Insn { pc: 2, opcode: opcode::ILOAD_1, wide: false, operand: Operand::None },
			Insn { pc: 3, opcode: opcode::BIPUSH, wide: false, operand: Operand::Immediate { value: 10 } },
			Insn { pc: 5, opcode: opcode::IF_ICMPGE, wide: false, operand: Operand::Branch { offset: 9 } },
			Insn { pc: 8, opcode: opcode::IINC, wide: false, operand: Operand::Iinc { index: 1, value: 1 } },
			Insn { pc: 11, opcode: opcode::GOTO, wide: false, operand: Operand::Branch { offset: -9 } },
			Insn { pc: 14, opcode: opcode::RETURN, wide: false, operand: Operand::None },
		]);

		Ok(())
	}

	#[test]
	fn wide_forms() -> Result<()> {
		let code = [
			0xc4, 0x15, 0x01, 0x00,
			0xc4, 0x84, 0x01, 0x00, 0xff, 0x38,
			0xc4, 0xa9, 0x12, 0x34,
		];

		let insns = read_all(&code)?;

		assert_eq!(insns, vec![
			Insn { pc: 0, opcode: opcode::ILOAD, wide: true, operand: Operand::Local { index: 256 } },
			Insn { pc: 4, opcode: opcode::IINC, wide: true, operand: Operand::Iinc { index: 256, value: -200 } },
			Insn { pc: 10, opcode: opcode::RET, wide: true, operand: Operand::Local { index: 0x1234 } },
		]);
		assert_eq!(insns[0].mnemonic(), "iload_w");
		assert_eq!(insns[1].mnemonic(), "iinc_w");

		Ok(())
	}

	#[test]
	fn wide_rejects_an_unwidenable_opcode() {
		let mut reader = InsnReader::new(&[0xc4, 0x00]);

		let err = reader.next().unwrap().unwrap_err();
		assert_eq!(format!("{err:#}"), "at bytecode offset 0: opcode 0x00 cannot be wide");
		assert!(reader.next().is_none());
	}

	#[test]
	fn pool_shapes() -> Result<()> {
		let code = [
			0x12, 0x08,
			0x13, 0x01, 0x00,
			0xb2, 0x00, 0x05,
			0xb9, 0x00, 0x04, 0x02, 0x00,
			0xba, 0x00, 0x07, 0x00, 0x00,
			0xc5, 0x00, 0x09, 0x03,
			0xbc, 0x0a,
		];

		assert_eq!(read_all(&code)?, vec![
			Insn { pc: 0, opcode: opcode::LDC, wide: false, operand: Operand::Pool { index: 8 } },
			Insn { pc: 2, opcode: opcode::LDC_W, wide: false, operand: Operand::Pool { index: 256 } },
			Insn { pc: 5, opcode: opcode::GETSTATIC, wide: false, operand: Operand::Pool { index: 5 } },
			Insn { pc: 8, opcode: opcode::INVOKEINTERFACE, wide: false, operand: Operand::PoolAndValue { index: 4, value: 2 } },
			Insn { pc: 13, opcode: opcode::INVOKEDYNAMIC, wide: false, operand: Operand::PoolAndValue { index: 7, value: 0 } },
			Insn { pc: 18, opcode: opcode::MULTIANEWARRAY, wide: false, operand: Operand::PoolAndValue { index: 9, value: 3 } },
			Insn { pc: 22, opcode: opcode::NEWARRAY, wide: false, operand: Operand::ArrayType { atype: 10 } },
		]);

		Ok(())
	}

	#[test]
	fn tableswitch_pads_to_the_code_start() -> Result<()> {
		// the opcode sits at pc 1, so two padding bytes align the default to 4
		let code = [
			0x00,
			0xaa, 0x00, 0x00,
			0x00, 0x00, 0x00, 20,
			0x00, 0x00, 0x00, 2,
			0x00, 0x00, 0x00, 4,
			0x00, 0x00, 0x00, 10,
			0x00, 0x00, 0x00, 14,
			0x00, 0x00, 0x00, 18,
		];

		assert_eq!(read_all(&code)?, vec![
			Insn { pc: 0, opcode: opcode::NOP, wide: false, operand: Operand::None },
			Insn { pc: 1, opcode: opcode::TABLESWITCH, wide: false, operand: Operand::TableSwitch {
				default: 20,
				low: 2,
				high: 4,
				offsets: vec![10, 14, 18],
			} },
		]);

		Ok(())
	}

	#[test]
	fn lookupswitch_at_an_aligned_pc_has_no_padding() -> Result<()> {
		// pc 3, so the operands at 4 are already aligned
		let code = [
			0x00, 0x00, 0x00,
			0xab,
			0x00, 0x00, 0x00, 28,
			0x00, 0x00, 0x00, 2,
			0xff, 0xff, 0xff, 0xf6, 0x00, 0x00, 0x00, 12,
			0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 20,
		];

		let insns = read_all(&code)?;

		assert_eq!(insns[3], Insn { pc: 3, opcode: opcode::LOOKUPSWITCH, wide: false, operand: Operand::LookupSwitch {
			default: 28,
			pairs: vec![(-10, 12), (256, 20)],
		} });

		Ok(())
	}

	#[test]
	fn tableswitch_with_reversed_bounds_fails() {
		let code = [
			0xaa, 0x00, 0x00, 0x00,
			0x00, 0x00, 0x00, 8,
			0x00, 0x00, 0x00, 5,
			0x00, 0x00, 0x00, 2,
		];

		let err = read_all(&code).unwrap_err();
		assert_eq!(format!("{err:#}"), "at bytecode offset 0: tableswitch with low 5 greater than high 2");
	}

	#[test]
	fn lookupswitch_with_a_negative_count_fails() {
		let code = [
			0xab, 0x00, 0x00, 0x00,
			0x00, 0x00, 0x00, 8,
			0xff, 0xff, 0xff, 0xff,
		];

		assert!(read_all(&code).is_err());
	}

	#[test]
	fn truncated_operands_fail_at_the_opcode_offset() {
		let code = [0x03, 0xb2, 0x00];

		let mut reader = InsnReader::new(&code);
		assert!(reader.next().unwrap().is_ok());

		let err = reader.next().unwrap().unwrap_err();
		assert!(format!("{err:#}").starts_with("at bytecode offset 1: "));

		// the iterator ends after the first error
		assert!(reader.next().is_none());
	}

	#[test]
	fn unknown_opcodes_fail() {
		let err = read_all(&[0xcb]).unwrap_err();
		assert_eq!(format!("{err:#}"), "at bytecode offset 0: unknown opcode 0xcb");
	}

	#[test]
	fn mnemonics() {
		assert_eq!(mnemonic(0x00), Some("nop"));
		assert_eq!(mnemonic(0xb6), Some("invokevirtual"));
		assert_eq!(mnemonic(0xc9), Some("jsr_w"));
		assert_eq!(mnemonic(0xca), None);
		assert_eq!(mnemonic(0xff), None);
	}
}

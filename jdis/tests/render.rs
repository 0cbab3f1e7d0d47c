//! Renders class files assembled byte by byte and pins the output text.

use anyhow::Result;
use pretty_assertions::assert_eq;
use jclass::FaultKind;
use jclass::class_constants::{flags, pool};
use jdis::{Details, RenderOptions, Rendered};

fn utf8(text: &str) -> Vec<u8> {
	let mut bytes = vec![pool::UTF8];
	bytes.extend((text.len() as u16).to_be_bytes());
	bytes.extend(text.as_bytes());
	bytes
}

fn class_entry(name_index: u16) -> Vec<u8> {
	let mut bytes = vec![pool::CLASS];
	bytes.extend(name_index.to_be_bytes());
	bytes
}

fn attribute(name_index: u16, payload: &[u8]) -> Vec<u8> {
	let mut bytes = name_index.to_be_bytes().to_vec();
	bytes.extend((payload.len() as u32).to_be_bytes());
	bytes.extend(payload);
	bytes
}

fn code_attribute(name_index: u16, max_stack: u16, max_locals: u16, bytecode: &[u8], exception_table: &[(u16, u16, u16, u16)], nested: &[Vec<u8>]) -> Vec<u8> {
	let mut payload = max_stack.to_be_bytes().to_vec();
	payload.extend(max_locals.to_be_bytes());
	payload.extend((bytecode.len() as u32).to_be_bytes());
	payload.extend(bytecode);
	payload.extend((exception_table.len() as u16).to_be_bytes());
	for &(start_pc, end_pc, handler_pc, catch_type) in exception_table {
		payload.extend(start_pc.to_be_bytes());
		payload.extend(end_pc.to_be_bytes());
		payload.extend(handler_pc.to_be_bytes());
		payload.extend(catch_type.to_be_bytes());
	}
	payload.extend((nested.len() as u16).to_be_bytes());
	for attribute in nested {
		payload.extend_from_slice(attribute);
	}
	attribute(name_index, &payload)
}

fn member(access_flags: u16, name_index: u16, descriptor_index: u16, attributes: &[Vec<u8>]) -> Vec<u8> {
	let mut bytes = access_flags.to_be_bytes().to_vec();
	bytes.extend(name_index.to_be_bytes());
	bytes.extend(descriptor_index.to_be_bytes());
	bytes.extend((attributes.len() as u16).to_be_bytes());
	for attribute in attributes {
		bytes.extend_from_slice(attribute);
	}
	bytes
}

fn class_file(
	pool_entries: &[Vec<u8>],
	this_class: u16,
	super_class: u16,
	fields: &[Vec<u8>],
	methods: &[Vec<u8>],
	attributes: &[Vec<u8>],
) -> Vec<u8> {
	let mut bytes = vec![0xca, 0xfe, 0xba, 0xbe];
	bytes.extend(0u16.to_be_bytes()); // minor
	bytes.extend(65u16.to_be_bytes()); // major, java 21
	bytes.extend((pool_entries.len() as u16 + 1).to_be_bytes());
	for entry in pool_entries {
		bytes.extend_from_slice(entry);
	}
	bytes.extend((flags::ACC_PUBLIC | flags::ACC_SUPER).to_be_bytes());
	bytes.extend(this_class.to_be_bytes());
	bytes.extend(super_class.to_be_bytes());
	bytes.extend(0u16.to_be_bytes()); // no interfaces
	for list in [fields, methods] {
		bytes.extend((list.len() as u16).to_be_bytes());
		for member in list {
			bytes.extend_from_slice(member);
		}
	}
	bytes.extend((attributes.len() as u16).to_be_bytes());
	for attribute in attributes {
		bytes.extend_from_slice(attribute);
	}
	bytes
}

/// A `public class Test` with `public int x;`, `public static void main`
/// and a `SourceFile` attribute.
fn members_class() -> Vec<u8> {
	class_file(
		&[
			utf8("Test"),                   // 1
			class_entry(1),                 // 2
			utf8("java/lang/Object"),       // 3
			class_entry(3),                 // 4
			utf8("x"),                      // 5
			utf8("I"),                      // 6
			utf8("main"),                   // 7
			utf8("([Ljava/lang/String;)V"), // 8
			utf8("SourceFile"),             // 9
			utf8("Test.java"),              // 10
		],
		2,
		4,
		&[member(flags::ACC_PUBLIC, 5, 6, &[])],
		&[member(flags::ACC_PUBLIC | flags::ACC_STATIC, 7, 8, &[])],
		&[attribute(9, &10u16.to_be_bytes())],
	)
}

/// A `public class Test` with one `public void run()` whose code counts an int
/// and has one exception table entry.
fn code_class(nested: &[Vec<u8>]) -> Vec<u8> {
	let bytecode = [
		0x03,             //  0: iconst_0
		0x3c,             //  1: istore_1
		0x1b,             //  2: iload_1
		0x99, 0x00, 0x06, //  3: ifeq 9
		0x84, 0x01, 0x01, //  6: iinc 1, 1
		0xb1,             //  9: return
	];
	class_file(
		&[
			utf8("Test"),                // 1
			class_entry(1),              // 2
			utf8("java/lang/Object"),    // 3
			class_entry(3),              // 4
			utf8("run"),                 // 5
			utf8("()V"),                 // 6
			utf8("Code"),                // 7
			utf8("java/lang/Exception"), // 8
			class_entry(8),              // 9
			utf8("LineNumberTable"),     // 10
			utf8("StackMapTable"),       // 11
		],
		2,
		4,
		&[],
		&[member(flags::ACC_PUBLIC, 5, 6, &[
			code_attribute(7, 2, 2, &bytecode, &[(0, 6, 9, 9)], nested),
		])],
		&[],
	)
}

fn assert_lines(rendered: &Rendered, expected: &[&str]) {
	let mut text = expected.join("\n");
	text.push('\n');
	assert_eq!(rendered.text, text);
}

#[test]
fn plain_rendering_of_members() -> Result<()> {
	let rendered = jdis::disassemble_bytes(&members_class(), &RenderOptions::default())?;

	assert_lines(&rendered, &[
		"Compiled from \"Test.java\"",
		"public class Test {",
		"  public int x;",
		"  public static void main(java.lang.String[]);",
		"}",
	]);
	assert_eq!(rendered.faults, Vec::new());

	Ok(())
}

#[test]
fn verbose_dumps_header_pool_and_attributes() -> Result<()> {
	let options = RenderOptions {
		show_all_attributes: true,
		show_constant_pool: true,
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&members_class(), &options)?;

	assert_lines(&rendered, &[
		"Compiled from \"Test.java\"",
		"public class Test",
		"  minor version: 0",
		"  major version: 65",
		"  flags: (0x0021) ACC_PUBLIC, ACC_SUPER",
		&format!("{:<40}// Test", "  this_class: #2"),
		&format!("{:<40}// java/lang/Object", "  super_class: #4"),
		"  interfaces: 0, fields: 1, methods: 1, attributes: 1",
		"Constant pool:",
		"   #1 = Utf8               Test",
		"   #2 = Class              #1             // Test",
		"   #3 = Utf8               java/lang/Object",
		"   #4 = Class              #3             // java/lang/Object",
		"   #5 = Utf8               x",
		"   #6 = Utf8               I",
		"   #7 = Utf8               main",
		"   #8 = Utf8               ([Ljava/lang/String;)V",
		"   #9 = Utf8               SourceFile",
		"  #10 = Utf8               Test.java",
		"{",
		"  public int x;",
		"    descriptor: I",
		"    flags: (0x0001) ACC_PUBLIC",
		"",
		"  public static void main(java.lang.String[]);",
		"    descriptor: ([Ljava/lang/String;)V",
		"    flags: (0x0009) ACC_PUBLIC, ACC_STATIC",
		"}",
		"SourceFile: \"Test.java\"",
	]);
	assert_eq!(rendered.faults, Vec::new());

	Ok(())
}

#[test]
fn code_blocks_list_instructions_and_exception_table() -> Result<()> {
	let options = RenderOptions {
		show_disassembly: true,
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&code_class(&[]), &options)?;

	assert_lines(&rendered, &[
		"public class Test {",
		"  public void run();",
		"    Code:",
		"         0: iconst_0",
		"         1: istore_1",
		"         2: iload_1",
		"         3: ifeq          9",
		"         6: iinc          1, 1",
		"         9: return",
		"      Exception table:",
		"         from    to target type",
		"            0     6      9   Class java/lang/Exception",
		"}",
	]);
	assert_eq!(rendered.faults, Vec::new());

	Ok(())
}

#[test]
fn line_notes_interleave_with_instructions() -> Result<()> {
	// one line number table row: pc 0 is line 4
	let line_number_table = attribute(10, &[0, 1, 0, 0, 0, 4]);
	let options = RenderOptions {
		show_disassembly: true,
		details: Details { source: true, ..Details::default() },
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&code_class(&[line_number_table]), &options)?;

	assert_lines(&rendered, &[
		"public class Test {",
		"  public void run();",
		"    Code:",
		"      line 4",
		"         0: iconst_0",
		"         1: istore_1",
		"         2: iload_1",
		"         3: ifeq          9",
		"         6: iinc          1, 1",
		"         9: return",
		"      Exception table:",
		"         from    to target type",
		"            0     6      9   Class java/lang/Exception",
		"}",
	]);

	Ok(())
}

#[test]
fn stack_map_notes_reconstruct_frames() -> Result<()> {
	// one append frame at offset 9, adding an int local
	let stack_map_table = attribute(11, &[0, 1, 252, 0, 9, 1]);
	let options = RenderOptions {
		show_disassembly: true,
		details: Details { stack_maps: true, ..Details::default() },
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&code_class(&[stack_map_table]), &options)?;

	assert_lines(&rendered, &[
		"public class Test {",
		"  public void run();",
		"    Code:",
		"      StackMap locals: [class Test]",
		"         0: iconst_0",
		"         1: istore_1",
		"         2: iload_1",
		"         3: ifeq          9",
		"         6: iinc          1, 1",
		"      StackMap locals: [class Test, int]",
		"      StackMap stack: []",
		"         9: return",
		"      Exception table:",
		"         from    to target type",
		"            0     6      9   Class java/lang/Exception",
		"}",
	]);
	assert_eq!(rendered.faults, Vec::new());

	Ok(())
}

#[test]
fn unknown_attributes_dump_hex_and_do_not_disturb_siblings() -> Result<()> {
	let bytes = class_file(
		&[
			utf8("Test"),       // 1
			class_entry(1),     // 2
			utf8("Fancy"),      // 3
			utf8("SourceFile"), // 4
			utf8("Test.java"),  // 5
		],
		2,
		0,
		&[],
		&[],
		&[
			attribute(3, &[0xde, 0xad, 0xbe]),
			attribute(4, &5u16.to_be_bytes()),
		],
	);
	let options = RenderOptions {
		show_all_attributes: true,
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&bytes, &options)?;

	assert_lines(&rendered, &[
		"Compiled from \"Test.java\"",
		"public class Test",
		"  minor version: 0",
		"  major version: 65",
		"  flags: (0x0021) ACC_PUBLIC, ACC_SUPER",
		&format!("{:<40}// Test", "  this_class: #2"),
		"  super_class: #0",
		"  interfaces: 0, fields: 0, methods: 0, attributes: 2",
		"{",
		"}",
		"Fancy: length = 0x3 (unknown attribute)",
		"  de ad be",
		"SourceFile: \"Test.java\"",
	]);
	assert_eq!(rendered.faults, Vec::new());

	Ok(())
}

#[test]
fn an_undecodable_instruction_stops_the_listing_with_a_fault() -> Result<()> {
	// the branch offset of the ifeq is cut off
	let bytes = class_file(
		&[
			utf8("Test"),             // 1
			class_entry(1),           // 2
			utf8("java/lang/Object"), // 3
			class_entry(3),           // 4
			utf8("run"),              // 5
			utf8("()V"),              // 6
			utf8("Code"),             // 7
		],
		2,
		4,
		&[],
		&[member(flags::ACC_PUBLIC, 5, 6, &[
			code_attribute(7, 1, 1, &[0x99], &[], &[]),
		])],
		&[],
	);
	let options = RenderOptions {
		show_disassembly: true,
		..RenderOptions::default()
	};

	let rendered = jdis::disassemble_bytes(&bytes, &options)?;

	assert_eq!(rendered.faults.len(), 1);
	assert_eq!(rendered.faults[0].kind, FaultKind::InstructionDecode);
	assert_eq!(rendered.faults[0].location, "method run:()V");
	assert!(rendered.faults[0].detail.contains("at bytecode offset 0"));

	let marker = rendered.text.lines()
		.find(|line| line.trim_start().starts_with("<decode fault:"));
	assert!(marker.is_some(), "expected a decode fault marker in:\n{}", rendered.text);

	Ok(())
}

#[test]
fn rendering_is_deterministic() -> Result<()> {
	let line_number_table = attribute(10, &[0, 1, 0, 0, 0, 4]);
	let stack_map_table = attribute(11, &[0, 1, 252, 0, 9, 1]);
	let bytes = code_class(&[line_number_table, stack_map_table]);

	let options = RenderOptions {
		show_all_attributes: true,
		show_descriptors: true,
		show_line_and_local_var_tables: true,
		show_disassembly: true,
		show_constant_pool: true,
		details: Details::all(),
		..RenderOptions::default()
	};

	let first = jdis::disassemble_bytes(&bytes, &options)?;
	let second = jdis::disassemble_bytes(&bytes, &options)?;

	assert_eq!(first, second);

	Ok(())
}

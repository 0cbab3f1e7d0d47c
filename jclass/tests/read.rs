//! Reads whole class files assembled byte by byte.

use anyhow::Result;
use java_string::JavaStr;
use pretty_assertions::assert_eq;
use jclass::FaultKind;
use jclass::class_constants::{flags, pool};
use jclass::tree::attribute::Attribute;
use jclass::tree::version::Version;

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

fn code_attribute(name_index: u16, max_stack: u16, max_locals: u16, bytecode: &[u8], exception_table: &[(u16, u16, u16, u16)]) -> Vec<u8> {
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
	payload.extend(0u16.to_be_bytes()); // no nested attributes
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

#[allow(clippy::too_many_arguments)]
fn class_file(
	pool_entries: &[Vec<u8>],
	access_flags: u16,
	this_class: u16,
	super_class: u16,
	interfaces: &[u16],
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
	bytes.extend(access_flags.to_be_bytes());
	bytes.extend(this_class.to_be_bytes());
	bytes.extend(super_class.to_be_bytes());
	bytes.extend((interfaces.len() as u16).to_be_bytes());
	for &interface in interfaces {
		bytes.extend(interface.to_be_bytes());
	}
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

#[test]
fn reads_a_class_with_code() -> Result<()> {
	let bytes = class_file(
		&[
			utf8("Test"),                   // 1
			class_entry(1),                 // 2
			utf8("java/lang/Object"),       // 3
			class_entry(3),                 // 4
			utf8("main"),                   // 5
			utf8("([Ljava/lang/String;)V"), // 6
			utf8("Code"),                   // 7
			utf8("java/lang/Exception"),    // 8
			class_entry(8),                 // 9
		],
		flags::ACC_PUBLIC | flags::ACC_SUPER,
		2,
		4,
		&[],
		&[],
		&[member(
			flags::ACC_PUBLIC | flags::ACC_STATIC,
			5,
			6,
			&[code_attribute(7, 1, 1, &[0xb1], &[(0, 1, 1, 9)])],
		)],
		&[],
	);

	let class = jclass::read_class_bytes(&bytes)?;

	assert_eq!(class.version, Version { major: 65, minor: 0 });
	assert_eq!(class.access_flags, flags::ACC_PUBLIC | flags::ACC_SUPER);
	assert_eq!(class.pool.get_class(class.this_class)?, JavaStr::from_str("Test"));
	assert_eq!(class.pool.get_class(class.super_class)?, JavaStr::from_str("java/lang/Object"));
	assert_eq!(class.interfaces, Vec::<u16>::new());
	assert_eq!(class.fields.len(), 0);
	assert_eq!(class.methods.len(), 1);
	assert_eq!(class.faults, Vec::new());

	let method = &class.methods[0];
	assert!(method.access().is_public);
	assert!(method.access().is_static);
	assert_eq!(class.pool.get_utf8(method.name_index)?, JavaStr::from_str("main"));

	let Attribute::Code(code) = &method.attributes[0] else {
		panic!("expected a code attribute, got {:?}", method.attributes[0]);
	};
	assert_eq!(code.max_stack, 1);
	assert_eq!(code.max_locals, 1);
	assert_eq!(code.bytecode, vec![0xb1]);
	assert_eq!(code.exception_table.len(), 1);
	assert_eq!(code.exception_table[0].handler_pc, 1);
	assert_eq!(code.exception_table[0].catch_type, 9);

	Ok(())
}

#[test]
fn wrong_magic_is_fatal() {
	let bytes = [0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 65];

	let result = jclass::read_class_bytes(&bytes);

	assert!(result.is_err());
	assert!(format!("{:#}", result.unwrap_err()).contains("magic"));
}

#[test]
fn a_truncated_pool_is_fatal() {
	// count says three entries, only one follows
	let mut bytes = vec![0xca, 0xfe, 0xba, 0xbe, 0, 0, 0, 65, 0, 4];
	bytes.extend(utf8("Test"));

	assert!(jclass::read_class_bytes(&bytes).is_err());
}

#[test]
fn a_misshapen_attribute_faults_with_its_member_location() -> Result<()> {
	// ConstantValue payload must be two bytes; this one is empty
	let bytes = class_file(
		&[
			utf8("Test"),          // 1
			class_entry(1),        // 2
			utf8("value"),         // 3
			utf8("I"),             // 4
			utf8("ConstantValue"), // 5
		],
		flags::ACC_PUBLIC | flags::ACC_SUPER,
		2,
		0,
		&[],
		&[member(flags::ACC_PUBLIC, 3, 4, &[attribute(5, &[])])],
		&[],
		&[],
	);

	let class = jclass::read_class_bytes(&bytes)?;

	assert_eq!(class.faults.len(), 1);
	assert_eq!(class.faults[0].kind, FaultKind::AttributeShape);
	assert_eq!(class.faults[0].location, "field value:I");

	let Attribute::Unknown { name, reason, .. } = &class.fields[0].attributes[0] else {
		panic!("expected the broken attribute to be kept raw");
	};
	assert_eq!(name, JavaStr::from_str("ConstantValue"));
	assert!(reason.is_some());

	Ok(())
}

#[test]
fn long_entries_occupy_two_pool_slots() -> Result<()> {
	let mut long_entry = vec![pool::LONG];
	long_entry.extend(9u64.to_be_bytes());

	let bytes = class_file(
		&[
			utf8("Test"),   // 1
			class_entry(1), // 2
			long_entry,     // 3, ghost slot 4
			utf8("after"),  // 5
		],
		0,
		2,
		0,
		&[],
		&[],
		&[],
		&[],
	);
	// the pool count field includes the ghost slot
	let mut bytes = bytes;
	bytes[8..10].copy_from_slice(&6u16.to_be_bytes());

	let class = jclass::read_class_bytes(&bytes)?;

	assert_eq!(class.pool.get_long(3)?, 9);
	assert!(class.pool.get(4).is_err());
	assert_eq!(class.pool.get_utf8(5)?, JavaStr::from_str("after"));

	Ok(())
}

//! The renderer: walks a decoded class file and writes the javap-shaped text.
//!
//! Everything here is infallible by construction: pool lookups go through
//! [`PoolDisplay`], which degrades to `#n` placeholders, and the one thing that
//! can actually fail mid-stream, instruction decoding, turns into an inline
//! `<decode fault: …>` marker that ends just that code block.

use java_string::{JavaStr, JavaString};
use jclass::{Fault, FaultKind};
use jclass::bytecode::{Insn, InsnReader, Operand};
use jclass::class_constants::{flags, type_annotation};
use jclass::frame::{self, FrameRecord, VerificationType};
use jclass::tree::annotation::{Annotation, ElementValue, TargetInfo, TypeAnnotation, TypePathSegment};
use jclass::tree::attribute::{Attribute, LocalVariable};
use jclass::tree::class::ClassFile;
use jclass::tree::descriptor::parse_method_descriptor;
use jclass::tree::field::Field;
use jclass::tree::method::Method;
use jclass::tree::method::code::{Code, ExceptionTableEntry};
use jclass::tree::module::Module;
use crate::RenderOptions;
use crate::annotate::Annotator;
use crate::pool_display::{java_descriptor, java_name, PoolDisplay};
use crate::signature::{parse_class_signature, parse_field_signature, parse_method_signature, type_parameters_java, ClassType};
use crate::writer::TextWriter;

pub(crate) fn render(class: &ClassFile, options: &RenderOptions) -> (String, Vec<Fault>) {
	let renderer = Renderer {
		class,
		options,
		w: TextWriter::new(options.indent_width, options.comment_column),
		pd: PoolDisplay::new(&class.pool, class.this_class, options.simplify_same_class_refs),
		faults: Vec::new(),
	};
	renderer.run()
}

struct Renderer<'a> {
	class: &'a ClassFile,
	options: &'a RenderOptions,
	w: TextWriter,
	pd: PoolDisplay<'a>,
	/// Instruction decode faults; pool resolution faults collect inside `pd`.
	faults: Vec<Fault>,
}

impl<'a> Renderer<'a> {
	fn run(mut self) -> (String, Vec<Fault>) {
		self.preamble();

		let declaration = self.class_declaration();
		if self.options.show_all_attributes || self.options.show_constant_pool {
			self.w.line(&declaration);
			if self.options.show_all_attributes {
				self.header_block();
			}
			if self.options.show_constant_pool {
				self.pool_dump();
			}
			self.w.line("{");
		} else {
			self.w.line(&format!("{declaration} {{"));
		}

		self.w.indent();
		let mut first = true;
		for field in &self.class.fields {
			if self.options.access_filter.shows(field.access_flags) {
				self.member_separator(&mut first);
				self.field(field);
			}
		}
		for method in &self.class.methods {
			if self.options.access_filter.shows(method.access_flags) {
				self.member_separator(&mut first);
				self.method(method);
			}
		}
		self.w.dedent();
		self.w.line("}");

		if self.options.show_all_attributes {
			for attribute in &self.class.attributes {
				self.attribute(attribute);
			}
		}

		let mut faults = self.pd.into_faults();
		faults.extend(self.faults);
		(self.w.finish(), faults)
	}

	fn member_separator(&mut self, first: &mut bool) {
		let details_shown = self.options.show_all_attributes
			|| self.options.show_descriptors
			|| self.options.show_disassembly
			|| self.options.show_line_and_local_var_tables;
		if !*first && details_shown {
			self.w.blank();
		}
		*first = false;
	}

	fn preamble(&mut self) {
		for attribute in &self.class.attributes {
			if let Attribute::SourceFile { sourcefile_index } = attribute {
				if let Ok(name) = self.class.pool.get_utf8(*sourcefile_index) {
					self.w.line(&format!("Compiled from \"{name}\""));
				}
				return;
			}
		}
	}

	fn class_declaration(&mut self) -> String {
		let access = self.class.access();

		let mut decl = String::new();
		if access.is_public { decl.push_str("public "); }
		if access.is_abstract && !access.is_interface { decl.push_str("abstract "); }
		if access.is_final && !access.is_enum { decl.push_str("final "); }
		decl.push_str(if access.is_annotation {
			"@interface"
		} else if access.is_interface {
			"interface"
		} else if access.is_enum {
			"enum"
		} else {
			"class"
		});
		decl.push(' ');
		decl.push_str(&self.pd.java_class_name(self.class.this_class));

		let parsed_signature = find_signature(&self.class.attributes)
			.and_then(|index| self.class.pool.get_utf8(index).ok())
			.and_then(|text| parse_class_signature(text).ok());

		if let Some(signature) = &parsed_signature {
			decl.push_str(&type_parameters_java(&signature.type_parameters));
		}

		if !access.is_interface {
			match &parsed_signature {
				Some(signature) if !is_plain_object(&signature.superclass) => {
					decl.push_str(" extends ");
					decl.push_str(&signature.superclass.java());
				},
				Some(_) => {},
				None => if self.class.super_class != 0 {
					match self.class.pool.get_class(self.class.super_class) {
						Ok(name) if name == JavaStr::from_str("java/lang/Object") => {},
						Ok(name) => {
							decl.push_str(" extends ");
							decl.push_str(&java_name(name));
						},
						Err(_) => {
							decl.push_str(" extends ");
							decl.push_str(&self.pd.java_class_name(self.class.super_class));
						},
					}
				},
			}
		}

		let interface_names: Vec<String> = match &parsed_signature {
			Some(signature) if !signature.interfaces.is_empty() =>
				signature.interfaces.iter().map(ClassType::java).collect(),
			_ => {
				let mut names = Vec::new();
				for &index in &self.class.interfaces {
					names.push(self.pd.java_class_name(index));
				}
				names
			},
		};
		if !interface_names.is_empty() {
			decl.push_str(if access.is_interface { " extends " } else { " implements " });
			decl.push_str(&interface_names.join(", "));
		}

		decl
	}

	fn header_block(&mut self) {
		self.w.indent();
		self.w.line(&format!("minor version: {}", self.class.version.minor));
		self.w.line(&format!("major version: {}", self.class.version.major));
		self.w.line(&format!("flags: {}", flag_list(self.class.access_flags, CLASS_FLAG_NAMES)));

		let comment = self.pd.class_name(self.class.this_class);
		self.w.line_with_comment(&format!("this_class: #{}", self.class.this_class), &comment);
		if self.class.super_class == 0 {
			self.w.line("super_class: #0");
		} else {
			let comment = self.pd.class_name(self.class.super_class);
			self.w.line_with_comment(&format!("super_class: #{}", self.class.super_class), &comment);
		}

		self.w.line(&format!("interfaces: {}, fields: {}, methods: {}, attributes: {}",
			self.class.interfaces.len(), self.class.fields.len(),
			self.class.methods.len(), self.class.attributes.len()));
		self.w.dedent();
	}

	fn pool_dump(&mut self) {
		self.pd.set_location("constant pool");
		self.w.line("Constant pool:");
		for (index, entry) in self.class.pool.iter() {
			let (tag, value, comment) = self.pd.dump_entry(index, entry);
			let head = format!("{:>5} = ", format!("#{index}"));
			match comment {
				Some(comment) => self.w.line(&format!("{head}{tag:<19}{value:<15}// {comment}")),
				None => self.w.line(&format!("{head}{tag:<19}{value}")),
			}
		}
		self.pd.set_location("class");
	}

	fn field(&mut self, field: &Field) {
		let name = self.pd.utf8_raw(field.name_index);
		let descriptor = self.pd.utf8_raw(field.descriptor_index);
		self.pd.set_location(format!("field {name}:{descriptor}"));

		let declaration = self.field_declaration(field);
		self.w.line(&declaration);

		self.w.indent();
		if self.options.show_descriptors || self.options.show_all_attributes {
			let descriptor = self.pd.utf8_raw(field.descriptor_index);
			self.w.line(&format!("descriptor: {descriptor}"));
		}
		if self.options.show_all_attributes {
			self.w.line(&format!("flags: {}", flag_list(field.access_flags, FIELD_FLAG_NAMES)));
			for attribute in &field.attributes {
				self.attribute(attribute);
			}
		}
		self.w.dedent();

		self.pd.set_location("class");
	}

	fn field_declaration(&mut self, field: &Field) -> String {
		let access = field.access();
		let mut decl = String::new();
		if access.is_public { decl.push_str("public "); }
		if access.is_protected { decl.push_str("protected "); }
		if access.is_private { decl.push_str("private "); }
		if access.is_static { decl.push_str("static "); }
		if access.is_final { decl.push_str("final "); }
		if access.is_volatile { decl.push_str("volatile "); }
		if access.is_transient { decl.push_str("transient "); }

		let field_type = match find_signature(&field.attributes)
			.and_then(|index| self.class.pool.get_utf8(index).ok())
			.and_then(|text| parse_field_signature(text).ok())
		{
			Some(parsed) => parsed.java(),
			None => java_descriptor(&self.pd.utf8_raw(field.descriptor_index)),
		};
		let name = self.pd.utf8(field.name_index);

		format!("{decl}{field_type} {name};")
	}

	fn method(&mut self, method: &Method) {
		let name = self.pd.utf8_raw(method.name_index);
		let descriptor = self.pd.utf8_raw(method.descriptor_index);
		self.pd.set_location(format!("method {name}:{descriptor}"));

		let declaration = self.method_declaration(method);
		self.w.line(&declaration);

		self.w.indent();
		if self.options.show_descriptors || self.options.show_all_attributes {
			let descriptor = self.pd.utf8_raw(method.descriptor_index);
			self.w.line(&format!("descriptor: {descriptor}"));
		}
		if self.options.show_all_attributes {
			self.w.line(&format!("flags: {}", flag_list(method.access_flags, METHOD_FLAG_NAMES)));
		}
		for attribute in &method.attributes {
			match attribute {
				Attribute::Code(code) => {
					if self.options.show_disassembly || self.options.show_all_attributes {
						self.code(method, code);
					} else if self.options.show_line_and_local_var_tables {
						self.code_tables(code);
					}
				},
				attribute if self.options.show_all_attributes => self.attribute(attribute),
				_ => {},
			}
		}
		self.w.dedent();

		self.pd.set_location("class");
	}

	fn method_declaration(&mut self, method: &Method) -> String {
		let access = method.access();
		let name = self.pd.utf8_raw(method.name_index);
		if name == "<clinit>" {
			return "static {};".to_owned();
		}

		let mut decl = String::new();
		if access.is_public { decl.push_str("public "); }
		if access.is_protected { decl.push_str("protected "); }
		if access.is_private { decl.push_str("private "); }
		if access.is_abstract { decl.push_str("abstract "); }
		if access.is_static { decl.push_str("static "); }
		if access.is_final { decl.push_str("final "); }
		if access.is_synchronized { decl.push_str("synchronized "); }
		if access.is_native { decl.push_str("native "); }

		let is_constructor = name == "<init>";
		let shown_name = if is_constructor {
			self.pd.java_class_name(self.class.this_class)
		} else {
			self.pd.utf8(method.name_index)
		};

		let descriptor = self.pd.utf8_raw(method.descriptor_index);
		let parsed_signature = find_signature(&method.attributes)
			.and_then(|index| self.class.pool.get_utf8(index).ok())
			.and_then(|text| parse_method_signature(text).ok());

		let (type_parameters, mut parameters, result) = if let Some(signature) = &parsed_signature {
			(
				type_parameters_java(&signature.type_parameters),
				signature.parameters.iter().map(|p| p.java()).collect::<Vec<String>>(),
				signature.result.as_ref().map_or_else(|| "void".to_owned(), |r| r.java()),
			)
		} else if let Ok(parsed) = parse_method_descriptor(&descriptor) {
			(
				String::new(),
				parsed.parameter_descriptors.iter().map(crate::pool_display::java_type).collect(),
				parsed.return_descriptor.as_ref().map_or_else(|| "void".to_owned(), crate::pool_display::java_type),
			)
		} else {
			// the descriptor doesn't parse; show it raw rather than nothing
			let raw = self.pd.utf8(method.descriptor_index);
			return format!("{decl}{shown_name}{raw};");
		};

		if access.is_varargs {
			if let Some(last) = parameters.last_mut() {
				if last.ends_with("[]") {
					last.truncate(last.len() - 2);
					last.push_str("...");
				}
			}
		}

		if !type_parameters.is_empty() {
			decl.push_str(&type_parameters);
			decl.push(' ');
		}
		if !is_constructor {
			decl.push_str(&result);
			decl.push(' ');
		}
		decl.push_str(&shown_name);
		decl.push('(');
		decl.push_str(&parameters.join(", "));
		decl.push(')');

		let throws: Vec<String> = match &parsed_signature {
			Some(signature) if !signature.throws.is_empty() =>
				signature.throws.iter().map(|t| t.java()).collect(),
			_ => {
				let mut names = Vec::new();
				if let Some(table) = find_exceptions(&method.attributes) {
					for &index in table {
						names.push(self.pd.java_class_name(index));
					}
				}
				names
			},
		};
		if !throws.is_empty() {
			decl.push_str(" throws ");
			decl.push_str(&throws.join(", "));
		}

		decl.push(';');
		decl
	}

	fn code(&mut self, method: &Method, code: &Code) {
		self.w.line("Code:");
		self.w.indent();

		if self.options.show_all_attributes {
			let mut line = format!("stack={}, locals={}", code.max_stack, code.max_locals);
			if let Ok(descriptor) = self.class.pool.get_utf8(method.descriptor_index) {
				if let Ok(parsed) = parse_method_descriptor(descriptor) {
					let args_size = parsed.parameter_descriptors.len()
						+ usize::from(!method.access().is_static);
					line.push_str(&format!(", args_size={args_size}"));
				}
			}
			self.w.line(&line);
		}

		let annotators = self.annotators(method, code);
		let code_length = code.bytecode.len() as u32;

		for insn in InsnReader::new(&code.bytecode) {
			match insn {
				Ok(insn) => {
					for annotator in &annotators {
						for note in annotator.notes_before(insn.pc) {
							self.w.line(note);
						}
					}
					self.insn(&insn);
					for annotator in &annotators {
						for note in annotator.notes_after(insn.pc) {
							self.w.line(note);
						}
					}
				},
				Err(e) => {
					self.faults.push(Fault {
						kind: FaultKind::InstructionDecode,
						location: self.pd.location().to_owned(),
						detail: format!("{e:#}"),
					});
					self.w.line(&format!("<decode fault: {e:#}>"));
					break;
				},
			}
		}
		for annotator in &annotators {
			for note in annotator.flush(code_length) {
				self.w.line(note);
			}
		}

		if !code.exception_table.is_empty() {
			self.exception_table(&code.exception_table);
		}
		if self.options.show_line_and_local_var_tables || self.options.show_all_attributes {
			self.code_tables(code);
		}
		if self.options.show_all_attributes {
			for attribute in &code.attributes {
				match attribute {
					Attribute::StackMapTable { entries } => self.stack_map_dump(entries),
					Attribute::RuntimeVisibleTypeAnnotations { annotations } =>
						self.type_annotations_block("RuntimeVisibleTypeAnnotations:", annotations),
					Attribute::RuntimeInvisibleTypeAnnotations { annotations } =>
						self.type_annotations_block("RuntimeInvisibleTypeAnnotations:", annotations),
					Attribute::Unknown { name, data, reason } => self.unknown_attribute(name, data, reason),
					_ => {},
				}
			}
		}

		self.w.dedent();
	}

	/// The enabled annotators for one code attribute, in note emission order.
	fn annotators(&mut self, method: &Method, code: &Code) -> Vec<Annotator> {
		let details = self.options.details;
		let mut annotators = Vec::new();

		if details.source {
			let mut rows = Vec::new();
			for attribute in &code.attributes {
				if let Attribute::LineNumberTable { line_number_table } = attribute {
					rows.extend_from_slice(line_number_table);
				}
			}
			if !rows.is_empty() {
				annotators.push(Annotator::lines(&rows));
			}
		}

		if details.stack_maps {
			let mut records: Vec<FrameRecord> = Vec::new();
			let mut present = false;
			for attribute in &code.attributes {
				if let Attribute::StackMapTable { entries } = attribute {
					present = true;
					records.extend_from_slice(entries);
				}
			}
			if present {
				let receiver = (!method.access().is_static).then_some(self.class.this_class);
				let initial = self.class.pool.get_utf8(method.descriptor_index).ok()
					.and_then(|descriptor| frame::initial_frame(descriptor, receiver).ok());
				if let Some(initial) = initial {
					let frames = frame::reconstruct(&initial, &records);
					annotators.push(Annotator::stack_maps(Some(&initial), &frames, &mut self.pd));
				}
			}
		}

		if details.try_blocks && !code.exception_table.is_empty() {
			annotators.push(Annotator::try_blocks(&code.exception_table, &mut self.pd));
		}

		if details.local_vars {
			let mut rows: Vec<LocalVariable> = Vec::new();
			for attribute in &code.attributes {
				if let Attribute::LocalVariableTable { local_variable_table } = attribute {
					rows.extend_from_slice(local_variable_table);
				}
			}
			if !rows.is_empty() {
				annotators.push(Annotator::local_variables(&rows, false, &mut self.pd));
			}
		}

		if details.local_var_types {
			let mut rows: Vec<LocalVariable> = Vec::new();
			for attribute in &code.attributes {
				if let Attribute::LocalVariableTypeTable { local_variable_type_table } = attribute {
					rows.extend_from_slice(local_variable_type_table);
				}
			}
			if !rows.is_empty() {
				annotators.push(Annotator::local_variables(&rows, true, &mut self.pd));
			}
		}

		if details.type_annotations {
			let mut all: Vec<&TypeAnnotation> = Vec::new();
			for attribute in &code.attributes {
				match attribute {
					Attribute::RuntimeVisibleTypeAnnotations { annotations } |
					Attribute::RuntimeInvisibleTypeAnnotations { annotations } =>
						all.extend(annotations.iter()),
					_ => {},
				}
			}
			if !all.is_empty() {
				annotators.push(Annotator::type_annotations(all.into_iter(), &mut self.pd));
			}
		}

		annotators
	}

	fn insn(&mut self, insn: &Insn) {
		let head = format!("{:4}: {:<13}", insn.pc, insn.mnemonic());
		match &insn.operand {
			Operand::None => self.w.line(&head),
			Operand::Local { index } => self.w.line(&format!("{head} {index}")),
			Operand::Iinc { index, value } => self.w.line(&format!("{head} {index}, {value}")),
			Operand::Immediate { value } => self.w.line(&format!("{head} {value}")),
			Operand::Branch { offset } => {
				let target = insn.pc as i64 + *offset as i64;
				self.w.line(&format!("{head} {target}"));
			},
			Operand::Pool { index } => {
				let comment = self.pd.constant(*index);
				self.w.line_with_comment(&format!("{head} #{index}"), &comment);
			},
			Operand::PoolAndValue { index, value } => {
				let comment = self.pd.constant(*index);
				self.w.line_with_comment(&format!("{head} #{index},  {value}"), &comment);
			},
			Operand::ArrayType { atype } => self.w.line(&format!("{head} {}", array_type_name(*atype))),
			Operand::TableSwitch { default, low, high, offsets } => {
				self.w.line(&format!("{head} {{ // {low} to {high}"));
				self.w.indent();
				for (i, offset) in offsets.iter().enumerate() {
					let key = *low as i64 + i as i64;
					self.w.line(&format!("{key:>12}: {}", insn.pc as i64 + *offset as i64));
				}
				self.w.line(&format!("{:>12}: {}", "default", insn.pc as i64 + *default as i64));
				self.w.line("}");
				self.w.dedent();
			},
			Operand::LookupSwitch { default, pairs } => {
				self.w.line(&format!("{head} {{ // {}", pairs.len()));
				self.w.indent();
				for (key, offset) in pairs {
					self.w.line(&format!("{key:>12}: {}", insn.pc as i64 + *offset as i64));
				}
				self.w.line(&format!("{:>12}: {}", "default", insn.pc as i64 + *default as i64));
				self.w.line("}");
				self.w.dedent();
			},
		}
	}

	fn exception_table(&mut self, table: &[ExceptionTableEntry]) {
		self.w.line("Exception table:");
		self.w.indent();
		self.w.line(&format!("{:>5} {:>5} {:>6} {}", "from", "to", "target", "type"));
		for entry in table {
			let catch_type = if entry.catch_type == 0 {
				"any".to_owned()
			} else {
				format!("Class {}", self.pd.class_name(entry.catch_type))
			};
			self.w.line(&format!("{:5} {:5} {:6}   {}",
				entry.start_pc, entry.end_pc, entry.handler_pc, catch_type));
		}
		self.w.dedent();
	}

	fn code_tables(&mut self, code: &Code) {
		for attribute in &code.attributes {
			match attribute {
				Attribute::LineNumberTable { line_number_table } => {
					self.w.line("LineNumberTable:");
					self.w.indent();
					for row in line_number_table {
						self.w.line(&format!("line {}: {}", row.line_number, row.start_pc));
					}
					self.w.dedent();
				},
				Attribute::LocalVariableTable { local_variable_table } =>
					self.local_variable_table("LocalVariableTable:", local_variable_table),
				Attribute::LocalVariableTypeTable { local_variable_type_table } =>
					self.local_variable_table("LocalVariableTypeTable:", local_variable_type_table),
				_ => {},
			}
		}
	}

	fn local_variable_table(&mut self, title: &str, table: &[LocalVariable]) {
		self.w.line(title);
		self.w.indent();
		self.w.line(&format!("{:>5} {:>7} {:>5} {:>5}   {}", "Start", "Length", "Slot", "Name", "Signature"));
		for row in table {
			let name = self.pd.utf8(row.name_index);
			let descriptor = self.pd.utf8_raw(row.descriptor_index);
			self.w.line(&format!("{:5} {:7} {:5} {name:>5}   {descriptor}",
				row.start_pc, row.length, row.index));
		}
		self.w.dedent();
	}

	fn stack_map_dump(&mut self, entries: &[FrameRecord]) {
		self.w.line(&format!("StackMapTable: number_of_entries = {}", entries.len()));
		self.w.indent();
		for record in entries {
			self.w.line(&format!("frame_type = {} /* {} */", record.frame_type(), frame_kind_name(record)));
			self.w.indent();
			match record {
				FrameRecord::Same { .. } => {},
				FrameRecord::SameLocals1StackItem { stack, .. } => {
					let stack = self.stored_type(stack);
					self.w.line(&format!("stack = [ {stack} ]"));
				},
				FrameRecord::SameLocals1StackItemExtended { offset_delta, stack } => {
					self.w.line(&format!("offset_delta = {offset_delta}"));
					let stack = self.stored_type(stack);
					self.w.line(&format!("stack = [ {stack} ]"));
				},
				FrameRecord::Chop { offset_delta, .. } |
				FrameRecord::SameExtended { offset_delta } => {
					self.w.line(&format!("offset_delta = {offset_delta}"));
				},
				FrameRecord::Append { offset_delta, locals, .. } => {
					self.w.line(&format!("offset_delta = {offset_delta}"));
					let locals = self.stored_types(locals);
					self.w.line(&format!("locals = {locals}"));
				},
				FrameRecord::Full { offset_delta, locals, stack } => {
					self.w.line(&format!("offset_delta = {offset_delta}"));
					let locals = self.stored_types(locals);
					self.w.line(&format!("locals = {locals}"));
					let stack = self.stored_types(stack);
					self.w.line(&format!("stack = {stack}"));
				},
			}
			self.w.dedent();
		}
		self.w.dedent();
	}

	fn stored_types(&mut self, types: &[VerificationType]) -> String {
		if types.is_empty() {
			return "[]".to_owned();
		}
		let mut parts = Vec::new();
		for ty in types {
			parts.push(self.stored_type(ty));
		}
		format!("[ {} ]", parts.join(", "))
	}

	fn stored_type(&mut self, ty: &VerificationType) -> String {
		match ty {
			VerificationType::Top => "top".to_owned(),
			VerificationType::Integer => "int".to_owned(),
			VerificationType::Float => "float".to_owned(),
			VerificationType::Long => "long".to_owned(),
			VerificationType::Double => "double".to_owned(),
			VerificationType::Null => "null".to_owned(),
			VerificationType::UninitializedThis => "uninit_this".to_owned(),
			VerificationType::Object { class_index } => format!("class {}", self.pd.class_name(*class_index)),
			VerificationType::NamedObject { name } => format!("class {}", crate::pool_display::escape_name(name)),
			VerificationType::Uninitialized { offset } => format!("uninit {offset}"),
		}
	}

	/// One attribute block, for the kinds that render the same wherever they sit.
	fn attribute(&mut self, attribute: &Attribute) {
		match attribute {
			Attribute::ConstantValue { constant_value_index } => {
				let value = self.pd.constant(*constant_value_index);
				self.w.line(&format!("ConstantValue: {value}"));
			},
			// handled by the member rendering; a Code attribute anywhere else is
			// not a predefined placement and stays silent
			Attribute::Code(_) => {},
			Attribute::StackMapTable { entries } => self.stack_map_dump(entries),
			Attribute::Exceptions { exception_index_table } => {
				if !exception_index_table.is_empty() {
					self.w.line("Exceptions:");
					self.w.indent();
					let mut names = Vec::new();
					for &index in exception_index_table {
						names.push(self.pd.java_class_name(index));
					}
					self.w.line(&format!("throws {}", names.join(", ")));
					self.w.dedent();
				}
			},
			Attribute::InnerClasses { classes } => {
				self.w.line("InnerClasses:");
				self.w.indent();
				for entry in classes {
					let access = entry.access();
					let mut text = String::new();
					if access.is_public { text.push_str("public "); }
					if access.is_protected { text.push_str("protected "); }
					if access.is_private { text.push_str("private "); }
					if access.is_static { text.push_str("static "); }
					if access.is_final { text.push_str("final "); }
					if access.is_abstract && !access.is_interface { text.push_str("abstract "); }
					if access.is_interface { text.push_str("interface "); }

					let mut comment = String::new();
					if entry.inner_name_index != 0 {
						text.push_str(&format!("#{}= ", entry.inner_name_index));
						let name = self.pd.utf8(entry.inner_name_index);
						comment.push_str(&format!("{name}="));
					}
					text.push_str(&format!("#{}", entry.inner_class_info_index));
					let inner = self.pd.class_name(entry.inner_class_info_index);
					comment.push_str(&format!("class {inner}"));
					if entry.outer_class_info_index != 0 {
						text.push_str(&format!(" of #{}", entry.outer_class_info_index));
						let outer = self.pd.class_name(entry.outer_class_info_index);
						comment.push_str(&format!(" of class {outer}"));
					}
					text.push(';');
					self.w.line_with_comment(&text, &comment);
				}
				self.w.dedent();
			},
			Attribute::EnclosingMethod { class_index, method_index } => {
				let mut comment = self.pd.class_name(*class_index);
				if *method_index != 0 {
					let method = self.pd.name_and_type(*method_index);
					comment.push_str(&format!(".{method}"));
				}
				self.w.line_with_comment(&format!("EnclosingMethod: #{class_index}.#{method_index}"), &comment);
			},
			Attribute::Synthetic => self.w.line("Synthetic: true"),
			Attribute::Deprecated => self.w.line("Deprecated: true"),
			Attribute::Signature { signature_index } => {
				let text = self.pd.utf8_raw(*signature_index);
				self.w.line_with_comment(&format!("Signature: #{signature_index}"), &text.to_string());
			},
			Attribute::SourceFile { sourcefile_index } => {
				let name = self.pd.utf8_raw(*sourcefile_index);
				self.w.line(&format!("SourceFile: \"{name}\""));
			},
			Attribute::SourceDebugExtension { debug_extension } => {
				self.w.line("SourceDebugExtension:");
				self.w.indent();
				let text = debug_extension.to_string();
				for line in text.lines() {
					self.w.line(line);
				}
				self.w.dedent();
			},
			Attribute::LineNumberTable { line_number_table } => {
				self.w.line("LineNumberTable:");
				self.w.indent();
				for row in line_number_table {
					self.w.line(&format!("line {}: {}", row.line_number, row.start_pc));
				}
				self.w.dedent();
			},
			Attribute::LocalVariableTable { local_variable_table } =>
				self.local_variable_table("LocalVariableTable:", local_variable_table),
			Attribute::LocalVariableTypeTable { local_variable_type_table } =>
				self.local_variable_table("LocalVariableTypeTable:", local_variable_type_table),
			Attribute::RuntimeVisibleAnnotations { annotations } =>
				self.annotations_block("RuntimeVisibleAnnotations:", annotations),
			Attribute::RuntimeInvisibleAnnotations { annotations } =>
				self.annotations_block("RuntimeInvisibleAnnotations:", annotations),
			Attribute::RuntimeVisibleParameterAnnotations { parameter_annotations } =>
				self.parameter_annotations_block("RuntimeVisibleParameterAnnotations:", parameter_annotations),
			Attribute::RuntimeInvisibleParameterAnnotations { parameter_annotations } =>
				self.parameter_annotations_block("RuntimeInvisibleParameterAnnotations:", parameter_annotations),
			Attribute::RuntimeVisibleTypeAnnotations { annotations } =>
				self.type_annotations_block("RuntimeVisibleTypeAnnotations:", annotations),
			Attribute::RuntimeInvisibleTypeAnnotations { annotations } =>
				self.type_annotations_block("RuntimeInvisibleTypeAnnotations:", annotations),
			Attribute::AnnotationDefault { default_value } => {
				self.w.line("AnnotationDefault:");
				self.w.indent();
				let raw = self.element_value_raw(default_value);
				let java = self.element_value_java(default_value);
				self.w.line_with_comment(&format!("default_value: {raw}"), &java);
				self.w.dedent();
			},
			Attribute::BootstrapMethods { bootstrap_methods } => {
				self.w.line("BootstrapMethods:");
				self.w.indent();
				for (i, bootstrap_method) in bootstrap_methods.iter().enumerate() {
					let handle = self.pd.method_handle(bootstrap_method.bootstrap_method_ref);
					self.w.line(&format!("{i}: #{} {handle}", bootstrap_method.bootstrap_method_ref));
					if !bootstrap_method.bootstrap_arguments.is_empty() {
						self.w.indent();
						self.w.line("Method arguments:");
						self.w.indent();
						for &argument in &bootstrap_method.bootstrap_arguments {
							let value = self.pd.constant(argument);
							self.w.line(&format!("#{argument} {value}"));
						}
						self.w.dedent();
						self.w.dedent();
					}
				}
				self.w.dedent();
			},
			Attribute::MethodParameters { parameters } => {
				self.w.line("MethodParameters:");
				self.w.indent();
				self.w.line(&format!("{:<30} {}", "Name", "Flags"));
				for parameter in parameters {
					let name = if parameter.name_index == 0 {
						"<no name>".to_owned()
					} else {
						self.pd.utf8(parameter.name_index)
					};
					let access = parameter.access();
					let mut words = Vec::new();
					if access.is_final { words.push("final"); }
					if access.is_synthetic { words.push("synthetic"); }
					if access.is_mandated { words.push("mandated"); }
					self.w.line(&format!("{name:<30} {}", words.join(" ")));
				}
				self.w.dedent();
			},
			Attribute::Module(module) => self.module_block(module),
			Attribute::ModulePackages { package_index_table } => {
				self.w.line("ModulePackages:");
				self.w.indent();
				for &index in package_index_table {
					let name = self.pd.package_name(index);
					self.w.line_with_comment(&format!("#{index}"), &name);
				}
				self.w.dedent();
			},
			Attribute::ModuleMainClass { main_class_index } => {
				let name = self.pd.class_name(*main_class_index);
				self.w.line_with_comment(&format!("ModuleMainClass: #{main_class_index}"), &name);
			},
			Attribute::ModuleHashes { algorithm_index, hashes } => {
				self.w.line("ModuleHashes:");
				self.w.indent();
				let algorithm = self.pd.utf8(*algorithm_index);
				self.w.line(&format!("algorithm: {algorithm}"));
				for hash in hashes {
					let name = self.pd.module_name(hash.module_name_index);
					let hex: String = hash.hash.iter().map(|b| format!("{b:02x}")).collect();
					self.w.line(&format!("{name}: {hex}"));
				}
				self.w.dedent();
			},
			Attribute::ModuleResolution { resolution_flags } => {
				self.w.line(&format!("ModuleResolution: {}", flag_list(*resolution_flags, RESOLUTION_FLAG_NAMES)));
			},
			Attribute::ModuleTarget { target_platform_index } => {
				let platform = self.pd.utf8(*target_platform_index);
				self.w.line(&format!("ModuleTarget: {platform}"));
			},
			Attribute::NestHost { host_class_index } => {
				let name = self.pd.class_name(*host_class_index);
				self.w.line_with_comment(&format!("NestHost: #{host_class_index}"), &format!("class {name}"));
			},
			Attribute::NestMembers { classes } => self.class_list_block("NestMembers:", classes),
			Attribute::PermittedSubclasses { classes } => self.class_list_block("PermittedSubclasses:", classes),
			Attribute::Record { components } => {
				self.w.line("Record:");
				self.w.indent();
				for component in components {
					let component_type = java_descriptor(&self.pd.utf8_raw(component.descriptor_index));
					let name = self.pd.utf8(component.name_index);
					self.w.line(&format!("{component_type} {name};"));
					self.w.indent();
					let descriptor = self.pd.utf8_raw(component.descriptor_index);
					self.w.line(&format!("descriptor: {descriptor}"));
					for attribute in &component.attributes {
						self.attribute(attribute);
					}
					self.w.dedent();
				}
				self.w.dedent();
			},
			Attribute::Unknown { name, data, reason } => self.unknown_attribute(name, data, reason),
		}
	}

	fn class_list_block(&mut self, title: &str, classes: &[u16]) {
		self.w.line(title);
		self.w.indent();
		for &index in classes {
			let name = self.pd.class_name(index);
			self.w.line_with_comment(&format!("#{index}"), &format!("class {name}"));
		}
		self.w.dedent();
	}

	fn module_block(&mut self, module: &Module) {
		self.w.line("Module:");
		self.w.indent();

		let name = self.pd.module_name(module.module_name_index);
		self.w.line(&format!("name: {name}"));
		self.w.line(&format!("flags: {}", flag_list(module.module_flags, MODULE_FLAG_NAMES)));
		if module.module_version_index != 0 {
			let version = self.pd.utf8(module.module_version_index);
			self.w.line(&format!("version: {version}"));
		}

		if !module.requires.is_empty() {
			self.w.line("requires:");
			self.w.indent();
			for requires in &module.requires {
				let mut text = self.pd.module_name(requires.requires_index);
				let requires_flags = requires.flags();
				if requires_flags.is_transitive { text.push_str(" transitive"); }
				if requires_flags.is_static_phase { text.push_str(" static"); }
				if requires.requires_version_index != 0 {
					let version = self.pd.utf8(requires.requires_version_index);
					self.w.line_with_comment(&text, &format!("version {version}"));
				} else {
					self.w.line(&text);
				}
			}
			self.w.dedent();
		}

		if !module.exports.is_empty() {
			self.w.line("exports:");
			self.w.indent();
			for exports in &module.exports {
				let mut text = self.pd.package_name(exports.exports_index);
				if !exports.exports_to_index.is_empty() {
					let mut to = Vec::new();
					for &index in &exports.exports_to_index {
						to.push(self.pd.module_name(index));
					}
					text.push_str(&format!(" to {}", to.join(", ")));
				}
				self.w.line(&text);
			}
			self.w.dedent();
		}

		if !module.opens.is_empty() {
			self.w.line("opens:");
			self.w.indent();
			for opens in &module.opens {
				let mut text = self.pd.package_name(opens.opens_index);
				if !opens.opens_to_index.is_empty() {
					let mut to = Vec::new();
					for &index in &opens.opens_to_index {
						to.push(self.pd.module_name(index));
					}
					text.push_str(&format!(" to {}", to.join(", ")));
				}
				self.w.line(&text);
			}
			self.w.dedent();
		}

		if !module.uses.is_empty() {
			self.w.line("uses:");
			self.w.indent();
			for &index in &module.uses {
				let name = self.pd.class_name(index);
				self.w.line(&name);
			}
			self.w.dedent();
		}

		if !module.provides.is_empty() {
			self.w.line("provides:");
			self.w.indent();
			for provides in &module.provides {
				let mut text = self.pd.class_name(provides.provides_index);
				let mut with = Vec::new();
				for &index in &provides.provides_with_index {
					with.push(self.pd.class_name(index));
				}
				if !with.is_empty() {
					text.push_str(&format!(" with {}", with.join(", ")));
				}
				self.w.line(&text);
			}
			self.w.dedent();
		}

		self.w.dedent();
	}

	fn unknown_attribute(&mut self, name: &JavaString, data: &[u8], reason: &Option<String>) {
		let suffix = if reason.is_some() { "undecodable attribute" } else { "unknown attribute" };
		self.w.line(&format!("{}: length = {:#x} ({suffix})", crate::pool_display::escape_name(name), data.len()));
		self.w.indent();
		for chunk in data.chunks(16) {
			let hex: Vec<String> = chunk.iter().map(|byte| format!("{byte:02x}")).collect();
			self.w.line(&hex.join(" "));
		}
		if let Some(reason) = reason {
			self.w.line(&format!("(failed to decode: {reason})"));
		}
		self.w.dedent();
	}

	fn annotations_block(&mut self, title: &str, annotations: &[Annotation]) {
		self.w.line(title);
		self.w.indent();
		for (i, annotation) in annotations.iter().enumerate() {
			let raw = self.annotation_raw(annotation);
			self.w.line(&format!("{i}: {raw}"));
			self.w.indent();
			let java = self.annotation_java(annotation);
			self.w.line(&java);
			self.w.dedent();
		}
		self.w.dedent();
	}

	fn parameter_annotations_block(&mut self, title: &str, parameter_annotations: &[Vec<Annotation>]) {
		self.w.line(title);
		self.w.indent();
		for (parameter, annotations) in parameter_annotations.iter().enumerate() {
			self.w.line(&format!("parameter {parameter}:"));
			self.w.indent();
			for (i, annotation) in annotations.iter().enumerate() {
				let raw = self.annotation_raw(annotation);
				self.w.line(&format!("{i}: {raw}"));
				self.w.indent();
				let java = self.annotation_java(annotation);
				self.w.line(&java);
				self.w.dedent();
			}
			self.w.dedent();
		}
		self.w.dedent();
	}

	fn type_annotations_block(&mut self, title: &str, annotations: &[TypeAnnotation]) {
		self.w.line(title);
		self.w.indent();
		for (i, annotation) in annotations.iter().enumerate() {
			let raw = self.annotation_raw(&annotation.annotation);
			let target = target_description(annotation);
			self.w.line(&format!("{i}: {raw}: {target}"));
			self.w.indent();
			let java = self.annotation_java(&annotation.annotation);
			self.w.line(&java);
			self.w.dedent();
		}
		self.w.dedent();
	}

	/// The stored form: pool indices as written, `#15(#16=I#17)`.
	fn annotation_raw(&mut self, annotation: &Annotation) -> String {
		let mut out = format!("#{}(", annotation.type_index);
		for (i, pair) in annotation.element_value_pairs.iter().enumerate() {
			if i > 0 {
				out.push(',');
			}
			let value = self.element_value_raw(&pair.value);
			out.push_str(&format!("#{}={value}", pair.element_name_index));
		}
		out.push(')');
		out
	}

	fn element_value_raw(&mut self, value: &ElementValue) -> String {
		match value {
			ElementValue::Const { tag, const_value_index } =>
				format!("{}#{const_value_index}", *tag as char),
			ElementValue::Enum { type_name_index, const_name_index } =>
				format!("e#{type_name_index}.#{const_name_index}"),
			ElementValue::Class { class_info_index } => format!("c#{class_info_index}"),
			ElementValue::Annotation(annotation) => {
				let raw = self.annotation_raw(annotation);
				format!("@{raw}")
			},
			ElementValue::Array(values) => {
				let mut parts = Vec::new();
				for value in values {
					parts.push(self.element_value_raw(value));
				}
				format!("[{}]", parts.join(","))
			},
		}
	}

	/// The resolved, source-like form: `@com.Foo(x=1)`.
	fn annotation_java(&mut self, annotation: &Annotation) -> String {
		let annotation_type = java_descriptor(&self.pd.utf8_raw(annotation.type_index));
		if annotation.element_value_pairs.is_empty() {
			return format!("@{annotation_type}");
		}
		let mut pairs = Vec::new();
		for pair in &annotation.element_value_pairs {
			let name = self.pd.utf8(pair.element_name_index);
			let value = self.element_value_java(&pair.value);
			pairs.push(format!("{name}={value}"));
		}
		format!("@{annotation_type}({})", pairs.join(", "))
	}

	fn element_value_java(&mut self, value: &ElementValue) -> String {
		match value {
			ElementValue::Const { tag, const_value_index } =>
				self.pd.element_const(*tag, *const_value_index),
			ElementValue::Enum { type_name_index, const_name_index } => {
				let enum_type = java_descriptor(&self.pd.utf8_raw(*type_name_index));
				let constant = self.pd.utf8(*const_name_index);
				format!("{enum_type}.{constant}")
			},
			ElementValue::Class { class_info_index } => {
				let raw = self.pd.utf8_raw(*class_info_index);
				if raw == "V" {
					"void.class".to_owned()
				} else {
					format!("{}.class", java_descriptor(&raw))
				}
			},
			ElementValue::Annotation(annotation) => self.annotation_java(annotation),
			ElementValue::Array(values) => {
				let mut parts = Vec::new();
				for value in values {
					parts.push(self.element_value_java(value));
				}
				format!("[{}]", parts.join(", "))
			},
		}
	}
}

fn find_signature(attributes: &[Attribute]) -> Option<u16> {
	attributes.iter().find_map(|attribute| match attribute {
		Attribute::Signature { signature_index } => Some(*signature_index),
		_ => None,
	})
}

fn find_exceptions(attributes: &[Attribute]) -> Option<&[u16]> {
	attributes.iter().find_map(|attribute| match attribute {
		Attribute::Exceptions { exception_index_table } => Some(exception_index_table.as_slice()),
		_ => None,
	})
}

fn is_plain_object(class_type: &ClassType) -> bool {
	class_type.name == "java/lang/Object"
		&& class_type.type_arguments.is_empty()
		&& class_type.nested.is_empty()
}

/// `(0xNNNN) ACC_A, ACC_B` for the bits that are set.
fn flag_list(value: u16, names: &[(u16, &'static str)]) -> String {
	let words: Vec<&str> = names.iter()
		.filter(|&&(bit, _)| value & bit != 0)
		.map(|&(_, name)| name)
		.collect();
	if words.is_empty() {
		format!("(0x{value:04x})")
	} else {
		format!("(0x{value:04x}) {}", words.join(", "))
	}
}

const CLASS_FLAG_NAMES: &[(u16, &'static str)] = &[
	(flags::ACC_PUBLIC, "ACC_PUBLIC"),
	(flags::ACC_FINAL, "ACC_FINAL"),
	(flags::ACC_SUPER, "ACC_SUPER"),
	(flags::ACC_INTERFACE, "ACC_INTERFACE"),
	(flags::ACC_ABSTRACT, "ACC_ABSTRACT"),
	(flags::ACC_SYNTHETIC, "ACC_SYNTHETIC"),
	(flags::ACC_ANNOTATION, "ACC_ANNOTATION"),
	(flags::ACC_ENUM, "ACC_ENUM"),
	(flags::ACC_MODULE, "ACC_MODULE"),
];

const FIELD_FLAG_NAMES: &[(u16, &'static str)] = &[
	(flags::ACC_PUBLIC, "ACC_PUBLIC"),
	(flags::ACC_PRIVATE, "ACC_PRIVATE"),
	(flags::ACC_PROTECTED, "ACC_PROTECTED"),
	(flags::ACC_STATIC, "ACC_STATIC"),
	(flags::ACC_FINAL, "ACC_FINAL"),
	(flags::ACC_VOLATILE, "ACC_VOLATILE"),
	(flags::ACC_TRANSIENT, "ACC_TRANSIENT"),
	(flags::ACC_SYNTHETIC, "ACC_SYNTHETIC"),
	(flags::ACC_ENUM, "ACC_ENUM"),
];

const METHOD_FLAG_NAMES: &[(u16, &'static str)] = &[
	(flags::ACC_PUBLIC, "ACC_PUBLIC"),
	(flags::ACC_PRIVATE, "ACC_PRIVATE"),
	(flags::ACC_PROTECTED, "ACC_PROTECTED"),
	(flags::ACC_STATIC, "ACC_STATIC"),
	(flags::ACC_FINAL, "ACC_FINAL"),
	(flags::ACC_SYNCHRONIZED, "ACC_SYNCHRONIZED"),
	(flags::ACC_BRIDGE, "ACC_BRIDGE"),
	(flags::ACC_VARARGS, "ACC_VARARGS"),
	(flags::ACC_NATIVE, "ACC_NATIVE"),
	(flags::ACC_ABSTRACT, "ACC_ABSTRACT"),
	(flags::ACC_STRICT, "ACC_STRICT"),
	(flags::ACC_SYNTHETIC, "ACC_SYNTHETIC"),
];

const MODULE_FLAG_NAMES: &[(u16, &'static str)] = &[
	(flags::ACC_OPEN, "ACC_OPEN"),
	(flags::ACC_SYNTHETIC, "ACC_SYNTHETIC"),
	(flags::ACC_MANDATED, "ACC_MANDATED"),
];

const RESOLUTION_FLAG_NAMES: &[(u16, &'static str)] = &[
	(0x0001, "DO_NOT_RESOLVE_BY_DEFAULT"),
	(0x0002, "WARN_DEPRECATED"),
	(0x0004, "WARN_DEPRECATED_FOR_REMOVAL"),
	(0x0008, "WARN_INCUBATING"),
];

fn array_type_name(atype: u8) -> String {
	match atype {
		4 => "boolean".to_owned(),
		5 => "char".to_owned(),
		6 => "float".to_owned(),
		7 => "double".to_owned(),
		8 => "byte".to_owned(),
		9 => "short".to_owned(),
		10 => "int".to_owned(),
		11 => "long".to_owned(),
		atype => format!("type {atype}"),
	}
}

fn frame_kind_name(record: &FrameRecord) -> &'static str {
	match record {
		FrameRecord::Same { .. } => "same",
		FrameRecord::SameLocals1StackItem { .. } => "same_locals_1_stack_item",
		FrameRecord::SameLocals1StackItemExtended { .. } => "same_locals_1_stack_item_extended",
		FrameRecord::Chop { .. } => "chop",
		FrameRecord::SameExtended { .. } => "same_extended",
		FrameRecord::Append { .. } => "append",
		FrameRecord::Full { .. } => "full",
	}
}

fn target_description(annotation: &TypeAnnotation) -> String {
	let name = target_type_name(annotation.target_type);
	let suffix = match &annotation.target_info {
		TargetInfo::TypeParameter { type_parameter_index } =>
			format!(", param_index={type_parameter_index}"),
		TargetInfo::Supertype { supertype_index } =>
			format!(", supertype_index={supertype_index}"),
		TargetInfo::TypeParameterBound { type_parameter_index, bound_index } =>
			format!(", param_index={type_parameter_index}, bound_index={bound_index}"),
		TargetInfo::Empty => String::new(),
		TargetInfo::FormalParameter { formal_parameter_index } =>
			format!(", param_index={formal_parameter_index}"),
		TargetInfo::Throws { throws_type_index } =>
			format!(", throws_index={throws_type_index}"),
		TargetInfo::Localvar { table } => {
			let entries: Vec<String> = table.iter()
				.map(|entry| format!("{{start_pc={}, length={}, index={}}}", entry.start_pc, entry.length, entry.index))
				.collect();
			format!(", [{}]", entries.join(", "))
		},
		TargetInfo::Catch { exception_table_index } =>
			format!(", exception_index={exception_table_index}"),
		TargetInfo::Offset { offset } => format!(", offset={offset}"),
		TargetInfo::TypeArgument { offset, type_argument_index } =>
			format!(", offset={offset}, type_index={type_argument_index}"),
	};
	if annotation.target_path.is_empty() {
		format!("{name}{suffix}")
	} else {
		let steps: Vec<String> = annotation.target_path.iter().map(path_step).collect();
		format!("{name}{suffix}, location=[{}]", steps.join(", "))
	}
}

fn path_step(segment: &TypePathSegment) -> String {
	match segment.type_path_kind {
		0 => "ARRAY".to_owned(),
		1 => "INNER_TYPE".to_owned(),
		2 => "WILDCARD".to_owned(),
		3 => format!("TYPE_ARGUMENT({})", segment.type_argument_index),
		kind => format!("PATH_{kind}"),
	}
}

fn target_type_name(target_type: u8) -> String {
	let name = match target_type {
		type_annotation::CLASS_TYPE_PARAMETER => "CLASS_TYPE_PARAMETER",
		type_annotation::METHOD_TYPE_PARAMETER => "METHOD_TYPE_PARAMETER",
		type_annotation::CLASS_EXTENDS => "CLASS_EXTENDS",
		type_annotation::CLASS_TYPE_PARAMETER_BOUND => "CLASS_TYPE_PARAMETER_BOUND",
		type_annotation::METHOD_TYPE_PARAMETER_BOUND => "METHOD_TYPE_PARAMETER_BOUND",
		type_annotation::FIELD => "FIELD",
		type_annotation::METHOD_RETURN => "METHOD_RETURN",
		type_annotation::METHOD_RECEIVER => "METHOD_RECEIVER",
		type_annotation::METHOD_FORMAL_PARAMETER => "METHOD_FORMAL_PARAMETER",
		type_annotation::THROWS => "THROWS",
		type_annotation::LOCAL_VARIABLE => "LOCAL_VARIABLE",
		type_annotation::RESOURCE_VARIABLE => "RESOURCE_VARIABLE",
		type_annotation::EXCEPTION_PARAMETER => "EXCEPTION_PARAMETER",
		type_annotation::INSTANCE_OF => "INSTANCE_OF",
		type_annotation::NEW => "NEW",
		type_annotation::CONSTRUCTOR_REFERENCE => "CONSTRUCTOR_REFERENCE",
		type_annotation::METHOD_REFERENCE => "METHOD_REFERENCE",
		type_annotation::CAST => "CAST",
		type_annotation::CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT => "CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT",
		type_annotation::METHOD_INVOCATION_TYPE_ARGUMENT => "METHOD_INVOCATION_TYPE_ARGUMENT",
		type_annotation::CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT => "CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT",
		type_annotation::METHOD_REFERENCE_TYPE_ARGUMENT => "METHOD_REFERENCE_TYPE_ARGUMENT",
		target_type => return format!("TARGET_{target_type:#04x}"),
	};
	name.to_owned()
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	#[test]
	fn flag_lists_name_the_set_bits() {
		assert_eq!(flag_list(0x0021, CLASS_FLAG_NAMES), "(0x0021) ACC_PUBLIC, ACC_SUPER");
		assert_eq!(flag_list(0x0000, CLASS_FLAG_NAMES), "(0x0000)");
		assert_eq!(flag_list(0x0019, FIELD_FLAG_NAMES), "(0x0019) ACC_PUBLIC, ACC_STATIC, ACC_FINAL");
	}

	#[test]
	fn newarray_operands_name_the_primitive() {
		assert_eq!(array_type_name(4), "boolean");
		assert_eq!(array_type_name(11), "long");
		assert_eq!(array_type_name(12), "type 12");
	}

	#[test]
	fn type_paths_spell_their_steps() {
		assert_eq!(path_step(&TypePathSegment { type_path_kind: 0, type_argument_index: 0 }), "ARRAY");
		assert_eq!(path_step(&TypePathSegment { type_path_kind: 2, type_argument_index: 0 }), "WILDCARD");
		assert_eq!(path_step(&TypePathSegment { type_path_kind: 3, type_argument_index: 1 }), "TYPE_ARGUMENT(1)");
	}

	#[test]
	fn target_types_have_names() {
		assert_eq!(target_type_name(0x43), "INSTANCE_OF");
		assert_eq!(target_type_name(0x10), "CLASS_EXTENDS");
		assert_eq!(target_type_name(0x7f), "TARGET_0x7f");
	}
}

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, warn};
use zip::ZipArchive;
use jdis::{AccessFilter, Details, RenderOptions};

fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_logger(cli.log_level.into())?;

	let options = cli.render_options();

	let mut failed = false;
	for input in &cli.inputs {
		if let Err(e) = process_input(input, &options) {
			error!("{}: {e:#}", input.display());
			failed = true;
		}
	}

	if failed {
		std::process::exit(1);
	}
	Ok(())
}

fn setup_logger(level: log::LevelFilter) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {message}", record.level(), record.target()))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.context("failed to initialize logging")
}

fn process_input(path: &Path, options: &RenderOptions) -> Result<()> {
	if path == Path::new("-") {
		let mut bytes = Vec::new();
		std::io::stdin().read_to_end(&mut bytes)
			.context("failed to read stdin")?;
		return print_class("<stdin>", &bytes, options);
	}

	let extension = path.extension().and_then(|extension| extension.to_str());
	if matches!(extension, Some("jar" | "zip")) {
		process_jar(path, options)
	} else {
		let bytes = std::fs::read(path)
			.with_context(|| anyhow!("failed to read {path:?}"))?;
		print_class(&path.display().to_string(), &bytes, options)
	}
}

/// Disassembles every `.class` entry; a header fault in one entry is logged and
/// the others still print.
fn process_jar(path: &Path, options: &RenderOptions) -> Result<()> {
	let file = File::open(path)
		.with_context(|| anyhow!("failed to open {path:?}"))?;
	let mut archive = ZipArchive::new(file)
		.with_context(|| anyhow!("failed to open {path:?} as zip"))?;

	let mut failed = false;
	for index in 0..archive.len() {
		let mut entry = archive.by_index(index)
			.with_context(|| anyhow!("failed to read entry {index} of {path:?}"))?;
		if entry.is_dir() || !entry.name().ends_with(".class") {
			continue;
		}
		let name = format!("{}!{}", path.display(), entry.name());

		let mut bytes = Vec::new();
		entry.read_to_end(&mut bytes)
			.with_context(|| anyhow!("failed to read {name}"))?;

		if let Err(e) = print_class(&name, &bytes, options) {
			error!("{e:#}");
			failed = true;
		}
	}

	if failed {
		bail!("not every class file could be decoded");
	}
	Ok(())
}

fn print_class(name: &str, bytes: &[u8], options: &RenderOptions) -> Result<()> {
	let rendered = jdis::disassemble_bytes(bytes, options)
		.with_context(|| anyhow!("failed to decode {name}"))?;

	for fault in &rendered.faults {
		warn!("{name}: {fault}");
	}

	print!("{}", rendered.text);
	Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "dukap", about = "Disassembles java class files", version)]
struct Cli {
	/// Disassemble the code of each method.
	#[arg(short = 'c')]
	disassemble: bool,

	/// Show line number and local variable tables.
	#[arg(short = 'l')]
	line_and_local_var_tables: bool,

	/// Show internal type descriptors under each member.
	#[arg(short = 's')]
	descriptors: bool,

	/// Verbose: version header, constant pool, and all attributes.
	#[arg(short = 'v', long = "verbose")]
	verbose: bool,

	/// Show all members, including private ones.
	#[arg(short = 'p', long = "private", group = "access")]
	private: bool,

	/// Show only public members.
	#[arg(long = "public", group = "access")]
	public: bool,

	/// Show protected and public members.
	#[arg(long = "protected", group = "access")]
	protected: bool,

	/// Show package-private members and up. This is the default.
	#[arg(long = "package", group = "access")]
	package: bool,

	/// Interleave these note kinds with the instruction listing.
	#[arg(long = "notes", value_enum, value_delimiter = ',')]
	notes: Vec<NoteKind>,

	/// Indent width of the output, in spaces.
	#[arg(long = "indent", default_value_t = 2)]
	indent: usize,

	/// Column where `// comments` start.
	#[arg(long = "comment-column", default_value_t = 40)]
	comment_column: usize,

	/// Keep the `Owner.` prefix on member refs into the file's own class.
	#[arg(long = "no-simplify")]
	no_simplify: bool,

	#[arg(long = "log-level", value_enum, default_value_t)]
	log_level: LogLevel,

	/// Class files, jars, or `-` for stdin.
	#[arg(required = true)]
	inputs: Vec<PathBuf>,
}

impl Cli {
	fn render_options(&self) -> RenderOptions {
		let access_filter = if self.private {
			AccessFilter::Private
		} else if self.public {
			AccessFilter::Public
		} else if self.protected {
			AccessFilter::Protected
		} else {
			AccessFilter::Package
		};

		let mut details = Details::default();
		for note in &self.notes {
			note.enable(&mut details);
		}

		RenderOptions {
			show_all_attributes: self.verbose,
			show_descriptors: self.descriptors,
			show_line_and_local_var_tables: self.line_and_local_var_tables,
			show_disassembly: self.disassemble,
			show_constant_pool: self.verbose,
			access_filter,
			details,
			simplify_same_class_refs: !self.no_simplify,
			indent_width: self.indent,
			comment_column: self.comment_column,
		}
	}
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NoteKind {
	/// `line <n>` notes from the line number table.
	Lines,
	/// `start local` / `end local` notes.
	Locals,
	/// The generic flavor, from the local variable type table.
	LocalTypes,
	/// Reconstructed `StackMap locals:` / `StackMap stack:` notes.
	StackMaps,
	/// `try[i]` / `catch[i]` notes from the exception table.
	TryBlocks,
	/// `@Type: target` notes for offset-targeted type annotations.
	TypeAnnotations,
	/// All of the above.
	All,
}

impl NoteKind {
	fn enable(self, details: &mut Details) {
		match self {
			NoteKind::Lines => details.source = true,
			NoteKind::Locals => details.local_vars = true,
			NoteKind::LocalTypes => details.local_var_types = true,
			NoteKind::StackMaps => details.stack_maps = true,
			NoteKind::TryBlocks => details.try_blocks = true,
			NoteKind::TypeAnnotations => details.type_annotations = true,
			NoteKind::All => *details = Details::all(),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogLevel {
	Off,
	Error,
	#[default]
	Warn,
	Info,
	Debug,
	Trace,
}

impl From<LogLevel> for log::LevelFilter {
	fn from(level: LogLevel) -> log::LevelFilter {
		match level {
			LogLevel::Off => log::LevelFilter::Off,
			LogLevel::Error => log::LevelFilter::Error,
			LogLevel::Warn => log::LevelFilter::Warn,
			LogLevel::Info => log::LevelFilter::Info,
			LogLevel::Debug => log::LevelFilter::Debug,
			LogLevel::Trace => log::LevelFilter::Trace,
		}
	}
}

// clap parses the default back through the value parser, so this has to
// print the possible-value spelling
impl Display for LogLevel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			LogLevel::Off => "off",
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		};
		f.write_str(name)
	}
}

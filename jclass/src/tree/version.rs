/// Represents a class file version, the `major_version` and `minor_version` pair
/// from the start of a class file.
///
/// Take a look at [the list of class file versions](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.1-200-B.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
	pub major: u16,
	pub minor: u16,
}

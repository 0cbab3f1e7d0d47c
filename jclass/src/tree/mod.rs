//! The decoded form of a class file.
//!
//! Everything in here stays close to the stored format: names, descriptors and
//! cross references are kept as constant pool indices, and access flag words are
//! kept raw next to their parsed views.

pub mod version;
pub mod class;
pub mod field;
pub mod method;
pub mod attribute;
pub mod annotation;
pub mod module;
pub mod descriptor;

//! XML output for [`XmlEntity`](valtree::xml::XmlEntity) trees.

mod writer;

pub use writer::XmlWriter;

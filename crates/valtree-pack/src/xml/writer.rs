//! Tab-indented XML documents.
//!
//! Every child element starts on its own line, indented one tab deeper than
//! its parent. An element's closing tag returns to the parent's indentation
//! unless the element carries a value, in which case it closes on the same
//! line. Elements with an empty tag are spliced into their parent.
//!
//! Element, prefix, namespace and attribute names are checked before anything
//! is written; a name that is not an XML name fails the whole document.

use std::io::{self, Write};

use valtree::xml::{XmlEntity, XmlValue};

use crate::config::{Charset, CodecConfig};
use crate::error::MappingError;
use crate::stream::ScopedStream;

const CDATA_END: &str = "]]>";

#[derive(Debug, Clone, Default)]
pub struct XmlWriter {
    pub charset: Charset,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            charset: config.charset,
        }
    }

    /// Renders `entity` as a complete document, declaration included.
    pub fn write(&self, entity: &XmlEntity) -> Result<String, MappingError> {
        let mut out = Vec::new();
        self.write_to(entity, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Like [`XmlWriter::write`], encoded with the configured charset.
    pub fn write_bytes(&self, entity: &XmlEntity) -> Result<Vec<u8>, MappingError> {
        Ok(self.charset.encode(self.write(entity)?))
    }

    /// Streams the document into `out`. The sink is flushed on every exit
    /// path.
    pub fn write_to<W: Write>(&self, entity: &XmlEntity, out: W) -> Result<(), MappingError> {
        tracing::trace!(tag = %entity.tag, "writing xml document");
        check_names(entity)?;
        let mut stream = ScopedStream::new("xml", out);
        self.write_document(&mut stream, entity)?;
        Ok(())
    }

    /// Renders `entity` without the XML declaration.
    pub fn write_document_body(&self, entity: &XmlEntity) -> Result<String, MappingError> {
        check_names(entity)?;
        let mut out = Vec::new();
        {
            let mut stream = ScopedStream::new("xml", &mut out);
            self.write_root(&mut stream, entity)?;
        }
        Ok(String::from_utf8(out)?)
    }

    fn write_document(&self, out: &mut impl Write, entity: &XmlEntity) -> io::Result<()> {
        write!(out, "<?xml version=\"1.0\" encoding=\"{}\"?>\n\n", self.charset.name())?;
        self.write_root(out, entity)
    }

    fn write_root(&self, out: &mut impl Write, entity: &XmlEntity) -> io::Result<()> {
        if !entity.is_fragment() {
            return self.write_element(out, entity, 0);
        }
        for (index, child) in spliced(&entity.children).into_iter().enumerate() {
            if index > 0 {
                out.write_all(b"\n")?;
            }
            self.write_element(out, child, 0)?;
        }
        Ok(())
    }

    fn write_element(&self, out: &mut impl Write, entity: &XmlEntity, depth: usize) -> io::Result<()> {
        let name = qualified_name(entity);
        write!(out, "<{name}")?;
        for (prefix, uri) in &entity.namespaces {
            if prefix.is_empty() {
                write!(out, " xmlns=\"{}\"", escape(uri, true))?;
            } else {
                write!(out, " xmlns:{prefix}=\"{}\"", escape(uri, true))?;
            }
        }
        for (attribute, value) in &entity.attributes {
            write!(out, " {attribute}=\"{}\"", escape(value, true))?;
        }
        out.write_all(b">")?;

        for child in spliced(&entity.children) {
            out.write_all(b"\n")?;
            write_tabs(out, depth + 1)?;
            self.write_element(out, child, depth + 1)?;
        }

        match &entity.value {
            Some(XmlValue::Text(text)) => out.write_all(escape(text, false).as_bytes())?,
            Some(XmlValue::CData(document)) => {
                let mut nested = Vec::new();
                self.write_document(&mut nested, document)?;
                write_cdata(out, &String::from_utf8_lossy(&nested))?;
            }
            None => {}
        }

        if !entity.has_value() {
            out.write_all(b"\n")?;
            write_tabs(out, depth)?;
        }
        write!(out, "</{name}>")
    }
}

/// Rejects the first element, prefix or attribute name in the tree that is
/// not an XML name. Fragments carry no name of their own.
fn check_names(entity: &XmlEntity) -> Result<(), MappingError> {
    if !entity.is_fragment() {
        check_name(&entity.tag, true)?;
    }
    if let Some(prefix) = entity.prefix.as_deref().filter(|prefix| !prefix.is_empty()) {
        check_name(prefix, false)?;
    }
    for prefix in entity.namespaces.keys().filter(|prefix| !prefix.is_empty()) {
        check_name(prefix, false)?;
    }
    for attribute in entity.attributes.keys() {
        check_name(attribute, true)?;
    }
    if let Some(XmlValue::CData(document)) = &entity.value {
        check_names(document)?;
    }
    entity.children.iter().try_for_each(check_names)
}

/// `Name` production of XML 1.0, restricted to alphanumeric letters.
/// Colons are allowed past the first character only where `qualified` is set.
fn check_name(name: &str, qualified: bool) -> Result<(), MappingError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| {
            ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.') || (qualified && ch == ':')
        });
    if valid {
        Ok(())
    } else {
        Err(MappingError::InvalidXmlName(name.to_owned()))
    }
}

/// Children with fragment wrappers expanded in place and empty elements
/// dropped.
fn spliced(children: &[XmlEntity]) -> Vec<&XmlEntity> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        if child.is_empty() {
            continue;
        }
        if child.is_fragment() {
            out.extend(spliced(&child.children));
        } else {
            out.push(child);
        }
    }
    out
}

fn qualified_name(entity: &XmlEntity) -> String {
    match (&entity.prefix, &entity.namespace) {
        (Some(prefix), Some(namespace)) if !prefix.is_empty() && !namespace.is_empty() => {
            format!("{prefix}:{}", entity.tag)
        }
        _ => entity.tag.clone(),
    }
}

fn write_tabs(out: &mut impl Write, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        out.write_all(b"\t")?;
    }
    Ok(())
}

fn write_cdata(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(b"<![CDATA[")?;
    let mut sections = text.split(CDATA_END).peekable();
    while let Some(section) = sections.next() {
        out.write_all(section.as_bytes())?;
        if sections.peek().is_some() {
            out.write_all(b"]]]]><![CDATA[>")?;
        }
    }
    out.write_all(b"]]>")
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

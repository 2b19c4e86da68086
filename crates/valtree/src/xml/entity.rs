use indexmap::IndexMap;

/// Content of an element: plain character data or a nested document
/// rendered as CDATA.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Text(String),
    CData(Box<XmlEntity>),
}

/// One XML element.
///
/// An element with an empty tag is transparent: writers splice its children
/// into the parent's child sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlEntity {
    pub tag: String,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub namespaces: IndexMap<String, String>,
    pub children: Vec<XmlEntity>,
    pub value: Option<XmlValue>,
}

impl XmlEntity {
    pub fn builder() -> XmlEntityBuilder {
        XmlEntityBuilder::default()
    }

    /// A leaf element holding `text`.
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::builder().tag(tag).value(text).build()
    }

    /// A transparent element grouping `children`.
    pub fn fragment(children: impl IntoIterator<Item = XmlEntity>) -> Self {
        Self::builder().children(children).build()
    }

    pub fn is_fragment(&self) -> bool {
        self.tag.is_empty()
    }

    pub fn is_cdata(&self) -> bool {
        matches!(self.value, Some(XmlValue::CData(_)))
    }

    /// Character data of the element, if it holds plain text.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            Some(XmlValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Whether the element carries content that closes it on the same line.
    pub fn has_value(&self) -> bool {
        match &self.value {
            Some(XmlValue::Text(text)) => !text.is_empty(),
            Some(XmlValue::CData(_)) => true,
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_empty()
            && self.children.is_empty()
            && !self.has_value()
            && self.attributes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct XmlEntityBuilder {
    entity: XmlEntity,
}

impl XmlEntityBuilder {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.entity.tag = tag.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.entity.prefix = Some(prefix.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.entity.namespace = Some(namespace.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entity.attributes.insert(name.into(), value.into());
        self
    }

    pub fn namespace_declaration(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.entity.namespaces.insert(prefix.into(), uri.into());
        self
    }

    pub fn child(mut self, child: XmlEntity) -> Self {
        self.entity.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = XmlEntity>) -> Self {
        self.entity.children.extend(children);
        self
    }

    pub fn value(mut self, text: impl Into<String>) -> Self {
        self.entity.value = Some(XmlValue::Text(text.into()));
        self
    }

    pub fn cdata(mut self, document: XmlEntity) -> Self {
        self.entity.value = Some(XmlValue::CData(Box::new(document)));
        self
    }

    pub fn build(self) -> XmlEntity {
        self.entity
    }
}

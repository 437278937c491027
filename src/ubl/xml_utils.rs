use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;

use crate::core::EfacturaError;

fn xml_io(e: std::io::Error) -> EfacturaError {
    EfacturaError::Xml(format!("write error: {e}"))
}

/// Thin indenting wrapper over quick-xml for building the document tree.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, EfacturaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, EfacturaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| EfacturaError::Xml(format!("UTF-8 error: {e}")))
    }

    pub fn open(&mut self, name: &str) -> Result<(), EfacturaError> {
        self.open_with(name, &[])
    }

    pub fn open_with(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EfacturaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)
    }

    pub fn close(&mut self, name: &str) -> Result<(), EfacturaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)
    }

    pub fn leaf(&mut self, name: &str, text: &str) -> Result<(), EfacturaError> {
        self.leaf_with(name, text, &[])
    }

    pub fn leaf_with(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), EfacturaError> {
        self.open_with(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.close(name)
    }

    /// Monetary amount with a currencyID attribute, always 2 decimals.
    pub fn amount(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<(), EfacturaError> {
        self.leaf_with(name, &format_amount(amount), &[("currencyID", currency)])
    }

    /// Quantity with a unitCode attribute.
    pub fn quantity(
        &mut self,
        name: &str,
        qty: Decimal,
        unit: &str,
    ) -> Result<(), EfacturaError> {
        self.leaf_with(name, &format_number(qty), &[("unitCode", unit)])
    }
}

/// Format a monetary amount as a fixed 2-decimal string.
///
/// Amounts reaching serialization are already rounded; this pins the scale
/// so "1785" becomes "1785.00" and "-38.0" becomes "-38.00".
pub fn format_amount(value: Decimal) -> String {
    let mut v = value;
    v.rescale(2);
    v.to_string()
}

/// Format a non-monetary number (quantity, percent): at least 2 decimal
/// places, significant extra digits preserved.
pub fn format_number(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() < 2 {
        let mut v = normalized;
        v.rescale(2);
        v.to_string()
    } else {
        normalized.to_string()
    }
}

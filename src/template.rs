//! Request template rendering.
//!
//! The three request skeletons are build-time assets embedded from
//! `templates/`. Rendering substitutes `{{ key }}` placeholders and then
//! scans the result with quick-xml to confirm it is well-formed before it
//! ever reaches the wire.
//!
//! Values are substituted verbatim. Callers must supply values that are
//! already XML-safe; a value containing a bare `<` or `&` fails the
//! well-formedness scan, not the substitution.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// XML declaration prepended before the well-formedness scan.
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// The named request templates known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// WS-Security header fragment (username, password, nonce).
    SecurityHeader,
    /// Driving licence validity request (documentVerificatieSysteem).
    DrivingLicenceCheck,
    /// Vehicle scan request (opvragenVoertuigscanMSI).
    VehicleScan,
}

impl Template {
    /// Raw template text with `{{ key }}` placeholders.
    pub fn text(&self) -> &'static str {
        match self {
            Self::SecurityHeader => include_str!("../templates/security_header.xml"),
            Self::DrivingLicenceCheck => include_str!("../templates/driving_licence_check.xml"),
            Self::VehicleScan => include_str!("../templates/vehicle_scan.xml"),
        }
    }
}

/// Render a template by substituting every `{{ key }}` placeholder.
///
/// Every key in `variables` must appear verbatim as `{{ key }}` in the
/// template text; a missing placeholder is [`Error::Template`], never a
/// silent skip. The filled result is parsed to confirm well-formedness;
/// a parse failure is [`Error::MalformedRequestXml`].
pub fn render(template: Template, variables: &[(&str, &str)]) -> Result<String> {
    let mut rendered = template.text().to_string();

    for (key, value) in variables {
        let token = format!("{{{{ {} }}}}", key);
        if !rendered.contains(&token) {
            return Err(Error::Template {
                placeholder: (*key).to_string(),
            });
        }
        rendered = rendered.replace(&token, value);
    }

    assert_well_formed(&format!("{}{}", XML_DECLARATION, rendered))?;

    Ok(rendered)
}

/// Scan a document with quick-xml, rejecting anything that fails to parse.
fn assert_well_formed(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(Event::Text(text)) => {
                // Force entity resolution so a stray `&` is rejected.
                if let Err(e) = text.unescape() {
                    return Err(Error::MalformedRequestXml {
                        reason: e.to_string(),
                    });
                }
            }
            Ok(_) => {}
            Err(e) => {
                return Err(Error::MalformedRequestXml {
                    reason: e.to_string(),
                })
            }
        }
    }
}

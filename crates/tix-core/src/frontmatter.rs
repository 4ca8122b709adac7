//! Frontmatter codec for ticket files
//!
//! A ticket file is a YAML header between `---` delimiters followed by a
//! free-text body. Decoding never fails: anything that does not parse as a
//! header comes back as a raw passthrough with the original content as body.

use crate::Result;
use crate::ticket::Header;

/// Header delimiter.
pub const DELIMITER: &str = "---";

/// Result of decoding file content.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The header parsed; body is trimmed of surrounding whitespace.
    Parsed { header: Header, body: String },
    /// No parseable header; the original content is the body.
    Raw { body: String },
}

impl Decoded {
    /// Collapse into (header, body), with an empty header for raw content.
    pub fn into_parts(self) -> (Header, String) {
        match self {
            Decoded::Parsed { header, body } => (header, body),
            Decoded::Raw { body } => (Header::default(), body),
        }
    }
}

/// Split content into header and body.
///
/// Content must start with `---` and contain a second delimiter for the
/// header to be considered at all; a malformed YAML block falls back to raw.
pub fn decode(content: &str) -> Decoded {
    if !content.starts_with(DELIMITER) {
        return Decoded::Raw {
            body: content.to_string(),
        };
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return Decoded::Raw {
            body: content.to_string(),
        };
    }

    match parse_header(parts[1]) {
        Some(header) => Decoded::Parsed {
            header,
            body: parts[2].trim().to_string(),
        },
        None => Decoded::Raw {
            body: content.to_string(),
        },
    }
}

/// Parse the delimited block as a header mapping. An empty or null block is
/// the empty header; anything else unparseable is None.
fn parse_header(source: &str) -> Option<Header> {
    match serde_yaml::from_str::<serde_yaml::Value>(source) {
        Ok(serde_yaml::Value::Null) => Some(Header::default()),
        Ok(value @ serde_yaml::Value::Mapping(_)) => serde_yaml::from_value(value).ok(),
        _ => None,
    }
}

/// Serialize a header into a delimited frontmatter block.
///
/// The caller concatenates the body directly after the returned prefix. The
/// header must already carry `created_at` and `status` (see
/// [`Header::ensure_defaults`]).
pub fn encode(header: &Header) -> Result<String> {
    let yaml = serde_yaml::to_string(header)?;
    Ok(format!("{}\n{}{}\n", DELIMITER, yaml, DELIMITER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::Refs;

    #[test]
    fn test_decode_parses_header_and_trims_body() {
        let content = "---\ntitle: Add search\nstatus: Backlog\n---\n\nSome body text.\n";
        let (header, body) = decode(content).into_parts();
        assert_eq!(header.title.as_deref(), Some("Add search"));
        assert_eq!(header.status.as_deref(), Some("Backlog"));
        assert_eq!(body, "Some body text.");
    }

    #[test]
    fn test_decode_without_delimiter_is_raw() {
        let content = "just a note, no header";
        assert_eq!(
            decode(content),
            Decoded::Raw {
                body: content.to_string()
            }
        );
    }

    #[test]
    fn test_decode_unterminated_header_is_raw() {
        let content = "---\ntitle: dangling";
        assert_eq!(
            decode(content),
            Decoded::Raw {
                body: content.to_string()
            }
        );
    }

    #[test]
    fn test_decode_malformed_yaml_is_raw() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let decoded = decode(content);
        assert_eq!(
            decoded,
            Decoded::Raw {
                body: content.to_string()
            }
        );
    }

    #[test]
    fn test_decode_empty_header_is_empty_mapping() {
        let (header, body) = decode("---\n\n---\nbody").into_parts();
        assert_eq!(header, Header::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_decode_scalar_refs() {
        let content = "---\ntitle: t\nblocks: TICKET-002\n---\n";
        let (header, _) = decode(content).into_parts();
        assert_eq!(header.blocks, Some(Refs::One("TICKET-002".into())));
    }

    #[test]
    fn test_encode_round_trip() {
        let mut header = Header {
            title: Some("Fix flaky test".into()),
            ticket_type: Some("Bug".into()),
            blocks: Some(Refs::Many(vec!["TICKET-002".into()])),
            ..Default::default()
        };
        header.ensure_defaults();

        let content = format!("{}{}", encode(&header).unwrap(), "The body.");
        let (decoded, body) = decode(&content).into_parts();
        assert_eq!(decoded, header);
        assert_eq!(body, "The body.");
    }

    #[test]
    fn test_encode_preserves_unknown_keys() {
        let content = "---\ntitle: t\nsprint: Q3\nreviewer: sam\n---\nbody";
        let (mut header, body) = decode(content).into_parts();
        assert_eq!(header.extra.len(), 2);

        header.ensure_defaults();
        let encoded = format!("{}{}", encode(&header).unwrap(), body);
        let (again, _) = decode(&encoded).into_parts();
        assert_eq!(again.extra, header.extra);
        // Extension keys keep their insertion order.
        let keys: Vec<_> = again
            .extra
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["sprint", "reviewer"]);
    }
}

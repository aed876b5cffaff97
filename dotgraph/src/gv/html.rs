//! Structural validation of HTML-like strings (`label=<...>`).
//!
//! The content between the outermost angle brackets must be a well formed XML
//! fragment with a single root element. We don't interpret the markup, we
//! only make sure that it can be handed to a renderer as-is.

/// Checks that \p content is a single well formed XML element.
/// \returns a description of the first problem that was found.
#[cfg(feature = "xml")]
pub fn validate_html_string(content: &str) -> Result<(), String> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(content);
    let mut depth: usize = 0;
    let mut roots: usize = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Err("unbalanced closing tag".to_string());
                }
                depth -= 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !text.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err("text outside of the root element".to_string());
                }
            }
            Ok(Event::CData(_)) => {
                if depth == 0 {
                    return Err("CDATA outside of the root element".to_string());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(format!(
                    "{} (at markup offset {})",
                    err,
                    reader.buffer_position()
                ));
            }
        }
    }

    if depth != 0 {
        return Err("unclosed element".to_string());
    }
    match roots {
        1 => Ok(()),
        0 => Err("expected a root element".to_string()),
        _ => Err("expected a single root element".to_string()),
    }
}

/// Without an XML engine the markup is accepted as-is.
#[cfg(not(feature = "xml"))]
pub fn validate_html_string(_content: &str) -> Result<(), String> {
    Ok(())
}

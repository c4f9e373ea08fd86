use super::SvgError;
use super::document::{check_well_formed, syntax_error};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

/// Re-indents markup, one element per line, `indent` spaces per level.
pub fn format(source: &str, indent: usize) -> Result<String, SvgError> {
    check_well_formed(source)?;

    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => writer
                .write_event(event)
                .map_err(|err| SvgError::Write(err.to_string()))?,
            Err(err) => return Err(syntax_error(&reader, err)),
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|err| SvgError::Write(err.to_string()))
}

//! Extraction of the track outline from an SVG document.
//!
//! Track artwork is authored as an SVG file in which exactly one `<path>`
//! element carries the track id (`track` by default). Only that element's `d`
//! attribute matters here; everything else in the document is ignored.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};

/// Element id of the track outline in track SVG files.
pub const DEFAULT_TRACK_ELEMENT_ID: &str = "track";

/// Return the `d` attribute of the `<path>` element whose `id` is `element_id`.
///
/// Namespace prefixes are ignored, so `<svg:path>` matches as well.
///
/// # Errors
///
/// - [`GeometryError::SvgParse`] if the document is not well-formed
/// - [`GeometryError::TrackElementNotFound`] if no path has the id
/// - [`GeometryError::DuplicateTrackElement`] if several paths have it
/// - [`GeometryError::MissingPathData`] if the path has no or an empty `d`
///
/// # Example
///
/// ```
/// use openracing_track_geometry::find_path_data;
///
/// let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <path id="pitlane" d="M0 0 L1 1"/>
///     <path id="track" d="M0 0 L10 0 L10 10 Z"/>
/// </svg>"#;
/// assert_eq!(find_path_data(svg, "track")?, "M0 0 L10 0 L10 10 Z");
/// # Ok::<(), openracing_track_geometry::GeometryError>(())
/// ```
pub fn find_path_data(svg_document: &str, element_id: &str) -> GeometryResult<String> {
    let mut reader = Reader::from_str(svg_document);
    reader.config_mut().trim_text(true);

    let mut matches: Vec<Option<String>> = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| GeometryError::SvgParse(format!("{e} (near byte {position})")))?;

        match event {
            Event::Start(element) | Event::Empty(element) => {
                if element.local_name().as_ref() != b"path" {
                    continue;
                }
                let attributes = path_attributes(&element)?;
                if attributes.id.as_deref() == Some(element_id) {
                    matches.push(attributes.data);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match matches.len() {
        0 => Err(GeometryError::TrackElementNotFound {
            id: element_id.to_string(),
        }),
        1 => {
            let data = matches
                .into_iter()
                .next()
                .flatten()
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| GeometryError::MissingPathData {
                    id: element_id.to_string(),
                })?;
            debug!(id = element_id, bytes = data.len(), "Found track path data");
            Ok(data)
        }
        count => Err(GeometryError::DuplicateTrackElement {
            id: element_id.to_string(),
            count,
        }),
    }
}

#[derive(Default)]
struct PathAttributes {
    id: Option<String>,
    data: Option<String>,
}

fn path_attributes(element: &BytesStart<'_>) -> GeometryResult<PathAttributes> {
    let mut attributes = PathAttributes::default();

    for attr in element.attributes() {
        let attr = attr.map_err(|e| GeometryError::SvgParse(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| GeometryError::SvgParse(e.to_string()))?;

        match attr.key.local_name().as_ref() {
            b"id" => attributes.id = Some(value.trim().to_string()),
            b"d" => attributes.data = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(attributes)
}

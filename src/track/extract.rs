//! Lenient trkpt extraction from raw GPX text.
//!
//! GPX files in the wild are frequently truncated or hand-edited, so this
//! extractor does not validate the document against the GPX schema. It
//! streams over the markup and collects the `lat`/`lon` attributes of every
//! `trkpt` element, wherever it is nested.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::GeoPoint;

/// Extract every well-formed track point from `xml`, in document order.
///
/// Track points with a missing, non-numeric, non-finite, or out-of-range
/// `lat` or `lon` attribute are skipped without a per-point diagnostic.
/// An unrecoverable XML syntax error yields an empty sequence; callers
/// treat "empty" as "nothing usable was found" and cannot distinguish a
/// parse failure from a valid document without track points.
pub fn track_points(xml: &str) -> Vec<GeoPoint> {
    let mut reader = Reader::from_str(xml);
    // Mismatched end tags mark the document as unrecoverable rather than
    // silently closing the wrong element.
    reader.config_mut().check_end_names = true;
    let mut buf = Vec::new();
    let mut points = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"trkpt" =>
            {
                if let Some(point) = point_from_attributes(&e) {
                    points.push(point);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Vec::new(),
        }
        buf.clear();
    }

    points
}

fn point_from_attributes(element: &BytesStart<'_>) -> Option<GeoPoint> {
    let mut lat = None;
    let mut lon = None;

    for attr in element.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"lat" => lat = value.parse::<f64>().ok(),
            b"lon" => lon = value.parse::<f64>().ok(),
            _ => {}
        }
    }

    let point = GeoPoint::new(lat?, lon?);
    point.is_valid().then_some(point)
}

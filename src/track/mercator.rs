//! Web Mercator conversions and viewport-fitting camera math.

use geo::Point;

use super::{GeoPoint, TrackBounds};

/// Web Mercator bounds in meters (EPSG:3857)
pub const EARTH_MERCATOR_MAX: f64 = 20037508.34;
pub const EARTH_MERCATOR_MIN: f64 = -20037508.34;
pub const EARTH_SIZE_METERS: f64 = EARTH_MERCATOR_MAX - EARTH_MERCATOR_MIN;

/// Maximum latitude that can be represented in Web Mercator
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Slippy-map tile edge in pixels
const TILE_SIZE: f64 = 256.0;

/// Zoom range accepted by the map widget
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Zoom used when the fitted bounds have no extent (a single point)
const SINGLE_POINT_ZOOM: f64 = 16.0;

const LON_TO_X_FACTOR: f64 = EARTH_MERCATOR_MAX / 180.0;
const Y_FACTOR: f64 = EARTH_MERCATOR_MAX / std::f64::consts::PI;
const X_TO_LON_FACTOR: f64 = 180.0 / EARTH_MERCATOR_MAX;
const Y_TO_LAT_FACTOR: f64 = std::f64::consts::PI / EARTH_MERCATOR_MAX;

/// Convert WGS84 (lat, lon) to Web Mercator (x, y) in meters.
///
/// Latitude is clamped to the valid Web Mercator range.
#[inline(always)]
pub fn wgs84_to_mercator(lat: f64, lon: f64) -> Point<f64> {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = lon * LON_TO_X_FACTOR;
    let lat_rad = lat.to_radians();
    let y = (lat_rad.tan() + (1.0 / lat_rad.cos())).ln() * Y_FACTOR;

    Point::new(x, y)
}

/// Convert Web Mercator (x, y) in meters to WGS84 (lat, lon).
#[inline(always)]
pub fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = x * X_TO_LON_FACTOR;
    let lat =
        (std::f64::consts::PI / 2.0 - 2.0 * ((-y * Y_TO_LAT_FACTOR).exp()).atan()).to_degrees();
    (lat, lon)
}

/// Camera placement that frames a bounding rectangle inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    pub center: GeoPoint,
    pub zoom: f64,
}

/// Compute the camera that frames `bounds` inside a viewport of
/// `viewport_px` pixels, leaving at least `padding_px` pixels on every
/// side.
///
/// The center is the Web Mercator midpoint of the bounds; the zoom is the
/// largest level at which both mercator spans fit the padded viewport,
/// clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`]. Zero-area bounds fall back to a
/// fixed close-up zoom.
pub fn fit_viewport(bounds: &TrackBounds, viewport_px: (f64, f64), padding_px: f64) -> CameraFit {
    let min = wgs84_to_mercator(bounds.min_lat, bounds.min_lon);
    let max = wgs84_to_mercator(bounds.max_lat, bounds.max_lon);

    let (center_lat, center_lon) =
        mercator_to_wgs84((min.x() + max.x()) / 2.0, (min.y() + max.y()) / 2.0);
    let center = GeoPoint::new(center_lat, center_lon);

    let span_x = max.x() - min.x();
    let span_y = max.y() - min.y();

    let usable_w = (viewport_px.0 - 2.0 * padding_px).max(1.0);
    let usable_h = (viewport_px.1 - 2.0 * padding_px).max(1.0);

    let zoom_x = zoom_for_span(span_x, usable_w);
    let zoom_y = zoom_for_span(span_y, usable_h);
    let zoom = match (zoom_x, zoom_y) {
        (None, None) => SINGLE_POINT_ZOOM,
        (Some(z), None) | (None, Some(z)) => z,
        (Some(zx), Some(zy)) => zx.min(zy),
    };

    CameraFit {
        center,
        zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
    }
}

/// Largest zoom at which `span_meters` fits into `usable_px` pixels, or
/// `None` for a degenerate span.
fn zoom_for_span(span_meters: f64, usable_px: f64) -> Option<f64> {
    if span_meters <= 0.0 {
        return None;
    }
    // At zoom z the world is TILE_SIZE * 2^z pixels wide, so the span
    // occupies span / EARTH_SIZE of that width.
    Some((usable_px * EARTH_SIZE_METERS / (TILE_SIZE * span_meters)).log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f64, f64) = (1280.0, 720.0);
    const PADDING: f64 = 50.0;

    #[test]
    fn equator_meridian_crossing_projects_to_origin() {
        let point = wgs84_to_mercator(0.0, 0.0);
        assert!(point.x().abs() < 0.01);
        assert!(point.y().abs() < 0.01);
    }

    #[test]
    fn antimeridian_projects_to_the_mercator_edges() {
        let west = wgs84_to_mercator(0.0, -180.0);
        assert!((west.x() - EARTH_MERCATOR_MIN).abs() < 1.0);

        let east = wgs84_to_mercator(0.0, 180.0);
        assert!((east.x() - EARTH_MERCATOR_MAX).abs() < 1.0);
    }

    #[test]
    fn mercator_roundtrip_at_the_default_map_center() {
        // Madrid, the initial camera position.
        let lat = 40.416775;
        let lon = -3.703790;

        let mercator = wgs84_to_mercator(lat, lon);
        let (lat2, lon2) = mercator_to_wgs84(mercator.x(), mercator.y());

        assert!((lat - lat2).abs() < 0.0001);
        assert!((lon - lon2).abs() < 0.0001);
    }

    #[test]
    fn mercator_roundtrip_in_the_southern_hemisphere() {
        let lat = -33.4489;
        let lon = -70.6693;

        let mercator = wgs84_to_mercator(lat, lon);
        let (lat2, lon2) = mercator_to_wgs84(mercator.x(), mercator.y());

        assert!((lat - lat2).abs() < 0.0001);
        assert!((lon - lon2).abs() < 0.0001);
    }

    #[test]
    fn fit_of_single_point_centers_on_it() {
        let bounds = TrackBounds {
            min_lat: 40.4,
            min_lon: -3.7,
            max_lat: 40.4,
            max_lon: -3.7,
        };
        let fit = fit_viewport(&bounds, VIEWPORT, PADDING);

        assert!((fit.center.lat - 40.4).abs() < 0.0001);
        assert!((fit.center.lon + 3.7).abs() < 0.0001);
        assert_eq!(fit.zoom, SINGLE_POINT_ZOOM);
    }

    #[test]
    fn fit_zoom_decreases_as_bounds_grow() {
        let small = TrackBounds {
            min_lat: 40.40,
            min_lon: -3.71,
            max_lat: 40.45,
            max_lon: -3.65,
        };
        let large = TrackBounds {
            min_lat: 36.0,
            min_lon: -9.0,
            max_lat: 43.0,
            max_lon: 3.0,
        };

        let small_fit = fit_viewport(&small, VIEWPORT, PADDING);
        let large_fit = fit_viewport(&large, VIEWPORT, PADDING);
        assert!(small_fit.zoom > large_fit.zoom);
    }

    #[test]
    fn more_padding_never_zooms_in_further() {
        let bounds = TrackBounds {
            min_lat: 40.0,
            min_lon: -4.0,
            max_lat: 41.0,
            max_lon: -3.0,
        };

        let loose = fit_viewport(&bounds, VIEWPORT, 0.0);
        let tight = fit_viewport(&bounds, VIEWPORT, 200.0);
        assert!(tight.zoom <= loose.zoom);
    }

    #[test]
    fn fitted_span_actually_fits_the_padded_viewport() {
        let bounds = TrackBounds {
            min_lat: 40.0,
            min_lon: -4.0,
            max_lat: 41.0,
            max_lon: -3.0,
        };
        let fit = fit_viewport(&bounds, VIEWPORT, PADDING);

        let min = wgs84_to_mercator(bounds.min_lat, bounds.min_lon);
        let max = wgs84_to_mercator(bounds.max_lat, bounds.max_lon);
        let meters_per_pixel = EARTH_SIZE_METERS / (TILE_SIZE * fit.zoom.exp2());

        assert!((max.x() - min.x()) / meters_per_pixel <= VIEWPORT.0 - 2.0 * PADDING + 1e-6);
        assert!((max.y() - min.y()) / meters_per_pixel <= VIEWPORT.1 - 2.0 * PADDING + 1e-6);
    }

    #[test]
    fn degenerate_longitude_span_still_fits_latitude() {
        // A straight north-south track.
        let bounds = TrackBounds {
            min_lat: 40.0,
            min_lon: -3.7,
            max_lat: 41.0,
            max_lon: -3.7,
        };
        let fit = fit_viewport(&bounds, VIEWPORT, PADDING);

        assert!(fit.zoom >= MIN_ZOOM);
        assert!(fit.zoom < SINGLE_POINT_ZOOM);
    }

    #[test]
    fn world_spanning_bounds_clamp_to_min_zoom() {
        let bounds = TrackBounds {
            min_lat: -80.0,
            min_lon: -179.0,
            max_lat: 80.0,
            max_lon: 179.0,
        };
        // A viewport too small for the whole world at any zoom.
        let fit = fit_viewport(&bounds, (300.0, 200.0), PADDING);
        assert_eq!(fit.zoom, MIN_ZOOM);
    }
}

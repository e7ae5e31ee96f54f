//! Core track data: coordinate extraction, bounds, and projection math.
//!
//! Everything in this module is pure. File access and map rendering live in
//! the application layer; this layer only turns raw GPX text into ordered
//! coordinate sequences and derives the geometry the camera needs.

mod extract;
pub mod mercator;

pub use extract::track_points;

/// A single WGS84 coordinate.
///
/// Value-equal and immutable; `lat` is in degrees north, `lon` in degrees
/// east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
    }
}

/// An ordered sequence of track points, in source-document order.
///
/// Replaced wholesale on every successful file load; there is no merging
/// with a previously loaded track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<GeoPoint>,
}

impl Track {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimal axis-aligned lat/lon rectangle enclosing the track.
    pub fn bounds(&self) -> Option<TrackBounds> {
        TrackBounds::from_points(&self.points)
    }

    /// Total track length in meters (haversine over consecutive points).
    pub fn distance_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_meters(pair[0], pair[1]))
            .sum()
    }

    /// The track with every leg longer than `max_leg_meters` subdivided
    /// along its great circle, so a renderer drawing straight screen-space
    /// segments still follows the curvature of the Earth.
    ///
    /// Legs at or below the threshold pass through untouched.
    pub fn geodesic_path(&self, max_leg_meters: f64) -> Vec<GeoPoint> {
        if self.points.len() < 2 {
            return self.points.clone();
        }

        let mut path = Vec::with_capacity(self.points.len());
        path.push(self.points[0]);

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let leg = haversine_meters(a, b);
            if leg > max_leg_meters {
                // Cap the subdivision so a single antipodal leg cannot
                // explode the point count.
                let segments = ((leg / max_leg_meters).ceil() as usize).min(128);
                for k in 1..segments {
                    let fraction = k as f64 / segments as f64;
                    path.push(great_circle_intermediate(a, b, fraction));
                }
            }
            path.push(b);
        }

        path
    }
}

/// The smallest lat/lon rectangle containing a set of points.
///
/// Derived per load from the current track; a one-point track yields a
/// zero-area bounds equal to that point on all four sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl TrackBounds {
    /// Fold a point sequence into its bounding rectangle.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_lat = f64::INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut max_lon = f64::NEG_INFINITY;

        for point in points {
            min_lat = min_lat.min(point.lat);
            min_lon = min_lon.min(point.lon);
            max_lat = max_lat.max(point.lat);
            max_lon = max_lon.max(point.lon);
        }

        Some(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Haversine distance between two points in meters.
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_M: f64 = 6371000.0;

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Point at `fraction` of the great-circle arc from `a` to `b`.
///
/// Spherical linear interpolation over unit vectors; degenerate arcs
/// (coincident endpoints) return `a`.
pub fn great_circle_intermediate(a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
    let va = unit_vector(a);
    let vb = unit_vector(b);

    let dot = (va.0 * vb.0 + va.1 * vb.1 + va.2 * vb.2).clamp(-1.0, 1.0);
    let omega = dot.acos();
    if omega < 1e-12 {
        return a;
    }

    let sin_omega = omega.sin();
    let wa = ((1.0 - fraction) * omega).sin() / sin_omega;
    let wb = (fraction * omega).sin() / sin_omega;

    let x = wa * va.0 + wb * vb.0;
    let y = wa * va.1 + wb * vb.1;
    let z = wa * va.2 + wb * vb.2;

    let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
    let lon = y.atan2(x).to_degrees();
    GeoPoint::new(lat, lon)
}

fn unit_vector(p: GeoPoint) -> (f64, f64, f64) {
    let lat = p.lat.to_radians();
    let lon = p.lon.to_radians();
    (lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

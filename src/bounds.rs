use crate::track::TrackPoint;

/// Lat/lon bounding box, in degrees.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Bounds of nothing. `min > max` on both axes, and the identity of `union`.
    pub const EMPTY: Bounds = Bounds {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
    };

    /// Find the bounds over a sequence of points. Empty input gives `Bounds::EMPTY`.
    pub fn of_points<'a, I>(points: I) -> Bounds
    where
        I: IntoIterator<Item = &'a TrackPoint>,
    {
        points.into_iter().fold(Bounds::EMPTY, |b, p| Bounds {
            min_lat: f64::min(b.min_lat, p.latitude),
            max_lat: f64::max(b.max_lat, p.latitude),
            min_lon: f64::min(b.min_lon, p.longitude),
            max_lon: f64::max(b.max_lon, p.longitude),
        })
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_lat: f64::min(self.min_lat, other.min_lat),
            max_lat: f64::max(self.max_lat, other.max_lat),
            min_lon: f64::min(self.min_lon, other.min_lon),
            max_lon: f64::max(self.max_lon, other.max_lon),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }

    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.is_empty()
            || (self.contains(other.min_lat, other.min_lon)
                && self.contains(other.max_lat, other.max_lon))
    }
}

/// Union of a collection of bounds, e.g. the per-group bounds of a drawing.
pub fn union_bounds<I>(bounds: I) -> Bounds
where
    I: IntoIterator<Item = Bounds>,
{
    bounds.into_iter().fold(Bounds::EMPTY, Bounds::union)
}

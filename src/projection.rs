use anyhow::Result;

use crate::bounds::Bounds;
use crate::error::ConvertError;
use crate::track::TrackPoint;

pub const DEFAULT_WIDTH: f64 = 1000.0;

/// A position in drawing space: origin top-left, y grows downward.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Linear degree-to-unit mapping that stretches the longitude span of `bounds`
/// to exactly `width` units. One scale is used for both axes, so the height
/// follows the aspect ratio of the bounds. North is up.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    bounds: Bounds,
    width: f64,
    scale: f64,
}

impl Projector {
    pub fn new(bounds: Bounds, width: f64) -> Result<Projector> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ConvertError::degenerate(format!("invalid drawing width {width}")).into());
        }
        if bounds.is_empty() {
            return Err(ConvertError::degenerate("no points to project").into());
        }
        let lon_span = bounds.lon_span();
        if lon_span == 0.0 {
            return Err(ConvertError::degenerate(format!(
                "all points share longitude {}",
                bounds.min_lon
            ))
            .into());
        }
        let scale = width / lon_span;
        if !scale.is_finite() || !bounds.lat_span().is_finite() {
            return Err(ConvertError::degenerate(format!("unusable bounds {bounds:?}")).into());
        }
        Ok(Projector {
            bounds,
            width,
            scale,
        })
    }

    /// Divides by the longitude span before scaling, so the easternmost point
    /// lands on exactly `width`.
    pub fn project(&self, point: &TrackPoint) -> Coordinate {
        let b = &self.bounds;
        let lon_span = b.lon_span();
        Coordinate {
            x: (point.longitude - b.min_lon) / lon_span * self.width,
            // latitude grows northward, image y grows downward
            y: (b.lat_span() - (point.latitude - b.min_lat)) / lon_span * self.width,
        }
    }

    /// Drawing units per degree.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.bounds.lat_span() * self.scale
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

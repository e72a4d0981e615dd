use std::path::Path;

use anyhow::Result;
use itertools::Itertools;
use svg::node::element::Polyline;
use svg::Document;

use crate::bounds::{union_bounds, Bounds};
use crate::color::ColorSource;
use crate::error::ConvertError;
use crate::projection::{Coordinate, Projector, DEFAULT_WIDTH};
use crate::track::TrackGroups;

pub const STROKE_WIDTH: u32 = 3;
pub const STROKE_OPACITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// One colored, translucent polyline per group.
    Grouped,
    /// One black polyline with white fill through every point of every group.
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub width: f64,
    pub style: Style,
    /// Fixes the color draw, `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            width: DEFAULT_WIDTH,
            style: Style::Grouped,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub fill: String,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPolyline {
    /// Group name, `None` for the combined single-style line.
    pub name: Option<String>,
    pub coordinates: Vec<Coordinate>,
    pub stroke: Stroke,
}

impl DrawnPolyline {
    fn points_attribute(&self) -> String {
        self.coordinates
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .join(" ")
    }

    fn to_element(&self) -> Polyline {
        let mut polyline = Polyline::new()
            .set("points", self.points_attribute())
            .set("stroke", self.stroke.color.as_str())
            .set("stroke-width", STROKE_WIDTH)
            .set("fill", self.stroke.fill.as_str());
        if let Some(opacity) = self.stroke.opacity {
            polyline = polyline.set("stroke-opacity", opacity);
        }
        polyline
    }
}

/// A fully computed image. Nothing touches the filesystem until `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    width: f64,
    height: f64,
    bounds: Bounds,
    polylines: Vec<DrawnPolyline>,
}

impl Drawing {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Union of the bounds of every group drawn.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn polylines(&self) -> &[DrawnPolyline] {
        &self.polylines
    }

    /// Canvas as `(min_x, min_y, width, height)`: the projected extent plus a
    /// stroke width on every side, so edge strokes are not clipped and a flat
    /// east-west track still gets a visible canvas.
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        let pad = STROKE_WIDTH as f64;
        (
            -pad,
            -pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }

    pub fn to_document(&self) -> Document {
        let (min_x, min_y, width, height) = self.view_box();
        self.polylines.iter().fold(
            Document::new()
                .set("baseProfile", "tiny")
                .set("version", "1.2")
                .set("width", width)
                .set("height", height)
                .set("viewBox", format!("{min_x} {min_y} {width} {height}")),
            |document, polyline| document.add(polyline.to_element()),
        )
    }

    pub fn to_svg(&self) -> String {
        self.to_document().to_string()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.to_document()).map_err(|e| ConvertError::io(path, e))?;
        info!(
            "wrote {} polyline(s) to {}",
            self.polylines.len(),
            path.display()
        );
        Ok(())
    }
}

pub fn assemble(groups: &TrackGroups, options: &DrawOptions) -> Result<Drawing> {
    if groups.is_empty() {
        return Err(ConvertError::degenerate("no track groups to draw").into());
    }
    if let Some(empty) = groups.iter().find(|g| g.is_empty()) {
        return Err(
            ConvertError::degenerate(format!("track group {:?} has no points", empty.name()))
                .into(),
        );
    }

    let bounds = union_bounds(groups.iter().map(|g| g.bounds()));
    let projector = Projector::new(bounds, options.width)?;
    debug!(
        "global bounds {:?}, scale {} units/degree",
        bounds,
        projector.scale()
    );

    let polylines = match options.style {
        Style::Grouped => {
            let colors = ColorSource::new(options.seed).colors(groups.len())?;
            groups
                .iter()
                .zip(colors)
                .map(|(group, color)| {
                    match group.time_span() {
                        Some((start, end)) => info!(
                            "{}: {} points, {} to {}, {}",
                            group.name(),
                            group.points().len(),
                            start,
                            end,
                            color
                        ),
                        None => info!(
                            "{}: {} points, {}",
                            group.name(),
                            group.points().len(),
                            color
                        ),
                    }
                    DrawnPolyline {
                        name: Some(group.name().to_owned()),
                        coordinates: group.points().iter().map(|p| projector.project(p)).collect(),
                        stroke: Stroke {
                            color: color.to_string(),
                            fill: "none".to_owned(),
                            opacity: Some(STROKE_OPACITY),
                        },
                    }
                })
                .collect()
        }
        Style::Single => vec![DrawnPolyline {
            name: None,
            coordinates: groups
                .iter()
                .flat_map(|g| g.points().iter())
                .map(|p| projector.project(p))
                .collect(),
            stroke: Stroke {
                color: "black".to_owned(),
                fill: "white".to_owned(),
                opacity: None,
            },
        }],
    };

    Ok(Drawing {
        width: projector.width(),
        height: projector.height(),
        bounds: projector.bounds(),
        polylines,
    })
}

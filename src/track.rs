use std::{fs::File, io::BufReader, path::Path};

use anyhow::Result;
use chrono::{DateTime, Utc};
use gpx::{read, Gpx};

use crate::bounds::Bounds;
use crate::error::ConvertError;

#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    // meters
    pub elevation: f64,
    /// RFC 3339, as written back by the gpx reader. The instant matches the
    /// file's `<time>`, the exact text may not.
    pub timestamp: String,
}

impl TrackPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// A named path: one GPX file, or every file of one person.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackGroup {
    name: String,
    points: Vec<TrackPoint>,
    bounds: Bounds,
}

impl TrackGroup {
    pub fn new(name: impl Into<String>, points: Vec<TrackPoint>) -> Self {
        let bounds = Bounds::of_points(&points);
        TrackGroup {
            name: name.into(),
            points,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn extend(&mut self, points: Vec<TrackPoint>) {
        self.bounds = self.bounds.union(Bounds::of_points(&points));
        self.points.extend(points);
    }

    /// First and last parsable timestamps, in recording order.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut times = self.points.iter().filter_map(TrackPoint::time);
        let first = times.next()?;
        let last = times.last().unwrap_or(first);
        Some((first, last))
    }
}

/// Track groups keyed by name, iterated in the order they were first added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackGroups {
    groups: Vec<TrackGroup>,
}

impl TrackGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds points under `name`. Points for a name seen before are appended to
    /// that group, which keeps its original position.
    pub fn add(&mut self, name: impl Into<String>, points: Vec<TrackPoint>) {
        let name = name.into();
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.extend(points),
            None => self.groups.push(TrackGroup::new(name, points)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrackGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a TrackGroups {
    type Item = &'a TrackGroup;
    type IntoIter = std::slice::Iter<'a, TrackGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Flattens every segment of every track into one point sequence, in document
/// order. `source` only names the document in errors.
pub fn points_from_gpx(gpx_data: &Gpx, source: &Path) -> Result<Vec<TrackPoint>> {
    if gpx_data.tracks.is_empty() {
        return Err(ConvertError::parse(source, "no <trk> element").into());
    }
    let mut points = Vec::new();
    for (track_idx, track) in gpx_data.tracks.iter().enumerate() {
        for (segment_idx, segment) in track.segments.iter().enumerate() {
            for (point_idx, waypoint) in segment.points.iter().enumerate() {
                let fail = |what: String| {
                    let at = format!("track {track_idx}, segment {segment_idx}, point {point_idx}");
                    ConvertError::parse(source, format!("{at}: {what}"))
                };
                let elevation = waypoint
                    .elevation
                    .ok_or_else(|| fail("missing <ele>".to_owned()))?;
                let timestamp = match &waypoint.time {
                    Some(time) => time
                        .format()
                        .map_err(|e| fail(format!("bad <time>: {e}")))?,
                    None => return Err(fail("missing <time>".to_owned()).into()),
                };
                let position: geo_types::Point<f64> = waypoint.point();
                points.push(TrackPoint {
                    latitude: position.y(),
                    longitude: position.x(),
                    elevation,
                    timestamp,
                });
            }
        }
    }
    Ok(points)
}

pub fn load_gpx<P: AsRef<Path>>(file_path: P) -> Result<Vec<TrackPoint>> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path).map_err(|e| ConvertError::io(file_path, e))?;
    let gpx_data =
        read(BufReader::new(file)).map_err(|e| ConvertError::parse(file_path, e))?;
    let points = points_from_gpx(&gpx_data, file_path)?;
    debug!("{} points in {}", points.len(), file_path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="45.0" lon="-122.0"><ele>100.5</ele><time>2021-02-01T09:00:00Z</time></trkpt>
      <trkpt lat="45.1" lon="-122.1"><ele>101.0</ele><time>2021-02-01T09:01:00Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="44.9" lon="-122.2"><ele>99.0</ele><time>2021-02-01T09:05:00Z</time></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    fn parse(xml: &str) -> Result<Vec<TrackPoint>> {
        let gpx_data = read(xml.as_bytes())?;
        points_from_gpx(&gpx_data, Path::new("inline.gpx"))
    }

    #[test]
    fn keeps_document_order_across_segments() {
        let points = parse(TWO_SEGMENTS).unwrap();
        let lat_lon: Vec<(f64, f64)> = points.iter().map(|p| (p.latitude, p.longitude)).collect();
        assert_eq!(lat_lon, vec![(45.0, -122.0), (45.1, -122.1), (44.9, -122.2)]);
        assert_eq!(points[0].elevation, 100.5);
        assert_eq!(points[2].timestamp, "2021-02-01T09:05:00Z");
    }

    #[test]
    fn missing_elevation_fails_whole_document() {
        let xml = TWO_SEGMENTS.replace("<ele>101.0</ele>", "");
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::Parse { .. })
        ));
        assert!(err.to_string().contains("missing <ele>"));
    }

    #[test]
    fn missing_time_fails_whole_document() {
        let xml = TWO_SEGMENTS.replace("<time>2021-02-01T09:05:00Z</time>", "");
        let err = parse(&xml).unwrap_err();
        assert!(err.to_string().contains("segment 1, point 0: missing <time>"));
    }

    #[test]
    fn no_track_is_parse_error() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"><wpt lat="1.0" lon="2.0"></wpt></gpx>"#;
        let err = parse(xml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::Parse { .. })
        ));
    }

    #[test]
    fn groups_keep_discovery_order_and_merge_names() {
        let points = parse(TWO_SEGMENTS).unwrap();
        let mut groups = TrackGroups::new();
        groups.add("bob", points[..1].to_vec());
        groups.add("alice", points[1..2].to_vec());
        groups.add("bob", points[2..].to_vec());

        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["bob", "alice"]);

        let bob = groups.get("bob").unwrap();
        assert_eq!(bob.points().len(), 2);
        assert_eq!(bob.bounds(), Bounds::of_points(bob.points()));
    }

    #[test]
    fn time_span_of_group() {
        let group = TrackGroup::new("day", parse(TWO_SEGMENTS).unwrap());
        let (start, end) = group.time_span().unwrap();
        assert_eq!(start.to_rfc3339(), "2021-02-01T09:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2021-02-01T09:05:00+00:00");
    }

    #[test]
    fn offset_time_keeps_its_instant() {
        let xml = TWO_SEGMENTS.replace("2021-02-01T09:00:00Z", "2021-02-01T10:00:00.500+01:00");
        let points = parse(&xml).unwrap();
        let expected = DateTime::parse_from_rfc3339("2021-02-01T09:00:00.500Z").unwrap();
        assert_eq!(points[0].time(), Some(expected.with_timezone(&Utc)));
    }
}

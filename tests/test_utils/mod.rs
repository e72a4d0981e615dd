use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ski_art::config::Config;
use ski_art::drawing::DrawOptions;
use svg::node::element::tag::Type;
use svg::parser::Event;

pub fn data(name: &str) -> PathBuf {
    Path::new("./tests/data").join(name)
}

pub fn file_config(output: &Path, inputs: &[&str]) -> Config {
    let defaults = DrawOptions::default();
    Config {
        output: output.to_path_buf(),
        inputs: inputs.iter().map(|name| data(name)).collect(),
        input: None,
        width: defaults.width,
        seed: Some(1),
        single: false,
        verbose: false,
        log_file: None,
    }
}

pub fn directory_config(output: &Path, dir: &str) -> Config {
    Config {
        inputs: vec![],
        input: Some(data(dir)),
        ..file_config(output, &[])
    }
}

#[derive(Debug)]
pub struct ParsedPolyline {
    pub points: Vec<(f64, f64)>,
    pub attributes: HashMap<String, String>,
}

/// Reads back the polylines of a written SVG file, in document order.
pub fn read_polylines(path: &Path) -> Vec<ParsedPolyline> {
    let content = fs::read_to_string(path).expect("failed to read svg output");
    let mut polylines = Vec::new();
    for event in svg::read(&content).expect("failed to parse svg output") {
        if let Event::Tag("polyline", Type::Empty, attrs) = event {
            let attributes: HashMap<String, String> = attrs
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect();
            let points = attributes["points"]
                .split_whitespace()
                .map(|pair| {
                    let (x, y) = pair.split_once(',').unwrap();
                    (x.parse().unwrap(), y.parse().unwrap())
                })
                .collect();
            polylines.push(ParsedPolyline { points, attributes });
        }
    }
    polylines
}

use anyhow::Result;

use crate::{
    config::Config,
    drawing::{self, Drawing},
    input,
    track::TrackGroups,
};

pub fn load_groups(config: &Config) -> Result<TrackGroups> {
    let groups = match &config.input {
        Some(dir) => input::groups_from_directory(dir)?,
        None => input::groups_from_files(&config.inputs)?,
    };
    info!("loaded {} track group(s)", groups.len());
    Ok(groups)
}

/// Reads every input, builds the drawing, then writes the output once.
pub fn convert(config: &Config) -> Result<Drawing> {
    let groups = load_groups(config)?;
    let drawing = drawing::assemble(&groups, &config.draw_options())?;
    drawing.save(&config.output)?;
    Ok(drawing)
}

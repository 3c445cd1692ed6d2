//! Renders a synthetic frame through the flat renderer and writes it out as
//! a PPM image.

mod cli;
mod config;
mod scene;

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use cli::*;
use config::ViewConfig;
use log::info;
use mimalloc::MiMalloc;
use render_soft::{LightTables, NUMCOLORMAPS, PlaneRender};
use render_target::{
    ColourMaps, DrawBuffer, IndexedBuffer, PalettedSpans, PixelBuffer, TrueColourSpans,
    expand_indexed, grey_palette, write_ppm,
};
use scene::SyntheticFlats;
use simplelog::TermLogger;

/// Palette index sky columns are painted with
const SKY_INDEX: u8 = 180;
/// Pixels no visplane covers
const VOID_INDEX: u8 = 16;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config_path = match &options.config {
        Some(path) => PathBuf::from(path),
        None => config::default_path()?,
    };
    let mut view_config = ViewConfig::load(&config_path)?;
    view_config.sync_cli(&mut options);
    view_config.write(&config_path)?;

    let width = view_config.width as usize;
    let height = view_config.height as usize;
    let mut render = PlaneRender::new(width, height, view_config.planes.clone())?;
    info!("Rendering {width}x{height} at tic {}", options.tic);

    let flats = SyntheticFlats::new();
    let lights = LightTables::new();
    let colourmaps = ColourMaps::ramp_fade(NUMCOLORMAPS);
    let palette = grey_palette();
    let view = scene::viewpoint(options.tic);
    scene::build_frame(&mut render);

    let mut frame = DrawBuffer::new(width, height);
    if view_config.truecolour {
        frame.clear_with_colour(&palette[VOID_INDEX as usize]);
        let mut filler = TrueColourSpans::new(&mut frame, &colourmaps, &palette, SKY_INDEX);
        render.draw_planes(&view, &flats, &lights, &mut filler);
    } else {
        let mut indexed = IndexedBuffer::new(width, height);
        indexed.clear_with(VOID_INDEX);
        let mut filler = PalettedSpans::new(&mut indexed, &colourmaps, SKY_INDEX);
        render.draw_planes(&view, &flats, &lights, &mut filler);
        expand_indexed(&indexed, &palette, &mut frame);
    }

    let mut out = BufWriter::new(File::create(&options.output)?);
    write_ppm(&frame, &mut out)?;
    out.flush()?;
    info!(
        "Drew {} visplanes to {}",
        render.pool().len(),
        options.output
    );

    #[cfg(feature = "hprof")]
    coarse_prof::write(&mut std::io::stdout())?;
    Ok(())
}

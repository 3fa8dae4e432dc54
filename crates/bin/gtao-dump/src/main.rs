use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::UVec2;
use gtao::{lut, renderer::dispatch_size, GtaoRenderer, GtaoSettings, GtaoViewport};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "gtao-dump", about = "Prints GTAO constant buffers for a number of frames.")]
struct Opt {
    /// RON file with `GtaoSettings`; defaults are used when omitted.
    #[structopt(long, parse(from_os_str))]
    settings: Option<PathBuf>,

    #[structopt(long, default_value = "1")]
    frames: u32,

    #[structopt(long)]
    width: Option<u32>,

    #[structopt(long)]
    height: Option<u32>,

    #[structopt(long, default_value = "0.1")]
    near: f32,

    #[structopt(long, default_value = "1000.0")]
    far: f32,

    #[structopt(long, default_value = "60.0")]
    fov: f32,

    /// Also write the Hilbert index LUT (raw little-endian R16_UINT) here.
    #[structopt(long, parse(from_os_str))]
    lut_out: Option<PathBuf>,
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|row| {
            row.iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let settings = match &opt.settings {
        Some(path) => GtaoSettings::load(path)
            .with_context(|| format!("Loading settings from {:?}", path))?,
        None => GtaoSettings::default(),
    };
    log::info!("{:?}", settings);

    if gtao::shared::constants::USE_DEFAULT_CONSTANTS {
        log::info!("Built with default constants; tunables in the buffer are ignored");
    }

    let viewport = match (opt.width, opt.height) {
        (Some(width), Some(height)) => Some(GtaoViewport::new(
            UVec2::new(width, height),
            opt.near,
            opt.far,
            opt.fov,
        )),
        (None, None) => None,
        _ => anyhow::bail!("--width and --height must be given together"),
    };

    if let Some(viewport) = &viewport {
        let groups = dispatch_size(viewport.size);
        log::info!("Dispatching {}x{} thread groups", groups.x, groups.y);
    }

    let mut renderer = GtaoRenderer::new();
    for _ in 0..opt.frames {
        let frame = renderer.prepare_frame(&settings, viewport.as_ref())?;

        println!(
            "frame {} {:?} {:?} ({} samples) -> {}",
            frame.frame_index,
            frame.passes,
            frame.quality,
            frame.quality.sample_count(),
            frame.ao_output.name
        );
        println!("{:#?}", frame.constants.kernel_terms());
        println!("{}", hex_dump(frame.constants.as_bytes()));
    }

    if let Some(path) = &opt.lut_out {
        std::fs::write(path, lut::hilbert_lut_bytes())
            .with_context(|| format!("Writing the Hilbert LUT to {:?}", path))?;
        log::info!("Wrote the Hilbert LUT to {:?}", path);
    }

    Ok(())
}

use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use waveview::draw::PixmapCanvas;
use waveview::gfx::Color;
use waveview::logger::{LogConfig, init_logs};
use waveview::{
    ContainerIcon, FillCurtain, FillDriver, Sector, ShapeType, WaveShiftAnimation, WaveView,
};

const SIZE: u32 = 200;
const FRAME_DELTA: f32 = 1.0 / 30.0;
const FRAMES_PER_STEP: usize = 3;
const CURTAIN_COLOR: &str = "#FFFFFF";

// usage: water_container [--trace-frames] [output dir]
fn main() -> Result<(), String> {
    let (flags, paths): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let trace_frames = flags.iter().any(|flag| flag == "--trace-frames");
    init_logs(LogConfig::debug().with_frame_logs(trace_frames));

    let out = paths
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("waveview"));
    std::fs::create_dir_all(&out)
        .map_err(|e| format!("Cannot create '{}': {e}", out.display()))?;

    let mut view = WaveView::builder()
        .with_size(SIZE, SIZE)
        .with_shape(ShapeType::Drop)
        .with_border(1.0, Color::BLACK)
        .with_water_level_ratio(0.0)
        .with_amplitude_ratio(0.02)
        .build()?;

    let mut curtain = FillCurtain::new().with_icon(ContainerIcon::Drop);
    curtain.set_sector(Sector::parse(CURTAIN_COLOR, "0")?);
    curtain.on_resize(SIZE, SIZE);

    let mut driver = FillDriver::new();
    let mut animation = WaveShiftAnimation::default();
    let handle = animation.start(&mut view);

    let mut frame = 0;

    // fill the container step by step and empty it again
    while driver.increase() {
        driver.apply(&mut view, &mut curtain)?;
        frame = play(&mut view, &mut curtain, &mut animation, &out, frame)?;
    }

    while driver.decrease() {
        driver.apply(&mut view, &mut curtain)?;
        frame = play(&mut view, &mut curtain, &mut animation, &out, frame)?;
    }

    handle.cancel();
    log::info!("{frame} frames written to '{}'", out.display());

    // one still per shape, half full
    view.set_water_level_ratio(0.5);
    view.set_border(2.0, Color::NAVY);
    for shape in ShapeType::iter() {
        view.set_shape(shape);
        let mut canvas = PixmapCanvas::new(SIZE, SIZE)?;
        canvas.clear(Color::WHITE);
        view.draw(&mut canvas)?;

        let name = format!("shape_{}.png", shape.to_string().to_lowercase());
        canvas.save_png(out.join(name))?;
    }

    Ok(())
}

fn play(
    view: &mut WaveView,
    curtain: &mut FillCurtain,
    animation: &mut WaveShiftAnimation,
    out: &Path,
    mut frame: usize,
) -> Result<usize, String> {
    for _ in 0..FRAMES_PER_STEP {
        animation.tick(FRAME_DELTA, view);
        if !(view.is_dirty() || curtain.is_dirty()) {
            continue;
        }

        let mut canvas = PixmapCanvas::new(SIZE, SIZE)?;
        canvas.clear(Color::WHITE);
        view.draw(&mut canvas)?;
        curtain.draw(&mut canvas)?;
        canvas.save_png(out.join(format!("frame_{frame:03}.png")))?;
        frame += 1;
    }

    Ok(frame)
}

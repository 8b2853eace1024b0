//! Tree Breaker headless driver
//!
//! Usage: `tree-breaker [SETTINGS_JSON] [GEOMETRY_JSON]`
//!
//! Runs the animation without a viewer and logs how the games play out. Set
//! `FRAMES` to choose how many frames to run (default: one minute at the
//! configured frame rate) and `RUST_LOG` for the log level.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> tree_breaker::Result<()> {
    use tree_breaker::consts::{BACKGROUND, NUM_LIGHTS};
    use tree_breaker::geometry::{parse_points_json, spiral_cone};
    use tree_breaker::{Animation, BrickBreaker, Settings};

    env_logger::init();
    log::info!("Tree Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let points = match args.next() {
        Some(path) => {
            let points = parse_points_json(&std::fs::read_to_string(&path)?)?;
            log::info!("Loaded {} lights from {}", points.len(), path);
            points
        }
        None => {
            log::info!("No light table given, using a generated {}-light cone", NUM_LIGHTS);
            spiral_cone(NUM_LIGHTS)
        }
    };
    let frames: u32 = std::env::var("FRAMES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| settings.frames_for(60));

    let mut engine = BrickBreaker::new(&points, settings)?;
    let mut bytes = vec![0u8; engine.num_lights() * 3];
    let mut phase = engine.state().phase();

    for _ in 0..frames {
        engine.render_into_bytes(&mut bytes);

        let now = engine.state().phase();
        if now != phase {
            log::info!("Frame {}: {:?} -> {:?}", engine.state().frame_count(), phase, now);
            phase = now;
        }
    }

    let background = [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b];
    let lit = bytes.chunks_exact(3).filter(|light| *light != background).count();
    log::info!(
        "Last frame: {:?}, {} of {} lights lit, {} bricks standing",
        phase,
        lit,
        engine.num_lights(),
        engine.state().active_bricks()
    );
    engine.shutdown();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly; there is no standalone wasm driver
}

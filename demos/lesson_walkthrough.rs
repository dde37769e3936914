//! Runs the Pen lesson headlessly for a few simulated seconds.
//!
//! ```text
//! RUST_LOG=debug cargo run --example lesson_walkthrough [config.json]
//! ```

use std::error::Error;

use lesson_fsm::collaborators::{PointerEvent, Scene};
use lesson_fsm::headless::{
    orbit_controller_factory, timed_loader_factory, MeshPart, Overlay, PointerHub, SceneGraph,
};
use lesson_fsm::lesson::{create_lesson, LessonConfig, LessonContext, EXIT_REQ, EXPLORE};
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Ten simulated seconds.
const MAX_LOAD_FRAMES: u32 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LessonConfig::from_path(path)?,
        None => LessonConfig::default(),
    };

    let scene = SceneGraph::shared();
    let hud = Overlay::shared();
    let pointer = PointerHub::shared();
    let parts = vec![
        MeshPart::new("desk", "wood"),
        MeshPart::new("shelf", "wood"),
        MeshPart::new("monitor", "plastic"),
        MeshPart::new("lamp", "metal"),
    ];
    let context = LessonContext::new(
        scene.clone(),
        hud.clone(),
        pointer.clone(),
        timed_loader_factory(parts, 1500.0),
        orbit_controller_factory(20.0),
    );

    let mut lesson = create_lesson(context, config)?;

    let mut frame = 0u32;
    while lesson.active_state() != Some(EXPLORE) {
        if frame == MAX_LOAD_FRAMES {
            lesson.fire_signal(EXIT_REQ)?;
            println!(
                "loading stalled after {frame} frames, left through {:?}",
                lesson.active_state()
            );
            return Ok(());
        }
        lesson.update(FRAME_MS)?;
        frame += 1;
    }
    println!(
        "loaded after {frame} frames: {} nodes, {} lights",
        scene.borrow().node_count(),
        scene.borrow().light_count()
    );

    for _ in 0..120 {
        lesson.update(FRAME_MS)?;
    }
    println!("camera eye after exploring: {}", scene.borrow().camera().eye);

    pointer.borrow().press(PointerEvent::at(640.0, 360.0), None);
    lesson.process_signals()?;
    lesson.update(FRAME_MS)?;

    println!(
        "now in {:?}, scene has {} nodes and {} widgets on the HUD",
        lesson.active_state(),
        scene.borrow().node_count(),
        hud.borrow().len()
    );
    println!("path: {}", lesson.history().path().join(" -> "));

    Ok(())
}

/// Cubeview Terminal - Drag-to-rotate puzzle cube
///
/// Controls:
///   - Left mouse drag: Rotate the cube
///   - R: Reset orientation
///   - Q/ESC: Quit

use cubeview_core::Mesh;
use cubeview_terminal::config::CONFIG_FILE;
use cubeview_terminal::{logging, AppError, TerminalApp, ViewerConfig};

fn main() -> Result<(), AppError> {
    println!("Cubeview Terminal Renderer - Loading...");

    let (config, config_error) = ViewerConfig::load_or_default(CONFIG_FILE);
    logging::init_logging(&config.logging)?;
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    log::info!(
        "starting with a {0}x{0}x{0} puzzle at {1} fps",
        config.puzzle.layers,
        config.render.fps
    );

    let puzzle = Mesh::cube_puzzle(config.puzzle.layers, config.puzzle.size);

    println!("Starting terminal renderer (drag to rotate, press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(puzzle, config)?;
    app.run()?;

    log::info!("viewer closed");
    println!("Thank you for using Cubeview!");
    Ok(())
}

/// Terminal front end: renders the puzzle cube as ASCII and rotates it with mouse drags
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cubeview_core::{
    add_drag_controls, create_scene, DragControls, Mesh, Object3D, PointerDispatcher,
    RotationState, SceneSetup, ViewportConfig,
};
use std::cell::RefCell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod renderer;

pub use config::ViewerConfig;
pub use error::AppError;
pub use renderer::AsciiRenderer;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: ViewerConfig,
    setup: SceneSetup,
    object: Rc<RefCell<Object3D>>,
    pointer: PointerDispatcher,
    controls: DragControls<PointerDispatcher>,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, config, width, height))
    }

    /// Build the app for a terminal of `columns x rows` cells
    pub fn with_size(mesh: Mesh, config: ViewerConfig, columns: u16, rows: u16) -> Self {
        let object = Rc::new(RefCell::new(Object3D::new(mesh)));
        let pointer = PointerDispatcher::new();
        let controls = add_drag_controls(Rc::clone(&object), pointer.clone());

        Self {
            setup: create_scene(viewport_for(&config, columns, rows)),
            renderer: AsciiRenderer::new(columns as usize, rows as usize),
            config,
            object,
            pointer,
            controls,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.object.borrow().rotation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        self.controls.dispose();
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.config.render.fps.max(1) as u64);

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so drags stay responsive
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('r') => {
                    log::info!("orientation reset");
                    self.object.borrow_mut().rotation = RotationState::zero();
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let Some((kind, position)) = input::pointer_event(&mouse, &self.config.input) {
                    self.pointer.dispatch(kind, position);
                }
            }
            Event::Resize(columns, rows) => {
                log::debug!("terminal resized to {}x{}", columns, rows);
                self.setup = create_scene(viewport_for(&self.config, columns, rows));
                self.renderer = AsciiRenderer::new(columns as usize, rows as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer
            .render_object(&self.object.borrow(), &self.setup.scene, &self.setup.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let rotation = self.rotation();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Cubeview | FPS: {:.1} | rot x {:.2} y {:.2} | Drag=Rotate R=Reset Q=Quit",
                self.fps, rotation.x, rotation.y
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Pixel viewport covered by the terminal, so the camera aspect matches the screen
fn viewport_for(config: &ViewerConfig, columns: u16, rows: u16) -> ViewportConfig {
    ViewportConfig::new(
        (columns as f64 * config.input.cell_width).round() as u32,
        (rows as f64 * config.input.cell_height).round() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app() -> TerminalApp {
        TerminalApp::with_size(Mesh::cube(2.0), ViewerConfig::default(), 80, 24)
    }

    #[test]
    fn test_viewport_uses_cell_size() {
        let viewport = viewport_for(&ViewerConfig::default(), 80, 24);
        assert_eq!(viewport, ViewportConfig::new(640, 384));
    }

    #[test]
    fn test_mouse_drag_rotates_object() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 12));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 15, 12));

        // 5 columns * 8 px, 2 rows * 16 px
        let rotation = app.rotation();
        assert!((rotation.y - 0.4).abs() < 1e-5);
        assert!((rotation.x - 0.32).abs() < 1e-5);
    }

    #[test]
    fn test_reset_and_quit_keys() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 0));
        assert_ne!(app.rotation(), RotationState::zero());

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert_eq!(app.rotation(), RotationState::zero());

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!app.is_running());
    }

    #[test]
    fn test_resize_rebuilds_scene() {
        let mut app = app();
        app.handle_event(Event::Resize(100, 50));
        assert_eq!(app.renderer.size(), (100, 50));
        assert_eq!(app.setup.renderer.viewport, ViewportConfig::new(800, 800));
    }
}

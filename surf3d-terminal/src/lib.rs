//! Terminal front-end for the surface renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::Duration;
use surf3d_core::renderer::DEFAULT_BASE_COLOR;
use surf3d_core::{
    helix, DrawingSurface, Engine, EngineConfig, HelixParams, Mesh, ScreenPoint, Tessellation,
};

pub mod canvas;

pub use canvas::AsciiCanvas;

/// Rotation applied per key press (radians)
pub const ROTATION_STEP: f64 = 0.1;
/// Parameter change per key press
pub const PARAM_STEP: f64 = 0.05;
/// Terminal width at which the projection scale is 1
const REFERENCE_COLUMNS: f64 = 80.0;

const CAPTION: &str = "Helicoid surface";

fn to_io(err: surf3d_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Scale that keeps the helix on screen for a terminal `columns` wide
pub fn scale_for(columns: u16) -> f64 {
    columns.max(1) as f64 / REFERENCE_COLUMNS
}

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rotate(f64, f64, f64),
    ToggleWireframe,
    ResetView,
    AdjustAlpha(f64),
    AdjustBeta(f64),
    AdjustZlim(f64),
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Command> {
        let step = ROTATION_STEP;
        let command = match code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('w') | KeyCode::Up => Command::Rotate(-step, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => Command::Rotate(step, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => Command::Rotate(0.0, -step, 0.0),
            KeyCode::Char('d') | KeyCode::Right => Command::Rotate(0.0, step, 0.0),
            KeyCode::Char('e') => Command::Rotate(0.0, 0.0, step),
            KeyCode::Char('r') => Command::Rotate(0.0, 0.0, -step),
            KeyCode::Char('f') => Command::ToggleWireframe,
            KeyCode::Char('0') | KeyCode::Backspace => Command::ResetView,
            KeyCode::Char('1') => Command::AdjustAlpha(-PARAM_STEP),
            KeyCode::Char('2') => Command::AdjustAlpha(PARAM_STEP),
            KeyCode::Char('3') => Command::AdjustBeta(-PARAM_STEP),
            KeyCode::Char('4') => Command::AdjustBeta(PARAM_STEP),
            KeyCode::Char('5') => Command::AdjustZlim(-PARAM_STEP),
            KeyCode::Char('6') => Command::AdjustZlim(PARAM_STEP),
            _ => return None,
        };
        Some(command)
    }
}

/// Scene state of the helix viewer, independent of any terminal
pub struct Viewer {
    engine: Engine,
    tessellation: Tessellation,
    params: HelixParams,
    mesh: Mesh,
    wireframe: bool,
}

impl Viewer {
    pub fn new(engine: Engine) -> surf3d_core::Result<Self> {
        let tessellation = Tessellation::helix_default();
        let params = HelixParams::default();
        let mesh = tessellation.generate(&helix, &params)?;

        Ok(Self {
            engine,
            tessellation,
            params,
            mesh,
            wireframe: false,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn params(&self) -> HelixParams {
        self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Apply a command. Returns `false` once the viewer should stop.
    pub fn apply(&mut self, command: Command) -> surf3d_core::Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Rotate(dx, dy, dz) => self.engine.rotate_by(dx, dy, dz),
            Command::ToggleWireframe => self.wireframe = !self.wireframe,
            Command::ResetView => self.engine.reset_rotation(),
            Command::AdjustAlpha(delta) => {
                self.params.alpha += delta;
                self.regenerate()?;
            }
            Command::AdjustBeta(delta) => {
                self.params.beta += delta;
                self.regenerate()?;
            }
            Command::AdjustZlim(delta) => {
                self.params.zlim += delta;
                self.regenerate()?;
            }
        }
        Ok(true)
    }

    fn regenerate(&mut self) -> surf3d_core::Result<()> {
        self.params = self.params.clamped();
        self.mesh = self.tessellation.generate(&helix, &self.params)?;
        log::debug!("regenerated helix with {:?}", self.params);
        Ok(())
    }

    /// Draw a full frame: surface, axes and caption
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> surf3d_core::Result<()> {
        self.engine.redraw(surface, &self.mesh, DEFAULT_BASE_COLOR, self.wireframe)?;
        surface.create_text(
            ScreenPoint::new(1, 1),
            CAPTION,
            Some("bold"),
            surf3d_core::Color::BLACK,
        );
        Ok(())
    }
}

/// Main application struct for terminal surface rendering
pub struct TerminalApp {
    viewer: Viewer,
    canvas: AsciiCanvas,
    running: bool,
    dirty: bool,
}

impl TerminalApp {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Top row is the status line
        let rows = height.saturating_sub(1).max(1);

        let engine = Engine::new(EngineConfig {
            width: width.max(1) as u32,
            height: rows as u32,
            scale: scale_for(width),
            ..EngineConfig::default()
        })
        .map_err(to_io)?;

        Ok(Self {
            viewer: Viewer::new(engine).map_err(to_io)?,
            canvas: AsciiCanvas::new(width as usize, rows as usize),
            running: true,
            dirty: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            if event::poll(Duration::from_millis(100))? {
                self.handle_event(event::read()?)?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(command) = Command::from_key(code) {
                    self.running = self.viewer.apply(command).map_err(to_io)?;
                    self.dirty = true;
                }
            }
            Event::Resize(width, height) => self.resize(width, height)?,
            _ => {}
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        let rows = height.saturating_sub(1).max(1);
        let engine = self.viewer.engine_mut();
        engine.resize(width.max(1) as u32, rows as u32).map_err(to_io)?;
        engine.set_scale(scale_for(width)).map_err(to_io)?;

        self.canvas = AsciiCanvas::new(width as usize, rows as usize);
        self.dirty = true;
        log::debug!("resized to {}x{}", width, rows);
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.viewer.render(&mut self.canvas).map_err(to_io)?;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let params = self.viewer.params();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SURF3D | a={:.2} b={:.2} z={:.2} {} | WASD/Arrows/E/R=Rotate F=Wireframe 0=Reset 1-6=Params Q=Quit",
                params.alpha,
                params.beta,
                params.zlim,
                if self.viewer.wireframe() { "wire" } else { "fill" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

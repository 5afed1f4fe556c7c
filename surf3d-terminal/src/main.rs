//! SURF3D Terminal Demo - Helicoid surface
//!
//! Renders the helix surface as shaded characters.
//! Controls:
//!   - WASD / Arrow Keys: Rotate about X and Y
//!   - E/R: Rotate about Z
//!   - F: Toggle wireframe
//!   - 0 / Backspace: Reset the view
//!   - 1-6: Decrease / increase alpha, beta and the Z limit
//!   - Q/ESC: Quit

use std::io;
use surf3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    log::info!("starting terminal renderer");
    let mut app = TerminalApp::new()?;
    app.run()?;

    println!("Thank you for using SURF3D Terminal Renderer!");
    Ok(())
}

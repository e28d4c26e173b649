//! Research Intelligence: Case File Analysis Terminal
//!
//! A themed terminal dashboard over a fixed set of research case files:
//! case list, alignment chart, and a scripted analysis console.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use research_intel::tui::App;
use std::io::{self, stdout};
use std::time::Instant;

fn main() -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new();

    // Main loop
    while app.running {
        // Draw
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Handle input, then advance timers and pending dispatches
        if !app.handle_input()? {
            break;
        }
        app.on_tick(Instant::now());
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  RESEARCH INTELLIGENCE :: SESSION TERMINATED           ║");
    println!("║                                                        ║");
    println!("║  All case files remain classified.                     ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

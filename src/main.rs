// What you SEE:
// • A white canvas with a toolbar strip underneath.
// • Hold Left Mouse on the canvas to draw; PEN / ERASER / swatches / width slider in the toolbar.
// • UNDO / REDO walk the last strokes; SAVE writes sketch-NNN.png; CLEAR asks first.
// • Shortcuts: P, E, 1-7, H (hex color), [ ], Ctrl+Z, Ctrl+Y, Ctrl+S, Delete. ESC quits.

mod app;
mod config;
mod draw;
mod error;
mod export;
mod history;
mod input;
mod keys;
mod paint;
mod surface;
mod toolbar;
mod types;

use app::{App, AppEvent};
use config::Config;
use draw::{Drawer, Rect};
use error::Error;
use input::{PointerSample, PointerTracker};
use minifb::Key;
use toolbar::Toolbar;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* --- Config + state ---
       Fails fast on a bad config: nothing is shown until everything is valid. */
    let config = Config::load()?;
    let mut app = App::new(&config)?;
    let (w, h) = (config.width, config.height);
    log::info!(
        "canvas {w}x{h}, history capacity {}, saving to {}",
        app.history().capacity(),
        config.export_dir.display()
    );

    /* --- Window: canvas on top, toolbar strip below --- */
    let window_h = h + config.toolbar_height;
    let mut drawer = Drawer::new("Sketchpad", w, window_h)?;
    let mut toolbar = Toolbar::new(w, h, config.toolbar_height, app.width_range());
    let mut pointer = PointerTracker::new();
    let canvas = Rect::new(0, 0, w as i32, h as i32);

    /* --- Reusable screen buffer --- */
    let mut screen = FrameBuffer { width: w, height: window_h, pixels: vec![0u32; w * window_h] };

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        /* 1) Keyboard. A prompt swallows keys; otherwise shortcuts, and ESC quits. */
        let (ctrl, shift) = (drawer.ctrl_down(), drawer.shift_down());
        let mut quit = false;
        for key in drawer.keys_pressed() {
            let event = if let Some(prompt) = app.prompt() {
                keys::prompt_key(key, prompt)
            } else if key == Key::Escape {
                quit = true;
                None
            } else {
                keys::shortcut(key, ctrl, shift).map(AppEvent::Action)
            };
            if let Some(event) = event {
                app.handle(event);
            }
        }
        if quit {
            break;
        }

        /* 2) Pointer: the canvas sees only positions above the toolbar. */
        let mouse = drawer.mouse_pos();
        let down = drawer.left_mouse_down();
        let on_canvas = mouse.filter(|p| canvas.contains(p.x as i32, p.y as i32));
        if let Some(event) = pointer.update(PointerSample { pos: on_canvas, down }) {
            app.handle(AppEvent::Pointer(event));
        }
        if let Some(action) = toolbar.pointer(mouse, down) {
            app.handle(AppEvent::Action(action));
        }

        /* 3) Compose: canvas, toolbar, then any prompt on top. */
        app.surface().present_into(&mut screen.pixels[..w * h]);
        toolbar.render(&mut screen, &app);
        if let Some(prompt) = app.prompt() {
            toolbar::render_prompt(&mut screen, canvas, prompt);
        }

        /* 4) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;
    }

    log::info!("bye");
    Ok(())
}

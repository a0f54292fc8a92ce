// Interactive harness for the gesture engine. Opens the real camera through
// a `GestureSession`, shows the decimated feed the pipeline actually analyzes
// (upscaled, nearest-neighbor), and overlays the live signal: an energy bar
// along the bottom, a crosshair at the motion centroid, and a log line on
// every state transition. The mouse drives the pointer fallback path, so the
// harness also works with no camera at all.

use gesture_vision::core_modules::frame_sampler::{GRID_HEIGHT, GRID_WIDTH};
use gesture_vision::pipeline::{GestureConfig, InteractionState};
use gesture_vision::session::GestureSession;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

const VIEW_SCALE: usize = 8;
const VIEW_WIDTH: usize = GRID_WIDTH as usize * VIEW_SCALE;
const VIEW_HEIGHT: usize = GRID_HEIGHT as usize * VIEW_SCALE;
const ENERGY_BAR_HEIGHT: usize = 12;

const IDLE_COLOR: u32 = 0x0033_CC66;
const UNLEASHED_COLOR: u32 = 0x00FF_4422;
const CENTROID_COLOR: u32 = 0x00FF_CC33;
const NO_FEED_COLOR: u32 = 0x0020_2020;

fn main() -> Result<(), minifb::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut session = GestureSession::start(GestureConfig::default());
    let mut window = Window::new(
        "gesture_vision - signal tester",
        VIEW_WIDTH,
        VIEW_HEIGHT,
        WindowOptions::default(),
    )?;
    window.set_target_fps(60);

    let mut view = vec![NO_FEED_COLOR; VIEW_WIDTH * VIEW_HEIGHT];
    let mut mouse_was_down = false;
    let mut last_state = session.state();
    let mut reported_unavailable = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Pointer fallback: press/release force the state, movement feeds the
        // gated position override.
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        if mouse_down && !mouse_was_down {
            session.pointer_pressed();
        }
        if !mouse_down && mouse_was_down {
            session.pointer_released();
        }
        mouse_was_down = mouse_down;

        if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Clamp) {
            let x = mx / (VIEW_WIDTH as f32 / 2.0) - 1.0;
            let y = my / (VIEW_HEIGHT as f32 / 2.0) - 1.0;
            session.pointer_moved(x, y);
        }

        let signal = session.tick();
        let state = session.state();
        if state != last_state {
            log::info!(
                "{last_state:?} -> {state:?} (energy {:.2}, centroid {:.2},{:.2})",
                signal.energy,
                signal.x,
                signal.y
            );
            last_state = state;
        }
        if session.camera_unavailable() && !reported_unavailable {
            log::info!("camera unavailable for this session; pointer input only");
            reported_unavailable = true;
        }

        draw_feed(&mut view, session.last_frame());
        draw_energy_bar(&mut view, signal.energy, state);
        draw_centroid(&mut view, signal.x, signal.y);

        window.update_with_buffer(&view, VIEW_WIDTH, VIEW_HEIGHT)?;
    }

    Ok(())
}

/// Nearest-neighbor upscale of the 64x64 RGBA analysis frame into the view.
fn draw_feed(view: &mut [u32], frame: Option<&[u8]>) {
    let Some(frame) = frame else {
        view.fill(NO_FEED_COLOR);
        return;
    };

    let grid_width = GRID_WIDTH as usize;
    for (vy, row) in view.chunks_mut(VIEW_WIDTH).enumerate() {
        let gy = vy / VIEW_SCALE;
        for (vx, out) in row.iter_mut().enumerate() {
            let gx = vx / VIEW_SCALE;
            let i = (gy * grid_width + gx) * 4;
            *out = u32::from(frame[i]) << 16 | u32::from(frame[i + 1]) << 8 | u32::from(frame[i + 2]);
        }
    }
}

/// Horizontal bar along the bottom edge, filled proportionally to energy and
/// colored by the current interaction state.
fn draw_energy_bar(view: &mut [u32], energy: f32, state: InteractionState) {
    let color = match state {
        InteractionState::Idle => IDLE_COLOR,
        InteractionState::Unleashed => UNLEASHED_COLOR,
    };
    let filled = (energy * VIEW_WIDTH as f32) as usize;

    for y in (VIEW_HEIGHT - ENERGY_BAR_HEIGHT)..VIEW_HEIGHT {
        let row = &mut view[y * VIEW_WIDTH..(y + 1) * VIEW_WIDTH];
        for (x, out) in row.iter_mut().enumerate() {
            if x < filled {
                *out = color;
            }
        }
    }
}

/// Crosshair at the signal position, mapped from [-1, 1] to view pixels.
fn draw_centroid(view: &mut [u32], x: f32, y: f32) {
    let cx = ((x + 1.0) / 2.0 * VIEW_WIDTH as f32) as i32;
    let cy = ((y + 1.0) / 2.0 * VIEW_HEIGHT as f32) as i32;
    let arm = 10;

    for d in -arm..=arm {
        put_pixel(view, cx + d, cy, CENTROID_COLOR);
        put_pixel(view, cx, cy + d, CENTROID_COLOR);
    }
}

fn put_pixel(view: &mut [u32], x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 || x >= VIEW_WIDTH as i32 || y >= VIEW_HEIGHT as i32 {
        return;
    }
    view[y as usize * VIEW_WIDTH + x as usize] = color;
}

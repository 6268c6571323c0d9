use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use px_engine::core::{App, AppControl};
use px_engine::coords::ClientRect;
use px_engine::logging::{LoggingConfig, init_logging};
use px_engine::time::FrameTime;
use px_engine::window::{Runtime, RuntimeConfig};
use px_engine::{Color, Graphics};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

/// Scrolling XOR texture with a bouncing square on top.
struct Plasma {
    paused: bool,
    t: f64,
}

impl Plasma {
    fn square_origin(&self, g: &Graphics) -> (u32, u32) {
        let side = 16.0;
        let span_x = (g.width() as f64 - side).max(0.0);
        let span_y = (g.height() as f64 - side).max(0.0);
        let bounce = |v: f64, span: f64| {
            let p = (v % (2.0 * span)).abs();
            if p > span { 2.0 * span - p } else { p }
        };
        (
            bounce(self.t * 90.0, span_x) as u32,
            bounce(self.t * 65.0, span_y) as u32,
        )
    }
}

impl App for Plasma {
    fn on_window_event(&mut self, _id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state != ElementState::Pressed || event.repeat {
                return AppControl::Continue;
            }
            match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
                PhysicalKey::Code(KeyCode::Space) => {
                    self.paused = !self.paused;
                    log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
                }
                _ => {}
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, g: &mut Graphics, time: FrameTime) -> AppControl {
        if !self.paused {
            self.t += time.dt as f64;
        }
        let shift = (self.t * 40.0) as u32;

        for y in 0..g.height() {
            for x in 0..g.width() {
                let v = ((x + shift) ^ y) as u8;
                g.put_rgb(x, y, v, v.wrapping_mul(3) / 2, 255 - v);
            }
        }

        let (sx, sy) = self.square_origin(g);
        for y in sy..(sy + 16).min(g.height()) {
            for x in sx..(sx + 16).min(g.width()) {
                g.put_pixel(x, y, Color::WHITE);
            }
        }

        if time.frame % 600 == 0 {
            log::debug!("frame {} at {:.1}s", time.frame, time.elapsed);
        }
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        class_name: "px-demo".to_string(),
        title: "px demo (space: pause, esc: quit)".to_string(),
        client: ClientRect::from_origin_size(200, 150, WIDTH, HEIGHT),
        ..Default::default()
    };

    Runtime::run(config, Plasma { paused: false, t: 0.0 })
}

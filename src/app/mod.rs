pub mod config;

use std::time::{Duration, Instant};
use color_eyre::Result;
use crate::app::config::AppConfig;
use crate::renderer::Renderer;
use crate::renderer::contexts::device_ctx::RecordingDevice;

pub struct App {
    renderer: Renderer<RecordingDevice>,
    config: AppConfig,

    // State
    prev_frame_time: Instant,
    delta_time_secs: f32,
    recorded_commands: usize,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut renderer = Renderer::new(RecordingDevice::new(), config.render_config());

        let quad_program = renderer.load_program(&config.shader_path, &config.quad_program);
        renderer.set_quad_program(quad_program);
        let mesh_program = renderer.load_program(&config.shader_path, &config.mesh_program);
        renderer.set_mesh_program(mesh_program);

        if let Some(texture) = &config.quad_texture {
            let texture = renderer.load_texture_2d(texture);
            renderer.set_quad_texture(texture);
        }

        if let Some(model) = &config.model_path {
            if let Err(e) = renderer.load_model(model) {
                log::warn!("{}", e);
            }
        }

        Ok(Self {
            renderer,
            config,

            prev_frame_time: Instant::now(),
            delta_time_secs: 0.0,
            recorded_commands: 0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let interval = Duration::from_millis(self.config.frame_interval_ms);

        while self.config.frames == 0 || self.renderer.frame_index() < self.config.frames {
            self.tick()?;
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }

        log::info!(
            "Rendered {} frames, {} device commands recorded",
            self.renderer.frame_index(),
            self.recorded_commands,
        );
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        let curr_frame_time = Instant::now();
        self.delta_time_secs = curr_frame_time.duration_since(self.prev_frame_time).as_secs_f32();
        self.prev_frame_time = curr_frame_time;

        self.renderer.update();
        self.renderer.draw()?;

        let device = self.renderer.device_mut();
        self.recorded_commands += device.commands().len();
        device.clear_commands();

        log::trace!("Frame {} took {:.3}s", self.renderer.frame_index(), self.delta_time_secs);
        Ok(())
    }

    pub fn renderer(&self) -> &Renderer<RecordingDevice> {
        &self.renderer
    }
}

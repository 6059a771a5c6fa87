//! Windowed viewer for particlefall
//!
//! Renders the engine's quad geometry as an egui mesh and hot-reloads the
//! config file through a file watcher.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use particlefall_core::{FixedTimestep, RenderGeometry, Simulation, SimulationConfig};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

/// Viewer application
pub struct ViewerApp {
    config_path: Option<PathBuf>,
    simulation: Simulation,
    clock: FixedTimestep,
    last_frame: Instant,
    last_load_error: Option<String>,
    playing: bool,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        config: SimulationConfig,
        config_path: Option<PathBuf>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        // Watcher events carry absolute paths
        let config_path = config_path.map(|p| p.canonicalize().unwrap_or(p));

        let (tx, rx) = mpsc::channel();
        let watcher = config_path
            .as_deref()
            .and_then(|path| watch_config(path, tx));

        Self {
            config_path,
            clock: FixedTimestep::new(config.tick_rate_hz),
            simulation: Simulation::new(config),
            last_frame: Instant::now(),
            last_load_error: None,
            playing: true,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };

        match SimulationConfig::from_toml_file(path) {
            Ok(config) => {
                if config.tick_rate_hz != self.simulation.config().tick_rate_hz {
                    self.clock = FixedTimestep::new(config.tick_rate_hz);
                }
                self.simulation.reconfigure(config);
                self.last_load_error = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "keeping previous config");
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;

        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_) | notify::EventKind::Create(_),
                    paths,
                    ..
                }) => {
                    if let Some(ref config_path) = self.config_path {
                        needs_reload |= paths.iter().any(|p| p == config_path);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "file watcher error");
                }
            }
        }

        if needs_reload {
            self.reload_config();
        }
    }

    fn advance(&mut self) {
        let now = Instant::now();
        let frame_dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        if !self.playing {
            return;
        }

        for _ in 0..self.clock.consume_steps(frame_dt) {
            self.simulation.tick();
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                    self.clock.reset();
                }

                if ui.button("⏮ Reset").clicked() {
                    self.simulation.reset();
                }

                if ui.button("⏭ Step").clicked() {
                    self.simulation.tick();
                }

                ui.separator();

                let stats = self.simulation.engine().stats();
                ui.label(format!(
                    "Live: {}  Spawned: {}  Timed out: {}  Settled: {}",
                    self.simulation.engine().particle_count(),
                    stats.spawned,
                    stats.timed_out,
                    stats.settled,
                ));
            });
        });

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Config error: {}", error))
                        .color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let geometry = self.simulation.render_geometry();
                let color = cycle_color(self.simulation.engine().now() as f32);
                ui.painter().add(egui::Shape::mesh(build_mesh(&geometry, rect, color)));
            });

        // Draw first, then step: each frame shows the previous tick's state
        self.advance();

        if self.playing {
            ctx.request_repaint_after(self.clock.time_until_next_step());
        }
    }
}

fn watch_config(
    path: &Path,
    tx: mpsc::Sender<notify::Result<Event>>,
) -> Option<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .ok()?;

    // Editors often replace the file, so watch the directory holding it
    let target = path.parent().unwrap_or(path);
    if let Err(e) = watcher.watch(target, notify::RecursiveMode::NonRecursive) {
        tracing::warn!(path = %target.display(), error = %e, "config hot reload disabled");
        return None;
    }

    Some(watcher)
}

/// Map the [-1, 1] simulation square onto the largest square inside `rect`
fn build_mesh(geometry: &RenderGeometry, rect: egui::Rect, color: egui::Color32) -> egui::Mesh {
    let center = rect.center();
    let scale = rect.width().min(rect.height()) * 0.5;

    let mut mesh = egui::Mesh::default();
    mesh.reserve_vertices(geometry.vertex_count());
    mesh.reserve_triangles(geometry.quad_count() * 2);

    for point in geometry.points() {
        mesh.colored_vertex(center + egui::vec2(point.x * scale, -point.y * scale), color);
    }
    mesh.indices.extend_from_slice(&geometry.indices);

    mesh
}

/// Slowly shifting particle tint
fn cycle_color(t: f32) -> egui::Color32 {
    let channel = |v: f32| ((v * 0.5 + 0.5) * 255.0) as u8;
    egui::Color32::from_rgb(
        channel((t + PI).sin()),
        channel(t.cos()),
        channel(t.sin()),
    )
}

//! Box drop demo application
//!
//! Drops four unit boxes onto a static floor plane and steps the physics
//! world at a fixed 60 Hz, logging where the boxes end up.
//!
//! Usage: `box_drop [config.toml|config.ron]`

use std::sync::Arc;
use std::time::Duration;

use rust_physics::foundation::logging;
use rust_physics::prelude::*;
use thiserror::Error;

const FRAME_TIME: Duration = Duration::from_micros(16_667);
const FRAME_COUNT: usize = 300;
const REPORT_INTERVAL: usize = 60;

/// Application errors
#[derive(Error, Debug)]
enum AppError {
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A scene node with a physics body attached
struct Prop {
    name: &'static str,
    node: Transform,
    physics: PhysicsComponent,
}

struct BoxDropApp {
    world: PhysicsWorld,
    props: Vec<Prop>,
    debug_draw: Arc<DebugDrawQueue>,
}

impl BoxDropApp {
    fn new(config: PhysicsConfig) -> Result<Self, AppError> {
        let world = PhysicsWorld::with_config(config)?;
        let mut app = Self {
            world,
            props: Vec::new(),
            debug_draw: Arc::new(DebugDrawQueue::new()),
        };

        let crate_shape = Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(1.0, 1.0, 1.0))));
        let boxes = [
            ("box +x", Vec3::new(5.0, 2.0, 0.0)),
            ("box -x", Vec3::new(-5.0, 2.0, 0.0)),
            ("box +z", Vec3::new(0.0, 2.0, 5.0)),
            ("box -z", Vec3::new(0.0, 2.0, -5.0)),
        ];
        for (name, position) in boxes {
            app.spawn(name, Transform::from_position(position), Arc::clone(&crate_shape), 1.0, BodyFlags::empty())?;
        }

        let floor_shape = Arc::new(Shape::Plane(Plane::new(Vec3::zeros(), Vec3::y())));
        app.spawn("floor", Transform::identity(), floor_shape, 0.0, BodyFlags::STATIC)?;

        log::info!("Scene ready with {} bodies", app.world.body_count());
        Ok(app)
    }

    fn spawn(
        &mut self,
        name: &'static str,
        node: Transform,
        shape: Arc<Shape>,
        mass: f32,
        flags: BodyFlags,
    ) -> Result<(), AppError> {
        let physics = PhysicsComponent::attach(&self.world, &node, shape, mass, flags)?;
        self.props.push(Prop { name, node, physics });
        Ok(())
    }

    fn run(&mut self) {
        let mut step_timer = Stopwatch::new();
        let mut contact_total = 0;

        for frame in 1..=FRAME_COUNT {
            let params = FrameParams::new(FRAME_TIME).with_debug_draw(Arc::clone(&self.debug_draw));

            step_timer.start();
            let contacts = self.world.step(&params);
            step_timer.stop();

            contact_total += contacts.len();
            for prop in &mut self.props {
                prop.physics.late_update(&self.world, &mut prop.node);
            }

            // No renderer here; discard this frame's debug lines
            let debug_lines = self.debug_draw.drain().len();

            if frame % REPORT_INTERVAL == 0 {
                log::info!(
                    "Frame {frame}: {} contacts, {debug_lines} debug lines, {:.3} ms/step avg",
                    contacts.len(),
                    step_timer.elapsed_millis() / frame as f32
                );
                for prop in &self.props {
                    log::debug!("  {} at {:?}", prop.name, prop.node.position);
                }
            }
        }

        log::info!("Simulated {FRAME_COUNT} frames, {contact_total} contacts in total");
    }

    fn shutdown(self) {
        for prop in self.props {
            prop.physics.detach(&self.world);
            log::info!("{} came to rest at y = {:.3}", prop.name, prop.node.position.y);
        }
    }
}

fn load_config() -> Result<PhysicsConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading physics configuration from {path}");
            let config = PhysicsConfig::load_from_file(&path)?;
            Ok(config)
        }
        None => Ok(PhysicsConfig::default().with_debug_draw(true)),
    }
}

fn main() -> Result<(), AppError> {
    logging::init();
    log::info!("Starting box drop demo");

    let config = load_config()?;
    let mut app = BoxDropApp::new(config)?;
    app.run();
    app.shutdown();

    log::info!("Box drop demo completed successfully");
    Ok(())
}

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use uni_run::engine::game_loop::GameLoop;
use uni_run::engine::input::{Action, InputManager};
use uni_run::game::characters::RunnerConfig;
use uni_run::game::level::{Level, LevelLayout};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Uni-Run...");

    let mut level = Level::new(&LevelLayout::default(), RunnerConfig::default())?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut reported_death = false;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Uni-Run")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_event(button, state),
            Event::AboutToWait => {
                if input.player().just_pressed(Action::Quit) {
                    info!("Quit requested, shutting down...");
                    elwt.exit();
                    return;
                }

                let updates = game_loop.begin_frame();
                let snapshot = input.snapshot(Action::Jump);
                for step in 0..updates {
                    // Edges belong to the first fixed step of the frame only
                    let tick_input = if step == 0 {
                        snapshot
                    } else {
                        snapshot.without_edges()
                    };

                    if let Err(e) = level.tick(tick_input) {
                        error!("Simulation failed: {e:#}");
                        elwt.exit();
                        return;
                    }
                }

                // Keep edges until a fixed step has seen them
                if updates > 0 {
                    input.update();
                }

                for command in level.drain_audio() {
                    info!("Audio: {:?}", command);
                }

                if level.runner().is_dead() && !reported_death {
                    reported_death = true;
                    info!(
                        "Game over after {} ticks at {:?}",
                        level.ticks(),
                        level.runner_position()
                    );
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

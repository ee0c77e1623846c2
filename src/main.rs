// Declare modules directly in the binary crate root
pub mod arena;
pub mod patterns;
pub mod render;
pub mod state;

// Use types/functions from the declared modules
use crate::arena::Arena;
use crate::state::State;

use rand::Rng;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Constants
const ARENA_SIZE: usize = 250;
const WINDOW_SIZE: f64 = 500.0;
const INITIAL_SPAWNS: usize = 10_000;
/// 60 generations per second, the cadence the trail colors are tuned for.
const TICK_INTERVAL: Duration = Duration::from_micros(16_667);

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, arena: Arena) {
    let mut state = State::new(window, arena).await;
    let mut last_tick: Option<Instant> = None;

    event_loop
        .run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { window_id, ref event }
                    if window_id == state.window.id() =>
                {
                    match event {
                        WindowEvent::CloseRequested => {
                            window_target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(*new_size);
                        }
                        WindowEvent::RedrawRequested => {
                            // Advance the simulation at a fixed cadence; the
                            // arena is redrawn and presented every frame.
                            let advance = match last_tick {
                                Some(at) => at.elapsed() >= TICK_INTERVAL,
                                None => true,
                            };
                            if advance {
                                last_tick = Some(Instant::now());
                            }

                            match state.update_and_render(advance) {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::OutOfMemory) => {
                                    // Surface Lost or OOM: logged in update_and_render,
                                    // and resize() was called internally if Lost.
                                    log::warn!("Skipping frame due to surface error.");
                                    state.window.request_redraw();
                                }
                                Err(e @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated)) => {
                                    // Temporary errors. Log and skip frame, request redraw.
                                    log::warn!("Skipping frame due to surface {:?}", e);
                                    state.window.request_redraw();
                                }
                            }
                        }
                        _ => (),
                    }
                }
                Event::AboutToWait => {
                    state.window.request_redraw();
                }
                _ => (),
            }
        })
        .unwrap();
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().unwrap();

    let initial_size = winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE);

    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Conway")
            .with_inner_size(initial_size)
            .build(&event_loop)
            .unwrap(),
    );

    // Seeding is the host's job: the arena takes an already-chosen set of
    // live cells and never touches a random source itself.
    let mut rng = rand::rng();
    let seeds: Vec<usize> = (0..INITIAL_SPAWNS)
        .map(|_| rng.random_range(0..ARENA_SIZE * ARENA_SIZE))
        .collect();
    let arena = Arena::new(ARENA_SIZE, seeds);

    pollster::block_on(run(event_loop, window, arena));
}

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use static_cell::StaticCell;

use morse_game_core::controller::{game_task, GameController};
use morse_game_core::{GameConfig, GameError, WordBank};
use morse_game_firmware::*;

type Controller = GameController<'static, ConsoleHal, SmallRng>;

static CONTROLLER: StaticCell<Controller> = StaticCell::new();
static FINISHED: Signal<CriticalSectionRawMutex, Result<(), GameError>> = Signal::new();

#[embassy_executor::task]
async fn game(controller: &'static mut Controller) {
    let result = game_task(controller).await;
    FINISHED.signal(result);
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    println!("🔧 Morse decode game v{} starting...", morse_game_core::VERSION);

    let (x_axis, y_axis, button) = scripted_joystick(&DEMO_SCRIPT);
    let hal = ConsoleHal::new(x_axis, y_axis, button);
    let config = GameConfig::default();

    let controller = match GameController::new(hal, config, WordBank::builtin(), SmallRng::from_entropy()) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("❌ startup failed: {}", err);
            std::process::exit(1);
        }
    };
    println!("⚙️ tick {} ms, tone {} Hz", config.tick_ms, config.tone_hz);

    spawner.must_spawn(game(CONTROLLER.init(controller)));

    match FINISHED.wait().await {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("❌ game stopped: {}", err);
            std::process::exit(2);
        }
    }
}

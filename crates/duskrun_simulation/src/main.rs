//! Headless симуляция DUSKRUN
//!
//! Маленький уровень: платформа, враги (seeded placement), монеты, potion,
//! portal. Игрок идёт по скрипту: бег, прыжки, dash, атаки.
//! Первый аргумент - путь к JSON конфигу (опционально).

use bevy::prelude::*;
use rand::Rng;

use duskrun_simulation::world::{
    spawn_enemy, spawn_health_potion, spawn_pickup, spawn_platform, spawn_player, spawn_trigger_zone,
};
use duskrun_simulation::*;

const SEED: u64 = 42;
const TICKS: u32 = 1000;

fn load_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };

    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|text| SimulationConfig::from_json(&text).map_err(|err| err.to_string()));

    match loaded {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config {} rejected: {}", path, err));
            SimulationConfig::default()
        }
    }
}

fn player_script() -> ScriptedInput {
    let run = InputFrame::idle().with_axis(1.0);

    ScriptedInput::default()
        .then(InputFrame::idle(), 64)
        .then(run.clone(), 96)
        .then(run.clone().press(InputAction::Jump), 1)
        .then(run.clone(), 20)
        .then(run.clone().press(InputAction::Jump), 1)
        .then(run.clone(), 80)
        .then(run.clone().press(InputAction::Attack), 1)
        .then(run.clone(), 40)
        .then(run.clone().press(InputAction::Dash), 1)
        .then(run.clone(), 12)
        .then(run.clone().press(InputAction::Attack), 1)
        .then(run.clone(), 120)
        .then(InputFrame::idle().press(InputAction::Crouch), 1)
        .then(InputFrame::idle().with_axis(1.0), 60)
        .then(InputFrame::idle().release(InputAction::Crouch), 1)
        .then(run, 400)
}

fn build_level(app: &mut App, config: &SimulationConfig) -> Result<Entity, ConfigError> {
    let enemy_xs: Vec<f32> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..4).map(|_| rng.rng.gen_range(6.0..60.0)).collect()
    };

    let world = app.world_mut();
    let player = {
        let mut commands = world.commands();

        spawn_platform(&mut commands, Vec2::new(40.0, -1.0), Vec2::new(50.0, 0.5));
        let player = spawn_player(&mut commands, config, Vec2::new(0.0, 0.0))?;

        for x in enemy_xs {
            spawn_enemy(&mut commands, config, Vec2::new(x, 0.0))?;
        }
        for i in 0..5 {
            spawn_pickup(&mut commands, Pickup::Coin, Vec2::new(4.0 + i as f32 * 3.0, 0.0));
        }
        spawn_health_potion(&mut commands, config, Vec2::new(25.0, 0.0));
        spawn_trigger_zone(
            &mut commands,
            TriggerZone::GameEndPortal,
            Vec2::new(85.0, 1.0),
            Vec2::new(1.0, 2.0),
        );
        player
    };

    // Применить отложенные spawn'ы до первого тика
    world.flush();
    Ok(player)
}

fn main() {
    let config = load_config();
    log_info(&format!("Starting DUSKRUN headless simulation (seed: {})", SEED));

    let mut app = match create_stepped_app(SEED, config.clone()) {
        Ok(app) => app,
        Err(err) => {
            log_error(&format!("Cannot start simulation: {}", err));
            return;
        }
    };
    app.insert_resource(PlayerInput::new(player_script()));

    let player = match build_level(&mut app, &config) {
        Ok(player) => player,
        Err(err) => {
            log_error(&format!("Cannot build level: {}", err));
            return;
        }
    };

    for tick in 0..TICKS {
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let position = world.get::<Transform>(player).map(|t| t.translation.truncate());
            let health = world.get::<Health>(player).map(Health::current);
            let phase = world.get::<MotionState>(player).map(MotionState::phase);
            log_info(&format!(
                "Tick {}: player {:?} hp {:?} phase {:?}, coins {}",
                tick,
                position,
                health,
                phase,
                world.resource::<CoinCounter>().coins
            ));
        }

        if app.world().resource::<Time<Virtual>>().is_paused() {
            log_info(&format!("Game end reached at tick {}", tick));
            break;
        }
    }

    log_info("Simulation complete!");
}

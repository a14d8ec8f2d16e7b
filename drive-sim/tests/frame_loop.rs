use bevy::math::{IVec2, Vec3};
use drive_sim::{
    DriveConfig, DriveInput, DriveScript, DriveSim, GroundGrid, InputController, VehicleParams,
    VehicleState,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DT: f32 = 1.0 / 60.0;

fn random_input(rng: &mut StdRng) -> DriveInput {
    DriveInput {
        accelerate: rng.random_bool(0.4),
        brake: rng.random_bool(0.3),
        turn_left: rng.random_bool(0.3),
        turn_right: rng.random_bool(0.3),
    }
}

fn accelerate() -> DriveInput {
    DriveInput {
        accelerate: true,
        ..DriveInput::IDLE
    }
}

#[test]
fn one_second_of_throttle_reaches_fifteen() {
    let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
    for _ in 0..60 {
        sim.step(accelerate(), DT);
    }
    assert!((sim.vehicle().speed - 15.0).abs() < 1e-3);
}

#[test]
fn speed_and_ride_height_hold_for_random_drives() {
    let config = DriveConfig::default();
    let params = config.vehicle.params();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut sim = DriveSim::new(&config, 1280.0, 720.0);

    for _ in 0..5_000 {
        let dt = rng.random_range(0.0..0.05);
        sim.step(random_input(&mut rng), dt);
        let vehicle = sim.vehicle();
        assert!(vehicle.speed <= params.max_speed);
        assert!(vehicle.speed >= params.min_speed());
        assert_eq!(vehicle.position.y, params.ride_height);
    }
}

#[test]
fn coasting_decays_to_zero_without_overshoot() {
    let params = VehicleParams::default();
    let controller = InputController::new(params);

    for v0 in [10.0_f32, -7.5, 19.3] {
        let mut state = VehicleState {
            speed: v0,
            ..VehicleState::at_rest(params.ride_height)
        };
        let stop_frames = (v0.abs() / params.deceleration / DT).ceil() as usize;
        let mut previous = v0.abs();

        for frame in 0..stop_frames + 120 {
            controller.apply(&mut state, DriveInput::IDLE, DT);
            assert!(state.speed.abs() <= previous);
            assert!(state.speed == 0.0 || state.speed.signum() == v0.signum());
            previous = state.speed.abs();
            if frame > stop_frames {
                assert_eq!(state.speed, 0.0);
            }
        }
    }
}

#[test]
fn identical_histories_give_identical_states() {
    let config = DriveConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let history: Vec<_> = (0..2_000)
        .map(|_| (random_input(&mut rng), rng.random_range(0.0..0.04)))
        .collect();

    let run = || {
        let mut sim = DriveSim::new(&config, 1280.0, 720.0);
        for &(input, dt) in &history {
            sim.step(input, dt);
        }
        sim
    };
    let (a, b) = (run(), run());
    assert_eq!(a.vehicle(), b.vehicle());
    assert_eq!(a.ground().slots(), b.ground().slots());
    assert_eq!(a.ground().generation(), b.ground().generation());
    assert_eq!(a.camera(), b.camera());
}

#[test]
fn jump_to_twelve_and_a_half_rebuilds_once() {
    let mut grid = GroundGrid::new(15, 5.0, 0.1);
    grid.recenter(Vec3::ZERO, true);
    assert_eq!(grid.center(), Some(IVec2::ZERO));

    assert!(grid.recenter(Vec3::new(12.5, 0.25, 0.0), false));
    assert_eq!(grid.center(), Some(IVec2::new(3, 0)));
    assert_eq!(grid.generation(), 2);
}

#[test]
fn driving_straight_rebuilds_once_per_tile_crossing() {
    let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
    let mut rebuilds = 0;
    for _ in 0..600 {
        if sim.step(accelerate(), DT).grid_rebuilt {
            rebuilds += 1;
        }
    }

    let vehicle = sim.vehicle();
    let center = sim.ground().center().unwrap();
    assert_eq!(center.x, 0);
    assert_eq!(center, sim.ground().tile_at(vehicle.position));
    assert_eq!(rebuilds, center.y);
    assert_eq!(sim.ground().generation(), rebuilds as u64 + 1);
}

#[test]
fn camera_trails_the_car() {
    let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
    let turning = DriveInput {
        accelerate: true,
        turn_left: true,
        ..DriveInput::IDLE
    };
    for _ in 0..180 {
        sim.step(turning, DT);
    }

    let vehicle = sim.vehicle();
    let pose = sim.camera();
    let behind = pose.position - vehicle.position;
    assert!((behind.y - 4.0).abs() < 1e-4);
    // The horizontal offset points opposite the car's heading.
    let heading = vehicle.forward().with_y(0.0).normalize();
    assert!(behind.with_y(0.0).normalize().dot(heading) < -0.999);
}

#[test]
fn demo_script_ends_parked() {
    let script = DriveScript::demo();
    let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
    for (input, dt) in script.frames() {
        sim.step(input, dt);
    }
    assert_eq!(sim.vehicle().speed, 0.0);
    assert!(sim.vehicle().yaw() > 0.0);
}

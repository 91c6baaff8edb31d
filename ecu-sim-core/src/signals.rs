//! Signal group generators
//!
//! The emulated node broadcasts ten frames per cycle, one per signal group,
//! always in the same order. The order matters: `PressureLambdaSpeed`
//! derives road speed from the engine speed that `EngineVitals` wrote
//! moments earlier, and `GearIgnition` shifts against that road speed. Each
//! generator mutates the shared [`VehicleState`] and returns the finished
//! 8-byte payload.
//!
//! All noise is drawn through the caller-supplied RNG so runs can be made
//! reproducible by seeding.

use crate::codec::{pack_fields, pack_single};
use crate::state::{
    VehicleState, DUTY_CYCLE_MAX, DUTY_CYCLE_MIN, ENGINE_RPM_MAX, ENGINE_RPM_MIN,
    FUEL_PER_100KM_FLOOR, MANIFOLD_PRESSURE_MAX, MANIFOLD_PRESSURE_MIN, OIL_PRESSURE_MAX,
    OIL_PRESSURE_MIN, ROAD_SPEED_MAX, ROAD_SPEED_MIN,
};
use rand::Rng;
use std::time::Duration;

/// Switch bitfield: launch button (set while moving)
pub const SWITCH_LAUNCH_BUTTON: i32 = 0x01;
/// Switch bitfield: launch active (set above 80 km/h)
pub const SWITCH_LAUNCH_ACTIVE: i32 = 0x02;
/// Switch bitfield: traction control on (always set)
pub const SWITCH_TRACTION_ON: i32 = 0x04;
/// Switch bitfield: wet traction map (transient)
pub const SWITCH_TRACTION_WET: i32 = 0x08;
/// Switch bitfield: fuel pump on (always set)
pub const SWITCH_FUEL_PUMP: i32 = 0x10;
/// Switch bitfield: fan output on (water above 95 C)
pub const SWITCH_FAN_OUTPUT: i32 = 0x20;

/// A payload producer bound to one bus identifier slot
///
/// Variants are listed in broadcast order; [`SignalGroup::ALL`] is the
/// per-cycle evaluation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalGroup {
    /// Engine speed, throttle position, water temp, air temp
    EngineVitals,
    /// Manifold pressure, lambda, road speed, oil pressure
    PressureLambdaSpeed,
    /// Fuel pressure, oil temp, battery voltage, fuel consumption per hour
    FuelOilBattery,
    /// Gear, ignition advance, injection time, fuel consumption per 100km
    GearIgnition,
    /// Three analog channels plus cam advance
    AnalogInputs,
    /// Cam target, cam PWM, crank/cam sensor error counters
    CamControl,
    /// Secondary cam bank plus external 5V rail
    SecondaryCam,
    /// Injection duty cycle, lambda PID, switch bitfield
    DutyCycleSwitches,
    /// Four wheel speed channels
    WheelSpeeds,
    /// Right-bank lambda, single field
    RightLambda,
}

impl SignalGroup {
    /// Fixed per-cycle evaluation order
    pub const ALL: [SignalGroup; 10] = [
        SignalGroup::EngineVitals,
        SignalGroup::PressureLambdaSpeed,
        SignalGroup::FuelOilBattery,
        SignalGroup::GearIgnition,
        SignalGroup::AnalogInputs,
        SignalGroup::CamControl,
        SignalGroup::SecondaryCam,
        SignalGroup::DutyCycleSwitches,
        SignalGroup::WheelSpeeds,
        SignalGroup::RightLambda,
    ];

    /// Identifier offset from the configured base, 0-9
    pub fn id_offset(&self) -> u32 {
        match self {
            SignalGroup::EngineVitals => 0,
            SignalGroup::PressureLambdaSpeed => 1,
            SignalGroup::FuelOilBattery => 2,
            SignalGroup::GearIgnition => 3,
            SignalGroup::AnalogInputs => 4,
            SignalGroup::CamControl => 5,
            SignalGroup::SecondaryCam => 6,
            SignalGroup::DutyCycleSwitches => 7,
            SignalGroup::WheelSpeeds => 8,
            SignalGroup::RightLambda => 9,
        }
    }

    /// Human-readable label for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            SignalGroup::EngineVitals => "engine vitals",
            SignalGroup::PressureLambdaSpeed => "pressure/lambda/speed",
            SignalGroup::FuelOilBattery => "fuel/oil/battery",
            SignalGroup::GearIgnition => "gear/ignition",
            SignalGroup::AnalogInputs => "analog inputs",
            SignalGroup::CamControl => "cam control",
            SignalGroup::SecondaryCam => "secondary cam",
            SignalGroup::DutyCycleSwitches => "duty cycle/switches",
            SignalGroup::WheelSpeeds => "wheel speeds",
            SignalGroup::RightLambda => "right lambda",
        }
    }

    /// Run this group's generator against the shared state
    ///
    /// `elapsed` is the time since the scheduler started; it drives the
    /// slow pseudo-periodic component of the engine speed.
    pub fn generate(
        &self,
        state: &mut VehicleState,
        elapsed: Duration,
        rng: &mut impl Rng,
    ) -> [u8; 8] {
        match self {
            SignalGroup::EngineVitals => engine_vitals(state, elapsed, rng),
            SignalGroup::PressureLambdaSpeed => pressure_lambda_speed(state, rng),
            SignalGroup::FuelOilBattery => fuel_oil_battery(state, rng),
            SignalGroup::GearIgnition => gear_ignition(state, rng),
            SignalGroup::AnalogInputs => analog_inputs(rng),
            SignalGroup::CamControl => cam_control(rng),
            SignalGroup::SecondaryCam => secondary_cam(rng),
            SignalGroup::DutyCycleSwitches => duty_cycle_switches(state, rng),
            SignalGroup::WheelSpeeds => wheel_speeds(state, rng),
            SignalGroup::RightLambda => right_lambda(rng),
        }
    }
}

/// Engine speed drifts along a 10-second triangle sweep plus bounded noise
/// while the engine runs; a stopped engine holds its last value.
fn engine_vitals(state: &mut VehicleState, elapsed: Duration, rng: &mut impl Rng) -> [u8; 8] {
    if state.engine_running {
        let sweep = ((elapsed.as_secs_f64() % 10.0) - 5.0).abs() * 100.0;
        let rpm = ENGINE_RPM_MIN + rng.gen_range(0..=200) + sweep as i32;
        state.engine_speed_rpm = rpm.clamp(ENGINE_RPM_MIN, ENGINE_RPM_MAX);
    }

    let throttle = rng.gen_range(10..=90);
    state.water_temp_c = 80 + rng.gen_range(-5..=20);
    state.air_temp_c = 20 + rng.gen_range(-5..=15);

    pack_fields([
        state.engine_speed_rpm,
        throttle,
        state.water_temp_c,
        state.air_temp_c,
    ])
}

/// Manifold pressure and road speed are both derived from the engine speed
/// written earlier in the same cycle.
fn pressure_lambda_speed(state: &mut VehicleState, rng: &mut impl Rng) -> [u8; 8] {
    state.manifold_pressure_kpa = (state.engine_speed_rpm / 100 + rng.gen_range(-5..=5))
        .clamp(MANIFOLD_PRESSURE_MIN, MANIFOLD_PRESSURE_MAX);

    let lambda = 1000 + rng.gen_range(-50..=50);

    state.road_speed_kph = (state.engine_speed_rpm / 40 + rng.gen_range(-5..=5))
        .clamp(ROAD_SPEED_MIN, ROAD_SPEED_MAX);

    let oil_pressure = (200 + state.engine_speed_rpm / 20 + rng.gen_range(-10..=10))
        .clamp(OIL_PRESSURE_MIN, OIL_PRESSURE_MAX);

    pack_fields([
        state.manifold_pressure_kpa,
        lambda,
        state.road_speed_kph * 10,
        oil_pressure,
    ])
}

fn fuel_oil_battery(state: &mut VehicleState, rng: &mut impl Rng) -> [u8; 8] {
    let fuel_pressure = 300 + rng.gen_range(-20..=20);
    state.oil_temp_c = 80 + state.engine_speed_rpm / 100 + rng.gen_range(-5..=5);
    let per_hour = 50 + state.engine_speed_rpm / 100 + rng.gen_range(-10..=10);

    pack_fields([
        fuel_pressure,
        state.oil_temp_c,
        state.battery_decivolts,
        per_hour,
    ])
}

fn gear_ignition(state: &mut VehicleState, rng: &mut impl Rng) -> [u8; 8] {
    state.update_gear();

    let advance = 150 + rng.gen_range(-10..=10);
    let injection_time = 1000 + state.engine_speed_rpm / 10 + rng.gen_range(-50..=50);
    state.fuel_per_100km =
        (200 - state.road_speed_kph / 2 + rng.gen_range(-20..=20)).max(FUEL_PER_100KM_FLOOR);

    pack_fields([state.gear, advance, injection_time, state.fuel_per_100km])
}

/// Pure noise generator, no state dependency
fn analog_inputs(rng: &mut impl Rng) -> [u8; 8] {
    let ana1 = 2500 + rng.gen_range(-100..=100);
    let ana2 = 1500 + rng.gen_range(-100..=100);
    let ana3 = 800 + rng.gen_range(-50..=50);
    let cam_advance = 100 + rng.gen_range(-10..=10);

    pack_fields([ana1, ana2, ana3, cam_advance])
}

fn cam_control(rng: &mut impl Rng) -> [u8; 8] {
    let cam_target = 120 + rng.gen_range(-5..=5);
    let cam_pwm = 500 + rng.gen_range(-20..=20);
    let crank_errors = rng.gen_range(0..=2);
    let cam_errors = rng.gen_range(0..=1);

    pack_fields([cam_target, cam_pwm, crank_errors, cam_errors])
}

fn secondary_cam(rng: &mut impl Rng) -> [u8; 8] {
    let cam2_advance = 110 + rng.gen_range(-5..=5);
    let cam2_target = 115 + rng.gen_range(-5..=5);
    let cam2_pwm = 480 + rng.gen_range(-20..=20);
    let external_5v = 5000 + rng.gen_range(-100..=100);

    pack_fields([cam2_advance, cam2_target, cam2_pwm, external_5v])
}

fn duty_cycle_switches(state: &VehicleState, rng: &mut impl Rng) -> [u8; 8] {
    let duty_cycle = (state.engine_speed_rpm / 100 + rng.gen_range(0..=10))
        .clamp(DUTY_CYCLE_MIN, DUTY_CYCLE_MAX);
    let pid_target = 1000 + rng.gen_range(-20..=20);
    let pid_adjust = rng.gen_range(-50..=50);

    let mut switches = SWITCH_TRACTION_ON | SWITCH_FUEL_PUMP;
    if state.road_speed_kph > 0 {
        switches |= SWITCH_LAUNCH_BUTTON;
    }
    if state.road_speed_kph > 80 {
        switches |= SWITCH_LAUNCH_ACTIVE;
    }
    if rng.gen_bool(0.2) {
        switches |= SWITCH_TRACTION_WET;
    }
    if state.water_temp_c > 95 {
        switches |= SWITCH_FAN_OUTPUT;
    }

    pack_fields([duty_cycle, pid_target, pid_adjust, switches])
}

/// Each wheel carries its own small jitter around road speed x10; the driven
/// and undriven sides are biased slightly differently.
fn wheel_speeds(state: &VehicleState, rng: &mut impl Rng) -> [u8; 8] {
    let base = state.road_speed_kph * 10;
    let right_drive = base + rng.gen_range(-2..=2);
    let right_undriven = base + rng.gen_range(-3..=1);
    let left_drive = base + rng.gen_range(-1..=3);
    let left_undriven = base + rng.gen_range(-2..=2);

    pack_fields([right_drive, right_undriven, left_drive, left_undriven])
}

fn right_lambda(rng: &mut impl Rng) -> [u8; 8] {
    pack_single(980 + rng.gen_range(-30..=30))
}

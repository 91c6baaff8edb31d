//! Vehicle state model
//!
//! A single `VehicleState` instance is owned by the scheduler and passed by
//! mutable reference to every signal group, in order, each cycle. Later
//! groups read fields written by earlier groups in the same cycle (road
//! speed is derived from engine speed, gear from road speed), so the
//! evaluation order is a contract, not an implementation detail.

/// Engine speed domain (rpm)
pub const ENGINE_RPM_MIN: i32 = 800;
pub const ENGINE_RPM_MAX: i32 = 8000;

/// Road speed domain (km/h)
pub const ROAD_SPEED_MIN: i32 = 0;
pub const ROAD_SPEED_MAX: i32 = 200;

/// Manifold pressure domain (kPa)
pub const MANIFOLD_PRESSURE_MIN: i32 = 20;
pub const MANIFOLD_PRESSURE_MAX: i32 = 100;

/// Oil pressure domain (kPa)
pub const OIL_PRESSURE_MIN: i32 = 100;
pub const OIL_PRESSURE_MAX: i32 = 500;

/// Injection duty cycle domain (%)
pub const DUTY_CYCLE_MIN: i32 = 5;
pub const DUTY_CYCLE_MAX: i32 = 95;

/// Gear domain
pub const GEAR_MIN: i32 = 1;
pub const GEAR_MAX: i32 = 6;

/// Fuel consumption floor (L/100km x10)
pub const FUEL_PER_100KM_FLOOR: i32 = 50;

/// Shared mutable record of the engine/vehicle quantities
///
/// Initial values model an engine idling in first gear at standstill.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub engine_running: bool,
    /// Current gear, 1-6
    pub gear: i32,
    /// Road speed in km/h
    pub road_speed_kph: i32,
    /// Engine speed in rpm
    pub engine_speed_rpm: i32,
    /// Manifold absolute pressure in kPa
    pub manifold_pressure_kpa: i32,
    /// Water temperature in degrees C
    pub water_temp_c: i32,
    /// Oil temperature in degrees C
    pub oil_temp_c: i32,
    /// Intake air temperature in degrees C
    pub air_temp_c: i32,
    /// Battery voltage in tenths of a volt
    pub battery_decivolts: i32,
    /// Fuel consumption in L/100km x10
    pub fuel_per_100km: i32,
}

impl VehicleState {
    /// Create the initial state: engine idling at 800 rpm, gear 1, standstill
    pub fn new() -> Self {
        Self {
            engine_running: true,
            gear: 1,
            road_speed_kph: 0,
            engine_speed_rpm: ENGINE_RPM_MIN,
            manifold_pressure_kpa: 30,
            water_temp_c: 85,
            oil_temp_c: 90,
            air_temp_c: 25,
            battery_decivolts: 138,
            fuel_per_100km: 120,
        }
    }

    /// Advance the gear state machine against the current road speed
    ///
    /// Upshift-only: each threshold raises the gear only if the current gear
    /// is lower, so intermediate speeds never cause a downshift. Dropping
    /// below 5 km/h resets to first gear.
    pub fn update_gear(&mut self) {
        let speed = self.road_speed_kph;
        if speed > 80 && self.gear < 6 {
            self.gear = 6;
        } else if speed > 60 && self.gear < 5 {
            self.gear = 5;
        } else if speed > 40 && self.gear < 4 {
            self.gear = 4;
        } else if speed > 25 && self.gear < 3 {
            self.gear = 3;
        } else if speed > 10 && self.gear < 2 {
            self.gear = 2;
        } else if speed < 5 {
            self.gear = GEAR_MIN;
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = VehicleState::new();
        assert!(state.engine_running);
        assert_eq!(state.gear, 1);
        assert_eq!(state.road_speed_kph, 0);
        assert_eq!(state.engine_speed_rpm, 800);
        assert_eq!(state.battery_decivolts, 138);
    }

    #[test]
    fn test_gear_upshifts_at_thresholds() {
        let mut state = VehicleState::new();

        state.road_speed_kph = 11;
        state.update_gear();
        assert_eq!(state.gear, 2);

        state.road_speed_kph = 26;
        state.update_gear();
        assert_eq!(state.gear, 3);

        state.road_speed_kph = 41;
        state.update_gear();
        assert_eq!(state.gear, 4);

        state.road_speed_kph = 61;
        state.update_gear();
        assert_eq!(state.gear, 5);

        state.road_speed_kph = 81;
        state.update_gear();
        assert_eq!(state.gear, 6);
    }

    #[test]
    fn test_gear_jumps_to_highest_passed_threshold() {
        // From standstill straight to 70 km/h: the chain picks gear 5
        let mut state = VehicleState::new();
        state.road_speed_kph = 70;
        state.update_gear();
        assert_eq!(state.gear, 5);
    }

    #[test]
    fn test_gear_never_downshifts_at_intermediate_speeds() {
        let mut state = VehicleState::new();
        state.gear = 6;

        for speed in 5..=80 {
            state.road_speed_kph = speed;
            state.update_gear();
            assert_eq!(state.gear, 6, "gear dropped at {} km/h", speed);
        }
    }

    #[test]
    fn test_gear_resets_below_5_kph() {
        let mut state = VehicleState::new();
        state.gear = 6;
        state.road_speed_kph = 4;
        state.update_gear();
        assert_eq!(state.gear, 1);
    }

    #[test]
    fn test_gear_monotonic_while_speed_rises() {
        let mut state = VehicleState::new();
        let mut previous = state.gear;
        for speed in 0..=200 {
            state.road_speed_kph = speed;
            state.update_gear();
            if speed >= 5 {
                assert!(state.gear >= previous, "downshift at {} km/h", speed);
            }
            previous = state.gear;
        }
        assert_eq!(state.gear, 6);
    }
}

//! System-wide constants for the SRM workspace.
//!
//! Single source of truth for tolerances, capacity limits and defaults.
//! Imported by all crates — no duplication permitted.

use static_assertions::const_assert;

/// Tolerance (degrees) by which two angles are judged equal.
pub const EPSILON: f64 = 0.000001;

/// One full rotor revolution in degrees.
pub const FULL_REVOLUTION_DEG: f64 = 360.0;

/// Maximum number of stator coils a model can hold.
pub const MAX_COILS: usize = 128;

/// Maximum number of rotor poles a model can hold.
pub const MAX_POLES: usize = 128;

/// Smallest coil + pole total for which stepping is defined.
pub const MIN_COMPONENTS: usize = 3;

/// Step angles are compared after rounding to this many decimals.
pub const STEP_ANGLE_DECIMALS: i32 = 3;

/// Default overall motor diameter.
pub const DEFAULT_OUTER_DIAMETER: f64 = 30.0;

/// Default coil (and pole) diameter.
pub const DEFAULT_COIL_DIAMETER: f64 = 6.0;

/// Default number of stator coils.
pub const DEFAULT_COIL_COUNT: usize = 3;

/// Default number of rotor poles.
pub const DEFAULT_POLE_COUNT: usize = 4;

/// Default upper bound for both counts in a sweep.
pub const DEFAULT_SWEEP_MAX: usize = 12;

/// Default application configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "srm.toml";

/// Default session file (last-used input values).
pub const DEFAULT_SESSION_FILE: &str = ".srm_session";

const_assert!(DEFAULT_COIL_COUNT >= 1 && DEFAULT_COIL_COUNT <= MAX_COILS);
const_assert!(DEFAULT_POLE_COUNT >= 1 && DEFAULT_POLE_COUNT <= MAX_POLES);
const_assert!(DEFAULT_SWEEP_MAX <= MAX_COILS && DEFAULT_SWEEP_MAX <= MAX_POLES);

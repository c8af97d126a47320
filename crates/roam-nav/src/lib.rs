//! Navigation decision engine: sensors, collision checks, kinematics, the recovery state
//! machine, and the per-tick orchestrator that sequences them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod collision;
pub mod kinematics;
pub mod machine;
pub mod overlay;
pub mod sensor;
pub mod sim;
pub mod tick;

pub use collision::{CollisionDetector, Violation};
pub use kinematics::MotionCommand;
pub use machine::{Decision, NavigationStateMachine, RecoveryCause, Transition};
pub use overlay::{Overlay, SensorOverlay, HEADING_INDICATOR_LENGTH};
pub use sensor::{segment_intersects_rect, SensorArray, SensorRay, SensorReadings};
pub use sim::{initialize, Simulation};
pub use tick::{tick, TickOrchestrator, TickReport};

//! Engine-independent climbing core: surface probes, the motion driver contract and
//! the climb state machine.

mod config;
mod controller;
mod motion;
mod probe;

#[cfg(test)]
mod testing;

pub use config::ClimbConfig;
pub use controller::{ClimbController, ClimbEvent, ClimbPhase, ClimbTarget, DetachReason};
pub use motion::{
    InterpolatedMove, LocomotionMode, MotionDriver, MoveHandle, Pose, ease_in_out, facing,
};
pub use probe::{ProbeOutcome, ProbeRig, SurfaceHit, SurfaceQuery, probe_surface};

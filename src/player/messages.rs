use bevy::prelude::*;

use crate::climb::{ClimbEvent, DetachReason};

/// Climb controller events for a single character.
///
/// Consumers subscribe with `MessageReader<ClimbMessage>` to trigger animation,
/// sound, or other feedback (e.g. letting go of a wall on `Detached`).
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ClimbMessage {
    pub entity: Entity,
    pub event: ClimbEvent,
}

/// Logs climb messages: mode changes at info level, bookkeeping at debug level.
pub fn log_climb_messages(mut reader: MessageReader<ClimbMessage>) {
    for ClimbMessage { entity, event } in reader.read() {
        match event {
            ClimbEvent::ClimbStarted { target } => {
                info!("{entity}: climbing, moving to {}", target.translation);
            }
            ClimbEvent::Detached { reason } => {
                let reason = match reason {
                    DetachReason::Released => "released",
                    DetachReason::SurfaceLost => "surface lost",
                    DetachReason::ToppedOut => "topped out",
                };
                info!("{entity}: detached from wall ({reason})");
            }
            ClimbEvent::VaultedLedge { position } => {
                info!("{entity}: vaulted onto ledge at {position}");
            }
            ClimbEvent::ClimbScheduled { target } => {
                debug!("{entity}: climb scheduled at {}", target.point);
            }
            ClimbEvent::ClimbCancelled => debug!("{entity}: pending climb cancelled"),
            ClimbEvent::ClimbSettled => debug!("{entity}: settled on wall"),
            ClimbEvent::Jumped => debug!("{entity}: jumped"),
            ClimbEvent::Landed => debug!("{entity}: landed"),
        }
    }
}

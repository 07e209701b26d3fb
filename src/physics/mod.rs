mod layers;
mod plugin;
mod rays;

pub use layers::GameLayer;
pub use plugin::PhysicsPlugin;
pub use rays::WorldRays;

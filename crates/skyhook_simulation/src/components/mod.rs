//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовый актор (enabled, kind), back-reference тела, Retired маркер
//! - projectile: данные брошенного снаряда (launch point, range, damage)
//! - obstacle: препятствие с опциональным projectile-collision handler

pub mod actor;
pub mod obstacle;
pub mod projectile;

// Re-exports для удобного импорта
pub use actor::*;
pub use obstacle::*;
pub use projectile::*;

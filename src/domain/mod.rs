//! Entity rows, aggregates and the kind topology

pub mod aggregates;
pub mod entities;
pub mod ids;
pub mod kind;

pub use aggregates::*;
pub use entities::*;
pub use ids::Id;
pub use kind::EntityKind;

//! Concurrent aggregate assembly
//!
//! Every build call starts one resolver task per entity kind reachable
//! from the requested root. Resolvers talk over bounded channels: a
//! parent fetches its rows, fans one request per declared child kind out
//! for every row, and delivers the assembled aggregates into the slot its
//! own parent handed it. A shared completion counter tells the call when
//! the last transitively requested branch has been handled.
//!
//! ```text
//! Engine::build_recipes_aggregate
//!   └─ Recipe ─┬─ RecipeCategory ── Category ─┬─ Picture ── AltName
//!              │                              └─ AltName
//!              ├─ RecipeIngredient ─┬─ RecipeMeasure ─┬─ Unit
//!              │                    │                 └─ AltName
//!              │                    ├─ Ingredient
//!              │                    ├─ Picture
//!              │                    └─ AltName
//!              ├─ RecipeProcess ─┬─ Picture
//!              │                 └─ AltName
//!              ├─ Picture
//!              └─ AltName
//! ```

mod completion;
pub mod compose;
mod fanout;
mod node;
mod orchestrator;
mod request;
mod resolver;
mod router;
mod scope;
mod topology;

pub use compose::compose;
pub use orchestrator::{Built, Engine};
pub use request::AggregateQuery;

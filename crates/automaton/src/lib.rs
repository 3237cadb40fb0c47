//! Lifelight automaton - colored Game of Life for small LED matrices.
//!
//! A fixed-size toroidal grid of cells, each dead or one of K live colors,
//! advanced one generation per tick. Newborn cells inherit a color from their
//! neighbors. When the grid drifts toward stasis, a [`Reseeder`] injects new
//! random life into an empty region.
//!
//! ```
//! use lifelight_automaton::{Automaton, AutomatonConfig};
//! use rand::SeedableRng;
//!
//! let rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut life = Automaton::new(AutomatonConfig::default(), rng).unwrap();
//! life.randomize();
//! let cells = life.tick();
//! assert_eq!(cells.len(), 32 * 32);
//! ```

pub mod cell;
pub mod coords;
pub mod error;
pub mod render;
pub mod seeding;
pub mod simulation;
pub mod surface;
pub mod world;

pub use cell::{Cell, DEFAULT_LIVE_COLORS, MAX_LIVE_COLORS, random_cell};
pub use coords::{GridSize, NEIGHBOR_COUNT, Neighbors, coords, index, neighbors};
pub use error::AutomatonError;
pub use render::{ColorScheme, PixelSink, Rgba};
pub use seeding::{Reseeder, SeedConfig, SeedOutcome};
pub use simulation::{Neighborhood, apply_rules, neighborhood};
pub use surface::{RgbaSurface, Surface};
pub use world::{Automaton, AutomatonConfig};

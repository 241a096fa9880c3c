//! Procedural sky scene engine.
//!
//! Everything in here is a pure function of its inputs. The host owns the cloud
//! vector and the elapsed time, calls [`advance_clouds`] once per tick and
//! [`compute_scene`] once per render.

pub mod clouds;
pub mod color;
pub mod compose;
pub mod density;
pub mod encode;
pub mod hash;
pub mod terrain;

pub use clouds::{Cloud, advance_clouds, generate_initial_clouds};
pub use color::{Alpha, ColorParseError, Rgb, lerp_color, parse_color, rgb_with_alpha};
pub use compose::{Cell, CellColor, Grid, Palette, SceneConfig, compute_row, compute_scene};
pub use density::{DensitySample, cloud_density_at};
pub use encode::{grid_to_html, grid_to_text};
pub use hash::hash;
pub use terrain::{ground_row, hill_height};

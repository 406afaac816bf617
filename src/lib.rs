//! # Vyuha-Nav: Junction-Graph Maze Navigation
//!
//! A maze-exploring, self-localizing navigation controller for a small
//! wheeled robot. The robot follows corridors, detects junctions with
//! distance sensors, builds a topological map of the maze as it explores,
//! and — once exploration is complete — serves arbitrary "go to this
//! previously-seen junction" requests via shortest paths over the map it
//! built.
//!
//! ## Architecture
//!
//! The library is organized into three layers, leaf-first:
//!
//! - [`core`]: tolerant geometry primitives ([`Coord`], [`Position`],
//!   [`Orientation`])
//! - [`graph`]: the junction graph ([`JunctionGraph`]) — node arena,
//!   symmetric distance matrix, Floyd–Warshall all-pairs shortest paths
//!   with predecessor-based path reconstruction
//! - [`nav`]: the tick-driven exploration/navigation state machine
//!   ([`Navigator`]), parameterized over an actuation/sensing backend
//!   ([`Driver`])
//!
//! ## Data Flow
//!
//! ```text
//!  ┌───────────────┐   tick()    ┌────────────────┐
//!  │ External loop │────────────►│   Navigator    │
//!  │ (scheduler /  │             │ (state machine)│
//!  │  sim frame)   │             └───┬────────┬───┘
//!  └───────────────┘     advance()   │        │  push_node()
//!                        pivot_*()   │        │  add_distance()
//!                        measure_*() │        │  floyd_warshall()
//!                                    ▼        ▼  path()
//!                            ┌──────────┐  ┌───────────────┐
//!                            │  Driver  │  │ JunctionGraph │
//!                            │ (robot / │  │  (map + APSP) │
//!                            │   sim)   │  └───────────────┘
//!                            └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vyuha_nav::{Driver, NavConfig, Navigator};
//!
//! let mut robot = MyRobot::connect()?;   // implements Driver
//! let mut nav = Navigator::new(NavConfig::default());
//!
//! // Exploration: one bounded unit of work per tick.
//! while !nav.is_waiting() {
//!     nav.tick(&mut robot);
//!     if let Some(node) = nav.poll_new_node() {
//!         println!("discovered junction at {:?}", node.position());
//!     }
//! }
//!
//! // Free play: send the robot back to a junction it has seen.
//! nav.set_goal(Some(goal_position));
//! loop {
//!     nav.tick(&mut robot);
//! }
//! ```
//!
//! ## Coordinate Frame
//!
//! The maze lives in a screen-oriented world frame: X grows east, Y
//! grows south, so [`Orientation::North`] points toward −Y. All
//! distances are in the backend's odometer units.
//!
//! ## Concurrency
//!
//! Single-threaded and non-blocking: [`Navigator::tick`] performs one
//! motion primitive, one sensing decision, or one state transition and
//! returns. Waiting (e.g. for a goal) is expressed by remaining in a state
//! across ticks, never by blocking.

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod nav;

pub use crate::core::{Coord, Orientation, Position};
pub use config::NavConfig;
pub use error::{Result, VyuhaError};
pub use graph::{ExitMap, Junction, JunctionGraph, NodeId};
pub use nav::{Driver, NavState, Navigator, SensorDirection};

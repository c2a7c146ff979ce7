//! Core library for the `airdash` air-quality dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - The client for the dashboard data service
//! - Shared domain models (queries, dashboard snapshots, personas)
//! - Rendering seams and the dashboard controller that drives them
//!
//! It is used by `airdash-cli`, but any front end that implements the
//! rendering traits can drive a [`DashboardController`].

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod persona;
pub mod render;
pub mod service;

pub use config::Config;
pub use controller::{ControllerState, DashboardController};
pub use error::{DashboardError, ServiceError, UserInputError};
pub use model::{DashboardResponse, Query, QueryInput};
pub use persona::Persona;
pub use service::{DashboardService, HttpDashboardService};

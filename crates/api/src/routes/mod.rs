//! API Route Handlers

pub mod predict;

//! # feincms3-testapp
//!
//! Example pages and articles wired up with the feincms3-rs plugins.
//!
//! - [`models`] - `Page`, `PagePlugin`, `Article`, templates and apps
//! - [`apps`] - Mounting apps on pages and `reverse_app`
//! - [`admin`] - The page content editor
//! - [`demo`] - A small bilingual demo site
//! - [`views`] - Page rendering
//! - [`cli`] - The `feincms3-testapp` command

pub mod admin;
pub mod apps;
pub mod cli;
pub mod demo;
pub mod models;
pub mod views;

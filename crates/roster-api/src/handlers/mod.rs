//! HTTP handlers, grouped by area

pub mod auth;
pub mod company;
pub mod employee;
pub mod health;
pub mod saas;

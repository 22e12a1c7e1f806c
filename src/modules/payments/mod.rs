//! Payment allocation engine shared by vendor payments and customer collections

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

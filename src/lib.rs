// Library exports for the gym catalog service

pub mod api;
pub mod config;
pub mod models;
pub mod services;

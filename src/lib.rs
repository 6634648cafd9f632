//! Backend de inventario de vehículos
//!
//! API REST con autenticación por token y una consola administrativa
//! renderizada en el servidor, sobre PostgreSQL.

pub mod admin;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

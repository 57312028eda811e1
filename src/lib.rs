// src/lib.rs

//! growthlist crawler library
//!
//! Paginates an article listing, visits every article and turns its funding
//! table into [`models::CompanyRecord`]s persisted as JSON.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

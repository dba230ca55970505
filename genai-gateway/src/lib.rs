//! genai-gateway: relays text, image, document and audio prompts to a
//! generative model and returns the model's text.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

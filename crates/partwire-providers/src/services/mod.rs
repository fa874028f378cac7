//! Hosted services

mod greeting_service;
mod my_service;

pub use greeting_service::GreetingService;
pub use my_service::MyService;

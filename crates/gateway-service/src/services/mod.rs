pub mod access_gateway;
pub mod auth_service;
pub mod authorization_service;
pub mod token_service;

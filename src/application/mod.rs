// Application layer - Use cases and the seams they depend on
pub mod command;
pub mod dashboard_repository;
pub mod dispatcher;
pub mod error;
pub mod host_gateway;
pub mod lovelace_service;
pub mod reload_notifier;

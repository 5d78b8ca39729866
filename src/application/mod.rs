// Application layer - Use cases and the seams to external services
pub mod analysis_client;
pub mod conversation_controller;
pub mod dashboard_registry;
pub mod frame_viewer;
pub mod shell;
pub mod shell_service;
pub mod text_generator;

#[cfg(test)]
pub mod test_support;

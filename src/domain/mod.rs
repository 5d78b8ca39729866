// Domain layer - Plain data with no I/O
pub mod conversation;
pub mod dashboard;
pub mod locale;
pub mod telemetry;

// Application layer: CLI command handlers wired to the core services.

pub mod commands;

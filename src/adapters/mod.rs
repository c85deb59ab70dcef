// Adapters layer: concrete implementations for external systems (input files, templates, mail).

pub mod log_only;
pub mod participants;
pub mod smtp;
pub mod template;

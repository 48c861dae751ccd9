//! Core use-case services.
//!
//! # Responsibility
//! - Apply create/delete commands to in-memory collections.
//! - Write every effective mutation through to the key-value store.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod collection_service;
pub mod command;
pub mod schedule_service;
pub mod task_service;

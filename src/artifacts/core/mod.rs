//! Shared configuration types

pub mod config;

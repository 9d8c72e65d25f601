//! # Active Worlds Action Core
//!
//! Domain types shared by the action string parser and its consumers.
//!
//! An action string binds [`Command`](command::Command)s to
//! [`Trigger`](trigger::Trigger)s. The parser produces an
//! [`ActionMap`](action::ActionMap), which maps every trigger to its ordered,
//! deduplicated list of commands. Every output type implements
//! [`serde::Serialize`] and produces the `{ "commandType": ..., ... }` record
//! shape expected by object behavior engines.

pub mod action;
pub mod color;
pub mod command;
pub mod error;
pub mod geometry;
pub mod trigger;

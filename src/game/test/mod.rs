//! Test module for the game engine
//!
//! Tests drive a [Game](super::Game) through its public operations and inspect the effects it
//! queues, organised by area of the rules.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod legislative;
pub mod reconnection;
pub mod test_utils;

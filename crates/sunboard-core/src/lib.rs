//! # Sunboard Core Library
//!
//! This library provides the status and ordering engine behind the
//! Sunboard world-exchange dashboard: given a read-only exchange
//! catalogue and a caller-supplied instant, it answers which exchanges
//! are open, in which session phase, how long until their next
//! transition, and how they rank globally by sunrise.
//!
//! ## Architecture
//!
//! - **Solar calculator**: a pure `date x latitude x longitude` to UTC
//!   sunrise function using a simplified astronomical model; polar
//!   day/night yields `None`, never an error
//! - **Schedule resolver**: parses the compact session-template grammar,
//!   workday specs, and date exceptions, then evaluates open/closed
//!   status at an instant
//! - **Ordering engine**: ranks the whole catalogue by sunrise or
//!   longitude and splits the sequence into two convergent display rails
//! - **Catalogue**: JSON/TOML loading with per-record degradation --
//!   one bad entry renders permanently closed or unranked instead of
//!   failing the board
//!
//! Every component is a pure, synchronous function of its inputs: the
//! caller passes the current instant explicitly, nothing reads the wall
//! clock, and calls are freely repeatable and concurrent. Rendering,
//! transport, and catalogue curation live outside this crate.
//!
//! ## Key Components
//!
//! - [`Catalogue`]: the parsed, immutable exchange table
//! - [`solar::sunrise_utc`]: the sunrise calculator
//! - [`schedule::resolve_status`]: the open/closed resolver
//! - [`ordering::order`]: the global ranking and rail split

pub mod catalogue;
pub mod error;
pub mod ordering;
pub mod schedule;
pub mod solar;

pub use catalogue::{Catalogue, Coordinates, Diagnostic, Exchange, ExchangeRecord};
pub use error::CatalogueError;
pub use ordering::{order, BoardLayout, OrderingKey, Rail, Rails, SortKey, SortedExchange};
pub use schedule::{
    resolve_status, EventLabel, NextEvent, Phase, ScheduleTemplate, Session, StatusPhase,
    StatusRecord, WorkdaySpec,
};
pub use solar::sunrise_utc;

//! Spaceboard - the core model for a spatial note canvas.
//!
//! Users organize free-floating notes into named, reorderable canvases and
//! zoom a single note into an enlarged editor. This crate implements the
//! identity/ordering model, the drag-interaction state machine, and the
//! focus-transition coordinator; rendering and persistence I/O live in the
//! host application.
//!
//! Module map:
//! - `types` - identifiers, geometry, notes, drag modes
//! - `registry` - ordered canvas collection with stable ids and note trash
//! - `input` - the drag state machine and settle physics
//! - `focus` - enlarged-editor sessions and title streaming
//! - `workspace` - façade wiring registry, engine, and focus together
//! - `spatial_index` - R-tree over note bounds for hit testing and landing
//! - `persist` - the external persistence collaborator's data layout
//! - `settings` / `settings_watcher` - tunable physics with hot-reload
//! - `perf` / `logging` - instrumentation and tracing setup

pub mod constants;
pub mod error;
pub mod focus;
pub mod input;
pub mod logging;
pub mod perf;
pub mod persist;
pub mod registry;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;
pub mod workspace;

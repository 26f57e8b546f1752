// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: the drag-and-snap motion model behind Loupe's photo detail panel.
//!
//! # Role in Loupe
//! The full-screen photo view has a bottom sheet with the photo's capture
//! time and coordinates. It opens from a button or by dragging it up, and
//! its position drives a backdrop dim and a header fade. `loupe-core` owns
//! that motion model and nothing else: no rendering, no storage.
//!
//! # Primary responsibilities
//! - **GestureTracker**: cumulative drag translation to clamped offsets.
//! - **PanelOffsetStore**: the one place the offset lives.
//! - **SnapResolver**: which rest state a released drag lands in.
//! - **MotionDriver**: spring + fade snaps with interruption handling.
//! - **VisualRanges**: backdrop and header opacity from the offset.
//! - **PanelController**: the state machine tying those together.
//!
//! # How it fits in the system
//! The host view calls [`PanelController::handle_drag`] from its input
//! layer, [`PanelController::tick`] once per frame, and paints from
//! [`PanelController::frame`]. Panel height comes from a
//! [`layout::LayoutProvider`]; photo data from a [`photo::PhotoSource`].

pub mod animation;
pub mod config;
pub mod controller;
pub mod gesture;
pub mod layout;
pub mod motion;
pub mod offset;
pub mod photo;
pub mod snap;
pub mod visuals;

pub use config::{ConfigError, PanelConfig};
pub use controller::{PanelController, PanelEvent, PanelFrame, PanelState};
pub use gesture::{DragEvent, GestureTracker};
pub use layout::{LayoutProvider, ResponsiveLayout, Viewport};
pub use motion::{MotionDriver, SettleCallback};
pub use offset::PanelOffsetStore;
pub use snap::{RestState, SnapResolver};
pub use visuals::{DerivedVisuals, VisualRanges};

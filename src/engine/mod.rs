//! The interactive scheduling engine: windowing, conflicts, and the
//! optimistic drag/commit cycle. Nothing here draws or persists.

pub mod conflict;
pub mod drag;
pub mod overlay;
pub mod throttle;
pub mod viewport;

pub use conflict::{conflicts_by_resource, detect_conflicts, ConflictReport};
pub use drag::{
    CommitEvent, CommitFailure, CommitGateway, CommitReply, CommitRequest, DragController,
    DragMode, DragRefusal, DragState, EndOutcome, ItemPhase,
};
pub use overlay::{CommitTicket, OptimisticOverlay, OptimisticPatch};
pub use throttle::{FrameThrottle, ViewportTracker};
pub use viewport::{
    compute_visible_window, index_items, visible_bars, BarGeometry, BarShape, Overscan, Viewport,
    VisibleBar, VisibleWindow, WindowParams,
};

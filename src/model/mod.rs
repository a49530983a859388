pub mod calendar;
pub mod item;
pub mod timeline;

pub use item::{DateSpan, ItemStatus, Schedule, ScheduleItem};
pub use timeline::{
    compute_filtered_timeline, compute_timeline, FlatRow, GroupBy, ItemFilter, Padding, Row,
    Timeline, TimelineRange, ZoomLevel,
};

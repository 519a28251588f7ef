//! Result rendering module
//!
//! Pure windowing over ordered result lists plus every user-visible text
//! template: result lines, pages, durations, times, and itineraries.

pub mod text;
pub mod window;

pub use text::{
    format_duration, format_time, render_itinerary, render_segment_page, render_segments,
    render_thread_page, render_threads,
};
pub use window::{paginate, Page};

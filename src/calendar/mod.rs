//! Pure calendar computation: local-date handling, the weekly day-slot
//! view, and the multi-week history. No IO, no clocks — callers pass
//! `today` in so the same code serves requests and tests.

pub mod aggregate;
pub mod dates;
pub mod week;

pub use aggregate::build_multi_week_view;
pub use week::{build_week_view, DaySlot, SlotStatus, StreakDays, WeekView};

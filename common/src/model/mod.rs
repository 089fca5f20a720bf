pub mod notification;
pub mod timetable;
pub mod upload;

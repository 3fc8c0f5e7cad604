pub mod chart_canvas;
pub mod clock;
pub mod log_form;
pub mod notifications;
pub mod recommendations;
pub mod student_info;
pub mod student_list;

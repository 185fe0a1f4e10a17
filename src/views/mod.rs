//! Page state for the dashboard screens, independent of HTML rendering

pub mod reports;
pub mod shell;
pub mod visitor_form;
pub mod visitor_list;

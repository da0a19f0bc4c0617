#[cfg(test)]
pub mod hid_report_test;
#[cfg(test)]
pub mod state_test;

pub mod driver;
pub mod event;
pub mod hid_report;
pub mod state;

//! Interactive desk: channel list on the left, form or contact details on the right.

mod app;
mod screens;

pub use app::run;

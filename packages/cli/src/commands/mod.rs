pub mod check;
pub mod fmt;
pub mod templates;

pub use check::{check, CheckArgs};
pub use fmt::{fmt, FmtArgs};
pub use templates::{new, templates, NewArgs};

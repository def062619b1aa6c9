pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, success, summary_row, warn};
pub use table::{summary_table, TableBuilder};
pub use theme::{theme, Theme};

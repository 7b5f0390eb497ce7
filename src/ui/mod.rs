pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, is_quiet, snippet_line, snippet_summary, success, warn};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};

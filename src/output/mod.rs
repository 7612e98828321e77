pub mod formatter;

pub use formatter::{
    format_constructor_table, format_constructor_tsv, format_driver_table, format_driver_tsv,
    should_use_colors,
};

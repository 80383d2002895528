mod names;
mod range;

pub use names::{MAX_COLUMN, column_index, column_label, column_name};
pub use range::{ColumnRange, resolve};

pub mod csv_io;
pub mod normalize;
pub mod table;

pub use table::Table;

pub mod exec;
pub mod load;
pub mod output;

pub use exec::{commits, select, story, summary, units};
pub use load::{load_dataset, Dataset};

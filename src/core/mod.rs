pub mod codec;
pub mod filter;
pub mod value;
pub mod versioning;

pub use crate::utils::error::Result;
pub use codec::{dump, dump_as, load, load_value, Mode, Source};
pub use filter::{filter_obj, Filtered};
pub use value::Value;

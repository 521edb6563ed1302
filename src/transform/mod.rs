pub mod dimensions;
pub mod facts;
pub mod normalize;
pub mod policy;

pub use dimensions::{extract_dimensions, Dimensions, PositionIndex};
pub use facts::{ensure_unique_keys, resolve_facts};
pub use normalize::{cast_column, normalize, NormalizeStats};
pub use policy::{CastType, ColumnPolicy, Fill, TablePolicy, UNKNOWN};

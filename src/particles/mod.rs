pub mod foliage;
pub mod ornaments;
pub mod star;

pub use foliage::{FoliageSystem, FOLIAGE_STRIDE};
pub use ornaments::{InstanceTransform, OrnamentSystem, INSTANCE_STRIDE, instance_data};
pub use star::TopStar;

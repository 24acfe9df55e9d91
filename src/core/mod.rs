mod algorithm;
mod disparity;
mod kernel;
mod normalized;
mod params;
mod roi;

pub use algorithm::{Algorithm, SgbmMode};
pub use disparity::{DisparityMap, DISP_SCALE};
pub use kernel::{StructuringElement, MAX_KERNEL_RADIUS};
pub use normalized::{
    applied_block_size, display_disparities, normalize_block_size, normalize_min_disparity, normalize_num_disparities,
    normalize_pre_filter_cap, scale_max_diff, NormalizedParameters, DISPARITY_STEP,
    MIN_APPLIED_BLOCK_SIZE, MIN_PRE_FILTER_CAP,
};
pub use params::{RawParameter, RawParameters};
pub use roi::Roi;

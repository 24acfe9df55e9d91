//! OpenCV 实现: 匹配器, 校正/重投影, highgui 显示

mod convert;
mod highgui;
mod matchers;
mod rectify;

pub use self::highgui::HighGuiDisplay;
pub use self::matchers::{OpenCvBlockMatcher, OpenCvSemiGlobalMatcher};
pub use self::rectify::{CalibratedRectifier, Calibration, OpenCvReprojector};

//! # stereo-tune
//!
//! 双目 BM/SGBM 视差参数交互调试.
//!
//! 滑动条原始值经合法化后写入两种匹配算法, 每次迭代重新匹配,
//! 视差图转换为 8 位并做形态学清理, 可选输出视差图与点云.
//! 匹配/校正/显示由 OpenCV 提供(`opencv` feature).

pub mod cli;
pub mod core;
pub mod display;
pub mod error;
pub mod matcher;
pub mod point_cloud;
pub mod postprocess;
pub mod source;
pub mod tuning;
pub mod utils;

#[cfg(feature = "opencv")]
pub mod backend;

pub use crate::matcher::{BlockMatcher, MatcherInvoker, SemiGlobalMatcher, StereoMatcher};
pub use crate::tuning::{Iteration, TuningLoop};

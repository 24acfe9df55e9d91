use image::DynamicImage;
use opencv::{
    calib3d::{self, StereoBM, StereoSGBM},
    core::{Mat, Ptr},
    prelude::*,
};

use super::convert::{image_to_mat, mat_to_disparity, roi_to_rect};
use crate::core::{DisparityMap, Roi, SgbmMode};
use crate::error::Result;
use crate::matcher::{BlockMatcher, SemiGlobalMatcher, StereoMatcher};

/// OpenCV StereoBM
pub struct OpenCvBlockMatcher {
    inner: Ptr<StereoBM>,
}

impl OpenCvBlockMatcher {
    /// 使用 OpenCV 默认参数 (16 视差, 21 窗口)
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: StereoBM::create(0, 21)?,
        })
    }
}

/// OpenCV StereoSGBM
pub struct OpenCvSemiGlobalMatcher {
    inner: Ptr<StereoSGBM>,
}

impl OpenCvSemiGlobalMatcher {
    /// 初始为 最小视差 0, 16 视差, 窗口 3
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: StereoSGBM::create(0, 16, 3, 0, 0, 0, 0, 0, 0, 0, calib3d::StereoSGBM_MODE_SGBM)?,
        })
    }
}

macro_rules! impl_stereo_matcher {
    ($ty:ty) => {
        impl StereoMatcher for $ty {
            fn set_block_size(&mut self, block_size: i32) -> Result<()> {
                Ok(self.inner.set_block_size(block_size)?)
            }
            fn set_num_disparities(&mut self, num_disparities: i32) -> Result<()> {
                Ok(self.inner.set_num_disparities(num_disparities)?)
            }
            fn set_pre_filter_cap(&mut self, pre_filter_cap: i32) -> Result<()> {
                Ok(self.inner.set_pre_filter_cap(pre_filter_cap)?)
            }
            fn set_min_disparity(&mut self, min_disparity: i32) -> Result<()> {
                Ok(self.inner.set_min_disparity(min_disparity)?)
            }
            fn set_uniqueness_ratio(&mut self, uniqueness_ratio: i32) -> Result<()> {
                Ok(self.inner.set_uniqueness_ratio(uniqueness_ratio)?)
            }
            /// OpenCV 只接受整数差值, 小数部分截断
            fn set_disp12_max_diff(&mut self, max_diff: f32) -> Result<()> {
                Ok(self.inner.set_disp12_max_diff(max_diff as i32)?)
            }
            fn set_speckle_window_size(&mut self, speckle_window_size: i32) -> Result<()> {
                Ok(self.inner.set_speckle_window_size(speckle_window_size)?)
            }
            fn compute(&mut self, left: &DynamicImage, right: &DynamicImage) -> Result<DisparityMap> {
                let left = image_to_mat(left)?;
                let right = image_to_mat(right)?;
                let mut disp = Mat::default();
                self.inner.compute(&left, &right, &mut disp)?;
                mat_to_disparity(&disp)
            }
        }
    };
}

impl_stereo_matcher!(OpenCvBlockMatcher);
impl_stereo_matcher!(OpenCvSemiGlobalMatcher);

impl BlockMatcher for OpenCvBlockMatcher {
    fn set_texture_threshold(&mut self, texture_threshold: i32) -> Result<()> {
        Ok(self.inner.set_texture_threshold(texture_threshold)?)
    }
    fn set_roi1(&mut self, roi: Roi) -> Result<()> {
        Ok(self.inner.set_roi1(roi_to_rect(roi))?)
    }
    fn set_roi2(&mut self, roi: Roi) -> Result<()> {
        Ok(self.inner.set_roi2(roi_to_rect(roi))?)
    }
    fn set_speckle_range(&mut self, speckle_range: i32) -> Result<()> {
        Ok(self.inner.set_speckle_range(speckle_range)?)
    }
}

impl SemiGlobalMatcher for OpenCvSemiGlobalMatcher {
    fn set_mode(&mut self, mode: SgbmMode) -> Result<()> {
        let mode = match mode {
            SgbmMode::Sgbm => calib3d::StereoSGBM_MODE_SGBM,
            SgbmMode::Hh => calib3d::StereoSGBM_MODE_HH,
            SgbmMode::Sgbm3Way => calib3d::StereoSGBM_MODE_SGBM_3WAY,
        };
        Ok(self.inner.set_mode(mode)?)
    }
}

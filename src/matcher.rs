use std::time::Duration;

use image::DynamicImage;
use log::{debug, info};

use crate::core::{Algorithm, DisparityMap, NormalizedParameters, Roi, SgbmMode};
use crate::error::Result;

/// 块匹配固定的斑点范围
pub const BM_SPECKLE_RANGE: i32 = 32;

/// 两种匹配算法共有的配置与计算入口
pub trait StereoMatcher {
    fn set_block_size(&mut self, block_size: i32) -> Result<()>;
    fn set_num_disparities(&mut self, num_disparities: i32) -> Result<()>;
    fn set_pre_filter_cap(&mut self, pre_filter_cap: i32) -> Result<()>;
    fn set_min_disparity(&mut self, min_disparity: i32) -> Result<()>;
    fn set_uniqueness_ratio(&mut self, uniqueness_ratio: i32) -> Result<()>;
    fn set_disp12_max_diff(&mut self, max_diff: f32) -> Result<()>;
    fn set_speckle_window_size(&mut self, speckle_window_size: i32) -> Result<()>;
    /// 计算左图的定点视差图
    fn compute(&mut self, left: &DynamicImage, right: &DynamicImage) -> Result<DisparityMap>;
}

/// 块匹配特有配置
pub trait BlockMatcher: StereoMatcher {
    fn set_texture_threshold(&mut self, texture_threshold: i32) -> Result<()>;
    fn set_roi1(&mut self, roi: Roi) -> Result<()>;
    fn set_roi2(&mut self, roi: Roi) -> Result<()>;
    fn set_speckle_range(&mut self, speckle_range: i32) -> Result<()>;
}

/// 半全局匹配特有配置
pub trait SemiGlobalMatcher: StereoMatcher {
    fn set_mode(&mut self, mode: SgbmMode) -> Result<()>;
}

fn apply_common<M: StereoMatcher>(matcher: &mut M, params: &NormalizedParameters) -> Result<()> {
    if let Some(block_size) = params.block_size {
        matcher.set_block_size(block_size)?;
    }
    matcher.set_num_disparities(params.num_disparities)?;
    matcher.set_pre_filter_cap(params.pre_filter_cap)?;
    matcher.set_min_disparity(params.min_disparity)?;
    matcher.set_uniqueness_ratio(params.uniqueness_ratio)?;
    matcher.set_disp12_max_diff(params.disp12_max_diff)?;
    matcher.set_speckle_window_size(params.speckle_window_size)?;
    Ok(())
}

/// 匹配调用器
///
/// 持有两种算法的配置对象, 每次迭代都把参数同时写入两者, 只调用所选算法计算
pub struct MatcherInvoker<B, S> {
    block: B,
    semi_global: S,
    algorithm: Algorithm,
    roi1: Roi,
    roi2: Roi,
}

impl<B: BlockMatcher, S: SemiGlobalMatcher> MatcherInvoker<B, S> {
    pub fn new(block: B, semi_global: S, algorithm: Algorithm) -> Self {
        Self {
            block,
            semi_global,
            algorithm,
            roi1: Roi::default(),
            roi2: Roi::default(),
        }
    }
    /// 校正后的有效区域, 仅用于块匹配
    pub fn with_rois(mut self, roi1: Roi, roi2: Roi) -> Self {
        self.roi1 = roi1;
        self.roi2 = roi2;
        self
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn block(&self) -> &B {
        &self.block
    }
    pub fn semi_global(&self) -> &S {
        &self.semi_global
    }
    /// 将参数写入两种算法
    pub fn apply(&mut self, params: &NormalizedParameters) -> Result<()> {
        apply_common(&mut self.block, params)?;
        apply_common(&mut self.semi_global, params)?;

        self.block.set_texture_threshold(params.texture_threshold)?;
        self.block.set_roi1(self.roi1)?;
        self.block.set_roi2(self.roi2)?;
        self.block.set_speckle_range(BM_SPECKLE_RANGE)?;

        if let Some(mode) = self.algorithm.sgbm_mode() {
            self.semi_global.set_mode(mode)?;
        }
        debug!(
            "[invoker] applied parameters to bm and sgbm. {:?}",
            params
        );
        Ok(())
    }
    /// 调用所选算法, 返回视差图与耗时
    pub fn compute(
        &mut self,
        left: &DynamicImage,
        right: &DynamicImage,
    ) -> Result<(DisparityMap, Duration)> {
        let sw = stopwatch::Stopwatch::start_new();
        let disparity = match self.algorithm {
            Algorithm::BlockMatch => self.block.compute(left, right)?,
            Algorithm::SemiGlobal | Algorithm::SemiGlobalHh | Algorithm::SemiGlobal3Way => {
                self.semi_global.compute(left, right)?
            }
        };
        let elapsed = sw.elapsed();
        info!(
            "[{}] Time elapsed: {:.3}ms",
            self.algorithm,
            elapsed.as_secs_f64() * 1000f64
        );
        Ok((disparity, elapsed))
    }
}

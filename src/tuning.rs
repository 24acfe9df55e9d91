use std::path::PathBuf;
use std::time::Duration;

use image::GrayImage;
use log::{debug, info, trace};

use crate::core::{DisparityMap, NormalizedParameters, RawParameter, RawParameters};
use crate::display::TuningDisplay;
use crate::error::Result;
use crate::matcher::{BlockMatcher, MatcherInvoker, SemiGlobalMatcher};
use crate::point_cloud;
use crate::postprocess::{self, MorphologyOrder};
use crate::source::{Reprojector, StereoPair};

/// 单次迭代的结果
pub struct Iteration {
    /// 本次使用的合法参数
    pub params: NormalizedParameters,
    /// 匹配器输出的定点视差
    pub disparity: DisparityMap,
    /// 8 位显示图(形态学处理前, 即 -o 输出的图像)
    pub display: GrayImage,
    /// 形态学清理后的显示图
    pub cleaned: GrayImage,
    /// 匹配耗时
    pub elapsed: Duration,
}

/// 调参循环
///
/// 每次迭代: 读取滑动条 -> 参数合法化 -> 匹配 -> 8 位转换 -> 形态学 -> 显示/输出 -> 等待按键
pub struct TuningLoop<B, S, D> {
    params: RawParameters,
    invoker: MatcherInvoker<B, S>,
    display: D,
    pair: StereoPair,
    morphology: MorphologyOrder,
    disparity_output: Option<PathBuf>,
    point_cloud_output: Option<(PathBuf, Box<dyn Reprojector>)>,
    iteration: u64,
}

impl<B, S, D> TuningLoop<B, S, D>
where
    B: BlockMatcher,
    S: SemiGlobalMatcher,
    D: TuningDisplay,
{
    pub fn new(invoker: MatcherInvoker<B, S>, display: D, pair: StereoPair) -> Self {
        Self {
            params: RawParameters::default(),
            invoker,
            display,
            pair,
            morphology: MorphologyOrder::default(),
            disparity_output: None,
            point_cloud_output: None,
            iteration: 0,
        }
    }
    pub fn with_params(mut self, params: RawParameters) -> Self {
        self.params = params;
        self
    }
    pub fn with_morphology(mut self, order: MorphologyOrder) -> Self {
        self.morphology = order;
        self
    }
    /// 每次迭代把 8 位视差图写到该路径
    pub fn with_disparity_output(mut self, path: PathBuf) -> Self {
        self.disparity_output = Some(path);
        self
    }
    /// 每次迭代重投影并写出点云
    pub fn with_point_cloud_output(mut self, path: PathBuf, reprojector: Box<dyn Reprojector>) -> Self {
        self.point_cloud_output = Some((path, reprojector));
        self
    }
    pub fn params(&self) -> &RawParameters {
        &self.params
    }
    /// 修改原始参数, 下一次迭代生效
    pub fn set_param(&mut self, param: RawParameter, value: i32) {
        self.params.set(param, value);
    }
    pub fn invoker(&self) -> &MatcherInvoker<B, S> {
        &self.invoker
    }
    pub fn display(&self) -> &D {
        &self.display
    }
    pub fn iterations(&self) -> u64 {
        self.iteration
    }
    /// 创建滑动条后无限迭代, 只有出错时返回
    pub fn run(&mut self) -> Result<()> {
        self.display.bind(&self.params)?;
        info!(
            "[tuning] start tuning loop. algorithm: {}, image: {}x{}",
            self.invoker.algorithm(),
            self.pair.width(),
            self.pair.height()
        );
        loop {
            self.step()?;
        }
    }
    /// 执行一次迭代
    pub fn step(&mut self) -> Result<Iteration> {
        self.iteration += 1;
        self.display.poll(&mut self.params)?;
        trace!("[tuning] iteration {} raw parameters: {:?}", self.iteration, self.params);

        let params = NormalizedParameters::from(&self.params);
        self.invoker.apply(&params)?;
        let (disparity, elapsed) = self.invoker.compute(&self.pair.left, &self.pair.right)?;
        if let Some((min, max)) = disparity.value_range() {
            debug!(
                "[tuning] iteration {} disparity range: {} - {}",
                self.iteration, min, max
            );
        }

        let display = disparity.to_display(params.display_scale());
        let cleaned = postprocess::clean_up(&display, &params.erosion, &params.dilation, self.morphology);
        self.display.show(&self.pair, &cleaned)?;
        self.export(&disparity, &display)?;
        self.display.wait()?;

        Ok(Iteration {
            params,
            disparity,
            display,
            cleaned,
            elapsed,
        })
    }
    fn export(&self, disparity: &DisparityMap, display: &GrayImage) -> Result<()> {
        if let Some(path) = &self.disparity_output {
            display.save(path)?;
            debug!("[tuning] saved disparity image to {:?}", path);
        }
        if let Some((path, reprojector)) = &self.point_cloud_output {
            info!("storing the point cloud...");
            let points = reprojector.reproject(disparity)?;
            point_cloud::save_xyz(path, &points.view())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TuningLoop;
    use crate::core::{Algorithm, DisparityMap, RawParameter, RawParameters};
    use crate::display::{Headless, TuningDisplay};
    use crate::error::Result;
    use crate::matcher::fake::RecordingMatcher;
    use crate::matcher::MatcherInvoker;
    use crate::postprocess::MorphologyOrder;
    use crate::source::{Reprojector, StereoPair};
    use image::{DynamicImage, GrayImage};
    use ndarray::Array3;

    /// 每次 poll 时把窗口大小加 2, 模拟拖动滑动条
    #[derive(Default)]
    struct ScriptedDisplay {
        bound: usize,
        polls: usize,
        shown: Vec<GrayImage>,
        waits: usize,
    }

    impl TuningDisplay for ScriptedDisplay {
        fn bind(&mut self, _params: &RawParameters) -> Result<()> {
            self.bound += 1;
            Ok(())
        }
        fn poll(&mut self, params: &mut RawParameters) -> Result<()> {
            self.polls += 1;
            let w = params.window_size();
            params.set_window_size(w + 2);
            Ok(())
        }
        fn show(&mut self, _pair: &StereoPair, disparity: &GrayImage) -> Result<()> {
            self.shown.push(disparity.clone());
            Ok(())
        }
        fn wait(&mut self) -> Result<()> {
            self.waits += 1;
            Ok(())
        }
    }

    struct FlatReprojector;

    impl Reprojector for FlatReprojector {
        fn reproject(&self, disparity: &DisparityMap) -> Result<Array3<f32>> {
            let (h, w) = (disparity.height() as usize, disparity.width() as usize);
            Ok(Array3::from_shape_fn((h, w, 3), |(y, x, c)| match c {
                0 => x as f32,
                1 => y as f32,
                // 第一行视为缺失视差
                _ => {
                    if y == 0 {
                        1.0e4
                    } else {
                        500.0
                    }
                }
            }))
        }
    }

    fn pair() -> StereoPair {
        StereoPair::new(
            DynamicImage::ImageLuma8(GrayImage::new(16, 8)),
            DynamicImage::ImageLuma8(GrayImage::new(16, 8)),
        )
        .unwrap()
    }

    fn invoker(algorithm: Algorithm) -> MatcherInvoker<RecordingMatcher, RecordingMatcher> {
        MatcherInvoker::new(
            RecordingMatcher::default(),
            RecordingMatcher::default(),
            algorithm,
        )
    }

    #[test]
    fn test_step_sequence() {
        let mut tuning = TuningLoop::new(
            invoker(Algorithm::SemiGlobal),
            ScriptedDisplay::default(),
            pair(),
        );
        let it = tuning.step().unwrap();
        // 默认窗口 5, poll 后为 7, 本次即生效
        assert_eq!(it.params.block_size, Some(7));
        assert_eq!(tuning.invoker().semi_global().block_size, Some(7));
        assert_eq!(tuning.invoker().semi_global().computed, 1);
        assert_eq!(tuning.invoker().block().computed, 0);
        assert_eq!(tuning.display().polls, 1);
        assert_eq!(tuning.display().shown.len(), 1);
        assert_eq!(tuning.display().waits, 1);
        assert_eq!(tuning.display().bound, 0);
        assert_eq!(it.display.dimensions(), (16, 8));
        assert_eq!(tuning.iterations(), 1);

        let it = tuning.step().unwrap();
        assert_eq!(it.params.block_size, Some(9));
        assert_eq!(tuning.params().window_size(), 9);
    }

    #[test]
    fn test_setter_takes_effect_next_iteration() {
        let mut tuning = TuningLoop::new(invoker(Algorithm::BlockMatch), Headless, pair());
        let it = tuning.step().unwrap();
        assert_eq!(it.params.num_disparities, 80);
        tuning.set_param(RawParameter::NumDisparities, 40);
        tuning.set_param(RawParameter::TextureThreshold, 10);
        let it = tuning.step().unwrap();
        assert_eq!(it.params.num_disparities, 32);
        assert_eq!(tuning.invoker().block().num_disparities, 32);
        assert_eq!(tuning.invoker().block().texture_threshold, Some(10));
    }

    #[test]
    fn test_repeated_steps_are_identical() {
        let params = RawParameters::default()
            .set_erosion_radius(1)
            .set_dilation_radius(2)
            .build();
        let mut tuning = TuningLoop::new(invoker(Algorithm::SemiGlobal), Headless, pair())
            .with_params(params)
            .with_morphology(MorphologyOrder::DilateThenErode);
        let first = tuning.step().unwrap();
        let second = tuning.step().unwrap();
        assert_eq!(first.disparity, second.disparity);
        assert_eq!(first.display, second.display);
        assert_eq!(first.cleaned, second.cleaned);
    }

    #[test]
    fn test_display_conversion_uses_raw_count() {
        let params = RawParameters::default()
            .set_num_disparities(20)
            .set_min_disparity(0)
            .build();
        let mut tuning = TuningLoop::new(invoker(Algorithm::SemiGlobal), Headless, pair()).with_params(params);
        let it = tuning.step().unwrap();
        // 伪匹配器按合法值 16 输出 ((x + y) % 16) * 16, 显示缩放按原始值 20 取 255 / 320
        let d = it.disparity.view()[(0, 15)] as f64;
        assert_eq!(d, 240.0);
        assert_eq!(it.params.num_disparities, 16);
        assert_eq!(it.display.get_pixel(15, 0)[0], 191);
        assert_eq!(it.display.get_pixel(15, 0)[0], (d * 255.0 / 320.0).round() as u8);
    }

    #[test]
    fn test_exports() {
        let dir = std::env::temp_dir().join(format!("stereo-tune-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let disp_path = dir.join("disp.png");
        let cloud_path = dir.join("cloud.xyz");
        let mut tuning = TuningLoop::new(invoker(Algorithm::SemiGlobal), Headless, pair())
            .with_disparity_output(disp_path.clone())
            .with_point_cloud_output(cloud_path.clone(), Box::new(FlatReprojector));
        let it = tuning.step().unwrap();

        let saved = image::open(&disp_path).unwrap().into_luma8();
        assert_eq!(saved, it.display);
        let text = std::fs::read_to_string(&cloud_path).unwrap();
        // 第一行 16 个点被过滤
        assert_eq!(text.lines().count(), 16 * 7);
        assert!(text.starts_with("0.000000 1.000000 500.000000\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

use getset::{CopyGetters, Getters, MutGetters, Setters};

/// 原始调参值名称, 每个名称对应一个滑动条
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawParameter {
    WindowSize,
    NumDisparities,
    PreFilterCap,
    MinDisparity,
    TextureThreshold,
    UniquenessRatio,
    MaxDiff,
    SpeckleWindowSize,
    ErosionRadius,
    DilationRadius,
}

impl RawParameter {
    /// 所有参数, 也是滑动条的创建顺序
    pub const ALL: [RawParameter; 10] = [
        RawParameter::WindowSize,
        RawParameter::NumDisparities,
        RawParameter::PreFilterCap,
        RawParameter::MinDisparity,
        RawParameter::TextureThreshold,
        RawParameter::UniquenessRatio,
        RawParameter::MaxDiff,
        RawParameter::SpeckleWindowSize,
        RawParameter::ErosionRadius,
        RawParameter::DilationRadius,
    ];
    /// 滑动条名称
    pub fn label(&self) -> &'static str {
        match self {
            RawParameter::WindowSize => "WindowSize",
            RawParameter::NumDisparities => "no_of_disparities",
            RawParameter::PreFilterCap => "filter_cap",
            RawParameter::MinDisparity => "min_disparity",
            RawParameter::TextureThreshold => "texture_thresh",
            RawParameter::UniquenessRatio => "uniqueness",
            RawParameter::MaxDiff => "disp12MaxDiff",
            RawParameter::SpeckleWindowSize => "Speckle Window",
            RawParameter::ErosionRadius => "Erode Kernel size",
            RawParameter::DilationRadius => "Dilate Kernel size",
        }
    }
    /// 滑动条最大值(最小值均为0)
    pub fn slider_max(&self) -> i32 {
        match self {
            RawParameter::WindowSize => 50,
            RawParameter::NumDisparities => 255,
            RawParameter::PreFilterCap => 63,
            RawParameter::MinDisparity => 60,
            RawParameter::TextureThreshold => 2000,
            RawParameter::UniquenessRatio => 30,
            RawParameter::MaxDiff => 100,
            RawParameter::SpeckleWindowSize => 50,
            RawParameter::ErosionRadius => 25,
            RawParameter::DilationRadius => 25,
        }
    }
}

/// 调参原始值, 未经任何合法性约束
///
/// 由调参循环持有, 界面只能通过 setter 修改, 修改在下一次迭代生效
#[derive(Getters, Setters, MutGetters, CopyGetters, Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawParameters {
    /// 匹配窗口大小
    #[getset(get_copy = "pub", set = "pub")]
    window_size: i32,
    /// 视差数量
    #[getset(get_copy = "pub", set = "pub")]
    num_disparities: i32,
    /// 预处理截断值
    #[getset(get_copy = "pub", set = "pub")]
    pre_filter_cap: i32,
    /// 最小视差(取反后使用)
    #[getset(get_copy = "pub", set = "pub")]
    min_disparity: i32,
    /// 纹理阈值, 仅块匹配
    #[getset(get_copy = "pub", set = "pub")]
    texture_threshold: i32,
    /// 唯一性比率
    #[getset(get_copy = "pub", set = "pub")]
    uniqueness_ratio: i32,
    /// 左右一致性最大差值, 单位 0.01
    #[getset(get_copy = "pub", set = "pub")]
    max_diff: i32,
    /// 斑点窗口大小
    #[getset(get_copy = "pub", set = "pub")]
    speckle_window_size: i32,
    /// 腐蚀核半径
    #[getset(get_copy = "pub", set = "pub")]
    erosion_radius: i32,
    /// 膨胀核半径
    #[getset(get_copy = "pub", set = "pub")]
    dilation_radius: i32,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            window_size: 5,
            num_disparities: 80,
            pre_filter_cap: 23,
            min_disparity: 1,
            texture_threshold: 500,
            uniqueness_ratio: 0,
            max_diff: 100,
            speckle_window_size: 0,
            erosion_radius: 0,
            dilation_radius: 0,
        }
    }
}

impl RawParameters {
    pub fn get(&self, param: RawParameter) -> i32 {
        match param {
            RawParameter::WindowSize => self.window_size,
            RawParameter::NumDisparities => self.num_disparities,
            RawParameter::PreFilterCap => self.pre_filter_cap,
            RawParameter::MinDisparity => self.min_disparity,
            RawParameter::TextureThreshold => self.texture_threshold,
            RawParameter::UniquenessRatio => self.uniqueness_ratio,
            RawParameter::MaxDiff => self.max_diff,
            RawParameter::SpeckleWindowSize => self.speckle_window_size,
            RawParameter::ErosionRadius => self.erosion_radius,
            RawParameter::DilationRadius => self.dilation_radius,
        }
    }
    pub fn set(&mut self, param: RawParameter, value: i32) -> &mut Self {
        match param {
            RawParameter::WindowSize => self.set_window_size(value),
            RawParameter::NumDisparities => self.set_num_disparities(value),
            RawParameter::PreFilterCap => self.set_pre_filter_cap(value),
            RawParameter::MinDisparity => self.set_min_disparity(value),
            RawParameter::TextureThreshold => self.set_texture_threshold(value),
            RawParameter::UniquenessRatio => self.set_uniqueness_ratio(value),
            RawParameter::MaxDiff => self.set_max_diff(value),
            RawParameter::SpeckleWindowSize => self.set_speckle_window_size(value),
            RawParameter::ErosionRadius => self.set_erosion_radius(value),
            RawParameter::DilationRadius => self.set_dilation_radius(value),
        }
    }
    pub fn build(&self) -> Self {
        *self
    }
}

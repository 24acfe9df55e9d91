use std::fmt;

/// 立体匹配算法, 命令行解析后在整个进程生命周期内固定
#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// 块匹配 StereoBM
    #[value(name = "bm")]
    BlockMatch,
    /// 半全局块匹配 StereoSGBM (5 方向)
    #[value(name = "sgbm")]
    SemiGlobal,
    /// 半全局块匹配, 全 8 方向 (MODE_HH)
    #[value(name = "hh")]
    SemiGlobalHh,
    /// 半全局块匹配, 3 路并行 (MODE_SGBM_3WAY)
    #[value(name = "sgbm3way")]
    SemiGlobal3Way,
}

/// 半全局匹配模式
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgbmMode {
    Sgbm,
    Hh,
    Sgbm3Way,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::SemiGlobal
    }
}

impl Algorithm {
    /// 半全局匹配的模式, 块匹配返回 None
    pub fn sgbm_mode(&self) -> Option<SgbmMode> {
        match self {
            Algorithm::BlockMatch => None,
            Algorithm::SemiGlobal => Some(SgbmMode::Sgbm),
            Algorithm::SemiGlobalHh => Some(SgbmMode::Hh),
            Algorithm::SemiGlobal3Way => Some(SgbmMode::Sgbm3Way),
        }
    }
    /// 块匹配只接受单通道灰度图, 其余模式按原图通道读取
    pub fn wants_grayscale(&self) -> bool {
        *self == Algorithm::BlockMatch
    }
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BlockMatch => "bm",
            Algorithm::SemiGlobal => "sgbm",
            Algorithm::SemiGlobalHh => "hh",
            Algorithm::SemiGlobal3Way => "sgbm3way",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

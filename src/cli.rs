use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::core::{Algorithm, RawParameters};
use crate::error::{self, Error, Result};
use crate::postprocess::MorphologyOrder;

/// Demo stereo matching converting L and R images into disparity and point clouds
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(name = "stereo-tune", version, about)]
pub struct Options {
    /// 左图路径
    pub left: PathBuf,
    /// 右图路径
    pub right: PathBuf,
    /// 匹配算法
    #[arg(long, value_enum, default_value_t = Algorithm::SemiGlobal)]
    pub algorithm: Algorithm,
    /// 匹配窗口初始值
    #[arg(long = "blocksize")]
    pub block_size: Option<i32>,
    /// 视差数量初始值
    #[arg(long = "max-disparity")]
    pub max_disparity: Option<i32>,
    /// 图像缩放系数
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f32,
    /// 不显示窗口
    #[arg(long)]
    pub no_display: bool,
    /// 内参文件(M1 D1 M2 D2)
    #[arg(short = 'i', value_name = "intrinsic_filename")]
    pub intrinsics: Option<PathBuf>,
    /// 外参文件(R T)
    #[arg(short = 'e', value_name = "extrinsic_filename")]
    pub extrinsics: Option<PathBuf>,
    /// 视差图输出路径
    #[arg(short = 'o', value_name = "disparity_image")]
    pub disparity_output: Option<PathBuf>,
    /// 点云输出路径
    #[arg(short = 'p', value_name = "point_cloud_file")]
    pub point_cloud_output: Option<PathBuf>,
    /// 腐蚀/膨胀顺序
    #[arg(long, value_enum, default_value_t = MorphologyOrder::ErodeThenDilate)]
    pub morphology: MorphologyOrder,
    /// 日志级别: info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_scale(s: &str) -> std::result::Result<f32, String> {
    match s.parse::<f32>() {
        Ok(v) if v >= 0f32 && v.is_finite() => Ok(v),
        _ => Err(error::ERROR_1004.to_string()),
    }
}

impl Options {
    /// 解析并校验参数
    pub fn parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
    /// 输出帮助信息
    pub fn write_help<W: Write>(out: &mut W) -> Result<()> {
        Self::command().write_help(out)?;
        writeln!(out)?;
        Ok(())
    }
    /// 参数间的约束
    pub fn validate(&self) -> Result<()> {
        if self.intrinsics.is_some() != self.extrinsics.is_some() {
            return Err(Error::new(1002, error::ERROR_1002));
        }
        if self.extrinsics.is_none() && self.point_cloud_output.is_some() {
            return Err(Error::new(1003, error::ERROR_1003));
        }
        Ok(())
    }
    /// 内外参文件, 两者同时给出时才有效
    pub fn calibration(&self) -> Option<(&PathBuf, &PathBuf)> {
        match (&self.intrinsics, &self.extrinsics) {
            (Some(i), Some(e)) => Some((i, e)),
            _ => None,
        }
    }
    /// 调参初始值, 命令行给出的窗口/视差数量覆盖默认值
    pub fn initial_params(&self) -> RawParameters {
        let mut params = RawParameters::default();
        if let Some(v) = self.block_size {
            params.set_window_size(v);
        }
        if let Some(v) = self.max_disparity {
            params.set_num_disparities(v);
        }
        params
    }
}

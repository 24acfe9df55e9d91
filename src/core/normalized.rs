use crate::core::{RawParameters, StructuringElement, DISP_SCALE};

/// 窗口大小低于该值时不更新算法, 保留上一次迭代的值
pub const MIN_APPLIED_BLOCK_SIZE: i32 = 7;
/// 视差数量必须是该值的整数倍
pub const DISPARITY_STEP: i32 = 16;
/// 预处理截断值下限
pub const MIN_PRE_FILTER_CAP: i32 = 7;

/// 奇数化: 偶数减一, 奇数不变
pub fn normalize_block_size(raw: i32) -> i32 {
    if raw % 2 == 0 {
        raw - 1
    } else {
        raw
    }
}

/// 窗口大小, 小于 7 时返回 None, 即不调用 setter
pub fn applied_block_size(raw: i32) -> Option<i32> {
    if raw >= MIN_APPLIED_BLOCK_SIZE {
        Some(normalize_block_size(raw))
    } else {
        None
    }
}

/// 视差数量: 不超过16时取16, 否则向下取整到16的倍数
pub fn normalize_num_disparities(raw: i32) -> i32 {
    if raw <= DISPARITY_STEP {
        DISPARITY_STEP
    } else {
        raw - raw % DISPARITY_STEP
    }
}

/// 预处理截断值: 小于7时取7, 否则奇数化
pub fn normalize_pre_filter_cap(raw: i32) -> i32 {
    if raw < MIN_PRE_FILTER_CAP {
        MIN_PRE_FILTER_CAP
    } else {
        normalize_block_size(raw)
    }
}

/// 最小视差取反
pub fn normalize_min_disparity(raw: i32) -> i32 {
    -raw
}

/// 左右一致性最大差值, 原始值单位为 0.01
pub fn scale_max_diff(raw: i32) -> f32 {
    (0.01f64 * raw as f64) as f32
}

/// 显示缩放用的视差数量, 原始值不大于 0 时退回合法化后的数量
pub fn display_disparities(raw: i32) -> i32 {
    if raw > 0 {
        raw
    } else {
        normalize_num_disparities(raw)
    }
}

/// 每次迭代由原始值重新计算的合法参数
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormalizedParameters {
    /// None 表示本次不更新窗口大小
    pub block_size: Option<i32>,
    pub num_disparities: i32,
    /// 显示缩放使用的视差数量, 取滑动条原始值
    pub display_disparities: i32,
    pub pre_filter_cap: i32,
    pub min_disparity: i32,
    pub texture_threshold: i32,
    pub uniqueness_ratio: i32,
    pub disp12_max_diff: f32,
    pub speckle_window_size: i32,
    pub erosion: StructuringElement,
    pub dilation: StructuringElement,
}

impl From<&RawParameters> for NormalizedParameters {
    fn from(raw: &RawParameters) -> Self {
        Self {
            block_size: applied_block_size(raw.window_size()),
            num_disparities: normalize_num_disparities(raw.num_disparities()),
            display_disparities: display_disparities(raw.num_disparities()),
            pre_filter_cap: normalize_pre_filter_cap(raw.pre_filter_cap()),
            min_disparity: normalize_min_disparity(raw.min_disparity()),
            texture_threshold: raw.texture_threshold(),
            uniqueness_ratio: raw.uniqueness_ratio(),
            disp12_max_diff: scale_max_diff(raw.max_diff()),
            speckle_window_size: raw.speckle_window_size(),
            erosion: StructuringElement::from_radius(raw.erosion_radius()),
            dilation: StructuringElement::from_radius(raw.dilation_radius()),
        }
    }
}

impl NormalizedParameters {
    /// 8 位显示图的缩放系数 255 / (原始视差数量 * 16)
    pub fn display_scale(&self) -> f64 {
        255f64 / (self.display_disparities as f64 * DISP_SCALE as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(normalize_block_size(6), 5);
        assert_eq!(normalize_block_size(7), 7);
        assert_eq!(applied_block_size(6), None);
        assert_eq!(applied_block_size(0), None);
        assert_eq!(applied_block_size(7), Some(7));
        assert_eq!(applied_block_size(8), Some(7));
        for raw in 7..=200 {
            let v = applied_block_size(raw).unwrap();
            assert_eq!(v % 2, 1);
            assert!(v <= raw);
        }
    }

    #[test]
    fn test_num_disparities() {
        assert_eq!(normalize_num_disparities(20), 16);
        assert_eq!(normalize_num_disparities(32), 32);
        assert_eq!(normalize_num_disparities(0), 16);
        assert_eq!(normalize_num_disparities(-5), 16);
        assert_eq!(normalize_num_disparities(255), 240);
        for raw in -20..=300 {
            let v = normalize_num_disparities(raw);
            assert_eq!(v % 16, 0);
            assert!(v >= 16);
        }
    }

    #[test]
    fn test_pre_filter_cap() {
        assert_eq!(normalize_pre_filter_cap(6), 7);
        assert_eq!(normalize_pre_filter_cap(8), 7);
        assert_eq!(normalize_pre_filter_cap(63), 63);
        for raw in -10..=100 {
            let v = normalize_pre_filter_cap(raw);
            assert_eq!(v % 2, 1);
            assert!(v >= 7);
        }
    }

    #[test]
    fn test_min_disparity_negation() {
        assert_eq!(normalize_min_disparity(3), -3);
        for raw in -60..=60 {
            assert_eq!(normalize_min_disparity(normalize_min_disparity(raw)), raw);
        }
    }

    #[test]
    fn test_max_diff_scaling() {
        assert_eq!(scale_max_diff(50), 0.5);
        assert_eq!(scale_max_diff(0), 0.0);
        assert_eq!(scale_max_diff(100), 1.0);
        for raw in 0..=1000 {
            let expected = raw as f32 / 100f32;
            assert!((scale_max_diff(raw) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_from_raw() {
        let raw = RawParameters::default()
            .set_window_size(6)
            .set_num_disparities(20)
            .set_pre_filter_cap(6)
            .set_min_disparity(3)
            .set_max_diff(50)
            .set_texture_threshold(321)
            .set_erosion_radius(2)
            .build();
        let normalized = NormalizedParameters::from(&raw);
        assert_eq!(normalized.block_size, None);
        assert_eq!(normalized.num_disparities, 16);
        assert_eq!(normalized.pre_filter_cap, 7);
        assert_eq!(normalized.min_disparity, -3);
        assert_eq!(normalized.disp12_max_diff, 0.5);
        assert_eq!(normalized.texture_threshold, 321);
        assert_eq!(normalized.erosion.size(), 5);
        assert_eq!(normalized.dilation.size(), 1);
        // 相同输入结果一致
        assert_eq!(normalized, NormalizedParameters::from(&raw));
    }

    #[test]
    fn test_display_scale() {
        let raw = RawParameters::default().set_num_disparities(64).build();
        let normalized = NormalizedParameters::from(&raw);
        assert!((normalized.display_scale() - 255f64 / 1024f64).abs() < 1e-12);

        // 缩放取原始值, 不取 16 的倍数
        let raw = RawParameters::default().set_num_disparities(20).build();
        let normalized = NormalizedParameters::from(&raw);
        assert_eq!(normalized.num_disparities, 16);
        assert_eq!(normalized.display_disparities, 20);
        assert!((normalized.display_scale() - 255f64 / 320f64).abs() < 1e-12);

        for raw in [0, -5].iter() {
            let normalized = NormalizedParameters::from(&RawParameters::default().set_num_disparities(*raw).build());
            assert_eq!(normalized.display_disparities, 16);
            assert!(normalized.display_scale().is_finite());
        }
    }
}

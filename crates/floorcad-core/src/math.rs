//! 数学基础类型与单位换算

/// 平面坐标点（内部单位：厘米）
pub type Point2 = nalgebra::Point2<f64>;

/// 平面向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-10;

/// 每个内部单位（厘米）对应的毫米数
pub const MM_PER_UNIT: f64 = 10.0;

/// 毫米转换为内部单位
///
/// 只在输入边界（如房间尺寸对话框）调用一次，核心内部不做单位换算。
#[inline]
pub fn mm_to_internal(mm: f64) -> f64 {
    mm / MM_PER_UNIT
}

/// 将角度（度）归一化到 `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid 对极小的负数可能返回 360.0
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_internal() {
        assert_eq!(mm_to_internal(3000.0), 300.0);
        assert_eq!(mm_to_internal(2700.0), 270.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(90.0), 90.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }
}

//! 几何图元
//!
//! 点到线段的距离、投影参数与钳制。所有函数都是纯函数：
//! 投影参数总是钳制在 `[0, 1]` 内，不会越过线段端点外推。

use crate::math::{Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 计算点 `p` 在线段 `ab` 上的投影参数
///
/// 返回值钳制在 `[0, 1]`，0 表示起点，1 表示终点。
/// 退化线段（`a == b`）返回 0。
pub fn project_param(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON {
        return 0.0;
    }

    ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
}

/// 线段 `ab` 上参数 `t` 处的点
#[inline]
pub fn point_at_param(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// 线段上距离 `p` 最近的点
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    point_at_param(a, b, project_param(p, a, b))
}

/// 计算点到线段的距离
///
/// 退化线段（`a == b`）时返回到 `a` 的欧氏距离。
pub fn distance_point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm()
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 起点指向终点的向量
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// 线段方向角（弧度，`atan2(dy, dx)`）
    pub fn direction_angle(&self) -> f64 {
        let v = self.vector();
        v.y.atan2(v.x)
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// 是否为零长度线段
    pub fn is_degenerate(&self) -> bool {
        self.vector().norm_squared() < EPSILON
    }

    pub fn project_param(&self, point: &Point2) -> f64 {
        project_param(point, &self.start, &self.end)
    }

    pub fn point_at(&self, t: f64) -> Point2 {
        point_at_param(&self.start, &self.end, t)
    }

    pub fn closest_point(&self, point: &Point2) -> Point2 {
        closest_point_on_segment(point, &self.start, &self.end)
    }

    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        distance_point_to_segment(point, &self.start, &self.end)
    }
}

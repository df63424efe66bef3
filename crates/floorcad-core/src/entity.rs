//! 场景实体定义
//!
//! 所有实体都是值记录。门窗通过 `wall_id` 引用所属墙体（按标识查找，
//! 不持有指针）；柜体和电器在房间坐标系中自由定位，与墙的贴靠关系
//! 只在放置时计算，不作为持久关系保存。

use crate::geometry::Segment;
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// 实体唯一标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// 分配一个进程内唯一的新ID
    pub fn new() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 墙体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: EntityId,
    pub start: Point2,
    pub end: Point2,
    pub height: f64,
    pub thickness: f64,
    pub label: String,
}

impl Wall {
    pub fn new(
        start: Point2,
        end: Point2,
        height: f64,
        thickness: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            start,
            end,
            height,
            thickness,
            label: label.into(),
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.segment().length()
    }

    /// 墙体方向角（弧度）
    pub fn angle(&self) -> f64 {
        self.segment().direction_angle()
    }

    /// 零长度墙体不参与几何查询
    pub fn is_degenerate(&self) -> bool {
        self.segment().is_degenerate()
    }
}

/// 墙体的部分更新
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallPatch {
    pub start: Option<Point2>,
    pub end: Option<Point2>,
    pub height: Option<f64>,
    pub thickness: Option<f64>,
    pub label: Option<String>,
}

impl WallPatch {
    pub fn apply(&self, wall: &mut Wall) {
        if let Some(start) = self.start {
            wall.start = start;
        }
        if let Some(end) = self.end {
            wall.end = end;
        }
        if let Some(height) = self.height {
            wall.height = height;
        }
        if let Some(thickness) = self.thickness {
            wall.thickness = thickness;
        }
        if let Some(label) = &self.label {
            wall.label = label.clone();
        }
    }
}

/// 门
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: EntityId,
    pub wall_id: EntityId,
    /// 沿墙的归一化位置，0 = 起点，1 = 终点
    pub position: f64,
    pub width: f64,
    pub height: f64,
    pub door_type: String,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// 窗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: EntityId,
    pub wall_id: EntityId,
    /// 沿墙的归一化位置，0 = 起点，1 = 终点
    pub position: f64,
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
    pub window_type: String,
    pub frame_thickness: Option<f64>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// 门窗的部分更新
///
/// `sill_height` 只对窗生效。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningPatch {
    pub wall_id: Option<EntityId>,
    pub position: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub sill_height: Option<f64>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl OpeningPatch {
    pub fn apply_to_door(&self, door: &mut Door) {
        if let Some(wall_id) = self.wall_id {
            door.wall_id = wall_id;
        }
        if let Some(position) = self.position {
            door.position = position.clamp(0.0, 1.0);
        }
        if let Some(width) = self.width {
            door.width = width;
        }
        if let Some(height) = self.height {
            door.height = height;
        }
        if let Some(name) = &self.name {
            door.name = Some(name.clone());
        }
        if let Some(price) = self.price {
            door.price = Some(price);
        }
    }

    pub fn apply_to_window(&self, window: &mut Window) {
        if let Some(wall_id) = self.wall_id {
            window.wall_id = wall_id;
        }
        if let Some(position) = self.position {
            window.position = position.clamp(0.0, 1.0);
        }
        if let Some(width) = self.width {
            window.width = width;
        }
        if let Some(height) = self.height {
            window.height = height;
        }
        if let Some(sill_height) = self.sill_height {
            window.sill_height = sill_height;
        }
        if let Some(name) = &self.name {
            window.name = Some(name.clone());
        }
        if let Some(price) = self.price {
            window.price = Some(price);
        }
    }
}

/// 柜体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinetType {
    /// 地柜
    Base,
    /// 吊柜
    Wall,
    /// 高柜
    Tall,
    /// 转角柜
    Corner,
    /// 岛台
    Island,
}

impl CabinetType {
    pub fn name(&self) -> &'static str {
        match self {
            CabinetType::Base => "Base Cabinet",
            CabinetType::Wall => "Wall Cabinet",
            CabinetType::Tall => "Tall Cabinet",
            CabinetType::Corner => "Corner Cabinet",
            CabinetType::Island => "Island Cabinet",
        }
    }
}

/// 电器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceType {
    Sink,
    Refrigerator,
    Stove,
    Oven,
    Dishwasher,
    Microwave,
    Hood,
    WashingMachine,
}

impl ApplianceType {
    pub fn name(&self) -> &'static str {
        match self {
            ApplianceType::Sink => "Sink",
            ApplianceType::Refrigerator => "Refrigerator",
            ApplianceType::Stove => "Stove",
            ApplianceType::Oven => "Oven",
            ApplianceType::Dishwasher => "Dishwasher",
            ApplianceType::Microwave => "Microwave",
            ApplianceType::Hood => "Hood",
            ApplianceType::WashingMachine => "Washing Machine",
        }
    }
}

/// 固定装置大类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureCategory {
    Cabinet,
    Appliance,
}

/// 固定装置的具体类型
///
/// "同类型"比较以此为准：两个底柜同类型，底柜与吊柜不同类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "type", rename_all = "snake_case")]
pub enum FixtureKind {
    Cabinet(CabinetType),
    Appliance(ApplianceType),
}

impl FixtureKind {
    pub fn category(&self) -> FixtureCategory {
        match self {
            FixtureKind::Cabinet(_) => FixtureCategory::Cabinet,
            FixtureKind::Appliance(_) => FixtureCategory::Appliance,
        }
    }

    /// 类型的默认显示名称
    pub fn name(&self) -> &'static str {
        match self {
            FixtureKind::Cabinet(t) => t.name(),
            FixtureKind::Appliance(t) => t.name(),
        }
    }
}

/// 固定装置（柜体或电器）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: EntityId,
    pub kind: FixtureKind,
    pub sub_category: Option<String>,
    pub position: Point2,
    /// 旋转角（度），范围 `[0, 360)`
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub name: String,
    pub material: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
}

impl Fixture {
    pub fn category(&self) -> FixtureCategory {
        self.kind.category()
    }
}

/// 固定装置的部分更新
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturePatch {
    pub position: Option<Point2>,
    pub rotation: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub name: Option<String>,
    pub sub_category: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
}

impl FixturePatch {
    pub fn apply(&self, fixture: &mut Fixture) {
        if let Some(position) = self.position {
            fixture.position = position;
        }
        if let Some(rotation) = self.rotation {
            fixture.rotation = crate::math::normalize_degrees(rotation);
        }
        if let Some(width) = self.width {
            fixture.width = width;
        }
        if let Some(height) = self.height {
            fixture.height = height;
        }
        if let Some(depth) = self.depth {
            fixture.depth = depth;
        }
        if let Some(name) = &self.name {
            fixture.name = name.clone();
        }
        if let Some(sub_category) = &self.sub_category {
            fixture.sub_category = Some(sub_category.clone());
        }
        if let Some(material) = &self.material {
            fixture.material = Some(material.clone());
        }
        if let Some(brand) = &self.brand {
            fixture.brand = Some(brand.clone());
        }
        if let Some(price) = self.price {
            fixture.price = price;
        }
    }

    /// 去掉位置和旋转，只保留可在同类型之间共享的属性
    pub fn shared_properties(&self) -> Self {
        Self {
            position: None,
            rotation: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

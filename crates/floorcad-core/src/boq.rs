//! 工程量清单（BOQ）
//!
//! 遍历场景快照，按类别汇总墙体、门窗、柜体和电器，计算每项小计与总价。
//! 生成结果交给 `BoqWorkingCopy` 编辑（深拷贝，不回写场景），最后原样导出。

use crate::entity::{Door, Fixture, Wall, Window};
use crate::error::BoqError;
use crate::scene::SceneSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CATEGORY_WALLS: &str = "Walls";
pub const CATEGORY_DOORS: &str = "Doors";
pub const CATEGORY_WINDOWS: &str = "Windows";
pub const CATEGORY_CABINETS: &str = "Cabinets";
pub const CATEGORY_APPLIANCES: &str = "Appliances";

/// 平方厘米换算平方米
const CM2_PER_M2: f64 = 10_000.0;

/// 清单条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqItem {
    pub name: String,
    /// 尺寸显示字符串，如 `80 x 200 cm`
    pub dimensions: String,
    pub quantity: u32,
    pub price: f64,
}

impl BoqItem {
    pub fn new(
        name: impl Into<String>,
        dimensions: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions: dimensions.into(),
            quantity,
            price,
        }
    }

    /// 小计 = 数量 × 单价
    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    fn same_line(&self, other: &BoqItem) -> bool {
        self.name == other.name && self.dimensions == other.dimensions && self.price == other.price
    }
}

/// 工程量清单：类别名 -> 有序条目列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boq {
    categories: BTreeMap<String, Vec<BoqItem>>,
}

impl Boq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<BoqItem>> {
        &self.categories
    }

    pub fn items(&self, category: &str) -> &[BoqItem] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 追加条目；同名、同尺寸、同单价的条目合并为数量累加
    pub fn add_item(&mut self, category: &str, item: BoqItem) {
        let items = self.categories.entry(category.to_string()).or_default();
        match items.iter_mut().find(|existing| existing.same_line(&item)) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item),
        }
    }

    pub fn category_total(&self, category: &str) -> f64 {
        self.items(category).iter().map(BoqItem::total).sum()
    }

    /// 总价 = 所有类别所有条目的 数量 × 单价 之和
    pub fn grand_total(&self) -> f64 {
        self.categories
            .values()
            .flat_map(|items| items.iter())
            .map(BoqItem::total)
            .sum()
    }

    pub fn item_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn item_mut(&mut self, category: &str, index: usize) -> Result<&mut BoqItem, BoqError> {
        self.categories
            .get_mut(category)
            .and_then(|items| items.get_mut(index))
            .ok_or_else(|| BoqError::ItemNotFound {
                category: category.to_string(),
                index,
            })
    }
}

/// 计价参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoqPricing {
    /// 墙体每平方米单价
    pub wall_rate_per_m2: f64,
    /// 模板未给出价格时的门单价
    pub door_price: f64,
    /// 模板未给出价格时的窗单价
    pub window_price: f64,
}

impl Default for BoqPricing {
    fn default() -> Self {
        Self {
            wall_rate_per_m2: 45.0,
            door_price: 250.0,
            window_price: 180.0,
        }
    }
}

/// 工程量清单生成器
#[derive(Debug, Clone, Default)]
pub struct BoqEngine {
    pricing: BoqPricing,
}

impl BoqEngine {
    pub fn new(pricing: BoqPricing) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &BoqPricing {
        &self.pricing
    }

    /// 从场景快照生成清单，空类别不出现
    pub fn generate(&self, snapshot: &SceneSnapshot) -> Boq {
        let mut boq = Boq::new();

        for wall in snapshot.wall_registry().geometric() {
            boq.add_item(CATEGORY_WALLS, self.wall_item(wall));
        }
        for door in &snapshot.doors {
            boq.add_item(CATEGORY_DOORS, self.door_item(door));
        }
        for window in &snapshot.windows {
            boq.add_item(CATEGORY_WINDOWS, self.window_item(window));
        }
        for cabinet in snapshot.cabinets() {
            boq.add_item(CATEGORY_CABINETS, fixture_item(cabinet));
        }
        for appliance in snapshot.appliances() {
            boq.add_item(CATEGORY_APPLIANCES, fixture_item(appliance));
        }

        tracing::info!(
            "Generated BOQ: {} line(s) in {} categories, total {:.2}",
            boq.item_count(),
            boq.categories.len(),
            boq.grand_total()
        );
        boq
    }

    fn wall_item(&self, wall: &Wall) -> BoqItem {
        let length = wall.length();
        let area_m2 = length * wall.height / CM2_PER_M2;
        BoqItem::new(
            wall.label.clone(),
            format!(
                "{} x {} x {} cm",
                format_length(length),
                format_length(wall.height),
                format_length(wall.thickness)
            ),
            1,
            round_price(area_m2 * self.pricing.wall_rate_per_m2),
        )
    }

    fn door_item(&self, door: &Door) -> BoqItem {
        BoqItem::new(
            door.name
                .clone()
                .unwrap_or_else(|| format!("Door ({})", door.door_type)),
            format!("{} x {} cm", format_length(door.width), format_length(door.height)),
            1,
            door.price.unwrap_or(self.pricing.door_price),
        )
    }

    fn window_item(&self, window: &Window) -> BoqItem {
        BoqItem::new(
            window
                .name
                .clone()
                .unwrap_or_else(|| format!("Window ({})", window.window_type)),
            format!("{} x {} cm", format_length(window.width), format_length(window.height)),
            1,
            window.price.unwrap_or(self.pricing.window_price),
        )
    }
}

fn fixture_item(fixture: &Fixture) -> BoqItem {
    let name = match &fixture.brand {
        Some(brand) => format!("{} {}", brand, fixture.name),
        None => fixture.name.clone(),
    };
    BoqItem::new(
        name,
        format!(
            "{} x {} x {} cm",
            format_length(fixture.width),
            format_length(fixture.height),
            format_length(fixture.depth)
        ),
        1,
        fixture.price,
    )
}

/// 长度显示：保留一位小数，整数去掉小数部分
fn format_length(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 清单的可编辑副本
///
/// 只允许编辑数量和单价。非数字、NaN 或负数的输入被拒绝，保留原值；
/// 编辑界面在输入过程中忽略该错误。
#[derive(Debug, Clone, PartialEq)]
pub struct BoqWorkingCopy {
    boq: Boq,
}

impl BoqWorkingCopy {
    pub fn new(boq: &Boq) -> Self {
        Self { boq: boq.clone() }
    }

    pub fn boq(&self) -> &Boq {
        &self.boq
    }

    /// 修改数量，只接受非负整数
    pub fn set_quantity(
        &mut self,
        category: &str,
        index: usize,
        input: &str,
    ) -> Result<(), BoqError> {
        let item = self.boq.item_mut(category, index)?;
        let quantity = input.trim().parse::<u32>().map_err(|_| {
            tracing::debug!("Ignoring quantity input {:?}", input);
            BoqError::InvalidNumericInput(input.to_string())
        })?;
        item.quantity = quantity;
        Ok(())
    }

    /// 修改单价，只接受有限的非负数
    pub fn set_price(
        &mut self,
        category: &str,
        index: usize,
        input: &str,
    ) -> Result<(), BoqError> {
        let item = self.boq.item_mut(category, index)?;
        let price = input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| {
                tracing::debug!("Ignoring price input {:?}", input);
                BoqError::InvalidNumericInput(input.to_string())
            })?;
        item.price = price;
        Ok(())
    }

    pub fn grand_total(&self) -> f64 {
        self.boq.grand_total()
    }
}

impl From<&Boq> for BoqWorkingCopy {
    fn from(boq: &Boq) -> Self {
        Self::new(boq)
    }
}
